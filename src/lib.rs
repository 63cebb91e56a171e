//! Random perfect mazes with a ball to roll to the goal
//!
//! A maze is carved out of a rectangular grid by a randomized depth-first
//! walk, so that every cell is reachable from every other cell along exactly
//! one path. The result is a pair of wall grids ([Walls]) that can be drawn
//! as text, turned into wall segments by [renderer::WallRenderer], or played
//! through with [game::Game].
//!
//! # Examples
//! ## Generate and print a maze
//! ```
//! use ball_maze::maze_generator::MazeGenerator;
//! use ball_maze::random::RngSource;
//!
//! let mut gen = MazeGenerator::new(RngSource::seeded(Some(13)));
//! let walls = gen.generate(4, 6).unwrap();
//!
//! assert_eq!(walls.passage_count(), 4 * 6 - 1);
//! println!("{}", walls);
//! ```
//!
//! ## Roll the ball
//! ```
//! use ball_maze::game::{Game, Outcome};
//! use ball_maze::maze_generator::MazeGenerator;
//! use ball_maze::random::FixedSource;
//! use ball_maze::Direction;
//!
//! // Start at (0, 0), neighbours tried in order up, right, down, left:
//! // the carve snakes right along the top row and back along the bottom.
//! let walls = MazeGenerator::new(FixedSource).generate(2, 2).unwrap();
//! let mut game = Game::new(walls);
//!
//! game.impulse(Direction::Right);
//! game.roll();
//! game.impulse(Direction::Down);
//! assert_eq!(game.roll(), Outcome::Won);
//! ```

use std::fmt;

use itertools::Itertools;
use thiserror::Error;

pub mod game;
pub mod maze_generator;
pub mod random;
pub mod renderer;

/// Errors raised while building or playing a maze
#[derive(Error, Debug, PartialEq)]
pub enum MazeError {
    /// A grid needs at least one row and one column
    #[error("maze must have at least one row and one column, got {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },
    /// Drawing area and wall sizes must be positive and finite
    #[error("invalid drawing geometry: {0}")]
    InvalidGeometry(String),
    /// Input character that does not map to an action
    #[error("unknown command `{0}`")]
    UnknownCommand(char),
}

/// Location of a cell in the maze
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
}

impl Cell {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Adjacent cell in `direction`, or `None` when it would leave the grid
    /// on the top or left side.
    ///
    /// The bottom and right edges are not known here; see [Walls::contains].
    pub fn step(self, direction: Direction) -> Option<Cell> {
        match direction {
            Direction::Up => self.row.checked_sub(1).map(|row| Cell::new(row, self.column)),
            Direction::Right => Some(Cell::new(self.row, self.column + 1)),
            Direction::Down => Some(Cell::new(self.row + 1, self.column)),
            Direction::Left => self
                .column
                .checked_sub(1)
                .map(|column| Cell::new(self.row, column)),
        }
    }
}

/// One of the four grid directions
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions, in the order the carve lists neighbours before
    /// shuffling.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];
}

/// Passages of a generated maze
///
/// Both grids start fully closed (`false`). `vertical_open[r][c]` is the
/// wall between `(r, c)` and `(r, c + 1)`; `horizontal_open[r][c]` is the
/// wall between `(r, c)` and `(r + 1, c)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Walls {
    rows: usize,
    columns: usize,
    /// `rows × (columns - 1)`
    vertical_open: Vec<Vec<bool>>,
    /// `(rows - 1) × columns`
    horizontal_open: Vec<Vec<bool>>,
}

impl Walls {
    /// All walls present
    ///
    /// Returns error, if either dimension is zero.
    pub fn closed(rows: usize, columns: usize) -> Result<Self, MazeError> {
        if rows == 0 || columns == 0 {
            return Err(MazeError::InvalidDimensions { rows, columns });
        }
        Ok(Self {
            rows,
            columns,
            vertical_open: vec![vec![false; columns - 1]; rows],
            horizontal_open: vec![vec![false; columns]; rows - 1],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn vertical_open(&self) -> &[Vec<bool>] {
        &self.vertical_open
    }

    pub fn horizontal_open(&self) -> &[Vec<bool>] {
        &self.horizontal_open
    }

    /// Whether `cell` lies inside the grid
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.column < self.columns
    }

    /// Neighbour of `cell` in `direction`, if it is inside the grid
    pub fn adjacent(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        cell.step(direction).filter(|&next| self.contains(next))
    }

    /// Whether there is a passage from `cell` towards `direction`
    ///
    /// The outer border is always closed.
    pub fn is_open(&self, cell: Cell, direction: Direction) -> bool {
        if !self.contains(cell) {
            return false;
        }
        match self.adjacent(cell, direction) {
            None => false,
            Some(next) => match direction {
                Direction::Left | Direction::Right => {
                    self.vertical_open[cell.row][cell.column.min(next.column)]
                }
                Direction::Up | Direction::Down => {
                    self.horizontal_open[cell.row.min(next.row)][cell.column]
                }
            },
        }
    }

    /// Remove the wall between `cell` and its neighbour in `direction`
    ///
    /// The neighbour must be inside the grid.
    pub(crate) fn open(&mut self, cell: Cell, direction: Direction) {
        match direction {
            Direction::Left => self.vertical_open[cell.row][cell.column - 1] = true,
            Direction::Right => self.vertical_open[cell.row][cell.column] = true,
            Direction::Up => self.horizontal_open[cell.row - 1][cell.column] = true,
            Direction::Down => self.horizontal_open[cell.row][cell.column] = true,
        }
    }

    /// Cells reachable from `cell` in one step
    pub fn neighbours(&self, cell: Cell) -> Vec<Cell> {
        Direction::ALL
            .into_iter()
            .filter(|&direction| self.is_open(cell, direction))
            .filter_map(|direction| cell.step(direction))
            .collect()
    }

    /// Number of removed walls
    ///
    /// A perfect maze has exactly `rows * columns - 1` passages.
    pub fn passage_count(&self) -> usize {
        self.vertical_open
            .iter()
            .chain(self.horizontal_open.iter())
            .flatten()
            .filter(|&&open| open)
            .count()
    }

    /// Draw the maze as text, marking chosen cells
    ///
    /// - `marks`: Cells with the character to draw inside them.
    pub fn draw(&self, marks: &[(Cell, char)]) -> String {
        let mark_at = |cell: Cell| {
            marks
                .iter()
                .find(|(c, _)| *c == cell)
                .map_or(' ', |(_, m)| *m)
        };

        let border = format!("+{}", "---+".repeat(self.columns));
        let mut lines = vec![border.clone()];
        for row in 0..self.rows {
            let cells = (0..self.columns)
                .map(|column| {
                    let cell = Cell::new(row, column);
                    let east = if self.is_open(cell, Direction::Right) {
                        ' '
                    } else {
                        '|'
                    };
                    format!(" {} {}", mark_at(cell), east)
                })
                .join("");
            lines.push(format!("|{}", cells));

            if row + 1 < self.rows {
                let floor = (0..self.columns)
                    .map(|column| {
                        if self.horizontal_open[row][column] {
                            "   +"
                        } else {
                            "---+"
                        }
                    })
                    .join("");
                lines.push(format!("+{}", floor));
            }
        }
        lines.push(border);
        lines.join("\n")
    }
}

impl fmt::Display for Walls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.draw(&[]))
    }
}

/// Dimensions and drawing geometry of a maze
#[derive(Clone, Debug, PartialEq)]
pub struct MazeConfig {
    /// Number of cell rows
    pub rows: usize,
    /// Number of cell columns
    pub columns: usize,
    /// Width of the drawing area
    pub width: f32,
    /// Height of the drawing area
    pub height: f32,
    /// Thickness of the inner walls
    pub wall_thickness: f32,
    /// Thickness of the outer border
    pub border_thickness: f32,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            rows: 12,
            columns: 15,
            width: 900.0,
            height: 720.0,
            wall_thickness: 5.0,
            border_thickness: 2.0,
        }
    }
}

impl MazeConfig {
    /// Check that the grid and geometry can be drawn
    pub fn validate(&self) -> Result<(), MazeError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(MazeError::InvalidDimensions {
                rows: self.rows,
                columns: self.columns,
            });
        }
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("wall thickness", self.wall_thickness),
            ("border thickness", self.border_thickness),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(MazeError::InvalidGeometry(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Width and height of a single cell
    pub fn cell_size(&self) -> (f32, f32) {
        (
            self.width / self.columns as f32,
            self.height / self.rows as f32,
        )
    }
}
