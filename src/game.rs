//! Rolling a ball through a generated maze

use log::{debug, info};

use crate::{Cell, Direction, MazeError, Walls};

/// Velocity change of a single push
pub const IMPULSE: i32 = 5;

/// Player input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Push the ball towards a direction
    Push(Direction),
    /// Stop playing
    Quit,
}

impl Command {
    /// Parse a key: `w`, `a`, `s`, `d` to push, `q` to quit
    pub fn parse(key: char) -> Result<Self, MazeError> {
        match key.to_ascii_lowercase() {
            'w' => Ok(Command::Push(Direction::Up)),
            's' => Ok(Command::Push(Direction::Down)),
            'a' => Ok(Command::Push(Direction::Left)),
            'd' => Ok(Command::Push(Direction::Right)),
            'q' => Ok(Command::Quit),
            _ => Err(MazeError::UnknownCommand(key)),
        }
    }
}

/// The ball: where it is and where it is heading
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ball {
    pub cell: Cell,
    /// Horizontal speed, positive to the right
    pub vx: i32,
    /// Vertical speed, positive downwards
    pub vy: i32,
}

impl Ball {
    /// Direction of the next move, along the faster axis
    ///
    /// Ties go to the vertical axis.
    fn heading(&self) -> Option<Direction> {
        if self.vx == 0 && self.vy == 0 {
            None
        } else if self.vy.abs() >= self.vx.abs() {
            Some(if self.vy < 0 {
                Direction::Up
            } else {
                Direction::Down
            })
        } else {
            Some(if self.vx < 0 {
                Direction::Left
            } else {
                Direction::Right
            })
        }
    }
}

/// Result of advancing the ball
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Ball is not moving
    Idle,
    /// Ball rolled into a new cell
    Moved(Cell),
    /// Ball hit a wall and lost its speed along that axis
    Blocked(Direction),
    /// Ball is in the goal
    Won,
}

/// Game state: the maze, the ball, and the goal
pub struct Game {
    walls: Walls,
    ball: Ball,
    goal: Cell,
    won: bool,
}

impl Game {
    /// Ball starts in the top-left cell; goal is the bottom-right cell
    pub fn new(walls: Walls) -> Self {
        let start = Cell::new(0, 0);
        let goal = Cell::new(walls.rows() - 1, walls.columns() - 1);
        Self {
            walls,
            ball: Ball {
                cell: start,
                vx: 0,
                vy: 0,
            },
            goal,
            won: start == goal,
        }
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Add speed towards `direction`
    pub fn impulse(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.ball.vy -= IMPULSE,
            Direction::Down => self.ball.vy += IMPULSE,
            Direction::Left => self.ball.vx -= IMPULSE,
            Direction::Right => self.ball.vx += IMPULSE,
        }
        debug!("Impulse {:?}, velocity ({}, {})", direction, self.ball.vx, self.ball.vy);
    }

    /// Move the ball by at most one cell
    pub fn step(&mut self) -> Outcome {
        if self.won {
            return Outcome::Won;
        }
        let Some(direction) = self.ball.heading() else {
            return Outcome::Idle;
        };

        match self.walls.adjacent(self.ball.cell, direction) {
            Some(next) if self.walls.is_open(self.ball.cell, direction) => {
                self.ball.cell = next;
                if next == self.goal {
                    info!("Goal reached at {:?}", next);
                    self.won = true;
                    Outcome::Won
                } else {
                    Outcome::Moved(next)
                }
            }
            _ => {
                match direction {
                    Direction::Up | Direction::Down => self.ball.vy = 0,
                    Direction::Left | Direction::Right => self.ball.vx = 0,
                }
                Outcome::Blocked(direction)
            }
        }
    }

    /// Step until the ball comes to rest or reaches the goal
    ///
    /// Every move keeps the ball's heading until a wall takes away speed on
    /// one axis, so this ends after at most two collisions.
    pub fn roll(&mut self) -> Outcome {
        loop {
            match self.step() {
                Outcome::Moved(_) | Outcome::Blocked(_) => (),
                outcome => return outcome,
            }
        }
    }

    /// Board with the ball (`o`) and the goal (`X`)
    pub fn draw(&self) -> String {
        self.walls.draw(&[(self.ball.cell, 'o'), (self.goal, 'X')])
    }
}
