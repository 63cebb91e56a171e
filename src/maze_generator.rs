//! Maze generation

use log::{debug, trace};

use crate::random::RandomSource;
use crate::{Cell, Direction, MazeError, Walls};

/// Perfect maze generator
///
/// Carves a spanning tree out of a closed grid with a randomized depth-first
/// walk: every cell ends up reachable from every other cell along exactly
/// one path.
pub struct MazeGenerator<S> {
    random: S,
}

impl<S: RandomSource> MazeGenerator<S> {
    pub fn new(random: S) -> Self {
        Self { random }
    }

    /// Generate a maze of `rows × columns` cells
    ///
    /// The walk starts from a random cell (row drawn first, then column).
    ///
    /// Returns error, if either dimension is zero.
    pub fn generate(&mut self, rows: usize, columns: usize) -> Result<Walls, MazeError> {
        let mut carve = Carve::new(rows, columns)?;

        let start_row = self.random.uniform_int(rows);
        let start_column = self.random.uniform_int(columns);
        let start = Cell::new(start_row, start_column);
        debug!("Carving {}x{} maze from {:?}", rows, columns, start);

        carve.visit(start, &mut self.random);

        let walls = carve.walls;
        debug!("Maze carved with {} passages", walls.passage_count());
        Ok(walls)
    }
}

/// Cell being walked, and how far through its shuffled neighbours we are
struct Frame {
    cell: Cell,
    neighbours: [Direction; 4],
    next: usize,
}

/// Working state of a single generation pass
struct Carve {
    visited: Vec<Vec<bool>>,
    walls: Walls,
}

impl Carve {
    fn new(rows: usize, columns: usize) -> Result<Self, MazeError> {
        Ok(Self {
            walls: Walls::closed(rows, columns)?,
            visited: vec![vec![false; columns]; rows],
        })
    }

    /// Walk depth-first from `start`, opening a wall into every cell not
    /// seen before
    ///
    /// Equivalent to the recursive walk: enter a cell, shuffle its four
    /// neighbours, and fully explore each unvisited one before trying the
    /// next. The stack keeps the remaining neighbours of every open cell, so
    /// cells are entered and the random source is consulted in exactly the
    /// recursive order. An already visited `start` is a no-op.
    fn visit<S: RandomSource>(&mut self, start: Cell, random: &mut S) {
        let Some(frame) = self.enter(start, random) else {
            return;
        };
        let mut stack = vec![frame];

        while let Some(frame) = stack.last_mut() {
            if frame.next == frame.neighbours.len() {
                stack.pop();
                continue;
            }
            let cell = frame.cell;
            let direction = frame.neighbours[frame.next];
            frame.next += 1;

            let Some(next) = self.walls.adjacent(cell, direction) else {
                continue;
            };
            if self.visited[next.row][next.column] {
                continue;
            }

            trace!("Open {:?} from {:?}", direction, cell);
            self.walls.open(cell, direction);
            if let Some(frame) = self.enter(next, random) {
                stack.push(frame);
            }
        }
    }

    /// Mark `cell` visited and order its neighbours, unless already visited
    fn enter<S: RandomSource>(&mut self, cell: Cell, random: &mut S) -> Option<Frame> {
        let seen = &mut self.visited[cell.row][cell.column];
        if *seen {
            return None;
        }
        *seen = true;

        let mut neighbours = Direction::ALL;
        random.shuffle(&mut neighbours);
        Some(Frame {
            cell,
            neighbours,
            next: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use quickcheck::{quickcheck, TestResult};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{Carve, MazeGenerator};
    use crate::random::{FixedSource, RandomSource, RngSource};
    use crate::{Cell, Direction, MazeError, Walls};

    /// Start from a chosen cell, delegate everything else
    struct StartAt<S> {
        start: VecDeque<usize>,
        inner: S,
        shuffles: usize,
    }

    impl<S> StartAt<S> {
        fn new(cell: Cell, inner: S) -> Self {
            Self {
                start: VecDeque::from([cell.row, cell.column]),
                inner,
                shuffles: 0,
            }
        }
    }

    impl<S: RandomSource> RandomSource for StartAt<S> {
        fn uniform_int(&mut self, n: usize) -> usize {
            match self.start.pop_front() {
                Some(value) => value,
                None => self.inner.uniform_int(n),
            }
        }

        fn shuffle<T>(&mut self, items: &mut [T]) {
            self.shuffles += 1;
            self.inner.shuffle(items)
        }
    }

    /// Cells reachable from `start` through open passages
    fn reachable(walls: &Walls, start: Cell) -> usize {
        let mut seen = vec![vec![false; walls.columns()]; walls.rows()];
        let mut queue = VecDeque::from([start]);
        seen[start.row][start.column] = true;
        let mut count = 0;
        while let Some(cell) = queue.pop_front() {
            count += 1;
            for next in walls.neighbours(cell) {
                if !seen[next.row][next.column] {
                    seen[next.row][next.column] = true;
                    queue.push_back(next);
                }
            }
        }
        count
    }

    /// Recursive formulation of the walk, for comparing traversal order
    fn visit_recursive<S: RandomSource>(
        cell: Cell,
        visited: &mut Vec<Vec<bool>>,
        walls: &mut Walls,
        random: &mut S,
        order: &mut Vec<Cell>,
    ) {
        if visited[cell.row][cell.column] {
            return;
        }
        visited[cell.row][cell.column] = true;
        order.push(cell);

        let mut neighbours = Direction::ALL;
        random.shuffle(&mut neighbours);
        for direction in neighbours {
            let Some(next) = walls.adjacent(cell, direction) else {
                continue;
            };
            if visited[next.row][next.column] {
                continue;
            }
            walls.open(cell, direction);
            visit_recursive(next, visited, walls, random, order);
        }
    }

    #[test]
    fn single_cell_has_no_passages() {
        let walls = MazeGenerator::new(RngSource::seeded(Some(1)))
            .generate(1, 1)
            .unwrap();

        assert_eq!(walls.vertical_open(), &[Vec::<bool>::new()]);
        assert!(walls.horizontal_open().is_empty());
        assert_eq!(walls.passage_count(), 0);
    }

    #[test]
    fn zero_dimensions_fail() {
        let mut gen = MazeGenerator::new(FixedSource);
        assert_eq!(
            gen.generate(0, 3),
            Err(MazeError::InvalidDimensions { rows: 0, columns: 3 })
        );
        assert!(gen.generate(3, 0).is_err());
    }

    #[test]
    fn two_by_two_with_identity_shuffle() {
        let walls = MazeGenerator::new(FixedSource).generate(2, 2).unwrap();

        // (0,0) -> right -> (0,1) -> down -> (1,1) -> left -> (1,0)
        assert_eq!(walls.vertical_open(), &[vec![true], vec![true]]);
        assert_eq!(walls.horizontal_open(), &[vec![false, true]]);
        assert_eq!(walls.passage_count(), 3);
    }

    #[test]
    fn fixed_source_is_deterministic() {
        let a = MazeGenerator::new(FixedSource).generate(7, 9).unwrap();
        let b = MazeGenerator::new(FixedSource).generate(7, 9).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn same_seed_same_maze() {
        let a = MazeGenerator::new(RngSource::seeded(Some(99)))
            .generate(12, 15)
            .unwrap();
        let b = MazeGenerator::new(RngSource::seeded(Some(99)))
            .generate(12, 15)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn every_cell_visited_once() {
        let mut random = StartAt::new(Cell::new(3, 4), RngSource::seeded(Some(5)));
        let mut carve = Carve::new(6, 8).unwrap();
        carve.visit(Cell::new(3, 4), &mut random);

        assert!(carve.visited.iter().flatten().all(|&v| v));
        // One shuffle per entered cell
        assert_eq!(random.shuffles, 6 * 8);
    }

    #[test]
    fn visiting_a_visited_cell_changes_nothing() {
        let mut random = StartAt::new(Cell::new(0, 0), RngSource::seeded(Some(11)));
        let mut carve = Carve::new(4, 4).unwrap();
        carve.visit(Cell::new(2, 1), &mut random);
        let walls = carve.walls.clone();
        let shuffles = random.shuffles;

        carve.visit(Cell::new(2, 1), &mut random);
        carve.visit(Cell::new(0, 3), &mut random);

        assert_eq!(carve.walls, walls);
        assert_eq!(random.shuffles, shuffles);
    }

    #[test]
    fn walk_matches_recursive_order() {
        let (rows, columns) = (9, 13);
        let start = Cell::new(4, 6);

        let mut expected_walls = Walls::closed(rows, columns).unwrap();
        let mut visited = vec![vec![false; columns]; rows];
        let mut expected_order = Vec::new();
        visit_recursive(
            start,
            &mut visited,
            &mut expected_walls,
            &mut RngSource::new(StdRng::seed_from_u64(2024)),
            &mut expected_order,
        );

        let walls = MazeGenerator::new(StartAt::new(
            start,
            RngSource::new(StdRng::seed_from_u64(2024)),
        ))
        .generate(rows, columns)
        .unwrap();

        assert_eq!(walls, expected_walls);
        assert_eq!(expected_order.len(), rows * columns);
    }

    #[test]
    fn long_corridor_does_not_overflow() {
        let walls = MazeGenerator::new(FixedSource).generate(1, 200_000).unwrap();
        assert_eq!(walls.passage_count(), 199_999);
    }

    #[test]
    fn generated_mazes_are_spanning_trees() {
        fn prop(rows: u8, columns: u8, seed: u64) -> TestResult {
            let (rows, columns) = (rows as usize % 24 + 1, columns as usize % 24 + 1);
            let mut gen = MazeGenerator::new(RngSource::seeded(Some(seed)));
            let walls = match gen.generate(rows, columns) {
                Ok(walls) => walls,
                Err(_) => return TestResult::failed(),
            };

            let tree = walls.passage_count() == rows * columns - 1;
            let connected = reachable(&walls, Cell::new(0, 0)) == rows * columns;
            let shaped = walls.vertical_open().len() == rows
                && walls
                    .vertical_open()
                    .iter()
                    .all(|row| row.len() == columns - 1)
                && walls.horizontal_open().len() == rows - 1
                && walls.horizontal_open().iter().all(|row| row.len() == columns);
            TestResult::from_bool(tree && connected && shaped)
        }
        quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }

    #[test]
    fn passages_join_adjacent_cells() {
        let walls = MazeGenerator::new(RngSource::seeded(Some(8)))
            .generate(10, 10)
            .unwrap();

        for row in 0..walls.rows() {
            for column in 0..walls.columns() {
                let cell = Cell::new(row, column);
                for next in walls.neighbours(cell) {
                    assert_ne!(next, cell);
                    assert!(walls.contains(next));
                    assert_eq!(row.abs_diff(next.row) + column.abs_diff(next.column), 1);
                    assert!(walls.neighbours(next).contains(&cell));
                }
            }
        }
    }
}
