use rand::{Rng as _, SeedableRng as _};
use thiserror::Error;

use crate::{
    algorithms::{self, Algorithm, Random, Selection},
    distances::Distances,
    gameboard::{CellId, DecodeError, Grid, GridError},
};

#[derive(Debug, Error)]
pub enum LevelError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("goal {goal:?} can not be reached from {start:?}")]
    Unreachable {
        start: (usize, usize),
        goal: (usize, usize),
    },
    #[error("move #{index} from {from:?} to {to:?} does not follow a passage")]
    IllegalMove {
        index: usize,
        from: (usize, usize),
        to: (usize, usize),
    },
}

/// Outcome of checking a recorded walk through a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Replay {
    pub moves: usize,
    pub reached_goal: bool,
}

/// A playable maze: grid, start and goal, plus the optimal route between them.
#[derive(Debug, Clone)]
pub struct Level {
    seed: Option<u64>,
    grid: Grid,
    start: CellId,
    goal: CellId,
    path: Distances,
}

impl Level {
    /// Braid fraction used for generated levels.
    pub const BRAID: f64 = 0.5;

    /// Builds the level identified by `seed`, the same seed always gives the same level.
    pub fn generate(seed: u64, rows: usize, columns: usize) -> Result<Level, LevelError> {
        Self::generate_with(seed, rows, columns, Selection::Random, Some(Self::BRAID))
    }

    pub fn generate_with(
        seed: u64,
        rows: usize,
        columns: usize,
        selection: Selection,
        braid: Option<f64>,
    ) -> Result<Level, LevelError> {
        let mut rng = Random::seed_from_u64(seed);
        let mut grid = Grid::new(rows, columns)?;

        let algorithm = algorithms::generate(&mut grid, selection, &mut rng);
        if let Some(braid) = braid {
            grid.braid(braid, &mut rng)?;
        }

        let start = grid.id(rows - 1, rng.gen_range(0..columns))?;
        let goal = grid.id(rng.gen_range(0..=rows / 2), rng.gen_range(0..columns))?;

        log::debug!("Level {} uses {}", seed, algorithm.key());
        let mut level = Self::new(grid, start, goal)?;
        level.seed = Some(seed);
        Ok(level)
    }

    /// Rebuilds a stored level from its encoded grid and the recorded start and goal.
    pub fn from_stored(
        encoded: &str,
        start: (usize, usize),
        goal: (usize, usize),
    ) -> Result<Level, LevelError> {
        let mut grid = Grid::from_json(encoded)?;
        grid.clear_content();

        let start = grid.id(start.0, start.1)?;
        let goal = grid.id(goal.0, goal.1)?;
        Self::new(grid, start, goal)
    }

    fn new(grid: Grid, start: CellId, goal: CellId) -> Result<Level, LevelError> {
        let path = grid
            .distances(start)
            .path_to(&grid, goal)
            .ok_or(LevelError::Unreachable {
                start: grid[start].pos(),
                goal: grid[goal].pos(),
            })?;

        Ok(Level {
            seed: None,
            grid,
            start,
            goal,
            path,
        })
    }

    /// Seed the level was generated from, `None` for reconstructed levels.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn algorithm(&self) -> Option<Algorithm> {
        self.grid.algorithm()
    }

    pub fn start(&self) -> CellId {
        self.start
    }

    pub fn goal(&self) -> CellId {
        self.goal
    }

    /// Shortest route from start to goal, both included.
    pub fn path(&self) -> &Distances {
        &self.path
    }

    /// Moves needed to reach the goal, the start cell is not counted.
    pub fn optimal_moves(&self) -> usize {
        self.path.len() - 1
    }

    /// Checks a recorded walk, `positions` starts with the start cell.
    pub fn replay(&self, positions: &[(usize, usize)]) -> Result<Replay, LevelError> {
        let mut current = self.start;
        let mut reached_goal = current == self.goal;

        for (index, &(row, column)) in positions.iter().enumerate() {
            let next = self.grid.id(row, column)?;
            let legal = if index == 0 {
                next == self.start
            } else {
                self.grid[current].linked(Some(next))
            };

            if !legal {
                return Err(LevelError::IllegalMove {
                    index,
                    from: self.grid[current].pos(),
                    to: (row, column),
                });
            }

            current = next;
            reached_goal |= current == self.goal;
        }

        Ok(Replay {
            moves: positions.len().saturating_sub(1),
            reached_goal,
        })
    }
}
