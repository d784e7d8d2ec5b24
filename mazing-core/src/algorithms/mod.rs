mod aldous_broder;
mod binary_tree;
mod hunt_and_kill;
mod recursive_backtracker;
mod sidewinder;
mod wilson;

use std::{fmt, str::FromStr};

use rand::Rng as _;
use thiserror::Error;

use crate::gameboard::Grid;

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown maze algorithm '{0}'")]
pub struct UnknownAlgorithm(pub String);

/// Maze generation algorithms, identified by their short key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    AldousBroder,
    BinaryTree,
    HuntAndKill,
    RecursiveBacktracker,
    Sidewinder,
    Wilson,
}

impl Algorithm {
    /// Catalogue order, also used for random selection.
    pub const ALL: [Algorithm; 6] = [
        Algorithm::AldousBroder,
        Algorithm::BinaryTree,
        Algorithm::HuntAndKill,
        Algorithm::RecursiveBacktracker,
        Algorithm::Sidewinder,
        Algorithm::Wilson,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::AldousBroder => "AB",
            Self::BinaryTree => "BT",
            Self::HuntAndKill => "HK",
            Self::RecursiveBacktracker => "RB",
            Self::Sidewinder => "S",
            Self::Wilson => "W",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::AldousBroder => "Aldous Broder",
            Self::BinaryTree => "Binary Tree",
            Self::HuntAndKill => "Hunt And Kill",
            Self::RecursiveBacktracker => "Recursive Backtracker",
            Self::Sidewinder => "Sidewinder",
            Self::Wilson => "Wilson",
        }
    }

    pub fn random(rng: &mut Random) -> Algorithm {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Carves a maze into `grid`, discarding any passages it had.
    pub fn generate(self, grid: &mut Grid, rng: &mut Random) {
        grid.reset();

        match self {
            Self::AldousBroder => aldous_broder::generate(grid, rng),
            Self::BinaryTree => binary_tree::generate(grid, rng),
            Self::HuntAndKill => hunt_and_kill::generate(grid, rng),
            Self::RecursiveBacktracker => recursive_backtracker::generate(grid, rng),
            Self::Sidewinder => sidewinder::generate(grid, rng),
            Self::Wilson => wilson::generate(grid, rng),
        }

        grid.set_algorithm(Some(self));
        log::debug!(
            "Generated {}x{} maze with {} ({} passages)",
            grid.rows(),
            grid.columns(),
            self.key(),
            grid.link_count()
        );
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.key() == key)
            .ok_or_else(|| UnknownAlgorithm(key.to_string()))
    }
}

/// Algorithm requested by the caller, either a specific one or a random pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    Fixed(Algorithm),
    #[default]
    Random,
}

impl Selection {
    pub fn resolve(self, rng: &mut Random) -> Algorithm {
        match self {
            Self::Fixed(algorithm) => algorithm,
            Self::Random => Algorithm::random(rng),
        }
    }
}

impl FromStr for Selection {
    type Err = UnknownAlgorithm;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        if key.eq_ignore_ascii_case("random") {
            Ok(Self::Random)
        } else {
            key.parse().map(Self::Fixed)
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(algorithm) => f.write_str(algorithm.key()),
            Self::Random => f.write_str("random"),
        }
    }
}

/// Generates a maze with the selected algorithm and returns the one that was used.
pub fn generate(grid: &mut Grid, selection: Selection, rng: &mut Random) -> Algorithm {
    let algorithm = selection.resolve(rng);
    algorithm.generate(grid, rng);
    algorithm
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng as _;

    #[test]
    fn keys_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.key().parse::<Algorithm>(), Ok(algorithm));
        }
        assert_eq!(
            "XX".parse::<Algorithm>(),
            Err(UnknownAlgorithm("XX".to_string()))
        );
        assert!("bt".parse::<Algorithm>().is_err());
    }

    #[test]
    fn selection_parsing() {
        assert_eq!("random".parse::<Selection>(), Ok(Selection::Random));
        assert_eq!("W".parse::<Selection>(), Ok(Selection::Fixed(Algorithm::Wilson)));
        assert!("none".parse::<Selection>().is_err());
    }

    #[test]
    fn generate_records_algorithm() {
        let mut rng = Random::seed_from_u64(3);
        let mut grid = Grid::new(4, 4).unwrap();
        let used = generate(&mut grid, Selection::Random, &mut rng);

        assert_eq!(grid.algorithm(), Some(used));
        assert_eq!(grid.link_count(), 15);
    }

    #[test]
    fn regenerating_starts_from_scratch() {
        let mut rng = Random::seed_from_u64(3);
        let mut grid = Grid::new(5, 5).unwrap();
        Algorithm::Wilson.generate(&mut grid, &mut rng);
        grid.braid(1.0, &mut rng).unwrap();
        Algorithm::BinaryTree.generate(&mut grid, &mut rng);

        assert_eq!(grid.link_count(), 24);
        assert_eq!(grid.braid_factor(), None);
        assert_eq!(grid.algorithm(), Some(Algorithm::BinaryTree));
    }
}
