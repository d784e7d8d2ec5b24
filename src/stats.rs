use mazing_core::{gameboard::GridError, Algorithm, Grid, Random};
use rand::SeedableRng as _;
use rayon::prelude::*;

/// Averages over a batch of mazes built by one algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlgorithmStats {
    pub algorithm: Algorithm,
    pub mazes: usize,
    pub dead_ends: f64,
    pub path_length: f64,
}

/// Generates `count` mazes with seeds `seed, seed + 1, ...`, in parallel.
///
/// Path length is measured in moves from the top-left to the bottom-right cell.
pub fn collect(
    algorithm: Algorithm,
    count: usize,
    seed: u64,
    rows: usize,
    columns: usize,
) -> Result<AlgorithmStats, GridError> {
    let samples = (0..count as u64)
        .into_par_iter()
        .map(|i| -> Result<(usize, usize), GridError> {
            let mut rng = Random::seed_from_u64(seed.wrapping_add(i));
            let mut grid = Grid::new(rows, columns)?;
            algorithm.generate(&mut grid, &mut rng);

            let start = grid.id(0, 0)?;
            let goal = grid.id(rows - 1, columns - 1)?;
            let length = grid.distances(start).get(goal).unwrap_or_default();
            Ok((grid.dead_ends().len(), length))
        })
        .collect::<Result<Vec<_>, GridError>>()?;

    let total = samples.len().max(1) as f64;
    let (dead_ends, path_length) = samples
        .iter()
        .fold((0, 0), |(d, p), (dead_ends, length)| (d + dead_ends, p + length));

    log::debug!("Collected {} samples for {}", samples.len(), algorithm.key());
    Ok(AlgorithmStats {
        algorithm,
        mazes: samples.len(),
        dead_ends: dead_ends as f64 / total,
        path_length: path_length as f64 / total,
    })
}

pub fn collect_all(
    count: usize,
    seed: u64,
    rows: usize,
    columns: usize,
) -> Result<Vec<AlgorithmStats>, GridError> {
    Algorithm::ALL
        .into_iter()
        .map(|algorithm| collect(algorithm, count, seed, rows, columns))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_do_not_depend_on_scheduling() {
        let a = collect_all(8, 100, 6, 6).unwrap();
        let b = collect_all(8, 100, 6, 6).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), Algorithm::ALL.len());
    }

    #[test]
    fn corridor_grids_are_exact() {
        for stats in collect_all(5, 0, 1, 9).unwrap() {
            assert_eq!(stats.mazes, 5);
            assert_eq!(stats.dead_ends, 2.0);
            assert_eq!(stats.path_length, 8.0);
        }
    }

    #[test]
    fn paths_are_at_least_manhattan() {
        let stats = collect(Algorithm::Wilson, 10, 7, 5, 8).unwrap();
        assert!(stats.path_length >= 11.0);
        assert!(stats.dead_ends >= 1.0);
    }

    #[test]
    fn invalid_size_is_reported() {
        assert!(matches!(
            collect(Algorithm::BinaryTree, 2, 0, 0, 4),
            Err(GridError::InvalidSize { .. })
        ));
    }
}
