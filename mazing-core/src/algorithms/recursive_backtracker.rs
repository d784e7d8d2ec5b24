use rand::seq::SliceRandom as _;
use smallvec::SmallVec;

use super::Random;
use crate::gameboard::{CellId, Grid};

/// Depth-first walk with an explicit stack.
pub(super) fn generate(grid: &mut Grid, rng: &mut Random) {
    let mut stack = Vec::with_capacity(grid.size());
    stack.push(grid.random_cell(rng));

    while let Some(&current) = stack.last() {
        let unvisited: SmallVec<[CellId; 4]> = grid[current]
            .neighbors()
            .into_iter()
            .filter(|n| grid[*n].link_count() == 0)
            .collect();

        match unvisited.choose(rng) {
            Some(&next) => {
                grid.link(current, next);
                stack.push(next);
            }
            None => {
                stack.pop();
            }
        }
    }
}
