use rand::Rng as _;
use smallvec::SmallVec;

use super::Random;
use crate::gameboard::{CellId, Grid};

/// Links every cell to its north or east neighbor.
///
/// The north-east corner has neither and ends up as the root of the tree.
pub(super) fn generate(grid: &mut Grid, rng: &mut Random) {
    let ids: Vec<_> = grid.ids().collect();

    for id in ids {
        let cell = &grid[id];
        let candidates: SmallVec<[CellId; 2]> = [cell.north(), cell.east()]
            .into_iter()
            .flatten()
            .collect();

        let chosen = match candidates.len() {
            0 => continue,
            1 => candidates[0],
            n => candidates[rng.gen_range(0..n)],
        };
        grid.link(id, chosen);
    }
}
