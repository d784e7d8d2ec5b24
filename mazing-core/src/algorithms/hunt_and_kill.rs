use rand::seq::SliceRandom as _;
use smallvec::SmallVec;

use super::Random;
use crate::gameboard::{CellId, Grid};

/// Random walk through untouched cells, when stuck the grid is scanned row by row for the first
/// untouched cell next to the carved area and the walk continues from there.
pub(super) fn generate(grid: &mut Grid, rng: &mut Random) {
    let mut current = Some(grid.random_cell(rng));

    while let Some(cell) = current {
        let unvisited: SmallVec<[CellId; 4]> = grid[cell]
            .neighbors()
            .into_iter()
            .filter(|n| grid[*n].link_count() == 0)
            .collect();

        current = match unvisited.choose(rng) {
            Some(&next) => {
                grid.link(cell, next);
                Some(next)
            }
            None => hunt(grid, rng),
        };
    }
}

fn hunt(grid: &mut Grid, rng: &mut Random) -> Option<CellId> {
    let ids: Vec<_> = grid.ids().collect();

    for id in ids {
        if grid[id].link_count() != 0 {
            continue;
        }

        let visited: SmallVec<[CellId; 4]> = grid[id]
            .neighbors()
            .into_iter()
            .filter(|n| grid[*n].link_count() != 0)
            .collect();

        if let Some(&neighbor) = visited.choose(rng) {
            grid.link(id, neighbor);
            return Some(id);
        }
    }

    None
}
