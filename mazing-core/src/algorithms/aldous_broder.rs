use rand::seq::SliceRandom as _;

use super::Random;
use crate::gameboard::Grid;

/// Random walk, entering an untouched cell carves the passage behind the walker.
pub(super) fn generate(grid: &mut Grid, rng: &mut Random) {
    let mut cell = grid.random_cell(rng);
    let mut unvisited = grid.size() - 1;

    while unvisited > 0 {
        let Some(&neighbor) = grid[cell].neighbors().choose(rng) else {
            break;
        };

        if grid[neighbor].link_count() == 0 {
            grid.link(cell, neighbor);
            unvisited -= 1;
        }

        cell = neighbor;
    }
}
