use rand::seq::SliceRandom as _;

use super::Random;
use crate::gameboard::Grid;

/// Loop-erased random walks from unvisited cells until they hit the visited part of the maze.
pub(super) fn generate(grid: &mut Grid, rng: &mut Random) {
    // kept in row-major order, removal must not reorder it
    let mut unvisited: Vec<_> = grid.ids().collect();
    let mut is_unvisited = vec![true; grid.size()];

    let Some(&first) = unvisited.choose(rng) else {
        return;
    };
    unvisited.retain(|c| *c != first);
    is_unvisited[first.index()] = false;

    while let Some(&start) = unvisited.choose(rng) {
        let mut cell = start;
        let mut path = vec![cell];

        while is_unvisited[cell.index()] {
            let Some(&next) = grid[cell].neighbors().choose(rng) else {
                return;
            };
            cell = next;

            match path.iter().position(|c| *c == cell) {
                Some(position) => path.truncate(position + 1),
                None => path.push(cell),
            }
        }

        for pair in path.windows(2) {
            grid.link(pair[0], pair[1]);
            unvisited.retain(|c| *c != pair[0]);
            is_unvisited[pair[0].index()] = false;
        }
    }
}
