use rand::{seq::SliceRandom as _, Rng as _};

use super::Random;
use crate::gameboard::Grid;

/// Builds each row from runs of east passages, every closed run gets one passage north.
pub(super) fn generate(grid: &mut Grid, rng: &mut Random) {
    let ids: Vec<_> = grid.ids().collect();
    let mut run = Vec::with_capacity(grid.columns());

    for id in ids {
        let cell = &grid[id];
        if cell.west().is_none() {
            run.clear();
        }
        run.push(id);

        let east = cell.east();
        let at_northern_boundary = cell.north().is_none();

        let should_close_out = match east {
            None => true,
            Some(_) => !at_northern_boundary && rng.gen_bool(0.5),
        };

        if should_close_out {
            if let Some(&member) = run.choose(rng) {
                if let Some(north) = grid[member].north() {
                    grid.link(member, north);
                }
            }
            run.clear();
        } else if let Some(east) = east {
            grid.link(id, east);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameboard::Direction;
    use rand::SeedableRng as _;

    #[test]
    fn every_run_opens_north_once() {
        let mut rng = Random::seed_from_u64(21);
        let mut grid = Grid::new(6, 7).unwrap();
        generate(&mut grid, &mut rng);

        assert_eq!(grid.link_count(), grid.size() - 1);
        for row in grid.each_row() {
            let north = row.iter().filter(|c| c.is_linked(Direction::North)).count();
            let runs = row.iter().filter(|c| !c.is_linked(Direction::East)).count();

            if row[0].row() == 0 {
                assert!(row[..row.len() - 1].iter().all(|c| c.is_linked(Direction::East)));
                assert_eq!(north, 0);
            } else {
                assert_eq!(north, runs);
            }
        }
    }
}
