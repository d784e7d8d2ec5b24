use mazing_core::{Algorithm, Direction, Grid, Random};
use rand::SeedableRng as _;

const SIZES: [(usize, usize); 5] = [(1, 1), (1, 7), (6, 1), (5, 5), (9, 13)];

fn generated(algorithm: Algorithm, rows: usize, columns: usize, seed: u64) -> Grid {
    let mut rng = Random::seed_from_u64(seed);
    let mut grid = Grid::new(rows, columns).unwrap();
    algorithm.generate(&mut grid, &mut rng);
    grid
}

#[test]
fn every_algorithm_builds_a_perfect_maze() {
    for algorithm in Algorithm::ALL {
        for (rows, columns) in SIZES {
            for seed in 0..4 {
                let grid = generated(algorithm, rows, columns, seed);
                let root = grid.id(0, 0).unwrap();

                assert_eq!(
                    grid.link_count(),
                    grid.size() - 1,
                    "{} on {}x{} seed {}",
                    algorithm.key(),
                    rows,
                    columns,
                    seed
                );
                assert_eq!(grid.distances(root).len(), grid.size());
            }
        }
    }
}

#[test]
fn links_are_symmetric() {
    for algorithm in Algorithm::ALL {
        let grid = generated(algorithm, 7, 7, 99);
        for id in grid.ids() {
            for dir in Direction::get_in_order() {
                if let Some(other) = grid.passage(id, dir) {
                    assert!(grid[other].is_linked(dir.reverse()));
                }
            }
        }
    }
}

#[test]
fn full_braid_removes_every_dead_end() {
    let mut rng = Random::seed_from_u64(2024);
    for algorithm in Algorithm::ALL {
        for (rows, columns) in [(2, 2), (5, 5), (8, 3)] {
            let mut grid = Grid::new(rows, columns).unwrap();
            algorithm.generate(&mut grid, &mut rng);
            grid.braid(1.0, &mut rng).unwrap();

            assert!(grid.dead_ends().is_empty(), "{} on {}x{}", algorithm.key(), rows, columns);
        }
    }
}

#[test]
fn zero_braid_changes_nothing() {
    let mut rng = Random::seed_from_u64(8);
    let mut grid = generated(Algorithm::RecursiveBacktracker, 6, 6, 8);
    let before = grid.edges();

    assert_eq!(grid.braid(0.0, &mut rng), Ok(0));
    assert_eq!(grid.edges(), before);
}

#[test]
fn distances_and_paths_agree() {
    for algorithm in Algorithm::ALL {
        let mut rng = Random::seed_from_u64(17);
        let mut grid = generated(algorithm, 4, 4, 17);
        grid.braid(0.5, &mut rng).unwrap();

        let from: Vec<_> = grid.ids().map(|id| grid.distances(id)).collect();

        for a in grid.ids() {
            for b in grid.ids() {
                let distance = from[a.index()].get(b).unwrap();
                assert_eq!(
                    Some(distance),
                    from[b.index()].get(a),
                    "{} {:?} {:?}",
                    algorithm.key(),
                    a,
                    b
                );

                let route = from[a.index()].path_to(&grid, b).unwrap().ordered();
                assert_eq!(route.len(), distance + 1);
                assert_eq!(route.first(), Some(&a));
                assert_eq!(route.last(), Some(&b));
                for pair in route.windows(2) {
                    assert!(grid[pair[0]].linked(Some(pair[1])));
                }
            }
        }
    }
}

#[test]
fn same_seed_same_maze() {
    for algorithm in Algorithm::ALL {
        let a = generated(algorithm, 8, 8, 31_337);
        let b = generated(algorithm, 8, 8, 31_337);
        assert_eq!(a.to_json(false).unwrap(), b.to_json(false).unwrap());
    }
}

#[test]
fn encoding_is_stable() {
    for algorithm in Algorithm::ALL {
        let mut rng = Random::seed_from_u64(4);
        let mut grid = generated(algorithm, 5, 7, 4);
        grid.braid(0.3, &mut rng).unwrap();

        let once = grid.to_json(false).unwrap();
        let decoded = Grid::from_json(&once).unwrap();
        assert_eq!(decoded.to_json(false).unwrap(), once);
        assert_eq!(decoded.algorithm(), Some(algorithm));
        assert_eq!(decoded.dead_ends(), grid.dead_ends());
    }
}

#[test]
fn binary_tree_carves_north_or_east() {
    let grid = generated(Algorithm::BinaryTree, 5, 5, 42);

    for cell in grid.each_cell() {
        let north_or_east =
            cell.is_linked(Direction::North) as usize + cell.is_linked(Direction::East) as usize;
        if cell.pos() == (0, 4) {
            assert_eq!(north_or_east, 0);
        } else {
            assert_eq!(north_or_east, 1, "{}", cell);
        }
    }
}

#[test]
fn decoded_cell_keeps_its_flags() {
    let grid = generated(Algorithm::RecursiveBacktracker, 3, 3, 1);
    let decoded = Grid::from_json(&grid.to_json(true).unwrap()).unwrap();

    let before = grid.get_cell(1, 1).unwrap();
    let after = decoded.get_cell(1, 1).unwrap();
    for dir in Direction::get_in_order() {
        assert_eq!(before.is_linked(dir), after.is_linked(dir));
    }
    assert_eq!(before.to_string(), after.to_string());
}

#[test]
fn rendering_matches_passages() {
    let grid = generated(Algorithm::Sidewinder, 4, 6, 12);
    let rendered = grid.render_plain();
    let lines: Vec<_> = rendered.lines().collect();

    assert_eq!(lines.len(), 4 * 2 + 1);
    assert!(lines[0].chars().all(|c| c == '+' || c == '-'));
    // sidewinder always opens the whole top row
    assert_eq!(lines[1], format!("|{}|", " ".repeat(6 * 4 - 1)));
}
