use hashbrown::HashMap;

use crate::gameboard::{CellId, Direction, Grid};

/// Hop counts from a root cell, over open passages only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distances {
    root: CellId,
    cells: HashMap<CellId, usize>,
}

impl Distances {
    pub fn new(root: CellId) -> Self {
        let mut cells = HashMap::new();
        cells.insert(root, 0);
        Self { root, cells }
    }

    pub fn root(&self) -> CellId {
        self.root
    }

    pub fn get(&self, cell: CellId) -> Option<usize> {
        self.cells.get(&cell).copied()
    }

    pub fn set(&mut self, cell: CellId, distance: usize) {
        self.cells.insert(cell, distance);
    }

    pub fn contains(&self, cell: CellId) -> bool {
        self.cells.contains_key(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellId, usize)> + '_ {
        self.cells.iter().map(|(c, d)| (*c, *d))
    }

    /// Cell with the largest distance, the lowest id wins on ties.
    pub fn max(&self) -> (CellId, usize) {
        self.iter()
            .fold((self.root, 0), |best, (cell, d)| {
                if d > best.1 || (d == best.1 && cell < best.0) {
                    (cell, d)
                } else {
                    best
                }
            })
    }

    /// Cells ordered by distance, for a path this is the route from root to goal.
    pub fn ordered(&self) -> Vec<CellId> {
        let mut cells: Vec<_> = self.iter().collect();
        cells.sort_unstable_by_key(|(cell, d)| (*d, *cell));
        cells.into_iter().map(|(cell, _)| cell).collect()
    }

    /// Walks back from `goal` to the root, always stepping to the first linked neighbor (north,
    /// east, south, west) that is closer to the root.
    ///
    /// Returns `None` if `goal` was not reached by this search.
    pub fn path_to(&self, grid: &Grid, goal: CellId) -> Option<Distances> {
        let mut current = goal;
        let mut breadcrumbs = Distances::new(self.root);
        breadcrumbs.set(current, self.get(current)?);

        while current != self.root {
            let here = self.get(current)?;
            let next = Direction::get_in_order()
                .into_iter()
                .filter_map(|dir| grid.passage(current, dir))
                .find(|n| self.get(*n).map_or(false, |d| d < here))?;

            breadcrumbs.set(next, self.get(next)?);
            current = next;
        }

        Some(breadcrumbs)
    }
}

impl Grid {
    /// Breadth-first search from `root` in frontier waves.
    pub fn distances(&self, root: CellId) -> Distances {
        let mut distances = Distances::new(root);
        let mut frontier = vec![root];
        let mut distance = 0;

        while !frontier.is_empty() {
            let mut next = Vec::new();
            for cell in frontier {
                for linked in self[cell].links() {
                    if !distances.contains(linked) {
                        distances.set(linked, distance + 1);
                        next.push(linked);
                    }
                }
            }
            frontier = next;
            distance += 1;
        }

        distances
    }
}
