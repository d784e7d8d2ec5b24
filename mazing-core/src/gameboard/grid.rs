use std::ops;

use rand::{seq::SliceRandom as _, Rng as _};
use smallvec::SmallVec;
use thiserror::Error;

use super::cell::{Cell, CellId, Direction};
use crate::{
    algorithms::{Algorithm, Random},
    array::Array2D,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("grid size {rows}x{columns} is either empty or too large")]
    InvalidSize { rows: usize, columns: usize },
    #[error("cell ({row}, {column}) is outside of the {rows}x{columns} grid")]
    OutOfBounds {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },
    #[error("braid fraction must be within 0 and 1, got {0}")]
    InvalidBraid(f64),
}

/// Rectangular maze board.
///
/// All cells live in one arena, neighbors and passages are expressed by [`CellId`]s into it.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Array2D<Cell>,
    algorithm: Option<Algorithm>,
    braid: Option<f64>,
}

impl Grid {
    /// Creates a grid with wired neighbors and no passages.
    pub fn new(rows: usize, columns: usize) -> Result<Grid, GridError> {
        let max_cells = isize::MAX as usize / std::mem::size_of::<Cell>();
        match rows.checked_mul(columns) {
            Some(size) if size > 0 && size <= max_cells => {}
            _ => return Err(GridError::InvalidSize { rows, columns }),
        }

        let id = |row: isize, column: isize| {
            let inside = (0..rows as isize).contains(&row) && (0..columns as isize).contains(&column);
            inside.then(|| CellId(row as usize * columns + column as usize))
        };

        let cells = Array2D::from_fn(rows, columns, |row, column| {
            let neighbors = Direction::get_in_order().map(|dir| {
                let (dr, dc) = dir.to_offset();
                id(row as isize + dr, column as isize + dc)
            });
            Cell::new(row, column, neighbors)
        });

        Ok(Grid {
            cells,
            algorithm: None,
            braid: None,
        })
    }

    pub fn rows(&self) -> usize {
        self.cells.rows()
    }

    pub fn columns(&self) -> usize {
        self.cells.columns()
    }

    /// Number of cells.
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Algorithm that carved this grid, `None` before generation.
    pub fn algorithm(&self) -> Option<Algorithm> {
        self.algorithm
    }

    pub(crate) fn set_algorithm(&mut self, algorithm: Option<Algorithm>) {
        self.algorithm = algorithm;
    }

    /// Braid fraction applied after generation, `None` if the grid was never braided.
    pub fn braid_factor(&self) -> Option<f64> {
        self.braid
    }

    pub(crate) fn set_braid_factor(&mut self, braid: Option<f64>) {
        self.braid = braid;
    }

    pub fn id(&self, row: usize, column: usize) -> Result<CellId, GridError> {
        self.cells
            .pos_to_idx(row, column)
            .map(CellId)
            .ok_or(GridError::OutOfBounds {
                row,
                column,
                rows: self.rows(),
                columns: self.columns(),
            })
    }

    pub fn get_cell(&self, row: usize, column: usize) -> Result<&Cell, GridError> {
        let id = self.id(row, column)?;
        Ok(&self[id])
    }

    /// Mutable access, passages stay under control of the grid so only the content can change.
    pub fn get_cell_mut(&mut self, row: usize, column: usize) -> Result<&mut Cell, GridError> {
        let id = self.id(row, column)?;
        Ok(&mut self.cells[id.0])
    }

    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.0]
    }

    pub fn random_cell(&self, rng: &mut Random) -> CellId {
        let row = rng.gen_range(0..self.rows());
        let column = rng.gen_range(0..self.columns());
        CellId(row * self.columns() + column)
    }

    /// Ids of all cells in row-major order.
    pub fn ids(&self) -> impl Iterator<Item = CellId> {
        (0..self.size()).map(CellId)
    }

    /// All cells in row-major order.
    pub fn each_cell(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Rows from top to bottom, each as a slice of cells from west to east.
    pub fn each_row(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.iter_rows()
    }

    /// Opens a passage between two neighboring cells, in both directions.
    pub fn link(&mut self, a: CellId, b: CellId) {
        self.set_passage(a, b, true, true);
    }

    /// Opens a passage that is only recorded on the side of `from`.
    ///
    /// It counts as an edge and survives encoding, but only `from` lists it among its links.
    pub fn link_directed(&mut self, from: CellId, to: CellId) {
        self.set_passage(from, to, true, false);
    }

    pub fn unlink(&mut self, a: CellId, b: CellId) {
        self.set_passage(a, b, false, true);
    }

    pub fn unlink_directed(&mut self, from: CellId, to: CellId) {
        self.set_passage(from, to, false, false);
    }

    fn set_passage(&mut self, from: CellId, to: CellId, open: bool, bidirectional: bool) {
        let Some(dir) = self[from].direction_to(to) else {
            log::warn!(
                "Ignoring passage between cells {:?} and {:?}, they are not neighbors",
                self[from].pos(),
                self[to].pos()
            );
            return;
        };

        self.cells[from.0].set_link(dir, open);
        if bidirectional {
            self.cells[to.0].set_link(dir.reverse(), open);
        }
    }

    /// Neighbor in the given direction, only if the passage towards it is open.
    pub fn passage(&self, id: CellId, dir: Direction) -> Option<CellId> {
        let cell = &self[id];
        cell.is_linked(dir).then(|| cell.neighbor(dir)).flatten()
    }

    /// Removes every passage and the generation metadata.
    pub fn reset(&mut self) {
        for idx in 0..self.cells.len() {
            for dir in Direction::get_in_order() {
                self.cells[idx].set_link(dir, false);
            }
        }
        self.algorithm = None;
        self.braid = None;
    }

    /// Blanks the content of every cell.
    pub fn clear_content(&mut self) {
        for idx in 0..self.cells.len() {
            self.cells[idx].clear_content();
        }
    }

    /// Every passage once, as `(lower id, higher id)` pairs in row-major order.
    ///
    /// A passage recorded on only one of its cells is included too.
    pub fn edges(&self) -> Vec<(CellId, CellId)> {
        let mut edges: Vec<_> = self
            .ids()
            .flat_map(|id| {
                Direction::get_in_order().into_iter().filter_map(move |dir| {
                    self.passage(id, dir).map(|other| (id.min(other), id.max(other)))
                })
            })
            .collect();

        edges.sort_unstable();
        edges.dedup();
        edges
    }

    pub fn link_count(&self) -> usize {
        self.edges().len()
    }

    /// Cells with exactly one passage.
    pub fn dead_ends(&self) -> Vec<CellId> {
        self.ids().filter(|id| self[*id].is_dead_end()).collect()
    }

    /// Removes dead ends by opening one extra passage from each of them with probability `p`.
    ///
    /// A neighbor that is itself a dead end is preferred. Returns the number of opened passages.
    pub fn braid(&mut self, p: f64, rng: &mut Random) -> Result<usize, GridError> {
        if !(0.0..=1.0).contains(&p) {
            return Err(GridError::InvalidBraid(p));
        }

        self.braid = Some(p);

        let mut added = 0;
        for id in self.dead_ends() {
            // an earlier iteration may have already connected it
            if !self[id].is_dead_end() || !rng.gen_bool(p) {
                continue;
            }

            let cell = &self[id];
            let closed: SmallVec<[CellId; 4]> = cell
                .neighbors()
                .into_iter()
                .filter(|n| !cell.linked(Some(*n)))
                .collect();
            let best: SmallVec<[CellId; 4]> = closed
                .iter()
                .copied()
                .filter(|n| self[*n].is_dead_end())
                .collect();

            let pool = if best.is_empty() { &closed } else { &best };
            let Some(&neighbor) = pool.choose(rng) else {
                continue;
            };

            self.link(id, neighbor);
            added += 1;
        }

        log::debug!("Braided {} dead ends with p = {}", added, p);
        Ok(added)
    }
}

impl ops::Index<CellId> for Grid {
    type Output = Cell;

    fn index(&self, index: CellId) -> &Self::Output {
        &self.cells[index.0]
    }
}
