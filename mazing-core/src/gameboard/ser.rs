use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::{
    cell::{Cell, Direction},
    grid::{Grid, GridError},
};
use crate::algorithms::{Algorithm, UnknownAlgorithm};

/// Written in place of the algorithm name and key of a grid that was never generated.
pub const NO_ALGORITHM: &str = "none";

/// Written in place of the braid fraction of a grid that was never braided.
pub const NO_BRAID: f64 = -1.0;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed grid: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Algorithm(#[from] UnknownAlgorithm),
    #[error("expected {expected} cells, found {found}")]
    CellCount { expected: usize, found: usize },
    #[error("cell record #{index} is ({row}, {column}), cells must be stored in row-major order")]
    CellOrder {
        index: usize,
        row: usize,
        column: usize,
    },
    #[error("cell ({row}, {column}) has a passage {direction} leading outside of the grid")]
    DanglingLink {
        row: usize,
        column: usize,
        direction: Direction,
    },
}

/// Stored form of a single cell, the direction flags mean "open passage".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    pub row: usize,
    pub column: usize,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub north: bool,
    #[serde(default)]
    pub east: bool,
    #[serde(default)]
    pub south: bool,
    #[serde(default)]
    pub west: bool,
}

impl CellRecord {
    fn from_cell(cell: &Cell) -> Self {
        use Direction::*;

        CellRecord {
            row: cell.row(),
            column: cell.column(),
            content: Some(cell.content().to_string()),
            north: cell.is_linked(North),
            east: cell.is_linked(East),
            south: cell.is_linked(South),
            west: cell.is_linked(West),
        }
    }

    fn flag(&self, dir: Direction) -> bool {
        match dir {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }
}

/// Cells are stored as JSON strings inside the grid record, inline objects are accepted too.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellEntry {
    Encoded(String),
    Inline(CellRecord),
}

impl CellEntry {
    fn decode(self) -> Result<CellRecord, serde_json::Error> {
        match self {
            CellEntry::Encoded(s) => serde_json::from_str(&s),
            CellEntry::Inline(record) => Ok(record),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializableGrid {
    #[serde(default)]
    pub algorithm: Option<String>,
    #[serde(default)]
    pub algorithm_key: Option<String>,
    pub rows: usize,
    pub columns: usize,
    #[serde(default = "no_braid")]
    pub braid: f64,
    pub cells: Vec<CellEntry>,
}

fn no_braid() -> f64 {
    NO_BRAID
}

impl SerializableGrid {
    pub fn from_grid(grid: &Grid) -> Result<Self, serde_json::Error> {
        let cells = grid
            .each_cell()
            .map(|cell| serde_json::to_string(&CellRecord::from_cell(cell)).map(CellEntry::Encoded))
            .collect::<Result<_, _>>()?;

        let (algorithm, algorithm_key) = match grid.algorithm() {
            Some(a) => (a.name(), a.key()),
            None => (NO_ALGORITHM, NO_ALGORITHM),
        };

        Ok(SerializableGrid {
            algorithm: Some(algorithm.to_string()),
            algorithm_key: Some(algorithm_key.to_string()),
            rows: grid.rows(),
            columns: grid.columns(),
            braid: grid.braid_factor().unwrap_or(NO_BRAID),
            cells,
        })
    }

    /// Rebuilds the grid, passages are re-applied only where a flag is set.
    ///
    /// Each flag opens the passage on its own cell only, so a one-sided passage stays one-sided.
    pub fn into_grid(self) -> Result<Grid, DecodeError> {
        // header is checked against the cell list before anything gets allocated
        let expected = self
            .rows
            .checked_mul(self.columns)
            .ok_or(GridError::InvalidSize {
                rows: self.rows,
                columns: self.columns,
            })?;
        if self.cells.len() != expected {
            return Err(DecodeError::CellCount {
                expected,
                found: self.cells.len(),
            });
        }

        let mut grid = Grid::new(self.rows, self.columns)?;

        let algorithm = match self.algorithm_key.as_deref() {
            None | Some(NO_ALGORITHM) => None,
            Some(key) => Some(key.parse::<Algorithm>()?),
        };

        let braid = if self.braid < 0.0 {
            None
        } else if self.braid <= 1.0 {
            Some(self.braid)
        } else {
            // also catches NaN
            return Err(GridError::InvalidBraid(self.braid).into());
        };

        for (index, entry) in self.cells.into_iter().enumerate() {
            let record = entry.decode()?;
            let id = grid.id(record.row, record.column)?;
            if id.index() != index {
                return Err(DecodeError::CellOrder {
                    index,
                    row: record.row,
                    column: record.column,
                });
            }

            for dir in Direction::get_in_order() {
                if !record.flag(dir) {
                    continue;
                }

                let neighbor = grid[id].neighbor(dir).ok_or(DecodeError::DanglingLink {
                    row: record.row,
                    column: record.column,
                    direction: dir,
                })?;
                grid.link_directed(id, neighbor);
            }

            let cell = grid.get_cell_mut(record.row, record.column)?;
            match &record.content {
                Some(content) => cell.set_content(content),
                None => cell.clear_content(),
            }
        }

        grid.set_algorithm(algorithm);
        grid.set_braid_factor(braid);

        log::debug!(
            "Decoded {}x{} grid ({} passages)",
            grid.rows(),
            grid.columns(),
            grid.link_count()
        );
        Ok(grid)
    }
}

impl Grid {
    /// Encodes the grid into its stored JSON form.
    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        let record = SerializableGrid::from_grid(self)?;
        if pretty {
            serde_json::to_string_pretty(&record)
        } else {
            serde_json::to_string(&record)
        }
    }

    pub fn from_json(s: &str) -> Result<Grid, DecodeError> {
        serde_json::from_str::<SerializableGrid>(s)?.into_grid()
    }
}

impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SerializableGrid::from_grid(self)
            .map_err(<S::Error as ser::Error>::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        SerializableGrid::deserialize(deserializer)?
            .into_grid()
            .map_err(<D::Error as de::Error>::custom)
    }
}
