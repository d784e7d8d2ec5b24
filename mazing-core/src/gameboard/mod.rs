pub mod cell;
pub mod grid;
pub mod render;
pub mod ser;

pub use cell::{Cell, CellId, Direction};
pub use grid::{Grid, GridError};
pub use ser::{DecodeError, SerializableGrid};
