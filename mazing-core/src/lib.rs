pub mod algorithms;
pub mod array;
pub mod distances;
pub mod gameboard;
pub mod level;

pub use algorithms::{Algorithm, Random, Selection};
pub use distances::Distances;
pub use gameboard::{Cell, CellId, Direction, Grid};
pub use level::Level;
