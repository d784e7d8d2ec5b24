pub mod error;
pub mod logging;
pub mod settings;
pub mod stats;
