use thiserror::Error;

use mazing_core::{
    algorithms::UnknownAlgorithm,
    gameboard::{DecodeError, GridError},
    level::LevelError,
};

use crate::settings::SettingsError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Level(#[from] LevelError),
    #[error(transparent)]
    Algorithm(#[from] UnknownAlgorithm),
    #[error("could not encode grid: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("logger already installed")]
    Logger(#[from] log::SetLoggerError),
}
