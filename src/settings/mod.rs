use std::{
    fs,
    path::{Path, PathBuf},
};

use dirs::preference_dir;
use mazing_core::algorithms::{Selection, UnknownAlgorithm};
use ron::{self, extensions::Extensions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.ron");

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("error reading settings file: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub rows: Option<usize>,
    #[serde(default)]
    pub columns: Option<usize>,
    #[serde(default)]
    pub algorithm: Option<String>,
    #[serde(default)]
    pub braid: Option<f64>,
    #[serde(default)]
    pub show_path: Option<bool>,
}

impl Settings {
    pub const DEFAULT_ROWS: usize = 10;
    pub const DEFAULT_COLUMNS: usize = 10;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_rows(mut self, value: usize) -> Self {
        self.rows = Some(value);
        self
    }

    pub fn get_rows(&self) -> usize {
        self.rows.unwrap_or(Self::DEFAULT_ROWS)
    }

    pub fn set_columns(mut self, value: usize) -> Self {
        self.columns = Some(value);
        self
    }

    pub fn get_columns(&self) -> usize {
        self.columns.unwrap_or(Self::DEFAULT_COLUMNS)
    }

    pub fn set_algorithm(mut self, value: Selection) -> Self {
        self.algorithm = Some(value.to_string());
        self
    }

    pub fn get_algorithm(&self) -> Result<Selection, UnknownAlgorithm> {
        self.algorithm
            .as_deref()
            .map_or(Ok(Selection::Random), |s| s.parse())
    }

    pub fn set_braid(mut self, value: f64) -> Self {
        self.braid = Some(value);
        self
    }

    pub fn get_braid(&self) -> Option<f64> {
        self.braid
    }

    pub fn set_show_path(mut self, value: bool) -> Self {
        self.show_path = Some(value);
        self
    }

    pub fn get_show_path(&self) -> bool {
        self.show_path.unwrap_or_default()
    }

    pub fn default_path() -> PathBuf {
        preference_dir()
            .unwrap_or_default()
            .join("mazing")
            .join("settings.ron")
    }

    fn options() -> ron::Options {
        ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
    }

    pub fn parse(s: &str) -> Result<Self, SettingsError> {
        Ok(Self::options().from_str(s)?)
    }

    /// Reads the settings file, writing the bundled defaults there first if it does not exist.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            log::info!("Writing default settings to {:?}", path);
            Self::reset_config(path)?;
        }

        let settings = Self::parse(&fs::read_to_string(path)?)?;
        log::debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    pub fn reset_config(path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_SETTINGS)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazing_core::Algorithm;

    #[test]
    fn default_settings_parse() {
        let settings = Settings::parse(DEFAULT_SETTINGS).unwrap();

        assert_eq!(settings.get_rows(), 10);
        assert_eq!(settings.get_columns(), 10);
        assert_eq!(settings.get_algorithm(), Ok(Selection::Random));
        assert_eq!(settings.get_braid(), None);
        assert!(!settings.get_show_path());
    }

    #[test]
    fn missing_fields_fall_back() {
        let settings = Settings::parse("(algorithm: \"W\", braid: 0.25)").unwrap();

        assert_eq!(settings.get_rows(), Settings::DEFAULT_ROWS);
        assert_eq!(
            settings.get_algorithm(),
            Ok(Selection::Fixed(Algorithm::Wilson))
        );
        assert_eq!(settings.get_braid(), Some(0.25));
        assert_eq!(Settings::parse("()").unwrap(), Settings::new());
    }

    #[test]
    fn unknown_algorithm_is_reported() {
        let settings = Settings::new().set_rows(3);
        assert_eq!(settings.get_rows(), 3);

        let settings = Settings::parse("(algorithm: \"XYZ\")").unwrap();
        assert!(settings.get_algorithm().is_err());
        assert!(matches!(Settings::parse("(rows: \"ten\")"), Err(SettingsError::Ron(_))));
    }

    #[test]
    fn load_writes_defaults() {
        let dir = std::env::temp_dir().join(format!("mazing-settings-{}", std::process::id()));
        let path = dir.join("nested").join("settings.ron");
        let _ = fs::remove_dir_all(&dir);

        let settings = Settings::load(&path).unwrap();
        assert!(path.exists());
        assert_eq!(settings, Settings::parse(DEFAULT_SETTINGS).unwrap());

        fs::write(&path, "(rows: 4)").unwrap();
        assert_eq!(Settings::load(&path).unwrap().get_rows(), 4);

        let _ = fs::remove_dir_all(&dir);
    }
}
