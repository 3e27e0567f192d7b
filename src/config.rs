//! Inlinelab Configuration
//!
//! Handles parsing and management of inlinelab.toml configuration files.

use crate::analysis::OutputFormat;
use inlinelab_fixtures::{checked_branched_accumulate, GridBounds, DEFAULT_GRID_SIDE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file searched for by [`LabConfig::find_and_load`].
pub const CONFIG_FILE_NAME: &str = "inlinelab.toml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Root configuration structure matching inlinelab.toml.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LabConfig {
    /// Grid accumulation bounds
    #[serde(default)]
    pub grid: GridConfig,

    /// Sample data for the variance pass
    #[serde(default)]
    pub moments: MomentsConfig,

    /// Inputs for each scaler instantiation
    #[serde(default)]
    pub scaler: ScalerConfig,

    /// Inputs for the branched accumulator
    #[serde(default)]
    pub branch: BranchConfig,

    /// Feature extraction output
    #[serde(default)]
    pub features: FeaturesConfig,
}

impl LabConfig {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: LabConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject inputs whose results would overflow `i64`.
    pub fn validate(&self) -> ConfigResult<()> {
        let bounds = self.grid_bounds();
        if !bounds.fits() {
            return Err(ConfigError::Invalid(format!(
                "[grid] {}x{} total overflows i64",
                bounds.rows, bounds.cols
            )));
        }
        if checked_branched_accumulate(self.branch.x, self.branch.y).is_none() {
            return Err(ConfigError::Invalid(format!(
                "[branch] x = {}, y = {} overflows i64",
                self.branch.x, self.branch.y
            )));
        }
        Ok(())
    }

    /// Load configuration from the current directory or parents.
    pub fn load_from_cwd() -> ConfigResult<Self> {
        let cwd = std::env::current_dir().map_err(ConfigError::Io)?;
        Self::find_and_load(&cwd)
    }

    /// Find and load configuration by searching up from the given directory.
    ///
    /// Falls back to defaults when no inlinelab.toml exists up to the root.
    pub fn find_and_load(start_dir: &Path) -> ConfigResult<Self> {
        match Self::find(start_dir) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading config");
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Locate inlinelab.toml in `start_dir` or its parents.
    pub fn find(start_dir: &Path) -> Option<PathBuf> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn grid_bounds(&self) -> GridBounds {
        GridBounds::new(self.grid.rows, self.grid.cols)
    }
}

/// Grid accumulation bounds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GridConfig {
    #[serde(default = "default_grid_side")]
    pub rows: usize,

    #[serde(default = "default_grid_side")]
    pub cols: usize,
}

fn default_grid_side() -> usize {
    DEFAULT_GRID_SIDE
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_GRID_SIDE,
            cols: DEFAULT_GRID_SIDE,
        }
    }
}

/// Variance pass input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MomentsConfig {
    #[serde(default = "default_samples")]
    pub samples: Vec<f64>,
}

fn default_samples() -> Vec<f64> {
    vec![1.1, 2.2, 3.3, 4.4, 5.5]
}

impl Default for MomentsConfig {
    fn default() -> Self {
        Self {
            samples: default_samples(),
        }
    }
}

/// One input per scaler instantiation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScalerConfig {
    #[serde(default = "default_int_value")]
    pub int_value: i32,

    #[serde(default = "default_double_value")]
    pub double_value: f64,

    #[serde(default = "default_float_value")]
    pub float_value: f32,

    #[serde(default = "default_short_value")]
    pub short_value: i16,
}

fn default_int_value() -> i32 {
    10
}

fn default_double_value() -> f64 {
    20.5
}

fn default_float_value() -> f32 {
    30.5
}

fn default_short_value() -> i16 {
    5
}

impl Default for ScalerConfig {
    fn default() -> Self {
        Self {
            int_value: default_int_value(),
            double_value: default_double_value(),
            float_value: default_float_value(),
            short_value: default_short_value(),
        }
    }
}

/// Branched accumulator inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BranchConfig {
    #[serde(default = "default_branch_x")]
    pub x: i64,

    #[serde(default = "default_branch_y")]
    pub y: i64,
}

fn default_branch_x() -> i64 {
    5
}

fn default_branch_y() -> i64 {
    10
}

impl Default for BranchConfig {
    fn default() -> Self {
        Self {
            x: default_branch_x(),
            y: default_branch_y(),
        }
    }
}

/// Feature extraction output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FeaturesConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Output file; stdout when unset
    #[serde(default)]
    pub output: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LabConfig::default();
        assert_eq!(config.grid_bounds(), GridBounds::default());
        assert_eq!(config.moments.samples, vec![1.1, 2.2, 3.3, 4.4, 5.5]);
        assert_eq!(config.scaler.int_value, 10);
        assert_eq!(config.scaler.short_value, 5);
        assert_eq!((config.branch.x, config.branch.y), (5, 10));
        assert_eq!(config.features.format, OutputFormat::Csv);
    }

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
[grid]
rows = 50

[moments]
samples = [1.0, 3.0]

[scaler]
float_value = 99.5

[features]
format = "json"
output = "features.jsonl"
"#;
        let config: LabConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.grid.rows, 50);
        assert_eq!(config.grid.cols, 200);
        assert_eq!(config.moments.samples, vec![1.0, 3.0]);
        assert_eq!(config.scaler.float_value, 99.5);
        assert_eq!(config.scaler.int_value, 10);
        assert_eq!(config.features.format, OutputFormat::Json);
        assert_eq!(config.features.output.as_deref(), Some("features.jsonl"));
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: LabConfig = toml::from_str("").unwrap();
        assert_eq!(config, LabConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let mut config = LabConfig::default();
        config.grid.rows = 12;
        config.branch.x = 42;
        config.save(&path).unwrap();

        let loaded = LabConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = LabConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_find_and_load_searches_parents() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[grid]\ncols = 7\n").unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let config = LabConfig::find_and_load(&nested).unwrap();
        assert_eq!(config.grid.cols, 7);
        assert_eq!(config.grid.rows, 200);
    }

    #[test]
    fn test_overflowing_inputs_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        std::fs::write(&path, "[branch]\nx = 0\ny = 5000000000000000000\n").unwrap();
        let err = LabConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("[branch]"));

        std::fs::write(&path, "[grid]\nrows = 10000000000\ncols = 10000000000\n").unwrap();
        let err = LabConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("[grid]"));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(LabConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[grid]\nrows = \"many\"\n").unwrap();
        assert!(matches!(
            LabConfig::load(&path).unwrap_err(),
            ConfigError::Parse(_)
        ));
    }
}
