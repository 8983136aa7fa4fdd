//! Provides run configuration read from the environment.
//!
//! The tool takes no command-line flags and no configuration file: the model
//! list arrives in the `RENDER_MODELS` environment variable as a
//! whitespace-separated sequence of file paths, the way the original macro
//! was invoked. Two optional variables tune the sheet: `RENDER_MODELS_PER_ROW`
//! (cells per table row) and `RENDER_MODELS_SIZE` (square thumbnail size in
//! pixels).
//!
//! Parsing is pure; only [`Config::from_env`] touches the process
//! environment.
//!
//! # Examples
//! ```
//! use modelsheet::config::Config;
//!
//! let config = Config::from_values(Some("a.stl sub/b.stl"), None, None).unwrap();
//! assert_eq!(config.models.len(), 2);
//! assert_eq!(config.row_width, 5);
//! ```

use std::path::PathBuf;

use crate::host::RenderPass;

/// Environment variable holding the whitespace-separated model list.
pub const MODELS_ENV: &str = "RENDER_MODELS";
/// Environment variable overriding the gallery row width.
pub const ROW_WIDTH_ENV: &str = "RENDER_MODELS_PER_ROW";
/// Environment variable overriding the thumbnail size in pixels.
pub const SIZE_ENV: &str = "RENDER_MODELS_SIZE";

/// Gallery cells per table row unless overridden.
pub const DEFAULT_ROW_WIDTH: usize = 5;
/// Square thumbnail edge length in pixels unless overridden.
pub const DEFAULT_THUMB_SIZE: u32 = 256;

/// A parsed run configuration.
pub struct Config {
    /// Model files to render, in input order.
    pub models: Vec<PathBuf>,
    /// Gallery cells per table row.
    pub row_width: usize,
    /// Square thumbnail edge length in pixels.
    pub thumb_size: u32,
    /// Render passes taken per model.
    pub passes: Vec<RenderPass>,
}

/// Errors produced while reading the environment.
#[derive(Debug)]
pub enum ConfigError {
    /// The model list variable is not set.
    MissingModelList,
    /// The row width override is not a positive integer.
    InvalidRowWidth(String),
    /// The thumbnail size override is not a positive integer.
    InvalidThumbSize(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingModelList => {
                write!(f, "{} is not set; expected a whitespace-separated list of model files", MODELS_ENV)
            }
            ConfigError::InvalidRowWidth(v) => {
                write!(f, "{} must be a positive integer, got {:?}", ROW_WIDTH_ENV, v)
            }
            ConfigError::InvalidThumbSize(v) => {
                write!(f, "{} must be a positive integer, got {:?}", SIZE_ENV, v)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    /// Returns an error if the model list is missing or an override fails to
    /// parse.
    pub fn from_env() -> Result<Config, ConfigError> {
        let models = std::env::var(MODELS_ENV).ok();
        let row_width = std::env::var(ROW_WIDTH_ENV).ok();
        let size = std::env::var(SIZE_ENV).ok();
        Config::from_values(models.as_deref(), row_width.as_deref(), size.as_deref())
    }

    /// Builds a configuration from raw variable values.
    ///
    /// A present-but-empty model list is valid and means zero models.
    ///
    /// # Errors
    /// Returns an error if the model list is `None` or an override fails to
    /// parse.
    ///
    /// # Examples
    /// ```
    /// use modelsheet::config::{Config, ConfigError};
    ///
    /// assert!(matches!(
    ///     Config::from_values(None, None, None),
    ///     Err(ConfigError::MissingModelList)
    /// ));
    /// ```
    pub fn from_values(
        models: Option<&str>,
        row_width: Option<&str>,
        thumb_size: Option<&str>,
    ) -> Result<Config, ConfigError> {
        let models = models.ok_or(ConfigError::MissingModelList)?;
        let models: Vec<PathBuf> = models.split_whitespace().map(PathBuf::from).collect();

        let row_width = match row_width {
            Some(v) => v
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|&w| w >= 1)
                .ok_or_else(|| ConfigError::InvalidRowWidth(v.to_string()))?,
            None => DEFAULT_ROW_WIDTH,
        };

        let thumb_size = match thumb_size {
            Some(v) => v
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|&s| s >= 1)
                .ok_or_else(|| ConfigError::InvalidThumbSize(v.to_string()))?,
            None => DEFAULT_THUMB_SIZE,
        };

        Ok(Config {
            models,
            row_width,
            thumb_size,
            passes: RenderPass::default_passes(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_list_is_error() {
        assert!(matches!(
            Config::from_values(None, None, None),
            Err(ConfigError::MissingModelList)
        ));
    }

    #[test]
    fn test_empty_list_is_zero_models() {
        let config = Config::from_values(Some(""), None, None).unwrap();
        assert!(config.models.is_empty());
    }

    #[test]
    fn test_list_splits_on_any_whitespace() {
        let config =
            Config::from_values(Some("a.stl  sub/b.stl\n\tc.obj"), None, None).unwrap();
        let names: Vec<_> = config.models.iter().map(|p| p.to_str().unwrap()).collect();
        assert_eq!(names, ["a.stl", "sub/b.stl", "c.obj"]);
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_values(Some("a.stl"), None, None).unwrap();
        assert_eq!(config.row_width, DEFAULT_ROW_WIDTH);
        assert_eq!(config.thumb_size, DEFAULT_THUMB_SIZE);
        assert_eq!(config.passes.len(), 2);
    }

    #[test]
    fn test_row_width_override() {
        let config = Config::from_values(Some("a.stl"), Some("3"), None).unwrap();
        assert_eq!(config.row_width, 3);
    }

    #[test]
    fn test_zero_row_width_is_error() {
        assert!(matches!(
            Config::from_values(Some("a.stl"), Some("0"), None),
            Err(ConfigError::InvalidRowWidth(_))
        ));
    }

    #[test]
    fn test_garbage_size_is_error() {
        assert!(matches!(
            Config::from_values(Some("a.stl"), None, Some("big")),
            Err(ConfigError::InvalidThumbSize(_))
        ));
    }
}
