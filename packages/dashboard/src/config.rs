//! Dashboard configuration, loaded from TOML.
//!
//! ```toml
//! data_path = "data/disaster_data.csv"
//! start_year = 1960
//! end_year = 2015
//! metric = "death"
//! static_dir = "app/dist"
//! ```
//!
//! Every key is optional. `DISASTER_MAP_CONFIG` points at the file and
//! `DISASTER_MAP_DATA` overrides `data_path`.

use std::path::{Path, PathBuf};

use disaster_map_disaster_models::{Metric, Year, YearRange};
use serde::Deserialize;

/// Config file read when `DISASTER_MAP_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "disaster_map.toml";

/// Dataset read when neither the file nor the environment names one.
pub const DEFAULT_DATA_PATH: &str = "data/disaster_data.csv";

/// Errors that can occur while loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`DashboardConfig`].
    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// `start_year` is after `end_year`.
    #[error("Invalid config: start_year {start} is after end_year {end}")]
    InvalidYears {
        /// Configured first year.
        start: Year,
        /// Configured last year.
        end: Year,
    },
}

/// Settings shared by the CLI, the interactive session, and the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Dataset path or `http(s)` URL.
    pub data_path: String,
    /// Initial first year; defaults to the dataset's first year.
    pub start_year: Option<Year>,
    /// Initial last year; defaults to the dataset's last year.
    pub end_year: Option<Year>,
    /// Initial metric for the bar and line charts.
    pub metric: Metric,
    /// Directory of frontend files served at `/`.
    pub static_dir: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: DEFAULT_DATA_PATH.to_string(),
            start_year: None,
            end_year: None,
            metric: Metric::default(),
            static_dir: None,
        }
    }
}

impl DashboardConfig {
    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the TOML is malformed, has unknown keys,
    /// or names a start year after the end year.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        if let (Some(start), Some(end)) = (config.start_year, config.end_year)
            && start > end
        {
            return Err(ConfigError::InvalidYears { start, end });
        }
        Ok(config)
    }

    /// Reads `path`, falling back to defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or
    /// parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                log::debug!("Loading config from {}", path.display());
                Self::from_toml(&text)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Loads the config named by `DISASTER_MAP_CONFIG` (or
    /// [`DEFAULT_CONFIG_PATH`]) and applies `DISASTER_MAP_DATA`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or
    /// parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var("DISASTER_MAP_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::load(Path::new(&path))?;

        if let Ok(data_path) = std::env::var("DISASTER_MAP_DATA")
            && !data_path.trim().is_empty()
        {
            config.data_path = data_path;
        }

        Ok(config)
    }

    /// The initial year range: configured years clamped to `bounds`,
    /// with unset ends taken from `bounds`.
    #[must_use]
    pub fn initial_years(&self, bounds: YearRange) -> YearRange {
        let start = self.start_year.unwrap_or_else(|| bounds.start());
        let end = self.end_year.unwrap_or_else(|| bounds.end());
        YearRange::new(start.min(end), start.max(end))
            .map_or(bounds, |range| range.clamp_to(bounds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(DashboardConfig::from_toml("").unwrap(), DashboardConfig::default());
    }

    #[test]
    fn parses_every_key() {
        let config = DashboardConfig::from_toml(
            r#"
            data_path = "https://example.org/disaster_data.json"
            start_year = 1970
            end_year = 2000
            metric = "affected"
            static_dir = "app/dist"
            "#,
        )
        .unwrap();

        assert_eq!(config.data_path, "https://example.org/disaster_data.json");
        assert_eq!(config.start_year, Some(1970));
        assert_eq!(config.end_year, Some(2000));
        assert_eq!(config.metric, Metric::Affected);
        assert_eq!(config.static_dir, Some(PathBuf::from("app/dist")));
    }

    #[test]
    fn rejects_bad_config() {
        assert!(matches!(
            DashboardConfig::from_toml("start_year = 2000\nend_year = 1990"),
            Err(ConfigError::InvalidYears {
                start: 2000,
                end: 1990
            })
        ));
        assert!(matches!(
            DashboardConfig::from_toml("metric = \"population\""),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            DashboardConfig::from_toml("colour = \"red\""),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn missing_file_is_default() {
        let path = std::env::temp_dir().join("disaster_map_no_such_config.toml");
        let _ = std::fs::remove_file(&path);
        assert_eq!(DashboardConfig::load(&path).unwrap(), DashboardConfig::default());
    }

    #[test]
    fn unreadable_config_names_the_path() {
        let dir = std::env::temp_dir().join("disaster_map_config_dir_test");
        std::fs::create_dir_all(&dir).unwrap();

        let err = DashboardConfig::load(&dir).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("disaster_map_config_dir_test"));

        let _ = std::fs::remove_dir(&dir);
    }

    #[test]
    fn loads_file() {
        let path = std::env::temp_dir().join("disaster_map_config_test.toml");
        std::fs::write(&path, "metric = \"frequency\"\n").unwrap();

        let config = DashboardConfig::load(&path).unwrap();
        assert_eq!(config.metric, Metric::Frequency);
        assert_eq!(config.data_path, DEFAULT_DATA_PATH);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn initial_years_fill_and_clamp() {
        let bounds = YearRange::new(1960, 2015).unwrap();
        let config = DashboardConfig {
            start_year: Some(1900),
            ..DashboardConfig::default()
        };
        assert_eq!(config.initial_years(bounds), bounds);

        let config = DashboardConfig {
            end_year: Some(1980),
            ..DashboardConfig::default()
        };
        assert_eq!(
            config.initial_years(bounds),
            YearRange::new(1960, 1980).unwrap()
        );
    }
}
