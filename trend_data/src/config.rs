//! Runtime configuration
//!
//! Every component receives its paths and tunables from an [`AppConfig`]
//! value instead of reading a process-wide location, so tests can point a
//! component at a temporary directory.

use crate::{DataError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Raw time series file name
pub const TIMESERIES_FILE: &str = "ev_vs_petrol_india_timeseries.csv";
/// Raw region table file name
pub const REGIONS_FILE: &str = "ev_vs_petrol_india_regions.csv";
/// Derived year-over-year table file name
pub const YOY_FILE: &str = "ev_vs_petrol_yoy.csv";

/// Application configuration, loadable from TOML
///
/// Missing keys fall back to [`AppConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root that `data_dir` and `results_dir` are resolved against
    pub base_dir: PathBuf,
    /// Directory holding the CSV tables, relative to `base_dir`
    pub data_dir: PathBuf,
    /// Directory receiving rendered charts, relative to `base_dir`
    pub results_dir: PathBuf,
    /// Years with fewer samples are ignored by the CAGR calculation
    pub min_samples_per_year: usize,
    /// Number of future years to project
    pub forecast_horizon: usize,
    /// Number of regions in the "top regions" chart
    pub top_regions: usize,
    /// Dashboard bind address
    pub bind_addr: String,
    /// Dashboard port
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            data_dir: PathBuf::from("data"),
            results_dir: PathBuf::from("results"),
            min_samples_per_year: 4,
            forecast_horizon: 6,
            top_regions: 10,
            bind_addr: "127.0.0.1".to_string(),
            port: 8501,
        }
    }
}

impl AppConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::MissingFile(path.to_path_buf()));
        }
        let contents = fs::read_to_string(path)?;
        log::debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Replace the base directory
    pub fn with_base_dir<P: Into<PathBuf>>(mut self, base_dir: P) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Check that the tunables are usable
    pub fn validate(&self) -> Result<()> {
        if self.forecast_horizon == 0 {
            return Err(DataError::Config(
                "forecast_horizon must be at least 1".to_string(),
            ));
        }
        if self.top_regions == 0 {
            return Err(DataError::Config(
                "top_regions must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolved file locations
    pub fn paths(&self) -> DataPaths {
        DataPaths {
            data_dir: self.base_dir.join(&self.data_dir),
            results_dir: self.base_dir.join(&self.results_dir),
        }
    }
}

/// Resolved locations of the persisted tables and chart outputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    data_dir: PathBuf,
    results_dir: PathBuf,
}

impl DataPaths {
    /// Paths under `<base>/data` and `<base>/results`
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        AppConfig::default().with_base_dir(base_dir.as_ref()).paths()
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    pub fn timeseries_csv(&self) -> PathBuf {
        self.data_dir.join(TIMESERIES_FILE)
    }

    pub fn regions_csv(&self) -> PathBuf {
        self.data_dir.join(REGIONS_FILE)
    }

    pub fn yoy_csv(&self) -> PathBuf {
        self.data_dir.join(YOY_FILE)
    }

    /// Location of a rendered chart
    pub fn result_file(&self, file_name: &str) -> PathBuf {
        self.results_dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            base_dir = "/tmp/trends"
            forecast_horizon = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.base_dir, PathBuf::from("/tmp/trends"));
        assert_eq!(config.forecast_horizon, 3);
        assert_eq!(config.top_regions, 10);
        assert_eq!(config.port, 8501);
    }

    #[test]
    fn test_rejects_zero_horizon() {
        let result = AppConfig::from_toml_str("forecast_horizon = 0");
        assert!(matches!(result, Err(DataError::Config(_))));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let result = AppConfig::from_toml_str("port = \"not a number\"");
        assert!(matches!(result, Err(DataError::Config(_))));
    }

    #[test]
    fn test_paths() {
        let paths = DataPaths::new("/srv/app");
        assert_eq!(
            paths.timeseries_csv(),
            PathBuf::from("/srv/app/data/ev_vs_petrol_india_timeseries.csv")
        );
        assert_eq!(
            paths.regions_csv(),
            PathBuf::from("/srv/app/data/ev_vs_petrol_india_regions.csv")
        );
        assert_eq!(
            paths.yoy_csv(),
            PathBuf::from("/srv/app/data/ev_vs_petrol_yoy.csv")
        );
        assert_eq!(
            paths.result_file("top_states_ev.png"),
            PathBuf::from("/srv/app/results/top_states_ev.png")
        );
    }
}
