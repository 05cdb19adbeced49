use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

use crate::record::YearIndicator;

pub const DATA_PATH_ENV: &str = "DASHBOARD_DATA_PATH";
pub const LOGO_PATH_ENV: &str = "DASHBOARD_LOGO_PATH";

/// Where the dashboard finds its inputs and how it labels the two years.
///
/// Stored as a JSON object on disk; every key is optional:
/// ```json
/// {
///   "data_path": "dashboard/day_df_clean.csv",
///   "logo_path": "logo.png",
///   "year_labels": ["2011", "2012"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    /// Branding image; only checked for existence.
    pub logo_path: PathBuf,
    pub year_labels: [String; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("dashboard/day_df_clean.csv"),
            logo_path: PathBuf::from("logo.png"),
            year_labels: ["2011".to_string(), "2012".to_string()],
        }
    }
}

impl DashboardConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("reading config {}", path))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path))?;
        Ok(config)
    }

    /// Defaults, overlaid by the optional config file, then by environment.
    pub fn resolve(path: Option<&str>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(config.with_env(|key| std::env::var(key).ok()))
    }

    /// Applies `DASHBOARD_DATA_PATH` and `DASHBOARD_LOGO_PATH` overrides
    /// looked up through `lookup`.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(DATA_PATH_ENV) {
            self.data_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(LOGO_PATH_ENV) {
            self.logo_path = PathBuf::from(path);
        }
        self
    }

    pub fn year_label(&self, year: YearIndicator) -> &str {
        &self.year_labels[year.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let path = format!("{}/bike_dashboard_partial_config.json", env::temp_dir().display());
        fs::write(&path, r#"{ "data_path": "data/day.csv" }"#).unwrap();

        let config = DashboardConfig::load(&path).unwrap();
        assert_eq!(config.data_path, PathBuf::from("data/day.csv"));
        assert_eq!(config.logo_path, PathBuf::from("logo.png"));
        assert_eq!(config.year_label(YearIndicator::Second), "2012");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_custom_year_labels() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{ "year_labels": ["Y1", "Y2"] }"#).unwrap();
        assert_eq!(config.year_label(YearIndicator::First), "Y1");
        assert_eq!(config.year_label(YearIndicator::Second), "Y2");
    }

    #[test]
    fn test_env_overrides() {
        let config = DashboardConfig::default().with_env(|key| match key {
            DATA_PATH_ENV => Some("/srv/day.csv".to_string()),
            _ => None,
        });
        assert_eq!(config.data_path, PathBuf::from("/srv/day.csv"));
        assert_eq!(config.logo_path, PathBuf::from("logo.png"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = format!("{}/bike_dashboard_no_such_config.json", env::temp_dir().display());
        let _ = fs::remove_file(&path);
        assert!(DashboardConfig::load(&path).is_err());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = format!("{}/bike_dashboard_bad_config.json", env::temp_dir().display());
        fs::write(&path, "{ not json").unwrap();
        assert!(DashboardConfig::load(&path).is_err());
        fs::remove_file(&path).unwrap();
    }
}
