use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{MigrateError, Result};
use crate::importer::CsvSplitting;
use crate::parser::ParseOptions;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub csv_splitting: CsvSplitting,
    #[serde(default)]
    pub output: OutputMode,
    #[serde(default)]
    pub company_name: String,
    #[serde(default = "default_fiscal_year_start")]
    pub fiscal_year_start: String,
}

fn default_fiscal_year_start() -> String {
    "01".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            csv_splitting: CsvSplitting::default(),
            output: OutputMode::default(),
            company_name: String::new(),
            fiscal_year_start: default_fiscal_year_start(),
        }
    }
}

impl Settings {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            csv_splitting: self.csv_splitting,
            company_name: self.company_name.clone(),
            fiscal_year_start: self.fiscal_year_start.clone(),
        }
    }

    pub const KEYS: &'static [&'static str] =
        &["csv_splitting", "output", "company_name", "fiscal_year_start"];

    /// Update one setting from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "csv_splitting" => {
                self.csv_splitting = CsvSplitting::from_key(value).ok_or_else(|| {
                    MigrateError::Settings(format!("csv_splitting must be 'quoted' or 'naive', got '{value}'"))
                })?;
            }
            "output" => {
                self.output = match value.trim().to_lowercase().as_str() {
                    "table" => OutputMode::Table,
                    "json" => OutputMode::Json,
                    _ => {
                        return Err(MigrateError::Settings(format!(
                            "output must be 'table' or 'json', got '{value}'"
                        )))
                    }
                };
            }
            "company_name" => self.company_name = value.trim().to_string(),
            "fiscal_year_start" => {
                let month: u32 = value
                    .trim()
                    .parse()
                    .ok()
                    .filter(|m| (1..=12).contains(m))
                    .ok_or_else(|| {
                        MigrateError::Settings(format!("fiscal_year_start must be a month 01-12, got '{value}'"))
                    })?;
                self.fiscal_year_start = format!("{month:02}");
            }
            _ => {
                return Err(MigrateError::Settings(format!(
                    "unknown setting '{key}' (expected one of: {})",
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("qbmigrate")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

/// Missing or unreadable files fall back to defaults.
pub fn load_settings_from(path: &Path) -> Settings {
    if !path.exists() {
        return Settings::default();
    }
    let content = std::fs::read_to_string(path).unwrap_or_default();
    match serde_json::from_str(&content) {
        Ok(settings) => settings,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable settings file");
            Settings::default()
        }
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

pub fn save_settings_to(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    save_settings_to(settings, &settings_path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            csv_splitting: CsvSplitting::Naive,
            output: OutputMode::Json,
            company_name: "Acme Widgets".to_string(),
            fiscal_year_start: "07".to_string(),
        };
        save_settings_to(&settings, &path).unwrap();
        let loaded = load_settings_from(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_returns_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let s = load_settings_from(&dir.path().join("nope.json"));
        assert_eq!(s, Settings::default());
        assert_eq!(s.fiscal_year_start, "01");
        assert_eq!(s.csv_splitting, CsvSplitting::Quoted);
    }

    #[test]
    fn test_load_merges_with_defaults() {
        let json = r#"{"company_name": "Bob's Bikes", "csv_splitting": "naive"}"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.fiscal_year_start, "01");
        assert_eq!(s.output, OutputMode::Table);
        assert_eq!(s.csv_splitting, CsvSplitting::Naive);
    }

    #[test]
    fn test_load_ignores_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(load_settings_from(&path), Settings::default());
    }

    #[test]
    fn test_save_creates_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep").join("nested").join("settings.json");
        save_settings_to(&Settings::default(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_set_validates_values() {
        let mut s = Settings::default();
        s.set("fiscal_year_start", "7").unwrap();
        assert_eq!(s.fiscal_year_start, "07");
        s.set("output", "JSON").unwrap();
        assert_eq!(s.output, OutputMode::Json);
        assert!(s.set("fiscal_year_start", "13").is_err());
        assert!(s.set("csv_splitting", "smart").is_err());
        assert!(s.set("colour", "blue").is_err());
    }

    #[test]
    fn test_parse_options_follow_settings() {
        let s = Settings {
            csv_splitting: CsvSplitting::Naive,
            company_name: "Acme".to_string(),
            ..Default::default()
        };
        let opts = s.parse_options();
        assert_eq!(opts.csv_splitting, CsvSplitting::Naive);
        assert_eq!(opts.company_name, "Acme");
        assert_eq!(opts.fiscal_year_start, "01");
    }
}
