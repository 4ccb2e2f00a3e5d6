//! Presentation settings for rendered report cards.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

fn default_school_name() -> String {
    "School".to_string()
}

fn default_title() -> String {
    "Student Report Card".to_string()
}

/// Header text printed on every report card.
///
/// Stored as a JSON object on disk; every field is optional:
/// ```json
/// {
///   "school_name": "Hillside High",
///   "school_address": "12 Ridge Road, Mohali",
///   "title": "End of Term Report",
///   "term": "Autumn 2026"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_school_name")]
    pub school_name: String,
    #[serde(default)]
    pub school_address: Option<String>,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub term: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            school_name: default_school_name(),
            school_address: None,
            title: default_title(),
            term: None,
        }
    }
}

impl ReportConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: ReportConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Loads `path`, or the file named by `REPORT_CARD_CONFIG` when no path is
    /// given, falling back to defaults. `REPORT_SCHOOL_NAME`,
    /// `REPORT_SCHOOL_ADDRESS` and `REPORT_TERM` from the environment win over
    /// the file.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var_os("REPORT_CARD_CONFIG").map(PathBuf::from);
        let config = match path.or(from_env.as_deref()) {
            Some(p) => Self::load(p)?,
            None => Self::default(),
        };
        Ok(config.with_overrides(
            std::env::var("REPORT_SCHOOL_NAME").ok(),
            std::env::var("REPORT_SCHOOL_ADDRESS").ok(),
            std::env::var("REPORT_TERM").ok(),
        ))
    }

    fn with_overrides(
        mut self,
        school_name: Option<String>,
        school_address: Option<String>,
        term: Option<String>,
    ) -> Self {
        if let Some(name) = school_name.filter(|s| !s.trim().is_empty()) {
            self.school_name = name;
        }
        if let Some(address) = school_address.filter(|s| !s.trim().is_empty()) {
            self.school_address = Some(address);
        }
        if let Some(term) = term.filter(|s| !s.trim().is_empty()) {
            self.term = Some(term);
        }
        self
    }
}
