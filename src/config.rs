//! Calculator configuration: scoring profile, reference data source, logging.

use crate::error::{PriorityError, Result};
use crate::reference::ReferenceSource;
use crate::scoring::ScoringProfile;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Weights, divisors, threshold ladder and rating tables
    #[serde(default)]
    pub scoring: ScoringProfile,
    /// Tabular source for workload defaults
    #[serde(default)]
    pub reference: ReferenceConfig,
    /// Logging
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// CSV file path or http(s) URL; `None` disables workload defaults
    pub source: Option<ReferenceSource>,
    /// Whole-request timeout for URL sources (seconds)
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub columns: ReferenceColumns,
}

/// Header names in the reference sheet (matched case-insensitively)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceColumns {
    pub identifier: String,
    pub name: String,
    pub team: String,
    pub workload: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
    /// Write one JSON line per evaluation
    pub audit: bool,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            source: None,
            timeout_secs: 10,
            connect_timeout_secs: 5,
            columns: ReferenceColumns::default(),
        }
    }
}

impl Default for ReferenceColumns {
    fn default() -> Self {
        Self {
            identifier: "RPA Number".to_string(),
            name: "Process Name".to_string(),
            team: "Team".to_string(),
            workload: "3M Workload".to_string(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            audit: false,
        }
    }
}

impl CalculatorConfig {
    /// Load from a JSON file. A missing file yields the defaults; an
    /// unreadable or invalid one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)
            .map_err(|e| PriorityError::Config(format!("{}: {}", path.display(), e)))?;
        let config: CalculatorConfig = serde_json::from_str(&data)
            .map_err(|e| PriorityError::Config(format!("{}: {}", path.display(), e)))?;
        config.scoring.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let c = CalculatorConfig::load(Path::new("nonexistent.json")).unwrap();
        assert_eq!(c.scoring.name, "business");
        assert!(c.reference.source.is_none());
        assert_eq!(c.reference.timeout_secs, 10);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(
            f,
            r#"{{"reference": {{"source": "https://sheets.example.com/export?format=csv"}}, "log": {{"json": true}}}}"#
        )
        .unwrap();
        let c = CalculatorConfig::load(f.path()).unwrap();
        assert_eq!(
            c.reference.source,
            Some(ReferenceSource::Url(
                "https://sheets.example.com/export?format=csv".into()
            ))
        );
        assert_eq!(c.reference.columns, ReferenceColumns::default());
        assert!(c.log.json);
        assert_eq!(c.log.level, "info");
    }

    #[test]
    fn invalid_json_is_config_error() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "{{not json").unwrap();
        assert!(matches!(
            CalculatorConfig::load(f.path()),
            Err(PriorityError::Config(_))
        ));
    }

    #[test]
    fn invalid_profile_is_rejected_on_load() {
        let mut config = CalculatorConfig::default();
        config.scoring.workload.volume_divisor = 0.0;
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "{}", serde_json::to_string(&config).unwrap()).unwrap();
        assert!(CalculatorConfig::load(f.path()).is_err());
    }
}
