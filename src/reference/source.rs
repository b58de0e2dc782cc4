//! Where reference data comes from: a local CSV file or an HTTP(S) CSV export.

use crate::config::ReferenceConfig;
use crate::error::{PriorityError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReferenceSource {
    File(PathBuf),
    Url(String),
}

impl ReferenceSource {
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            ReferenceSource::Url(s.to_string())
        } else {
            ReferenceSource::File(PathBuf::from(s))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ReferenceSource::File(p) => p.display().to_string(),
            ReferenceSource::Url(u) => u.clone(),
        }
    }

    /// Read the raw CSV text. Any failure is `LookupUnavailable`.
    pub fn fetch(&self, config: &ReferenceConfig) -> Result<String> {
        match self {
            ReferenceSource::File(path) => std::fs::read_to_string(path)
                .map_err(|e| PriorityError::lookup(self.describe(), e)),
            ReferenceSource::Url(url) => fetch_url(url, config),
        }
    }
}

fn fetch_url(url: &str, config: &ReferenceConfig) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()
        .map_err(|e| PriorityError::lookup(url, e))?;
    let res = client
        .get(url)
        .send()
        .map_err(|e| PriorityError::lookup(url, e))?;
    let status = res.status();
    if !status.is_success() {
        return Err(PriorityError::lookup(url, format!("HTTP {}", status)));
    }
    let body = res.text().map_err(|e| PriorityError::lookup(url, e))?;
    info!(url, bytes = body.len(), "reference data fetched");
    Ok(body)
}

impl From<String> for ReferenceSource {
    fn from(s: String) -> Self {
        ReferenceSource::parse(&s)
    }
}

impl From<ReferenceSource> for String {
    fn from(s: ReferenceSource) -> Self {
        s.describe()
    }
}

impl std::fmt::Display for ReferenceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}
