//! Identifier → 3-month workload lookup built from a tabular source.

use super::ReferenceSource;
use crate::config::{ReferenceColumns, ReferenceConfig};
use crate::error::{PriorityError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use tracing::{debug, info, warn};

/// One row of the reference sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    pub identifier: String,
    pub name: String,
    pub team: String,
    /// `None` when the sheet leaves the workload cell blank
    pub workload_3m: Option<f64>,
}

impl ReferenceRecord {
    /// Label offered to the user, e.g. `RPA-104 - Invoice matching (Finance Ops)`
    pub fn label(&self) -> String {
        match (self.name.is_empty(), self.team.is_empty()) {
            (false, false) => format!("{} - {} ({})", self.identifier, self.name, self.team),
            (false, true) => format!("{} - {}", self.identifier, self.name),
            (true, false) => format!("{} ({})", self.identifier, self.team),
            (true, true) => self.identifier.clone(),
        }
    }
}

/// Read-only lookup table. Built once, never mutated; `refresh` builds a new one.
#[derive(Debug, Clone)]
pub struct ReferenceDataLookup {
    records: IndexMap<String, ReferenceRecord>,
    by_identifier: HashMap<String, String>,
    origin: Option<(ReferenceSource, ReferenceConfig)>,
}

impl ReferenceDataLookup {
    /// Fetch and parse `config.source`.
    pub fn load(config: &ReferenceConfig) -> Result<Self> {
        let source = config
            .source
            .clone()
            .ok_or_else(|| PriorityError::Config("no reference source configured".into()))?;
        Self::fetch(source, config)
    }

    pub fn fetch(source: ReferenceSource, config: &ReferenceConfig) -> Result<Self> {
        let body = source.fetch(config)?;
        let mut lookup = Self::from_reader(body.as_bytes(), &config.columns)
            .map_err(|e| match e {
                PriorityError::LookupUnavailable { reason, .. } => {
                    PriorityError::lookup(source.describe(), reason)
                }
                other => other,
            })?;
        info!(source = %source, records = lookup.len(), "reference data loaded");
        lookup.origin = Some((source, config.clone()));
        Ok(lookup)
    }

    /// Parse CSV text with a header row. Missing columns or bad workload cells
    /// reject the whole source.
    pub fn from_reader<R: Read>(reader: R, columns: &ReferenceColumns) -> Result<Self> {
        let malformed = |reason: String| PriorityError::lookup("csv", reason);

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let headers = rdr.headers().map_err(|e| malformed(e.to_string()))?.clone();
        let col = |name: &str| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| malformed(format!("missing column '{}'", name)))
        };
        let id_col = col(&columns.identifier)?;
        let name_col = col(&columns.name)?;
        let team_col = col(&columns.team)?;
        let workload_col = col(&columns.workload)?;

        let mut records = IndexMap::new();
        let mut by_identifier = HashMap::new();
        for (i, row) in rdr.records().enumerate() {
            let row = row.map_err(|e| malformed(e.to_string()))?;
            let cell = |c: usize| row.get(c).unwrap_or("").to_string();
            let identifier = cell(id_col);
            if identifier.is_empty() {
                continue;
            }
            // header is line 1
            let line = i + 2;
            let workload_3m = parse_workload(&cell(workload_col))
                .map_err(|reason| malformed(format!("line {}: {}", line, reason)))?;
            let record = ReferenceRecord {
                identifier,
                name: cell(name_col),
                team: cell(team_col),
                workload_3m,
            };
            let label = record.label();
            if records.contains_key(&label) || by_identifier.contains_key(&record.identifier) {
                warn!(identifier = %record.identifier, line, "duplicate reference row ignored");
                continue;
            }
            by_identifier.insert(record.identifier.clone(), label.clone());
            records.insert(label, record);
        }
        debug!(records = records.len(), "reference rows parsed");

        Ok(Self {
            records,
            by_identifier,
            origin: None,
        })
    }

    /// Workload for a display label or bare identifier. `None` means no default.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.record(key).and_then(|r| r.workload_3m)
    }

    pub fn record(&self, key: &str) -> Option<&ReferenceRecord> {
        let key = key.trim();
        self.records.get(key).or_else(|| {
            self.by_identifier
                .get(key)
                .and_then(|label| self.records.get(label))
        })
    }

    /// Labels in source order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source(&self) -> Option<&ReferenceSource> {
        self.origin.as_ref().map(|(s, _)| s)
    }

    /// Re-read the source this lookup was loaded from. Lookups built from an
    /// in-memory reader have nothing to re-read and are returned as-is.
    pub fn refresh(&self) -> Result<Self> {
        match &self.origin {
            Some((source, config)) => Self::fetch(source.clone(), config),
            None => Ok(self.clone()),
        }
    }
}

/// Blank → `Ok(None)`. Accepts thousands separators.
fn parse_workload(raw: &str) -> std::result::Result<Option<f64>, String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | ' '))
        .collect();
    if cleaned.is_empty() {
        return Ok(None);
    }
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(Some(v)),
        Ok(v) => Err(format!("workload {} is not a non-negative number", v)),
        Err(_) => Err(format!("workload '{}' is not a number", raw)),
    }
}
