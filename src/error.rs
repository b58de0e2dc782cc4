//! Error kinds surfaced by the calculator core.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PriorityError>;

#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum PriorityError {
    /// A category value has no entry in its rating table
    #[error("no {field} mapping for '{value}'")]
    MissingMapping { field: Field, value: String },

    /// A mandatory field was left empty
    #[error("{field} is mandatory")]
    Validation { field: Field },

    /// Reference data could not be fetched or parsed
    #[error("reference data unavailable from {source_desc}: {reason}")]
    LookupUnavailable { source_desc: String, reason: String },

    /// Numeric input outside its declared bounds
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: Field,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Scoring profile or config file rejected
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl PriorityError {
    /// Errors that block an evaluation and must be shown to the requester.
    /// `LookupUnavailable` and `Config` are operator-side problems.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            PriorityError::MissingMapping { .. }
                | PriorityError::Validation { .. }
                | PriorityError::OutOfRange { .. }
        )
    }

    pub(crate) fn lookup(source_desc: impl Into<String>, reason: impl ToString) -> Self {
        PriorityError::LookupUnavailable {
            source_desc: source_desc.into(),
            reason: reason.to_string(),
        }
    }
}

/// Input field names, used in error messages and breakdown rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Impact,
    Urgency,
    Escalation,
    WorkloadVolume,
    WorkloadPct,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Impact,
        Field::Urgency,
        Field::Escalation,
        Field::WorkloadVolume,
        Field::WorkloadPct,
    ];

    /// Position in [`Field::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Field::Impact => 0,
            Field::Urgency => 1,
            Field::Escalation => 2,
            Field::WorkloadVolume => 3,
            Field::WorkloadPct => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Impact => "impact",
            Field::Urgency => "urgency",
            Field::Escalation => "escalation",
            Field::WorkloadVolume => "workload_volume",
            Field::WorkloadPct => "workload_pct",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
