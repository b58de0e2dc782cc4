//! Combines rated inputs with a scoring profile; produces a priority label and breakdown.

use super::ScoringProfile;
use crate::error::{Field, PriorityError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One evaluation's inputs, as gathered by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityRequest {
    /// Free text carried to the output for display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub impact: String,
    pub urgency: String,
    pub escalation: String,
    #[serde(default)]
    pub workload_volume: i64,
    #[serde(default)]
    pub workload_pct: i64,
}

impl PriorityRequest {
    pub fn new(
        impact: impl Into<String>,
        urgency: impl Into<String>,
        escalation: impl Into<String>,
    ) -> Self {
        Self {
            impact: impact.into(),
            urgency: urgency.into(),
            escalation: escalation.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_volume(mut self, volume: i64) -> Self {
        self.workload_volume = volume;
        self
    }

    pub fn with_pct(mut self, pct: i64) -> Self {
        self.workload_pct = pct;
        self
    }
}

/// Raw factor score, its coefficient, and their product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    pub field: Field,
    pub raw: f64,
    pub weight: f64,
    pub weighted: f64,
}

impl FactorScore {
    fn new(field: Field, raw: f64, weight: f64) -> Self {
        Self {
            field,
            raw,
            weight,
            weighted: raw * weight,
        }
    }
}

/// Result of a single evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Ordered as [`Field::ALL`]
    pub factors: [FactorScore; 5],
    pub total: f64,
    pub label: String,
    /// 0 is the top tier
    pub rank: usize,
}

impl ScoreBreakdown {
    pub fn factor(&self, field: Field) -> &FactorScore {
        &self.factors[field.index()]
    }
}

fn required(field: Field, value: &str) -> Result<&str> {
    let v = value.trim();
    if v.is_empty() {
        Err(PriorityError::Validation { field })
    } else {
        Ok(v)
    }
}

/// Score `request` under `profile`. Pure: no state, no I/O.
///
/// The profile is validated on every call; use [`PriorityScorer`] to
/// validate once and score many requests.
pub fn score(request: &PriorityRequest, profile: &ScoringProfile) -> Result<ScoreBreakdown> {
    profile.validate()?;
    score_validated(request, profile)
}

fn score_validated(request: &PriorityRequest, profile: &ScoringProfile) -> Result<ScoreBreakdown> {
    let impact = required(Field::Impact, &request.impact)?;
    let urgency = required(Field::Urgency, &request.urgency)?;
    let escalation = required(Field::Escalation, &request.escalation)?;

    let wl = &profile.workload;
    wl.check_bounds(Field::WorkloadVolume, request.workload_volume)?;
    wl.check_bounds(Field::WorkloadPct, request.workload_pct)?;

    let raw = [
        profile.impact.resolve(Field::Impact, impact)? as f64,
        profile.urgency.resolve(Field::Urgency, urgency)? as f64,
        profile.escalation.resolve(Field::Escalation, escalation)? as f64,
        wl.normalize_volume(request.workload_volume as f64),
        wl.normalize_pct(request.workload_pct as f64),
    ];

    let factors: [FactorScore; 5] = std::array::from_fn(|i| {
        let field = Field::ALL[i];
        FactorScore::new(field, raw[i], profile.weights.get(field))
    });
    let total: f64 = factors.iter().map(|f| f.weighted).sum();
    let rank = profile.ladder.rank(total);

    Ok(ScoreBreakdown {
        title: request.title.clone(),
        factors,
        total,
        label: profile.ladder.label_at(rank).to_string(),
        rank,
    })
}

pub struct PriorityScorer {
    profile: ScoringProfile,
}

impl PriorityScorer {
    /// Validates the profile once; weights not summing to 1.0 are allowed but logged.
    pub fn new(profile: ScoringProfile) -> Result<Self> {
        profile.validate()?;
        if !profile.weights.sums_to_one() {
            warn!(
                profile = %profile.name,
                sum = profile.weights.sum(),
                "scoring weights do not sum to 1.0"
            );
        }
        for (name, scale) in [
            ("impact", &profile.impact),
            ("urgency", &profile.urgency),
            ("escalation", &profile.escalation),
        ] {
            if !scale.is_ascending() {
                warn!(
                    profile = %profile.name,
                    scale = name,
                    "rating table is not in ascending order"
                );
            }
        }
        Ok(Self { profile })
    }

    pub fn score(&self, request: &PriorityRequest) -> Result<ScoreBreakdown> {
        let result = score_validated(request, &self.profile);
        match &result {
            Ok(b) => debug!(label = %b.label, total = b.total, "request scored"),
            Err(e) => debug!(error = %e, "request rejected"),
        }
        result
    }

    pub fn profile(&self) -> &ScoringProfile {
        &self.profile
    }
}
