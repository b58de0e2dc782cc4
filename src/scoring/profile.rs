//! Scoring profile: every tunable of the formula in one value.

use super::{
    PriorityLadder, RatingScale, ScoringWeights, WorkloadConfig, BUSINESS_WEIGHTS,
    STANDARD_WEIGHTS,
};
use crate::error::{PriorityError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringProfile {
    pub name: String,
    pub weights: ScoringWeights,
    #[serde(default)]
    pub workload: WorkloadConfig,
    pub ladder: PriorityLadder,
    pub impact: RatingScale,
    pub urgency: RatingScale,
    pub escalation: RatingScale,
}

impl ScoringProfile {
    /// 0.35/0.35/0.10/0.10/0.10, Low–Critical scales, None/L1–L3, P1–P4.
    pub fn standard() -> Self {
        Self {
            name: "standard".into(),
            weights: STANDARD_WEIGHTS,
            workload: WorkloadConfig::default(),
            ladder: PriorityLadder::standard(),
            impact: RatingScale::four_level(),
            urgency: RatingScale::four_level(),
            escalation: RatingScale::escalation_tiers(),
        }
    }

    /// 0.55/0.20/0.10/0.10/0.05, business phrases, management escalation, P0–P4.
    pub fn business() -> Self {
        Self {
            name: "business".into(),
            weights: BUSINESS_WEIGHTS,
            workload: WorkloadConfig::default(),
            ladder: PriorityLadder::business(),
            impact: RatingScale::business_impact(),
            urgency: RatingScale::business_urgency(),
            escalation: RatingScale::escalation_management(),
        }
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "standard" => Some(Self::standard()),
            "business" => Some(Self::business()),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        self.workload.validate()?;
        self.ladder.validate()?;
        for (name, scale) in [
            ("impact", &self.impact),
            ("urgency", &self.urgency),
            ("escalation", &self.escalation),
        ] {
            if scale.is_empty() {
                return Err(PriorityError::Config(format!(
                    "{} rating table is empty",
                    name
                )));
            }
        }
        Ok(())
    }
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::business()
    }
}
