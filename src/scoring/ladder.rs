//! Threshold ladder: total score → priority label.

use crate::error::{PriorityError, Result};
use serde::{Deserialize, Serialize};

/// Absorbs float noise in weighted sums so a total that is mathematically
/// equal to a step minimum lands on that step.
const TIE_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LadderStep {
    pub min_score: f64,
    pub label: String,
}

impl LadderStep {
    pub fn new(min_score: f64, label: impl Into<String>) -> Self {
        Self {
            min_score,
            label: label.into(),
        }
    }
}

/// Steps are kept sorted highest minimum first; anything below the lowest
/// step gets `floor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LadderRepr")]
pub struct PriorityLadder {
    steps: Vec<LadderStep>,
    floor: String,
}

#[derive(Deserialize)]
struct LadderRepr {
    steps: Vec<LadderStep>,
    floor: String,
}

impl From<LadderRepr> for PriorityLadder {
    fn from(r: LadderRepr) -> Self {
        PriorityLadder::new(r.steps, r.floor)
    }
}

impl PriorityLadder {
    pub fn new(mut steps: Vec<LadderStep>, floor: impl Into<String>) -> Self {
        steps.sort_by(|a, b| b.min_score.total_cmp(&a.min_score));
        Self {
            steps,
            floor: floor.into(),
        }
    }

    /// P1–P4 with status emoji.
    pub fn standard() -> Self {
        Self::new(
            vec![
                LadderStep::new(3.2, "🔥 P1 - Critical"),
                LadderStep::new(2.4, "⚠️ P2 - High"),
                LadderStep::new(1.6, "📌 P3 - Medium"),
            ],
            "🟢 P4 - Low",
        )
    }

    /// P0–P4.
    pub fn business() -> Self {
        Self::new(
            vec![
                LadderStep::new(3.5, "P0: IMMEDIATE"),
                LadderStep::new(2.8, "P1: HIGH"),
                LadderStep::new(2.0, "P2: MEDIUM"),
                LadderStep::new(1.4, "P3: LOW"),
            ],
            "P4: BACKLOG",
        )
    }

    /// Tier index of `score`: 0 is the highest step, `steps().len()` is the floor.
    pub fn rank(&self, score: f64) -> usize {
        self.steps
            .iter()
            .position(|s| score + TIE_TOLERANCE >= s.min_score)
            .unwrap_or(self.steps.len())
    }

    pub fn classify(&self, score: f64) -> &str {
        self.label_at(self.rank(score))
    }

    pub fn label_at(&self, rank: usize) -> &str {
        self.steps
            .get(rank)
            .map(|s| s.label.as_str())
            .unwrap_or(&self.floor)
    }

    pub fn steps(&self) -> &[LadderStep] {
        &self.steps
    }

    pub fn floor(&self) -> &str {
        &self.floor
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(bad) = self.steps.iter().find(|s| !s.min_score.is_finite()) {
            return Err(PriorityError::Config(format!(
                "threshold for '{}' is not a finite number",
                bad.label
            )));
        }
        if self.floor.trim().is_empty() || self.steps.iter().any(|s| s.label.trim().is_empty()) {
            return Err(PriorityError::Config(
                "priority labels must not be empty".into(),
            ));
        }
        Ok(())
    }
}

impl Default for PriorityLadder {
    fn default() -> Self {
        Self::business()
    }
}
