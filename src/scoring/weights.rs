//! Factor coefficients and workload normalization.

use crate::error::{Field, PriorityError, Result};
use serde::{Deserialize, Serialize};

/// Equal emphasis on impact and urgency.
pub const STANDARD_WEIGHTS: ScoringWeights = ScoringWeights {
    impact: 0.35,
    urgency: 0.35,
    escalation: 0.10,
    workload_volume: 0.10,
    workload_pct: 0.10,
};

/// Impact-led weighting.
pub const BUSINESS_WEIGHTS: ScoringWeights = ScoringWeights {
    impact: 0.55,
    urgency: 0.20,
    escalation: 0.10,
    workload_volume: 0.10,
    workload_pct: 0.05,
};

const SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub impact: f64,
    pub urgency: f64,
    pub escalation: f64,
    pub workload_volume: f64,
    pub workload_pct: f64,
}

impl ScoringWeights {
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::Impact => self.impact,
            Field::Urgency => self.urgency,
            Field::Escalation => self.escalation,
            Field::WorkloadVolume => self.workload_volume,
            Field::WorkloadPct => self.workload_pct,
        }
    }

    pub fn sum(&self) -> f64 {
        Field::ALL.iter().map(|f| self.get(*f)).sum()
    }

    pub fn sums_to_one(&self) -> bool {
        (self.sum() - 1.0).abs() < SUM_TOLERANCE
    }

    pub fn validate(&self) -> Result<()> {
        for field in Field::ALL {
            let w = self.get(field);
            if !w.is_finite() || w < 0.0 {
                return Err(PriorityError::Config(format!(
                    "weight for {} must be a non-negative number, got {}",
                    field, w
                )));
            }
        }
        Ok(())
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        BUSINESS_WEIGHTS
    }
}

/// Maps the two workload inputs onto the rating scale `[0, scale_max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Volume that maps to 1.0 on the scale
    pub volume_divisor: f64,
    /// Percentage that maps to 1.0 on the scale
    pub pct_divisor: f64,
    /// Upper clamp of the normalized scale
    pub scale_max: f64,
    /// Accepted input bounds (inclusive, lower bound is 0)
    pub volume_max: i64,
    pub pct_max: i64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            volume_divisor: 25_000.0,
            pct_divisor: 25.0,
            scale_max: 4.0,
            volume_max: 100_000,
            pct_max: 100,
        }
    }
}

impl WorkloadConfig {
    pub fn normalize_volume(&self, volume: f64) -> f64 {
        normalize(volume, self.volume_divisor, self.scale_max)
    }

    pub fn normalize_pct(&self, pct: f64) -> f64 {
        normalize(pct, self.pct_divisor, self.scale_max)
    }

    /// Reject inputs outside `[0, max]` for the given workload field.
    pub fn check_bounds(&self, field: Field, value: i64) -> Result<()> {
        let max = match field {
            Field::WorkloadVolume => self.volume_max,
            Field::WorkloadPct => self.pct_max,
            _ => return Ok(()),
        };
        if (0..=max).contains(&value) {
            Ok(())
        } else {
            Err(PriorityError::OutOfRange {
                field,
                value: value as f64,
                min: 0.0,
                max: max as f64,
            })
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, d) in [
            ("volume_divisor", self.volume_divisor),
            ("pct_divisor", self.pct_divisor),
            ("scale_max", self.scale_max),
        ] {
            if !d.is_finite() || d <= 0.0 {
                return Err(PriorityError::Config(format!(
                    "{} must be positive, got {}",
                    name, d
                )));
            }
        }
        if self.volume_max < 0 || self.pct_max < 0 {
            return Err(PriorityError::Config(
                "workload bounds must not be negative".into(),
            ));
        }
        Ok(())
    }
}

/// `clamp(value / divisor, 0, scale_max)`
pub fn normalize(value: f64, divisor: f64, scale_max: f64) -> f64 {
    (value / divisor).clamp(0.0, scale_max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_sum_to_one() {
        assert!(STANDARD_WEIGHTS.sums_to_one());
        assert!(BUSINESS_WEIGHTS.sums_to_one());
    }

    #[test]
    fn skewed_weights_are_flagged_not_rejected() {
        let w = ScoringWeights {
            impact: 1.0,
            ..BUSINESS_WEIGHTS
        };
        assert!(!w.sums_to_one());
        assert!(w.validate().is_ok());
    }

    #[test]
    fn negative_weight_rejected() {
        let w = ScoringWeights {
            escalation: -0.1,
            ..STANDARD_WEIGHTS
        };
        assert!(matches!(w.validate(), Err(PriorityError::Config(_))));
    }

    #[test]
    fn volume_clamps_both_ends() {
        let wl = WorkloadConfig::default();
        assert_eq!(wl.normalize_volume(200_000.0), 4.0);
        assert_eq!(wl.normalize_volume(100_000.0), 4.0);
        assert_eq!(wl.normalize_volume(25_000.0), 1.0);
        assert_eq!(wl.normalize_volume(0.0), 0.0);
        assert_eq!(wl.normalize_volume(-500.0), 0.0);
    }

    #[test]
    fn pct_normalization() {
        let wl = WorkloadConfig::default();
        assert_eq!(wl.normalize_pct(100.0), 4.0);
        assert_eq!(wl.normalize_pct(50.0), 2.0);
        assert_eq!(wl.normalize_pct(0.0), 0.0);
    }

    #[test]
    fn bounds_are_inclusive() {
        let wl = WorkloadConfig::default();
        assert!(wl.check_bounds(Field::WorkloadVolume, 100_000).is_ok());
        assert!(wl.check_bounds(Field::WorkloadVolume, 0).is_ok());
        assert!(matches!(
            wl.check_bounds(Field::WorkloadVolume, 100_001),
            Err(PriorityError::OutOfRange { .. })
        ));
        assert!(matches!(
            wl.check_bounds(Field::WorkloadPct, -1),
            Err(PriorityError::OutOfRange { .. })
        ));
    }

    #[test]
    fn zero_divisor_rejected() {
        let wl = WorkloadConfig {
            pct_divisor: 0.0,
            ..WorkloadConfig::default()
        };
        assert!(wl.validate().is_err());
    }
}
