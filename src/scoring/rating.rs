//! Category → integer weight tables for impact, urgency and escalation.

use crate::error::{Field, PriorityError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered rating table. Entry order is the order options are offered in,
/// lowest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingScale(IndexMap<String, u32>);

impl RatingScale {
    pub fn new<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, u32)>,
        K: Into<String>,
    {
        Self(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Generic Low/Medium/High/Critical scale (1–4).
    pub fn four_level() -> Self {
        Self::new([("Low", 1), ("Medium", 2), ("High", 3), ("Critical", 4)])
    }

    /// None/L1/L2/L3 escalation tiers (0–3).
    pub fn escalation_tiers() -> Self {
        Self::new([("None", 0), ("L1", 1), ("L2", 2), ("L3", 3)])
    }

    /// Escalation by management level (0–4).
    pub fn escalation_management() -> Self {
        Self::new([
            ("None", 0),
            ("Supervisor", 1),
            ("Manager", 2),
            ("Head", 3),
            ("Director-VP", 4),
        ])
    }

    pub fn business_impact() -> Self {
        Self::new([
            ("Minimal - single user affected", 1),
            ("Moderate - team affected", 2),
            ("Significant - department affected", 3),
            ("Severe - business-wide or revenue impact", 4),
        ])
    }

    pub fn business_urgency() -> Self {
        Self::new([
            ("Can be scheduled", 1),
            ("Needed within a month", 2),
            ("Needed within a week", 3),
            ("Blocking operations now", 4),
        ])
    }

    pub fn get(&self, key: &str) -> Option<u32> {
        self.0.get(key.trim()).copied()
    }

    /// Resolve a category; unknown keys are an error, never zero.
    pub fn resolve(&self, field: Field, key: &str) -> Result<u32> {
        self.get(key).ok_or_else(|| PriorityError::MissingMapping {
            field,
            value: key.to_string(),
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn max_weight(&self) -> Option<u32> {
        self.0.values().copied().max()
    }

    /// True when weights never decrease in listed order
    pub fn is_ascending(&self) -> bool {
        self.0
            .values()
            .zip(self.0.values().skip(1))
            .all(|(a, b)| a <= b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_trimmed_keys() {
        let scale = RatingScale::four_level();
        assert_eq!(scale.resolve(Field::Impact, "High").unwrap(), 3);
        assert_eq!(scale.resolve(Field::Impact, "  Critical ").unwrap(), 4);
    }

    #[test]
    fn unknown_key_is_missing_mapping() {
        let scale = RatingScale::four_level();
        let err = scale.resolve(Field::Urgency, "Extreme").unwrap_err();
        assert_eq!(
            err,
            PriorityError::MissingMapping {
                field: Field::Urgency,
                value: "Extreme".into()
            }
        );
        // keys are case-sensitive
        assert!(scale.get("high").is_none());
    }

    #[test]
    fn presets_are_ascending() {
        for scale in [
            RatingScale::four_level(),
            RatingScale::escalation_tiers(),
            RatingScale::escalation_management(),
            RatingScale::business_impact(),
            RatingScale::business_urgency(),
        ] {
            assert!(scale.is_ascending());
        }
        assert_eq!(RatingScale::escalation_management().max_weight(), Some(4));
        assert_eq!(RatingScale::escalation_management().get("Director-VP"), Some(4));
    }

    #[test]
    fn deserializes_in_listed_order() {
        let scale: RatingScale =
            serde_json::from_str(r#"{"Critical": 4, "Low": 1}"#).unwrap();
        let keys: Vec<_> = scale.keys().collect();
        assert_eq!(keys, vec!["Critical", "Low"]);
        assert!(!scale.is_ascending());
    }
}
