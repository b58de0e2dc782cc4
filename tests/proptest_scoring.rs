//! Property-based tests for the scorer.
//!
//! Totals must equal the documented weighted sum, rise monotonically with
//! every factor, and stay inside the normalized range.

use priority_calc::scoring::{score, PriorityRequest, ScoringProfile};
use priority_calc::Field;
use proptest::prelude::*;

fn profiles() -> impl Strategy<Value = ScoringProfile> {
    prop_oneof![
        Just(ScoringProfile::standard()),
        Just(ScoringProfile::business()),
    ]
}

fn key_at(scale: &priority_calc::scoring::RatingScale, i: usize) -> String {
    scale.keys().nth(i % scale.len()).unwrap_or_default().to_string()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn total_is_weighted_sum(
        profile in profiles(),
        i in 0usize..8, u in 0usize..8, e in 0usize..8,
        volume in 0i64..=100_000, pct in 0i64..=100,
    ) {
        let req = PriorityRequest::new(
            key_at(&profile.impact, i),
            key_at(&profile.urgency, u),
            key_at(&profile.escalation, e),
        )
        .with_volume(volume)
        .with_pct(pct);
        let b = score(&req, &profile).unwrap();

        let w = &profile.weights;
        let expected = profile.impact.get(&req.impact).unwrap() as f64 * w.impact
            + profile.urgency.get(&req.urgency).unwrap() as f64 * w.urgency
            + profile.escalation.get(&req.escalation).unwrap() as f64 * w.escalation
            + (volume as f64 / 25_000.0).clamp(0.0, 4.0) * w.workload_volume
            + (pct as f64 / 25.0).clamp(0.0, 4.0) * w.workload_pct;
        prop_assert!((b.total - expected).abs() < 1e-9);

        // summing contributions in reverse gives the same total
        let reversed: f64 = b.factors.iter().rev().map(|f| f.weighted).sum();
        prop_assert!((b.total - reversed).abs() < 1e-9);

        for f in &b.factors {
            prop_assert!(f.raw >= 0.0 && f.raw <= 4.0, "{:?} out of range", f);
        }
        prop_assert_eq!(b.label.as_str(), profile.ladder.classify(b.total));
    }

    #[test]
    fn raising_impact_never_lowers_total(
        profile in profiles(),
        u in 0usize..8, e in 0usize..8,
        volume in 0i64..=100_000, pct in 0i64..=100,
    ) {
        let mut prev: Option<(f64, usize)> = None;
        for key in profile.impact.keys() {
            let req = PriorityRequest::new(key, key_at(&profile.urgency, u), key_at(&profile.escalation, e))
                .with_volume(volume)
                .with_pct(pct);
            let b = score(&req, &profile).unwrap();
            if let Some((total, rank)) = prev {
                prop_assert!(b.total >= total);
                prop_assert!(b.rank <= rank);
            }
            prev = Some((b.total, b.rank));
        }
    }

    #[test]
    fn raising_urgency_or_escalation_never_lowers_total(
        profile in profiles(),
        i in 0usize..8,
        volume in 0i64..=100_000, pct in 0i64..=100,
    ) {
        let impact = key_at(&profile.impact, i);
        let base = |u: &str, e: &str| {
            score(
                &PriorityRequest::new(impact.clone(), u, e).with_volume(volume).with_pct(pct),
                &profile,
            )
            .unwrap()
            .total
        };
        let lowest_e = key_at(&profile.escalation, 0);
        let urgency: Vec<f64> = profile.urgency.keys().map(|u| base(u, &lowest_e)).collect();
        prop_assert!(urgency.windows(2).all(|w| w[0] <= w[1]));

        let lowest_u = key_at(&profile.urgency, 0);
        let escalation: Vec<f64> = profile.escalation.keys().map(|e| base(&lowest_u, e)).collect();
        prop_assert!(escalation.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn raising_workload_never_lowers_total(
        profile in profiles(),
        a in 0i64..=100_000, b in 0i64..=100_000,
        p in 0i64..=100, q in 0i64..=100,
    ) {
        let (lo_v, hi_v) = (a.min(b), a.max(b));
        let (lo_p, hi_p) = (p.min(q), p.max(q));
        let req = |v: i64, pct: i64| {
            let r = PriorityRequest::new(
                key_at(&profile.impact, 1),
                key_at(&profile.urgency, 1),
                key_at(&profile.escalation, 1),
            )
            .with_volume(v)
            .with_pct(pct);
            score(&r, &profile).unwrap()
        };
        let low = req(lo_v, lo_p);
        let high = req(hi_v, hi_p);
        prop_assert!(high.total >= low.total);
        prop_assert!(high.factor(Field::WorkloadVolume).raw >= low.factor(Field::WorkloadVolume).raw);
    }

    #[test]
    fn blank_mandatory_field_never_scores(
        profile in profiles(),
        blank in "[ \\t]{0,4}",
        which in 0usize..2,
    ) {
        let mut req = PriorityRequest::new(
            key_at(&profile.impact, 0),
            key_at(&profile.urgency, 0),
            key_at(&profile.escalation, 0),
        );
        let field = if which == 0 {
            req.impact = blank;
            Field::Impact
        } else {
            req.urgency = blank;
            Field::Urgency
        };
        prop_assert_eq!(
            score(&req, &profile).unwrap_err(),
            priority_calc::PriorityError::Validation { field }
        );
    }

    #[test]
    fn unknown_category_never_scores(
        profile in profiles(),
        junk in "[a-z]{3,12}",
    ) {
        prop_assume!(profile.impact.get(&junk).is_none());
        let req = PriorityRequest::new(junk, key_at(&profile.urgency, 0), key_at(&profile.escalation, 0));
        let is_missing_mapping = matches!(
            score(&req, &profile),
            Err(priority_calc::PriorityError::MissingMapping { field: Field::Impact, .. })
        );
        prop_assert!(is_missing_mapping);
    }
}
