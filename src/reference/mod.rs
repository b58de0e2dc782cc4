//! Read-only reference data used to pre-fill the workload volume.

mod lookup;
mod source;

pub use lookup::{ReferenceDataLookup, ReferenceRecord};
pub use source::ReferenceSource;

use crate::scoring::WorkloadConfig;
use tracing::warn;

/// Volume to score with: what the user entered, else the lookup default for
/// `key`, else 0. A lookup value never overrides an entered one and is
/// clamped to `[0, workload.volume_max]`.
pub fn default_volume(
    entered: Option<i64>,
    lookup: Option<&ReferenceDataLookup>,
    key: Option<&str>,
    workload: &WorkloadConfig,
) -> i64 {
    if let Some(v) = entered {
        return v;
    }
    let (Some(l), Some(k)) = (lookup, key) else {
        return 0;
    };
    let Some(v) = l.get(k) else {
        return 0;
    };
    let volume = v.round() as i64;
    let clamped = volume.clamp(0, workload.volume_max);
    if clamped != volume {
        warn!(
            key = k,
            workload = v,
            max = workload.volume_max,
            "reference workload clamped to volume bounds"
        );
    }
    clamped
}
