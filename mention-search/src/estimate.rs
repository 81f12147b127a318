//! Mention-volume estimation when a page gives no authoritative count.
//!
//! The default [`ResultMultiplier`] policy scales the number of results
//! found on the first page by a fixed factor (10). It is a placeholder
//! heuristic with no statistical backing, kept behind [`EstimationPolicy`]
//! so it can be replaced without touching the backends or the orchestrator.

use crate::types::{BackendResult, EstimateKind, MentionEstimate};

/// Turns a number of results found into a mention-volume estimate.
pub trait EstimationPolicy: Send + Sync {
    /// Estimate volume from `results_found` hits on the first results page.
    fn estimate(&self, results_found: usize) -> u64;
}

/// Estimate `results_found × factor`, or zero when nothing was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultMultiplier {
    pub factor: u64,
}

impl Default for ResultMultiplier {
    fn default() -> Self {
        Self { factor: 10 }
    }
}

impl EstimationPolicy for ResultMultiplier {
    fn estimate(&self, results_found: usize) -> u64 {
        (results_found as u64).saturating_mul(self.factor)
    }
}

/// Volume for `result`, preferring its authoritative count.
///
/// Falls back to `policy` when the page had no count indicator but at least
/// one result, and to zero otherwise.
pub fn estimate_volume(result: &BackendResult, policy: &dyn EstimationPolicy) -> MentionEstimate {
    if let Some(total) = result.total_count {
        return MentionEstimate {
            value: total,
            kind: EstimateKind::Authoritative,
        };
    }
    heuristic_volume(result, policy)
}

/// Volume for `result` from the heuristic alone, ignoring any count signal.
pub fn heuristic_volume(result: &BackendResult, policy: &dyn EstimationPolicy) -> MentionEstimate {
    if result.mentions.is_empty() {
        return MentionEstimate::zero();
    }
    MentionEstimate {
        value: policy.estimate(result.mentions.len()),
        kind: EstimateKind::Heuristic,
    }
}
