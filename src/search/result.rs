use tracing::{info, warn};

use crate::design::types::CandidateDesign;
use crate::search::types::{DesignResult, SearchDiagnostic, SearchOutcome};

/// Turns the controller's terminal state into the caller-facing result.
/// Exhaustion is reported through `valid = false` and a diagnostic, never
/// as an error.
pub fn build_result(outcome: SearchOutcome) -> DesignResult {
    match outcome {
        SearchOutcome::Fixed { n, candidate } => {
            info!(n, valid = candidate.valid, "evaluated design at fixed sample size");
            from_candidate(n, &candidate, candidate.valid)
        }
        SearchOutcome::Found { n, candidate } => {
            info!(
                n,
                x_0 = candidate.thresholds.x_0,
                x_1 = candidate.thresholds.x_1,
                "found design"
            );
            from_candidate(n, &candidate, true)
        }
        SearchOutcome::Exhausted { max_n } => {
            let diagnostic = SearchDiagnostic::Exhausted { max_n };
            warn!("{diagnostic}");
            DesignResult {
                valid: false,
                n: None,
                thresholds: None,
                alpha: None,
                beta: None,
                gamma: None,
                diagnostic: Some(diagnostic),
            }
        }
    }
}

fn from_candidate(n: usize, candidate: &CandidateDesign, valid: bool) -> DesignResult {
    DesignResult {
        valid,
        n: Some(n),
        thresholds: Some(candidate.thresholds),
        alpha: Some(candidate.alpha),
        beta: Some(candidate.beta),
        gamma: Some(candidate.gamma),
        diagnostic: None,
    }
}
