//----------------------------------------
// operating characteristics mod types
//----------------------------------------
use serde::{Deserialize, Serialize};

use crate::design::types::{OutcomeType, ResolvedDesign};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingCharacteristics {
    /// P(go | null) + eta_0 * P(pause | null)
    pub alpha: f64,
    /// P(stop | alt) + eta_1 * P(pause | alt)
    pub beta: f64,
    /// Largest pause probability across the two scenarios
    pub gamma: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hypothesis {
    Null,
    Alternative,
}

/// Least favourable null and alternative rates, on a scale where larger
/// statistics favour the alternative.
///
/// When `rho_1 < rho_0` the problem is reflected: binary outcomes count
/// failures instead of successes (rates become `1 - rho`) and continuous
/// outcomes negate the mean. The adjustment interval is reflected with the
/// rates. The null is then evaluated at the top of the adjustment interval
/// and the alternative at the bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedScenarios {
    pub null_rate: f64,
    pub alt_rate: f64,
    pub outcome: OutcomeType,
}

impl OrientedScenarios {
    pub fn from_design(design: &ResolvedDesign) -> Self {
        let [tau_lo, tau_hi] = design.tau;
        let increasing = design.rho_1 > design.rho_0;

        let (null_rate, alt_rate) = match (design.outcome, increasing) {
            (_, true) => (design.rho_0 + tau_hi, design.rho_1 + tau_lo),
            (OutcomeType::Binary, false) => {
                (1.0 - (design.rho_0 + tau_lo), 1.0 - (design.rho_1 + tau_hi))
            }
            (OutcomeType::Continuous { .. }, false) => {
                (-(design.rho_0 + tau_lo), -(design.rho_1 + tau_hi))
            }
        };

        match design.outcome {
            OutcomeType::Binary => Self {
                null_rate: null_rate.clamp(0.0, 1.0),
                alt_rate: alt_rate.clamp(0.0, 1.0),
                outcome: design.outcome,
            },
            OutcomeType::Continuous { .. } => Self {
                null_rate,
                alt_rate,
                outcome: design.outcome,
            },
        }
    }

    pub fn rate(&self, hypothesis: Hypothesis) -> f64 {
        match hypothesis {
            Hypothesis::Null => self.null_rate,
            Hypothesis::Alternative => self.alt_rate,
        }
    }
}
