//----------------------------------------
// search mod types
//----------------------------------------
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::design::types::{CandidateDesign, Thresholds};

/// How the ascending sweep over sample sizes is executed. Both strategies
/// return the smallest feasible sample size.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchStrategy {
    /// One size at a time
    #[default]
    Sequential,
    /// Consecutive windows of `window` sizes evaluated in parallel, each
    /// window inspected in ascending order before the next one starts
    Windowed { window: usize },
}

/// Sweep state machine: `Searching(1)` is the initial state, `Found` and
/// `Exhausted` are terminal
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchState {
    Searching(usize),
    Found { n: usize, candidate: CandidateDesign },
    Exhausted { max_n: usize },
}

impl SearchState {
    /// Moves on after the optimiser has reported `candidate` for the size
    /// currently being searched
    pub fn advance(self, candidate: CandidateDesign, max_n: usize, gamma_nom: f64) -> Self {
        match self {
            SearchState::Searching(n) if candidate.is_feasible(gamma_nom) => {
                SearchState::Found { n, candidate }
            }
            SearchState::Searching(n) if n < max_n => SearchState::Searching(n + 1),
            SearchState::Searching(_) => SearchState::Exhausted { max_n },
            terminal => terminal,
        }
    }
}

/// Terminal result of the search controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchOutcome {
    /// Caller fixed the sample size; the candidate is taken as is
    Fixed { n: usize, candidate: CandidateDesign },
    Found { n: usize, candidate: CandidateDesign },
    Exhausted { max_n: usize },
}

/// Recoverable, non-fatal information about how a search ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchDiagnostic {
    /// No size up to `max_n` met all three bounds
    Exhausted { max_n: usize },
}

impl fmt::Display for SearchDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchDiagnostic::Exhausted { max_n } => write!(
                f,
                "no design meeting the alpha, beta and gamma bounds was found with \
                 n <= {max_n}; try increasing max_n"
            ),
        }
    }
}

/// Final output of a design search. The numeric fields are `None` when the
/// sweep was exhausted; `diagnostic` then says why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignResult {
    pub valid: bool,
    pub n: Option<usize>,
    pub thresholds: Option<Thresholds>,
    pub alpha: Option<f64>,
    pub beta: Option<f64>,
    pub gamma: Option<f64>,
    pub diagnostic: Option<SearchDiagnostic>,
}
