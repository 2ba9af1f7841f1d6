//----------------------------------------
// optimizer mod
//----------------------------------------
pub mod golden_section;
pub mod opt_pc;

use crate::design::types::{CandidateDesign, ResolvedDesign};
use crate::error::ToutComputeErr;
use opt_pc::{DEFAULT_CONTINUOUS_GRID, opt_pc_with_grid};

/// Per-size threshold optimiser driven by the sample size search.
///
/// Implementations must be deterministic, must report `valid = false`
/// rather than an error when no thresholds meet the alpha and beta bounds,
/// and must report the attained rates either way. Errors are treated as
/// fatal by the search and are never retried.
pub trait ThresholdOptimizer: Sync {
    fn optimize(
        &self,
        n: usize,
        design: &ResolvedDesign,
    ) -> Result<CandidateDesign, ToutComputeErr>;
}

impl<F> ThresholdOptimizer for F
where
    F: Fn(usize, &ResolvedDesign) -> Result<CandidateDesign, ToutComputeErr> + Sync,
{
    fn optimize(
        &self,
        n: usize,
        design: &ResolvedDesign,
    ) -> Result<CandidateDesign, ToutComputeErr> {
        self(n, design)
    }
}

/// The built-in optimiser: minimal pause probability subject to the alpha
/// and beta bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressionOptimizer {
    /// Grid points scanned for the continuous stop threshold
    pub continuous_grid: usize,
}

impl Default for ProgressionOptimizer {
    fn default() -> Self {
        Self {
            continuous_grid: DEFAULT_CONTINUOUS_GRID,
        }
    }
}

impl ThresholdOptimizer for ProgressionOptimizer {
    fn optimize(
        &self,
        n: usize,
        design: &ResolvedDesign,
    ) -> Result<CandidateDesign, ToutComputeErr> {
        opt_pc_with_grid(n, design, self.continuous_grid)
    }
}
