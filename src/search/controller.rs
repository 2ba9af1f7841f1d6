use rayon::prelude::*;
use tracing::debug;

use crate::design::types::{CandidateDesign, ResolvedDesign};
use crate::error::ToutComputeErr;
use crate::optimizer::ThresholdOptimizer;
use crate::search::types::{SearchOutcome, SearchState, SearchStrategy};

/// One optimiser call at the caller's sample size. Gamma is not checked
/// here; a supplied `n` is taken as is.
pub fn evaluate_fixed<O>(
    n: usize,
    design: &ResolvedDesign,
    optimizer: &O,
) -> Result<SearchOutcome, ToutComputeErr>
where
    O: ThresholdOptimizer + ?Sized,
{
    let candidate = optimizer.optimize(n, design)?;
    log_candidate(n, &candidate);
    Ok(SearchOutcome::Fixed { n, candidate })
}

/// Smallest `n` in `1..=max_n` whose candidate is valid with gamma within
/// `gamma_nom`. Every size is checked in ascending order: gamma is not
/// monotone in `n`, so no size may be skipped.
pub fn search_sample_size<O>(
    design: &ResolvedDesign,
    max_n: usize,
    optimizer: &O,
    strategy: SearchStrategy,
) -> Result<SearchOutcome, ToutComputeErr>
where
    O: ThresholdOptimizer + ?Sized,
{
    match strategy {
        SearchStrategy::Sequential => sequential_sweep(design, max_n, optimizer),
        SearchStrategy::Windowed { window } => {
            windowed_sweep(design, max_n, optimizer, window.max(1))
        }
    }
}

fn sequential_sweep<O>(
    design: &ResolvedDesign,
    max_n: usize,
    optimizer: &O,
) -> Result<SearchOutcome, ToutComputeErr>
where
    O: ThresholdOptimizer + ?Sized,
{
    let mut n = 1;
    loop {
        let candidate = optimizer.optimize(n, design)?;
        log_candidate(n, &candidate);
        match SearchState::Searching(n).advance(candidate, max_n, design.gamma_nom) {
            SearchState::Searching(next) => n = next,
            SearchState::Found { n, candidate } => {
                return Ok(SearchOutcome::Found { n, candidate });
            }
            SearchState::Exhausted { max_n } => return Ok(SearchOutcome::Exhausted { max_n }),
        }
    }
}

fn windowed_sweep<O>(
    design: &ResolvedDesign,
    max_n: usize,
    optimizer: &O,
    window: usize,
) -> Result<SearchOutcome, ToutComputeErr>
where
    O: ThresholdOptimizer + ?Sized,
{
    let mut start: usize = 1;
    loop {
        let end = start.saturating_add(window - 1).min(max_n);
        debug!(start, end, "evaluating window of sample sizes");

        let evaluated: Vec<Result<CandidateDesign, ToutComputeErr>> = (start..=end)
            .into_par_iter()
            .map(|n| optimizer.optimize(n, design))
            .collect();

        // Same order as the sequential sweep, so an error below the first
        // feasible size surfaces exactly as it would there
        for (n, result) in (start..=end).zip(evaluated) {
            let candidate = result?;
            log_candidate(n, &candidate);
            if candidate.is_feasible(design.gamma_nom) {
                return Ok(SearchOutcome::Found { n, candidate });
            }
        }
        if end == max_n {
            return Ok(SearchOutcome::Exhausted { max_n });
        }
        start = end + 1;
    }
}

fn log_candidate(n: usize, candidate: &CandidateDesign) {
    debug!(
        n,
        valid = candidate.valid,
        alpha = candidate.alpha,
        beta = candidate.beta,
        gamma = candidate.gamma,
        "evaluated sample size"
    );
}
