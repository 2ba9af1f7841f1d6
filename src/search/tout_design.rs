use tracing::debug;

use crate::bound::max_n::resolve_max_n;
use crate::design::types::DesignInput;
use crate::error::ToutComputeErr;
use crate::optimizer::{ProgressionOptimizer, ThresholdOptimizer};
use crate::search::controller::{evaluate_fixed, search_sample_size};
use crate::search::result::build_result;
use crate::search::types::{DesignResult, SearchStrategy};

/// Finds the smallest sample size, and the thresholds that go with it, for
/// which a three-outcome design meets the alpha, beta and gamma bounds.
///
/// Invalid input is rejected before anything else happens. When `n` is
/// supplied only that size is evaluated and the result is returned as is.
/// An exhausted search is not an error: the result comes back with
/// `valid = false` and a diagnostic.
pub fn tout_design(input: &DesignInput) -> Result<DesignResult, ToutComputeErr> {
    tout_design_with(
        input,
        &ProgressionOptimizer::default(),
        SearchStrategy::Sequential,
    )
}

/// [`tout_design`] with a caller-chosen per-size optimiser and search
/// strategy
pub fn tout_design_with<O>(
    input: &DesignInput,
    optimizer: &O,
    strategy: SearchStrategy,
) -> Result<DesignResult, ToutComputeErr>
where
    O: ThresholdOptimizer + ?Sized,
{
    let design = input.resolve()?;

    let outcome = match design.n {
        Some(n) => evaluate_fixed(n, &design, optimizer)?,
        None => {
            let max_n = resolve_max_n(&design)?;
            debug!(max_n, ?strategy, "searching sample sizes");
            search_sample_size(&design, max_n, optimizer, strategy)?
        }
    };

    Ok(build_result(outcome))
}
