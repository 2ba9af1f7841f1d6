use crate::design::types::{CandidateDesign, OutcomeType, ResolvedDesign, Thresholds};
use crate::error::ToutComputeErr;
use crate::normal::std_normal::std_normal_quantile;
use crate::ocs::get_ocs::{OcEvaluator, StatisticTail};
use crate::ocs::types::OperatingCharacteristics;
use crate::optimizer::golden_section;

/// Slack allowed when comparing attained rates to their bounds, so that
/// thresholds solved exactly onto a bound are not lost to round-off
pub const FEASIBILITY_TOL: f64 = 1e-10;

/// Grid points for the stop threshold of continuous outcomes
pub const DEFAULT_CONTINUOUS_GRID: usize = 2001;

/// Half-width of the continuous search window, in standard errors
const WINDOW_SE: f64 = 8.0;

type Scored = (Thresholds, OperatingCharacteristics);

/// Best thresholds at sample size `n`: minimal gamma subject to the alpha
/// and beta bounds, or the given thresholds when the design fixes them
pub fn opt_pc(n: usize, design: &ResolvedDesign) -> Result<CandidateDesign, ToutComputeErr> {
    opt_pc_with_grid(n, design, DEFAULT_CONTINUOUS_GRID)
}

pub fn opt_pc_with_grid(
    n: usize,
    design: &ResolvedDesign,
    continuous_grid: usize,
) -> Result<CandidateDesign, ToutComputeErr> {
    let evaluator = OcEvaluator::new(n, design)?;

    if let Some(x) = design.x {
        return Ok(candidate(design, x, evaluator.evaluate(&x)));
    }

    let best = match design.outcome {
        OutcomeType::Binary => search_binary(n, &evaluator, design),
        OutcomeType::Continuous { .. } => {
            search_continuous(&evaluator, design, continuous_grid.max(3))?
        }
    };

    match best {
        Some((x, ocs)) => Ok(candidate(design, x, ocs)),
        None => {
            let (x, ocs) = closest_two_outcome(n, &evaluator, design, continuous_grid.max(3));
            Ok(candidate(design, x, ocs))
        }
    }
}

fn candidate(
    design: &ResolvedDesign,
    x: Thresholds,
    ocs: OperatingCharacteristics,
) -> CandidateDesign {
    CandidateDesign {
        valid: meets_alpha(design, ocs.alpha) && meets_beta(design, ocs.beta),
        thresholds: x,
        alpha: ocs.alpha,
        beta: ocs.beta,
        gamma: ocs.gamma,
    }
}

fn meets_alpha(design: &ResolvedDesign, alpha: f64) -> bool {
    alpha <= design.alpha_nom + FEASIBILITY_TOL
}

fn meets_beta(design: &ResolvedDesign, beta: f64) -> bool {
    beta <= design.beta_nom + FEASIBILITY_TOL
}

/// Keeps the first candidate with the strictly smallest gamma
fn keep_better(best: &mut Option<Scored>, challenger: Scored) {
    if best.is_none_or(|(_, ocs)| challenger.1.gamma < ocs.gamma) {
        *best = Some(challenger);
    }
}

//----------------------------------------
// Binary outcomes
//----------------------------------------

// For a fixed x_0, alpha falls while beta and gamma rise with x_1, so the
// smallest x_1 that meets the alpha bound is the only one worth checking.
fn search_binary(n: usize, evaluator: &OcEvaluator, design: &ResolvedDesign) -> Option<Scored> {
    let counts: Vec<usize> = (0..=n + 1).collect();
    let mut best: Option<Scored> = None;

    for x_0 in 0..=n + 1 {
        let upper = &counts[x_0..];
        let idx = upper.partition_point(|&x_1| {
            let x = Thresholds::new(x_0 as f64, x_1 as f64);
            !meets_alpha(design, evaluator.alpha(&x))
        });
        let Some(&x_1) = upper.get(idx) else {
            continue;
        };

        let x = Thresholds::new(x_0 as f64, x_1 as f64);
        let ocs = evaluator.evaluate(&x);
        if meets_beta(design, ocs.beta) {
            keep_better(&mut best, (x, ocs));
        }
    }

    best
}

//----------------------------------------
// Continuous outcomes
//----------------------------------------

fn search_continuous(
    evaluator: &OcEvaluator,
    design: &ResolvedDesign,
    grid_points: usize,
) -> Result<Option<Scored>, ToutComputeErr> {
    let grid = stop_threshold_grid(evaluator, grid_points);

    let mut best: Option<Scored> = None;
    let mut best_idx = 0;
    for (idx, &x_0) in grid.iter().enumerate() {
        if let Some(scored) = feasible_at(evaluator, design, x_0)? {
            let improved = best.is_none_or(|(_, ocs)| scored.1.gamma < ocs.gamma);
            keep_better(&mut best, scored);
            if improved {
                best_idx = idx;
            }
        }
    }

    let Some(grid_best) = best else {
        return Ok(None);
    };

    //----------------------------------------
    // Polish within the neighbouring grid cells
    let bracket = [
        grid[best_idx.saturating_sub(1)],
        grid[(best_idx + 1).min(grid.len() - 1)],
    ];
    let polished = golden_section::minimize(
        |x_0| {
            Ok::<_, ToutComputeErr>(match feasible_at(evaluator, design, x_0)? {
                Some((_, ocs)) => ocs.gamma,
                None => f64::INFINITY,
            })
        },
        bracket,
        1e-12,
        100,
    )?;

    if polished.value < grid_best.1.gamma
        && let Some(refined) = feasible_at(evaluator, design, polished.x)?
    {
        return Ok(Some(refined));
    }
    Ok(Some(grid_best))
}

fn continuous_window(evaluator: &OcEvaluator) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for tail in [&evaluator.null, &evaluator.alt] {
        if let StatisticTail::Continuous { mean, se } = tail {
            lo = lo.min(mean - WINDOW_SE * se);
            hi = hi.max(mean + WINDOW_SE * se);
        }
    }
    (lo, hi)
}

fn stop_threshold_grid(evaluator: &OcEvaluator, grid_points: usize) -> Vec<f64> {
    let (lo, hi) = continuous_window(evaluator);
    let step = (hi - lo) / (grid_points - 1) as f64;
    (0..grid_points).map(|i| lo + step * i as f64).collect()
}

/// Smallest go threshold meeting the alpha bound for stop threshold `x_0`,
/// kept only if the beta bound also holds
fn feasible_at(
    evaluator: &OcEvaluator,
    design: &ResolvedDesign,
    x_0: f64,
) -> Result<Option<Scored>, ToutComputeErr> {
    let StatisticTail::Continuous { mean, se } = evaluator.null else {
        return Ok(None);
    };
    let reach_null = evaluator.null.sf(x_0);
    let eta_0 = design.eta_0;

    // alpha = (1 - eta_0) * P(Y >= x_1) + eta_0 * P(Y >= x_0)
    let x_1 = if eta_0 >= 1.0 {
        x_0
    } else {
        let max_go = (design.alpha_nom - eta_0 * reach_null) / (1.0 - eta_0);
        if max_go <= 0.0 {
            return Ok(None);
        }
        if max_go >= reach_null {
            x_0
        } else {
            (mean + se * std_normal_quantile(1.0 - max_go)?).max(x_0)
        }
    };

    let x = Thresholds::new(x_0, x_1);
    let ocs = evaluator.evaluate(&x);
    if meets_alpha(design, ocs.alpha) && meets_beta(design, ocs.beta) {
        Ok(Some((x, ocs)))
    } else {
        Ok(None)
    }
}

//----------------------------------------
// Infeasible sample sizes
//----------------------------------------

/// Stop/go rule (x_0 = x_1) closest to meeting both bounds, measured by the
/// larger of alpha / alpha_nom and beta / beta_nom
fn closest_two_outcome(
    n: usize,
    evaluator: &OcEvaluator,
    design: &ResolvedDesign,
    grid_points: usize,
) -> Scored {
    let cutoffs: Vec<f64> = match design.outcome {
        OutcomeType::Binary => (0..=n + 1).map(|k| k as f64).collect(),
        OutcomeType::Continuous { .. } => stop_threshold_grid(evaluator, grid_points),
    };

    let mut best: Option<(f64, Scored)> = None;
    for c in cutoffs {
        let x = Thresholds::new(c, c);
        let ocs = evaluator.evaluate(&x);
        let excess = (ocs.alpha / design.alpha_nom).max(ocs.beta / design.beta_nom);
        if best.as_ref().is_none_or(|(e, _)| excess < *e) {
            best = Some((excess, (x, ocs)));
        }
    }

    // Cutoff lists are never empty
    best.map(|(_, scored)| scored).unwrap_or_else(|| {
        let x = Thresholds::new(0.0, 0.0);
        (x, evaluator.evaluate(&x))
    })
}
