use itertools::Itertools;
use rand::distributions::{Bernoulli, Distribution};
use rand::{Rng, SeedableRng, rngs};
use tracing::debug;

use crate::design::types::{OutcomeType, ResolvedDesign, Thresholds};
use crate::error::ToutComputeErr;
use crate::normal::std_normal::normal;
use crate::ocs::types::{Hypothesis, OperatingCharacteristics, OrientedScenarios};
use crate::simulation::error::SimulationErr;
use crate::simulation::types::Decision;

/// Estimates alpha, beta and gamma of thresholds `x` at sample size `n` by
/// simulating `n_sims` pilot trials under each of the least favourable
/// scenarios. Results are reproducible for a given `seed`.
pub fn simulate_ocs(
    n: usize,
    x: &Thresholds,
    design: &ResolvedDesign,
    n_sims: usize,
    seed: u64,
) -> Result<OperatingCharacteristics, ToutComputeErr> {
    if n_sims == 0 {
        return Err(SimulationErr::ZeroSimulations.into());
    }
    if n == 0 {
        return Err(SimulationErr::ZeroSampleSize.into());
    }
    let scenarios = OrientedScenarios::from_design(design);

    //----------------------------------------
    // Simulate trial decisions
    let simulate = |hypothesis: Hypothesis, seed: u64| {
        simulate_decisions(
            n,
            scenarios.rate(hypothesis),
            scenarios.outcome,
            x,
            n_sims,
            seed,
        )
    };
    let null_decisions = simulate(Hypothesis::Null, seed)?;
    let alt_decisions = simulate(Hypothesis::Alternative, seed.wrapping_add(1))?;

    //----------------------------------------
    // Resolve pauses
    let mut pause_rng = rngs::StdRng::seed_from_u64(seed.wrapping_add(2));
    let alpha = error_rate(&null_decisions, Decision::Go, design.eta_0, &mut pause_rng);
    let beta = error_rate(&alt_decisions, Decision::Stop, design.eta_1, &mut pause_rng);
    let gamma = pause_rate(&null_decisions).max(pause_rate(&alt_decisions));

    debug!(n, n_sims, alpha, beta, gamma, "simulated operating characteristics");
    Ok(OperatingCharacteristics { alpha, beta, gamma })
}

fn simulate_decisions(
    n: usize,
    rate: f64,
    outcome: OutcomeType,
    x: &Thresholds,
    n_sims: usize,
    seed: u64,
) -> Result<Vec<Decision>, ToutComputeErr> {
    let mut rng = rngs::StdRng::seed_from_u64(seed);
    match outcome {
        OutcomeType::Binary => {
            let participant = Bernoulli::new(rate).map_err(|_| SimulationErr::BadRate(rate))?;
            Ok((0..n_sims)
                .map(|_| {
                    let successes = participant
                        .sample_iter(&mut rng)
                        .take(n)
                        .filter(|&s| s)
                        .count();
                    Decision::from_statistic(successes as f64, x)
                })
                .collect())
        }
        OutcomeType::Continuous { sigma } => {
            let sample_mean = normal(rate, sigma / (n as f64).sqrt())?;
            Ok(sample_mean
                .sample_iter(&mut rng)
                .take(n_sims)
                .map(|y: f64| Decision::from_statistic(y, x))
                .collect())
        }
    }
}

/// Share of trials reaching the wrong conclusion: outright `wrong`
/// decisions plus pauses that get resolved the wrong way with probability
/// `eta`
fn error_rate(decisions: &[Decision], wrong: Decision, eta: f64, rng: &mut rngs::StdRng) -> f64 {
    let errors = decisions
        .iter()
        .filter(|&&d| d == wrong || (d == Decision::Pause && rng.gen_bool(eta)))
        .count();
    errors as f64 / decisions.len() as f64
}

fn pause_rate(decisions: &[Decision]) -> f64 {
    let counts = decisions.iter().copied().counts();
    counts.get(&Decision::Pause).copied().unwrap_or(0) as f64 / decisions.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::types::DesignInput;
    use crate::ocs::get_ocs::get_ocs;

    const N_SIMS: usize = 20_000;

    fn assert_close(simulated: &OperatingCharacteristics, exact: &OperatingCharacteristics) {
        assert!((simulated.alpha - exact.alpha).abs() < 0.02, "{simulated:?} vs {exact:?}");
        assert!((simulated.beta - exact.beta).abs() < 0.02, "{simulated:?} vs {exact:?}");
        assert!((simulated.gamma - exact.gamma).abs() < 0.02, "{simulated:?} vs {exact:?}");
    }

    #[test]
    fn binary_agrees_with_exact() {
        let design = DesignInput::new(0.5, 0.7, 0.05, 0.2)
            .with_eta_0(0.3)
            .resolve()
            .unwrap();
        let x = Thresholds::new(16.0, 20.0);
        let simulated = simulate_ocs(30, &x, &design, N_SIMS, 42).unwrap();
        assert_close(&simulated, &get_ocs(30, &x, &design).unwrap());
    }

    #[test]
    fn reflected_binary_agrees_with_exact() {
        let design = DesignInput::new(0.6, 0.4, 0.05, 0.2)
            .with_tau(-0.05, 0.0)
            .resolve()
            .unwrap();
        let x = Thresholds::new(20.0, 24.0);
        let simulated = simulate_ocs(40, &x, &design, N_SIMS, 7).unwrap();
        assert_close(&simulated, &get_ocs(40, &x, &design).unwrap());
    }

    #[test]
    fn continuous_agrees_with_exact() {
        let design = DesignInput::new(0.0, 0.5, 0.05, 0.2)
            .with_sigma(1.0)
            .with_eta_1(0.8)
            .resolve()
            .unwrap();
        let x = Thresholds::new(0.2, 0.35);
        let simulated = simulate_ocs(25, &x, &design, N_SIMS, 3).unwrap();
        assert_close(&simulated, &get_ocs(25, &x, &design).unwrap());
    }

    #[test]
    fn same_seed_same_result() {
        let design = DesignInput::new(0.5, 0.7, 0.05, 0.2).resolve().unwrap();
        let x = Thresholds::new(16.0, 20.0);
        let first = simulate_ocs(30, &x, &design, 500, 11).unwrap();
        let second = simulate_ocs(30, &x, &design, 500, 11).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn zero_simulations_rejected() {
        let design = DesignInput::new(0.5, 0.7, 0.05, 0.2).resolve().unwrap();
        let err = simulate_ocs(30, &Thresholds::new(1.0, 2.0), &design, 0, 1).unwrap_err();
        assert_eq!(
            format!("{err}"),
            "while simulating design: number of simulations should be at least 1"
        );
    }
}
