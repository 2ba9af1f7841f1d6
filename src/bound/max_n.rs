use crate::design::types::{OutcomeType, ResolvedDesign};
use crate::error::ToutComputeErr;
use crate::normal::std_normal::std_normal_quantile;

/// Multiple of the two-outcome sample size used as the sweep ceiling
pub const MAX_N_INFLATION: f64 = 5.0;

/// Normal-approximation sample size of the two-outcome (stop/go) design
/// with the same hypotheses and alpha/beta bounds
pub fn two_outcome_sample_size(design: &ResolvedDesign) -> Result<f64, ToutComputeErr> {
    // Worst-case Bernoulli variance (rate 0.5) for binary outcomes
    let variance = match design.outcome {
        OutcomeType::Binary => 0.25,
        OutcomeType::Continuous { sigma } => sigma * sigma,
    };
    let z_alpha = std_normal_quantile(1.0 - design.alpha_nom)?;
    let z_beta = std_normal_quantile(design.beta_nom)?;
    let delta = design.rho_1 - design.rho_0;

    Ok(variance * (z_alpha - z_beta).powi(2) / (delta * delta))
}

/// Default search ceiling: five times the two-outcome sample size, rounded
/// down. This is a heuristic; a three-outcome design with adjustment effects
/// can in principle need more, so exhaustion below it is possible.
pub fn default_max_n(design: &ResolvedDesign) -> Result<usize, ToutComputeErr> {
    let n_two = two_outcome_sample_size(design)?;
    Ok(((MAX_N_INFLATION * n_two).floor() as usize).max(1))
}

/// Caller's ceiling if given, otherwise the default
pub fn resolve_max_n(design: &ResolvedDesign) -> Result<usize, ToutComputeErr> {
    match design.max_n {
        Some(max_n) => Ok(max_n),
        None => default_max_n(design),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::types::DesignInput;

    #[test]
    fn binary_reference_case() {
        let design = DesignInput::new(0.5, 0.7, 0.05, 0.2)
            .resolve()
            .expect("failed to resolve design");
        let n_two = two_outcome_sample_size(&design).expect("failed to compute n_two");
        // qnorm(0.95) ~ 1.645, qnorm(0.2) ~ -0.842
        let from_table = 0.25 * (1.645_f64 + 0.842).powi(2) / 0.04;
        assert!((n_two - from_table).abs() < 0.05);
        assert_eq!(default_max_n(&design).unwrap(), 193);
    }

    #[test]
    fn continuous_uses_sigma() {
        let design = DesignInput::new(0.0, 0.5, 0.05, 0.2)
            .with_sigma(1.0)
            .resolve()
            .unwrap();
        let n_two = two_outcome_sample_size(&design).unwrap();
        assert!((n_two - 24.73).abs() < 0.01);
        assert_eq!(default_max_n(&design).unwrap(), 123);
    }

    #[test]
    fn symmetric_in_direction() {
        let up = DesignInput::new(0.5, 0.7, 0.05, 0.2).resolve().unwrap();
        let down = DesignInput::new(0.7, 0.5, 0.05, 0.2).resolve().unwrap();
        assert_eq!(default_max_n(&up).unwrap(), default_max_n(&down).unwrap());
    }

    #[test]
    fn never_below_one() {
        let design = DesignInput::new(0.0, 1.0, 0.45, 0.45).resolve().unwrap();
        assert_eq!(default_max_n(&design).unwrap(), 1);
    }

    #[test]
    fn supplied_ceiling_wins() {
        let design = DesignInput::new(0.5, 0.7, 0.05, 0.2)
            .with_max_n(40)
            .resolve()
            .unwrap();
        assert_eq!(resolve_max_n(&design).unwrap(), 40);
    }
}
