use statrs::distribution::{Binomial, Discrete};

use crate::design::types::{OutcomeType, ResolvedDesign, Thresholds};
use crate::error::ToutComputeErr;
use crate::normal::std_normal::std_normal_sf;
use crate::ocs::error::OcComputeErr;
use crate::ocs::types::{Hypothesis, OperatingCharacteristics, OrientedScenarios};

/// Upper tail of the oriented statistic under one scenario
#[derive(Debug, Clone, PartialEq)]
pub enum StatisticTail {
    /// `sf[k] = P(Y >= k)` for `k = 0..=n+1`
    Binary { sf: Vec<f64> },
    /// Sample mean ~ N(mean, se^2)
    Continuous { mean: f64, se: f64 },
}

impl StatisticTail {
    pub fn new(n: usize, rate: f64, outcome: OutcomeType) -> Result<Self, ToutComputeErr> {
        if n == 0 {
            return Err(OcComputeErr::ZeroSampleSize.into());
        }
        match outcome {
            OutcomeType::Binary => Ok(StatisticTail::Binary {
                sf: binomial_sf(n, rate)?,
            }),
            OutcomeType::Continuous { sigma } => Ok(StatisticTail::Continuous {
                mean: rate,
                se: sigma / (n as f64).sqrt(),
            }),
        }
    }

    /// P(Y >= x)
    pub fn sf(&self, x: f64) -> f64 {
        match self {
            StatisticTail::Binary { sf } => {
                if x <= 0.0 {
                    1.0
                } else if x >= (sf.len() - 1) as f64 {
                    0.0
                } else {
                    sf[x.ceil() as usize]
                }
            }
            StatisticTail::Continuous { mean, se } => std_normal_sf((x - mean) / se),
        }
    }
}

fn binomial_sf(n: usize, rate: f64) -> Result<Vec<f64>, ToutComputeErr> {
    // Degenerate rates put all mass on one end
    let pmf: Vec<f64> = if rate <= 0.0 {
        (0..=n).map(|k| if k == 0 { 1.0 } else { 0.0 }).collect()
    } else if rate >= 1.0 {
        (0..=n).map(|k| if k == n { 1.0 } else { 0.0 }).collect()
    } else {
        let dist = Binomial::new(rate, n as u64)
            .map_err(|_| ToutComputeErr::from(OcComputeErr::Binomial { n, rate }))?;
        (0..=n as u64).map(|k| dist.pmf(k)).collect()
    };

    let mut sf = vec![0.0; n + 2];
    for k in (0..=n).rev() {
        sf[k] = (sf[k + 1] + pmf[k]).min(1.0);
    }
    sf[0] = 1.0;
    Ok(sf)
}

/// Evaluates operating characteristics of many threshold pairs at a single
/// sample size without rebuilding the scenario distributions.
#[derive(Debug, Clone)]
pub struct OcEvaluator {
    pub null: StatisticTail,
    pub alt: StatisticTail,
    pub eta_0: f64,
    pub eta_1: f64,
}

impl OcEvaluator {
    pub fn new(n: usize, design: &ResolvedDesign) -> Result<Self, ToutComputeErr> {
        let scenarios = OrientedScenarios::from_design(design);
        Ok(Self {
            null: StatisticTail::new(n, scenarios.rate(Hypothesis::Null), scenarios.outcome)?,
            alt: StatisticTail::new(
                n,
                scenarios.rate(Hypothesis::Alternative),
                scenarios.outcome,
            )?,
            eta_0: design.eta_0,
            eta_1: design.eta_1,
        })
    }

    pub fn alpha(&self, x: &Thresholds) -> f64 {
        let go = self.null.sf(x.x_1);
        let pause = (self.null.sf(x.x_0) - go).max(0.0);
        go + self.eta_0 * pause
    }

    pub fn beta(&self, x: &Thresholds) -> f64 {
        let go = self.alt.sf(x.x_1);
        let not_stop = self.alt.sf(x.x_0);
        let pause = (not_stop - go).max(0.0);
        (1.0 - not_stop) + self.eta_1 * pause
    }

    pub fn gamma(&self, x: &Thresholds) -> f64 {
        let pause_null = self.null.sf(x.x_0) - self.null.sf(x.x_1);
        let pause_alt = self.alt.sf(x.x_0) - self.alt.sf(x.x_1);
        pause_null.max(pause_alt).max(0.0)
    }

    pub fn evaluate(&self, x: &Thresholds) -> OperatingCharacteristics {
        OperatingCharacteristics {
            alpha: self.alpha(x),
            beta: self.beta(x),
            gamma: self.gamma(x),
        }
    }
}

/// Attained alpha, beta and gamma of thresholds `x` at sample size `n`
pub fn get_ocs(
    n: usize,
    x: &Thresholds,
    design: &ResolvedDesign,
) -> Result<OperatingCharacteristics, ToutComputeErr> {
    Ok(OcEvaluator::new(n, design)?.evaluate(x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::types::DesignInput;

    fn binary_design() -> ResolvedDesign {
        DesignInput::new(0.5, 0.7, 0.05, 0.2)
            .resolve()
            .expect("failed to resolve design")
    }

    #[test]
    fn binomial_tail_values() {
        let tail = StatisticTail::new(4, 0.5, OutcomeType::Binary).unwrap();
        // P(Y >= k) for Bin(4, 0.5): 1, 15/16, 11/16, 5/16, 1/16, 0
        let expected = [1.0, 0.9375, 0.6875, 0.3125, 0.0625, 0.0];
        for (k, e) in expected.iter().enumerate() {
            assert!((tail.sf(k as f64) - e).abs() < 1e-12, "k = {k}");
        }
        assert_eq!(tail.sf(-3.0), 1.0);
        assert_eq!(tail.sf(9.0), 0.0);
        // Non-integer thresholds round up to the next attainable count
        assert_eq!(tail.sf(2.5), tail.sf(3.0));
    }

    #[test]
    fn degenerate_rates() {
        let zero = StatisticTail::new(5, 0.0, OutcomeType::Binary).unwrap();
        assert_eq!(zero.sf(1.0), 0.0);
        let one = StatisticTail::new(5, 1.0, OutcomeType::Binary).unwrap();
        assert_eq!(one.sf(5.0), 1.0);
    }

    #[test]
    fn zero_sample_size_errors() {
        let err = StatisticTail::new(0, 0.5, OutcomeType::Binary).unwrap_err();
        assert_eq!(
            format!("{err}"),
            "while computing operating characteristics: operating characteristics \
             need a sample size of at least 1"
        );
    }

    #[test]
    fn two_outcome_rule_has_no_pause() {
        let ocs = get_ocs(30, &Thresholds::new(20.0, 20.0), &binary_design()).unwrap();
        assert_eq!(ocs.gamma, 0.0);
        // Exact binomial tails at n = 30
        assert!((ocs.alpha - 0.04937).abs() < 0.0001);
        assert!((ocs.beta - 0.26963).abs() < 0.0001);
    }

    #[test]
    fn eta_weights_pause() {
        let design = binary_design();
        let x = Thresholds::new(16.0, 20.0);
        let evaluator = OcEvaluator::new(25, &design).unwrap();
        let go = evaluator.null.sf(20.0);
        let pause = evaluator.null.sf(16.0) - go;
        assert!((evaluator.alpha(&x) - (go + 0.5 * pause)).abs() < 1e-12);

        let strict = DesignInput::new(0.5, 0.7, 0.05, 0.2)
            .with_eta_0(0.0)
            .with_eta_1(1.0)
            .resolve()
            .unwrap();
        let strict_ocs = get_ocs(25, &x, &strict).unwrap();
        assert!((strict_ocs.alpha - go).abs() < 1e-12);
        let alt = OcEvaluator::new(25, &strict).unwrap().alt;
        assert!((strict_ocs.beta - (1.0 - alt.sf(20.0))).abs() < 1e-12);
    }

    #[test]
    fn adjustment_effect_inflates_alpha() {
        let x = Thresholds::new(15.0, 18.0);
        let plain = get_ocs(25, &x, &binary_design()).unwrap();
        let adjusted = DesignInput::new(0.5, 0.7, 0.05, 0.2)
            .with_tau(0.0, 0.05)
            .resolve()
            .unwrap();
        let shifted = get_ocs(25, &x, &adjusted).unwrap();
        assert!(shifted.alpha > plain.alpha);
        assert_eq!(shifted.beta, plain.beta);
    }

    #[test]
    fn continuous_closed_form() {
        let design = DesignInput::new(0.0, 0.5, 0.05, 0.2)
            .with_sigma(1.0)
            .resolve()
            .unwrap();
        // se = 0.2 at n = 25
        let ocs = get_ocs(25, &Thresholds::new(0.2, 0.4), &design).unwrap();
        let alpha = std_normal_sf(2.0) + 0.5 * (std_normal_sf(1.0) - std_normal_sf(2.0));
        let beta = (1.0 - std_normal_sf(-1.5)) + 0.5 * (std_normal_sf(-1.5) - std_normal_sf(-0.5));
        let gamma = (std_normal_sf(1.0) - std_normal_sf(2.0))
            .max(std_normal_sf(-1.5) - std_normal_sf(-0.5));
        assert!((ocs.alpha - alpha).abs() < 1e-12);
        assert!((ocs.beta - beta).abs() < 1e-12);
        assert!((ocs.gamma - gamma).abs() < 1e-12);
    }
}
