use statrs::distribution::Normal;
use statrs::function::erf::{erfc, erfc_inv};
use std::f64::consts::SQRT_2;

use crate::error::ToutComputeErr;
use crate::normal::error::NormalDistErr;

/// Upper tail probability P(Z >= z)
pub fn std_normal_sf(z: f64) -> f64 {
    0.5 * erfc(z / SQRT_2)
}

/// Inverse of the standard normal CDF; 0 and 1 map to -inf and +inf
pub fn std_normal_quantile(p: f64) -> Result<f64, ToutComputeErr> {
    if !(0.0..=1.0).contains(&p) {
        return Err(NormalDistErr::QuantileOutOfBounds(p).into());
    }
    Ok(-SQRT_2 * erfc_inv(2.0 * p))
}

/// Normal distribution for sampling; sd must be positive and finite
pub fn normal(mean: f64, sd: f64) -> Result<Normal, ToutComputeErr> {
    Normal::new(mean, sd).map_err(|_| NormalDistErr::BadParameters { mean, sd }.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_normal_sf_values() {
        assert!((std_normal_sf(0.0) - 0.5).abs() < 1e-12);
        assert!((std_normal_sf(1.3) + std_normal_sf(-1.3) - 1.0).abs() < 1e-12);
        assert!((std_normal_sf(1.959964) - 0.025).abs() < 1e-6);
    }

    #[test]
    fn quantile_inverts_sf() {
        for p in [0.01, 0.2, 0.5, 0.8, 0.99] {
            let z = std_normal_quantile(p).unwrap();
            assert!((1.0 - std_normal_sf(z) - p).abs() < 1e-9, "p = {p}");
        }
    }

    #[test]
    fn std_normal_quantile_err() {
        if let Err(e) = std_normal_quantile(1.1) {
            assert_eq!(
                String::from(
                    "while evaluating normal distribution: arguments to \
                    quantile function should be in [0, 1]; got 1.1"
                ),
                format!("{}", e)
            );
        } else {
            panic!()
        }
    }

    #[test]
    fn std_normal_quantile_value() {
        assert!((std_normal_quantile(0.975).unwrap() - 1.959964).abs() < 0.0001);
        assert!((std_normal_quantile(0.95).unwrap() - 1.644854).abs() < 0.0001);
        assert!((std_normal_quantile(0.2).unwrap() - -0.841621).abs() < 0.0001);
    }

    #[test]
    fn std_normal_quantile_symmetric() {
        let upper = std_normal_quantile(0.975).unwrap();
        let lower = std_normal_quantile(0.025).unwrap();
        assert!((upper + lower).abs() < 1e-9);
    }

    #[test]
    fn std_normal_quantile_edges() {
        assert_eq!(std_normal_quantile(0.0).unwrap(), f64::NEG_INFINITY);
        assert_eq!(std_normal_quantile(1.0).unwrap(), f64::INFINITY);
    }

    #[test]
    fn normal_rejects_zero_sd() {
        assert!(normal(0.0, 0.0).is_err());
        assert!(normal(0.0, 2.0).is_ok());
    }
}
