//----------------------------------------
// design validation errors
//----------------------------------------
use crate::error::ToutComputeErr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum DesignValidationErr {
    #[error("null and alternative rates must differ; both are {0}")]
    IdenticalRates(f64),
    #[error("{name} must be finite; got {value}")]
    NonFinite { name: &'static str, value: f64 },
    #[error("{name} should be in (0, 1); got {value}")]
    NominalOutOfBounds { name: &'static str, value: f64 },
    #[error("gamma_nom should be in (0, 1]; got {0}")]
    GammaOutOfBounds(f64),
    #[error("{name} should be in [0, 1]; got {value}")]
    EtaOutOfBounds { name: &'static str, value: f64 },
    #[error("{name} should be in [0, 1] for a binary outcome; got {value}")]
    RateOutOfBounds { name: &'static str, value: f64 },
    #[error("tau bounds are not ordered (lower {lower}, upper {upper})")]
    TauNotOrdered { lower: f64, upper: f64 },
    #[error("sigma should be positive; got {0}")]
    NonPositiveSigma(f64),
    #[error("sample size must be at least 1")]
    ZeroSampleSize,
    #[error("max_n must be at least 1")]
    ZeroMaxN,
    #[error("thresholds are not ordered (x_0 {x_0}, x_1 {x_1})")]
    ThresholdsNotOrdered { x_0: f64, x_1: f64 },
    #[error("thresholds for a binary outcome should be non-negative whole numbers; got {0}")]
    NonIntegerThreshold(f64),
}

impl From<DesignValidationErr> for ToutComputeErr {
    fn from(err: DesignValidationErr) -> Self {
        ToutComputeErr::InvalidDesign(err)
    }
}
