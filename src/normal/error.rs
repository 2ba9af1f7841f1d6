//----------------------------------------
// normal distribution errors
//----------------------------------------
use crate::error::ToutComputeErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalDistErr {
    #[error("arguments to quantile function should be in [0, 1]; got {0}")]
    QuantileOutOfBounds(f64),
    #[error("could not construct normal distribution (mean {mean}, sd {sd})")]
    BadParameters { mean: f64, sd: f64 },
}

impl From<NormalDistErr> for ToutComputeErr {
    fn from(err: NormalDistErr) -> Self {
        ToutComputeErr::NormalDist(err)
    }
}
