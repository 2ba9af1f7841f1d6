//----------------------------------------
// operating characteristic errors
//----------------------------------------
use crate::error::ToutComputeErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcComputeErr {
    #[error("could not construct binomial distribution (n {n}, rate {rate})")]
    Binomial { n: usize, rate: f64 },
    #[error("operating characteristics need a sample size of at least 1")]
    ZeroSampleSize,
}

impl From<OcComputeErr> for ToutComputeErr {
    fn from(err: OcComputeErr) -> Self {
        ToutComputeErr::OperatingCharacteristics(err)
    }
}
