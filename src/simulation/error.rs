//----------------------------------------
// simulation errors
//----------------------------------------
use crate::error::ToutComputeErr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SimulationErr {
    #[error("number of simulations should be at least 1")]
    ZeroSimulations,
    #[error("simulated trials need a sample size of at least 1")]
    ZeroSampleSize,
    #[error("success probability should be in [0, 1]; got {0}")]
    BadRate(f64),
}

impl From<SimulationErr> for ToutComputeErr {
    fn from(err: SimulationErr) -> Self {
        ToutComputeErr::Simulation(err)
    }
}
