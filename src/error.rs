//----------------------------------------
// Crate error type
//----------------------------------------
pub use crate::design::error::DesignValidationErr;
pub use crate::normal::error::NormalDistErr;
pub use crate::ocs::error::OcComputeErr;
pub use crate::simulation::error::SimulationErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToutComputeErr {
    #[error("invalid design: {0}")]
    InvalidDesign(DesignValidationErr),
    #[error("while evaluating normal distribution: {0}")]
    NormalDist(NormalDistErr),
    #[error("while computing operating characteristics: {0}")]
    OperatingCharacteristics(OcComputeErr),
    #[error("while simulating design: {0}")]
    Simulation(SimulationErr),
}

impl ToutComputeErr {
    /// True when the error was raised by input validation, before any
    /// numerical work started
    pub fn is_invalid_design(&self) -> bool {
        matches!(self, ToutComputeErr::InvalidDesign(_))
    }
}
