//----------------------------------------
// compute mod types
//----------------------------------------
pub use crate::design::types::{
    CandidateDesign, DesignInput, OutcomeType, ResolvedDesign, Thresholds,
};
pub use crate::ocs::types::OperatingCharacteristics;
pub use crate::search::types::{DesignResult, SearchDiagnostic, SearchStrategy};
