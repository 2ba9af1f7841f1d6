//----------------------------------------
// compute mod
//----------------------------------------
pub mod types;

pub use crate::bound::max_n::default_max_n;
pub use crate::ocs::get_ocs::get_ocs;
pub use crate::optimizer::opt_pc::opt_pc;
pub use crate::optimizer::{ProgressionOptimizer, ThresholdOptimizer};
pub use crate::search::tout_design::{tout_design, tout_design_with};
pub use crate::simulation::simulate_ocs::simulate_ocs;
