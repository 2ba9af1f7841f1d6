//----------------------------------------
// simulation mod
//----------------------------------------
//! Monte Carlo check of the analytic operating characteristics
pub mod error;
pub mod simulate_ocs;
pub mod types;
