//----------------------------------------
// operating characteristics mod
//----------------------------------------
pub mod error;
pub mod get_ocs;
pub mod types;
