//----------------------------------------
// search mod
//----------------------------------------
pub mod controller;
pub mod result;
pub mod tout_design;
pub mod types;
