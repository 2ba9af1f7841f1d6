//----------------------------------------
// bound mod
//----------------------------------------
pub mod max_n;
