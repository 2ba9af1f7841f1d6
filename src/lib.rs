//----------------------------------------
// Root lib
//----------------------------------------
//! Sample sizes and progression criteria for pilot trials with three
//! outcomes: stop, pause and go.
//!
//! A design is described by a null rate, an alternative rate and bounds on
//! the type I error (alpha), the type II error (beta) and the probability
//! of landing in the pause region (gamma). Outcomes are either binary or
//! normally distributed with known standard deviation. The search finds the
//! smallest sample size, and the matching stop and go thresholds, meeting
//! all three bounds.
//!
//! ```no_run
//! use toutcompute::compute::tout_design;
//! use toutcompute::compute::types::DesignInput;
//!
//! let result = tout_design(&DesignInput::new(0.5, 0.7, 0.05, 0.2))?;
//! println!("n = {:?}, thresholds = {:?}", result.n, result.thresholds);
//! # Ok::<(), toutcompute::error::ToutComputeErr>(())
//! ```

mod bound;
/// This module houses the public API for searching designs, computing
/// operating characteristics and simulating trials
pub mod compute;
mod design;
/// This module contains error types
pub mod error;
mod normal;
mod ocs;
mod optimizer;
mod search;
mod simulation;
