//----------------------------------------
// simulation mod types
//----------------------------------------
use crate::design::types::Thresholds;

/// Outcome of a single pilot trial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    Stop,
    Pause,
    Go,
}

impl Decision {
    /// Stop below `x_0`, go at or above `x_1`, pause in between
    pub fn from_statistic(y: f64, x: &Thresholds) -> Self {
        if y < x.x_0 {
            Decision::Stop
        } else if y < x.x_1 {
            Decision::Pause
        } else {
            Decision::Go
        }
    }
}
