//! Posture domain
//!
//! Watches five upper-body landmarks (nose, shoulders, ears) for head droop,
//! uneven shoulders, and hunching, and raises a sustained alert only after
//! the bad state has held for a configurable run of ticks.

pub mod engine;
pub mod features;
pub mod types;

pub use engine::{PostureMonitor, PostureTick};
pub use features::PostureFeatures;
pub use types::{PoseFrame, PostureConfig};
