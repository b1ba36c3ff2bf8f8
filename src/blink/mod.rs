//! Blink domain
//!
//! Reduces two 6-point eye contours to an eye aspect ratio per tick, turns
//! the ratio into an open/closed state, and counts completed blinks
//! edge-triggered on the closed-to-open transition.

pub mod engine;
pub mod features;
pub mod types;

pub use engine::{BlinkCounter, BlinkTick};
pub use features::EyeMetrics;
pub use types::{BlinkConfig, EyePair, EyeState};
