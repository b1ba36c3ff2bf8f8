//! Hand-gesture domain
//!
//! Classifies a 21-point hand landmark set into one of a closed set of
//! gestures and debounces the per-tick result with run-length confirmation.
//!
//! - [`types`]: landmark naming, the gesture label set, configuration
//! - [`features`]: per-finger extension/fold predicates and pinch distance
//! - [`classifier`]: the priority-ordered rule table
//! - [`engine`]: the per-tick entry point owning the debounce state

pub mod classifier;
pub mod engine;
pub mod features;
pub mod types;

pub use engine::{GestureEngine, GestureTick};
pub use features::HandFeatures;
pub use types::{Gesture, GestureConfig, HandFrame, HandLandmark};
