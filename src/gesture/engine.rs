//! Gesture engine
//!
//! Per-tick entry point for the hand domain: extract features, classify,
//! debounce. The engine owns the confirmation state for the session and is
//! driven by an external capture loop at whatever cadence it supplies.

use crate::debounce::LabelConfirmer;
use crate::error::EngineError;
use crate::gesture::classifier;
use crate::gesture::features::{self, HandFeatures};
use crate::gesture::types::{Gesture, GestureConfig, HandFrame};
use serde::{Deserialize, Serialize};

/// One tick's gesture output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureTick {
    /// Label produced by this tick's frame alone
    pub raw: Gesture,
    /// Debounced label after run-length confirmation
    pub confirmed: Gesture,
    /// Consecutive ticks the current raw label has been seen
    pub run_length: u32,
    /// Predicate summary for overlay rendering
    pub diagnostics: String,
}

/// Stateful per-session gesture engine.
///
/// Ticks with no hand in frame are fed through as [`Gesture::None`] so a
/// vanished hand behaves like any other label change.
#[derive(Debug, Clone)]
pub struct GestureEngine {
    config: GestureConfig,
    confirmer: LabelConfirmer<Gesture>,
}

impl GestureEngine {
    /// Create an engine, rejecting invalid configuration up front
    pub fn new(config: GestureConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let confirmer = LabelConfirmer::new(Gesture::None, config.confirm_ticks);
        Ok(Self { config, confirmer })
    }

    /// Create an engine with default thresholds
    pub fn with_defaults() -> Self {
        // Defaults are statically valid
        Self::new(GestureConfig::default()).expect("default gesture config is valid")
    }

    /// Advance one tick. `frame` is `None` when no hand was detected.
    pub fn process(&mut self, frame: Option<&HandFrame>) -> GestureTick {
        let (raw, diagnostics) = match frame {
            Some(frame) => {
                let features = features::extract(frame, &self.config);
                let raw = classifier::classify(&features);
                (raw, features.describe())
            }
            None => (Gesture::None, "no hand in frame".to_string()),
        };

        let confirmed = self.confirmer.observe(raw);

        GestureTick {
            raw,
            confirmed,
            run_length: self.confirmer.run_length(),
            diagnostics,
        }
    }

    /// Classify a frame without touching the debounce state
    pub fn classify_frame(&self, frame: &HandFrame) -> (Gesture, HandFeatures) {
        let features = features::extract(frame, &self.config);
        (classifier::classify(&features), features)
    }

    /// Currently confirmed label
    pub fn confirmed(&self) -> Gesture {
        self.confirmer.confirmed()
    }

    /// Engine configuration
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }
}
