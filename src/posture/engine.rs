//! Posture monitor
//!
//! Per-tick entry point for the posture domain. A single bad tick is
//! invisible to the user; the alert fires only after the bad state holds
//! for the configured run, and clears the instant posture recovers.

use crate::debounce::SustainedCondition;
use crate::error::EngineError;
use crate::posture::features::{self, PostureFeatures};
use crate::posture::types::{PoseFrame, PostureConfig};
use serde::{Deserialize, Serialize};

/// One tick's posture output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostureTick {
    /// Whether this tick alone read as bad posture
    pub bad_this_tick: bool,
    /// Consecutive bad-posture ticks so far
    pub run_length: u32,
    /// Sustained alert state after debouncing
    pub alert: bool,
    /// Trigger summary for overlay rendering
    pub diagnostics: String,
}

/// Stateful per-session posture monitor.
///
/// A tick with no subject, or with landmarks under the visibility floor, is
/// scored as good posture: it resets the run and clears any alert, exactly
/// like a genuinely good tick.
#[derive(Debug, Clone)]
pub struct PostureMonitor {
    config: PostureConfig,
    sustained: SustainedCondition,
}

impl PostureMonitor {
    /// Create a monitor, rejecting invalid configuration up front
    pub fn new(config: PostureConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let sustained = SustainedCondition::new(config.alert_ticks);
        Ok(Self { config, sustained })
    }

    /// Create a monitor with default thresholds
    pub fn with_defaults() -> Self {
        Self::new(PostureConfig::default()).expect("default posture config is valid")
    }

    /// Advance one tick. `frame` is `None` when no subject was detected.
    pub fn process(&mut self, frame: Option<&PoseFrame>) -> PostureTick {
        let scored = frame.and_then(|frame| features::extract(frame, &self.config));

        let (bad_this_tick, diagnostics) = match &scored {
            Some(features) => (features.is_bad(), features.describe()),
            None => (false, "landmarks not fully visible".to_string()),
        };

        let alert = self.sustained.observe(bad_this_tick);

        PostureTick {
            bad_this_tick,
            run_length: self.sustained.run_length(),
            alert,
            diagnostics,
        }
    }

    /// Score a frame without touching the debounce state
    pub fn score_frame(&self, frame: &PoseFrame) -> Option<PostureFeatures> {
        features::extract(frame, &self.config)
    }

    /// Whether the alert is currently raised
    pub fn alert_active(&self) -> bool {
        self.sustained.is_active()
    }

    /// Monitor configuration
    pub fn config(&self) -> &PostureConfig {
        &self.config
    }
}
