//! Blink counter
//!
//! Per-tick entry point for the blink domain. A blink is a closed-eye run
//! of at least the configured minimum that then ends with an open tick; the
//! tally bumps once per such run, never once per tick.

use crate::blink::features::{self, EyeMetrics};
use crate::blink::types::{BlinkConfig, EyePair, EyeState};
use crate::debounce::PulseTally;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// One tick's blink output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlinkTick {
    /// Eye state read from this tick's frame
    pub eye_state: EyeState,
    /// Mean eye aspect ratio, absent when no face was in frame
    pub mean_ear: Option<f64>,
    /// Length of the in-progress closed-eye run
    pub closed_run_length: u32,
    /// Whether this tick completed a qualifying blink
    pub blink_completed: bool,
    /// Total blinks this session
    pub total_blinks: u64,
}

/// Stateful per-session blink counter.
///
/// Ticks with no face are fed through as open eyes: a qualifying closed run
/// that ends because the face vanished still counts, and the run is reset
/// either way.
#[derive(Debug, Clone)]
pub struct BlinkCounter {
    config: BlinkConfig,
    tally: PulseTally,
}

impl BlinkCounter {
    /// Create a counter, rejecting invalid configuration up front
    pub fn new(config: BlinkConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let tally = PulseTally::new(config.min_closed_ticks);
        Ok(Self { config, tally })
    }

    /// Create a counter with default thresholds
    pub fn with_defaults() -> Self {
        Self::new(BlinkConfig::default()).expect("default blink config is valid")
    }

    /// Advance one tick. `eyes` is `None` when no face was detected.
    pub fn process(&mut self, eyes: Option<&EyePair>) -> BlinkTick {
        let metrics = eyes.map(features::extract);

        let eye_state = match &metrics {
            Some(m) if m.mean_ear < self.config.closed_ear_threshold => EyeState::Closed,
            _ => EyeState::Open,
        };

        let blink_completed = self.tally.observe(eye_state == EyeState::Closed);

        BlinkTick {
            eye_state,
            mean_ear: metrics.map(|m| m.mean_ear),
            closed_run_length: self.tally.run_length(),
            blink_completed,
            total_blinks: self.tally.count(),
        }
    }

    /// Measure a frame without touching the debounce state
    pub fn measure(&self, eyes: &EyePair) -> EyeMetrics {
        features::extract(eyes)
    }

    /// Total blinks this session
    pub fn total_blinks(&self) -> u64 {
        self.tally.count()
    }

    /// Counter configuration
    pub fn config(&self) -> &BlinkConfig {
        &self.config
    }
}
