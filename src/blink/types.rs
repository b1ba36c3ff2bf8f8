//! Blink-domain types

use crate::error::EngineError;
use crate::types::Landmark;
use serde::{Deserialize, Serialize};

/// Contour points per eye: P1/P4 horizontal corners, P2/P6 and P3/P5 the
/// upper/lower lid pairs
pub const EYE_POINT_COUNT: usize = 6;

/// Default mean-EAR threshold below which the eyes read as closed
pub const DEFAULT_CLOSED_EAR_THRESHOLD: f64 = 0.15;

/// Default minimum closed-eye run (ticks) for a blink to count
pub const DEFAULT_MIN_CLOSED_TICKS: u32 = 2;

/// One tick's eye observation: both eyes' ordered contour points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EyePair {
    pub left: [Landmark; EYE_POINT_COUNT],
    pub right: [Landmark; EYE_POINT_COUNT],
}

impl EyePair {
    /// Build a pair from slices, rejecting any other point count
    pub fn from_slices(left: &[Landmark], right: &[Landmark]) -> Result<Self, EngineError> {
        let convert = |points: &[Landmark], side: &str| {
            <[Landmark; EYE_POINT_COUNT]>::try_from(points).map_err(|_| {
                EngineError::MalformedFrame(format!(
                    "{side} eye requires {EYE_POINT_COUNT} landmarks, got {}",
                    points.len()
                ))
            })
        };
        Ok(Self {
            left: convert(left, "left")?,
            right: convert(right, "right")?,
        })
    }
}

/// Per-tick binary eye state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EyeState {
    Open,
    Closed,
}

/// Thresholds and debounce settings for the blink counter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlinkConfig {
    /// Mean EAR below this reads as closed eyes
    pub closed_ear_threshold: f64,
    /// Minimum closed-run length for a completed blink to count
    pub min_closed_ticks: u32,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            closed_ear_threshold: DEFAULT_CLOSED_EAR_THRESHOLD,
            min_closed_ticks: DEFAULT_MIN_CLOSED_TICKS,
        }
    }
}

impl BlinkConfig {
    /// Reject unusable settings before any tick is processed
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.closed_ear_threshold <= 0.0 {
            return Err(EngineError::InvalidConfig(
                "closed_ear_threshold must be positive".to_string(),
            ));
        }
        if self.min_closed_ticks == 0 {
            return Err(EngineError::InvalidConfig(
                "min_closed_ticks must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
