//! Hand-domain types
//!
//! Landmark indices follow the common 21-point hand model (wrist plus four
//! joints per digit) so frames can be fed straight from an external hand
//! estimator without re-mapping.

use crate::error::EngineError;
use crate::types::Landmark;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of points in a hand landmark set
pub const HAND_LANDMARK_COUNT: usize = 21;

/// Default margin (normalized units) by which a fingertip must sit above its
/// PIP joint to count as extended
pub const DEFAULT_EXTENSION_MARGIN: f64 = 0.01;

/// Default margin by which the thumb tip must sit above its MCP joint to
/// count as pointing up
pub const DEFAULT_THUMB_UP_MARGIN: f64 = 0.03;

/// Default thumb-tip to index-tip distance below which the hand is pinching
pub const DEFAULT_PINCH_DISTANCE: f64 = 0.06;

/// Default number of consecutive ticks a raw gesture must sustain before it
/// is confirmed
pub const DEFAULT_CONFIRM_TICKS: u32 = 5;

/// Named positions in the 21-point hand landmark set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandLandmark {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

impl HandLandmark {
    /// Index of this point within a [`HandFrame`]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// One tick's hand observation: the full 21-point landmark set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandFrame {
    landmarks: [Landmark; HAND_LANDMARK_COUNT],
}

impl HandFrame {
    /// Build a frame from exactly 21 landmarks
    pub fn new(landmarks: [Landmark; HAND_LANDMARK_COUNT]) -> Self {
        Self { landmarks }
    }

    /// Build a frame from a slice, rejecting any other point count
    pub fn from_slice(landmarks: &[Landmark]) -> Result<Self, EngineError> {
        let landmarks: [Landmark; HAND_LANDMARK_COUNT] =
            landmarks.try_into().map_err(|_| {
                EngineError::MalformedFrame(format!(
                    "hand frame requires {} landmarks, got {}",
                    HAND_LANDMARK_COUNT,
                    landmarks.len()
                ))
            })?;
        Ok(Self { landmarks })
    }

    /// Point at a named position
    pub fn point(&self, which: HandLandmark) -> &Landmark {
        &self.landmarks[which.index()]
    }

    /// All 21 points in index order
    pub fn landmarks(&self) -> &[Landmark; HAND_LANDMARK_COUNT] {
        &self.landmarks
    }
}

/// Gesture label set, one value per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    /// Idle: no hand in frame or no rule matched
    None,
    OpenHand,
    OkSign,
    ThumbsUp,
    Pointing,
    PeaceSign,
    ClosedFist,
    /// Fallback: 1-4 fingers extended without matching a named gesture
    Counting(u8),
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gesture::None => write!(f, "no gesture"),
            Gesture::OpenHand => write!(f, "open hand"),
            Gesture::OkSign => write!(f, "OK"),
            Gesture::ThumbsUp => write!(f, "thumbs up"),
            Gesture::Pointing => write!(f, "pointing (index)"),
            Gesture::PeaceSign => write!(f, "peace sign"),
            Gesture::ClosedFist => write!(f, "closed fist"),
            Gesture::Counting(n) => write!(f, "counting: {n}"),
        }
    }
}

/// Thresholds and debounce settings for the gesture engine.
///
/// Margins are in normalized image units; recalibrate per camera/subject by
/// overriding individual fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Fingertip must be above its PIP joint by this much to be extended
    pub extension_margin: f64,
    /// Thumb tip must be above its MCP joint by this much to count as up
    pub thumb_up_margin: f64,
    /// Thumb-tip to index-tip distance below which the hand is pinching
    pub pinch_distance: f64,
    /// Consecutive ticks a raw gesture must sustain before confirmation
    pub confirm_ticks: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            extension_margin: DEFAULT_EXTENSION_MARGIN,
            thumb_up_margin: DEFAULT_THUMB_UP_MARGIN,
            pinch_distance: DEFAULT_PINCH_DISTANCE,
            confirm_ticks: DEFAULT_CONFIRM_TICKS,
        }
    }
}

impl GestureConfig {
    /// Reject unusable settings before any tick is processed
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.extension_margin <= 0.0 {
            return Err(EngineError::InvalidConfig(
                "extension_margin must be positive".to_string(),
            ));
        }
        if self.thumb_up_margin <= 0.0 {
            return Err(EngineError::InvalidConfig(
                "thumb_up_margin must be positive".to_string(),
            ));
        }
        if self.pinch_distance <= 0.0 {
            return Err(EngineError::InvalidConfig(
                "pinch_distance must be positive".to_string(),
            ));
        }
        if self.confirm_ticks == 0 {
            return Err(EngineError::InvalidConfig(
                "confirm_ticks must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
