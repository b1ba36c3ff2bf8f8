//! landmark.tick.v1 input schema
//!
//! One record per tick, NDJSON on the wire. Each record carries a single
//! domain-tagged observation; an absent landmark payload is the "subject not
//! detected" flag, which is a valid tick, not an error. Records are
//! validated before any engine sees them so malformed input fails loudly at
//! the boundary instead of silently misclassifying.

use crate::blink::types::{EyePair, EYE_POINT_COUNT};
use crate::error::EngineError;
use crate::gesture::types::{HandFrame, HAND_LANDMARK_COUNT};
use crate::posture::types::PoseFrame;
use crate::types::Landmark;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current input schema version
pub const SCHEMA_VERSION: &str = "landmark.tick.v1";

/// Record-level validation failures
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Unsupported schema version: {0} (expected {SCHEMA_VERSION})")]
    UnsupportedVersion(String),

    #[error("{domain} observation requires {expected} landmarks, got {got}")]
    WrongLandmarkCount {
        domain: &'static str,
        expected: usize,
        got: usize,
    },
}

/// Both eye contours as they arrive on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EyeObservation {
    pub left: Vec<Landmark>,
    pub right: Vec<Landmark>,
}

/// Domain-tagged observation payload.
///
/// The landmark field is optional in every domain: `None` means the
/// estimator found no subject this tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "domain", rename_all = "snake_case")]
pub enum Observation {
    /// 21-point hand landmark set
    Hand {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        landmarks: Option<Vec<Landmark>>,
    },
    /// Upper-body landmarks for posture scoring
    Pose {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        landmarks: Option<PoseFrame>,
    },
    /// 6-point eye contours for blink counting
    Face {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        eyes: Option<EyeObservation>,
    },
}

impl Observation {
    /// Domain name as it appears on the wire
    pub fn domain(&self) -> &'static str {
        match self {
            Observation::Hand { .. } => "hand",
            Observation::Pose { .. } => "pose",
            Observation::Face { .. } => "face",
        }
    }

    /// Whether a subject was detected this tick
    pub fn subject_detected(&self) -> bool {
        match self {
            Observation::Hand { landmarks } => landmarks.is_some(),
            Observation::Pose { landmarks } => landmarks.is_some(),
            Observation::Face { eyes } => eyes.is_some(),
        }
    }

    /// Typed hand frame, `Ok(None)` when no hand was detected
    pub fn hand_frame(&self) -> Result<Option<HandFrame>, ValidationError> {
        match self {
            Observation::Hand {
                landmarks: Some(points),
            } => {
                if points.len() != HAND_LANDMARK_COUNT {
                    return Err(ValidationError::WrongLandmarkCount {
                        domain: "hand",
                        expected: HAND_LANDMARK_COUNT,
                        got: points.len(),
                    });
                }
                // Count was just checked
                Ok(Some(HandFrame::from_slice(points).expect("21 landmarks")))
            }
            _ => Ok(None),
        }
    }

    /// Typed pose frame, `None` when no subject was detected
    pub fn pose_frame(&self) -> Option<&PoseFrame> {
        match self {
            Observation::Pose { landmarks } => landmarks.as_ref(),
            _ => None,
        }
    }

    /// Typed eye pair, `Ok(None)` when no face was detected
    pub fn eye_pair(&self) -> Result<Option<EyePair>, ValidationError> {
        match self {
            Observation::Face { eyes: Some(eyes) } => {
                for (side, points) in [("left", &eyes.left), ("right", &eyes.right)] {
                    if points.len() != EYE_POINT_COUNT {
                        return Err(ValidationError::WrongLandmarkCount {
                            domain: side,
                            expected: EYE_POINT_COUNT,
                            got: points.len(),
                        });
                    }
                }
                Ok(Some(
                    EyePair::from_slices(&eyes.left, &eyes.right).expect("6 landmarks per eye"),
                ))
            }
            _ => Ok(None),
        }
    }
}

/// One tick's input record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickRecord {
    /// Must be [`SCHEMA_VERSION`]
    pub schema_version: String,
    /// Producer-side tick counter, optional
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick: Option<u64>,
    /// When the frame was observed, optional
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<DateTime<Utc>>,
    /// The observation payload
    pub observation: Observation,
}

impl TickRecord {
    /// Build a record for one observation under the current schema version
    pub fn new(observation: Observation) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            tick: None,
            observed_at: None,
            observation,
        }
    }

    /// Validate version and landmark counts
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(ValidationError::UnsupportedVersion(
                self.schema_version.clone(),
            ));
        }
        self.observation.hand_frame()?;
        self.observation.eye_pair()?;
        Ok(())
    }

    /// Parse a single JSON record
    pub fn parse(line: &str) -> Result<Self, EngineError> {
        serde_json::from_str(line)
            .map_err(|e| EngineError::ParseError(format!("failed to parse tick record: {e}")))
    }

    /// Parse newline-delimited JSON, one record per non-empty line
    pub fn parse_ndjson(input: &str) -> Result<Vec<Self>, EngineError> {
        input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(Self::parse)
            .collect()
    }

    /// Parse a JSON array of records
    pub fn parse_array(input: &str) -> Result<Vec<Self>, EngineError> {
        serde_json::from_str(input)
            .map_err(|e| EngineError::ParseError(format!("failed to parse record array: {e}")))
    }
}
