//! Posture-domain types

use crate::error::EngineError;
use crate::types::Landmark;
use serde::{Deserialize, Serialize};

/// Default offset below the shoulder line the nose must pass for head droop
pub const DEFAULT_HEAD_DROOP_OFFSET: f64 = 0.08;

/// Default maximum vertical difference between shoulders before they count
/// as uneven
pub const DEFAULT_SHOULDER_LEVEL_TOLERANCE: f64 = 0.03;

/// Default minimum ear-to-shoulder vertical gap; anything smaller reads as
/// hunched shoulders
pub const DEFAULT_HUNCH_MIN_GAP: f64 = 0.05;

/// Default consecutive bad-posture ticks before the alert fires
pub const DEFAULT_ALERT_TICKS: u32 = 60;

/// Default per-landmark visibility floor below which the tick is discarded
pub const DEFAULT_VISIBILITY_FLOOR: f64 = 0.5;

/// One tick's upper-body observation.
///
/// Only the five landmarks the rules consume are carried; the external
/// estimator's remaining body points are irrelevant here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseFrame {
    pub nose: Landmark,
    pub left_shoulder: Landmark,
    pub right_shoulder: Landmark,
    pub left_ear: Landmark,
    pub right_ear: Landmark,
}

impl PoseFrame {
    /// The five landmarks in a fixed order, for uniform visibility checks
    pub fn points(&self) -> [&Landmark; 5] {
        [
            &self.nose,
            &self.left_shoulder,
            &self.right_shoulder,
            &self.left_ear,
            &self.right_ear,
        ]
    }
}

/// Thresholds and debounce settings for the posture monitor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PostureConfig {
    /// Nose must sit below shoulder-mid by this much for head droop
    pub head_droop_offset: f64,
    /// Shoulder vertical difference above this counts as uneven
    pub shoulder_level_tolerance: f64,
    /// Ear-to-shoulder vertical gap below this counts as hunched
    pub hunch_min_gap: f64,
    /// Consecutive bad-posture ticks before the alert fires
    pub alert_ticks: u32,
    /// Landmarks below this visibility void the whole tick
    pub visibility_floor: f64,
}

impl Default for PostureConfig {
    fn default() -> Self {
        Self {
            head_droop_offset: DEFAULT_HEAD_DROOP_OFFSET,
            shoulder_level_tolerance: DEFAULT_SHOULDER_LEVEL_TOLERANCE,
            hunch_min_gap: DEFAULT_HUNCH_MIN_GAP,
            alert_ticks: DEFAULT_ALERT_TICKS,
            visibility_floor: DEFAULT_VISIBILITY_FLOOR,
        }
    }
}

impl PostureConfig {
    /// Reject unusable settings before any tick is processed
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.head_droop_offset <= 0.0 {
            return Err(EngineError::InvalidConfig(
                "head_droop_offset must be positive".to_string(),
            ));
        }
        if self.shoulder_level_tolerance <= 0.0 {
            return Err(EngineError::InvalidConfig(
                "shoulder_level_tolerance must be positive".to_string(),
            ));
        }
        if self.hunch_min_gap <= 0.0 {
            return Err(EngineError::InvalidConfig(
                "hunch_min_gap must be positive".to_string(),
            ));
        }
        if self.alert_ticks == 0 {
            return Err(EngineError::InvalidConfig(
                "alert_ticks must be positive".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.visibility_floor) {
            return Err(EngineError::InvalidConfig(
                "visibility_floor must be in [0, 1)".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(PostureConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_rejects_nonpositive_settings() {
        let config = PostureConfig {
            alert_ticks: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PostureConfig {
            hunch_min_gap: -0.05,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PostureConfig {
            visibility_floor: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pose_frame_deserialization() {
        let json = r#"{
            "nose": {"x": 0.5, "y": 0.3, "visibility": 0.99},
            "left_shoulder": {"x": 0.4, "y": 0.5},
            "right_shoulder": {"x": 0.6, "y": 0.5},
            "left_ear": {"x": 0.45, "y": 0.28},
            "right_ear": {"x": 0.55, "y": 0.28}
        }"#;

        let frame: PoseFrame = serde_json::from_str(json).unwrap();
        assert_eq!(frame.nose.visibility, Some(0.99));
        assert_eq!(frame.points().len(), 5);
    }
}
