//! Posture feature extraction
//!
//! Derives the vertical offsets and the three trigger booleans from the
//! five upper-body landmarks. Extraction refuses to run on a frame whose
//! landmarks fall below the visibility floor: a half-seen subject must not
//! be scored at all, so the caller treats such a tick as "no observation".

use crate::geometry::midpoint_y;
use crate::posture::types::{PoseFrame, PostureConfig};
use serde::{Deserialize, Serialize};

/// Per-tick posture features and trigger states
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostureFeatures {
    /// Vertical midpoint of the two shoulders
    pub shoulder_mid_y: f64,
    /// Vertical midpoint of the two ears
    pub ear_mid_y: f64,
    /// Absolute vertical difference between the shoulders
    pub shoulder_y_difference: f64,
    /// Vertical gap from ear line down to shoulder line; small when hunched
    pub ear_shoulder_gap: f64,
    /// Nose has dropped below the shoulder line by more than the offset
    pub head_drooped: bool,
    /// Shoulders differ vertically by more than the tolerance
    pub shoulders_uneven: bool,
    /// Shoulders pulled up toward the ears
    pub shoulders_hunched: bool,
}

impl PostureFeatures {
    /// Bad posture this tick: any single trigger fires
    pub fn is_bad(&self) -> bool {
        self.head_drooped || self.shoulders_uneven || self.shoulders_hunched
    }

    /// One-line trigger summary for overlay rendering
    pub fn describe(&self) -> String {
        format!(
            "droop:{} uneven:{}({:.2}) hunch:{}({:.2})",
            self.head_drooped as u8,
            self.shoulders_uneven as u8,
            self.shoulder_y_difference,
            self.shoulders_hunched as u8,
            self.ear_shoulder_gap,
        )
    }
}

/// Extract posture features, or `None` when any required landmark is below
/// the visibility floor
pub fn extract(frame: &PoseFrame, config: &PostureConfig) -> Option<PostureFeatures> {
    let visible = frame
        .points()
        .iter()
        .all(|p| p.visibility_or_full() > config.visibility_floor);
    if !visible {
        return None;
    }

    let shoulder_mid_y = midpoint_y(&frame.left_shoulder, &frame.right_shoulder);
    let ear_mid_y = midpoint_y(&frame.left_ear, &frame.right_ear);
    let shoulder_y_difference = (frame.left_shoulder.y - frame.right_shoulder.y).abs();
    // Positive when the shoulders sit below the ears, as they should
    let ear_shoulder_gap = shoulder_mid_y - ear_mid_y;

    Some(PostureFeatures {
        shoulder_mid_y,
        ear_mid_y,
        shoulder_y_difference,
        ear_shoulder_gap,
        head_drooped: frame.nose.y > shoulder_mid_y + config.head_droop_offset,
        shoulders_uneven: shoulder_y_difference > config.shoulder_level_tolerance,
        shoulders_hunched: ear_shoulder_gap < config.hunch_min_gap,
    })
}


#[cfg(test)]
mod tests {
    use super::fixtures::{drooping, upright};
    use super::*;
    use crate::types::Landmark;

    #[test]
    fn test_upright_has_no_triggers() {
        let features = extract(&upright(), &PostureConfig::default()).unwrap();
        assert!(!features.head_drooped);
        assert!(!features.shoulders_uneven);
        assert!(!features.shoulders_hunched);
        assert!(!features.is_bad());
    }

    #[test]
    fn test_head_droop_trigger() {
        // Nose at 0.50, shoulder mid at 0.40: offset 0.10 > 0.08
        let features = extract(&drooping(), &PostureConfig::default()).unwrap();
        assert!(features.head_drooped);
        assert!(features.is_bad());
    }

    #[test]
    fn test_uneven_shoulders_trigger() {
        let mut frame = upright();
        frame.left_shoulder.y = 0.46;
        frame.right_shoulder.y = 0.54;

        let features = extract(&frame, &PostureConfig::default()).unwrap();
        assert!(features.shoulders_uneven);
        assert!((features.shoulder_y_difference - 0.08).abs() < 1e-9);
        assert!(features.is_bad());
    }

    #[test]
    fn test_hunched_shoulders_trigger() {
        let mut frame = upright();
        // Ears nearly level with the shoulders
        frame.left_ear.y = 0.47;
        frame.right_ear.y = 0.47;

        let features = extract(&frame, &PostureConfig::default()).unwrap();
        assert!(features.shoulders_hunched);
        assert!(features.ear_shoulder_gap < 0.05);
        assert!(features.is_bad());
    }

    #[test]
    fn test_low_visibility_voids_the_tick() {
        let mut frame = drooping();
        frame.left_ear.visibility = Some(0.3);

        assert!(extract(&frame, &PostureConfig::default()).is_none());
    }

    #[test]
    fn test_missing_visibility_counts_as_visible() {
        let mut frame = upright();
        frame.nose = Landmark::new(0.50, 0.30);

        assert!(extract(&frame, &PostureConfig::default()).is_some());
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let frame = drooping();
        let config = PostureConfig::default();
        assert_eq!(extract(&frame, &config), extract(&frame, &config));
    }

    #[test]
    fn test_describe_lists_measured_offsets() {
        let features = extract(&drooping(), &PostureConfig::default()).unwrap();
        let text = features.describe();
        assert!(text.contains("droop:1"));
        assert!(text.contains("uneven:0"));
    }
}
