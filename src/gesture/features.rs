//! Hand feature extraction
//!
//! Derives the per-finger predicates the rule table consumes. Everything is
//! computed from vertical ordering of the digit joints plus one pinch
//! distance; a deterministic pure function of the frame and config.

use crate::geometry::distance;
use crate::gesture::types::{GestureConfig, HandFrame, HandLandmark};
use serde::{Deserialize, Serialize};

/// Per-tick scalar features derived from a hand frame.
///
/// "Extended" and "folded" are independent tests, not complements: a finger
/// mid-curl can be neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandFeatures {
    /// Thumb tip above its IP joint by the extension margin
    pub thumb_extended: bool,
    /// Thumb tip above its MCP joint by the larger thumb-up margin
    pub thumb_up: bool,
    /// Thumb tip below its IP joint
    pub thumb_folded: bool,
    pub index_extended: bool,
    /// Index tip below its MCP joint (curled into the palm)
    pub index_folded: bool,
    pub middle_extended: bool,
    pub middle_folded: bool,
    pub ring_extended: bool,
    pub ring_folded: bool,
    pub pinky_extended: bool,
    pub pinky_folded: bool,
    /// Thumb-tip to index-tip distance, normalized units
    pub pinch_distance: f64,
    /// Pinch distance under the configured threshold
    pub pinching: bool,
}

impl Default for HandFeatures {
    fn default() -> Self {
        Self {
            thumb_extended: false,
            thumb_up: false,
            thumb_folded: false,
            index_extended: false,
            index_folded: false,
            middle_extended: false,
            middle_folded: false,
            ring_extended: false,
            ring_folded: false,
            pinky_extended: false,
            pinky_folded: false,
            pinch_distance: 1.0,
            pinching: false,
        }
    }
}

impl HandFeatures {
    /// Number of extended digits, thumb included
    pub fn extended_count(&self) -> u8 {
        [
            self.thumb_extended,
            self.index_extended,
            self.middle_extended,
            self.ring_extended,
            self.pinky_extended,
        ]
        .iter()
        .filter(|&&extended| extended)
        .count() as u8
    }

    /// One-line predicate summary for overlay rendering
    pub fn describe(&self) -> String {
        format!(
            "T_ext:{} T_up:{} T_fold:{} | I_ext:{} I_fold:{} | M_ext:{} M_fold:{} | \
             R_ext:{} R_fold:{} | P_ext:{} P_fold:{} | pinch:{} (d:{:.2})",
            self.thumb_extended as u8,
            self.thumb_up as u8,
            self.thumb_folded as u8,
            self.index_extended as u8,
            self.index_folded as u8,
            self.middle_extended as u8,
            self.middle_folded as u8,
            self.ring_extended as u8,
            self.ring_folded as u8,
            self.pinky_extended as u8,
            self.pinky_folded as u8,
            self.pinching as u8,
            self.pinch_distance,
        )
    }
}

/// Extract the feature set for one frame
pub fn extract(frame: &HandFrame, config: &GestureConfig) -> HandFeatures {
    use HandLandmark::*;

    let p = |which| frame.point(which);

    // Image-space y grows downward: "above" is a smaller y.
    let extended = |tip: HandLandmark, pip: HandLandmark| {
        p(tip).y < p(pip).y - config.extension_margin
    };
    let folded = |tip: HandLandmark, knuckle: HandLandmark| p(tip).y > p(knuckle).y;

    let pinch_distance = distance(p(ThumbTip), p(IndexTip));

    HandFeatures {
        thumb_extended: extended(ThumbTip, ThumbIp),
        thumb_up: p(ThumbTip).y < p(ThumbMcp).y - config.thumb_up_margin,
        thumb_folded: folded(ThumbTip, ThumbIp),
        index_extended: extended(IndexTip, IndexPip),
        index_folded: folded(IndexTip, IndexMcp),
        middle_extended: extended(MiddleTip, MiddlePip),
        middle_folded: folded(MiddleTip, MiddleMcp),
        ring_extended: extended(RingTip, RingPip),
        ring_folded: folded(RingTip, RingMcp),
        pinky_extended: extended(PinkyTip, PinkyPip),
        pinky_folded: folded(PinkyTip, PinkyMcp),
        pinch_distance,
        pinching: pinch_distance < config.pinch_distance,
    }
}
