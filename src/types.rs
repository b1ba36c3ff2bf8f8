//! Core types shared by every observation domain
//!
//! A fresh set of landmarks arrives each tick from an external estimator;
//! everything downstream (features, labels) is recomputed from it and
//! discarded. Only the engines' debounce state outlives a tick.

use serde::{Deserialize, Serialize};

/// A detected anatomical keypoint.
///
/// Coordinates are normalized to [0, 1] relative to frame width/height, with
/// y growing downward in image space. `z` is carried for completeness but
/// ignored by every classification rule; `visibility` is the estimator's
/// confidence in [0, 1] when it reports one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position, 0 = left edge of the frame
    pub x: f64,
    /// Vertical position, 0 = top edge of the frame
    pub y: f64,
    /// Depth relative to the subject, unused by the rules
    #[serde(default)]
    pub z: f64,
    /// Estimator confidence that the point is in-frame and unoccluded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

impl Landmark {
    /// Build a landmark from normalized 2D coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility: None,
        }
    }

    /// Same, with an explicit visibility score
    pub fn with_visibility(x: f64, y: f64, visibility: f64) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility: Some(visibility),
        }
    }

    /// Visibility score, treating an absent score as fully visible.
    ///
    /// Estimators that do not report per-point confidence should not have
    /// every tick rejected by the confidence floor.
    pub fn visibility_or_full(&self) -> f64 {
        self.visibility.unwrap_or(1.0)
    }
}
