//! Eye feature extraction

use crate::blink::types::EyePair;
use crate::geometry::eye_aspect_ratio;
use serde::{Deserialize, Serialize};

/// Per-tick eye aspect ratios. The mean of the two eyes drives the blink
/// decision; the per-eye values are kept for overlay rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EyeMetrics {
    pub left_ear: f64,
    pub right_ear: f64,
    pub mean_ear: f64,
}

/// Compute both eyes' aspect ratios for one frame
pub fn extract(eyes: &EyePair) -> EyeMetrics {
    let left_ear = eye_aspect_ratio(&eyes.left);
    let right_ear = eye_aspect_ratio(&eyes.right);

    EyeMetrics {
        left_ear,
        right_ear,
        mean_ear: (left_ear + right_ear) / 2.0,
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{closed_eyes, eye, open_eyes};
    use super::*;

    #[test]
    fn test_open_eyes_have_high_ear() {
        let metrics = extract(&open_eyes());
        assert!((metrics.mean_ear - 0.3).abs() < 1e-9);
        assert_eq!(metrics.left_ear, metrics.right_ear);
    }

    #[test]
    fn test_closed_eyes_have_low_ear() {
        let metrics = extract(&closed_eyes());
        assert!(metrics.mean_ear < 0.15);
    }

    #[test]
    fn test_mean_averages_asymmetric_eyes() {
        let eyes = EyePair {
            left: eye(0.35, 0.04),
            right: eye(0.65, 0.02),
        };
        let metrics = extract(&eyes);
        assert!((metrics.left_ear - 0.4).abs() < 1e-9);
        assert!((metrics.right_ear - 0.2).abs() < 1e-9);
        assert!((metrics.mean_ear - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let eyes = open_eyes();
        assert_eq!(extract(&eyes), extract(&eyes));
    }
}
