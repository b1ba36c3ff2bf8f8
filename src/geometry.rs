//! Geometric primitives shared by the feature extractors
//!
//! All helpers are pure functions over normalized coordinates. Image-space y
//! grows downward, so "above" means a smaller y everywhere in this crate.

use crate::types::Landmark;

/// 2D Euclidean distance between two landmarks (z ignored)
pub fn distance(a: &Landmark, b: &Landmark) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Vertical midpoint of two landmarks
pub fn midpoint_y(a: &Landmark, b: &Landmark) -> f64 {
    (a.y + b.y) / 2.0
}

/// Eye aspect ratio over the 6 ordered contour points P1..P6.
///
/// P1/P4 are the horizontal corners, P2/P6 and P3/P5 the upper/lower lid
/// pairs: EAR = (|P2-P6| + |P3-P5|) / (2 * |P1-P4|). A closed eye collapses
/// the vertical distances, so the ratio drops toward zero. When the corner
/// points coincide the ratio is defined as 0.0 instead of dividing by zero.
pub fn eye_aspect_ratio(points: &[Landmark; 6]) -> f64 {
    let vertical_a = distance(&points[1], &points[5]);
    let vertical_b = distance(&points[2], &points[4]);
    let horizontal = distance(&points[0], &points[3]);

    if horizontal == 0.0 {
        return 0.0;
    }

    (vertical_a + vertical_b) / (2.0 * horizontal)
}
