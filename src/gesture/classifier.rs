//! Gesture rule table
//!
//! Classification is a first-match-wins walk over an ordered list of
//! (predicate, label) rules. The order is part of the contract: rules
//! overlap, and e.g. an open hand also satisfies the five-finger count
//! fallback, so [`RULES`] must be evaluated top to bottom and the walk must
//! stop at the first hit.

use crate::gesture::features::HandFeatures;
use crate::gesture::types::Gesture;

/// One entry in the ordered rule table
pub struct GestureRule {
    pub label: Gesture,
    pub matches: fn(&HandFeatures) -> bool,
}

/// Priority-ordered rules, most specific first
pub const RULES: &[GestureRule] = &[
    GestureRule {
        label: Gesture::OpenHand,
        matches: open_hand,
    },
    GestureRule {
        label: Gesture::OkSign,
        matches: ok_sign,
    },
    GestureRule {
        label: Gesture::ThumbsUp,
        matches: thumbs_up,
    },
    GestureRule {
        label: Gesture::Pointing,
        matches: pointing,
    },
    GestureRule {
        label: Gesture::PeaceSign,
        matches: peace_sign,
    },
    GestureRule {
        label: Gesture::ClosedFist,
        matches: closed_fist,
    },
];

fn open_hand(f: &HandFeatures) -> bool {
    f.index_extended && f.middle_extended && f.ring_extended && f.pinky_extended && f.thumb_extended
}

fn ok_sign(f: &HandFeatures) -> bool {
    f.pinching && f.middle_extended && f.ring_extended && f.pinky_extended
}

fn thumbs_up(f: &HandFeatures) -> bool {
    f.thumb_up && f.index_folded && f.middle_folded && f.ring_folded && f.pinky_folded
}

fn pointing(f: &HandFeatures) -> bool {
    f.index_extended && f.middle_folded && f.ring_folded && f.pinky_folded && f.thumb_folded
}

fn peace_sign(f: &HandFeatures) -> bool {
    // The thumb may not be stretched out as in an open hand; folded or
    // merely not-extended both qualify.
    f.index_extended
        && f.middle_extended
        && !f.ring_extended
        && !f.pinky_extended
        && (f.thumb_folded || !f.thumb_extended)
}

fn closed_fist(f: &HandFeatures) -> bool {
    f.index_folded && f.middle_folded && f.ring_folded && f.pinky_folded && f.thumb_folded
}

/// Classify one tick's features into a gesture label.
///
/// Falls back to counting extended digits when no rule matches: counts 1-4
/// yield [`Gesture::Counting`]; 0 and 5 stay idle, since a true fist or open
/// hand would already have matched above.
pub fn classify(features: &HandFeatures) -> Gesture {
    for rule in RULES {
        if (rule.matches)(features) {
            return rule.label;
        }
    }

    match features.extended_count() {
        n @ 1..=4 => Gesture::Counting(n),
        _ => Gesture::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_extended() -> HandFeatures {
        HandFeatures {
            thumb_extended: true,
            index_extended: true,
            middle_extended: true,
            ring_extended: true,
            pinky_extended: true,
            ..Default::default()
        }
    }

    fn all_folded() -> HandFeatures {
        HandFeatures {
            thumb_folded: true,
            index_folded: true,
            middle_folded: true,
            ring_folded: true,
            pinky_folded: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_open_hand_beats_count_fallback() {
        // Five extended fingers satisfy the count fallback too; the ordered
        // table must resolve this to OpenHand.
        assert_eq!(classify(&all_extended()), Gesture::OpenHand);
    }

    #[test]
    fn test_ok_sign() {
        let features = HandFeatures {
            pinching: true,
            pinch_distance: 0.02,
            middle_extended: true,
            ring_extended: true,
            pinky_extended: true,
            ..Default::default()
        };
        assert_eq!(classify(&features), Gesture::OkSign);
    }

    #[test]
    fn test_open_hand_beats_ok_sign() {
        // A fully open hand that happens to pinch still reads as OpenHand.
        let features = HandFeatures {
            pinching: true,
            pinch_distance: 0.05,
            ..all_extended()
        };
        assert_eq!(classify(&features), Gesture::OpenHand);
    }

    #[test]
    fn test_thumbs_up() {
        let features = HandFeatures {
            thumb_up: true,
            thumb_extended: true,
            index_folded: true,
            middle_folded: true,
            ring_folded: true,
            pinky_folded: true,
            ..Default::default()
        };
        assert_eq!(classify(&features), Gesture::ThumbsUp);
    }

    #[test]
    fn test_pointing() {
        let features = HandFeatures {
            index_extended: true,
            index_folded: false,
            ..all_folded()
        };
        assert_eq!(classify(&features), Gesture::Pointing);
    }

    #[test]
    fn test_peace_sign_with_slack_thumb() {
        // Thumb neither folded nor extended still satisfies the guard
        let features = HandFeatures {
            index_extended: true,
            middle_extended: true,
            ..Default::default()
        };
        assert_eq!(classify(&features), Gesture::PeaceSign);
    }

    #[test]
    fn test_extended_thumb_blocks_peace_sign() {
        let features = HandFeatures {
            index_extended: true,
            middle_extended: true,
            thumb_extended: true,
            ..Default::default()
        };
        // Index + middle + thumb extended: the count fallback takes it
        assert_eq!(classify(&features), Gesture::Counting(3));
    }

    #[test]
    fn test_closed_fist() {
        assert_eq!(classify(&all_folded()), Gesture::ClosedFist);
    }

    #[test]
    fn test_count_fallback() {
        let features = HandFeatures {
            index_extended: true,
            ring_extended: true,
            ..Default::default()
        };
        assert_eq!(classify(&features), Gesture::Counting(2));
    }

    #[test]
    fn test_no_fingers_without_fist_is_idle() {
        // Nothing extended but also not curled into the palm: no gesture
        assert_eq!(classify(&HandFeatures::default()), Gesture::None);
    }

    #[test]
    fn test_rule_table_order() {
        let labels: Vec<Gesture> = RULES.iter().map(|rule| rule.label).collect();
        assert_eq!(
            labels,
            vec![
                Gesture::OpenHand,
                Gesture::OkSign,
                Gesture::ThumbsUp,
                Gesture::Pointing,
                Gesture::PeaceSign,
                Gesture::ClosedFist,
            ]
        );
    }
}
