use super::landmarks::{Finger, HandLandmarks};
use super::state_machine::Gesture;

pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.3;

/// Per-frame open/closed classifier. Holds only its threshold; no history.
#[derive(Debug, Clone, Copy)]
pub struct GestureClassifier {
    min_confidence: f32,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CONFIDENCE)
    }
}

impl GestureClassifier {
    pub fn new(min_confidence: f32) -> Self {
        Self { min_confidence }
    }

    /// Classify one frame. `None` means no hand was detected.
    pub fn classify(&self, hand: Option<&HandLandmarks>) -> Gesture {
        let Some(hand) = hand.filter(|h| !h.is_empty()) else {
            return Gesture::Unknown;
        };
        if self.is_open(hand) {
            Gesture::Open
        } else if self.is_closed(hand) {
            Gesture::Closed
        } else {
            Gesture::Unknown
        }
    }

    /// Every tracked finger has its tip strictly above its knuckle.
    pub fn is_open(&self, hand: &HandLandmarks) -> bool {
        self.all_fingers(hand, |tip_y, base_y| tip_y < base_y)
    }

    /// Every tracked finger has its tip strictly below its knuckle.
    pub fn is_closed(&self, hand: &HandLandmarks) -> bool {
        self.all_fingers(hand, |tip_y, base_y| tip_y > base_y)
    }

    // An unavailable joint fails the finger.
    fn all_fingers(&self, hand: &HandLandmarks, test: impl Fn(f32, f32) -> bool) -> bool {
        Finger::TRACKED.iter().all(|finger| {
            match (
                hand.available(finger.tip(), self.min_confidence),
                hand.available(finger.base(), self.min_confidence),
            ) {
                (Some(tip), Some(base)) => test(tip.y, base.y),
                _ => false,
            }
        })
    }
}

#[cfg(test)]
pub(crate) fn make_hand(tip_offsets: [f32; 4], confidence: f32) -> HandLandmarks {
    use super::landmarks::{Joint, LandmarkPoint};

    let mut hand = HandLandmarks::new();
    hand.insert(LandmarkPoint::new(Joint::Wrist, 0.5, 0.9, confidence));
    hand.insert(LandmarkPoint::new(Joint::ThumbTip, 0.3, 0.6, confidence));
    for (i, finger) in Finger::TRACKED.iter().enumerate() {
        let x = 0.35 + 0.1 * i as f32;
        hand.insert(LandmarkPoint::new(finger.base(), x, 0.5, confidence));
        hand.insert(LandmarkPoint::new(finger.tip(), x, 0.5 + tip_offsets[i], confidence));
    }
    hand
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::landmarks::{Joint, LandmarkPoint};

    const OPEN: [f32; 4] = [-0.2, -0.25, -0.22, -0.15];
    const CLOSED: [f32; 4] = [0.1, 0.12, 0.1, 0.08];

    #[test]
    fn test_no_hand_is_unknown() {
        let classifier = GestureClassifier::default();
        assert_eq!(classifier.classify(None), Gesture::Unknown);
    }

    #[test]
    fn test_open_hand() {
        let classifier = GestureClassifier::default();
        let hand = make_hand(OPEN, 0.9);
        assert_eq!(classifier.classify(Some(&hand)), Gesture::Open);
    }

    #[test]
    fn test_closed_hand() {
        let classifier = GestureClassifier::default();
        let hand = make_hand(CLOSED, 0.9);
        assert_eq!(classifier.classify(Some(&hand)), Gesture::Closed);
    }

    #[test]
    fn test_partially_curled_is_unknown() {
        let classifier = GestureClassifier::default();
        let hand = make_hand([-0.2, -0.2, 0.1, 0.1], 0.9);
        assert!(!classifier.is_open(&hand));
        assert!(!classifier.is_closed(&hand));
        assert_eq!(classifier.classify(Some(&hand)), Gesture::Unknown);
    }

    #[test]
    fn test_tip_level_with_knuckle_is_unknown() {
        let classifier = GestureClassifier::default();
        let hand = make_hand([-0.2, 0.0, -0.2, -0.2], 0.9);
        assert_eq!(classifier.classify(Some(&hand)), Gesture::Unknown);
    }

    #[test]
    fn test_missing_joint_forces_unknown() {
        let classifier = GestureClassifier::default();
        for finger in Finger::TRACKED {
            for offsets in [OPEN, CLOSED] {
                let full = make_hand(offsets, 0.9);
                let without_tip: HandLandmarks = [Joint::Wrist, Joint::ThumbTip]
                    .into_iter()
                    .chain(Finger::TRACKED.iter().flat_map(|f| [f.tip(), f.base()]))
                    .filter(|j| *j != finger.tip())
                    .filter_map(|j| full.get(j).copied())
                    .collect();
                assert_eq!(
                    classifier.classify(Some(&without_tip)),
                    Gesture::Unknown,
                    "{finger:?} tip missing should be unknown"
                );
            }
        }
    }

    #[test]
    fn test_low_confidence_joint_forces_unknown() {
        let classifier = GestureClassifier::new(0.5);
        let mut hand = make_hand(OPEN, 0.9);
        hand.insert(LandmarkPoint::new(Joint::MiddleMcp, 0.45, 0.5, 0.2));
        assert_eq!(classifier.classify(Some(&hand)), Gesture::Unknown);

        let mut hand = make_hand(CLOSED, 0.9);
        hand.insert(LandmarkPoint::new(Joint::LittleTip, 0.65, 0.6, 0.49));
        assert_eq!(classifier.classify(Some(&hand)), Gesture::Unknown);
    }

    #[test]
    fn test_thumb_is_ignored() {
        let classifier = GestureClassifier::default();
        let mut hand = make_hand(OPEN, 0.9);
        hand.insert(LandmarkPoint::new(Joint::ThumbTip, 0.2, 0.99, 0.9));
        assert_eq!(classifier.classify(Some(&hand)), Gesture::Open);

        let mut hand = make_hand(CLOSED, 0.9);
        hand.insert(LandmarkPoint::new(Joint::ThumbTip, 0.2, 0.01, 0.9));
        assert_eq!(classifier.classify(Some(&hand)), Gesture::Closed);
    }

    #[test]
    fn test_open_and_closed_are_exclusive() {
        let classifier = GestureClassifier::new(0.0);
        let steps = [-0.3, -0.1, 0.0, 0.1, 0.3];
        for a in steps {
            for b in steps {
                for c in steps {
                    let hand = make_hand([a, b, c, a], 1.0);
                    assert!(!(classifier.is_open(&hand) && classifier.is_closed(&hand)));
                }
            }
        }
    }

    #[test]
    fn test_classification_is_deterministic() {
        let classifier = GestureClassifier::default();
        let hand = make_hand([-0.2, -0.1, 0.05, -0.3], 0.7);
        let first = classifier.classify(Some(&hand));
        for _ in 0..10 {
            assert_eq!(classifier.classify(Some(&hand)), first);
        }
    }
}
