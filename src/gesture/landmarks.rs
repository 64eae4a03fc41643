use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Joints of the 21-point hand model.
///
/// Coordinates are normalized image coordinates with the origin at the
/// top-left corner: `x` grows rightward, `y` grows downward. A point is
/// "above" another when its `y` is smaller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Joint {
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
    LittleMcp,
    LittlePip,
    LittleDip,
    LittleTip,
}

/// The four fingers used for classification. The thumb is never evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finger {
    Index,
    Middle,
    Ring,
    Little,
}

impl Finger {
    pub const TRACKED: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Little];

    pub fn tip(self) -> Joint {
        match self {
            Self::Index => Joint::IndexTip,
            Self::Middle => Joint::MiddleTip,
            Self::Ring => Joint::RingTip,
            Self::Little => Joint::LittleTip,
        }
    }

    /// Base knuckle (MCP) the tip is compared against.
    pub fn base(self) -> Joint {
        match self {
            Self::Index => Joint::IndexMcp,
            Self::Middle => Joint::MiddleMcp,
            Self::Ring => Joint::RingMcp,
            Self::Little => Joint::LittleMcp,
        }
    }
}

/// A single observed joint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub joint: Joint,
    /// 0.0 to 1.0, normalized to image width
    pub x: f32,
    /// 0.0 to 1.0, normalized to image height, top edge is 0
    pub y: f32,
    /// Detector confidence, 0.0 to 1.0
    #[serde(default = "full_confidence")]
    pub confidence: f32,
}

fn full_confidence() -> f32 {
    1.0
}

#[cfg(test)]
impl LandmarkPoint {
    pub fn new(joint: Joint, x: f32, y: f32, confidence: f32) -> Self {
        Self { joint, x, y, confidence }
    }
}

/// Landmarks of one detected hand, keyed by joint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandLandmarks {
    points: HashMap<Joint, LandmarkPoint>,
}

impl HandLandmarks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the point for its joint.
    pub fn insert(&mut self, point: LandmarkPoint) {
        self.points.insert(point.joint, point);
    }

    #[cfg(test)]
    pub fn get(&self, joint: Joint) -> Option<&LandmarkPoint> {
        self.points.get(&joint)
    }

    /// Returns the point only if it is present and meets `min_confidence`.
    /// Non-finite coordinates also count as unavailable.
    pub fn available(&self, joint: Joint, min_confidence: f32) -> Option<&LandmarkPoint> {
        self.points.get(&joint).filter(|p| {
            p.confidence >= min_confidence && p.x.is_finite() && p.y.is_finite()
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Convert from a bottom-left origin (y grows upward) to the crate convention.
    pub fn flip_vertical(&mut self) {
        for point in self.points.values_mut() {
            point.y = 1.0 - point.y;
        }
    }
}

impl FromIterator<LandmarkPoint> for HandLandmarks {
    fn from_iter<I: IntoIterator<Item = LandmarkPoint>>(iter: I) -> Self {
        let mut hand = Self::new();
        for point in iter {
            hand.insert(point);
        }
        hand
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_confidence_is_unavailable() {
        let hand: HandLandmarks = [
            LandmarkPoint::new(Joint::IndexTip, 0.5, 0.2, 0.1),
            LandmarkPoint::new(Joint::IndexMcp, 0.5, 0.6, 0.9),
        ]
        .into_iter()
        .collect();

        assert!(hand.available(Joint::IndexTip, 0.3).is_none());
        assert!(hand.available(Joint::IndexMcp, 0.3).is_some());
        assert!(hand.available(Joint::RingTip, 0.0).is_none());
    }

    #[test]
    fn test_nan_coordinate_is_unavailable() {
        let hand: HandLandmarks = [LandmarkPoint::new(Joint::RingTip, 0.5, f32::NAN, 1.0)]
            .into_iter()
            .collect();
        assert!(hand.available(Joint::RingTip, 0.0).is_none());
    }

    #[test]
    fn test_flip_vertical() {
        let mut hand: HandLandmarks = [LandmarkPoint::new(Joint::Wrist, 0.4, 0.25, 1.0)]
            .into_iter()
            .collect();
        hand.flip_vertical();
        assert_eq!(hand.get(Joint::Wrist).map(|p| p.y), Some(0.75));
    }

    #[test]
    fn test_duplicate_joint_keeps_last() {
        let hand: HandLandmarks = [
            LandmarkPoint::new(Joint::Wrist, 0.1, 0.1, 1.0),
            LandmarkPoint::new(Joint::Wrist, 0.2, 0.2, 1.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(hand.len(), 1);
        assert_eq!(hand.get(Joint::Wrist).map(|p| p.x), Some(0.2));
    }

    #[test]
    fn test_joint_names_deserialize_snake_case() {
        let point: LandmarkPoint =
            serde_json::from_str(r#"{"joint":"little_mcp","x":0.1,"y":0.2}"#).unwrap();
        assert_eq!(point.joint, Joint::LittleMcp);
        assert_eq!(point.confidence, 1.0);
    }
}
