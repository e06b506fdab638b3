//! Hand observations as delivered by a landmark detector, and the per-hand
//! measurements the engine needs from them.
//!
//! A detector reports, per hand per frame, a Left/Right label and 21 keypoints
//! in normalized image coordinates (x right, y down, both in `[0,1]`). Depth
//! is not used, so a detector adapter drops it.

use crate::types::Point;

/// Number of keypoints in a complete hand.
pub const HAND_LANDMARKS: usize = 21;

pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_TIP: usize = 12;

/// (tip, second joint) for the four non-thumb fingers: index, middle, ring, pinky.
pub const FINGER_TIP_JOINTS: [(usize, usize); 4] = [(8, 6), (12, 10), (16, 14), (20, 18)];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandLabel {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug)]
pub struct HandObservation {
    pub label: HandLabel,
    pub landmarks: Vec<Landmark>,
}

impl HandObservation {
    /// All 21 keypoints present. Anything shorter is skipped by the engine.
    pub fn is_complete(&self) -> bool {
        self.landmarks.len() >= HAND_LANDMARKS
    }

    /// Keypoint `idx` scaled to pixels (truncated, like an `int()` cast).
    pub fn pixel(&self, idx: usize, width: usize, height: usize) -> Option<Point> {
        let lm = self.landmarks.get(idx)?;
        Some(Point::new((lm.x * width as f32) as i32, (lm.y * height as f32) as i32))
    }

    /// How many fingers are raised, 0..=5.
    ///
    /// A finger is up when its tip sits above (smaller y) its second joint.
    /// The thumb is up when its tip is left of its IP joint, which only holds
    /// for a mirrored right-facing hand; it is a heuristic, not extension
    /// detection. `None` for an incomplete hand.
    pub fn fingers_up(&self) -> Option<u8> {
        if !self.is_complete() { return None; }
        let lm = &self.landmarks;
        let mut count = 0u8;
        for &(tip, joint) in &FINGER_TIP_JOINTS {
            if lm[tip].y < lm[joint].y { count += 1; }
        }
        if lm[THUMB_TIP].x < lm[THUMB_IP].x { count += 1; }
        Some(count)
    }
}

/// Builds a complete, self-consistent 21-point hand from a few pixel positions.
///
/// Used by the simulated detector and by tests. Raised fingers are chosen in
/// the order index, middle, ring, pinky, thumb, so `fingers_up = 1` is a
/// pointing index finger and `5` an open palm.
#[derive(Clone, Copy, Debug)]
pub struct SyntheticHand {
    pub label: HandLabel,
    pub frame: (usize, usize),
    pub fingers_up: u8,
    pub index_tip: Point,
    pub thumb_tip: Point,
    pub middle_tip: Point,
}

impl SyntheticHand {
    /// A hand with the thumb and middle finger parked well away from the index tip.
    pub fn relaxed(label: HandLabel, frame: (usize, usize), fingers_up: u8, index_tip: Point) -> Self {
        Self {
            label,
            frame,
            fingers_up,
            index_tip,
            thumb_tip: Point::new(index_tip.x - 150, index_tip.y + 150),
            middle_tip: Point::new(index_tip.x + 120, index_tip.y),
        }
    }

    pub fn build(&self) -> HandObservation {
        let (w, h) = (self.frame.0.max(1) as f32, self.frame.1.max(1) as f32);
        // Pixel centre, so truncating back to pixels lands on the same integer.
        let norm = |p: Point| Landmark { x: (p.x as f32 + 0.5) / w, y: (p.y as f32 + 0.5) / h };

        let anchor = self.index_tip;
        let mut lm = vec![norm(Point::new(anchor.x, anchor.y + 200)); HAND_LANDMARKS];

        let tips = [
            self.index_tip,
            self.middle_tip,
            Point::new(anchor.x + 60, anchor.y + 10),
            Point::new(anchor.x + 90, anchor.y + 20),
        ];
        for (n, (&(tip, joint), &tip_px)) in FINGER_TIP_JOINTS.iter().zip(tips.iter()).enumerate() {
            let up = (n as u8) < self.fingers_up;
            let joint_px = Point::new(tip_px.x, if up { tip_px.y + 40 } else { tip_px.y - 40 });
            lm[tip] = norm(tip_px);
            lm[joint] = norm(joint_px);
        }

        let thumb_up = self.fingers_up >= 5;
        let t = self.thumb_tip;
        lm[THUMB_TIP] = norm(t);
        lm[THUMB_IP] = norm(Point::new(if thumb_up { t.x + 25 } else { t.x - 25 }, t.y));

        HandObservation { label: self.label, landmarks: lm }
    }
}
