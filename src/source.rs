//! Where hand observations come from each frame.
//!
//! A landmark detector plugs in behind [`HandSource`]. [`SimHandSource`]
//! stands in for one, building full 21-point hands from mouse and keyboard
//! input so the engine sees exactly what a detector would hand it.
//!
//! Simulated controls:
//! * mouse = right index fingertip; hold LMB to pinch (pen), RMB to click
//! * hold 0..5 = left hand showing that many fingers (5 burst, 0 clear, 1 background)
//! * hold `[` / `]` = left hand present, narrowing / widening the brush spread

use crate::draw::Drawer;
use crate::landmarks::{HandLabel, HandObservation, SyntheticHand};
use crate::types::Point;

pub trait HandSource {
    /// Hands visible in the frame that is about to be processed.
    fn poll(&mut self, window: &Drawer, frame: (usize, usize)) -> Vec<HandObservation>;
}

/// Raw input snapshot the simulator works from.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimInput {
    pub mouse: Option<(usize, usize)>,
    pub pinch: bool,
    pub click: bool,
    pub pose: Option<u8>,
    pub grow: bool,
    pub shrink: bool,
}

impl SimInput {
    pub fn read(window: &Drawer) -> Self {
        Self {
            mouse: window.mouse_pos(),
            pinch: window.left_mouse_down(),
            click: window.right_mouse_down(),
            pose: window.digit_held(),
            grow: window.grow_held(),
            shrink: window.shrink_held(),
        }
    }
}

const PINCH_CLOSED: i32 = 20;
const PINCH_OPEN: i32 = 100;
const CLICK_CLOSED: i32 = 20;
const CLICK_OPEN: i32 = 120;
const SPREAD_STEP: i32 = 4;
const SPREAD_MAX: i32 = 250;
/// Pose shown while only resizing: three fingers, which triggers nothing.
const RESIZE_POSE: u8 = 3;

pub struct SimHandSource {
    /// Thumb-index distance of the simulated left hand, in pixels.
    spread: i32,
}

impl Default for SimHandSource {
    fn default() -> Self {
        // ~48px maps to the default 15px brush.
        Self { spread: 48 }
    }
}

impl SimHandSource {
    #[cfg(test)]
    pub fn spread(&self) -> i32 { self.spread }

    pub fn hands(&mut self, input: SimInput, frame: (usize, usize)) -> Vec<HandObservation> {
        let mut hands = Vec::with_capacity(2);

        if input.grow { self.spread = (self.spread + SPREAD_STEP).min(SPREAD_MAX); }
        if input.shrink { self.spread = (self.spread - SPREAD_STEP).max(0); }

        let pose = input.pose.or((input.grow || input.shrink).then_some(RESIZE_POSE));
        if let Some(fingers) = pose {
            let index = Point::new(frame.0 as i32 / 4, frame.1 as i32 * 2 / 3);
            let hand = SyntheticHand {
                thumb_tip: Point::new(index.x, index.y + self.spread),
                ..SyntheticHand::relaxed(HandLabel::Left, frame, fingers, index)
            };
            hands.push(hand.build());
        }

        if let Some((mx, my)) = input.mouse {
            let index = Point::new(mx as i32, my as i32);
            let pinch = if input.pinch { PINCH_CLOSED } else { PINCH_OPEN };
            let click = if input.click { CLICK_CLOSED } else { CLICK_OPEN };
            let hand = SyntheticHand {
                thumb_tip: Point::new(index.x, index.y + pinch),
                middle_tip: Point::new(index.x + click, index.y),
                ..SyntheticHand::relaxed(HandLabel::Right, frame, 1, index)
            };
            hands.push(hand.build());
        }

        hands
    }
}

impl HandSource for SimHandSource {
    fn poll(&mut self, window: &Drawer, frame: (usize, usize)) -> Vec<HandObservation> {
        self.hands(SimInput::read(window), frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::distance;
    use crate::landmarks::{INDEX_TIP, MIDDLE_TIP, THUMB_TIP};

    const FRAME: (usize, usize) = (1280, 720);

    fn tips(hand: &HandObservation) -> (Point, Point, Point) {
        let px = |i| hand.pixel(i, FRAME.0, FRAME.1).unwrap();
        (px(INDEX_TIP), px(THUMB_TIP), px(MIDDLE_TIP))
    }

    #[test]
    fn no_input_no_hands() {
        assert!(SimHandSource::default().hands(SimInput::default(), FRAME).is_empty());
    }

    #[test]
    fn mouse_is_a_right_hand_at_the_cursor() {
        let mut src = SimHandSource::default();
        let hands = src.hands(SimInput { mouse: Some((300, 200)), pinch: true, ..SimInput::default() }, FRAME);
        assert_eq!(hands.len(), 1);
        assert_eq!(hands[0].label, HandLabel::Right);
        let (index, thumb, middle) = tips(&hands[0]);
        assert_eq!(index, Point::new(300, 200));
        assert!(distance(index, thumb) < 40.0);
        assert!(distance(index, middle) > 40.0);
    }

    #[test]
    fn right_button_is_a_click() {
        let mut src = SimHandSource::default();
        let hands = src.hands(SimInput { mouse: Some((60, 35)), click: true, ..SimInput::default() }, FRAME);
        let (index, thumb, middle) = tips(&hands[0]);
        assert!(distance(index, middle) < 40.0);
        assert!(distance(index, thumb) > 60.0);
    }

    #[test]
    fn digit_keys_pick_the_left_pose() {
        let mut src = SimHandSource::default();
        for n in 0..=5 {
            let hands = src.hands(SimInput { pose: Some(n), ..SimInput::default() }, FRAME);
            assert_eq!(hands.len(), 1);
            assert_eq!(hands[0].label, HandLabel::Left);
            assert_eq!(hands[0].fingers_up(), Some(n));
        }
    }

    #[test]
    fn brackets_resize_without_a_command_pose() {
        let mut src = SimHandSource::default();
        let start = src.spread();
        let hands = src.hands(SimInput { grow: true, ..SimInput::default() }, FRAME);
        assert_eq!(src.spread(), start + SPREAD_STEP);
        assert_eq!(hands[0].fingers_up(), Some(RESIZE_POSE));
        let (index, thumb, _) = tips(&hands[0]);
        assert_eq!(distance(index, thumb) as i32, src.spread());

        for _ in 0..100 { src.hands(SimInput { shrink: true, ..SimInput::default() }, FRAME); }
        assert_eq!(src.spread(), 0);
    }
}
