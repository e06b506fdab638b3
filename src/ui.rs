//! Toolbar buttons along the top of the frame.
//!
//! The set is fixed at startup. Hits are tested in registration order and the
//! first hit wins; the built-in layout has no overlaps, so order only matters
//! for custom layouts.

use crate::draw::{draw_text, fill_rect, stroke_rect};
use crate::types::{FrameBuffer, Point, Rgb};
use log::warn;

/// Frame width the toolbar positions are written for.
pub const LAYOUT_WIDTH: usize = 1280;

/// What a button does when clicked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionKind {
    Color(Rgb),
    Eraser,
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Strictly inside; the border itself does not count.
    pub fn contains(&self, p: Point) -> bool {
        self.x1 < p.x && p.x < self.x2 && self.y1 < p.y && p.y < self.y2
    }

    #[cfg(test)]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x1 < other.x2 && other.x1 < self.x2 && self.y1 < other.y2 && other.y1 < self.y2
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    pub key: &'static str,
    pub rect: Rect,
    pub fill: Rgb,
    pub label: Option<&'static str>,
    pub kind: RegionKind,
}

/// Index into the registry. Stable for the life of the app.
pub type RegionId = usize;

pub struct RegionRegistry {
    regions: Vec<Region>,
}

impl RegionRegistry {
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    /// Six colors, eraser and exit. Positions are authored for a
    /// [`LAYOUT_WIDTH`]-wide frame; narrower frames get every x squeezed in
    /// proportion so the exit button stays reachable. Wider frames keep the
    /// authored positions.
    pub fn layout_for_width(width: usize) -> Self {
        let scale = |x: i32| -> i32 {
            if width >= LAYOUT_WIDTH { x } else { (x as i64 * width as i64 / LAYOUT_WIDTH as i64) as i32 }
        };
        if width < LAYOUT_WIDTH {
            warn!("frame is {width}px wide, toolbar authored for {LAYOUT_WIDTH}px; scaling buttons down");
        }
        let rect = |x1, x2| Rect::new(scale(x1), 10, scale(x2), 60);
        let color = |key, x1, x2, rgb: Rgb| Region {
            key,
            rect: rect(x1, x2),
            fill: rgb,
            label: None,
            kind: RegionKind::Color(rgb),
        };
        Self::new(vec![
            color("red", 10, 110, Rgb::new(200, 0, 0)),
            color("green", 130, 230, Rgb::new(0, 200, 0)),
            color("blue", 250, 350, Rgb::new(0, 100, 200)),
            color("yellow", 370, 470, Rgb::new(255, 255, 0)),
            color("pink", 490, 590, Rgb::new(255, 0, 255)),
            color("cyan", 610, 710, Rgb::new(0, 255, 255)),
            Region {
                key: "eraser",
                rect: rect(1060, 1160),
                fill: Rgb::new(40, 40, 40),
                label: Some("ERASE"),
                kind: RegionKind::Eraser,
            },
            Region {
                key: "exit",
                rect: rect(1180, 1270),
                fill: Rgb::new(100, 0, 0),
                label: Some("EXIT"),
                kind: RegionKind::Exit,
            },
        ])
    }

    #[cfg(test)]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id)
    }

    pub fn find(&self, key: &str) -> Option<RegionId> {
        self.regions.iter().position(|r| r.key == key)
    }

    /// First region (registration order) strictly containing `p`.
    pub fn hit(&self, p: Point) -> Option<RegionId> {
        self.regions.iter().position(|r| r.rect.contains(p))
    }

    /// Filled buttons, labels, and a white border on `active`.
    pub fn render(&self, fb: &mut FrameBuffer, active: Option<RegionId>) {
        for (id, r) in self.regions.iter().enumerate() {
            let Rect { x1, y1, x2, y2 } = r.rect;
            fill_rect(fb, x1, y1, x2, y2, r.fill);
            if let Some(label) = r.label {
                draw_text(fb, x1 + 15, y1 + 18, label, 2, Rgb::WHITE);
            }
            if active == Some(id) {
                stroke_rect(fb, x1, y1, x2, y2, 3, Rgb::WHITE);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_width_layout_has_no_overlaps() {
        let reg = RegionRegistry::layout_for_width(LAYOUT_WIDTH);
        let rs = reg.regions();
        assert_eq!(rs.len(), 8);
        for (i, a) in rs.iter().enumerate() {
            for b in &rs[i + 1..] {
                assert!(!a.rect.overlaps(&b.rect), "{} overlaps {}", a.key, b.key);
            }
        }
    }

    #[test]
    fn inside_hits_and_border_misses() {
        let reg = RegionRegistry::layout_for_width(LAYOUT_WIDTH);
        let red = reg.find("red").unwrap();
        assert_eq!(reg.hit(Point::new(60, 35)), Some(red));
        assert_eq!(reg.hit(Point::new(10, 35)), None);
        assert_eq!(reg.hit(Point::new(110, 35)), None);
        assert_eq!(reg.hit(Point::new(60, 60)), None);
        assert_eq!(reg.hit(Point::new(640, 400)), None);
    }

    #[test]
    fn overlapping_regions_resolve_by_registration_order() {
        let make = |key, kind| Region {
            key,
            rect: Rect::new(0, 0, 100, 100),
            fill: Rgb::BLACK,
            label: None,
            kind,
        };
        let reg = RegionRegistry::new(vec![make("first", RegionKind::Eraser), make("second", RegionKind::Exit)]);
        assert_eq!(reg.hit(Point::new(50, 50)), Some(0));
    }

    #[test]
    fn kinds_carry_their_data() {
        let reg = RegionRegistry::layout_for_width(LAYOUT_WIDTH);
        let yellow = reg.get(reg.find("yellow").unwrap()).unwrap();
        assert_eq!(yellow.kind, RegionKind::Color(Rgb::new(255, 255, 0)));
        assert_eq!(reg.get(reg.find("eraser").unwrap()).unwrap().kind, RegionKind::Eraser);
        assert_eq!(reg.get(reg.find("exit").unwrap()).unwrap().kind, RegionKind::Exit);
    }

    #[test]
    fn active_region_gets_a_border() {
        let reg = RegionRegistry::layout_for_width(LAYOUT_WIDTH);
        let mut fb = FrameBuffer::filled(1280, 720, Rgb::BLACK);
        let red = reg.find("red");
        reg.render(&mut fb, red);
        assert_eq!(fb.get(10, 35), Some(Rgb::WHITE));
        assert_eq!(fb.get(130, 35), Some(Rgb::new(0, 200, 0)));
    }

    #[test]
    fn full_width_layout_keeps_authored_positions() {
        let reg = RegionRegistry::layout_for_width(1920);
        let exit = reg.get(reg.find("exit").unwrap()).unwrap();
        assert_eq!(exit.rect, Rect::new(1180, 10, 1270, 60));
        assert_eq!(reg.hit(Point::new(1225, 35)), reg.find("exit"));
    }

    #[test]
    fn narrow_frame_squeezes_every_button_on_screen() {
        let reg = RegionRegistry::layout_for_width(640);
        let rs = reg.regions();
        for (i, a) in rs.iter().enumerate() {
            assert!(a.rect.x1 < a.rect.x2, "{} collapsed", a.key);
            assert!(a.rect.x2 <= 640, "{} runs off a 640px frame", a.key);
            for b in &rs[i + 1..] {
                assert!(!a.rect.overlaps(&b.rect), "{} overlaps {}", a.key, b.key);
            }
        }
        assert_eq!(reg.get(reg.find("exit").unwrap()).unwrap().rect, Rect::new(590, 10, 635, 60));
        assert_eq!(reg.hit(Point::new(610, 35)), reg.find("exit"));
        assert_eq!(reg.hit(Point::new(555, 35)), reg.find("eraser"));
    }
}
