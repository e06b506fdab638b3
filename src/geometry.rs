// Distance + clamped linear mapping. No state.

use crate::types::Point;

/// Euclidean distance between two pixel points.
#[inline]
pub fn distance(a: Point, b: Point) -> f32 {
    let dx = (b.x - a.x) as f32;
    let dy = (b.y - a.y) as f32;
    dx.hypot(dy)
}

/// Map `value` from `[in_min, in_max]` to `[out_min, out_max]`, clamping outside the domain.
pub fn interpolate(value: f32, (in_min, in_max): (f32, f32), (out_min, out_max): (f32, f32)) -> f32 {
    if value <= in_min { return out_min; }
    if value >= in_max { return out_max; }
    let t = (value - in_min) / (in_max - in_min);
    out_min + t * (out_max - out_min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn distance_is_euclidean() {
        assert_relative_eq!(distance(Point::new(0, 0), Point::new(3, 4)), 5.0);
        assert_relative_eq!(distance(Point::new(7, 7), Point::new(7, 7)), 0.0);
    }

    #[test]
    fn interpolate_maps_linearly_inside_domain() {
        assert_relative_eq!(interpolate(115.0, (30.0, 200.0), (5.0, 100.0)), 52.5);
        assert_relative_eq!(interpolate(30.0, (30.0, 200.0), (5.0, 100.0)), 5.0);
    }

    #[test]
    fn interpolate_clamps_outside_domain() {
        assert_relative_eq!(interpolate(0.0, (30.0, 200.0), (5.0, 100.0)), 5.0);
        assert_relative_eq!(interpolate(900.0, (30.0, 200.0), (5.0, 100.0)), 100.0);
    }
}
