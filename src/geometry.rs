//! Geometry primitives shared by the renderer and the canvases.
//!
//! All coordinates are in pixels, with the origin at the top-left corner of the
//! widget and `y` growing downwards.

/// A point in widget space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position, growing downwards.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Never negative when built with [`Rect::new`].
    pub width: f64,
    /// Never negative when built with [`Rect::new`].
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle. Negative sizes become zero.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Vertical center.
    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Whether the rectangle covers no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Shrinks the rectangle by `inset` on every side. Never produces a
    /// negative size.
    pub fn inset(&self, inset: f64) -> Rect {
        Rect::new(
            self.x + inset,
            self.y + inset,
            self.width - 2.0 * inset,
            self.height - 2.0 * inset,
        )
    }

    /// Keeps the left part of the rectangle, `fraction` of its width.
    pub fn left_fraction(&self, fraction: f64) -> Rect {
        Rect::new(self.x, self.y, self.width * fraction.clamp(0.0, 1.0), self.height)
    }

    /// Returns whether `p` lies inside the rectangle once its corners are
    /// rounded by `radius`.
    pub fn contains_rounded(&self, p: Point, radius: f64) -> bool {
        if p.x < self.x || p.x > self.right() || p.y < self.y || p.y > self.bottom() {
            return false;
        }

        let r = clamp_radius(radius, self);
        if r <= 0.0 {
            return true;
        }

        // Distance to the nearest corner circle centre, only relevant inside
        // the corner squares.
        let cx = p.x.clamp(self.x + r, self.right() - r);
        let cy = p.y.clamp(self.y + r, self.bottom() - r);
        let dx = p.x - cx;
        let dy = p.y - cy;
        dx * dx + dy * dy <= r * r
    }
}

/// Limits a corner radius to half of the rectangle's smaller side.
pub fn clamp_radius(radius: f64, rect: &Rect) -> f64 {
    let max = rect.width.min(rect.height) / 2.0;
    radius.clamp(0.0, max.max(0.0))
}

/// Point-in-convex-polygon test. Vertices may be given in either winding.
pub fn polygon_contains(points: &[Point], p: Point) -> bool {
    if points.len() < 3 {
        return false;
    }

    let mut sign = 0.0_f64;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
        if cross == 0.0 {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inset_never_goes_negative() {
        let r = Rect::new(0.0, 0.0, 10.0, 1.0).inset(1.0);
        assert_eq!(r.x, 1.0);
        assert_eq!(r.width, 8.0);
        assert_eq!(r.height, 0.0);
        assert!(r.is_empty());
    }

    #[test]
    fn test_left_fraction_clamps() {
        let r = Rect::new(2.0, 0.0, 100.0, 10.0);
        assert_eq!(r.left_fraction(0.25).width, 25.0);
        assert_eq!(r.left_fraction(2.0).width, 100.0);
        assert_eq!(r.left_fraction(-1.0).width, 0.0);
    }

    #[test]
    fn test_rounded_corners_exclude_corner_points() {
        let r = Rect::new(0.0, 0.0, 40.0, 10.0);
        assert!(r.contains_rounded(Point::new(0.1, 0.1), 0.0));
        assert!(!r.contains_rounded(Point::new(0.1, 0.1), 5.0));
        assert!(r.contains_rounded(Point::new(0.1, 5.0), 5.0));
        assert!(r.contains_rounded(Point::new(20.0, 0.1), 5.0));
        assert!(!r.contains_rounded(Point::new(41.0, 5.0), 5.0));
    }

    #[test]
    fn test_clamp_radius() {
        let r = Rect::new(0.0, 0.0, 40.0, 10.0);
        assert_eq!(clamp_radius(20.0, &r), 5.0);
        assert_eq!(clamp_radius(-3.0, &r), 0.0);
        assert_eq!(clamp_radius(2.0, &r), 2.0);
    }

    #[test]
    fn test_polygon_contains() {
        let parallelogram = [
            Point::new(0.0, 10.0),
            Point::new(7.0, 10.0),
            Point::new(15.0, 0.0),
            Point::new(8.0, 0.0),
        ];
        assert!(polygon_contains(&parallelogram, Point::new(7.5, 5.0)));
        assert!(!polygon_contains(&parallelogram, Point::new(1.0, 1.0)));
        assert!(!polygon_contains(&parallelogram[..2], Point::new(1.0, 10.0)));
    }
}
