//! Stripe pattern generation and animation stepping.
//!
//! The pattern is a row of identical stripes repeating every [`pitch`]
//! pixels. Animation only moves the whole row horizontally, and the phase
//! wraps at the pitch, so the row looks seamless whatever the phase.
//!
//! [`pitch`]: StripePattern::pitch

use crate::appearance::{StripesDirection, StripesOrientation};
use crate::geometry::{Point, Rect};

/// Shape of the stripe row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripePattern {
    /// Horizontal thickness of a stripe, in pixels.
    pub width: i32,
    /// Horizontal shift between the bottom and top of an oblique stripe.
    pub delta: i32,
    /// Slant of the stripes.
    pub orientation: StripesOrientation,
}

impl StripePattern {
    /// Creates a pattern.
    pub fn new(width: i32, delta: i32, orientation: StripesOrientation) -> Self {
        Self {
            width,
            delta,
            orientation,
        }
    }

    /// A non-positive width disables the stripe layer.
    pub fn is_hidden(&self) -> bool {
        self.width <= 0
    }

    /// Horizontal distance after which the pattern repeats.
    ///
    /// `width + delta` for oblique stripes, `width` for vertical ones. A
    /// negative delta counts as zero.
    pub fn pitch(&self) -> f64 {
        let width = self.width.max(0) as f64;
        match self.orientation {
            StripesOrientation::Vertical => width,
            StripesOrientation::Right | StripesOrientation::Left => {
                width + self.delta.max(0) as f64
            }
        }
    }

    fn slant(&self) -> f64 {
        match self.orientation {
            StripesOrientation::Right => self.delta.max(0) as f64,
            StripesOrientation::Left => -(self.delta.max(0) as f64),
            StripesOrientation::Vertical => 0.0,
        }
    }

    /// Builds the stripe polygons covering `region`, shifted right by `phase`.
    ///
    /// Polygons overhang the region on both sides; the caller clips them.
    pub fn polygons(&self, region: Rect, phase: f64) -> Vec<Vec<Point>> {
        let pitch = self.pitch();
        if self.is_hidden() || pitch <= 0.0 || region.is_empty() {
            return Vec::new();
        }

        let slant = self.slant();
        let thickness = match self.orientation {
            StripesOrientation::Vertical => self.width as f64 / 2.0,
            _ => self.width as f64,
        };

        let margin = thickness + slant.abs();
        let lead = (margin / pitch).ceil() + 1.0;
        let mut x = region.x + phase.rem_euclid(pitch) - lead * pitch;
        let end = region.right() + margin;

        let top = region.y;
        let bottom = region.bottom();
        let mut polygons = Vec::new();
        while x < end {
            polygons.push(vec![
                Point::new(x, bottom),
                Point::new(x + thickness, bottom),
                Point::new(x + thickness + slant, top),
                Point::new(x + slant, top),
            ]);
            x += pitch;
        }
        polygons
    }
}

/// Horizontal offset of the stripe row, advanced once per animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StripePhase {
    offset: f64,
}

impl StripePhase {
    /// Current offset, in `[0, pitch)`.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Back to the rest position.
    pub fn reset(&mut self) {
        self.offset = 0.0;
    }

    /// Moves the row by `|velocity|` pixels in `direction`, wrapped into
    /// `[0, pitch)`.
    pub fn advance(&mut self, velocity: f64, direction: StripesDirection, pitch: f64) {
        if pitch <= 0.0 || !velocity.is_finite() {
            return;
        }
        let step = velocity.abs() * direction.sign();
        self.offset = (self.offset + step).rem_euclid(pitch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bottom_lefts(polygons: &[Vec<Point>]) -> Vec<f64> {
        polygons.iter().map(|p| p[0].x).collect()
    }

    #[test]
    fn test_pitch() {
        assert_eq!(StripePattern::new(7, 8, StripesOrientation::Right).pitch(), 15.0);
        assert_eq!(StripePattern::new(7, 8, StripesOrientation::Left).pitch(), 15.0);
        assert_eq!(StripePattern::new(7, 8, StripesOrientation::Vertical).pitch(), 7.0);
        assert_eq!(StripePattern::new(7, -3, StripesOrientation::Right).pitch(), 7.0);
    }

    #[test]
    fn test_hidden_when_width_not_positive() {
        let region = Rect::new(0.0, 0.0, 100.0, 10.0);
        for width in [0, -4] {
            let pattern = StripePattern::new(width, 8, StripesOrientation::Right);
            assert!(pattern.is_hidden());
            assert!(pattern.polygons(region, 0.0).is_empty());
        }
    }

    #[test]
    fn test_oblique_right_stripes_lean_right() {
        let pattern = StripePattern::new(7, 8, StripesOrientation::Right);
        let polygons = pattern.polygons(Rect::new(0.0, 0.0, 60.0, 10.0), 0.0);

        let xs = bottom_lefts(&polygons);
        assert!(xs.contains(&0.0));
        for pair in xs.windows(2) {
            assert_eq!(pair[1] - pair[0], 15.0);
        }
        assert!(*xs.first().unwrap() <= -15.0);
        assert!(*xs.last().unwrap() >= 60.0 - 15.0);

        let stripe = &polygons[0];
        assert_eq!(stripe[0].y, 10.0);
        assert_eq!(stripe[3].y, 0.0);
        assert_eq!(stripe[3].x - stripe[0].x, 8.0);
        assert_eq!(stripe[1].x - stripe[0].x, 7.0);
    }

    #[test]
    fn test_oblique_left_mirrors_right() {
        let pattern = StripePattern::new(7, 8, StripesOrientation::Left);
        let polygons = pattern.polygons(Rect::new(0.0, 0.0, 60.0, 10.0), 0.0);
        let stripe = &polygons[0];
        assert_eq!(stripe[3].x - stripe[0].x, -8.0);
        assert!(*bottom_lefts(&polygons).last().unwrap() >= 60.0);
    }

    #[test]
    fn test_vertical_bars_fill_half_the_pitch() {
        let pattern = StripePattern::new(8, 8, StripesOrientation::Vertical);
        let polygons = pattern.polygons(Rect::new(0.0, 0.0, 40.0, 10.0), 0.0);
        let stripe = &polygons[0];
        assert_eq!(stripe[1].x - stripe[0].x, 4.0);
        assert_eq!(stripe[2].x, stripe[1].x);
        assert_eq!(stripe[3].x, stripe[0].x);
        for pair in bottom_lefts(&polygons).windows(2) {
            assert_eq!(pair[1] - pair[0], 8.0);
        }
    }

    #[test]
    fn test_phase_shifts_pattern() {
        let pattern = StripePattern::new(7, 8, StripesOrientation::Right);
        let region = Rect::new(0.0, 0.0, 60.0, 10.0);
        assert!(bottom_lefts(&pattern.polygons(region, 5.0)).contains(&5.0));
        // A full pitch of phase is the same picture.
        assert_eq!(
            bottom_lefts(&pattern.polygons(region, 15.0)),
            bottom_lefts(&pattern.polygons(region, 0.0))
        );
    }

    #[test]
    fn test_phase_after_n_ticks() {
        let pitch = StripePattern::new(7, 8, StripesOrientation::Right).pitch();
        for (velocity, direction) in [
            (1.0, StripesDirection::Right),
            (1.5, StripesDirection::Right),
            (1.0, StripesDirection::Left),
            (-2.0, StripesDirection::Left),
        ] {
            let mut phase = StripePhase::default();
            for n in 1..=40 {
                phase.advance(velocity, direction, pitch);
                let expected =
                    (n as f64 * f64::abs(velocity) * direction.sign()).rem_euclid(pitch);
                assert!(
                    (phase.offset() - expected).abs() < 1e-9,
                    "n={n} v={velocity} got {} want {expected}",
                    phase.offset()
                );
            }
        }
    }

    #[test]
    fn test_vertical_phase_wraps_at_width() {
        let pitch = StripePattern::new(7, 8, StripesOrientation::Vertical).pitch();
        let mut phase = StripePhase::default();
        for _ in 0..9 {
            phase.advance(1.0, StripesDirection::Right, pitch);
        }
        assert_eq!(phase.offset(), 2.0);
    }

    #[test]
    fn test_zero_pitch_does_not_move() {
        let mut phase = StripePhase::default();
        phase.advance(1.0, StripesDirection::Right, 0.0);
        assert_eq!(phase.offset(), 0.0);
        phase.advance(3.0, StripesDirection::Right, 15.0);
        phase.reset();
        assert_eq!(phase.offset(), 0.0);
    }
}
