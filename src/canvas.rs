//! The drawing capability the progress bar renders through.
//!
//! The renderer never talks to a terminal or a GPU directly. It issues calls on
//! a [`Canvas`], back to front, and the canvas decides what they mean. The
//! crate ships two canvases:
//!
//! - [`DisplayList`] records every call as a [`DrawOp`], for hosts that
//!   rasterize on their own and for inspecting what a frame contains.
//! - [`CellCanvas`](crate::cell_canvas::CellCanvas) rasterizes into terminal
//!   cells; it backs [`Model::view`](crate::progress::Model::view).
//!
//! Colors are passed as strings (`#RRGGBB` or ANSI numbers), the same way the
//! rest of the crate stores them.

use crate::geometry::{Point, Rect};

/// A horizontal gradient.
///
/// The stops are spread as bands of equal size between `start_x` and `end_x`;
/// outside that span the nearest stop is used.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    /// Colors, left to right.
    pub stops: Vec<String>,
    /// Where the first band starts.
    pub start_x: f64,
    /// Where the last band ends.
    pub end_x: f64,
}

impl Gradient {
    /// Creates a gradient spanning `start_x..end_x`.
    pub fn new(stops: Vec<String>, start_x: f64, end_x: f64) -> Self {
        Self {
            stops,
            start_x,
            end_x,
        }
    }

    /// A gradient with a single stop paints a solid color.
    pub fn is_solid(&self) -> bool {
        self.stops.len() <= 1
    }

    /// Relative position of `x` within the gradient span, in `[0, 1]`.
    pub fn position(&self, x: f64) -> f64 {
        let span = self.end_x - self.start_x;
        if span <= 0.0 {
            return 0.0;
        }
        ((x - self.start_x) / span).clamp(0.0, 1.0)
    }

    /// The stop whose band covers `x`.
    pub fn color_at(&self, x: f64) -> Option<&str> {
        let last = self.stops.len().checked_sub(1)?;
        let band = (self.position(x) * self.stops.len() as f64).floor() as usize;
        self.stops.get(band.min(last)).map(String::as_str)
    }
}

/// A drawing context.
///
/// Clips nest: a pushed clip restricts every later call until it is popped,
/// intersected with the clips below it.
pub trait Canvas {
    /// Fills a rectangle with rounded corners.
    fn fill_rect(&mut self, rect: Rect, radius: f64, color: &str);

    /// Fills a rectangle with rounded corners using a horizontal gradient.
    fn fill_gradient(&mut self, rect: Rect, radius: f64, gradient: &Gradient);

    /// Lightens the upper half of a rectangle to give it a glossy look.
    fn gloss(&mut self, rect: Rect, radius: f64);

    /// Restricts later calls to a rounded rectangle.
    fn push_clip(&mut self, rect: Rect, radius: f64);

    /// Drops the most recent clip.
    fn pop_clip(&mut self);

    /// Fills a convex polygon.
    fn fill_polygon(&mut self, points: &[Point], color: &str);

    /// Draws a single line of text centered in `rect`.
    fn draw_text(&mut self, rect: Rect, text: &str, color: &str);
}

/// One recorded canvas call.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum DrawOp {
    /// [`Canvas::fill_rect`]
    FillRect {
        rect: Rect,
        radius: f64,
        color: String,
    },
    /// [`Canvas::fill_gradient`]
    FillGradient {
        rect: Rect,
        radius: f64,
        gradient: Gradient,
    },
    /// [`Canvas::gloss`]
    Gloss { rect: Rect, radius: f64 },
    /// [`Canvas::push_clip`]
    PushClip { rect: Rect, radius: f64 },
    /// [`Canvas::pop_clip`]
    PopClip,
    /// [`Canvas::fill_polygon`]
    FillPolygon {
        points: Vec<Point>,
        color: String,
    },
    /// [`Canvas::draw_text`]
    Text {
        rect: Rect,
        text: String,
        color: String,
    },
}

/// A canvas that records calls instead of drawing them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    ops: Vec<DrawOp>,
}

impl DisplayList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded calls, oldest first.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Takes the recorded calls out of the list.
    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Forgets every recorded call, so the list can record the next frame.
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Replays the recorded calls onto another canvas.
    pub fn replay(&self, target: &mut dyn Canvas) {
        for op in &self.ops {
            match op {
                DrawOp::FillRect {
                    rect,
                    radius,
                    color,
                } => target.fill_rect(*rect, *radius, color),
                DrawOp::FillGradient {
                    rect,
                    radius,
                    gradient,
                } => target.fill_gradient(*rect, *radius, gradient),
                DrawOp::Gloss { rect, radius } => target.gloss(*rect, *radius),
                DrawOp::PushClip { rect, radius } => target.push_clip(*rect, *radius),
                DrawOp::PopClip => target.pop_clip(),
                DrawOp::FillPolygon { points, color } => target.fill_polygon(points, color),
                DrawOp::Text { rect, text, color } => target.draw_text(*rect, text, color),
            }
        }
    }
}

impl Canvas for DisplayList {
    fn fill_rect(&mut self, rect: Rect, radius: f64, color: &str) {
        self.ops.push(DrawOp::FillRect {
            rect,
            radius,
            color: color.to_string(),
        });
    }

    fn fill_gradient(&mut self, rect: Rect, radius: f64, gradient: &Gradient) {
        self.ops.push(DrawOp::FillGradient {
            rect,
            radius,
            gradient: gradient.clone(),
        });
    }

    fn gloss(&mut self, rect: Rect, radius: f64) {
        self.ops.push(DrawOp::Gloss { rect, radius });
    }

    fn push_clip(&mut self, rect: Rect, radius: f64) {
        self.ops.push(DrawOp::PushClip { rect, radius });
    }

    fn pop_clip(&mut self) {
        self.ops.push(DrawOp::PopClip);
    }

    fn fill_polygon(&mut self, points: &[Point], color: &str) {
        self.ops.push(DrawOp::FillPolygon {
            points: points.to_vec(),
            color: color.to_string(),
        });
    }

    fn draw_text(&mut self, rect: Rect, text: &str, color: &str) {
        self.ops.push(DrawOp::Text {
            rect,
            text: text.to_string(),
            color: color.to_string(),
        });
    }
}
