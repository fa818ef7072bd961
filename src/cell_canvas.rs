//! Terminal rasterizer for the progress bar.
//!
//! A [`CellCanvas`] is a grid of terminal cells. Each cell stands for a block
//! of [`CELL_WIDTH`] × [`CELL_HEIGHT`] pixels and is painted when its center
//! falls inside a shape, so pixel-sized attributes (stripe width, inset, corner
//! radius) keep sensible proportions in a terminal. Painted cells render as
//! spaces with a background color; text cells keep the color underneath them
//! as background.
//!
//! Gradients are blended through lipgloss so they look the same as the other
//! lipgloss gradients in an application.

use crate::canvas::{Canvas, Gradient};
use crate::geometry::{polygon_contains, Point, Rect};
use lipgloss_extras::lipgloss;
use lipgloss_extras::lipgloss::blending::blend_1d;
use lipgloss_extras::prelude::*;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Horizontal pixels covered by one terminal cell.
pub const CELL_WIDTH: f64 = 4.0;
/// Vertical pixels covered by one terminal cell.
pub const CELL_HEIGHT: f64 = 8.0;

const GLOSS_COLOR: &str = "#FFFFFF";
// Gloss mixes in a quarter of white.
const GLOSS_STEPS: usize = 5;

/// Which kind of call last painted a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layer {
    /// Nothing painted yet.
    #[default]
    Empty,
    /// [`Canvas::fill_rect`], the track.
    Rect,
    /// [`Canvas::fill_gradient`], the fill.
    Gradient,
    /// [`Canvas::fill_polygon`], a stripe.
    Polygon,
}

#[derive(Clone, Default)]
struct Cell {
    color: Option<Color>,
    layer: Layer,
    glossy: bool,
    text: Option<(String, Color)>,
    // Right half of a double-width grapheme.
    continuation: bool,
}

impl Cell {
    fn paint(&mut self, color: Color, layer: Layer) {
        self.color = Some(color);
        self.layer = layer;
        self.glossy = false;
        self.text = None;
        self.continuation = false;
    }
}

/// A grid of terminal cells implementing [`Canvas`].
#[derive(Clone)]
pub struct CellCanvas {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
    clips: Vec<(Rect, f64)>,
}

impl CellCanvas {
    /// Creates a blank grid of `cols` × `rows` cells.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::default(); cols * rows],
            clips: Vec::new(),
        }
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The pixel rectangle covered by the whole grid.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            self.cols as f64 * CELL_WIDTH,
            self.rows as f64 * CELL_HEIGHT,
        )
    }

    /// Which call last painted a cell. Out of range cells are empty.
    pub fn layer(&self, col: usize, row: usize) -> Layer {
        self.cell(col, row).map(|c| c.layer).unwrap_or_default()
    }

    /// Whether gloss has lightened a cell.
    pub fn is_glossy(&self, col: usize, row: usize) -> bool {
        self.cell(col, row).map(|c| c.glossy).unwrap_or(false)
    }

    /// The grapheme drawn in a cell, if any.
    pub fn text_at(&self, col: usize, row: usize) -> Option<&str> {
        self.cell(col, row)
            .and_then(|c| c.text.as_ref())
            .map(|(s, _)| s.as_str())
    }

    /// The text of one row, with unpainted and painted cells as spaces.
    pub fn row_text(&self, row: usize) -> String {
        (0..self.cols)
            .filter(|&col| !self.cells[row * self.cols + col].continuation)
            .map(|col| self.text_at(col, row).unwrap_or(" "))
            .collect()
    }

    /// Renders the grid, one line per row.
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows);
        for row in 0..self.rows {
            let mut line = String::new();
            for col in 0..self.cols {
                let cell = &self.cells[row * self.cols + col];
                if cell.continuation {
                    continue;
                }
                match (&cell.text, &cell.color) {
                    (Some((text, fg)), Some(bg)) => line.push_str(
                        &Style::new()
                            .foreground(fg.clone())
                            .background(bg.clone())
                            .render(text),
                    ),
                    (Some((text, fg)), None) => {
                        line.push_str(&Style::new().foreground(fg.clone()).render(text))
                    }
                    (None, Some(bg)) => {
                        line.push_str(&Style::new().background(bg.clone()).render(" "))
                    }
                    (None, None) => line.push(' '),
                }
            }
            lines.push(line);
        }
        lines.join("\n")
    }

    fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get(row * self.cols + col)
    }

    fn center(col: usize, row: usize) -> Point {
        Point::new(
            (col as f64 + 0.5) * CELL_WIDTH,
            (row as f64 + 0.5) * CELL_HEIGHT,
        )
    }

    fn clipped(&self, p: Point) -> bool {
        self.clips
            .iter()
            .any(|(rect, radius)| !rect.contains_rounded(p, *radius))
    }

    /// Calls `f` with every unclipped cell whose center satisfies `inside`.
    fn for_each_covered(
        &mut self,
        inside: impl Fn(Point) -> bool,
        mut f: impl FnMut(&mut Cell, Point),
    ) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let p = Self::center(col, row);
                if !inside(p) || self.clipped(p) {
                    continue;
                }
                f(&mut self.cells[row * self.cols + col], p);
            }
        }
    }
}

impl Canvas for CellCanvas {
    fn fill_rect(&mut self, rect: Rect, radius: f64, color: &str) {
        let color = Color::from(color);
        self.for_each_covered(
            |p| rect.contains_rounded(p, radius),
            |cell, _| cell.paint(color.clone(), Layer::Rect),
        );
    }

    fn fill_gradient(&mut self, rect: Rect, radius: f64, gradient: &Gradient) {
        let Some(first) = gradient.stops.first() else {
            return;
        };

        if gradient.is_solid() {
            let color = Color::from(first.as_str());
            self.for_each_covered(
                |p| rect.contains_rounded(p, radius),
                |cell, _| cell.paint(color.clone(), Layer::Gradient),
            );
            return;
        }

        // One ramp entry per cell of the gradient span.
        let span_cells = ((gradient.end_x - gradient.start_x) / CELL_WIDTH).round() as usize;
        let steps = span_cells.max(2);
        let stops: Vec<Color> = gradient
            .stops
            .iter()
            .map(|s| Color::from(s.as_str()))
            .collect();
        let ramp = blend_1d(steps, stops);

        self.for_each_covered(
            |p| rect.contains_rounded(p, radius),
            |cell, p| {
                let idx = (gradient.position(p.x) * (steps - 1) as f64).round() as usize;
                let idx = idx.min(ramp.len().saturating_sub(1));
                if let Some(color) = ramp.get(idx) {
                    cell.paint(color.clone(), Layer::Gradient);
                }
            },
        );
    }

    fn gloss(&mut self, rect: Rect, radius: f64) {
        let white = Color::from(GLOSS_COLOR);
        self.for_each_covered(
            |p| rect.contains_rounded(p, radius) && p.y < rect.mid_y(),
            |cell, _| {
                if cell.glossy {
                    return;
                }
                if let Some(base) = cell.color.take() {
                    let mix = blend_1d(GLOSS_STEPS, vec![base.clone(), white.clone()]);
                    cell.color = Some(mix.get(1).cloned().unwrap_or(base));
                    cell.glossy = true;
                }
            },
        );
    }

    fn push_clip(&mut self, rect: Rect, radius: f64) {
        self.clips.push((rect, radius));
    }

    fn pop_clip(&mut self) {
        self.clips.pop();
    }

    fn fill_polygon(&mut self, points: &[Point], color: &str) {
        let color = Color::from(color);
        self.for_each_covered(
            |p| polygon_contains(points, p),
            |cell, _| cell.paint(color.clone(), Layer::Polygon),
        );
    }

    fn draw_text(&mut self, rect: Rect, text: &str, color: &str) {
        if self.rows == 0 || self.cols == 0 || text.is_empty() {
            return;
        }

        let width = text.width();
        let center_col = (rect.x + rect.width / 2.0) / CELL_WIDTH;
        let start = (center_col - width as f64 / 2.0).round().max(0.0) as usize;
        let row = ((rect.mid_y() / CELL_HEIGHT).floor().max(0.0) as usize).min(self.rows - 1);
        let fg = Color::from(color);

        let mut col = start;
        for grapheme in text.graphemes(true) {
            let w = grapheme.width().max(1);
            if col + w > self.cols {
                break;
            }
            if !self.clipped(Self::center(col, row)) {
                let idx = row * self.cols + col;
                self.cells[idx].text = Some((grapheme.to_string(), fg.clone()));
                self.cells[idx].continuation = false;
                for extra in 1..w {
                    self.cells[idx + extra].text = None;
                    self.cells[idx + extra].continuation = true;
                }
            }
            col += w;
        }
    }
}

/// Visible width of a rendered line, ignoring escape sequences.
pub fn visible_width(rendered: &str) -> usize {
    rendered
        .lines()
        .map(|line| lipgloss::width_visible(line))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_in_pixels() {
        let canvas = CellCanvas::new(10, 2);
        assert_eq!(canvas.bounds(), Rect::new(0.0, 0.0, 40.0, 16.0));
        assert_eq!(canvas.cols(), 10);
        assert_eq!(canvas.rows(), 2);
    }

    #[test]
    fn test_fill_rect_paints_covered_cells() {
        let mut canvas = CellCanvas::new(10, 1);
        canvas.fill_rect(Rect::new(0.0, 0.0, 20.0, 8.0), 0.0, "#606060");
        for col in 0..5 {
            assert_eq!(canvas.layer(col, 0), Layer::Rect);
        }
        for col in 5..10 {
            assert_eq!(canvas.layer(col, 0), Layer::Empty);
        }
    }

    #[test]
    fn test_rounded_corners_on_tall_bar() {
        let mut canvas = CellCanvas::new(10, 3);
        let bounds = canvas.bounds();
        canvas.fill_rect(bounds, bounds.height / 2.0, "#606060");
        assert_eq!(canvas.layer(0, 0), Layer::Empty);
        assert_eq!(canvas.layer(9, 2), Layer::Empty);
        assert_eq!(canvas.layer(0, 1), Layer::Rect);
        assert_eq!(canvas.layer(5, 0), Layer::Rect);
    }

    #[test]
    fn test_clip_restricts_painting() {
        let mut canvas = CellCanvas::new(10, 1);
        canvas.push_clip(Rect::new(0.0, 0.0, 12.0, 8.0), 0.0);
        canvas.fill_rect(canvas.bounds(), 0.0, "#ffffff");
        canvas.pop_clip();
        assert_eq!(canvas.layer(2, 0), Layer::Rect);
        assert_eq!(canvas.layer(3, 0), Layer::Empty);

        canvas.fill_rect(canvas.bounds(), 0.0, "#ffffff");
        assert_eq!(canvas.layer(9, 0), Layer::Rect);
    }

    #[test]
    fn test_gradient_and_polygon_layers() {
        let mut canvas = CellCanvas::new(10, 1);
        let bounds = canvas.bounds();
        let gradient = Gradient::new(
            vec!["#5A56E0".to_string(), "#EE6FF8".to_string()],
            0.0,
            bounds.width,
        );
        canvas.fill_gradient(bounds, 0.0, &gradient);
        assert!((0..10).all(|c| canvas.layer(c, 0) == Layer::Gradient));

        canvas.fill_polygon(
            &[
                Point::new(0.0, 8.0),
                Point::new(8.0, 8.0),
                Point::new(8.0, 0.0),
                Point::new(0.0, 0.0),
            ],
            "#ffffff",
        );
        assert_eq!(canvas.layer(0, 0), Layer::Polygon);
        assert_eq!(canvas.layer(1, 0), Layer::Polygon);
        assert_eq!(canvas.layer(2, 0), Layer::Gradient);
    }

    #[test]
    fn test_empty_gradient_paints_nothing() {
        let mut canvas = CellCanvas::new(4, 1);
        canvas.fill_gradient(canvas.bounds(), 0.0, &Gradient::new(Vec::new(), 0.0, 16.0));
        assert!((0..4).all(|c| canvas.layer(c, 0) == Layer::Empty));
    }

    #[test]
    fn test_gloss_only_upper_half_once() {
        let mut canvas = CellCanvas::new(4, 2);
        let bounds = canvas.bounds();
        canvas.fill_rect(bounds, 0.0, "#606060");
        canvas.gloss(bounds, 0.0);
        canvas.gloss(bounds, 0.0);
        assert!(canvas.is_glossy(1, 0));
        assert!(!canvas.is_glossy(1, 1));

        // Repainting clears the gloss.
        canvas.fill_rect(bounds, 0.0, "#606060");
        assert!(!canvas.is_glossy(1, 0));
    }

    #[test]
    fn test_text_centered_and_erased_by_paint() {
        let mut canvas = CellCanvas::new(10, 1);
        let bounds = canvas.bounds();
        canvas.draw_text(bounds, "30%", "#ffffff");
        assert_eq!(canvas.row_text(0), "    30%   ");
        assert_eq!(canvas.text_at(4, 0), Some("3"));

        canvas.fill_rect(Rect::new(0.0, 0.0, 20.0, 8.0), 0.0, "#7571F9");
        assert_eq!(canvas.row_text(0), "     0%   ");
    }

    #[test]
    fn test_text_clipped_at_right_edge() {
        let mut canvas = CellCanvas::new(4, 1);
        canvas.draw_text(Rect::new(12.0, 0.0, 8.0, 8.0), "100%", "#ffffff");
        assert_eq!(canvas.row_text(0).trim_end(), "  10");
    }

    #[test]
    fn test_render_width() {
        let mut canvas = CellCanvas::new(12, 2);
        let bounds = canvas.bounds();
        canvas.fill_rect(bounds, 0.0, "#606060");
        canvas.draw_text(bounds, "hi", "#ffffff");
        let rendered = canvas.render();
        assert_eq!(rendered.lines().count(), 2);
        assert_eq!(visible_width(&rendered), 12);
        assert!(lipgloss::strip_ansi(&rendered).contains("hi"));
    }
}
