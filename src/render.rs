//! Draws a progress bar onto a [`Canvas`].
//!
//! Layers, back to front:
//!
//! 1. track (unless hidden)
//! 2. gloss over the track (unless hidden)
//! 3. indicator text in [`IndicatorTextDisplayMode::Track`] mode
//! 4. fill, as a gradient
//! 5. stripes, clipped to the fill
//! 6. indicator text in [`IndicatorTextDisplayMode::Progress`] mode

use crate::appearance::{
    BarType, Behavior, IndicatorTextDisplayMode, DARK_TEXT_COLOR, DEFAULT_PROGRESS_COLOR,
    DEFAULT_STRIPES_COLOR, DEFAULT_TEXT_COLOR, DEFAULT_TRACK_COLOR,
};
use crate::behavior::stripes_visible;
use crate::canvas::{Canvas, Gradient};
use crate::geometry::{clamp_radius, Rect};
use crate::progress::Model;
use crate::stripes::StripePattern;

/// Corner radius for the given type. A non-positive radius on a rounded bar
/// means half of the bar height; flat bars are always square.
///
/// The result is not yet fitted to any rectangle; [`draw`] clamps it to half
/// of the smaller side of each rectangle it paints.
pub fn corner_radius(bar_type: BarType, corner_radius: f64, bounds: Rect) -> f64 {
    match bar_type {
        BarType::Flat => 0.0,
        BarType::Rounded if corner_radius > 0.0 => corner_radius,
        BarType::Rounded => bounds.height / 2.0,
    }
}

/// The part of the track the fill can grow into. Only rounded bars keep a gap
/// between the track and the fill.
pub fn inner_track(bounds: Rect, bar_type: BarType, inset: f64) -> Rect {
    match bar_type {
        BarType::Flat => bounds,
        BarType::Rounded => bounds.inset(inset.max(0.0)),
    }
}

/// The filled rectangle for `progress`.
pub fn fill_rect(inner: Rect, progress: f64) -> Rect {
    inner.left_fraction(progress)
}

/// The fill gradient.
///
/// Stretched gradients span the fill, so every color is always visible.
/// Otherwise the gradient spans the whole inner track and the fill only
/// reveals the part of it that has been reached.
pub fn fill_gradient(colors: Vec<String>, stretch: bool, inner: Rect, fill: Rect) -> Gradient {
    let span = if stretch { fill } else { inner };
    Gradient::new(colors, span.x, span.right())
}

/// Colors for the fill: the tint colors if any, else the single tint color,
/// else the default.
pub fn fill_colors(tint_colors: &[String], tint_color: Option<&str>) -> Vec<String> {
    if !tint_colors.is_empty() {
        return tint_colors.to_vec();
    }
    vec![tint_color.unwrap_or(DEFAULT_PROGRESS_COLOR).to_string()]
}

/// Black or white, whichever reads better on `background`.
///
/// Colors that are not `#RGB` or `#RRGGBB` (ANSI numbers) count as dark.
pub fn contrasting_text_color(background: &str) -> &'static str {
    match hex_luminance(background) {
        Some(luminance) if luminance > 0.5 => DARK_TEXT_COLOR,
        _ => DEFAULT_TEXT_COLOR,
    }
}

// Perceived brightness in [0, 1].
fn hex_luminance(color: &str) -> Option<f64> {
    let hex = color.strip_prefix('#').filter(|h| h.is_ascii())?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(f64::from);
    let (r, g, b) = match hex.len() {
        6 => (channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?),
        3 => (
            channel(&hex[0..1])? * 17.0,
            channel(&hex[1..2])? * 17.0,
            channel(&hex[2..3])? * 17.0,
        ),
        _ => return None,
    };
    Some((0.2126 * r + 0.7152 * g + 0.0722 * b) / 255.0)
}

/// Draws `model` into `bounds`.
pub fn draw(model: &Model, bounds: Rect, canvas: &mut dyn Canvas) {
    let bar_type = model.bar_type();
    let radius = corner_radius(bar_type, model.corner_radius, bounds);
    let progress = model.displayed_progress();
    let track_color = model
        .track_tint_color
        .as_deref()
        .unwrap_or(DEFAULT_TRACK_COLOR);

    if !model.hide_track {
        let track_radius = clamp_radius(radius, &bounds);
        canvas.fill_rect(bounds, track_radius, track_color);
        if !model.hide_gloss {
            canvas.gloss(bounds, track_radius);
        }
    }

    let inner = inner_track(bounds, bar_type, model.progress_bar_inset);
    let fill = fill_rect(inner, progress);
    let colors = fill_colors(
        &model.progress_tint_colors,
        model.progress_tint_color.as_deref(),
    );
    let gradient = fill_gradient(colors, model.progress_stretch, inner, fill);

    if model.indicator_text_display_mode == IndicatorTextDisplayMode::Track {
        let unfilled = Rect::new(fill.right(), inner.y, inner.right() - fill.right(), inner.height);
        let color = model
            .indicator_text_color
            .as_deref()
            .unwrap_or_else(|| contrasting_text_color(track_color));
        canvas.draw_text(unfilled, &model.indicator_text(), color);
    }

    if !fill.is_empty() {
        canvas.fill_gradient(fill, clamp_radius(radius, &fill), &gradient);
    }

    draw_stripes(model, inner, fill, radius, canvas);

    if model.indicator_text_display_mode == IndicatorTextDisplayMode::Progress {
        let center = fill.x + fill.width / 2.0;
        let color = model
            .indicator_text_color
            .as_deref()
            .unwrap_or_else(|| {
                gradient
                    .color_at(center)
                    .map_or(DEFAULT_TEXT_COLOR, contrasting_text_color)
            });
        canvas.draw_text(fill, &model.indicator_text(), color);
    }
}

fn draw_stripes(model: &Model, inner: Rect, fill: Rect, radius: f64, canvas: &mut dyn Canvas) {
    let pattern = StripePattern::new(
        model.stripes_width,
        model.stripes_delta,
        model.stripes_orientation,
    );
    if pattern.is_hidden()
        || !stripes_visible(model.displayed_progress(), model.behavior, model.hide_stripes)
    {
        return;
    }

    // An indeterminate bar has no fill while its stripes are up, so they run
    // along the whole track instead.
    let region = match model.behavior {
        Behavior::Indeterminate => inner,
        Behavior::Default | Behavior::Waiting => fill,
    };
    if region.is_empty() {
        return;
    }

    let color = model
        .stripes_color
        .as_deref()
        .unwrap_or(DEFAULT_STRIPES_COLOR);
    canvas.push_clip(region, clamp_radius(radius, &region));
    for polygon in pattern.polygons(region, model.stripes_phase()) {
        canvas.fill_polygon(&polygon, color);
    }
    canvas.pop_clip();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_radius() {
        let bounds = Rect::new(0.0, 0.0, 200.0, 16.0);
        assert_eq!(corner_radius(BarType::Rounded, 0.0, bounds), 8.0);
        assert_eq!(corner_radius(BarType::Rounded, 3.0, bounds), 3.0);
        assert_eq!(corner_radius(BarType::Flat, 3.0, bounds), 0.0);
        assert_eq!(corner_radius(BarType::Flat, 0.0, bounds), 0.0);
    }

    #[test]
    fn test_inner_track_inset_only_when_rounded() {
        let bounds = Rect::new(0.0, 0.0, 200.0, 16.0);
        assert_eq!(
            inner_track(bounds, BarType::Rounded, 1.0),
            Rect::new(1.0, 1.0, 198.0, 14.0)
        );
        assert_eq!(inner_track(bounds, BarType::Flat, 1.0), bounds);
        assert_eq!(inner_track(bounds, BarType::Rounded, -4.0), bounds);
    }

    #[test]
    fn test_fill_colors_fallbacks() {
        let tints = vec!["#ff0000".to_string(), "#00ff00".to_string()];
        assert_eq!(fill_colors(&tints, Some("#0000ff")), tints);
        assert_eq!(fill_colors(&[], Some("#0000ff")), vec!["#0000ff".to_string()]);
        assert_eq!(fill_colors(&[], None), vec![DEFAULT_PROGRESS_COLOR.to_string()]);
    }

    #[test]
    fn test_stretch_spans_fill_fixed_spans_track() {
        let inner = Rect::new(1.0, 1.0, 198.0, 14.0);
        let fill = fill_rect(inner, 0.5);
        let colors = vec!["#ff0000".to_string(), "#0000ff".to_string()];

        let stretched = fill_gradient(colors.clone(), true, inner, fill);
        assert_eq!((stretched.start_x, stretched.end_x), (1.0, 100.0));
        // The last color sits at the end of the fill.
        assert_eq!(stretched.position(fill.right()), 1.0);

        let fixed = fill_gradient(colors, false, inner, fill);
        assert_eq!((fixed.start_x, fixed.end_x), (1.0, 199.0));
        // Only half of the gradient has been revealed.
        assert_eq!(fixed.position(fill.right()), 0.5);
    }

    #[test]
    fn test_contrasting_text_color() {
        assert_eq!(contrasting_text_color("#FFFFFF"), DARK_TEXT_COLOR);
        assert_eq!(contrasting_text_color("#EDFF82"), DARK_TEXT_COLOR);
        assert_eq!(contrasting_text_color("#fff"), DARK_TEXT_COLOR);
        assert_eq!(contrasting_text_color("#7571F9"), DEFAULT_TEXT_COLOR);
        assert_eq!(contrasting_text_color(DEFAULT_TRACK_COLOR), DEFAULT_TEXT_COLOR);
        assert_eq!(contrasting_text_color("#000"), DEFAULT_TEXT_COLOR);
        assert_eq!(contrasting_text_color("230"), DEFAULT_TEXT_COLOR);
        assert_eq!(contrasting_text_color("#12"), DEFAULT_TEXT_COLOR);
        assert_eq!(contrasting_text_color("#ééé"), DEFAULT_TEXT_COLOR);
    }
}
