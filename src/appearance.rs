//! Appearance configuration for the progress bar.
//!
//! An [`Appearance`] bundles every style attribute of the bar together with its
//! default. It is applied once, when a bar is built, so there is no global
//! style registry to keep in sync: build as many appearances as you need and
//! hand each bar the one it should use.
//!
//! Appearances can also be loaded from a TOML theme. Any attribute missing from
//! the theme keeps its default:
//!
//! ```rust
//! use bubbletea_progressbar::appearance::{Appearance, BarType};
//!
//! let theme = Appearance::from_toml_str(r##"
//!     bar_type = "flat"
//!     progress_tint_colors = ["#5A56E0", "#EE6FF8"]
//!     stripes_width = 5
//! "##).unwrap();
//!
//! assert_eq!(theme.bar_type, BarType::Flat);
//! assert_eq!(theme.stripes_delta, 8);
//! ```

use crate::error::ConfigError;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Default width of a stripe, in pixels.
pub const DEFAULT_STRIPES_WIDTH: i32 = 7;
/// Default horizontal slant of an oblique stripe, in pixels.
pub const DEFAULT_STRIPES_DELTA: i32 = 8;

pub(crate) const DEFAULT_PROGRESS_COLOR: &str = "#7571F9";
pub(crate) const DEFAULT_TRACK_COLOR: &str = "#606060";
pub(crate) const DEFAULT_STRIPES_COLOR: &str = "#B3B1FB";
pub(crate) const DEFAULT_TEXT_COLOR: &str = "#FFFFFF";
pub(crate) const DARK_TEXT_COLOR: &str = "#1A1A1A";

/// The overall look of the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarType {
    /// Rounded corners, gloss shown by default.
    #[default]
    Rounded,
    /// Square corners, no gloss by default.
    Flat,
}

/// How the bar decides whether the stripes are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    /// Stripes follow `hide_stripes` only.
    #[default]
    Default,
    /// Stripes are shown only while the progress is zero, for tasks whose
    /// progress is not known yet.
    Indeterminate,
    /// Stripes are shown only once the progress reaches one.
    Waiting,
}

/// Slant of the stripes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StripesOrientation {
    /// Oblique stripes leaning right: the top edge is shifted by `+delta`.
    #[default]
    Right,
    /// Oblique stripes leaning left: the top edge is shifted by `-delta`.
    Left,
    /// Upright bars. `stripes_delta` is ignored.
    Vertical,
}

/// Direction in which animated stripes travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StripesDirection {
    /// Right to left.
    Left = -1,
    /// Left to right.
    #[default]
    Right = 1,
}

impl StripesDirection {
    /// `-1.0` for [`StripesDirection::Left`], `1.0` for [`StripesDirection::Right`].
    pub fn sign(self) -> f64 {
        self as i32 as f64
    }
}

/// Where the indicator text is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorTextDisplayMode {
    /// No text.
    #[default]
    None,
    /// Centered over the unfilled part of the track, below the fill.
    Track,
    /// Centered over the fill, above the fill and the stripes.
    Progress,
}

/// Every style attribute of a progress bar, with its default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Appearance {
    /// When the stripes are shown.
    pub behavior: Behavior,
    /// Rounded or flat.
    pub bar_type: BarType,
    /// `None` derives the gloss from `bar_type`: shown for rounded bars,
    /// hidden for flat ones.
    pub hide_gloss: Option<bool>,
    /// Stretches the gradient over the fill instead of the whole track.
    pub progress_stretch: bool,
    /// Gradient stops for the fill, drawn as bands of equal size.
    pub progress_tint_colors: Vec<String>,
    /// Solid fill color, used when `progress_tint_colors` is empty.
    pub progress_tint_color: Option<String>,
    /// Track color. `None` uses a neutral gray.
    pub track_tint_color: Option<String>,
    /// Gap between the track and the fill, in pixels. Rounded bars only.
    pub progress_bar_inset: f64,
    /// Zero means half of the bar height.
    pub corner_radius: f64,
    /// Duration of an animated progress change, in seconds.
    pub progress_bar_progress_time: f64,
    /// Where the indicator text is drawn, if at all.
    pub indicator_text_display_mode: IndicatorTextDisplayMode,
    /// `None` picks black or white against the color beneath the text.
    pub indicator_text_color: Option<String>,
    /// Whether the stripes move.
    pub stripes_animated: bool,
    /// Direction the stripes travel in.
    pub stripes_direction: StripesDirection,
    /// Pixels travelled per frame. The sign is ignored.
    pub stripes_animation_velocity: f64,
    /// Slant of the stripes.
    pub stripes_orientation: StripesOrientation,
    /// Zero or less hides the stripes.
    pub stripes_width: i32,
    /// Stripe color. `None` uses a light tint of the default fill.
    pub stripes_color: Option<String>,
    /// Horizontal slant of oblique stripes, in pixels.
    pub stripes_delta: i32,
    /// Never draws the stripes.
    pub hide_stripes: bool,
    /// Leaves the track out.
    pub hide_track: bool,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            behavior: Behavior::Default,
            bar_type: BarType::Rounded,
            hide_gloss: None,
            progress_stretch: true,
            progress_tint_colors: Vec::new(),
            progress_tint_color: None,
            track_tint_color: None,
            progress_bar_inset: 1.0,
            corner_radius: 0.0,
            progress_bar_progress_time: 1.0,
            indicator_text_display_mode: IndicatorTextDisplayMode::None,
            indicator_text_color: None,
            stripes_animated: true,
            stripes_direction: StripesDirection::Right,
            stripes_animation_velocity: 1.0,
            stripes_orientation: StripesOrientation::Right,
            stripes_width: DEFAULT_STRIPES_WIDTH,
            stripes_color: None,
            stripes_delta: DEFAULT_STRIPES_DELTA,
            hide_stripes: false,
            hide_track: false,
        }
    }
}

impl Appearance {
    /// Parses a TOML theme and validates its colors.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let appearance: Appearance = toml::from_str(source)?;
        appearance.validate()?;
        Ok(appearance)
    }

    /// Reads and parses a TOML theme file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let appearance = Self::from_toml_str(&source)?;
        tracing::debug!("Loaded progress bar theme from {:?}", path);
        Ok(appearance)
    }

    /// Checks that every color attribute is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let singles = [
            ("progress_tint_color", &self.progress_tint_color),
            ("track_tint_color", &self.track_tint_color),
            ("indicator_text_color", &self.indicator_text_color),
            ("stripes_color", &self.stripes_color),
        ];
        for (field, value) in singles {
            if let Some(value) = value {
                check_color(field, value)?;
            }
        }
        for value in &self.progress_tint_colors {
            check_color("progress_tint_colors", value)?;
        }
        Ok(())
    }

    /// The gloss setting once `hide_gloss` has been resolved against the type.
    pub fn resolved_hide_gloss(&self) -> bool {
        self.hide_gloss.unwrap_or(self.bar_type == BarType::Flat)
    }

    /// The animated transition duration. Negative or non-finite values mean
    /// no animation.
    pub fn progress_time(&self) -> Duration {
        seconds_to_duration(self.progress_bar_progress_time)
    }
}

pub(crate) fn seconds_to_duration(secs: f64) -> Duration {
    if secs.is_finite() && secs > 0.0 {
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO)
    } else {
        Duration::ZERO
    }
}

/// Accepts `#RGB`, `#RRGGBB` and ANSI color numbers (`0`-`255`).
pub fn is_valid_color(value: &str) -> bool {
    if let Some(hex) = value.strip_prefix('#') {
        return (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    value.parse::<u8>().is_ok()
}

fn check_color(field: &str, value: &str) -> Result<(), ConfigError> {
    if is_valid_color(value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidColor {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

// Ready-made appearances.

/// Purple-to-pink gradient on a rounded bar.
pub static CANDY: Lazy<Appearance> = Lazy::new(|| Appearance {
    progress_tint_colors: vec!["#5A56E0".to_string(), "#EE6FF8".to_string()],
    stripes_color: Some("#F4B4FA".to_string()),
    ..Appearance::default()
});

/// Flat green bar with upright stripes and the percentage over the fill.
pub static TERMINAL: Lazy<Appearance> = Lazy::new(|| Appearance {
    bar_type: BarType::Flat,
    progress_tint_color: Some("#04B575".to_string()),
    track_tint_color: Some("#3C3C3C".to_string()),
    stripes_orientation: StripesOrientation::Vertical,
    stripes_width: 8,
    stripes_color: Some("#7EE2B8".to_string()),
    indicator_text_display_mode: IndicatorTextDisplayMode::Progress,
    ..Appearance::default()
});

/// Flat bar whose stripes only run while the task has not started.
pub static INDETERMINATE: Lazy<Appearance> = Lazy::new(|| Appearance {
    behavior: Behavior::Indeterminate,
    bar_type: BarType::Flat,
    progress_tint_colors: vec![
        "#F25D94".to_string(),
        "#EDFF82".to_string(),
        "#04B575".to_string(),
    ],
    ..Appearance::default()
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let a = Appearance::default();
        assert_eq!(a.behavior, Behavior::Default);
        assert_eq!(a.bar_type, BarType::Rounded);
        assert!(!a.resolved_hide_gloss());
        assert!(a.progress_stretch);
        assert!(a.progress_tint_colors.is_empty());
        assert_eq!(a.progress_tint_color, None);
        assert_eq!(a.track_tint_color, None);
        assert_eq!(a.progress_bar_inset, 1.0);
        assert_eq!(a.corner_radius, 0.0);
        assert_eq!(a.progress_time(), Duration::from_secs(1));
        assert_eq!(a.indicator_text_display_mode, IndicatorTextDisplayMode::None);
        assert!(a.stripes_animated);
        assert_eq!(a.stripes_direction, StripesDirection::Right);
        assert_eq!(a.stripes_animation_velocity, 1.0);
        assert_eq!(a.stripes_orientation, StripesOrientation::Right);
        assert_eq!(a.stripes_width, 7);
        assert_eq!(a.stripes_delta, 8);
        assert!(!a.hide_stripes);
        assert!(!a.hide_track);
    }

    #[test]
    fn test_direction_sign() {
        assert_eq!(StripesDirection::Left.sign(), -1.0);
        assert_eq!(StripesDirection::Right.sign(), 1.0);
    }

    #[test]
    fn test_flat_hides_gloss_unless_overridden() {
        let mut a = Appearance {
            bar_type: BarType::Flat,
            ..Appearance::default()
        };
        assert!(a.resolved_hide_gloss());
        a.hide_gloss = Some(false);
        assert!(!a.resolved_hide_gloss());
    }

    #[test]
    fn test_partial_theme_keeps_defaults() {
        let a = Appearance::from_toml_str(
            r##"
            behavior = "waiting"
            stripes_orientation = "vertical"
            stripes_direction = "left"
            indicator_text_display_mode = "progress"
            progress_bar_progress_time = 0.25
            "##,
        )
        .unwrap();
        assert_eq!(a.behavior, Behavior::Waiting);
        assert_eq!(a.stripes_orientation, StripesOrientation::Vertical);
        assert_eq!(a.stripes_direction, StripesDirection::Left);
        assert_eq!(a.indicator_text_display_mode, IndicatorTextDisplayMode::Progress);
        assert_eq!(a.progress_time(), Duration::from_millis(250));
        assert_eq!(a.stripes_width, DEFAULT_STRIPES_WIDTH);
    }

    #[test]
    fn test_invalid_color_rejected() {
        let err = Appearance::from_toml_str(r#"track_tint_color = "blueish""#).unwrap_err();
        match err {
            ConfigError::InvalidColor { field, value } => {
                assert_eq!(field, "track_tint_color");
                assert_eq!(value, "blueish");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = Appearance::from_toml_str("stripe_width = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_color_validation() {
        assert!(is_valid_color("#fff"));
        assert!(is_valid_color("#7571F9"));
        assert!(is_valid_color("62"));
        assert!(!is_valid_color("#12345"));
        assert!(!is_valid_color("256"));
        assert!(!is_valid_color("red"));
    }

    #[test]
    fn test_negative_duration_means_no_animation() {
        assert_eq!(seconds_to_duration(-1.0), Duration::ZERO);
        assert_eq!(seconds_to_duration(f64::NAN), Duration::ZERO);
        assert_eq!(seconds_to_duration(f64::INFINITY), Duration::ZERO);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bar_type = \"flat\"\nhide_track = true").unwrap();
        let a = Appearance::load(file.path()).unwrap();
        assert_eq!(a.bar_type, BarType::Flat);
        assert!(a.hide_track);

        let missing = Appearance::load(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(CANDY.validate().is_ok());
        assert!(TERMINAL.validate().is_ok());
        assert!(INDETERMINATE.validate().is_ok());
        assert!(TERMINAL.resolved_hide_gloss());
    }
}
