//! Progress bar component for Bubble Tea applications.
//!
//! The bar has a track, a gradient fill, an optional row of moving stripes and
//! an optional percentage label. Every style attribute comes with a default,
//! so a bar is usable as soon as it is built.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_progressbar::progress::{new, with_gradient, with_width};
//!
//! // A bar with the default look
//! let bar = new(&[]);
//! assert_eq!(bar.progress(), 0.3);
//!
//! // A wider bar with a two color gradient
//! let bar = new(&[
//!     with_width(60),
//!     with_gradient(vec!["#5A56E0".to_string(), "#EE6FF8".to_string()]),
//! ]);
//! ```
//!
//! # Animation
//!
//! Two things move: the fill, when the progress is changed with animation, and
//! the stripes. Both are driven by tick commands that come back to
//! [`Model::update`] as messages. Each message carries the bar's id and a tag,
//! and a bar only honors messages with its own id and current tag, so starting
//! a new animation silently retires the previous one.
//!
//! ```rust
//! use bubbletea_progressbar::progress::new;
//!
//! let mut bar = new(&[]);
//!
//! // Jump straight to 50%
//! bar.set_progress(0.5);
//! assert_eq!(bar.displayed_progress(), 0.5);
//!
//! // Glide to 75%; the target is readable right away
//! let cmd = bar.set_progress_animated(0.75, true);
//! assert!(cmd.is_some());
//! assert_eq!(bar.progress(), 0.75);
//! assert_eq!(bar.displayed_progress(), 0.5);
//! ```

use crate::appearance::{
    seconds_to_duration, Appearance, BarType, Behavior, IndicatorTextDisplayMode,
    StripesDirection, StripesOrientation,
};
use crate::canvas::{Canvas, DisplayList};
use crate::cell_canvas::CellCanvas;
use crate::geometry::Rect;
use crate::render;
use crate::stripes::{StripePattern, StripePhase};
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Model as BubbleTeaModel, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

// Internal ID management for progress bar instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

const FPS: u32 = 60;
const DEFAULT_WIDTH: i32 = 40;
const DEFAULT_HEIGHT: i32 = 1;
const DEFAULT_PROGRESS: f64 = 0.3;

fn frame_interval() -> Duration {
    Duration::from_nanos(1_000_000_000 / FPS as u64)
}

/// Configuration options for building a progress bar.
///
/// Options are applied in order on top of the default [`Appearance`], so a
/// later option wins over an earlier one.
pub enum ProgressOption {
    /// Replaces every style attribute at once.
    WithAppearance(Box<Appearance>),
    /// Width of the rendered bar, in terminal cells.
    WithWidth(i32),
    /// Height of the rendered bar, in terminal rows.
    WithHeight(i32),
    /// Initial progress, pinned to `[0, 1]`.
    WithProgress(f64),
    /// Fill gradient stops.
    WithGradient(Vec<String>),
    /// Solid fill color.
    WithSolidFill(String),
    /// Track color.
    WithTrackColor(String),
    /// Bar type; gloss follows it.
    WithBarType(BarType),
    /// When the stripes are shown.
    WithBehavior(Behavior),
    /// Corner radius of a rounded bar, in pixels.
    WithCornerRadius(f64),
    /// Gap between track and fill, in pixels.
    WithInset(f64),
    /// Duration of animated progress changes.
    WithProgressTime(Duration),
    /// Where the indicator text goes.
    WithIndicatorText(IndicatorTextDisplayMode),
    /// Stripe slant.
    WithStripesOrientation(StripesOrientation),
    /// Stripe travel direction.
    WithStripesDirection(StripesDirection),
    /// Stripe speed, in pixels per tick.
    WithStripesVelocity(f64),
    /// Stripe width and slant, in pixels.
    WithStripesSize(i32, i32),
    /// Stripe color.
    WithStripesColor(String),
    /// Stripes are drawn but never move.
    WithStaticStripes,
    /// No stripes.
    WithoutStripes,
    /// No gloss.
    WithoutGloss,
    /// No track.
    WithoutTrack,
    /// Gradient spans the track rather than the fill.
    WithoutStretch,
}

impl ProgressOption {
    fn apply(&self, m: &mut Model) {
        match self {
            ProgressOption::WithAppearance(appearance) => m.apply_appearance(appearance),
            ProgressOption::WithWidth(width) => m.width = *width,
            ProgressOption::WithHeight(height) => m.height = *height,
            ProgressOption::WithProgress(progress) => m.set_progress(*progress),
            ProgressOption::WithGradient(colors) => m.progress_tint_colors = colors.clone(),
            ProgressOption::WithSolidFill(color) => {
                m.progress_tint_colors.clear();
                m.progress_tint_color = Some(color.clone());
            }
            ProgressOption::WithTrackColor(color) => m.track_tint_color = Some(color.clone()),
            ProgressOption::WithBarType(bar_type) => m.set_bar_type(*bar_type),
            ProgressOption::WithBehavior(behavior) => m.behavior = *behavior,
            ProgressOption::WithCornerRadius(radius) => m.corner_radius = *radius,
            ProgressOption::WithInset(inset) => m.progress_bar_inset = *inset,
            ProgressOption::WithProgressTime(time) => m.progress_bar_progress_time = *time,
            ProgressOption::WithIndicatorText(mode) => m.indicator_text_display_mode = *mode,
            ProgressOption::WithStripesOrientation(orientation) => {
                m.stripes_orientation = *orientation
            }
            ProgressOption::WithStripesDirection(direction) => m.stripes_direction = *direction,
            ProgressOption::WithStripesVelocity(velocity) => {
                m.stripes_animation_velocity = *velocity
            }
            ProgressOption::WithStripesSize(width, delta) => {
                m.stripes_width = *width;
                m.stripes_delta = *delta;
            }
            ProgressOption::WithStripesColor(color) => m.stripes_color = Some(color.clone()),
            ProgressOption::WithStaticStripes => m.stripes_animated = false,
            ProgressOption::WithoutStripes => m.hide_stripes = true,
            ProgressOption::WithoutGloss => m.hide_gloss = true,
            ProgressOption::WithoutTrack => m.hide_track = true,
            ProgressOption::WithoutStretch => m.progress_stretch = false,
        }
    }
}

/// Styles the bar with a whole [`Appearance`] at once.
///
/// Options listed after this one still override single attributes.
///
/// # Examples
///
/// ```rust
/// use bubbletea_progressbar::appearance::{BarType, TERMINAL};
/// use bubbletea_progressbar::progress::{new, with_appearance, with_width};
///
/// let bar = new(&[with_appearance(TERMINAL.clone()), with_width(60)]);
/// assert_eq!(bar.bar_type(), BarType::Flat);
/// assert_eq!(bar.width, 60);
/// ```
pub fn with_appearance(appearance: Appearance) -> ProgressOption {
    ProgressOption::WithAppearance(Box::new(appearance))
}

/// Sets the width of the rendered bar, in terminal cells.
///
/// The field can also be changed later, which is useful for layouts that
/// follow the terminal size.
///
/// # Arguments
///
/// * `w` - Width in cells
///
/// # Examples
///
/// ```rust
/// use bubbletea_progressbar::progress::{new, with_width};
///
/// let mut bar = new(&[with_width(20)]);
/// bar.width = 60;
/// ```
pub fn with_width(w: i32) -> ProgressOption {
    ProgressOption::WithWidth(w)
}

/// Sets the height of the rendered bar, in terminal rows.
///
/// # Examples
///
/// ```rust
/// use bubbletea_progressbar::progress::{new, with_height};
///
/// let bar = new(&[with_height(2)]);
/// assert_eq!(bar.view().lines().count(), 2);
/// ```
pub fn with_height(h: i32) -> ProgressOption {
    ProgressOption::WithHeight(h)
}

/// Sets the initial progress. Values outside `[0, 1]` are pinned.
///
/// # Examples
///
/// ```rust
/// use bubbletea_progressbar::progress::{new, with_progress};
///
/// assert_eq!(new(&[with_progress(0.25)]).progress(), 0.25);
/// assert_eq!(new(&[with_progress(4.0)]).progress(), 1.0);
/// ```
pub fn with_progress(p: f64) -> ProgressOption {
    ProgressOption::WithProgress(p)
}

/// Fills the bar with a gradient.
///
/// The colors are spread as bands of equal size from left to right. Whether
/// they span the fill or the whole track depends on `progress_stretch`, see
/// [`without_stretch`].
///
/// # Arguments
///
/// * `colors` - Hex colors (`#RRGGBB`) or ANSI color numbers
///
/// # Examples
///
/// ```rust
/// use bubbletea_progressbar::progress::{new, with_gradient};
///
/// let bar = new(&[with_gradient(vec![
///     "#5A56E0".to_string(),
///     "#EE6FF8".to_string(),
/// ])]);
/// assert_eq!(bar.progress_tint_colors.len(), 2);
/// ```
pub fn with_gradient(colors: Vec<String>) -> ProgressOption {
    ProgressOption::WithGradient(colors)
}

/// Fills the bar with a single color, dropping any gradient set before.
///
/// # Examples
///
/// ```rust
/// use bubbletea_progressbar::progress::{new, with_gradient, with_solid_fill};
///
/// let bar = new(&[
///     with_gradient(vec!["#FF0000".to_string(), "#0000FF".to_string()]),
///     with_solid_fill("#04B575".to_string()),
/// ]);
/// assert!(bar.progress_tint_colors.is_empty());
/// assert_eq!(bar.progress_tint_color.as_deref(), Some("#04B575"));
/// ```
pub fn with_solid_fill(color: String) -> ProgressOption {
    ProgressOption::WithSolidFill(color)
}

/// Sets the color of the track behind the fill.
pub fn with_track_color(color: String) -> ProgressOption {
    ProgressOption::WithTrackColor(color)
}

/// Sets the bar type. Gloss follows the type, as with [`Model::set_bar_type`].
///
/// # Examples
///
/// ```rust
/// use bubbletea_progressbar::appearance::BarType;
/// use bubbletea_progressbar::progress::{new, with_bar_type};
///
/// let bar = new(&[with_bar_type(BarType::Flat)]);
/// assert!(bar.hide_gloss);
/// ```
pub fn with_bar_type(bar_type: BarType) -> ProgressOption {
    ProgressOption::WithBarType(bar_type)
}

/// Sets when the stripes are shown.
///
/// # Examples
///
/// ```rust
/// use bubbletea_progressbar::appearance::Behavior;
/// use bubbletea_progressbar::progress::{new, with_behavior, with_progress};
///
/// // Stripes run until the first progress arrives
/// let bar = new(&[with_behavior(Behavior::Indeterminate), with_progress(0.0)]);
/// assert_eq!(bar.behavior, Behavior::Indeterminate);
/// ```
pub fn with_behavior(behavior: Behavior) -> ProgressOption {
    ProgressOption::WithBehavior(behavior)
}

/// Sets the corner radius of a rounded bar, in pixels.
///
/// Zero means half of the bar height. Radii larger than half of a
/// rectangle's smaller side are reduced when drawing.
pub fn with_corner_radius(radius: f64) -> ProgressOption {
    ProgressOption::WithCornerRadius(radius)
}

/// Sets the gap between the track and the fill of a rounded bar, in pixels.
pub fn with_inset(inset: f64) -> ProgressOption {
    ProgressOption::WithInset(inset)
}

/// Sets how long an animated progress change takes.
///
/// # Examples
///
/// ```rust
/// use bubbletea_progressbar::progress::{new, with_progress_time};
/// use std::time::Duration;
///
/// let mut bar = new(&[with_progress_time(Duration::ZERO)]);
/// // Nothing to animate: the change is immediate
/// assert!(bar.set_progress_animated(0.9, true).is_none());
/// ```
pub fn with_progress_time(time: Duration) -> ProgressOption {
    ProgressOption::WithProgressTime(time)
}

/// Shows the indicator text over the track or over the fill.
///
/// # Examples
///
/// ```rust
/// use bubbletea_progressbar::appearance::IndicatorTextDisplayMode;
/// use bubbletea_progressbar::progress::{new, with_indicator_text, with_progress, with_width};
///
/// let bar = new(&[
///     with_width(20),
///     with_progress(0.5),
///     with_indicator_text(IndicatorTextDisplayMode::Progress),
/// ]);
/// assert_eq!(bar.indicator_text(), "50%");
/// ```
pub fn with_indicator_text(mode: IndicatorTextDisplayMode) -> ProgressOption {
    ProgressOption::WithIndicatorText(mode)
}

/// Sets the slant of the stripes.
pub fn with_stripes_orientation(orientation: StripesOrientation) -> ProgressOption {
    ProgressOption::WithStripesOrientation(orientation)
}

/// Sets the direction the stripes travel in.
pub fn with_stripes_direction(direction: StripesDirection) -> ProgressOption {
    ProgressOption::WithStripesDirection(direction)
}

/// Sets how many pixels the stripes travel per tick. The sign is ignored;
/// use [`with_stripes_direction`] to reverse them.
pub fn with_stripes_velocity(velocity: f64) -> ProgressOption {
    ProgressOption::WithStripesVelocity(velocity)
}

/// Sets the stripe width and the horizontal slant of oblique stripes, in
/// pixels. A width of zero or less hides the stripes.
///
/// # Examples
///
/// ```rust
/// use bubbletea_progressbar::progress::{new, with_stripes_size};
///
/// let bar = new(&[with_stripes_size(5, 4)]);
/// assert_eq!(bar.stripe_pattern().pitch(), 9.0);
/// ```
pub fn with_stripes_size(width: i32, delta: i32) -> ProgressOption {
    ProgressOption::WithStripesSize(width, delta)
}

/// Sets the stripe color.
pub fn with_stripes_color(color: String) -> ProgressOption {
    ProgressOption::WithStripesColor(color)
}

/// Draws the stripes without moving them.
///
/// # Examples
///
/// ```rust
/// use bubbletea_progressbar::progress::{new, with_static_stripes};
///
/// let mut bar = new(&[with_static_stripes()]);
/// assert!(bar.start_stripes().is_none());
/// ```
pub fn with_static_stripes() -> ProgressOption {
    ProgressOption::WithStaticStripes
}

/// Never draws the stripes, whatever the behavior.
pub fn without_stripes() -> ProgressOption {
    ProgressOption::WithoutStripes
}

/// Hides the gloss on the track.
pub fn without_gloss() -> ProgressOption {
    ProgressOption::WithoutGloss
}

/// Leaves the track out, so only the fill is drawn.
pub fn without_track() -> ProgressOption {
    ProgressOption::WithoutTrack
}

/// Pins the gradient to the whole track instead of stretching it over the
/// fill. The fill then only reveals the colors it has reached.
///
/// # Examples
///
/// ```rust
/// use bubbletea_progressbar::progress::{new, with_gradient, without_stretch};
///
/// let bar = new(&[
///     with_gradient(vec!["#FF0000".to_string(), "#00FF00".to_string()]),
///     without_stretch(),
/// ]);
/// assert!(!bar.progress_stretch);
/// ```
pub fn without_stretch() -> ProgressOption {
    ProgressOption::WithoutStretch
}

/// Message indicating that the fill animation should advance by one frame.
///
/// Returned by the commands of [`Model::set_progress_animated`]; route it back
/// to [`Model::update`].
#[derive(Debug, Clone)]
pub struct FrameMsg {
    id: i64,
    tag: i64,
}

/// Message indicating that the stripes should move by one step.
///
/// Returned by the commands of [`Model::start_stripes`]; route it back to
/// [`Model::update`].
#[derive(Debug, Clone)]
pub struct StripeTickMsg {
    id: i64,
    tag: i64,
}

/// Linear interpolation of the displayed progress towards its target.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Transition {
    from: f64,
    to: f64,
    elapsed: Duration,
    duration: Duration,
}

impl Transition {
    fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    fn step(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f64 {
        if self.is_finished() {
            return self.to;
        }
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * t
    }
}

/// The progress bar model.
///
/// The stored progress is always within `[0, 1]`. What is drawn is the
/// *displayed* progress, which trails the stored one while an animated change
/// is running.
#[derive(Debug, Clone)]
pub struct Model {
    /// An identifier to keep us from receiving messages intended for other
    /// progress bars.
    id: i64,

    /// Generation of the fill animation; frames from older ones are dropped.
    tag: i64,

    /// Generation of the stripe animation.
    stripe_tag: i64,

    /// Width of the rendered bar, in terminal cells.
    pub width: i32,
    /// Height of the rendered bar, in terminal rows.
    pub height: i32,

    progress: f64,
    shown: f64,
    transition: Option<Transition>,

    /// When the stripes are shown.
    pub behavior: Behavior,
    bar_type: BarType,
    /// Hides the gloss on the track. Reset by [`Model::set_bar_type`].
    pub hide_gloss: bool,
    /// Stretches the gradient over the fill instead of the whole track.
    pub progress_stretch: bool,
    /// Gradient stops of the fill.
    pub progress_tint_colors: Vec<String>,
    /// Solid fill color, used when `progress_tint_colors` is empty.
    pub progress_tint_color: Option<String>,
    /// Track color. `None` uses a neutral gray.
    pub track_tint_color: Option<String>,
    /// Gap between the track and the fill of a rounded bar, in pixels.
    pub progress_bar_inset: f64,
    /// Zero means half of the bar height.
    pub corner_radius: f64,
    /// Duration of an animated progress change.
    pub progress_bar_progress_time: Duration,

    /// Where the indicator text is drawn, if at all.
    pub indicator_text_display_mode: IndicatorTextDisplayMode,
    /// Text of the indicator. `None` shows the displayed progress as a
    /// percentage.
    pub indicator_text: Option<String>,
    /// Text color. `None` picks black or white against what lies beneath.
    pub indicator_text_color: Option<String>,

    stripes_animated: bool,
    /// Direction the stripes travel in.
    pub stripes_direction: StripesDirection,
    /// Pixels travelled per tick. The sign is ignored.
    pub stripes_animation_velocity: f64,
    /// Slant of the stripes.
    pub stripes_orientation: StripesOrientation,
    /// Stripe width in pixels. Zero or less hides the stripes.
    pub stripes_width: i32,
    /// Stripe color. `None` uses a light tint of the default fill.
    pub stripes_color: Option<String>,
    /// Horizontal slant of oblique stripes, in pixels.
    pub stripes_delta: i32,
    /// Never draws the stripes.
    pub hide_stripes: bool,
    /// Leaves the track out.
    pub hide_track: bool,
    stripe_phase: StripePhase,
}

/// Creates a progress bar with the default appearance and the given options.
pub fn new(opts: &[ProgressOption]) -> Model {
    let mut m = Model::from_appearance(&Appearance::default());
    for opt in opts {
        opt.apply(&mut m);
    }
    m
}

impl Model {
    /// Creates a progress bar styled by `appearance`.
    pub fn from_appearance(appearance: &Appearance) -> Self {
        let mut m = Model {
            id: next_id(),
            tag: 0,
            stripe_tag: 0,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            progress: DEFAULT_PROGRESS,
            shown: DEFAULT_PROGRESS,
            transition: None,
            behavior: Behavior::Default,
            bar_type: BarType::Rounded,
            hide_gloss: false,
            progress_stretch: true,
            progress_tint_colors: Vec::new(),
            progress_tint_color: None,
            track_tint_color: None,
            progress_bar_inset: 1.0,
            corner_radius: 0.0,
            progress_bar_progress_time: Duration::from_secs(1),
            indicator_text_display_mode: IndicatorTextDisplayMode::None,
            indicator_text: None,
            indicator_text_color: None,
            stripes_animated: true,
            stripes_direction: StripesDirection::Right,
            stripes_animation_velocity: 1.0,
            stripes_orientation: StripesOrientation::Right,
            stripes_width: crate::appearance::DEFAULT_STRIPES_WIDTH,
            stripes_color: None,
            stripes_delta: crate::appearance::DEFAULT_STRIPES_DELTA,
            hide_stripes: false,
            hide_track: false,
            stripe_phase: StripePhase::default(),
        };
        m.apply_appearance(appearance);
        m
    }

    /// Copies every style attribute of `appearance` onto the bar. The progress
    /// and the running animations are left alone.
    pub fn apply_appearance(&mut self, appearance: &Appearance) {
        self.behavior = appearance.behavior;
        self.bar_type = appearance.bar_type;
        self.hide_gloss = appearance.resolved_hide_gloss();
        self.progress_stretch = appearance.progress_stretch;
        self.progress_tint_colors = appearance.progress_tint_colors.clone();
        self.progress_tint_color = appearance.progress_tint_color.clone();
        self.track_tint_color = appearance.track_tint_color.clone();
        self.progress_bar_inset = appearance.progress_bar_inset;
        self.corner_radius = appearance.corner_radius;
        self.progress_bar_progress_time = seconds_to_duration(appearance.progress_bar_progress_time);
        self.indicator_text_display_mode = appearance.indicator_text_display_mode;
        self.indicator_text_color = appearance.indicator_text_color.clone();
        self.stripes_animated = appearance.stripes_animated;
        if !self.stripes_animated {
            self.stripe_phase.reset();
        }
        self.stripes_direction = appearance.stripes_direction;
        self.stripes_animation_velocity = appearance.stripes_animation_velocity;
        self.stripes_orientation = appearance.stripes_orientation;
        self.stripes_width = appearance.stripes_width;
        self.stripes_color = appearance.stripes_color.clone();
        self.stripes_delta = appearance.stripes_delta;
        self.hide_stripes = appearance.hide_stripes;
        self.hide_track = appearance.hide_track;
    }

    /// The bar's identifier. Messages carrying another id are ignored.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The stored progress, in `[0, 1]`. During an animated change this is
    /// already the target.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// The progress currently drawn.
    pub fn displayed_progress(&self) -> f64 {
        self.shown
    }

    /// Sets the progress immediately.
    ///
    /// Values outside `[0, 1]` are pinned to those limits. Any animated change
    /// in flight is cancelled.
    pub fn set_progress(&mut self, value: f64) {
        self.progress = pin(value);
        self.shown = self.progress;
        if self.transition.take().is_some() {
            tracing::debug!("Progress bar {}: animation cancelled", self.id);
        }
        self.tag += 1;
    }

    /// Sets the progress, optionally animating the change.
    ///
    /// Without animation this is [`Model::set_progress`] and returns `None`.
    /// With animation the stored progress changes right away while the drawn
    /// fill glides from where it currently is to the new value over
    /// `progress_bar_progress_time`. Calling this again mid-flight restarts
    /// the glide from the current position; the returned command must be
    /// handed to the runtime to get the frames going.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_progressbar::progress::new;
    ///
    /// let mut bar = new(&[]);
    /// let _ = bar.set_progress_animated(1.7, true);
    /// assert_eq!(bar.progress(), 1.0);
    /// assert!(bar.is_animating());
    ///
    /// assert!(bar.set_progress_animated(0.2, false).is_none());
    /// assert!(!bar.is_animating());
    /// ```
    pub fn set_progress_animated(&mut self, value: f64, animated: bool) -> Option<Cmd> {
        let duration = self.progress_bar_progress_time;
        if !animated || duration.is_zero() {
            self.set_progress(value);
            return None;
        }

        let target = pin(value);
        if self.transition.is_some() {
            tracing::debug!(
                "Progress bar {}: animation superseded at {:.3}",
                self.id,
                self.shown
            );
        }
        self.progress = target;
        self.transition = Some(Transition::new(self.shown, target, duration));
        self.tag += 1;
        tracing::debug!(
            "Progress bar {}: animating {:.3} -> {:.3} over {:?}",
            self.id,
            self.shown,
            target,
            duration
        );
        Some(self.next_frame())
    }

    /// Adds `v` to the stored progress.
    pub fn incr_progress(&mut self, v: f64, animated: bool) -> Option<Cmd> {
        self.set_progress_animated(self.progress + v, animated)
    }

    /// Subtracts `v` from the stored progress.
    pub fn decr_progress(&mut self, v: f64, animated: bool) -> Option<Cmd> {
        self.set_progress_animated(self.progress - v, animated)
    }

    /// Whether an animated progress change is still running.
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// The current bar type.
    pub fn bar_type(&self) -> BarType {
        self.bar_type
    }

    /// Changes the bar type. Gloss follows the type: shown on rounded bars,
    /// hidden on flat ones. Set `hide_gloss` afterwards to override.
    pub fn set_bar_type(&mut self, bar_type: BarType) {
        self.bar_type = bar_type;
        self.hide_gloss = bar_type == BarType::Flat;
    }

    /// Whether the stripes move while a subscription is running.
    pub fn stripes_animated(&self) -> bool {
        self.stripes_animated
    }

    /// Turns stripe animation on or off.
    ///
    /// Turning it off freezes the stripes at their rest position and releases
    /// the tick subscription. Turning it on returns the command that starts a
    /// new one.
    pub fn set_stripes_animated(&mut self, animated: bool) -> Option<Cmd> {
        if animated == self.stripes_animated {
            return None;
        }
        self.stripes_animated = animated;
        if animated {
            self.start_stripes()
        } else {
            self.stop_stripes();
            self.stripe_phase.reset();
            None
        }
    }

    /// Starts moving the stripes.
    ///
    /// Returns `None` when the stripes are not animated. Any previous stripe
    /// subscription is retired, so calling this twice does not double the
    /// speed.
    pub fn start_stripes(&mut self) -> Option<Cmd> {
        if !self.stripes_animated {
            return None;
        }
        self.stripe_tag += 1;
        tracing::debug!("Progress bar {}: stripe animation started", self.id);
        Some(self.next_stripe_tick())
    }

    /// Stops moving the stripes. Pending stripe ticks are ignored and the
    /// stripes stay where they are.
    pub fn stop_stripes(&mut self) {
        self.stripe_tag += 1;
        tracing::debug!("Progress bar {}: stripe animation stopped", self.id);
    }

    /// Releases every tick subscription. Call this when the bar is torn down.
    ///
    /// Pending stripe ticks and fill frames are ignored from now on, and an
    /// animated change in flight jumps to its target.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_progressbar::progress::new;
    ///
    /// let mut bar = new(&[]);
    /// let _ = bar.start_stripes();
    /// let _ = bar.set_progress_animated(0.9, true);
    ///
    /// bar.stop();
    /// assert!(!bar.is_animating());
    /// assert_eq!(bar.displayed_progress(), 0.9);
    /// assert!(bar.update(Box::new(bar.frame_msg())).is_none());
    /// ```
    pub fn stop(&mut self) {
        self.stop_stripes();
        self.tag += 1;
        if self.transition.take().is_some() {
            self.shown = self.progress;
            tracing::debug!("Progress bar {}: animation stopped", self.id);
        }
    }

    /// Current horizontal offset of the stripe row, in `[0, pitch)`.
    pub fn stripes_phase(&self) -> f64 {
        self.stripe_phase.offset()
    }

    /// The stripe geometry from the current attributes.
    pub fn stripe_pattern(&self) -> StripePattern {
        StripePattern::new(
            self.stripes_width,
            self.stripes_delta,
            self.stripes_orientation,
        )
    }

    /// The text of the indicator: the explicit text if set, otherwise the
    /// displayed progress as a whole percentage.
    pub fn indicator_text(&self) -> String {
        match &self.indicator_text {
            Some(text) => text.clone(),
            None => format!("{}%", (self.shown * 100.0).round() as i64),
        }
    }

    /// Handles animation messages.
    ///
    /// Frames and stripe ticks addressed to another bar, or belonging to an
    /// animation that has since been replaced, are ignored.
    pub fn update(&mut self, msg: Msg) -> std::option::Option<Cmd> {
        if let Some(frame_msg) = msg.downcast_ref::<FrameMsg>() {
            if frame_msg.id != self.id || frame_msg.tag != self.tag {
                return None;
            }

            let transition = self.transition.as_mut()?;
            transition.step(frame_interval());
            self.shown = transition.value();

            if transition.is_finished() {
                self.transition = None;
                tracing::debug!("Progress bar {}: reached {:.3}", self.id, self.shown);
                return None;
            }
            tracing::trace!("Progress bar {}: frame at {:.3}", self.id, self.shown);
            return Some(self.next_frame());
        }

        if let Some(tick_msg) = msg.downcast_ref::<StripeTickMsg>() {
            if tick_msg.id != self.id || tick_msg.tag != self.stripe_tag || !self.stripes_animated
            {
                return None;
            }

            let pitch = self.stripe_pattern().pitch();
            self.stripe_phase.advance(
                self.stripes_animation_velocity,
                self.stripes_direction,
                pitch,
            );
            return Some(self.next_stripe_tick());
        }

        None
    }

    /// Draws the bar into `bounds` on any canvas.
    pub fn draw(&self, bounds: Rect, canvas: &mut dyn Canvas) {
        render::draw(self, bounds, canvas);
    }

    /// Records the draw calls for `bounds`.
    pub fn display_list(&self, bounds: Rect) -> DisplayList {
        let mut list = DisplayList::new();
        self.draw(bounds, &mut list);
        list
    }

    /// Renders the bar into terminal cells.
    pub fn view(&self) -> String {
        let mut canvas = CellCanvas::new(self.width.max(0) as usize, self.height.max(0) as usize);
        let bounds = canvas.bounds();
        self.draw(bounds, &mut canvas);
        canvas.render()
    }

    /// A frame message for the current fill animation.
    pub fn frame_msg(&self) -> FrameMsg {
        FrameMsg {
            id: self.id,
            tag: self.tag,
        }
    }

    /// A stripe tick for the current stripe animation.
    pub fn stripe_tick_msg(&self) -> StripeTickMsg {
        StripeTickMsg {
            id: self.id,
            tag: self.stripe_tag,
        }
    }

    fn next_frame(&self) -> Cmd {
        let msg = self.frame_msg();
        bubbletea_tick(frame_interval(), move |_| Box::new(msg.clone()) as Msg)
    }

    fn next_stripe_tick(&self) -> Cmd {
        let msg = self.stripe_tick_msg();
        bubbletea_tick(frame_interval(), move |_| Box::new(msg.clone()) as Msg)
    }
}

fn pin(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, std::option::Option<Cmd>) {
        let mut model = new(&[]);
        let cmd = model.start_stripes();
        (model, cmd)
    }

    fn update(&mut self, msg: Msg) -> std::option::Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

impl Default for Model {
    fn default() -> Self {
        new(&[])
    }
}
