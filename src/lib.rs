#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-progressbar/")]

//! # bubbletea-progressbar
//!
//! A highly customizable, animated progress bar for
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs) applications.
//!
//! ## Overview
//!
//! The bar is made of a track, a fill painted as a horizontal gradient, a row
//! of oblique or vertical stripes that can scroll, and an optional text
//! indicator. Like the other bubbletea components it follows the Elm
//! Architecture: build it, forward messages to `update()`, print `view()`.
//!
//! ## Features
//!
//! - **Rounded or flat** bars, with optional gloss and adjustable corner radius
//! - **Gradient fills** stretched over the fill or pinned to the track
//! - **Moving stripes** in three orientations, either direction, any speed
//! - **Behaviors** that show the stripes only before a task starts
//!   (indeterminate) or once it is done (waiting)
//! - **Animated progress changes** that can be interrupted at any time
//! - **Themes** loaded from TOML
//! - **Any renderer**: drawing goes through the [`Canvas`] trait, with a
//!   terminal rasterizer and a recording canvas included
//!
//! ## Quick Start
//!
//! ```rust
//! use bubbletea_progressbar::prelude::*;
//!
//! let mut bar = progress_new(&[
//!     with_width(50),
//!     with_behavior(Behavior::Default),
//!     with_indicator_text(IndicatorTextDisplayMode::Progress),
//! ]);
//!
//! // Forward the returned commands from your own update()
//! let _stripes = bar.start_stripes();
//! let _glide = bar.set_progress_animated(0.6, true);
//!
//! assert_eq!(bar.progress(), 0.6);
//! let _frame = bar.view();
//! ```
//!
//! ## Themes
//!
//! ```rust
//! use bubbletea_progressbar::prelude::*;
//!
//! let theme = Appearance::from_toml_str(r#"
//!     bar_type = "flat"
//!     stripes_orientation = "vertical"
//! "#).unwrap();
//! let bar = Progress::from_appearance(&theme);
//! assert!(bar.hide_gloss);
//! ```

pub mod appearance;
pub mod behavior;
pub mod canvas;
pub mod cell_canvas;
pub mod error;
pub mod geometry;
pub mod progress;
pub mod render;
pub mod stripes;

pub use appearance::{
    Appearance, BarType, Behavior, IndicatorTextDisplayMode, StripesDirection, StripesOrientation,
};
pub use behavior::stripes_visible;
pub use canvas::{Canvas, DisplayList, DrawOp, Gradient};
pub use cell_canvas::CellCanvas;
pub use error::ConfigError;
pub use geometry::{Point, Rect};
pub use progress::{
    new as progress_new, FrameMsg, Model as Progress, ProgressOption, StripeTickMsg,
};
pub use stripes::{StripePattern, StripePhase};

/// Everything needed to build, configure and drive a progress bar.
pub mod prelude {
    pub use crate::appearance::{
        Appearance, BarType, Behavior, IndicatorTextDisplayMode, StripesDirection,
        StripesOrientation,
    };
    pub use crate::canvas::{Canvas, DisplayList, DrawOp};
    pub use crate::cell_canvas::CellCanvas;
    pub use crate::error::ConfigError;
    pub use crate::geometry::Rect;
    pub use crate::progress::{
        new as progress_new, with_appearance, with_bar_type, with_behavior, with_corner_radius,
        with_gradient, with_height, with_indicator_text, with_inset, with_progress,
        with_progress_time, with_solid_fill, with_static_stripes, with_stripes_color,
        with_stripes_direction, with_stripes_orientation, with_stripes_size,
        with_stripes_velocity, with_track_color, with_width, without_gloss, without_stretch,
        without_stripes, without_track, FrameMsg, Model as Progress, ProgressOption,
        StripeTickMsg,
    };
}
