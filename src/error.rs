//! Error types.
//!
//! Nothing on the drawing or animation path can fail: out-of-range values are
//! pinned or defaulted. Errors only arise while loading an [`Appearance`] from
//! a theme file.
//!
//! [`Appearance`]: crate::appearance::Appearance

use thiserror::Error;

/// Failure to load or validate an appearance theme.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The theme file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The theme is not valid TOML or does not match the expected shape.
    #[error("failed to parse theme: {0}")]
    Parse(#[from] toml::de::Error),

    /// A color attribute is not a hex color or an ANSI color number.
    #[error("invalid color for `{field}`: {value:?}")]
    InvalidColor {
        /// The attribute holding the color.
        field: String,
        /// The offending value.
        value: String,
    },
}
