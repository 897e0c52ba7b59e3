//! Errors raised while configuring a progress line.
//!
//! Every failure in this crate happens at construction time. Once a
//! [`Progress`](crate::Progress) exists, advancing and rendering it cannot fail.

use compact_str::CompactString;
use thiserror::Error;

/// An invalid argument supplied while building a progress line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A bounded progress line needs at least one step.
    #[error("bounded progress requires a total of at least 1")]
    ZeroTotal,

    /// The bar needs at least one cell to draw.
    #[error("bar width must be at least 1 cell")]
    ZeroBarWidth,

    /// The bar style name is not in the registry.
    #[error("unknown bar style: {0:?}")]
    UnknownBarStyle(CompactString),

    /// The decoration style name is not in the registry.
    #[error("unknown decoration style: {0:?}")]
    UnknownDecorationStyle(CompactString),
}

/// Result alias for configuration steps.
pub type ConfigResult<T> = Result<T, ConfigError>;
