//! Engine-wide error type.
//!
//! Sub-crates define their own error enums and wrap `CityError` via `From`
//! where a core failure can surface through them.

use thiserror::Error;

/// The base error type for `city-core` and a common variant for sub-crates.
#[derive(Debug, Error)]
pub enum CityError {
    #[error("invalid agent id {0:?}: expected `car-<n>` or `npc-<n>`")]
    InvalidAgentId(String),

    #[error("unknown agent kind {0:?}")]
    UnknownAgentKind(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `city-*` crates.
pub type CityResult<T> = Result<T, CityError>;
