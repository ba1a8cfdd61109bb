//! Framework error type.
//!
//! Sub-crates define their own error enums and either convert into
//! `DriftError` via `From` impls or wrap it as one variant.

use thiserror::Error;

/// The top-level error type for `drift-core` and a common base for
/// sub-crates.
#[derive(Debug, Error)]
pub enum DriftError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `drift-*` crates.
pub type DriftResult<T> = Result<T, DriftError>;
