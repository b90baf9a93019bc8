//! Framework error type.
//!
//! Sub-crates may define their own error enums and convert them into
//! `TlcError` via `From` impls, or keep them separate and wrap `TlcError` as
//! one variant.  Both patterns are acceptable; prefer whichever keeps error
//! sites clean.

use thiserror::Error;

use crate::ActionId;

/// The top-level error type for `tlc-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum TlcError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("action {0} out of range (action space has {1} actions)")]
    ActionOutOfRange(ActionId, usize),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `tlc-*` crates.
pub type TlcResult<T> = Result<T, TlcError>;
