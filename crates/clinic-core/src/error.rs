//! Core error type.
//!
//! Sub-crates define their own error enums and either convert into
//! `CoreError` via `From` impls or wrap it as one variant.  Constraint
//! rejections (a slot being unavailable, a series occurrence failing) are
//! *not* errors — they are returned as plain values for callers to branch
//! on.  This enum covers invalid input only.

use thiserror::Error;

/// The top-level error type for `clinic-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid session duration {0} min: expected 50, 80, or 180")]
    InvalidDuration(u32),

    #[error("invalid time: {0}")]
    InvalidTime(String),

    #[error("invalid business day: {0}")]
    InvalidBusinessDay(String),
}

/// Shorthand result type for all `clinic-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
