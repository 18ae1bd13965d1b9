//! Shared error type for crates that don't need a richer, domain-specific one.

use thiserror::Error;

/// General-purpose error shared by the smaller `meas-*` crates.
///
/// Larger crates (`meas-map`, `meas-mobility`, ...) define their own
/// `thiserror` enums for domain-specific invariant violations and convert
/// into or wrap `CoreError` where it fits, following the same pattern as
/// `dt_core::DtError` in the teacher crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    Ergodicity(#[from] crate::rng::markov::NotErgodic),
}

pub type CoreResult<T> = Result<T, CoreError>;
