//! The `error` module defines the error type shared by every component of
//! `podium`.
//!
//! Construction of a component either fully succeeds or fails with one of
//! these variants; nothing half-built is ever returned. Steady-state
//! operations (publishing, counting, resetting) are total and do not fail.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A constructor was handed a value outside its documented domain.
    #[error("illegal argument: {0}")]
    InvalidArgument(String),

    /// Startup could not build a component from configuration. Fatal.
    #[error("initialization error: {0}")]
    Initialization(String),

    /// Input rejected at the boundary before reaching the core.
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl Error {
    /// Re-labels a construction failure as a startup failure.
    pub fn into_initialization(self, component: &str) -> Self {
        match self {
            Error::InvalidArgument(reason) | Error::Initialization(reason) => {
                Error::Initialization(format!("{component}: {reason}"))
            }
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
