//! The `utils` module provides a collection of utility functions and common
//! definitions used across the `podium` crate.
//!
//! It centralizes the crate error type, logging setup and the small
//! synchronization helpers shared by the broadcasters and aggregators.

pub mod error;
pub mod logging;
pub(crate) mod sync;
