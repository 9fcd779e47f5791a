//! The `client` module defines the subscriber side of every broadcaster and
//! aggregator.
//!
//! A `Client<T>` is an identity (`SubscriberId`) plus the sending half of an
//! unbounded channel; publishing to it never blocks the publisher. The
//! transport layer owns the receiving half and forwards whatever arrives
//! to its push connection. `coalescing` wraps a downstream channel so that
//! bursts of snapshots collapse into the latest one per batch period.

pub mod coalesce;
pub mod pubsub_client;

pub use coalesce::coalescing;
pub use pubsub_client::{Client, SubscriberId};
