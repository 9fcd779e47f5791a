//! Collections backing the token counters.
//!
//! - `BoundedOrderedSet`: fixed-capacity set that evicts the least recently
//!   touched element, used to cap what one sender can contribute.
//! - `FrequencyIndex`: item counts plus an inverted count -> items index kept
//!   in step on every update.
//!
//! Neither type is synchronized; owners hold them behind their own lock.

pub mod bounded_set;
pub mod frequency;

pub use bounded_set::{BoundedOrderedSet, Effect};
pub use frequency::FrequencyIndex;
