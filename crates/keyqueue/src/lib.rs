//! # keyqueue
//!
//! Queue of unique keys with constant-time removal of arbitrary elements.
//!
//! ## Architecture
//! - **Arena**: nodes stored in a `Vec` of slots, linked by index, with a free list
//! - **Chain**: doubly-linked head (oldest) to tail (newest)
//! - **Lookup**: AHash map from key to slot index, so `remove` and
//!   `move_to_tail` never walk the chain
//!
//! Every operation touches at most the node itself and its two neighbours.

#![warn(missing_docs)]

mod arena;
mod queue;

#[cfg(test)]
mod property_tests;

pub use queue::{Iter, KeyQueue};
