#![forbid(unsafe_code)]
//! asyncq-operators: the synchronous half of the query layer.
//!
//! Every function here takes an already-realized collection (`Vec<T>` or a
//! slice) and produces a new value; nothing is mutated in place and nothing is
//! retained after returning. The exec crate resolves pending sources and then
//! forwards to these functions.
//!
//! Set, grouping, lookup and join operators share one hash-partitioned index
//! (`index::KeyIndex`) driven by a pluggable `EqualityComparer`; the ordering
//! continuation lives in `sort`.

pub mod index;

pub mod aggregate;
pub mod element;
pub mod filter;
pub mod map;
pub mod partition;
pub mod sequence;

pub mod group;
pub mod join;
pub mod materialize;
pub mod set;
pub mod sort;

pub use group::{Grouping, Lookup};
pub use index::KeyIndex;
pub use materialize::{Dictionary, ElementSet};
pub use sort::OrderedSequence;
