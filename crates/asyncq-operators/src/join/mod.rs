//! Equi-joins of a realized outer sequence against an inner sequence.
//!
//! Both joins index the inner side once (see `hash`) and then walk the outer
//! side in source order.

pub mod hash;

pub use hash::{group_join, join};
