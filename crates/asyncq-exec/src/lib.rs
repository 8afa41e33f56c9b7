#![forbid(unsafe_code)]
//! asyncq-exec: binds pending sources to the synchronous operator layer.
//!
//! A `Deferred<T>` is either a pending producer or an already-realized
//! collection. Every catalog method checks the caller's cancellation handle
//! once, awaits the producer once, and forwards to `asyncq-operators`.
//! Intermediate operators hand back a ready `Deferred` so calls chain;
//! terminal operators hand back the value.
//!
//! Ordering goes through `DeferredOrdered<T>`, which also accepts producers
//! that already yield a partially-ordered sequence.

pub mod catalog;
pub mod deferred;
pub mod metrics;
pub mod ordered;

pub use deferred::{resolve, Deferred};
pub use ordered::DeferredOrdered;
