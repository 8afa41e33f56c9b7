#![forbid(unsafe_code)]
//! asyncq-core: shared vocabulary for the deferred query layer.
//!
//! Contents:
//! - `error`: the one error enum every layer returns.
//! - `cancel`: the caller-owned cancellation handle.
//! - `comparer`: pluggable equality (equals + hash) and ordering capabilities.
//! - `numeric`: numeric-kind descriptors driving sum/average/min/max.
//! - `config`: serializable settings for the binary layer.
//!
//! No async, no I/O here. The exec crate owns resolution of pending sources.

pub mod cancel;
pub mod comparer;
pub mod config;
pub mod error;
pub mod numeric;
pub mod prelude;

pub use error::{Error, Result};
