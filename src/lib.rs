#![forbid(unsafe_code)]
//! asyncq: deferred query operators over asynchronously produced collections.
//!
//! The facade re-exports the workspace crates:
//! - [`core`]: errors, cancellation, comparers, numeric kinds, config.
//! - [`operators`]: the synchronous catalog over realized `Vec`s.
//! - [`exec`]: `Deferred<T>` / `DeferredOrdered<T>` and the async catalog.
//! - [`planner`]: YAML pipelines over JSON records.
//!
//! ```ignore
//! use asyncq::prelude::*;
//!
//! let source = Deferred::pending(async { Ok(vec![3, 1, 2]) });
//! let sorted = source.order_by(|n: &i32| *n, None).await?.to_list(None).await?;
//! ```

pub use asyncq_core as core;
pub use asyncq_exec as exec;
pub use asyncq_operators as operators;
pub use asyncq_planner as planner;

pub mod prelude {
    pub use asyncq_core::prelude::*;
    pub use asyncq_exec::{resolve, Deferred, DeferredOrdered};
    pub use asyncq_operators::{Dictionary, ElementSet, Grouping, Lookup, OrderedSequence};
}
