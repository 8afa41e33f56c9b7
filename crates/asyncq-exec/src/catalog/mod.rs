//! The async operator catalog.
//!
//! Each submodule adds an `impl` block on `Deferred<T>` for one operator
//! family. Every method takes the cancellation handle as its last argument,
//! resolves the source through the shared gate, and forwards the realized
//! collection to the matching `asyncq_operators` function.

mod aggregate;
mod element;
mod group;
mod materialize;
mod order;
mod set;
mod shape;
