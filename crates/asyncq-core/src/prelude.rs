//! Convenient re-exports for downstream crates.

pub use crate::cancel::{ensure_live, CancellationHandle};
pub use crate::comparer::{
    by_key, equality_fn, DefaultEquality, EqualityComparer, FnEquality, KeyEquality,
    NaturalOrder, OrderingComparer,
};
pub use crate::config::{PipelineConfig, QueryConfig};
pub use crate::error::{Error, Result};
pub use crate::numeric::{Aggregatable, NumericKind};
