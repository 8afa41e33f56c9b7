#![forbid(unsafe_code)]
//! asyncq-planner: a linear YAML pipeline over JSON records.
//!
//! A pipeline names a JSON source, a list of steps and one terminal. Parsing
//! validates the structure; running loads the source as a pending producer
//! and drives every step through the `asyncq-exec` catalog with the caller's
//! cancellation handle. Steps execute in the order written.

pub mod dsl;
pub mod json;
pub mod pipeline;

pub use dsl::yaml::{parse_yaml_pipeline, DslError, ParsedPipeline, Step, Terminal};
pub use json::{FieldEquality, JsonEquality, JsonOrder};
pub use pipeline::{explain, load_json_source, run_pipeline, run_records, GroupCount, Output};
