//! Pipeline execution over JSON records.
//!
//! The source is bound as a pending producer; each step is one catalog call
//! on the running `Deferred`, so the caller's cancellation handle is checked
//! before every step. Ordering steps switch to `DeferredOrdered` until a
//! non-ordering step (or the terminal) materializes the order.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use asyncq_core::cancel::CancellationHandle;
use asyncq_core::comparer::OrderingComparer;
use asyncq_core::config::QueryConfig;
use asyncq_core::error::{Error, Result};
use asyncq_exec::{Deferred, DeferredOrdered};

use crate::dsl::yaml::{Cmp, ParsedPipeline, Step, Terminal};
use crate::json::{self, FieldEquality, JsonEquality, JsonOrder};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupCount {
    pub key: Value,
    pub count: usize,
}

/// Result of a pipeline terminal. Serializes as plain JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Output {
    Records(Vec<Value>),
    Groups(Vec<GroupCount>),
    Count(usize),
    Scalar(Value),
}

impl Output {
    /// Keep at most `max` records or groups. Returns how many were dropped.
    pub fn truncate(&mut self, max: usize) -> usize {
        match self {
            Output::Records(items) => {
                let dropped = items.len().saturating_sub(max);
                items.truncate(max);
                dropped
            }
            Output::Groups(groups) => {
                let dropped = groups.len().saturating_sub(max);
                groups.truncate(max);
                dropped
            }
            Output::Count(_) | Output::Scalar(_) => 0,
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let text = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(text)
    }
}

enum Stage {
    Plain(Deferred<Value>),
    Ordered(DeferredOrdered<Value>),
}

impl Stage {
    async fn plain(self, cancel: Option<&CancellationHandle>) -> Result<Deferred<Value>> {
        match self {
            Stage::Plain(source) => Ok(source),
            Stage::Ordered(source) => source.into_deferred(cancel).await,
        }
    }
}

/// Bind a JSON array file as a pending source. The file is read only when
/// the first operator resolves it.
pub fn load_json_source(path: impl Into<PathBuf>) -> Deferred<Value> {
    let path = path.into();
    Deferred::pending(async move {
        tracing::debug!(path = %path.display(), "reading source");
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            Error::source(std::io::Error::new(
                e.kind(),
                format!("{}: {e}", path.display()),
            ))
        })?;
        let records: Vec<Value> = serde_json::from_slice(&bytes)?;
        Ok(records)
    })
}

pub async fn run_pipeline(
    pipeline: &ParsedPipeline,
    source: &Path,
    cfg: &QueryConfig,
    cancel: Option<&CancellationHandle>,
) -> Result<Output> {
    tracing::info!(
        source = %source.display(),
        steps = pipeline.steps.len(),
        "running pipeline"
    );
    run_records(pipeline, load_json_source(source), cfg, cancel).await
}

/// Run a pipeline against any record source.
pub async fn run_records(
    pipeline: &ParsedPipeline,
    source: Deferred<Value>,
    cfg: &QueryConfig,
    cancel: Option<&CancellationHandle>,
) -> Result<Output> {
    let mut stage = Stage::Plain(source);
    for step in &pipeline.steps {
        stage = apply(stage, step, cancel).await?;
    }
    let records = stage.plain(cancel).await?;
    finish(records, &pipeline.terminal, cfg.strict_numbers, cancel).await
}

fn key_of(path: &str) -> impl Fn(&Value) -> Value + Send + Sync + 'static {
    let path = path.to_string();
    move |record| json::field(record, &path).clone()
}

fn compare_matches(cmp: Cmp, lhs: &Value, rhs: &Value) -> bool {
    let ord = JsonOrder.compare(lhs, rhs);
    match cmp {
        Cmp::Eq | Cmp::Ne => cmp.holds(ord),
        // Range comparisons never hold across kinds.
        _ => json::same_kind(lhs, rhs) && cmp.holds(ord),
    }
}

fn project(record: &Value, fields: &[String]) -> Value {
    let picked: Map<String, Value> = fields
        .iter()
        .map(|f| (f.clone(), json::field(record, f).clone()))
        .collect();
    Value::Object(picked)
}

async fn apply(stage: Stage, step: &Step, cancel: Option<&CancellationHandle>) -> Result<Stage> {
    let next = match step {
        Step::Where { field, cmp, value } => {
            let source = stage.plain(cancel).await?;
            Stage::Plain(
                source
                    .filter(|r| compare_matches(*cmp, json::field(r, field), value), cancel)
                    .await?,
            )
        }
        Step::OrderBy { key } => {
            let source = stage.plain(cancel).await?;
            Stage::Ordered(source.order_by_with(key_of(key), JsonOrder, cancel).await?)
        }
        Step::OrderByDescending { key } => {
            let source = stage.plain(cancel).await?;
            Stage::Ordered(
                source
                    .order_by_descending_with(key_of(key), JsonOrder, cancel)
                    .await?,
            )
        }
        Step::ThenBy { key } | Step::ThenByDescending { key } => {
            let Stage::Ordered(source) = stage else {
                return Err(Error::Config(format!(
                    "`{}` needs a preceding order_by step",
                    step.name()
                )));
            };
            let next = if matches!(step, Step::ThenBy { .. }) {
                source.then_by_with(key_of(key), JsonOrder, cancel).await?
            } else {
                source
                    .then_by_descending_with(key_of(key), JsonOrder, cancel)
                    .await?
            };
            Stage::Ordered(next)
        }
        Step::Distinct { field } => {
            let source = stage.plain(cancel).await?;
            Stage::Plain(match field {
                Some(field) => {
                    source
                        .distinct_with(FieldEquality::new(field.as_str()), cancel)
                        .await?
                }
                None => source.distinct_with(JsonEquality, cancel).await?,
            })
        }
        Step::Skip { count } => {
            let source = stage.plain(cancel).await?;
            Stage::Plain(source.skip(*count, cancel).await?)
        }
        Step::Take { count } => {
            let source = stage.plain(cancel).await?;
            Stage::Plain(source.take(*count, cancel).await?)
        }
        Step::Select { fields } => {
            let source = stage.plain(cancel).await?;
            Stage::Plain(source.select(|r| project(&r, fields), cancel).await?)
        }
        Step::Reverse => Stage::Plain(stage.plain(cancel).await?.reverse(cancel).await?),
    };
    Ok(next)
}

fn decimal_json(value: Decimal) -> Result<Value> {
    Ok(serde_json::from_str(&value.normalize().to_string())?)
}

async fn numeric_column(
    source: Deferred<Value>,
    field: &str,
    strict: bool,
    cancel: Option<&CancellationHandle>,
) -> Result<Deferred<Option<Decimal>>> {
    let cells = source
        .select(|r| json::numeric(json::field(&r, field), field, strict), cancel)
        .await?
        .to_list(cancel)
        .await?;
    cells.into_iter().collect()
}

async fn finish(
    source: Deferred<Value>,
    terminal: &Terminal,
    strict: bool,
    cancel: Option<&CancellationHandle>,
) -> Result<Output> {
    let out = match terminal {
        Terminal::ToList => Output::Records(source.to_list(cancel).await?),
        Terminal::Count => Output::Count(source.count(cancel).await?),
        Terminal::Sum { field } => {
            let column = numeric_column(source, field, strict, cancel).await?;
            Output::Scalar(decimal_json(column.sum(cancel).await?)?)
        }
        Terminal::Average { field } => {
            let column = numeric_column(source, field, strict, cancel).await?;
            match column.average(cancel).await? {
                Some(mean) => Output::Scalar(decimal_json(mean)?),
                None => Output::Scalar(Value::Null),
            }
        }
        Terminal::Min { field } | Terminal::Max { field } => {
            // Null and missing values are skipped; none left reads as null.
            let present = source
                .filter(|r| !json::field(r, field).is_null(), cancel)
                .await?;
            let pick = key_of(field);
            let extreme = if matches!(terminal, Terminal::Min { .. }) {
                present.min_of(|r| pick(&r), JsonOrder, cancel).await
            } else {
                present.max_of(|r| pick(&r), JsonOrder, cancel).await
            };
            match extreme {
                Ok(value) => Output::Scalar(value),
                Err(Error::EmptySequence) => Output::Scalar(Value::Null),
                Err(e) => return Err(e),
            }
        }
        Terminal::First => Output::Scalar(source.first(cancel).await?),
        Terminal::Last => Output::Scalar(source.last(cancel).await?),
        Terminal::GroupCount { key } => {
            let groups = source
                .group_by_result_with(
                    key_of(key),
                    |key, records| GroupCount {
                        key,
                        count: records.len(),
                    },
                    JsonEquality,
                    cancel,
                )
                .await?
                .to_list(cancel)
                .await?;
            Output::Groups(groups)
        }
        Terminal::DistinctCount { field } => {
            let distinct = source
                .distinct_with(FieldEquality::new(field.as_str()), cancel)
                .await?;
            Output::Count(distinct.count(cancel).await?)
        }
    };
    Ok(out)
}

/// Render the operator chain a pipeline resolves to.
pub fn explain(pipeline: &ParsedPipeline) -> String {
    let mut lines = vec![format!(
        "source: {} (pending)",
        pipeline.source.as_deref().unwrap_or("<unbound>")
    )];
    for (i, step) in pipeline.steps.iter().enumerate() {
        lines.push(format!("{:>3}. {step}", i + 1));
    }
    lines.push(format!("terminal: {}", pipeline.terminal));
    lines.join("\n")
}
