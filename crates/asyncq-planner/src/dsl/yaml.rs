//! YAML → pipeline parser for *linear* pipelines over JSON records.
//!
//! Example:
//! ```yaml
//! source: "data/orders.json"
//! config: { strict_numbers: true }
//! steps:
//!   - { op: where, field: price, cmp: ">", value: 10 }
//!   - { op: order_by, key: customer }
//!   - { op: then_by_descending, key: price }
//!   - { op: select, fields: [customer, price] }
//! terminal: { op: to_list }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use asyncq_core::config::PipelineConfig;
use asyncq_core::error::Error;

#[derive(Debug, Error)]
pub enum DslError {
    #[error("malformed pipeline: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("step {position}: `{op}` needs a preceding order_by step")]
    DanglingThenBy { position: usize, op: &'static str },

    #[error("step {position}: `{op}` names an empty field")]
    EmptyField { position: usize, op: &'static str },

    #[error("pipeline has no source; pass one explicitly")]
    MissingSource,
}

impl From<DslError> for Error {
    fn from(e: DslError) -> Self {
        Error::Config(e.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    #[serde(default)]
    pub config: Option<PipelineConfig>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub terminal: Terminal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cmp {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
}

impl Cmp {
    pub fn symbol(self) -> &'static str {
        match self {
            Cmp::Eq => "==",
            Cmp::Ne => "!=",
            Cmp::Lt => "<",
            Cmp::Le => "<=",
            Cmp::Gt => ">",
            Cmp::Ge => ">=",
        }
    }

    pub fn holds(self, ord: std::cmp::Ordering) -> bool {
        use std::cmp::Ordering::*;
        match self {
            Cmp::Eq => ord == Equal,
            Cmp::Ne => ord != Equal,
            Cmp::Lt => ord == Less,
            Cmp::Le => ord != Greater,
            Cmp::Gt => ord == Greater,
            Cmp::Ge => ord != Less,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum Step {
    Where { field: String, cmp: Cmp, value: Value },
    OrderBy { key: String },
    OrderByDescending { key: String },
    ThenBy { key: String },
    ThenByDescending { key: String },
    Distinct {
        #[serde(default)]
        field: Option<String>,
    },
    Skip { count: usize },
    Take { count: usize },
    Select { fields: Vec<String> },
    Reverse,
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Where { .. } => "where",
            Step::OrderBy { .. } => "order_by",
            Step::OrderByDescending { .. } => "order_by_descending",
            Step::ThenBy { .. } => "then_by",
            Step::ThenByDescending { .. } => "then_by_descending",
            Step::Distinct { .. } => "distinct",
            Step::Skip { .. } => "skip",
            Step::Take { .. } => "take",
            Step::Select { .. } => "select",
            Step::Reverse => "reverse",
        }
    }

    fn fields(&self) -> Vec<&str> {
        match self {
            Step::Where { field, .. } => vec![field.as_str()],
            Step::OrderBy { key }
            | Step::OrderByDescending { key }
            | Step::ThenBy { key }
            | Step::ThenByDescending { key } => vec![key.as_str()],
            Step::Distinct { field } => field.iter().map(String::as_str).collect(),
            Step::Select { fields } => fields.iter().map(String::as_str).collect(),
            Step::Skip { .. } | Step::Take { .. } | Step::Reverse => Vec::new(),
        }
    }

    fn is_order(&self) -> bool {
        matches!(self, Step::OrderBy { .. } | Step::OrderByDescending { .. })
    }

    fn is_then(&self) -> bool {
        matches!(self, Step::ThenBy { .. } | Step::ThenByDescending { .. })
    }
}

/// Catalog call a step resolves to.
impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Where { field, cmp, value } => {
                write!(f, "filter({field} {} {value})", cmp.symbol())
            }
            Step::OrderBy { key } => write!(f, "order_by_with({key}, JsonOrder)"),
            Step::OrderByDescending { key } => {
                write!(f, "order_by_descending_with({key}, JsonOrder)")
            }
            Step::ThenBy { key } => write!(f, "then_by_with({key}, JsonOrder)"),
            Step::ThenByDescending { key } => {
                write!(f, "then_by_descending_with({key}, JsonOrder)")
            }
            Step::Distinct { field: None } => write!(f, "distinct_with(JsonEquality)"),
            Step::Distinct { field: Some(field) } => {
                write!(f, "distinct_with(FieldEquality({field}))")
            }
            Step::Skip { count } => write!(f, "skip({count})"),
            Step::Take { count } => write!(f, "take({count})"),
            Step::Select { fields } => write!(f, "select([{}])", fields.join(", ")),
            Step::Reverse => write!(f, "reverse()"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum Terminal {
    #[default]
    ToList,
    Count,
    Sum { field: String },
    Average { field: String },
    Min { field: String },
    Max { field: String },
    First,
    Last,
    GroupCount { key: String },
    DistinctCount { field: String },
}

impl Terminal {
    fn fields(&self) -> Vec<&str> {
        match self {
            Terminal::Sum { field }
            | Terminal::Average { field }
            | Terminal::Min { field }
            | Terminal::Max { field }
            | Terminal::DistinctCount { field } => vec![field.as_str()],
            Terminal::GroupCount { key } => vec![key.as_str()],
            Terminal::ToList | Terminal::Count | Terminal::First | Terminal::Last => Vec::new(),
        }
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminal::ToList => write!(f, "to_list()"),
            Terminal::Count => write!(f, "count()"),
            Terminal::Sum { field } => write!(f, "sum_by({field})"),
            Terminal::Average { field } => write!(f, "average_by({field})"),
            Terminal::Min { field } => write!(f, "min_of({field}, JsonOrder)"),
            Terminal::Max { field } => write!(f, "max_of({field}, JsonOrder)"),
            Terminal::First => write!(f, "first()"),
            Terminal::Last => write!(f, "last()"),
            Terminal::GroupCount { key } => {
                write!(f, "group_by_result_with({key}, count, JsonEquality)")
            }
            Terminal::DistinctCount { field } => {
                write!(f, "distinct_with(FieldEquality({field})).count()")
            }
        }
    }
}

/// A validated pipeline document.
#[derive(Debug, Clone)]
pub struct ParsedPipeline {
    pub source: Option<String>,
    pub steps: Vec<Step>,
    pub terminal: Terminal,
    pub config: PipelineConfig,
}

impl ParsedPipeline {
    /// Resolve the source path: an explicit override wins; otherwise the
    /// document's `source`, relative to `base_dir` when one is given.
    pub fn source_path(
        &self,
        explicit: Option<&Path>,
        base_dir: Option<&Path>,
    ) -> Result<PathBuf, DslError> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }
        let declared = self.source.as_deref().ok_or(DslError::MissingSource)?;
        let declared = Path::new(declared);
        Ok(match base_dir {
            Some(base) if declared.is_relative() => base.join(declared),
            _ => declared.to_path_buf(),
        })
    }
}

/// Parse and validate a YAML pipeline.
pub fn parse_yaml_pipeline(yaml_src: &str) -> Result<ParsedPipeline, DslError> {
    let doc: Pipeline = serde_yaml::from_str(yaml_src)?;

    let mut ordered = false;
    for (position, step) in doc.steps.iter().enumerate() {
        if step.fields().iter().any(|f| f.trim().is_empty()) {
            return Err(DslError::EmptyField {
                position,
                op: step.name(),
            });
        }
        if step.is_then() && !ordered {
            return Err(DslError::DanglingThenBy {
                position,
                op: step.name(),
            });
        }
        // Any step other than another level ends the ordering chain.
        ordered = step.is_order() || (ordered && step.is_then());
    }
    if doc.terminal.fields().iter().any(|f| f.trim().is_empty()) {
        return Err(DslError::EmptyField {
            position: doc.steps.len(),
            op: "terminal",
        });
    }

    Ok(ParsedPipeline {
        source: doc.source,
        steps: doc.steps,
        terminal: doc.terminal,
        config: doc.config.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_document() {
        let src = r#"
source: orders.json
config:
  strict_numbers: true
steps:
  - op: where
    field: price
    cmp: ">="
    value: 10
  - op: order_by
    key: customer
  - op: then_by_descending
    key: price
  - op: distinct
  - op: take
    count: 3
  - op: reverse
terminal:
  op: sum
  field: price
"#;
        let p = parse_yaml_pipeline(src).unwrap();
        assert_eq!(p.steps.len(), 6);
        assert_eq!(
            p.steps[0],
            Step::Where {
                field: "price".into(),
                cmp: Cmp::Ge,
                value: serde_json::json!(10)
            }
        );
        assert_eq!(p.steps[3], Step::Distinct { field: None });
        assert_eq!(p.terminal, Terminal::Sum { field: "price".into() });
        assert_eq!(p.config.strict_numbers, Some(true));
    }

    #[test]
    fn terminal_defaults_to_list() {
        let p = parse_yaml_pipeline("steps: []").unwrap();
        assert_eq!(p.terminal, Terminal::ToList);
        assert!(p.source.is_none());
    }

    #[test]
    fn rejects_unknown_op_and_cmp() {
        assert!(matches!(
            parse_yaml_pipeline("steps: [{op: explode}]"),
            Err(DslError::Yaml(_))
        ));
        assert!(matches!(
            parse_yaml_pipeline("steps: [{op: where, field: a, cmp: '~', value: 1}]"),
            Err(DslError::Yaml(_))
        ));
        assert!(parse_yaml_pipeline("steps: [").is_err());
    }

    #[test]
    fn then_by_needs_an_unbroken_order_chain() {
        assert!(matches!(
            parse_yaml_pipeline("steps: [{op: then_by, key: a}]"),
            Err(DslError::DanglingThenBy { position: 0, .. })
        ));
        let broken = "steps: [{op: order_by, key: a}, {op: skip, count: 1}, {op: then_by, key: b}]";
        assert!(matches!(
            parse_yaml_pipeline(broken),
            Err(DslError::DanglingThenBy { position: 2, .. })
        ));
        let ok = "steps: [{op: order_by, key: a}, {op: then_by, key: b}, {op: then_by_descending, key: c}]";
        assert!(parse_yaml_pipeline(ok).is_ok());
    }

    #[test]
    fn empty_field_names_are_rejected() {
        let err = parse_yaml_pipeline("steps: [{op: select, fields: [a, '']}]").unwrap_err();
        assert!(matches!(err, DslError::EmptyField { position: 0, .. }));
        let as_core: Error = err.into();
        assert!(matches!(as_core, Error::Config(_)));
    }

    #[test]
    fn source_resolution() {
        let p = parse_yaml_pipeline("source: data/in.json").unwrap();
        let base = Path::new("/pipelines");
        assert_eq!(
            p.source_path(None, Some(base)).unwrap(),
            PathBuf::from("/pipelines/data/in.json")
        );
        assert_eq!(
            p.source_path(Some(Path::new("other.json")), Some(base)).unwrap(),
            PathBuf::from("other.json")
        );
        let bare = parse_yaml_pipeline("steps: []").unwrap();
        assert!(matches!(bare.source_path(None, None), Err(DslError::MissingSource)));
    }

    #[test]
    fn steps_render_as_catalog_calls() {
        let step = Step::Where {
            field: "qty".into(),
            cmp: Cmp::Lt,
            value: serde_json::json!(5),
        };
        assert_eq!(step.to_string(), "filter(qty < 5)");
        assert_eq!(
            Terminal::GroupCount { key: "k".into() }.to_string(),
            "group_by_result_with(k, count, JsonEquality)"
        );
    }
}
