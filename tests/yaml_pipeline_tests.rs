//! YAML pipelines executed against JSON sources on disk.

use asyncq::core::cancel::CancellationHandle;
use asyncq::core::config::QueryConfig;
use asyncq::core::Error;
use asyncq::planner::{explain, parse_yaml_pipeline, run_pipeline, GroupCount, Output};
use serde_json::json;
use std::fs;
use std::path::Path;

fn write_source(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("sales.json");
    let rows = json!([
        {"region": "north", "product": "widget", "units": 12, "price": 2.5},
        {"region": "south", "product": "gadget", "units": 3,  "price": 10},
        {"region": "north", "product": "gadget", "units": 7,  "price": 10},
        {"region": "east",  "product": "widget", "units": 1,  "price": 2.5},
        {"region": "south", "product": "widget", "units": 9,  "price": 2.5}
    ]);
    fs::write(&path, serde_json::to_vec_pretty(&rows).unwrap()).unwrap();
    path
}

#[tokio::test]
async fn test_pipeline_resolves_source_relative_to_document() {
    let dir = tempfile::tempdir().unwrap();
    write_source(dir.path());
    let parsed = parse_yaml_pipeline(
        r#"
source: sales.json
steps:
  - op: where
    field: units
    cmp: ">="
    value: 5
  - op: order_by
    key: region
  - op: then_by_descending
    key: units
  - op: select
    fields: [region, units]
"#,
    )
    .unwrap();

    let source = parsed.source_path(None, Some(dir.path())).unwrap();
    let out = run_pipeline(&parsed, &source, &QueryConfig::default(), None)
        .await
        .unwrap();
    assert_eq!(
        out,
        Output::Records(vec![
            json!({"region": "north", "units": 12}),
            json!({"region": "north", "units": 7}),
            json!({"region": "south", "units": 9}),
        ])
    );
}

#[tokio::test]
async fn test_group_count_and_truncation() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path());
    let parsed = parse_yaml_pipeline("terminal: {op: group_count, key: product}").unwrap();

    let mut out = run_pipeline(&parsed, &source, &QueryConfig::default(), None)
        .await
        .unwrap();
    assert_eq!(
        out,
        Output::Groups(vec![
            GroupCount { key: json!("widget"), count: 3 },
            GroupCount { key: json!("gadget"), count: 2 },
        ])
    );

    assert_eq!(out.truncate(1), 1);
    let text = out.to_json(false).unwrap();
    assert_eq!(text, r#"[{"key":"widget","count":3}]"#);
}

#[tokio::test]
async fn test_sum_terminal_over_decimals() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path());
    let parsed = parse_yaml_pipeline(
        "steps: [{op: where, field: product, cmp: '==', value: widget}]\nterminal: {op: sum, field: price}",
    )
    .unwrap();
    let out = run_pipeline(&parsed, &source, &QueryConfig::default(), None)
        .await
        .unwrap();
    assert_eq!(out, Output::Scalar(json!(7.5)));
}

#[tokio::test]
async fn test_missing_source_file_is_a_source_error() {
    let dir = tempfile::tempdir().unwrap();
    let parsed = parse_yaml_pipeline("terminal: {op: count}").unwrap();
    let err = run_pipeline(
        &parsed,
        &dir.path().join("absent.json"),
        &QueryConfig::default(),
        None,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, Error::Source(_)));
    assert!(err.to_string().contains("absent.json"));
}

#[tokio::test]
async fn test_canceled_run_fails_before_reading() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path());
    let parsed = parse_yaml_pipeline("terminal: {op: count}").unwrap();
    let cancel = CancellationHandle::new();
    cancel.cancel();
    let err = run_pipeline(&parsed, &source, &QueryConfig::default(), Some(&cancel))
        .await
        .unwrap_err();
    assert!(err.is_canceled());
}

#[test]
fn test_explain_lists_catalog_calls() {
    let parsed = parse_yaml_pipeline(
        "source: sales.json\nsteps:\n  - {op: take, count: 2}\nterminal: {op: count}\n",
    )
    .unwrap();
    let plan = explain(&parsed);
    assert!(plan.starts_with("source: sales.json (pending)"));
    assert!(plan.contains("take(2)"));
    assert!(plan.ends_with("terminal: count()"));
}

#[test]
fn test_dangling_then_by_is_rejected() {
    let err = parse_yaml_pipeline("steps:\n  - {op: skip, count: 1}\n  - {op: then_by, key: a}\n")
        .unwrap_err();
    assert!(err.to_string().contains("then_by"));
}
