//! asyncq CLI: run, validate and explain YAML pipelines over JSON records.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use asyncq_core::cancel::CancellationHandle;
use asyncq_core::config::{PipelineConfig, QueryConfig};
use asyncq_planner::{explain, parse_yaml_pipeline, run_pipeline, ParsedPipeline};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "asyncq")]
#[command(about = "Deferred query pipelines over JSON records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a pipeline from a YAML file and print its JSON output
    Run {
        /// Path to the pipeline YAML file
        #[arg(short, long)]
        pipeline: PathBuf,

        /// JSON source file (overrides the pipeline's `source`)
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Fail on non-numeric values in numeric terminals
        #[arg(long)]
        strict_numbers: bool,

        /// Print at most N records or groups
        #[arg(long)]
        max_output: Option<usize>,

        /// Single-line JSON output
        #[arg(long)]
        compact: bool,

        /// Tracing filter directive (e.g. `debug`, `asyncq_exec=trace`)
        #[arg(long)]
        log_level: Option<String>,
    },

    /// Validate a pipeline YAML file (structure check)
    Validate {
        /// Path to the pipeline YAML file
        #[arg(short, long)]
        pipeline: PathBuf,
    },

    /// Show the operator chain a pipeline resolves to
    Explain {
        /// Path to the pipeline YAML file
        #[arg(short, long)]
        pipeline: PathBuf,
    },
}

/// Flags that override every other configuration layer.
#[derive(Debug, Default)]
struct RunOverrides {
    strict_numbers: bool,
    max_output: Option<usize>,
    compact: bool,
    log_level: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            pipeline,
            source,
            strict_numbers,
            max_output,
            compact,
            log_level,
        } => {
            let overrides = RunOverrides {
                strict_numbers,
                max_output,
                compact,
                log_level,
            };
            if let Err(e) = run(&pipeline, source.as_deref(), &overrides) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Validate { pipeline } => {
            if let Err(e) = load(&pipeline) {
                eprintln!("Validation failed: {}", e);
                std::process::exit(1);
            }
            println!("✓ Pipeline is valid");
        }
        Commands::Explain { pipeline } => match load(&pipeline) {
            Ok(parsed) => println!("{}", explain(&parsed)),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    }
}

fn load(pipeline_path: &Path) -> Result<ParsedPipeline, Box<dyn std::error::Error>> {
    let yaml_content = fs::read_to_string(pipeline_path)?;
    Ok(parse_yaml_pipeline(&yaml_content)?)
}

/// Env first, then the pipeline's `config:` block, then CLI flags.
fn resolve_config(doc: &PipelineConfig, overrides: &RunOverrides) -> QueryConfig {
    let mut config = QueryConfig::from_env();
    config.apply(doc);
    if overrides.strict_numbers {
        config.strict_numbers = true;
    }
    if let Some(max) = overrides.max_output {
        config.max_output = Some(max);
    }
    if overrides.compact {
        config.pretty = false;
    }
    if let Some(level) = &overrides.log_level {
        config.log_filter = level.clone();
    }
    config
}

/// An explicit `--log-level` wins, then `RUST_LOG`, then the config value.
fn init_tracing(config: &QueryConfig, explicit: bool) {
    let filter = if explicit {
        EnvFilter::new(&config.log_filter)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(
    pipeline_path: &Path,
    source: Option<&Path>,
    overrides: &RunOverrides,
) -> Result<(), Box<dyn std::error::Error>> {
    let parsed = load(pipeline_path)?;
    let config = resolve_config(&parsed.config, overrides);
    init_tracing(&config, overrides.log_level.is_some());

    let source_path = parsed.source_path(source, pipeline_path.parent())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let cancel = CancellationHandle::new();
    let mut output = runtime.block_on(async {
        let watcher = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::warn!("interrupt received; canceling pending operators");
                    cancel.cancel();
                }
            })
        };
        let result = run_pipeline(&parsed, &source_path, &config, Some(&cancel)).await;
        watcher.abort();
        result
    })?;

    if let Some(max) = config.max_output {
        let dropped = output.truncate(max);
        if dropped > 0 {
            tracing::info!(dropped, "output truncated by max_output");
        }
    }
    println!("{}", output.to_json(config.pretty)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load, resolve_config, RunOverrides};
    use asyncq_core::config::PipelineConfig;

    #[test]
    fn pipeline_config_overrides_env_defaults() {
        let doc = PipelineConfig {
            strict_numbers: Some(true),
            max_output: Some(7),
            ..Default::default()
        };
        let config = resolve_config(&doc, &RunOverrides::default());
        assert!(config.strict_numbers);
        assert_eq!(config.max_output, Some(7));
    }

    #[test]
    fn cli_overrides_higher_priority_than_config() {
        let doc = PipelineConfig {
            max_output: Some(7),
            pretty: Some(true),
            log_filter: Some("info".into()),
            ..Default::default()
        };
        let overrides = RunOverrides {
            max_output: Some(2),
            compact: true,
            log_level: Some("trace".into()),
            ..Default::default()
        };
        let config = resolve_config(&doc, &overrides);
        assert_eq!(config.max_output, Some(2));
        assert!(!config.pretty);
        assert_eq!(config.log_filter, "trace");
    }

    #[test]
    fn load_reports_bad_documents() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("ok.yaml");
        std::fs::write(&good, "source: in.json\nterminal: {op: count}\n").unwrap();
        assert!(load(&good).is_ok());

        let bad = dir.path().join("bad.yaml");
        std::fs::write(&bad, "steps: [{op: then_by, key: a}]\n").unwrap();
        let err = load(&bad).unwrap_err();
        assert!(err.to_string().contains("order_by"));

        assert!(load(&dir.path().join("missing.yaml")).is_err());
    }
}
