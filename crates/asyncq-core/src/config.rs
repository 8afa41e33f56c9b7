//! Settings that the binary layer and pipeline runner can serialize/deserialize.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Tracing filter directive installed by the CLI (e.g. `"warn"`, `"asyncq_exec=trace"`).
    pub log_filter: String,

    /// Pretty-print JSON output.
    pub pretty: bool,

    /// When set, non-numeric values reaching a numeric terminal fail with
    /// `InvalidArgument`. Otherwise they count as absent and are skipped.
    pub strict_numbers: bool,

    /// Upper bound on records printed by the CLI.
    pub max_output: Option<usize>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            log_filter: "warn".to_string(),
            pretty: true,
            strict_numbers: false,
            max_output: None,
        }
    }
}

impl QueryConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `ASYNCQ_LOG`: tracing filter directive
    /// - `ASYNCQ_PRETTY`: `true`/`false`
    /// - `ASYNCQ_STRICT_NUMBERS`: `true`/`false`
    /// - `ASYNCQ_MAX_OUTPUT`: record cap for printed output
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("ASYNCQ_LOG") {
            if !s.trim().is_empty() {
                cfg.log_filter = s;
            }
        }

        if let Ok(s) = std::env::var("ASYNCQ_PRETTY") {
            if let Ok(v) = s.parse::<bool>() {
                cfg.pretty = v;
            }
        }

        if let Ok(s) = std::env::var("ASYNCQ_STRICT_NUMBERS") {
            if let Ok(v) = s.parse::<bool>() {
                cfg.strict_numbers = v;
            }
        }

        if let Ok(s) = std::env::var("ASYNCQ_MAX_OUTPUT") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.max_output = Some(v);
            }
        }

        cfg
    }

    /// Layer a pipeline document's overrides on top of this config.
    pub fn apply(&mut self, doc: &PipelineConfig) {
        if let Some(filter) = &doc.log_filter {
            self.log_filter = filter.clone();
        }
        if let Some(pretty) = doc.pretty {
            self.pretty = pretty;
        }
        if let Some(strict) = doc.strict_numbers {
            self.strict_numbers = strict;
        }
        if let Some(max) = doc.max_output {
            self.max_output = Some(max);
        }
    }
}

/// Optional overrides carried inside a pipeline document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub log_filter: Option<String>,
    pub pretty: Option<bool>,
    pub strict_numbers: Option<bool>,
    pub max_output: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_overrides_defaults() {
        let mut cfg = QueryConfig::default();
        cfg.apply(&PipelineConfig {
            strict_numbers: Some(true),
            max_output: Some(5),
            ..Default::default()
        });
        assert!(cfg.strict_numbers);
        assert_eq!(cfg.max_output, Some(5));
        assert_eq!(cfg.log_filter, "warn");
        assert!(cfg.pretty);
    }

    #[test]
    fn config_round_trips_through_json() {
        let cfg = QueryConfig {
            max_output: Some(10),
            ..Default::default()
        };
        let text = serde_json::to_string(&cfg).unwrap();
        let back: QueryConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }
}
