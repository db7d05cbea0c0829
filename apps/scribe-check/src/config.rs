//! Configuration loaded from environment variables and arguments.

use std::env;
use std::path::PathBuf;

use scribe_infra::TelemetryConfig;

/// How reports are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
}

impl OutputFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "text" => Some(Self::Text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// `None` reads stdin.
    pub input: Option<PathBuf>,
    pub format: OutputFormat,
    pub telemetry: TelemetryConfig,
}

impl CheckConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            input: env::var("SCRIBE_CHECK_INPUT").ok().and_then(input_path),
            format: env::var("SCRIBE_CHECK_FORMAT")
                .ok()
                .and_then(|v| OutputFormat::parse(&v))
                .unwrap_or(OutputFormat::Json),
            telemetry: TelemetryConfig::from_env(),
        }
    }

    /// The first positional argument overrides `SCRIBE_CHECK_INPUT`.
    pub fn with_args(mut self, mut args: impl Iterator<Item = String>) -> Self {
        if let Some(arg) = args.next() {
            self.input = input_path(arg);
        }
        self
    }
}

/// `-` and empty mean stdin.
fn input_path(value: String) -> Option<PathBuf> {
    match value.trim() {
        "" | "-" => None,
        path => Some(PathBuf::from(path)),
    }
}
