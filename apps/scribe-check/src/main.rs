//! # Scribe Check
//!
//! Reads post candidates (JSON array or JSON lines) from a file or stdin,
//! validates each one and prints a report per candidate. Exits with status 1
//! when any candidate is invalid.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};

mod config;
mod report;

use config::CheckConfig;
use report::{Report, parse_candidates};

fn main() -> Result<ExitCode> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = CheckConfig::from_env().with_args(std::env::args().skip(1));
    scribe_infra::init_telemetry(&config.telemetry);

    let input = match &config.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let entries = parse_candidates(&input)?;
    tracing::debug!(count = entries.len(), "Parsed post candidates");

    let mut stdout = io::stdout().lock();
    let mut invalid = 0usize;
    for (index, entry) in entries.into_iter().enumerate() {
        let report = Report::check(index, entry);
        if !report.valid {
            invalid += 1;
        }
        writeln!(stdout, "{}", report.render(config.format)?)?;
    }

    tracing::info!(invalid, "Validation finished");

    Ok(if invalid == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
