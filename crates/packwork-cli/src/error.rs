//! CLI error type and its conversion to miette reports.

use std::path::PathBuf;

use miette::Report;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] packwork_config::ConfigError),

    /// Files no rule matched, reported with `--strict`
    #[error("No rule matches {}", .0.join(", "))]
    Unmatched(Vec<String>),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(packwork_config::ConfigError::NotFound(dir)) => miette::miette!(
            "No {} in {}\n\nHint: pass --config <DIR> pointing at a project directory, or omit it to use the built-in presets",
            packwork_config::CONFIG_FILE_NAME,
            dir.display()
        ),
        CliError::Unmatched(files) => miette::miette!(
            "No rule matches {}\n\nHint: add a rule for these file types or drop --strict",
            files.join(", ")
        ),
        _ => miette::miette!("{}", err),
    }
}
