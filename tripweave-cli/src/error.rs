//! Error types emitted by the Tripweave CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use tripweave_core::{ParsePreferenceError, PlanError};

/// Errors emitted by the Tripweave CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Name of the missing option.
        field: &'static str,
        /// Environment variable that can supply the option.
        env: &'static str,
    },
    /// The preference name is not one of best, price or duration.
    #[error(transparent)]
    InvalidPreference(#[from] ParsePreferenceError),
    /// Opening the search file failed.
    #[error("failed to open search file at {path:?}: {source}")]
    OpenSearchFile {
        /// Path of the search file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The search file JSON could not be decoded.
    #[error("failed to parse search file JSON at {path:?}: {source}")]
    ParseSearchFile {
        /// Path of the search file.
        path: Utf8PathBuf,
        /// Underlying JSON decoding error.
        #[source]
        source: serde_json::Error,
    },
    /// The planner rejected the request or was cancelled.
    #[error("planning failed: {0}")]
    Plan(#[from] PlanError),
    /// Serializing the command output failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing the command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
