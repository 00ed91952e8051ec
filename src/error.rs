//! Fatal error taxonomy.
//!
//! Per-case anomalies are not errors: they are logged and skipped by the
//! aligner. Only problems that prevent any comparison end up here.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a comparison run.
#[derive(Error, Debug)]
pub enum CrosscheckError {
    #[error("Could not read results file {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in results file: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Results file missing required structure: no `{0}` section")]
    MissingSection(&'static str),

    #[error("Malformed record in `{section}`: {source}")]
    InvalidRecord {
        section: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CrosscheckError>;
