//! Errors surfaced by the `sketchbook` binary and their exit codes.
//!
//! | code | meaning |
//! |---|---|
//! | 2  | argument parse error (reported by clap) |
//! | 10 | sketch failure: unknown name, bad viewport, broken capacity invariant |
//! | 11 | frame log or run spec file could not be written or read |
//! | 12 | rejected input: `--params` JSON, parameter values, run spec contents |
//! | 13 | JSON output could not be encoded |

use sketchbook_core::SketchError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Sketch(SketchError),

    #[error("{0}")]
    Io(String),

    #[error("cannot read run spec {}: {source}", path.display())]
    SpecFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Input(String),

    #[error("cannot encode output: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Sketch(_) => 10,
            CliError::Io(_) | CliError::SpecFile { .. } => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

/// Frame log failures are I/O and rejected parameters are user input;
/// everything else stays a sketch failure.
impl From<SketchError> for CliError {
    fn from(e: SketchError) -> Self {
        match e {
            SketchError::Io(msg) => CliError::Io(msg),
            e @ SketchError::InvalidParameter { .. } => CliError::Input(e.to_string()),
            other => CliError::Sketch(other),
        }
    }
}
