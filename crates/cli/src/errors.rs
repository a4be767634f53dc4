//! CLI error types with miette diagnostics

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    #[error("Failed to read workflow file {}", .path.display())]
    #[diagnostic(
        code(faasr::cli::file_error),
        help("Check file permissions and ensure the path exists")
    )]
    FileError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No workflow file given")]
    #[diagnostic(
        code(faasr::cli::missing_workflow_file),
        help("Pass --workflow-file <PATH> or set FAASR_WORKFLOW_FILE")
    )]
    MissingWorkflowFile,

    #[error("Failed to render output")]
    #[diagnostic(code(faasr::cli::output_error))]
    OutputError {
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Workflow(#[from] faasr_workflow_graph::Error),
}

impl CliError {
    pub fn file_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileError {
            path: path.into(),
            source,
        }
    }
}

/// Result type for CLI commands
pub type CliResult<T> = Result<T, CliError>;
