pub mod check;
pub mod predecessors;

use crate::errors::{CliError, CliResult};
use faasr_workflow_graph::WorkflowDefinition;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One item per line
    Text,
    /// JSON document
    Json,
}

#[derive(Debug, Clone)]
pub enum Command {
    Check {
        workflow_file: PathBuf,
    },
    Predecessors {
        workflow_file: PathBuf,
        action: Option<String>,
        format: OutputFormat,
    },
}

/// Read and parse a workflow file.
#[instrument]
pub fn load_workflow(path: &Path) -> CliResult<WorkflowDefinition> {
    let contents =
        std::fs::read_to_string(path).map_err(|source| CliError::file_error(path, source))?;
    let workflow = WorkflowDefinition::from_json_str(&contents)?;
    debug!(
        actions = workflow.action_list.len(),
        function_invoke = %workflow.function_invoke,
        "Loaded workflow definition"
    );
    Ok(workflow)
}

/// Execute a command and return what should be written to stdout.
#[instrument(skip_all)]
pub fn execute(command: Command) -> CliResult<String> {
    match command {
        Command::Check { workflow_file } => {
            let workflow = load_workflow(&workflow_file)?;
            check::execute_check(&workflow)
        }
        Command::Predecessors {
            workflow_file,
            action,
            format,
        } => {
            let workflow = load_workflow(&workflow_file)?;
            predecessors::execute_predecessors(&workflow, action.as_deref(), format)
        }
    }
}
