use super::OutputFormat;
use crate::errors::{CliError, CliResult};
use faasr_workflow_graph::{WorkflowDefinition, validate_and_resolve};
use tracing::{info, instrument};

/// Resolve the predecessors of `action`, or of `FunctionInvoke` when unset.
#[instrument(skip(workflow))]
pub fn execute_predecessors(
    workflow: &WorkflowDefinition,
    action: Option<&str>,
    format: OutputFormat,
) -> CliResult<String> {
    let target = action.unwrap_or(&workflow.function_invoke);
    let predecessors = validate_and_resolve(workflow, target)?;

    info!(
        target = %target,
        count = predecessors.len(),
        "Predecessors resolved"
    );

    match format {
        OutputFormat::Text => Ok(predecessors.join("\n")),
        OutputFormat::Json => serde_json::to_string(&predecessors)
            .map_err(|source| CliError::OutputError { source }),
    }
}
