use crate::errors::CliResult;
use faasr_workflow_graph::{WorkflowDefinition, validate};
use tracing::{info, instrument, warn};

/// Platform type names the deployment tooling recognizes, lowercased.
const KNOWN_PLATFORMS: &[&str] = &[
    "lambda",
    "aws_lambda",
    "aws",
    "githubactions",
    "github_actions",
    "github",
    "openwhisk",
    "open_whisk",
    "ow",
];

/// Platform types that no deployment target recognizes.
fn unknown_platforms(platforms: &[String]) -> Vec<&str> {
    platforms
        .iter()
        .map(String::as_str)
        .filter(|platform| !KNOWN_PLATFORMS.contains(platform))
        .collect()
}

/// Validate the workflow graph and summarize what a deployment would target.
#[instrument(skip_all, fields(workflow = workflow.workflow_name.as_deref().unwrap_or("")))]
pub fn execute_check(workflow: &WorkflowDefinition) -> CliResult<String> {
    let validated = validate(workflow)?;

    let mut lines = vec![
        "Workflow validation passed - no cycles or unreachable states found".to_string(),
        format!("Initial action: {}", validated.root()),
    ];

    let other_roots: Vec<&str> = validated
        .graph()
        .roots()
        .filter(|root| *root != validated.root())
        .collect();
    if !other_roots.is_empty() {
        lines.push(format!("Other initial actions: {}", other_roots.join(", ")));
    }

    let platforms = workflow.faas_types();
    if platforms.is_empty() {
        warn!("No FaaSType declared in ComputeServers; nothing can be deployed");
        lines.push("FaaS platforms: none declared".to_string());
    } else {
        lines.push(format!("FaaS platforms: {}", platforms.join(", ")));
    }

    let unknown = unknown_platforms(&platforms);
    for platform in &unknown {
        warn!(platform = %platform, "Unknown FaaSType will be skipped at deployment");
    }
    if !unknown.is_empty() {
        lines.push(format!("Unknown FaaS platforms: {}", unknown.join(", ")));
    }

    info!(
        root = %validated.root(),
        platforms = platforms.len(),
        "Workflow check completed"
    );

    Ok(lines.join("\n"))
}
