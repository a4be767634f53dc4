//! Workflow graph validation and predecessor resolution for faasr.
//!
//! A FaaSr workflow is a set of named actions that invoke one another through
//! their `InvokeNext` lists. This crate checks that the resulting graph is
//! well formed and computes which action instances must finish before a
//! given action runs.
//!
//! # Key Types
//!
//! - [`WorkflowDefinition`]: the parsed workflow file
//! - [`WorkflowGraph`]: adjacency list and rank table built from a definition
//! - [`ValidatedGraph`]: a graph that passed cycle and reachability checks
//!
//! # Example
//!
//! ```
//! use faasr_workflow_graph::{Action, WorkflowDefinition, validate_and_resolve};
//!
//! let workflow = WorkflowDefinition::new("sum")
//!     .with_action("start", Action::invoking(["compute(3)"]))
//!     .with_action("compute", Action::invoking(["sum"]))
//!     .with_action("sum", Action::default());
//!
//! let predecessors = validate_and_resolve(&workflow, "sum")?;
//! assert_eq!(predecessors, ["compute.1", "compute.2", "compute.3"]);
//! # Ok::<(), faasr_workflow_graph::Error>(())
//! ```

mod error;
mod graph;
mod reference;
mod resolver;
mod validation;
mod workflow;

pub use error::{Error, Result};
pub use graph::{ROOT_RANK, WorkflowGraph};
pub use reference::{ActionRef, MAX_RANK, parse_reference};
pub use resolver::PredecessorMap;
pub use validation::{DepthFirst, ValidatedGraph, VisitState};
pub use workflow::{Action, ComputeServer, InvokeEntry, WorkflowDefinition};

use tracing::instrument;

/// Build and validate the graph of `workflow`.
///
/// # Errors
///
/// Returns the first of [`Error::RankOutOfRange`],
/// [`Error::AmbiguousRankedPredecessor`],
/// [`Error::NoRoot`], [`Error::CyclicGraph`] or [`Error::UnreachableAction`]
/// encountered.
#[instrument(skip_all, fields(actions = workflow.action_list.len()))]
pub fn validate(workflow: &WorkflowDefinition) -> Result<ValidatedGraph> {
    WorkflowGraph::build(workflow)?.validate()
}

/// Validate `workflow` and resolve the predecessors of `target`.
///
/// The target is checked first, so an undeclared target fails with
/// [`Error::InvalidEntryPoint`] whatever the shape of the graph.
///
/// # Errors
///
/// Returns [`Error::InvalidEntryPoint`] or any error of [`validate`].
#[instrument(skip(workflow))]
pub fn validate_and_resolve(workflow: &WorkflowDefinition, target: &str) -> Result<Vec<String>> {
    if !workflow.contains_action(target) {
        return Err(Error::invalid_entry_point(target));
    }
    validate(workflow)?.resolve(target)
}

impl WorkflowDefinition {
    /// Validate and resolve the predecessors of `FunctionInvoke`.
    ///
    /// # Errors
    ///
    /// See [`validate_and_resolve`].
    pub fn resolve_entry(&self) -> Result<Vec<String>> {
        validate_and_resolve(self, &self.function_invoke)
    }
}
