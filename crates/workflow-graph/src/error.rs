//! Error types for workflow graph operations.

use miette::Diagnostic;
use thiserror::Error;

/// Result type for workflow graph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating a workflow graph.
///
/// Every variant is terminal for the current validation run. The first
/// violation found is reported and no partial result is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum Error {
    /// The requested action is not declared in the `ActionList`.
    #[error("FunctionInvoke '{action}' does not refer to a declared action")]
    #[diagnostic(
        code(faasr::graph::invalid_entry_point),
        help("FunctionInvoke must name one of the keys of ActionList")
    )]
    InvalidEntryPoint {
        /// The undeclared action name.
        action: String,
    },

    /// An action with rank greater than one is targeted by a second edge.
    #[error("action '{action}' has rank > 1 and cannot have multiple predecessors (second edge from '{predecessor}')")]
    #[diagnostic(
        code(faasr::graph::ambiguous_ranked_predecessor),
        help("a ranked action fans out from exactly one parent; remove the extra InvokeNext reference")
    )]
    AmbiguousRankedPredecessor {
        /// The ranked action receiving the extra edge.
        action: String,
        /// The action declaring the extra edge.
        predecessor: String,
    },

    /// A successor reference declares more instances than [`MAX_RANK`].
    ///
    /// [`MAX_RANK`]: crate::MAX_RANK
    #[error("action '{action}' is invoked with rank {rank}, above the limit of {limit}")]
    #[diagnostic(
        code(faasr::graph::rank_out_of_range),
        help("lower the rank in the InvokeNext reference of '{predecessor}'")
    )]
    RankOutOfRange {
        /// The ranked action.
        action: String,
        /// The action declaring the reference.
        predecessor: String,
        /// Declared rank.
        rank: u32,
        /// Largest accepted rank.
        limit: u32,
    },

    /// No action qualifies as a traversal root.
    #[error("no initial action: every action with successors is itself invoked by another action")]
    #[diagnostic(
        code(faasr::graph::no_root),
        help("the workflow needs one action that no other action invokes")
    )]
    NoRoot,

    /// A back-edge was found during traversal.
    #[error("function loop found from '{from}' to '{to}'")]
    #[diagnostic(code(faasr::graph::cyclic_graph))]
    CyclicGraph {
        /// Source of the offending edge.
        from: String,
        /// Target of the offending edge, already on the traversal stack.
        to: String,
    },

    /// An action was never visited from the selected root.
    #[error("unreachable action '{action}' (traversal started at '{root}')")]
    #[diagnostic(
        code(faasr::graph::unreachable_action),
        help("only one initial action is traversed; actions reachable solely from another initial action are reported here")
    )]
    UnreachableAction {
        /// The unvisited action.
        action: String,
        /// The root the traversal started from.
        root: String,
    },

    /// The workflow definition could not be parsed.
    #[error("invalid workflow definition: {message}")]
    #[diagnostic(code(faasr::graph::invalid_definition))]
    InvalidDefinition {
        /// Parser error message.
        message: String,
    },
}

impl Error {
    /// Create an [`Error::InvalidEntryPoint`] for the given action.
    pub fn invalid_entry_point(action: impl Into<String>) -> Self {
        Self::InvalidEntryPoint {
            action: action.into(),
        }
    }

    /// Create an [`Error::CyclicGraph`] for the edge `from -> to`.
    pub fn cyclic(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::CyclicGraph {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidDefinition {
            message: err.to_string(),
        }
    }
}
