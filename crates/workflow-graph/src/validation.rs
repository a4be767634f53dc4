//! Cycle and reachability validation for workflow graphs.
//!
//! Validation walks the graph depth-first from a single root, using an
//! explicit stack so that deep workflows cannot exhaust the call stack.
//! The first back-edge aborts the walk. Afterwards every declared action must
//! have been visited.
//!
//! Only one root is traversed: the first action in declaration order with
//! rank 0. Actions reachable solely from a later root are reported as
//! unreachable.

use crate::graph::ROOT_RANK;
use crate::{Error, Result, WorkflowGraph};
use indexmap::IndexMap;
use tracing::{debug, info};

/// Traversal state of a single node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitState {
    /// Not reached yet.
    #[default]
    Unvisited,
    /// On the active traversal path.
    OnStack,
    /// Visited and all of its successors processed.
    Finished,
}

/// A stack frame: the node and the index of its next successor to examine.
#[derive(Debug, Clone, Copy)]
struct Frame<'g> {
    node: &'g str,
    next: usize,
}

/// Depth-first walk over a [`WorkflowGraph`].
#[derive(Debug)]
pub struct DepthFirst<'g> {
    graph: &'g WorkflowGraph,
    states: IndexMap<&'g str, VisitState>,
}

impl<'g> DepthFirst<'g> {
    /// Create a walk with every node unvisited.
    #[must_use]
    pub fn new(graph: &'g WorkflowGraph) -> Self {
        Self {
            graph,
            states: IndexMap::new(),
        }
    }

    /// Current state of `name`.
    #[must_use]
    pub fn state(&self, name: &str) -> VisitState {
        self.states.get(name).copied().unwrap_or_default()
    }

    /// Names in the order they were first reached.
    pub fn discovered(&self) -> impl Iterator<Item = &'g str> + '_ {
        self.states.keys().copied()
    }

    /// Walk everything reachable from `root`.
    ///
    /// Nodes already finished by an earlier call are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CyclicGraph`] naming the first back-edge found.
    pub fn run(&mut self, root: &'g str) -> Result<()> {
        if self.state(root) != VisitState::Unvisited {
            return Ok(());
        }

        let graph = self.graph;
        self.states.insert(root, VisitState::OnStack);
        let mut stack = vec![Frame {
            node: root,
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let node = frame.node;
            let Some(child) = graph.successors(node).get(frame.next) else {
                self.states.insert(node, VisitState::Finished);
                stack.pop();
                continue;
            };
            frame.next += 1;

            match self.state(child) {
                VisitState::OnStack => {
                    return Err(Error::cyclic(node, child.as_str()));
                }
                VisitState::Finished => {}
                VisitState::Unvisited => {
                    self.states.insert(child.as_str(), VisitState::OnStack);
                    stack.push(Frame {
                        node: child.as_str(),
                        next: 0,
                    });
                }
            }
        }

        Ok(())
    }
}

/// A workflow graph that passed cycle and reachability validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedGraph {
    graph: WorkflowGraph,
    root: String,
}

impl ValidatedGraph {
    /// The underlying graph.
    #[must_use]
    pub fn graph(&self) -> &WorkflowGraph {
        &self.graph
    }

    /// The root the traversal started from.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Consume the wrapper and return the graph.
    #[must_use]
    pub fn into_inner(self) -> WorkflowGraph {
        self.graph
    }
}

impl WorkflowGraph {
    /// The traversal root: first declared action with rank 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRoot`] if no declared action has rank 0.
    pub fn select_root(&self) -> Result<&str> {
        self.actions()
            .iter()
            .find(|action| self.rank(action) == Some(ROOT_RANK))
            .map(String::as_str)
            .ok_or(Error::NoRoot)
    }

    /// Validate the graph and wrap it as a [`ValidatedGraph`].
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NoRoot`], [`Error::CyclicGraph`] or
    /// [`Error::UnreachableAction`], whichever is found first.
    pub fn validate(self) -> Result<ValidatedGraph> {
        let root = {
            let root = self.select_root()?;
            debug!(root = %root, "Selected traversal root");

            let mut walk = DepthFirst::new(&self);
            walk.run(root)?;

            if let Some(action) = self
                .actions()
                .iter()
                .find(|action| walk.state(action) != VisitState::Finished)
            {
                return Err(Error::UnreachableAction {
                    action: action.clone(),
                    root: root.to_string(),
                });
            }
            root.to_string()
        };

        info!(
            root = %root,
            actions = self.actions().len(),
            edges = self.edge_count(),
            "Workflow graph validated"
        );

        Ok(ValidatedGraph { graph: self, root })
    }
}
