//! Adjacency and rank construction for workflow graphs.
//!
//! This module flattens every `InvokeNext` entry of a workflow definition,
//! conditional branches included, into an ordered adjacency list and records
//! the declared rank of each successor.

use crate::reference::{MAX_RANK, parse_reference};
use crate::{Error, Result, WorkflowDefinition};
use indexmap::IndexMap;
use tracing::debug;

/// Rank recorded for actions that have successors but are never invoked.
pub const ROOT_RANK: u32 = 0;

/// Adjacency graph and rank table built from a workflow definition.
///
/// Edges keep declaration order and may repeat. Maps are insertion ordered so
/// every walk over the graph is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowGraph {
    /// Declared action names, in declaration order.
    actions: Vec<String>,
    /// Predecessor name -> successor base names.
    adjacency: IndexMap<String, Vec<String>>,
    /// Base name -> declared rank.
    ranks: IndexMap<String, u32>,
}

impl WorkflowGraph {
    /// Build the adjacency graph and rank table for `workflow`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RankOutOfRange`] if a reference declares a rank above
    /// [`MAX_RANK`], or [`Error::AmbiguousRankedPredecessor`] if an action
    /// already recorded with rank > 1 is referenced again.
    pub fn build(workflow: &WorkflowDefinition) -> Result<Self> {
        let mut adjacency: IndexMap<String, Vec<String>> = IndexMap::new();
        let mut ranks: IndexMap<String, u32> = IndexMap::new();

        for (predecessor, action) in &workflow.action_list {
            for reference in action.successor_refs() {
                let child = parse_reference(reference);

                if child.rank > MAX_RANK {
                    return Err(Error::RankOutOfRange {
                        action: child.name,
                        predecessor: predecessor.clone(),
                        rank: child.rank,
                        limit: MAX_RANK,
                    });
                }

                if ranks.get(&child.name).is_some_and(|&rank| rank > 1) {
                    return Err(Error::AmbiguousRankedPredecessor {
                        action: child.name,
                        predecessor: predecessor.clone(),
                    });
                }

                debug!(from = %predecessor, to = %child.name, rank = child.rank, "Recorded edge");
                adjacency
                    .entry(predecessor.clone())
                    .or_default()
                    .push(child.name.clone());
                ranks.insert(child.name, child.rank);
            }
        }

        // Actions with successors that nobody invokes are root candidates
        for predecessor in adjacency.keys() {
            if !ranks.contains_key(predecessor) {
                ranks.insert(predecessor.clone(), ROOT_RANK);
            }
        }

        debug!(
            actions = workflow.action_list.len(),
            predecessors = adjacency.len(),
            ranked = ranks.len(),
            "Built workflow graph"
        );

        Ok(Self {
            actions: workflow.action_list.keys().cloned().collect(),
            adjacency,
            ranks,
        })
    }

    /// Declared action names, in declaration order.
    #[must_use]
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    /// Check if `name` is a declared action.
    #[must_use]
    pub fn contains_action(&self, name: &str) -> bool {
        self.actions.iter().any(|action| action == name)
    }

    /// Successor base names of `name`, in declaration order.
    #[must_use]
    pub fn successors(&self, name: &str) -> &[String] {
        self.adjacency.get(name).map_or(&[], Vec::as_slice)
    }

    /// Recorded rank of `name`, if any.
    ///
    /// Actions with neither incoming nor outgoing edges have no rank.
    #[must_use]
    pub fn rank(&self, name: &str) -> Option<u32> {
        self.ranks.get(name).copied()
    }

    /// The full adjacency map.
    #[must_use]
    pub fn adjacency(&self) -> &IndexMap<String, Vec<String>> {
        &self.adjacency
    }

    /// The full rank table.
    #[must_use]
    pub fn ranks(&self) -> &IndexMap<String, u32> {
        &self.ranks
    }

    /// Root candidates (rank 0), in declaration order.
    pub fn roots(&self) -> impl Iterator<Item = &str> {
        self.actions
            .iter()
            .filter(|action| self.rank(action) == Some(ROOT_RANK))
            .map(String::as_str)
    }

    /// Total number of edges, duplicates included.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }
}
