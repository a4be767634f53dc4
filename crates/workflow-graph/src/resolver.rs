//! Predecessor resolution with fan-out expansion.
//!
//! A predecessor declared with rank `r > 1` runs as `r` parallel instances,
//! so it is expanded into `p.1` .. `p.r`. The expanded identifiers are what a
//! runtime counts completions against before starting the target.

use crate::{Error, Result, ValidatedGraph};
use indexmap::IndexMap;
use tracing::debug;

/// Successor name -> ordered predecessor names.
pub type PredecessorMap = IndexMap<String, Vec<String>>;

impl ValidatedGraph {
    /// Invert the adjacency graph.
    ///
    /// Predecessors appear in the order their edges were declared. An action
    /// listing the same successor twice appears twice.
    #[must_use]
    pub fn predecessor_map(&self) -> PredecessorMap {
        let mut predecessors = PredecessorMap::new();
        for (from, successors) in self.graph().adjacency() {
            for to in successors {
                predecessors.entry(to.clone()).or_default().push(from.clone());
            }
        }
        predecessors
    }

    /// Immediate predecessors of `target`, ranked ones expanded per instance.
    ///
    /// Graph construction bounds every rank by [`MAX_RANK`](crate::MAX_RANK),
    /// so each predecessor contributes at most that many identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEntryPoint`] if `target` is not a declared
    /// action.
    pub fn resolve(&self, target: &str) -> Result<Vec<String>> {
        if !self.graph().contains_action(target) {
            return Err(Error::invalid_entry_point(target));
        }

        let predecessors = self.predecessor_map();
        let resolved: Vec<String> = predecessors
            .get(target)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .flat_map(|predecessor| self.expand(predecessor))
            .collect();

        debug!(target = %target, predecessors = ?resolved, "Resolved predecessors");
        Ok(resolved)
    }

    /// Expand `name` into one identifier per declared instance.
    fn expand(&self, name: &str) -> Vec<String> {
        match self.graph().rank(name) {
            Some(rank) if rank > 1 => (1..=rank).map(|i| format!("{name}.{i}")).collect(),
            _ => vec![name.to_string()],
        }
    }
}
