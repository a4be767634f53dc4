//! Property-based tests for workflow graph invariants.
//!
//! These tests verify the behavioral contracts of validation and resolution:
//! - Well-formed graphs resolve to the expected, rank-expanded predecessors
//! - Back-edges reachable from the root are always rejected
//! - Unreachable actions and unknown targets are always rejected
//! - The verdict agrees with petgraph's cycle detection

#![allow(clippy::unwrap_used, clippy::expect_used)]

use faasr_workflow_graph::{
    Action, Error, WorkflowDefinition, validate, validate_and_resolve,
};
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::DiGraph;
use proptest::prelude::*;
use proptest::sample::Index;

// =============================================================================
// Generated workflows
// =============================================================================

/// A single-rooted DAG: node 0 is the root, every other node has at least one
/// parent with a lower index.
#[derive(Debug, Clone)]
struct GeneratedWorkflow {
    names: Vec<String>,
    /// Distinct, ascending parent indices per node.
    parents: Vec<Vec<usize>>,
    /// Rank drawn for each node; only applied to single-parent nodes.
    ranks: Vec<u32>,
    /// Extra edges appended after the generated ones.
    extra_edges: Vec<(usize, usize)>,
}

impl GeneratedWorkflow {
    fn new(parents: Vec<Vec<usize>>, ranks: Vec<u32>) -> Self {
        let names = (0..parents.len()).map(|i| format!("action_{i}")).collect();
        Self {
            names,
            parents,
            ranks,
            extra_edges: Vec::new(),
        }
    }

    fn without_ranks(mut self) -> Self {
        self.ranks.iter_mut().for_each(|rank| *rank = 1);
        self
    }

    /// Rank a node is declared with by its parent, 1 if unranked.
    fn declared_rank(&self, node: usize) -> u32 {
        if self.parents[node].len() == 1 {
            self.ranks[node]
        } else {
            1
        }
    }

    fn reference(&self, node: usize) -> String {
        match self.declared_rank(node) {
            rank if rank > 1 => format!("{}({rank})", self.names[node]),
            _ => self.names[node].clone(),
        }
    }

    fn definition(&self, target: &str) -> WorkflowDefinition {
        let mut workflow = WorkflowDefinition::new(target);
        for (node, name) in self.names.iter().enumerate() {
            let mut next: Vec<String> = (node + 1..self.names.len())
                .filter(|child| self.parents[*child].contains(&node))
                .map(|child| self.reference(child))
                .collect();
            next.extend(
                self.extra_edges
                    .iter()
                    .filter(|(from, _)| *from == node)
                    .map(|(_, to)| self.names[*to].clone()),
            );
            workflow = workflow.with_action(name.clone(), Action::invoking(next));
        }
        workflow
    }

    /// Expected resolution of `node`, in parent declaration order.
    fn expected_predecessors(&self, node: usize) -> Vec<String> {
        self.parents[node]
            .iter()
            .flat_map(|&parent| match (parent, self.declared_rank(parent)) {
                (0, _) | (_, 0..=1) => vec![self.names[parent].clone()],
                (_, rank) => (1..=rank)
                    .map(|i| format!("{}.{i}", self.names[parent]))
                    .collect(),
            })
            .collect()
    }

    /// Nodes on the first-parent chain from `node` up to, not including, the root.
    fn ancestor_chain(&self, node: usize) -> Vec<usize> {
        let mut chain = vec![node];
        let mut current = node;
        while let Some(&parent) = self.parents[current].first() {
            if parent == 0 {
                break;
            }
            chain.push(parent);
            current = parent;
        }
        chain
    }
}

// =============================================================================
// Strategies for generating test data
// =============================================================================

/// Generate a single-rooted DAG with `min_actions..=max_actions` actions.
fn dag_strategy(
    min_actions: usize,
    max_actions: usize,
) -> impl Strategy<Value = GeneratedWorkflow> {
    (min_actions..=max_actions).prop_flat_map(|count| {
        let parents: Vec<BoxedStrategy<Vec<usize>>> = (0..count)
            .map(|i| {
                if i == 0 {
                    Just(vec![]).boxed()
                } else {
                    proptest::collection::vec(0..i, 1..=i.min(3))
                        .prop_map(|mut parents| {
                            parents.sort_unstable();
                            parents.dedup();
                            parents
                        })
                        .boxed()
                }
            })
            .collect();

        (parents, proptest::collection::vec(1..=4_u32, count))
            .prop_map(|(parents, ranks)| GeneratedWorkflow::new(parents, ranks))
    })
}

/// Generate a DAG plus one back-edge onto the first-parent chain of a node.
fn cyclic_strategy() -> impl Strategy<Value = GeneratedWorkflow> {
    (dag_strategy(2, 12), any::<Index>(), any::<Index>()).prop_map(|(dag, from, to)| {
        let mut workflow = dag.without_ranks();
        let from = from.index(workflow.names.len() - 1) + 1;
        let chain = workflow.ancestor_chain(from);
        let to = chain[to.index(chain.len())];
        workflow.extra_edges.push((from, to));
        workflow
    })
}

/// Generate an arbitrary unranked edge list over `1..=7` actions.
fn arbitrary_graph_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1..=7_usize).prop_flat_map(|count| {
        (
            Just(count),
            proptest::collection::vec((0..count, 0..count), 0..=12),
        )
    })
}

fn arbitrary_definition(count: usize, edges: &[(usize, usize)]) -> WorkflowDefinition {
    (0..count).fold(WorkflowDefinition::new("n0"), |workflow, node| {
        let next = edges
            .iter()
            .filter(|(from, _)| *from == node)
            .map(|(_, to)| format!("n{to}"));
        workflow.with_action(format!("n{node}"), Action::invoking(next))
    })
}

// =============================================================================
// Property Tests: Resolution
// =============================================================================

proptest! {
    /// Contract: single-rooted, fully reachable DAGs always validate.
    #[test]
    fn dags_validate(workflow in dag_strategy(1, 20)) {
        let definition = workflow.definition("action_0");
        // A lone action has no edges and therefore no root
        if workflow.names.len() == 1 {
            prop_assert_eq!(validate(&definition).unwrap_err(), Error::NoRoot);
        } else {
            let validated = validate(&definition).expect("DAG should validate");
            prop_assert_eq!(validated.root(), "action_0");
        }
    }

    /// Contract: resolution expands ranked predecessors in declaration order
    /// and its length is the sum of predecessor instance counts.
    #[test]
    fn resolution_matches_expected_expansion(
        workflow in dag_strategy(2, 15),
        target in any::<Index>(),
    ) {
        let target = target.index(workflow.names.len());
        let definition = workflow.definition(&workflow.names[target]);

        let resolved = validate_and_resolve(&definition, &workflow.names[target])
            .expect("DAG should resolve");
        let expected = workflow.expected_predecessors(target);

        let instances: usize = workflow.parents[target]
            .iter()
            .map(|&parent| match workflow.declared_rank(parent) {
                rank if parent != 0 && rank > 1 => rank as usize,
                _ => 1,
            })
            .sum();

        prop_assert_eq!(resolved.len(), instances);
        prop_assert_eq!(resolved, expected);
    }

    /// Contract: validation and resolution are deterministic.
    #[test]
    fn resolution_is_idempotent(workflow in dag_strategy(2, 15), target in any::<Index>()) {
        let target = &workflow.names[target.index(workflow.names.len())];
        let definition = workflow.definition(target);

        let first = validate_and_resolve(&definition, target);
        let second = validate_and_resolve(&definition, target);
        prop_assert_eq!(first, second);
    }

    /// Contract: an undeclared target is rejected whatever the graph looks like.
    #[test]
    fn unknown_target_is_rejected((count, edges) in arbitrary_graph_strategy()) {
        let definition = arbitrary_definition(count, &edges);
        prop_assert_eq!(
            validate_and_resolve(&definition, "not_declared").unwrap_err(),
            Error::invalid_entry_point("not_declared")
        );
    }
}

// =============================================================================
// Property Tests: Cycle and Reachability Detection
// =============================================================================

proptest! {
    /// Contract: a back-edge reachable from the root is always reported.
    #[test]
    fn back_edges_are_rejected(workflow in cyclic_strategy()) {
        let definition = workflow.definition("action_0");
        let err = validate(&definition).unwrap_err();
        prop_assert!(
            matches!(err, Error::CyclicGraph { .. }),
            "expected a cycle error, got {:?}",
            err
        );
    }

    /// Contract: an action outside the root's reach is always reported.
    #[test]
    fn orphan_action_is_unreachable(workflow in dag_strategy(2, 15)) {
        let definition = workflow
            .definition("action_0")
            .with_action("orphan", Action::default());

        prop_assert_eq!(
            validate(&definition).unwrap_err(),
            Error::UnreachableAction {
                action: "orphan".to_string(),
                root: "action_0".to_string(),
            }
        );
    }

    /// Contract: the verdict never contradicts petgraph's cycle detection.
    #[test]
    fn verdict_agrees_with_petgraph((count, edges) in arbitrary_graph_strategy()) {
        let definition = arbitrary_definition(count, &edges);

        let mut graph = DiGraph::<(), ()>::new();
        let nodes: Vec<_> = (0..count).map(|_| graph.add_node(())).collect();
        for &(from, to) in &edges {
            graph.add_edge(nodes[from], nodes[to], ());
        }
        let cyclic = is_cyclic_directed(&graph);

        match validate(&definition) {
            Ok(_) => prop_assert!(!cyclic, "validated graph must be acyclic"),
            Err(Error::CyclicGraph { .. }) => prop_assert!(cyclic, "reported cycle must exist"),
            Err(_) => {}
        }
    }
}
