//! Workflow definition model.
//!
//! Mirrors the JSON layout of a FaaSr workflow file. Only `ActionList` and
//! `FunctionInvoke` matter to graph validation; every other field is kept
//! verbatim so the definition can be handed on unchanged.

use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A complete workflow definition.
///
/// `ActionList` keeps declaration order, which decides root selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorkflowDefinition {
    /// Actions keyed by name, in declaration order.
    pub action_list: IndexMap<String, Action>,
    /// The action whose predecessors are resolved.
    pub function_invoke: String,
    /// Optional workflow name used as a deployment prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_name: Option<String>,
    /// Compute servers referenced by `FaaSServer`.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub compute_servers: IndexMap<String, ComputeServer>,
    /// Remaining top-level fields (`DataStores`, ...).
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// A single action of the workflow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Action {
    /// Successors of this action. A single string or branch map is accepted
    /// in place of a list.
    #[serde(default, deserialize_with = "one_or_many")]
    pub invoke_next: Vec<InvokeEntry>,
    /// Name of the deployed function.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,
    /// Key into `ComputeServers`.
    #[serde(
        default,
        rename = "FaaSServer",
        skip_serializing_if = "Option::is_none"
    )]
    pub faas_server: Option<String>,
    /// Remaining fields (`Arguments`, `Type`, ...).
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// One element of an `InvokeNext` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InvokeEntry {
    /// A plain successor reference, `name` or `name(k)`.
    Action(String),
    /// Conditional branches: label to successor references.
    ///
    /// Labels are not evaluated; every branch contributes edges.
    Conditional(IndexMap<String, Vec<String>>),
}

/// A compute server entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComputeServer {
    /// Platform type, e.g. `GitHubActions`, `Lambda`, `OpenWhisk`.
    #[serde(
        default,
        rename = "FaaSType",
        skip_serializing_if = "Option::is_none"
    )]
    pub faas_type: Option<String>,
    /// Remaining fields.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<InvokeEntry>),
    One(InvokeEntry),
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<InvokeEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::Many(entries)) => entries,
        Some(OneOrMany::One(entry)) => vec![entry],
        None => Vec::new(),
    })
}

impl InvokeEntry {
    /// All successor references of this entry, branches flattened in order.
    #[must_use]
    pub fn references(&self) -> Vec<&str> {
        match self {
            Self::Action(reference) => vec![reference.as_str()],
            Self::Conditional(branches) => branches
                .values()
                .flatten()
                .map(String::as_str)
                .collect(),
        }
    }
}

impl Action {
    /// Create an action invoking the given references unconditionally.
    #[must_use]
    pub fn invoking<I, S>(references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            invoke_next: references
                .into_iter()
                .map(|r| InvokeEntry::Action(r.into()))
                .collect(),
            ..Self::default()
        }
    }

    /// Append a conditional entry with the given branches.
    #[must_use]
    pub fn with_branches<I, S>(mut self, branches: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<String>)>,
        S: Into<String>,
    {
        self.invoke_next.push(InvokeEntry::Conditional(
            branches.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ));
        self
    }

    /// Iterate over every successor reference, in declaration order.
    pub fn successor_refs(&self) -> impl Iterator<Item = &str> {
        self.invoke_next.iter().flat_map(InvokeEntry::references)
    }
}

impl WorkflowDefinition {
    /// Create an empty definition targeting `function_invoke`.
    pub fn new(function_invoke: impl Into<String>) -> Self {
        Self {
            action_list: IndexMap::new(),
            function_invoke: function_invoke.into(),
            workflow_name: None,
            compute_servers: IndexMap::new(),
            extra: IndexMap::new(),
        }
    }

    /// Builder-style helper appending an action.
    #[must_use]
    pub fn with_action(mut self, name: impl Into<String>, action: Action) -> Self {
        self.action_list.insert(name.into(), action);
        self
    }

    /// Parse a definition from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDefinition`] if the text is not a valid
    /// workflow definition.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::from)
    }

    /// Check whether `name` is a declared action.
    #[must_use]
    pub fn contains_action(&self, name: &str) -> bool {
        self.action_list.contains_key(name)
    }

    /// Declared action names, in declaration order.
    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.action_list.keys().map(String::as_str)
    }

    /// Distinct platform types of the compute servers, lowercased, in
    /// first-seen order.
    #[must_use]
    pub fn faas_types(&self) -> Vec<String> {
        let mut types: Vec<String> = Vec::new();
        for faas_type in self
            .compute_servers
            .values()
            .filter_map(|server| server.faas_type.as_deref())
        {
            let lowered = faas_type.to_lowercase();
            if !types.contains(&lowered) {
                types.push(lowered);
            }
        }
        types
    }
}
