use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Cardinality;

/// A node of a message specification tree.
///
/// Serialized externally tagged, so a branch is `{"branch": {...}}` and a
/// leaf is `{"leaf": {"type": ..., "cardinality": ...}}`. Field names inside
/// a branch never collide with the leaf keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaNode {
    Leaf(Leaf),
    Branch(Branch),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Leaf {
    /// Specification type name, or a raw base type name.
    #[serde(rename = "type")]
    pub spec_type: String,
    pub cardinality: Cardinality,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Mapping of field name to child node, kept in definition order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Branch {
    pub children: IndexMap<String, SchemaNode>,
}

/// A named top-level message shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootSchema {
    /// Filled from the registry key after loading.
    #[serde(skip)]
    pub name: String,

    /// Payload top-level key this root validates. Variant roots share the
    /// element of their generic root.
    #[serde(default)]
    pub element: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub body: Branch,
}

impl Leaf {
    pub fn new(spec_type: impl Into<String>, cardinality: Cardinality) -> Self {
        Self {
            spec_type: spec_type.into(),
            cardinality,
            description: None,
        }
    }

    pub fn required(spec_type: impl Into<String>) -> Self {
        Self::new(spec_type, Cardinality::REQUIRED)
    }

    pub fn optional(spec_type: impl Into<String>) -> Self {
        Self::new(spec_type, Cardinality::OPTIONAL)
    }
}

impl Branch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_leaf(mut self, name: impl Into<String>, leaf: Leaf) -> Self {
        self.children.insert(name.into(), SchemaNode::Leaf(leaf));
        self
    }

    pub fn with_branch(mut self, name: impl Into<String>, branch: Branch) -> Self {
        self.children.insert(name.into(), SchemaNode::Branch(branch));
        self
    }

    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.children.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    /// True if any leaf below this branch, at any depth, is required.
    pub fn has_required_children(&self) -> bool {
        self.children.values().any(|child| match child {
            SchemaNode::Leaf(leaf) => leaf.cardinality.is_required(),
            SchemaNode::Branch(branch) => branch.has_required_children(),
        })
    }

    /// Visit every leaf with its dotted path relative to `prefix`.
    pub fn walk_leaves<'a>(&'a self, prefix: &str, visit: &mut dyn FnMut(&str, &'a Leaf)) {
        for (name, child) in &self.children {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}.{name}")
            };
            match child {
                SchemaNode::Leaf(leaf) => visit(&path, leaf),
                SchemaNode::Branch(branch) => branch.walk_leaves(&path, visit),
            }
        }
    }

    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        self.walk_leaves("", &mut |_, _| count += 1);
        count
    }
}

impl RootSchema {
    pub fn new(name: impl Into<String>, body: Branch) -> Self {
        let name = name.into();
        Self {
            element: name.clone(),
            name,
            description: None,
            body,
        }
    }

    pub fn with_element(mut self, element: impl Into<String>) -> Self {
        self.element = element.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl fmt::Display for RootSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.element != self.name {
            write!(f, " (element {})", self.element)?;
        }
        if let Some(description) = &self.description {
            write!(f, " - {description}")?;
        }
        Ok(())
    }
}
