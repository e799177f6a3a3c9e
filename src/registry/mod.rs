//! Data dictionary: base types, specification types, code sets and the root
//! message schemas. Built once and shared read-only behind an `Arc`.

pub mod embedded;

use indexmap::IndexMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{PaymsgError, Result};
use crate::types::{BaseType, BaseTypeInfo, CodeSet, RootSchema, SpecificationType};

pub use embedded::embedded_dictionary;

pub const BASE_TYPES_FILE: &str = "base_types.json";
pub const SPEC_TYPES_FILE: &str = "spec_types.json";
pub const CODE_SETS_FILE: &str = "code_sets.json";
pub const SCHEMAS_FILE: &str = "schemas.json";

#[derive(Debug, Clone, Default)]
pub struct SpecDictionary {
    base_types: IndexMap<String, BaseTypeInfo>,
    spec_types: IndexMap<String, SpecificationType>,
    code_sets: IndexMap<String, CodeSet>,
    roots: IndexMap<String, RootSchema>,
}

/// A dangling reference found by [`SpecDictionary::check_integrity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityIssue {
    UnknownLeafType {
        root: String,
        path: String,
        type_name: String,
    },
    MissingCodeSet {
        spec_type: String,
        code_set: String,
    },
    UnresolvedSpecType {
        spec_type: String,
        kind: String,
    },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityIssue::UnknownLeafType {
                root,
                path,
                type_name,
            } => write!(f, "{root}: leaf {path} uses unknown type {type_name}"),
            IntegrityIssue::MissingCodeSet {
                spec_type,
                code_set,
            } => write!(f, "{spec_type} references missing code set {code_set}"),
            IntegrityIssue::UnresolvedSpecType { spec_type, kind } => write!(
                f,
                "{spec_type} has type {kind} which is neither a base type nor a specification type"
            ),
        }
    }
}

impl SpecDictionary {
    /// The dictionary compiled into the binary.
    pub fn embedded() -> Arc<SpecDictionary> {
        embedded_dictionary()
    }

    /// Build a dictionary from the four JSON documents.
    pub fn from_json_parts(
        base_types: &str,
        spec_types: &str,
        code_sets: &str,
        schemas: &str,
    ) -> Result<Self> {
        let base_types: IndexMap<String, BaseTypeInfo> = serde_json::from_str(base_types)
            .map_err(|e| PaymsgError::load(format!("{BASE_TYPES_FILE}: {e}")))?;
        let mut spec_types: IndexMap<String, SpecificationType> =
            serde_json::from_str(spec_types)
                .map_err(|e| PaymsgError::load(format!("{SPEC_TYPES_FILE}: {e}")))?;
        let code_sets: IndexMap<String, CodeSet> = serde_json::from_str(code_sets)
            .map_err(|e| PaymsgError::load(format!("{CODE_SETS_FILE}: {e}")))?;
        let mut roots: IndexMap<String, RootSchema> = serde_json::from_str(schemas)
            .map_err(|e| PaymsgError::load(format!("{SCHEMAS_FILE}: {e}")))?;

        for (name, spec_type) in spec_types.iter_mut() {
            spec_type.name = name.clone();
        }
        for (name, root) in roots.iter_mut() {
            root.name = name.clone();
            if root.element.is_empty() {
                root.element = name.clone();
            }
        }

        let dictionary = Self {
            base_types,
            spec_types,
            code_sets,
            roots,
        };

        let issues = dictionary.check_integrity();
        for issue in &issues {
            tracing::warn!("Dictionary integrity: {}", issue);
        }
        tracing::debug!(
            "Loaded dictionary: {} base types, {} spec types, {} code sets, {} roots ({} integrity issues)",
            dictionary.base_types.len(),
            dictionary.spec_types.len(),
            dictionary.code_sets.len(),
            dictionary.roots.len(),
            issues.len()
        );

        Ok(dictionary)
    }

    /// Load the four dictionary files from `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let read = |file: &str| {
            let path = dir.join(file);
            std::fs::read_to_string(&path)
                .map_err(|e| PaymsgError::load(format!("Cannot read {}: {e}", path.display())))
        };

        Self::from_json_parts(
            &read(BASE_TYPES_FILE)?,
            &read(SPEC_TYPES_FILE)?,
            &read(CODE_SETS_FILE)?,
            &read(SCHEMAS_FILE)?,
        )
    }

    /// Add or replace a spec type, keyed by its name.
    pub fn with_spec_type(mut self, spec_type: SpecificationType) -> Self {
        self.spec_types.insert(spec_type.name.clone(), spec_type);
        self
    }

    pub fn with_code_set(mut self, name: impl Into<String>, code_set: CodeSet) -> Self {
        self.code_sets.insert(name.into(), code_set);
        self
    }

    pub fn with_root(mut self, root: RootSchema) -> Self {
        self.roots.insert(root.name.clone(), root);
        self
    }

    pub fn spec_type(&self, name: &str) -> Option<&SpecificationType> {
        self.spec_types.get(name)
    }

    pub fn base_type_info(&self, name: &str) -> Option<&BaseTypeInfo> {
        self.base_types.get(name)
    }

    pub fn code_set(&self, name: &str) -> Option<&CodeSet> {
        self.code_sets.get(name)
    }

    pub fn root(&self, name: &str) -> Option<&RootSchema> {
        self.roots.get(name)
    }

    pub fn is_root(&self, name: &str) -> bool {
        self.roots.contains_key(name)
    }

    pub fn spec_types(&self) -> impl Iterator<Item = &SpecificationType> {
        self.spec_types.values()
    }

    pub fn base_types(&self) -> impl Iterator<Item = (&str, &BaseTypeInfo)> {
        self.base_types.iter().map(|(name, info)| (name.as_str(), info))
    }

    pub fn code_sets(&self) -> impl Iterator<Item = (&str, &CodeSet)> {
        self.code_sets.iter().map(|(name, set)| (name.as_str(), set))
    }

    pub fn roots(&self) -> impl Iterator<Item = &RootSchema> {
        self.roots.values()
    }

    pub fn root_names(&self) -> impl Iterator<Item = &str> {
        self.roots.keys().map(String::as_str)
    }

    /// True if `name` is listed in the base type table or is a base type the
    /// field validator understands.
    pub fn is_base_type(&self, name: &str) -> bool {
        self.base_types.contains_key(name) || BaseType::parse(name).is_some()
    }

    /// `baseType` if declared, else the `baseType` of the spec type named by
    /// `type` (one level only), else the `type` string itself.
    pub fn effective_base_type<'a>(&'a self, spec_type: &'a SpecificationType) -> &'a str {
        if let Some(base_type) = &spec_type.base_type {
            return base_type;
        }
        if let Some(base_type) = self
            .spec_types
            .get(&spec_type.kind)
            .and_then(|parent| parent.base_type.as_deref())
        {
            return base_type;
        }
        &spec_type.kind
    }

    pub fn check_integrity(&self) -> Vec<IntegrityIssue> {
        let mut issues = Vec::new();

        for spec_type in self.spec_types.values() {
            if let Some(code_set) = &spec_type.code_set {
                if !self.code_sets.contains_key(code_set) {
                    issues.push(IntegrityIssue::MissingCodeSet {
                        spec_type: spec_type.name.clone(),
                        code_set: code_set.clone(),
                    });
                }
            }
            if spec_type.base_type.is_none()
                && !self.is_base_type(&spec_type.kind)
                && !self.spec_types.contains_key(&spec_type.kind)
            {
                issues.push(IntegrityIssue::UnresolvedSpecType {
                    spec_type: spec_type.name.clone(),
                    kind: spec_type.kind.clone(),
                });
            }
        }

        for root in self.roots.values() {
            root.body.walk_leaves(&root.element, &mut |path, leaf| {
                if !self.spec_types.contains_key(&leaf.spec_type)
                    && !self.is_base_type(&leaf.spec_type)
                {
                    issues.push(IntegrityIssue::UnknownLeafType {
                        root: root.name.clone(),
                        path: path.to_string(),
                        type_name: leaf.spec_type.clone(),
                    });
                }
            });
        }

        issues
    }
}
