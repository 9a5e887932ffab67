//! Template identities
//!
//! A template is the "kind" of a spawnable entity. Pool reuse matches on
//! [`TemplateId`], which the [`TemplateRegistry`] assigns once per registered
//! name. Display names never take part in equality.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Errors raised by the template registry
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The name is already registered
    #[error("template '{0}' is already registered")]
    DuplicateName(String),

    /// Empty or whitespace-only name
    #[error("template name must not be empty")]
    EmptyName,
}

/// Stable template identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TemplateId(u32);

impl TemplateId {
    /// Raw index of this template in its registry
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// Reference to a registered template
///
/// Two references are the same kind iff their ids are equal; the name is
/// carried only for logging and lookups.
#[derive(Debug, Clone)]
pub struct TemplateRef {
    id: TemplateId,
    name: String,
}

impl TemplateRef {
    /// Template identifier
    pub const fn id(&self) -> TemplateId {
        self.id
    }

    /// Display name given at registration
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for TemplateRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TemplateRef {}

impl Hash for TemplateRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TemplateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.id.0)
    }
}

/// Assigns template identifiers
#[derive(Debug, Default, Clone)]
pub struct TemplateRegistry {
    templates: Vec<TemplateRef>,
    by_name: HashMap<String, TemplateId>,
}

impl TemplateRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new template under a unique name
    pub fn register(&mut self, name: impl Into<String>) -> Result<TemplateRef, TemplateError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TemplateError::EmptyName);
        }
        if self.by_name.contains_key(&name) {
            return Err(TemplateError::DuplicateName(name));
        }

        let id = TemplateId(self.templates.len() as u32);
        let template = TemplateRef { id, name: name.clone() };
        self.by_name.insert(name, id);
        self.templates.push(template.clone());

        log::debug!("Registered template {}", template);
        Ok(template)
    }

    /// Find a template by name
    pub fn lookup(&self, name: &str) -> Option<&TemplateRef> {
        self.by_name.get(name).map(|id| &self.templates[id.0 as usize])
    }

    /// Find a template by id
    pub fn get(&self, id: TemplateId) -> Option<&TemplateRef> {
        self.templates.get(id.0 as usize)
    }

    /// Whether this registry issued the given reference
    pub fn contains(&self, template: &TemplateRef) -> bool {
        self.get(template.id)
            .is_some_and(|known| known.name == template.name)
    }

    /// All registered templates in registration order
    pub fn iter(&self) -> impl Iterator<Item = &TemplateRef> {
        self.templates.iter()
    }

    /// Number of registered templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether no template has been registered
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// A template with a rarity weight
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedTemplate {
    /// Label for this drop entry
    pub name: String,
    /// Template to spawn
    pub template: TemplateRef,
    /// Non-negative relative weight; zero never wins against a positive weight
    pub weight: f32,
}

impl WeightedTemplate {
    /// Create a weighted entry labelled with the template's own name
    pub fn new(template: TemplateRef, weight: f32) -> Self {
        Self {
            name: template.name().to_string(),
            template,
            weight,
        }
    }

    /// Relabel this entry
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
