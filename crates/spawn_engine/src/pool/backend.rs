//! Backend ports
//!
//! The pool never touches engine objects directly. The embedding application
//! implements these traits over its own entity storage.

use crate::foundation::math::Vec3;
use crate::pool::TemplateRef;
use std::fmt::Debug;
use std::hash::Hash;

/// Backend failed to create an entity
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to instantiate '{template}': {reason}")]
pub struct InstantiationError {
    /// Name of the template that could not be created
    pub template: String,
    /// Backend-provided reason
    pub reason: String,
}

impl InstantiationError {
    /// Create an instantiation error for a template
    pub fn new(template: &TemplateRef, reason: impl Into<String>) -> Self {
        Self {
            template: template.name().to_string(),
            reason: reason.into(),
        }
    }
}

/// Creates new entities from templates
pub trait InstantiationService {
    /// Handle the backend hands out for created entities
    type Handle: Copy + Eq + Hash + Debug;

    /// Create an active entity of `template` at `position`
    ///
    /// The backend must remember which template the entity came from.
    fn create(&mut self, template: &TemplateRef, position: Vec3) -> Result<Self::Handle, InstantiationError>;
}

/// Toggles and moves existing entities
pub trait ActivationService<H> {
    /// Activate or deactivate an entity
    fn set_active(&mut self, handle: H, active: bool);

    /// Whether the entity is currently active
    fn is_active(&self, handle: H) -> bool;

    /// Move an entity to a world position
    fn move_to(&mut self, handle: H, position: Vec3);
}

/// A backend that can both create and activate entities
pub trait EntityBackend: InstantiationService + ActivationService<<Self as InstantiationService>::Handle> {}

impl<T> EntityBackend for T where T: InstantiationService + ActivationService<<T as InstantiationService>::Handle> {}
