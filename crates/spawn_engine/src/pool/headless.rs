//! In-memory backend
//!
//! Stores entities in a slot map without any engine behind them. Used by the
//! demo harness and by tests, and as a reference for real backends.

use crate::foundation::collections::{EntityKey, HandleMap};
use crate::foundation::math::Vec3;
use crate::pool::{ActivationService, InstantiationError, InstantiationService, TemplateId, TemplateRef};

/// Entity record kept by [`HeadlessBackend`]
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessEntity {
    /// Template the entity was created from
    pub template: TemplateId,
    /// Current world position
    pub position: Vec3,
    /// Whether the entity is active
    pub active: bool,
}

/// Slot-map backed entity storage
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    entities: HandleMap<HeadlessEntity>,
    capacity: Option<usize>,
}

impl HeadlessBackend {
    /// Create an unbounded backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that refuses to create more than `capacity` entities
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            entities: HandleMap::with_capacity_and_key(capacity),
            capacity: Some(capacity),
        }
    }

    /// Look up an entity
    pub fn entity(&self, key: EntityKey) -> Option<&HeadlessEntity> {
        self.entities.get(key)
    }

    /// Current position of an entity
    pub fn position(&self, key: EntityKey) -> Option<Vec3> {
        self.entities.get(key).map(|e| e.position)
    }

    /// Number of entities ever created
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether no entity has been created
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of active entities
    pub fn active_count(&self) -> usize {
        self.entities.values().filter(|e| e.active).count()
    }

    /// Iterate over every entity
    pub fn iter(&self) -> impl Iterator<Item = (EntityKey, &HeadlessEntity)> {
        self.entities.iter()
    }
}

impl InstantiationService for HeadlessBackend {
    type Handle = EntityKey;

    fn create(&mut self, template: &TemplateRef, position: Vec3) -> Result<EntityKey, InstantiationError> {
        if let Some(capacity) = self.capacity {
            if self.entities.len() >= capacity {
                return Err(InstantiationError::new(
                    template,
                    format!("backend capacity of {capacity} entities reached"),
                ));
            }
        }

        Ok(self.entities.insert(HeadlessEntity {
            template: template.id(),
            position,
            active: true,
        }))
    }
}

impl ActivationService<EntityKey> for HeadlessBackend {
    fn set_active(&mut self, handle: EntityKey, active: bool) {
        if let Some(entity) = self.entities.get_mut(handle) {
            entity.active = active;
        }
    }

    fn is_active(&self, handle: EntityKey) -> bool {
        self.entities.get(handle).is_some_and(|e| e.active)
    }

    fn move_to(&mut self, handle: EntityKey, position: Vec3) {
        if let Some(entity) = self.entities.get_mut(handle) {
            entity.position = position;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::TemplateRegistry;

    #[test]
    fn test_create_tags_template_and_activates() {
        let mut registry = TemplateRegistry::new();
        let rock = registry.register("Rock").unwrap();
        let mut backend = HeadlessBackend::new();

        let key = backend.create(&rock, Vec3::new(1.0, 0.0, 2.0)).unwrap();
        let entity = backend.entity(key).unwrap();

        assert_eq!(entity.template, rock.id());
        assert!(entity.active);
        assert_eq!(entity.position, Vec3::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn test_capacity_limit_fails_creation() {
        let mut registry = TemplateRegistry::new();
        let rock = registry.register("Rock").unwrap();
        let mut backend = HeadlessBackend::with_capacity_limit(1);

        backend.create(&rock, Vec3::zeros()).unwrap();
        let err = backend.create(&rock, Vec3::zeros()).unwrap_err();

        assert_eq!(err.template, "Rock");
        assert!(err.reason.contains("capacity"));
    }

    #[test]
    fn test_activation_and_movement() {
        let mut registry = TemplateRegistry::new();
        let rock = registry.register("Rock").unwrap();
        let mut backend = HeadlessBackend::new();
        let key = backend.create(&rock, Vec3::zeros()).unwrap();

        backend.set_active(key, false);
        assert!(!backend.is_active(key));
        assert_eq!(backend.active_count(), 0);

        backend.move_to(key, Vec3::new(3.0, 0.0, 3.0));
        assert_eq!(backend.position(key), Some(Vec3::new(3.0, 0.0, 3.0)));
    }
}
