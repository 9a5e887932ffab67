//! Reuse-or-create entity pool

use crate::foundation::math::Vec3;
use crate::pool::{EntityBackend, InstantiationError, TemplateRef};
use std::collections::HashMap;

/// Errors raised by pool bookkeeping
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// The handle was not created by this pool
    #[error("handle {0} is not managed by this pool")]
    UnknownHandle(String),
}

/// One entity managed by the pool
#[derive(Debug, Clone, PartialEq)]
pub struct PoolEntry<H> {
    handle: H,
    template: TemplateRef,
    active: bool,
}

impl<H: Copy> PoolEntry<H> {
    /// Backend handle of the entity
    pub fn handle(&self) -> H {
        self.handle
    }

    /// Template the entity was created from
    pub fn template(&self) -> &TemplateRef {
        &self.template
    }

    /// Whether the pool considers the entity active
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Result of a single pool spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSpawn<H> {
    /// Entity that now sits at the requested position
    pub handle: H,
    /// True when an inactive entity was reactivated instead of created
    pub reused: bool,
}

/// Statistics about pool activity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Entities created through the backend
    pub created: u64,
    /// Spawns satisfied by reactivating an inactive entity
    pub reused: u64,
    /// Deactivations performed through the pool
    pub deactivated: u64,
}

/// Pool of entities that are created once and then only toggled
///
/// Entries are kept in creation order and never removed. A spawn request for
/// a template reactivates the oldest inactive entry of that template; a new
/// entity is only created when none exists.
pub struct EntityPool<B: EntityBackend> {
    backend: B,
    entries: Vec<PoolEntry<B::Handle>>,
    index: HashMap<B::Handle, usize>,
    stats: PoolStats,
}

impl<B: EntityBackend> EntityPool<B> {
    /// Create an empty pool over a backend
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            entries: Vec::new(),
            index: HashMap::new(),
            stats: PoolStats::default(),
        }
    }

    /// Reactivate the first inactive entry of `template` at `position`
    ///
    /// Returns `None` and changes nothing if there is no such entry.
    pub fn try_reuse(&mut self, template: &TemplateRef, position: Vec3) -> Option<B::Handle> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| !entry.active && entry.template == *template)?;

        self.backend.move_to(entry.handle, position);
        self.backend.set_active(entry.handle, true);
        entry.active = true;
        self.stats.reused += 1;

        log::debug!("Reused {:?} for {} at {:?}", entry.handle, template, position);
        Some(entry.handle)
    }

    /// Create a new active entity through the backend and start tracking it
    pub fn create_and_register(
        &mut self,
        template: &TemplateRef,
        position: Vec3,
    ) -> Result<B::Handle, InstantiationError> {
        let handle = self.backend.create(template, position)?;

        self.index.insert(handle, self.entries.len());
        self.entries.push(PoolEntry {
            handle,
            template: template.clone(),
            active: true,
        });
        self.stats.created += 1;

        log::debug!("Created {:?} for {} at {:?}", handle, template, position);
        Ok(handle)
    }

    /// Reuse an inactive entity of `template` or create a new one
    pub fn spawn(&mut self, template: &TemplateRef, position: Vec3) -> Result<PoolSpawn<B::Handle>, InstantiationError> {
        if let Some(handle) = self.try_reuse(template, position) {
            return Ok(PoolSpawn { handle, reused: true });
        }

        let handle = self.create_and_register(template, position)?;
        Ok(PoolSpawn { handle, reused: false })
    }

    /// Activate or deactivate a managed entity
    pub fn set_active(&mut self, handle: B::Handle, active: bool) -> Result<(), PoolError> {
        let slot = *self
            .index
            .get(&handle)
            .ok_or_else(|| PoolError::UnknownHandle(format!("{handle:?}")))?;

        let entry = &mut self.entries[slot];
        if entry.active && !active {
            self.stats.deactivated += 1;
        }
        entry.active = active;
        self.backend.set_active(handle, active);
        Ok(())
    }

    /// Deactivate a managed entity so it can be reused
    pub fn deactivate(&mut self, handle: B::Handle) -> Result<(), PoolError> {
        self.set_active(handle, false)
    }

    /// Deactivate every managed entity, returning how many were active
    pub fn deactivate_all(&mut self) -> usize {
        let mut count = 0;
        for entry in self.entries.iter_mut().filter(|entry| entry.active) {
            entry.active = false;
            self.backend.set_active(entry.handle, false);
            count += 1;
        }
        self.stats.deactivated += count as u64;
        count
    }

    /// Refresh active flags from the backend
    ///
    /// Needed when the host deactivates entities without going through the
    /// pool. Returns the number of entries whose flag changed.
    pub fn sync_with_backend(&mut self) -> usize {
        let mut changed = 0;
        for entry in &mut self.entries {
            let active = self.backend.is_active(entry.handle);
            if active != entry.active {
                entry.active = active;
                changed += 1;
            }
        }
        changed
    }

    /// Whether the handle belongs to this pool
    pub fn contains(&self, handle: B::Handle) -> bool {
        self.index.contains_key(&handle)
    }

    /// Look up the entry for a handle
    pub fn entry(&self, handle: B::Handle) -> Option<&PoolEntry<B::Handle>> {
        self.index.get(&handle).map(|&slot| &self.entries[slot])
    }

    /// Every entry in creation order
    pub fn entries(&self) -> &[PoolEntry<B::Handle>] {
        &self.entries
    }

    /// Every managed handle in creation order
    pub fn handles(&self) -> impl Iterator<Item = B::Handle> + '_ {
        self.entries.iter().map(|entry| entry.handle)
    }

    /// Entries created from `template`
    pub fn entries_of<'a>(&'a self, template: &'a TemplateRef) -> impl Iterator<Item = &'a PoolEntry<B::Handle>> + 'a {
        self.entries.iter().filter(move |entry| entry.template == *template)
    }

    /// Number of entries created from `template`
    pub fn count_of(&self, template: &TemplateRef) -> usize {
        self.entries_of(template).count()
    }

    /// Number of active entries
    pub fn active_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.active).count()
    }

    /// Number of entries ever created
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the pool has never created anything
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pool statistics
    pub fn stats(&self) -> &PoolStats {
        &self.stats
    }

    /// Backend the pool drives
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the backend, for hosts that toggle entities directly
    ///
    /// Call [`EntityPool::sync_with_backend`] afterwards.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
