//! Entity pooling
//!
//! The pool owns every entity it has ever created and hands back deactivated
//! ones before asking the backend for new instances.
//!
//! # Architecture
//!
//! ```text
//! EntityPool::spawn(template, position)
//!         |
//!   try_reuse ──hit──> move + activate existing entity
//!         |
//!        miss
//!         |
//!   create_and_register ──> InstantiationService::create
//! ```

mod template;
mod backend;
mod headless;
mod entity_pool;

pub use template::{TemplateError, TemplateId, TemplateRef, TemplateRegistry, WeightedTemplate};
pub use backend::{ActivationService, EntityBackend, InstantiationError, InstantiationService};
pub use headless::{HeadlessBackend, HeadlessEntity};
pub use entity_pool::{EntityPool, PoolEntry, PoolError, PoolSpawn, PoolStats};
