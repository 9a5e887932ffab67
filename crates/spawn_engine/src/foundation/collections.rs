//! Specialized collection types

pub use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable key for an entity owned by an in-memory backend
    pub struct EntityKey;
}

/// Handle-based map using slot map for stable references
pub type HandleMap<T> = SlotMap<EntityKey, T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_map_keys_stay_valid() {
        let mut map: HandleMap<&str> = HandleMap::with_key();
        let a = map.insert("a");
        let b = map.insert("b");

        assert_ne!(a, b);
        assert_eq!(map[a], "a");
        assert_eq!(map.len(), 2);
    }
}
