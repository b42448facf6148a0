//! Specialized collection types

pub use slotmap::{Key, SlotMap};

/// Slot map that remembers insertion order.
///
/// Keys stay stable across removals like a plain [`SlotMap`], while iteration
/// yields entries in the order they were inserted. Removal is O(n) in the
/// number of live entries.
#[derive(Debug, Clone)]
pub struct OrderedSlotMap<K: Key, V> {
    slots: SlotMap<K, V>,
    order: Vec<K>,
}

impl<K: Key, V> OrderedSlotMap<K, V> {
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Insert a value at the end of the order and return its key
    pub fn insert(&mut self, value: V) -> K {
        let key = self.slots.insert(value);
        self.order.push(key);
        key
    }

    /// Remove a value by key. Returns `None` if the key was already removed.
    pub fn remove(&mut self, key: K) -> Option<V> {
        let value = self.slots.remove(key)?;
        self.order.retain(|k| *k != key);
        Some(value)
    }

    /// Get a value by key
    pub fn get(&self, key: K) -> Option<&V> {
        self.slots.get(key)
    }

    /// Whether the key refers to a live entry
    pub fn contains_key(&self, key: K) -> bool {
        self.slots.contains_key(key)
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.order.iter().copied()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> + '_ {
        self.order
            .iter()
            .filter_map(move |key| self.slots.get(*key).map(|value| (*key, value)))
    }
}

impl<K: Key, V> Default for OrderedSlotMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::DefaultKey;

    #[test]
    fn test_iteration_follows_insertion_order() {
        let mut map: OrderedSlotMap<DefaultKey, &str> = OrderedSlotMap::new();
        let a = map.insert("a");
        let _b = map.insert("b");
        let _c = map.insert("c");

        map.remove(a);
        let d = map.insert("d");

        let values: Vec<_> = map.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec!["b", "c", "d"]);
        assert_eq!(map.keys().last(), Some(d));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut map: OrderedSlotMap<DefaultKey, u32> = OrderedSlotMap::new();
        let key = map.insert(7);
        assert_eq!(map.remove(key), Some(7));
        assert_eq!(map.remove(key), None);
        assert!(map.is_empty());
        assert!(!map.contains_key(key));
    }
}
