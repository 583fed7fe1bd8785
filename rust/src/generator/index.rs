//! Dense integer ids for staff members.
//!
//! The pass keeps hours and bookings in vectors indexed by these ids instead
//! of hashing staff id strings on every candidate check.

use rustc_hash::FxHashMap;

/// Position of a staff member in the input list.
pub type StaffIdx = u32;

/// Maps staff id strings to their list position and back.
#[derive(Debug, Clone, Default)]
pub struct StaffIndex {
    to_int: FxHashMap<String, StaffIdx>,
    from_int: Vec<String>,
}

impl StaffIndex {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_int: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            from_int: Vec::with_capacity(capacity),
        }
    }

    /// Register a staff id. Returns `None` if the id is already registered.
    pub fn insert(&mut self, staff_id: &str) -> Option<StaffIdx> {
        if self.to_int.contains_key(staff_id) {
            return None;
        }
        let idx = self.from_int.len() as StaffIdx;
        self.from_int.push(staff_id.to_string());
        self.to_int.insert(staff_id.to_string(), idx);
        Some(idx)
    }

    #[inline]
    pub fn get(&self, staff_id: &str) -> Option<StaffIdx> {
        self.to_int.get(staff_id).copied()
    }

    #[inline]
    pub fn resolve(&self, idx: StaffIdx) -> Option<&str> {
        self.from_int.get(idx as usize).map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_resolve() {
        let mut index = StaffIndex::with_capacity(4);

        let alice = index.insert("alice").unwrap();
        let bob = index.insert("bob").unwrap();

        assert_eq!(alice, 0);
        assert_eq!(bob, 1);
        assert_eq!(index.insert("alice"), None); // duplicate
        assert_eq!(index.resolve(bob), Some("bob"));
        assert_eq!(index.get("alice"), Some(alice));
        assert_eq!(index.get("carol"), None);
    }
}
