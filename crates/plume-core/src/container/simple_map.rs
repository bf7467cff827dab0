// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Small map over a vector of pairs.

use std::borrow::Borrow;

use super::cursor::{clamp_start, Cursor, CursorMut, Iterable, IterableMut, Traverse};

/// A map for a handful of entries, searched linearly.
///
/// Entries keep insertion order; removal swaps the last entry in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleMap<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Default for SimpleMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> SimpleMap<K, V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns a cursor over the keys in front of the entry at `start_index`.
    pub fn keys(&self, start_index: usize) -> Cursor<'_, K> {
        Cursor::from_traverse(self, self.start_state(start_index), Self::key_at)
    }

    /// Returns a key cursor positioned behind the last entry.
    pub fn keys_end(&self) -> Cursor<'_, K> {
        Cursor::from_traverse(self, self.end_state(), Self::key_at)
    }

    fn key_at(&self, slot: usize) -> Option<&K> {
        self.entries.get(slot).map(|(key, _)| key)
    }

    fn value_at(&self, slot: usize) -> Option<&V> {
        self.entries.get(slot).map(|(_, value)| value)
    }

    fn value_at_mut(&mut self, slot: usize) -> Option<&mut V> {
        self.entries.get_mut(slot).map(|(_, value)| value)
    }
}

impl<K: Eq, V> SimpleMap<K, V> {
    /// Inserts a new entry. Fails if `key` is already present.
    pub fn add(&mut self, key: K, value: V) -> bool {
        if self.position(&key).is_some() {
            return false;
        }
        self.entries.push((key, value));
        true
    }

    /// Inserts or overwrites. Returns the previous value if any.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        match self.position(&key) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Overwrites the value of an existing key. Fails if `key` is absent.
    pub fn replace<Q>(&mut self, key: &Q, value: V) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        match self.get_mut(key) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Removes `key` and returns its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let index = self.position(key)?;
        Some(self.entries.swap_remove(index).1)
    }

    /// Value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.position(key).map(|index| &self.entries[index].1)
    }

    /// Mutable value stored under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let index = self.position(key)?;
        Some(&mut self.entries[index].1)
    }

    fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.entries.iter().position(|(k, _)| k.borrow() == key)
    }
}

impl<K, V> Traverse for SimpleMap<K, V> {
    type State = usize;

    fn start_state(&self, start_index: usize) -> usize {
        clamp_start(start_index, self.entries.len())
    }

    fn end_state(&self) -> usize {
        self.entries.len()
    }

    fn has_next(&self, state: &usize) -> bool {
        *state < self.entries.len()
    }

    fn step_next(&self, state: &mut usize) -> Option<usize> {
        if !self.has_next(state) {
            return None;
        }
        *state += 1;
        Some(*state - 1)
    }

    fn has_previous(&self, state: &usize) -> bool {
        *state > 0 && *state <= self.entries.len()
    }

    fn step_previous(&self, state: &mut usize) -> Option<usize> {
        if !self.has_previous(state) {
            return None;
        }
        *state -= 1;
        Some(*state)
    }
}

impl<K, V> Iterable<V> for SimpleMap<K, V> {
    fn cursor(&self, start_index: usize) -> Cursor<'_, V> {
        Cursor::from_traverse(self, self.start_state(start_index), Self::value_at)
    }

    fn end_cursor(&self) -> Cursor<'_, V> {
        Cursor::from_traverse(self, self.end_state(), Self::value_at)
    }
}

impl<K, V> IterableMut<V> for SimpleMap<K, V> {
    fn cursor_mut(&mut self, start_index: usize) -> CursorMut<'_, V> {
        let state = self.start_state(start_index);
        CursorMut::from_traverse(self, state, Self::value_at_mut)
    }

    fn end_cursor_mut(&mut self) -> CursorMut<'_, V> {
        let state = self.end_state();
        CursorMut::from_traverse(self, state, Self::value_at_mut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_operations() {
        let mut map = SimpleMap::new();
        assert!(map.add("red", 1));
        assert!(map.add("green", 2));
        assert!(!map.add("red", 3));
        assert_eq!(map.set("blue", 4), None);
        assert_eq!(map.set("blue", 5), Some(4));
        assert!(map.replace("green", 20));
        assert!(!map.replace("alpha", 0));
        assert_eq!(map.get("green"), Some(&20));
        assert_eq!(map.remove("red"), Some(1));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_key_and_value_cursors() {
        let mut map = SimpleMap::new();
        for (key, value) in [("a", 1), ("b", 2), ("c", 3)] {
            map.add(key, value);
        }
        let keys: Vec<&str> = map.keys(0).copied().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        let values: Vec<i32> = map.end_cursor().backward().copied().collect();
        assert_eq!(values, vec![3, 2, 1]);
        let last_key: Vec<&str> = map.keys_end().backward().take(1).copied().collect();
        assert_eq!(last_key, vec!["c"]);
    }
}
