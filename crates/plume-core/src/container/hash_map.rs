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

//! Separate-chaining hash map with bucket-skipping cursors.

use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};

use super::cursor::{clamp_start, Cursor, CursorMut, Iterable, IterableMut, Traverse};
use super::linked::{Chain, HasLink, Link, NULL_NODE};

/// Decides when and how much a [`HashMap`] grows its slot table.
pub trait Grower {
    /// Returns `true` if a table with `slots` buckets holding `len` entries
    /// should grow.
    fn should_grow(&self, len: usize, slots: usize) -> bool {
        len > slots
    }

    /// Slot count to grow to from `slots`.
    fn next_slot_count(&self, slots: usize) -> usize;
}

/// Default policy: double the table plus one once entries outnumber slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Doubling;

impl Grower for Doubling {
    fn next_slot_count(&self, slots: usize) -> usize {
        slots * 2 + 1
    }
}

/// Bucket occupancy figures reported by [`HashMap::statistics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HashStatistics {
    /// Entries sharing a bucket with an earlier entry.
    pub collisions: usize,
    /// Buckets holding no entry.
    pub free_slots: usize,
    /// Length of the longest bucket chain.
    pub longest_chain: usize,
}

#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
    bucket: usize,
    link: Link,
}

impl<K, V> HasLink for Entry<K, V> {
    fn link(&self) -> &Link {
        &self.link
    }

    fn link_mut(&mut self) -> &mut Link {
        &mut self.link
    }
}

/// Cursor position inside a [`HashMap`]: the entries on both sides of the gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashState {
    next: usize,
    previous: usize,
}

/// A hash map using separate chaining.
///
/// Entries live in a dense arena; every bucket threads a doubly linked chain
/// through it. Cursors visit buckets in slot order and skip empty ones, both
/// for values ([`Iterable`]) and for keys ([`HashMap::keys`]).
#[derive(Debug, Clone)]
pub struct HashMap<K, V, S = ahash::RandomState, G = Doubling> {
    entries: Vec<Entry<K, V>>,
    buckets: Vec<Chain>,
    hasher: S,
    grower: G,
}

impl<K, V> HashMap<K, V> {
    /// Initial slot count of [`HashMap::new`].
    pub const DEFAULT_SLOTS: usize = 199;

    /// Creates an empty map with [`HashMap::DEFAULT_SLOTS`] slots.
    pub fn new() -> Self {
        Self::with_slots(Self::DEFAULT_SLOTS)
    }

    /// Creates an empty map with `slots` buckets.
    pub fn with_slots(slots: usize) -> Self {
        Self::with_policy(slots, ahash::RandomState::new(), Doubling)
    }
}

impl<K, V> Default for HashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S, G> HashMap<K, V, S, G> {
    /// Creates an empty map with an explicit hasher and grow policy.
    pub fn with_policy(slots: usize, hasher: S, grower: G) -> Self {
        Self {
            entries: Vec::new(),
            buckets: vec![Chain::EMPTY; slots.max(1)],
            hasher,
            grower,
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

    /// Current number of buckets.
    pub fn slot_count(&self) -> usize {
        self.buckets.len()
    }

    /// Removes every entry and keeps the slot table.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.buckets.fill(Chain::EMPTY);
    }

    /// Collision and occupancy figures of the slot table.
    pub fn statistics(&self) -> HashStatistics {
        self.buckets
            .iter()
            .fold(HashStatistics::default(), |mut stats, bucket| {
                if bucket.len == 0 {
                    stats.free_slots += 1;
                } else {
                    stats.collisions += bucket.len - 1;
                    stats.longest_chain = stats.longest_chain.max(bucket.len);
                }
                stats
            })
    }

    /// Removes every entry whose value equals `value`. Returns how many went.
    pub fn remove_value(&mut self, value: &V) -> usize
    where
        V: PartialEq,
    {
        let mut removed = 0;
        let mut index = 0;
        while index < self.entries.len() {
            if self.entries[index].value == *value {
                self.take_entry(index);
                removed += 1;
            } else {
                index += 1;
            }
        }
        removed
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
        self.entries.get(slot).map(|entry| &entry.key)
    }

    fn value_at(&self, slot: usize) -> Option<&V> {
        self.entries.get(slot).map(|entry| &entry.value)
    }

    fn value_at_mut(&mut self, slot: usize) -> Option<&mut V> {
        self.entries.get_mut(slot).map(|entry| &mut entry.value)
    }

    /// Unlinks entry `index` and fills its arena hole with the last entry.
    fn take_entry(&mut self, index: usize) -> (K, V) {
        let bucket = self.entries[index].bucket;
        self.buckets[bucket].unlink(&mut self.entries, index);

        let last = self.entries.len() - 1;
        let entry = self.entries.swap_remove(index);
        if index != last {
            let moved_bucket = self.entries[index].bucket;
            self.buckets[moved_bucket].relocate(&mut self.entries, index);
        }
        (entry.key, entry.value)
    }

    // --- Traversal helpers ---

    fn first_in_bucket_from(&self, bucket: usize) -> usize {
        self.buckets[bucket..]
            .iter()
            .find(|chain| chain.len > 0)
            .map_or(NULL_NODE, |chain| chain.head)
    }

    fn last_in_bucket_before(&self, bucket: usize) -> usize {
        self.buckets[..bucket]
            .iter()
            .rev()
            .find(|chain| chain.len > 0)
            .map_or(NULL_NODE, |chain| chain.tail)
    }

    fn successor(&self, node: usize) -> usize {
        let entry = &self.entries[node];
        if entry.link.next != NULL_NODE {
            entry.link.next
        } else {
            self.first_in_bucket_from(entry.bucket + 1)
        }
    }

    fn predecessor(&self, node: usize) -> usize {
        let entry = &self.entries[node];
        if entry.link.prev != NULL_NODE {
            entry.link.prev
        } else {
            self.last_in_bucket_before(entry.bucket)
        }
    }
}

impl<K, V, S, G> HashMap<K, V, S, G>
where
    K: Hash + Eq,
    S: BuildHasher,
    G: Grower,
{
    /// Inserts a new entry. Fails if `key` is already present.
    pub fn add(&mut self, key: K, value: V) -> bool {
        if self.find(&key).is_some() {
            return false;
        }
        self.insert_new(key, value);
        true
    }

    /// Overwrites the value of an existing key. Fails if `key` is absent.
    pub fn replace<Q>(&mut self, key: &Q, value: V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.get_mut(key) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Inserts or overwrites. Returns the previous value if any.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        match self.find(&key) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].value, value)),
            None => {
                self.insert_new(key, value);
                None
            }
        }
    }

    /// Removes `key` and returns its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find(key)?;
        Some(self.take_entry(index).1)
    }

    /// Returns the value stored under `key`, inserting the result of `make` first if
    /// the key is absent. A failing `make` leaves the map untouched.
    pub fn try_get_or_insert_with<E>(
        &mut self,
        key: K,
        make: impl FnOnce() -> Result<V, E>,
    ) -> Result<&mut V, E> {
        let index = match self.find(&key) {
            Some(index) => index,
            None => {
                let value = make()?;
                self.insert_new(key, value)
            }
        };
        Ok(&mut self.entries[index].value)
    }

    /// Value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).map(|index| &self.entries[index].value)
    }

    /// Mutable value stored under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find(key)?;
        Some(&mut self.entries[index].value)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    fn bucket_of<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        (self.hasher.hash_one(key) % self.buckets.len() as u64) as usize
    }

    fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let chain = &self.buckets[self.bucket_of(key)];
        let mut node = chain.head;
        while node != NULL_NODE {
            let entry = &self.entries[node];
            if entry.key.borrow() == key {
                return Some(node);
            }
            node = entry.link.next;
        }
        None
    }

    fn insert_new(&mut self, key: K, value: V) -> usize {
        let bucket = self.bucket_of(&key);
        let index = self.entries.len();
        self.entries.push(Entry {
            key,
            value,
            bucket,
            link: Link::DETACHED,
        });
        self.buckets[bucket].insert_before(&mut self.entries, index, NULL_NODE);

        if self.grower.should_grow(self.entries.len(), self.buckets.len()) {
            let slots = self.grower.next_slot_count(self.buckets.len());
            self.rehash(slots);
        }
        index
    }

    fn rehash(&mut self, slots: usize) {
        let slots = slots.max(1);
        log::trace!("Rehashing {} entries into {} slots", self.entries.len(), slots);

        self.buckets = vec![Chain::EMPTY; slots];
        for index in 0..self.entries.len() {
            let bucket = self.bucket_of(&self.entries[index].key);
            self.entries[index].bucket = bucket;
            self.buckets[bucket].insert_before(&mut self.entries, index, NULL_NODE);
        }
    }
}

impl<K, V, S, G> Traverse for HashMap<K, V, S, G> {
    type State = HashState;

    fn start_state(&self, start_index: usize) -> HashState {
        let mut state = HashState {
            next: self.first_in_bucket_from(0),
            previous: NULL_NODE,
        };
        for _ in 0..clamp_start(start_index, self.entries.len()) {
            if self.step_next(&mut state).is_none() {
                break;
            }
        }
        state
    }

    fn end_state(&self) -> HashState {
        HashState {
            next: NULL_NODE,
            previous: self.last_in_bucket_before(self.buckets.len()),
        }
    }

    fn has_next(&self, state: &HashState) -> bool {
        state.next != NULL_NODE
    }

    fn step_next(&self, state: &mut HashState) -> Option<usize> {
        if state.next >= self.entries.len() {
            return None;
        }
        let current = state.next;
        state.previous = current;
        state.next = self.successor(current);
        Some(current)
    }

    fn has_previous(&self, state: &HashState) -> bool {
        state.previous != NULL_NODE
    }

    fn step_previous(&self, state: &mut HashState) -> Option<usize> {
        if state.previous >= self.entries.len() {
            return None;
        }
        let current = state.previous;
        state.next = current;
        state.previous = self.predecessor(current);
        Some(current)
    }
}

impl<K, V, S, G> Iterable<V> for HashMap<K, V, S, G> {
    fn cursor(&self, start_index: usize) -> Cursor<'_, V> {
        Cursor::from_traverse(self, self.start_state(start_index), Self::value_at)
    }

    fn end_cursor(&self) -> Cursor<'_, V> {
        Cursor::from_traverse(self, self.end_state(), Self::value_at)
    }
}

impl<K, V, S, G> IterableMut<V> for HashMap<K, V, S, G> {
    fn cursor_mut(&mut self, start_index: usize) -> CursorMut<'_, V> {
        let state = self.start_state(start_index);
        CursorMut::from_traverse(self, state, Self::value_at_mut)
    }

    fn end_cursor_mut(&mut self) -> CursorMut<'_, V> {
        let state = self.end_state();
        CursorMut::from_traverse(self, state, Self::value_at_mut)
    }
}
