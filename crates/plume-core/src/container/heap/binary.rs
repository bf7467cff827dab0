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

//! Implicit binary heap.

use super::{Ascending, Comparer};
use crate::container::cursor::{clamp_start, Cursor, CursorMut, Iterable, IterableMut, Traverse};

/// A binary heap stored as a complete tree in a vector.
///
/// The cursor walks the array, so the top element comes first but the rest
/// follow in level order rather than sorted order.
#[derive(Debug, Clone)]
pub struct BinaryHeap<K, V, C = Ascending> {
    entries: Vec<(K, V)>,
    comparer: C,
}

impl<K, V, C: Default> Default for BinaryHeap<K, V, C> {
    fn default() -> Self {
        Self::with_comparer(C::default())
    }
}

impl<K, V> BinaryHeap<K, V> {
    /// Creates an empty min-heap.
    pub fn new() -> Self {
        Self::with_comparer(Ascending)
    }
}

impl<K, V, C> BinaryHeap<K, V, C> {
    /// Creates an empty heap ordered by `comparer`.
    pub fn with_comparer(comparer: C) -> Self {
        Self {
            entries: Vec::new(),
            comparer,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The entry on top.
    pub fn top(&self) -> Option<(&K, &V)> {
        self.entries.first().map(|(key, value)| (key, value))
    }

    fn value_at(&self, slot: usize) -> Option<&V> {
        self.entries.get(slot).map(|(_, value)| value)
    }

    fn value_at_mut(&mut self, slot: usize) -> Option<&mut V> {
        self.entries.get_mut(slot).map(|(_, value)| value)
    }
}

impl<K, V, C: Comparer<K>> BinaryHeap<K, V, C> {
    /// Inserts an entry.
    pub fn add(&mut self, key: K, value: V) {
        self.entries.push((key, value));
        self.sift_up(self.entries.len() - 1);
    }

    /// Removes and returns the entry on top.
    pub fn extract_top(&mut self) -> Option<(K, V)> {
        if self.entries.is_empty() {
            return None;
        }
        let top = self.entries.swap_remove(0);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some(top)
    }

    /// Moves every entry of `other` into this heap.
    pub fn merge(&mut self, other: BinaryHeap<K, V, C>) {
        for (key, value) in other.entries {
            self.add(key, value);
        }
    }

    fn precedes(&self, a: usize, b: usize) -> bool {
        self.comparer.precedes(&self.entries[a].0, &self.entries[b].0)
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.precedes(index, parent) {
                break;
            }
            self.entries.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut best = index;
            if left < len && self.precedes(left, best) {
                best = left;
            }
            if right < len && self.precedes(right, best) {
                best = right;
            }
            if best == index {
                break;
            }
            self.entries.swap(index, best);
            index = best;
        }
    }
}

impl<K, V, C> Traverse for BinaryHeap<K, V, C> {
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

impl<K, V, C> Iterable<V> for BinaryHeap<K, V, C> {
    fn cursor(&self, start_index: usize) -> Cursor<'_, V> {
        Cursor::from_traverse(self, self.start_state(start_index), Self::value_at)
    }

    fn end_cursor(&self) -> Cursor<'_, V> {
        Cursor::from_traverse(self, self.end_state(), Self::value_at)
    }
}

impl<K, V, C> IterableMut<V> for BinaryHeap<K, V, C> {
    fn cursor_mut(&mut self, start_index: usize) -> CursorMut<'_, V> {
        let state = self.start_state(start_index);
        CursorMut::from_traverse(self, state, Self::value_at_mut)
    }

    fn end_cursor_mut(&mut self) -> CursorMut<'_, V> {
        let state = self.end_state();
        CursorMut::from_traverse(self, state, Self::value_at_mut)
    }
}
