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

//! Pool whose free elements keep their payload.

use super::cursor::{Cursor, CursorMut, Iterable, IterableMut, Traverse};
use super::linked::{Chain, HasLink, Link, LinkedState, NULL_NODE};
use super::Container;

#[derive(Debug, Clone)]
struct FastPoolNode<T> {
    value: T,
    link: Link,
    in_use: bool,
}

impl<T> HasLink for FastPoolNode<T> {
    fn link(&self) -> &Link {
        &self.link
    }

    fn link_mut(&mut self) -> &mut Link {
        &mut self.link
    }
}

/// A pool that never drops the elements it removes.
///
/// Removed elements stay constructed on the free list. [`FastPool::add_default`]
/// hands such an element back as is, which avoids rebuilding heavy payloads
/// (buffers, nested containers) that the caller overwrites anyway.
#[derive(Debug, Clone)]
pub struct FastPool<T: Default> {
    nodes: Vec<FastPoolNode<T>>,
    live: Chain,
    free: Chain,
}

impl<T: Default> Default for FastPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Default> FastPool<T> {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            live: Chain::EMPTY,
            free: Chain::EMPTY,
        }
    }

    /// Number of elements waiting on the free list.
    pub fn free_count(&self) -> usize {
        self.free.len
    }

    /// Appends an element, recycling a free one with its old payload if any.
    pub fn add_default(&mut self) -> &mut T {
        let node = self.acquire_node();
        self.live.insert_before(&mut self.nodes, node, NULL_NODE);
        &mut self.nodes[node].value
    }

    /// Drops every free element, compacting the arena.
    pub fn free_unused(&mut self) {
        while self.free.head != NULL_NODE {
            let node = self.free.head;
            self.free.unlink(&mut self.nodes, node);

            let last = self.nodes.len() - 1;
            self.nodes.swap_remove(node);
            if node != last {
                if self.nodes[node].in_use {
                    self.live.relocate(&mut self.nodes, node);
                } else {
                    self.free.relocate(&mut self.nodes, node);
                }
            }
        }
        self.nodes.shrink_to_fit();
    }

    fn acquire_node(&mut self) -> usize {
        let node = if self.free.head == NULL_NODE {
            self.nodes.push(FastPoolNode {
                value: T::default(),
                link: Link::DETACHED,
                in_use: false,
            });
            self.nodes.len() - 1
        } else {
            let recycled = self.free.head;
            self.free.unlink(&mut self.nodes, recycled);
            recycled
        };
        self.nodes[node].in_use = true;
        node
    }

    fn insert_node(&mut self, value: T, before: usize) -> &mut T {
        let node = self.acquire_node();
        self.live.insert_before(&mut self.nodes, node, before);
        let slot = &mut self.nodes[node].value;
        *slot = value;
        slot
    }

    fn release_node(&mut self, node: usize) {
        self.nodes[node].in_use = false;
        self.live.unlink(&mut self.nodes, node);
        self.free.insert_before(&mut self.nodes, node, NULL_NODE);
    }

    fn value(&self, node: usize) -> Option<&T> {
        self.nodes.get(node).map(|n| &n.value)
    }

    fn value_mut(&mut self, node: usize) -> Option<&mut T> {
        self.nodes.get_mut(node).map(|n| &mut n.value)
    }
}

impl<T: Default> FromIterator<T> for FastPool<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut pool = Self::new();
        for value in iter {
            pool.add(value);
        }
        pool
    }
}

impl<T: Default> Traverse for FastPool<T> {
    type State = LinkedState;

    fn start_state(&self, start_index: usize) -> LinkedState {
        self.live.start_state(&self.nodes, start_index)
    }

    fn end_state(&self) -> LinkedState {
        self.live.end_state()
    }

    fn has_next(&self, state: &LinkedState) -> bool {
        state.has_next()
    }

    fn step_next(&self, state: &mut LinkedState) -> Option<usize> {
        self.live.step_next(&self.nodes, state)
    }

    fn has_previous(&self, state: &LinkedState) -> bool {
        state.has_previous()
    }

    fn step_previous(&self, state: &mut LinkedState) -> Option<usize> {
        self.live.step_previous(&self.nodes, state)
    }
}

impl<T: Default> Iterable<T> for FastPool<T> {
    fn cursor(&self, start_index: usize) -> Cursor<'_, T> {
        Cursor::from_traverse(self, self.start_state(start_index), Self::value)
    }

    fn end_cursor(&self) -> Cursor<'_, T> {
        Cursor::from_traverse(self, self.end_state(), Self::value)
    }
}

impl<T: Default> IterableMut<T> for FastPool<T> {
    fn cursor_mut(&mut self, start_index: usize) -> CursorMut<'_, T> {
        let state = self.start_state(start_index);
        CursorMut::from_traverse(self, state, Self::value_mut)
    }

    fn end_cursor_mut(&mut self) -> CursorMut<'_, T> {
        let state = self.end_state();
        CursorMut::from_traverse(self, state, Self::value_mut)
    }
}

impl<T: Default> Container<T> for FastPool<T> {
    fn len(&self) -> usize {
        self.live.len
    }

    fn get(&self, index: usize) -> Option<&T> {
        let node = self.live.nth(&self.nodes, index)?;
        self.value(node)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let node = self.live.nth(&self.nodes, index)?;
        self.value_mut(node)
    }

    fn add(&mut self, value: T) -> &mut T {
        self.insert_node(value, NULL_NODE)
    }

    fn add_at_index(&mut self, index: Option<usize>, value: T) -> Option<&mut T> {
        let before = match index {
            None => NULL_NODE,
            Some(index) if index == self.live.len => NULL_NODE,
            Some(index) => self.live.nth(&self.nodes, index)?,
        };
        Some(self.insert_node(value, before))
    }

    fn remove_at_index(&mut self, index: usize) -> bool {
        match self.live.nth(&self.nodes, index) {
            Some(node) => {
                self.release_node(node);
                true
            }
            None => false,
        }
    }

    fn clear(&mut self) {
        while self.live.head != NULL_NODE {
            let head = self.live.head;
            self.release_node(head);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_default_recycles_payload() {
        // --- 1. SETUP ---
        let mut pool: FastPool<Vec<u8>> = FastPool::new();
        pool.add(vec![1, 2, 3]);
        pool.add(vec![4]);

        // --- 2. ACTION ---
        assert!(pool.remove_at_index(0));
        let recycled = pool.add_default();

        // --- 3. ASSERTIONS ---
        assert_eq!(recycled, &vec![1, 2, 3], "free element must keep its payload");
        assert_eq!(pool.free_count(), 0);
        let values: Vec<&Vec<u8>> = pool.cursor(0).collect();
        assert_eq!(values, vec![&vec![4], &vec![1, 2, 3]]);
    }

    #[test]
    fn test_add_overwrites_recycled_payload() {
        let mut pool: FastPool<u32> = (0..4).collect();
        assert!(pool.remove(&2));
        assert_eq!(pool.add(10), &mut 10);
        let backward: Vec<u32> = pool.end_cursor().backward().copied().collect();
        assert_eq!(backward, vec![10, 3, 1, 0]);
    }

    #[test]
    fn test_free_unused() {
        let mut pool: FastPool<u32> = (0..6).collect();
        pool.clear();
        assert_eq!(pool.free_count(), 6);
        pool.add(42);
        pool.free_unused();
        assert_eq!(pool.free_count(), 0);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.get(0), Some(&42));
        assert_eq!(pool.cursor(0).count(), 1);
    }
}
