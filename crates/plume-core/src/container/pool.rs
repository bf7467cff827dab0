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

//! Linked list that recycles its nodes.

use super::cursor::{Cursor, CursorMut, Iterable, IterableMut, Traverse};
use super::linked::{Chain, HasLink, Link, LinkedState, NULL_NODE};
use super::Container;

#[derive(Debug, Clone)]
struct PoolNode<T> {
    value: Option<T>,
    link: Link,
}

impl<T> HasLink for PoolNode<T> {
    fn link(&self) -> &Link {
        &self.link
    }

    fn link_mut(&mut self) -> &mut Link {
        &mut self.link
    }
}

/// A linked list whose removed nodes go to a free list.
///
/// Later additions reuse free nodes before growing the arena, so a pool that
/// churns around a stable size stops allocating. Removed values are dropped
/// immediately; [`Pool::free_unused`] gives spare nodes back.
#[derive(Debug, Clone)]
pub struct Pool<T> {
    nodes: Vec<PoolNode<T>>,
    live: Chain,
    free: Chain,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Pool<T> {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            live: Chain::EMPTY,
            free: Chain::EMPTY,
        }
    }

    /// Number of nodes waiting on the free list.
    pub fn free_count(&self) -> usize {
        self.free.len
    }

    /// Releases every free node, compacting the arena.
    pub fn free_unused(&mut self) {
        while self.free.head != NULL_NODE {
            let node = self.free.head;
            self.free.unlink(&mut self.nodes, node);

            let last = self.nodes.len() - 1;
            self.nodes.swap_remove(node);
            if node != last {
                if self.nodes[node].value.is_some() {
                    self.live.relocate(&mut self.nodes, node);
                } else {
                    self.free.relocate(&mut self.nodes, node);
                }
            }
        }
        self.nodes.shrink_to_fit();
        log::trace!("Pool compacted to {} nodes", self.nodes.len());
    }

    fn value(&self, node: usize) -> Option<&T> {
        self.nodes.get(node).and_then(|n| n.value.as_ref())
    }

    fn value_mut(&mut self, node: usize) -> Option<&mut T> {
        self.nodes.get_mut(node).and_then(|n| n.value.as_mut())
    }

    fn insert_node(&mut self, value: T, before: usize) -> &mut T {
        let node = if self.free.head == NULL_NODE {
            self.nodes.push(PoolNode {
                value: None,
                link: Link::DETACHED,
            });
            self.nodes.len() - 1
        } else {
            let recycled = self.free.head;
            self.free.unlink(&mut self.nodes, recycled);
            recycled
        };

        self.live.insert_before(&mut self.nodes, node, before);
        self.nodes[node].value.insert(value)
    }

    fn release_node(&mut self, node: usize) -> Option<T> {
        let value = self.nodes.get_mut(node)?.value.take()?;
        self.live.unlink(&mut self.nodes, node);
        self.free.insert_before(&mut self.nodes, node, NULL_NODE);
        Some(value)
    }

    /// Removes and returns the first element.
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.live.head;
        self.release_node(head)
    }
}

impl<T> FromIterator<T> for Pool<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut pool = Self::new();
        for value in iter {
            pool.add(value);
        }
        pool
    }
}

impl<T> Traverse for Pool<T> {
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

impl<T> Iterable<T> for Pool<T> {
    fn cursor(&self, start_index: usize) -> Cursor<'_, T> {
        Cursor::from_traverse(self, self.start_state(start_index), Self::value)
    }

    fn end_cursor(&self) -> Cursor<'_, T> {
        Cursor::from_traverse(self, self.end_state(), Self::value)
    }
}

impl<T> IterableMut<T> for Pool<T> {
    fn cursor_mut(&mut self, start_index: usize) -> CursorMut<'_, T> {
        let state = self.start_state(start_index);
        CursorMut::from_traverse(self, state, Self::value_mut)
    }

    fn end_cursor_mut(&mut self) -> CursorMut<'_, T> {
        let state = self.end_state();
        CursorMut::from_traverse(self, state, Self::value_mut)
    }
}

impl<T> Container<T> for Pool<T> {
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
            Some(node) => self.release_node(node).is_some(),
            None => false,
        }
    }

    fn clear(&mut self) {
        while self.live.head != NULL_NODE {
            let head = self.live.head;
            if self.release_node(head).is_none() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nodes_are_recycled() {
        // --- 1. SETUP ---
        let mut pool: Pool<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();

        // --- 2. ACTION ---
        assert!(pool.remove(&"b".to_string()));
        assert_eq!(pool.free_count(), 1, "removed node must be parked on the free list");
        pool.add("d".to_string());

        // --- 3. ASSERTIONS ---
        assert_eq!(pool.free_count(), 0, "add must reuse the free node");
        let values: Vec<&str> = pool.cursor(0).map(String::as_str).collect();
        assert_eq!(values, vec!["a", "c", "d"]);
        let backward: Vec<&str> = pool.end_cursor().backward().map(String::as_str).collect();
        assert_eq!(backward, vec!["d", "c", "a"]);
    }

    #[test]
    fn test_free_unused_compacts() {
        let mut pool: Pool<u32> = (0..8).collect();
        for value in [1, 3, 4, 6] {
            assert!(pool.remove(&value));
        }
        assert_eq!(pool.free_count(), 4);

        pool.free_unused();

        assert_eq!(pool.free_count(), 0);
        assert_eq!(pool.len(), 4);
        let values: Vec<u32> = pool.cursor(0).copied().collect();
        assert_eq!(values, vec![0, 2, 5, 7]);
        let backward: Vec<u32> = pool.end_cursor().backward().copied().collect();
        assert_eq!(backward, vec![7, 5, 2, 0]);
        pool.add(9);
        assert_eq!(pool.get(4), Some(&9));
    }

    #[test]
    fn test_clear_moves_everything_to_free_list() {
        let mut pool: Pool<u8> = (0..3).collect();
        pool.clear();
        assert!(pool.is_empty());
        assert_eq!(pool.free_count(), 3);
        assert_eq!(pool.pop_front(), None);
        assert!(pool.add_at_index(Some(0), 7).is_some());
        assert_eq!(pool.free_count(), 2);
        assert_eq!(pool.get(0), Some(&7));
    }
}
