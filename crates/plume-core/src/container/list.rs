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

//! Doubly linked list stored in a compact arena.

use super::cursor::{Cursor, CursorMut, Iterable, IterableMut, Traverse};
use super::linked::{Chain, HasLink, Link, LinkedState, NULL_NODE};
use super::Container;

#[derive(Debug, Clone)]
struct ListNode<T> {
    value: T,
    link: Link,
}

impl<T> HasLink for ListNode<T> {
    fn link(&self) -> &Link {
        &self.link
    }

    fn link_mut(&mut self) -> &mut Link {
        &mut self.link
    }
}

/// A doubly linked list.
///
/// Nodes are kept densely packed: removing an element moves the last arena
/// node into the freed index and relinks its neighbours.
#[derive(Debug, Clone)]
pub struct List<T> {
    nodes: Vec<ListNode<T>>,
    chain: Chain,
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> List<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            chain: Chain::EMPTY,
        }
    }

    /// First element.
    pub fn first(&self) -> Option<&T> {
        self.value(self.chain.head)
    }

    /// Last element.
    pub fn last(&self) -> Option<&T> {
        self.value(self.chain.tail)
    }

    /// Inserts `value` at the front.
    pub fn push_front(&mut self, value: T) -> &mut T {
        let before = self.chain.head;
        self.insert_node(value, before)
    }

    /// Removes and returns the first element.
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.chain.head;
        self.take_node(head)
    }

    /// Removes and returns the last element.
    pub fn pop_back(&mut self) -> Option<T> {
        let tail = self.chain.tail;
        self.take_node(tail)
    }

    fn value(&self, node: usize) -> Option<&T> {
        self.nodes.get(node).map(|n| &n.value)
    }

    fn value_mut(&mut self, node: usize) -> Option<&mut T> {
        self.nodes.get_mut(node).map(|n| &mut n.value)
    }

    fn insert_node(&mut self, value: T, before: usize) -> &mut T {
        let node = self.nodes.len();
        self.nodes.push(ListNode {
            value,
            link: Link::DETACHED,
        });
        self.chain.insert_before(&mut self.nodes, node, before);
        &mut self.nodes[node].value
    }

    fn take_node(&mut self, node: usize) -> Option<T> {
        if node >= self.nodes.len() {
            return None;
        }
        self.chain.unlink(&mut self.nodes, node);
        let last = self.nodes.len() - 1;
        let removed = self.nodes.swap_remove(node);
        if node != last {
            self.chain.relocate(&mut self.nodes, node);
        }
        Some(removed.value)
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.add(value);
        }
        list
    }
}

impl<T> Traverse for List<T> {
    type State = LinkedState;

    fn start_state(&self, start_index: usize) -> LinkedState {
        self.chain.start_state(&self.nodes, start_index)
    }

    fn end_state(&self) -> LinkedState {
        self.chain.end_state()
    }

    fn has_next(&self, state: &LinkedState) -> bool {
        state.has_next()
    }

    fn step_next(&self, state: &mut LinkedState) -> Option<usize> {
        self.chain.step_next(&self.nodes, state)
    }

    fn has_previous(&self, state: &LinkedState) -> bool {
        state.has_previous()
    }

    fn step_previous(&self, state: &mut LinkedState) -> Option<usize> {
        self.chain.step_previous(&self.nodes, state)
    }
}

impl<T> Iterable<T> for List<T> {
    fn cursor(&self, start_index: usize) -> Cursor<'_, T> {
        Cursor::from_traverse(self, self.start_state(start_index), Self::value)
    }

    fn end_cursor(&self) -> Cursor<'_, T> {
        Cursor::from_traverse(self, self.end_state(), Self::value)
    }
}

impl<T> IterableMut<T> for List<T> {
    fn cursor_mut(&mut self, start_index: usize) -> CursorMut<'_, T> {
        let state = self.start_state(start_index);
        CursorMut::from_traverse(self, state, Self::value_mut)
    }

    fn end_cursor_mut(&mut self) -> CursorMut<'_, T> {
        let state = self.end_state();
        CursorMut::from_traverse(self, state, Self::value_mut)
    }
}

impl<T> Container<T> for List<T> {
    fn len(&self) -> usize {
        self.chain.len
    }

    fn get(&self, index: usize) -> Option<&T> {
        let node = self.chain.nth(&self.nodes, index)?;
        self.value(node)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let node = self.chain.nth(&self.nodes, index)?;
        self.value_mut(node)
    }

    fn add(&mut self, value: T) -> &mut T {
        self.insert_node(value, NULL_NODE)
    }

    fn add_at_index(&mut self, index: Option<usize>, value: T) -> Option<&mut T> {
        let before = match index {
            None => NULL_NODE,
            Some(index) if index == self.chain.len => NULL_NODE,
            Some(index) => self.chain.nth(&self.nodes, index)?,
        };
        Some(self.insert_node(value, before))
    }

    fn remove_at_index(&mut self, index: usize) -> bool {
        match self.chain.nth(&self.nodes, index) {
            Some(node) => self.take_node(node).is_some(),
            None => false,
        }
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.chain = Chain::EMPTY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(list: &List<i32>) -> Vec<i32> {
        list.cursor(0).copied().collect()
    }

    #[test]
    fn test_forward_and_backward() {
        let list: List<i32> = (0..6).collect();
        assert_eq!(collect(&list), vec![0, 1, 2, 3, 4, 5]);
        let backward: Vec<i32> = list.end_cursor().backward().copied().collect();
        assert_eq!(backward, vec![5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_removal_keeps_order() {
        // --- 1. SETUP ---
        let mut list: List<i32> = (0..6).collect();

        // --- 2. ACTION ---
        assert!(list.remove(&0));
        assert!(list.remove_at_index(2));
        assert!(!list.remove_at_index(10));

        // --- 3. ASSERTIONS ---
        assert_eq!(collect(&list), vec![1, 2, 4, 5]);
        assert_eq!(list.len(), 4);
        assert_eq!(list.first(), Some(&1));
        assert_eq!(list.last(), Some(&5));
        assert_eq!(list.get(3), Some(&5));
    }

    #[test]
    fn test_insertion_positions() {
        let mut list = List::new();
        list.add(2);
        list.push_front(0);
        assert!(list.add_at_index(Some(1), 1).is_some());
        assert!(list.add_at_index(Some(3), 3).is_some());
        assert!(list.add_at_index(Some(9), 9).is_none());
        assert_eq!(collect(&list), vec![0, 1, 2, 3]);
        assert_eq!(list.pop_front(), Some(0));
        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(collect(&list), vec![1, 2]);
    }

    #[test]
    fn test_cursor_start_index() {
        let list: List<i32> = (10..15).collect();
        let mut cursor = list.cursor(3);
        assert_eq!(cursor.previous(), Some(&12));
        assert_eq!(cursor.next(), Some(&12));
        assert_eq!(cursor.next(), Some(&13));

        let mut clamped = list.cursor(99);
        assert_eq!(clamped.next(), Some(&14));
        assert!(!clamped.has_next());
    }

    #[test]
    fn test_cursor_mut_and_clear() {
        let mut list: List<i32> = (1..=3).collect();
        {
            let mut cursor = list.cursor_mut(0);
            cursor.for_each_remaining(|value| *value *= 2);
        }
        assert_eq!(collect(&list), vec![2, 4, 6]);
        list.clear();
        assert!(list.is_empty());
        assert!(!list.cursor(0).has_next());
        assert!(!list.end_cursor().has_previous());
    }
}
