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

//! Minimal singly linked list.

use super::cursor::{clamp_start, Cursor, CursorMut, Iterable, IterableMut, Traverse};
use super::linked::NULL_NODE;

#[derive(Debug, Clone)]
struct SimpleNode<T> {
    value: T,
    next: usize,
}

/// Cursor position inside a [`SimpleList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleState {
    next: usize,
    previous: usize,
}

/// A singly linked list that only grows at the front.
///
/// Nodes carry no back link, so walking backwards searches the predecessor
/// from the head on every step.
#[derive(Debug, Clone)]
pub struct SimpleList<T> {
    nodes: Vec<SimpleNode<T>>,
    head: usize,
}

impl<T> Default for SimpleList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SimpleList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            head: NULL_NODE,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Inserts `value` at the front and returns it.
    pub fn add(&mut self, value: T) -> &mut T {
        let node = self.nodes.len();
        self.nodes.push(SimpleNode {
            value,
            next: self.head,
        });
        self.head = node;
        &mut self.nodes[node].value
    }

    /// First element.
    pub fn first(&self) -> Option<&T> {
        self.value(self.head)
    }

    /// Returns `true` if an element equal to `value` is stored.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.find(value).is_some()
    }

    /// Removes the first element equal to `value`.
    pub fn remove(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        let Some(node) = self.find(value) else {
            return false;
        };

        self.relink_predecessor(node, self.nodes[node].next);

        // Fill the hole with the last arena node.
        let last = self.nodes.len() - 1;
        self.nodes.swap_remove(node);
        if node != last {
            self.relink_predecessor(last, node);
        }
        true
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = NULL_NODE;
    }

    fn find(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        let mut node = self.head;
        while node != NULL_NODE {
            if self.nodes[node].value == *value {
                return Some(node);
            }
            node = self.nodes[node].next;
        }
        None
    }

    /// Node whose `next` is `node`, searched from the head.
    fn predecessor(&self, node: usize) -> usize {
        let mut current = self.head;
        while current != NULL_NODE {
            let next = self.nodes[current].next;
            if next == node {
                return current;
            }
            current = next;
        }
        NULL_NODE
    }

    fn relink_predecessor(&mut self, node: usize, replacement: usize) {
        if self.head == node {
            self.head = replacement;
            return;
        }
        let predecessor = self.predecessor(node);
        if predecessor != NULL_NODE {
            self.nodes[predecessor].next = replacement;
        }
    }

    fn nth(&self, index: usize) -> usize {
        let mut node = self.head;
        for _ in 0..index {
            if node == NULL_NODE {
                break;
            }
            node = self.nodes[node].next;
        }
        node
    }

    fn value(&self, node: usize) -> Option<&T> {
        self.nodes.get(node).map(|n| &n.value)
    }

    fn value_mut(&mut self, node: usize) -> Option<&mut T> {
        self.nodes.get_mut(node).map(|n| &mut n.value)
    }
}

impl<T> Traverse for SimpleList<T> {
    type State = SimpleState;

    fn start_state(&self, start_index: usize) -> SimpleState {
        if self.is_empty() {
            return self.end_state();
        }
        let index = clamp_start(start_index, self.len());
        SimpleState {
            next: self.nth(index),
            previous: index.checked_sub(1).map_or(NULL_NODE, |i| self.nth(i)),
        }
    }

    fn end_state(&self) -> SimpleState {
        SimpleState {
            next: NULL_NODE,
            previous: self.predecessor(NULL_NODE),
        }
    }

    fn has_next(&self, state: &SimpleState) -> bool {
        state.next != NULL_NODE
    }

    fn step_next(&self, state: &mut SimpleState) -> Option<usize> {
        let current = state.next;
        let node = self.nodes.get(current)?;
        state.previous = current;
        state.next = node.next;
        Some(current)
    }

    fn has_previous(&self, state: &SimpleState) -> bool {
        state.previous != NULL_NODE
    }

    fn step_previous(&self, state: &mut SimpleState) -> Option<usize> {
        let current = state.previous;
        if current >= self.nodes.len() {
            return None;
        }
        state.next = current;
        state.previous = if current == self.head {
            NULL_NODE
        } else {
            self.predecessor(current)
        };
        Some(current)
    }
}

impl<T> Iterable<T> for SimpleList<T> {
    fn cursor(&self, start_index: usize) -> Cursor<'_, T> {
        Cursor::from_traverse(self, self.start_state(start_index), Self::value)
    }

    fn end_cursor(&self) -> Cursor<'_, T> {
        Cursor::from_traverse(self, self.end_state(), Self::value)
    }
}

impl<T> IterableMut<T> for SimpleList<T> {
    fn cursor_mut(&mut self, start_index: usize) -> CursorMut<'_, T> {
        let state = self.start_state(start_index);
        CursorMut::from_traverse(self, state, Self::value_mut)
    }

    fn end_cursor_mut(&mut self) -> CursorMut<'_, T> {
        let state = self.end_state();
        CursorMut::from_traverse(self, state, Self::value_mut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> SimpleList<i32> {
        let mut list = SimpleList::new();
        for value in 1..=4 {
            list.add(value);
        }
        list
    }

    #[test]
    fn test_add_pushes_front() {
        let list = filled();
        assert_eq!(list.first(), Some(&4));
        let forward: Vec<i32> = list.cursor(0).copied().collect();
        assert_eq!(forward, vec![4, 3, 2, 1]);
        let backward: Vec<i32> = list.end_cursor().backward().copied().collect();
        assert_eq!(backward, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_remove_relinks() {
        let mut list = filled();
        assert!(list.remove(&3));
        assert!(list.remove(&4));
        assert!(!list.remove(&4));
        assert_eq!(list.len(), 2);
        assert!(list.contains(&1));
        let forward: Vec<i32> = list.cursor(0).copied().collect();
        assert_eq!(forward, vec![2, 1]);
        list.add(7);
        let forward: Vec<i32> = list.cursor(0).copied().collect();
        assert_eq!(forward, vec![7, 2, 1]);
    }

    #[test]
    fn test_cursor_from_middle() {
        let list = filled();
        let mut cursor = list.cursor(2);
        assert_eq!(cursor.previous(), Some(&3));
        assert_eq!(cursor.previous(), Some(&4));
        assert_eq!(cursor.previous(), None);
        assert_eq!(cursor.next(), Some(&4));
    }

    #[test]
    fn test_empty_list() {
        let list: SimpleList<u8> = SimpleList::new();
        assert!(!list.cursor(3).has_next());
        assert!(!list.end_cursor().has_previous());
    }
}
