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

//! Fibonacci heap.

use super::{Ascending, Comparer};
use crate::container::cursor::{clamp_start, Cursor, CursorMut, Iterable, IterableMut, Traverse};
use crate::container::forest::{Forest, PreorderState};

const NULL_NODE: usize = usize::MAX;

#[derive(Debug, Clone)]
struct FibonacciNode<K, V> {
    entry: Option<(K, V)>,
    parent: usize,
    child: usize,
    left: usize,
    right: usize,
    degree: usize,
}

impl<K, V> FibonacciNode<K, V> {
    fn detached(index: usize, entry: Option<(K, V)>) -> Self {
        Self {
            entry,
            parent: NULL_NODE,
            child: NULL_NODE,
            left: index,
            right: index,
            degree: 0,
        }
    }
}

/// A Fibonacci heap.
///
/// Insertion and merging only splice circular root lists; the trees are
/// consolidated by degree when the top entry is extracted. The root list is
/// walked starting at the top node.
#[derive(Debug, Clone)]
pub struct FibonacciHeap<K, V, C = Ascending> {
    nodes: Vec<FibonacciNode<K, V>>,
    free: Vec<usize>,
    top: usize,
    len: usize,
    comparer: C,
}

impl<K, V, C: Default> Default for FibonacciHeap<K, V, C> {
    fn default() -> Self {
        Self::with_comparer(C::default())
    }
}

impl<K, V> FibonacciHeap<K, V> {
    /// Creates an empty min-heap.
    pub fn new() -> Self {
        Self::with_comparer(Ascending)
    }
}

impl<K, V, C> FibonacciHeap<K, V, C> {
    /// Creates an empty heap ordered by `comparer`.
    pub fn with_comparer(comparer: C) -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            top: NULL_NODE,
            len: 0,
            comparer,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.top = NULL_NODE;
        self.len = 0;
    }

    /// The entry on top.
    pub fn top(&self) -> Option<(&K, &V)> {
        self.nodes
            .get(self.top)?
            .entry
            .as_ref()
            .map(|(key, value)| (key, value))
    }

    fn value_at(&self, slot: usize) -> Option<&V> {
        self.nodes.get(slot)?.entry.as_ref().map(|(_, value)| value)
    }

    fn value_at_mut(&mut self, slot: usize) -> Option<&mut V> {
        self.nodes.get_mut(slot)?.entry.as_mut().map(|(_, value)| value)
    }

    fn key_at(&self, node: usize) -> Option<&K> {
        self.nodes.get(node)?.entry.as_ref().map(|(key, _)| key)
    }

    /// Splices the circular list starting at `b` behind `a`.
    fn splice(&mut self, a: usize, b: usize) {
        let a_right = self.nodes[a].right;
        let b_left = self.nodes[b].left;
        self.nodes[a].right = b;
        self.nodes[b].left = a;
        self.nodes[b_left].right = a_right;
        self.nodes[a_right].left = b_left;
    }

    /// Detaches `node` from its circular list, leaving it self-linked.
    fn cut_out(&mut self, node: usize) {
        let left = self.nodes[node].left;
        let right = self.nodes[node].right;
        self.nodes[left].right = right;
        self.nodes[right].left = left;
        self.nodes[node].left = node;
        self.nodes[node].right = node;
    }

    /// Members of the circular list containing `start`.
    fn ring(&self, start: usize) -> Vec<usize> {
        let mut members = Vec::new();
        if start == NULL_NODE {
            return members;
        }
        let mut node = start;
        loop {
            members.push(node);
            node = self.nodes[node].right;
            if node == start {
                break;
            }
        }
        members
    }
}

impl<K, V, C: Comparer<K>> FibonacciHeap<K, V, C> {
    /// Inserts an entry.
    pub fn add(&mut self, key: K, value: V) {
        let entry = Some((key, value));
        let node = match self.free.pop() {
            Some(index) => {
                self.nodes[index] = FibonacciNode::detached(index, entry);
                index
            }
            None => {
                let index = self.nodes.len();
                self.nodes.push(FibonacciNode::detached(index, entry));
                index
            }
        };
        self.add_root(node);
        self.len += 1;
    }

    /// Removes and returns the entry on top.
    pub fn extract_top(&mut self) -> Option<(K, V)> {
        let top = self.top;
        if top >= self.nodes.len() {
            return None;
        }

        // Promote the children to roots.
        for child in self.ring(self.nodes[top].child) {
            self.nodes[child].parent = NULL_NODE;
        }
        let child = self.nodes[top].child;
        if child != NULL_NODE {
            self.splice(top, child);
            self.nodes[top].child = NULL_NODE;
        }

        let next = self.nodes[top].right;
        self.cut_out(top);
        self.top = if next == top { NULL_NODE } else { next };
        if self.top != NULL_NODE {
            self.consolidate();
        }

        let entry = self.nodes[top].entry.take();
        self.nodes[top].degree = 0;
        self.free.push(top);
        self.len -= 1;
        entry
    }

    /// Moves every entry of `other` into this heap.
    pub fn merge(&mut self, other: FibonacciHeap<K, V, C>) {
        if other.top == NULL_NODE {
            return;
        }

        let offset = self.nodes.len();
        let shift = |index: usize| {
            if index == NULL_NODE {
                NULL_NODE
            } else {
                index + offset
            }
        };

        self.nodes.extend(other.nodes.into_iter().map(|mut node| {
            node.parent = shift(node.parent);
            node.child = shift(node.child);
            node.left = shift(node.left);
            node.right = shift(node.right);
            node
        }));
        self.free.extend(other.free.into_iter().map(shift));
        self.add_root(shift(other.top));
        self.len += other.len;
    }

    fn precedes(&self, a: usize, b: usize) -> bool {
        match (self.key_at(a), self.key_at(b)) {
            (Some(a), Some(b)) => self.comparer.precedes(a, b),
            _ => false,
        }
    }

    /// Splices the list starting at `node` into the root list.
    fn add_root(&mut self, node: usize) {
        if self.top == NULL_NODE {
            self.top = node;
            return;
        }
        self.splice(self.top, node);
        if self.precedes(node, self.top) {
            self.top = node;
        }
    }

    /// Makes root `child` a child of root `parent`.
    fn link(&mut self, child: usize, parent: usize) {
        self.cut_out(child);
        self.nodes[child].parent = parent;
        let first = self.nodes[parent].child;
        if first == NULL_NODE {
            self.nodes[parent].child = child;
        } else {
            self.splice(first, child);
        }
        self.nodes[parent].degree += 1;
    }

    /// Links roots of equal degree until all root degrees differ.
    fn consolidate(&mut self) {
        let mut by_degree: Vec<usize> = Vec::new();

        for root in self.ring(self.top) {
            let mut current = root;
            let mut degree = self.nodes[current].degree;
            loop {
                if degree >= by_degree.len() {
                    by_degree.resize(degree + 1, NULL_NODE);
                }
                let other = by_degree[degree];
                if other == NULL_NODE {
                    break;
                }
                let (winner, loser) = if self.precedes(other, current) {
                    (other, current)
                } else {
                    (current, other)
                };
                self.link(loser, winner);
                by_degree[degree] = NULL_NODE;
                current = winner;
                degree += 1;
            }
            by_degree[degree] = current;
        }

        self.top = NULL_NODE;
        for root in by_degree.into_iter().filter(|&root| root != NULL_NODE) {
            if self.top == NULL_NODE || self.precedes(root, self.top) {
                self.top = root;
            }
        }
    }
}

impl<K, V, C> Forest for FibonacciHeap<K, V, C> {
    fn first_root(&self) -> Option<usize> {
        (self.top != NULL_NODE).then_some(self.top)
    }

    fn last_root(&self) -> Option<usize> {
        self.first_root().map(|top| self.nodes[top].left)
    }

    fn first_child(&self, node: usize) -> Option<usize> {
        let child = self.nodes[node].child;
        (child != NULL_NODE).then_some(child)
    }

    fn last_child(&self, node: usize) -> Option<usize> {
        self.first_child(node).map(|child| self.nodes[child].left)
    }

    fn next_sibling(&self, node: usize, parent: Option<usize>) -> Option<usize> {
        let head = match parent {
            Some(parent) => self.nodes[parent].child,
            None => self.top,
        };
        let right = self.nodes[node].right;
        (right != head).then_some(right)
    }

    fn previous_sibling(&self, node: usize, parent: Option<usize>) -> Option<usize> {
        let head = match parent {
            Some(parent) => self.nodes[parent].child,
            None => self.top,
        };
        (node != head).then(|| self.nodes[node].left)
    }
}

impl<K, V, C> Traverse for FibonacciHeap<K, V, C> {
    type State = PreorderState;

    fn start_state(&self, start_index: usize) -> PreorderState {
        PreorderState::at(self, clamp_start(start_index, self.len))
    }

    fn end_state(&self) -> PreorderState {
        PreorderState::back()
    }

    fn has_next(&self, state: &PreorderState) -> bool {
        state.has_next()
    }

    fn step_next(&self, state: &mut PreorderState) -> Option<usize> {
        state.step_next(self)
    }

    fn has_previous(&self, state: &PreorderState) -> bool {
        state.has_previous(self)
    }

    fn step_previous(&self, state: &mut PreorderState) -> Option<usize> {
        state.step_previous(self)
    }
}

impl<K, V, C> Iterable<V> for FibonacciHeap<K, V, C> {
    fn cursor(&self, start_index: usize) -> Cursor<'_, V> {
        Cursor::from_traverse(self, self.start_state(start_index), Self::value_at)
    }

    fn end_cursor(&self) -> Cursor<'_, V> {
        Cursor::from_traverse(self, self.end_state(), Self::value_at)
    }
}

impl<K, V, C> IterableMut<V> for FibonacciHeap<K, V, C> {
    fn cursor_mut(&mut self, start_index: usize) -> CursorMut<'_, V> {
        let state = self.start_state(start_index);
        CursorMut::from_traverse(self, state, Self::value_at_mut)
    }

    fn end_cursor_mut(&mut self) -> CursorMut<'_, V> {
        let state = self.end_state();
        CursorMut::from_traverse(self, state, Self::value_at_mut)
    }
}
