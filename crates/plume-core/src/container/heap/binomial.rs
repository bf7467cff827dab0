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

//! Binomial heap.

use super::{Ascending, Comparer};
use crate::container::cursor::{clamp_start, Cursor, CursorMut, Iterable, IterableMut, Traverse};
use crate::container::forest::{Forest, PreorderState};

const NULL_NODE: usize = usize::MAX;

#[derive(Debug, Clone)]
struct BinomialNode<K, V> {
    entry: Option<(K, V)>,
    degree: usize,
    child: usize,
    sibling: usize,
}

/// A forest of binomial trees.
///
/// Nodes only link to their first child and their next sibling. The root list
/// is ordered by increasing degree; every child list by decreasing degree.
/// Going backwards over a sibling list is a linear search from its head.
#[derive(Debug, Clone)]
pub struct BinomialHeap<K, V, C = Ascending> {
    nodes: Vec<BinomialNode<K, V>>,
    free: Vec<usize>,
    head: usize,
    len: usize,
    comparer: C,
}

impl<K, V, C: Default> Default for BinomialHeap<K, V, C> {
    fn default() -> Self {
        Self::with_comparer(C::default())
    }
}

impl<K, V> BinomialHeap<K, V> {
    /// Creates an empty min-heap.
    pub fn new() -> Self {
        Self::with_comparer(Ascending)
    }
}

impl<K, V, C> BinomialHeap<K, V, C> {
    /// Creates an empty heap ordered by `comparer`.
    pub fn with_comparer(comparer: C) -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: NULL_NODE,
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
        self.head = NULL_NODE;
        self.len = 0;
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

    fn last_in_list(&self, mut node: usize) -> Option<usize> {
        if node == NULL_NODE {
            return None;
        }
        while self.nodes[node].sibling != NULL_NODE {
            node = self.nodes[node].sibling;
        }
        Some(node)
    }
}

impl<K, V, C: Comparer<K>> BinomialHeap<K, V, C> {
    /// Inserts an entry.
    pub fn add(&mut self, key: K, value: V) {
        let node = self.allocate(key, value);
        self.union(node);
        self.len += 1;
    }

    /// The entry on top.
    pub fn top(&self) -> Option<(&K, &V)> {
        let (_, best) = self.best_root()?;
        self.nodes[best].entry.as_ref().map(|(key, value)| (key, value))
    }

    /// Removes and returns the entry on top.
    pub fn extract_top(&mut self) -> Option<(K, V)> {
        let (previous, best) = self.best_root()?;

        // Unhook the tree from the root list.
        let after = self.nodes[best].sibling;
        if previous == NULL_NODE {
            self.head = after;
        } else {
            self.nodes[previous].sibling = after;
        }

        // Its children form a heap of their own once reversed into
        // increasing degree order.
        let mut reversed = NULL_NODE;
        let mut child = self.nodes[best].child;
        while child != NULL_NODE {
            let next = self.nodes[child].sibling;
            self.nodes[child].sibling = reversed;
            reversed = child;
            child = next;
        }
        self.union(reversed);

        let node = &mut self.nodes[best];
        node.child = NULL_NODE;
        node.sibling = NULL_NODE;
        node.degree = 0;
        let entry = node.entry.take();
        self.free.push(best);
        self.len -= 1;
        entry
    }

    /// Moves every entry of `other` into this heap.
    pub fn merge(&mut self, other: BinomialHeap<K, V, C>) {
        if other.head == NULL_NODE {
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
            node.child = shift(node.child);
            node.sibling = shift(node.sibling);
            node
        }));
        self.free.extend(other.free.into_iter().map(shift));
        self.union(shift(other.head));
        self.len += other.len;
    }

    fn allocate(&mut self, key: K, value: V) -> usize {
        let node = BinomialNode {
            entry: Some((key, value)),
            degree: 0,
            child: NULL_NODE,
            sibling: NULL_NODE,
        };
        match self.free.pop() {
            Some(index) => {
                self.nodes[index] = node;
                index
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn precedes(&self, a: usize, b: usize) -> bool {
        match (self.key_at(a), self.key_at(b)) {
            (Some(a), Some(b)) => self.comparer.precedes(a, b),
            _ => false,
        }
    }

    /// Root holding the top key, with the root in front of it.
    fn best_root(&self) -> Option<(usize, usize)> {
        if self.head == NULL_NODE {
            return None;
        }
        let mut best = (NULL_NODE, self.head);
        let mut previous = self.head;
        let mut node = self.nodes[self.head].sibling;
        while node != NULL_NODE {
            if self.precedes(node, best.1) {
                best = (previous, node);
            }
            previous = node;
            node = self.nodes[node].sibling;
        }
        Some(best)
    }

    /// Makes root `child` the first child of root `parent`.
    fn link(&mut self, child: usize, parent: usize) {
        self.nodes[child].sibling = self.nodes[parent].child;
        self.nodes[parent].child = child;
        self.nodes[parent].degree += 1;
    }

    /// Interleaves two root lists by increasing degree.
    fn merge_root_lists(&mut self, mut a: usize, mut b: usize) -> usize {
        let mut head = NULL_NODE;
        let mut tail = NULL_NODE;
        while a != NULL_NODE || b != NULL_NODE {
            let take_a = b == NULL_NODE
                || (a != NULL_NODE && self.nodes[a].degree <= self.nodes[b].degree);
            let node = if take_a {
                let node = a;
                a = self.nodes[a].sibling;
                node
            } else {
                let node = b;
                b = self.nodes[b].sibling;
                node
            };
            if tail == NULL_NODE {
                head = node;
            } else {
                self.nodes[tail].sibling = node;
            }
            tail = node;
        }
        if tail != NULL_NODE {
            self.nodes[tail].sibling = NULL_NODE;
        }
        head
    }

    /// Merges the root list starting at `other` into the heap.
    fn union(&mut self, other: usize) {
        let mut head = self.merge_root_lists(self.head, other);
        if head == NULL_NODE {
            self.head = NULL_NODE;
            return;
        }

        let mut previous = NULL_NODE;
        let mut current = head;
        let mut next = self.nodes[current].sibling;
        while next != NULL_NODE {
            let after = self.nodes[next].sibling;
            let degree = self.nodes[current].degree;
            let skip = degree != self.nodes[next].degree
                || (after != NULL_NODE && self.nodes[after].degree == degree);

            if skip {
                previous = current;
                current = next;
            } else if !self.precedes(next, current) {
                self.nodes[current].sibling = after;
                self.link(next, current);
            } else {
                if previous == NULL_NODE {
                    head = next;
                } else {
                    self.nodes[previous].sibling = next;
                }
                self.link(current, next);
                current = next;
            }
            next = self.nodes[current].sibling;
        }
        self.head = head;
    }
}

impl<K, V, C> Forest for BinomialHeap<K, V, C> {
    fn first_root(&self) -> Option<usize> {
        (self.head != NULL_NODE).then_some(self.head)
    }

    fn last_root(&self) -> Option<usize> {
        self.last_in_list(self.head)
    }

    fn first_child(&self, node: usize) -> Option<usize> {
        let child = self.nodes[node].child;
        (child != NULL_NODE).then_some(child)
    }

    fn last_child(&self, node: usize) -> Option<usize> {
        self.last_in_list(self.nodes[node].child)
    }

    fn next_sibling(&self, node: usize, _parent: Option<usize>) -> Option<usize> {
        let sibling = self.nodes[node].sibling;
        (sibling != NULL_NODE).then_some(sibling)
    }

    fn previous_sibling(&self, node: usize, parent: Option<usize>) -> Option<usize> {
        let mut current = match parent {
            Some(parent) => self.nodes[parent].child,
            None => self.head,
        };
        while current != NULL_NODE {
            let sibling = self.nodes[current].sibling;
            if sibling == node {
                return Some(current);
            }
            current = sibling;
        }
        None
    }
}

impl<K, V, C> Traverse for BinomialHeap<K, V, C> {
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

impl<K, V, C> Iterable<V> for BinomialHeap<K, V, C> {
    fn cursor(&self, start_index: usize) -> Cursor<'_, V> {
        Cursor::from_traverse(self, self.start_state(start_index), Self::value_at)
    }

    fn end_cursor(&self) -> Cursor<'_, V> {
        Cursor::from_traverse(self, self.end_state(), Self::value_at)
    }
}

impl<K, V, C> IterableMut<V> for BinomialHeap<K, V, C> {
    fn cursor_mut(&mut self, start_index: usize) -> CursorMut<'_, V> {
        let state = self.start_state(start_index);
        CursorMut::from_traverse(self, state, Self::value_at_mut)
    }

    fn end_cursor_mut(&mut self) -> CursorMut<'_, V> {
        let state = self.end_state();
        CursorMut::from_traverse(self, state, Self::value_at_mut)
    }
}
