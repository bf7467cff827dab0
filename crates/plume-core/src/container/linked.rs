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

//! Index-linked chains shared by the list, pool and fast pool backends.
//!
//! Nodes live in a `Vec` arena and refer to each other by index. A [`Chain`]
//! keeps the head, tail and length of one doubly linked sequence threaded
//! through such an arena; pools thread a second chain for their free nodes.

pub(crate) const NULL_NODE: usize = usize::MAX;

/// Previous/next indices of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Link {
    pub(crate) prev: usize,
    pub(crate) next: usize,
}

impl Link {
    pub(crate) const DETACHED: Link = Link {
        prev: NULL_NODE,
        next: NULL_NODE,
    };
}

/// A node type carrying a [`Link`].
pub(crate) trait HasLink {
    fn link(&self) -> &Link;
    fn link_mut(&mut self) -> &mut Link;
}

/// Cursor position inside a chain: the nodes on both sides of the gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkedState {
    next: usize,
    previous: usize,
}

/// Head, tail and length of a doubly linked sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Chain {
    pub(crate) head: usize,
    pub(crate) tail: usize,
    pub(crate) len: usize,
}

impl Default for Chain {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Chain {
    pub(crate) const EMPTY: Chain = Chain {
        head: NULL_NODE,
        tail: NULL_NODE,
        len: 0,
    };

    /// Links `node` in front of `before`, or at the back for [`NULL_NODE`].
    pub(crate) fn insert_before<N: HasLink>(
        &mut self,
        nodes: &mut [N],
        node: usize,
        before: usize,
    ) {
        let prev = if before == NULL_NODE {
            self.tail
        } else {
            nodes[before].link().prev
        };

        *nodes[node].link_mut() = Link { prev, next: before };

        if prev == NULL_NODE {
            self.head = node;
        } else {
            nodes[prev].link_mut().next = node;
        }
        if before == NULL_NODE {
            self.tail = node;
        } else {
            nodes[before].link_mut().prev = node;
        }
        self.len += 1;
    }

    /// Detaches `node` from the chain.
    pub(crate) fn unlink<N: HasLink>(&mut self, nodes: &mut [N], node: usize) {
        let Link { prev, next } = *nodes[node].link();

        if prev == NULL_NODE {
            self.head = next;
        } else {
            nodes[prev].link_mut().next = next;
        }
        if next == NULL_NODE {
            self.tail = prev;
        } else {
            nodes[next].link_mut().prev = prev;
        }
        *nodes[node].link_mut() = Link::DETACHED;
        self.len -= 1;
    }

    /// Repoints the neighbours of a node that was moved to index `to`.
    pub(crate) fn relocate<N: HasLink>(&mut self, nodes: &mut [N], to: usize) {
        let Link { prev, next } = *nodes[to].link();

        if prev == NULL_NODE {
            self.head = to;
        } else {
            nodes[prev].link_mut().next = to;
        }
        if next == NULL_NODE {
            self.tail = to;
        } else {
            nodes[next].link_mut().prev = to;
        }
    }

    /// Node at position `index`, walking from the closer end.
    pub(crate) fn nth<N: HasLink>(&self, nodes: &[N], index: usize) -> Option<usize> {
        if index >= self.len {
            return None;
        }

        let mut node;
        if index <= self.len / 2 {
            node = self.head;
            for _ in 0..index {
                node = nodes[node].link().next;
            }
        } else {
            node = self.tail;
            for _ in 0..self.len - 1 - index {
                node = nodes[node].link().prev;
            }
        }
        Some(node)
    }

    // --- Traversal ---

    pub(crate) fn start_state<N: HasLink>(&self, nodes: &[N], start_index: usize) -> LinkedState {
        match self.nth(nodes, super::cursor::clamp_start(start_index, self.len)) {
            Some(next) => LinkedState {
                next,
                previous: nodes[next].link().prev,
            },
            None => LinkedState {
                next: NULL_NODE,
                previous: NULL_NODE,
            },
        }
    }

    pub(crate) fn end_state(&self) -> LinkedState {
        LinkedState {
            next: NULL_NODE,
            previous: self.tail,
        }
    }

    pub(crate) fn step_next<N: HasLink>(
        &self,
        nodes: &[N],
        state: &mut LinkedState,
    ) -> Option<usize> {
        if state.next == NULL_NODE {
            return None;
        }
        let current = state.next;
        state.previous = current;
        state.next = nodes[current].link().next;
        Some(current)
    }

    pub(crate) fn step_previous<N: HasLink>(
        &self,
        nodes: &[N],
        state: &mut LinkedState,
    ) -> Option<usize> {
        if state.previous == NULL_NODE {
            return None;
        }
        let current = state.previous;
        state.next = current;
        state.previous = nodes[current].link().prev;
        Some(current)
    }
}

impl LinkedState {
    pub(crate) fn has_next(&self) -> bool {
        self.next != NULL_NODE
    }

    pub(crate) fn has_previous(&self) -> bool {
        self.previous != NULL_NODE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Node(Link);

    impl HasLink for Node {
        fn link(&self) -> &Link {
            &self.0
        }

        fn link_mut(&mut self) -> &mut Link {
            &mut self.0
        }
    }

    fn order(chain: &Chain, nodes: &[Node]) -> Vec<usize> {
        let mut state = chain.start_state(nodes, 0);
        let mut out = Vec::new();
        while let Some(node) = chain.step_next(nodes, &mut state) {
            out.push(node);
        }
        out
    }

    #[test]
    fn test_insert_unlink_and_nth() {
        let mut nodes: Vec<Node> = (0..4).map(|_| Node(Link::DETACHED)).collect();
        let mut chain = Chain::EMPTY;
        chain.insert_before(&mut nodes, 0, NULL_NODE);
        chain.insert_before(&mut nodes, 1, NULL_NODE);
        chain.insert_before(&mut nodes, 2, 0);
        chain.insert_before(&mut nodes, 3, 1);
        assert_eq!(order(&chain, &nodes), vec![2, 0, 3, 1]);
        assert_eq!(chain.nth(&nodes, 3), Some(1));
        assert_eq!(chain.nth(&nodes, 1), Some(0));
        assert_eq!(chain.nth(&nodes, 4), None);

        chain.unlink(&mut nodes, 2);
        chain.unlink(&mut nodes, 1);
        assert_eq!(order(&chain, &nodes), vec![0, 3]);
        assert_eq!((chain.head, chain.tail, chain.len), (0, 3, 2));
    }

    #[test]
    fn test_relocate_after_swap_remove() {
        let mut nodes: Vec<Node> = (0..3).map(|_| Node(Link::DETACHED)).collect();
        let mut chain = Chain::EMPTY;
        for node in 0..3 {
            chain.insert_before(&mut nodes, node, NULL_NODE);
        }
        chain.unlink(&mut nodes, 0);
        nodes.swap_remove(0);
        chain.relocate(&mut nodes, 0);
        assert_eq!(order(&chain, &nodes), vec![1, 0]);
    }
}
