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

//! Resumable pre-order traversal for tree-shaped heaps.
//!
//! Binomial and Fibonacci heaps store their nodes as forests whose links only
//! point downwards and sideways. The traversal therefore keeps the path from
//! the current root down to the node under the cursor on an explicit stack, so
//! both directions can continue from any position without recursion.

/// Read-only navigation over a forest stored in an arena.
///
/// Node handles are arena indices. `parent` is the node owning the sibling
/// list `node` belongs to, or `None` for the root list.
pub trait Forest {
    /// First tree of the root list.
    fn first_root(&self) -> Option<usize>;
    /// Last tree of the root list.
    fn last_root(&self) -> Option<usize>;
    /// First child of `node`.
    fn first_child(&self, node: usize) -> Option<usize>;
    /// Last child of `node`.
    fn last_child(&self, node: usize) -> Option<usize>;
    /// Sibling following `node` in its list.
    fn next_sibling(&self, node: usize, parent: Option<usize>) -> Option<usize>;
    /// Sibling preceding `node` in its list.
    fn previous_sibling(&self, node: usize, parent: Option<usize>) -> Option<usize>;
}

/// Cursor position of a pre-order traversal.
///
/// The stack holds the path from a root to the node the next forward step
/// returns. An empty stack is the position behind the last node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreorderState {
    path: Vec<usize>,
}

impl PreorderState {
    /// Position in front of the first node.
    pub fn front<F: Forest + ?Sized>(forest: &F) -> Self {
        Self {
            path: forest.first_root().into_iter().collect(),
        }
    }

    /// Position in front of the node with pre-order rank `index`.
    ///
    /// `index` must already be clamped to the number of nodes.
    pub fn at<F: Forest + ?Sized>(forest: &F, index: usize) -> Self {
        let mut state = Self::front(forest);
        for _ in 0..index {
            if state.step_next(forest).is_none() {
                break;
            }
        }
        state
    }

    /// Position behind the last node.
    pub fn back() -> Self {
        Self::default()
    }

    /// Depth of the node under the cursor, root list being depth 0.
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Returns `true` while the cursor is in front of a node.
    pub fn has_next(&self) -> bool {
        !self.path.is_empty()
    }

    /// Returns `true` unless the cursor is in front of the first node.
    pub fn has_previous<F: Forest + ?Sized>(&self, forest: &F) -> bool {
        match self.path.as_slice() {
            [] => forest.first_root().is_some(),
            [root] => forest.first_root() != Some(*root),
            _ => true,
        }
    }

    /// Returns the node in front of the cursor and moves to its successor.
    pub fn step_next<F: Forest + ?Sized>(&mut self, forest: &F) -> Option<usize> {
        let current = *self.path.last()?;

        // Descend first, then climb until a sibling continues the walk.
        if let Some(child) = forest.first_child(current) {
            self.path.push(child);
        } else {
            while let Some(node) = self.path.pop() {
                let parent = self.path.last().copied();
                if let Some(sibling) = forest.next_sibling(node, parent) {
                    self.path.push(sibling);
                    break;
                }
            }
        }

        Some(current)
    }

    /// Moves to the predecessor of the cursor and returns it.
    pub fn step_previous<F: Forest + ?Sized>(&mut self, forest: &F) -> Option<usize> {
        let Some(&node) = self.path.last() else {
            let root = forest.last_root()?;
            self.path.push(root);
            self.descend_last(forest);
            return self.path.last().copied();
        };

        let parent = self
            .path
            .len()
            .checked_sub(2)
            .map(|index| self.path[index]);

        match forest.previous_sibling(node, parent) {
            Some(sibling) => {
                if let Some(top) = self.path.last_mut() {
                    *top = sibling;
                }
                self.descend_last(forest);
            }
            // The first root has no predecessor.
            None => {
                if parent.is_none() {
                    return None;
                }
                self.path.pop();
            }
        }

        self.path.last().copied()
    }

    fn descend_last<F: Forest + ?Sized>(&mut self, forest: &F) {
        while let Some(child) = self.path.last().and_then(|&top| forest.last_child(top)) {
            self.path.push(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A forest stored as explicit child lists.
    ///
    /// ```text
    ///   0        4
    ///  / \       |
    /// 1   3      5
    /// |
    /// 2
    /// ```
    struct Sample {
        roots: Vec<usize>,
        children: Vec<Vec<usize>>,
    }

    impl Sample {
        fn new() -> Self {
            Self {
                roots: vec![0, 4],
                children: vec![vec![1, 3], vec![2], vec![], vec![], vec![5], vec![]],
            }
        }

        fn list(&self, parent: Option<usize>) -> &[usize] {
            match parent {
                Some(p) => &self.children[p],
                None => &self.roots,
            }
        }
    }

    impl Forest for Sample {
        fn first_root(&self) -> Option<usize> {
            self.roots.first().copied()
        }

        fn last_root(&self) -> Option<usize> {
            self.roots.last().copied()
        }

        fn first_child(&self, node: usize) -> Option<usize> {
            self.children[node].first().copied()
        }

        fn last_child(&self, node: usize) -> Option<usize> {
            self.children[node].last().copied()
        }

        fn next_sibling(&self, node: usize, parent: Option<usize>) -> Option<usize> {
            let list = self.list(parent);
            let at = list.iter().position(|&n| n == node)?;
            list.get(at + 1).copied()
        }

        fn previous_sibling(&self, node: usize, parent: Option<usize>) -> Option<usize> {
            let list = self.list(parent);
            let at = list.iter().position(|&n| n == node)?;
            at.checked_sub(1).map(|i| list[i])
        }
    }

    #[test]
    fn test_forward_is_preorder() {
        let forest = Sample::new();
        let mut state = PreorderState::front(&forest);
        let mut visited = Vec::new();
        while let Some(node) = state.step_next(&forest) {
            visited.push(node);
        }
        assert_eq!(visited, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(state, PreorderState::back());
    }

    #[test]
    fn test_backward_is_reverse_preorder() {
        let forest = Sample::new();
        let mut state = PreorderState::back();
        let mut visited = Vec::new();
        while let Some(node) = state.step_previous(&forest) {
            visited.push(node);
        }
        assert_eq!(visited, vec![5, 4, 3, 2, 1, 0]);
        assert!(!state.has_previous(&forest));
        assert!(state.has_next());
    }

    #[test]
    fn test_direction_changes() {
        let forest = Sample::new();
        let mut state = PreorderState::at(&forest, 2);
        assert_eq!(state.depth(), 2);
        assert_eq!(state.step_next(&forest), Some(2));
        assert_eq!(state.step_previous(&forest), Some(2));
        assert_eq!(state.step_previous(&forest), Some(1));
        assert_eq!(state.step_next(&forest), Some(1));
        assert_eq!(state.step_next(&forest), Some(2));
        assert_eq!(state.step_next(&forest), Some(3));
    }

    #[test]
    fn test_empty_forest() {
        let forest = Sample {
            roots: Vec::new(),
            children: Vec::new(),
        };
        let mut state = PreorderState::front(&forest);
        assert!(!state.has_next());
        assert!(!state.has_previous(&forest));
        assert_eq!(state.step_next(&forest), None);
        assert_eq!(state.step_previous(&forest), None);
    }
}
