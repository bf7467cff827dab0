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

//! Last-in first-out stack.

use super::cursor::{clamp_start, Cursor, CursorMut, Iterable, IterableMut, Traverse};

/// A LIFO stack. Cursors walk from the top element down to the bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack<T> {
    elements: Vec<T>,
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Stack<T> {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Pushes `value` on top.
    pub fn push(&mut self, value: T) {
        self.elements.push(value);
    }

    /// Removes the top element.
    pub fn pop(&mut self) -> Option<T> {
        self.elements.pop()
    }

    /// The top element.
    pub fn top(&self) -> Option<&T> {
        self.elements.last()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    // Cursor positions count from the top; slot `n` is the n-th element below it.
    fn value(&self, slot: usize) -> Option<&T> {
        let index = self.elements.len().checked_sub(slot + 1)?;
        self.elements.get(index)
    }

    fn value_mut(&mut self, slot: usize) -> Option<&mut T> {
        let index = self.elements.len().checked_sub(slot + 1)?;
        self.elements.get_mut(index)
    }
}

impl<T> Traverse for Stack<T> {
    type State = usize;

    fn start_state(&self, start_index: usize) -> usize {
        clamp_start(start_index, self.elements.len())
    }

    fn end_state(&self) -> usize {
        self.elements.len()
    }

    fn has_next(&self, state: &usize) -> bool {
        *state < self.elements.len()
    }

    fn step_next(&self, state: &mut usize) -> Option<usize> {
        if !self.has_next(state) {
            return None;
        }
        *state += 1;
        Some(*state - 1)
    }

    fn has_previous(&self, state: &usize) -> bool {
        *state > 0 && *state <= self.elements.len()
    }

    fn step_previous(&self, state: &mut usize) -> Option<usize> {
        if !self.has_previous(state) {
            return None;
        }
        *state -= 1;
        Some(*state)
    }
}

impl<T> Iterable<T> for Stack<T> {
    fn cursor(&self, start_index: usize) -> Cursor<'_, T> {
        Cursor::from_traverse(self, self.start_state(start_index), Self::value)
    }

    fn end_cursor(&self) -> Cursor<'_, T> {
        Cursor::from_traverse(self, self.end_state(), Self::value)
    }
}

impl<T> IterableMut<T> for Stack<T> {
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

    #[test]
    fn test_lifo_order() {
        let mut stack = Stack::new();
        for value in ["a", "b", "c"] {
            stack.push(value);
        }
        assert_eq!(stack.top(), Some(&"c"));
        let top_down: Vec<&str> = stack.cursor(0).copied().collect();
        assert_eq!(top_down, vec!["c", "b", "a"]);
        let bottom_up: Vec<&str> = stack.end_cursor().backward().copied().collect();
        assert_eq!(bottom_up, vec!["a", "b", "c"]);
        assert_eq!(stack.pop(), Some("c"));
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_cursor_mut_from_top() {
        let mut stack = Stack::new();
        stack.push(1);
        stack.push(2);
        {
            let mut cursor = stack.cursor_mut(0);
            if let Some(top) = cursor.next() {
                *top = 20;
            }
        }
        assert_eq!(stack.pop(), Some(20));
        assert_eq!(stack.pop(), Some(1));
        assert!(stack.is_empty());
    }
}
