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

//! First-in first-out queue.

use std::collections::VecDeque;

use super::cursor::{clamp_start, Cursor, CursorMut, Iterable, IterableMut, Traverse};

/// A FIFO queue. Cursors walk from the oldest element to the newest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Queue<T> {
    elements: VecDeque<T>,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Queue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            elements: VecDeque::new(),
        }
    }

    /// Appends `value` behind the newest element.
    pub fn push(&mut self, value: T) {
        self.elements.push_back(value);
    }

    /// Removes the oldest element.
    pub fn pop(&mut self) -> Option<T> {
        self.elements.pop_front()
    }

    /// The oldest element, next to leave the queue.
    pub fn bottom(&self) -> Option<&T> {
        self.elements.front()
    }

    /// The newest element.
    pub fn top(&self) -> Option<&T> {
        self.elements.back()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    fn value(&self, slot: usize) -> Option<&T> {
        self.elements.get(slot)
    }

    fn value_mut(&mut self, slot: usize) -> Option<&mut T> {
        self.elements.get_mut(slot)
    }
}

impl<T> Traverse for Queue<T> {
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

impl<T> Iterable<T> for Queue<T> {
    fn cursor(&self, start_index: usize) -> Cursor<'_, T> {
        Cursor::from_traverse(self, self.start_state(start_index), Self::value)
    }

    fn end_cursor(&self) -> Cursor<'_, T> {
        Cursor::from_traverse(self, self.end_state(), Self::value)
    }
}

impl<T> IterableMut<T> for Queue<T> {
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
    fn test_fifo_order() {
        let mut queue = Queue::new();
        for value in 1..=4 {
            queue.push(value);
        }
        assert_eq!(queue.bottom(), Some(&1));
        assert_eq!(queue.top(), Some(&4));
        assert_eq!(queue.pop(), Some(1));
        queue.push(5);

        let forward: Vec<i32> = queue.cursor(0).copied().collect();
        assert_eq!(forward, vec![2, 3, 4, 5]);
        let backward: Vec<i32> = queue.end_cursor().backward().copied().collect();
        assert_eq!(backward, vec![5, 4, 3, 2]);
    }

    #[test]
    fn test_cursor_sees_live_length() {
        let mut queue = Queue::new();
        queue.push(1u8);
        let cursor = queue.cursor(0);
        assert!(cursor.has_next());
        drop(cursor);
        queue.clear();
        assert!(!queue.cursor(0).has_next());
    }
}
