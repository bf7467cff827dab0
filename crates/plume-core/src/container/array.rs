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

//! Contiguous growable array.

use super::cursor::{clamp_start, Cursor, CursorMut, Iterable, IterableMut, Traverse};
use super::Container;

/// Contiguous storage with an index cursor.
///
/// The cursor stores a single position and checks it against the length of
/// the array at every step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array<T> {
    elements: Vec<T>,
}

impl<T> Default for Array<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Array<T> {
    /// Creates an empty array.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Creates an empty array with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
        }
    }

    /// Number of elements the array holds without reallocating.
    pub fn capacity(&self) -> usize {
        self.elements.capacity()
    }

    /// Resizes to `len`, filling new slots with `T::default()`.
    pub fn resize(&mut self, len: usize)
    where
        T: Default,
    {
        self.elements.resize_with(len, T::default);
    }

    /// Contiguous view of the elements.
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Mutable contiguous view of the elements.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.elements
    }

    fn slot(&self, slot: usize) -> Option<&T> {
        self.elements.get(slot)
    }

    fn slot_mut(&mut self, slot: usize) -> Option<&mut T> {
        self.elements.get_mut(slot)
    }
}

impl<T> From<Vec<T>> for Array<T> {
    fn from(elements: Vec<T>) -> Self {
        Self { elements }
    }
}

impl<T> FromIterator<T> for Array<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<T> Traverse for Array<T> {
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

impl<T> Iterable<T> for Array<T> {
    fn cursor(&self, start_index: usize) -> Cursor<'_, T> {
        Cursor::from_traverse(self, self.start_state(start_index), Self::slot)
    }

    fn end_cursor(&self) -> Cursor<'_, T> {
        Cursor::from_traverse(self, self.end_state(), Self::slot)
    }
}

impl<T> IterableMut<T> for Array<T> {
    fn cursor_mut(&mut self, start_index: usize) -> CursorMut<'_, T> {
        let state = self.start_state(start_index);
        CursorMut::from_traverse(self, state, Self::slot_mut)
    }

    fn end_cursor_mut(&mut self) -> CursorMut<'_, T> {
        let state = self.end_state();
        CursorMut::from_traverse(self, state, Self::slot_mut)
    }
}

impl<T> Container<T> for Array<T> {
    fn len(&self) -> usize {
        self.elements.len()
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.elements.get(index)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.elements.get_mut(index)
    }

    fn add(&mut self, value: T) -> &mut T {
        let index = self.elements.len();
        self.elements.push(value);
        &mut self.elements[index]
    }

    fn add_at_index(&mut self, index: Option<usize>, value: T) -> Option<&mut T> {
        let index = index.unwrap_or(self.elements.len());
        if index > self.elements.len() {
            return None;
        }
        self.elements.insert(index, value);
        self.elements.get_mut(index)
    }

    fn remove_at_index(&mut self, index: usize) -> bool {
        if index >= self.elements.len() {
            return false;
        }
        self.elements.remove(index);
        true
    }

    fn clear(&mut self) {
        self.elements.clear();
    }
}
