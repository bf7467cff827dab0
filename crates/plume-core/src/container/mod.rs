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

//! # Containers
//!
//! Owning collections with bidirectional, copy-on-write cursors.
//!
//! Every backend implements [`Iterable`] and most also implement
//! [`IterableMut`]. The list-shaped ones share the [`Container`] API.

pub mod array;
pub mod bitset;
pub mod cursor;
pub mod fast_pool;
pub mod forest;
pub mod hash_map;
pub mod heap;
pub mod list;
mod linked;
pub mod pool;
pub mod queue;
pub mod simple_list;
pub mod simple_map;
pub mod stack;

pub use array::Array;
pub use bitset::Bitset;
pub use cursor::{
    Backward, Cursor, CursorImpl, CursorMut, CursorMutImpl, Iterable, IterableMut, Traverse,
};
pub use fast_pool::FastPool;
pub use forest::{Forest, PreorderState};
pub use hash_map::{Doubling, Grower, HashMap, HashStatistics};
pub use heap::{Ascending, BinaryHeap, BinomialHeap, Comparer, Descending, FibonacciHeap};
pub use list::List;
pub use pool::Pool;
pub use queue::Queue;
pub use simple_list::SimpleList;
pub use simple_map::SimpleMap;
pub use stack::Stack;

/// The list-like API shared by index-addressable containers.
///
/// Indices follow iteration order. Failed operations return `None` or `false`
/// and leave the container untouched.
pub trait Container<T>: Iterable<T> {
    /// Number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if the container holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`.
    fn get(&self, index: usize) -> Option<&T>;

    /// Mutable element at `index`.
    fn get_mut(&mut self, index: usize) -> Option<&mut T>;

    /// Appends `value` and returns the stored element.
    fn add(&mut self, value: T) -> &mut T;

    /// Inserts `value` in front of the element at `index`.
    ///
    /// `None` appends; an index past the end fails.
    fn add_at_index(&mut self, index: Option<usize>, value: T) -> Option<&mut T>;

    /// Appends `count` clones of `other`, starting at its element `start`.
    ///
    /// `None` copies everything up to the end. Fails without side effects
    /// when the range does not fit into `other`.
    fn extend_from(&mut self, other: &dyn Container<T>, start: usize, count: Option<usize>) -> bool
    where
        T: Clone,
    {
        let available = other.len().saturating_sub(start);
        let count = count.unwrap_or(available);
        if start > other.len() || count > available {
            return false;
        }
        for index in start..start + count {
            match other.get(index) {
                Some(value) => {
                    self.add(value.clone());
                }
                None => return false,
            }
        }
        true
    }

    /// Returns `true` if an element equal to `value` is stored.
    fn is_element(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(value).is_some()
    }

    /// Index of the first element equal to `value`.
    fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.cursor(0).position(|element| element == value)
    }

    /// Replaces the first element equal to `old` with `new`.
    fn replace(&mut self, old: &T, new: T) -> bool
    where
        T: PartialEq,
    {
        match self.index_of(old) {
            Some(index) => self.replace_at_index(index, new),
            None => false,
        }
    }

    /// Overwrites the element at `index`.
    fn replace_at_index(&mut self, index: usize, value: T) -> bool {
        match self.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Removes the first element equal to `value`.
    fn remove(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        match self.index_of(value) {
            Some(index) => self.remove_at_index(index),
            None => false,
        }
    }

    /// Removes the element at `index`.
    fn remove_at_index(&mut self, index: usize) -> bool;

    /// Removes every element.
    fn clear(&mut self);
}
