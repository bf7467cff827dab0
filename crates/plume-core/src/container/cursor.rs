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

//! Bidirectional cursors over the engine containers.
//!
//! A cursor sits in the *gap* between two elements of a container:
//!
//! ```text
//! [A, B, C, D]
//!      ^
//!      └── next() returns C, previous() returns B
//! ```
//!
//! Moving past either end is tolerated: the call returns `None` and the
//! position does not change.
//!
//! Two handle types exist:
//! - [`Cursor`] borrows the container immutably. It is a cheap value handle
//!   around a reference-counted [`CursorImpl`]; cloning only bumps the count and
//!   the first move on a shared handle forks the implementation
//!   (copy-on-write), so clones never observe each other's movement.
//! - [`CursorMut`] borrows the container exclusively and lends `&mut T` per
//!   step. It cannot be cloned.
//!
//! Backends only describe how to walk their storage through [`Traverse`]. The
//! generic [`SlotCursor`] and [`SlotCursorMut`] turn that walk into cursors.

use std::fmt;
use std::rc::Rc;

/// The position-tracking half of a cursor, implemented once per container.
///
/// A *slot* is the backend's internal address of an element (a vector index,
/// an arena node index or a bit index). Element access happens through an
/// accessor function chosen when the cursor is built, so one traversal can
/// serve several projections (values and keys of a map, for example). An
/// accessor returning `None` ends the step as if the container were exhausted.
pub trait Traverse {
    /// Cursor position. Cloned when a shared cursor forks.
    type State: Clone;

    /// Returns the position in front of the element at `start_index`.
    ///
    /// Indices past the end are clamped to the last element.
    fn start_state(&self, start_index: usize) -> Self::State;

    /// Returns the position behind the last element.
    fn end_state(&self) -> Self::State;

    /// Returns `true` if a following [`Traverse::step_next`] yields a slot.
    fn has_next(&self, state: &Self::State) -> bool;

    /// Moves over the next element and returns its slot.
    fn step_next(&self, state: &mut Self::State) -> Option<usize>;

    /// Returns `true` if a following [`Traverse::step_previous`] yields a slot.
    fn has_previous(&self, state: &Self::State) -> bool;

    /// Moves back over the previous element and returns its slot.
    fn step_previous(&self, state: &mut Self::State) -> Option<usize>;
}

/// The polymorphic implementation behind a [`Cursor`].
pub trait CursorImpl<'a, T> {
    /// Returns `true` if [`CursorImpl::next`] would yield an element.
    fn has_next(&self) -> bool;
    /// Returns the next element and moves past it.
    fn next(&mut self) -> Option<&'a T>;
    /// Returns `true` if [`CursorImpl::previous`] would yield an element.
    fn has_previous(&self) -> bool;
    /// Returns the previous element and moves before it.
    fn previous(&mut self) -> Option<&'a T>;
    /// Creates an independent copy at the same position.
    fn clone_box(&self) -> Box<dyn CursorImpl<'a, T> + 'a>;
}

impl<'a, T> Clone for Box<dyn CursorImpl<'a, T> + 'a> {
    fn clone(&self) -> Self {
        (**self).clone_box()
    }
}

/// The polymorphic implementation behind a [`CursorMut`].
pub trait CursorMutImpl<T> {
    /// Returns `true` if [`CursorMutImpl::next`] would yield an element.
    fn has_next(&self) -> bool;
    /// Returns the next element and moves past it.
    fn next(&mut self) -> Option<&mut T>;
    /// Returns `true` if [`CursorMutImpl::previous`] would yield an element.
    fn has_previous(&self) -> bool;
    /// Returns the previous element and moves before it.
    fn previous(&mut self) -> Option<&mut T>;
}

// --- Shared cursor ---

/// A shared, copy-on-write cursor handle.
///
/// Implements [`Iterator`] in the forward direction; use [`Cursor::backward`]
/// to walk towards the front.
pub struct Cursor<'a, T> {
    imp: Rc<Box<dyn CursorImpl<'a, T> + 'a>>,
}

impl<'a, T> Cursor<'a, T> {
    /// Wraps a cursor implementation.
    pub fn new(imp: impl CursorImpl<'a, T> + 'a) -> Self {
        Self {
            imp: Rc::new(Box::new(imp)),
        }
    }

    /// Builds a cursor from a container traversal and an element accessor.
    pub fn from_traverse<C>(
        container: &'a C,
        state: C::State,
        access: fn(&C, usize) -> Option<&T>,
    ) -> Self
    where
        C: Traverse + 'a,
        C::State: 'a,
        T: 'a,
    {
        Self::new(SlotCursor {
            container,
            state,
            access,
        })
    }

    /// Returns a cursor over nothing.
    pub fn empty() -> Self
    where
        T: 'a,
    {
        Self::new(EmptyCursor)
    }

    /// Returns `true` if [`Iterator::next`] would yield an element.
    pub fn has_next(&self) -> bool {
        self.imp.has_next()
    }

    /// Returns `true` if [`Cursor::previous`] would yield an element.
    pub fn has_previous(&self) -> bool {
        self.imp.has_previous()
    }

    /// Returns the previous element and moves before it.
    pub fn previous(&mut self) -> Option<&'a T> {
        self.unique().previous()
    }

    /// Returns `true` if another handle currently shares this implementation.
    pub fn is_shared(&self) -> bool {
        Rc::strong_count(&self.imp) > 1
    }

    /// Turns the cursor into an iterator walking towards the front.
    pub fn backward(self) -> Backward<'a, T> {
        Backward { cursor: self }
    }

    fn unique(&mut self) -> &mut (dyn CursorImpl<'a, T> + 'a) {
        &mut **Rc::make_mut(&mut self.imp)
    }
}

impl<'a, T> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        Self {
            imp: Rc::clone(&self.imp),
        }
    }
}

impl<'a, T: 'a> Iterator for Cursor<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.unique().next()
    }
}

impl<'a, T> fmt::Debug for Cursor<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("has_previous", &self.has_previous())
            .field("has_next", &self.has_next())
            .field("shared", &self.is_shared())
            .finish()
    }
}

/// An iterator that walks a [`Cursor`] towards the front.
#[derive(Debug, Clone)]
pub struct Backward<'a, T> {
    cursor: Cursor<'a, T>,
}

impl<'a, T> Backward<'a, T> {
    /// Gives the underlying cursor back.
    pub fn into_inner(self) -> Cursor<'a, T> {
        self.cursor
    }
}

impl<'a, T: 'a> Iterator for Backward<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.previous()
    }
}

// --- Exclusive cursor ---

/// An exclusive cursor lending mutable access to each element.
pub struct CursorMut<'a, T> {
    imp: Box<dyn CursorMutImpl<T> + 'a>,
}

impl<'a, T> CursorMut<'a, T> {
    /// Wraps a mutable cursor implementation.
    pub fn new(imp: impl CursorMutImpl<T> + 'a) -> Self {
        Self { imp: Box::new(imp) }
    }

    /// Builds a mutable cursor from a container traversal and an element accessor.
    pub fn from_traverse<C>(
        container: &'a mut C,
        state: C::State,
        access: fn(&mut C, usize) -> Option<&mut T>,
    ) -> Self
    where
        C: Traverse + 'a,
        C::State: 'a,
        T: 'a,
    {
        Self::new(SlotCursorMut {
            container,
            state,
            access,
        })
    }

    /// Returns `true` if [`CursorMut::next`] would yield an element.
    pub fn has_next(&self) -> bool {
        self.imp.has_next()
    }

    /// Returns the next element and moves past it.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&mut T> {
        self.imp.next()
    }

    /// Returns `true` if [`CursorMut::previous`] would yield an element.
    pub fn has_previous(&self) -> bool {
        self.imp.has_previous()
    }

    /// Returns the previous element and moves before it.
    pub fn previous(&mut self) -> Option<&mut T> {
        self.imp.previous()
    }

    /// Applies `f` to every element from the current position to the end.
    pub fn for_each_remaining(&mut self, mut f: impl FnMut(&mut T)) {
        while let Some(element) = self.imp.next() {
            f(element);
        }
    }
}

impl<'a, T> fmt::Debug for CursorMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("has_previous", &self.has_previous())
            .field("has_next", &self.has_next())
            .finish()
    }
}

// --- Generic implementations ---

/// A [`CursorImpl`] driven by a container's [`Traverse`] implementation.
pub struct SlotCursor<'a, C: Traverse, T> {
    container: &'a C,
    state: C::State,
    access: fn(&C, usize) -> Option<&T>,
}

impl<'a, C: Traverse, T> Clone for SlotCursor<'a, C, T> {
    fn clone(&self) -> Self {
        Self {
            container: self.container,
            state: self.state.clone(),
            access: self.access,
        }
    }
}

impl<'a, C, T> CursorImpl<'a, T> for SlotCursor<'a, C, T>
where
    C: Traverse + 'a,
    C::State: 'a,
    T: 'a,
{
    fn has_next(&self) -> bool {
        self.container.has_next(&self.state)
    }

    fn next(&mut self) -> Option<&'a T> {
        let slot = self.container.step_next(&mut self.state)?;
        (self.access)(self.container, slot)
    }

    fn has_previous(&self) -> bool {
        self.container.has_previous(&self.state)
    }

    fn previous(&mut self) -> Option<&'a T> {
        let slot = self.container.step_previous(&mut self.state)?;
        (self.access)(self.container, slot)
    }

    fn clone_box(&self) -> Box<dyn CursorImpl<'a, T> + 'a> {
        Box::new(self.clone())
    }
}

/// A [`CursorMutImpl`] driven by a container's [`Traverse`] implementation.
pub struct SlotCursorMut<'a, C: Traverse, T> {
    container: &'a mut C,
    state: C::State,
    access: fn(&mut C, usize) -> Option<&mut T>,
}

impl<'a, C: Traverse, T> CursorMutImpl<T> for SlotCursorMut<'a, C, T> {
    fn has_next(&self) -> bool {
        self.container.has_next(&self.state)
    }

    fn next(&mut self) -> Option<&mut T> {
        let slot = self.container.step_next(&mut self.state)?;
        (self.access)(&mut *self.container, slot)
    }

    fn has_previous(&self) -> bool {
        self.container.has_previous(&self.state)
    }

    fn previous(&mut self) -> Option<&mut T> {
        let slot = self.container.step_previous(&mut self.state)?;
        (self.access)(&mut *self.container, slot)
    }
}

/// A cursor implementation over nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyCursor;

impl<'a, T: 'a> CursorImpl<'a, T> for EmptyCursor {
    fn has_next(&self) -> bool {
        false
    }

    fn next(&mut self) -> Option<&'a T> {
        None
    }

    fn has_previous(&self) -> bool {
        false
    }

    fn previous(&mut self) -> Option<&'a T> {
        None
    }

    fn clone_box(&self) -> Box<dyn CursorImpl<'a, T> + 'a> {
        Box::new(*self)
    }
}

// --- Capability traits ---

/// Implemented by every container that can hand out shared cursors.
pub trait Iterable<T> {
    /// Returns a cursor positioned in front of the element at `start_index`.
    ///
    /// An index past the end is clamped to the last element.
    fn cursor(&self, start_index: usize) -> Cursor<'_, T>;

    /// Returns a cursor positioned behind the last element, ready to walk
    /// backwards with [`Cursor::previous`].
    fn end_cursor(&self) -> Cursor<'_, T>;
}

/// Implemented by containers whose elements may be mutated in place.
pub trait IterableMut<T>: Iterable<T> {
    /// Returns an exclusive cursor positioned in front of the element at `start_index`.
    fn cursor_mut(&mut self, start_index: usize) -> CursorMut<'_, T>;

    /// Returns an exclusive cursor positioned behind the last element.
    fn end_cursor_mut(&mut self) -> CursorMut<'_, T>;
}

/// Clamps a requested start index to the last valid element index.
#[inline]
pub(crate) fn clamp_start(start_index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        start_index.min(len - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A minimal slice-backed traversal used to exercise the generic machinery.
    struct Numbers(Vec<i32>);

    impl Numbers {
        fn at(&self, slot: usize) -> Option<&i32> {
            self.0.get(slot)
        }

        fn at_mut(&mut self, slot: usize) -> Option<&mut i32> {
            self.0.get_mut(slot)
        }
    }

    impl Traverse for Numbers {
        type State = usize;

        fn start_state(&self, start_index: usize) -> usize {
            clamp_start(start_index, self.0.len())
        }

        fn end_state(&self) -> usize {
            self.0.len()
        }

        fn has_next(&self, state: &usize) -> bool {
            *state < self.0.len()
        }

        fn step_next(&self, state: &mut usize) -> Option<usize> {
            if *state < self.0.len() {
                *state += 1;
                Some(*state - 1)
            } else {
                None
            }
        }

        fn has_previous(&self, state: &usize) -> bool {
            *state > 0 && *state <= self.0.len()
        }

        fn step_previous(&self, state: &mut usize) -> Option<usize> {
            if self.has_previous(state) {
                *state -= 1;
                Some(*state)
            } else {
                None
            }
        }
    }

    #[test]
    fn test_clone_shares_until_moved() {
        let numbers = Numbers(vec![1, 2, 3, 4]);
        let mut original = Cursor::from_traverse(&numbers, 0, Numbers::at);
        assert_eq!(original.next(), Some(&1));

        let mut copy = original.clone();
        assert!(original.is_shared());
        assert!(copy.is_shared());

        // Moving the copy forks it, the original stays where it was.
        assert_eq!(copy.next(), Some(&2));
        assert_eq!(copy.next(), Some(&3));
        assert!(!original.is_shared());
        assert_eq!(original.next(), Some(&2));
    }

    #[test]
    fn test_gap_semantics() {
        let numbers = Numbers(vec![10, 20]);
        let mut cursor = Cursor::from_traverse(&numbers, 0, Numbers::at);
        assert!(!cursor.has_previous());
        assert_eq!(cursor.next(), Some(&10));
        assert_eq!(cursor.previous(), Some(&10));
        assert_eq!(cursor.previous(), None);
        assert_eq!(cursor.next(), Some(&10));
        assert_eq!(cursor.next(), Some(&20));
        assert_eq!(cursor.next(), None);
        assert!(cursor.has_previous());
    }

    #[test]
    fn test_backward_walk() {
        let numbers = Numbers(vec![1, 2, 3]);
        let end = Cursor::from_traverse(&numbers, numbers.end_state(), Numbers::at);
        let reversed: Vec<i32> = end.backward().copied().collect();
        assert_eq!(reversed, vec![3, 2, 1]);
    }

    fn sum_all<'a, I>(items: I) -> i32
    where
        I: Iterator<Item = &'a i32>,
    {
        items.fold(0, |acc, n| acc + n)
    }

    fn last_of<'a, T: 'a, I: Iterator<Item = &'a T>>(items: I) -> Option<&'a T> {
        items.last()
    }

    #[test]
    fn test_cursors_as_plain_iterators() {
        let numbers = Numbers(vec![1, 2, 3, 4]);
        let cursor = Cursor::from_traverse(&numbers, 0, Numbers::at);
        assert_eq!(sum_all(cursor.clone()), 10);
        assert_eq!(last_of(cursor), Some(&4));

        let end = Cursor::from_traverse(&numbers, numbers.end_state(), Numbers::at);
        assert_eq!(last_of(end.backward()), Some(&1));
    }

    #[test]
    fn test_cursor_mut_edits_in_place() {
        let mut numbers = Numbers(vec![1, 2, 3]);
        {
            let mut cursor = CursorMut::from_traverse(&mut numbers, 0, Numbers::at_mut);
            cursor.for_each_remaining(|n| *n *= 10);
            assert!(!cursor.has_next());
            if let Some(last) = cursor.previous() {
                *last += 1;
            }
        }
        assert_eq!(numbers.0, vec![10, 20, 31]);
    }

    #[test]
    fn test_empty_cursor() {
        let mut cursor: Cursor<'_, u8> = Cursor::empty();
        assert!(!cursor.has_next());
        assert!(!cursor.has_previous());
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.previous(), None);
    }

    #[test]
    fn test_clamp_start() {
        assert_eq!(clamp_start(10, 3), 2);
        assert_eq!(clamp_start(1, 3), 1);
        assert_eq!(clamp_start(5, 0), 0);
    }
}
