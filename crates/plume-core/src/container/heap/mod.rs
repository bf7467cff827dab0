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

//! Priority queues keyed by an ordering policy.
//!
//! All heaps store `(key, value)` pairs. The [`Comparer`] decides which key
//! belongs on top: [`Ascending`] (the default) makes min-heaps, [`Descending`]
//! max-heaps. Cursors walk the values in storage order, which is array order
//! for [`BinaryHeap`] and pre-order over the tree forest for the others.

mod binary;
mod binomial;
mod fibonacci;

#[cfg(test)]
mod tests;

pub use binary::BinaryHeap;
pub use binomial::BinomialHeap;
pub use fibonacci::FibonacciHeap;

/// Ordering policy of a heap.
pub trait Comparer<K> {
    /// Returns `true` if `a` must sit closer to the top than `b`.
    fn precedes(&self, a: &K, b: &K) -> bool;
}

/// Smallest key on top.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ascending;

/// Largest key on top.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Descending;

impl<K: PartialOrd> Comparer<K> for Ascending {
    #[inline]
    fn precedes(&self, a: &K, b: &K) -> bool {
        a < b
    }
}

impl<K: PartialOrd> Comparer<K> for Descending {
    #[inline]
    fn precedes(&self, a: &K, b: &K) -> bool {
        a > b
    }
}
