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

use super::*;
use crate::container::cursor::{Iterable, IterableMut};

/// A fixed permutation of `0..n`, so tests do not insert keys in order.
fn scrambled(n: u32) -> Vec<u32> {
    (0..n).map(|i| (i * 37 + 11) % n).collect()
}

fn forward_and_backward<H: Iterable<u32>>(heap: &H) -> (Vec<u32>, Vec<u32>) {
    let forward = heap.cursor(0).copied().collect();
    let mut backward: Vec<u32> = heap.end_cursor().backward().copied().collect();
    backward.reverse();
    (forward, backward)
}

fn assert_visits_all(mut visited: Vec<u32>, expected: &[u32]) {
    visited.sort_unstable();
    let mut expected = expected.to_vec();
    expected.sort_unstable();
    assert_eq!(visited, expected, "cursor must visit every value exactly once");
}

#[test]
fn test_binary_heap_extracts_in_order() {
    let mut heap = BinaryHeap::new();
    for key in scrambled(50) {
        heap.add(key, key * 2);
    }
    assert_eq!(heap.top(), Some((&0, &0)));

    let mut extracted = Vec::new();
    while let Some((key, value)) = heap.extract_top() {
        assert_eq!(value, key * 2);
        extracted.push(key);
    }
    assert_eq!(extracted, (0..50).collect::<Vec<_>>());
    assert!(heap.is_empty());
}

#[test]
fn test_binomial_heap_extracts_in_order() {
    let mut heap = BinomialHeap::new();
    for key in scrambled(41) {
        heap.add(key, key);
    }
    assert_eq!(heap.len(), 41);
    assert_eq!(heap.top(), Some((&0, &0)));

    let mut extracted = Vec::new();
    while let Some((key, _)) = heap.extract_top() {
        extracted.push(key);
    }
    assert_eq!(extracted, (0..41).collect::<Vec<_>>());
    assert_eq!(heap.extract_top(), None);
}

#[test]
fn test_fibonacci_heap_extracts_in_order() {
    let mut heap = FibonacciHeap::new();
    for key in scrambled(64) {
        heap.add(key, key);
    }
    assert_eq!(heap.top(), Some((&0, &0)));

    let mut extracted = Vec::new();
    while let Some((key, _)) = heap.extract_top() {
        extracted.push(key);
        // Interleave insertions with extractions to exercise node reuse.
        if key == 10 {
            heap.add(100, 100);
        }
    }
    let mut expected: Vec<u32> = (0..64).collect();
    expected.push(100);
    assert_eq!(extracted, expected);
}

#[test]
fn test_descending_comparer() {
    let mut binary = BinaryHeap::with_comparer(Descending);
    let mut binomial = BinomialHeap::with_comparer(Descending);
    let mut fibonacci = FibonacciHeap::with_comparer(Descending);
    for key in scrambled(20) {
        binary.add(key, ());
        binomial.add(key, ());
        fibonacci.add(key, ());
    }
    assert_eq!(binary.extract_top().map(|(k, _)| k), Some(19));
    assert_eq!(binomial.extract_top().map(|(k, _)| k), Some(19));
    assert_eq!(fibonacci.extract_top().map(|(k, _)| k), Some(19));
    assert_eq!(binomial.top().map(|(k, _)| *k), Some(18));
    assert_eq!(fibonacci.top().map(|(k, _)| *k), Some(18));
}

#[test]
fn test_cursors_walk_every_heap_both_ways() {
    // --- 1. SETUP ---
    let keys = scrambled(29);
    let mut binary = BinaryHeap::new();
    let mut binomial = BinomialHeap::new();
    let mut fibonacci = FibonacciHeap::new();
    for &key in &keys {
        binary.add(key, key);
        binomial.add(key, key);
        fibonacci.add(key, key);
    }
    // Give the Fibonacci heap real trees before walking it.
    fibonacci.extract_top();
    fibonacci.add(0, 0);

    // --- 2. ACTION & 3. ASSERTIONS ---
    let (forward, backward) = forward_and_backward(&binary);
    assert_eq!(forward, backward);
    assert_eq!(forward.first(), Some(&0), "array order starts at the top");
    assert_visits_all(forward, &keys);

    let (forward, backward) = forward_and_backward(&binomial);
    assert_eq!(forward, backward);
    assert_visits_all(forward, &keys);

    let (forward, backward) = forward_and_backward(&fibonacci);
    assert_eq!(forward, backward);
    assert_visits_all(forward, &keys);
}

#[test]
fn test_heap_cursor_clones_are_isolated() {
    let mut heap = BinomialHeap::new();
    for key in scrambled(15) {
        heap.add(key, key);
    }
    let mut original = heap.cursor(0);
    original.next();
    original.next();
    let mut clone = original.clone();
    let expected_next = clone.clone().next().copied();

    for _ in 0..5 {
        clone.next();
    }
    assert_eq!(original.next().copied(), expected_next);
}

#[test]
fn test_heap_cursor_start_index_and_directions() {
    let mut heap = FibonacciHeap::new();
    for key in scrambled(12) {
        heap.add(key, key);
    }
    heap.extract_top();
    let all: Vec<u32> = heap.cursor(0).copied().collect();

    let mut cursor = heap.cursor(5);
    assert_eq!(cursor.next(), all.get(5));
    assert_eq!(cursor.previous(), all.get(5));
    assert_eq!(cursor.previous(), all.get(4));

    let mut clamped = heap.cursor(1000);
    assert_eq!(clamped.next(), all.last());
    assert!(!clamped.has_next());
}

#[test]
fn test_merge_heaps() {
    let mut left = BinomialHeap::new();
    let mut right = BinomialHeap::new();
    for key in 0..10u32 {
        if key % 2 == 0 {
            left.add(key, key);
        } else {
            right.add(key, key);
        }
    }
    right.extract_top();
    left.merge(right);
    assert_eq!(left.len(), 9);
    let order: Vec<u32> = std::iter::from_fn(|| left.extract_top().map(|(k, _)| k)).collect();
    assert_eq!(order, vec![0, 2, 3, 4, 5, 6, 7, 8, 9]);

    let mut left = FibonacciHeap::new();
    let mut right = FibonacciHeap::new();
    for key in 0..10u32 {
        left.add(key * 2 + 1, ());
        right.add(key * 2, ());
    }
    left.extract_top();
    left.merge(right);
    assert_eq!(left.top().map(|(k, _)| *k), Some(0));
    let order: Vec<u32> = std::iter::from_fn(|| left.extract_top().map(|(k, _)| k)).collect();
    let mut expected: Vec<u32> = (0..20).collect();
    expected.retain(|&k| k != 1);
    assert_eq!(order, expected);

    let mut binary: BinaryHeap<u32, ()> = BinaryHeap::new();
    binary.add(3, ());
    let mut other = BinaryHeap::new();
    other.add(1, ());
    binary.merge(other);
    assert_eq!(binary.top().map(|(k, _)| *k), Some(1));
}

#[test]
fn test_cursor_mut_over_heap_values() {
    let mut heap = BinomialHeap::new();
    for key in 0..6u32 {
        heap.add(key, key);
    }
    {
        let mut cursor = heap.cursor_mut(0);
        cursor.for_each_remaining(|value| *value += 100);
    }
    let mut values: Vec<u32> = heap.cursor(0).copied().collect();
    values.sort_unstable();
    assert_eq!(values, (100..106).collect::<Vec<_>>());
    assert_eq!(heap.top(), Some((&0, &100)));
}
