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

//! Growable packed bit array.

use super::cursor::{clamp_start, Cursor, Iterable, Traverse};

const WORD_BITS: usize = u64::BITS as usize;

static TRUE: bool = true;
static FALSE: bool = false;

/// A packed array of bits.
///
/// The cursor yields `&bool` per bit. Mutable cursors are not offered since a
/// bit has no address of its own; use [`Bitset::set`] and friends instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bitset {
    words: Vec<u64>,
    len: usize,
}

impl Bitset {
    /// Creates an empty bitset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bitset of `len` cleared bits.
    pub fn with_len(len: usize) -> Self {
        let mut bitset = Self::new();
        bitset.resize(len);
        bitset
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the bitset holds no bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Changes the number of bits. New bits start cleared.
    pub fn resize(&mut self, len: usize) {
        let words = len.div_ceil(WORD_BITS);
        self.words.resize(words, 0);
        self.len = len;
        self.mask_tail();
    }

    /// Appends a bit.
    pub fn add(&mut self, bit: bool) {
        let index = self.len;
        self.resize(index + 1);
        if bit {
            self.set(index);
        }
    }

    /// Value of bit `index`.
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some(self.words[index / WORD_BITS] & Self::mask(index) != 0)
    }

    /// Returns `true` if bit `index` exists and is set.
    pub fn is_set(&self, index: usize) -> bool {
        self.get(index).unwrap_or(false)
    }

    /// Sets bit `index`. Returns `false` when out of range.
    pub fn set(&mut self, index: usize) -> bool {
        self.update(index, |word, mask| *word |= mask)
    }

    /// Clears bit `index`. Returns `false` when out of range.
    pub fn clear(&mut self, index: usize) -> bool {
        self.update(index, |word, mask| *word &= !mask)
    }

    /// Flips bit `index`. Returns `false` when out of range.
    pub fn invert(&mut self, index: usize) -> bool {
        self.update(index, |word, mask| *word ^= mask)
    }

    /// Sets every bit.
    pub fn set_all(&mut self) {
        self.words.fill(u64::MAX);
        self.mask_tail();
    }

    /// Clears every bit.
    pub fn clear_all(&mut self) {
        self.words.fill(0);
    }

    /// Flips every bit.
    pub fn invert_all(&mut self) {
        for word in &mut self.words {
            *word = !*word;
        }
        self.mask_tail();
    }

    /// Number of set bits.
    pub fn count_set(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }

    #[inline]
    fn mask(index: usize) -> u64 {
        1u64 << (index % WORD_BITS)
    }

    fn update(&mut self, index: usize, op: impl FnOnce(&mut u64, u64)) -> bool {
        if index >= self.len {
            return false;
        }
        op(&mut self.words[index / WORD_BITS], Self::mask(index));
        true
    }

    // Bits past `len` in the last word stay zero so that counting stays exact.
    fn mask_tail(&mut self) {
        let used = self.len % WORD_BITS;
        if used != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << used) - 1;
            }
        }
    }

    fn bit(&self, slot: usize) -> Option<&bool> {
        self.get(slot).map(|bit| if bit { &TRUE } else { &FALSE })
    }
}

impl Traverse for Bitset {
    type State = usize;

    fn start_state(&self, start_index: usize) -> usize {
        clamp_start(start_index, self.len)
    }

    fn end_state(&self) -> usize {
        self.len
    }

    fn has_next(&self, state: &usize) -> bool {
        *state < self.len
    }

    fn step_next(&self, state: &mut usize) -> Option<usize> {
        if !self.has_next(state) {
            return None;
        }
        *state += 1;
        Some(*state - 1)
    }

    fn has_previous(&self, state: &usize) -> bool {
        *state > 0 && *state <= self.len
    }

    fn step_previous(&self, state: &mut usize) -> Option<usize> {
        if !self.has_previous(state) {
            return None;
        }
        *state -= 1;
        Some(*state)
    }
}

impl Iterable<bool> for Bitset {
    fn cursor(&self, start_index: usize) -> Cursor<'_, bool> {
        Cursor::from_traverse(self, self.start_state(start_index), Self::bit)
    }

    fn end_cursor(&self) -> Cursor<'_, bool> {
        Cursor::from_traverse(self, self.end_state(), Self::bit)
    }
}
