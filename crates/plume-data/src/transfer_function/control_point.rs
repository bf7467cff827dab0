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

/// A point of a transfer function channel: a value in `[0, 1]` pinned to an iso-value bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferControlPoint {
    /// The bin along the scalar axis.
    pub iso_value: u32,
    /// The channel value at this bin.
    pub value: f32,
}

impl TransferControlPoint {
    /// Creates a control point.
    pub const fn new(iso_value: u32, value: f32) -> Self {
        Self { iso_value, value }
    }
}
