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

//! # Plume Core
//!
//! Foundational crate of the Plume volume toolkit: owning containers with
//! bidirectional cursors, small math types, voxel images and the contracts
//! (texture device, errors, asset marker) the other crates implement.

#![warn(missing_docs)]

pub mod asset;
pub mod container;
pub mod image;
pub mod math;
pub mod renderer;

pub use asset::Asset;
pub use container::{Cursor, CursorMut, Iterable, IterableMut};
pub use image::{DataFormat, ImageError, RgbaImage, VolumeImage};
