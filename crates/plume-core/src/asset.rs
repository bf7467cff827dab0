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

//! Marker trait for data that loaders produce and managers own.

/// A marker trait for types that can be loaded from files and shared between
/// the loading and the rendering side of the toolkit.
///
/// - `Send` + `Sync`: assets may be loaded on one thread and used on another.
/// - `'static`: an asset owns its data.
pub trait Asset: Send + Sync + 'static {}

impl Asset for crate::image::VolumeImage {}
impl Asset for crate::image::RgbaImage {}
