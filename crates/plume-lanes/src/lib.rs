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

//! # Plume Lanes
//!
//! Loading and saving of volume data. Every file format is a lane: a small
//! stateless (or resolver-configured) object that turns bytes into an asset
//! and back.

#![warn(missing_docs)]

pub mod asset_lane;

pub use asset_lane::{
    AssetLoaderLane, AssetSaverLane, FileSystemResolver, ResourceResolver,
};
