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

use plume_core::asset::Asset;
use std::error::Error;

/// A lane that decodes one kind of asset from the bytes of a file.
///
/// Implementors do the CPU side of loading: parsing headers, validating sizes
/// and building the in-memory asset. Files that reference other files get them
/// through a [`ResourceResolver`](super::ResourceResolver) handed to the lane.
pub trait AssetLoaderLane<A: Asset> {
    /// Parses a byte slice into an instance of the asset `A`.
    ///
    /// # Parameters
    /// - `bytes`: The raw content of the asset file.
    ///
    /// # Returns
    /// The loaded asset, or a thread-safe boxed error describing why the bytes
    /// could not be decoded.
    fn load(&self, bytes: &[u8]) -> Result<A, Box<dyn Error + Send + Sync>>;
}

/// A lane that encodes one kind of asset into the bytes of a file.
pub trait AssetSaverLane<A: Asset> {
    /// Encodes `asset` and returns the content of the primary file.
    ///
    /// Formats that spread an asset over several files write the secondary
    /// files through their resolver before returning.
    fn save(&self, asset: &A) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>>;
}
