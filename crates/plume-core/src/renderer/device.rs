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

//! The abstract texture device contract.

use super::error::ResourceError;
use super::texture::{TextureBufferDescriptor, TextureBufferId, TextureBufferInfo};

/// What a texture device is able to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceCapabilities {
    /// Volumetric textures can be created.
    pub texture_3d: bool,
    /// 2D texture arrays can be created.
    pub texture_2d_array: bool,
    /// Total texture memory in KiB, `0` when unknown.
    pub total_memory_kib: u64,
}

impl Default for DeviceCapabilities {
    fn default() -> Self {
        Self {
            texture_3d: true,
            texture_2d_array: true,
            total_memory_kib: 0,
        }
    }
}

/// A device that owns texture buffers.
///
/// Implementations must be shareable across threads; every method takes `&self`
/// and synchronizes internally.
pub trait TextureDevice: Send + Sync {
    /// Reports the capabilities of this device.
    fn capabilities(&self) -> DeviceCapabilities;

    /// Creates a texture buffer and uploads `data` as its base level.
    ///
    /// When the descriptor asks for mipmaps the device derives the remaining levels itself.
    fn create_texture_buffer(
        &self,
        descriptor: &TextureBufferDescriptor,
        data: &[u8],
    ) -> Result<TextureBufferId, ResourceError>;

    /// Replaces the base level of an existing buffer, regenerating its mips.
    fn write_texture_buffer(&self, id: TextureBufferId, data: &[u8]) -> Result<(), ResourceError>;

    /// Copies one mip level of a buffer back to host memory.
    fn read_texture_buffer(
        &self,
        id: TextureBufferId,
        mip_level: u32,
    ) -> Result<Vec<u8>, ResourceError>;

    /// Describes an existing buffer.
    fn texture_buffer_info(&self, id: TextureBufferId) -> Result<TextureBufferInfo, ResourceError>;

    /// Releases a buffer. Destroying an unknown ID is an error.
    fn destroy_texture_buffer(&self, id: TextureBufferId) -> Result<(), ResourceError>;
}
