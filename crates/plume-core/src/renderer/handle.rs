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

//! An owning handle that releases its texture buffer when dropped.

use super::device::TextureDevice;
use super::error::ResourceError;
use super::texture::{TextureBufferId, TextureBufferInfo};
use std::fmt;
use std::sync::Arc;

/// Owns one texture buffer of a [`TextureDevice`].
pub struct TextureBufferHandle {
    id: TextureBufferId,
    device: Arc<dyn TextureDevice>,
}

impl TextureBufferHandle {
    /// Takes ownership of an already created buffer.
    pub fn new(id: TextureBufferId, device: Arc<dyn TextureDevice>) -> Self {
        Self { id, device }
    }

    /// The ID of the owned buffer.
    pub fn id(&self) -> TextureBufferId {
        self.id
    }

    /// The device the buffer lives on.
    pub fn device(&self) -> &Arc<dyn TextureDevice> {
        &self.device
    }

    /// Asks the device to describe the buffer.
    pub fn info(&self) -> Result<TextureBufferInfo, ResourceError> {
        self.device.texture_buffer_info(self.id)
    }

    /// Copies one mip level of the buffer back to host memory.
    pub fn download(&self, mip_level: u32) -> Result<Vec<u8>, ResourceError> {
        self.device.read_texture_buffer(self.id, mip_level)
    }

    /// Replaces the base level of the buffer.
    pub fn upload(&self, data: &[u8]) -> Result<(), ResourceError> {
        self.device.write_texture_buffer(self.id, data)
    }
}

impl fmt::Debug for TextureBufferHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureBufferHandle")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl Drop for TextureBufferHandle {
    fn drop(&mut self) {
        if let Err(e) = self.device.destroy_texture_buffer(self.id) {
            log::warn!("Failed to destroy texture buffer {:?}: {}", self.id, e);
        }
    }
}
