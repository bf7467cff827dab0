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

use super::mipmap::downsample;
use super::HostDeviceSettings;
use plume_core::renderer::{
    DeviceCapabilities, ResourceError, TextureBufferDescriptor, TextureBufferFlags,
    TextureBufferId, TextureBufferInfo, TextureDevice, TextureKind,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug)]
struct HostTextureEntry {
    info: TextureBufferInfo,
    levels: Vec<Vec<u8>>,
}

impl HostTextureEntry {
    fn byte_size(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }
}

type TextureRegistry = HashMap<TextureBufferId, HostTextureEntry>;

/// A [`TextureDevice`] that keeps every texture buffer in host memory.
///
/// Mip chains are box filtered on upload. Compression requests are accepted and
/// ignored.
#[derive(Debug)]
pub struct HostTextureDevice {
    settings: HostDeviceSettings,
    textures: Mutex<TextureRegistry>,
    next_texture_id: AtomicUsize,
    allocated_bytes: AtomicUsize,
}

impl Default for HostTextureDevice {
    fn default() -> Self {
        Self::new(HostDeviceSettings::default())
    }
}

impl HostTextureDevice {
    /// Creates a device reporting the given capabilities.
    pub fn new(settings: HostDeviceSettings) -> Self {
        Self {
            settings,
            textures: Mutex::new(HashMap::new()),
            next_texture_id: AtomicUsize::new(0),
            allocated_bytes: AtomicUsize::new(0),
        }
    }

    /// The settings the device was created with.
    pub fn settings(&self) -> HostDeviceSettings {
        self.settings
    }

    /// Number of live texture buffers.
    pub fn texture_buffer_count(&self) -> usize {
        self.lock().map_or(0, |textures| textures.len())
    }

    /// Bytes held by all live texture buffers, mip levels included.
    pub fn allocated_bytes(&self) -> usize {
        self.allocated_bytes.load(Ordering::Relaxed)
    }

    fn lock(&self) -> Result<MutexGuard<'_, TextureRegistry>, ResourceError> {
        self.textures.lock().map_err(|_| {
            ResourceError::BackendError("texture registry lock poisoned".to_string())
        })
    }

    fn generate_texture_id(&self) -> TextureBufferId {
        TextureBufferId(self.next_texture_id.fetch_add(1, Ordering::Relaxed))
    }

    fn check_kind(&self, kind: TextureKind) -> Result<(), ResourceError> {
        let supported = match kind {
            TextureKind::D2 => true,
            TextureKind::D2Array => self.settings.texture_2d_array,
            TextureKind::D3 => self.settings.texture_3d,
        };
        if supported {
            Ok(())
        } else {
            Err(ResourceError::Unsupported(format!("{kind:?} textures are disabled")))
        }
    }

    fn build_levels(info: &TextureBufferInfo, base: &[u8]) -> Vec<Vec<u8>> {
        let mut levels = vec![base.to_vec()];
        for level in 1..info.mip_level_count {
            let (Some(size), Some(next)) = (info.level_size(level - 1), info.level_size(level))
            else {
                break;
            };
            let reduced = downsample(&levels[levels.len() - 1], size, next, info.format);
            levels.push(reduced);
        }
        levels
    }
}

impl TextureDevice for HostTextureDevice {
    fn capabilities(&self) -> DeviceCapabilities {
        self.settings.into()
    }

    fn create_texture_buffer(
        &self,
        descriptor: &TextureBufferDescriptor,
        data: &[u8],
    ) -> Result<TextureBufferId, ResourceError> {
        self.check_kind(descriptor.kind)?;
        if descriptor.size.is_empty() {
            return Err(ResourceError::InvalidData("texture size is zero".to_string()));
        }
        if descriptor.kind == TextureKind::D2 && descriptor.size.depth_or_array_layers != 1 {
            return Err(ResourceError::InvalidData(
                "2D textures must have a depth of one".to_string(),
            ));
        }
        let expected = descriptor.base_level_size().ok_or_else(|| {
            ResourceError::InvalidData(format!("texture size {:?} is too large", descriptor.size))
        })?;
        if data.len() != expected {
            return Err(ResourceError::InvalidData(format!(
                "expected {} bytes, got {}",
                expected,
                data.len()
            )));
        }

        let mip_level_count = if descriptor.flags.contains(TextureBufferFlags::MIPMAPS) {
            match descriptor.kind {
                TextureKind::D3 => descriptor.size.max_mips(),
                TextureKind::D2 | TextureKind::D2Array => {
                    let plane = descriptor.size.width.max(descriptor.size.height);
                    32 - plane.leading_zeros()
                }
            }
        } else {
            1
        };
        let info = TextureBufferInfo {
            kind: descriptor.kind,
            size: descriptor.size,
            format: descriptor.format,
            mip_level_count,
            flags: descriptor.flags,
        };
        let entry = HostTextureEntry {
            levels: Self::build_levels(&info, data),
            info,
        };

        let mut textures = self.lock()?;
        let id = self.generate_texture_id();
        self.allocated_bytes
            .fetch_add(entry.byte_size(), Ordering::Relaxed);
        textures.insert(id, entry);
        drop(textures);
        log::debug!(
            "HostTextureDevice: Created {:?} texture buffer {:?} ({}) with {} levels",
            descriptor.kind,
            id,
            descriptor.label.as_deref().unwrap_or("unnamed"),
            mip_level_count
        );
        Ok(id)
    }

    fn write_texture_buffer(&self, id: TextureBufferId, data: &[u8]) -> Result<(), ResourceError> {
        let mut textures = self.lock()?;
        let entry = textures.get_mut(&id).ok_or(ResourceError::NotFound { id })?;
        let expected = entry.levels[0].len();
        if data.len() != expected {
            return Err(ResourceError::InvalidData(format!(
                "expected {} bytes, got {}",
                expected,
                data.len()
            )));
        }
        entry.levels = Self::build_levels(&entry.info, data);
        Ok(())
    }

    fn read_texture_buffer(
        &self,
        id: TextureBufferId,
        mip_level: u32,
    ) -> Result<Vec<u8>, ResourceError> {
        let textures = self.lock()?;
        let entry = textures.get(&id).ok_or(ResourceError::NotFound { id })?;
        entry
            .levels
            .get(mip_level as usize)
            .cloned()
            .ok_or(ResourceError::OutOfBounds {
                mip_level,
                mip_level_count: entry.info.mip_level_count,
            })
    }

    fn texture_buffer_info(&self, id: TextureBufferId) -> Result<TextureBufferInfo, ResourceError> {
        let textures = self.lock()?;
        textures
            .get(&id)
            .map(|entry| entry.info)
            .ok_or(ResourceError::NotFound { id })
    }

    fn destroy_texture_buffer(&self, id: TextureBufferId) -> Result<(), ResourceError> {
        let mut textures = self.lock()?;
        if let Some(entry) = textures.remove(&id) {
            self.allocated_bytes
                .fetch_sub(entry.byte_size(), Ordering::Relaxed);
            log::debug!("HostTextureDevice: Destroyed texture buffer {id:?}");
            Ok(())
        } else {
            Err(ResourceError::NotFound { id })
        }
    }
}
