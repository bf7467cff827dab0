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

//! Volume resources and their texture buffer cache.

mod manager;

pub use self::manager::VolumeManager;

use crate::histogram::Histogram;
use crate::transfer_function::TransferFunctionControl;
use plume_core::math::{Extent3D, Vec3};
use plume_core::renderer::{
    TextureBufferDescriptor, TextureBufferFlags, TextureBufferHandle, TextureDevice, TextureKind,
};
use plume_core::VolumeImage;
use std::borrow::Cow;
use std::sync::Arc;

/// The ray marching step size of a volume and the matching opacity correction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSize {
    /// Distance between two samples in normalized volume space.
    pub step_size: f32,
    /// Factor that keeps the composited opacity independent of the step size.
    pub opacity_correction: f32,
}

impl StepSize {
    /// Raw value reported in place of a step size when there is no texture buffer.
    pub const ERROR: f32 = -1.0;
}

/// A voxel grid with its physical voxel size and transfer function.
///
/// The grid starts on the host. The first call to
/// [`Volume::volume_texture_buffer`] uploads it to a texture device and drops the
/// host copy; afterwards it is only reachable by downloading the base level.
#[derive(Debug)]
pub struct Volume {
    name: String,
    image: Option<VolumeImage>,
    voxel_size: Vec3,
    transfer_function: TransferFunctionControl,
    texture_buffer: Option<TextureBufferHandle>,
}

impl Volume {
    /// Edge length of a voxel unless told otherwise.
    pub const DEFAULT_VOXEL_SIZE: Vec3 = Vec3::splat(0.001);

    /// Creates an empty volume with the default transfer function.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: None,
            voxel_size: Self::DEFAULT_VOXEL_SIZE,
            transfer_function: TransferFunctionControl::with_default_configuration(),
            texture_buffer: None,
        }
    }

    /// Creates a volume holding `image`.
    pub fn with_image(name: impl Into<String>, image: VolumeImage) -> Self {
        let mut volume = Self::new(name);
        volume.image = Some(image);
        volume
    }

    /// The name the volume was created with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The host copy of the voxel grid, `None` once it has been uploaded or unloaded.
    pub fn image(&self) -> Option<&VolumeImage> {
        self.image.as_ref()
    }

    /// Mutable access to the host copy of the voxel grid.
    pub fn image_mut(&mut self) -> Option<&mut VolumeImage> {
        self.image.as_mut()
    }

    /// Replaces the voxel grid. Any texture buffer of the previous grid is released.
    pub fn set_image(&mut self, image: VolumeImage) {
        self.image = Some(image);
        self.texture_buffer = None;
    }

    /// Number of voxels along each axis, taken from the host copy or the texture buffer.
    pub fn image_size(&self) -> Extent3D {
        if let Some(image) = &self.image {
            return image.size();
        }
        self.texture_buffer
            .as_ref()
            .and_then(|handle| handle.info().ok())
            .map_or(Extent3D::ZERO, |info| info.size)
    }

    /// Physical size of one voxel.
    pub fn voxel_size(&self) -> Vec3 {
        self.voxel_size
    }

    /// Sets the physical size of one voxel.
    pub fn set_voxel_size(&mut self, voxel_size: Vec3) {
        self.voxel_size = voxel_size;
    }

    /// The transfer function.
    pub fn transfer_function_control(&self) -> &TransferFunctionControl {
        &self.transfer_function
    }

    /// Mutable access to the transfer function.
    pub fn transfer_function_control_mut(&mut self) -> &mut TransferFunctionControl {
        &mut self.transfer_function
    }

    /// The texture buffer, if the grid has been uploaded.
    pub fn texture_buffer(&self) -> Option<&TextureBufferHandle> {
        self.texture_buffer.as_ref()
    }

    /// Returns the texture buffer holding the grid, uploading the host copy first if required.
    ///
    /// A 3D texture is preferred; devices without 3D textures get a 2D array.
    /// Mipmaps are only built for 3D textures. On success the host copy is dropped.
    pub fn volume_texture_buffer(
        &mut self,
        device: &Arc<dyn TextureDevice>,
        texture_compression: bool,
        mipmaps: bool,
    ) -> Option<&TextureBufferHandle> {
        if self.texture_buffer.is_none() {
            if let Some(image) = &self.image {
                let capabilities = device.capabilities();

                let required_kib = (image.data_size() / 1024) as u64;
                if capabilities.total_memory_kib > 0 && required_kib > capabilities.total_memory_kib
                {
                    log::warn!(
                        "Volume '{}' needs {} KiB, the device reports {} KiB, uploading unscaled",
                        self.name,
                        required_kib,
                        capabilities.total_memory_kib
                    );
                }

                let mut flags = TextureBufferFlags::NONE;
                if texture_compression {
                    flags |= TextureBufferFlags::COMPRESSION;
                }
                if mipmaps && capabilities.texture_3d {
                    flags |= TextureBufferFlags::MIPMAPS;
                }

                let kind = if capabilities.texture_3d {
                    Some(TextureKind::D3)
                } else if capabilities.texture_2d_array {
                    Some(TextureKind::D2Array)
                } else {
                    None
                };

                match kind {
                    Some(kind) => {
                        let descriptor = TextureBufferDescriptor {
                            label: Some(Cow::Borrowed(self.name.as_str())),
                            kind,
                            size: image.size(),
                            format: image.format().texture_format(),
                            flags,
                        };
                        match device.create_texture_buffer(&descriptor, image.as_bytes()) {
                            Ok(id) => {
                                log::debug!("Uploaded volume '{}' as {:?}", self.name, kind);
                                self.texture_buffer =
                                    Some(TextureBufferHandle::new(id, device.clone()));
                                self.image = None;
                            }
                            Err(e) => {
                                log::error!("Failed to upload volume '{}': {}", self.name, e);
                            }
                        }
                    }
                    None => {
                        log::error!(
                            "Volume '{}' cannot be uploaded without 3D or 2D array textures",
                            self.name
                        );
                    }
                }
            }
        }
        self.texture_buffer.as_ref()
    }

    /// Computes the ray marching step size for the uploaded grid.
    ///
    /// The base step takes two samples per voxel along the longest axis of the
    /// grid at the (interpolated) mip level `volume_texture_lod`. The step is
    /// divided by `sample_rate_factor`, which is first limited to
    /// `max_sample_rate_factor`. Returns `None` without a texture buffer or for
    /// a non-positive sample rate factor.
    pub fn step_size(
        &self,
        volume_texture_lod: f32,
        sample_rate_factor: f32,
        max_sample_rate_factor: f32,
    ) -> Option<StepSize> {
        let info = self.texture_buffer.as_ref()?.info().ok()?;

        let mipmap_count = info.mip_level_count.saturating_sub(1);
        let mut lod = volume_texture_lod.max(0.0);
        if lod.ceil() as u32 > mipmap_count {
            lod = mipmap_count as f32;
        }
        let current_level = lod.floor() as u32;
        let next_level = lod.ceil() as u32;
        let mipmap_factor = 1.0 - (next_level as f32 - lod);

        let current = info.level_size(current_level)?;
        let longest_axis = if mipmap_factor < 1.0 {
            let next = info.level_size(next_level)?;
            let lerp = |a: u32, b: u32| a as f32 + (b as f32 - a as f32) * mipmap_factor;
            lerp(current.width, next.width)
                .max(lerp(current.height, next.height))
                .max(lerp(current.depth_or_array_layers, next.depth_or_array_layers))
        } else {
            current.max_axis() as f32
        };

        let sample_rate_factor = sample_rate_factor.min(max_sample_rate_factor);
        if sample_rate_factor.is_nan() || sample_rate_factor <= 0.0 {
            log::warn!("Invalid sample rate factor {}", sample_rate_factor);
            return None;
        }

        // Nyquist: two samples per smallest inter-voxel distance.
        let sample_rate = 0.5 / sample_rate_factor;
        let base_step_size = if longest_axis > 0.0 {
            1.0 / longest_axis
        } else {
            0.0
        };
        let step_size = base_step_size * sample_rate;
        let opacity_correction = if base_step_size > 0.0 {
            step_size / base_step_size
        } else {
            0.0
        };
        Some(StepSize {
            step_size,
            opacity_correction,
        })
    }

    /// Builds a histogram of the grid, downloading the base level if the host copy is gone.
    pub fn create_histogram(&self) -> Option<Histogram> {
        if let Some(image) = &self.image {
            return Some(Histogram::from_image(image));
        }
        let handle = self.texture_buffer.as_ref()?;
        let info = handle.info().ok()?;
        match handle.download(0) {
            Ok(bytes) => {
                let bytes_per_element = info.format.bytes_per_texel();
                Some(Histogram::new(
                    bytes_per_element,
                    bytes.len() / bytes_per_element,
                    &bytes,
                ))
            }
            Err(e) => {
                log::error!("Failed to download volume '{}': {}", self.name, e);
                None
            }
        }
    }

    /// Releases the texture buffer. The host copy, if any, is kept.
    pub fn release_texture_buffer(&mut self) {
        self.texture_buffer = None;
    }

    /// Drops the host copy of the grid and unloads the transfer function.
    pub fn unload(&mut self) {
        self.image = None;
        self.transfer_function.unload();
    }

    /// Replaces this volume's grid and voxel size with copies of `other`'s.
    ///
    /// The transfer function of `self` keeps its channels but drops its table.
    /// Any texture buffer of `self` is left alone.
    pub fn duplicate_from(&mut self, other: &Volume) {
        self.unload();
        self.image = other.image.clone();
        self.voxel_size = other.voxel_size;
    }
}

#[cfg(test)]
mod tests;
