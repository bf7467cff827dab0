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

//! Defines data structures related to texture buffer resources.

use crate::math::Extent3D;
use std::borrow::Cow;

/// The texel layout of a texture buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// One 8-bit unsigned normalized channel.
    R8,
    /// One 16-bit unsigned normalized channel.
    R16,
    /// Four 8-bit unsigned normalized channels.
    Rgba8,
}

impl TextureFormat {
    /// Size of one texel in bytes.
    pub const fn bytes_per_texel(self) -> usize {
        match self {
            TextureFormat::R8 => 1,
            TextureFormat::R16 => 2,
            TextureFormat::Rgba8 => 4,
        }
    }
}

/// The shape of a texture buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    /// A single two-dimensional image.
    D2,
    /// A stack of two-dimensional slices sampled independently.
    D2Array,
    /// A volumetric texture.
    D3,
}

/// Creation flags of a texture buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureBufferFlags {
    bits: u32,
}

impl TextureBufferFlags {
    /// No flags.
    pub const NONE: Self = Self { bits: 0 };
    /// Build a full mip chain from the base level.
    pub const MIPMAPS: Self = Self { bits: 1 << 0 };
    /// Allow the device to store the texels compressed.
    pub const COMPRESSION: Self = Self { bits: 1 << 1 };

    /// Returns the raw bits.
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Combines two sets of flags.
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Checks whether every flag of `other` is set.
    pub const fn contains(&self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Checks if no flag is set.
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl std::ops::BitOr for TextureBufferFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for TextureBufferFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

/// A descriptor used to create a texture buffer.
#[derive(Debug, Clone)]
pub struct TextureBufferDescriptor<'a> {
    /// An optional debug label.
    pub label: Option<Cow<'a, str>>,
    /// The shape of the texture.
    pub kind: TextureKind,
    /// Size of the base level. For [`TextureKind::D2Array`] the depth is the layer count.
    pub size: Extent3D,
    /// The format of the texels.
    pub format: TextureFormat,
    /// Creation flags.
    pub flags: TextureBufferFlags,
}

impl TextureBufferDescriptor<'_> {
    /// Number of bytes the base level occupies, or `None` if it overflows a `usize`.
    pub fn base_level_size(&self) -> Option<usize> {
        self.size.byte_size(self.format.bytes_per_texel())
    }
}

/// What a device reports about an existing texture buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureBufferInfo {
    /// The shape of the texture.
    pub kind: TextureKind,
    /// Size of the base level.
    pub size: Extent3D,
    /// The format of the texels.
    pub format: TextureFormat,
    /// Number of stored mip levels, the base level included.
    pub mip_level_count: u32,
    /// The flags the buffer was created with.
    pub flags: TextureBufferFlags,
}

impl TextureBufferInfo {
    /// Size of `mip_level`, or `None` past the last stored level.
    ///
    /// Array layers never shrink; only width and height of a 2D array do.
    pub fn level_size(&self, mip_level: u32) -> Option<Extent3D> {
        if mip_level >= self.mip_level_count {
            return None;
        }
        let shrunk = self.size.mip_level_size(mip_level);
        Some(match self.kind {
            TextureKind::D3 => shrunk,
            TextureKind::D2 => Extent3D::new(shrunk.width, shrunk.height, 1),
            TextureKind::D2Array => {
                Extent3D::new(shrunk.width, shrunk.height, self.size.depth_or_array_layers)
            }
        })
    }

    /// Number of bytes of `mip_level`.
    pub fn level_byte_size(&self, mip_level: u32) -> Option<usize> {
        self.level_size(mip_level)?
            .byte_size(self.format.bytes_per_texel())
    }
}

/// An opaque handle to a texture buffer resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureBufferId(pub usize);
