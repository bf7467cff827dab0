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

//! Provides the integer extent used for voxel grids and texture sizes.

/// A three-dimensional extent, representing width, height, and depth.
///
/// For a volume this is the number of voxels along each axis. For a 2D array
/// texture the depth is the number of array layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent3D {
    /// The width component of the extent.
    pub width: u32,
    /// The height component of the extent.
    pub height: u32,
    /// The depth or number of array layers.
    pub depth_or_array_layers: u32,
}

impl Extent3D {
    /// An extent with all components set to zero.
    pub const ZERO: Self = Self::new(0, 0, 0);

    /// Creates a new extent.
    #[inline]
    pub const fn new(width: u32, height: u32, depth_or_array_layers: u32) -> Self {
        Self {
            width,
            height,
            depth_or_array_layers,
        }
    }

    /// Returns the total number of elements (voxels or texels) covered by the extent,
    /// or `None` if it does not fit in a `usize`.
    #[inline]
    pub fn volume(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(self.depth_or_array_layers as usize)
    }

    /// Returns the number of bytes covered with `bytes_per_element` bytes per element,
    /// or `None` on overflow.
    #[inline]
    pub fn byte_size(&self, bytes_per_element: usize) -> Option<usize> {
        self.volume()?.checked_mul(bytes_per_element)
    }

    /// Returns `true` if any axis has a size of zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.depth_or_array_layers == 0
    }

    /// Returns the longest axis.
    #[inline]
    pub fn max_axis(&self) -> u32 {
        self.width.max(self.height).max(self.depth_or_array_layers)
    }

    /// Returns the extent of the given mip level of a full 3D mip chain.
    ///
    /// Every axis is halved per level and never drops below one.
    #[inline]
    pub fn mip_level_size(&self, level: u32) -> Self {
        let shrink = |v: u32| v.checked_shr(level).unwrap_or(0).max(1);
        Self::new(
            shrink(self.width),
            shrink(self.height),
            shrink(self.depth_or_array_layers),
        )
    }

    /// Returns the number of levels of a full 3D mip chain down to `1x1x1`.
    #[inline]
    pub fn max_mips(&self) -> u32 {
        let max = self.max_axis();
        if max == 0 {
            0
        } else {
            32 - max.leading_zeros()
        }
    }
}
