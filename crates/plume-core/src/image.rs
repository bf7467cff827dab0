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

//! CPU-side images: scalar voxel volumes and RGBA lookup tables.

use std::borrow::Cow;
use std::fmt;

use crate::math::Extent3D;
use crate::renderer::TextureFormat;

/// An error raised while building or accessing an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// The supplied buffer does not match the image dimensions.
    SizeMismatch {
        /// Number of bytes the dimensions require.
        expected: usize,
        /// Number of bytes supplied.
        actual: usize,
    },
    /// One of the dimensions is zero.
    EmptyExtent,
    /// The dimensions describe more data than can be addressed.
    TooLarge,
    /// The sample depth is not supported.
    UnsupportedFormat(String),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::SizeMismatch { expected, actual } => {
                write!(f, "Image data has {actual} bytes, expected {expected}")
            }
            ImageError::EmptyExtent => write!(f, "Image has a zero-sized dimension"),
            ImageError::TooLarge => write!(f, "Image dimensions exceed the addressable size"),
            ImageError::UnsupportedFormat(format) => {
                write!(f, "Unsupported image data format: {format}")
            }
        }
    }
}

impl std::error::Error for ImageError {}

/// Depth of a single voxel sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataFormat {
    /// One unsigned byte per voxel (`UCHAR`).
    Byte,
    /// One unsigned 16-bit word per voxel (`USHORT`).
    Word,
}

impl DataFormat {
    /// Size of one voxel in bytes.
    pub const fn bytes_per_element(self) -> usize {
        match self {
            DataFormat::Byte => 1,
            DataFormat::Word => 2,
        }
    }

    /// Matching single-channel texture format.
    pub const fn texture_format(self) -> TextureFormat {
        match self {
            DataFormat::Byte => TextureFormat::R8,
            DataFormat::Word => TextureFormat::R16,
        }
    }

    /// Largest representable sample value.
    pub const fn max_value(self) -> u32 {
        match self {
            DataFormat::Byte => u8::MAX as u32,
            DataFormat::Word => u16::MAX as u32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum VoxelData {
    Byte(Vec<u8>),
    Word(Vec<u16>),
}

/// A three-dimensional grid of scalar samples, one per voxel.
///
/// Voxels are stored x-fastest, then y, then z.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeImage {
    size: Extent3D,
    data: VoxelData,
}

impl VolumeImage {
    /// Creates a zero-filled image.
    pub fn new(size: Extent3D, format: DataFormat) -> Result<Self, ImageError> {
        if size.is_empty() {
            return Err(ImageError::EmptyExtent);
        }
        let count = size
            .byte_size(format.bytes_per_element())
            .and(size.volume())
            .ok_or(ImageError::TooLarge)?;
        let data = match format {
            DataFormat::Byte => VoxelData::Byte(vec![0; count]),
            DataFormat::Word => VoxelData::Word(vec![0; count]),
        };
        Ok(Self { size, data })
    }

    /// Builds an image from raw bytes. Words are read little-endian.
    pub fn from_bytes(
        size: Extent3D,
        format: DataFormat,
        bytes: &[u8],
    ) -> Result<Self, ImageError> {
        if size.is_empty() {
            return Err(ImageError::EmptyExtent);
        }
        let expected = size
            .byte_size(format.bytes_per_element())
            .ok_or(ImageError::TooLarge)?;
        if bytes.len() != expected {
            return Err(ImageError::SizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        let data = match format {
            DataFormat::Byte => VoxelData::Byte(bytes.to_vec()),
            DataFormat::Word => VoxelData::Word(
                bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect(),
            ),
        };
        Ok(Self { size, data })
    }

    /// Builds a byte image from samples.
    pub fn from_u8(size: Extent3D, samples: Vec<u8>) -> Result<Self, ImageError> {
        Self::check_count(size, samples.len(), 1)?;
        Ok(Self {
            size,
            data: VoxelData::Byte(samples),
        })
    }

    /// Builds a word image from samples.
    pub fn from_u16(size: Extent3D, samples: Vec<u16>) -> Result<Self, ImageError> {
        Self::check_count(size, samples.len(), 2)?;
        Ok(Self {
            size,
            data: VoxelData::Word(samples),
        })
    }

    fn check_count(
        size: Extent3D,
        count: usize,
        bytes_per_element: usize,
    ) -> Result<(), ImageError> {
        if size.is_empty() {
            return Err(ImageError::EmptyExtent);
        }
        let expected = size
            .byte_size(bytes_per_element)
            .ok_or(ImageError::TooLarge)?;
        let actual = count.saturating_mul(bytes_per_element);
        if actual != expected {
            return Err(ImageError::SizeMismatch { expected, actual });
        }
        Ok(())
    }

    /// Dimensions in voxels.
    pub fn size(&self) -> Extent3D {
        self.size
    }

    /// Sample depth.
    pub fn format(&self) -> DataFormat {
        match self.data {
            VoxelData::Byte(_) => DataFormat::Byte,
            VoxelData::Word(_) => DataFormat::Word,
        }
    }

    /// Size of one voxel in bytes.
    pub fn bytes_per_element(&self) -> usize {
        self.format().bytes_per_element()
    }

    /// Number of voxels.
    pub fn voxel_count(&self) -> usize {
        match &self.data {
            VoxelData::Byte(samples) => samples.len(),
            VoxelData::Word(samples) => samples.len(),
        }
    }

    /// Size of the voxel data in bytes.
    pub fn data_size(&self) -> usize {
        self.voxel_count() * self.bytes_per_element()
    }

    /// Voxel data in native byte order.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.data {
            VoxelData::Byte(samples) => samples,
            VoxelData::Word(samples) => bytemuck::cast_slice(samples),
        }
    }

    /// Voxel data in little-endian byte order, as written to `.raw` files.
    pub fn to_le_bytes(&self) -> Cow<'_, [u8]> {
        match &self.data {
            VoxelData::Byte(samples) => Cow::Borrowed(samples),
            VoxelData::Word(samples) => {
                Cow::Owned(samples.iter().flat_map(|sample| sample.to_le_bytes()).collect())
            }
        }
    }

    /// Sample at `(x, y, z)`, widened to `u16`.
    pub fn voxel(&self, x: u32, y: u32, z: u32) -> Option<u16> {
        let index = self.index(x, y, z)?;
        match &self.data {
            VoxelData::Byte(samples) => samples.get(index).map(|&sample| u16::from(sample)),
            VoxelData::Word(samples) => samples.get(index).copied(),
        }
    }

    /// Writes the sample at `(x, y, z)`. Byte images saturate at 255.
    pub fn set_voxel(&mut self, x: u32, y: u32, z: u32, value: u16) -> bool {
        let Some(index) = self.index(x, y, z) else {
            return false;
        };
        match &mut self.data {
            VoxelData::Byte(samples) => match samples.get_mut(index) {
                Some(sample) => *sample = value.min(u16::from(u8::MAX)) as u8,
                None => return false,
            },
            VoxelData::Word(samples) => match samples.get_mut(index) {
                Some(sample) => *sample = value,
                None => return false,
            },
        }
        true
    }

    /// Every sample widened to `u16`, in storage order.
    pub fn samples(&self) -> Box<dyn Iterator<Item = u16> + '_> {
        match &self.data {
            VoxelData::Byte(samples) => Box::new(samples.iter().map(|&s| u16::from(s))),
            VoxelData::Word(samples) => Box::new(samples.iter().copied()),
        }
    }

    fn index(&self, x: u32, y: u32, z: u32) -> Option<usize> {
        let size = self.size;
        if x >= size.width || y >= size.height || z >= size.depth_or_array_layers {
            return None;
        }
        let (x, y, z) = (x as usize, y as usize, z as usize);
        let (width, height) = (size.width as usize, size.height as usize);
        Some(x + width * (y + height * z))
    }
}

/// A two-dimensional RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbaImage {
    /// Creates a transparent black image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Wraps existing RGBA8 pixel data.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ImageError> {
        let expected = Extent3D::new(width, height, 1)
            .byte_size(4)
            .ok_or(ImageError::TooLarge)?;
        if data.len() != expected {
            return Err(ImageError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel data, four bytes per pixel, row by row.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let offset = self.offset(x, y)?;
        let texel = self.data.get(offset..offset + 4)?;
        Some([texel[0], texel[1], texel[2], texel[3]])
    }

    /// Overwrites the pixel at `(x, y)`.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) -> bool {
        let Some(offset) = self.offset(x, y) else {
            return false;
        };
        match self.data.get_mut(offset..offset + 4) {
            Some(texel) => {
                texel.copy_from_slice(&rgba);
                true
            }
            None => false,
        }
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_reads_little_endian_words() {
        let size = Extent3D::new(2, 1, 1);
        let image =
            VolumeImage::from_bytes(size, DataFormat::Word, &[0x34, 0x12, 0xff, 0x00]).unwrap();
        assert_eq!(image.voxel(0, 0, 0), Some(0x1234));
        assert_eq!(image.voxel(1, 0, 0), Some(0x00ff));
        assert_eq!(image.to_le_bytes().as_ref(), &[0x34, 0x12, 0xff, 0x00]);
        assert_eq!(image.data_size(), 4);
    }

    #[test]
    fn test_size_mismatch_is_rejected() {
        let size = Extent3D::new(2, 2, 2);
        let result = VolumeImage::from_bytes(size, DataFormat::Byte, &[0; 7]);
        assert_eq!(
            result,
            Err(ImageError::SizeMismatch {
                expected: 8,
                actual: 7
            })
        );
        assert_eq!(
            VolumeImage::from_u8(Extent3D::new(0, 1, 1), Vec::new()),
            Err(ImageError::EmptyExtent)
        );
    }

    #[test]
    fn test_oversized_extent_is_rejected() {
        let huge = Extent3D::new(u32::MAX, u32::MAX, u32::MAX);
        assert_eq!(
            VolumeImage::from_bytes(huge, DataFormat::Word, &[0; 4]),
            Err(ImageError::TooLarge)
        );
        assert_eq!(VolumeImage::from_u8(huge, vec![0; 4]), Err(ImageError::TooLarge));
        assert_eq!(VolumeImage::new(huge, DataFormat::Byte), Err(ImageError::TooLarge));
        assert_eq!(
            RgbaImage::from_raw(u32::MAX, u32::MAX, Vec::new()),
            Err(ImageError::TooLarge)
        );
    }

    #[test]
    fn test_voxel_addressing() {
        let mut image = VolumeImage::new(Extent3D::new(3, 2, 2), DataFormat::Byte).unwrap();
        assert!(image.set_voxel(2, 1, 1, 300));
        assert!(!image.set_voxel(3, 0, 0, 1));
        assert_eq!(image.voxel(2, 1, 1), Some(255), "byte voxels saturate");
        assert_eq!(image.as_bytes()[11], 255);
        assert_eq!(image.samples().filter(|&s| s != 0).count(), 1);
    }

    #[test]
    fn test_rgba_pixels() {
        let mut image = RgbaImage::new(4, 2);
        assert!(image.set_pixel(3, 1, [1, 2, 3, 4]));
        assert!(!image.set_pixel(4, 1, [0; 4]));
        assert_eq!(image.pixel(3, 1), Some([1, 2, 3, 4]));
        assert_eq!(image.pixel(0, 0), Some([0; 4]));
        assert!(RgbaImage::from_raw(2, 2, vec![0; 15]).is_err());
    }
}
