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

//! Transfer functions map scalar samples to colour and opacity.
//!
//! [`TransferFunction`] owns a `256 × 1` RGBA lookup table and the texture
//! buffers derived from it. [`TransferFunctionControl`] builds that table from
//! editable channels of control points joined by natural cubic splines.

mod channel;
mod control;
mod control_point;
pub mod preintegration;
pub mod spline;

pub use self::channel::TransferFunctionChannel;
pub use self::control::{
    TransferFunctionControl, CIRCLE_RADIUS_DRAW, CIRCLE_RADIUS_SELECTION, MIN_ISO_VALUE_DISTANCE,
};
pub use self::control_point::TransferControlPoint;
pub use self::spline::{calculate_cubic_spline, CubicSpline};

use plume_core::math::{Color4, Extent3D};
use plume_core::renderer::{
    TextureBufferDescriptor, TextureBufferFlags, TextureBufferHandle, TextureDevice, TextureFormat,
    TextureKind,
};
use plume_core::{ImageError, RgbaImage};
use std::borrow::Cow;
use std::sync::Arc;

/// Number of bins of a lookup table.
pub const NUMBER_OF_BINS: u32 = 256;

/// The texture representations a transfer function can provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferFunctionTexture {
    /// The lookup table as is, for post-interpolative classification.
    Standard,
    /// The lookup table with colours multiplied by opacity, which avoids colour bleeding.
    PreMultiplied,
    /// A `bins × bins` table for pre-integrated classification.
    PreIntegrated,
}

impl TransferFunctionTexture {
    /// Every texture representation.
    pub const ALL: [Self; 3] = [Self::Standard, Self::PreMultiplied, Self::PreIntegrated];

    fn slot(self) -> usize {
        match self {
            Self::Standard => 0,
            Self::PreMultiplied => 1,
            Self::PreIntegrated => 2,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Standard => "transfer-function",
            Self::PreMultiplied => "transfer-function-premultiplied",
            Self::PreIntegrated => "transfer-function-preintegrated",
        }
    }
}

/// Owner of a lookup table and its lazily created texture buffers.
#[derive(Debug, Default)]
pub struct TransferFunction {
    table: Option<RgbaImage>,
    textures: [Option<TextureBufferHandle>; 3],
}

impl TransferFunction {
    /// Creates a transfer function without a table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The lookup table, if one is assigned.
    pub fn table(&self) -> Option<&RgbaImage> {
        self.table.as_ref()
    }

    /// Assigns a `256 × 1` lookup table. Existing texture buffers are released.
    pub fn set_table(&mut self, table: RgbaImage) -> Result<(), ImageError> {
        if table.width() != NUMBER_OF_BINS || table.height() != 1 {
            return Err(ImageError::SizeMismatch {
                expected: NUMBER_OF_BINS as usize * 4,
                actual: table.as_bytes().len(),
            });
        }
        self.replace_table(table);
        Ok(())
    }

    pub(crate) fn replace_table(&mut self, table: RgbaImage) {
        self.table = Some(table);
        self.release_texture_buffers();
    }

    /// Returns the texture buffer of the requested representation, creating it on first use.
    ///
    /// Returns `None` without a table or when the device refuses the buffer.
    pub fn texture_buffer(
        &mut self,
        device: &Arc<dyn TextureDevice>,
        texture: TransferFunctionTexture,
    ) -> Option<&TextureBufferHandle> {
        let slot = texture.slot();
        if self.textures[slot].is_none() {
            let table = self.table.as_ref()?;
            let image = match texture {
                TransferFunctionTexture::Standard => Cow::Borrowed(table),
                TransferFunctionTexture::PreMultiplied => Cow::Owned(premultiplied(table)),
                TransferFunctionTexture::PreIntegrated => {
                    Cow::Owned(preintegration::preintegrate(table))
                }
            };
            let descriptor = TextureBufferDescriptor {
                label: Some(Cow::Borrowed(texture.label())),
                kind: TextureKind::D2,
                size: Extent3D::new(image.width(), image.height(), 1),
                format: TextureFormat::Rgba8,
                flags: TextureBufferFlags::NONE,
            };
            match device.create_texture_buffer(&descriptor, image.as_bytes()) {
                Ok(id) => {
                    self.textures[slot] = Some(TextureBufferHandle::new(id, device.clone()));
                }
                Err(e) => {
                    log::error!("Failed to create {:?} transfer function texture: {}", texture, e);
                    return None;
                }
            }
        }
        self.textures[slot].as_ref()
    }

    /// Releases every texture buffer. The table is kept.
    pub fn release_texture_buffers(&mut self) {
        self.textures = Default::default();
    }

    /// Drops the table and every texture buffer.
    pub fn unload(&mut self) {
        self.table = None;
        self.release_texture_buffers();
    }
}

/// Returns a copy of `table` with every colour multiplied by its opacity.
pub fn premultiplied(table: &RgbaImage) -> RgbaImage {
    let mut result = table.clone();
    for x in 0..table.width() {
        for y in 0..table.height() {
            if let Some(rgba) = table.pixel(x, y) {
                let c = Color4::from_rgba8(rgba);
                let premultiplied = Color4::new(c.r * c.a, c.g * c.a, c.b * c.a, c.a);
                result.set_pixel(x, y, premultiplied.to_rgba8());
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_size_is_checked() {
        let mut function = TransferFunction::new();
        assert!(function.set_table(RgbaImage::new(128, 1)).is_err());
        assert!(function.table().is_none());
        assert!(function.set_table(RgbaImage::new(256, 1)).is_ok());
        assert!(function.table().is_some());
        function.unload();
        assert!(function.table().is_none());
    }

    #[test]
    fn test_premultiplied() {
        let table = RgbaImage::from_raw(2, 1, vec![255, 255, 255, 0, 200, 100, 50, 255])
            .expect("valid size");
        let result = premultiplied(&table);
        assert_eq!(result.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(result.pixel(1, 0), Some([200, 100, 50, 255]));
    }
}
