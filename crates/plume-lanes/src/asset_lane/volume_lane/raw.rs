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

//! Headerless voxel files. Their layout has to be supplied by the caller.

use super::{parse_data_format, voxel_byte_size, FormatError};
use crate::asset_lane::{AssetLoaderLane, AssetSaverLane};
use anyhow::{Context, Result};
use plume_core::math::Extent3D;
use plume_core::{DataFormat, VolumeImage};
use std::error::Error;

/// Dimensions and sample type of a raw voxel file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLoaderParameters {
    /// Voxel count along each axis.
    pub size: Extent3D,
    /// Sample type.
    pub format: DataFormat,
}

impl RawLoaderParameters {
    /// Creates a new set of parameters.
    pub const fn new(size: Extent3D, format: DataFormat) -> Self {
        Self { size, format }
    }

    /// Parses `Width=256 Height=256 Depth=128 DataType=UCHAR`.
    ///
    /// Keys are case-insensitive and may come in any order. `DataType`
    /// defaults to `UCHAR`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut width = None;
        let mut height = None;
        let mut depth = None;
        let mut format = DataFormat::Byte;

        for pair in text.split(|c: char| c.is_whitespace() || c == ',') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair
                .split_once('=')
                .with_context(|| format!("Expected 'Key=Value', found '{}'", pair))?;
            let dimension = || {
                value
                    .parse::<u32>()
                    .with_context(|| format!("Invalid {} '{}'", key, value))
            };
            match key.to_ascii_lowercase().as_str() {
                "width" => width = Some(dimension()?),
                "height" => height = Some(dimension()?),
                "depth" => depth = Some(dimension()?),
                "datatype" => format = parse_data_format(value)?,
                _ => anyhow::bail!("Unknown raw loader parameter '{}'", key),
            }
        }

        Ok(Self {
            size: Extent3D::new(
                width.ok_or(FormatError::MissingField("Width"))?,
                height.ok_or(FormatError::MissingField("Height"))?,
                depth.ok_or(FormatError::MissingField("Depth"))?,
            ),
            format,
        })
    }

    /// Number of bytes a file with this layout holds.
    pub fn byte_size(&self) -> Result<usize, FormatError> {
        voxel_byte_size(self.size, self.format)
    }
}

/// Loads a raw voxel file with a known layout.
#[derive(Debug, Clone, Copy)]
pub struct RawLoaderLane {
    parameters: RawLoaderParameters,
}

impl RawLoaderLane {
    /// Creates a loader for files laid out as `parameters` describe.
    pub fn new(parameters: RawLoaderParameters) -> Self {
        Self { parameters }
    }
}

impl AssetLoaderLane<VolumeImage> for RawLoaderLane {
    fn load(&self, bytes: &[u8]) -> Result<VolumeImage, Box<dyn Error + Send + Sync>> {
        let expected = self
            .parameters
            .byte_size()
            .inspect_err(|e| log::error!("Invalid raw loader parameters: {}", e))?;
        if bytes.len() != expected {
            log::error!(
                "Raw file holds {} bytes, {:?} needs {}",
                bytes.len(),
                self.parameters,
                expected
            );
            return Err(Box::new(FormatError::SizeMismatch {
                expected,
                actual: bytes.len(),
            }));
        }
        Ok(VolumeImage::from_bytes(
            self.parameters.size,
            self.parameters.format,
            bytes,
        )?)
    }
}

/// Writes the voxels of an image without any header, words little-endian.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawSaverLane;

impl AssetSaverLane<VolumeImage> for RawSaverLane {
    fn save(&self, asset: &VolumeImage) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>> {
        Ok(asset.to_le_bytes().into_owned())
    }
}
