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

//! `.volume` descriptions: a small XML document pointing at the voxel data and,
//! optionally, a lookup table.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <Volume Version="1">
//!   <VolumeFilename>head.dat</VolumeFilename>
//!   <VoxelSize>0.001 0.001 0.0015</VoxelSize>
//!   <TransferFunctionFilename>head.table</TransferFunctionFilename>
//! </Volume>
//! ```

use super::FormatError;
use crate::asset_lane::{AssetLoaderLane, AssetSaverLane};
use anyhow::{bail, Context};
use plume_core::asset::Asset;
use plume_core::math::Vec3;
use serde::{Deserialize, Serialize};
use std::error::Error;

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Contents of a `.volume` file.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeDescription {
    /// Format version, always [`VolumeDescription::VERSION`] once loaded.
    pub version: String,
    /// Voxel data file, relative to the description.
    pub volume_filename: String,
    /// Overrides the voxel size found in the voxel data file.
    pub voxel_size: Option<Vec3>,
    /// Lookup table replacing the default transfer function.
    pub transfer_function_filename: Option<String>,
}

impl Asset for VolumeDescription {}

impl VolumeDescription {
    /// The only version this crate reads and writes.
    pub const VERSION: &'static str = "1";

    /// Describes `volume_filename` with no overrides.
    pub fn new(volume_filename: impl Into<String>) -> Self {
        Self {
            version: Self::VERSION.to_string(),
            volume_filename: volume_filename.into(),
            voxel_size: None,
            transfer_function_filename: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename = "Volume")]
struct VolumeDocument {
    #[serde(rename = "@Version")]
    version: String,
    #[serde(rename = "VolumeFilename")]
    volume_filename: String,
    #[serde(rename = "VoxelSize", default, skip_serializing_if = "Option::is_none")]
    voxel_size: Option<String>,
    #[serde(
        rename = "TransferFunctionFilename",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    transfer_function_filename: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_voxel_size(text: &str) -> anyhow::Result<Vec3> {
    let values = text
        .split_whitespace()
        .map(|v| v.parse::<f32>().with_context(|| format!("Invalid voxel size component '{}'", v)))
        .collect::<anyhow::Result<Vec<f32>>>()?;
    match values.as_slice() {
        &[x, y, z] => Ok(Vec3::new(x, y, z)),
        _ => bail!("VoxelSize needs three values, found '{}'", text),
    }
}

fn parse_description(text: &str) -> anyhow::Result<VolumeDescription> {
    let document: VolumeDocument =
        quick_xml::de::from_str(text).context("Malformed volume description")?;

    let version = document.version.trim();
    if version != VolumeDescription::VERSION {
        log::error!("Volume description version '{}' is not supported", version);
        bail!(FormatError::UnsupportedVersion(version.to_string()));
    }

    let volume_filename = non_empty(Some(document.volume_filename))
        .ok_or(FormatError::MissingField("VolumeFilename"))?;
    let voxel_size = non_empty(document.voxel_size)
        .map(|text| parse_voxel_size(&text))
        .transpose()?;

    Ok(VolumeDescription {
        version: version.to_string(),
        volume_filename,
        voxel_size,
        transfer_function_filename: non_empty(document.transfer_function_filename),
    })
}

/// Loads `.volume` descriptions. Referenced files are left to the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct VolumeDescriptionLoaderLane;

impl AssetLoaderLane<VolumeDescription> for VolumeDescriptionLoaderLane {
    fn load(&self, bytes: &[u8]) -> Result<VolumeDescription, Box<dyn Error + Send + Sync>> {
        let text = std::str::from_utf8(bytes)?;
        Ok(parse_description(text)?)
    }
}

/// Writes `.volume` descriptions.
#[derive(Debug, Clone, Copy, Default)]
pub struct VolumeDescriptionSaverLane;

impl AssetSaverLane<VolumeDescription> for VolumeDescriptionSaverLane {
    fn save(&self, asset: &VolumeDescription) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>> {
        let document = VolumeDocument {
            version: VolumeDescription::VERSION.to_string(),
            volume_filename: asset.volume_filename.clone(),
            voxel_size: asset
                .voxel_size
                .map(|v| format!("{} {} {}", v.x, v.y, v.z)),
            transfer_function_filename: asset.transfer_function_filename.clone(),
        };
        let body = quick_xml::se::to_string(&document)?;
        Ok(format!("{}{}\n", XML_DECLARATION, body).into_bytes())
    }
}
