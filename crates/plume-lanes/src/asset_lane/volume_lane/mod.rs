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

//! Volume file formats.
//!
//! | extension        | lane                                       | asset                 |
//! |------------------|--------------------------------------------|-----------------------|
//! | `.dat` + `.raw`  | [`DatLoaderLane`] / [`DatSaverLane`]       | [`DatVolume`]         |
//! | `.raw`           | [`RawLoaderLane`] / [`RawSaverLane`]       | [`VolumeImage`]       |
//! | `.table`         | [`TableLoaderLane`] / [`TableSaverLane`]   | [`RgbaImage`]         |
//! | `.volume`        | [`VolumeDescriptionLoaderLane`] / [`VolumeDescriptionSaverLane`] | [`VolumeDescription`] |
//!
//! [`load_volume`] ties them together and builds a ready [`Volume`] from a path.

mod dat;
mod description;
mod raw;
mod table;

pub use self::dat::{DatLoaderLane, DatSaverLane, DatVolume};
pub use self::description::{
    VolumeDescription, VolumeDescriptionLoaderLane, VolumeDescriptionSaverLane,
};
pub use self::raw::{RawLoaderLane, RawLoaderParameters, RawSaverLane};
pub use self::table::{TableLoaderLane, TableSaverLane};

use super::{AssetLoaderLane, FileSystemResolver};
use anyhow::{anyhow, bail, Context, Result};
use plume_core::math::Extent3D;
use plume_core::{DataFormat, RgbaImage, VolumeImage};
use plume_data::Volume;
use std::path::Path;
use std::sync::Arc;

/// Structural problems found while decoding a volume file.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormatError {
    /// A required header field is absent.
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    /// A sample type other than 8 or 16 bit unsigned.
    #[error("unsupported sample format '{0}'")]
    UnsupportedFormat(String),
    /// A `.volume` file of an unknown version.
    #[error("unsupported volume file version '{0}'")]
    UnsupportedVersion(String),
    /// The data does not match the announced size.
    #[error("expected {expected} bytes of voxel data, found {actual}")]
    SizeMismatch {
        /// Bytes implied by the header.
        expected: usize,
        /// Bytes actually present.
        actual: usize,
    },
    /// A resolution whose byte size cannot be addressed.
    #[error(
        "resolution {}x{}x{} is too large",
        .0.width,
        .0.height,
        .0.depth_or_array_layers
    )]
    ResolutionTooLarge(Extent3D),
    /// A `.table` file without enough entries.
    #[error("lookup table has {0} entries, 256 are required")]
    ShortTable(usize),
}

/// Parses a sample type name as used by `.dat` headers and raw loader parameters.
pub(crate) fn parse_data_format(name: &str) -> Result<DataFormat, FormatError> {
    match name.trim().to_ascii_uppercase().as_str() {
        "UCHAR" | "BYTE" | "UINT8" => Ok(DataFormat::Byte),
        "USHORT" | "WORD" | "UINT16" => Ok(DataFormat::Word),
        other => Err(FormatError::UnsupportedFormat(other.to_string())),
    }
}

/// Number of bytes a headerless voxel file of `size` and `format` holds.
pub(crate) fn voxel_byte_size(size: Extent3D, format: DataFormat) -> Result<usize, FormatError> {
    size.byte_size(format.bytes_per_element())
        .ok_or(FormatError::ResolutionTooLarge(size))
}

pub(crate) fn data_format_name(format: DataFormat) -> &'static str {
    match format {
        DataFormat::Byte => "UCHAR",
        DataFormat::Word => "USHORT",
    }
}

fn to_anyhow(error: Box<dyn std::error::Error + Send + Sync>) -> anyhow::Error {
    anyhow!(error)
}

/// Loads a volume from `path`, dispatching on the file extension.
///
/// `.raw` files need `raw_parameters`. A `.volume` description pulls in the
/// voxel file it names, applies its voxel size and, if it names one, replaces
/// the transfer function channels with the referenced lookup table.
pub fn load_volume(path: &Path, raw_parameters: Option<&RawLoaderParameters>) -> Result<Volume> {
    let name = path.to_string_lossy().into_owned();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read '{}'", name))?;
    let resolver = Arc::new(FileSystemResolver::for_file(path));

    match extension.as_str() {
        "dat" => {
            let dat = DatLoaderLane::new(resolver)
                .load(&bytes)
                .map_err(to_anyhow)
                .with_context(|| format!("Failed to load '{}'", name))?;
            let mut volume = Volume::with_image(name, dat.image);
            volume.set_voxel_size(dat.slice_thickness * Volume::DEFAULT_VOXEL_SIZE.x);
            Ok(volume)
        }
        "raw" => {
            let parameters = raw_parameters
                .ok_or_else(|| anyhow!("'{}' is a raw file and needs loader parameters", name))?;
            let image: VolumeImage = RawLoaderLane::new(*parameters)
                .load(&bytes)
                .map_err(to_anyhow)
                .with_context(|| format!("Failed to load '{}'", name))?;
            Ok(Volume::with_image(name, image))
        }
        "volume" => {
            let description = VolumeDescriptionLoaderLane
                .load(&bytes)
                .map_err(to_anyhow)
                .with_context(|| format!("Failed to parse '{}'", name))?;
            let base = resolver.base_path();
            if description.volume_filename.to_ascii_lowercase().ends_with(".volume") {
                bail!("'{}' references another volume description", name);
            }
            let mut volume = load_volume(&base.join(&description.volume_filename), raw_parameters)?;
            if let Some(voxel_size) = description.voxel_size {
                volume.set_voxel_size(voxel_size);
            }
            if let Some(table_name) = &description.transfer_function_filename {
                let table_bytes = std::fs::read(base.join(table_name))
                    .with_context(|| format!("Failed to read transfer function '{}'", table_name))?;
                let table: RgbaImage = TableLoaderLane
                    .load(&table_bytes)
                    .map_err(to_anyhow)
                    .with_context(|| format!("Failed to load transfer function '{}'", table_name))?;
                let control = volume.transfer_function_control_mut();
                control.remove_all_channels();
                control
                    .transfer_function_mut()
                    .set_table(table)
                    .context("Transfer function table has the wrong size")?;
            }
            Ok(volume)
        }
        other => bail!("Unknown volume file extension '{}' for '{}'", other, name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_format_names() {
        assert_eq!(parse_data_format("UCHAR"), Ok(DataFormat::Byte));
        assert_eq!(parse_data_format(" ushort "), Ok(DataFormat::Word));
        assert_eq!(
            parse_data_format("FLOAT"),
            Err(FormatError::UnsupportedFormat("FLOAT".to_string()))
        );
        for format in [DataFormat::Byte, DataFormat::Word] {
            assert_eq!(parse_data_format(data_format_name(format)), Ok(format));
        }
    }
}
