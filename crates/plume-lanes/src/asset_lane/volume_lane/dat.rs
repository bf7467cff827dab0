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

//! The `.dat` + `.raw` pair: an ASCII header naming a headerless voxel file.
//!
//! ```text
//! ObjectFileName: head.raw
//! TaggedFileName: ---
//! Resolution:     256 256 225
//! SliceThickness: 1 1 1.5
//! Format:         UCHAR
//! ```

use super::{data_format_name, parse_data_format, voxel_byte_size, FormatError};
use crate::asset_lane::{AssetLoaderLane, AssetSaverLane, ResourceResolver};
use anyhow::{Context, Result};
use plume_core::asset::Asset;
use plume_core::math::{Extent3D, Vec3};
use plume_core::{DataFormat, VolumeImage};
use std::error::Error;
use std::sync::Arc;

/// A voxel grid together with the slice thickness recorded in its `.dat` header.
#[derive(Debug, Clone, PartialEq)]
pub struct DatVolume {
    /// The voxels.
    pub image: VolumeImage,
    /// Distance between samples along each axis.
    pub slice_thickness: Vec3,
}

impl Asset for DatVolume {}

#[derive(Debug, Clone, PartialEq)]
struct DatHeader {
    object_file_name: String,
    resolution: Extent3D,
    slice_thickness: Vec3,
    format: DataFormat,
}

fn parse_triple<T: std::str::FromStr>(value: &str, field: &str) -> Result<[T; 3]>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let parts: Vec<&str> = value.split_whitespace().collect();
    if parts.len() != 3 {
        anyhow::bail!("{} needs three values, found '{}'", field, value);
    }
    let mut result = Vec::with_capacity(3);
    for part in parts {
        result.push(
            part.parse::<T>()
                .with_context(|| format!("Invalid {} value '{}'", field, part))?,
        );
    }
    result
        .try_into()
        .map_err(|_| anyhow::anyhow!("{} needs three values", field))
}

impl DatHeader {
    fn parse(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes).context("The .dat header is not valid UTF-8")?;

        let mut object_file_name = None;
        let mut resolution = None;
        let mut slice_thickness = Vec3::ONE;
        let mut format = None;

        for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let Some((key, value)) = line.split_once(':') else {
                log::warn!("Ignoring malformed .dat line '{}'", line);
                continue;
            };
            let value = value.trim();
            match key.trim() {
                "ObjectFileName" => object_file_name = Some(value.to_string()),
                "TaggedFileName" => {}
                "Resolution" => {
                    let [x, y, z] = parse_triple::<u32>(value, "Resolution")?;
                    resolution = Some(Extent3D::new(x, y, z));
                }
                "SliceThickness" => {
                    let [x, y, z] = parse_triple::<f32>(value, "SliceThickness")?;
                    slice_thickness = Vec3::new(x, y, z);
                }
                "Format" => format = Some(parse_data_format(value)?),
                other => log::debug!("Ignoring unknown .dat field '{}'", other),
            }
        }

        Ok(Self {
            object_file_name: object_file_name.ok_or(FormatError::MissingField("ObjectFileName"))?,
            resolution: resolution.ok_or(FormatError::MissingField("Resolution"))?,
            slice_thickness,
            format: format.ok_or(FormatError::MissingField("Format"))?,
        })
    }

    fn to_text(&self) -> String {
        let Extent3D {
            width,
            height,
            depth_or_array_layers,
        } = self.resolution;
        let t = self.slice_thickness;
        format!(
            concat!(
                "ObjectFileName: {}\n",
                "TaggedFileName: ---\n",
                "Resolution:     {} {} {}\n",
                "SliceThickness: {} {} {}\n",
                "Format:         {}\n",
            ),
            self.object_file_name,
            width,
            height,
            depth_or_array_layers,
            t.x,
            t.y,
            t.z,
            data_format_name(self.format)
        )
    }
}

/// Loads `.dat` headers and the raw voxel files they name.
#[derive(Clone)]
pub struct DatLoaderLane {
    resolver: Arc<dyn ResourceResolver>,
}

impl DatLoaderLane {
    /// Creates a loader that fetches the raw voxel files through `resolver`.
    pub fn new(resolver: Arc<dyn ResourceResolver>) -> Self {
        Self { resolver }
    }
}

impl AssetLoaderLane<DatVolume> for DatLoaderLane {
    fn load(&self, bytes: &[u8]) -> Result<DatVolume, Box<dyn Error + Send + Sync>> {
        let header = DatHeader::parse(bytes)
            .inspect_err(|e| log::error!("Invalid .dat header: {:#}", e))?;

        let expected = voxel_byte_size(header.resolution, header.format)
            .inspect_err(|e| log::error!("Invalid .dat header: {}", e))?;
        let raw = self.resolver.resolve(&header.object_file_name)?;
        if raw.len() != expected {
            log::error!(
                "'{}' holds {} bytes, the header announces {}",
                header.object_file_name,
                raw.len(),
                expected
            );
            return Err(Box::new(FormatError::SizeMismatch {
                expected,
                actual: raw.len(),
            }));
        }

        let image = VolumeImage::from_bytes(header.resolution, header.format, &raw)?;
        Ok(DatVolume {
            image,
            slice_thickness: header.slice_thickness,
        })
    }
}

/// Writes a `.dat` header and stores the voxels as a raw file through a resolver.
#[derive(Clone)]
pub struct DatSaverLane {
    resolver: Arc<dyn ResourceResolver>,
    object_file_name: String,
}

impl DatSaverLane {
    /// Creates a saver that stores the voxels as `object_file_name` through `resolver`.
    pub fn new(resolver: Arc<dyn ResourceResolver>, object_file_name: impl Into<String>) -> Self {
        Self {
            resolver,
            object_file_name: object_file_name.into(),
        }
    }
}

impl AssetSaverLane<DatVolume> for DatSaverLane {
    fn save(&self, asset: &DatVolume) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>> {
        self.resolver
            .store(&self.object_file_name, &asset.image.to_le_bytes())?;
        let header = DatHeader {
            object_file_name: self.object_file_name.clone(),
            resolution: asset.image.size(),
            slice_thickness: asset.slice_thickness,
            format: asset.image.format(),
        };
        Ok(header.to_text().into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryResolver {
        files: Mutex<HashMap<String, Vec<u8>>>,
    }

    impl MemoryResolver {
        fn with_file(uri: &str, data: Vec<u8>) -> Arc<Self> {
            let resolver = Self::default();
            resolver
                .files
                .lock()
                .expect("unpoisoned")
                .insert(uri.to_string(), data);
            Arc::new(resolver)
        }
    }

    impl ResourceResolver for MemoryResolver {
        fn resolve(&self, uri: &str) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>> {
            let files = self.files.lock().map_err(|e| e.to_string())?;
            files
                .get(uri)
                .cloned()
                .ok_or_else(|| format!("no file '{uri}'").into())
        }

        fn store(&self, uri: &str, data: &[u8]) -> Result<(), Box<dyn Error + Send + Sync>> {
            let mut files = self.files.lock().map_err(|e| e.to_string())?;
            files.insert(uri.to_string(), data.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_parse_header() {
        let header = DatHeader::parse(
            b"ObjectFileName: foot.raw\n\
              TaggedFileName: ---\n\
              Resolution: 4 5 6\n\
              SliceThickness: 0.5 0.5 1.25\n\
              Format: USHORT\n\
              Comment: scanner 3\n",
        )
        .expect("valid header");
        assert_eq!(header.object_file_name, "foot.raw");
        assert_eq!(header.resolution, Extent3D::new(4, 5, 6));
        assert_eq!(header.slice_thickness, Vec3::new(0.5, 0.5, 1.25));
        assert_eq!(header.format, DataFormat::Word);
    }

    #[test]
    fn test_header_text_parses_back() {
        let header = DatHeader {
            object_file_name: "a.raw".to_string(),
            resolution: Extent3D::new(3, 2, 1),
            slice_thickness: Vec3::new(0.1, 0.2, 0.3),
            format: DataFormat::Byte,
        };
        assert_eq!(DatHeader::parse(header.to_text().as_bytes()).ok(), Some(header));
    }

    #[test]
    fn test_missing_and_invalid_fields() {
        let missing = DatHeader::parse(b"Resolution: 1 1 1\nFormat: UCHAR\n");
        assert!(missing.is_err());
        let bad_resolution =
            DatHeader::parse(b"ObjectFileName: a.raw\nResolution: 1 x 1\nFormat: UCHAR\n");
        assert!(bad_resolution.is_err());
        let two_values =
            DatHeader::parse(b"ObjectFileName: a.raw\nResolution: 1 1\nFormat: UCHAR\n");
        assert!(two_values.is_err());
        let bad_format =
            DatHeader::parse(b"ObjectFileName: a.raw\nResolution: 1 1 1\nFormat: FLOAT\n");
        assert!(bad_format.is_err());
        let too_wide =
            DatHeader::parse(b"ObjectFileName: a.raw\nResolution: 4294967296 1 1\nFormat: UCHAR\n");
        assert!(too_wide.is_err());
    }

    #[test]
    fn test_load_through_resolver() {
        let resolver = MemoryResolver::with_file("v.raw", vec![0x01, 0x00, 0x02, 0x00]);
        let volume = DatLoaderLane::new(resolver)
            .load(b"ObjectFileName: v.raw\nResolution: 2 1 1\nFormat: USHORT\n")
            .expect("valid volume");
        assert_eq!(volume.image.voxel(1, 0, 0), Some(2));
        assert_eq!(volume.slice_thickness, Vec3::ONE);
    }

    #[test]
    fn test_overflowing_resolution_is_an_error() {
        let resolver = MemoryResolver::with_file("a.raw", vec![0; 8]);
        let error = DatLoaderLane::new(resolver)
            .load(
                b"ObjectFileName: a.raw\n\
                  Resolution: 4294967295 4294967295 4294967295\n\
                  Format: USHORT\n",
            )
            .expect_err("resolution overflows");
        let huge = Extent3D::new(u32::MAX, u32::MAX, u32::MAX);
        assert_eq!(
            error.downcast_ref::<FormatError>(),
            Some(&FormatError::ResolutionTooLarge(huge))
        );
    }

    #[test]
    fn test_short_raw_file_is_an_error() {
        let resolver = MemoryResolver::with_file("short.raw", vec![0; 7]);
        let error = DatLoaderLane::new(resolver)
            .load(b"ObjectFileName: short.raw\nResolution: 2 2 2\nFormat: UCHAR\n")
            .expect_err("one byte short");
        assert_eq!(
            error.downcast_ref::<FormatError>(),
            Some(&FormatError::SizeMismatch {
                expected: 8,
                actual: 7
            })
        );
    }

    #[test]
    fn test_oversized_raw_file_is_an_error() {
        let resolver = MemoryResolver::with_file("long.raw", vec![0; 9]);
        let result = DatLoaderLane::new(resolver)
            .load(b"ObjectFileName: long.raw\nResolution: 2 2 2\nFormat: UCHAR\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_save_stores_raw_file() {
        let resolver = Arc::new(MemoryResolver::default());
        let image = VolumeImage::from_u8(Extent3D::new(2, 1, 1), vec![3, 4]).expect("valid image");
        let header = DatSaverLane::new(resolver.clone(), "out.raw")
            .save(&DatVolume {
                image: image.clone(),
                slice_thickness: Vec3::ONE,
            })
            .expect("save");
        assert_eq!(resolver.resolve("out.raw").ok(), Some(vec![3, 4]));

        let loaded = DatLoaderLane::new(resolver).load(&header).expect("load");
        assert_eq!(loaded.image, image);
    }
}
