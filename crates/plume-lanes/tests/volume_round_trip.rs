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

use approx::assert_relative_eq;
use plume_core::math::{Extent3D, Vec3};
use plume_core::{DataFormat, RgbaImage, VolumeImage};
use plume_lanes::asset_lane::volume_lane::{
    load_volume, DatSaverLane, DatVolume, RawLoaderParameters, RawSaverLane, TableSaverLane,
    VolumeDescription, VolumeDescriptionSaverLane,
};
use plume_lanes::{AssetSaverLane, FileSystemResolver};
use std::path::Path;
use std::sync::Arc;

fn word_image() -> VolumeImage {
    let size = Extent3D::new(5, 4, 3);
    let count = size.volume().expect("small extent") as u16;
    let samples = (0..count).map(|i| i * 1000).collect();
    VolumeImage::from_u16(size, samples).expect("valid image")
}

fn write_dat(dir: &Path, name: &str, image: &VolumeImage, slice_thickness: Vec3) {
    let resolver = Arc::new(FileSystemResolver::new(dir));
    let header = DatSaverLane::new(resolver, format!("{name}.raw"))
        .save(&DatVolume {
            image: image.clone(),
            slice_thickness,
        })
        .expect("save .dat");
    std::fs::write(dir.join(format!("{name}.dat")), header).expect("write .dat");
}

#[test]
fn dat_round_trip_preserves_layout() {
    let dir = tempfile::tempdir().expect("temp dir");
    let image = word_image();
    write_dat(dir.path(), "ct", &image, Vec3::new(1.0, 1.0, 2.5));

    let volume = load_volume(&dir.path().join("ct.dat"), None).expect("load .dat");
    let loaded = volume.image().expect("image loaded");
    assert_eq!(loaded.size(), image.size());
    assert_eq!(loaded.format(), DataFormat::Word);
    assert_eq!(loaded, &image);

    let voxel_size = volume.voxel_size();
    assert_relative_eq!(voxel_size.x, 0.001, epsilon = 1e-7);
    assert_relative_eq!(voxel_size.z, 0.0025, epsilon = 1e-7);
}

#[test]
fn truncated_dat_payload_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let image = word_image();
    write_dat(dir.path(), "ct", &image, Vec3::new(1.0, 1.0, 1.0));

    let raw = dir.path().join("ct.raw");
    let bytes = std::fs::read(&raw).expect("read .raw");
    std::fs::write(&raw, &bytes[..bytes.len() - 1]).expect("truncate .raw");
    assert!(load_volume(&dir.path().join("ct.dat"), None).is_err());
}

#[test]
fn overflowing_dat_resolution_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let header = "ObjectFileName: ct.raw\n\
                  Resolution: 4294967295 4294967295 4294967295\n\
                  Format: USHORT\n";
    std::fs::write(dir.path().join("ct.dat"), header).expect("write .dat");
    std::fs::write(dir.path().join("ct.raw"), [0u8; 8]).expect("write .raw");
    assert!(load_volume(&dir.path().join("ct.dat"), None).is_err());
}

#[test]
fn raw_needs_parameters() {
    let dir = tempfile::tempdir().expect("temp dir");
    let image =
        VolumeImage::from_u8(Extent3D::new(2, 2, 2), (0..8).collect()).expect("valid image");
    let path = dir.path().join("cube.raw");
    std::fs::write(&path, RawSaverLane.save(&image).expect("save .raw")).expect("write .raw");

    assert!(load_volume(&path, None).is_err());

    let parameters =
        RawLoaderParameters::parse("Width=2 Height=2 Depth=2 DataType=UCHAR").expect("parameters");
    let volume = load_volume(&path, Some(&parameters)).expect("load .raw");
    assert_eq!(volume.image(), Some(&image));
    assert_eq!(volume.voxel_size(), plume_data::Volume::DEFAULT_VOXEL_SIZE);

    let wrong = RawLoaderParameters::new(Extent3D::new(3, 2, 2), DataFormat::Byte);
    assert!(load_volume(&path, Some(&wrong)).is_err());
}

#[test]
fn volume_description_applies_overrides() {
    let dir = tempfile::tempdir().expect("temp dir");
    let image = word_image();
    write_dat(dir.path(), "head", &image, Vec3::ONE);

    let mut table = RgbaImage::new(256, 1);
    for i in 0..256u32 {
        table.set_pixel(i, 0, [i as u8, 0, 255 - i as u8, 128]);
    }
    let table_bytes = TableSaverLane.save(&table).expect("save .table");
    std::fs::write(dir.path().join("head.table"), table_bytes).expect("write .table");

    let mut description = VolumeDescription::new("head.dat");
    description.voxel_size = Some(Vec3::new(0.5, 0.5, 1.0));
    description.transfer_function_filename = Some("head.table".to_string());
    let xml = VolumeDescriptionSaverLane.save(&description).expect("save .volume");
    std::fs::write(dir.path().join("head.volume"), xml).expect("write .volume");

    let mut volume = load_volume(&dir.path().join("head.volume"), None).expect("load .volume");
    assert_eq!(volume.image(), Some(&image));
    assert_eq!(volume.voxel_size(), Vec3::new(0.5, 0.5, 1.0));

    let control = volume.transfer_function_control_mut();
    assert!(control.channels().is_empty());
    assert_eq!(control.image(), Some(&table));
}

#[test]
fn volume_description_rejects_self_reference() {
    let dir = tempfile::tempdir().expect("temp dir");
    let xml = VolumeDescriptionSaverLane
        .save(&VolumeDescription::new("loop.volume"))
        .expect("save .volume");
    std::fs::write(dir.path().join("loop.volume"), xml).expect("write .volume");

    assert!(load_volume(&dir.path().join("loop.volume"), None).is_err());
}

#[test]
fn missing_files_are_errors() {
    let dir = tempfile::tempdir().expect("temp dir");
    assert!(load_volume(&dir.path().join("absent.dat"), None).is_err());

    std::fs::write(
        dir.path().join("orphan.dat"),
        "ObjectFileName: gone.raw\nResolution: 1 1 1\nFormat: UCHAR\n",
    )
    .expect("write .dat");
    assert!(load_volume(&dir.path().join("orphan.dat"), None).is_err());

    std::fs::write(dir.path().join("noise.xyz"), b"??").expect("write");
    assert!(load_volume(&dir.path().join("noise.xyz"), None).is_err());
}
