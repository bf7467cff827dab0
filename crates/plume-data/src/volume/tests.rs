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

use super::*;
use approx::assert_abs_diff_eq;
use plume_core::renderer::TextureFormat;
use plume_infra::{HostDeviceSettings, HostTextureDevice};

fn device_with(settings: HostDeviceSettings) -> Arc<dyn TextureDevice> {
    Arc::new(HostTextureDevice::new(settings))
}

fn ramp_volume(size: Extent3D) -> Volume {
    let count = size.volume().expect("small extent");
    let samples: Vec<u8> = (0..count).map(|i| (i % 256) as u8).collect();
    let image = VolumeImage::from_u8(size, samples).expect("matching size");
    Volume::with_image("ramp", image)
}

#[test]
fn test_upload_prefers_3d_and_unloads_image() {
    let device = device_with(HostDeviceSettings::default());
    let mut volume = ramp_volume(Extent3D::new(8, 8, 8));

    let info = volume
        .volume_texture_buffer(&device, false, true)
        .map(|handle| handle.info().expect("live buffer"))
        .expect("uploaded");
    assert_eq!(info.kind, TextureKind::D3);
    assert_eq!(info.format, TextureFormat::R8);
    assert_eq!(info.mip_level_count, 4);
    assert!(volume.image().is_none());
    assert_eq!(volume.image_size(), Extent3D::new(8, 8, 8));

    // A second request reuses the buffer.
    let first = volume.texture_buffer().map(TextureBufferHandle::id);
    let second = volume.volume_texture_buffer(&device, false, true).map(TextureBufferHandle::id);
    assert_eq!(first, second);
}

#[test]
fn test_upload_falls_back_to_2d_array_without_mipmaps() {
    let device = device_with(HostDeviceSettings {
        texture_3d: false,
        ..Default::default()
    });
    let mut volume = ramp_volume(Extent3D::new(4, 4, 3));
    let info = volume
        .volume_texture_buffer(&device, true, true)
        .map(|handle| handle.info().expect("live buffer"))
        .expect("uploaded");
    assert_eq!(info.kind, TextureKind::D2Array);
    assert_eq!(info.mip_level_count, 1);
    assert!(info.flags.contains(TextureBufferFlags::COMPRESSION));
}

#[test]
fn test_upload_without_capabilities_keeps_image() {
    let device = device_with(HostDeviceSettings {
        texture_3d: false,
        texture_2d_array: false,
        total_memory_kib: 0,
    });
    let mut volume = ramp_volume(Extent3D::new(2, 2, 2));
    assert!(volume.volume_texture_buffer(&device, false, false).is_none());
    assert!(volume.image().is_some());
}

#[test]
fn test_upload_continues_when_memory_is_short() {
    let device = device_with(HostDeviceSettings {
        total_memory_kib: 1,
        ..Default::default()
    });
    let mut volume = ramp_volume(Extent3D::new(32, 32, 32));
    assert!(volume.volume_texture_buffer(&device, false, false).is_some());
}

#[test]
fn test_step_size_needs_texture_buffer() {
    let volume = ramp_volume(Extent3D::new(8, 8, 8));
    assert_eq!(volume.step_size(0.0, 1.0, 10.0), None);
    let raw = volume
        .step_size(0.0, 1.0, 10.0)
        .map_or(StepSize::ERROR, |step| step.step_size);
    assert_eq!(raw, -1.0);
}

#[test]
fn test_step_size_follows_sample_rate() {
    let device = device_with(HostDeviceSettings::default());
    let mut volume = ramp_volume(Extent3D::new(64, 32, 16));
    volume.volume_texture_buffer(&device, false, true);

    let base = volume.step_size(0.0, 1.0, 10.0).expect("uploaded");
    assert_abs_diff_eq!(base.step_size, 0.5 / 64.0, epsilon = 1e-7);
    assert_abs_diff_eq!(base.opacity_correction, 0.5, epsilon = 1e-6);

    let mut previous = f32::MAX;
    for factor in [0.25, 0.5, 1.0, 2.0, 4.0, 8.0] {
        let step = volume.step_size(0.0, factor, 10.0).expect("uploaded").step_size;
        assert!(step < previous, "factor {factor} gave {step}");
        previous = step;
    }

    // The factor is limited by the maximum.
    let capped = volume.step_size(0.0, 100.0, 2.0).expect("uploaded");
    let at_max = volume.step_size(0.0, 2.0, 2.0).expect("uploaded");
    assert_eq!(capped, at_max);
    assert_eq!(volume.step_size(0.0, 0.0, 10.0), None);
}

#[test]
fn test_step_size_interpolates_mip_levels() {
    let device = device_with(HostDeviceSettings::default());
    let mut volume = ramp_volume(Extent3D::new(64, 64, 64));
    volume.volume_texture_buffer(&device, false, true);

    let level_1 = volume.step_size(1.0, 1.0, 10.0).expect("uploaded").step_size;
    assert_abs_diff_eq!(level_1, 0.5 / 32.0, epsilon = 1e-7);
    // Halfway between 32 and 16 voxels.
    let halfway = volume.step_size(1.5, 1.0, 10.0).expect("uploaded").step_size;
    assert_abs_diff_eq!(halfway, 0.5 / 24.0, epsilon = 1e-7);
    // Levels past the chain are clamped to the last one.
    let clamped = volume.step_size(100.0, 1.0, 10.0).expect("uploaded").step_size;
    assert_abs_diff_eq!(clamped, 0.5, epsilon = 1e-7);
}

#[test]
fn test_histogram_from_host_and_device() {
    let device = device_with(HostDeviceSettings::default());
    let samples: Vec<u16> = (0..27).map(|i| (i * 1000) as u16).collect();
    let image = VolumeImage::from_u16(Extent3D::new(3, 3, 3), samples).expect("matching size");
    let mut volume = Volume::with_image("words", image);

    let on_host = volume.create_histogram().expect("image present");
    volume.volume_texture_buffer(&device, false, false);
    assert!(volume.image().is_none());
    let downloaded = volume.create_histogram().expect("buffer present");

    assert_eq!(on_host.bin_count(), 65536);
    assert_eq!(downloaded.sample_range(), Some((0, 26_000)));
    assert_eq!(on_host.bin_values(), downloaded.bin_values());
}

#[test]
fn test_duplicate_and_unload() {
    let mut source = ramp_volume(Extent3D::new(2, 2, 2));
    source.set_voxel_size(Vec3::new(0.5, 0.5, 2.0));

    let mut copy = Volume::new("copy");
    assert_eq!(copy.voxel_size(), Volume::DEFAULT_VOXEL_SIZE);
    copy.duplicate_from(&source);
    assert_eq!(copy.image(), source.image());
    assert_eq!(copy.voxel_size(), Vec3::new(0.5, 0.5, 2.0));

    copy.unload();
    assert!(copy.image().is_none());
    assert_eq!(copy.image_size(), Extent3D::ZERO);
    assert_eq!(copy.transfer_function_control().channels().len(), 4);
}
