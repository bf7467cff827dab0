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

// Loads a volume the way a renderer would and prints what it ends up with.
// Run with: cargo run -p plume-inspect -- <file>

use anyhow::{Context, Result};
use clap::Parser;
use plume_core::renderer::TextureDevice;
use plume_data::{TransferFunctionTexture, VolumeRenderSettings};
use plume_infra::{HostDeviceSettings, HostTextureDevice};
use plume_lanes::asset_lane::volume_lane::{load_volume, RawLoaderParameters, TableSaverLane};
use plume_lanes::AssetSaverLane;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "plume-inspect", version, about)]
struct Args {
    /// Volume to load (.volume, .dat or .raw).
    file: PathBuf,

    /// Render settings in RON.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Host device capabilities in RON.
    #[arg(long)]
    device: Option<PathBuf>,

    /// Layout of a .raw file, e.g. "Width=256 Height=256 Depth=128 DataType=UCHAR".
    #[arg(long)]
    raw: Option<String>,

    /// Write the transfer function lookup table to this .table file.
    #[arg(long)]
    export_table: Option<PathBuf>,

    /// Normalize the histogram logarithmically instead of linearly.
    #[arg(long)]
    log_histogram: bool,
}

fn read_settings(args: &Args) -> Result<(VolumeRenderSettings, HostDeviceSettings)> {
    let settings = match &args.settings {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read '{}'", path.display()))?;
            VolumeRenderSettings::from_ron_str(&text)
                .with_context(|| format!("Invalid render settings in '{}'", path.display()))?
        }
        None => VolumeRenderSettings::default(),
    };
    let device = match &args.device {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read '{}'", path.display()))?;
            ron::from_str(&text)
                .with_context(|| format!("Invalid device settings in '{}'", path.display()))?
        }
        None => HostDeviceSettings::default(),
    };
    Ok((settings, device))
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let (settings, device_settings) = read_settings(&args)?;
    let raw_parameters = args
        .raw
        .as_deref()
        .map(RawLoaderParameters::parse)
        .transpose()
        .context("Invalid raw loader parameters")?;

    let mut volume = load_volume(&args.file, raw_parameters.as_ref())?;
    let size = volume.image_size();
    let voxel_size = volume.voxel_size();
    println!("Volume:      {}", volume.name());
    println!(
        "Resolution:  {} x {} x {}",
        size.width, size.height, size.depth_or_array_layers
    );
    if let Some(image) = volume.image() {
        println!("Format:      {:?}", image.format());
    }
    println!(
        "Voxel size:  {} x {} x {}",
        voxel_size.x, voxel_size.y, voxel_size.z
    );

    let device: Arc<dyn TextureDevice> = Arc::new(HostTextureDevice::new(device_settings));
    match volume.volume_texture_buffer(
        &device,
        settings.texture_compression,
        settings.texture_mipmapping,
    ) {
        Some(handle) => {
            let info = handle.info()?;
            println!("Texture:     {:?}, {} mip level(s)", info.kind, info.mip_level_count);
        }
        None => log::warn!("The volume could not be uploaded"),
    }

    match volume.step_size(
        settings.volume_texture_lod,
        settings.sample_rate_factor,
        settings.max_sample_rate_factor,
    ) {
        Some(step) => {
            println!("Step size:   {}", step.step_size);
            println!("Opacity cor: {}", step.opacity_correction);
        }
        None => println!("Step size:   unavailable"),
    }

    if let Some(mut histogram) = volume.create_histogram() {
        if args.log_histogram {
            histogram.normalize_logarithmic();
        } else {
            histogram.normalize_linear();
        }
        println!("Histogram:   {} bins", histogram.bin_count());
        if let Some((low, high)) = histogram.sample_range() {
            println!("  samples    {} ..= {}", low, high);
        }
        if let Some(mode) = histogram.mode_bin() {
            println!("  mode bin   {}", mode);
        }
        println!(
            "  values     {} ..= {}",
            histogram.min_value(),
            histogram.max_value()
        );
    }

    let control = volume.transfer_function_control_mut();
    for texture in TransferFunctionTexture::ALL {
        if let Some(handle) = control.texture_buffer(&device, texture) {
            let info = handle.info()?;
            println!(
                "{:<12} {} x {}",
                format!("{:?}:", texture),
                info.size.width,
                info.size.height
            );
        }
    }

    if let Some(path) = &args.export_table {
        let table = control
            .image()
            .context("The transfer function has no lookup table")?;
        let bytes = TableSaverLane
            .save(table)
            .map_err(|e| anyhow::anyhow!(e))?;
        std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write '{}'", path.display()))?;
        log::info!("Lookup table written to '{}'", path.display());
    }

    Ok(())
}
