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

//! `.table` lookup tables: free-form header lines followed by 256 lines of
//! `R G B A` integers in `0..=255`.

use super::FormatError;
use crate::asset_lane::{AssetLoaderLane, AssetSaverLane};
use anyhow::{bail, Context};
use plume_core::RgbaImage;
use plume_data::transfer_function::NUMBER_OF_BINS;
use std::error::Error;
use std::fmt::Write;

const ENTRIES: usize = NUMBER_OF_BINS as usize;

fn integers(line: &str) -> Option<[i64; 4]> {
    let mut values = [0; 4];
    let mut tokens = line.split_whitespace();
    for value in values.iter_mut() {
        *value = tokens.next()?.parse().ok()?;
    }
    tokens.next().is_none().then_some(values)
}

fn parse_table(text: &str) -> anyhow::Result<RgbaImage> {
    let lines = text
        .lines()
        .enumerate()
        .map(|(number, line)| (number + 1, line.trim()))
        .skip_while(|(_, line)| integers(line).is_none())
        .filter(|(_, line)| !line.is_empty());

    let mut data = Vec::with_capacity(ENTRIES * 4);
    let mut entries = 0;
    for (number, line) in lines {
        if entries == ENTRIES {
            log::warn!("Ignoring lookup table entries from line {} on", number);
            break;
        }
        let values = integers(line)
            .with_context(|| format!("Line {}: expected four integers", number))?;
        for value in values {
            let channel = u8::try_from(value)
                .with_context(|| format!("Line {}: {} is outside 0..=255", number, value))?;
            data.push(channel);
        }
        entries += 1;
    }

    if entries < ENTRIES {
        bail!(FormatError::ShortTable(entries));
    }
    Ok(RgbaImage::from_raw(NUMBER_OF_BINS, 1, data)?)
}

/// Loads a `.table` file into a 256×1 RGBA image.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableLoaderLane;

impl AssetLoaderLane<RgbaImage> for TableLoaderLane {
    fn load(&self, bytes: &[u8]) -> Result<RgbaImage, Box<dyn Error + Send + Sync>> {
        let text = std::str::from_utf8(bytes)?;
        Ok(parse_table(text).inspect_err(|e| log::error!("Invalid lookup table: {:#}", e))?)
    }
}

/// Writes a 256×1 RGBA image as a `.table` file.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableSaverLane;

impl AssetSaverLane<RgbaImage> for TableSaverLane {
    fn save(&self, asset: &RgbaImage) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>> {
        if asset.width() != NUMBER_OF_BINS || asset.height() != 1 {
            return Err(Box::new(FormatError::ShortTable(
                asset.width() as usize * asset.height() as usize,
            )));
        }
        let mut text = String::from("# R G B A\n");
        for rgba in asset.as_bytes().chunks_exact(4) {
            writeln!(text, "{} {} {} {}", rgba[0], rgba[1], rgba[2], rgba[3])?;
        }
        Ok(text.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_text() -> String {
        let mut text = String::from("Lookup table\ncreated by hand\n\n");
        for i in 0..256 {
            text.push_str(&format!("{} {} {} {}\n", i, 255 - i, 7, i / 2));
        }
        text
    }

    #[test]
    fn test_load_skips_header() {
        let image = TableLoaderLane.load(ramp_text().as_bytes()).expect("valid table");
        assert_eq!(image.width(), 256);
        assert_eq!(image.height(), 1);
        assert_eq!(image.pixel(0, 0), Some([0, 255, 7, 0]));
        assert_eq!(image.pixel(200, 0), Some([200, 55, 7, 100]));
    }

    #[test]
    fn test_short_table() {
        let text: String = (0..10).map(|i| format!("{i} {i} {i} {i}\n")).collect();
        let error = TableLoaderLane.load(text.as_bytes()).expect_err("too short");
        assert_eq!(error.to_string(), FormatError::ShortTable(10).to_string());
    }

    #[test]
    fn test_out_of_range_value() {
        let text = ramp_text().replace("7 0\n", "300 0\n");
        assert!(TableLoaderLane.load(text.as_bytes()).is_err());
    }

    #[test]
    fn test_save_then_load() {
        let image = TableLoaderLane.load(ramp_text().as_bytes()).expect("valid table");
        let bytes = TableSaverLane.save(&image).expect("save");
        assert_eq!(TableLoaderLane.load(&bytes).ok(), Some(image));

        assert!(TableSaverLane.save(&RgbaImage::new(16, 1)).is_err());
    }
}
