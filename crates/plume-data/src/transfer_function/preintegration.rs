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

//! Pre-integrated classification tables.

use plume_core::math::Color4;
use plume_core::RgbaImage;

/// Builds a `bins × bins` pre-integration table from a `bins × 1` lookup table.
///
/// Texel `(back, front)` holds the colour and opacity accumulated along a ray
/// segment whose scalar runs linearly from `back` to `front`. Colours are
/// pre-multiplied by opacity. The integrals use running sums over the lookup
/// table, so a full table costs `O(bins²)`.
pub fn preintegrate(table: &RgbaImage) -> RgbaImage {
    let bins = table.width();
    let colors: Vec<Color4> = (0..bins)
        .map(|bin| {
            table
                .pixel(bin, 0)
                .map(Color4::from_rgba8)
                .unwrap_or(Color4::TRANSPARENT)
        })
        .collect();

    // Running trapezoid integrals of the pre-multiplied colour and of the opacity.
    let mut integrals = vec![[0.0f64; 4]; colors.len()];
    for i in 1..colors.len() {
        let (previous, current) = (colors[i - 1], colors[i]);
        let step = [
            (previous.r * previous.a + current.r * current.a) as f64 * 0.5,
            (previous.g * previous.a + current.g * current.a) as f64 * 0.5,
            (previous.b * previous.a + current.b * current.a) as f64 * 0.5,
            (previous.a + current.a) as f64 * 0.5,
        ];
        for (channel, value) in step.iter().enumerate() {
            integrals[i][channel] = integrals[i - 1][channel] + value;
        }
    }

    let mut result = RgbaImage::new(bins, bins);
    for back in 0..bins {
        for front in 0..bins {
            let (low, high) = (back.min(front) as usize, back.max(front) as usize);
            let texel = if low == high {
                let c = colors[low];
                Color4::new(
                    c.r * c.a,
                    c.g * c.a,
                    c.b * c.a,
                    1.0 - (-c.a).exp(),
                )
            } else {
                let factor = 1.0 / (high - low) as f64;
                let span =
                    |channel: usize| (integrals[high][channel] - integrals[low][channel]) * factor;
                Color4::new(
                    span(0) as f32,
                    span(1) as f32,
                    span(2) as f32,
                    (1.0 - (-span(3)).exp()) as f32,
                )
            };
            result.set_pixel(back, front, texel.to_rgba8());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant_table(rgba: [u8; 4]) -> RgbaImage {
        let mut table = RgbaImage::new(16, 1);
        for bin in 0..16 {
            table.set_pixel(bin, 0, rgba);
        }
        table
    }

    #[test]
    fn test_constant_table_is_uniform() {
        let table = preintegrate(&constant_table([255, 128, 0, 255]));
        assert_eq!(table.width(), 16);
        assert_eq!(table.height(), 16);
        let expected = Color4::new(1.0, 128.0 / 255.0, 0.0, 1.0 - (-1.0f32).exp()).to_rgba8();
        for back in 0..16 {
            for front in 0..16 {
                assert_eq!(table.pixel(back, front), Some(expected));
            }
        }
    }

    #[test]
    fn test_table_is_symmetric() {
        let mut lookup = RgbaImage::new(32, 1);
        for bin in 0..32u32 {
            let v = (bin * 8) as u8;
            lookup.set_pixel(bin, 0, [v, 255 - v, v / 2, v]);
        }
        let table = preintegrate(&lookup);
        for back in 0..32 {
            for front in 0..32 {
                assert_eq!(table.pixel(back, front), table.pixel(front, back));
            }
        }
    }

    #[test]
    fn test_transparent_table_stays_transparent() {
        let table = preintegrate(&constant_table([200, 10, 30, 0]));
        assert_eq!(table.pixel(3, 9), Some([0, 0, 0, 0]));
    }
}
