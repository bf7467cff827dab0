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

//! Box-filtered mip chains.

use plume_core::math::Extent3D;
use plume_core::renderer::TextureFormat;

/// Box-filters one level of `size` down to `next`.
///
/// Axes that shrink average pairs of texels; axes that keep their size (the
/// layers of a 2D array) are copied through.
pub(super) fn downsample(
    level: &[u8],
    size: Extent3D,
    next: Extent3D,
    format: TextureFormat,
) -> Vec<u8> {
    match format {
        TextureFormat::R8 => reduce(level, size, next, 1),
        TextureFormat::Rgba8 => reduce(level, size, next, 4),
        TextureFormat::R16 => {
            let texels: Vec<u16> = bytemuck::pod_collect_to_vec(level);
            let reduced = reduce(&texels, size, next, 1);
            bytemuck::cast_slice(&reduced).to_vec()
        }
    }
}

fn footprint(index: u32, from: u32, to: u32) -> [u32; 2] {
    if to < from {
        [2 * index, (2 * index + 1).min(from - 1)]
    } else {
        [index, index]
    }
}

fn reduce<T>(source: &[T], size: Extent3D, next: Extent3D, components: usize) -> Vec<T>
where
    T: Copy + Default + Into<u32> + TryFrom<u32>,
{
    let (width, height) = (size.width as usize, size.height as usize);
    let mut result = Vec::with_capacity(next.byte_size(components).unwrap_or(0));
    for z in 0..next.depth_or_array_layers {
        let zs = footprint(z, size.depth_or_array_layers, next.depth_or_array_layers);
        for y in 0..next.height {
            let ys = footprint(y, size.height, next.height);
            for x in 0..next.width {
                let xs = footprint(x, size.width, next.width);
                for component in 0..components {
                    let mut sum = 0u32;
                    let mut count = 0u32;
                    for &sz in &zs {
                        for &sy in &ys {
                            for &sx in &xs {
                                let texel =
                                    (sz as usize * height + sy as usize) * width + sx as usize;
                                let index = texel * components + component;
                                if let Some(&value) = source.get(index) {
                                    sum += value.into();
                                    count += 1;
                                }
                            }
                        }
                    }
                    let average = if count > 0 { (sum + count / 2) / count } else { 0 };
                    result.push(T::try_from(average).unwrap_or_default());
                }
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_halves_every_axis() {
        let level: Vec<u8> = (0..8).map(|v| v * 10).collect();
        let reduced = downsample(
            &level,
            Extent3D::new(2, 2, 2),
            Extent3D::new(1, 1, 1),
            TextureFormat::R8,
        );
        assert_eq!(reduced, vec![35]);
    }

    #[test]
    fn test_array_layers_are_kept() {
        let level = [0u8, 2, 4, 6, 100, 100, 100, 100];
        let reduced = downsample(
            &level,
            Extent3D::new(2, 2, 2),
            Extent3D::new(1, 1, 2),
            TextureFormat::R8,
        );
        assert_eq!(reduced, vec![3, 100]);
    }

    #[test]
    fn test_words_and_odd_sizes() {
        let texels = [1000u16, 2000, 3000];
        let bytes: Vec<u8> = bytemuck::cast_slice(&texels).to_vec();
        let reduced = downsample(
            &bytes,
            Extent3D::new(3, 1, 1),
            Extent3D::new(1, 1, 1),
            TextureFormat::R16,
        );
        assert_eq!(bytemuck::pod_collect_to_vec::<u8, u16>(&reduced), vec![1500]);
    }

    #[test]
    fn test_words_from_unaligned_bytes() {
        let texels = [100u16, 300];
        let mut buffer = vec![0u8];
        buffer.extend_from_slice(bytemuck::cast_slice(&texels));
        let reduced = downsample(
            &buffer[1..],
            Extent3D::new(2, 1, 1),
            Extent3D::new(1, 1, 1),
            TextureFormat::R16,
        );
        assert_eq!(bytemuck::pod_collect_to_vec::<u8, u16>(&reduced), vec![200]);
    }

    #[test]
    fn test_rgba_components_are_independent() {
        let level = [10u8, 0, 255, 255, 30, 0, 255, 0];
        let reduced = downsample(
            &level,
            Extent3D::new(2, 1, 1),
            Extent3D::new(1, 1, 1),
            TextureFormat::Rgba8,
        );
        assert_eq!(reduced, vec![20, 0, 255, 128]);
    }
}
