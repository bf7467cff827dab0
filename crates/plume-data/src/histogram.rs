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

//! Histograms of voxel sample values.

use plume_core::VolumeImage;
use std::cell::OnceCell;

/// Derived values of the bins, computed on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Statistics {
    min_value: f32,
    max_value: f32,
    mode_bin: usize,
}

/// A histogram with one bin per possible sample value.
///
/// 8-bit samples produce 256 bins and 16-bit samples 65536 bins. The minimum and
/// maximum bin value and the mode are cached and recomputed after any change to
/// the bins.
#[derive(Debug, Clone, Default)]
pub struct Histogram {
    bins: Vec<f32>,
    sample_range: Option<(u16, u16)>,
    statistics: OnceCell<Statistics>,
}

impl Histogram {
    /// Builds a histogram from `count` raw samples of `bytes_per_element` bytes each.
    ///
    /// 16-bit samples are read in native byte order, matching device downloads.
    /// Unsupported sample depths and short buffers produce an empty histogram and
    /// an error log.
    pub fn new(bytes_per_element: usize, count: usize, data: &[u8]) -> Self {
        let needed = count.saturating_mul(bytes_per_element);
        if data.len() < needed {
            log::error!(
                "Histogram needs {} bytes for {} samples but only {} were given",
                needed,
                count,
                data.len()
            );
            return Self::default();
        }
        match bytes_per_element {
            1 => Self::from_samples(256, data[..count].iter().map(|&v| u16::from(v))),
            2 => Self::from_samples(
                65536,
                data[..needed]
                    .chunks_exact(2)
                    .map(|pair| u16::from_ne_bytes([pair[0], pair[1]])),
            ),
            other => {
                log::error!("Unsupported histogram sample size of {} bytes", other);
                Self::default()
            }
        }
    }

    /// Builds a histogram of every voxel of `image`.
    pub fn from_image(image: &VolumeImage) -> Self {
        let bins = image.format().max_value() as usize + 1;
        Self::from_samples(bins, image.samples())
    }

    fn from_samples(bin_count: usize, samples: impl Iterator<Item = u16>) -> Self {
        let mut bins = vec![0.0f32; bin_count];
        let mut range: Option<(u16, u16)> = None;
        for sample in samples {
            if let Some(bin) = bins.get_mut(sample as usize) {
                *bin += 1.0;
            }
            range = Some(match range {
                Some((min, max)) => (min.min(sample), max.max(sample)),
                None => (sample, sample),
            });
        }
        Self {
            bins,
            sample_range: range,
            statistics: OnceCell::new(),
        }
    }

    /// Number of bins, `0` for an empty histogram.
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    /// The bin values.
    pub fn bin_values(&self) -> &[f32] {
        &self.bins
    }

    /// The value of one bin.
    pub fn bin_value(&self, bin: usize) -> Option<f32> {
        self.bins.get(bin).copied()
    }

    /// Overwrites one bin. Returns `false` if `bin` is out of range.
    pub fn set_bin_value(&mut self, bin: usize, value: f32) -> bool {
        match self.bins.get_mut(bin) {
            Some(slot) => {
                *slot = value;
                self.statistics.take();
                true
            }
            None => false,
        }
    }

    /// The smallest and largest sample seen while building the histogram.
    pub fn sample_range(&self) -> Option<(u16, u16)> {
        self.sample_range
    }

    /// Smallest bin value.
    pub fn min_value(&self) -> f32 {
        self.statistics().map_or(0.0, |s| s.min_value)
    }

    /// Largest bin value.
    pub fn max_value(&self) -> f32 {
        self.statistics().map_or(0.0, |s| s.max_value)
    }

    /// Index of the first bin holding the largest value.
    pub fn mode_bin(&self) -> Option<usize> {
        self.statistics().map(|s| s.mode_bin)
    }

    fn statistics(&self) -> Option<&Statistics> {
        if self.bins.is_empty() {
            return None;
        }
        Some(self.statistics.get_or_init(|| {
            let mut stats = Statistics {
                min_value: f32::MAX,
                max_value: f32::MIN,
                mode_bin: 0,
            };
            for (bin, &value) in self.bins.iter().enumerate() {
                stats.min_value = stats.min_value.min(value);
                if value > stats.max_value {
                    stats.max_value = value;
                    stats.mode_bin = bin;
                }
            }
            stats
        }))
    }

    /// Rescales the bins linearly so the smallest becomes `0` and the largest `1`.
    ///
    /// A histogram whose bins are all equal becomes all zeros.
    pub fn normalize_linear(&mut self) {
        let (min, max) = (self.min_value(), self.max_value());
        let range = max - min;
        for value in &mut self.bins {
            *value = if range > 0.0 { (*value - min) / range } else { 0.0 };
        }
        self.statistics.take();
    }

    /// Takes the logarithm of every bin (values below one count as one) and then
    /// normalizes linearly.
    pub fn normalize_logarithmic(&mut self) {
        for value in &mut self.bins {
            *value = value.max(1.0).ln();
        }
        self.statistics.take();
        self.normalize_linear();
    }
}
