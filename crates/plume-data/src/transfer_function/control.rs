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

//! The editable, channel based transfer function.

use super::channel::TransferFunctionChannel;
use super::control_point::TransferControlPoint;
use super::{TransferFunction, TransferFunctionTexture, NUMBER_OF_BINS};
use plume_core::math::{Color3, Color4, Vec2};
use plume_core::renderer::{TextureBufferHandle, TextureDevice};
use plume_core::RgbaImage;
use std::sync::Arc;

/// Minimum distance between the iso-values of two neighbouring control points.
pub const MIN_ISO_VALUE_DISTANCE: u32 = 2;

/// Radius in pixels of a drawn control point.
pub const CIRCLE_RADIUS_DRAW: f32 = 4.0;

/// Radius in pixels within which a control point can be picked.
pub const CIRCLE_RADIUS_SELECTION: f32 = CIRCLE_RADIUS_DRAW * 3.0;

/// A transfer function assembled from editable channels.
///
/// Channel `i` feeds component `i` of the RGBA lookup table; channels beyond the
/// fourth are kept but do not contribute. The lookup table is rebuilt lazily on
/// the first read after any change.
#[derive(Debug)]
pub struct TransferFunctionControl {
    base: TransferFunction,
    channels: Vec<TransferFunctionChannel>,
    image_dirty: bool,
}

impl Default for TransferFunctionControl {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferFunctionControl {
    /// Creates a control without channels.
    pub fn new() -> Self {
        Self {
            base: TransferFunction::new(),
            channels: Vec::new(),
            image_dirty: true,
        }
    }

    /// Creates a control holding the default red, green, blue and alpha channels.
    pub fn with_default_configuration() -> Self {
        let mut control = Self::new();
        control.set_default_configuration();
        control
    }

    /// Number of bins of the lookup table.
    pub fn number_of_bins(&self) -> u32 {
        NUMBER_OF_BINS
    }

    /// The channels in lookup table order.
    pub fn channels(&self) -> &[TransferFunctionChannel] {
        &self.channels
    }

    /// Returns the channel at `index`.
    pub fn channel(&self, index: usize) -> Option<&TransferFunctionChannel> {
        self.channels.get(index)
    }

    /// Mutable access to a channel. The lookup table is considered dirty afterwards.
    pub fn channel_mut(&mut self, index: usize) -> Option<&mut TransferFunctionChannel> {
        let channel = self.channels.get_mut(index)?;
        self.image_dirty = true;
        Some(channel)
    }

    /// Appends an empty channel and returns it for configuration.
    pub fn add_channel(
        &mut self,
        name: impl Into<String>,
        visualization_color: Color3,
    ) -> &mut TransferFunctionChannel {
        self.image_dirty = true;
        self.channels
            .push(TransferFunctionChannel::new(name, visualization_color));
        let last = self.channels.len() - 1;
        &mut self.channels[last]
    }

    /// Removes every channel.
    pub fn remove_all_channels(&mut self) {
        self.channels.clear();
        self.image_dirty = true;
    }

    /// Replaces the channels with the default configuration.
    pub fn set_default_configuration(&mut self) {
        self.remove_all_channels();
        let last = NUMBER_OF_BINS - 1;
        let p = TransferControlPoint::new;

        self.add_channel("Red Channel", Color3::RED)
            .control_points_mut()
            .extend([p(0, 0.9), p(79, 0.9), p(83, 1.0), p(last, 1.0)]);
        self.add_channel("Green Channel", Color3::GREEN)
            .control_points_mut()
            .extend([p(0, 0.7), p(79, 0.7), p(83, 1.0), p(last, 1.0)]);
        self.add_channel("Blue Channel", Color3::BLUE)
            .control_points_mut()
            .extend([p(0, 0.6), p(79, 0.6), p(83, 0.88), p(last, 0.88)]);
        self.add_channel("Alpha/Opacity Channel", Color3::PURPLE)
            .control_points_mut()
            .extend([
                p(0, 0.0),
                p(42, 0.0),
                p(59, 0.2),
                p(64, 0.06),
                p(80, 0.0),
                p(83, 0.9),
                p(last, 1.0),
            ]);
    }

    /// Moves one control point by `delta` (`x` along the iso-value axis, `y` along the value axis).
    ///
    /// The first and last points keep their iso-value. Inner points stay at least
    /// [`MIN_ISO_VALUE_DISTANCE`] away from their neighbours and the value is
    /// clamped into `[0, 1]`. A point whose neighbours are already closer than
    /// twice that distance keeps its iso-value. Returns `true` if the point changed.
    pub fn move_control_point(
        &mut self,
        channel: usize,
        control_point: usize,
        delta: Vec2,
    ) -> bool {
        let max_iso_value = i64::from(NUMBER_OF_BINS - 1);
        let Some(channel) = self.channels.get_mut(channel) else {
            return false;
        };
        let points = channel.control_points();
        let count = points.len();
        let Some(point) = points.get(control_point).copied() else {
            return false;
        };

        let mut moved = point;
        if control_point > 0 && control_point < count - 1 {
            let previous = i64::from(points[control_point - 1].iso_value);
            let next = i64::from(points[control_point + 1].iso_value);
            let distance = i64::from(MIN_ISO_VALUE_DISTANCE);

            let lowest = (previous + distance).max(0);
            let highest = (next - distance).min(max_iso_value);
            if lowest <= highest {
                let iso_value = i64::from(point.iso_value) + delta.x as i64;
                moved.iso_value = iso_value.clamp(lowest, highest) as u32;
            }
        }
        moved.value = (point.value + delta.y).clamp(0.0, 1.0);

        if moved == point {
            return false;
        }
        channel.control_points_mut()[control_point] = moved;
        self.image_dirty = true;
        true
    }

    /// Finds the control point of `channel` closest to the pixel `(x, y)` of a plot
    /// that is `height` pixels tall, bins along x and values along y.
    ///
    /// Only points within [`CIRCLE_RADIUS_SELECTION`] are considered. Returns the
    /// point index and its distance.
    pub fn control_point_on_image(
        &self,
        channel: usize,
        height: u32,
        x: i32,
        y: i32,
    ) -> Option<(usize, f32)> {
        let coordinate = Vec2::new(x as f32, y as f32);
        self.channels
            .get(channel)?
            .control_points()
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let point_y = ((1.0 - point.value) * height as f32) as i32;
                let position = Vec2::new(point.iso_value as f32, point_y as f32);
                (index, (position - coordinate).length())
            })
            .filter(|(_, distance)| *distance <= CIRCLE_RADIUS_SELECTION)
            .fold(None, |closest: Option<(usize, f32)>, candidate| match closest {
                Some(best) if best.1 <= candidate.1 => Some(best),
                _ => Some(candidate),
            })
    }

    /// Returns `true` if the lookup table must be rebuilt before it is read.
    pub fn is_image_dirty(&self) -> bool {
        self.image_dirty
    }

    /// Returns the lookup table, resampling every channel first if required.
    ///
    /// Without channels the table assigned through [`Self::transfer_function_mut`] is returned.
    pub fn image(&mut self) -> Option<&RgbaImage> {
        if self.image_dirty {
            if !self.channels.is_empty() {
                let table = self.resample();
                self.base.replace_table(table);
            }
            self.image_dirty = false;
        }
        self.base.table()
    }

    fn resample(&mut self) -> RgbaImage {
        let mut colors = vec![Color4::TRANSPARENT; NUMBER_OF_BINS as usize];
        for (index, channel) in self.channels.iter_mut().enumerate().take(4) {
            if channel.control_points().is_empty() {
                continue;
            }
            for (bin, color) in colors.iter_mut().enumerate() {
                let value = channel.sample(bin as u32).unwrap_or(0.0);
                if let Some(component) = color.channel_mut(index) {
                    *component = value;
                }
            }
        }
        if self.channels.len() > 4 {
            log::debug!(
                "Transfer function has {} channels, only the first four are used",
                self.channels.len()
            );
        }

        let mut image = RgbaImage::new(NUMBER_OF_BINS, 1);
        for (bin, color) in colors.iter().enumerate() {
            image.set_pixel(bin as u32, 0, color.to_rgba8());
        }
        image
    }

    /// The underlying lookup table owner.
    pub fn transfer_function(&self) -> &TransferFunction {
        &self.base
    }

    /// Mutable access to the underlying lookup table owner.
    pub fn transfer_function_mut(&mut self) -> &mut TransferFunction {
        &mut self.base
    }

    /// Returns a texture buffer of the lookup table, refreshing the table first if required.
    pub fn texture_buffer(
        &mut self,
        device: &Arc<dyn TextureDevice>,
        texture: TransferFunctionTexture,
    ) -> Option<&TextureBufferHandle> {
        self.image();
        self.base.texture_buffer(device, texture)
    }

    /// Drops the lookup table and its texture buffers. Channels are kept.
    pub fn unload(&mut self) {
        self.base.unload();
        self.image_dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iso_values(control: &TransferFunctionControl, channel: usize) -> Vec<u32> {
        control
            .channel(channel)
            .map(|c| c.control_points().iter().map(|p| p.iso_value).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_default_configuration() {
        let control = TransferFunctionControl::with_default_configuration();
        assert_eq!(control.channels().len(), 4);
        assert_eq!(control.channels()[3].name(), "Alpha/Opacity Channel");
        assert_eq!(iso_values(&control, 3), vec![0, 42, 59, 64, 80, 83, 255]);
    }

    #[test]
    fn test_image_matches_control_points() {
        let mut control = TransferFunctionControl::with_default_configuration();
        let image = control.image().cloned();
        let image = image.expect("default channels produce a table");
        assert_eq!(image.width(), 256);
        assert_eq!(image.pixel(0, 0), Some(Color4::new(0.9, 0.7, 0.6, 0.0).to_rgba8()));
        assert_eq!(image.pixel(83, 0), Some(Color4::new(1.0, 1.0, 0.88, 0.9).to_rgba8()));
        assert_eq!(image.pixel(255, 0), Some(Color4::new(1.0, 1.0, 0.88, 1.0).to_rgba8()));
        assert!(!control.is_image_dirty());
    }

    #[test]
    fn test_crowded_point_keeps_its_iso_value() {
        let mut control = TransferFunctionControl::new();
        // Neighbours placed by hand, closer than the editing guard allows.
        control
            .add_channel("Alpha", Color3::new(1.0, 1.0, 1.0))
            .control_points_mut()
            .extend([
                TransferControlPoint::new(0, 0.0),
                TransferControlPoint::new(10, 0.2),
                TransferControlPoint::new(12, 0.4),
                TransferControlPoint::new(13, 0.6),
                TransferControlPoint::new(255, 1.0),
            ]);

        assert!(control.move_control_point(0, 2, Vec2::new(-5.0, 0.1)));
        let point = control.channels()[0].control_points()[2];
        assert_eq!(point.iso_value, 12);
        assert!((point.value - 0.5).abs() < 1e-6);

        assert!(!control.move_control_point(0, 2, Vec2::new(30.0, 0.0)));
        assert_eq!(control.channels()[0].control_points()[2].iso_value, 12);
    }

    #[test]
    fn test_move_keeps_end_points_and_spacing() {
        let mut control = TransferFunctionControl::with_default_configuration();

        // End points only change their value.
        assert!(control.move_control_point(3, 0, Vec2::new(50.0, 0.5)));
        assert!(control.move_control_point(3, 6, Vec2::new(-50.0, -0.25)));
        assert_eq!(iso_values(&control, 3)[0], 0);
        assert_eq!(iso_values(&control, 3)[6], 255);

        // Large moves stop at the neighbours.
        control.move_control_point(3, 2, Vec2::new(1000.0, 0.0));
        control.move_control_point(3, 4, Vec2::new(-1000.0, 0.0));
        control.move_control_point(3, 5, Vec2::new(-1000.0, 0.0));
        let isos = iso_values(&control, 3);
        for pair in isos.windows(2) {
            assert!(pair[1] >= pair[0] + MIN_ISO_VALUE_DISTANCE, "{isos:?}");
        }
        assert_eq!(isos[2], 62);
    }

    #[test]
    fn test_move_clamps_value_and_marks_dirty() {
        let mut control = TransferFunctionControl::with_default_configuration();
        control.image();
        assert!(control.move_control_point(0, 1, Vec2::new(0.0, 5.0)));
        assert_eq!(control.channels()[0].control_points()[1].value, 1.0);
        assert!(control.is_image_dirty());

        // Already at the limit.
        assert!(!control.move_control_point(0, 1, Vec2::new(0.0, 5.0)));
        assert!(!control.move_control_point(9, 0, Vec2::new(1.0, 0.0)));
        assert!(!control.move_control_point(0, 9, Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn test_control_point_picking() {
        let control = TransferFunctionControl::with_default_configuration();
        // Point 1 of the alpha channel sits at (42, 100) in a plot 100 pixels tall.
        assert_eq!(control.control_point_on_image(3, 100, 44, 98).map(|hit| hit.0), Some(1));
        assert_eq!(control.control_point_on_image(3, 100, 150, 0), None);
        assert_eq!(control.control_point_on_image(7, 100, 42, 100), None);
    }

    #[test]
    fn test_without_channels_the_assigned_table_is_kept() {
        let mut control = TransferFunctionControl::new();
        assert!(control.image().is_none());
        let mut table = RgbaImage::new(NUMBER_OF_BINS, 1);
        table.set_pixel(3, 0, [1, 2, 3, 4]);
        assert!(control.transfer_function_mut().set_table(table).is_ok());
        assert_eq!(control.image().and_then(|image| image.pixel(3, 0)), Some([1, 2, 3, 4]));
    }
}
