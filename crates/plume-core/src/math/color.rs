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

//! Defines the colour types used by transfer functions.

/// An RGB colour with `f32` components in `[0, 1]`.
///
/// Used as the visualisation colour of a transfer function channel.
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Color3 {
    /// The red component.
    pub r: f32,
    /// The green component.
    pub g: f32,
    /// The blue component.
    pub b: f32,
}

impl Color3 {
    /// Pure red.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    /// Pure green.
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    /// Pure blue.
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);
    /// Purple, used for opacity channels.
    pub const PURPLE: Self = Self::new(0.627, 0.125, 0.941);
    /// White.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    /// Black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a new colour.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// An RGBA colour with `f32` components.
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Color4 {
    /// The red component.
    pub r: f32,
    /// The green component.
    pub g: f32,
    /// The blue component.
    pub b: f32,
    /// The alpha (opacity) component.
    pub a: f32,
}

impl Color4 {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a new colour.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a colour from 8-bit RGBA components.
    #[inline]
    pub fn from_rgba8(rgba: [u8; 4]) -> Self {
        Self::new(
            rgba[0] as f32 / 255.0,
            rgba[1] as f32 / 255.0,
            rgba[2] as f32 / 255.0,
            rgba[3] as f32 / 255.0,
        )
    }

    /// Returns the component at `index` (`0 = r`, `1 = g`, `2 = b`, `3 = a`).
    #[inline]
    pub fn channel(&self, index: usize) -> Option<f32> {
        match index {
            0 => Some(self.r),
            1 => Some(self.g),
            2 => Some(self.b),
            3 => Some(self.a),
            _ => None,
        }
    }

    /// Returns a mutable reference to the component at `index`.
    #[inline]
    pub fn channel_mut(&mut self, index: usize) -> Option<&mut f32> {
        match index {
            0 => Some(&mut self.r),
            1 => Some(&mut self.g),
            2 => Some(&mut self.b),
            3 => Some(&mut self.a),
            _ => None,
        }
    }

    /// Returns a copy with every component clamped to `[0, 1]`.
    #[inline]
    pub fn saturate(&self) -> Self {
        Self::new(
            super::saturate(self.r),
            super::saturate(self.g),
            super::saturate(self.b),
            super::saturate(self.a),
        )
    }

    /// Converts the saturated colour to 8-bit RGBA components.
    #[inline]
    pub fn to_rgba8(&self) -> [u8; 4] {
        let c = self.saturate();
        let q = |v: f32| (v * 255.0).round() as u8;
        [q(c.r), q(c.g), q(c.b), q(c.a)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba8_conversion_saturates() {
        let c = Color4::new(1.5, -0.2, 0.5, 1.0);
        assert_eq!(c.to_rgba8(), [255, 0, 128, 255]);
    }

    #[test]
    fn test_channel_access() {
        let mut c = Color4::TRANSPARENT;
        *c.channel_mut(3).unwrap() = 0.25;
        assert_eq!(c.channel(3), Some(0.25));
        assert_eq!(c.channel(4), None);
    }
}
