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

//! A single named channel of an editable transfer function.

use super::control_point::TransferControlPoint;
use super::spline::{calculate_cubic_spline, CubicSpline};
use plume_core::math::Color3;

/// An ordered list of control points plus the cubic splines derived from them.
///
/// The splines are cached and rebuilt on the first read after any change to the
/// control points.
#[derive(Debug, Clone)]
pub struct TransferFunctionChannel {
    name: String,
    visualization_color: Color3,
    control_points: Vec<TransferControlPoint>,
    splines: Option<Vec<CubicSpline>>,
}

impl TransferFunctionChannel {
    /// Creates an empty channel.
    pub fn new(name: impl Into<String>, visualization_color: Color3) -> Self {
        Self {
            name: name.into(),
            visualization_color,
            control_points: Vec::new(),
            splines: None,
        }
    }

    /// Creates a channel from its control points.
    pub fn with_control_points(
        name: impl Into<String>,
        visualization_color: Color3,
        control_points: impl IntoIterator<Item = TransferControlPoint>,
    ) -> Self {
        let mut channel = Self::new(name, visualization_color);
        channel.control_points.extend(control_points);
        channel
    }

    /// The human readable channel name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the channel.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The colour used when the channel is drawn.
    pub fn visualization_color(&self) -> Color3 {
        self.visualization_color
    }

    /// Changes the colour used when the channel is drawn.
    pub fn set_visualization_color(&mut self, color: Color3) {
        self.visualization_color = color;
    }

    /// The control points, ordered by iso-value.
    pub fn control_points(&self) -> &[TransferControlPoint] {
        &self.control_points
    }

    /// Mutable access to the control points. Invalidates the cached splines.
    ///
    /// Points must stay sorted by iso-value; their spacing is up to the caller.
    pub fn control_points_mut(&mut self) -> &mut Vec<TransferControlPoint> {
        self.splines = None;
        &mut self.control_points
    }

    /// Returns the splines between neighbouring control points, rebuilding them if required.
    pub fn cubic_splines(&mut self) -> &[CubicSpline] {
        let points = &self.control_points;
        self.splines.get_or_insert_with(|| {
            let values: Vec<f32> = points.iter().map(|point| point.value).collect();
            calculate_cubic_spline(&values)
        })
    }

    /// Evaluates the channel at `bin`.
    ///
    /// Bins before the first or after the last control point take that point's
    /// value. Returns `None` for a channel without control points.
    pub fn sample(&mut self, bin: u32) -> Option<f32> {
        let first = *self.control_points.first()?;
        let last = *self.control_points.last()?;
        if bin <= first.iso_value {
            return Some(first.value);
        }
        if bin >= last.iso_value {
            return Some(last.value);
        }

        let segment = self
            .control_points
            .windows(2)
            .position(|pair| bin < pair[1].iso_value)?;
        let start = self.control_points[segment].iso_value;
        let end = self.control_points[segment + 1].iso_value;
        // Out-of-order points have no segment to interpolate.
        let span = end.checked_sub(start).filter(|span| *span > 0)?;
        let s = bin.saturating_sub(start) as f32 / span as f32;
        self.cubic_splines()
            .get(segment)
            .map(|spline| spline.value_at(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ramp() -> TransferFunctionChannel {
        TransferFunctionChannel::with_control_points(
            "Ramp",
            Color3::RED,
            [
                TransferControlPoint::new(0, 0.0),
                TransferControlPoint::new(100, 0.5),
                TransferControlPoint::new(255, 1.0),
            ],
        )
    }

    #[test]
    fn test_sample_hits_control_points() {
        let mut channel = ramp();
        assert_abs_diff_eq!(channel.sample(0).unwrap_or(-1.0), 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(channel.sample(100).unwrap_or(-1.0), 0.5, epsilon = 1e-5);
        assert_abs_diff_eq!(channel.sample(255).unwrap_or(-1.0), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_splines_rebuild_after_edit() {
        let mut channel = ramp();
        assert_eq!(channel.cubic_splines().len(), 2);
        channel
            .control_points_mut()
            .insert(1, TransferControlPoint::new(50, 0.9));
        assert_eq!(channel.cubic_splines().len(), 3);
        assert_abs_diff_eq!(channel.sample(50).unwrap_or(-1.0), 0.9, epsilon = 1e-5);
    }

    #[test]
    fn test_empty_channel_has_no_samples() {
        let mut channel = TransferFunctionChannel::new("Empty", Color3::BLUE);
        assert_eq!(channel.sample(10), None);
        assert!(channel.cubic_splines().is_empty());
    }
}
