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

//! Natural cubic splines through evenly spaced samples.

/// One cubic segment, evaluated over the local parameter `s` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CubicSpline {
    /// Constant term.
    pub a: f32,
    /// Linear term.
    pub b: f32,
    /// Quadratic term.
    pub c: f32,
    /// Cubic term.
    pub d: f32,
}

impl CubicSpline {
    /// Creates a segment from its coefficients.
    pub const fn new(a: f32, b: f32, c: f32, d: f32) -> Self {
        Self { a, b, c, d }
    }

    /// Evaluates `a + b s + c s² + d s³`.
    #[inline]
    pub fn value_at(&self, s: f32) -> f32 {
        ((self.d * s + self.c) * s + self.b) * s + self.a
    }
}

/// Fits a natural cubic spline through `values` and returns one segment per pair
/// of neighbouring values.
///
/// The tridiagonal system for the derivatives is solved with the Thomas
/// algorithm. Fewer than two values yield no segments.
pub fn calculate_cubic_spline(values: &[f32]) -> Vec<CubicSpline> {
    if values.len() < 2 {
        return Vec::new();
    }
    let n = values.len() - 1;

    let mut gamma = vec![0.0f32; n + 1];
    gamma[0] = 0.5;
    for i in 1..n {
        gamma[i] = 1.0 / (4.0 - gamma[i - 1]);
    }
    gamma[n] = 1.0 / (2.0 - gamma[n - 1]);

    let mut delta = vec![0.0f32; n + 1];
    delta[0] = 3.0 * (values[1] - values[0]) * gamma[0];
    for i in 1..n {
        delta[i] = (3.0 * (values[i + 1] - values[i - 1]) - delta[i - 1]) * gamma[i];
    }
    delta[n] = (3.0 * (values[n] - values[n - 1]) - delta[n - 1]) * gamma[n];

    // Back substitution of the first derivatives.
    let mut derivatives = vec![0.0f32; n + 1];
    derivatives[n] = delta[n];
    for i in (0..n).rev() {
        derivatives[i] = delta[i] - gamma[i] * derivatives[i + 1];
    }

    (0..n)
        .map(|i| {
            let (v0, v1) = (values[i], values[i + 1]);
            let (d0, d1) = (derivatives[i], derivatives[i + 1]);
            CubicSpline::new(
                v0,
                d0,
                3.0 * (v1 - v0) - 2.0 * d0 - d1,
                2.0 * (v0 - v1) + d0 + d1,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_segments_hit_their_end_values() {
        let values = [0.0, 0.2, 0.06, 0.0, 0.9, 1.0];
        let splines = calculate_cubic_spline(&values);
        assert_eq!(splines.len(), values.len() - 1);
        for (i, spline) in splines.iter().enumerate() {
            assert_abs_diff_eq!(spline.value_at(0.0), values[i], epsilon = 1e-5);
            assert_abs_diff_eq!(spline.value_at(1.0), values[i + 1], epsilon = 1e-5);
        }
    }

    #[test]
    fn test_two_values_make_one_segment() {
        let splines = calculate_cubic_spline(&[0.25, 0.75]);
        assert_eq!(splines.len(), 1);
        assert_abs_diff_eq!(splines[0].value_at(0.0), 0.25, epsilon = 1e-6);
        assert_abs_diff_eq!(splines[0].value_at(1.0), 0.75, epsilon = 1e-6);
        assert_abs_diff_eq!(splines[0].value_at(0.5), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_constant_values_stay_flat() {
        for spline in calculate_cubic_spline(&[0.4; 5]) {
            for step in 0..=10 {
                assert_abs_diff_eq!(spline.value_at(step as f32 / 10.0), 0.4, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(calculate_cubic_spline(&[]).is_empty());
        assert!(calculate_cubic_spline(&[1.0]).is_empty());
    }
}
