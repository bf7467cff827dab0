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

//! Per-volume rendering settings, loadable from RON.

use serde::{Deserialize, Serialize};

/// How rays are traversed through the volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RayTraversal {
    /// No traversal.
    Null,
    /// Debug output of the ray start inside the volume.
    DebugRayStart,
    /// Debug output of the ray end inside the volume.
    DebugRayEnd,
    /// Debug output of the ray direction.
    DebugRayDirection,
    /// Debug output of the travel length inside the volume.
    DebugRayLength,
    /// First-hit ray casting.
    Isosurface,
    /// Maximum intensity projection.
    Mip,
    /// Gradient maximum intensity projection.
    Gmip,
    /// Back-to-front compositing without early ray termination.
    DvrBackToFront,
    /// Front-to-back compositing with early ray termination.
    #[default]
    DvrFrontToBack,
    /// Maximum intensity differences accumulation.
    Mida,
}

/// How the continuous volume is reconstructed from voxels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Reconstruction {
    /// Nearest neighbour filtering.
    NearestNeighbour,
    /// Trilinear filtering.
    #[default]
    Trilinear,
    /// Tri-cubic B-spline filtering.
    TriCubic,
    /// Tri-cubic filtering through a kernel texture.
    TriCubicKernel,
}

/// What the shading step outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Shading {
    /// The classification result unchanged.
    Null,
    /// Debug output of the scalar.
    DebugScalar,
    /// Debug output of the position along the ray.
    DebugPosition,
    /// Debug output of the classification.
    DebugClassification,
    /// Debug output of the gradient.
    DebugGradient,
    /// Debug output of the normal.
    DebugNormal,
    /// Debug output of the viewing direction.
    DebugViewingDirection,
    /// Debug output of the light direction.
    DebugLightDirection,
    /// Gradient based lighting.
    #[default]
    Lighting,
}

/// How scalars are mapped to colour and opacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Classification {
    /// The scalar unchanged.
    Null,
    /// Zero below the threshold, the scalar above it.
    Threshold,
    /// Post-interpolative lookup table.
    #[default]
    TransferFunction,
    /// Post-interpolative lookup table with pre-multiplied colours.
    TransferFunctionPreMultiplied,
    /// Pre-integrated lookup table.
    PreIntegration,
}

/// How gradients are estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gradient {
    /// A constant up vector.
    Null,
    /// Forward differences.
    ForwardDifferences,
    /// Backward differences.
    BackwardDifferences,
    /// Central differences.
    #[default]
    CentralDifferences,
    /// Central differences of the neighbours, weighted.
    CentralDifferences9,
}

/// The illumination model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Illumination {
    /// No illumination.
    Null,
    /// Lambertian reflection.
    LambertianReflection,
    /// Blinn-Phong.
    #[default]
    BlinnPhong,
    /// Cook-Torrance.
    CookTorrance,
}

/// Rendering knobs of one volume.
///
/// Every field falls back to its default when missing from a settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeRenderSettings {
    /// Sample rate factor, `1.0` takes the Nyquist rate.
    pub sample_rate_factor: f32,
    /// Upper bound applied to `sample_rate_factor`.
    pub max_sample_rate_factor: f32,
    /// Level of detail of the volume texture, `0` is the base level.
    pub volume_texture_lod: f32,
    /// Global opacity.
    pub opacity: f32,
    /// Isosurface value in `[0, 1]`.
    pub isosurface_value: f32,
    /// Scalar threshold for [`Classification::Threshold`].
    pub scalar_classification_threshold: f32,
    /// Ray traversal technique.
    pub ray_traversal: RayTraversal,
    /// Reconstruction filter.
    pub reconstruction: Reconstruction,
    /// Shading technique.
    pub shading: Shading,
    /// Classification technique.
    pub classification: Classification,
    /// Gradient technique.
    pub gradient: Gradient,
    /// Compute gradients from classified opacity instead of the raw scalar.
    pub post_classification_gradient: bool,
    /// Illumination model.
    pub illumination: Illumination,
    /// Allow compressed volume textures.
    pub texture_compression: bool,
    /// Build mipmaps for volume textures.
    pub texture_mipmapping: bool,
}

impl Default for VolumeRenderSettings {
    fn default() -> Self {
        Self {
            sample_rate_factor: 1.0,
            max_sample_rate_factor: Self::MAX_SAMPLE_RATE_FACTOR,
            volume_texture_lod: 0.0,
            opacity: 1.0,
            isosurface_value: 0.2,
            scalar_classification_threshold: 0.06,
            ray_traversal: RayTraversal::default(),
            reconstruction: Reconstruction::default(),
            shading: Shading::default(),
            classification: Classification::default(),
            gradient: Gradient::default(),
            post_classification_gradient: false,
            illumination: Illumination::default(),
            texture_compression: true,
            texture_mipmapping: true,
        }
    }
}

impl VolumeRenderSettings {
    /// Largest sample rate factor a settings file may request.
    pub const MAX_SAMPLE_RATE_FACTOR: f32 = 10.0;

    /// Parses settings from RON. Out-of-range values are clamped.
    pub fn from_ron_str(source: &str) -> Result<Self, ron::error::SpannedError> {
        let mut settings: Self = ron::from_str(source)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Writes the settings as pretty RON.
    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        let pretty_config = ron::ser::PrettyConfig::default().indentor("  ".to_string());
        ron::ser::to_string_pretty(self, pretty_config)
    }

    fn sanitize(&mut self) {
        if self.max_sample_rate_factor.is_nan() || self.max_sample_rate_factor <= 0.0 {
            log::warn!(
                "Invalid max sample rate factor {}, using {}",
                self.max_sample_rate_factor,
                Self::MAX_SAMPLE_RATE_FACTOR
            );
            self.max_sample_rate_factor = Self::MAX_SAMPLE_RATE_FACTOR;
        }
        self.max_sample_rate_factor = self.max_sample_rate_factor.min(Self::MAX_SAMPLE_RATE_FACTOR);
        self.sample_rate_factor = self
            .sample_rate_factor
            .clamp(f32::MIN_POSITIVE, self.max_sample_rate_factor);
        self.volume_texture_lod = self.volume_texture_lod.max(0.0);
    }
}
