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

//! # Plume Data
//!
//! The volume data model: [`Volume`] resources with lazily uploaded texture
//! buffers, transfer functions edited through control points and cubic splines,
//! histograms and per-volume render settings.

#![warn(missing_docs)]

pub mod histogram;
pub mod settings;
pub mod transfer_function;
pub mod volume;

pub use histogram::Histogram;
pub use settings::VolumeRenderSettings;
pub use transfer_function::{
    TransferControlPoint, TransferFunction, TransferFunctionChannel, TransferFunctionControl,
    TransferFunctionTexture,
};
pub use volume::{StepSize, Volume, VolumeManager};
