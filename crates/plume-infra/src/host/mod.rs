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

//! A texture device backed by host memory.

mod device;
mod mipmap;

pub use self::device::HostTextureDevice;

use plume_core::renderer::DeviceCapabilities;
use serde::{Deserialize, Serialize};

/// Capabilities a [`HostTextureDevice`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostDeviceSettings {
    /// Accept 3D textures.
    pub texture_3d: bool,
    /// Accept 2D array textures.
    pub texture_2d_array: bool,
    /// Reported texture memory in KiB, `0` for unknown.
    pub total_memory_kib: u64,
}

impl Default for HostDeviceSettings {
    fn default() -> Self {
        Self {
            texture_3d: true,
            texture_2d_array: true,
            total_memory_kib: 0,
        }
    }
}

impl From<HostDeviceSettings> for DeviceCapabilities {
    fn from(settings: HostDeviceSettings) -> Self {
        DeviceCapabilities {
            texture_3d: settings.texture_3d,
            texture_2d_array: settings.texture_2d_array,
            total_memory_kib: settings.total_memory_kib,
        }
    }
}
