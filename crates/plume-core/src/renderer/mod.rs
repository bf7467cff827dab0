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

//! Backend-agnostic texture contracts used by the volume subsystem.
//!
//! This module defines the 'what' of GPU resource management: descriptors,
//! handles, capabilities and the [`TextureDevice`] trait. Concrete devices
//! live in `plume-infra`.

pub mod device;
pub mod error;
pub mod handle;
pub mod texture;

pub use self::device::{DeviceCapabilities, TextureDevice};
pub use self::error::ResourceError;
pub use self::handle::TextureBufferHandle;
pub use self::texture::{
    TextureBufferDescriptor, TextureBufferFlags, TextureBufferId, TextureBufferInfo, TextureFormat,
    TextureKind,
};
