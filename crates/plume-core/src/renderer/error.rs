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

//! Defines the error type for texture resource management.

use crate::renderer::TextureBufferId;
use std::fmt;

/// An error related to the creation, access or destruction of a texture buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// No texture buffer is registered under the given ID.
    NotFound {
        /// The ID that was looked up.
        id: TextureBufferId,
    },
    /// The device cannot create the requested kind of texture.
    Unsupported(String),
    /// The supplied data does not match the descriptor.
    InvalidData(String),
    /// The requested mip level does not exist.
    OutOfBounds {
        /// The level that was requested.
        mip_level: u32,
        /// The number of levels of the texture buffer.
        mip_level_count: u32,
    },
    /// An error originating from the device implementation.
    BackendError(String),
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::NotFound { id } => {
                write!(f, "Texture buffer not found for ID: {id:?}")
            }
            ResourceError::Unsupported(what) => {
                write!(f, "Unsupported texture buffer request: {what}")
            }
            ResourceError::InvalidData(msg) => write!(f, "Invalid texture data: {msg}"),
            ResourceError::OutOfBounds {
                mip_level,
                mip_level_count,
            } => {
                write!(
                    f,
                    "Mip level {mip_level} out of bounds (texture has {mip_level_count} levels)"
                )
            }
            ResourceError::BackendError(msg) => {
                write!(f, "Backend-specific resource error: {msg}")
            }
        }
    }
}

impl std::error::Error for ResourceError {}
