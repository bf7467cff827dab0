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

//! Access to files referenced from inside other files.

use std::error::Error;
use std::path::{Path, PathBuf};

/// Resolves names found inside a file (such as the raw data file named by a
/// `.dat` header) to their content.
pub trait ResourceResolver: Send + Sync {
    /// Reads the resource named `uri`.
    fn resolve(&self, uri: &str) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>>;

    /// Writes `data` as the resource named `uri`.
    fn store(&self, uri: &str, data: &[u8]) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// Resolves resources from the local filesystem relative to a base directory.
#[derive(Debug, Clone)]
pub struct FileSystemResolver {
    base_path: PathBuf,
}

impl FileSystemResolver {
    /// Creates a resolver rooted at `base_path`.
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Creates a resolver rooted at the directory containing `file`.
    pub fn for_file(file: impl AsRef<Path>) -> Self {
        Self::new(file.as_ref().parent().unwrap_or_else(|| Path::new("")))
    }

    /// The directory names are resolved against.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl ResourceResolver for FileSystemResolver {
    fn resolve(&self, uri: &str) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>> {
        let path = self.base_path.join(uri);
        std::fs::read(&path)
            .map_err(|e| format!("Failed to read resource '{:?}': {}", path, e).into())
    }

    fn store(&self, uri: &str, data: &[u8]) -> Result<(), Box<dyn Error + Send + Sync>> {
        let path = self.base_path.join(uri);
        std::fs::write(&path, data)
            .map_err(|e| format!("Failed to write resource '{:?}': {}", path, e).into())
    }
}
