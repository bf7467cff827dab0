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

use super::Volume;
use plume_core::container::{Cursor, HashMap};

/// Owns volumes by name.
///
/// The manager is an ordinary value; create one where volumes are needed and
/// pass it by reference.
#[derive(Debug, Default)]
pub struct VolumeManager {
    volumes: HashMap<String, Volume>,
}

impl VolumeManager {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of managed volumes.
    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    /// Returns `true` if no volume is managed.
    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    /// Creates an empty volume. Fails if the name is taken.
    pub fn create(&mut self, name: &str) -> Option<&mut Volume> {
        self.insert(Volume::new(name))
    }

    /// Takes ownership of `volume` under its own name. Fails if the name is taken.
    pub fn insert(&mut self, volume: Volume) -> Option<&mut Volume> {
        let name = volume.name().to_owned();
        if !self.volumes.add(name.clone(), volume) {
            log::warn!("A volume named '{}' already exists", name);
            return None;
        }
        self.volumes.get_mut(name.as_str())
    }

    /// The volume named `name`.
    pub fn get(&self, name: &str) -> Option<&Volume> {
        self.volumes.get(name)
    }

    /// Mutable access to the volume named `name`.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Volume> {
        self.volumes.get_mut(name)
    }

    /// Removes and returns the volume named `name`.
    pub fn remove(&mut self, name: &str) -> Option<Volume> {
        self.volumes.remove(name)
    }

    /// Drops every volume.
    pub fn clear(&mut self) {
        self.volumes.clear();
    }

    /// A cursor over the names of all volumes.
    pub fn names(&self) -> Cursor<'_, String> {
        self.volumes.keys(0)
    }

    /// Returns the volume named `name`, creating and filling it with `load` if it does
    /// not exist yet.
    ///
    /// A failed load leaves the manager unchanged.
    pub fn load_with<E>(
        &mut self,
        name: &str,
        load: impl FnOnce(&mut Volume) -> Result<(), E>,
    ) -> Result<&mut Volume, E> {
        self.volumes.try_get_or_insert_with(name.to_owned(), || {
            let mut volume = Volume::new(name);
            load(&mut volume)?;
            Ok(volume)
        })
    }
}
