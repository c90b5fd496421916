// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Catalog records consumed by the generator.

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;
use std::collections::HashMap;

/// A device family from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    /// Unique model identifier, used as the section header.
    pub model: String,
    /// Home Assistant component (`sensor`, `light`, ...), used as the YAML top-level key.
    #[serde(rename = "type")]
    pub device_type: String,
}

impl DeviceDescriptor {
    pub fn new(model: impl Into<String>, device_type: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            device_type: device_type.into(),
        }
    }
}

/// One logical entity exposed by a device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryMappingEntry {
    #[serde(default)]
    pub discovery_payload: Mapping,
}

impl DiscoveryMappingEntry {
    pub fn new(discovery_payload: Mapping) -> Self {
        Self { discovery_payload }
    }
}

/// Lookup from device model to its discovery entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingTable(HashMap<String, Vec<DiscoveryMappingEntry>>);

impl MappingTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the entries of a model, replacing any previous list.
    pub fn insert(&mut self, model: impl Into<String>, entries: Vec<DiscoveryMappingEntry>) {
        self.0.insert(model.into(), entries);
    }

    /// Entries for `model`, in declaration order.
    #[must_use]
    pub fn get(&self, model: &str) -> Option<&[DiscoveryMappingEntry]> {
        self.0.get(model).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Vec<DiscoveryMappingEntry>)> for MappingTable {
    fn from_iter<I: IntoIterator<Item = (String, Vec<DiscoveryMappingEntry>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
