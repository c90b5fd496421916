// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generator configuration.

use crate::assembler::EmptyBlockPolicy;
use crate::error::{DocgenError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// MQTT topic layout used when building discovery payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicConfig {
    /// Bridge base topic (default: zigbee2mqtt)
    #[serde(default = "default_base_topic")]
    pub base_topic: String,

    /// Literal left in the output where the reader puts the device name
    #[serde(default = "default_friendly_name_placeholder")]
    pub friendly_name_placeholder: String,

    /// Bridge availability topic, relative to `base_topic`
    #[serde(default = "default_availability_suffix")]
    pub availability_suffix: String,
}

fn default_base_topic() -> String {
    "zigbee2mqtt".to_string()
}

fn default_friendly_name_placeholder() -> String {
    "<FRIENDLY_NAME>".to_string()
}

fn default_availability_suffix() -> String {
    "bridge/state".to_string()
}

impl Default for TopicConfig {
    fn default() -> Self {
        Self {
            base_topic: default_base_topic(),
            friendly_name_placeholder: default_friendly_name_placeholder(),
            availability_suffix: default_availability_suffix(),
        }
    }
}

impl TopicConfig {
    /// Per-device topic root, e.g. `zigbee2mqtt/<FRIENDLY_NAME>`.
    #[must_use]
    pub fn device_root(&self) -> String {
        format!("{}/{}", self.base_topic, self.friendly_name_placeholder)
    }

    /// Bridge state topic, e.g. `zigbee2mqtt/bridge/state`.
    #[must_use]
    pub fn availability_topic(&self) -> String {
        format!("{}/{}", self.base_topic, self.availability_suffix)
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("topics.base_topic", &self.base_topic),
            (
                "topics.friendly_name_placeholder",
                &self.friendly_name_placeholder,
            ),
            ("topics.availability_suffix", &self.availability_suffix),
        ] {
            if value.is_empty() {
                return Err(DocgenError::Config(format!("{name} cannot be empty")));
            }
            if value.starts_with('/') || value.ends_with('/') {
                return Err(DocgenError::Config(format!(
                    "{name} must not start or end with '/' (got {value:?})"
                )));
            }
        }
        Ok(())
    }
}

/// Top-level generator configuration, loaded from YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocgenConfig {
    #[serde(default)]
    pub topics: TopicConfig,

    /// Template marker replaced by the generated configuration
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// What to emit for devices without discovery entries
    #[serde(default)]
    pub empty_blocks: EmptyBlockPolicy,
}

fn default_placeholder() -> String {
    crate::assembler::DEFAULT_PLACEHOLDER.to_string()
}

impl Default for DocgenConfig {
    fn default() -> Self {
        Self {
            topics: TopicConfig::default(),
            placeholder: default_placeholder(),
            empty_blocks: EmptyBlockPolicy::default(),
        }
    }
}

impl DocgenConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        crate::catalog::load_yaml(path)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if self.placeholder.is_empty() {
            return Err(DocgenError::Config("placeholder cannot be empty".into()));
        }
        self.topics.validate()
    }
}
