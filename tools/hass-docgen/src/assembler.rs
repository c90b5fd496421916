// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Guide assembly.
//!
//! Every catalog device becomes one Markdown section:
//!
//! ````text
//! ### <model>
//! {% raw %}
//! ```yaml
//! <type>:
//!   - platform: "mqtt"
//!     ...
//! ```
//! {% endraw %}
//! ````
//!
//! Sections are rendered independently, joined in catalog order and
//! substituted into the template placeholder once.

use crate::config::DocgenConfig;
use crate::emit;
use crate::error::{DocgenError, Result};
use crate::model::{DeviceDescriptor, DiscoveryMappingEntry, MappingTable};
use crate::payload::PayloadMapper;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use tracing::{debug, info};

/// Marker replaced by the generated configuration.
pub const DEFAULT_PLACEHOLDER: &str = "[CONFIGURATION]";

const RAW_OPEN: &str = "{% raw %}\n";
const RAW_CLOSE: &str = "{% endraw %}\n";
const FENCE_OPEN: &str = "```yaml\n";
const FENCE_CLOSE: &str = "```\n";

const BUILTIN_TEMPLATE: &str = include_str!("../templates/homeassistant.md");

/// Output for a device that has no discovery entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyBlockPolicy {
    /// Header and opening fence only; the block is left open.
    #[default]
    OpenUndefined,
    /// Header and an empty, properly closed block.
    AlwaysClose,
    /// No section at all.
    SkipEntirely,
}

/// Document skeleton holding exactly one placeholder.
#[derive(Debug, Clone)]
pub struct Template {
    text: String,
    placeholder: String,
}

impl Template {
    pub fn new(text: impl Into<String>, placeholder: impl Into<String>) -> Result<Self> {
        let text = text.into();
        let placeholder = placeholder.into();

        let count = if placeholder.is_empty() {
            0
        } else {
            text.matches(placeholder.as_str()).count()
        };
        if count != 1 {
            return Err(DocgenError::Placeholder {
                marker: placeholder,
                count,
            });
        }

        Ok(Self { text, placeholder })
    }

    /// Bundled Home Assistant guide.
    pub fn builtin() -> Result<Self> {
        Self::new(BUILTIN_TEMPLATE, DEFAULT_PLACEHOLDER)
    }

    /// Substitute `body` for the placeholder.
    #[must_use]
    pub fn render(&self, body: &str) -> String {
        self.text.replacen(&self.placeholder, body, 1)
    }
}

/// Builds the guide from a catalog and its discovery mappings.
#[derive(Debug, Clone, Default)]
pub struct DocumentAssembler {
    mapper: PayloadMapper,
    empty_blocks: EmptyBlockPolicy,
}

impl DocumentAssembler {
    #[must_use]
    pub fn new(mapper: PayloadMapper) -> Self {
        Self {
            mapper,
            empty_blocks: EmptyBlockPolicy::default(),
        }
    }

    /// Assembler wired from a loaded configuration.
    #[must_use]
    pub fn from_config(config: &DocgenConfig) -> Self {
        Self::new(PayloadMapper::new(config.topics.clone())).with_empty_blocks(config.empty_blocks)
    }

    #[must_use]
    pub fn with_empty_blocks(mut self, policy: EmptyBlockPolicy) -> Self {
        self.empty_blocks = policy;
        self
    }

    /// Render the whole guide.
    pub fn assemble(
        &self,
        catalog: &[DeviceDescriptor],
        table: &MappingTable,
        template: &Template,
    ) -> Result<String> {
        let sections = catalog
            .iter()
            .map(|device| self.render_device(device, table.get(&device.model).unwrap_or(&[])))
            .collect::<Result<Vec<_>>>()?;

        let entries: usize = catalog
            .iter()
            .filter_map(|device| table.get(&device.model))
            .map(<[_]>::len)
            .sum();
        info!(
            "Assembled {} device sections ({} discovery entries)",
            catalog.len(),
            entries
        );

        Ok(template.render(&sections.concat()))
    }

    /// Render the section of a single device.
    pub fn render_device(
        &self,
        device: &DeviceDescriptor,
        entries: &[DiscoveryMappingEntry],
    ) -> Result<String> {
        debug!(
            model = %device.model,
            device_type = %device.device_type,
            entries = entries.len(),
            policy = ?self.empty_blocks,
            "rendering device"
        );

        if entries.is_empty() && self.empty_blocks == EmptyBlockPolicy::SkipEntirely {
            return Ok(String::new());
        }

        let mut section = format!("### {}\n", device.model);
        section.push_str(RAW_OPEN);
        section.push_str(FENCE_OPEN);

        if entries.is_empty() {
            if self.empty_blocks == EmptyBlockPolicy::AlwaysClose {
                Self::close_block(&mut section);
            }
            return Ok(section);
        }

        let blocks = entries
            .iter()
            .map(|entry| self.render_entry(&device.device_type, entry))
            .collect::<Result<Vec<_>>>()?;
        section.push_str(&blocks.join("\n"));

        Self::close_block(&mut section);
        Ok(section)
    }

    /// Serialize one resolved entry as `<type>: [payload]`.
    pub fn render_entry(&self, device_type: &str, entry: &DiscoveryMappingEntry) -> Result<String> {
        let resolved = self.mapper.resolve(entry);
        emit::keyed_sequence(device_type, &[Value::Mapping(resolved)])
    }

    fn close_block(section: &mut String) {
        section.push_str(FENCE_CLOSE);
        section.push_str(RAW_CLOSE);
        section.push('\n');
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn entry(yaml: &str) -> DiscoveryMappingEntry {
        DiscoveryMappingEntry::new(serde_yaml::from_str(yaml).expect("bad payload yaml"))
    }

    #[test]
    fn test_template_requires_single_placeholder() {
        assert!(Template::new("a [CONFIGURATION] b", DEFAULT_PLACEHOLDER).is_ok());

        let err = Template::new("no marker", DEFAULT_PLACEHOLDER).expect_err("should fail");
        assert!(matches!(err, DocgenError::Placeholder { count: 0, .. }));

        let err = Template::new("[CONFIGURATION][CONFIGURATION]", DEFAULT_PLACEHOLDER)
            .expect_err("should fail");
        assert!(matches!(err, DocgenError::Placeholder { count: 2, .. }));

        assert!(Template::new("anything", "").is_err());
    }

    #[test]
    fn test_builtin_template_is_valid() {
        let template = Template::builtin().expect("builtin template");
        let out = template.render("BODY");
        assert!(out.starts_with("# Home Assistant"));
        assert!(out.contains("## Configuration when NOT using Home Assistant MQTT discovery\n\nBODY"));
        assert!(!out.contains(DEFAULT_PLACEHOLDER));
    }

    #[test]
    fn test_render_entry_keys_document_by_type() {
        let yaml = DocumentAssembler::default()
            .render_entry("switch", &entry("command_topic: true\nname: Outlet"))
            .expect("render");

        assert_eq!(
            yaml,
            "switch:\n\
             \x20 - platform: \"mqtt\"\n\
             \x20   state_topic: \"zigbee2mqtt/<FRIENDLY_NAME>\"\n\
             \x20   availability_topic: \"zigbee2mqtt/bridge/state\"\n\
             \x20   command_topic: \"zigbee2mqtt/<FRIENDLY_NAME>/set\"\n\
             \x20   name: \"Outlet\"\n"
        );
    }

    #[test]
    fn test_switch_payloads_stay_strings() {
        let yaml = DocumentAssembler::default()
            .render_entry(
                "switch",
                &entry(
                    "payload_on: 'ON'\npayload_off: 'OFF'\ncommand_topic: true\n\
                     json_attributes: [linkquality, battery]",
                ),
            )
            .expect("render");

        assert!(yaml.contains("    payload_on: \"ON\"\n"));
        assert!(yaml.contains("    payload_off: \"OFF\"\n"));
        assert!(yaml.ends_with(
            "    json_attributes: \n      - \"linkquality\"\n      - \"battery\"\n"
        ));
    }

    #[test]
    fn test_single_entry_section() {
        let section = DocumentAssembler::default()
            .render_device(
                &DeviceDescriptor::new("X1", "sensor"),
                &[DiscoveryMappingEntry::default()],
            )
            .expect("render");

        assert_eq!(
            section,
            "### X1\n\
             {% raw %}\n\
             ```yaml\n\
             sensor:\n\
             \x20 - platform: \"mqtt\"\n\
             \x20   state_topic: \"zigbee2mqtt/<FRIENDLY_NAME>\"\n\
             \x20   availability_topic: \"zigbee2mqtt/bridge/state\"\n\
             ```\n\
             {% endraw %}\n\
             \n"
        );
    }

    #[test]
    fn test_entries_separated_by_one_blank_line() {
        let section = DocumentAssembler::default()
            .render_device(
                &DeviceDescriptor::new("WXKG02LM", "sensor"),
                &[entry("name: left"), entry("name: right")],
            )
            .expect("render");

        let left = section.find("name: \"left\"").expect("left entry");
        let right = section.find("name: \"right\"").expect("right entry");
        assert!(left < right);
        assert!(section.contains("name: \"left\"\n\nsensor:\n"));
        assert!(section.ends_with("name: \"right\"\n```\n{% endraw %}\n\n"));
        assert_eq!(section.matches("\n\n").count(), 2);
    }

    #[test]
    fn test_empty_block_policies() {
        let device = DeviceDescriptor::new("X2", "light");

        let open = DocumentAssembler::default()
            .render_device(&device, &[])
            .expect("render");
        assert_eq!(open, "### X2\n{% raw %}\n```yaml\n");

        let closed = DocumentAssembler::default()
            .with_empty_blocks(EmptyBlockPolicy::AlwaysClose)
            .render_device(&device, &[])
            .expect("render");
        assert_eq!(closed, "### X2\n{% raw %}\n```yaml\n```\n{% endraw %}\n\n");

        let skipped = DocumentAssembler::default()
            .with_empty_blocks(EmptyBlockPolicy::SkipEntirely)
            .render_device(&device, &[])
            .expect("render");
        assert!(skipped.is_empty());
    }

    #[test]
    fn test_policy_parses_kebab_case() {
        let policy: EmptyBlockPolicy = serde_yaml::from_str("skip-entirely").expect("parse");
        assert_eq!(policy, EmptyBlockPolicy::SkipEntirely);
    }
}
