// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Discovery payload resolution.
//!
//! Turns a mapping entry's declarative `discovery_payload` into the MQTT
//! configuration a user pastes into Home Assistant:
//!
//! - fixed defaults (`platform`, `state_topic`, `availability_topic`) first
//! - entry keys overlaid on top, keeping key order stable
//! - `command_topic` rewritten to the device topic root, or dropped when falsy
//! - `command_topic_prefix` stripped

use crate::config::TopicConfig;
use crate::model::DiscoveryMappingEntry;
use serde_yaml::{Mapping, Value};

pub const COMMAND_TOPIC: &str = "command_topic";
pub const COMMAND_TOPIC_PREFIX: &str = "command_topic_prefix";

/// Resolves discovery entries against a topic layout.
#[derive(Debug, Clone, Default)]
pub struct PayloadMapper {
    topics: TopicConfig,
}

impl PayloadMapper {
    #[must_use]
    pub fn new(topics: TopicConfig) -> Self {
        Self { topics }
    }

    /// Fixed fields every resolved payload starts from.
    #[must_use]
    pub fn base_payload(&self) -> Mapping {
        let mut base = Mapping::new();
        base.insert("platform".into(), "mqtt".into());
        base.insert("state_topic".into(), self.topics.device_root().into());
        base.insert(
            "availability_topic".into(),
            self.topics.availability_topic().into(),
        );
        base
    }

    /// Resolve one entry into its final configuration mapping.
    #[must_use]
    pub fn resolve(&self, entry: &DiscoveryMappingEntry) -> Mapping {
        let mut payload = self.base_payload();

        // Overridden keys keep their base position, new keys append.
        for (key, value) in &entry.discovery_payload {
            payload.insert(key.clone(), value.clone());
        }

        if payload.get(COMMAND_TOPIC).is_some_and(is_truthy) {
            let root = self.topics.device_root();
            let topic = match payload
                .get(COMMAND_TOPIC_PREFIX)
                .filter(|v| is_truthy(v))
                .and_then(scalar_text)
            {
                Some(prefix) => format!("{root}/{prefix}/set"),
                None => format!("{root}/set"),
            };
            payload.insert(COMMAND_TOPIC.into(), topic.into());
        } else {
            // A falsy command topic means the entity is read-only.
            payload.shift_remove(COMMAND_TOPIC);
        }

        payload.shift_remove(COMMAND_TOPIC_PREFIX);
        payload
    }
}

/// Truthiness as the catalog authors wrote it: null, false, zero, NaN and
/// the empty string are false; everything else is true.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(_) | Value::Mapping(_) => true,
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}

/// Text of a scalar usable as a topic segment.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => {
            tracing::warn!("ignoring non-scalar {COMMAND_TOPIC_PREFIX}: {value:?}");
            None
        }
    }
}
