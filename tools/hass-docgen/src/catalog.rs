// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! YAML loaders for the device catalog and the discovery mapping table.

use crate::error::{DocgenError, Result};
use crate::model::{DeviceDescriptor, MappingTable};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Load the device catalog: a YAML sequence of `{model, type}` records.
pub fn load_catalog(path: &Path) -> Result<Vec<DeviceDescriptor>> {
    let devices: Vec<DeviceDescriptor> = load_yaml(path)?;
    tracing::info!("Loaded {} devices from {:?}", devices.len(), path);
    Ok(devices)
}

/// Load the mapping table: a YAML mapping `model -> [{discovery_payload}]`.
pub fn load_mapping_table(path: &Path) -> Result<MappingTable> {
    let table: MappingTable = load_yaml(path)?;
    tracing::info!("Loaded discovery mappings for {} models from {:?}", table.len(), path);
    Ok(table)
}

/// Read `path` and deserialize it as YAML.
pub(crate) fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|source| DocgenError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_yaml::from_str(&content).map_err(|source| DocgenError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(content.as_bytes()).expect("write");
        file
    }

    #[test]
    fn test_load_catalog_keeps_order() {
        let file = write_temp(
            "- model: WXKG01LM\n  type: sensor\n  vendor: Xiaomi\n- model: LED1545G12\n  type: light\n",
        );

        let devices = load_catalog(file.path()).expect("load failed");
        assert_eq!(
            devices,
            vec![
                DeviceDescriptor::new("WXKG01LM", "sensor"),
                DeviceDescriptor::new("LED1545G12", "light"),
            ]
        );
    }

    #[test]
    fn test_load_mapping_table() {
        let file = write_temp(
            r"
QBKG04LM:
  - discovery_payload:
      command_topic: true
      command_topic_prefix: left
  - discovery_payload:
      command_topic: true
      command_topic_prefix: right
WSDCGQ11LM: []
",
        );

        let table = load_mapping_table(file.path()).expect("load failed");
        let entries = table.get("QBKG04LM").expect("QBKG04LM entries");
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[1].discovery_payload.get("command_topic_prefix"),
            Some(&serde_yaml::Value::from("right"))
        );
        assert_eq!(table.get("WSDCGQ11LM").map(<[_]>::len), Some(0));
    }

    #[test]
    fn test_catalog_missing_type_is_parse_error() {
        let file = write_temp("- model: X1\n");
        let err = load_catalog(file.path()).expect_err("should fail");
        assert!(matches!(err, DocgenError::Parse { .. }));
    }
}
