// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Home Assistant integration guide generator.
//!
//! Renders the "Configuration when NOT using Home Assistant MQTT discovery"
//! part of the guide from the device catalog and its MQTT discovery
//! mappings.
//!
//! # Example
//!
//! ```rust
//! use hass_docgen::{DeviceDescriptor, DocumentAssembler, MappingTable, Template};
//!
//! let catalog = vec![DeviceDescriptor::new("X2", "light")];
//! let template = Template::new("# Devices\n\n[CONFIGURATION]", "[CONFIGURATION]").unwrap();
//!
//! let doc = DocumentAssembler::default()
//!     .assemble(&catalog, &MappingTable::new(), &template)
//!     .unwrap();
//! assert!(doc.contains("### X2\n"));
//! ```

pub mod assembler;
pub mod catalog;
pub mod config;
pub mod emit;
pub mod error;
pub mod model;
pub mod payload;

pub use assembler::{DocumentAssembler, EmptyBlockPolicy, Template, DEFAULT_PLACEHOLDER};
pub use config::{DocgenConfig, TopicConfig};
pub use error::{DocgenError, Result};
pub use model::{DeviceDescriptor, DiscoveryMappingEntry, MappingTable};
pub use payload::PayloadMapper;
