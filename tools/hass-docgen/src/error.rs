// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for guide generation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading inputs or assembling the guide.
#[derive(Debug, Error)]
pub enum DocgenError {
    /// A resolved payload could not be written as a snippet.
    #[error("snippet serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The template does not hold exactly one placeholder marker.
    #[error("template must contain placeholder '{marker}' exactly once (found {count})")]
    Placeholder { marker: String, count: usize },

    /// Reading an input file failed.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input file is not valid YAML for the expected shape.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A configuration value is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DocgenError>;
