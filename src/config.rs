//! Model manifest tables.
//!
//! The host page hands the runtime a list of model descriptors; the same
//! shape can also be loaded from a JSON manifest file shipped alongside
//! the scene assets.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// One loadable model, as named by the host.
///
/// `format` is the file-extension tag (`".glb"`, `".gltf"`, ...) that the
/// loading pipeline checks against its supported-format set; descriptors
/// with an unrecognized format are skipped without error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub format: String,
}

impl ModelDescriptor {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        format: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            format: format.into(),
        }
    }
}

/// A batch of model descriptors, typically one per facility scene.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelManifest {
    #[serde(default)]
    pub models: Vec<ModelDescriptor>,
}

impl ModelManifest {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = tokio::fs::read_to_string(path).await?;
        Self::from_json(&text)
    }
}
