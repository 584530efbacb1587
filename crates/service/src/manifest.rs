//! Model manifest loading.
//!
//! The one configuration-loading boundary: a TOML document with a
//! `[[models]]` array of `ModelInfo` tables. Everything else about where
//! configuration comes from is the caller's concern.

use crate::service::ModelService;
use anyhow::{Context, Result};
use mcore::ModelInfo;
use serde::Deserialize;
use std::path::Path;

/// A set of model configurations loaded from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelManifest {
    /// The configured models.
    #[serde(default)]
    pub models: Vec<ModelInfo>,
}

impl ModelManifest {
    /// Parse a manifest from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("failed to parse model manifest")
    }

    /// Load a manifest from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;
        Self::from_toml(&text)
    }

    /// Register every model in the manifest with a service.
    pub fn register_into(self, service: &ModelService) {
        for info in self.models {
            service.register_model(info);
        }
    }
}
