//! Provider discovery.
//!
//! A [`Discovery`] is an explicit table mapping provider names to
//! constructors. `builtin()` enumerates the bindings shipped with this
//! crate; additional constructors can be registered for out-of-tree
//! backends. Discovery never constructs a provider itself — unknown names
//! are reported by the factory at lookup time, and an empty table is a
//! valid table.

use crate::anthropic::{self, Anthropic};
use crate::deepseek::{self, DeepSeek};
use crate::openai::{self, OpenAi};
use anyhow::Result;
use compact_str::CompactString;
use mcore::{ModelInfo, Provider};
use reqwest::Client;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Constructs a provider instance from a validated config and a shared
/// HTTP client.
pub type Constructor = Arc<dyn Fn(ModelInfo, Client) -> Result<Arc<dyn Provider>> + Send + Sync>;

/// Table of provider constructors, keyed by provider name.
#[derive(Clone, Default)]
pub struct Discovery {
    table: BTreeMap<CompactString, Constructor>,
}

impl Discovery {
    /// Create an empty table.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in provider table: `anthropic`, `deepseek`, `openai`.
    pub fn builtin() -> Self {
        let mut discovery = Self::empty();
        discovery.insert(
            openai::PROVIDER_NAME,
            Arc::new(|info, client| Ok(Arc::new(OpenAi::new(info, client)?) as Arc<dyn Provider>)),
        );
        discovery.insert(
            deepseek::PROVIDER_NAME,
            Arc::new(|info, client| {
                Ok(Arc::new(DeepSeek::new(info, client)?) as Arc<dyn Provider>)
            }),
        );
        discovery.insert(
            anthropic::PROVIDER_NAME,
            Arc::new(|info, client| {
                Ok(Arc::new(Anthropic::new(info, client)?) as Arc<dyn Provider>)
            }),
        );
        discovery
    }

    /// Add or replace a constructor for `name`.
    pub fn insert(&mut self, name: impl Into<CompactString>, ctor: Constructor) {
        self.table.insert(name.into(), ctor);
    }

    /// Look up the constructor for `name`.
    pub fn get(&self, name: &str) -> Option<&Constructor> {
        self.table.get(name)
    }

    /// The registered provider names, in stable order.
    pub fn names(&self) -> Vec<CompactString> {
        self.table.keys().cloned().collect()
    }

    /// Number of registered constructors.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl std::fmt::Debug for Discovery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Discovery")
            .field("providers", &self.names())
            .finish()
    }
}
