//! Model identifiers.

use crate::error::ProviderConfigError;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier for a model configuration, in `"<provider>:<model>"` form.
///
/// A `ModelId` is only constructible through [`ModelId::parse`] (or the
/// `new` constructor from parts), so holding one guarantees the identifier
/// has a non-empty provider segment and a non-empty model segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModelId(CompactString);

impl ModelId {
    /// Create an identifier from its provider and model segments.
    pub fn new(provider: &str, model: &str) -> Result<Self, ProviderConfigError> {
        Self::parse(&format!("{provider}:{model}"))
    }

    /// Parse a `"<provider>:<model>"` string.
    ///
    /// A missing separator or an empty segment is rejected with
    /// [`ProviderConfigError::MalformedIdentifier`].
    pub fn parse(s: &str) -> Result<Self, ProviderConfigError> {
        match s.split_once(':') {
            Some((provider, model)) if !provider.is_empty() && !model.is_empty() => {
                Ok(Self(CompactString::from(s)))
            }
            _ => Err(ProviderConfigError::MalformedIdentifier(
                CompactString::from(s),
            )),
        }
    }

    /// The provider segment.
    pub fn provider(&self) -> &str {
        self.0.split_once(':').map(|(p, _)| p).unwrap_or_default()
    }

    /// The model segment.
    pub fn model(&self) -> &str {
        self.0.split_once(':').map(|(_, m)| m).unwrap_or_default()
    }

    /// The full identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ModelId {
    type Err = ProviderConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ModelId {
    type Error = ProviderConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ModelId> for String {
    fn from(id: ModelId) -> Self {
        id.0.into()
    }
}
