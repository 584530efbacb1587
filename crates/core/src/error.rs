//! Error taxonomy.
//!
//! Two failure kinds cross the public boundary: configuration problems
//! caught before any network call ([`ProviderConfigError`]) and failures
//! of the call itself ([`InvocationError`]). Provider-internal errors are
//! always wrapped — callers never handle per-backend error types.

use crate::id::ModelId;
use compact_str::CompactString;
use thiserror::Error;

/// A model configuration was rejected before any provider call.
#[derive(Debug, Error)]
pub enum ProviderConfigError {
    /// The identifier is not `"<provider>:<model>"` with both segments
    /// non-empty.
    #[error("malformed model identifier '{0}': expected '<provider>:<model>'")]
    MalformedIdentifier(CompactString),

    /// No constructor is known for the identifier's provider segment.
    #[error("unknown provider '{0}'")]
    UnknownProvider(CompactString),

    /// No `ModelInfo` has been registered for the identifier.
    #[error("no model registered for '{0}'")]
    UnknownModel(CompactString),

    /// A field of the `ModelInfo` violates its bounds.
    #[error("invalid {field} for '{id}': {reason}")]
    InvalidField {
        /// Identifier of the offending model.
        id: ModelId,
        /// The violated field.
        field: &'static str,
        /// What went wrong.
        reason: String,
    },

    /// Neither the model nor its provider carries an API key.
    #[error("no api key for '{0}': set the model override or the provider default")]
    MissingApiKey(ModelId),

    /// The provider's constructor itself failed.
    #[error("failed to construct provider '{provider}' for '{id}'")]
    Construction {
        /// Identifier being constructed.
        id: ModelId,
        /// Provider name.
        provider: CompactString,
        /// The constructor's error.
        #[source]
        source: anyhow::Error,
    },
}

/// A resolved provider failed at call time.
///
/// The original backend error is carried as the source; this layer does
/// not retry.
#[derive(Debug, Error)]
#[error("invocation of '{id}' failed")]
pub struct InvocationError {
    /// Identifier of the model that failed.
    pub id: ModelId,
    /// The provider's error.
    #[source]
    pub source: anyhow::Error,
}

/// Any failure surfaced by the model service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Configuration was rejected.
    #[error(transparent)]
    Config(#[from] ProviderConfigError),

    /// The provider call failed.
    #[error(transparent)]
    Invocation(#[from] InvocationError),
}
