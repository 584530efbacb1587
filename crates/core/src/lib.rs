//! Core types and traits for the Manta model registry.
//!
//! This crate provides the shared vocabulary used across the workspace:
//! the [`ModelId`] identifier, the [`ModelInfo`] configuration record and
//! its validation, per-call [`CallParams`], the [`Provider`] capability
//! trait with its [`Completion`] result, and the error taxonomy.

pub use error::{InvocationError, ProviderConfigError, ServiceError};
pub use id::ModelId;
pub use info::{ModelCost, ModelInfo, ProviderInfo, RateLimit};
pub use params::CallParams;
pub use provider::{Completion, Provider, TokenUsage};

#[cfg(any(test, feature = "testing"))]
pub use echo::EchoProvider;

#[cfg(any(test, feature = "testing"))]
mod echo;
mod error;
mod id;
mod info;
mod params;
mod provider;
