//! Provider bindings, discovery, factory, and registry.
//!
//! This crate turns a validated [`mcore::ModelInfo`] into a live provider
//! instance and caches it: [`Discovery`] maps provider names to
//! constructors, [`Factory`] validates and constructs, and [`Registry`]
//! guarantees at most one instance per identifier.

pub use discovery::{Constructor, Discovery};
pub use factory::Factory;
pub use http::HttpProvider;
pub use registry::Registry;
pub use reqwest::{self, Client};

pub mod anthropic;
pub mod deepseek;
mod discovery;
mod factory;
mod http;
pub mod openai;
mod registry;
mod wire;
