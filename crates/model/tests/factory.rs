//! Tests for the provider factory.

use manta_model::{Discovery, Factory};
use mcore::{
    EchoProvider, ModelCost, ModelId, ModelInfo, Provider, ProviderConfigError, ProviderInfo,
    RateLimit,
};
use std::sync::Arc;

fn echo_discovery() -> Discovery {
    let mut discovery = Discovery::empty();
    discovery.insert(
        "echo",
        Arc::new(|info, _client| Ok(Arc::new(EchoProvider::new(info)) as Arc<dyn Provider>)),
    );
    discovery
}

fn test_info(id: &str) -> ModelInfo {
    ModelInfo {
        id: ModelId::parse(id).unwrap(),
        name: "Echo".into(),
        cost: ModelCost {
            input_per_thousand: 1.0,
            output_per_thousand: 2.0,
        },
        rate_limit: RateLimit {
            tokens_per_minute: 1000,
            requests_per_minute: 100,
        },
        provider: ProviderInfo {
            name: id.split(':').next().unwrap().into(),
            default_api_key: Some("test-key".into()),
            base_url: None,
        },
        api_key: None,
    }
}

#[test]
fn create_returns_instance_with_input_identifier() {
    let factory = Factory::with_discovery(echo_discovery());
    let provider = factory.create(&test_info("echo:unit")).unwrap();
    assert_eq!(provider.model_info().id.as_str(), "echo:unit");
}

#[test]
fn unknown_provider_is_config_error() {
    let factory = Factory::with_discovery(echo_discovery());
    let err = factory.create(&test_info("nope:model")).err().unwrap();
    assert!(matches!(err, ProviderConfigError::UnknownProvider(_)));
    assert!(err.to_string().contains("unknown provider 'nope'"));
}

#[test]
fn bounds_violation_names_field() {
    let factory = Factory::with_discovery(echo_discovery());
    let mut info = test_info("echo:unit");
    info.cost.input_per_thousand = -1.0;
    let err = factory.create(&info).err().unwrap();
    assert!(err.to_string().contains("cost.input_per_thousand"));
}

#[test]
fn missing_credential_is_config_error() {
    let factory = Factory::with_discovery(echo_discovery());
    let mut info = test_info("echo:unit");
    info.provider.default_api_key = None;
    let err = factory.create(&info).err().unwrap();
    assert!(matches!(err, ProviderConfigError::MissingApiKey(_)));
}

#[test]
fn constructor_failure_is_wrapped() {
    let mut discovery = Discovery::empty();
    discovery.insert(
        "echo",
        Arc::new(|_info, _client| anyhow::bail!("backend exploded")),
    );
    let factory = Factory::with_discovery(discovery);
    let err = factory.create(&test_info("echo:unit")).err().unwrap();
    assert!(matches!(err, ProviderConfigError::Construction { .. }));
    assert!(err.to_string().contains("failed to construct"));
}

#[test]
fn builtin_discovery_constructs_openai() {
    let factory = Factory::new();
    let provider = factory.create(&test_info("openai:gpt-4o")).unwrap();
    assert_eq!(provider.model_info().id.provider(), "openai");
}

#[test]
fn factory_does_not_cache() {
    let factory = Factory::with_discovery(echo_discovery());
    let info = test_info("echo:unit");
    let first = factory.create(&info).unwrap();
    let second = factory.create(&info).unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
}
