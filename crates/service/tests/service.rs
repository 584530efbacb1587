//! Tests for the model service.

use async_trait::async_trait;
use manta_service::{ModelService, UsageService};
use mcore::{
    CallParams, Completion, EchoProvider, ModelCost, ModelId, ModelInfo, Provider, ProviderInfo,
    RateLimit, ServiceError, TokenUsage,
};
use model::{Discovery, Factory, Registry};
use std::sync::Arc;

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

/// Service whose "echo" provider reports 500 prompt / 1000 completion
/// tokens on every call.
fn echo_service() -> ModelService {
    let mut discovery = Discovery::empty();
    discovery.insert(
        "echo",
        Arc::new(|info, _client| {
            Ok(Arc::new(EchoProvider::with_usage(info, TokenUsage::new(500, 1000)))
                as Arc<dyn Provider>)
        }),
    );
    ModelService::new(
        Arc::new(Registry::new(Factory::with_discovery(discovery))),
        Arc::new(UsageService::new()),
    )
}

#[tokio::test]
async fn invoke_returns_data_usage_and_cost() {
    let service = echo_service();
    service.register_model(test_info("echo:unit"));

    let generation = service
        .invoke("echo:unit", "hello", &CallParams::new())
        .await
        .unwrap();
    assert_eq!(generation.data, "echo: hello");
    assert_eq!(generation.usage, TokenUsage::new(500, 1000));
    // (500/1000)*1.0 + (1000/1000)*2.0
    assert!((generation.cost - 2.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn malformed_identifier_rejected_at_the_edge() {
    let service = echo_service();
    let err = service
        .invoke("no-separator", "hello", &CallParams::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Config(_)));
    assert!(err.to_string().contains("malformed model identifier"));
}

#[tokio::test]
async fn unregistered_model_rejected() {
    let service = echo_service();
    let err = service
        .invoke("echo:unit", "hello", &CallParams::new())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("no model registered"));
}

#[tokio::test]
async fn invocation_records_usage() {
    let service = echo_service();
    service.register_model(test_info("echo:unit"));

    service
        .invoke("echo:unit", "one", &CallParams::new())
        .await
        .unwrap();
    service
        .invoke("echo:unit", "two", &CallParams::new())
        .await
        .unwrap();

    let totals = service
        .usage()
        .totals(&ModelId::parse("echo:unit").unwrap())
        .unwrap();
    assert_eq!(totals.prompt_tokens, 1000);
    assert_eq!(totals.completion_tokens, 2000);
    assert!((totals.total_cost - 5.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn cost_is_fixed_at_registration_time() {
    let service = echo_service();
    service.register_model(test_info("echo:unit"));

    let first = service
        .invoke("echo:unit", "hello", &CallParams::new())
        .await
        .unwrap();
    assert!((first.cost - 2.5).abs() < f64::EPSILON);

    // Re-registering doubled pricing does not touch the live provider.
    let mut repriced = test_info("echo:unit");
    repriced.cost.input_per_thousand = 2.0;
    repriced.cost.output_per_thousand = 4.0;
    service.register_model(repriced);

    let second = service
        .invoke("echo:unit", "hello", &CallParams::new())
        .await
        .unwrap();
    assert!((second.cost - 2.5).abs() < f64::EPSILON);

    // Rebuilding the registry entry picks up the new pricing.
    service.registry().unregister("echo:unit");
    let third = service
        .invoke("echo:unit", "hello", &CallParams::new())
        .await
        .unwrap();
    assert!((third.cost - 5.0).abs() < f64::EPSILON);
}

/// A provider whose calls always fail.
struct FailingProvider {
    info: ModelInfo,
}

#[async_trait]
impl Provider for FailingProvider {
    fn model_info(&self) -> &ModelInfo {
        &self.info
    }

    async fn complete(&self, _prompt: &str, _params: &CallParams) -> anyhow::Result<Completion> {
        anyhow::bail!("quota exceeded")
    }
}

#[tokio::test]
async fn provider_failure_wraps_into_invocation_error() {
    let service = echo_service();
    service.register_model(test_info("fail:unit"));
    service.registry().register(
        "fail:unit",
        Arc::new(|info, _client| Ok(Arc::new(FailingProvider { info }) as Arc<dyn Provider>)),
    );

    let err = service
        .invoke("fail:unit", "hello", &CallParams::new())
        .await
        .unwrap_err();
    let ServiceError::Invocation(invocation) = err else {
        panic!("expected an invocation error");
    };
    assert_eq!(invocation.id.as_str(), "fail:unit");
    assert_eq!(invocation.source.to_string(), "quota exceeded");
}

#[tokio::test]
async fn failed_invocation_records_nothing() {
    let service = echo_service();
    service.register_model(test_info("fail:unit"));
    service.registry().register(
        "fail:unit",
        Arc::new(|info, _client| Ok(Arc::new(FailingProvider { info }) as Arc<dyn Provider>)),
    );

    let _ = service.invoke("fail:unit", "hello", &CallParams::new()).await;
    assert!(
        service
            .usage()
            .totals(&ModelId::parse("fail:unit").unwrap())
            .is_none()
    );
}
