//! Tests for the usage service.

use manta_service::UsageService;
use mcore::{ModelId, TokenUsage};

fn id(s: &str) -> ModelId {
    ModelId::parse(s).unwrap()
}

#[test]
fn record_accumulates() {
    let usage = UsageService::new();
    let model = id("openai:gpt-4o");
    usage.record(&model, &TokenUsage::new(100, 50), 0.25);
    usage.record(&model, &TokenUsage::new(200, 100), 0.50);

    let totals = usage.totals(&model).unwrap();
    assert_eq!(totals.prompt_tokens, 300);
    assert_eq!(totals.completion_tokens, 150);
    assert!((totals.total_cost - 0.75).abs() < f64::EPSILON);
}

#[test]
fn unknown_identifier_has_no_totals() {
    let usage = UsageService::new();
    assert!(usage.totals(&id("openai:gpt-4o")).is_none());
}

#[test]
fn identifiers_accumulate_independently() {
    let usage = UsageService::new();
    usage.record(&id("openai:gpt-4o"), &TokenUsage::new(10, 5), 0.1);
    usage.record(&id("deepseek:deepseek-chat"), &TokenUsage::new(20, 10), 0.2);

    assert_eq!(usage.totals(&id("openai:gpt-4o")).unwrap().prompt_tokens, 10);
    assert_eq!(
        usage
            .totals(&id("deepseek:deepseek-chat"))
            .unwrap()
            .prompt_tokens,
        20
    );
}

#[test]
fn totals_all_snapshots_every_accumulator() {
    let usage = UsageService::new();
    usage.record(&id("openai:gpt-4o"), &TokenUsage::new(10, 5), 0.1);
    usage.record(&id("anthropic:claude-sonnet-4-6"), &TokenUsage::new(1, 1), 0.0);

    let all = usage.totals_all();
    assert_eq!(all.len(), 2);
    assert_eq!(all["openai:gpt-4o"].completion_tokens, 5);
}

#[test]
fn concurrent_records_lose_no_updates() {
    const THREADS: usize = 16;
    const CALLS_PER_THREAD: u64 = 100;

    let usage = UsageService::new();
    let model = id("echo:unit");
    let barrier = std::sync::Barrier::new(THREADS);

    std::thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(|| {
                barrier.wait();
                for _ in 0..CALLS_PER_THREAD {
                    usage.record(&model, &TokenUsage::new(3, 2), 0.5);
                }
            });
        }
    });

    let expected_calls = THREADS as u64 * CALLS_PER_THREAD;
    let totals = usage.totals(&model).unwrap();
    assert_eq!(totals.prompt_tokens, 3 * expected_calls);
    assert_eq!(totals.completion_tokens, 2 * expected_calls);
    assert!((totals.total_cost - 0.5 * expected_calls as f64).abs() < 1e-9);
}
