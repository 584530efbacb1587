//! Usage accounting.
//!
//! Accumulates per-identifier token counts and cost. `record` is an atomic
//! read-modify-write: concurrent calls for the same identifier never lose
//! an update. Reads return snapshots for telemetry consumers.

use compact_str::CompactString;
use mcore::{ModelId, TokenUsage};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::BTreeMap;

/// Accumulated usage for one identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct UsageRecord {
    /// Total prompt tokens.
    pub prompt_tokens: u64,
    /// Total completion tokens.
    pub completion_tokens: u64,
    /// Total accumulated cost, in USD.
    pub total_cost: f64,
}

/// Thread-safe per-identifier usage accumulators.
#[derive(Debug, Default)]
pub struct UsageService {
    records: RwLock<BTreeMap<CompactString, UsageRecord>>,
}

impl UsageService {
    /// Create an empty usage service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one call's usage and cost to the identifier's accumulator.
    pub fn record(&self, id: &ModelId, usage: &TokenUsage, cost: f64) {
        let mut records = self.records.write();
        let record = records.entry(CompactString::from(id.as_str())).or_default();
        record.prompt_tokens += usage.prompt_tokens;
        record.completion_tokens += usage.completion_tokens;
        record.total_cost += cost;
        tracing::trace!(
            id = %id,
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            cost,
            "recorded usage"
        );
    }

    /// Snapshot of the accumulator for one identifier.
    pub fn totals(&self, id: &ModelId) -> Option<UsageRecord> {
        self.records.read().get(id.as_str()).copied()
    }

    /// Snapshot of every accumulator.
    pub fn totals_all(&self) -> BTreeMap<CompactString, UsageRecord> {
        self.records.read().clone()
    }
}
