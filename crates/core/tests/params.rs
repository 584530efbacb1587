//! Tests for `CallParams` merge semantics.

use manta_core::CallParams;
use serde_json::json;

#[test]
fn overrides_take_precedence() {
    let defaults = CallParams::new().temperature(1.0).max_tokens(256);
    let overrides = CallParams::new().temperature(0.2);
    let merged = overrides.merged_over(&defaults);
    assert_eq!(merged.temperature, Some(0.2));
    assert_eq!(merged.max_tokens, Some(256));
}

#[test]
fn absent_override_falls_back() {
    let defaults = CallParams::new().temperature(1.0);
    let merged = CallParams::new().merged_over(&defaults);
    assert_eq!(merged.temperature, Some(1.0));
    assert_eq!(merged.max_tokens, None);
}

#[test]
fn extra_fields_union_with_override_winning() {
    let defaults = CallParams::new()
        .extra("top_p", json!(0.9))
        .extra("stop", json!(["\n"]));
    let overrides = CallParams::new().extra("top_p", json!(0.5));
    let merged = overrides.merged_over(&defaults);
    assert_eq!(merged.extra["top_p"], json!(0.5));
    assert_eq!(merged.extra["stop"], json!(["\n"]));
}

#[test]
fn empty_params_serialize_to_empty_object() {
    let json = serde_json::to_string(&CallParams::new()).unwrap();
    assert_eq!(json, "{}");
}

#[test]
fn round_trips_through_json() {
    let params = CallParams::new()
        .temperature(0.7)
        .max_tokens(128)
        .extra("seed", json!(42));
    let text = serde_json::to_string(&params).unwrap();
    let back: CallParams = serde_json::from_str(&text).unwrap();
    assert_eq!(params, back);
}
