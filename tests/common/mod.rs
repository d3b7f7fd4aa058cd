// Test utility module for growthmap integration tests
#![allow(dead_code)]

use growthmap::bottleneck::BottleneckDetectionRequest;
use growthmap::competitive::CompetitiveAnalysisRequest;
use growthmap::performance::PerformancePredictionRequest;
use growthmap::risk::RiskAssessmentRequest;
use growthmap::success::SuccessProbabilityRequest;
use serde::de::DeserializeOwned;
use std::path::PathBuf;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn load_fixture<T: DeserializeOwned>(name: &str) -> T {
    let path = fixture_path(name);
    let contents = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    serde_json::from_str(&contents)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e))
}

pub fn risk_request() -> RiskAssessmentRequest {
    load_fixture("risk.json")
}

pub fn bottleneck_request() -> BottleneckDetectionRequest {
    load_fixture("bottleneck.json")
}

pub fn success_request() -> SuccessProbabilityRequest {
    load_fixture("success.json")
}

pub fn performance_request() -> PerformancePredictionRequest {
    load_fixture("performance.json")
}

pub fn competitive_request() -> CompetitiveAnalysisRequest {
    load_fixture("competitive.json")
}

pub fn assert_unit(value: f64, what: &str) {
    assert!(
        (0.0..=1.0).contains(&value),
        "{what} = {value} is outside [0, 1]"
    );
}
