mod common;

use common::*;
use growthmap::contract::Validate;
use growthmap::{
    BottleneckEngine, CompetitiveEngine, Engine, ErrorCode, PerformanceEngine, Provenance,
    RiskEngine, SuccessEngine,
};

fn fallback_code(provenance: &Provenance) -> ErrorCode {
    match provenance {
        Provenance::Fallback { code, .. } => *code,
        Provenance::Computed => panic!("expected a fallback, got a computed result"),
    }
}

#[test]
fn test_every_fallback_satisfies_its_output_contract() {
    assert!(RiskEngine.fallback(&risk_request()).violations().is_empty());
    assert!(BottleneckEngine
        .fallback(&bottleneck_request())
        .violations()
        .is_empty());
    assert!(SuccessEngine.fallback(&success_request()).violations().is_empty());
    assert!(PerformanceEngine
        .fallback(&performance_request())
        .violations()
        .is_empty());
    assert!(CompetitiveEngine
        .fallback(&competitive_request())
        .violations()
        .is_empty());
}

#[test]
fn test_contract_violation_serves_risk_fallback() {
    let mut request = risk_request();
    request.business_context.industry = "  ".into();

    let analysis = RiskEngine.run(&request);
    assert_eq!(fallback_code(&analysis.provenance), ErrorCode::CONTRACT_REQUEST);
    assert_eq!(analysis.result, RiskEngine.fallback(&request));
}

#[test]
fn test_contract_violation_serves_success_fallback() {
    let mut request = success_request();
    request.analysis_scope.confidence_level = 1.5;

    let analysis = SuccessEngine.run(&request);
    assert_eq!(fallback_code(&analysis.provenance), ErrorCode::CONTRACT_REQUEST);
    assert!(analysis.result.violations().is_empty());
}

#[test]
fn test_empty_team_serves_performance_fallback() {
    let mut request = performance_request();
    request.team_data.members.clear();
    request.team_data.historical_performance.clear();

    let analysis = PerformanceEngine.run(&request);
    assert_eq!(fallback_code(&analysis.provenance), ErrorCode::COMPUTATION_EMPTY);
    assert!(analysis.result.individual_predictions.is_empty());
}

#[test]
fn test_empty_roster_serves_competitive_fallback() {
    let mut request = competitive_request();
    request.analysis_scope.competitors.clear();

    let analysis = CompetitiveEngine.run(&request);
    assert_eq!(fallback_code(&analysis.provenance), ErrorCode::COMPUTATION_EMPTY);
    assert!(analysis
        .result
        .competitive_analysis
        .competitor_profiles
        .is_empty());
}

#[test]
fn test_duplicate_competitor_ids_are_reported() {
    let mut request = competitive_request();
    let first = request.analysis_scope.competitors[0].clone();
    request.analysis_scope.competitors.push(first);

    let error = CompetitiveEngine.try_compute(&request).unwrap_err();
    assert_eq!(error.code(), ErrorCode::CONTRACT_REQUEST);
    assert!(error
        .violations()
        .iter()
        .any(|v| v.to_string().starts_with("analysis_scope.competitors[3].id")));
}

#[test]
fn test_fallback_reason_names_the_violation() {
    let mut request = bottleneck_request();
    request.external_factors.market_conditions.demand = 3.0;

    let analysis = BottleneckEngine.run(&request);
    match &analysis.provenance {
        Provenance::Fallback { reason, .. } => {
            assert!(reason.contains("demand"), "reason: {reason}")
        }
        Provenance::Computed => panic!("out-of-range demand must not be computed"),
    }
}
