mod common;

use common::*;
use growthmap::bottleneck::BottleneckEngine;
use growthmap::contract::Validate;
use growthmap::core::{ImpactTier, SeverityTier};
use growthmap::{
    analyze_competitive_landscape, assess_risks, calculate_success_probability,
    detect_bottlenecks, predict_performance, Engine, ErrorCode, Provenance,
};

#[test]
fn test_risk_fixture_end_to_end() {
    let analysis = assess_risks(&risk_request());
    assert!(analysis.is_computed(), "{:?}", analysis.provenance);

    let result = &analysis.result;
    let ids: Vec<&str> = result.identified_risks.iter().map(|r| r.id.as_str()).collect();
    assert!(ids.contains(&"initiative_eu_execution_risk"), "{ids:?}");
    assert!(ids.contains(&"initiative_platform_execution_risk"), "{ids:?}");

    let score = result.risk_profile.overall_risk_score;
    assert!((0.0..=10.0).contains(&score), "overall score {score}");
    for risk in &result.identified_risks {
        assert_unit(risk.probability, &risk.id);
    }
    assert!(!result.mitigation_strategies.contingency_plans.is_empty());
    assert!(result.violations().is_empty());
}

#[test]
fn test_bottleneck_fixture_end_to_end() {
    let analysis = detect_bottlenecks(&bottleneck_request());
    assert!(analysis.is_computed(), "{:?}", analysis.provenance);

    let result = &analysis.result;
    let fulfil = result
        .bottleneck_analysis
        .identified_bottlenecks
        .iter()
        .find(|b| b.id == "process_fulfil")
        .expect("fulfilment process should be flagged");
    assert_eq!(fulfil.severity, SeverityTier::Critical);
    assert!(fulfil.flagged);
    assert!(!result.recommendations.immediate.is_empty());
    assert!(result.violations().is_empty());
}

#[test]
fn test_success_fixture_end_to_end() {
    let analysis = calculate_success_probability(&success_request());
    assert!(analysis.is_computed(), "{:?}", analysis.provenance);

    let result = &analysis.result;
    assert_unit(result.overall_probability.success, "success");
    assert_unit(result.overall_probability.confidence, "confidence");
    assert!(result.overall_probability.success > 0.5);

    assert_eq!(result.initiative_probabilities.len(), 1);
    let launch = &result.initiative_probabilities[0];
    assert_eq!(launch.initiative_id, "launch");
    assert!((launch.probability - result.overall_probability.success).abs() < 1e-12);
    assert!(result.violations().is_empty());
}

#[test]
fn test_performance_fixture_end_to_end() {
    let analysis = predict_performance(&performance_request());
    assert!(analysis.is_computed(), "{:?}", analysis.provenance);

    let result = &analysis.result;
    assert_eq!(result.individual_predictions.len(), 2);
    assert_eq!(result.project_predictions.len(), 1);
    assert_eq!(result.team_predictions.overall_performance.trajectory.len(), 13);
    for point in &result.team_predictions.overall_performance.trajectory {
        assert_unit(point.confidence, "trajectory confidence");
    }
    let project = &result.project_predictions[0];
    assert_eq!(project.project_id, "api");
    assert_unit(project.predictions.completion_probability, "completion");
    assert!(result.violations().is_empty());
}

#[test]
fn test_competitive_fixture_end_to_end() {
    let analysis = analyze_competitive_landscape(&competitive_request());
    assert!(analysis.is_computed(), "{:?}", analysis.provenance);

    let result = &analysis.result;
    let landscape = &result.competitive_analysis;
    assert_eq!(landscape.market_overview.competitor_count, 3);
    assert_eq!(landscape.competitor_profiles.len(), 3);
    assert_eq!(landscape.competitive_matrix.rankings[0].competitor_id, "globex");
    assert_eq!(landscape.competitor_profiles[0].threat_level, ImpactTier::Critical);

    let ranks: Vec<usize> = landscape
        .competitive_matrix
        .rankings
        .iter()
        .map(|r| r.rank)
        .collect();
    assert_eq!(ranks, vec![1, 2, 3]);
    assert!(result.violations().is_empty());
}

#[test]
fn test_results_serialize_with_provenance() {
    let analysis = detect_bottlenecks(&bottleneck_request());
    let value = serde_json::to_value(&analysis).unwrap();
    assert_eq!(value["provenance"]["status"], "computed");
    assert!(value["result"]["bottleneck_analysis"]["identified_bottlenecks"].is_array());
}

#[test]
fn test_invalid_request_surfaces_through_try_compute() {
    let mut request = bottleneck_request();
    request.system_data.processes[0].performance.utilization = 1.2;

    let error = BottleneckEngine.try_compute(&request).unwrap_err();
    assert_eq!(error.code(), ErrorCode::CONTRACT_REQUEST);
    assert!(error.is_user_fixable());
    assert!(error
        .violations()
        .iter()
        .any(|v| v.to_string().contains("system_data.processes[0].performance.utilization")));

    let analysis = BottleneckEngine.run(&request);
    match &analysis.provenance {
        Provenance::Fallback { code, .. } => assert_eq!(*code, ErrorCode::CONTRACT_REQUEST),
        Provenance::Computed => panic!("invalid request must not be computed"),
    }
}
