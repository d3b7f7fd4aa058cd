//! Property-based tests for the growth engines
//!
//! These tests verify invariants that should hold for all inputs:
//! - Valid snapshots always produce a computed result that meets its contract
//! - Analysis is deterministic for a fixed snapshot
//! - Bounded scores stay inside their documented ranges
//! - A stronger track record never lowers the success probability
//! - Heavier workload never lowers a member's burnout risk
//! - Success analysis always carries all four scenarios

mod common;

use common::*;
use growthmap::contract::Validate;
use growthmap::{
    analyze_competitive_landscape, assess_risks, calculate_success_probability,
    detect_bottlenecks, predict_performance,
};
use proptest::prelude::*;

fn unit() -> impl Strategy<Value = f64> {
    0.0..=1.0f64
}

const BURNOUT: &str = "High workload leading to burnout";

fn burnout_probability(workload: f64) -> f64 {
    let mut request = performance_request();
    request.team_data.members[0].workload = workload;
    let result = predict_performance(&request).result;
    result.individual_predictions[0]
        .predictions
        .risk_factors
        .iter()
        .find(|rf| rf.factor == BURNOUT)
        .map_or(0.0, |rf| rf.probability)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: any non-negative investment keeps the risk score on its 0-10 scale
    #[test]
    fn prop_risk_score_is_bounded(
        investment in 0.0..50_000_000.0f64,
        expected_return in 0.0..100_000_000.0f64,
        magnitude in unit(),
    ) {
        let mut request = risk_request();
        request.growth_initiatives[0].investment = investment;
        request.growth_initiatives[0].expected_return = expected_return;
        request.historical_data.market_events[0].magnitude = magnitude;

        let analysis = assess_risks(&request);
        prop_assert!(analysis.is_computed(), "{:?}", analysis.provenance);

        let score = analysis.result.risk_profile.overall_risk_score;
        prop_assert!((0.0..=10.0).contains(&score));
        for risk in &analysis.result.identified_risks {
            prop_assert!((0.0..=1.0).contains(&risk.probability));
        }
        prop_assert!(analysis.result.violations().is_empty());
    }

    /// Property: running detection twice on the same snapshot gives the same answer
    #[test]
    fn prop_bottleneck_detection_is_deterministic(
        efficiency in unit(),
        utilization in unit(),
        error_rate in unit(),
    ) {
        let mut request = bottleneck_request();
        let process = &mut request.system_data.processes[1];
        process.performance.efficiency = efficiency;
        process.performance.utilization = utilization;
        process.performance.error_rate = error_rate;

        let first = detect_bottlenecks(&request);
        let second = detect_bottlenecks(&request);
        prop_assert!(first.is_computed(), "{:?}", first.provenance);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.result.violations().is_empty());
    }

    /// Property: better delivery history is never penalized
    #[test]
    fn prop_success_monotone_in_delivery(low in unit(), high in unit()) {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };

        let mut weaker = success_request();
        weaker.organizational_context.track_record.on_time_delivery = low;
        let mut stronger = success_request();
        stronger.organizational_context.track_record.on_time_delivery = high;

        let weaker = calculate_success_probability(&weaker).result;
        let stronger = calculate_success_probability(&stronger).result;
        prop_assert!(
            stronger.overall_probability.success + 1e-12 >= weaker.overall_probability.success
        );
        prop_assert!((0.0..=1.0).contains(&stronger.overall_probability.success));
    }

    /// Property: workload and skill vectors in range always yield a full forecast
    #[test]
    fn prop_performance_forecast_is_complete(
        workload_a in unit(),
        workload_b in unit(),
        efficiency in unit(),
        quality in unit(),
    ) {
        let mut request = performance_request();
        request.team_data.members[0].workload = workload_a;
        request.team_data.members[1].workload = workload_b;
        request.team_data.members[1].performance.efficiency = efficiency;
        request.team_data.members[1].performance.quality = quality;

        let analysis = predict_performance(&request);
        prop_assert!(analysis.is_computed(), "{:?}", analysis.provenance);

        let result = &analysis.result;
        prop_assert_eq!(result.individual_predictions.len(), 2);
        prop_assert_eq!(result.team_predictions.overall_performance.trajectory.len(), 13);
        prop_assert_eq!(result.scenario_analysis.len(), 3);
        prop_assert!(result.violations().is_empty());
    }

    /// Property: market growth and pricing never push positions off the grid
    #[test]
    fn prop_competitive_positions_stay_on_grid(
        growth in -20.0..60.0f64,
        price in 0.0..10_000.0f64,
        our_price in proptest::option::of(0.0..10_000.0f64),
    ) {
        let mut request = competitive_request();
        request.data.market.growth_rate = Some(growth);
        request.data.company.pricing = our_price;
        if let Some(globex) = request.data.competitors.get_mut("globex") {
            globex.pricing[0].price = price;
        }

        let analysis = analyze_competitive_landscape(&request);
        prop_assert!(analysis.is_computed(), "{:?}", analysis.provenance);

        let result = &analysis.result;
        let intensity = result.competitive_analysis.market_overview.competitive_intensity;
        prop_assert!((1.0..=10.0).contains(&intensity));

        let current = &result.positioning_analysis.current_position;
        prop_assert!((-1.0..=1.0).contains(&current.x));
        prop_assert!((-1.0..=1.0).contains(&current.y));
        prop_assert!(
            (0.0..=1.0).contains(&result.pricing_intelligence.price_comparison.price_optimization_opportunity)
        );
        prop_assert!(result.violations().is_empty());
    }

    /// Property: raising an already heavy workload never lowers burnout risk
    #[test]
    fn prop_burnout_risk_monotone_in_workload(a in 0.9..=1.0f64, b in 0.9..=1.0f64) {
        let (lighter, heavier) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(burnout_probability(heavier) >= burnout_probability(lighter));
    }

    /// Property: success analysis always reports best, most likely, worst and black swan
    #[test]
    fn prop_success_scenarios_are_complete(
        success_rate in unit(),
        growth in -0.5..0.5f64,
        similarity in unit(),
    ) {
        let mut request = success_request();
        request.organizational_context.track_record.success_rate = success_rate;
        request.market_context.industry.growth = growth;
        request.historical_data.similar_initiatives = vec![growthmap::success::SimilarInitiative {
            initiative_id: "old".into(),
            similarity,
            outcome: growthmap::success::Outcome::PartiallySuccessful,
            success_factors: vec![],
            failure_factors: vec![],
            lessons: vec![],
        }];

        let analysis = calculate_success_probability(&request);
        prop_assert!(analysis.is_computed(), "{:?}", analysis.provenance);
        let scenarios = &analysis.result.scenario_probabilities;
        prop_assert_eq!(scenarios.len(), 4);
        prop_assert!(scenarios.tail.is_some());
        for scenario in scenarios.iter() {
            prop_assert!((0.0..=1.0).contains(&scenario.probability));
        }
    }
}
