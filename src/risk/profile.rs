//! Organization-level risk profile: overall score, category distribution,
//! and recent market trend per category.

use super::types::*;
use crate::core::{clamp_range, ImpactTier, TrendDirection};
use crate::metrics::{severity_from_score, Ladder};
use chrono::{Months, NaiveDate};
use std::collections::BTreeMap;

const BASELINE_RISK: f64 = 5.0;
const INITIATIVE_RISK_STEP: f64 = 0.1;
const TREND_WINDOW_MONTHS: u32 = 6;

pub const RISK_LEVELS: Ladder<ImpactTier> = Ladder::new(
    ImpactTier::Low,
    &[
        (3.0, ImpactTier::Medium),
        (5.0, ImpactTier::High),
        (7.0, ImpactTier::Critical),
    ],
);

pub fn build_profile(request: &RiskAssessmentRequest) -> RiskProfile {
    let overall_risk_score = overall_risk_score(request);
    RiskProfile {
        overall_risk_score,
        risk_level: severity_from_score(overall_risk_score, &RISK_LEVELS),
        risk_distribution: risk_distribution(request),
        risk_trends: risk_trends(request),
    }
}

pub fn overall_risk_score(request: &RiskAssessmentRequest) -> f64 {
    let context = &request.business_context;
    let mut score = BASELINE_RISK
        * context.growth_stage.risk_multiplier()
        * context.size.risk_multiplier();

    let (declining, improving) = context.key_metrics.values().fold((0, 0), |(d, i), kpi| {
        match kpi.trend {
            TrendDirection::Declining => (d + 1, i),
            TrendDirection::Improving => (d, i + 1),
            TrendDirection::Stable => (d, i),
        }
    });
    if declining > improving {
        score *= 1.2;
    } else if improving > declining {
        score *= 0.9;
    }

    score += request.growth_initiatives.len() as f64 * INITIATIVE_RISK_STEP;
    clamp_range(score, 0.0, 10.0)
}

fn base_category_risk(category: RiskCategory) -> f64 {
    match category {
        RiskCategory::Financial => 4.0,
        RiskCategory::Operational => 3.0,
        RiskCategory::Strategic => 5.0,
        RiskCategory::Technology => 4.0,
        RiskCategory::Regulatory => 3.0,
        RiskCategory::Market => 5.0,
        RiskCategory::Competitive => 4.0,
        RiskCategory::Environmental => 2.0,
    }
}

/// Context-specific adjustment on top of the base category risk.
fn category_adjustment(category: RiskCategory, context: &OrganizationContext) -> f64 {
    let industry = context.industry.to_lowercase();
    match category {
        RiskCategory::Technology if industry.contains("tech") => 1.0,
        RiskCategory::Regulatory if industry.contains("healthcare") => 2.0,
        RiskCategory::Market if context.growth_stage == GrowthStage::Startup => 1.5,
        _ => 0.0,
    }
}

pub fn risk_distribution(request: &RiskAssessmentRequest) -> BTreeMap<RiskCategory, f64> {
    request
        .assessment_scope
        .risk_categories
        .iter()
        .map(|&category| {
            let risk = base_category_risk(category)
                + category_adjustment(category, &request.business_context);
            (category, risk.min(10.0))
        })
        .collect()
}

/// Events dated inside the six months up to and including `as_of`.
fn recent_events(request: &RiskAssessmentRequest) -> Vec<&MarketEvent> {
    let window_start = request
        .as_of
        .checked_sub_months(Months::new(TREND_WINDOW_MONTHS))
        .unwrap_or(NaiveDate::MIN);
    request
        .historical_data
        .market_events
        .iter()
        .filter(|event| event.date > window_start && event.date <= request.as_of)
        .collect()
}

pub fn risk_trends(request: &RiskAssessmentRequest) -> Vec<RiskTrend> {
    let events = recent_events(request);
    let negative = events
        .iter()
        .filter(|e| e.impact == EventImpact::Negative)
        .count();
    let positive = events
        .iter()
        .filter(|e| e.impact == EventImpact::Positive)
        .count();

    let trend = if negative > positive {
        RiskTrendDirection::Increasing
    } else if positive > negative {
        RiskTrendDirection::Decreasing
    } else {
        RiskTrendDirection::Stable
    };
    let confidence = if events.len() > 3 { 0.8 } else { 0.6 };

    request
        .assessment_scope
        .risk_categories
        .iter()
        .map(|&category| RiskTrend {
            category,
            trend,
            timeframe: format!("{} months", TREND_WINDOW_MONTHS),
            confidence,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(stage: GrowthStage, size: OrganizationSize) -> RiskAssessmentRequest {
        RiskAssessmentRequest {
            as_of: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            assessment_scope: AssessmentScope {
                risk_categories: RiskCategory::ALL.to_vec(),
                time_horizon: RiskHorizon::MediumTerm,
                impact_areas: vec![],
                risk_tolerance: RiskTolerance::Medium,
            },
            business_context: OrganizationContext {
                industry: "Healthcare Technology".into(),
                business_model: String::new(),
                growth_stage: stage,
                size,
                geography: vec![],
                key_metrics: BTreeMap::new(),
            },
            growth_initiatives: vec![],
            historical_data: HistoricalRiskData::default(),
        }
    }

    fn kpi(trend: TrendDirection) -> KpiSnapshot {
        KpiSnapshot {
            current: 1.0,
            target: 1.0,
            trend,
        }
    }

    fn event(date: (i32, u32, u32), impact: EventImpact) -> MarketEvent {
        MarketEvent {
            event: "event".into(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            impact,
            magnitude: 0.5,
        }
    }

    #[test]
    fn test_maturity_medium_baseline() {
        let req = request(GrowthStage::Maturity, OrganizationSize::Medium);
        assert_eq!(overall_risk_score(&req), 5.0);
        // Exactly on the boundary keeps the lower tier.
        assert_eq!(build_profile(&req).risk_level, ImpactTier::Medium);
    }

    #[test]
    fn test_startup_micro_with_declining_kpis_clamps_to_ten() {
        let mut req = request(GrowthStage::Startup, OrganizationSize::Micro);
        req.business_context
            .key_metrics
            .insert("revenue".into(), kpi(TrendDirection::Declining));
        // 5 * 1.5 * 1.2 * 1.2 = 10.8
        assert_eq!(overall_risk_score(&req), 10.0);
        assert_eq!(build_profile(&req).risk_level, ImpactTier::Critical);
    }

    #[test]
    fn test_improving_kpis_and_initiatives() {
        let mut req = request(GrowthStage::Maturity, OrganizationSize::Enterprise);
        req.business_context
            .key_metrics
            .insert("nps".into(), kpi(TrendDirection::Improving));
        req.growth_initiatives.push(GrowthInitiative {
            id: "i1".into(),
            name: "Launch".into(),
            initiative_type: InitiativeType::Partnership,
            investment: 0.0,
            timeline: "3 months".into(),
            expected_return: 0.0,
            dependencies: vec![],
            critical_success_factors: vec![],
        });
        // 5 * 0.8 * 0.9 + 0.1
        assert!((overall_risk_score(&req) - 3.7).abs() < 1e-9);
    }

    #[test]
    fn test_distribution_applies_context_adjustments() {
        let req = request(GrowthStage::Startup, OrganizationSize::Medium);
        let distribution = risk_distribution(&req);
        assert_eq!(distribution[&RiskCategory::Technology], 5.0);
        assert_eq!(distribution[&RiskCategory::Regulatory], 5.0);
        assert_eq!(distribution[&RiskCategory::Market], 6.5);
        assert_eq!(distribution[&RiskCategory::Environmental], 2.0);
    }

    #[test]
    fn test_trends_only_count_recent_events() {
        let mut req = request(GrowthStage::Growth, OrganizationSize::Medium);
        req.historical_data.market_events = vec![
            event((2024, 5, 1), EventImpact::Negative),
            event((2024, 2, 1), EventImpact::Negative),
            event((2023, 1, 1), EventImpact::Positive),
            event((2023, 2, 1), EventImpact::Positive),
            event((2023, 3, 1), EventImpact::Positive),
        ];
        let trends = risk_trends(&req);
        assert_eq!(trends.len(), RiskCategory::ALL.len());
        assert!(trends
            .iter()
            .all(|t| t.trend == RiskTrendDirection::Increasing && t.confidence == 0.6));
    }
}
