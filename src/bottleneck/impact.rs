//! Organization-wide consequences of the detected bottlenecks.

use super::types::*;
use crate::core::{clamp_unit, ImpactTier, SeverityTier};
use crate::metrics::mean_by;

const REVENUE_TO_COST: f64 = 0.3;
const HIGH_DEMAND: f64 = 1.5;

pub fn overall_impact(bottlenecks: &[Bottleneck]) -> OverallImpact {
    let revenue_impact: f64 = bottlenecks.iter().map(|b| b.impact.cost_increase).sum();
    OverallImpact {
        productivity_loss: clamp_unit(mean_by(bottlenecks, |b| b.impact.throughput_reduction)),
        revenue_impact,
        cost_impact: revenue_impact * REVENUE_TO_COST,
        time_impact: bottlenecks.iter().map(|b| b.impact.time_delay).sum(),
        customer_impact: clamp_unit(mean_by(bottlenecks, |b| b.impact.quality_impact)),
    }
}

fn count_severity(bottlenecks: &[Bottleneck], severity: SeverityTier) -> usize {
    bottlenecks.iter().filter(|b| b.severity == severity).count()
}

pub fn cascading_effects(bottlenecks: &[Bottleneck]) -> Vec<SystemEffect> {
    let mut effects = Vec::new();

    if count_severity(bottlenecks, SeverityTier::Critical) > 0 {
        effects.push(SystemEffect {
            effect: "System-wide performance degradation".to_string(),
            area: "Operations".to_string(),
            magnitude: ImpactTier::High,
            timeframe: "1-2 weeks".to_string(),
            mitigation: "Address critical bottlenecks immediately".to_string(),
        });
    }

    let resource_bottlenecks = bottlenecks
        .iter()
        .filter(|b| b.bottleneck_type == BottleneckType::Resource)
        .count();
    if resource_bottlenecks > 2 {
        effects.push(SystemEffect {
            effect: "Resource constraint propagation".to_string(),
            area: "Resource Management".to_string(),
            magnitude: ImpactTier::Medium,
            timeframe: "2-4 weeks".to_string(),
            mitigation: "Implement resource optimization strategies".to_string(),
        });
    }

    effects
}

pub fn risk_factors(bottlenecks: &[Bottleneck], market: &MarketConditions) -> Vec<RiskFactor> {
    let mut risks = Vec::new();

    if market.demand > HIGH_DEMAND && !bottlenecks.is_empty() {
        risks.push(RiskFactor {
            risk: "Inability to meet increased market demand".to_string(),
            probability: 0.8,
            impact: ImpactTier::High,
            timeframe: "1-3 months".to_string(),
        });
    }
    if count_severity(bottlenecks, SeverityTier::Critical) > 1 {
        risks.push(RiskFactor {
            risk: "System failure due to multiple critical bottlenecks".to_string(),
            probability: 0.6,
            impact: ImpactTier::Critical,
            timeframe: "2-6 weeks".to_string(),
        });
    }

    risks
}
