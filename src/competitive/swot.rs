use super::types::*;
use crate::core::ImpactTier;
use crate::metrics::mean_by;

const HIGH_GROWTH: f64 = 10.0;
const RAPID_GROWTH: f64 = 15.0;
const SATURATED_INTENSITY: f64 = 7.0;
const MAX_GAP_OPPORTUNITIES: usize = 2;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn critical_count(profiles: &[CompetitorProfile]) -> usize {
    profiles
        .iter()
        .filter(|p| p.threat_level == ImpactTier::Critical)
        .count()
}

pub fn strengths(request: &CompetitiveAnalysisRequest) -> Vec<SwotStrength> {
    let company = &request.data.company;
    let mut strengths: Vec<SwotStrength> = company
        .strengths
        .iter()
        .map(|s| SwotStrength {
            strength: s.clone(),
            impact: Level::Medium,
            uniqueness: 0.7,
            sustainability: Level::Medium,
        })
        .collect();

    let competitor_products = mean_by(&request.analysis_scope.competitors, |c| {
        request.data_for(&c.id).map_or(0.0, |d| d.products.len() as f64)
    });
    if !company.products.is_empty() && company.products.len() as f64 > competitor_products {
        strengths.push(SwotStrength {
            strength: "Superior product portfolio breadth".to_string(),
            impact: Level::High,
            uniqueness: 0.8,
            sustainability: Level::High,
        });
    }

    if strengths.is_empty() {
        strengths.push(SwotStrength {
            strength: "Market presence and positioning".to_string(),
            impact: Level::Medium,
            uniqueness: 0.5,
            sustainability: Level::Medium,
        });
    }
    strengths
}

pub fn weaknesses(
    request: &CompetitiveAnalysisRequest,
    profiles: &[CompetitorProfile],
) -> Vec<SwotWeakness> {
    let mut weaknesses: Vec<SwotWeakness> = request
        .data
        .company
        .weaknesses
        .iter()
        .map(|w| SwotWeakness {
            weakness: w.clone(),
            impact: Level::Medium,
            urgency: Level::Medium,
            addressability: Addressability::Moderate,
        })
        .collect();

    let pressing = profiles
        .iter()
        .filter(|p| p.threat_level.is_high_or_critical())
        .count();
    if pressing > 2 {
        weaknesses.push(SwotWeakness {
            weakness: "Significant competitive pressure from multiple players".to_string(),
            impact: Level::High,
            urgency: Level::High,
            addressability: Addressability::Difficult,
        });
    }

    if weaknesses.is_empty() {
        weaknesses.push(SwotWeakness {
            weakness: "Market position optimization needed".to_string(),
            impact: Level::Medium,
            urgency: Level::Medium,
            addressability: Addressability::Moderate,
        });
    }
    weaknesses
}

pub fn opportunities(overview: &MarketOverview, matrix: &CompetitiveMatrix) -> Vec<SwotOpportunity> {
    let mut opportunities = Vec::new();

    if overview.growth_rate > HIGH_GROWTH {
        opportunities.push(SwotOpportunity {
            opportunity: "Capitalize on high market growth rate".to_string(),
            potential: Level::High,
            timeframe: "6-12 months".to_string(),
            requirements: strings(&["Increased marketing investment", "Product development acceleration"]),
        });
    }

    opportunities.extend(matrix.gaps.iter().take(MAX_GAP_OPPORTUNITIES).map(|gap| {
        SwotOpportunity {
            opportunity: gap.opportunity.clone(),
            potential: Level::Medium,
            timeframe: "3-6 months".to_string(),
            requirements: strings(&["Strategic focus", "Resource allocation"]),
        }
    }));

    if overview.market_fragmentation == Level::High {
        opportunities.push(SwotOpportunity {
            opportunity: "Market consolidation through acquisition or partnership".to_string(),
            potential: Level::High,
            timeframe: "12+ months".to_string(),
            requirements: strings(&["Capital investment", "M&A capabilities"]),
        });
    }
    opportunities
}

pub fn threats(overview: &MarketOverview, profiles: &[CompetitorProfile]) -> Vec<SwotThreat> {
    let mut threats = Vec::new();

    let critical = critical_count(profiles);
    if critical > 0 {
        threats.push(SwotThreat {
            threat: format!("{critical} critical competitive threats identified"),
            probability: 0.8,
            impact: Level::High,
            timeframe: "3-6 months".to_string(),
            mitigation: "Strengthen competitive positioning and differentiation".to_string(),
        });
    }

    if overview.competitive_intensity > SATURATED_INTENSITY {
        threats.push(SwotThreat {
            threat: "High market saturation and competitive intensity".to_string(),
            probability: 0.9,
            impact: Level::Medium,
            timeframe: "Ongoing".to_string(),
            mitigation: "Focus on niche differentiation and customer loyalty".to_string(),
        });
    }

    if overview.market_fragmentation == Level::Low && overview.growth_rate > RAPID_GROWTH {
        threats.push(SwotThreat {
            threat: "Potential new market entrants attracted by growth".to_string(),
            probability: 0.6,
            impact: Level::Medium,
            timeframe: "6-12 months".to_string(),
            mitigation: "Build entry barriers and strengthen market position".to_string(),
        });
    }
    threats
}

pub fn build_swot(
    request: &CompetitiveAnalysisRequest,
    overview: &MarketOverview,
    profiles: &[CompetitorProfile],
    matrix: &CompetitiveMatrix,
) -> SwotAnalysis {
    SwotAnalysis {
        strengths: strengths(request),
        weaknesses: weaknesses(request, profiles),
        opportunities: opportunities(overview, matrix),
        threats: threats(overview, profiles),
    }
}
