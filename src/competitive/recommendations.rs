use super::types::*;
use crate::composer::{Recommendation, RecommendationPlan, Urgency};
use crate::core::ImpactTier;

const HIGH_INTENSITY: f64 = 7.0;
const HIGH_GROWTH: f64 = 10.0;

/// Strategic moves go under `strategic`, tactical ones under `short_term`.
pub fn build_recommendations(
    overview: &MarketOverview,
    profiles: &[CompetitorProfile],
    matrix: &CompetitiveMatrix,
) -> RecommendationPlan {
    let mut plan = RecommendationPlan::default();

    if overview.competitive_intensity > HIGH_INTENSITY {
        plan.push(Urgency::Strategic, differentiation(overview.competitive_intensity));
    }
    if overview.growth_rate > HIGH_GROWTH {
        plan.push(Urgency::Strategic, expansion(overview.growth_rate));
    }

    let pressing = profiles
        .iter()
        .filter(|p| p.threat_level.is_high_or_critical())
        .count();
    if pressing > 0 {
        plan.push(Urgency::ShortTerm, competitor_monitoring(pressing));
    }
    if let Some(gap) = matrix.gaps.iter().find(|g| g.dimension == Dimension::Pricing) {
        plan.push(Urgency::ShortTerm, pricing_review(gap));
    }

    plan
}

fn differentiation(intensity: f64) -> Recommendation {
    Recommendation::new(
        "Implement strong differentiation strategy to combat high competitive intensity",
        format!("Competitive intensity at {intensity:.1} out of 10"),
        "Reduced competitive pressure and improved market position",
    )
    .with_priority(ImpactTier::High)
    .with_timeline("3-6 months")
    .with_resources(["Product development", "Marketing investment", "Brand building"])
    .with_risks(["Medium execution risk"])
}

fn expansion(growth_rate: f64) -> Recommendation {
    Recommendation::new(
        "Accelerate market expansion to capitalize on growth opportunities",
        format!("Market growing at {growth_rate:.1}% per year"),
        "Increased market share and revenue growth",
    )
    .with_priority(ImpactTier::High)
    .with_timeline("6-12 months")
    .with_resources(["Sales expansion", "Marketing investment", "Operational scaling"])
    .with_risks(["Medium execution risk"])
}

fn competitor_monitoring(pressing: usize) -> Recommendation {
    Recommendation::new(
        "Implement competitive monitoring system for high-threat competitors",
        format!("{pressing} competitors rated high or critical threat"),
        "Impact score 0.70",
    )
    .with_target("Market Intelligence")
    .with_effort(ImpactTier::Low)
    .with_timeline("2-4 weeks")
}

fn pricing_review(gap: &CompetitiveGap) -> Recommendation {
    Recommendation::new(
        "Optimize pricing strategy based on competitive analysis",
        format!("Pricing trails the strongest competitor by {:.1} points", gap.gap),
        "Impact score 0.60",
    )
    .with_target("Pricing")
    .with_effort(ImpactTier::Medium)
    .with_timeline("4-6 weeks")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overview(intensity: f64, growth: f64) -> MarketOverview {
        MarketOverview {
            total_market_size: 1e9,
            growth_rate: growth,
            competitor_count: 4,
            market_fragmentation: Level::Medium,
            competitive_intensity: intensity,
        }
    }

    #[test]
    fn test_calm_market_yields_no_recommendations() {
        let plan = build_recommendations(&overview(5.0, 5.0), &[], &CompetitiveMatrix::default());
        assert!(plan.is_empty());
    }

    #[test]
    fn test_heated_growing_market_gets_both_strategic_moves() {
        let plan = build_recommendations(&overview(8.0, 15.0), &[], &CompetitiveMatrix::default());
        assert_eq!(plan.strategic.len(), 2);
        assert_eq!(plan.strategic[0].rationale, "Competitive intensity at 8.0 out of 10");
        assert_eq!(plan.strategic[1].timeline, "6-12 months");
    }

    #[test]
    fn test_pricing_gap_triggers_tactical_review() {
        let matrix = CompetitiveMatrix {
            gaps: vec![CompetitiveGap {
                dimension: Dimension::Pricing,
                gap: 4.0,
                opportunity: "Improve pricing to close competitive gap".into(),
            }],
            ..Default::default()
        };
        let plan = build_recommendations(&overview(5.0, 5.0), &[], &matrix);
        assert_eq!(plan.short_term.len(), 1);
        assert_eq!(plan.short_term[0].target.as_deref(), Some("Pricing"));
        assert_eq!(plan.short_term[0].effort, Some(ImpactTier::Medium));
    }
}
