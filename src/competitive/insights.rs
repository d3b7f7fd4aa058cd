use super::types::*;
use crate::core::ImpactTier;

const HIGH_INTENSITY: f64 = 7.0;
const RIVALRY_INTENSITY: f64 = 6.0;
const RAPID_GROWTH: f64 = 15.0;
const CROWDED_MARKET: usize = 10;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn key_insights(
    overview: &MarketOverview,
    profiles: &[CompetitorProfile],
    swot: &SwotAnalysis,
) -> Vec<KeyInsight> {
    let mut insights = Vec::new();

    if overview.competitive_intensity > HIGH_INTENSITY {
        insights.push(KeyInsight {
            insight: "Market exhibits high competitive intensity requiring strong differentiation"
                .to_string(),
            category: InsightCategory::MarketDynamics,
            importance: ImpactTier::High,
            actionable: true,
            timeframe: "Immediate".to_string(),
        });
    }

    let critical = profiles
        .iter()
        .filter(|p| p.threat_level == ImpactTier::Critical)
        .count();
    if critical > 0 {
        insights.push(KeyInsight {
            insight: format!("{critical} competitors pose critical threats requiring strategic response"),
            category: InsightCategory::CompetitiveThreats,
            importance: ImpactTier::Critical,
            actionable: true,
            timeframe: "3-6 months".to_string(),
        });
    }

    if swot.opportunities.len() > swot.threats.len() {
        insights.push(KeyInsight {
            insight: "Opportunity-rich environment favors growth and expansion strategies".to_string(),
            category: InsightCategory::StrategicOpportunities,
            importance: ImpactTier::High,
            actionable: true,
            timeframe: "6-12 months".to_string(),
        });
    }
    insights
}

pub fn competitive_trends(overview: &MarketOverview) -> Vec<CompetitiveTrend> {
    let mut trends = Vec::new();
    if overview.market_fragmentation == Level::High {
        trends.push(CompetitiveTrend {
            trend: "Market fragmentation creating consolidation opportunities".to_string(),
            direction: TrendPhase::Emerging,
            impact: Level::High,
            implications: strings(&["M&A opportunities", "Partnership potential", "Market share gains"]),
        });
    }
    if overview.growth_rate > RAPID_GROWTH {
        trends.push(CompetitiveTrend {
            trend: "Rapid market growth driving new entrants".to_string(),
            direction: TrendPhase::Growing,
            impact: Level::Medium,
            implications: strings(&["Increased competition", "Investment opportunities", "Scale advantages"]),
        });
    }
    trends
}

pub fn market_dynamics(overview: &MarketOverview) -> MarketDynamics {
    let high_if = |holds: bool| if holds { Level::High } else { Level::Medium };
    MarketDynamics {
        entry_barriers: high_if(overview.competitive_intensity > HIGH_INTENSITY),
        substitute_threat: Level::Medium,
        buyer_power: high_if(overview.competitor_count > CROWDED_MARKET),
        supplier_power: Level::Medium,
        rivalry_intensity: high_if(overview.competitive_intensity > RIVALRY_INTENSITY),
    }
}

pub fn build_insights(
    overview: &MarketOverview,
    profiles: &[CompetitorProfile],
    swot: &SwotAnalysis,
) -> StrategicInsights {
    StrategicInsights {
        key_insights: key_insights(overview, profiles, swot),
        competitive_trends: competitive_trends(overview),
        market_dynamics: market_dynamics(overview),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overview(intensity: f64, count: usize, growth: f64) -> MarketOverview {
        MarketOverview {
            total_market_size: 5e8,
            growth_rate: growth,
            competitor_count: count,
            market_fragmentation: Level::High,
            competitive_intensity: intensity,
        }
    }

    #[test]
    fn test_dynamics_track_intensity_and_crowding() {
        let calm = market_dynamics(&overview(5.0, 3, 5.0));
        assert_eq!(calm.entry_barriers, Level::Medium);
        assert_eq!(calm.rivalry_intensity, Level::Medium);
        assert_eq!(calm.buyer_power, Level::Medium);

        let heated = market_dynamics(&overview(8.0, 12, 5.0));
        assert_eq!(heated.entry_barriers, Level::High);
        assert_eq!(heated.rivalry_intensity, Level::High);
        assert_eq!(heated.buyer_power, Level::High);

        // Rivalry reacts earlier than entry barriers.
        let warm = market_dynamics(&overview(6.5, 3, 5.0));
        assert_eq!(warm.rivalry_intensity, Level::High);
        assert_eq!(warm.entry_barriers, Level::Medium);
    }

    #[test]
    fn test_trends_from_fragmentation_and_growth() {
        let trends = competitive_trends(&overview(5.0, 3, 20.0));
        assert_eq!(trends.len(), 2);
        assert_eq!(trends[0].direction, TrendPhase::Emerging);
        assert_eq!(trends[1].direction, TrendPhase::Growing);
    }

    #[test]
    fn test_opportunity_rich_insight() {
        let swot = SwotAnalysis {
            opportunities: vec![SwotOpportunity {
                opportunity: "Grow".into(),
                potential: Level::High,
                timeframe: "6-12 months".into(),
                requirements: vec![],
            }],
            ..Default::default()
        };
        let insights = key_insights(&overview(5.0, 3, 5.0), &[], &swot);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].category, InsightCategory::StrategicOpportunities);
    }
}
