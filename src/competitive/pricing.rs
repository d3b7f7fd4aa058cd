//! Competitor pricing strategies and our relative price position.

use super::types::*;
use crate::composer::Recommendation;
use crate::core::{clamp_unit, safe_ratio, ImpactTier};
use crate::metrics::mean;

const HIGH_GROWTH: f64 = 10.0;

pub fn strategy_for(average_price: f64) -> PricingStrategyKind {
    match average_price {
        p if p == 0.0 => PricingStrategyKind::Freemium,
        p if p > 1000.0 => PricingStrategyKind::Premium,
        p if p > 500.0 => PricingStrategyKind::Competitive,
        p if p > 100.0 => PricingStrategyKind::Value,
        _ => PricingStrategyKind::Penetration,
    }
}

pub fn pricing_strategies(request: &CompetitiveAnalysisRequest) -> Vec<CompetitorPricing> {
    request
        .analysis_scope
        .competitors
        .iter()
        .filter_map(|competitor| {
            let data = request.data_for(&competitor.id)?;
            let average_price = data.average_price()?;
            let prices = data.pricing.iter().map(|p| p.price);
            Some(CompetitorPricing {
                competitor_id: competitor.id.clone(),
                strategy: strategy_for(average_price),
                average_price,
                price_range: PriceRange {
                    min: prices.clone().fold(f64::INFINITY, f64::min),
                    max: prices.fold(f64::NEG_INFINITY, f64::max),
                },
                pricing_model: data
                    .pricing
                    .first()
                    .map(|p| p.model.clone())
                    .unwrap_or_else(|| "Unknown".to_string()),
            })
        })
        .collect()
}

/// Position of `ours` among competitor prices, by how many undercut it.
pub fn price_position(ours: f64, competitor_prices: &[f64]) -> PricePosition {
    let total = competitor_prices.len() + 1;
    let rank = competitor_prices.iter().filter(|&&p| p < ours).count();
    let share = rank as f64 / total as f64;
    if rank == 0 {
        PricePosition::Lowest
    } else if share < 0.3 {
        PricePosition::BelowAverage
    } else if share < 0.7 {
        PricePosition::Average
    } else if rank < total - 1 {
        PricePosition::AboveAverage
    } else {
        PricePosition::Highest
    }
}

pub fn competitive_pressure(priced_competitors: usize) -> Level {
    if priced_competitors > 5 {
        Level::High
    } else if priced_competitors > 2 {
        Level::Medium
    } else {
        Level::Low
    }
}

pub fn price_comparison(strategies: &[CompetitorPricing], company: &CompanyData) -> PriceComparison {
    if strategies.is_empty() {
        return PriceComparison {
            your_position: PricePosition::Average,
            competitive_pressure: Level::Low,
            price_optimization_opportunity: 0.0,
        };
    }

    let prices: Vec<f64> = strategies.iter().map(|s| s.average_price).collect();
    let market_average = mean(&prices);
    let ours = company.pricing.unwrap_or(market_average);

    PriceComparison {
        your_position: price_position(ours, &prices),
        competitive_pressure: competitive_pressure(prices.len()),
        price_optimization_opportunity: clamp_unit(safe_ratio(
            (ours - market_average).abs(),
            market_average,
        )),
    }
}

pub fn pricing_recommendations(comparison: &PriceComparison, growth_rate: f64) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if comparison.your_position == PricePosition::Highest
        && comparison.competitive_pressure == Level::High
    {
        recommendations.push(
            Recommendation::new(
                "Consider price optimization to improve competitiveness",
                "High pricing with significant competitive pressure",
                "Improved market share and customer acquisition",
            )
            .with_priority(ImpactTier::High)
            .with_actions(["Gradual price reduction or value-added bundling"]),
        );
    }

    if comparison.your_position == PricePosition::Lowest && growth_rate > HIGH_GROWTH {
        recommendations.push(
            Recommendation::new(
                "Explore premium pricing opportunities",
                "Strong market growth may support higher prices",
                "Increased margins and revenue growth",
            )
            .with_actions(["Test price increases with enhanced value proposition"]),
        );
    }
    recommendations
}

pub fn build_pricing(request: &CompetitiveAnalysisRequest, growth_rate: f64) -> PricingIntelligence {
    let pricing_strategies = pricing_strategies(request);
    let price_comparison = price_comparison(&pricing_strategies, &request.data.company);
    let pricing_recommendations = pricing_recommendations(&price_comparison, growth_rate);
    PricingIntelligence {
        pricing_strategies,
        price_comparison,
        pricing_recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_bands() {
        assert_eq!(strategy_for(0.0), PricingStrategyKind::Freemium);
        assert_eq!(strategy_for(49.0), PricingStrategyKind::Penetration);
        assert_eq!(strategy_for(250.0), PricingStrategyKind::Value);
        assert_eq!(strategy_for(750.0), PricingStrategyKind::Competitive);
        assert_eq!(strategy_for(1500.0), PricingStrategyKind::Premium);
    }

    #[test]
    fn test_price_position_ranks_against_competitors() {
        let prices = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0];
        assert_eq!(price_position(5.0, &prices), PricePosition::Lowest);
        assert_eq!(price_position(15.0, &prices), PricePosition::BelowAverage);
        assert_eq!(price_position(45.0, &prices), PricePosition::Average);
        assert_eq!(price_position(85.0, &prices), PricePosition::AboveAverage);
        assert_eq!(price_position(95.0, &prices), PricePosition::Highest);
    }

    #[test]
    fn test_missing_competitor_prices_give_neutral_comparison() {
        let comparison = price_comparison(&[], &CompanyData::default());
        assert_eq!(comparison.your_position, PricePosition::Average);
        assert_eq!(comparison.price_optimization_opportunity, 0.0);
    }

    #[test]
    fn test_expensive_under_pressure_is_flagged() {
        let comparison = PriceComparison {
            your_position: PricePosition::Highest,
            competitive_pressure: Level::High,
            price_optimization_opportunity: 0.4,
        };
        let recommendations = pricing_recommendations(&comparison, 3.0);
        assert_eq!(recommendations.len(), 1);
        assert_eq!(
            recommendations[0].actions,
            vec!["Gradual price reduction or value-added bundling"]
        );
    }

    #[test]
    fn test_opportunity_is_bounded() {
        let strategies = vec![CompetitorPricing {
            competitor_id: "r".into(),
            strategy: PricingStrategyKind::Value,
            average_price: 100.0,
            price_range: PriceRange { min: 100.0, max: 100.0 },
            pricing_model: "subscription".into(),
        }];
        let company = CompanyData {
            pricing: Some(900.0),
            ..Default::default()
        };
        let comparison = price_comparison(&strategies, &company);
        assert_eq!(comparison.price_optimization_opportunity, 1.0);
        // One rival: ranking above it still lands mid-field.
        assert_eq!(comparison.your_position, PricePosition::Average);
    }
}
