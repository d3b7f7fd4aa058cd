//! Market overview: size, growth, fragmentation, and competitive intensity.

use super::types::*;
use crate::core::{clamp_range, safe_ratio};

/// Assumed average competitor revenue when the market size is unknown.
const AVERAGE_COMPETITOR_REVENUE: f64 = 100_000_000.0;
const DEFAULT_GROWTH_RATE: f64 = 5.0;
const BASE_INTENSITY: f64 = 5.0;

pub fn estimate_market_size(competitor_count: usize) -> f64 {
    competitor_count as f64 * AVERAGE_COMPETITOR_REVENUE * 2.0
}

/// Growth in percent for the first industry in focus.
pub fn estimate_growth_rate(industry_focus: &[String]) -> f64 {
    let primary = industry_focus.first().map(|i| i.to_lowercase());
    match primary.as_deref() {
        Some("technology") => 15.0,
        Some("healthcare") => 8.0,
        Some("finance") => 5.0,
        Some("retail") => 3.0,
        Some("manufacturing") => 2.0,
        _ => DEFAULT_GROWTH_RATE,
    }
}

/// Few large players means a concentrated (low fragmentation) market.
pub fn fragmentation(competitors: &[Competitor]) -> Level {
    let large = competitors.iter().filter(|c| c.size.is_large()).count();
    let concentration = safe_ratio(large as f64, competitors.len() as f64);
    if concentration > 0.7 {
        Level::Low
    } else if concentration > 0.3 {
        Level::Medium
    } else {
        Level::High
    }
}

/// Intensity in `[1, 10]` from direct rivals and the reported growth rate.
pub fn competitive_intensity(competitors: &[Competitor], market: &MarketData) -> f64 {
    let direct = competitors.iter().filter(|c| c.is_direct_competitor).count();
    let mut intensity = BASE_INTENSITY + (direct as f64 * 0.5).min(3.0);

    let growth = market.growth_rate.unwrap_or(DEFAULT_GROWTH_RATE);
    if growth < 2.0 {
        intensity += 1.0;
    }
    if growth > 10.0 {
        intensity -= 1.0;
    }

    clamp_range(intensity, 1.0, 10.0)
}

pub fn market_overview(request: &CompetitiveAnalysisRequest) -> MarketOverview {
    let competitors = &request.analysis_scope.competitors;
    let market = &request.data.market;
    MarketOverview {
        total_market_size: market
            .market_size
            .unwrap_or_else(|| estimate_market_size(competitors.len())),
        growth_rate: market
            .growth_rate
            .unwrap_or_else(|| estimate_growth_rate(&request.analysis_scope.industry_focus)),
        competitor_count: competitors.len(),
        market_fragmentation: fragmentation(competitors),
        competitive_intensity: competitive_intensity(competitors, market),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn competitor(size: CompanySize, direct: bool) -> Competitor {
        Competitor {
            id: "c".into(),
            name: "C".into(),
            domain: None,
            industry: "technology".into(),
            size,
            is_direct_competitor: direct,
        }
    }

    #[test]
    fn test_growth_rate_lookup() {
        assert_eq!(estimate_growth_rate(&["Technology".to_string()]), 15.0);
        assert_eq!(estimate_growth_rate(&["agriculture".to_string()]), 5.0);
        assert_eq!(estimate_growth_rate(&[]), 5.0);
    }

    #[test]
    fn test_fragmentation_tiers() {
        let concentrated = vec![
            competitor(CompanySize::Enterprise, true),
            competitor(CompanySize::Large, true),
            competitor(CompanySize::Large, false),
            competitor(CompanySize::Enterprise, false),
        ];
        assert_eq!(fragmentation(&concentrated), Level::Low);

        let mixed = vec![competitor(CompanySize::Large, true), competitor(CompanySize::Small, true)];
        assert_eq!(fragmentation(&mixed), Level::Medium);

        let scattered = vec![competitor(CompanySize::Startup, true), competitor(CompanySize::Small, true)];
        assert_eq!(fragmentation(&scattered), Level::High);
    }

    #[test]
    fn test_intensity_caps_direct_rivals() {
        let rivals: Vec<_> = (0..10).map(|_| competitor(CompanySize::Medium, true)).collect();
        assert_eq!(competitive_intensity(&rivals, &MarketData::default()), 8.0);

        let slow = MarketData {
            growth_rate: Some(1.0),
            ..Default::default()
        };
        assert_eq!(competitive_intensity(&rivals, &slow), 9.0);

        let fast = MarketData {
            growth_rate: Some(20.0),
            ..Default::default()
        };
        assert_eq!(competitive_intensity(&[], &fast), 4.0);
    }
}
