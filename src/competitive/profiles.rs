//! Per-competitor profile: position, share, strengths, strategy, threat.

use super::types::*;
use crate::core::ImpactTier;
use crate::metrics::{severity_from_score, Ladder};

const LARGE_REVENUE: f64 = 1_000_000_000.0;
const MAX_ESTIMATED_SHARE: f64 = 50.0;

/// Integer threat points: `>= 5` critical, `>= 3` high, `>= 1` medium.
const THREAT_LEVELS: Ladder<ImpactTier> = Ladder::new(
    ImpactTier::Low,
    &[
        (0.0, ImpactTier::Medium),
        (2.0, ImpactTier::High),
        (4.0, ImpactTier::Critical),
    ],
);

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn market_position(competitor: &Competitor, data: Option<&CompetitorData>) -> MarketPosition {
    let share = data.and_then(|d| d.market_share).unwrap_or(0.0);
    match competitor.size {
        _ if share > 30.0 => MarketPosition::Leader,
        CompanySize::Enterprise => MarketPosition::Leader,
        _ if share > 15.0 => MarketPosition::Challenger,
        CompanySize::Large => MarketPosition::Challenger,
        _ if share > 5.0 => MarketPosition::Follower,
        CompanySize::Medium => MarketPosition::Follower,
        _ => MarketPosition::Niche,
    }
}

/// Share in percent implied by company size, boosted for direct rivals.
pub fn estimate_market_share(competitor: &Competitor) -> f64 {
    let base: f64 = match competitor.size {
        CompanySize::Startup => 0.5,
        CompanySize::Small => 2.0,
        CompanySize::Medium => 8.0,
        CompanySize::Large => 20.0,
        CompanySize::Enterprise => 35.0,
    };
    let bonus = if competitor.is_direct_competitor { 1.5 } else { 1.0 };
    (base * bonus).min(MAX_ESTIMATED_SHARE)
}

pub fn market_share(competitor: &Competitor, data: Option<&CompetitorData>) -> f64 {
    data.and_then(|d| d.market_share)
        .unwrap_or_else(|| estimate_market_share(competitor))
}

pub fn strengths(competitor: &Competitor, data: Option<&CompetitorData>) -> Vec<String> {
    let mut strengths = Vec::new();
    if competitor.size.is_large() {
        strengths.push("Market leadership and brand recognition".to_string());
        strengths.push("Significant resources and scale".to_string());
    }
    if let Some(data) = data {
        if data.revenue.is_some_and(|r| r > LARGE_REVENUE) {
            strengths.push("Strong financial position".to_string());
        }
        if data.products.len() > 5 {
            strengths.push("Diverse product portfolio".to_string());
        }
    }
    if strengths.is_empty() {
        return strings(&["Market presence", "Product offering"]);
    }
    strengths
}

pub fn weaknesses(competitor: &Competitor, data: Option<&CompetitorData>) -> Vec<String> {
    let mut weaknesses = Vec::new();
    if competitor.size.is_small() {
        weaknesses.push("Limited resources and scale".to_string());
        weaknesses.push("Brand recognition challenges".to_string());
    }
    if data.is_some_and(|d| d.products.len() < 2) {
        weaknesses.push("Limited product portfolio".to_string());
    }
    if weaknesses.is_empty() {
        return strings(&["Resource constraints", "Market position"]);
    }
    weaknesses
}

pub fn strategy(size: CompanySize) -> &'static str {
    match size {
        CompanySize::Enterprise => "Market domination and expansion",
        CompanySize::Large => "Competitive differentiation and growth",
        CompanySize::Medium => "Market share expansion",
        CompanySize::Startup => "Disruptive innovation and niche focus",
        CompanySize::Small => "Market participation and stability",
    }
}

pub fn threat_level(
    competitor: &Competitor,
    data: Option<&CompetitorData>,
    company: &CompanyData,
) -> ImpactTier {
    let mut points = 0u32;
    if competitor.is_direct_competitor {
        points += 2;
    }
    if competitor.size.is_large() {
        points += 2;
    }
    if data.and_then(|d| d.market_share).is_some_and(|s| s > 20.0) {
        points += 1;
    }
    if let (Some(theirs), Some(ours)) = (data.and_then(|d| d.revenue), company.revenue) {
        if theirs > ours {
            points += 1;
        }
    }
    severity_from_score(f64::from(points), &THREAT_LEVELS)
}

/// Confidence grows with the amount of supplementary data on file.
pub fn confidence(data: Option<&CompetitorData>) -> f64 {
    let Some(data) = data else {
        return 0.5;
    };
    let mut confidence = 0.5;
    if data.revenue.is_some() {
        confidence += 0.15;
    }
    if data.market_share.is_some() {
        confidence += 0.15;
    }
    if data.employees.is_some() {
        confidence += 0.1;
    }
    if !data.products.is_empty() {
        confidence += 0.1;
    }
    f64::min(confidence, 1.0)
}

pub fn build_profiles(request: &CompetitiveAnalysisRequest) -> Vec<CompetitorProfile> {
    request
        .analysis_scope
        .competitors
        .iter()
        .map(|competitor| {
            let data = request.data_for(&competitor.id);
            CompetitorProfile {
                id: competitor.id.clone(),
                name: competitor.name.clone(),
                market_position: market_position(competitor, data),
                market_share: market_share(competitor, data),
                strengths: strengths(competitor, data),
                weaknesses: weaknesses(competitor, data),
                strategy: strategy(competitor.size).to_string(),
                threat_level: threat_level(competitor, data, &request.data.company),
                confidence: confidence(data),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn competitor(size: CompanySize, direct: bool) -> Competitor {
        Competitor {
            id: "rival".into(),
            name: "Rival".into(),
            domain: None,
            industry: "saas".into(),
            size,
            is_direct_competitor: direct,
        }
    }

    fn data(revenue: Option<f64>, share: Option<f64>, products: usize) -> CompetitorData {
        CompetitorData {
            revenue,
            employees: None,
            market_share: share,
            products: (0..products).map(|i| format!("product-{i}")).collect(),
            pricing: vec![],
        }
    }

    #[test]
    fn test_market_position_prefers_share_then_size() {
        let small = competitor(CompanySize::Small, false);
        assert_eq!(market_position(&small, None), MarketPosition::Niche);
        let leader = data(None, Some(35.0), 1);
        assert_eq!(market_position(&small, Some(&leader)), MarketPosition::Leader);
        let enterprise = competitor(CompanySize::Enterprise, false);
        assert_eq!(market_position(&enterprise, None), MarketPosition::Leader);
        let medium = competitor(CompanySize::Medium, false);
        assert_eq!(market_position(&medium, None), MarketPosition::Follower);
    }

    #[test]
    fn test_estimated_share_is_capped() {
        assert_eq!(estimate_market_share(&competitor(CompanySize::Enterprise, true)), 50.0);
        assert_eq!(estimate_market_share(&competitor(CompanySize::Medium, true)), 12.0);
        assert_eq!(estimate_market_share(&competitor(CompanySize::Startup, false)), 0.5);
    }

    #[test]
    fn test_threat_points() {
        let company = CompanyData {
            revenue: Some(5_000_000.0),
            ..Default::default()
        };
        let rich = data(Some(2_000_000_000.0), Some(25.0), 8);
        // direct (+2), large (+2), share (+1), out-earns us (+1)
        let giant = competitor(CompanySize::Enterprise, true);
        assert_eq!(threat_level(&giant, Some(&rich), &company), ImpactTier::Critical);

        let direct_startup = competitor(CompanySize::Startup, true);
        assert_eq!(threat_level(&direct_startup, None, &company), ImpactTier::Medium);

        let bystander = competitor(CompanySize::Small, false);
        assert_eq!(threat_level(&bystander, None, &company), ImpactTier::Low);
    }

    #[test]
    fn test_strengths_and_weaknesses_defaults() {
        let medium = competitor(CompanySize::Medium, false);
        assert_eq!(strengths(&medium, None), vec!["Market presence", "Product offering"]);
        assert_eq!(weaknesses(&medium, None), vec!["Resource constraints", "Market position"]);

        let thin = data(None, None, 1);
        assert_eq!(weaknesses(&medium, Some(&thin)), vec!["Limited product portfolio"]);
    }

    #[test]
    fn test_confidence_accumulates() {
        assert_eq!(confidence(None), 0.5);
        let full = CompetitorData {
            employees: Some(200.0),
            ..data(Some(1.0), Some(3.0), 2)
        };
        assert!((confidence(Some(&full)) - 1.0).abs() < 1e-12);
    }
}
