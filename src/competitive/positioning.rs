//! Price/quality positioning map, whitespace detection, and repositioning.

use super::types::*;

const NEUTRAL: f64 = 5.0;
/// A quadrant with at most this many competitors counts as open.
const OPEN_QUADRANT: usize = 1;

/// Price level on the 1-10 grid from an average price point.
pub fn price_level(average_price: f64) -> f64 {
    match average_price {
        p if p < 50.0 => 2.0,
        p if p < 100.0 => 4.0,
        p if p < 500.0 => 6.0,
        p if p < 1000.0 => 8.0,
        _ => 10.0,
    }
}

fn size_price_level(size: CompanySize) -> f64 {
    match size {
        CompanySize::Startup => 4.0,
        CompanySize::Small => 5.0,
        CompanySize::Medium => 6.0,
        CompanySize::Large => 7.0,
        CompanySize::Enterprise => 8.0,
    }
}

fn quality_level(products: usize) -> f64 {
    (products as f64 * 2.0).min(10.0)
}

/// Maps 0-10 levels onto the `[-1, 1]` grid axes.
fn axis(level: f64) -> f64 {
    (level - NEUTRAL) / NEUTRAL
}

pub fn quadrant(x: f64, y: f64) -> Quadrant {
    match (x >= 0.0, y >= 0.0) {
        (true, true) => Quadrant::HighPriceHighQuality,
        (false, true) => Quadrant::LowPriceHighQuality,
        (false, false) => Quadrant::LowPriceLowQuality,
        (true, false) => Quadrant::HighPriceLowQuality,
    }
}

/// Number of axes on which two grid quadrants differ.
fn distance(from: Quadrant, to: Quadrant) -> usize {
    let axes = |q: Quadrant| match q {
        Quadrant::HighPriceHighQuality => Some((true, true)),
        Quadrant::LowPriceHighQuality => Some((false, true)),
        Quadrant::LowPriceLowQuality => Some((false, false)),
        Quadrant::HighPriceLowQuality => Some((true, false)),
        Quadrant::Balanced => None,
    };
    match (axes(from), axes(to)) {
        (Some(a), Some(b)) => usize::from(a.0 != b.0) + usize::from(a.1 != b.1),
        _ => 1,
    }
}

fn attractiveness(area: Quadrant) -> f64 {
    match area {
        Quadrant::HighPriceHighQuality => 0.9,
        Quadrant::LowPriceHighQuality => 0.8,
        Quadrant::LowPriceLowQuality => 0.3,
        Quadrant::HighPriceLowQuality => 0.1,
        Quadrant::Balanced => 0.5,
    }
}

pub fn current_position(company: &CompanyData) -> CurrentPosition {
    let price = company.pricing.map(price_level).unwrap_or(NEUTRAL);
    let x = axis(price);
    let y = axis(quality_level(company.products.len()));
    let quadrant = quadrant(x, y);
    CurrentPosition {
        x,
        y,
        quadrant,
        description: quadrant.description().to_string(),
    }
}

pub fn competitor_positions(request: &CompetitiveAnalysisRequest) -> Vec<CompetitorPosition> {
    request
        .analysis_scope
        .competitors
        .iter()
        .map(|competitor| {
            let data = request.data_for(&competitor.id);
            let quality = data
                .map(|d| quality_level(d.products.len()))
                .unwrap_or(NEUTRAL);
            let price = data
                .and_then(CompetitorData::average_price)
                .map(price_level)
                .unwrap_or_else(|| size_price_level(competitor.size));
            let (x, y) = (axis(price), axis(quality));
            CompetitorPosition {
                competitor_id: competitor.id.clone(),
                x,
                y,
                quadrant: quadrant(x, y),
            }
        })
        .collect()
}

fn occupancy(positions: &[CompetitorPosition], area: Quadrant) -> usize {
    positions.iter().filter(|p| p.quadrant == area).count()
}

pub fn whitespaces(current: &CurrentPosition, positions: &[CompetitorPosition]) -> Vec<Whitespace> {
    Quadrant::GRID
        .iter()
        .filter_map(|&area| {
            let occupied = occupancy(positions, area);
            (occupied <= OPEN_QUADRANT && area != current.quadrant).then(|| Whitespace {
                area,
                size: if occupied == 0 {
                    WhitespaceSize::Large
                } else {
                    WhitespaceSize::Medium
                },
                attractiveness: attractiveness(area),
                accessibility: if distance(current.quadrant, area) <= 1 {
                    Level::High
                } else {
                    Level::Medium
                },
            })
        })
        .collect()
}

pub fn repositioning_opportunities(
    current: &CurrentPosition,
    positions: &[CompetitorPosition],
) -> Vec<RepositioningOption> {
    let mut options = Vec::new();
    let open = |area: Quadrant| occupancy(positions, area) <= OPEN_QUADRANT && current.quadrant != area;

    if open(Quadrant::HighPriceHighQuality) {
        options.push(RepositioningOption {
            direction: "Move to premium positioning".to_string(),
            rationale: "Low competition in high-value segment".to_string(),
            effort: Level::High,
            expected_impact: "Increased margins and brand positioning".to_string(),
        });
    }
    if open(Quadrant::LowPriceHighQuality) {
        options.push(RepositioningOption {
            direction: "Optimize for value leadership".to_string(),
            rationale: "Opportunity to dominate value segment".to_string(),
            effort: Level::Medium,
            expected_impact: "Market share growth and competitive advantage".to_string(),
        });
    }
    options
}
