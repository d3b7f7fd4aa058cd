//! Eight-dimension scoring grid, rankings, and gaps against our own scores.

use super::profiles::market_share;
use super::types::*;
use crate::core::clamp_range;
use crate::metrics::mean_by;

/// Gap above which a dimension is reported as an opportunity.
const GAP_THRESHOLD: f64 = 2.0;
const NEUTRAL_SCORE: f64 = 5.0;

fn portfolio_score(products: usize) -> f64 {
    (products as f64 * 2.0).min(10.0)
}

fn financial_score(revenue: Option<f64>) -> Option<f64> {
    revenue.filter(|r| *r > 0.0).map(|r| r.log10().min(10.0))
}

/// Cheaper offerings score higher on the pricing dimension.
fn pricing_score(average_price: f64) -> f64 {
    match average_price {
        p if p < 50.0 => 9.0,
        p if p < 100.0 => 7.0,
        p if p < 500.0 => 5.0,
        p if p < 1000.0 => 3.0,
        _ => 2.0,
    }
}

pub fn dimension_score(
    dimension: Dimension,
    competitor: &Competitor,
    data: Option<&CompetitorData>,
) -> f64 {
    let size = competitor.size;
    let raw = match dimension {
        Dimension::MarketShare => market_share(competitor, data) / 10.0,
        Dimension::ProductQuality => data
            .map(|d| portfolio_score(d.products.len()))
            .unwrap_or(NEUTRAL_SCORE),
        Dimension::Pricing => data
            .and_then(CompetitorData::average_price)
            .map(pricing_score)
            .unwrap_or(NEUTRAL_SCORE),
        Dimension::Innovation => match size {
            CompanySize::Startup => 8.0,
            CompanySize::Enterprise => 7.0,
            _ => NEUTRAL_SCORE,
        },
        Dimension::CustomerService => {
            if size.is_large() {
                7.0
            } else {
                NEUTRAL_SCORE
            }
        }
        Dimension::BrandStrength => match size {
            CompanySize::Startup => 2.0,
            CompanySize::Small => 3.0,
            CompanySize::Medium => 5.0,
            CompanySize::Large => 7.0,
            CompanySize::Enterprise => 9.0,
        },
        Dimension::Distribution => match size {
            CompanySize::Enterprise => 9.0,
            CompanySize::Large => 7.0,
            _ => 4.0,
        },
        Dimension::FinancialStrength => {
            financial_score(data.and_then(|d| d.revenue)).unwrap_or(NEUTRAL_SCORE)
        }
    };
    clamp_range(raw, 1.0, 10.0)
}

/// Our own standing; neutral except where company data says otherwise.
pub fn own_score(dimension: Dimension, company: &CompanyData) -> f64 {
    match dimension {
        Dimension::FinancialStrength => financial_score(company.revenue).unwrap_or(NEUTRAL_SCORE),
        Dimension::ProductQuality => portfolio_score(company.products.len()),
        _ => NEUTRAL_SCORE,
    }
}

fn rankings(scores: &[CompetitorScores]) -> Vec<Ranking> {
    let mut ranked: Vec<(String, f64)> = scores
        .iter()
        .map(|s| (s.competitor_id.clone(), mean_by(&s.scores, |d| d.score)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
        .into_iter()
        .enumerate()
        .map(|(index, (competitor_id, score))| Ranking {
            competitor_id,
            score,
            rank: index + 1,
        })
        .collect()
}

fn gaps(scores: &[CompetitorScores], company: &CompanyData) -> Vec<CompetitiveGap> {
    Dimension::ALL
        .iter()
        .filter_map(|&dimension| {
            let best = scores
                .iter()
                .flat_map(|s| s.scores.iter())
                .filter(|d| d.dimension == dimension)
                .map(|d| d.score)
                .reduce(f64::max)?;
            let gap = best - own_score(dimension, company);
            (gap > GAP_THRESHOLD).then(|| CompetitiveGap {
                dimension,
                gap,
                opportunity: format!(
                    "Improve {} to close competitive gap",
                    dimension.label().to_lowercase()
                ),
            })
        })
        .collect()
}

pub fn build_matrix(request: &CompetitiveAnalysisRequest) -> CompetitiveMatrix {
    let scores: Vec<CompetitorScores> = request
        .analysis_scope
        .competitors
        .iter()
        .map(|competitor| {
            let data = request.data_for(&competitor.id);
            CompetitorScores {
                competitor_id: competitor.id.clone(),
                scores: Dimension::ALL
                    .iter()
                    .map(|&dimension| DimensionScore {
                        dimension,
                        score: dimension_score(dimension, competitor, data),
                    })
                    .collect(),
            }
        })
        .collect();

    CompetitiveMatrix {
        dimensions: Dimension::ALL.to_vec(),
        rankings: rankings(&scores),
        gaps: gaps(&scores, &request.data.company),
        scores,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn competitor(id: &str, size: CompanySize) -> Competitor {
        Competitor {
            id: id.into(),
            name: id.to_uppercase(),
            domain: None,
            industry: "saas".into(),
            size,
            is_direct_competitor: false,
        }
    }

    fn priced(prices: &[f64]) -> CompetitorData {
        CompetitorData {
            pricing: prices
                .iter()
                .map(|&price| PricePoint {
                    product: "core".into(),
                    price,
                    model: "subscription".into(),
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_scores_stay_within_scale() {
        let tiny = competitor("tiny", CompanySize::Startup);
        let empty = CompetitorData::default();
        // No products on file scores zero before clamping.
        assert_eq!(dimension_score(Dimension::ProductQuality, &tiny, Some(&empty)), 1.0);
        assert_eq!(dimension_score(Dimension::MarketShare, &tiny, None), 1.0);
        let huge = CompetitorData {
            revenue: Some(1e15),
            ..Default::default()
        };
        assert_eq!(dimension_score(Dimension::FinancialStrength, &tiny, Some(&huge)), 10.0);
    }

    #[test]
    fn test_pricing_dimension_rewards_low_prices() {
        let rival = competitor("rival", CompanySize::Medium);
        assert_eq!(dimension_score(Dimension::Pricing, &rival, Some(&priced(&[20.0, 40.0]))), 9.0);
        assert_eq!(dimension_score(Dimension::Pricing, &rival, Some(&priced(&[2000.0]))), 2.0);
        assert_eq!(dimension_score(Dimension::Pricing, &rival, None), 5.0);
    }

    #[test]
    fn test_rankings_order_by_mean_score() {
        let scores = vec![
            CompetitorScores {
                competitor_id: "weak".into(),
                scores: vec![DimensionScore {
                    dimension: Dimension::Pricing,
                    score: 3.0,
                }],
            },
            CompetitorScores {
                competitor_id: "strong".into(),
                scores: vec![DimensionScore {
                    dimension: Dimension::Pricing,
                    score: 8.0,
                }],
            },
        ];
        let ranked = rankings(&scores);
        assert_eq!(ranked[0].competitor_id, "strong");
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].rank, 2);
    }

    #[test]
    fn test_gaps_report_only_wide_margins() {
        let enterprise = competitor("big", CompanySize::Enterprise);
        let scores = vec![CompetitorScores {
            competitor_id: enterprise.id.clone(),
            scores: Dimension::ALL
                .iter()
                .map(|&dimension| DimensionScore {
                    dimension,
                    score: dimension_score(dimension, &enterprise, None),
                })
                .collect(),
        }];
        let company = CompanyData {
            products: vec!["a".into(), "b".into(), "c".into()],
            ..Default::default()
        };
        let found: Vec<_> = gaps(&scores, &company).iter().map(|g| g.dimension).collect();
        // Share 3.5, innovation 7, service 7: none clear the gap threshold.
        assert_eq!(found, vec![Dimension::BrandStrength, Dimension::Distribution]);
        assert_eq!(
            gaps(&scores, &company)[0].opportunity,
            "Improve brand strength to close competitive gap"
        );
    }
}
