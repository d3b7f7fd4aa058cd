use super::types::*;
use crate::contract::{FieldPath, Validate, ValidationError, Violations};
use std::collections::HashSet;

const MAX_SHARE: f64 = 100.0;

impl Validate for CompetitiveAnalysisRequest {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.non_blank(path, "company_id", &self.company_id);
        out.nested(path, "analysis_scope", &self.analysis_scope);
        out.nested(path, "data", &self.data);
        out.unit(
            &path.push("analysis_settings"),
            "confidence_threshold",
            self.analysis_settings.confidence_threshold,
        );
    }
}

impl Validate for AnalysisScope {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.each(path, "competitors", &self.competitors);
        let mut seen = HashSet::new();
        for (index, competitor) in self.competitors.iter().enumerate() {
            if !seen.insert(competitor.id.as_str()) {
                out.push(
                    ValidationError::at_field(
                        &path.push_index("competitors", index).push("id"),
                        "duplicate id",
                    )
                    .with_context("unique id", competitor.id.as_str()),
                );
            }
        }
    }
}

impl Validate for Competitor {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.non_blank(path, "id", &self.id);
        out.non_blank(path, "name", &self.name);
    }
}

fn optional_non_negative(path: &FieldPath, field: &str, value: Option<f64>, out: &mut Violations) {
    if let Some(value) = value {
        out.non_negative(path, field, value);
    }
}

impl Validate for CompetitiveData {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        let market = path.push("market");
        optional_non_negative(&market, "market_size", self.market.market_size, out);
        if let Some(growth) = self.market.growth_rate {
            out.finite(&market, "growth_rate", growth);
        }

        let company = path.push("company");
        optional_non_negative(&company, "revenue", self.company.revenue, out);
        optional_non_negative(&company, "employees", self.company.employees, out);
        optional_non_negative(&company, "funding", self.company.funding, out);
        optional_non_negative(&company, "pricing", self.company.pricing, out);

        let competitors = path.push("competitors");
        for (id, data) in &self.competitors {
            out.nested(&competitors, id, data);
        }
    }
}

impl Validate for CompetitorData {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        optional_non_negative(path, "revenue", self.revenue, out);
        optional_non_negative(path, "employees", self.employees, out);
        if let Some(share) = self.market_share {
            out.within(path, "market_share", share, 0.0, MAX_SHARE);
        }
        for (index, point) in self.pricing.iter().enumerate() {
            out.non_negative(&path.push_index("pricing", index), "price", point.price);
        }
    }
}

// =============================================================================
// Result contract
// =============================================================================

impl Validate for CompetitiveAnalysisResult {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.nested(path, "competitive_analysis", &self.competitive_analysis);
        out.nested(path, "swot_analysis", &self.swot_analysis);
        out.nested(path, "positioning_analysis", &self.positioning_analysis);
        out.nested(path, "pricing_intelligence", &self.pricing_intelligence);
        out.nested(path, "recommendations", &self.recommendations);
    }
}

impl Validate for CompetitiveAnalysis {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        let overview = path.push("market_overview");
        out.non_negative(&overview, "total_market_size", self.market_overview.total_market_size);
        out.finite(&overview, "growth_rate", self.market_overview.growth_rate);
        out.within(
            &overview,
            "competitive_intensity",
            self.market_overview.competitive_intensity,
            1.0,
            10.0,
        );

        for (index, profile) in self.competitor_profiles.iter().enumerate() {
            let at = path.push_index("competitor_profiles", index);
            out.within(&at, "market_share", profile.market_share, 0.0, MAX_SHARE);
            out.unit(&at, "confidence", profile.confidence);
        }

        let matrix = path.push("competitive_matrix");
        for (index, row) in self.competitive_matrix.scores.iter().enumerate() {
            let at = matrix.push_index("scores", index);
            for (position, cell) in row.scores.iter().enumerate() {
                out.within(&at.push_index("scores", position), "score", cell.score, 1.0, 10.0);
            }
        }
        for (index, ranking) in self.competitive_matrix.rankings.iter().enumerate() {
            let at = matrix.push_index("rankings", index);
            out.within(&at, "score", ranking.score, 1.0, 10.0);
            out.require(ranking.rank == index + 1, &at, "rank", "rank must follow list order");
        }
        for (index, gap) in self.competitive_matrix.gaps.iter().enumerate() {
            out.non_negative(&matrix.push_index("gaps", index), "gap", gap.gap);
        }
    }
}

impl Validate for SwotAnalysis {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        for (index, strength) in self.strengths.iter().enumerate() {
            out.unit(&path.push_index("strengths", index), "uniqueness", strength.uniqueness);
        }
        for (index, threat) in self.threats.iter().enumerate() {
            out.unit(&path.push_index("threats", index), "probability", threat.probability);
        }
    }
}

impl Validate for PositioningAnalysis {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        let current = path.push("current_position");
        out.within(&current, "x", self.current_position.x, -1.0, 1.0);
        out.within(&current, "y", self.current_position.y, -1.0, 1.0);
        for (index, position) in self.competitor_positions.iter().enumerate() {
            let at = path.push_index("competitor_positions", index);
            out.within(&at, "x", position.x, -1.0, 1.0);
            out.within(&at, "y", position.y, -1.0, 1.0);
        }
        for (index, space) in self.whitespaces.iter().enumerate() {
            out.unit(&path.push_index("whitespaces", index), "attractiveness", space.attractiveness);
        }
    }
}

impl Validate for PricingIntelligence {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        for (index, pricing) in self.pricing_strategies.iter().enumerate() {
            let at = path.push_index("pricing_strategies", index);
            out.non_negative(&at, "average_price", pricing.average_price);
            out.require(
                pricing.price_range.min <= pricing.price_range.max,
                &at,
                "price_range",
                "min must not exceed max",
            );
        }
        out.unit(
            &path.push("price_comparison"),
            "price_optimization_opportunity",
            self.price_comparison.price_optimization_opportunity,
        );
        out.each(path, "pricing_recommendations", &self.pricing_recommendations);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::competitive::fallback_result;

    fn competitor(id: &str) -> Competitor {
        Competitor {
            id: id.into(),
            name: "Rival".into(),
            domain: None,
            industry: "saas".into(),
            size: CompanySize::Medium,
            is_direct_competitor: true,
        }
    }

    #[test]
    fn test_fallback_satisfies_result_contract() {
        assert!(fallback_result().violations().is_empty());
    }

    #[test]
    fn test_request_violations_are_located() {
        let mut data = CompetitiveData::default();
        data.competitors.insert(
            "r1".into(),
            CompetitorData {
                market_share: Some(140.0),
                ..Default::default()
            },
        );
        let request = CompetitiveAnalysisRequest {
            company_id: "acme".into(),
            analysis_scope: AnalysisScope {
                competitors: vec![competitor("r1"), competitor("r1")],
                industry_focus: vec![],
                geographic_scope: vec![],
                timeframe: crate::core::TimeHorizon::SixMonths,
                analysis_depth: AnalysisDepth::Basic,
            },
            data,
            analysis_settings: AnalysisSettings {
                confidence_threshold: 1.5,
                ..Default::default()
            },
        };
        let fields: Vec<String> = request
            .violations()
            .iter()
            .map(|e| e.field.as_string())
            .collect();
        assert_eq!(
            fields,
            vec![
                "analysis_scope.competitors[1].id",
                "data.competitors.r1.market_share",
                "analysis_settings.confidence_threshold",
            ]
        );
    }

    #[test]
    fn test_inverted_price_range_is_reported() {
        let mut result = fallback_result();
        result.pricing_intelligence.pricing_strategies.push(CompetitorPricing {
            competitor_id: "r1".into(),
            strategy: PricingStrategyKind::Value,
            average_price: 200.0,
            price_range: PriceRange { min: 300.0, max: 100.0 },
            pricing_model: "subscription".into(),
        });
        assert_eq!(result.violations().len(), 1);
    }
}
