//! Request and result contracts for risk assessment.

use super::types::*;
use crate::contract::{FieldPath, Validate, ValidationError, Violations};
use std::collections::HashSet;

const RISK_SCALE_MAX: f64 = 10.0;

impl Validate for RiskAssessmentRequest {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.nested(path, "assessment_scope", &self.assessment_scope);
        out.nested(path, "business_context", &self.business_context);
        out.each(path, "growth_initiatives", &self.growth_initiatives);
        out.nested(path, "historical_data", &self.historical_data);

        let mut seen = HashSet::new();
        for (index, initiative) in self.growth_initiatives.iter().enumerate() {
            if !seen.insert(initiative.id.as_str()) {
                out.push(
                    ValidationError::at_field(
                        &path.push_index("growth_initiatives", index).push("id"),
                        "duplicate initiative id",
                    )
                    .with_context("unique id", initiative.id.clone()),
                );
            }
        }
    }
}

impl Validate for AssessmentScope {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        let mut seen = HashSet::new();
        for (index, category) in self.risk_categories.iter().enumerate() {
            if !seen.insert(*category) {
                out.push(
                    ValidationError::at_field(
                        &path.push_index("risk_categories", index),
                        "category listed more than once",
                    )
                    .with_context("unique category", category.label()),
                );
            }
        }
    }
}

impl Validate for OrganizationContext {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.non_blank(path, "industry", &self.industry);
        let metrics = path.push("key_metrics");
        for (name, kpi) in &self.key_metrics {
            let at = metrics.push(name.as_str());
            out.finite(&at, "current", kpi.current);
            out.finite(&at, "target", kpi.target);
        }
    }
}

impl Validate for GrowthInitiative {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.non_blank(path, "id", &self.id);
        out.non_blank(path, "name", &self.name);
        out.non_negative(path, "investment", self.investment);
        out.finite(path, "expected_return", self.expected_return);
    }
}

impl Validate for HistoricalRiskData {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.each(path, "past_risks", &self.past_risks);
        out.each(path, "market_events", &self.market_events);
        for (index, record) in self.performance_history.iter().enumerate() {
            let at = path.push_index("performance_history", index).push("metrics");
            for (name, value) in &record.metrics {
                out.finite(&at, name, *value);
            }
        }
    }
}

impl Validate for PastRisk {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.finite(path, "impact", self.impact);
        out.unit(path, "probability", self.probability);
    }
}

impl Validate for MarketEvent {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.unit(path, "magnitude", self.magnitude);
    }
}

// =============================================================================
// Result contract
// =============================================================================

impl Validate for RiskAssessmentResult {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.nested(path, "risk_profile", &self.risk_profile);
        out.each(path, "identified_risks", &self.identified_risks);
        out.nested(path, "risk_scenarios", &self.risk_scenarios);
        out.nested(path, "mitigation_strategies", &self.mitigation_strategies);
        out.nested(path, "monitoring_framework", &self.monitoring_framework);
        out.nested(path, "recommendations", &self.recommendations);
    }
}

impl Validate for RiskProfile {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.within(path, "overall_risk_score", self.overall_risk_score, 0.0, RISK_SCALE_MAX);
        let distribution = path.push("risk_distribution");
        for (category, value) in &self.risk_distribution {
            out.within(&distribution, category.label(), *value, 0.0, RISK_SCALE_MAX);
        }
        for (index, trend) in self.risk_trends.iter().enumerate() {
            out.unit(&path.push_index("risk_trends", index), "confidence", trend.confidence);
        }
    }
}

impl Validate for IdentifiedRisk {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.non_blank(path, "id", &self.id);
        out.unit(path, "probability", self.probability);
        out.within(path, "risk_score", self.risk_score, 0.0, RISK_SCALE_MAX);

        let impact = path.push("impact");
        for (field, value) in [
            ("financial", self.impact.financial),
            ("operational", self.impact.operational),
            ("strategic", self.impact.strategic),
            ("reputational", self.impact.reputational),
        ] {
            out.within(&impact, field, value, 0.0, RISK_SCALE_MAX);
        }

        for (index, link) in self.interconnections.iter().enumerate() {
            out.unit(&path.push_index("interconnections", index), "strength", link.strength);
        }
    }
}

impl Validate for RiskScenario {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.non_blank(path, "name", &self.name);
        for (index, period) in self.impacts.timeline.iter().enumerate() {
            out.non_negative(
                &path.push("impacts").push_index("timeline", index),
                "cumulative_impact",
                period.cumulative_impact,
            );
        }
    }
}

impl Validate for MitigationStrategies {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        for (index, measure) in self.preventive_measures.iter().enumerate() {
            let at = path.push_index("preventive_measures", index);
            out.unit(&at, "effectiveness", measure.effectiveness);
            out.unit(&at, "residual_risk", measure.residual_risk);
            out.non_negative(&at.push("implementation"), "cost", measure.implementation.cost);
        }
        for (index, transfer) in self.transfer_mechanisms.iter().enumerate() {
            let at = path.push_index("transfer_mechanisms", index);
            out.unit(&at, "coverage", transfer.coverage);
            out.non_negative(&at, "cost", transfer.cost);
        }
    }
}

impl Validate for MonitoringFramework {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        let indicators = path.push("early_warning_system");
        for (index, indicator) in self.early_warning_system.indicators.iter().enumerate() {
            let at = indicators.push_index("indicators", index).push("threshold");
            out.finite(&at, "green", indicator.threshold.green);
            out.finite(&at, "yellow", indicator.threshold.yellow);
            out.finite(&at, "red", indicator.threshold.red);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TrendDirection;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn request() -> RiskAssessmentRequest {
        RiskAssessmentRequest {
            as_of: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            assessment_scope: AssessmentScope {
                risk_categories: vec![RiskCategory::Financial, RiskCategory::Market],
                time_horizon: RiskHorizon::MediumTerm,
                impact_areas: vec![],
                risk_tolerance: RiskTolerance::Medium,
            },
            business_context: OrganizationContext {
                industry: "retail".into(),
                business_model: "b2c".into(),
                growth_stage: GrowthStage::Growth,
                size: OrganizationSize::Small,
                geography: vec![],
                key_metrics: BTreeMap::from([(
                    "revenue".to_string(),
                    KpiSnapshot {
                        current: 1.0,
                        target: 2.0,
                        trend: TrendDirection::Improving,
                    },
                )]),
            },
            growth_initiatives: vec![],
            historical_data: HistoricalRiskData::default(),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(request().validate().is_success());
    }

    #[test]
    fn test_probability_out_of_range_is_reported_with_path() {
        let mut req = request();
        req.historical_data.past_risks.push(PastRisk {
            risk_type: "financial".into(),
            impact: 3.0,
            probability: 1.5,
            realized: true,
            mitigation: String::new(),
            lessons: String::new(),
        });
        let violations = req.violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].field.as_string(),
            "historical_data.past_risks[0].probability"
        );
    }

    #[test]
    fn test_duplicate_categories_and_blank_industry_accumulate() {
        let mut req = request();
        req.assessment_scope.risk_categories.push(RiskCategory::Financial);
        req.business_context.industry = "  ".into();
        assert_eq!(req.violations().len(), 2);
    }
}
