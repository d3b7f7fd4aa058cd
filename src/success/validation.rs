//! Request and result contracts for success-probability estimation.

use super::types::*;
use crate::contract::{FieldPath, Validate, ValidationError, Violations};
use std::collections::HashSet;

const MIN_CONFIDENCE_LEVEL: f64 = 0.5;
const MAX_CONFIDENCE_LEVEL: f64 = 0.99;
const MAX_LEVERAGE: f64 = 5.0;
const MIN_HISTORICAL_ADJUSTMENT: f64 = 0.7;
const MAX_HISTORICAL_ADJUSTMENT: f64 = 1.3;

impl Validate for SuccessProbabilityRequest {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.nested(path, "analysis_scope", &self.analysis_scope);
        out.each(path, "initiatives", &self.initiatives);
        out.nested(path, "market_context", &self.market_context);
        out.nested(path, "organizational_context", &self.organizational_context);
        out.nested(path, "historical_data", &self.historical_data);

        let mut seen = HashSet::new();
        for (index, initiative) in self.initiatives.iter().enumerate() {
            if !seen.insert(initiative.id.as_str()) {
                out.push(
                    ValidationError::at_field(
                        &path.push_index("initiatives", index).push("id"),
                        "duplicate initiative id",
                    )
                    .with_context("unique id", initiative.id.clone()),
                );
            }
        }
    }
}

impl Validate for AnalysisScope {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.within(
            path,
            "confidence_level",
            self.confidence_level,
            MIN_CONFIDENCE_LEVEL,
            MAX_CONFIDENCE_LEVEL,
        );
    }
}

impl Validate for Initiative {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.non_blank(path, "id", &self.id);
        out.non_blank(path, "name", &self.name);
        out.each(path, "objectives", &self.objectives);
        out.nested(path, "resources", &self.resources);
        out.each(path, "risk_factors", &self.risk_factors);
        out.each(path, "enablers", &self.enablers);
        for (index, assumption) in self.assumptions.iter().enumerate() {
            out.unit(&path.push_index("assumptions", index), "validity", assumption.validity);
        }
    }
}

impl Validate for Objective {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.non_blank(path, "id", &self.id);
        for (index, criterion) in self.success_criteria.iter().enumerate() {
            let at = path.push_index("success_criteria", index);
            out.unit(&at, "weight", criterion.weight);
            out.finite(&at, "target", criterion.target);
            let threshold = at.push("threshold");
            out.finite(&threshold, "minimum", criterion.threshold.minimum);
            out.finite(&threshold, "expected", criterion.threshold.expected);
            out.finite(&threshold, "stretch", criterion.threshold.stretch);
        }
        for (index, dependency) in self.dependencies.iter().enumerate() {
            out.unit(&path.push_index("dependencies", index), "probability", dependency.probability);
        }
    }
}

impl Validate for InitiativeResources {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        let budget = path.push("budget");
        out.non_negative(&budget, "allocated", self.budget.allocated);
        out.finite(&budget, "required", self.budget.required);
        out.unit(&budget, "confidence", self.budget.confidence);

        let team = path.push("team");
        out.non_negative(&team, "size", self.team.size);
        out.unit(&team, "availability", self.team.availability);
        out.unit(&team, "skill_match", self.team.skill_match);

        let timeline = path.push("timeline");
        out.non_negative(&timeline, "duration", self.timeline.duration);
        out.unit(&timeline, "buffer_time", self.timeline.buffer_time);
        out.non_negative(&timeline, "milestones", self.timeline.milestones);
    }
}

impl Validate for InitiativeRisk {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.non_blank(path, "id", &self.id);
        out.unit(path, "probability", self.probability);
        let mitigation = path.push("mitigation");
        out.unit(&mitigation, "effectiveness", self.mitigation.effectiveness);
        out.non_negative(&mitigation, "cost", self.mitigation.cost);
    }
}

impl Validate for Enabler {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.unit(path, "availability", self.availability);
        out.within(path, "leverage", self.leverage, 0.0, MAX_LEVERAGE);
    }
}

impl Validate for MarketContext {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.finite(&path.push("industry"), "growth", self.industry.growth);
    }
}

impl Validate for OrganizationalContext {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        let record = path.push("track_record");
        let track = &self.track_record;
        for (field, value) in [
            ("success_rate", track.success_rate),
            ("on_time_delivery", track.on_time_delivery),
            ("budget_adherence", track.budget_adherence),
            ("quality_achievement", track.quality_achievement),
            ("stakeholder_satisfaction", track.stakeholder_satisfaction),
        ] {
            out.unit(&record, field, value);
        }
    }
}

impl Validate for HistoricalOutcomes {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        for (index, similar) in self.similar_initiatives.iter().enumerate() {
            out.unit(
                &path.push_index("similar_initiatives", index),
                "similarity",
                similar.similarity,
            );
        }
        for (index, benchmark) in self.industry_benchmarks.iter().enumerate() {
            let at = path.push_index("industry_benchmarks", index);
            out.finite(&at, "industry_average", benchmark.industry_average);
            out.finite(&at, "top_quartile", benchmark.top_quartile);
            out.finite(&at, "organization_value", benchmark.organization_value);
        }
        for (index, cycle) in self.economic_cycles.iter().enumerate() {
            let at = path.push_index("economic_cycles", index);
            out.finite(&at, "impact", cycle.impact);
            out.non_negative(&at, "duration", cycle.duration);
            out.non_negative(&at, "recovery_time", cycle.recovery_time);
        }
    }
}

// =============================================================================
// Result contract
// =============================================================================

impl Validate for SuccessProbabilityResult {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        let overall = path.push("overall_probability");
        out.unit(&overall, "success", self.overall_probability.success);
        out.unit(&overall, "confidence", self.overall_probability.confidence);
        out.non_blank(&overall, "methodology", &self.overall_probability.methodology);

        let components = path.push("component_scores");
        out.unit(&components, "organizational", self.component_scores.organizational);
        out.unit(&components, "market", self.component_scores.market);
        out.unit(&components, "initiative", self.component_scores.initiative);
        out.within(
            &components,
            "historical_adjustment",
            self.component_scores.historical_adjustment,
            MIN_HISTORICAL_ADJUSTMENT,
            MAX_HISTORICAL_ADJUSTMENT,
        );

        out.each(path, "initiative_probabilities", &self.initiative_probabilities);
        out.nested(path, "scenario_probabilities", &self.scenario_probabilities);
        out.require(
            self.scenario_probabilities.tail.is_some(),
            &path.push("scenario_probabilities"),
            "tail",
            "black swan scenario is missing",
        );
    }
}

impl Validate for InitiativeProbability {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.non_blank(path, "initiative_id", &self.initiative_id);
        for (field, value) in [
            ("probability", self.probability),
            ("score", self.score),
            ("resource_adequacy", self.resource_adequacy),
            ("risk_mitigation", self.risk_mitigation),
            ("stakeholder_support", self.stakeholder_support),
            ("enabler_strength", self.enabler_strength),
        ] {
            out.unit(path, field, value);
        }
    }
}

impl Validate for SuccessScenario {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.non_blank(path, "description", &self.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::success::fallback_result;

    #[test]
    fn test_fallback_satisfies_result_contract() {
        assert!(fallback_result().violations().is_empty());
    }

    #[test]
    fn test_missing_black_swan_is_a_violation() {
        let mut result = fallback_result();
        result.scenario_probabilities.tail = None;
        let fields: Vec<String> = result
            .violations()
            .iter()
            .map(|e| e.field.as_string())
            .collect();
        assert_eq!(fields, vec!["scenario_probabilities.tail"]);
    }

    #[test]
    fn test_historical_adjustment_bounds() {
        let mut result = fallback_result();
        result.component_scores.historical_adjustment = 1.4;
        let errors = result.violations();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].field.as_string(),
            "component_scores.historical_adjustment"
        );
    }
}
