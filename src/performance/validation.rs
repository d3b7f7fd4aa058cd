use super::types::*;
use crate::contract::{FieldPath, Validate, ValidationError, Violations};
use std::collections::HashSet;

const MIN_SKILL_LEVEL: f64 = 1.0;
const MAX_SKILL_LEVEL: f64 = 10.0;
const MIN_COMPLEXITY: f64 = 1.0;
const MAX_COMPLEXITY: f64 = 10.0;

fn unique_ids<'a>(
    path: &FieldPath,
    field: &str,
    ids: impl Iterator<Item = &'a str>,
    out: &mut Violations,
) {
    let mut seen = HashSet::new();
    for (index, id) in ids.enumerate() {
        if !seen.insert(id) {
            out.push(
                ValidationError::at_field(&path.push_index(field, index).push("id"), "duplicate id")
                    .with_context("unique id", id),
            );
        }
    }
}

impl Validate for PerformancePredictionRequest {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.non_blank(path, "team_id", &self.team_id);
        out.nested(path, "team_data", &self.team_data);
        out.nested(path, "contextual_factors", &self.contextual_factors);
        out.within(
            &path.push("prediction_settings"),
            "confidence_threshold",
            self.prediction_settings.confidence_threshold,
            0.5,
            0.99,
        );
    }
}

impl Validate for TeamData {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.each(path, "members", &self.members);
        out.each(path, "projects", &self.projects);
        out.each(path, "historical_performance", &self.historical_performance);
        unique_ids(path, "members", self.members.iter().map(|m| m.id.as_str()), out);
        unique_ids(path, "projects", self.projects.iter().map(|p| p.id.as_str()), out);
    }
}

impl Validate for TeamMember {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.non_blank(path, "id", &self.id);
        out.non_negative(path, "experience", self.experience);
        out.unit(path, "workload", self.workload);
        for (index, skill) in self.skills.iter().enumerate() {
            out.within(
                &path.push_index("skills", index),
                "level",
                skill.level,
                MIN_SKILL_LEVEL,
                MAX_SKILL_LEVEL,
            );
        }
        let performance = path.push("performance");
        out.unit(&performance, "efficiency", self.performance.efficiency);
        out.unit(&performance, "quality", self.performance.quality);
        out.unit(&performance, "collaboration", self.performance.collaboration);
        out.unit(&performance, "innovation", self.performance.innovation);
    }
}

impl Validate for Project {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.non_blank(path, "id", &self.id);
        out.within(path, "complexity", self.complexity, MIN_COMPLEXITY, MAX_COMPLEXITY);
        out.unit(path, "progress", self.progress);
    }
}

impl Validate for PerformanceSample {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        let metrics = path.push("metrics");
        out.non_negative(&metrics, "tasks_completed", self.metrics.tasks_completed);
        out.unit(&metrics, "average_quality", self.metrics.average_quality);
        out.unit(&metrics, "meets_deadlines", self.metrics.meets_deadlines);
        out.unit(&metrics, "collaboration_score", self.metrics.collaboration_score);
    }
}

impl Validate for ContextualFactors {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        for (index, effect) in self.seasonality.iter().enumerate() {
            out.within(&path.push_index("seasonality", index), "impact", effect.impact, -1.0, 1.0);
        }
        for (index, constraint) in self.resource_constraints.iter().enumerate() {
            out.unit(
                &path.push_index("resource_constraints", index),
                "availability",
                constraint.availability,
            );
        }
    }
}

// =============================================================================
// Result contract
// =============================================================================

fn metric(path: &FieldPath, field: &str, prediction: &MetricPrediction, out: &mut Violations) {
    let at = path.push(field);
    out.unit(&at, "current", prediction.current);
    out.unit(&at, "predicted", prediction.predicted);
    out.unit(&at, "confidence", prediction.confidence);
}

impl Validate for PerformancePredictionResult {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.each(path, "individual_predictions", &self.individual_predictions);
        out.nested(path, "team_predictions", &self.team_predictions);
        out.each(path, "project_predictions", &self.project_predictions);
        out.nested(path, "scenario_analysis", &self.scenario_analysis);
        out.nested(path, "insights", &self.insights);
        out.nested(path, "recommendations", &self.recommendations);
    }
}

impl Validate for IndividualPrediction {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        let predictions = path.push("predictions");
        metric(&predictions, "productivity", &self.predictions.productivity, out);
        metric(&predictions, "quality", &self.predictions.quality, out);
        metric(&predictions, "collaboration", &self.predictions.collaboration, out);
        for (index, factor) in self.predictions.risk_factors.iter().enumerate() {
            out.unit(
                &predictions.push_index("risk_factors", index),
                "probability",
                factor.probability,
            );
        }
    }
}

impl Validate for TeamPredictions {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        let overall = path.push("overall_performance");
        out.unit(&overall, "current", self.overall_performance.current);
        out.unit(&overall, "predicted", self.overall_performance.predicted);
        for (index, point) in self.overall_performance.trajectory.iter().enumerate() {
            let at = overall.push_index("trajectory", index);
            out.unit(&at, "value", point.value);
            out.unit(&at, "confidence", point.confidence);
        }

        let collaboration = path.push("collaboration");
        let c = &self.collaboration;
        for (field, value) in [
            ("team_cohesion", c.team_cohesion),
            ("communication_efficiency", c.communication_efficiency),
            ("conflict_probability", c.conflict_probability),
            ("synergy_score", c.synergy_score),
        ] {
            out.unit(&collaboration, field, value);
        }

        let capacity = path.push("capacity");
        out.unit(&capacity, "current_utilization", self.capacity.current_utilization);
        out.unit(&capacity, "predicted_utilization", self.capacity.predicted_utilization);
        out.unit(&capacity, "scalability_score", self.capacity.scalability_score);
    }
}

impl Validate for ProjectPrediction {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        let at = path.push("predictions");
        out.unit(&at, "completion_probability", self.predictions.completion_probability);
        out.unit(&at, "quality_score", self.predictions.quality_score);
    }
}

impl Validate for PerformanceScenario {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.non_blank(path, "scenario", &self.scenario);
        let outcomes = path.push("outcomes");
        out.unit(&outcomes, "team_performance", self.outcomes.team_performance);
        out.unit(&outcomes, "project_success", self.outcomes.project_success);
        out.unit(&outcomes, "member_satisfaction", self.outcomes.member_satisfaction);
    }
}

impl Validate for Insights {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        for (index, driver) in self.performance_drivers.iter().enumerate() {
            out.unit(&path.push_index("performance_drivers", index), "impact", driver.impact);
        }
        for (index, area) in self.risk_areas.iter().enumerate() {
            out.unit(&path.push_index("risk_areas", index), "probability", area.probability);
        }
    }
}
