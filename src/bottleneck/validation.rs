//! Request and result contracts for bottleneck detection.

use super::types::*;
use crate::contract::{FieldPath, Validate, ValidationError, Violations};
use std::collections::HashSet;

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

impl Validate for BottleneckDetectionRequest {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.nested(path, "system_data", &self.system_data);
        out.nested(path, "external_factors", &self.external_factors);
        out.nested(path, "detection_settings", &self.detection_settings);
    }
}

impl Validate for SystemData {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.each(path, "processes", &self.processes);
        out.each(path, "resources", &self.resources);
        out.each(path, "metrics", &self.metrics);

        unique_ids(path, "processes", self.processes.iter().map(|p| p.id.as_str()), out);
        unique_ids(path, "resources", self.resources.iter().map(|r| r.id.as_str()), out);
        unique_ids(path, "metrics", self.metrics.iter().map(|m| m.id.as_str()), out);
    }
}

impl Validate for Process {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.non_blank(path, "id", &self.id);
        out.non_blank(path, "name", &self.name);

        let capacity = path.push("capacity");
        out.non_negative(&capacity, "theoretical", self.capacity.theoretical);
        out.non_negative(&capacity, "practical", self.capacity.practical);
        out.non_negative(&capacity, "current", self.capacity.current);

        let performance = path.push("performance");
        out.unit(&performance, "efficiency", self.performance.efficiency);
        out.unit(&performance, "utilization", self.performance.utilization);
        out.non_negative(&performance, "throughput", self.performance.throughput);
        out.unit(&performance, "error_rate", self.performance.error_rate);

        for (index, input) in self.inputs.iter().enumerate() {
            out.non_negative(&path.push_index("inputs", index), "quantity", input.quantity);
        }
        for (index, output) in self.outputs.iter().enumerate() {
            out.non_negative(&path.push_index("outputs", index), "quantity", output.quantity);
        }
    }
}

impl Validate for Resource {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.non_blank(path, "id", &self.id);
        out.non_blank(path, "name", &self.name);

        let availability = path.push("availability");
        out.non_negative(&availability, "total", self.availability.total);
        out.non_negative(&availability, "allocated", self.availability.allocated);
        out.non_negative(&availability, "utilized", self.availability.utilized);

        let cost = path.push("cost");
        out.non_negative(&cost, "fixed", self.cost.fixed);
        out.non_negative(&cost, "variable", self.cost.variable);

        let performance = path.push("performance");
        out.unit(&performance, "reliability", self.performance.reliability);
        out.unit(&performance, "efficiency", self.performance.efficiency);
        out.unit(&performance, "maintenance", self.performance.maintenance);
    }
}

impl Validate for TrackedMetric {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.non_blank(path, "id", &self.id);
        out.non_blank(path, "name", &self.name);
        out.finite(path, "value", self.value);
        out.finite(path, "target", self.target);
        out.finite(&path.push("threshold"), "warning", self.threshold.warning);
        out.finite(&path.push("threshold"), "critical", self.threshold.critical);
        for (index, point) in self.trend.iter().enumerate() {
            out.finite(&path.push_index("trend", index), "value", point.value);
        }
    }
}

impl Validate for ExternalFactors {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        let market = path.push("market_conditions");
        out.within(&market, "demand", self.market_conditions.demand, 0.0, 2.0);
        out.within(&market, "competition", self.market_conditions.competition, 0.0, 2.0);
        out.within(&market, "seasonality", self.market_conditions.seasonality, -1.0, 1.0);

        for (index, factor) in self.regulatory.iter().enumerate() {
            out.unit(&path.push_index("regulatory", index), "compliance", factor.compliance);
        }
        for (index, factor) in self.technology.iter().enumerate() {
            out.unit(&path.push_index("technology", index), "adoption_level", factor.adoption_level);
        }
    }
}

impl Validate for DetectionSettings {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        let thresholds = path.push("thresholds");
        out.unit(&thresholds, "utilization", self.thresholds.utilization);
        out.unit(&thresholds, "efficiency", self.thresholds.efficiency);
        out.unit(&thresholds, "performance", self.thresholds.performance);
    }
}

// =============================================================================
// Result contract
// =============================================================================

impl Validate for BottleneckDetectionResult {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.nested(path, "bottleneck_analysis", &self.bottleneck_analysis);
        out.nested(path, "optimization_opportunities", &self.optimization_opportunities);
        out.nested(path, "recommendations", &self.recommendations);
    }
}

impl Validate for BottleneckAnalysis {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.each(path, "identified_bottlenecks", &self.identified_bottlenecks);

        let capacity = path.push("bottleneck_map").push("capacity_analysis");
        let analysis = &self.bottleneck_map.capacity_analysis;
        out.non_negative(&capacity, "total_capacity", analysis.total_capacity);
        out.non_negative(&capacity, "utilized_capacity", analysis.utilized_capacity);
        out.non_negative(&capacity, "constrained_capacity", analysis.constrained_capacity);
        out.unit(&capacity, "utilization_rate", analysis.utilization_rate);

        let impact = path.push("impact_assessment");
        let overall = impact.push("overall_impact");
        let totals = &self.impact_assessment.overall_impact;
        out.unit(&overall, "productivity_loss", totals.productivity_loss);
        out.non_negative(&overall, "revenue_impact", totals.revenue_impact);
        out.non_negative(&overall, "cost_impact", totals.cost_impact);
        out.non_negative(&overall, "time_impact", totals.time_impact);
        out.unit(&overall, "customer_impact", totals.customer_impact);

        for (index, factor) in self.impact_assessment.risk_factors.iter().enumerate() {
            out.unit(&impact.push_index("risk_factors", index), "probability", factor.probability);
        }
    }
}

impl Validate for Bottleneck {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.non_blank(path, "id", &self.id);

        let impact = path.push("impact");
        out.unit(&impact, "throughput_reduction", self.impact.throughput_reduction);
        out.non_negative(&impact, "cost_increase", self.impact.cost_increase);
        out.non_negative(&impact, "time_delay", self.impact.time_delay);
        out.unit(&impact, "quality_impact", self.impact.quality_impact);

        for (index, cause) in self.causes.iter().enumerate() {
            out.unit(&path.push_index("causes", index), "contribution", cause.contribution);
        }

        let metrics = path.push("metrics");
        out.unit(&metrics, "current_utilization", self.metrics.current_utilization);
        out.non_negative(&metrics, "backlog", self.metrics.backlog);
    }
}

impl Validate for OptimizationOpportunities {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        for (index, win) in self.quick_wins.iter().enumerate() {
            let at = path.push_index("quick_wins", index);
            out.unit(&at, "impact", win.impact);
            out.non_negative(&at, "cost", win.cost);
        }
        for (index, improvement) in self.strategic_improvements.iter().enumerate() {
            out.non_negative(
                &path.push_index("strategic_improvements", index),
                "investment",
                improvement.investment,
            );
        }
        for (index, optimization) in self.process_optimizations.iter().enumerate() {
            let at = path.push_index("process_optimizations", index);
            for (position, improvement) in optimization.improvements.iter().enumerate() {
                out.unit(&at.push_index("improvements", position), "impact", improvement.impact);
            }
        }
    }
}
