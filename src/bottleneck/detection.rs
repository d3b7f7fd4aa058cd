//! Candidate detection over processes, resources, and tracked metrics.
//!
//! Every candidate gets a severity from an additive point system mapped
//! onto [`SeverityTier`]. Whether a candidate survives depends on the
//! detection settings, see [`select_bottlenecks`].

use super::dependencies::DependencyGraph;
use super::types::*;
use crate::core::{clamp_unit, safe_ratio, Controllability, ImpactTier, SeverityTier};
use crate::metrics::{severity_from_score, Ladder};

/// Process points: critical ≥6, major ≥4, moderate ≥2.
const PROCESS_SEVERITY: Ladder<SeverityTier> = Ladder::new(
    SeverityTier::Minor,
    &[
        (1.0, SeverityTier::Moderate),
        (3.0, SeverityTier::Major),
        (5.0, SeverityTier::Critical),
    ],
);

/// Resource points: critical ≥5, major ≥3, moderate ≥2.
const RESOURCE_SEVERITY: Ladder<SeverityTier> = Ladder::new(
    SeverityTier::Minor,
    &[
        (1.0, SeverityTier::Moderate),
        (2.0, SeverityTier::Major),
        (4.0, SeverityTier::Critical),
    ],
);

const SENSITIVITY_SHIFT: f64 = 0.05;

/// Detection thresholds after the sensitivity shift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub utilization: f64,
    pub efficiency: f64,
    pub performance: f64,
}

impl Thresholds {
    pub fn effective(settings: &DetectionSettings) -> Self {
        let base = &settings.thresholds;
        let shift = match settings.sensitivity {
            Sensitivity::Low => SENSITIVITY_SHIFT,
            Sensitivity::Medium => 0.0,
            Sensitivity::High => -SENSITIVITY_SHIFT,
        };
        Self {
            utilization: clamp_unit(base.utilization + shift),
            efficiency: clamp_unit(base.efficiency - shift),
            performance: clamp_unit(base.performance - shift),
        }
    }
}

fn cause(
    cause: impl Into<String>,
    category: CauseCategory,
    contribution: f64,
    controllability: Controllability,
) -> Cause {
    Cause {
        cause: cause.into(),
        category,
        contribution: clamp_unit(contribution),
        controllability,
    }
}

fn rank_causes(mut causes: Vec<Cause>) -> Vec<Cause> {
    causes.sort_by(|a, b| b.contribution.total_cmp(&a.contribution));
    causes
}

// =============================================================================
// Processes
// =============================================================================

fn capacity_ratio(capacity: &Capacity) -> f64 {
    safe_ratio(capacity.current, capacity.practical)
}

pub fn process_severity_points(process: &Process) -> u32 {
    let performance = &process.performance;
    let mut points = 0;

    points += match performance.utilization {
        u if u > 0.95 => 3,
        u if u > 0.85 => 2,
        u if u > 0.75 => 1,
        _ => 0,
    };
    points += match performance.efficiency {
        e if e < 0.6 => 3,
        e if e < 0.7 => 2,
        e if e < 0.8 => 1,
        _ => 0,
    };
    points += match capacity_ratio(&process.capacity) {
        r if r > 0.95 => 2,
        r if r > 0.85 => 1,
        _ => 0,
    };

    let critical_constraints = process
        .constraints
        .iter()
        .filter(|constraint| constraint.impact == ImpactTier::Critical)
        .count();
    points + critical_constraints as u32
}

pub fn process_severity(process: &Process) -> SeverityTier {
    severity_from_score(f64::from(process_severity_points(process)), &PROCESS_SEVERITY)
}

fn process_causes(process: &Process) -> Vec<Cause> {
    let performance = &process.performance;
    let mut causes = Vec::new();

    if performance.efficiency < 0.7 {
        causes.push(cause(
            "Low process efficiency",
            CauseCategory::Internal,
            1.0 - performance.efficiency,
            Controllability::High,
        ));
    }
    if performance.utilization > 0.9 {
        causes.push(cause(
            "High capacity utilization",
            CauseCategory::Internal,
            performance.utilization - 0.8,
            Controllability::Medium,
        ));
    }
    for constraint in &process.constraints {
        if !constraint.impact.is_high_or_critical() {
            continue;
        }
        let (category, controllability) = match constraint.constraint_type {
            ConstraintType::Regulatory => (CauseCategory::External, Controllability::Low),
            _ => (CauseCategory::Internal, Controllability::Medium),
        };
        let contribution = if constraint.impact == ImpactTier::Critical {
            0.8
        } else {
            0.5
        };
        causes.push(cause(
            constraint.description.clone(),
            category,
            contribution,
            controllability,
        ));
    }

    rank_causes(causes)
}

fn process_candidate(
    process: &Process,
    thresholds: &Thresholds,
    graph: &DependencyGraph<'_>,
) -> Bottleneck {
    let performance = &process.performance;
    let flagged = performance.utilization > thresholds.utilization
        || performance.efficiency < thresholds.efficiency
        || capacity_ratio(&process.capacity) > thresholds.utilization;
    let inefficiency = 1.0 - performance.efficiency;

    Bottleneck {
        id: format!("process_{}", process.id),
        name: process.name.clone(),
        area: process.area.clone(),
        bottleneck_type: BottleneckType::Process,
        severity: process_severity(process),
        flagged,
        impact: BottleneckImpact {
            throughput_reduction: clamp_unit(inefficiency),
            cost_increase: inefficiency * 5000.0,
            time_delay: (performance.utilization - 0.8).max(0.0) * 8.0 + inefficiency * 4.0,
            quality_impact: performance.error_rate,
        },
        causes: process_causes(process),
        metrics: BottleneckMetrics {
            current_utilization: performance.utilization,
            target_utilization: thresholds.utilization,
            efficiency: performance.efficiency,
            throughput: performance.throughput,
            backlog: (process.capacity.theoretical - process.capacity.current).max(0.0),
        },
        dependencies: graph.process_refs(process),
    }
}

pub fn process_candidates(
    processes: &[Process],
    thresholds: &Thresholds,
    graph: &DependencyGraph<'_>,
) -> Vec<Bottleneck> {
    processes
        .iter()
        .map(|process| process_candidate(process, thresholds, graph))
        .collect()
}

// =============================================================================
// Resources
// =============================================================================

fn resource_rate(resource: &Resource) -> f64 {
    safe_ratio(resource.availability.utilized, resource.availability.total)
}

pub fn resource_severity_points(resource: &Resource) -> u32 {
    let performance = &resource.performance;
    let mut points = 0;

    points += match resource_rate(resource) {
        r if r > 0.95 => 3,
        r if r > 0.85 => 2,
        r if r > 0.75 => 1,
        _ => 0,
    };
    points += match performance.efficiency {
        e if e < 0.5 => 2,
        e if e < 0.7 => 1,
        _ => 0,
    };
    points += match performance.reliability {
        r if r < 0.7 => 2,
        r if r < 0.85 => 1,
        _ => 0,
    };
    points
}

fn resource_causes(resource: &Resource) -> Vec<Cause> {
    let rate = resource_rate(resource);
    let performance = &resource.performance;
    let mut causes = Vec::new();

    if rate > 0.9 {
        causes.push(cause(
            "High resource utilization",
            CauseCategory::Internal,
            rate - 0.8,
            Controllability::High,
        ));
    }
    if performance.efficiency < 0.7 {
        causes.push(cause(
            "Low resource efficiency",
            CauseCategory::Internal,
            1.0 - performance.efficiency,
            Controllability::Medium,
        ));
    }
    if performance.reliability < 0.8 {
        causes.push(cause(
            "Resource reliability issues",
            CauseCategory::Systemic,
            1.0 - performance.reliability,
            Controllability::Medium,
        ));
    }

    rank_causes(causes)
}

fn resource_candidate(
    resource: &Resource,
    thresholds: &Thresholds,
    graph: &DependencyGraph<'_>,
) -> Bottleneck {
    let rate = resource_rate(resource);
    let performance = &resource.performance;
    let flagged = rate > thresholds.utilization
        || performance.efficiency < thresholds.efficiency
        || performance.reliability < thresholds.performance;
    let overload = (rate - 0.8).max(0.0);

    Bottleneck {
        id: format!("resource_{}", resource.id),
        name: resource.name.clone(),
        area: resource.resource_type.label().to_string(),
        bottleneck_type: BottleneckType::Resource,
        severity: severity_from_score(
            f64::from(resource_severity_points(resource)),
            &RESOURCE_SEVERITY,
        ),
        flagged,
        impact: BottleneckImpact {
            throughput_reduction: clamp_unit(overload),
            cost_increase: overload * resource.cost.variable * 1.5,
            time_delay: ((rate - 0.8) * 6.0 + (1.0 - performance.reliability) * 4.0).max(0.0),
            quality_impact: 1.0 - performance.reliability,
        },
        causes: resource_causes(resource),
        metrics: BottleneckMetrics {
            current_utilization: clamp_unit(rate),
            target_utilization: thresholds.utilization,
            efficiency: performance.efficiency,
            throughput: resource.availability.utilized,
            backlog: (resource.availability.allocated - resource.availability.total).max(0.0),
        },
        dependencies: graph.resource_refs(resource),
    }
}

pub fn resource_candidates(
    resources: &[Resource],
    thresholds: &Thresholds,
    graph: &DependencyGraph<'_>,
) -> Vec<Bottleneck> {
    resources
        .iter()
        .map(|resource| resource_candidate(resource, thresholds, graph))
        .collect()
}

// =============================================================================
// Metrics
// =============================================================================

fn metric_severity(metric: &TrackedMetric) -> SeverityTier {
    if metric.value <= metric.threshold.critical {
        SeverityTier::Critical
    } else if metric.value <= metric.threshold.warning {
        SeverityTier::Major
    } else if metric.value < metric.target * 0.8 {
        SeverityTier::Moderate
    } else {
        SeverityTier::Minor
    }
}

/// Relative shortfall below target in `[0, 1]`.
fn metric_gap(metric: &TrackedMetric) -> f64 {
    clamp_unit(safe_ratio(metric.target - metric.value, metric.target))
}

/// The latest (up to) three samples fall strictly, oldest first.
fn is_declining(trend: &[TrendPoint]) -> bool {
    if trend.len() < 2 {
        return false;
    }
    let mut points: Vec<&TrendPoint> = trend.iter().collect();
    points.sort_by_key(|point| point.date);
    let recent = &points[points.len().saturating_sub(3)..];
    recent.windows(2).all(|pair| pair[1].value < pair[0].value)
}

fn metric_causes(metric: &TrackedMetric) -> Vec<Cause> {
    let gap = metric_gap(metric);
    let mut causes = Vec::new();

    if gap > 0.2 {
        causes.push(cause(
            format!("{} performance below target", metric.name),
            CauseCategory::Internal,
            gap,
            Controllability::Medium,
        ));
    }
    if is_declining(&metric.trend) {
        causes.push(cause(
            "Declining performance trend",
            CauseCategory::Systemic,
            0.3,
            Controllability::Medium,
        ));
    }

    rank_causes(causes)
}

fn metric_candidate(metric: &TrackedMetric) -> Bottleneck {
    let flagged = metric.value < metric.threshold.critical
        || (metric.value < metric.threshold.warning
            && safe_ratio((metric.value - metric.target).abs(), metric.target) > 0.2);
    let gap = metric_gap(metric);
    let attainment = safe_ratio(metric.value, metric.target);

    Bottleneck {
        id: format!("metric_{}", metric.id),
        name: metric.name.clone(),
        area: metric.category.clone(),
        bottleneck_type: BottleneckType::Process,
        severity: metric_severity(metric),
        flagged,
        impact: BottleneckImpact {
            throughput_reduction: gap,
            cost_increase: gap * 10_000.0,
            time_delay: gap * 8.0,
            quality_impact: gap,
        },
        causes: metric_causes(metric),
        metrics: BottleneckMetrics {
            current_utilization: clamp_unit(attainment),
            target_utilization: 1.0,
            efficiency: attainment.min(1.0),
            throughput: metric.value,
            backlog: (metric.target - metric.value).max(0.0),
        },
        dependencies: DependencyRefs::default(),
    }
}

pub fn metric_candidates(metrics: &[TrackedMetric]) -> Vec<Bottleneck> {
    metrics.iter().map(metric_candidate).collect()
}

// =============================================================================
// Selection
// =============================================================================

/// Keep every candidate when minor bottlenecks are requested, otherwise
/// only flagged candidates above minor. Most severe first, stable.
pub fn select_bottlenecks(candidates: Vec<Bottleneck>, include_minor: bool) -> Vec<Bottleneck> {
    let mut selected: Vec<Bottleneck> = candidates
        .into_iter()
        .filter(|candidate| {
            include_minor || (candidate.flagged && candidate.severity > SeverityTier::Minor)
        })
        .collect();
    selected.sort_by(|a, b| b.severity.rank().cmp(&a.severity.rank()));
    selected
}
