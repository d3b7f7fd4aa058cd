//! Team-level forecasts: overall trajectory, collaboration, and capacity.

use super::types::*;
use crate::core::{add_days_saturating, clamp_unit, safe_ratio, ImpactTier, TimeHorizon};
use crate::metrics::{classify_trend, mean, mean_by, variance};
use chrono::NaiveDate;
use std::collections::HashSet;

const TEAM_SIZE_BASELINE: f64 = 5.0;
const OVERLOAD_THRESHOLD: f64 = 0.9;
const BUSY_THRESHOLD: f64 = 0.8;
const WEAK_COLLABORATION: f64 = 0.6;
const CONSTRAINED_AVAILABILITY: f64 = 0.7;
const SKILLS_PER_MEMBER: f64 = 10.0;
const UTILIZATION_GROWTH: f64 = 1.1;
const DEMAND_HEADROOM: f64 = 1.2;
const EXPERIENCE_SATURATION: f64 = 5.0;

/// Trajectory resolution: number of steps and days between them.
fn trajectory_steps(horizon: TimeHorizon) -> (u32, i64) {
    match horizon {
        TimeHorizon::OneWeek => (7, 1),
        TimeHorizon::OneMonth => (4, 7),
        TimeHorizon::ThreeMonths => (12, 7),
        TimeHorizon::SixMonths => (24, 7),
        TimeHorizon::OneYear => (52, 7),
    }
}

/// Linear path from `current` to `predicted`, confidence decaying toward 0.6.
pub fn trajectory(
    current: f64,
    predicted: f64,
    horizon: TimeHorizon,
    start: NaiveDate,
) -> Vec<TrajectoryPoint> {
    let (steps, interval) = trajectory_steps(horizon);
    (0..=steps)
        .map(|step| {
            let progress = f64::from(step) / f64::from(steps);
            TrajectoryPoint {
                date: add_days_saturating(start, i64::from(step) * interval),
                value: clamp_unit(current + (predicted - current) * progress),
                confidence: (0.9 - progress * 0.3).max(0.5),
            }
        })
        .collect()
}

pub fn overall_performance(
    members: &[TeamMember],
    individuals: &[IndividualPrediction],
    horizon: TimeHorizon,
    as_of: NaiveDate,
) -> OverallPerformance {
    let current = mean_by(members, |m| m.performance.average());
    let predicted = mean_by(individuals, IndividualPrediction::predicted_average);
    OverallPerformance {
        current,
        predicted,
        trajectory: trajectory(current, predicted, horizon, as_of),
        trend: classify_trend(predicted - current),
    }
}

/// Distinct skills relative to a ten-skills-per-member ceiling.
pub fn skill_diversity(members: &[TeamMember]) -> f64 {
    let unique: HashSet<&str> = members
        .iter()
        .flat_map(|m| &m.skills)
        .map(|s| s.skill.as_str())
        .collect();
    safe_ratio(unique.len() as f64, members.len() as f64 * SKILLS_PER_MEMBER).min(1.0)
}

pub fn collaboration_metrics(
    members: &[TeamMember],
    individuals: &[IndividualPrediction],
    constraints: &[ResourceConstraint],
) -> CollaborationMetrics {
    let size = members.len() as f64;
    let current: Vec<f64> = individuals
        .iter()
        .map(|i| i.predictions.collaboration.current)
        .collect();
    let average = mean(&current);

    let team_cohesion = clamp_unit(average - variance(&current));
    let size_penalty = (1.0 - (size - TEAM_SIZE_BASELINE) * 0.05).max(0.5);
    let communication_efficiency = clamp_unit(average * size_penalty);

    let busy = members.iter().filter(|m| m.workload > BUSY_THRESHOLD).count() as f64;
    let weak = current.iter().filter(|c| **c < WEAK_COLLABORATION).count() as f64;
    let constrained = constraints
        .iter()
        .filter(|c| c.availability < CONSTRAINED_AVAILABILITY)
        .count() as f64;
    let conflict_probability =
        clamp_unit(safe_ratio(busy, size) * 0.3 + safe_ratio(weak, size) * 0.4 + constrained * 0.1);

    let predicted = mean_by(individuals, |i| i.predictions.collaboration.predicted);
    let synergy_score = clamp_unit((skill_diversity(members) + predicted) / 2.0);

    CollaborationMetrics {
        team_cohesion,
        communication_efficiency,
        conflict_probability,
        synergy_score,
    }
}

fn priority_weight(priority: ImpactTier) -> f64 {
    match priority {
        ImpactTier::Low => 0.5,
        ImpactTier::Medium => 1.0,
        ImpactTier::High => 1.5,
        ImpactTier::Critical => 2.0,
    }
}

/// Every distinct required skill, in first-seen order.
pub fn required_skills(projects: &[Project]) -> Vec<&str> {
    let mut skills = Vec::new();
    for skill in projects.iter().flat_map(|p| &p.required_skills) {
        if !skills.contains(&skill.as_str()) {
            skills.push(skill.as_str());
        }
    }
    skills
}

fn skill_demand(skill: &str, projects: &[Project]) -> f64 {
    projects
        .iter()
        .filter(|p| p.required_skills.iter().any(|s| s == skill))
        .map(|p| priority_weight(p.priority) * p.complexity / 10.0)
        .sum()
}

fn skill_supply(skill: &str, members: &[TeamMember]) -> f64 {
    members
        .iter()
        .flat_map(|m| {
            m.skills
                .iter()
                .filter(move |s| s.skill == skill)
                .map(move |s| s.level / 10.0 * (1.0 - m.workload))
        })
        .sum()
}

pub fn capacity_bottlenecks(members: &[TeamMember], projects: &[Project]) -> Vec<CapacityBottleneck> {
    let mut bottlenecks: Vec<CapacityBottleneck> = required_skills(projects)
        .into_iter()
        .filter(|skill| skill_demand(skill, projects) > skill_supply(skill, members) * DEMAND_HEADROOM)
        .map(|skill| CapacityBottleneck {
            area: format!("{skill} skills"),
            severity: ImpactTier::High,
            expected_duration: "2-4 weeks".to_string(),
        })
        .collect();

    let overloaded = members.iter().filter(|m| m.workload > OVERLOAD_THRESHOLD).count();
    if overloaded > 0 {
        let severity = if overloaded * 2 > members.len() {
            ImpactTier::High
        } else {
            ImpactTier::Medium
        };
        bottlenecks.push(CapacityBottleneck {
            area: "Team workload capacity".to_string(),
            severity,
            expected_duration: "1-2 weeks".to_string(),
        });
    }

    bottlenecks
}

/// Share of required skills that at least one member holds; 1 when nothing is required.
pub fn skill_coverage(members: &[TeamMember], projects: &[Project]) -> f64 {
    let required = required_skills(projects);
    if required.is_empty() {
        return 1.0;
    }
    let covered = required
        .iter()
        .filter(|skill| members.iter().any(|m| m.has_skill(skill)))
        .count();
    covered as f64 / required.len() as f64
}

pub fn capacity_forecast(members: &[TeamMember], projects: &[Project]) -> CapacityForecast {
    let current_utilization = mean_by(members, |m| m.workload);
    let experience = (mean_by(members, |m| m.experience) / EXPERIENCE_SATURATION).min(1.0);
    let scalability_score = clamp_unit(
        (1.0 - current_utilization + skill_coverage(members, projects) + experience) / 3.0,
    );

    CapacityForecast {
        current_utilization,
        predicted_utilization: (current_utilization * UTILIZATION_GROWTH).min(1.0),
        bottlenecks: capacity_bottlenecks(members, projects),
        scalability_score,
    }
}
