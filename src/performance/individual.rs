//! Per-member metric projections and member-level risk factors.

use super::types::*;
use crate::core::{ImpactTier, TimeHorizon};
use crate::metrics::{classify_trend, confidence_from_variance, mean, project_forward, trend};

const OVERLOAD_THRESHOLD: f64 = 0.9;
const DECLINE_THRESHOLD: f64 = -0.1;

/// The member's samples in date order.
pub fn member_history<'a>(
    member_id: &str,
    history: &'a [PerformanceSample],
) -> Vec<&'a PerformanceSample> {
    let mut samples: Vec<_> = history.iter().filter(|s| s.member_id == member_id).collect();
    samples.sort_by_key(|s| s.date);
    samples
}

fn project_metric(
    current: f64,
    samples: &[&PerformanceSample],
    select: impl Fn(&SampleMetrics) -> f64,
    horizon: TimeHorizon,
) -> (MetricPrediction, f64) {
    let values: Vec<f64> = samples.iter().map(|s| select(&s.metrics)).collect();
    let delta = trend(&values, |v| *v);
    let prediction = MetricPrediction {
        current,
        predicted: project_forward(current, delta, horizon),
        trend: classify_trend(delta),
        confidence: confidence_from_variance(&values),
    };
    (prediction, delta)
}

/// Skills required by the member's assigned projects that the member lacks.
pub fn skill_gaps<'a>(member: &TeamMember, projects: &'a [Project]) -> Vec<&'a str> {
    let mut gaps = Vec::new();
    for project in projects
        .iter()
        .filter(|p| p.assigned_members.iter().any(|id| *id == member.id))
    {
        for skill in &project.required_skills {
            if !member.has_skill(skill) && !gaps.contains(&skill.as_str()) {
                gaps.push(skill.as_str());
            }
        }
    }
    gaps
}

fn risk(factor: &str, probability: f64, impact: ImpactTier, mitigation: &str) -> MemberRiskFactor {
    MemberRiskFactor {
        factor: factor.to_string(),
        probability,
        impact,
        mitigation: mitigation.to_string(),
    }
}

/// Workload, skill-gap, and declining-trend risks for one member.
pub fn member_risk_factors(
    member: &TeamMember,
    projects: &[Project],
    trend_deltas: &[f64],
) -> Vec<MemberRiskFactor> {
    let mut factors = Vec::new();

    if member.workload > OVERLOAD_THRESHOLD {
        factors.push(risk(
            "High workload leading to burnout",
            0.7,
            ImpactTier::High,
            "Redistribute workload or provide additional support",
        ));
    }

    if !skill_gaps(member, projects).is_empty() {
        factors.push(risk(
            "Skill gaps affecting performance",
            0.6,
            ImpactTier::Medium,
            "Provide training or pair with experienced team members",
        ));
    }

    if mean(trend_deltas) < DECLINE_THRESHOLD {
        factors.push(risk(
            "Declining performance trend",
            0.8,
            ImpactTier::High,
            "One-on-one coaching and performance improvement plan",
        ));
    }

    factors
}

pub fn predict_member(request: &PerformancePredictionRequest, member: &TeamMember) -> IndividualPrediction {
    let data = &request.team_data;
    let horizon = request.prediction_scope.timeframe;
    let samples = member_history(&member.id, &data.historical_performance);

    // Samples carry no efficiency reading; quality stands in for it.
    let (productivity, productivity_delta) = project_metric(
        member.performance.efficiency,
        &samples,
        |m| m.average_quality,
        horizon,
    );
    let (quality, quality_delta) =
        project_metric(member.performance.quality, &samples, |m| m.average_quality, horizon);
    let (collaboration, collaboration_delta) = project_metric(
        member.performance.collaboration,
        &samples,
        |m| m.collaboration_score,
        horizon,
    );

    let risk_factors = if request.prediction_settings.include_risk_factors {
        member_risk_factors(
            member,
            &data.projects,
            &[productivity_delta, quality_delta, collaboration_delta],
        )
    } else {
        Vec::new()
    };

    IndividualPrediction {
        member_id: member.id.clone(),
        member_name: member.name.clone(),
        role: member.role.clone(),
        predictions: MemberPredictions {
            productivity,
            quality,
            collaboration,
            risk_factors,
        },
    }
}
