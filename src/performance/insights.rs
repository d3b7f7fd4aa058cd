//! Key insights, performance drivers, and risk areas.

use super::team::skill_diversity;
use super::types::*;
use crate::core::{Controllability, ImpactTier, TrendDirection};
use crate::metrics::mean_by;

const STRONG_COLLABORATION: f64 = 0.8;
const DIVERSE_SKILLS: f64 = 0.7;
const NEAR_CAPACITY: f64 = 0.9;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn insight(text: String, category: InsightCategory, importance: ImpactTier, timeframe: &str) -> KeyInsight {
    KeyInsight {
        insight: text,
        category,
        importance,
        actionable: true,
        timeframe: timeframe.to_string(),
    }
}

pub fn key_insights(
    individuals: &[IndividualPrediction],
    team: &TeamPredictions,
    projects: &[ProjectPrediction],
) -> Vec<KeyInsight> {
    let mut insights = Vec::new();

    let improving = individuals
        .iter()
        .filter(|p| {
            p.predictions.productivity.trend == TrendDirection::Improving
                && p.predictions.quality.trend == TrendDirection::Improving
        })
        .count();
    if improving * 2 > individuals.len() {
        insights.push(insight(
            "Majority of team members show improving performance trends".to_string(),
            InsightCategory::TeamPerformance,
            ImpactTier::High,
            "Current",
        ));
    }

    let high_risk = projects
        .iter()
        .filter(|p| p.predictions.risk_level.is_high_or_critical())
        .count();
    if high_risk > 0 {
        insights.push(insight(
            format!("{high_risk} projects require immediate attention due to high risk"),
            InsightCategory::ProjectRisk,
            ImpactTier::Critical,
            "Immediate",
        ));
    }

    if team.capacity.current_utilization > NEAR_CAPACITY {
        insights.push(insight(
            "Team operating at near-maximum capacity with limited scalability".to_string(),
            InsightCategory::CapacityManagement,
            ImpactTier::High,
            "2-4 weeks",
        ));
    }

    insights
}

pub fn performance_drivers(
    members: &[TeamMember],
    individuals: &[IndividualPrediction],
) -> Vec<PerformanceDriver> {
    let mut drivers = Vec::new();

    if mean_by(individuals, |p| p.predictions.collaboration.predicted) > STRONG_COLLABORATION {
        drivers.push(PerformanceDriver {
            driver: "Strong team collaboration".to_string(),
            impact: 0.9,
            controllability: Controllability::High,
            recommendations: strings(&[
                "Maintain regular team building activities",
                "Continue collaborative practices",
                "Recognize and reward collaborative behavior",
            ]),
        });
    }

    if skill_diversity(members) > DIVERSE_SKILLS {
        drivers.push(PerformanceDriver {
            driver: "Diverse skill set across team".to_string(),
            impact: 0.8,
            controllability: Controllability::Medium,
            recommendations: strings(&[
                "Leverage skill diversity for knowledge sharing",
                "Create cross-functional project teams",
                "Implement mentoring programs",
            ]),
        });
    }

    drivers
}

pub fn risk_areas(individuals: &[IndividualPrediction], projects: &[ProjectPrediction]) -> Vec<RiskArea> {
    let mut areas = Vec::new();

    let workload_pressure = individuals.iter().any(|p| {
        p.predictions
            .risk_factors
            .iter()
            .any(|rf| rf.factor.contains("workload"))
    });
    if workload_pressure {
        areas.push(RiskArea {
            area: "Team workload management".to_string(),
            probability: 0.7,
            impact: ImpactTier::High,
            indicators: strings(&[
                "Multiple team members at >90% capacity",
                "Declining productivity trends",
                "Increased stress indicators",
            ]),
            prevention_strategies: strings(&[
                "Redistribute workload across team",
                "Prioritize critical projects",
                "Consider additional resources",
                "Implement workload monitoring",
            ]),
        });
    }

    if projects
        .iter()
        .any(|p| p.predictions.risk_level == ImpactTier::Critical)
    {
        areas.push(RiskArea {
            area: "Critical project delivery".to_string(),
            probability: 0.8,
            impact: ImpactTier::Critical,
            indicators: strings(&[
                "Low completion probabilities",
                "Skill gaps in project teams",
                "Tight deadlines with high complexity",
            ]),
            prevention_strategies: strings(&[
                "Allocate best resources to critical projects",
                "Reduce scope or extend timelines",
                "Implement daily monitoring",
                "Escalate for additional support",
            ]),
        });
    }

    areas
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn metric(trend: TrendDirection, predicted: f64) -> MetricPrediction {
        MetricPrediction {
            current: 0.7,
            predicted,
            trend,
            confidence: 0.8,
        }
    }

    fn individual(trend: TrendDirection, collaboration: f64, risk: Option<&str>) -> IndividualPrediction {
        IndividualPrediction {
            member_id: "m".into(),
            member_name: "M".into(),
            role: "Engineer".into(),
            predictions: MemberPredictions {
                productivity: metric(trend, 0.7),
                quality: metric(trend, 0.7),
                collaboration: metric(TrendDirection::Stable, collaboration),
                risk_factors: risk
                    .map(|factor| MemberRiskFactor {
                        factor: factor.into(),
                        probability: 0.7,
                        impact: ImpactTier::High,
                        mitigation: "Rebalance".into(),
                    })
                    .into_iter()
                    .collect(),
            },
        }
    }

    fn project(risk_level: ImpactTier) -> ProjectPrediction {
        ProjectPrediction {
            project_id: "p".into(),
            project_name: "P".into(),
            predictions: ProjectOutlook {
                completion_probability: 0.4,
                estimated_completion: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                quality_score: 0.6,
                risk_level,
                resource_requirements: ResourceRequirements::default(),
            },
        }
    }

    fn team(utilization: f64) -> TeamPredictions {
        TeamPredictions {
            overall_performance: OverallPerformance {
                current: 0.7,
                predicted: 0.7,
                trajectory: vec![],
                trend: TrendDirection::Stable,
            },
            collaboration: CollaborationMetrics {
                team_cohesion: 0.7,
                communication_efficiency: 0.7,
                conflict_probability: 0.2,
                synergy_score: 0.6,
            },
            capacity: CapacityForecast {
                current_utilization: utilization,
                predicted_utilization: (utilization * 1.1).min(1.0),
                bottlenecks: vec![],
                scalability_score: 0.4,
            },
        }
    }

    #[test]
    fn test_key_insights() {
        let individuals = vec![
            individual(TrendDirection::Improving, 0.7, None),
            individual(TrendDirection::Improving, 0.7, None),
            individual(TrendDirection::Stable, 0.7, None),
        ];
        let projects = vec![project(ImpactTier::High), project(ImpactTier::Critical), project(ImpactTier::Low)];
        let insights = key_insights(&individuals, &team(0.95), &projects);

        let categories: Vec<_> = insights.iter().map(|i| i.category).collect();
        assert_eq!(
            categories,
            vec![
                InsightCategory::TeamPerformance,
                InsightCategory::ProjectRisk,
                InsightCategory::CapacityManagement,
            ]
        );
        assert_eq!(insights[1].insight, "2 projects require immediate attention due to high risk");
        assert_eq!(insights[1].importance, ImpactTier::Critical);
    }

    #[test]
    fn test_quiet_team_has_no_insights() {
        let individuals = vec![individual(TrendDirection::Stable, 0.7, None)];
        assert!(key_insights(&individuals, &team(0.5), &[]).is_empty());
    }

    #[test]
    fn test_collaboration_driver() {
        let individuals = vec![individual(TrendDirection::Stable, 0.85, None)];
        let drivers = performance_drivers(&[], &individuals);
        assert_eq!(drivers.len(), 1);
        assert_eq!(drivers[0].controllability, Controllability::High);
        assert_eq!(drivers[0].impact, 0.9);
    }

    #[test]
    fn test_risk_areas() {
        let individuals = vec![individual(
            TrendDirection::Stable,
            0.7,
            Some("High workload leading to burnout"),
        )];
        let areas = risk_areas(&individuals, &[project(ImpactTier::Critical)]);
        let names: Vec<_> = areas.iter().map(|a| a.area.as_str()).collect();
        assert_eq!(names, vec!["Team workload management", "Critical project delivery"]);

        assert!(risk_areas(&[], &[project(ImpactTier::High)]).is_empty());
    }
}
