use super::types::*;
use crate::composer::ScenarioSet;
use crate::metrics::mean_by;

const BEST_CASE_PROBABILITY: f64 = 0.2;
const MOST_LIKELY_PROBABILITY: f64 = 0.6;
const WORST_CASE_PROBABILITY: f64 = 0.2;

/// Project success assumed for a team with no active projects.
const NO_PROJECT_SUCCESS: f64 = 0.5;

fn scenario(
    name: &str,
    probability: f64,
    outcomes: (f64, f64, f64),
    drivers: &[&str],
) -> PerformanceScenario {
    let (team_performance, project_success, member_satisfaction) = outcomes;
    PerformanceScenario {
        scenario: name.to_string(),
        probability,
        outcomes: ScenarioOutcomes {
            team_performance,
            project_success,
            member_satisfaction,
        },
        drivers: drivers.iter().map(|d| d.to_string()).collect(),
    }
}

pub fn build_scenarios(
    team: &TeamPredictions,
    projects: &[ProjectPrediction],
) -> ScenarioSet<PerformanceScenario> {
    let predicted = team.overall_performance.predicted;
    let project_success = if projects.is_empty() {
        NO_PROJECT_SUCCESS
    } else {
        mean_by(projects, |p| p.predictions.completion_probability)
    };

    ScenarioSet::new(
        scenario(
            "Optimal performance with no major obstacles",
            BEST_CASE_PROBABILITY,
            ((predicted * 1.2).min(1.0), 0.95, 0.9),
            &[
                "High team collaboration",
                "Optimal resource allocation",
                "Favorable market conditions",
                "No unexpected challenges",
            ],
        ),
        scenario(
            "Expected performance with normal variations",
            MOST_LIKELY_PROBABILITY,
            (predicted, project_success, 0.75),
            &[
                "Current trends continue",
                "No major disruptions",
                "Standard resource availability",
                "Normal market conditions",
            ],
        ),
        scenario(
            "Significant challenges and performance decline",
            WORST_CASE_PROBABILITY,
            ((predicted * 0.7).max(0.0), 0.4, 0.5),
            &[
                "Key team member departures",
                "Major technical challenges",
                "Resource constraints",
                "Market downturns",
                "Organizational changes",
            ],
        ),
    )
}

pub fn fallback_scenarios() -> ScenarioSet<PerformanceScenario> {
    ScenarioSet::new(
        scenario("Optimal outcomes", BEST_CASE_PROBABILITY, (0.9, 0.9, 0.9), &[]),
        scenario("Expected outcomes", MOST_LIKELY_PROBABILITY, (0.7, 0.7, 0.7), &[]),
        scenario("Challenging outcomes", WORST_CASE_PROBABILITY, (0.5, 0.5, 0.5), &[]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ImpactTier, TrendDirection};
    use chrono::NaiveDate;

    fn team(predicted: f64) -> TeamPredictions {
        TeamPredictions {
            overall_performance: OverallPerformance {
                current: 0.7,
                predicted,
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
                current_utilization: 0.7,
                predicted_utilization: 0.77,
                bottlenecks: vec![],
                scalability_score: 0.5,
            },
        }
    }

    fn project(completion: f64) -> ProjectPrediction {
        ProjectPrediction {
            project_id: "p".into(),
            project_name: "P".into(),
            predictions: ProjectOutlook {
                completion_probability: completion,
                estimated_completion: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                quality_score: 0.7,
                risk_level: ImpactTier::Low,
                resource_requirements: ResourceRequirements::default(),
            },
        }
    }

    #[test]
    fn test_outcomes_follow_prediction() {
        let set = build_scenarios(&team(0.9), &[project(0.6), project(0.8)]);
        assert_eq!(set.best.outcomes.team_performance, 1.0);
        assert!((set.most_likely.outcomes.project_success - 0.7).abs() < 1e-12);
        assert!((set.worst.outcomes.team_performance - 0.63).abs() < 1e-12);
        assert!(set.tail.is_none());
        let total: f64 = set.iter().map(|s| s.probability).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_projects_uses_neutral_success() {
        let set = build_scenarios(&team(0.5), &[]);
        assert_eq!(set.most_likely.outcomes.project_success, 0.5);
    }
}
