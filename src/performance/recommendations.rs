use super::types::*;
use crate::composer::{Recommendation, RecommendationPlan, ScenarioSet, Urgency};
use crate::core::{Controllability, ImpactTier};

/// Best-case probability below which a development program is proposed.
const DEVELOPMENT_THRESHOLD: f64 = 0.3;
const SCALABLE_DRIVER_IMPACT: f64 = 0.8;

pub fn build_recommendations(
    insights: &Insights,
    scenarios: &ScenarioSet<PerformanceScenario>,
) -> RecommendationPlan {
    let mut plan = RecommendationPlan::default();

    plan.extend(
        Urgency::Immediate,
        insights
            .key_insights
            .iter()
            .filter(|i| {
                i.importance == ImpactTier::Critical && i.category == InsightCategory::ProjectRisk
            })
            .map(project_review),
    );
    if let Some(capacity) = insights
        .key_insights
        .iter()
        .find(|i| i.category == InsightCategory::CapacityManagement)
    {
        plan.push(Urgency::Immediate, workload_rebalancing(capacity));
    }

    if scenarios.best.probability < DEVELOPMENT_THRESHOLD {
        plan.push(Urgency::Strategic, development_program());
    }
    if insights.performance_drivers.iter().any(|d| {
        d.controllability == Controllability::High && d.impact > SCALABLE_DRIVER_IMPACT
    }) {
        plan.push(Urgency::Strategic, scale_drivers());
    }

    plan
}

fn project_review(insight: &KeyInsight) -> Recommendation {
    Recommendation::new(
        "Conduct emergency review of high-risk projects",
        insight.insight.clone(),
        "Prevent project failures and maintain delivery commitments",
    )
    .with_priority(ImpactTier::Critical)
    .with_target("Project Management")
    .with_effort(ImpactTier::High)
    .with_timeline("24-48 hours")
}

fn workload_rebalancing(insight: &KeyInsight) -> Recommendation {
    Recommendation::new(
        "Implement immediate workload rebalancing",
        insight.insight.clone(),
        "Prevent team burnout and maintain productivity",
    )
    .with_priority(ImpactTier::High)
    .with_target("Resource Management")
    .with_effort(ImpactTier::Medium)
    .with_timeline("1 week")
}

fn development_program() -> Recommendation {
    Recommendation::new(
        "Implement comprehensive team development program",
        "Low probability of achieving optimal performance indicates development gaps",
        "Improved individual and team performance",
    )
    .with_priority(ImpactTier::Medium)
    .with_timeline("3-6 months")
    .with_benefits([
        "Improved individual and team performance",
        "Better project success rates",
        "Enhanced team collaboration and satisfaction",
    ])
    .with_resources([
        "Training budget allocation",
        "Time investment from team members",
        "External training resources or coaches",
    ])
    .with_success_metrics([
        "Individual performance improvements >15%",
        "Team collaboration score >0.8",
        "Project success rate >85%",
    ])
}

fn scale_drivers() -> Recommendation {
    Recommendation::new(
        "Scale high-impact performance drivers across organization",
        "Identified high-impact, controllable factors that can be leveraged",
        "Systematic performance improvement",
    )
    .with_priority(ImpactTier::Medium)
    .with_timeline("6-12 months")
    .with_benefits([
        "Systematic performance improvement",
        "Consistent high performance across teams",
        "Competitive advantage through operational excellence",
    ])
    .with_resources([
        "Process documentation and standardization",
        "Training and change management",
        "Performance monitoring systems",
    ])
    .with_success_metrics([
        "Organization-wide performance improvement",
        "Reduced performance variance across teams",
        "Improved employee satisfaction and retention",
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::performance::scenarios::fallback_scenarios;

    fn insight(category: InsightCategory, importance: ImpactTier) -> KeyInsight {
        KeyInsight {
            insight: "Observed".into(),
            category,
            importance,
            actionable: true,
            timeframe: "Immediate".into(),
        }
    }

    #[test]
    fn test_immediate_actions_follow_insights() {
        let insights = Insights {
            key_insights: vec![
                insight(InsightCategory::ProjectRisk, ImpactTier::Critical),
                insight(InsightCategory::CapacityManagement, ImpactTier::High),
                insight(InsightCategory::TeamPerformance, ImpactTier::High),
            ],
            ..Default::default()
        };
        let plan = build_recommendations(&insights, &fallback_scenarios());
        let titles: Vec<_> = plan.immediate.iter().map(|r| r.recommendation.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Conduct emergency review of high-risk projects",
                "Implement immediate workload rebalancing",
            ]
        );
        assert_eq!(plan.immediate[0].effort, Some(ImpactTier::High));
    }

    #[test]
    fn test_low_best_case_proposes_development() {
        // Best case always carries 0.2 probability.
        let plan = build_recommendations(&Insights::default(), &fallback_scenarios());
        assert_eq!(plan.strategic.len(), 1);
        assert_eq!(plan.strategic[0].timeline, "3-6 months");
        assert!(plan.short_term.is_empty());
    }

    #[test]
    fn test_controllable_driver_is_scaled() {
        let insights = Insights {
            performance_drivers: vec![PerformanceDriver {
                driver: "Strong team collaboration".into(),
                impact: 0.9,
                controllability: Controllability::High,
                recommendations: vec![],
            }],
            ..Default::default()
        };
        let plan = build_recommendations(&insights, &fallback_scenarios());
        assert_eq!(plan.strategic.len(), 2);
        assert_eq!(
            plan.strategic[1].recommendation,
            "Scale high-impact performance drivers across organization"
        );
    }
}
