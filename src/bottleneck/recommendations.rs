use super::types::*;
use crate::composer::{Recommendation, RecommendationPlan, Urgency};
use crate::core::{safe_ratio, ImpactTier, SeverityTier};

const SHORT_TERM_LIMIT: usize = 2;

pub fn build_recommendations(
    bottlenecks: &[Bottleneck],
    opportunities: &OptimizationOpportunities,
) -> RecommendationPlan {
    let mut plan = RecommendationPlan::default();

    plan.extend(
        Urgency::Immediate,
        bottlenecks
            .iter()
            .filter(|b| b.severity == SeverityTier::Critical)
            .map(critical_response),
    );
    plan.extend(
        Urgency::ShortTerm,
        opportunities
            .quick_wins
            .iter()
            .take(SHORT_TERM_LIMIT)
            .map(quick_win_action),
    );
    if let Some(improvement) = opportunities.strategic_improvements.first() {
        plan.push(Urgency::Strategic, strategic_program(improvement));
    }

    plan
}

fn critical_response(bottleneck: &Bottleneck) -> Recommendation {
    Recommendation::new(
        format!("Address critical bottleneck: {}", bottleneck.name),
        format!(
            "{} is a critical bottleneck with {:.1}% utilization",
            bottleneck.name,
            bottleneck.metrics.current_utilization * 100.0
        ),
        "Immediate reduction in bottleneck severity",
    )
    .with_priority(ImpactTier::Critical)
    .with_target(bottleneck.id.clone())
    .with_timeline("24-48 hours")
    .with_actions(["Implement emergency measures to reduce utilization and improve efficiency"])
    .with_resources(["Operations team", "Management support", "Emergency budget"])
}

fn quick_win_action(win: &QuickWin) -> Recommendation {
    Recommendation::new(
        win.opportunity.clone(),
        win.description.clone(),
        format!("ROI of {}x", win.roi),
    )
    .with_priority(ImpactTier::High)
    .with_effort(win.effort)
    .with_timeline(win.timeframe.clone())
    .with_investment(win.cost)
    .with_benefits([
        format!("ROI of {}x", win.roi),
        "Quick implementation".to_string(),
        "Low risk".to_string(),
    ])
    .with_actions([
        "Analyze current process",
        "Identify optimization opportunities",
        "Implement changes",
        "Monitor results",
    ])
    .with_resources(["Team availability", "Management approval"])
    .with_risks(["Minimal operational disruption"])
    .with_success_metrics(["Efficiency improvement", "Cost reduction", "Throughput increase"])
}

fn strategic_program(improvement: &StrategicImprovement) -> Recommendation {
    let roi = safe_ratio(improvement.expected_return, improvement.investment);
    Recommendation::new(
        improvement.improvement.clone(),
        "Fundamental operational improvement with long-term competitive advantage",
        "Complete elimination of major bottleneck and system optimization",
    )
    .with_priority(ImpactTier::High)
    .with_investment(improvement.investment)
    .with_timeline(improvement.timeline.clone())
    .with_resources(improvement.requirements.clone())
    .with_benefits([
        format!("ROI of {:.1}x", roi),
        "Throughput increase".to_string(),
        "Cost reduction".to_string(),
        "Operational excellence".to_string(),
        "Competitive advantage".to_string(),
        "Scalability improvement".to_string(),
    ])
    .with_actions([
        "Project initiation and planning (2 weeks): Project plan approved and team assembled"
            .to_string(),
        "Implementation phase 1 (6 weeks): Core improvements implemented".to_string(),
        format!(
            "Full implementation and optimization ({}): All improvements deployed and optimized",
            improvement.timeline
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bottleneck::optimization::build_opportunities;

    fn bottleneck(name: &str, severity: SeverityTier) -> Bottleneck {
        Bottleneck {
            id: format!("process_{}", name.to_lowercase()),
            name: name.into(),
            area: "operations".into(),
            bottleneck_type: BottleneckType::Process,
            severity,
            flagged: true,
            impact: BottleneckImpact {
                throughput_reduction: 0.3,
                cost_increase: 1500.0,
                time_delay: 2.0,
                quality_impact: 0.02,
            },
            causes: vec![],
            metrics: BottleneckMetrics {
                current_utilization: 0.97,
                target_utilization: 0.8,
                efficiency: 0.55,
                throughput: 40.0,
                backlog: 10.0,
            },
            dependencies: DependencyRefs::default(),
        }
    }

    #[test]
    fn test_plan_tiers() {
        let bottlenecks = vec![
            bottleneck("Fulfilment", SeverityTier::Critical),
            bottleneck("Intake", SeverityTier::Minor),
        ];
        let opportunities = build_opportunities(&bottlenecks);
        let plan = build_recommendations(&bottlenecks, &opportunities);

        assert_eq!(plan.immediate.len(), 1);
        assert_eq!(
            plan.immediate[0].recommendation,
            "Address critical bottleneck: Fulfilment"
        );
        assert_eq!(plan.immediate[0].target.as_deref(), Some("process_fulfilment"));

        assert_eq!(plan.short_term.len(), 1);
        assert_eq!(plan.short_term[0].benefits[0], "ROI of 2.5x");

        assert_eq!(plan.strategic.len(), 1);
        assert_eq!(plan.strategic[0].benefits[0], "ROI of 3.0x");
        assert!(plan.strategic[0].actions[2].contains("(3-6 months)"));
    }

    #[test]
    fn test_no_bottlenecks_no_recommendations() {
        let plan = build_recommendations(&[], &OptimizationOpportunities::default());
        assert!(plan.immediate.is_empty());
        assert!(plan.short_term.is_empty());
        assert!(plan.strategic.is_empty());
    }
}
