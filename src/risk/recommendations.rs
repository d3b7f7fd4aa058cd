use super::types::*;
use crate::composer::{Recommendation, RecommendationPlan, Urgency};
use crate::core::ImpactTier;

const HIGH_PROBABILITY: f64 = 0.7;

/// Immediate actions for the riskiest items, an enterprise framework, and
/// culture-building measures.
pub fn build_recommendations(risks: &[IdentifiedRisk]) -> RecommendationPlan {
    let mut plan = RecommendationPlan::default();
    plan.extend(Urgency::Immediate, immediate_actions(risks));
    plan.push(Urgency::Strategic, risk_framework());
    plan.extend(Urgency::ShortTerm, cultural_measures());
    plan
}

fn immediate_actions(risks: &[IdentifiedRisk]) -> Vec<Recommendation> {
    let mut actions = Vec::new();

    let critical = risks
        .iter()
        .filter(|risk| risk.impact.overall == ImpactTier::Critical)
        .count();
    if critical > 0 {
        actions.push(
            Recommendation::new(
                "Implement immediate risk mitigation for critical risks",
                format!("{} critical risks identified requiring immediate attention", critical),
                "Prevent potential severe business disruption",
            )
            .with_priority(ImpactTier::Critical)
            .with_effort(ImpactTier::High)
            .with_timeline("1-2 weeks"),
        );
    }

    let likely = risks
        .iter()
        .filter(|risk| risk.probability > HIGH_PROBABILITY)
        .count();
    if likely > 0 {
        actions.push(
            Recommendation::new(
                "Establish enhanced monitoring for high-probability risks",
                format!("{} risks have >70% probability of occurrence", likely),
                "Early detection and prevention of likely risks",
            )
            .with_priority(ImpactTier::High)
            .with_effort(ImpactTier::Medium)
            .with_timeline("2-4 weeks"),
        );
    }

    actions
}

fn risk_framework() -> Recommendation {
    Recommendation::new(
        "Implement comprehensive enterprise risk management framework",
        "Create systematic approach to risk identification, assessment, and management",
        "Organization-wide risk visibility through phased implementation with pilot programs",
    )
    .with_priority(ImpactTier::High)
    .with_timeline("12-18 months")
    .with_investment(150_000.0)
    .with_actions([
        "Framework design",
        "Pilot implementation",
        "Full rollout",
        "Continuous improvement",
    ])
    .with_benefits([
        "Improved risk visibility and control",
        "Better decision-making capabilities",
        "Enhanced stakeholder confidence",
        "Regulatory compliance alignment",
    ])
    .with_risks([
        "Implementation complexity",
        "Change management challenges",
        "Resource requirements",
    ])
}

fn cultural_measures() -> Vec<Recommendation> {
    vec![
        Recommendation::new(
            "Develop risk-aware culture",
            "Foster organization-wide understanding and ownership of risk management",
            "Training programs, communication campaigns, and incentive alignment",
        )
        .with_timeline("6-12 months")
        .with_success_metrics([
            "Risk awareness survey scores >80%",
            "Proactive risk reporting increases",
            "Risk-informed decision making adoption",
        ]),
        Recommendation::new(
            "Establish continuous learning from risk events",
            "Convert risk materializations into organizational learning opportunities",
            "Post-incident reviews, knowledge sharing sessions, and lessons learned database",
        )
        .with_timeline("3-6 months")
        .with_success_metrics([
            "Lessons learned capture rate >90%",
            "Preventive measure implementation rate >80%",
            "Repeat risk incidents <10%",
        ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn risk(probability: f64, overall: ImpactTier) -> IdentifiedRisk {
        IdentifiedRisk {
            id: "r".into(),
            title: "Risk".into(),
            category: RiskCategory::Operational,
            description: String::new(),
            probability,
            impact: RiskImpact {
                financial: 1.0,
                operational: 1.0,
                strategic: 1.0,
                reputational: 1.0,
                overall,
            },
            risk_score: probability * overall.risk_score(),
            timeframe: "short_term".into(),
            triggers: vec![],
            indicators: vec![],
            interconnections: vec![],
        }
    }

    #[test]
    fn test_calm_portfolio_has_no_immediate_actions() {
        let plan = build_recommendations(&[risk(0.4, ImpactTier::Medium)]);
        assert!(plan.immediate.is_empty());
        assert_eq!(plan.strategic.len(), 1);
        assert_eq!(plan.short_term.len(), 2);
    }

    #[test]
    fn test_critical_and_likely_risks_trigger_immediate_actions() {
        let plan = build_recommendations(&[
            risk(0.8, ImpactTier::Critical),
            risk(0.9, ImpactTier::Low),
        ]);
        assert_eq!(plan.immediate.len(), 2);
        assert_eq!(plan.immediate[0].priority, ImpactTier::Critical);
        assert_eq!(
            plan.immediate[1].rationale,
            "2 risks have >70% probability of occurrence"
        );
    }
}
