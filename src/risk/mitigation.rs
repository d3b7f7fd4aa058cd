//! Preventive measures, contingency plans, and risk transfer.

use super::types::*;
use crate::core::ImpactTier;

pub const PREVENTIVE_LIMIT: usize = 10;
pub const CONTINGENCY_LIMIT: usize = 5;
pub const TRANSFER_LIMIT: usize = 5;

const BASE_MEASURE_COST: f64 = 10_000.0;
const SCORE_COST_SPAN: f64 = 50_000.0;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn preventive_strategy(title: &str) -> &'static str {
    const STRATEGIES: [(&str, &str); 6] = [
        ("Cash Flow", "Improve cash flow management"),
        ("Personnel", "Enhance talent retention"),
        ("Market", "Diversify market presence"),
        ("Technology", "Maintain technology currency"),
        ("Competitive", "Strengthen competitive advantages"),
        ("Regulatory", "Enhance compliance systems"),
    ];
    STRATEGIES
        .iter()
        .find(|(keyword, _)| title.contains(keyword))
        .map(|(_, strategy)| *strategy)
        .unwrap_or("Implement risk monitoring and control measures")
}

/// Deterministic cost estimate scaled by the risk score (0-10).
pub fn measure_cost(risk_score: f64) -> f64 {
    BASE_MEASURE_COST + (risk_score / 10.0 * SCORE_COST_SPAN).round()
}

fn effectiveness(risk: &IdentifiedRisk) -> f64 {
    let mut effectiveness: f64 = 0.7;
    if risk.impact.overall == ImpactTier::Low {
        effectiveness += 0.1;
    }
    if risk.probability < 0.3 {
        effectiveness += 0.1;
    }
    effectiveness.min(1.0)
}

pub fn preventive_measures(risks: &[IdentifiedRisk]) -> Vec<PreventiveMeasure> {
    risks
        .iter()
        .take(PREVENTIVE_LIMIT)
        .map(|risk| {
            let effectiveness = effectiveness(risk);
            PreventiveMeasure {
                risk_id: risk.id.clone(),
                strategy: preventive_strategy(&risk.title).to_string(),
                description: format!(
                    "Implement comprehensive measures to prevent or minimize the likelihood of {} occurring through proactive monitoring and control.",
                    risk.title.to_lowercase()
                ),
                implementation: ImplementationPlan {
                    steps: strings(&[
                        "Risk assessment and planning",
                        "Resource allocation and team assignment",
                        "Implementation of preventive measures",
                        "Monitoring and evaluation setup",
                    ]),
                    timeline: "8-12 weeks".to_string(),
                    cost: measure_cost(risk.risk_score),
                    resources: strings(&[
                        "Risk management team",
                        "Subject matter experts",
                        "Technology resources",
                    ]),
                },
                effectiveness,
                residual_risk: (risk.probability * (1.0 - effectiveness)).max(0.1),
            }
        })
        .collect()
}

fn action(action: &str, priority: ActionPriority, owner: &str, resources: &[&str]) -> ContingencyAction {
    ContingencyAction {
        action: action.to_string(),
        priority,
        owner: owner.to_string(),
        resources: strings(resources),
    }
}

pub fn contingency_plans(risks: &[IdentifiedRisk]) -> Vec<ContingencyPlan> {
    risks
        .iter()
        .take(CONTINGENCY_LIMIT)
        .map(|risk| ContingencyPlan {
            trigger_id: risk.id.clone(),
            plan: format!("Contingency Plan for {}", risk.title),
            description: format!(
                "Comprehensive response plan activated when {} materializes",
                risk.title.to_lowercase()
            ),
            activation: Activation {
                criteria: risk.triggers.clone(),
                decision_makers: strings(&["Risk Manager", "Operations Director", "CEO"]),
                timeline: "Within 24 hours of trigger event".to_string(),
            },
            actions: vec![
                action(
                    "Immediate impact assessment",
                    ActionPriority::Immediate,
                    "Risk Manager",
                    &["Assessment team", "Communication tools"],
                ),
                action(
                    "Stakeholder communication",
                    ActionPriority::Urgent,
                    "Communications Lead",
                    &["Communication channels", "Prepared messaging"],
                ),
                action(
                    "Operational response implementation",
                    ActionPriority::High,
                    "Operations Director",
                    &["Operations team", "Emergency resources"],
                ),
            ],
            success_metrics: strings(&[
                "Response time < 24 hours",
                "Stakeholder satisfaction > 70%",
                "Operational recovery within defined timeframe",
            ]),
        })
        .collect()
}

/// Insurance for risks with a substantial financial impact.
pub fn transfer_mechanisms(risks: &[IdentifiedRisk]) -> Vec<TransferMechanism> {
    risks
        .iter()
        .filter(|risk| risk.impact.financial >= 5.0)
        .take(TRANSFER_LIMIT)
        .map(|risk| TransferMechanism {
            risk_id: risk.id.clone(),
            mechanism: TransferKind::Insurance,
            description: format!(
                "Insurance coverage for financial losses related to {}",
                risk.title.to_lowercase()
            ),
            cost: risk.impact.financial * 1000.0,
            coverage: 0.8,
            limitations: strings(&[
                "Deductible applies",
                "Coverage limits",
                "Exclusions may apply",
            ]),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn risk(title: &str, probability: f64, financial: f64, overall: ImpactTier) -> IdentifiedRisk {
        IdentifiedRisk {
            id: title.to_lowercase().replace(' ', "_"),
            title: title.to_string(),
            category: RiskCategory::Financial,
            description: String::new(),
            probability,
            impact: RiskImpact {
                financial,
                operational: 2.0,
                strategic: 2.0,
                reputational: 2.0,
                overall,
            },
            risk_score: probability * overall.risk_score(),
            timeframe: "short_term".into(),
            triggers: vec!["Revenue decline".into()],
            indicators: vec![],
            interconnections: vec![],
        }
    }

    #[test]
    fn test_measure_cost_is_deterministic() {
        assert_eq!(measure_cost(0.0), 10_000.0);
        assert_eq!(measure_cost(10.0), 60_000.0);
        assert_eq!(measure_cost(2.5), 22_500.0);
    }

    #[test]
    fn test_preventive_measure_for_low_probability_low_impact() {
        let measures = preventive_measures(&[risk("Cash Flow Shortage", 0.2, 2.0, ImpactTier::Low)]);
        let measure = &measures[0];
        assert_eq!(measure.strategy, "Improve cash flow management");
        assert!((measure.effectiveness - 0.9).abs() < 1e-12);
        // 0.2 * 0.1 is below the residual floor
        assert_eq!(measure.residual_risk, 0.1);
        assert!(measure.description.contains("cash flow shortage"));
    }

    #[test]
    fn test_unknown_title_uses_default_strategy() {
        let measures = preventive_measures(&[risk("Supply Chain Disruption", 0.5, 3.0, ImpactTier::Medium)]);
        assert_eq!(
            measures[0].strategy,
            "Implement risk monitoring and control measures"
        );
        assert!((measures[0].residual_risk - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_contingency_activation_uses_triggers() {
        let plans = contingency_plans(&[risk("Cash Flow Shortage", 0.5, 3.0, ImpactTier::Medium)]);
        assert_eq!(plans[0].activation.criteria, vec!["Revenue decline".to_string()]);
        assert_eq!(plans[0].actions.len(), 3);
        assert_eq!(plans[0].actions[0].priority, ActionPriority::Immediate);
    }

    #[test]
    fn test_transfer_only_for_financial_exposure() {
        let risks = vec![
            risk("Cash Flow Shortage", 0.5, 6.0, ImpactTier::Medium),
            risk("Market Demand Risk", 0.5, 3.0, ImpactTier::Medium),
        ];
        let transfers = transfer_mechanisms(&risks);
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].cost, 6000.0);
        assert_eq!(transfers[0].mechanism, TransferKind::Insurance);
    }
}
