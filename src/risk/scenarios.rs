//! Risk scenarios with cumulative impact timelines and cascading effects.

use super::types::*;
use crate::composer::ScenarioSet;
use crate::core::ImpactTier;

/// Risks considered for single and combined scenarios.
pub const SCENARIO_DEPTH: usize = 3;
/// Risks combined into the compound tail scenario.
pub const TAIL_DEPTH: usize = 5;

const PERIODS: [&str; 4] = ["1 month", "3 months", "6 months", "12 months"];

/// One scenario before its impacts are expanded.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioDraft {
    pub id: String,
    pub name: String,
    pub description: String,
    pub probability: f64,
    pub risks: Vec<IdentifiedRisk>,
    pub kind: DraftKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftKind {
    Baseline,
    Single,
    Combined,
}

/// Which draft fills each slot of the scenario set.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioPlan {
    pub best: ScenarioDraft,
    pub most_likely: ScenarioDraft,
    pub worst: ScenarioDraft,
    pub tail: Option<ScenarioDraft>,
}

pub fn plan_scenarios(risks: &[IdentifiedRisk]) -> ScenarioPlan {
    let top: Vec<&IdentifiedRisk> = risks.iter().take(SCENARIO_DEPTH).collect();
    let singles: Vec<ScenarioDraft> = top
        .iter()
        .enumerate()
        .map(|(index, risk)| single_draft(index, risk))
        .collect();

    let best = baseline_draft(&top);
    let most_likely = singles
        .iter()
        .fold(None::<&ScenarioDraft>, |chosen, draft| match chosen {
            Some(current) if current.probability >= draft.probability => Some(current),
            _ => Some(draft),
        })
        .cloned()
        .unwrap_or_else(|| best.clone());

    let worst = if top.len() >= 2 {
        combined_draft(
            "scenario_combined",
            "Multiple Risk Realization",
            "Scenario where multiple high-probability risks occur simultaneously",
            &top,
        )
    } else {
        singles.first().cloned().unwrap_or_else(|| best.clone())
    };

    let tail = (risks.len() > SCENARIO_DEPTH).then(|| {
        let deep: Vec<&IdentifiedRisk> = risks.iter().take(TAIL_DEPTH).collect();
        combined_draft(
            "scenario_compound",
            "Compound Risk Realization",
            "Scenario where the most severe identified risks materialize together",
            &deep,
        )
    });

    ScenarioPlan {
        best,
        most_likely,
        worst,
        tail,
    }
}

fn single_draft(index: usize, risk: &IdentifiedRisk) -> ScenarioDraft {
    ScenarioDraft {
        id: format!("scenario_{}", index + 1),
        name: format!("{} Realization", risk.title),
        description: format!("Scenario where {} occurs", risk.title.to_lowercase()),
        probability: risk.probability,
        risks: vec![risk.clone()],
        kind: DraftKind::Single,
    }
}

fn combined_draft(
    id: &str,
    name: &str,
    description: &str,
    risks: &[&IdentifiedRisk],
) -> ScenarioDraft {
    ScenarioDraft {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        probability: risks.iter().map(|r| r.probability).product(),
        risks: risks.iter().map(|r| (*r).clone()).collect(),
        kind: DraftKind::Combined,
    }
}

/// No top risk materializes.
fn baseline_draft(top: &[&IdentifiedRisk]) -> ScenarioDraft {
    ScenarioDraft {
        id: "scenario_baseline".to_string(),
        name: "Business as Usual".to_string(),
        description: "Scenario where none of the leading risks materializes".to_string(),
        probability: top.iter().map(|r| 1.0 - r.probability).product(),
        risks: Vec::new(),
        kind: DraftKind::Baseline,
    }
}

pub fn expand_plan(plan: ScenarioPlan) -> ScenarioSet<RiskScenario> {
    let set = ScenarioSet::new(
        expand(plan.best),
        expand(plan.most_likely),
        expand(plan.worst),
    );
    match plan.tail {
        Some(tail) => set.with_tail(expand(tail)),
        None => set,
    }
}

pub fn expand(draft: ScenarioDraft) -> RiskScenario {
    let impacts = match draft.kind {
        DraftKind::Baseline => baseline_impacts(),
        DraftKind::Single => match draft.risks.first() {
            Some(risk) => single_risk_impacts(risk),
            None => baseline_impacts(),
        },
        DraftKind::Combined => combined_impacts(&draft.risks),
    };
    RiskScenario {
        id: draft.id,
        name: draft.name,
        description: draft.description,
        probability: draft.probability,
        risk_combination: draft.risks.iter().map(|r| r.id.clone()).collect(),
        impacts,
    }
}

fn period_effect(period: &str) -> &'static str {
    match period {
        "1 month" => "Initial impact and immediate response",
        "3 months" => "Adaptation and mitigation efforts underway",
        "6 months" => "Stabilization and recovery planning",
        _ => "Long-term adjustments and lessons integration",
    }
}

fn recovery_time(tier: ImpactTier) -> &'static str {
    match tier {
        ImpactTier::Low => "3-6 months",
        ImpactTier::Medium => "6-12 months",
        ImpactTier::High => "12-18 months",
        ImpactTier::Critical => "18+ months",
    }
}

fn effect(effect: &str, delay: &str, magnitude: EffectMagnitude) -> CascadingEffect {
    CascadingEffect {
        effect: effect.to_string(),
        delay: delay.to_string(),
        magnitude,
    }
}

pub fn single_risk_impacts(risk: &IdentifiedRisk) -> ScenarioImpacts {
    let timeline = PERIODS
        .iter()
        .enumerate()
        .map(|(index, period)| ImpactPeriod {
            period: period.to_string(),
            cumulative_impact: (index + 1) as f64 * risk.impact.financial * 0.25,
            key_effects: vec![
                format!("{}: {}", period, period_effect(period)),
                format!("Operational disruption level: {}", index + 1),
            ],
        })
        .collect();

    let mut cascading_effects = vec![effect(
        "Customer confidence decline",
        "2 weeks",
        EffectMagnitude::Moderate,
    )];
    if risk.impact.overall.is_high_or_critical() {
        cascading_effects.push(effect("Investor concern", "1 month", EffectMagnitude::Major));
    }

    let mut permanent_changes = Vec::new();
    if risk.impact.strategic >= 5.0 {
        permanent_changes.push("Modified strategic approach".to_string());
    }
    if risk.impact.operational >= 5.0 {
        permanent_changes.push("Updated operational procedures".to_string());
    }
    if risk.impact.financial >= 7.0 {
        permanent_changes.push("Revised financial planning".to_string());
    }
    if permanent_changes.is_empty() {
        permanent_changes.push("Enhanced risk awareness".to_string());
    }

    ScenarioImpacts {
        timeline,
        cascading_effects,
        recovery_time: recovery_time(risk.impact.overall).to_string(),
        permanent_changes,
    }
}

pub fn combined_impacts(risks: &[IdentifiedRisk]) -> ScenarioImpacts {
    let financial: f64 = risks.iter().map(|r| r.impact.financial).sum();
    let timeline = PERIODS
        .iter()
        .enumerate()
        .map(|(index, period)| ImpactPeriod {
            period: period.to_string(),
            cumulative_impact: (index + 1) as f64 * financial * 0.3,
            key_effects: vec![
                format!("{}: Multiple risk realization", period),
                "Compound operational disruption".to_string(),
                "Stakeholder confidence severely impacted".to_string(),
            ],
        })
        .collect();

    ScenarioImpacts {
        timeline,
        cascading_effects: vec![
            effect("Market confidence collapse", "1 week", EffectMagnitude::Severe),
            effect("Funding difficulties", "2 weeks", EffectMagnitude::Major),
            effect("Talent retention issues", "1 month", EffectMagnitude::Major),
        ],
        recovery_time: "18-24 months".to_string(),
        permanent_changes: [
            "Reduced market position",
            "Changed stakeholder relationships",
            "Modified business model",
            "Altered growth trajectory",
        ]
        .iter()
        .map(|c| c.to_string())
        .collect(),
    }
}

fn baseline_impacts() -> ScenarioImpacts {
    ScenarioImpacts {
        timeline: PERIODS
            .iter()
            .map(|period| ImpactPeriod {
                period: period.to_string(),
                cumulative_impact: 0.0,
                key_effects: vec![format!("{}: Operations continue as planned", period)],
            })
            .collect(),
        cascading_effects: Vec::new(),
        recovery_time: "Not applicable".to_string(),
        permanent_changes: Vec::new(),
    }
}

/// Neutral scenario set served when the assessment cannot be computed.
pub fn neutral_scenarios() -> ScenarioSet<RiskScenario> {
    let neutral = |id: &str, name: &str, probability: f64| RiskScenario {
        id: id.to_string(),
        name: name.to_string(),
        description: "Insufficient data to model this scenario".to_string(),
        probability,
        risk_combination: Vec::new(),
        impacts: baseline_impacts(),
    };
    ScenarioSet::new(
        neutral("scenario_favorable", "Favorable Conditions", 0.2),
        neutral("scenario_expected", "Expected Conditions", 0.6),
        neutral("scenario_adverse", "Adverse Conditions", 0.2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn risk(id: &str, probability: f64, financial: f64, overall: ImpactTier) -> IdentifiedRisk {
        IdentifiedRisk {
            id: id.to_string(),
            title: format!("{} Risk", id),
            category: RiskCategory::Financial,
            description: String::new(),
            probability,
            impact: RiskImpact {
                financial,
                operational: 3.0,
                strategic: 6.0,
                reputational: 2.0,
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
    fn test_no_risks_yields_baseline_everywhere() {
        let set = expand_plan(plan_scenarios(&[]));
        assert_eq!(set.best.probability, 1.0);
        assert_eq!(set.most_likely.id, "scenario_baseline");
        assert_eq!(set.worst.id, "scenario_baseline");
        assert!(set.tail.is_none());
    }

    #[test]
    fn test_single_risk_fills_worst_with_itself() {
        let risks = vec![risk("a", 0.4, 4.0, ImpactTier::Medium)];
        let set = expand_plan(plan_scenarios(&risks));
        assert!((set.best.probability - 0.6).abs() < 1e-12);
        assert_eq!(set.worst.id, "scenario_1");
        assert_eq!(set.worst.risk_combination, vec!["a".to_string()]);
    }

    #[test]
    fn test_slots_with_many_risks() {
        let risks = vec![
            risk("a", 0.5, 8.0, ImpactTier::High),
            risk("b", 0.6, 4.0, ImpactTier::Medium),
            risk("c", 0.4, 4.0, ImpactTier::Medium),
            risk("d", 0.3, 4.0, ImpactTier::Low),
        ];
        let set = expand_plan(plan_scenarios(&risks));

        assert_eq!(set.most_likely.id, "scenario_2");
        assert_eq!(set.worst.id, "scenario_combined");
        assert!((set.worst.probability - 0.12).abs() < 1e-12);
        assert!((set.best.probability - 0.5 * 0.4 * 0.6).abs() < 1e-12);

        let tail = set.tail.as_ref().unwrap();
        assert_eq!(tail.risk_combination.len(), 4);
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_single_risk_impacts_follow_tier() {
        let impacts = single_risk_impacts(&risk("a", 0.5, 8.0, ImpactTier::High));
        let cumulative: Vec<f64> = impacts.timeline.iter().map(|p| p.cumulative_impact).collect();
        assert_eq!(cumulative, vec![2.0, 4.0, 6.0, 8.0]);
        assert_eq!(impacts.cascading_effects.len(), 2);
        assert_eq!(impacts.recovery_time, "12-18 months");
        assert_eq!(
            impacts.permanent_changes,
            vec!["Modified strategic approach", "Revised financial planning"]
        );
        assert_eq!(
            impacts.timeline[0].key_effects[0],
            "1 month: Initial impact and immediate response"
        );
    }

    #[test]
    fn test_combined_impacts_sum_financial_exposure() {
        let risks = vec![
            risk("a", 0.5, 4.0, ImpactTier::Medium),
            risk("b", 0.5, 6.0, ImpactTier::Medium),
        ];
        let impacts = combined_impacts(&risks);
        assert!((impacts.timeline[3].cumulative_impact - 12.0).abs() < 1e-9);
        assert_eq!(impacts.recovery_time, "18-24 months");
    }
}
