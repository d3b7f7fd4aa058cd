//! Per-initiative readiness: resources, risk coverage, backing, enablers.

use super::types::*;
use crate::core::{clamp_unit, safe_ratio, ImpactTier};
use crate::metrics::mean_by;

/// Score used for a dimension with nothing to assess.
const NEUTRAL: f64 = 0.5;
/// Risk mitigation score for an initiative with no recorded risks.
const UNRISKED: f64 = 0.8;
const MAX_LEVERAGE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitiativeAssessment {
    pub resource_adequacy: f64,
    pub risk_mitigation: f64,
    pub stakeholder_support: f64,
    pub enabler_strength: f64,
}

impl Default for InitiativeAssessment {
    fn default() -> Self {
        Self {
            resource_adequacy: NEUTRAL,
            risk_mitigation: UNRISKED,
            stakeholder_support: NEUTRAL,
            enabler_strength: NEUTRAL,
        }
    }
}

impl InitiativeAssessment {
    /// Neutral 0.5 shifted by each dimension's distance from neutral.
    pub fn score(&self) -> f64 {
        clamp_unit(
            NEUTRAL
                + (self.resource_adequacy - NEUTRAL) * 0.3
                + (self.risk_mitigation - NEUTRAL) * 0.25
                + (self.stakeholder_support - NEUTRAL) * 0.25
                + (self.enabler_strength - NEUTRAL) * 0.2,
        )
    }
}

fn budget_points(budget: &Budget) -> f64 {
    let ratio = if budget.required <= 0.0 {
        1.0
    } else {
        safe_ratio(budget.allocated, budget.required)
    };
    if ratio >= 1.0 {
        0.3
    } else if ratio >= 0.9 {
        0.25
    } else if ratio >= 0.8 {
        0.2
    } else {
        0.1
    }
}

pub fn resource_adequacy(resources: &InitiativeResources) -> f64 {
    let team = &resources.team;
    let experience = match team.experience {
        Experience::Junior => 0.3,
        Experience::Mixed => 0.6,
        Experience::Senior => 0.8,
        Experience::Expert => 1.0,
    };
    let stability = match team.stability {
        Level::Low => 0.3,
        Level::Medium => 0.6,
        Level::High => 0.9,
    };
    let maturity = match resources.technology.maturity {
        TechnologyMaturity::Experimental => 0.3,
        TechnologyMaturity::Emerging => 0.5,
        TechnologyMaturity::Established => 0.8,
        TechnologyMaturity::Mature => 0.9,
    };
    let expertise = match resources.technology.internal_expertise {
        Expertise::None => 0.2,
        Expertise::Basic => 0.4,
        Expertise::Intermediate => 0.7,
        Expertise::Advanced => 0.9,
    };

    let score = budget_points(&resources.budget)
        + experience * 0.15
        + team.availability * 0.15
        + team.skill_match * 0.15
        + stability * 0.1
        + maturity * 0.1
        + expertise * 0.05;
    score.min(1.0)
}

/// Mitigation effectiveness weighted by each risk's expected magnitude.
pub fn risk_mitigation(risks: &[InitiativeRisk]) -> f64 {
    let (covered, exposure) = risks.iter().fold((0.0, 0.0), |(covered, exposure), risk| {
        let weight = risk.probability * risk.impact.magnitude.weight();
        (
            covered + risk.mitigation.effectiveness * weight,
            exposure + weight,
        )
    });
    if exposure > 0.0 {
        clamp_unit(covered / exposure)
    } else {
        UNRISKED
    }
}

fn influence_weight(influence: ImpactTier) -> f64 {
    match influence {
        ImpactTier::Low => 0.1,
        ImpactTier::Medium => 0.3,
        ImpactTier::High => 0.6,
        ImpactTier::Critical => 1.0,
    }
}

fn support_value(support: Support) -> f64 {
    match support {
        Support::Opposed => 0.1,
        Support::Neutral => 0.5,
        Support::Supportive => 0.8,
        Support::Champion => 1.0,
    }
}

/// Support averaged over stakeholders, weighted by influence.
pub fn stakeholder_support(stakeholders: &[Stakeholder]) -> f64 {
    let (support, influence) = stakeholders
        .iter()
        .fold((0.0, 0.0), |(support, influence), s| {
            let weight = influence_weight(s.influence);
            (support + support_value(s.support) * weight, influence + weight)
        });
    if influence > 0.0 {
        clamp_unit(support / influence)
    } else {
        NEUTRAL
    }
}

pub fn enabler_strength(enablers: &[Enabler]) -> f64 {
    if enablers.is_empty() {
        return NEUTRAL;
    }
    let strength = mean_by(enablers, |e| {
        let base = match e.strength {
            EnablerStrength::Weak => 0.3,
            EnablerStrength::Moderate => 0.6,
            EnablerStrength::Strong => 0.8,
            EnablerStrength::Exceptional => 1.0,
        };
        base * (e.leverage / MAX_LEVERAGE).min(1.0) * e.availability
    });
    clamp_unit(strength)
}

/// Mean initiative score, neutral when there are no initiatives.
pub fn initiative_score(assessments: &[InitiativeAssessment]) -> f64 {
    if assessments.is_empty() {
        return NEUTRAL;
    }
    mean_by(assessments, InitiativeAssessment::score)
}
