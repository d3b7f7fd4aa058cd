//! The four canonical outcome scenarios around the overall probability.

use super::types::*;
use crate::composer::ScenarioSet;
use crate::core::{clamp_unit, ImpactTier};

const BEST_CASE_UPLIFT: f64 = 0.2;
const WORST_CASE_DROP: f64 = 0.3;
pub const BLACK_SWAN_PROBABILITY: f64 = 0.05;

fn scenario(
    scenario: OutcomeScenario,
    probability: f64,
    description: &str,
    drivers: Vec<String>,
) -> SuccessScenario {
    SuccessScenario {
        scenario,
        probability,
        description: description.to_string(),
        drivers,
    }
}

fn dedup(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = Vec::new();
    for item in items {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen
}

/// Build best / most-likely / worst around `success` plus the black-swan tail.
///
/// Drivers name the request records behind each scenario: enablers for the
/// best case, the stated assumptions for the expected case, recorded risks
/// for the worst case, and critical irreversible risks for the tail.
pub fn build_scenarios(
    success: f64,
    initiatives: &[Initiative],
    assumptions: &[String],
) -> ScenarioSet<SuccessScenario> {
    let enablers = dedup(
        initiatives
            .iter()
            .flat_map(|i| &i.enablers)
            .map(|e| e.enabler.clone()),
    );
    let risks = dedup(
        initiatives
            .iter()
            .flat_map(|i| &i.risk_factors)
            .map(|r| r.risk.clone()),
    );
    let triggers = dedup(
        initiatives
            .iter()
            .flat_map(|i| &i.risk_factors)
            .filter(|r| {
                r.impact.magnitude == ImpactTier::Critical
                    && r.impact.reversibility == Reversibility::Irreversible
            })
            .map(|r| r.risk.clone()),
    );

    ScenarioSet::new(
        scenario(
            OutcomeScenario::BestCase,
            clamp_unit(success + BEST_CASE_UPLIFT),
            "Optimal conditions achieved",
            enablers,
        ),
        scenario(
            OutcomeScenario::MostLikely,
            clamp_unit(success),
            "Expected scenario",
            assumptions.to_vec(),
        ),
        scenario(
            OutcomeScenario::WorstCase,
            clamp_unit(success - WORST_CASE_DROP),
            "Significant challenges encountered",
            risks,
        ),
    )
    .with_tail(scenario(
        OutcomeScenario::BlackSwan,
        BLACK_SWAN_PROBABILITY,
        "Unexpected major disruption",
        triggers,
    ))
}
