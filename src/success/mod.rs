//! Success-probability estimation.
//!
//! The overall probability starts from a neutral 0.5, moves with the
//! organizational (40%), market (30%), and initiative (30%) component
//! scores, is scaled by a historical multiplier in `[0.7, 1.3]`, and is
//! clamped to `[0, 1]`. Four scenarios are placed around it.

pub mod factors;
pub mod historical;
pub mod initiative;
pub mod scenarios;
pub mod types;
mod validation;

pub use types::*;

use crate::composer::ScenarioSet;
use crate::core::clamp_unit;
use crate::engine::{Analysis, Engine, EngineKind, Registry};
use crate::errors::EngineError;
use crate::observability::{set_phase, EnginePhase};
use initiative::InitiativeAssessment;
use once_cell::sync::Lazy;
use tracing::debug;

const BASE_PROBABILITY: f64 = 0.5;
const ORGANIZATIONAL_WEIGHT: f64 = 0.4;
const MARKET_WEIGHT: f64 = 0.3;
const INITIATIVE_WEIGHT: f64 = 0.3;

const METHODOLOGY: &str = "Weighted factor analysis with historical adjustment";
const ASSUMPTIONS: [&str; 4] = [
    "Historical patterns continue to apply",
    "No major external disruptions",
    "Resource availability as planned",
    "Stakeholder support remains consistent",
];
const LIMITATIONS: [&str; 4] = [
    "Model based on available historical data",
    "External factors may change rapidly",
    "Individual initiative variations not fully captured",
    "Correlation effects may be underestimated",
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Working state threaded through the registered stages.
#[derive(Debug)]
pub struct SuccessPipeline<'a> {
    pub request: &'a SuccessProbabilityRequest,
    pub components: ComponentScores,
    pub assessments: Vec<InitiativeAssessment>,
    pub overall: Option<OverallProbability>,
    pub initiative_probabilities: Vec<InitiativeProbability>,
    pub scenarios: Option<ScenarioSet<SuccessScenario>>,
}

impl<'a> SuccessPipeline<'a> {
    pub fn new(request: &'a SuccessProbabilityRequest) -> Self {
        Self {
            request,
            components: ComponentScores::default(),
            assessments: vec![InitiativeAssessment::default(); request.initiatives.len()],
            overall: None,
            initiative_probabilities: Vec::new(),
            scenarios: None,
        }
    }

    /// Overall probability for a given initiative score.
    fn blend(&self, initiative: f64) -> f64 {
        let c = &self.components;
        let base = BASE_PROBABILITY
            + (c.organizational - BASE_PROBABILITY) * ORGANIZATIONAL_WEIGHT
            + (c.market - BASE_PROBABILITY) * MARKET_WEIGHT
            + (initiative - BASE_PROBABILITY) * INITIATIVE_WEIGHT;
        clamp_unit(base * c.historical_adjustment)
    }
}

pub type StageFn = fn(&mut SuccessPipeline<'_>) -> Result<(), EngineError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbabilityKind {
    Calculation,
    Scenarios,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    Factors,
    Risks,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelingKind {
    Historical,
}

static PROBABILITY: Lazy<Registry<ProbabilityKind, StageFn>> = Lazy::new(|| {
    Registry::new(
        "probability_calculators",
        vec![
            (ProbabilityKind::Calculation, calculation_stage as StageFn),
            (ProbabilityKind::Scenarios, scenario_stage),
        ],
    )
});

static ANALYSIS: Lazy<Registry<AnalysisKind, StageFn>> = Lazy::new(|| {
    Registry::new(
        "analysis_engines",
        vec![
            (AnalysisKind::Factors, factor_stage as StageFn),
            (AnalysisKind::Risks, risk_stage),
            (AnalysisKind::Success, readiness_stage),
        ],
    )
});

static MODELING: Lazy<Registry<ModelingKind, StageFn>> = Lazy::new(|| {
    Registry::new(
        "modeling_engines",
        vec![(ModelingKind::Historical, historical_stage as StageFn)],
    )
});

fn factor_stage(pipeline: &mut SuccessPipeline<'_>) -> Result<(), EngineError> {
    let request = pipeline.request;
    pipeline.components.organizational =
        factors::organizational_score(&request.organizational_context)?;
    pipeline.components.market = factors::market_score(&request.market_context)?;
    Ok(())
}

fn risk_stage(pipeline: &mut SuccessPipeline<'_>) -> Result<(), EngineError> {
    let initiatives = &pipeline.request.initiatives;
    for (assessment, item) in pipeline.assessments.iter_mut().zip(initiatives) {
        assessment.risk_mitigation = initiative::risk_mitigation(&item.risk_factors);
    }
    Ok(())
}

fn readiness_stage(pipeline: &mut SuccessPipeline<'_>) -> Result<(), EngineError> {
    let initiatives = &pipeline.request.initiatives;
    for (assessment, item) in pipeline.assessments.iter_mut().zip(initiatives) {
        assessment.resource_adequacy = initiative::resource_adequacy(&item.resources);
        assessment.stakeholder_support = initiative::stakeholder_support(&item.stakeholders);
        assessment.enabler_strength = initiative::enabler_strength(&item.enablers);
    }
    pipeline.components.initiative = initiative::initiative_score(&pipeline.assessments);
    Ok(())
}

fn historical_stage(pipeline: &mut SuccessPipeline<'_>) -> Result<(), EngineError> {
    pipeline.components.historical_adjustment =
        historical::historical_adjustment(&pipeline.request.historical_data);
    Ok(())
}

fn calculation_stage(pipeline: &mut SuccessPipeline<'_>) -> Result<(), EngineError> {
    let success = pipeline.blend(pipeline.components.initiative);

    let initiative_probabilities = pipeline
        .request
        .initiatives
        .iter()
        .zip(&pipeline.assessments)
        .map(|(item, assessment)| {
            let score = assessment.score();
            InitiativeProbability {
                initiative_id: item.id.clone(),
                name: item.name.clone(),
                probability: pipeline.blend(score),
                score,
                resource_adequacy: assessment.resource_adequacy,
                risk_mitigation: assessment.risk_mitigation,
                stakeholder_support: assessment.stakeholder_support,
                enabler_strength: assessment.enabler_strength,
            }
        })
        .collect();
    pipeline.initiative_probabilities = initiative_probabilities;

    pipeline.overall = Some(OverallProbability {
        success,
        confidence: historical::confidence(pipeline.request),
        methodology: METHODOLOGY.to_string(),
        assumptions: strings(&ASSUMPTIONS),
        limitations: strings(&LIMITATIONS),
    });
    Ok(())
}

fn scenario_stage(pipeline: &mut SuccessPipeline<'_>) -> Result<(), EngineError> {
    let overall = pipeline
        .overall
        .as_ref()
        .ok_or_else(|| EngineError::computation("scenarios", "overall probability not computed"))?;
    pipeline.scenarios = Some(scenarios::build_scenarios(
        overall.success,
        &pipeline.request.initiatives,
        &overall.assumptions,
    ));
    Ok(())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SuccessEngine;

impl Engine for SuccessEngine {
    type Request = SuccessProbabilityRequest;
    type Output = SuccessProbabilityResult;

    const KIND: EngineKind = EngineKind::Success;

    fn compute(
        &self,
        request: &SuccessProbabilityRequest,
    ) -> Result<SuccessProbabilityResult, EngineError> {
        let mut pipeline = SuccessPipeline::new(request);

        {
            let _phase = set_phase(EnginePhase::Findings);
            for kind in [AnalysisKind::Factors, AnalysisKind::Risks, AnalysisKind::Success] {
                ANALYSIS.resolve(kind)?(&mut pipeline)?;
            }
            MODELING.resolve(ModelingKind::Historical)?(&mut pipeline)?;
            debug!(
                organizational = pipeline.components.organizational,
                market = pipeline.components.market,
                initiative = pipeline.components.initiative,
                historical = pipeline.components.historical_adjustment,
                "Component scores"
            );
        }

        {
            let _phase = set_phase(EnginePhase::Profile);
            PROBABILITY.resolve(ProbabilityKind::Calculation)?(&mut pipeline)?;
        }

        {
            let _phase = set_phase(EnginePhase::Scenarios);
            PROBABILITY.resolve(ProbabilityKind::Scenarios)?(&mut pipeline)?;
        }

        let overall_probability = pipeline
            .overall
            .ok_or_else(|| EngineError::computation("calculation", "overall probability missing"))?;
        let scenario_probabilities = pipeline
            .scenarios
            .ok_or_else(|| EngineError::computation("scenarios", "scenario set missing"))?;

        debug!(
            success = overall_probability.success,
            confidence = overall_probability.confidence,
            initiatives = pipeline.initiative_probabilities.len(),
            "Success probability complete"
        );

        Ok(SuccessProbabilityResult {
            overall_probability,
            component_scores: pipeline.components,
            initiative_probabilities: pipeline.initiative_probabilities,
            scenario_probabilities,
        })
    }

    fn fallback(&self, _request: &SuccessProbabilityRequest) -> SuccessProbabilityResult {
        fallback_result()
    }
}

fn fallback_scenario(scenario: OutcomeScenario, probability: f64, description: &str) -> SuccessScenario {
    SuccessScenario {
        scenario,
        probability,
        description: description.to_string(),
        drivers: Vec::new(),
    }
}

/// Heuristic 0.65 estimate with the four fixed scenarios.
pub fn fallback_result() -> SuccessProbabilityResult {
    SuccessProbabilityResult {
        overall_probability: OverallProbability {
            success: 0.65,
            confidence: 0.7,
            methodology: "Simplified heuristic analysis".to_string(),
            assumptions: strings(&["Standard market conditions", "Adequate resources"]),
            limitations: strings(&["Limited historical data", "Simplified model"]),
        },
        component_scores: ComponentScores::default(),
        initiative_probabilities: Vec::new(),
        scenario_probabilities: ScenarioSet::new(
            fallback_scenario(OutcomeScenario::BestCase, 0.85, "Optimal conditions achieved"),
            fallback_scenario(OutcomeScenario::MostLikely, 0.65, "Expected scenario"),
            fallback_scenario(
                OutcomeScenario::WorstCase,
                0.35,
                "Significant challenges encountered",
            ),
        )
        .with_tail(fallback_scenario(
            OutcomeScenario::BlackSwan,
            scenarios::BLACK_SWAN_PROBABILITY,
            "Unexpected major disruption",
        )),
    }
}

/// Estimate the probability that the planned initiatives succeed.
/// Never fails; see [`Analysis::provenance`].
pub fn calculate_success_probability(
    request: &SuccessProbabilityRequest,
) -> Analysis<SuccessProbabilityResult> {
    SuccessEngine.run(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::Validate;
    use crate::core::ImpactTier;

    fn excellent_request() -> SuccessProbabilityRequest {
        SuccessProbabilityRequest {
            analysis_scope: AnalysisScope {
                target_outcomes: vec![TargetOutcome::RevenueGrowth],
                time_horizons: vec![PlanningHorizon::MediumTerm],
                confidence_level: 0.9,
                probability_method: ProbabilityMethod::Hybrid,
            },
            initiatives: vec![],
            market_context: MarketContext {
                industry: IndustryConditions {
                    growth: 0.12,
                    volatility: Level::Low,
                    competition: CompetitionIntensity::Minimal,
                    barriers: Level::Low,
                    disruption: Disruption::Stable,
                },
                competitive: CompetitivePosition {
                    position: MarketPosition::Leader,
                    differentiation: Differentiation::Unique,
                    response_capability: ResponseSpeed::VeryFast,
                    resource_advantage: ResourceAdvantage::SignificantlyAdvantaged,
                },
                customers: CustomerConditions {
                    loyalty: Level::High,
                    price_sensitivity: Level::Low,
                    adoption_rate: AdoptionRate::Fast,
                    feedback: Feedback::VeryPositive,
                },
                external: ExternalConditions {
                    economic: EconomicOutlook::Growing,
                    regulatory: RegulatoryClimate::Enabling,
                    technological: TechnologyClimate::Leading,
                    social: SocialClimate::StrongTailwinds,
                },
            },
            organizational_context: OrganizationalContext {
                capabilities: Capabilities {
                    execution: Capability::Excellent,
                    innovation: Capability::Excellent,
                    agility: Capability::Excellent,
                    learning: Capability::Excellent,
                    collaboration: Capability::Excellent,
                },
                culture: Culture {
                    risk_tolerance: RiskAppetite::RiskSeeking,
                    change_readiness: ChangeReadiness::ChangeEmbracing,
                    performance: PerformanceCulture::Outstanding,
                    alignment: Alignment::HighlyAligned,
                },
                resources: OrganizationalResources {
                    financial: FinancialResources::Abundant,
                    human: HumanResources::WellStaffed,
                    technological: TechnologyResourceLevel::CuttingEdge,
                    operational: OperationalResources::Optimized,
                },
                track_record: TrackRecord {
                    success_rate: 0.85,
                    on_time_delivery: 0.8,
                    budget_adherence: 0.9,
                    quality_achievement: 0.85,
                    stakeholder_satisfaction: 0.8,
                },
            },
            historical_data: HistoricalOutcomes::default(),
        }
    }

    fn initiative(id: &str) -> Initiative {
        Initiative {
            id: id.into(),
            name: format!("Initiative {id}"),
            description: String::new(),
            initiative_type: InitiativeType::Market,
            priority: ImpactTier::High,
            objectives: vec![],
            resources: InitiativeResources {
                budget: Budget {
                    allocated: 200_000.0,
                    required: 180_000.0,
                    confidence: 0.8,
                    flexibility: Flexibility::Moderate,
                },
                team: TeamResources {
                    size: 8.0,
                    experience: Experience::Expert,
                    availability: 0.9,
                    skill_match: 0.9,
                    stability: Level::High,
                },
                technology: TechnologyResources {
                    maturity: TechnologyMaturity::Mature,
                    complexity: Complexity::Low,
                    internal_expertise: Expertise::Advanced,
                    external_support: SupportLevel::Extensive,
                },
                timeline: TimelineResources {
                    duration: 9.0,
                    flexibility: Flexibility::Flexible,
                    buffer_time: 0.2,
                    milestones: 5.0,
                    critical_path: false,
                },
            },
            risk_factors: vec![],
            enablers: vec![],
            assumptions: vec![],
            stakeholders: vec![Stakeholder {
                stakeholder: "CEO".into(),
                influence: ImpactTier::Critical,
                support: Support::Champion,
                engagement: Engagement::FullyEngaged,
                requirements: vec![],
                concerns: vec![],
            }],
        }
    }

    #[test]
    fn test_registries_cover_every_kind() {
        assert_eq!(PROBABILITY.len(), 2);
        assert_eq!(ANALYSIS.len(), 3);
        assert_eq!(MODELING.len(), 1);
    }

    #[test]
    fn test_favorable_context_without_history() {
        let analysis = calculate_success_probability(&excellent_request());
        assert!(analysis.is_computed(), "{:?}", analysis.provenance);

        let result = analysis.result;
        assert_eq!(result.component_scores.historical_adjustment, 1.0);
        assert_eq!(result.component_scores.initiative, 0.5);
        assert!(result.overall_probability.success > 0.5);
        assert_eq!(
            result.overall_probability.methodology,
            "Weighted factor analysis with historical adjustment"
        );
        assert_eq!(result.scenario_probabilities.len(), 4);
        assert!(result.violations().is_empty());
    }

    #[test]
    fn test_confidence_accumulates_evidence() {
        // 0.5 + 0.15 + 0.1 + 0.05 from a complete track record
        let analysis = calculate_success_probability(&excellent_request());
        assert!((analysis.result.overall_probability.confidence - 0.8).abs() < 1e-12);

        let mut req = excellent_request();
        req.organizational_context.track_record.success_rate = 0.0;
        req.initiatives = vec![initiative("a"), initiative("b")];
        let analysis = calculate_success_probability(&req);
        assert!((analysis.result.overall_probability.confidence - 0.69).abs() < 1e-12);
    }

    #[test]
    fn test_per_initiative_breakdown() {
        let mut req = excellent_request();
        req.initiatives = vec![initiative("launch")];
        let result = calculate_success_probability(&req).result;

        assert_eq!(result.initiative_probabilities.len(), 1);
        let breakdown = &result.initiative_probabilities[0];
        assert_eq!(breakdown.initiative_id, "launch");
        assert_eq!(breakdown.stakeholder_support, 1.0);
        assert_eq!(breakdown.risk_mitigation, 0.8);
        assert!(breakdown.score > 0.5);
        // One initiative: its probability is the overall probability.
        assert!((breakdown.probability - result.overall_probability.success).abs() < 1e-12);
    }

    #[test]
    fn test_failed_history_pulls_probability_down() {
        let baseline = calculate_success_probability(&excellent_request()).result;

        let mut req = excellent_request();
        req.historical_data.similar_initiatives = vec![SimilarInitiative {
            initiative_id: "old".into(),
            similarity: 0.9,
            outcome: Outcome::Failed,
            success_factors: vec![],
            failure_factors: vec!["Late launch".into()],
            lessons: vec![],
        }];
        let result = calculate_success_probability(&req).result;

        assert!((result.component_scores.historical_adjustment - 0.7).abs() < 1e-12);
        assert!(result.overall_probability.success < baseline.overall_probability.success);
    }

    #[test]
    fn test_invalid_request_serves_fallback() {
        let mut req = excellent_request();
        req.analysis_scope.confidence_level = 0.3;
        let analysis = calculate_success_probability(&req);
        assert!(analysis.is_fallback());
        assert_eq!(analysis.result, fallback_result());
        assert!(analysis.result.violations().is_empty());
        assert_eq!(analysis.result.overall_probability.success, 0.65);
    }
}
