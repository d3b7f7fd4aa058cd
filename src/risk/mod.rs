//! Risk assessment engine.
//!
//! Pipeline: profile → identified risks → scenarios → mitigation →
//! monitoring → recommendations. Stage handlers are dispatched through
//! three read-only registries so the pipeline order lives in one place.

pub mod identification;
pub mod mitigation;
pub mod monitoring;
pub mod profile;
pub mod recommendations;
pub mod scenarios;
pub mod types;
mod validation;

pub use types::*;

use crate::composer::{RecommendationPlan, ScenarioSet};
use crate::core::ImpactTier;
use crate::engine::{Analysis, Engine, EngineKind, Registry};
use crate::errors::EngineError;
use crate::observability::{set_phase, EnginePhase};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use tracing::debug;

use scenarios::ScenarioPlan;

/// Working state threaded through the registered stages.
#[derive(Debug)]
pub struct RiskPipeline<'a> {
    pub request: &'a RiskAssessmentRequest,
    pub profile: Option<RiskProfile>,
    pub risks: Vec<IdentifiedRisk>,
    pub scenario_plan: Option<ScenarioPlan>,
    pub scenarios: Option<ScenarioSet<RiskScenario>>,
    pub mitigation: MitigationStrategies,
}

impl<'a> RiskPipeline<'a> {
    pub fn new(request: &'a RiskAssessmentRequest) -> Self {
        Self {
            request,
            profile: None,
            risks: Vec::new(),
            scenario_plan: None,
            scenarios: None,
            mitigation: MitigationStrategies::default(),
        }
    }
}

pub type StageFn = fn(&mut RiskPipeline<'_>) -> Result<(), EngineError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskStage {
    Identification,
    Analysis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioStage {
    Generation,
    Impacts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MitigationStage {
    Preventive,
    Contingency,
}

static RISK_MODELS: Lazy<Registry<RiskStage, StageFn>> = Lazy::new(|| {
    Registry::new(
        "risk_models",
        vec![
            (RiskStage::Identification, identify_stage as StageFn),
            (RiskStage::Analysis, profile_stage),
        ],
    )
});

static SCENARIO_GENERATORS: Lazy<Registry<ScenarioStage, StageFn>> = Lazy::new(|| {
    Registry::new(
        "scenario_generators",
        vec![
            (ScenarioStage::Generation, plan_scenarios_stage as StageFn),
            (ScenarioStage::Impacts, scenario_impacts_stage),
        ],
    )
});

static MITIGATION_STRATEGIES: Lazy<Registry<MitigationStage, StageFn>> = Lazy::new(|| {
    Registry::new(
        "mitigation_strategies",
        vec![
            (MitigationStage::Preventive, preventive_stage as StageFn),
            (MitigationStage::Contingency, contingency_stage),
        ],
    )
});

fn profile_stage(pipeline: &mut RiskPipeline<'_>) -> Result<(), EngineError> {
    pipeline.profile = Some(profile::build_profile(pipeline.request));
    Ok(())
}

fn identify_stage(pipeline: &mut RiskPipeline<'_>) -> Result<(), EngineError> {
    pipeline.risks = identification::identify_risks(pipeline.request);
    Ok(())
}

fn plan_scenarios_stage(pipeline: &mut RiskPipeline<'_>) -> Result<(), EngineError> {
    pipeline.scenario_plan = Some(scenarios::plan_scenarios(&pipeline.risks));
    Ok(())
}

fn scenario_impacts_stage(pipeline: &mut RiskPipeline<'_>) -> Result<(), EngineError> {
    let plan = pipeline
        .scenario_plan
        .take()
        .ok_or_else(|| EngineError::computation("scenario_impacts", "scenarios were not planned"))?;
    pipeline.scenarios = Some(scenarios::expand_plan(plan));
    Ok(())
}

fn preventive_stage(pipeline: &mut RiskPipeline<'_>) -> Result<(), EngineError> {
    pipeline.mitigation.preventive_measures = mitigation::preventive_measures(&pipeline.risks);
    Ok(())
}

fn contingency_stage(pipeline: &mut RiskPipeline<'_>) -> Result<(), EngineError> {
    pipeline.mitigation.contingency_plans = mitigation::contingency_plans(&pipeline.risks);
    Ok(())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RiskEngine;

impl Engine for RiskEngine {
    type Request = RiskAssessmentRequest;
    type Output = RiskAssessmentResult;

    const KIND: EngineKind = EngineKind::Risk;

    fn compute(&self, request: &RiskAssessmentRequest) -> Result<RiskAssessmentResult, EngineError> {
        let mut pipeline = RiskPipeline::new(request);

        {
            let _phase = set_phase(EnginePhase::Profile);
            RISK_MODELS.resolve(RiskStage::Analysis)?(&mut pipeline)?;
        }
        {
            let _phase = set_phase(EnginePhase::Findings);
            RISK_MODELS.resolve(RiskStage::Identification)?(&mut pipeline)?;
            debug!(risks = pipeline.risks.len(), "Identified risks");
        }
        {
            let _phase = set_phase(EnginePhase::Scenarios);
            SCENARIO_GENERATORS.resolve(ScenarioStage::Generation)?(&mut pipeline)?;
            SCENARIO_GENERATORS.resolve(ScenarioStage::Impacts)?(&mut pipeline)?;
        }
        {
            let _phase = set_phase(EnginePhase::Recommendations);
            MITIGATION_STRATEGIES.resolve(MitigationStage::Preventive)?(&mut pipeline)?;
            MITIGATION_STRATEGIES.resolve(MitigationStage::Contingency)?(&mut pipeline)?;
            pipeline.mitigation.transfer_mechanisms =
                mitigation::transfer_mechanisms(&pipeline.risks);
        }

        let monitoring_framework = {
            let _phase = set_phase(EnginePhase::Monitoring);
            monitoring::build_monitoring(&pipeline.risks)
        };
        let recommendations = recommendations::build_recommendations(&pipeline.risks);

        let risk_profile = pipeline
            .profile
            .ok_or_else(|| EngineError::computation("profile", "risk profile missing"))?;
        let risk_scenarios = pipeline
            .scenarios
            .ok_or_else(|| EngineError::computation("scenarios", "scenario set missing"))?;

        debug!(
            score = risk_profile.overall_risk_score,
            level = %risk_profile.risk_level,
            "Risk assessment complete"
        );

        Ok(RiskAssessmentResult {
            risk_profile,
            identified_risks: pipeline.risks,
            risk_scenarios,
            mitigation_strategies: pipeline.mitigation,
            monitoring_framework,
            recommendations,
        })
    }

    fn fallback(&self, _request: &RiskAssessmentRequest) -> RiskAssessmentResult {
        fallback_result()
    }
}

/// Mid-range score with nothing identified.
pub fn fallback_result() -> RiskAssessmentResult {
    RiskAssessmentResult {
        risk_profile: RiskProfile {
            overall_risk_score: 5.0,
            risk_level: ImpactTier::Medium,
            risk_distribution: BTreeMap::new(),
            risk_trends: Vec::new(),
        },
        identified_risks: Vec::new(),
        risk_scenarios: scenarios::neutral_scenarios(),
        mitigation_strategies: MitigationStrategies::default(),
        monitoring_framework: MonitoringFramework::default(),
        recommendations: RecommendationPlan::default(),
    }
}

/// Assess organizational risk. Never fails; see [`Analysis::provenance`].
pub fn assess_risks(request: &RiskAssessmentRequest) -> Analysis<RiskAssessmentResult> {
    RiskEngine.run(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::Validate;
    use crate::core::TrendDirection;
    use chrono::NaiveDate;

    fn request() -> RiskAssessmentRequest {
        RiskAssessmentRequest {
            as_of: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            assessment_scope: AssessmentScope {
                risk_categories: RiskCategory::ALL.to_vec(),
                time_horizon: RiskHorizon::Comprehensive,
                impact_areas: vec!["revenue".into()],
                risk_tolerance: RiskTolerance::Medium,
            },
            business_context: OrganizationContext {
                industry: "software technology".into(),
                business_model: "saas".into(),
                growth_stage: GrowthStage::Growth,
                size: OrganizationSize::Small,
                geography: vec!["EU".into()],
                key_metrics: BTreeMap::from([(
                    "arr".to_string(),
                    KpiSnapshot {
                        current: 2.0,
                        target: 3.0,
                        trend: TrendDirection::Declining,
                    },
                )]),
            },
            growth_initiatives: vec![GrowthInitiative {
                id: "eu".into(),
                name: "EU Expansion".into(),
                initiative_type: InitiativeType::MarketExpansion,
                investment: 750_000.0,
                timeline: "12 months".into(),
                expected_return: 2_000_000.0,
                dependencies: vec![],
                critical_success_factors: vec![],
            }],
            historical_data: HistoricalRiskData::default(),
        }
    }

    #[test]
    fn test_registries_cover_every_stage() {
        assert_eq!(RISK_MODELS.len(), 2);
        assert_eq!(SCENARIO_GENERATORS.len(), 2);
        assert_eq!(MITIGATION_STRATEGIES.len(), 2);
    }

    #[test]
    fn test_full_assessment_is_computed() {
        let analysis = assess_risks(&request());
        assert!(analysis.is_computed(), "{:?}", analysis.provenance);

        let result = analysis.result;
        assert!(!result.identified_risks.is_empty());
        assert!(result
            .identified_risks
            .iter()
            .any(|r| r.id == "initiative_eu_execution_risk"));
        assert_eq!(result.mitigation_strategies.contingency_plans.len(), 5);
        assert!(result.risk_scenarios.tail.is_some());
        assert!(result.violations().is_empty());
    }

    #[test]
    fn test_invalid_request_serves_fallback() {
        let mut req = request();
        req.historical_data.market_events.push(MarketEvent {
            event: "shock".into(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            impact: EventImpact::Negative,
            magnitude: 1.5,
        });
        let analysis = assess_risks(&req);
        assert!(analysis.is_fallback());
        assert_eq!(analysis.result, fallback_result());
        assert!(analysis.result.violations().is_empty());
    }
}
