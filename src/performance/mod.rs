//! Team performance prediction.
//!
//! Each member's productivity, quality, and collaboration are projected
//! over the requested horizon from their dated history. Team, capacity,
//! and project outlooks are derived from those projections, then three
//! scenarios, insights, and recommendations are layered on top.

pub mod individual;
pub mod insights;
pub mod project;
pub mod recommendations;
pub mod scenarios;
pub mod team;
pub mod types;
mod validation;

pub use types::*;

use crate::composer::{RecommendationPlan, ScenarioSet};
use crate::core::TrendDirection;
use crate::engine::{Analysis, Engine, EngineKind, Registry};
use crate::errors::EngineError;
use crate::observability::{set_phase, EnginePhase};
use once_cell::sync::Lazy;
use tracing::debug;

/// Working state threaded through the registered stages.
#[derive(Debug)]
pub struct PerformancePipeline<'a> {
    pub request: &'a PerformancePredictionRequest,
    pub individuals: Vec<IndividualPrediction>,
    pub team: Option<TeamPredictions>,
    pub projects: Vec<ProjectPrediction>,
    pub scenarios: Option<ScenarioSet<PerformanceScenario>>,
    pub insights: Insights,
    pub recommendations: RecommendationPlan,
}

impl<'a> PerformancePipeline<'a> {
    pub fn new(request: &'a PerformancePredictionRequest) -> Self {
        Self {
            request,
            individuals: Vec::new(),
            team: None,
            projects: Vec::new(),
            scenarios: None,
            insights: Insights::default(),
            recommendations: RecommendationPlan::default(),
        }
    }

    fn team(&self, stage: &str) -> Result<&TeamPredictions, EngineError> {
        self.team
            .as_ref()
            .ok_or_else(|| EngineError::computation(stage, "team predictions not computed"))
    }
}

pub type StageFn = fn(&mut PerformancePipeline<'_>) -> Result<(), EngineError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionKind {
    Individual,
    Team,
    Project,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelingKind {
    Scenario,
    Risk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    Insights,
    Recommendations,
}

static PREDICTION: Lazy<Registry<PredictionKind, StageFn>> = Lazy::new(|| {
    Registry::new(
        "prediction_models",
        vec![
            (PredictionKind::Individual, individual_stage as StageFn),
            (PredictionKind::Team, team_stage),
            (PredictionKind::Project, project_stage),
        ],
    )
});

static MODELING: Lazy<Registry<ModelingKind, StageFn>> = Lazy::new(|| {
    Registry::new(
        "modeling_engines",
        vec![
            (ModelingKind::Scenario, scenario_stage as StageFn),
            (ModelingKind::Risk, risk_stage),
        ],
    )
});

static ANALYSIS: Lazy<Registry<AnalysisKind, StageFn>> = Lazy::new(|| {
    Registry::new(
        "analysis_engines",
        vec![
            (AnalysisKind::Insights, insight_stage as StageFn),
            (AnalysisKind::Recommendations, recommendation_stage),
        ],
    )
});

fn individual_stage(pipeline: &mut PerformancePipeline<'_>) -> Result<(), EngineError> {
    let request = pipeline.request;
    pipeline.individuals = request
        .team_data
        .members
        .iter()
        .map(|member| individual::predict_member(request, member))
        .collect();
    Ok(())
}

fn team_stage(pipeline: &mut PerformancePipeline<'_>) -> Result<(), EngineError> {
    let request = pipeline.request;
    let data = &request.team_data;
    pipeline.team = Some(TeamPredictions {
        overall_performance: team::overall_performance(
            &data.members,
            &pipeline.individuals,
            request.prediction_scope.timeframe,
            request.as_of,
        ),
        collaboration: team::collaboration_metrics(
            &data.members,
            &pipeline.individuals,
            &request.contextual_factors.resource_constraints,
        ),
        capacity: team::capacity_forecast(&data.members, &data.projects),
    });
    Ok(())
}

fn project_stage(pipeline: &mut PerformancePipeline<'_>) -> Result<(), EngineError> {
    let request = pipeline.request;
    let data = &request.team_data;
    let projects = data
        .projects
        .iter()
        .map(|p| project::predict_project(p, &data.members, &pipeline.individuals, request.as_of))
        .collect();
    pipeline.projects = projects;
    Ok(())
}

fn scenario_stage(pipeline: &mut PerformancePipeline<'_>) -> Result<(), EngineError> {
    let scenarios = scenarios::build_scenarios(pipeline.team("scenarios")?, &pipeline.projects);
    pipeline.scenarios = Some(scenarios);
    Ok(())
}

fn risk_stage(pipeline: &mut PerformancePipeline<'_>) -> Result<(), EngineError> {
    pipeline.insights.risk_areas = insights::risk_areas(&pipeline.individuals, &pipeline.projects);
    Ok(())
}

fn insight_stage(pipeline: &mut PerformancePipeline<'_>) -> Result<(), EngineError> {
    let key_insights =
        insights::key_insights(&pipeline.individuals, pipeline.team("insights")?, &pipeline.projects);
    pipeline.insights.key_insights = key_insights;
    pipeline.insights.performance_drivers =
        insights::performance_drivers(&pipeline.request.team_data.members, &pipeline.individuals);
    Ok(())
}

fn recommendation_stage(pipeline: &mut PerformancePipeline<'_>) -> Result<(), EngineError> {
    let scenarios = pipeline
        .scenarios
        .as_ref()
        .ok_or_else(|| EngineError::computation("recommendations", "scenarios not computed"))?;
    pipeline.recommendations = recommendations::build_recommendations(&pipeline.insights, scenarios);
    Ok(())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PerformanceEngine;

impl Engine for PerformanceEngine {
    type Request = PerformancePredictionRequest;
    type Output = PerformancePredictionResult;

    const KIND: EngineKind = EngineKind::Performance;

    fn compute(
        &self,
        request: &PerformancePredictionRequest,
    ) -> Result<PerformancePredictionResult, EngineError> {
        if request.team_data.members.is_empty() {
            return Err(EngineError::empty_input("prediction", "team members"));
        }

        let mut pipeline = PerformancePipeline::new(request);

        {
            let _phase = set_phase(EnginePhase::Profile);
            for kind in [
                PredictionKind::Individual,
                PredictionKind::Team,
                PredictionKind::Project,
            ] {
                PREDICTION.resolve(kind)?(&mut pipeline)?;
            }
            debug!(
                members = pipeline.individuals.len(),
                projects = pipeline.projects.len(),
                "Predictions computed"
            );
        }

        {
            let _phase = set_phase(EnginePhase::Scenarios);
            for kind in [ModelingKind::Scenario, ModelingKind::Risk] {
                MODELING.resolve(kind)?(&mut pipeline)?;
            }
        }

        {
            let _phase = set_phase(EnginePhase::Findings);
            ANALYSIS.resolve(AnalysisKind::Insights)?(&mut pipeline)?;
        }

        {
            let _phase = set_phase(EnginePhase::Recommendations);
            ANALYSIS.resolve(AnalysisKind::Recommendations)?(&mut pipeline)?;
        }

        let team_predictions = pipeline
            .team
            .ok_or_else(|| EngineError::computation("team", "team predictions missing"))?;
        let scenario_analysis = pipeline
            .scenarios
            .ok_or_else(|| EngineError::computation("scenarios", "scenario set missing"))?;

        debug!(
            current = team_predictions.overall_performance.current,
            predicted = team_predictions.overall_performance.predicted,
            insights = pipeline.insights.key_insights.len(),
            "Performance prediction complete"
        );

        let scope = &request.prediction_scope;
        Ok(PerformancePredictionResult {
            individual_predictions: if scope.include_individuals {
                pipeline.individuals
            } else {
                Vec::new()
            },
            team_predictions,
            project_predictions: if scope.include_project_outcomes {
                pipeline.projects
            } else {
                Vec::new()
            },
            scenario_analysis,
            insights: pipeline.insights,
            recommendations: pipeline.recommendations,
        })
    }

    fn fallback(&self, _request: &PerformancePredictionRequest) -> PerformancePredictionResult {
        fallback_result()
    }
}

/// Neutral team outlook with three fixed scenarios and nothing else.
pub fn fallback_result() -> PerformancePredictionResult {
    PerformancePredictionResult {
        individual_predictions: Vec::new(),
        team_predictions: TeamPredictions {
            overall_performance: OverallPerformance {
                current: 0.5,
                predicted: 0.5,
                trajectory: Vec::new(),
                trend: TrendDirection::Stable,
            },
            collaboration: CollaborationMetrics {
                team_cohesion: 0.5,
                communication_efficiency: 0.5,
                conflict_probability: 0.3,
                synergy_score: 0.5,
            },
            capacity: CapacityForecast {
                current_utilization: 0.5,
                predicted_utilization: 0.5,
                bottlenecks: Vec::new(),
                scalability_score: 0.5,
            },
        },
        project_predictions: Vec::new(),
        scenario_analysis: scenarios::fallback_scenarios(),
        insights: Insights::default(),
        recommendations: RecommendationPlan::default(),
    }
}

/// Predict individual, team, and project performance.
/// Never fails; see [`Analysis::provenance`].
pub fn predict_performance(
    request: &PerformancePredictionRequest,
) -> Analysis<PerformancePredictionResult> {
    PerformanceEngine.run(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::Validate;
    use crate::core::{ImpactTier, TimeHorizon};
    use chrono::NaiveDate;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn member(id: &str, workload: f64) -> TeamMember {
        TeamMember {
            id: id.into(),
            name: format!("Member {id}"),
            role: "Engineer".into(),
            experience: 4.0,
            skills: vec![Skill {
                skill: "rust".into(),
                level: 8.0,
                verified: true,
            }],
            workload,
            performance: PerformanceVector {
                efficiency: 0.8,
                quality: 0.85,
                collaboration: 0.9,
                innovation: 0.7,
            },
        }
    }

    fn request(members: Vec<TeamMember>) -> PerformancePredictionRequest {
        PerformancePredictionRequest {
            team_id: "platform".into(),
            as_of: date(3, 1),
            prediction_scope: PredictionScope {
                timeframe: TimeHorizon::ThreeMonths,
                granularity: Granularity::Weekly,
                include_individuals: true,
                include_team_metrics: true,
                include_project_outcomes: true,
            },
            team_data: TeamData {
                members,
                projects: vec![Project {
                    id: "api".into(),
                    name: "Public API".into(),
                    priority: ImpactTier::High,
                    complexity: 6.0,
                    deadline: date(6, 1),
                    progress: 0.4,
                    required_skills: vec!["rust".into()],
                    assigned_members: vec!["a".into(), "b".into()],
                }],
                historical_performance: vec![],
            },
            contextual_factors: ContextualFactors::default(),
            prediction_settings: PredictionSettings::default(),
        }
    }

    #[test]
    fn test_registries_cover_every_kind() {
        assert_eq!(PREDICTION.len(), 3);
        assert_eq!(MODELING.len(), 2);
        assert_eq!(ANALYSIS.len(), 2);
    }

    #[test]
    fn test_healthy_team_prediction() {
        let analysis = predict_performance(&request(vec![member("a", 0.6), member("b", 0.7)]));
        assert!(analysis.is_computed(), "{:?}", analysis.provenance);

        let result = analysis.result;
        assert_eq!(result.individual_predictions.len(), 2);
        assert_eq!(result.project_predictions.len(), 1);
        // 13 weekly points for a quarter
        assert_eq!(result.team_predictions.overall_performance.trajectory.len(), 13);
        assert_eq!(result.scenario_analysis.len(), 3);
        assert!(result
            .insights
            .performance_drivers
            .iter()
            .any(|d| d.driver == "Strong team collaboration"));
        assert!(result.violations().is_empty());
    }

    #[test]
    fn test_far_future_deadline_is_still_computed() {
        let mut req = request(vec![member("a", 0.6), member("b", 0.7)]);
        req.team_data.projects[0].deadline = NaiveDate::from_ymd_opt(200_000, 1, 1).unwrap();
        req.team_data.projects[0].complexity = 10.0;

        let analysis = predict_performance(&req);
        assert!(analysis.is_computed(), "{:?}", analysis.provenance);
        let outlook = &analysis.result.project_predictions[0].predictions;
        assert!(outlook.estimated_completion >= req.team_data.projects[0].deadline);
    }

    #[test]
    fn test_overloaded_team_gets_rebalancing() {
        let result = predict_performance(&request(vec![member("a", 0.95), member("b", 0.97)])).result;

        assert!(result
            .insights
            .risk_areas
            .iter()
            .any(|a| a.area == "Team workload management"));
        assert!(result
            .recommendations
            .immediate
            .iter()
            .any(|r| r.recommendation == "Implement immediate workload rebalancing"));
        let project = &result.project_predictions[0].predictions;
        assert_eq!(project.resource_requirements.reallocation.len(), 1);
    }

    #[test]
    fn test_scope_flags_trim_output() {
        let mut req = request(vec![member("a", 0.5)]);
        req.prediction_scope.include_individuals = false;
        req.prediction_scope.include_project_outcomes = false;
        let result = predict_performance(&req).result;
        assert!(result.individual_predictions.is_empty());
        assert!(result.project_predictions.is_empty());
        assert!((result.team_predictions.overall_performance.current - 0.8125).abs() < 1e-12);
    }

    #[test]
    fn test_empty_team_serves_fallback() {
        let analysis = predict_performance(&request(vec![]));
        assert!(analysis.is_fallback());
        assert_eq!(analysis.result, fallback_result());
    }

    #[test]
    fn test_invalid_request_serves_fallback() {
        let mut req = request(vec![member("a", 1.4)]);
        req.team_id = " ".into();
        let analysis = predict_performance(&req);
        assert!(analysis.is_fallback());
        assert_eq!(analysis.result, fallback_result());
        assert!(analysis.result.violations().is_empty());
    }
}
