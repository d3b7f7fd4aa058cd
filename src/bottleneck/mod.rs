//! Bottleneck detection engine.
//!
//! Candidates come from three analyzers (processes, resources, tracked
//! metrics), are scored and filtered, then mapped, assessed for impact, and
//! turned into optimization opportunities and a monitoring plan.

pub mod dependencies;
pub mod detection;
pub mod impact;
pub mod mapping;
pub mod monitoring;
pub mod optimization;
pub mod recommendations;
pub mod types;
mod validation;

pub use types::*;

use crate::engine::{Analysis, Engine, EngineKind, Registry};
use crate::errors::EngineError;
use crate::observability::{set_phase, EnginePhase};
use dependencies::DependencyGraph;
use detection::Thresholds;
use once_cell::sync::Lazy;
use tracing::debug;

/// Working state threaded through the registered stages.
#[derive(Debug)]
pub struct BottleneckPipeline<'a> {
    pub request: &'a BottleneckDetectionRequest,
    pub thresholds: Thresholds,
    pub graph: DependencyGraph<'a>,
    pub candidates: Vec<Bottleneck>,
    pub bottlenecks: Vec<Bottleneck>,
    pub impact: ImpactAssessment,
    pub opportunities: OptimizationOpportunities,
}

impl<'a> BottleneckPipeline<'a> {
    pub fn new(request: &'a BottleneckDetectionRequest) -> Self {
        Self {
            request,
            thresholds: Thresholds::effective(&request.detection_settings),
            graph: DependencyGraph::new(&request.system_data.processes),
            candidates: Vec::new(),
            bottlenecks: Vec::new(),
            impact: ImpactAssessment::default(),
            opportunities: OptimizationOpportunities::default(),
        }
    }
}

pub type StageFn = fn(&mut BottleneckPipeline<'_>) -> Result<(), EngineError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzerKind {
    Process,
    Resource,
    Metric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizerKind {
    QuickWins,
    Strategic,
    Process,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictorKind {
    Impact,
    Cascading,
}

static ANALYZERS: Lazy<Registry<AnalyzerKind, StageFn>> = Lazy::new(|| {
    Registry::new(
        "bottleneck_analyzers",
        vec![
            (AnalyzerKind::Process, process_stage as StageFn),
            (AnalyzerKind::Resource, resource_stage),
            (AnalyzerKind::Metric, metric_stage),
        ],
    )
});

static OPTIMIZERS: Lazy<Registry<OptimizerKind, StageFn>> = Lazy::new(|| {
    Registry::new(
        "optimization_engines",
        vec![
            (OptimizerKind::QuickWins, quick_wins_stage as StageFn),
            (OptimizerKind::Strategic, strategic_stage),
            (OptimizerKind::Process, process_optimization_stage),
        ],
    )
});

static PREDICTORS: Lazy<Registry<PredictorKind, StageFn>> = Lazy::new(|| {
    Registry::new(
        "prediction_models",
        vec![
            (PredictorKind::Impact, impact_stage as StageFn),
            (PredictorKind::Cascading, cascading_stage),
        ],
    )
});

fn process_stage(pipeline: &mut BottleneckPipeline<'_>) -> Result<(), EngineError> {
    let found = detection::process_candidates(
        &pipeline.request.system_data.processes,
        &pipeline.thresholds,
        &pipeline.graph,
    );
    pipeline.candidates.extend(found);
    Ok(())
}

fn resource_stage(pipeline: &mut BottleneckPipeline<'_>) -> Result<(), EngineError> {
    let found = detection::resource_candidates(
        &pipeline.request.system_data.resources,
        &pipeline.thresholds,
        &pipeline.graph,
    );
    pipeline.candidates.extend(found);
    Ok(())
}

fn metric_stage(pipeline: &mut BottleneckPipeline<'_>) -> Result<(), EngineError> {
    let found = detection::metric_candidates(&pipeline.request.system_data.metrics);
    pipeline.candidates.extend(found);
    Ok(())
}

fn impact_stage(pipeline: &mut BottleneckPipeline<'_>) -> Result<(), EngineError> {
    pipeline.impact.overall_impact = impact::overall_impact(&pipeline.bottlenecks);
    pipeline.impact.risk_factors = impact::risk_factors(
        &pipeline.bottlenecks,
        &pipeline.request.external_factors.market_conditions,
    );
    Ok(())
}

fn cascading_stage(pipeline: &mut BottleneckPipeline<'_>) -> Result<(), EngineError> {
    pipeline.impact.cascading_effects = impact::cascading_effects(&pipeline.bottlenecks);
    Ok(())
}

fn quick_wins_stage(pipeline: &mut BottleneckPipeline<'_>) -> Result<(), EngineError> {
    pipeline.opportunities.quick_wins = optimization::quick_wins(&pipeline.bottlenecks);
    Ok(())
}

fn strategic_stage(pipeline: &mut BottleneckPipeline<'_>) -> Result<(), EngineError> {
    pipeline.opportunities.strategic_improvements =
        optimization::strategic_improvements(&pipeline.bottlenecks);
    Ok(())
}

fn process_optimization_stage(pipeline: &mut BottleneckPipeline<'_>) -> Result<(), EngineError> {
    pipeline.opportunities.process_optimizations =
        optimization::process_optimizations(&pipeline.bottlenecks);
    Ok(())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BottleneckEngine;

impl Engine for BottleneckEngine {
    type Request = BottleneckDetectionRequest;
    type Output = BottleneckDetectionResult;

    const KIND: EngineKind = EngineKind::Bottleneck;

    fn compute(
        &self,
        request: &BottleneckDetectionRequest,
    ) -> Result<BottleneckDetectionResult, EngineError> {
        let mut pipeline = BottleneckPipeline::new(request);

        {
            let _phase = set_phase(EnginePhase::Findings);
            for kind in [AnalyzerKind::Process, AnalyzerKind::Resource, AnalyzerKind::Metric] {
                ANALYZERS.resolve(kind)?(&mut pipeline)?;
            }
            let candidates = std::mem::take(&mut pipeline.candidates);
            let considered = candidates.len();
            pipeline.bottlenecks = detection::select_bottlenecks(
                candidates,
                request.detection_settings.include_minor,
            );
            debug!(
                considered,
                selected = pipeline.bottlenecks.len(),
                "Selected bottlenecks"
            );
        }

        let bottleneck_map = {
            let _phase = set_phase(EnginePhase::Profile);
            mapping::build_map(&request.system_data, &pipeline.bottlenecks)
        };

        {
            let _phase = set_phase(EnginePhase::Scenarios);
            PREDICTORS.resolve(PredictorKind::Impact)?(&mut pipeline)?;
            PREDICTORS.resolve(PredictorKind::Cascading)?(&mut pipeline)?;
        }

        let recommendations = {
            let _phase = set_phase(EnginePhase::Recommendations);
            for kind in [
                OptimizerKind::QuickWins,
                OptimizerKind::Strategic,
                OptimizerKind::Process,
            ] {
                OPTIMIZERS.resolve(kind)?(&mut pipeline)?;
            }
            recommendations::build_recommendations(&pipeline.bottlenecks, &pipeline.opportunities)
        };

        let monitoring_plan = {
            let _phase = set_phase(EnginePhase::Monitoring);
            monitoring::build_monitoring_plan(&pipeline.bottlenecks)
        };

        debug!(
            bottlenecks = pipeline.bottlenecks.len(),
            quick_wins = pipeline.opportunities.quick_wins.len(),
            "Bottleneck detection complete"
        );

        Ok(BottleneckDetectionResult {
            bottleneck_analysis: BottleneckAnalysis {
                identified_bottlenecks: pipeline.bottlenecks,
                bottleneck_map,
                impact_assessment: pipeline.impact,
            },
            optimization_opportunities: pipeline.opportunities,
            recommendations,
            monitoring_plan,
        })
    }

    fn fallback(&self, _request: &BottleneckDetectionRequest) -> BottleneckDetectionResult {
        fallback_result()
    }
}

/// Nothing detected, zero capacity, weekly review with no agenda.
pub fn fallback_result() -> BottleneckDetectionResult {
    BottleneckDetectionResult::default()
}

/// Detect operational bottlenecks. Never fails; see [`Analysis::provenance`].
pub fn detect_bottlenecks(
    request: &BottleneckDetectionRequest,
) -> Analysis<BottleneckDetectionResult> {
    BottleneckEngine.run(request)
}
