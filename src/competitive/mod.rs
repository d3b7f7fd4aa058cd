//! Competitive landscape analysis.
//!
//! Builds a market overview and per-competitor profiles from the roster,
//! scores every competitor on eight dimensions, then derives SWOT, a
//! price/quality positioning map, pricing intelligence, strategic
//! insights, and recommendations.

pub mod insights;
pub mod market;
pub mod matrix;
pub mod positioning;
pub mod pricing;
pub mod profiles;
pub mod recommendations;
pub mod swot;
pub mod types;
mod validation;

pub use types::*;

use crate::composer::RecommendationPlan;
use crate::engine::{Analysis, Engine, EngineKind, Registry};
use crate::errors::EngineError;
use crate::observability::{set_phase, EnginePhase};
use once_cell::sync::Lazy;
use tracing::debug;

/// Working state threaded through the registered stages.
#[derive(Debug)]
pub struct CompetitivePipeline<'a> {
    pub request: &'a CompetitiveAnalysisRequest,
    pub overview: Option<MarketOverview>,
    pub profiles: Vec<CompetitorProfile>,
    pub matrix: CompetitiveMatrix,
    pub swot: SwotAnalysis,
    pub current: Option<CurrentPosition>,
    pub positions: Vec<CompetitorPosition>,
    pub whitespaces: Vec<Whitespace>,
    pub repositioning: Vec<RepositioningOption>,
    pub pricing: Option<PricingIntelligence>,
    pub insights: Option<StrategicInsights>,
}

impl<'a> CompetitivePipeline<'a> {
    pub fn new(request: &'a CompetitiveAnalysisRequest) -> Self {
        Self {
            request,
            overview: None,
            profiles: Vec::new(),
            matrix: CompetitiveMatrix::default(),
            swot: SwotAnalysis::default(),
            current: None,
            positions: Vec::new(),
            whitespaces: Vec::new(),
            repositioning: Vec::new(),
            pricing: None,
            insights: None,
        }
    }

    fn overview(&self, stage: &str) -> Result<&MarketOverview, EngineError> {
        self.overview
            .as_ref()
            .ok_or_else(|| EngineError::computation(stage, "market overview not computed"))
    }

    fn current(&self, stage: &str) -> Result<&CurrentPosition, EngineError> {
        self.current
            .as_ref()
            .ok_or_else(|| EngineError::computation(stage, "current position not computed"))
    }
}

pub type StageFn = fn(&mut CompetitivePipeline<'_>) -> Result<(), EngineError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    Market,
    Competitors,
    Positioning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightKind {
    Swot,
    Strategic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositioningKind {
    Current,
    Opportunities,
}

static ANALYSIS: Lazy<Registry<AnalysisKind, StageFn>> = Lazy::new(|| {
    Registry::new(
        "analysis_engines",
        vec![
            (AnalysisKind::Market, market_stage as StageFn),
            (AnalysisKind::Competitors, competitor_stage),
            (AnalysisKind::Positioning, positioning_stage),
        ],
    )
});

static INSIGHTS: Lazy<Registry<InsightKind, StageFn>> = Lazy::new(|| {
    Registry::new(
        "insight_generators",
        vec![
            (InsightKind::Swot, swot_stage as StageFn),
            (InsightKind::Strategic, strategic_stage),
        ],
    )
});

static POSITIONING: Lazy<Registry<PositioningKind, StageFn>> = Lazy::new(|| {
    Registry::new(
        "positioning_models",
        vec![
            (PositioningKind::Current, current_position_stage as StageFn),
            (PositioningKind::Opportunities, repositioning_stage),
        ],
    )
});

fn market_stage(pipeline: &mut CompetitivePipeline<'_>) -> Result<(), EngineError> {
    pipeline.overview = Some(market::market_overview(pipeline.request));
    Ok(())
}

fn competitor_stage(pipeline: &mut CompetitivePipeline<'_>) -> Result<(), EngineError> {
    pipeline.profiles = profiles::build_profiles(pipeline.request);
    pipeline.matrix = matrix::build_matrix(pipeline.request);
    Ok(())
}

/// Competitor placement, whitespace, and pricing around our position.
fn positioning_stage(pipeline: &mut CompetitivePipeline<'_>) -> Result<(), EngineError> {
    let growth_rate = pipeline.overview("positioning")?.growth_rate;
    let positions = positioning::competitor_positions(pipeline.request);
    pipeline.whitespaces = positioning::whitespaces(pipeline.current("positioning")?, &positions);
    pipeline.positions = positions;
    pipeline.pricing = Some(pricing::build_pricing(pipeline.request, growth_rate));
    Ok(())
}

fn swot_stage(pipeline: &mut CompetitivePipeline<'_>) -> Result<(), EngineError> {
    let swot = swot::build_swot(
        pipeline.request,
        pipeline.overview("swot")?,
        &pipeline.profiles,
        &pipeline.matrix,
    );
    pipeline.swot = swot;
    Ok(())
}

fn strategic_stage(pipeline: &mut CompetitivePipeline<'_>) -> Result<(), EngineError> {
    let insights =
        insights::build_insights(pipeline.overview("insights")?, &pipeline.profiles, &pipeline.swot);
    pipeline.insights = Some(insights);
    Ok(())
}

fn current_position_stage(pipeline: &mut CompetitivePipeline<'_>) -> Result<(), EngineError> {
    pipeline.current = Some(positioning::current_position(&pipeline.request.data.company));
    Ok(())
}

fn repositioning_stage(pipeline: &mut CompetitivePipeline<'_>) -> Result<(), EngineError> {
    let options =
        positioning::repositioning_opportunities(pipeline.current("repositioning")?, &pipeline.positions);
    pipeline.repositioning = options;
    Ok(())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CompetitiveEngine;

impl Engine for CompetitiveEngine {
    type Request = CompetitiveAnalysisRequest;
    type Output = CompetitiveAnalysisResult;

    const KIND: EngineKind = EngineKind::Competitive;

    fn compute(
        &self,
        request: &CompetitiveAnalysisRequest,
    ) -> Result<CompetitiveAnalysisResult, EngineError> {
        if request.analysis_scope.competitors.is_empty() {
            return Err(EngineError::empty_input("analysis", "competitors"));
        }

        let mut pipeline = CompetitivePipeline::new(request);

        {
            let _phase = set_phase(EnginePhase::Profile);
            for kind in [AnalysisKind::Market, AnalysisKind::Competitors] {
                ANALYSIS.resolve(kind)?(&mut pipeline)?;
            }
            debug!(
                competitors = pipeline.profiles.len(),
                gaps = pipeline.matrix.gaps.len(),
                "Competitors profiled"
            );
        }

        {
            let _phase = set_phase(EnginePhase::Findings);
            INSIGHTS.resolve(InsightKind::Swot)?(&mut pipeline)?;
            POSITIONING.resolve(PositioningKind::Current)?(&mut pipeline)?;
            ANALYSIS.resolve(AnalysisKind::Positioning)?(&mut pipeline)?;
            POSITIONING.resolve(PositioningKind::Opportunities)?(&mut pipeline)?;
            INSIGHTS.resolve(InsightKind::Strategic)?(&mut pipeline)?;
        }

        let overview = pipeline
            .overview
            .ok_or_else(|| EngineError::computation("market", "market overview missing"))?;

        let recommendations = {
            let _phase = set_phase(EnginePhase::Recommendations);
            recommendations::build_recommendations(&overview, &pipeline.profiles, &pipeline.matrix)
        };

        let current_position = pipeline
            .current
            .ok_or_else(|| EngineError::computation("positioning", "current position missing"))?;
        let pricing_intelligence = pipeline
            .pricing
            .ok_or_else(|| EngineError::computation("pricing", "pricing intelligence missing"))?;
        let strategic_insights = pipeline
            .insights
            .ok_or_else(|| EngineError::computation("insights", "strategic insights missing"))?;

        debug!(
            intensity = overview.competitive_intensity,
            quadrant = %current_position.quadrant,
            whitespaces = pipeline.whitespaces.len(),
            recommendations = recommendations.len(),
            "Competitive analysis complete"
        );

        Ok(CompetitiveAnalysisResult {
            competitive_analysis: CompetitiveAnalysis {
                market_overview: overview,
                competitor_profiles: pipeline.profiles,
                competitive_matrix: pipeline.matrix,
            },
            swot_analysis: pipeline.swot,
            positioning_analysis: PositioningAnalysis {
                current_position,
                competitor_positions: pipeline.positions,
                whitespaces: pipeline.whitespaces,
                repositioning_opportunities: pipeline.repositioning,
            },
            pricing_intelligence,
            strategic_insights,
            recommendations,
        })
    }

    fn fallback(&self, _request: &CompetitiveAnalysisRequest) -> CompetitiveAnalysisResult {
        fallback_result()
    }
}

/// Empty landscape at a neutral market position.
pub fn fallback_result() -> CompetitiveAnalysisResult {
    CompetitiveAnalysisResult {
        competitive_analysis: CompetitiveAnalysis {
            market_overview: MarketOverview {
                total_market_size: 0.0,
                growth_rate: 0.0,
                competitor_count: 0,
                market_fragmentation: Level::Medium,
                competitive_intensity: 5.0,
            },
            competitor_profiles: Vec::new(),
            competitive_matrix: CompetitiveMatrix::default(),
        },
        swot_analysis: SwotAnalysis::default(),
        positioning_analysis: PositioningAnalysis {
            current_position: CurrentPosition {
                x: 0.0,
                y: 0.0,
                quadrant: Quadrant::Balanced,
                description: Quadrant::Balanced.description().to_string(),
            },
            competitor_positions: Vec::new(),
            whitespaces: Vec::new(),
            repositioning_opportunities: Vec::new(),
        },
        pricing_intelligence: PricingIntelligence {
            pricing_strategies: Vec::new(),
            price_comparison: PriceComparison {
                your_position: PricePosition::Average,
                competitive_pressure: Level::Medium,
                price_optimization_opportunity: 0.0,
            },
            pricing_recommendations: Vec::new(),
        },
        strategic_insights: StrategicInsights {
            key_insights: Vec::new(),
            competitive_trends: Vec::new(),
            market_dynamics: MarketDynamics {
                entry_barriers: Level::Medium,
                substitute_threat: Level::Medium,
                buyer_power: Level::Medium,
                supplier_power: Level::Medium,
                rivalry_intensity: Level::Medium,
            },
        },
        recommendations: RecommendationPlan::default(),
    }
}

/// Analyze the competitive landscape.
/// Never fails; see [`Analysis::provenance`].
pub fn analyze_competitive_landscape(
    request: &CompetitiveAnalysisRequest,
) -> Analysis<CompetitiveAnalysisResult> {
    CompetitiveEngine.run(request)
}
