use crate::composer::{RecommendationPlan, ScenarioSet, Weighted};
use crate::core::{Controllability, ImpactTier, TimeHorizon, TrendDirection};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// Request
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}

fn enabled() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionScope {
    pub timeframe: TimeHorizon,
    pub granularity: Granularity,
    /// Emit per-member predictions in the result.
    #[serde(default = "enabled")]
    pub include_individuals: bool,
    #[serde(default = "enabled")]
    pub include_team_metrics: bool,
    /// Emit per-project predictions in the result.
    #[serde(default = "enabled")]
    pub include_project_outcomes: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub skill: String,
    /// Proficiency on a 1-10 scale.
    pub level: f64,
    #[serde(default)]
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceVector {
    pub efficiency: f64,
    pub quality: f64,
    pub collaboration: f64,
    pub innovation: f64,
}

impl PerformanceVector {
    pub fn average(&self) -> f64 {
        (self.efficiency + self.quality + self.collaboration + self.innovation) / 4.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub role: String,
    /// Years of experience.
    pub experience: f64,
    #[serde(default)]
    pub skills: Vec<Skill>,
    /// Utilization in `[0, 1]`.
    pub workload: f64,
    pub performance: PerformanceVector,
}

impl TeamMember {
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s.skill == skill)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub priority: ImpactTier,
    /// Complexity on a 1-10 scale.
    pub complexity: f64,
    pub deadline: NaiveDate,
    pub progress: f64,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub assigned_members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleMetrics {
    pub tasks_completed: f64,
    pub average_quality: f64,
    pub meets_deadlines: f64,
    pub collaboration_score: f64,
}

/// One dated performance observation for a member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSample {
    pub date: NaiveDate,
    pub member_id: String,
    pub metrics: SampleMetrics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamData {
    #[serde(default)]
    pub members: Vec<TeamMember>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub historical_performance: Vec<PerformanceSample>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalEffect {
    pub period: String,
    /// Signed effect in `[-1, 1]`.
    pub impact: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketOutlook {
    Excellent,
    Good,
    #[default]
    Fair,
    Poor,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeImpact {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationalChange {
    pub change: String,
    pub impact: ChangeImpact,
    pub timeframe: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceConstraint {
    pub resource: String,
    pub availability: f64,
    pub impact: ImpactTier,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextualFactors {
    #[serde(default)]
    pub seasonality: Vec<SeasonalEffect>,
    #[serde(default)]
    pub market_conditions: MarketOutlook,
    #[serde(default)]
    pub organizational_changes: Vec<OrganizationalChange>,
    #[serde(default)]
    pub resource_constraints: Vec<ResourceConstraint>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationFocus {
    Efficiency,
    Quality,
    Speed,
    Innovation,
    #[default]
    Balanced,
}

fn default_confidence_threshold() -> f64 {
    0.8
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSettings {
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,
    #[serde(default = "enabled")]
    pub include_risk_factors: bool,
    #[serde(default = "enabled")]
    pub enable_scenario_modeling: bool,
    #[serde(default)]
    pub optimization_focus: OptimizationFocus,
}

impl Default for PredictionSettings {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            include_risk_factors: true,
            enable_scenario_modeling: true,
            optimization_focus: OptimizationFocus::Balanced,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformancePredictionRequest {
    pub team_id: String,
    /// Reference date for trajectories and completion estimates.
    pub as_of: NaiveDate,
    pub prediction_scope: PredictionScope,
    pub team_data: TeamData,
    #[serde(default)]
    pub contextual_factors: ContextualFactors,
    #[serde(default)]
    pub prediction_settings: PredictionSettings,
}

// =============================================================================
// Result: individuals
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPrediction {
    pub current: f64,
    pub predicted: f64,
    pub trend: TrendDirection,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRiskFactor {
    pub factor: String,
    pub probability: f64,
    pub impact: ImpactTier,
    pub mitigation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberPredictions {
    pub productivity: MetricPrediction,
    pub quality: MetricPrediction,
    pub collaboration: MetricPrediction,
    pub risk_factors: Vec<MemberRiskFactor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualPrediction {
    pub member_id: String,
    pub member_name: String,
    pub role: String,
    pub predictions: MemberPredictions,
}

impl IndividualPrediction {
    /// Mean of the three predicted metrics.
    pub fn predicted_average(&self) -> f64 {
        let p = &self.predictions;
        (p.productivity.predicted + p.quality.predicted + p.collaboration.predicted) / 3.0
    }

    pub fn has_high_impact_risk(&self) -> bool {
        self.predictions
            .risk_factors
            .iter()
            .any(|rf| rf.impact == ImpactTier::High)
    }
}

// =============================================================================
// Result: team
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallPerformance {
    pub current: f64,
    pub predicted: f64,
    pub trajectory: Vec<TrajectoryPoint>,
    pub trend: TrendDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollaborationMetrics {
    pub team_cohesion: f64,
    pub communication_efficiency: f64,
    pub conflict_probability: f64,
    pub synergy_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityBottleneck {
    pub area: String,
    pub severity: ImpactTier,
    pub expected_duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityForecast {
    pub current_utilization: f64,
    pub predicted_utilization: f64,
    pub bottlenecks: Vec<CapacityBottleneck>,
    pub scalability_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamPredictions {
    pub overall_performance: OverallPerformance,
    pub collaboration: CollaborationMetrics,
    pub capacity: CapacityForecast,
}

// =============================================================================
// Result: projects
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionalResource {
    pub resource: String,
    pub amount: f64,
    pub urgency: ImpactTier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reallocation {
    pub from: String,
    pub to: String,
    pub rationale: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceRequirements {
    pub additional: Vec<AdditionalResource>,
    pub reallocation: Vec<Reallocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectOutlook {
    pub completion_probability: f64,
    pub estimated_completion: NaiveDate,
    pub quality_score: f64,
    pub risk_level: ImpactTier,
    pub resource_requirements: ResourceRequirements,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectPrediction {
    pub project_id: String,
    pub project_name: String,
    pub predictions: ProjectOutlook,
}

// =============================================================================
// Result: scenarios, insights
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcomes {
    pub team_performance: f64,
    pub project_success: f64,
    pub member_satisfaction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceScenario {
    pub scenario: String,
    pub probability: f64,
    pub outcomes: ScenarioOutcomes,
    /// Enablers, assumptions, or risks depending on the scenario.
    pub drivers: Vec<String>,
}

impl Weighted for PerformanceScenario {
    fn probability(&self) -> f64 {
        self.probability
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyInsight {
    pub insight: String,
    pub category: InsightCategory,
    pub importance: ImpactTier,
    pub actionable: bool,
    pub timeframe: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    TeamPerformance,
    ProjectRisk,
    CapacityManagement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceDriver {
    pub driver: String,
    pub impact: f64,
    pub controllability: Controllability,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskArea {
    pub area: String,
    pub probability: f64,
    pub impact: ImpactTier,
    pub indicators: Vec<String>,
    pub prevention_strategies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    pub key_insights: Vec<KeyInsight>,
    pub performance_drivers: Vec<PerformanceDriver>,
    pub risk_areas: Vec<RiskArea>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformancePredictionResult {
    pub individual_predictions: Vec<IndividualPrediction>,
    pub team_predictions: TeamPredictions,
    pub project_predictions: Vec<ProjectPrediction>,
    pub scenario_analysis: ScenarioSet<PerformanceScenario>,
    pub insights: Insights,
    pub recommendations: RecommendationPlan,
}
