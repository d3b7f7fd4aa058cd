use crate::composer::{RecommendationPlan, ScenarioSet, Weighted};
use crate::core::{ImpactTier, TrendDirection};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Request
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Financial,
    Operational,
    Strategic,
    Technology,
    Regulatory,
    Market,
    Competitive,
    Environmental,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 8] = [
        Self::Financial,
        Self::Operational,
        Self::Strategic,
        Self::Technology,
        Self::Regulatory,
        Self::Market,
        Self::Competitive,
        Self::Environmental,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Financial => "financial",
            Self::Operational => "operational",
            Self::Strategic => "strategic",
            Self::Technology => "technology",
            Self::Regulatory => "regulatory",
            Self::Market => "market",
            Self::Competitive => "competitive",
            Self::Environmental => "environmental",
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskHorizon {
    ShortTerm,
    MediumTerm,
    LongTerm,
    Comprehensive,
}

impl RiskHorizon {
    pub fn label(self) -> &'static str {
        match self {
            Self::ShortTerm => "short_term",
            Self::MediumTerm => "medium_term",
            Self::LongTerm => "long_term",
            Self::Comprehensive => "comprehensive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthStage {
    Startup,
    Growth,
    Maturity,
    Decline,
    Transformation,
}

impl GrowthStage {
    /// Multiplier applied to the baseline risk score.
    pub fn risk_multiplier(self) -> f64 {
        match self {
            Self::Startup => 1.5,
            Self::Growth => 1.3,
            Self::Maturity => 1.0,
            Self::Decline => 1.4,
            Self::Transformation => 1.6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrganizationSize {
    Micro,
    Small,
    Medium,
    Large,
    Enterprise,
}

impl OrganizationSize {
    /// Smaller organizations carry more baseline risk.
    pub fn risk_multiplier(self) -> f64 {
        match self {
            Self::Micro => 1.2,
            Self::Small => 1.1,
            Self::Medium => 1.0,
            Self::Large => 0.9,
            Self::Enterprise => 0.8,
        }
    }

    /// Scale for the impact of a single realized risk.
    pub fn impact_multiplier(self) -> f64 {
        match self {
            Self::Micro => 1.5,
            Self::Small => 1.3,
            Self::Medium => 1.0,
            Self::Large => 0.8,
            Self::Enterprise => 0.6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitiativeType {
    ProductDevelopment,
    MarketExpansion,
    OperationalScaling,
    DigitalTransformation,
    Acquisition,
    Partnership,
}

impl InitiativeType {
    /// Inherent execution risk of the initiative kind.
    pub fn base_risk(self) -> f64 {
        match self {
            Self::ProductDevelopment => 0.4,
            Self::MarketExpansion => 0.35,
            Self::OperationalScaling => 0.25,
            Self::DigitalTransformation => 0.5,
            Self::Acquisition => 0.6,
            Self::Partnership => 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventImpact {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentScope {
    pub risk_categories: Vec<RiskCategory>,
    pub time_horizon: RiskHorizon,
    #[serde(default)]
    pub impact_areas: Vec<String>,
    pub risk_tolerance: RiskTolerance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    pub current: f64,
    pub target: f64,
    pub trend: TrendDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationContext {
    pub industry: String,
    #[serde(default)]
    pub business_model: String,
    pub growth_stage: GrowthStage,
    pub size: OrganizationSize,
    #[serde(default)]
    pub geography: Vec<String>,
    #[serde(default)]
    pub key_metrics: BTreeMap<String, KpiSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthInitiative {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub initiative_type: InitiativeType,
    pub investment: f64,
    pub timeline: String,
    pub expected_return: f64,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub critical_success_factors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PastRisk {
    pub risk_type: String,
    pub impact: f64,
    pub probability: f64,
    pub realized: bool,
    #[serde(default)]
    pub mitigation: String,
    #[serde(default)]
    pub lessons: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketEvent {
    pub event: String,
    pub date: NaiveDate,
    pub impact: EventImpact,
    pub magnitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub period: String,
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRiskData {
    #[serde(default)]
    pub past_risks: Vec<PastRisk>,
    #[serde(default)]
    pub market_events: Vec<MarketEvent>,
    #[serde(default)]
    pub performance_history: Vec<PerformanceRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessmentRequest {
    /// Reference date for the market-event window.
    pub as_of: NaiveDate,
    pub assessment_scope: AssessmentScope,
    pub business_context: OrganizationContext,
    #[serde(default)]
    pub growth_initiatives: Vec<GrowthInitiative>,
    #[serde(default)]
    pub historical_data: HistoricalRiskData,
}

// =============================================================================
// Result
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTrendDirection {
    Increasing,
    Stable,
    Decreasing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskTrend {
    pub category: RiskCategory,
    pub trend: RiskTrendDirection,
    pub timeframe: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub overall_risk_score: f64, // 0-10
    pub risk_level: ImpactTier,
    pub risk_distribution: BTreeMap<RiskCategory, f64>,
    pub risk_trends: Vec<RiskTrend>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskImpact {
    pub financial: f64,
    pub operational: f64,
    pub strategic: f64,
    pub reputational: f64,
    pub overall: ImpactTier,
}

impl RiskImpact {
    pub fn average(&self) -> f64 {
        (self.financial + self.operational + self.strategic + self.reputational) / 4.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorTrend {
    Improving,
    Stable,
    Deteriorating,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskIndicator {
    pub indicator: String,
    pub current_value: f64,
    pub threshold: f64,
    pub trend: IndicatorTrend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Causal,
    Correlated,
    Conditional,
    MutuallyExclusive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interconnection {
    pub related_risk_id: String,
    pub relationship: Relationship,
    pub strength: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifiedRisk {
    pub id: String,
    pub title: String,
    pub category: RiskCategory,
    pub description: String,
    pub probability: f64,
    pub impact: RiskImpact,
    pub risk_score: f64, // probability x impact tier score
    pub timeframe: String,
    pub triggers: Vec<String>,
    pub indicators: Vec<RiskIndicator>,
    pub interconnections: Vec<Interconnection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectMagnitude {
    Minor,
    Moderate,
    Major,
    Severe,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CascadingEffect {
    pub effect: String,
    pub delay: String,
    pub magnitude: EffectMagnitude,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactPeriod {
    pub period: String,
    pub cumulative_impact: f64,
    pub key_effects: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioImpacts {
    pub timeline: Vec<ImpactPeriod>,
    pub cascading_effects: Vec<CascadingEffect>,
    pub recovery_time: String,
    pub permanent_changes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScenario {
    pub id: String,
    pub name: String,
    pub description: String,
    pub probability: f64,
    pub risk_combination: Vec<String>,
    pub impacts: ScenarioImpacts,
}

impl Weighted for RiskScenario {
    fn probability(&self) -> f64 {
        self.probability
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImplementationPlan {
    pub steps: Vec<String>,
    pub timeline: String,
    pub cost: f64,
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreventiveMeasure {
    pub risk_id: String,
    pub strategy: String,
    pub description: String,
    pub implementation: ImplementationPlan,
    pub effectiveness: f64,
    pub residual_risk: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionPriority {
    Immediate,
    Urgent,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContingencyAction {
    pub action: String,
    pub priority: ActionPriority,
    pub owner: String,
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activation {
    pub criteria: Vec<String>,
    pub decision_makers: Vec<String>,
    pub timeline: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContingencyPlan {
    pub trigger_id: String,
    pub plan: String,
    pub description: String,
    pub activation: Activation,
    pub actions: Vec<ContingencyAction>,
    pub success_metrics: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferKind {
    Insurance,
    Contract,
    Partnership,
    Hedging,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferMechanism {
    pub risk_id: String,
    pub mechanism: TransferKind,
    pub description: String,
    pub cost: f64,
    pub coverage: f64,
    pub limitations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MitigationStrategies {
    pub preventive_measures: Vec<PreventiveMeasure>,
    pub contingency_plans: Vec<ContingencyPlan>,
    pub transfer_mechanisms: Vec<TransferMechanism>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitoringFrequency {
    RealTime,
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficLight {
    pub green: f64,
    pub yellow: f64,
    pub red: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarningIndicator {
    pub name: String,
    pub metric: String,
    pub threshold: TrafficLight,
    pub frequency: MonitoringFrequency,
    pub source: String,
    pub automation: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationStep {
    pub level: u8,
    pub stakeholder: String,
    pub timeframe: String,
    pub criteria: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alerting {
    pub channels: Vec<String>,
    pub escalation: Vec<EscalationStep>,
    pub response_protocols: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EarlyWarningSystem {
    pub indicators: Vec<WarningIndicator>,
    pub alerting: Alerting,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewSchedule {
    pub operational_reviews: String,
    pub strategic_reviews: String,
    pub comprehensive_assessment: String,
    pub trigger_reviews: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub name: String,
    pub audience: String,
    pub frequency: String,
    pub content: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeholderBriefing {
    pub stakeholder: String,
    pub frequency: String,
    pub format: String,
    pub content: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reporting {
    pub dashboards: Vec<Dashboard>,
    pub stakeholder_communication: Vec<StakeholderBriefing>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitoringFramework {
    pub early_warning_system: EarlyWarningSystem,
    pub review_schedule: ReviewSchedule,
    pub reporting: Reporting,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessmentResult {
    pub risk_profile: RiskProfile,
    pub identified_risks: Vec<IdentifiedRisk>,
    pub risk_scenarios: ScenarioSet<RiskScenario>,
    pub mitigation_strategies: MitigationStrategies,
    pub monitoring_framework: MonitoringFramework,
    pub recommendations: RecommendationPlan,
}
