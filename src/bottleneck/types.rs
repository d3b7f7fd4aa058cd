use crate::composer::RecommendationPlan;
use crate::core::{Controllability, ImpactTier, SeverityTier};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Request
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisArea {
    Operations,
    Finance,
    Technology,
    HumanResources,
    Marketing,
    Sales,
    SupplyChain,
    CustomerService,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisTimeframe {
    #[serde(rename = "1_month")]
    OneMonth,
    #[serde(rename = "3_months")]
    ThreeMonths,
    #[serde(rename = "6_months")]
    SixMonths,
    #[serde(rename = "1_year")]
    OneYear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisScope {
    #[serde(default)]
    pub areas: Vec<AnalysisArea>,
    pub timeframe: AnalysisTimeframe,
    pub granularity: Granularity,
    #[serde(default = "default_true")]
    pub include_historical: bool,
    #[serde(default = "default_true")]
    pub include_predictive: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessInput {
    pub resource: String,
    pub quantity: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessOutput {
    pub product: String,
    pub quantity: f64,
    pub unit: String,
}

/// Theoretical ≥ practical ≥ current is typical but not required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capacity {
    pub theoretical: f64,
    pub practical: f64,
    pub current: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessPerformance {
    pub efficiency: f64,  // 0-1
    pub utilization: f64, // 0-1
    pub throughput: f64,
    pub error_rate: f64, // 0-1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintType {
    Resource,
    Time,
    Quality,
    Regulatory,
    Technical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessConstraint {
    #[serde(rename = "type")]
    pub constraint_type: ConstraintType,
    pub description: String,
    pub impact: ImpactTier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub id: String,
    pub name: String,
    pub area: String,
    #[serde(default)]
    pub inputs: Vec<ProcessInput>,
    #[serde(default)]
    pub outputs: Vec<ProcessOutput>,
    pub capacity: Capacity,
    pub performance: ProcessPerformance,
    /// Ids of processes this one waits on.
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub constraints: Vec<ProcessConstraint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Human,
    Equipment,
    Financial,
    Material,
    Information,
}

impl ResourceType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Equipment => "equipment",
            Self::Financial => "financial",
            Self::Material => "material",
            Self::Information => "information",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    pub total: f64,
    pub allocated: f64,
    pub utilized: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceCost {
    pub fixed: f64,
    pub variable: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourcePerformance {
    pub reliability: f64,
    pub efficiency: f64,
    pub maintenance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub availability: Availability,
    pub cost: ResourceCost,
    pub performance: ResourcePerformance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricThreshold {
    pub warning: f64,
    pub critical: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedMetric {
    pub id: String,
    pub name: String,
    pub category: String,
    pub value: f64,
    pub target: f64,
    #[serde(default)]
    pub trend: Vec<TrendPoint>,
    pub threshold: MetricThreshold,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemData {
    #[serde(default)]
    pub processes: Vec<Process>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub metrics: Vec<TrackedMetric>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EconomicCondition {
    Recession,
    SlowGrowth,
    Stable,
    Growth,
    Boom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketConditions {
    pub demand: f64,      // 0 low, 1 normal, 2 high
    pub competition: f64, // 0-2
    pub seasonality: f64, // -1 low season, 1 peak
    pub economic_condition: EconomicCondition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegulatoryImpact {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulatoryFactor {
    pub regulation: String,
    pub impact: RegulatoryImpact,
    pub compliance: f64,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechnologyImpact {
    Disruptive,
    Enhancing,
    Neutral,
    Declining,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnologyFactor {
    pub technology: String,
    pub adoption_level: f64,
    pub impact: TechnologyImpact,
    pub time_to_impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalFactors {
    pub market_conditions: MarketConditions,
    #[serde(default)]
    pub regulatory: Vec<RegulatoryFactor>,
    #[serde(default)]
    pub technology: Vec<TechnologyFactor>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sensitivity {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionThresholds {
    #[serde(default = "default_utilization_threshold")]
    pub utilization: f64,
    #[serde(default = "default_efficiency_threshold")]
    pub efficiency: f64,
    #[serde(default = "default_performance_threshold")]
    pub performance: f64,
}

impl Default for DetectionThresholds {
    fn default() -> Self {
        Self {
            utilization: default_utilization_threshold(),
            efficiency: default_efficiency_threshold(),
            performance: default_performance_threshold(),
        }
    }
}

fn default_utilization_threshold() -> f64 {
    0.8
}

fn default_efficiency_threshold() -> f64 {
    0.7
}

fn default_performance_threshold() -> f64 {
    0.75
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionSettings {
    #[serde(default)]
    pub sensitivity: Sensitivity,
    #[serde(default = "default_true")]
    pub include_minor: bool,
    #[serde(default)]
    pub focus_areas: Vec<String>,
    #[serde(default)]
    pub thresholds: DetectionThresholds,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            sensitivity: Sensitivity::Medium,
            include_minor: true,
            focus_areas: Vec::new(),
            thresholds: DetectionThresholds::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BottleneckDetectionRequest {
    pub analysis_scope: AnalysisScope,
    #[serde(default)]
    pub system_data: SystemData,
    pub external_factors: ExternalFactors,
    #[serde(default)]
    pub detection_settings: DetectionSettings,
}

// =============================================================================
// Result
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BottleneckType {
    Capacity,
    Resource,
    Process,
    Skill,
    Technology,
    Financial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BottleneckImpact {
    pub throughput_reduction: f64, // 0-1
    pub cost_increase: f64,
    pub time_delay: f64, // hours
    pub quality_impact: f64, // 0-1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CauseCategory {
    Internal,
    External,
    Systemic,
    Temporary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cause {
    pub cause: String,
    pub category: CauseCategory,
    pub contribution: f64,
    pub controllability: Controllability,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BottleneckMetrics {
    pub current_utilization: f64,
    pub target_utilization: f64,
    pub efficiency: f64,
    pub throughput: f64,
    pub backlog: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DependencyRefs {
    pub upstream: Vec<String>,
    pub downstream: Vec<String>,
    pub critical: Vec<String>,
    /// Every process reachable downstream, walked with a visited set.
    pub impacted: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bottleneck {
    pub id: String,
    pub name: String,
    pub area: String,
    #[serde(rename = "type")]
    pub bottleneck_type: BottleneckType,
    pub severity: SeverityTier,
    /// Whether the candidate crossed a detection threshold.
    pub flagged: bool,
    pub impact: BottleneckImpact,
    pub causes: Vec<Cause>,
    pub metrics: BottleneckMetrics,
    pub dependencies: DependencyRefs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowStep {
    pub process: String,
    pub position: usize,
    pub is_bottleneck: bool,
    pub severity: Option<SeverityTier>,
    pub flow_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationGap {
    pub allocated: f64,
    pub required: f64,
    pub gap: f64,
    pub priority: ImpactTier,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapacityAnalysis {
    pub total_capacity: f64,
    pub utilized_capacity: f64,
    pub available_capacity: f64,
    pub constrained_capacity: f64,
    pub utilization_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BottleneckMap {
    pub process_flow: Vec<FlowStep>,
    pub resource_allocation: BTreeMap<String, AllocationGap>,
    pub capacity_analysis: CapacityAnalysis,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverallImpact {
    pub productivity_loss: f64,
    pub revenue_impact: f64,
    pub cost_impact: f64,
    pub time_impact: f64,
    pub customer_impact: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemEffect {
    pub effect: String,
    pub area: String,
    pub magnitude: ImpactTier,
    pub timeframe: String,
    pub mitigation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub risk: String,
    pub probability: f64,
    pub impact: ImpactTier,
    pub timeframe: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactAssessment {
    pub overall_impact: OverallImpact,
    pub cascading_effects: Vec<SystemEffect>,
    pub risk_factors: Vec<RiskFactor>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BottleneckAnalysis {
    pub identified_bottlenecks: Vec<Bottleneck>,
    pub bottleneck_map: BottleneckMap,
    pub impact_assessment: ImpactAssessment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickWin {
    pub opportunity: String,
    pub description: String,
    pub implementation: String,
    pub effort: ImpactTier,
    pub impact: f64,
    pub timeframe: String,
    pub cost: f64,
    pub roi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategicImprovement {
    pub improvement: String,
    pub description: String,
    pub rationale: String,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
    pub timeline: String,
    pub investment: f64,
    pub expected_return: f64,
    pub risk_level: ImpactTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImprovementType {
    Automation,
    Reorganization,
    Elimination,
    Parallelization,
    ResourceAddition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessImprovement {
    #[serde(rename = "type")]
    pub improvement_type: ImprovementType,
    pub description: String,
    pub impact: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationGains {
    pub throughput_increase: f64,
    pub efficiency_gain: f64,
    pub cost_reduction: f64,
    pub time_reduction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessOptimization {
    pub process: String,
    pub current_state: String,
    pub optimized_state: String,
    pub improvements: Vec<ProcessImprovement>,
    pub metrics: OptimizationGains,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimizationOpportunities {
    pub quick_wins: Vec<QuickWin>,
    pub strategic_improvements: Vec<StrategicImprovement>,
    pub process_optimizations: Vec<ProcessOptimization>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricFrequency {
    RealTime,
    Hourly,
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    pub warning: f64,
    pub critical: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMetric {
    pub metric: String,
    pub current_value: f64,
    pub target_value: f64,
    pub monitoring_frequency: MetricFrequency,
    pub alert_thresholds: AlertThresholds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertTrigger {
    pub condition: String,
    pub severity: AlertSeverity,
    pub action: String,
    pub stakeholders: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationLevel {
    pub level: u8,
    pub timeframe: String,
    pub stakeholder: String,
    pub action: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertSystem {
    pub triggers: Vec<AlertTrigger>,
    pub escalation_procedure: Vec<EscalationLevel>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewFrequency {
    #[default]
    Weekly,
    BiWeekly,
    Monthly,
    Quarterly,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewCadence {
    pub frequency: ReviewFrequency,
    pub participants: Vec<String>,
    pub agenda: Vec<String>,
    pub outcomes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitoringPlan {
    pub key_metrics: Vec<KeyMetric>,
    pub alert_system: AlertSystem,
    pub review_schedule: ReviewCadence,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BottleneckDetectionResult {
    pub bottleneck_analysis: BottleneckAnalysis,
    pub optimization_opportunities: OptimizationOpportunities,
    pub recommendations: RecommendationPlan,
    pub monitoring_plan: MonitoringPlan,
}
