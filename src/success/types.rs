use crate::composer::{ScenarioSet, Weighted};
use crate::core::{ImpactTier, TrendDirection};
use serde::{Deserialize, Serialize};

// =============================================================================
// Request: scope and initiatives
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetOutcome {
    RevenueGrowth,
    MarketShare,
    CustomerAcquisition,
    ProductLaunch,
    OperationalEfficiency,
    StrategicGoals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanningHorizon {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbabilityMethod {
    MonteCarlo,
    Bayesian,
    Historical,
    ExpertJudgment,
    Hybrid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisScope {
    #[serde(default)]
    pub target_outcomes: Vec<TargetOutcome>,
    #[serde(default)]
    pub time_horizons: Vec<PlanningHorizon>,
    /// Requested confidence level in `[0.5, 0.99]`.
    pub confidence_level: f64,
    pub probability_method: ProbabilityMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitiativeType {
    Strategic,
    Operational,
    Product,
    Market,
    Technology,
    Organizational,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Measurability {
    Direct,
    Proxy,
    Qualitative,
    Estimated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionThreshold {
    pub minimum: f64,
    pub expected: f64,
    pub stretch: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessCriterion {
    pub criterion: String,
    pub metric: String,
    pub target: f64,
    pub threshold: CriterionThreshold,
    pub weight: f64,
    pub measurability: Measurability,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    Internal,
    External,
    Technical,
    Regulatory,
    Market,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criticality {
    Blocking,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyControl {
    Full,
    Partial,
    Minimal,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveDependency {
    pub dependency: String,
    #[serde(rename = "type")]
    pub kind: DependencyKind,
    pub criticality: Criticality,
    pub controllability: DependencyControl,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub id: String,
    pub objective: String,
    pub measurable: bool,
    pub quantifiable: bool,
    #[serde(default)]
    pub success_criteria: Vec<SuccessCriterion>,
    #[serde(default)]
    pub dependencies: Vec<ObjectiveDependency>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flexibility {
    Fixed,
    Moderate,
    Flexible,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub allocated: f64,
    pub required: f64,
    pub confidence: f64,
    pub flexibility: Flexibility,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Experience {
    Junior,
    Mixed,
    Senior,
    Expert,
}

/// Shared low / medium / high scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamResources {
    pub size: f64,
    pub experience: Experience,
    pub availability: f64,
    pub skill_match: f64,
    pub stability: Level,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechnologyMaturity {
    Experimental,
    Emerging,
    Established,
    Mature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Low,
    Medium,
    High,
    VeryHigh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expertise {
    None,
    Basic,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportLevel {
    None,
    Limited,
    Adequate,
    Extensive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnologyResources {
    pub maturity: TechnologyMaturity,
    pub complexity: Complexity,
    pub internal_expertise: Expertise,
    pub external_support: SupportLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineResources {
    pub duration: f64,
    pub flexibility: Flexibility,
    pub buffer_time: f64,
    pub milestones: f64,
    pub critical_path: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitiativeResources {
    pub budget: Budget,
    pub team: TeamResources,
    pub technology: TechnologyResources,
    pub timeline: TimelineResources,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    Technical,
    Market,
    Organizational,
    Financial,
    Regulatory,
    Competitive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactScope {
    Localized,
    Project,
    Organizational,
    Market,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reversibility {
    Reversible,
    PartiallyReversible,
    Irreversible,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskImpact {
    pub magnitude: ImpactTier,
    pub scope: ImpactScope,
    pub reversibility: Reversibility,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mitigation {
    pub plan: String,
    pub effectiveness: f64,
    pub cost: f64,
    pub timeline: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Readiness {
    None,
    Planned,
    Prepared,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contingency {
    pub plan: String,
    pub readiness: Readiness,
    pub activation_trigger: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitiativeRisk {
    pub id: String,
    pub risk: String,
    pub category: RiskCategory,
    pub probability: f64,
    pub impact: RiskImpact,
    pub mitigation: Mitigation,
    pub contingency: Contingency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnablerType {
    Resource,
    Capability,
    Relationship,
    Market,
    Technology,
    Regulatory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnablerStrength {
    Weak,
    Moderate,
    Strong,
    Exceptional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sustainability {
    Temporary,
    MediumTerm,
    LongTerm,
    Permanent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enabler {
    pub enabler: String,
    #[serde(rename = "type")]
    pub kind: EnablerType,
    pub availability: f64,
    pub strength: EnablerStrength,
    /// Leverage on a 0-5 scale.
    pub leverage: f64,
    pub sustainability: Sustainability,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Testability {
    EasilyTestable,
    Testable,
    DifficultToTest,
    Untestable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumption {
    pub assumption: String,
    pub criticality: ImpactTier,
    pub validity: f64,
    pub testability: Testability,
    pub impact: ImpactTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Support {
    Opposed,
    Neutral,
    Supportive,
    Champion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Engagement {
    Minimal,
    Moderate,
    Active,
    FullyEngaged,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stakeholder {
    pub stakeholder: String,
    pub influence: ImpactTier,
    pub support: Support,
    pub engagement: Engagement,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub concerns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Initiative {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub initiative_type: InitiativeType,
    pub priority: ImpactTier,
    #[serde(default)]
    pub objectives: Vec<Objective>,
    pub resources: InitiativeResources,
    #[serde(default)]
    pub risk_factors: Vec<InitiativeRisk>,
    #[serde(default)]
    pub enablers: Vec<Enabler>,
    #[serde(default)]
    pub assumptions: Vec<Assumption>,
    #[serde(default)]
    pub stakeholders: Vec<Stakeholder>,
}

// =============================================================================
// Request: market context
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionIntensity {
    Minimal,
    Moderate,
    Intense,
    ExtremelyIntense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disruption {
    Stable,
    Evolving,
    Disrupting,
    Chaotic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryConditions {
    pub growth: f64,
    pub volatility: Level,
    pub competition: CompetitionIntensity,
    pub barriers: Level,
    pub disruption: Disruption,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketPosition {
    Leader,
    Challenger,
    Follower,
    Niche,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Differentiation {
    None,
    Weak,
    Moderate,
    Strong,
    Unique,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSpeed {
    Slow,
    Moderate,
    Fast,
    VeryFast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceAdvantage {
    Disadvantaged,
    Equal,
    Advantaged,
    SignificantlyAdvantaged,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitivePosition {
    pub position: MarketPosition,
    pub differentiation: Differentiation,
    pub response_capability: ResponseSpeed,
    pub resource_advantage: ResourceAdvantage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdoptionRate {
    Slow,
    Moderate,
    Fast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    Negative,
    Mixed,
    Positive,
    VeryPositive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerConditions {
    pub loyalty: Level,
    pub price_sensitivity: Level,
    pub adoption_rate: AdoptionRate,
    pub feedback: Feedback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EconomicOutlook {
    Recession,
    Stagnant,
    Stable,
    Growing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegulatoryClimate {
    Restrictive,
    Stable,
    Supportive,
    Enabling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechnologyClimate {
    Lagging,
    Current,
    Advancing,
    Leading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialClimate {
    Headwinds,
    Neutral,
    Tailwinds,
    StrongTailwinds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalConditions {
    pub economic: EconomicOutlook,
    pub regulatory: RegulatoryClimate,
    pub technological: TechnologyClimate,
    pub social: SocialClimate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketContext {
    pub industry: IndustryConditions,
    pub competitive: CompetitivePosition,
    pub customers: CustomerConditions,
    pub external: ExternalConditions,
}

// =============================================================================
// Request: organizational context
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Poor,
    Fair,
    Good,
    Excellent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capabilities {
    pub execution: Capability,
    pub innovation: Capability,
    pub agility: Capability,
    pub learning: Capability,
    pub collaboration: Capability,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskAppetite {
    RiskAverse,
    Cautious,
    Balanced,
    RiskSeeking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeReadiness {
    Resistant,
    Cautious,
    Adaptable,
    ChangeEmbracing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceCulture {
    Underperforming,
    MeetingExpectations,
    Exceeding,
    Outstanding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Misaligned,
    SomewhatAligned,
    Aligned,
    HighlyAligned,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Culture {
    pub risk_tolerance: RiskAppetite,
    pub change_readiness: ChangeReadiness,
    pub performance: PerformanceCulture,
    pub alignment: Alignment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinancialResources {
    Constrained,
    Adequate,
    Strong,
    Abundant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HumanResources {
    Understaffed,
    Adequate,
    WellStaffed,
    Overstaffed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechnologyResourceLevel {
    Outdated,
    Adequate,
    Current,
    CuttingEdge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationalResources {
    Inefficient,
    Adequate,
    Efficient,
    Optimized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationalResources {
    pub financial: FinancialResources,
    pub human: HumanResources,
    pub technological: TechnologyResourceLevel,
    pub operational: OperationalResources,
}

/// Historical delivery rates, each in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub success_rate: f64,
    pub on_time_delivery: f64,
    pub budget_adherence: f64,
    pub quality_achievement: f64,
    pub stakeholder_satisfaction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationalContext {
    pub capabilities: Capabilities,
    pub culture: Culture,
    pub resources: OrganizationalResources,
    pub track_record: TrackRecord,
}

// =============================================================================
// Request: history
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Failed,
    PartiallySuccessful,
    Successful,
    HighlySuccessful,
}

impl Outcome {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Successful | Self::HighlySuccessful)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarInitiative {
    pub initiative_id: String,
    pub similarity: f64,
    pub outcome: Outcome,
    #[serde(default)]
    pub success_factors: Vec<String>,
    #[serde(default)]
    pub failure_factors: Vec<String>,
    #[serde(default)]
    pub lessons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryBenchmark {
    pub metric: String,
    pub industry_average: f64,
    pub top_quartile: f64,
    pub organization_value: f64,
    pub trend: TrendDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePhase {
    Recession,
    Recovery,
    Expansion,
    Peak,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicCycle {
    pub period: String,
    pub condition: CyclePhase,
    pub impact: f64,
    pub duration: f64,
    pub recovery_time: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalOutcomes {
    #[serde(default)]
    pub similar_initiatives: Vec<SimilarInitiative>,
    #[serde(default)]
    pub industry_benchmarks: Vec<IndustryBenchmark>,
    #[serde(default)]
    pub economic_cycles: Vec<EconomicCycle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessProbabilityRequest {
    pub analysis_scope: AnalysisScope,
    #[serde(default)]
    pub initiatives: Vec<Initiative>,
    pub market_context: MarketContext,
    pub organizational_context: OrganizationalContext,
    #[serde(default)]
    pub historical_data: HistoricalOutcomes,
}

// =============================================================================
// Result
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallProbability {
    pub success: f64,
    pub confidence: f64,
    pub methodology: String,
    pub assumptions: Vec<String>,
    pub limitations: Vec<String>,
}

/// The weighted components behind the overall probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub organizational: f64,
    pub market: f64,
    pub initiative: f64,
    /// Multiplier in `[0.7, 1.3]`; 1.0 without history.
    pub historical_adjustment: f64,
}

impl Default for ComponentScores {
    fn default() -> Self {
        Self {
            organizational: 0.5,
            market: 0.5,
            initiative: 0.5,
            historical_adjustment: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitiativeProbability {
    pub initiative_id: String,
    pub name: String,
    pub probability: f64,
    pub score: f64,
    pub resource_adequacy: f64,
    pub risk_mitigation: f64,
    pub stakeholder_support: f64,
    pub enabler_strength: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeScenario {
    BestCase,
    MostLikely,
    WorstCase,
    BlackSwan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessScenario {
    pub scenario: OutcomeScenario,
    pub probability: f64,
    pub description: String,
    /// Enablers, assumptions, risks, or triggers depending on the scenario.
    pub drivers: Vec<String>,
}

impl Weighted for SuccessScenario {
    fn probability(&self) -> f64 {
        self.probability
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessProbabilityResult {
    pub overall_probability: OverallProbability,
    pub component_scores: ComponentScores,
    pub initiative_probabilities: Vec<InitiativeProbability>,
    pub scenario_probabilities: ScenarioSet<SuccessScenario>,
}
