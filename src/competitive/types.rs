use crate::composer::{Recommendation, RecommendationPlan};
use crate::core::{ImpactTier, TimeHorizon};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Request
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanySize {
    Startup,
    Small,
    Medium,
    Large,
    Enterprise,
}

impl CompanySize {
    pub fn is_large(self) -> bool {
        matches!(self, Self::Large | Self::Enterprise)
    }

    pub fn is_small(self) -> bool {
        matches!(self, Self::Startup | Self::Small)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    pub industry: String,
    pub size: CompanySize,
    pub is_direct_competitor: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisDepth {
    Basic,
    #[default]
    Detailed,
    Comprehensive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisScope {
    pub competitors: Vec<Competitor>,
    #[serde(default)]
    pub industry_focus: Vec<String>,
    #[serde(default)]
    pub geographic_scope: Vec<String>,
    pub timeframe: TimeHorizon,
    #[serde(default)]
    pub analysis_depth: AnalysisDepth,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    #[serde(default)]
    pub market_size: Option<f64>,
    /// Annual growth in percent.
    #[serde(default)]
    pub growth_rate: Option<f64>,
    #[serde(default)]
    pub key_trends: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyData {
    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub employees: Option<f64>,
    #[serde(default)]
    pub funding: Option<f64>,
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    /// Own average price point; assumed at the market average when absent.
    #[serde(default)]
    pub pricing: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub product: String,
    pub price: f64,
    pub model: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetitorData {
    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub employees: Option<f64>,
    /// Share in percent.
    #[serde(default)]
    pub market_share: Option<f64>,
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub pricing: Vec<PricePoint>,
}

impl CompetitorData {
    pub fn average_price(&self) -> Option<f64> {
        if self.pricing.is_empty() {
            return None;
        }
        Some(self.pricing.iter().map(|p| p.price).sum::<f64>() / self.pricing.len() as f64)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetitiveData {
    #[serde(default)]
    pub market: MarketData,
    #[serde(default)]
    pub company: CompanyData,
    /// Keyed by competitor id.
    #[serde(default)]
    pub competitors: BTreeMap<String, CompetitorData>,
}

fn enabled() -> bool {
    true
}

fn default_confidence_threshold() -> f64 {
    0.7
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    #[serde(default = "enabled")]
    pub include_swot: bool,
    #[serde(default = "enabled")]
    pub include_positioning: bool,
    #[serde(default = "enabled")]
    pub include_pricing: bool,
    #[serde(default = "enabled")]
    pub include_feature_comparison: bool,
    #[serde(default = "enabled")]
    pub include_market_share: bool,
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            include_swot: true,
            include_positioning: true,
            include_pricing: true,
            include_feature_comparison: true,
            include_market_share: true,
            confidence_threshold: default_confidence_threshold(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitiveAnalysisRequest {
    pub company_id: String,
    pub analysis_scope: AnalysisScope,
    #[serde(default)]
    pub data: CompetitiveData,
    #[serde(default)]
    pub analysis_settings: AnalysisSettings,
}

impl CompetitiveAnalysisRequest {
    /// Supplementary data for a competitor, if any was supplied.
    pub fn data_for(&self, competitor_id: &str) -> Option<&CompetitorData> {
        self.data.competitors.get(competitor_id)
    }
}

// =============================================================================
// Result: market and competitors
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOverview {
    pub total_market_size: f64,
    /// Percent per year.
    pub growth_rate: f64,
    pub competitor_count: usize,
    pub market_fragmentation: Level,
    /// 1-10.
    pub competitive_intensity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketPosition {
    Leader,
    Challenger,
    Follower,
    Niche,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorProfile {
    pub id: String,
    pub name: String,
    pub market_position: MarketPosition,
    /// Percent, reported or estimated.
    pub market_share: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub strategy: String,
    pub threat_level: ImpactTier,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    MarketShare,
    ProductQuality,
    Pricing,
    Innovation,
    CustomerService,
    BrandStrength,
    Distribution,
    FinancialStrength,
}

impl Dimension {
    pub const ALL: [Dimension; 8] = [
        Self::MarketShare,
        Self::ProductQuality,
        Self::Pricing,
        Self::Innovation,
        Self::CustomerService,
        Self::BrandStrength,
        Self::Distribution,
        Self::FinancialStrength,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::MarketShare => "Market Share",
            Self::ProductQuality => "Product Quality",
            Self::Pricing => "Pricing",
            Self::Innovation => "Innovation",
            Self::CustomerService => "Customer Service",
            Self::BrandStrength => "Brand Strength",
            Self::Distribution => "Distribution",
            Self::FinancialStrength => "Financial Strength",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension: Dimension,
    /// 1-10.
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorScores {
    pub competitor_id: String,
    pub scores: Vec<DimensionScore>,
}

/// Mean dimension score with its 1-based place (1 = strongest).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    pub competitor_id: String,
    pub score: f64,
    pub rank: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitiveGap {
    pub dimension: Dimension,
    pub gap: f64,
    pub opportunity: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetitiveMatrix {
    pub dimensions: Vec<Dimension>,
    pub scores: Vec<CompetitorScores>,
    pub rankings: Vec<Ranking>,
    pub gaps: Vec<CompetitiveGap>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitiveAnalysis {
    pub market_overview: MarketOverview,
    pub competitor_profiles: Vec<CompetitorProfile>,
    pub competitive_matrix: CompetitiveMatrix,
}

// =============================================================================
// Result: SWOT
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Addressability {
    Easy,
    Moderate,
    Difficult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwotStrength {
    pub strength: String,
    pub impact: Level,
    pub uniqueness: f64,
    pub sustainability: Level,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwotWeakness {
    pub weakness: String,
    pub impact: Level,
    pub urgency: Level,
    pub addressability: Addressability,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwotOpportunity {
    pub opportunity: String,
    pub potential: Level,
    pub timeframe: String,
    pub requirements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwotThreat {
    pub threat: String,
    pub probability: f64,
    pub impact: Level,
    pub timeframe: String,
    pub mitigation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwotAnalysis {
    pub strengths: Vec<SwotStrength>,
    pub weaknesses: Vec<SwotWeakness>,
    pub opportunities: Vec<SwotOpportunity>,
    pub threats: Vec<SwotThreat>,
}

// =============================================================================
// Result: positioning
// =============================================================================

/// Cell of the price (x) / quality (y) grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    HighPriceHighQuality,
    LowPriceHighQuality,
    LowPriceLowQuality,
    HighPriceLowQuality,
    /// Neutral placement used only when no analysis ran.
    Balanced,
}

impl Quadrant {
    pub const GRID: [Quadrant; 4] = [
        Self::HighPriceHighQuality,
        Self::LowPriceHighQuality,
        Self::LowPriceLowQuality,
        Self::HighPriceLowQuality,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::HighPriceHighQuality => "High Price, High Quality",
            Self::LowPriceHighQuality => "Low Price, High Quality",
            Self::LowPriceLowQuality => "Low Price, Low Quality",
            Self::HighPriceLowQuality => "High Price, Low Quality",
            Self::Balanced => "Balanced Position",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::HighPriceHighQuality => "Premium positioning with superior value proposition",
            Self::LowPriceHighQuality => "Value leader with competitive advantage",
            Self::LowPriceLowQuality => "Cost-focused with basic offering",
            Self::HighPriceLowQuality => "Vulnerable position requiring strategic review",
            Self::Balanced => "Neutral market position",
        }
    }
}

impl std::fmt::Display for Quadrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentPosition {
    /// Price axis in `[-1, 1]`.
    pub x: f64,
    /// Quality axis in `[-1, 1]`.
    pub y: f64,
    pub quadrant: Quadrant,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorPosition {
    pub competitor_id: String,
    pub x: f64,
    pub y: f64,
    pub quadrant: Quadrant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhitespaceSize {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Whitespace {
    pub area: Quadrant,
    pub size: WhitespaceSize,
    pub attractiveness: f64,
    pub accessibility: Level,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositioningOption {
    pub direction: String,
    pub rationale: String,
    pub effort: Level,
    pub expected_impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositioningAnalysis {
    pub current_position: CurrentPosition,
    pub competitor_positions: Vec<CompetitorPosition>,
    pub whitespaces: Vec<Whitespace>,
    pub repositioning_opportunities: Vec<RepositioningOption>,
}

// =============================================================================
// Result: pricing
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingStrategyKind {
    Premium,
    Competitive,
    Penetration,
    Value,
    Freemium,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorPricing {
    pub competitor_id: String,
    pub strategy: PricingStrategyKind,
    pub average_price: f64,
    pub price_range: PriceRange,
    pub pricing_model: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricePosition {
    Lowest,
    BelowAverage,
    Average,
    AboveAverage,
    Highest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceComparison {
    pub your_position: PricePosition,
    pub competitive_pressure: Level,
    pub price_optimization_opportunity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingIntelligence {
    pub pricing_strategies: Vec<CompetitorPricing>,
    pub price_comparison: PriceComparison,
    pub pricing_recommendations: Vec<Recommendation>,
}

// =============================================================================
// Result: insights
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    MarketDynamics,
    CompetitiveThreats,
    StrategicOpportunities,
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
#[serde(rename_all = "lowercase")]
pub enum TrendPhase {
    Emerging,
    Growing,
    Mature,
    Declining,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitiveTrend {
    pub trend: String,
    pub direction: TrendPhase,
    pub impact: Level,
    pub implications: Vec<String>,
}

/// Five-forces style read of the market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketDynamics {
    pub entry_barriers: Level,
    pub substitute_threat: Level,
    pub buyer_power: Level,
    pub supplier_power: Level,
    pub rivalry_intensity: Level,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategicInsights {
    pub key_insights: Vec<KeyInsight>,
    pub competitive_trends: Vec<CompetitiveTrend>,
    pub market_dynamics: MarketDynamics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitiveAnalysisResult {
    pub competitive_analysis: CompetitiveAnalysis,
    pub swot_analysis: SwotAnalysis,
    pub positioning_analysis: PositioningAnalysis,
    pub pricing_intelligence: PricingIntelligence,
    pub strategic_insights: StrategicInsights,
    /// Strategic moves under `strategic`, tactical ones under `short_term`.
    pub recommendations: RecommendationPlan,
}
