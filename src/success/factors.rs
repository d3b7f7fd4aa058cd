//! Organizational and market factor scores.
//!
//! Every ordinal input maps onto a fixed value in `[0, 1]`; each factor is a
//! plain mean of its sub-factors, and the two component scores blend the
//! factors with fixed weights.

use super::types::*;
use crate::errors::EngineError;
use crate::metrics::{mean, weighted_average};

const ORGANIZATIONAL_WEIGHTS: [f64; 4] = [0.3, 0.25, 0.25, 0.2];
const MARKET_WEIGHTS: [f64; 4] = [0.25, 0.35, 0.25, 0.15];

// =============================================================================
// Organizational
// =============================================================================

fn capability(level: Capability) -> f64 {
    match level {
        Capability::Poor => 0.2,
        Capability::Fair => 0.4,
        Capability::Good => 0.7,
        Capability::Excellent => 0.9,
    }
}

pub fn capability_score(capabilities: &Capabilities) -> f64 {
    mean(&[
        capability(capabilities.execution),
        capability(capabilities.innovation),
        capability(capabilities.agility),
        capability(capabilities.learning),
        capability(capabilities.collaboration),
    ])
}

pub fn culture_score(culture: &Culture) -> f64 {
    let risk = match culture.risk_tolerance {
        RiskAppetite::RiskAverse => 0.3,
        RiskAppetite::Cautious => 0.5,
        RiskAppetite::Balanced => 0.7,
        RiskAppetite::RiskSeeking => 0.8,
    };
    let change = match culture.change_readiness {
        ChangeReadiness::Resistant => 0.2,
        ChangeReadiness::Cautious => 0.5,
        ChangeReadiness::Adaptable => 0.7,
        ChangeReadiness::ChangeEmbracing => 0.9,
    };
    let performance = match culture.performance {
        PerformanceCulture::Underperforming => 0.2,
        PerformanceCulture::MeetingExpectations => 0.6,
        PerformanceCulture::Exceeding => 0.8,
        PerformanceCulture::Outstanding => 0.9,
    };
    let alignment = match culture.alignment {
        Alignment::Misaligned => 0.2,
        Alignment::SomewhatAligned => 0.5,
        Alignment::Aligned => 0.8,
        Alignment::HighlyAligned => 0.9,
    };
    mean(&[risk, change, performance, alignment])
}

pub fn resource_score(resources: &OrganizationalResources) -> f64 {
    let financial = match resources.financial {
        FinancialResources::Constrained => 0.2,
        FinancialResources::Adequate => 0.6,
        FinancialResources::Strong => 0.8,
        FinancialResources::Abundant => 0.9,
    };
    let human = match resources.human {
        HumanResources::Understaffed => 0.2,
        HumanResources::Adequate => 0.6,
        HumanResources::WellStaffed => 0.8,
        HumanResources::Overstaffed => 0.7,
    };
    let technological = match resources.technological {
        TechnologyResourceLevel::Outdated => 0.2,
        TechnologyResourceLevel::Adequate => 0.6,
        TechnologyResourceLevel::Current => 0.7,
        TechnologyResourceLevel::CuttingEdge => 0.9,
    };
    let operational = match resources.operational {
        OperationalResources::Inefficient => 0.2,
        OperationalResources::Adequate => 0.6,
        OperationalResources::Efficient => 0.8,
        OperationalResources::Optimized => 0.9,
    };
    mean(&[financial, human, technological, operational])
}

pub fn track_record_score(track: &TrackRecord) -> f64 {
    mean(&[
        track.success_rate,
        track.on_time_delivery,
        track.budget_adherence,
        track.quality_achievement,
        track.stakeholder_satisfaction,
    ])
}

pub fn organizational_score(context: &OrganizationalContext) -> Result<f64, EngineError> {
    weighted_average(
        &[
            capability_score(&context.capabilities),
            culture_score(&context.culture),
            resource_score(&context.resources),
            track_record_score(&context.track_record),
        ],
        &ORGANIZATIONAL_WEIGHTS,
    )
}

// =============================================================================
// Market
// =============================================================================

pub fn industry_score(industry: &IndustryConditions) -> f64 {
    let volatility = match industry.volatility {
        Level::Low => 0.8,
        Level::Medium => 0.6,
        Level::High => 0.4,
    };
    let competition = match industry.competition {
        CompetitionIntensity::Minimal => 0.9,
        CompetitionIntensity::Moderate => 0.6,
        CompetitionIntensity::Intense => 0.4,
        CompetitionIntensity::ExtremelyIntense => 0.2,
    };
    let barriers = match industry.barriers {
        Level::Low => 0.8,
        Level::Medium => 0.6,
        Level::High => 0.4,
    };
    let disruption = match industry.disruption {
        Disruption::Stable => 0.8,
        Disruption::Evolving => 0.6,
        Disruption::Disrupting => 0.4,
        Disruption::Chaotic => 0.2,
    };
    mean(&[volatility, competition, barriers, disruption])
}

pub fn competitive_score(competitive: &CompetitivePosition) -> f64 {
    let position = match competitive.position {
        MarketPosition::Leader => 0.9,
        MarketPosition::Challenger => 0.7,
        MarketPosition::Follower => 0.5,
        MarketPosition::Niche => 0.6,
    };
    let differentiation = match competitive.differentiation {
        Differentiation::None => 0.2,
        Differentiation::Weak => 0.4,
        Differentiation::Moderate => 0.6,
        Differentiation::Strong => 0.8,
        Differentiation::Unique => 0.9,
    };
    let response = match competitive.response_capability {
        ResponseSpeed::Slow => 0.4,
        ResponseSpeed::Moderate => 0.6,
        ResponseSpeed::Fast => 0.8,
        ResponseSpeed::VeryFast => 0.9,
    };
    let advantage = match competitive.resource_advantage {
        ResourceAdvantage::Disadvantaged => 0.3,
        ResourceAdvantage::Equal => 0.6,
        ResourceAdvantage::Advantaged => 0.8,
        ResourceAdvantage::SignificantlyAdvantaged => 0.9,
    };
    mean(&[position, differentiation, response, advantage])
}

/// High price sensitivity counts against the score.
pub fn customer_score(customers: &CustomerConditions) -> f64 {
    let level = |l: Level| match l {
        Level::Low => 0.4,
        Level::Medium => 0.6,
        Level::High => 0.8,
    };
    let adoption = match customers.adoption_rate {
        AdoptionRate::Slow => 0.4,
        AdoptionRate::Moderate => 0.6,
        AdoptionRate::Fast => 0.8,
    };
    let feedback = match customers.feedback {
        Feedback::Negative => 0.3,
        Feedback::Mixed => 0.5,
        Feedback::Positive => 0.7,
        Feedback::VeryPositive => 0.9,
    };
    mean(&[
        level(customers.loyalty),
        adoption,
        feedback,
        1.0 - level(customers.price_sensitivity),
    ])
}

pub fn external_score(external: &ExternalConditions) -> f64 {
    let economic = match external.economic {
        EconomicOutlook::Recession => 0.3,
        EconomicOutlook::Stagnant => 0.5,
        EconomicOutlook::Stable => 0.6,
        EconomicOutlook::Growing => 0.8,
    };
    let regulatory = match external.regulatory {
        RegulatoryClimate::Restrictive => 0.3,
        RegulatoryClimate::Stable => 0.6,
        RegulatoryClimate::Supportive => 0.8,
        RegulatoryClimate::Enabling => 0.9,
    };
    let technological = match external.technological {
        TechnologyClimate::Lagging => 0.3,
        TechnologyClimate::Current => 0.6,
        TechnologyClimate::Advancing => 0.8,
        TechnologyClimate::Leading => 0.9,
    };
    let social = match external.social {
        SocialClimate::Headwinds => 0.3,
        SocialClimate::Neutral => 0.6,
        SocialClimate::Tailwinds => 0.8,
        SocialClimate::StrongTailwinds => 0.9,
    };
    mean(&[economic, regulatory, technological, social])
}

pub fn market_score(context: &MarketContext) -> Result<f64, EngineError> {
    weighted_average(
        &[
            industry_score(&context.industry),
            competitive_score(&context.competitive),
            customer_score(&context.customers),
            external_score(&context.external),
        ],
        &MARKET_WEIGHTS,
    )
}
