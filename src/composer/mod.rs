//! Scenario distributions and tiered recommendations shared by the engines.

mod recommendation;
mod scenario;

pub use recommendation::{Recommendation, RecommendationPlan, Urgency};
pub use scenario::{ScenarioSet, Weighted};
