//! Numeric primitives shared by every engine.

pub mod aggregate;
pub mod severity;
pub mod trend;

pub use aggregate::{mean, mean_by, variance, weighted_average};
pub use severity::{severity_from_score, Ladder};
pub use trend::{
    classify_trend, confidence_from_variance, project_forward, projection_multiplier, trend,
};
