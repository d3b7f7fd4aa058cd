// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod composer;
pub mod config;
pub mod contract;
pub mod core;
pub mod engine;
pub mod errors;
pub mod metrics;
pub mod observability;
pub mod output;

// Domain engines
pub mod bottleneck;
pub mod competitive;
pub mod performance;
pub mod risk;
pub mod success;

// Re-export commonly used types
pub use crate::engine::{Analysis, Engine, EngineKind, Provenance};
pub use crate::errors::{EngineError, ErrorCode};

pub use crate::bottleneck::{detect_bottlenecks, BottleneckEngine};
pub use crate::competitive::{analyze_competitive_landscape, CompetitiveEngine};
pub use crate::performance::{predict_performance, PerformanceEngine};
pub use crate::risk::{assess_risks, RiskEngine};
pub use crate::success::{calculate_success_probability, SuccessEngine};
