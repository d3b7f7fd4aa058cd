use super::load_request;
use crate::bottleneck::BottleneckDetectionRequest;
use crate::competitive::CompetitiveAnalysisRequest;
use crate::contract::{Validate, ValidationError};
use crate::engine::EngineKind;
use crate::errors::ErrorCode;
use crate::performance::PerformancePredictionRequest;
use crate::risk::RiskAssessmentRequest;
use crate::success::SuccessProbabilityRequest;
use anyhow::Result;
use colored::*;
use serde::de::DeserializeOwned;
use std::path::Path;

fn violations_of<R: Validate + DeserializeOwned>(input: &Path) -> Result<Vec<ValidationError>> {
    let request: R = load_request(input)?;
    Ok(request.violations())
}

pub fn request_violations(engine: EngineKind, input: &Path) -> Result<Vec<ValidationError>> {
    match engine {
        EngineKind::Risk => violations_of::<RiskAssessmentRequest>(input),
        EngineKind::Bottleneck => violations_of::<BottleneckDetectionRequest>(input),
        EngineKind::Success => violations_of::<SuccessProbabilityRequest>(input),
        EngineKind::Performance => violations_of::<PerformancePredictionRequest>(input),
        EngineKind::Competitive => violations_of::<CompetitiveAnalysisRequest>(input),
    }
}

/// List every contract violation and return the process exit code.
pub fn handle_validate(engine: EngineKind, input: &Path) -> Result<i32> {
    let violations = request_violations(engine, input)?;
    if violations.is_empty() {
        println!("{} {} request is valid", "ok".green().bold(), engine);
        return Ok(0);
    }

    println!(
        "{} {} violation(s) in {} request",
        "invalid".red().bold(),
        violations.len(),
        engine
    );
    for violation in &violations {
        println!("  {violation}");
    }
    Ok(ErrorCode::CONTRACT_REQUEST.exit_code())
}
