use super::load_request;
use crate::bottleneck::BottleneckEngine;
use crate::competitive::CompetitiveEngine;
use crate::engine::{Engine, EngineKind, Provenance};
use crate::output::{render, write_output, Headline, OutputFormat};
use crate::performance::PerformanceEngine;
use crate::risk::RiskEngine;
use crate::success::SuccessEngine;
use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    pub engine: EngineKind,
    pub input: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub pretty: bool,
    pub strict: bool,
}

/// Run the configured engine and return the process exit code.
pub fn handle_analyze(config: &AnalyzeConfig) -> Result<i32> {
    match config.engine {
        EngineKind::Risk => analyze_with(&RiskEngine, config),
        EngineKind::Bottleneck => analyze_with(&BottleneckEngine, config),
        EngineKind::Success => analyze_with(&SuccessEngine, config),
        EngineKind::Performance => analyze_with(&PerformanceEngine, config),
        EngineKind::Competitive => analyze_with(&CompetitiveEngine, config),
    }
}

fn analyze_with<E>(engine: &E, config: &AnalyzeConfig) -> Result<i32>
where
    E: Engine,
    E::Request: DeserializeOwned,
    E::Output: Serialize + Headline,
{
    let request: E::Request = load_request(&config.input)?;
    let analysis = engine.run(&request);
    info!(
        engine = %E::KIND,
        input = %config.input.display(),
        computed = analysis.is_computed(),
        "Analysis finished"
    );

    let rendered = render(E::KIND, &analysis, config.format, config.pretty)?;
    write_output(&rendered, config.output.as_deref())?;

    Ok(match &analysis.provenance {
        Provenance::Fallback { code, .. } if config.strict => code.exit_code(),
        _ => 0,
    })
}
