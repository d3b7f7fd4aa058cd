use super::load_request;
use crate::bottleneck::BottleneckEngine;
use crate::competitive::CompetitiveEngine;
use crate::engine::{Engine, EngineKind, Provenance};
use crate::observability::{get_progress, increment_processed, start_batch};
use crate::output::provenance_label;
use crate::performance::PerformanceEngine;
use crate::risk::RiskEngine;
use crate::success::SuccessEngine;
use anyhow::{Context, Result};
use colored::*;
use rayon::prelude::*;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct BatchRunConfig {
    pub engine: EngineKind,
    pub inputs: Vec<PathBuf>,
    pub parallel: bool,
    /// Worker threads; rayon's default when `None`.
    pub jobs: Option<usize>,
    pub fail_fast: bool,
}

/// One snapshot's outcome; `Err` holds the load failure.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub input: PathBuf,
    pub provenance: Result<Provenance, String>,
}

impl BatchOutcome {
    pub fn summary_line(&self) -> String {
        match &self.provenance {
            Ok(provenance) => {
                let mut line = format!("{} {}", self.input.display(), provenance_label(provenance));
                if let Provenance::Fallback { reason, .. } = provenance {
                    line.push_str(&format!(" {}", reason.dimmed()));
                }
                line
            }
            Err(error) => format!("{} {} {}", self.input.display(), "error".red().bold(), error),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.provenance, Ok(Provenance::Fallback { .. }))
    }
}

fn run_one<E>(engine: &E, input: &Path) -> BatchOutcome
where
    E: Engine,
    E::Request: DeserializeOwned,
{
    let provenance = load_request::<E::Request>(input)
        .map(|request| engine.run(&request).provenance)
        .map_err(|e| format!("{e:#}"));
    increment_processed();
    BatchOutcome {
        input: input.to_path_buf(),
        provenance,
    }
}

fn run_all<E>(engine: &E, config: &BatchRunConfig) -> Vec<BatchOutcome>
where
    E: Engine,
    E::Request: DeserializeOwned,
{
    if config.parallel {
        config.inputs.par_iter().map(|input| run_one(engine, input)).collect()
    } else {
        config.inputs.iter().map(|input| run_one(engine, input)).collect()
    }
}

pub fn run_batch(config: &BatchRunConfig) -> Vec<BatchOutcome> {
    match config.engine {
        EngineKind::Risk => run_all(&RiskEngine, config),
        EngineKind::Bottleneck => run_all(&BottleneckEngine, config),
        EngineKind::Success => run_all(&SuccessEngine, config),
        EngineKind::Performance => run_all(&PerformanceEngine, config),
        EngineKind::Competitive => run_all(&CompetitiveEngine, config),
    }
}

/// Run every snapshot, print one line per file, and return the exit code.
pub fn handle_batch(config: &BatchRunConfig) -> Result<i32> {
    start_batch(config.inputs.len());

    let outcomes = match config.jobs {
        Some(jobs) if config.parallel => rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("Failed to build batch thread pool")?
            .install(|| run_batch(config)),
        _ => run_batch(config),
    };

    for outcome in &outcomes {
        println!("{}", outcome.summary_line());
    }

    let progress = get_progress();
    let errors = outcomes.iter().filter(|o| o.provenance.is_err()).count();
    println!(
        "{} {}/{} snapshots, {} fallback(s), {} error(s)",
        "processed".bold(),
        progress.processed,
        progress.total,
        progress.fallbacks,
        errors
    );

    let fell_back = outcomes.iter().any(BatchOutcome::is_fallback);
    Ok(if errors > 0 || (config.fail_fast && fell_back) {
        1
    } else {
        0
    })
}
