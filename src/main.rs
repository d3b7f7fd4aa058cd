use anyhow::Result;
use clap::Parser;
use growthmap::cli::{verbosity_level, Cli, Commands};
use growthmap::commands::{self, AnalyzeConfig, BatchRunConfig};
use growthmap::config::{load_config, EngineConfig};
use growthmap::observability::init_tracing;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config();

    let level: &str = match verbosity_level(cli.verbosity) {
        Some(level) => level,
        None => &config.logging.level,
    };
    init_tracing(level);

    let code = dispatch(cli.command, &config)?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

fn dispatch(command: Commands, config: &EngineConfig) -> Result<i32> {
    match command {
        Commands::Analyze {
            engine,
            input,
            format,
            output,
            strict,
            compact,
        } => commands::handle_analyze(&AnalyzeConfig {
            engine,
            input,
            format: format.unwrap_or(config.output.format),
            output,
            pretty: config.output.pretty && !compact,
            strict,
        }),
        Commands::Batch {
            engine,
            inputs,
            jobs,
            no_parallel,
            fail_fast,
        } => commands::handle_batch(&BatchRunConfig {
            engine,
            inputs,
            parallel: config.batch.parallel && !no_parallel,
            jobs: resolve_jobs(jobs, config.batch.jobs),
            fail_fast: fail_fast || config.batch.fail_fast,
        }),
        Commands::Validate { engine, input } => commands::handle_validate(engine, &input),
    }
}

// CLI wins over the config file; 0 means one worker per core.
fn resolve_jobs(cli: Option<usize>, configured: Option<usize>) -> Option<usize> {
    match cli {
        Some(0) => Some(
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
        ),
        Some(jobs) => Some(jobs),
        None => configured,
    }
}
