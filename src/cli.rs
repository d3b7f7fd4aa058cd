use crate::engine::EngineKind;
use crate::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "growthmap")]
#[command(about = "Deterministic growth analytics and risk scoring", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one engine over a JSON or YAML snapshot
    Analyze {
        /// Engine to run
        #[arg(value_enum)]
        engine: EngineKind,

        /// Request snapshot (.json, .yaml, .yml)
        input: PathBuf,

        /// Output format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Exit non-zero when the result is a fallback
        #[arg(long)]
        strict: bool,

        /// Compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Run one engine over many snapshots in parallel
    Batch {
        /// Engine to run
        #[arg(value_enum)]
        engine: EngineKind,

        /// Request snapshots
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Worker threads (0 = one per core)
        #[arg(short = 'j', long = "jobs", env = "GROWTHMAP_JOBS")]
        jobs: Option<usize>,

        /// Run snapshots one at a time
        #[arg(long = "no-parallel")]
        no_parallel: bool,

        /// Exit non-zero when any snapshot fell back
        #[arg(long = "fail-fast")]
        fail_fast: bool,
    },

    /// Check a snapshot against the request contract without computing
    Validate {
        /// Engine whose request contract applies
        #[arg(value_enum)]
        engine: EngineKind,

        /// Request snapshot (.json, .yaml, .yml)
        input: PathBuf,
    },
}

/// Log level implied by repeated `-v` flags, if any were given.
pub fn verbosity_level(verbosity: u8) -> Option<&'static str> {
    match verbosity {
        0 => None,
        1 => Some("debug"),
        _ => Some("trace"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_arguments() {
        let cli = Cli::try_parse_from([
            "growthmap", "-v", "analyze", "risk", "snapshot.yaml", "--format", "text", "--strict",
        ])
        .unwrap();
        assert_eq!(cli.verbosity, 1);
        match cli.command {
            Commands::Analyze {
                engine,
                format,
                strict,
                ..
            } => {
                assert_eq!(engine, EngineKind::Risk);
                assert_eq!(format, Some(OutputFormat::Text));
                assert!(strict);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_batch_requires_inputs() {
        assert!(Cli::try_parse_from(["growthmap", "batch", "success"]).is_err());
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(verbosity_level(0), None);
        assert_eq!(verbosity_level(1), Some("debug"));
        assert_eq!(verbosity_level(3), Some("trace"));
    }
}
