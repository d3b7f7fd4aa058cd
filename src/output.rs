//! Rendering of [`Analysis`] values as JSON, YAML, or a terse text summary.

use crate::bottleneck::BottleneckDetectionResult;
use crate::competitive::CompetitiveAnalysisResult;
use crate::engine::{Analysis, EngineKind, Provenance};
use crate::performance::PerformancePredictionResult;
use crate::risk::RiskAssessmentResult;
use crate::success::SuccessProbabilityResult;
use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::*;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Yaml,
    Text,
}

/// Key figures shown by the text renderer.
pub trait Headline {
    fn headline(&self) -> Vec<(&'static str, String)>;
}

impl Headline for RiskAssessmentResult {
    fn headline(&self) -> Vec<(&'static str, String)> {
        vec![
            ("overall risk", format!("{:.1} / 10", self.risk_profile.overall_risk_score)),
            ("risk level", self.risk_profile.risk_level.to_string()),
            ("identified risks", self.identified_risks.len().to_string()),
            ("recommendations", self.recommendations.len().to_string()),
        ]
    }
}

impl Headline for BottleneckDetectionResult {
    fn headline(&self) -> Vec<(&'static str, String)> {
        let analysis = &self.bottleneck_analysis;
        vec![
            ("bottlenecks", analysis.identified_bottlenecks.len().to_string()),
            (
                "productivity loss",
                format!("{:.0}%", analysis.impact_assessment.overall_impact.productivity_loss * 100.0),
            ),
            ("quick wins", self.optimization_opportunities.quick_wins.len().to_string()),
            ("recommendations", self.recommendations.len().to_string()),
        ]
    }
}

impl Headline for SuccessProbabilityResult {
    fn headline(&self) -> Vec<(&'static str, String)> {
        vec![
            ("success probability", format!("{:.0}%", self.overall_probability.success * 100.0)),
            ("confidence", format!("{:.2}", self.overall_probability.confidence)),
            ("initiatives", self.initiative_probabilities.len().to_string()),
        ]
    }
}

impl Headline for PerformancePredictionResult {
    fn headline(&self) -> Vec<(&'static str, String)> {
        let overall = &self.team_predictions.overall_performance;
        vec![
            ("team performance", format!("{:.2} -> {:.2}", overall.current, overall.predicted)),
            ("trend", overall.trend.to_string()),
            ("risk areas", self.insights.risk_areas.len().to_string()),
            ("recommendations", self.recommendations.len().to_string()),
        ]
    }
}

impl Headline for CompetitiveAnalysisResult {
    fn headline(&self) -> Vec<(&'static str, String)> {
        let overview = &self.competitive_analysis.market_overview;
        vec![
            ("competitors", overview.competitor_count.to_string()),
            ("intensity", format!("{:.1} / 10", overview.competitive_intensity)),
            ("position", self.positioning_analysis.current_position.quadrant.to_string()),
            ("recommendations", self.recommendations.len().to_string()),
        ]
    }
}

pub fn provenance_label(provenance: &Provenance) -> ColoredString {
    match provenance {
        Provenance::Computed => "computed".green().bold(),
        Provenance::Fallback { code, .. } => format!("fallback ({code})").yellow().bold(),
    }
}

pub fn render_text<T: Headline>(engine: EngineKind, analysis: &Analysis<T>) -> String {
    let mut out = format!(
        "{} {}\n",
        format!("{engine} analysis").bold(),
        provenance_label(&analysis.provenance)
    );
    if let Provenance::Fallback { reason, .. } = &analysis.provenance {
        out.push_str(&format!("  {}\n", reason.dimmed()));
    }
    for (label, value) in analysis.result.headline() {
        out.push_str(&format!("  {:<20} {}\n", format!("{label}:"), value));
    }
    out
}

pub fn render<T: Serialize + Headline>(
    engine: EngineKind,
    analysis: &Analysis<T>,
    format: OutputFormat,
    pretty: bool,
) -> Result<String> {
    match format {
        OutputFormat::Json if pretty => {
            serde_json::to_string_pretty(analysis).context("Failed to serialize analysis as JSON")
        }
        OutputFormat::Json => {
            serde_json::to_string(analysis).context("Failed to serialize analysis as JSON")
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(analysis).context("Failed to serialize analysis as YAML")
        }
        OutputFormat::Text => Ok(render_text(engine, analysis)),
    }
}

/// Write to `path`, or stdout when none is given.
pub fn write_output(content: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write output to {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                writeln!(stdout)?;
            }
            Ok(())
        }
    }
}
