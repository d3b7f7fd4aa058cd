//! CLI command implementations.
//!
//! - **analyze**: run one engine over one snapshot and render the result
//! - **batch**: run one engine over many snapshots on the rayon pool
//! - **validate**: check a snapshot against its request contract only

pub mod analyze;
pub mod batch;
pub mod validate;

pub use analyze::{handle_analyze, AnalyzeConfig};
pub use batch::{handle_batch, BatchOutcome, BatchRunConfig};
pub use validate::handle_validate;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Snapshot encodings recognised by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// YAML for `.yaml`/`.yml`, JSON otherwise.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

pub fn parse_request<R: DeserializeOwned>(contents: &str, format: InputFormat) -> Result<R> {
    match format {
        InputFormat::Json => serde_json::from_str(contents).context("Invalid JSON snapshot"),
        InputFormat::Yaml => serde_yaml::from_str(contents).context("Invalid YAML snapshot"),
    }
}

pub fn load_request<R: DeserializeOwned>(path: &Path) -> Result<R> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    parse_request(&contents, InputFormat::from_path(path))
        .with_context(|| format!("Failed to parse snapshot {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_input_format_by_extension() {
        assert_eq!(InputFormat::from_path(&PathBuf::from("a.yml")), InputFormat::Yaml);
        assert_eq!(InputFormat::from_path(&PathBuf::from("a.YAML")), InputFormat::Yaml);
        assert_eq!(InputFormat::from_path(&PathBuf::from("a.json")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(&PathBuf::from("snapshot")), InputFormat::Json);
    }

    #[test]
    fn test_parse_request_reports_format() {
        let err = parse_request::<serde_json::Value>("{", InputFormat::Json).unwrap_err();
        assert!(err.to_string().contains("JSON"));
        let value: serde_json::Value = parse_request("a: 1", InputFormat::Yaml).unwrap();
        assert_eq!(value["a"], 1);
    }
}
