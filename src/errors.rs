//! Error taxonomy for growthmap engines.
//!
//! Every engine failure is one of two kinds:
//! - `ContractViolation`: the request (or a computed result) broke its
//!   structural contract. Carries every accumulated field error.
//! - `ComputationFailure`: an internal step could not produce a value
//!   (empty collection, missing registry entry, caught panic).
//!
//! Both kinds are absorbed by [`crate::engine::run_guarded`] and turned into
//! a fallback result; the error survives only as the fallback's code and
//! reason.
//!
//! # Error Codes
//!
//! - E020-E029: Configuration errors
//! - E030-E039: Computation errors
//! - E050-E059: Contract errors
//!
//! # Example
//!
//! ```rust
//! use growthmap::errors::{EngineError, ErrorCode};
//!
//! let err = EngineError::computation("team_profile", "team roster is empty");
//! assert_eq!(err.code(), ErrorCode::COMPUTATION_GENERIC);
//! assert!(!err.is_user_fixable());
//! ```

use crate::contract::ValidationError;
use serde::Serialize;

/// Structured error code for documentation and programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    /// Config error - invalid value
    pub const CONFIG_INVALID: ErrorCode = ErrorCode("E020");
    /// Config error - file could not be read
    pub const CONFIG_UNREADABLE: ErrorCode = ErrorCode("E021");

    /// Computation error - generic
    pub const COMPUTATION_GENERIC: ErrorCode = ErrorCode("E030");
    /// Computation error - result broke its output contract
    pub const COMPUTATION_OUTPUT: ErrorCode = ErrorCode("E031");
    /// Computation error - a panic was caught at the engine boundary
    pub const COMPUTATION_PANIC: ErrorCode = ErrorCode("E032");
    /// Computation error - a required collection was empty
    pub const COMPUTATION_EMPTY: ErrorCode = ErrorCode("E033");
    /// Computation error - invalid arguments to a numeric primitive
    pub const COMPUTATION_INVALID_INPUT: ErrorCode = ErrorCode("E034");
    /// Computation error - no handler registered for a pipeline stage
    pub const COMPUTATION_UNREGISTERED: ErrorCode = ErrorCode("E035");

    /// Contract error - request failed validation
    pub const CONTRACT_REQUEST: ErrorCode = ErrorCode("E050");

    /// Get the error code string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// Process exit code for a run that ended with this code.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if *self == Self::CONTRACT_REQUEST {
            4
        } else {
            1
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Failure raised inside an engine before the fallback wrapper absorbs it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// Structural or bounds validation failed.
    #[error("[{code}] Contract violation with {} error(s): {}", .violations.len(), summarize(.violations))]
    ContractViolation {
        /// Error code for documentation lookup.
        code: ErrorCode,
        /// Every field-level violation found.
        violations: Vec<ValidationError>,
    },

    /// An internal step failed to produce a value.
    #[error("[{code}] Computation failed in {stage}: {message}")]
    ComputationFailure {
        /// Error code for documentation lookup.
        code: ErrorCode,
        /// Pipeline stage that failed.
        stage: String,
        /// Human-readable error message.
        message: String,
    },
}

fn summarize(violations: &[ValidationError]) -> String {
    match violations {
        [] => "no details".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{} (and {} more)", first, rest.len()),
    }
}

impl EngineError {
    // ==========================================================================
    // Constructor Methods
    // ==========================================================================

    /// Create a contract violation for a rejected request.
    #[must_use]
    pub fn contract(violations: Vec<ValidationError>) -> Self {
        Self::ContractViolation {
            code: ErrorCode::CONTRACT_REQUEST,
            violations,
        }
    }

    /// Create a generic computation failure.
    #[must_use]
    pub fn computation(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_code(ErrorCode::COMPUTATION_GENERIC, stage, message)
    }

    /// Create a computation failure for an empty required collection.
    #[must_use]
    pub fn empty_input(stage: impl Into<String>, what: &str) -> Self {
        Self::with_code(
            ErrorCode::COMPUTATION_EMPTY,
            stage,
            format!("{} must not be empty", what),
        )
    }

    /// Create a computation failure for a result that broke its output contract.
    #[must_use]
    pub fn output_contract(violations: &[ValidationError]) -> Self {
        Self::with_code(
            ErrorCode::COMPUTATION_OUTPUT,
            "output_contract",
            summarize(violations),
        )
    }

    /// Create a computation failure with an explicit code.
    #[must_use]
    pub fn with_code(
        code: ErrorCode,
        stage: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::ComputationFailure {
            code,
            stage: stage.into(),
            message: message.into(),
        }
    }

    // ==========================================================================
    // Accessor Methods
    // ==========================================================================

    /// Get the error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ContractViolation { code, .. } => *code,
            Self::ComputationFailure { code, .. } => *code,
        }
    }

    /// Get the error category name.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::ContractViolation { .. } => "Contract",
            Self::ComputationFailure { .. } => "Computation",
        }
    }

    /// Get the primary error message.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::ContractViolation { violations, .. } => summarize(violations),
            Self::ComputationFailure { message, .. } => message.clone(),
        }
    }

    /// Field-level violations, empty for computation failures.
    #[must_use]
    pub fn violations(&self) -> &[ValidationError] {
        match self {
            Self::ContractViolation { violations, .. } => violations,
            Self::ComputationFailure { .. } => &[],
        }
    }

    // ==========================================================================
    // Classification Methods
    // ==========================================================================

    /// Contract violations are fixed by correcting the snapshot; computation
    /// failures are engine defects or degenerate inputs.
    #[must_use]
    pub fn is_user_fixable(&self) -> bool {
        matches!(self, Self::ContractViolation { .. })
    }

    /// Get the suggested exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.code().exit_code()
    }
}

// =============================================================================
// Serde Serialization for Structured Logging
// =============================================================================

impl Serialize for EngineError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("EngineError", 4)?;
        state.serialize_field("code", &self.code().as_str())?;
        state.serialize_field("category", &self.category())?;
        state.serialize_field("message", &self.to_string())?;
        state.serialize_field("user_fixable", &self.is_user_fixable())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::FieldPath;

    #[test]
    fn test_contract_error_display_lists_first_violation() {
        let err = EngineError::contract(vec![
            ValidationError::at_field(&FieldPath::new("probability"), "must be within [0, 1]"),
            ValidationError::at_field(&FieldPath::new("impact"), "unknown tier"),
        ]);

        let rendered = err.to_string();
        assert!(rendered.starts_with("[E050] Contract violation with 2 error(s)"));
        assert!(rendered.contains("probability: must be within [0, 1]"));
        assert!(rendered.contains("(and 1 more)"));
    }

    #[test]
    fn test_computation_error_display() {
        let err = EngineError::empty_input("team_profile", "team members");
        assert_eq!(
            err.to_string(),
            "[E033] Computation failed in team_profile: team members must not be empty"
        );
        assert_eq!(err.code(), ErrorCode::COMPUTATION_EMPTY);
    }

    #[test]
    fn test_classification() {
        let contract = EngineError::contract(Vec::new());
        let computation = EngineError::computation("stage", "boom");

        assert!(contract.is_user_fixable());
        assert!(!computation.is_user_fixable());
        assert_eq!(contract.exit_code(), 4);
        assert_eq!(computation.exit_code(), 1);
        assert_eq!(contract.category(), "Contract");
        assert!(computation.violations().is_empty());
    }

    #[test]
    fn test_serialize_structured_fields() {
        let err = EngineError::computation("market_overview", "no competitors");
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["code"], "E030");
        assert_eq!(json["category"], "Computation");
        assert_eq!(json["user_fixable"], false);
    }
}
