//! Request and result contracts.
//!
//! Every request and result record implements [`Validate`]. Validation never
//! stops at the first problem: each bounded field is checked with a
//! `stillwater` predicate and every failure is accumulated into a
//! [`Violations`] collector, so a caller sees the whole list at once.
//!
//! # Example
//!
//! ```rust
//! use growthmap::contract::{FieldPath, Validate, Violations};
//!
//! struct Sample {
//!     probability: f64,
//! }
//!
//! impl Validate for Sample {
//!     fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
//!         out.unit(path, "probability", self.probability);
//!     }
//! }
//!
//! assert!(Sample { probability: 0.4 }.validate().is_success());
//! assert!(Sample { probability: 1.5 }.validate().is_failure());
//! ```

use serde::Serialize;
use stillwater::predicate::{ge, le, Predicate, PredicateExt};
use stillwater::{NonEmptyVec, Validation};

/// Accumulating validation result used across the crate.
pub type ContractValidation<T> = Validation<T, NonEmptyVec<ValidationError>>;

// =============================================================================
// Field Context Types
// =============================================================================

/// Nested field path for error context, e.g. `team_members[2].workload`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Create an empty root path.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Create a path with a single field.
    pub fn new(field: impl Into<String>) -> Self {
        Self(vec![field.into()])
    }

    /// Add a field to the path, returning a new path.
    pub fn push(&self, field: impl Into<String>) -> Self {
        let mut path = self.0.clone();
        path.push(field.into());
        Self(path)
    }

    /// Add an indexed field (`name[index]`) to the path.
    pub fn push_index(&self, field: &str, index: usize) -> Self {
        self.push(format!("{}[{}]", field, index))
    }

    /// Get the path as a dot-separated string.
    pub fn as_string(&self) -> String {
        self.0.join(".")
    }

    /// Check if this is the root path (no fields).
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the last segment of the path, if any.
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(|s| s.as_str())
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl From<&str> for FieldPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl Serialize for FieldPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.as_string())
    }
}

/// Validation error with full field context.
///
/// ```rust
/// use growthmap::contract::{FieldPath, ValidationError};
///
/// let error = ValidationError::at_field(&FieldPath::new("workload"), "out of range")
///     .with_context("[0, 1]", "1.4");
///
/// assert_eq!(error.to_string(), "workload: out of range (expected: [0, 1], got: 1.4)");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// The field path where the error occurred.
    pub field: FieldPath,
    /// Human-readable error message.
    pub message: String,
    /// Expected value or constraint.
    pub expected: Option<String>,
    /// Actual value that failed validation.
    pub actual: Option<String>,
}

impl ValidationError {
    /// Create a validation error at a specific field.
    pub fn at_field(field: &FieldPath, message: impl Into<String>) -> Self {
        Self {
            field: field.clone(),
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    /// Add expected and actual context to the error.
    pub fn with_context(mut self, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self.actual = Some(actual.into());
        self
    }

    /// Add expected value context.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.field.is_root() {
            write!(f, "{}", self.message)?;
        } else {
            write!(f, "{}: {}", self.field, self.message)?;
        }

        if let (Some(expected), Some(actual)) = (&self.expected, &self.actual) {
            write!(f, " (expected: {}, got: {})", expected, actual)?;
        } else if let Some(expected) = &self.expected {
            write!(f, " (expected: {})", expected)?;
        } else if let Some(actual) = &self.actual {
            write!(f, " (got: {})", actual)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// =============================================================================
// Predicate Extension
// =============================================================================

/// Extension trait for predicate-based validation of a single value.
///
/// ```rust
/// use growthmap::contract::EnsureExt;
/// use stillwater::predicate::le;
///
/// assert!(0.3_f64.ensure(le(1.0), "too large").is_success());
/// assert!(3.0_f64.ensure(le(1.0), "too large").is_failure());
/// ```
pub trait EnsureExt<T> {
    /// Returns `Validation::Success(self)` if the predicate passes,
    /// or `Validation::Failure` with the provided error if it fails.
    fn ensure<P, E>(self, predicate: P, error: E) -> Validation<T, NonEmptyVec<E>>
    where
        P: Predicate<T>;

    /// Like `ensure`, but builds the error lazily from the rejected value.
    fn ensure_with<P, E, F>(self, predicate: P, error_fn: F) -> Validation<T, NonEmptyVec<E>>
    where
        P: Predicate<T>,
        F: FnOnce(&T) -> E;
}

impl<T> EnsureExt<T> for T {
    fn ensure<P, E>(self, predicate: P, error: E) -> Validation<T, NonEmptyVec<E>>
    where
        P: Predicate<T>,
    {
        if predicate.check(&self) {
            Validation::Success(self)
        } else {
            Validation::Failure(NonEmptyVec::new(error, Vec::new()))
        }
    }

    fn ensure_with<P, E, F>(self, predicate: P, error_fn: F) -> Validation<T, NonEmptyVec<E>>
    where
        P: Predicate<T>,
        F: FnOnce(&T) -> E,
    {
        if predicate.check(&self) {
            Validation::Success(self)
        } else {
            let error = error_fn(&self);
            Validation::Failure(NonEmptyVec::new(error, Vec::new()))
        }
    }
}

// =============================================================================
// Accumulator
// =============================================================================

/// Collects violations while walking a record tree.
#[derive(Debug, Default)]
pub struct Violations {
    errors: Vec<ValidationError>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a single-value validation into the collector.
    pub fn record<T>(&mut self, validation: ContractValidation<T>) {
        if let Validation::Failure(errors) = validation {
            self.errors.extend(errors);
        }
    }

    /// Require `value` to be a finite number inside `[min, max]`.
    pub fn within(&mut self, path: &FieldPath, field: &str, value: f64, min: f64, max: f64) {
        let at = path.push(field);
        self.record(value.ensure_with(ge(min).and(le(max)), |v| {
            ValidationError::at_field(&at, "value out of range")
                .with_context(format!("[{}, {}]", min, max), v.to_string())
        }));
    }

    /// Require `value` to lie in the unit interval.
    pub fn unit(&mut self, path: &FieldPath, field: &str, value: f64) {
        self.within(path, field, value, 0.0, 1.0);
    }

    /// Require `value` to be finite and non-negative.
    pub fn non_negative(&mut self, path: &FieldPath, field: &str, value: f64) {
        self.within(path, field, value, 0.0, f64::MAX);
    }

    /// Require `value` to be finite.
    pub fn finite(&mut self, path: &FieldPath, field: &str, value: f64) {
        if !value.is_finite() {
            self.push(
                ValidationError::at_field(&path.push(field), "must be a finite number")
                    .with_context("finite", value.to_string()),
            );
        }
    }

    /// Require a non-blank string.
    pub fn non_blank(&mut self, path: &FieldPath, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(ValidationError::at_field(&path.push(field), "must not be blank"));
        }
    }

    /// Record a violation when `holds` is false.
    pub fn require(&mut self, holds: bool, path: &FieldPath, field: &str, message: &str) {
        if !holds {
            self.push(ValidationError::at_field(&path.push(field), message));
        }
    }

    /// Validate each element of a list under `field[i]`.
    pub fn each<T: Validate>(&mut self, path: &FieldPath, field: &str, items: &[T]) {
        for (index, item) in items.iter().enumerate() {
            item.collect_violations(&path.push_index(field, index), self);
        }
    }

    /// Validate a nested record under `field`.
    pub fn nested<T: Validate>(&mut self, path: &FieldPath, field: &str, item: &T) {
        item.collect_violations(&path.push(field), self);
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Convert into an accumulated validation carrying `value` on success.
    pub fn finish<T>(self, value: T) -> ContractValidation<T> {
        match NonEmptyVec::from_vec(self.errors) {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(value),
        }
    }
}

/// A record with a checkable structural contract.
pub trait Validate {
    /// Push every violation found under `path` into `out`.
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations);

    /// Run the full contract from the root.
    fn validate(&self) -> ContractValidation<()> {
        let mut out = Violations::new();
        self.collect_violations(&FieldPath::root(), &mut out);
        out.finish(())
    }

    /// Run the contract and flatten into a list, empty when valid.
    fn violations(&self) -> Vec<ValidationError> {
        match self.validate() {
            Validation::Success(()) => Vec::new(),
            Validation::Failure(errors) => errors.into_iter().collect(),
        }
    }
}
