//! Engine abstraction and the always-answer execution wrapper.
//!
//! Each domain scorer implements [`Engine`]: a pure `compute` plus a
//! neutral `fallback`. Callers go through [`Engine::run`], which validates
//! the request, computes, validates the result, and on any failure serves
//! the fallback tagged with [`Provenance::Fallback`].

mod guard;
mod registry;

pub use guard::{run_guarded, try_run};
pub use registry::Registry;

use crate::contract::Validate;
use crate::errors::{EngineError, ErrorCode};
use serde::{Deserialize, Serialize};

/// The five domain scorers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    Risk,
    Bottleneck,
    Success,
    Performance,
    Competitive,
}

impl EngineKind {
    pub const ALL: [EngineKind; 5] = [
        Self::Risk,
        Self::Bottleneck,
        Self::Success,
        Self::Performance,
        Self::Competitive,
    ];
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Risk => "risk",
            Self::Bottleneck => "bottleneck",
            Self::Success => "success",
            Self::Performance => "performance",
            Self::Competitive => "competitive",
        };
        write!(f, "{label}")
    }
}

/// A pure, deterministic analysis over one request snapshot.
pub trait Engine: Sync {
    type Request: Validate;
    type Output: Validate;

    const KIND: EngineKind;

    /// Run the analysis pipeline. The request has already passed its contract.
    fn compute(&self, request: &Self::Request) -> Result<Self::Output, EngineError>;

    /// Neutral result served when `compute` cannot answer. Must satisfy the
    /// same output contract as a computed result.
    fn fallback(&self, request: &Self::Request) -> Self::Output;

    /// Guarded entry point: never fails.
    fn run(&self, request: &Self::Request) -> Analysis<Self::Output>
    where
        Self: Sized,
    {
        run_guarded(self, request)
    }

    /// Unguarded entry point exposing the failure instead of a fallback.
    fn try_compute(&self, request: &Self::Request) -> Result<Self::Output, EngineError>
    where
        Self: Sized,
    {
        try_run(self, request)
    }
}

/// Whether a result was computed or substituted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Provenance {
    Computed,
    Fallback { code: ErrorCode, reason: String },
}

/// An engine result with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis<T> {
    pub provenance: Provenance,
    pub result: T,
}

impl<T> Analysis<T> {
    pub fn computed(result: T) -> Self {
        Self {
            provenance: Provenance::Computed,
            result,
        }
    }

    pub fn fallback(result: T, error: &EngineError) -> Self {
        Self {
            provenance: Provenance::Fallback {
                code: error.code(),
                reason: error.to_string(),
            },
            result,
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self.provenance, Provenance::Computed)
    }

    pub fn is_fallback(&self) -> bool {
        !self.is_computed()
    }
}
