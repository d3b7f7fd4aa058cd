//! Thread-local context tracking for engine runs.
//!
//! Records which engine and pipeline phase the current thread is in, so a
//! fallback warning can say where a failure happened. Batch runs also keep
//! global atomic counters for snapshots processed and fallbacks served.
//!
//! ## Thread Safety
//!
//! - Thread-local context: each thread has its own context (works with
//!   rayon parallel iterators)
//! - Batch progress: atomic counters
//! - Context guards use RAII for automatic cleanup on drop

use crate::engine::EngineKind;
use std::cell::RefCell;
use std::sync::atomic::{AtomicUsize, Ordering};

static SNAPSHOTS_PROCESSED: AtomicUsize = AtomicUsize::new(0);
static SNAPSHOTS_TOTAL: AtomicUsize = AtomicUsize::new(0);
static FALLBACKS_SERVED: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    static CURRENT_CONTEXT: RefCell<EngineContext> = const { RefCell::new(EngineContext::new()) };
}

/// Snapshot of what the current thread is computing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineContext {
    pub engine: Option<EngineKind>,
    pub phase: Option<EnginePhase>,
}

impl EngineContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            engine: None,
            phase: None,
        }
    }
}

/// Stages of an engine invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    /// Checking the request contract
    RequestValidation,
    /// Building the top-level profile (overall score, market overview, ...)
    Profile,
    /// Detailed per-entity findings
    Findings,
    /// Scenario distribution
    Scenarios,
    /// Insights and recommendations
    Recommendations,
    /// Monitoring plan
    Monitoring,
    /// Checking the result contract
    OutputValidation,
    /// Building the degraded result
    Fallback,
}

impl std::fmt::Display for EnginePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RequestValidation => write!(f, "request_validation"),
            Self::Profile => write!(f, "profile"),
            Self::Findings => write!(f, "findings"),
            Self::Scenarios => write!(f, "scenarios"),
            Self::Recommendations => write!(f, "recommendations"),
            Self::Monitoring => write!(f, "monitoring"),
            Self::OutputValidation => write!(f, "output_validation"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// RAII guard restoring the previous context on drop.
pub struct ContextGuard {
    previous: EngineContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous;
        });
    }
}

/// Mark the current thread as running `engine`.
#[must_use]
pub fn set_engine(engine: EngineKind) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = *ctx.borrow();
        *ctx.borrow_mut() = EngineContext {
            engine: Some(engine),
            phase: None,
        };
        ContextGuard { previous }
    })
}

/// Set the current phase. Returns a guard that restores the previous phase.
///
/// ```ignore
/// let _phase = set_phase(EnginePhase::Scenarios);
/// // build scenarios...
/// ```
#[must_use]
pub fn set_phase(phase: EnginePhase) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = *ctx.borrow();
        ctx.borrow_mut().phase = Some(phase);
        ContextGuard { previous }
    })
}

#[must_use]
pub fn get_current_context() -> EngineContext {
    CURRENT_CONTEXT.with(|ctx| *ctx.borrow())
}

/// Reset the current thread's context to empty.
pub fn reset_context() {
    CURRENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = EngineContext::new();
    });
}

/// Batch progress counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    pub processed: usize,
    pub total: usize,
    pub fallbacks: usize,
}

/// Start a batch of `total` snapshots, clearing previous counts.
pub fn start_batch(total: usize) {
    SNAPSHOTS_TOTAL.store(total, Ordering::Relaxed);
    SNAPSHOTS_PROCESSED.store(0, Ordering::Relaxed);
    FALLBACKS_SERVED.store(0, Ordering::Relaxed);
}

/// Thread-safe; called from parallel iterators.
pub fn increment_processed() {
    SNAPSHOTS_PROCESSED.fetch_add(1, Ordering::Relaxed);
}

pub fn record_fallback() {
    FALLBACKS_SERVED.fetch_add(1, Ordering::Relaxed);
}

#[must_use]
pub fn get_progress() -> BatchProgress {
    BatchProgress {
        processed: SNAPSHOTS_PROCESSED.load(Ordering::Relaxed),
        total: SNAPSHOTS_TOTAL.load(Ordering::Relaxed),
        fallbacks: FALLBACKS_SERVED.load(Ordering::Relaxed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_guard_restores_previous() {
        reset_context();

        let _engine = set_engine(EngineKind::Risk);
        let _phase1 = set_phase(EnginePhase::Profile);
        assert_eq!(get_current_context().phase, Some(EnginePhase::Profile));

        {
            let _phase2 = set_phase(EnginePhase::Scenarios);
            let ctx = get_current_context();
            assert_eq!(ctx.phase, Some(EnginePhase::Scenarios));
            assert_eq!(ctx.engine, Some(EngineKind::Risk));
        }

        assert_eq!(
            get_current_context().phase,
            Some(EnginePhase::Profile),
            "Phase should be restored to Profile"
        );
    }

    #[test]
    fn test_engine_guard_clears_on_drop() {
        reset_context();
        {
            let _engine = set_engine(EngineKind::Competitive);
            assert_eq!(get_current_context().engine, Some(EngineKind::Competitive));
        }
        assert_eq!(get_current_context(), EngineContext::new());
    }

    #[test]
    fn test_context_is_thread_local() {
        reset_context();
        let _engine = set_engine(EngineKind::Bottleneck);

        let other = std::thread::spawn(get_current_context).join().unwrap();
        assert_eq!(other.engine, None);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(EnginePhase::OutputValidation.to_string(), "output_validation");
        assert_eq!(EnginePhase::RequestValidation.to_string(), "request_validation");
    }
}
