use super::{Analysis, Engine};
use crate::contract::Validate;
use crate::errors::{EngineError, ErrorCode};
use crate::observability::{panic_message, record_fallback, set_engine, set_phase, EnginePhase};
use std::panic::{catch_unwind, AssertUnwindSafe};
use stillwater::Validation;
use tracing::{debug, warn};

/// Run `engine` and always return a contract-valid result.
pub fn run_guarded<E: Engine>(engine: &E, request: &E::Request) -> Analysis<E::Output> {
    let _engine = set_engine(E::KIND);

    match try_run(engine, request) {
        Ok(result) => {
            debug!(engine = %E::KIND, "Analysis computed");
            Analysis::computed(result)
        }
        Err(err) => {
            warn!(
                engine = %E::KIND,
                code = %err.code(),
                category = err.category(),
                "Serving fallback result: {}",
                err
            );
            record_fallback();
            let _phase = set_phase(EnginePhase::Fallback);
            Analysis::fallback(engine.fallback(request), &err)
        }
    }
}

/// Validate, compute, and validate again, surfacing the first failure.
pub fn try_run<E: Engine>(engine: &E, request: &E::Request) -> Result<E::Output, EngineError> {
    {
        let _phase = set_phase(EnginePhase::RequestValidation);
        if let Validation::Failure(errors) = request.validate() {
            return Err(EngineError::contract(errors.into_iter().collect()));
        }
    }

    // Engines are pure over a borrowed request, so nothing observable is
    // left half-updated when a panic unwinds through them.
    let result = catch_unwind(AssertUnwindSafe(|| engine.compute(request))).map_err(|payload| {
        EngineError::with_code(
            ErrorCode::COMPUTATION_PANIC,
            "compute",
            panic_message(payload.as_ref()),
        )
    })??;

    let _phase = set_phase(EnginePhase::OutputValidation);
    let violations = result.violations();
    if violations.is_empty() {
        Ok(result)
    } else {
        Err(EngineError::output_contract(&violations))
    }
}
