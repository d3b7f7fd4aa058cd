use crate::errors::{EngineError, ErrorCode};

/// Standard weighted mean.
///
/// Fails when the weights are empty, sum to zero, or do not pair up with
/// the values.
pub fn weighted_average(values: &[f64], weights: &[f64]) -> Result<f64, EngineError> {
    if weights.is_empty() {
        return Err(invalid_input("weights must not be empty"));
    }
    if values.len() != weights.len() {
        return Err(invalid_input(&format!(
            "{} values paired with {} weights",
            values.len(),
            weights.len()
        )));
    }

    let total_weight: f64 = weights.iter().sum();
    if total_weight == 0.0 || !total_weight.is_finite() {
        return Err(invalid_input("weights must sum to a non-zero finite value"));
    }

    let weighted: f64 = values.iter().zip(weights).map(|(v, w)| v * w).sum();
    Ok(weighted / total_weight)
}

fn invalid_input(message: &str) -> EngineError {
    EngineError::with_code(
        ErrorCode::COMPUTATION_INVALID_INPUT,
        "weighted_average",
        message,
    )
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance; 0 for an empty series.
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64
}

/// Mean of `select` over `items`; 0 when empty.
pub fn mean_by<T>(items: &[T], select: impl Fn(&T) -> f64) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    items.iter().map(select).sum::<f64>() / items.len() as f64
}
