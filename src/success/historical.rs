//! Historical adjustment and confidence accumulation.

use super::types::*;
use crate::core::safe_ratio;

/// Adjustment when the realized success rate is zero; a perfect record adds 0.6.
const ADJUSTMENT_FLOOR: f64 = 0.7;
const ADJUSTMENT_SPAN: f64 = 0.6;

/// Multiplier in `[0.7, 1.3]` from similarity-weighted past outcomes.
///
/// No comparable initiatives leaves the probability untouched (1.0). When
/// every similarity is zero the unweighted success rate is used instead.
pub fn historical_adjustment(history: &HistoricalOutcomes) -> f64 {
    let similar = &history.similar_initiatives;
    if similar.is_empty() {
        return 1.0;
    }

    let (weighted_successes, total_similarity) =
        similar.iter().fold((0.0, 0.0), |(successes, total), s| {
            let hit = if s.outcome.is_success() { 1.0 } else { 0.0 };
            (successes + hit * s.similarity, total + s.similarity)
        });

    let success_rate = if total_similarity > 0.0 {
        weighted_successes / total_similarity
    } else {
        let successes = similar.iter().filter(|s| s.outcome.is_success()).count();
        safe_ratio(successes as f64, similar.len() as f64)
    };

    ADJUSTMENT_FLOOR + success_rate * ADJUSTMENT_SPAN
}

/// Confidence grows with the volume of evidence behind the estimate.
pub fn confidence(request: &SuccessProbabilityRequest) -> f64 {
    let similar = request.historical_data.similar_initiatives.len() as f64;
    let stakeholders: usize = request
        .initiatives
        .iter()
        .map(|i| i.stakeholders.len())
        .sum();
    let risks: usize = request
        .initiatives
        .iter()
        .map(|i| i.risk_factors.len())
        .sum();
    let track = &request.organizational_context.track_record;

    let mut confidence = 0.5;
    confidence += (similar * 0.05).min(0.3);
    confidence += (stakeholders as f64 * 0.02).min(0.2);
    confidence += (risks as f64 * 0.02).min(0.2);
    if track.success_rate > 0.0 {
        confidence += 0.15;
    }
    if track.on_time_delivery > 0.0 {
        confidence += 0.1;
    }
    if track.budget_adherence > 0.0 {
        confidence += 0.05;
    }
    confidence.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn similar(similarity: f64, outcome: Outcome) -> SimilarInitiative {
        SimilarInitiative {
            initiative_id: "past".into(),
            similarity,
            outcome,
            success_factors: vec![],
            failure_factors: vec![],
            lessons: vec![],
        }
    }

    fn history(items: Vec<SimilarInitiative>) -> HistoricalOutcomes {
        HistoricalOutcomes {
            similar_initiatives: items,
            ..Default::default()
        }
    }

    #[test]
    fn test_no_history_means_no_adjustment() {
        assert_eq!(historical_adjustment(&HistoricalOutcomes::default()), 1.0);
    }

    #[test]
    fn test_adjustment_spans_floor_to_ceiling() {
        let failures = history(vec![similar(0.9, Outcome::Failed)]);
        assert!((historical_adjustment(&failures) - 0.7).abs() < 1e-12);

        let successes = history(vec![
            similar(0.9, Outcome::Successful),
            similar(0.4, Outcome::HighlySuccessful),
        ]);
        assert!((historical_adjustment(&successes) - 1.3).abs() < 1e-12);
    }

    #[test]
    fn test_similarity_weights_outcomes() {
        let mixed = history(vec![
            similar(0.75, Outcome::Successful),
            similar(0.25, Outcome::PartiallySuccessful),
        ]);
        assert!((historical_adjustment(&mixed) - (0.7 + 0.75 * 0.6)).abs() < 1e-12);
    }

    #[test]
    fn test_zero_similarity_uses_plain_rate() {
        let flat = history(vec![
            similar(0.0, Outcome::Successful),
            similar(0.0, Outcome::Failed),
        ]);
        assert!((historical_adjustment(&flat) - 1.0).abs() < 1e-12);
    }
}
