/// Ordered threshold ladder mapping a score to a tier.
///
/// A score climbs to a step only when it is strictly greater than the
/// step's threshold, so a score sitting exactly on a boundary keeps the
/// lower tier.
///
/// ```rust
/// use growthmap::core::ImpactTier;
/// use growthmap::metrics::{severity_from_score, Ladder};
///
/// const LEVELS: Ladder<ImpactTier> = Ladder::new(
///     ImpactTier::Low,
///     &[(3.0, ImpactTier::Medium), (5.0, ImpactTier::High), (7.0, ImpactTier::Critical)],
/// );
///
/// assert_eq!(severity_from_score(5.0, &LEVELS), ImpactTier::Medium);
/// assert_eq!(severity_from_score(5.1, &LEVELS), ImpactTier::High);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Ladder<T: 'static> {
    floor: T,
    steps: &'static [(f64, T)],
}

impl<T: Copy + 'static> Ladder<T> {
    /// `steps` must be sorted by ascending threshold.
    pub const fn new(floor: T, steps: &'static [(f64, T)]) -> Self {
        Self { floor, steps }
    }
}

pub fn severity_from_score<T: Copy>(score: f64, ladder: &Ladder<T>) -> T {
    ladder
        .steps
        .iter()
        .take_while(|(threshold, _)| score > *threshold)
        .last()
        .map(|(_, tier)| *tier)
        .unwrap_or(ladder.floor)
}
