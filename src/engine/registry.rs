use crate::errors::{EngineError, ErrorCode};
use std::fmt::Debug;

/// Write-once lookup table from a stage key to its handler.
///
/// Built once (usually behind a `once_cell::sync::Lazy`) and never mutated
/// afterwards, so one registry is shared freely across threads.
///
/// ```rust
/// use growthmap::engine::Registry;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Stage { Double, Square }
///
/// fn double(x: f64) -> f64 { x * 2.0 }
/// fn square(x: f64) -> f64 { x * x }
///
/// let registry: Registry<Stage, fn(f64) -> f64> = Registry::new(
///     "arithmetic",
///     vec![(Stage::Double, double as fn(f64) -> f64), (Stage::Square, square)],
/// );
///
/// let square = registry.resolve(Stage::Square).unwrap();
/// assert_eq!(square(3.0), 9.0);
/// ```
#[derive(Debug)]
pub struct Registry<K, F> {
    name: &'static str,
    entries: Vec<(K, F)>,
}

impl<K, F> Registry<K, F>
where
    K: Copy + Eq + Debug,
    F: Copy,
{
    pub fn new(name: &'static str, entries: Vec<(K, F)>) -> Self {
        Self { name, entries }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get(&self, key: K) -> Option<F> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, handler)| *handler)
    }

    /// Look up `key`, failing when no handler was registered.
    pub fn resolve(&self, key: K) -> Result<F, EngineError> {
        self.get(key).ok_or_else(|| {
            EngineError::with_code(
                ErrorCode::COMPUTATION_UNREGISTERED,
                self.name,
                format!("no handler registered for {:?}", key),
            )
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Stage {
        Identify,
        Rank,
        Report,
    }

    fn increment(x: u32) -> u32 {
        x + 1
    }

    fn scale(x: u32) -> u32 {
        x * 10
    }

    fn registry() -> Registry<Stage, fn(u32) -> u32> {
        Registry::new(
            "test",
            vec![
                (Stage::Identify, increment as fn(u32) -> u32),
                (Stage::Rank, scale),
            ],
        )
    }

    #[test]
    fn test_resolve_registered_handler() {
        let rank = registry().resolve(Stage::Rank).unwrap();
        assert_eq!(rank(4), 40);
    }

    #[test]
    fn test_missing_handler_is_a_computation_failure() {
        let err = registry().resolve(Stage::Report).unwrap_err();
        assert_eq!(err.code(), ErrorCode::COMPUTATION_UNREGISTERED);
        assert!(err.to_string().contains("Report"));
    }

    #[test]
    fn test_keys_preserve_registration_order() {
        let keys: Vec<Stage> = registry().keys().collect();
        assert_eq!(keys, vec![Stage::Identify, Stage::Rank]);
        assert_eq!(registry().len(), 2);
    }
}
