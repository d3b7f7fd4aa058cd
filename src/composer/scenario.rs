use crate::contract::{FieldPath, Validate, Violations};
use serde::{Deserialize, Serialize};

/// Outcome bundle with a probability weight.
pub trait Weighted {
    fn probability(&self) -> f64;
}

/// Canonical scenario distribution.
///
/// The three mandatory slots are fields rather than list entries, so a
/// set can never be built with one of them missing. `tail` holds the
/// low-probability extreme (black swan or compound realization).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "S: Deserialize<'de>"))]
pub struct ScenarioSet<S> {
    pub best: S,
    pub most_likely: S,
    pub worst: S,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tail: Option<S>,
}

impl<S> ScenarioSet<S> {
    pub fn new(best: S, most_likely: S, worst: S) -> Self {
        Self {
            best,
            most_likely,
            worst,
            tail: None,
        }
    }

    #[must_use]
    pub fn with_tail(mut self, tail: S) -> Self {
        self.tail = Some(tail);
        self
    }

    /// Scenarios in canonical order: best, most likely, worst, tail.
    pub fn iter(&self) -> impl Iterator<Item = &S> {
        [&self.best, &self.most_likely, &self.worst]
            .into_iter()
            .chain(self.tail.as_ref())
    }

    pub fn len(&self) -> usize {
        3 + usize::from(self.tail.is_some())
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl<S: Weighted + Validate> Validate for ScenarioSet<S> {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        let slots = [
            ("best", Some(&self.best)),
            ("most_likely", Some(&self.most_likely)),
            ("worst", Some(&self.worst)),
            ("tail", self.tail.as_ref()),
        ];
        for (name, scenario) in slots {
            if let Some(scenario) = scenario {
                out.unit(&path.push(name), "probability", scenario.probability());
                out.nested(path, name, scenario);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Outcome(f64);

    impl Weighted for Outcome {
        fn probability(&self) -> f64 {
            self.0
        }
    }

    impl Validate for Outcome {
        fn collect_violations(&self, _path: &FieldPath, _out: &mut Violations) {}
    }

    #[test]
    fn test_iteration_order_includes_tail() {
        let set = ScenarioSet::new(Outcome(0.2), Outcome(0.6), Outcome(0.2)).with_tail(Outcome(0.05));
        let probabilities: Vec<f64> = set.iter().map(|s| s.0).collect();
        assert_eq!(probabilities, vec![0.2, 0.6, 0.2, 0.05]);
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_probability_bounds_are_checked() {
        let set = ScenarioSet::new(Outcome(1.2), Outcome(0.6), Outcome(-0.1));
        let fields: Vec<String> = set
            .violations()
            .iter()
            .map(|e| e.field.as_string())
            .collect();
        assert_eq!(fields, vec!["best.probability", "worst.probability"]);
    }
}
