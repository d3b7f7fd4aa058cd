//! Process dependency lookups.
//!
//! `dependencies` lists are not guaranteed to form a DAG, so the transitive
//! walk keeps a visited set and terminates on cycles.

use super::types::{DependencyRefs, Process, Resource};
use std::collections::{BTreeSet, HashMap, VecDeque};

const CRITICAL_NEIGHBOUR_UTILIZATION: f64 = 0.85;
const CRITICAL_CONSUMER_UTILIZATION: f64 = 0.9;

/// Adjacency over process ids, built once per request.
#[derive(Debug)]
pub struct DependencyGraph<'a> {
    by_id: HashMap<&'a str, &'a Process>,
    /// process id → ids of processes that declare it as a dependency
    dependents: HashMap<&'a str, Vec<&'a str>>,
    processes: &'a [Process],
}

impl<'a> DependencyGraph<'a> {
    pub fn new(processes: &'a [Process]) -> Self {
        let by_id = processes.iter().map(|p| (p.id.as_str(), p)).collect();
        let mut dependents: HashMap<&'a str, Vec<&'a str>> = HashMap::new();
        for process in processes {
            for dependency in &process.dependencies {
                dependents
                    .entry(dependency.as_str())
                    .or_default()
                    .push(process.id.as_str());
            }
        }
        Self {
            by_id,
            dependents,
            processes,
        }
    }

    fn utilization(&self, id: &str) -> Option<f64> {
        self.by_id.get(id).map(|p| p.performance.utilization)
    }

    pub fn downstream(&self, id: &str) -> Vec<String> {
        self.dependents
            .get(id)
            .map(|ids| ids.iter().map(|s| s.to_string()).collect())
            .unwrap_or_default()
    }

    /// Every process reachable by following dependents from `id`, sorted.
    pub fn impacted(&self, id: &str) -> Vec<String> {
        let mut visited: BTreeSet<&str> = BTreeSet::new();
        let mut queue: VecDeque<&str> = VecDeque::from([id]);

        while let Some(current) = queue.pop_front() {
            for &next in self.dependents.get(current).into_iter().flatten() {
                if next != id && visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        visited.into_iter().map(str::to_string).collect()
    }

    pub fn process_refs(&self, process: &Process) -> DependencyRefs {
        let upstream = process.dependencies.clone();
        let downstream = self.downstream(&process.id);
        let critical = upstream
            .iter()
            .chain(downstream.iter())
            .filter(|id| {
                self.utilization(id)
                    .is_some_and(|u| u > CRITICAL_NEIGHBOUR_UTILIZATION)
            })
            .cloned()
            .collect();

        DependencyRefs {
            impacted: self.impacted(&process.id),
            upstream,
            downstream,
            critical,
        }
    }

    /// Processes consuming the resource are its upstream references.
    pub fn resource_refs(&self, resource: &Resource) -> DependencyRefs {
        let consumers: Vec<&Process> = self
            .processes
            .iter()
            .filter(|p| p.inputs.iter().any(|input| input.resource == resource.id))
            .collect();

        DependencyRefs {
            upstream: consumers.iter().map(|p| p.id.clone()).collect(),
            downstream: Vec::new(),
            critical: consumers
                .iter()
                .filter(|p| p.performance.utilization > CRITICAL_CONSUMER_UTILIZATION)
                .map(|p| p.id.clone())
                .collect(),
            impacted: Vec::new(),
        }
    }
}
