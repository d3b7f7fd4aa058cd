//! Process flow, resource allocation gaps, and capacity roll-up.

use super::types::*;
use crate::core::{clamp_unit, safe_ratio, ImpactTier, SeverityTier};
use std::collections::{BTreeMap, HashMap};

fn bottlenecks_by_id(bottlenecks: &[Bottleneck]) -> HashMap<&str, &Bottleneck> {
    bottlenecks.iter().map(|b| (b.id.as_str(), b)).collect()
}

pub fn build_map(data: &SystemData, bottlenecks: &[Bottleneck]) -> BottleneckMap {
    let index = bottlenecks_by_id(bottlenecks);
    BottleneckMap {
        process_flow: process_flow(&data.processes, &index),
        resource_allocation: resource_allocation(&data.resources, &index),
        capacity_analysis: capacity_analysis(&data.processes, &index),
    }
}

fn process_flow(processes: &[Process], index: &HashMap<&str, &Bottleneck>) -> Vec<FlowStep> {
    processes
        .iter()
        .enumerate()
        .map(|(position, process)| {
            let bottleneck = index.get(format!("process_{}", process.id).as_str()).copied();
            FlowStep {
                process: process.name.clone(),
                position: position + 1,
                is_bottleneck: bottleneck.is_some(),
                severity: bottleneck.map(|b| b.severity),
                flow_rate: process.performance.throughput,
            }
        })
        .collect()
}

fn allocation_priority(bottleneck: Option<&Bottleneck>) -> ImpactTier {
    match bottleneck.map(|b| b.severity) {
        Some(SeverityTier::Critical) => ImpactTier::Critical,
        Some(SeverityTier::Major) => ImpactTier::High,
        Some(_) => ImpactTier::Medium,
        None => ImpactTier::Low,
    }
}

fn resource_allocation(
    resources: &[Resource],
    index: &HashMap<&str, &Bottleneck>,
) -> BTreeMap<String, AllocationGap> {
    resources
        .iter()
        .map(|resource| {
            let bottleneck = index.get(format!("resource_{}", resource.id).as_str()).copied();
            let allocated = resource.availability.allocated;
            let required = resource.availability.utilized;
            (
                resource.name.clone(),
                AllocationGap {
                    allocated,
                    required,
                    gap: (required - allocated).max(0.0),
                    priority: allocation_priority(bottleneck),
                },
            )
        })
        .collect()
}

fn capacity_analysis(processes: &[Process], index: &HashMap<&str, &Bottleneck>) -> CapacityAnalysis {
    let total_capacity: f64 = processes.iter().map(|p| p.capacity.theoretical).sum();
    let utilized_capacity: f64 = processes.iter().map(|p| p.capacity.current).sum();
    let constrained_capacity: f64 = processes
        .iter()
        .filter(|p| index.contains_key(format!("process_{}", p.id).as_str()))
        .map(|p| p.capacity.current)
        .sum();

    CapacityAnalysis {
        total_capacity,
        utilized_capacity,
        available_capacity: total_capacity - utilized_capacity,
        constrained_capacity,
        utilization_rate: clamp_unit(safe_ratio(utilized_capacity, total_capacity)),
    }
}
