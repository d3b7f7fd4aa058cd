//! Quick wins, strategic improvements, and per-process optimizations.

use super::types::*;
use crate::core::{ImpactTier, SeverityTier};

const QUICK_WIN_LIMIT: usize = 3;
const STRATEGIC_LIMIT: usize = 2;
const PROCESS_OPTIMIZATION_LIMIT: usize = 3;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Cheap fixes for the minor bottlenecks.
pub fn quick_wins(bottlenecks: &[Bottleneck]) -> Vec<QuickWin> {
    bottlenecks
        .iter()
        .filter(|b| b.severity == SeverityTier::Minor)
        .take(QUICK_WIN_LIMIT)
        .map(|b| QuickWin {
            opportunity: format!("Optimize {}", b.name),
            description: format!("Address minor inefficiencies in {}", b.name),
            implementation: "Process optimization and resource reallocation".to_string(),
            effort: ImpactTier::Low,
            impact: 0.3,
            timeframe: "1-2 weeks".to_string(),
            cost: 5000.0,
            roi: 2.5,
        })
        .collect()
}

pub fn strategic_improvements(bottlenecks: &[Bottleneck]) -> Vec<StrategicImprovement> {
    bottlenecks
        .iter()
        .filter(|b| b.severity >= SeverityTier::Major)
        .take(STRATEGIC_LIMIT)
        .map(|b| StrategicImprovement {
            improvement: format!("Strategic overhaul of {}", b.name),
            description: format!("Comprehensive redesign and optimization of {}", b.name),
            rationale: format!(
                "{} is a {} bottleneck significantly impacting performance",
                b.name, b.severity
            ),
            requirements: strings(&[
                "Investment in new technology",
                "Process redesign",
                "Staff training",
            ]),
            benefits: strings(&[
                "Significant throughput increase",
                "Cost reduction",
                "Quality improvement",
            ]),
            timeline: "3-6 months".to_string(),
            investment: 50_000.0,
            expected_return: 150_000.0,
            risk_level: ImpactTier::Medium,
        })
        .collect()
}

pub fn process_optimizations(bottlenecks: &[Bottleneck]) -> Vec<ProcessOptimization> {
    bottlenecks
        .iter()
        .filter(|b| b.bottleneck_type == BottleneckType::Process)
        .take(PROCESS_OPTIMIZATION_LIMIT)
        .map(|b| ProcessOptimization {
            process: b.name.clone(),
            current_state: format!(
                "{} bottleneck with {:.1}% utilization",
                b.severity,
                b.metrics.current_utilization * 100.0
            ),
            optimized_state: "Optimized process with improved efficiency and reduced constraints"
                .to_string(),
            improvements: vec![
                ProcessImprovement {
                    improvement_type: ImprovementType::Automation,
                    description: "Implement automation to reduce manual tasks".to_string(),
                    impact: 0.4,
                },
                ProcessImprovement {
                    improvement_type: ImprovementType::Reorganization,
                    description: "Reorganize workflow for better efficiency".to_string(),
                    impact: 0.3,
                },
            ],
            metrics: OptimizationGains {
                throughput_increase: 0.3,
                efficiency_gain: 0.25,
                cost_reduction: 0.2,
                time_reduction: 0.35,
            },
        })
        .collect()
}

pub fn build_opportunities(bottlenecks: &[Bottleneck]) -> OptimizationOpportunities {
    OptimizationOpportunities {
        quick_wins: quick_wins(bottlenecks),
        strategic_improvements: strategic_improvements(bottlenecks),
        process_optimizations: process_optimizations(bottlenecks),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bottleneck(name: &str, severity: SeverityTier, kind: BottleneckType) -> Bottleneck {
        Bottleneck {
            id: format!("process_{name}"),
            name: name.into(),
            area: "operations".into(),
            bottleneck_type: kind,
            severity,
            flagged: true,
            impact: BottleneckImpact {
                throughput_reduction: 0.2,
                cost_increase: 100.0,
                time_delay: 1.0,
                quality_impact: 0.0,
            },
            causes: vec![],
            metrics: BottleneckMetrics {
                current_utilization: 0.923,
                target_utilization: 0.8,
                efficiency: 0.8,
                throughput: 10.0,
                backlog: 0.0,
            },
            dependencies: DependencyRefs::default(),
        }
    }

    #[test]
    fn test_quick_wins_only_for_minor() {
        let wins = quick_wins(&[
            bottleneck("Billing", SeverityTier::Major, BottleneckType::Process),
            bottleneck("Intake", SeverityTier::Minor, BottleneckType::Process),
        ]);
        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].opportunity, "Optimize Intake");
    }

    #[test]
    fn test_strategic_capped_at_two() {
        let bottlenecks: Vec<Bottleneck> = ["A", "B", "C"]
            .iter()
            .map(|name| bottleneck(name, SeverityTier::Critical, BottleneckType::Resource))
            .collect();
        let improvements = strategic_improvements(&bottlenecks);
        assert_eq!(improvements.len(), STRATEGIC_LIMIT);
        assert_eq!(
            improvements[0].rationale,
            "A is a critical bottleneck significantly impacting performance"
        );
    }

    #[test]
    fn test_process_optimization_describes_current_state() {
        let optimizations = process_optimizations(&[
            bottleneck("Pack", SeverityTier::Major, BottleneckType::Process),
            bottleneck("Staff", SeverityTier::Major, BottleneckType::Resource),
        ]);
        assert_eq!(optimizations.len(), 1);
        assert_eq!(
            optimizations[0].current_state,
            "major bottleneck with 92.3% utilization"
        );
    }
}
