//! Utilization tracking, alert triggers, and the weekly review.

use super::types::*;
use crate::core::SeverityTier;

const KEY_METRIC_LIMIT: usize = 5;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn build_monitoring_plan(bottlenecks: &[Bottleneck]) -> MonitoringPlan {
    MonitoringPlan {
        key_metrics: key_metrics(bottlenecks),
        alert_system: alert_system(),
        review_schedule: review_schedule(),
    }
}

pub fn key_metrics(bottlenecks: &[Bottleneck]) -> Vec<KeyMetric> {
    bottlenecks
        .iter()
        .take(KEY_METRIC_LIMIT)
        .map(|b| {
            let target = b.metrics.target_utilization;
            KeyMetric {
                metric: format!("{} Utilization", b.name),
                current_value: b.metrics.current_utilization,
                target_value: target,
                monitoring_frequency: if b.severity == SeverityTier::Critical {
                    MetricFrequency::Hourly
                } else {
                    MetricFrequency::Daily
                },
                alert_thresholds: AlertThresholds {
                    warning: target * 0.9,
                    critical: target * 0.95,
                },
            }
        })
        .collect()
}

fn escalation(level: u8, timeframe: &str, stakeholder: &str, action: &str) -> EscalationLevel {
    EscalationLevel {
        level,
        timeframe: timeframe.to_string(),
        stakeholder: stakeholder.to_string(),
        action: action.to_string(),
    }
}

fn alert_system() -> AlertSystem {
    AlertSystem {
        triggers: vec![
            AlertTrigger {
                condition: "Critical bottleneck utilization > 95%".to_string(),
                severity: AlertSeverity::Critical,
                action: "Immediate intervention required".to_string(),
                stakeholders: strings(&["Operations Manager", "CTO", "CEO"]),
            },
            AlertTrigger {
                condition: "Major bottleneck efficiency < 60%".to_string(),
                severity: AlertSeverity::Warning,
                action: "Investigate and optimize".to_string(),
                stakeholders: strings(&["Operations Team", "Process Manager"]),
            },
        ],
        escalation_procedure: vec![
            escalation(
                1,
                "15 minutes",
                "Operations Team",
                "Immediate assessment and response",
            ),
            escalation(
                2,
                "1 hour",
                "Operations Manager",
                "Management intervention and resource allocation",
            ),
            escalation(
                3,
                "4 hours",
                "Executive Team",
                "Strategic decision and emergency measures",
            ),
        ],
    }
}

fn review_schedule() -> ReviewCadence {
    ReviewCadence {
        frequency: ReviewFrequency::Weekly,
        participants: strings(&["Operations Manager", "Process Owners", "Analysts"]),
        agenda: strings(&[
            "Bottleneck status review",
            "Optimization progress update",
            "New bottleneck identification",
            "Action plan adjustments",
        ]),
        outcomes: strings(&[
            "Updated bottleneck status",
            "Revised optimization priorities",
            "Resource allocation decisions",
            "Next week action items",
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bottleneck(severity: SeverityTier) -> Bottleneck {
        Bottleneck {
            id: "resource_staff".into(),
            name: "Staff".into(),
            area: "human".into(),
            bottleneck_type: BottleneckType::Resource,
            severity,
            flagged: true,
            impact: BottleneckImpact {
                throughput_reduction: 0.1,
                cost_increase: 0.0,
                time_delay: 0.0,
                quality_impact: 0.0,
            },
            causes: vec![],
            metrics: BottleneckMetrics {
                current_utilization: 0.92,
                target_utilization: 0.8,
                efficiency: 0.9,
                throughput: 92.0,
                backlog: 0.0,
            },
            dependencies: DependencyRefs::default(),
        }
    }

    #[test]
    fn test_critical_bottlenecks_are_watched_hourly() {
        let metrics = key_metrics(&[bottleneck(SeverityTier::Critical), bottleneck(SeverityTier::Major)]);
        assert_eq!(metrics[0].metric, "Staff Utilization");
        assert_eq!(metrics[0].monitoring_frequency, MetricFrequency::Hourly);
        assert_eq!(metrics[1].monitoring_frequency, MetricFrequency::Daily);
        assert!((metrics[0].alert_thresholds.warning - 0.72).abs() < 1e-12);
    }

    #[test]
    fn test_key_metrics_are_capped() {
        let bottlenecks: Vec<Bottleneck> = (0..7).map(|_| bottleneck(SeverityTier::Minor)).collect();
        assert_eq!(key_metrics(&bottlenecks).len(), KEY_METRIC_LIMIT);
    }

    #[test]
    fn test_plan_has_fixed_escalation_and_review() {
        let plan = build_monitoring_plan(&[]);
        assert!(plan.key_metrics.is_empty());
        assert_eq!(plan.alert_system.escalation_procedure.len(), 3);
        assert_eq!(plan.review_schedule.frequency, ReviewFrequency::Weekly);
    }
}
