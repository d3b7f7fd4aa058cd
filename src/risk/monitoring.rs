//! Early-warning indicators, escalation, review cadence, and reporting.

use super::types::*;

const INDICATOR_SOURCE_LIMIT: usize = 5;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn build_monitoring(risks: &[IdentifiedRisk]) -> MonitoringFramework {
    MonitoringFramework {
        early_warning_system: EarlyWarningSystem {
            indicators: warning_indicators(risks),
            alerting: alerting(),
        },
        review_schedule: review_schedule(),
        reporting: reporting(),
    }
}

/// Traffic-light thresholds for every indicator of the top risks.
pub fn warning_indicators(risks: &[IdentifiedRisk]) -> Vec<WarningIndicator> {
    risks
        .iter()
        .take(INDICATOR_SOURCE_LIMIT)
        .flat_map(|risk| {
            risk.indicators.iter().map(move |indicator| WarningIndicator {
                name: format!("{} - {}", risk.title, indicator.indicator),
                metric: indicator.indicator.clone(),
                threshold: TrafficLight {
                    green: indicator.threshold * 0.8,
                    yellow: indicator.threshold * 0.9,
                    red: indicator.threshold,
                },
                frequency: MonitoringFrequency::Weekly,
                source: "Business Intelligence System".to_string(),
                automation: true,
            })
        })
        .collect()
}

fn escalation(level: u8, stakeholder: &str, timeframe: &str, criteria: &str) -> EscalationStep {
    EscalationStep {
        level,
        stakeholder: stakeholder.to_string(),
        timeframe: timeframe.to_string(),
        criteria: criteria.to_string(),
    }
}

fn alerting() -> Alerting {
    Alerting {
        channels: strings(&["email", "dashboard", "mobile"]),
        escalation: vec![
            escalation(1, "Risk Manager", "1 hour", "Yellow threshold exceeded"),
            escalation(2, "Executive Team", "4 hours", "Red threshold exceeded"),
            escalation(3, "Board of Directors", "24 hours", "Critical risk materialized"),
        ],
        response_protocols: strings(&[
            "Immediate assessment of risk status",
            "Activation of relevant contingency plans",
            "Stakeholder communication as per escalation matrix",
            "Documentation and lessons learned capture",
        ]),
    }
}

fn review_schedule() -> ReviewSchedule {
    ReviewSchedule {
        operational_reviews: "Weekly risk dashboard reviews".to_string(),
        strategic_reviews: "Monthly comprehensive risk assessment".to_string(),
        comprehensive_assessment: "Quarterly full risk portfolio review".to_string(),
        trigger_reviews: strings(&[
            "Material risk threshold breach",
            "Significant market events",
            "Major strategic changes",
            "New regulatory requirements",
        ]),
    }
}

fn reporting() -> Reporting {
    Reporting {
        dashboards: vec![
            Dashboard {
                name: "Executive Risk Dashboard".to_string(),
                audience: "Executive Team".to_string(),
                frequency: "Weekly".to_string(),
                content: strings(&["Top 10 risks", "Risk trends", "Mitigation status", "Key metrics"]),
            },
            Dashboard {
                name: "Operational Risk Monitor".to_string(),
                audience: "Operations Team".to_string(),
                frequency: "Daily".to_string(),
                content: strings(&["Operational risks", "Early warning indicators", "Action items"]),
            },
        ],
        stakeholder_communication: vec![
            StakeholderBriefing {
                stakeholder: "Board of Directors".to_string(),
                frequency: "Quarterly".to_string(),
                format: "Formal report".to_string(),
                content: strings(&[
                    "Risk appetite alignment",
                    "Major risk changes",
                    "Strategic implications",
                ]),
            },
            StakeholderBriefing {
                stakeholder: "Department Heads".to_string(),
                frequency: "Monthly".to_string(),
                format: "Department briefing".to_string(),
                content: strings(&[
                    "Department-specific risks",
                    "Mitigation progress",
                    "Action requirements",
                ]),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ImpactTier;

    fn risk_with_indicator(title: &str, threshold: f64) -> IdentifiedRisk {
        IdentifiedRisk {
            id: "r".into(),
            title: title.into(),
            category: RiskCategory::Market,
            description: String::new(),
            probability: 0.5,
            impact: RiskImpact {
                financial: 3.0,
                operational: 3.0,
                strategic: 3.0,
                reputational: 2.0,
                overall: ImpactTier::Low,
            },
            risk_score: 1.0,
            timeframe: "medium_term".into(),
            triggers: vec![],
            indicators: vec![RiskIndicator {
                indicator: "Market Share".into(),
                current_value: 0.12,
                threshold,
                trend: IndicatorTrend::Stable,
            }],
            interconnections: vec![],
        }
    }

    #[test]
    fn test_indicator_thresholds_scale_from_red() {
        let indicators = warning_indicators(&[risk_with_indicator("Market Demand Risk", 200.0)]);
        assert_eq!(indicators.len(), 1);
        assert_eq!(indicators[0].name, "Market Demand Risk - Market Share");
        assert_eq!(indicators[0].threshold.green, 160.0);
        assert_eq!(indicators[0].threshold.yellow, 180.0);
        assert_eq!(indicators[0].threshold.red, 200.0);
    }

    #[test]
    fn test_only_top_risks_feed_indicators() {
        let risks: Vec<IdentifiedRisk> = (0..8)
            .map(|_| risk_with_indicator("Market Demand Risk", 1.0))
            .collect();
        assert_eq!(warning_indicators(&risks).len(), INDICATOR_SOURCE_LIMIT);
    }

    #[test]
    fn test_framework_is_fully_populated_without_risks() {
        let framework = build_monitoring(&[]);
        assert!(framework.early_warning_system.indicators.is_empty());
        assert_eq!(framework.early_warning_system.alerting.escalation.len(), 3);
        assert_eq!(framework.reporting.dashboards.len(), 2);
    }
}
