//! Risk identification: category templates, initiative execution risks,
//! ranking, and trigger-overlap interconnections.

use super::types::*;
use crate::core::{clamp_unit, ImpactTier};
use crate::metrics::severity_from_score;
use std::collections::HashSet;

use super::profile::RISK_LEVELS;

/// Only the highest-scoring risks are carried forward.
pub const MAX_IDENTIFIED_RISKS: usize = 20;

const BASE_PROBABILITY: f64 = 0.3;
const SAME_CATEGORY_STRENGTH: f64 = 0.3;

/// A canned risk for one category.
#[derive(Debug, Clone, Copy)]
pub struct RiskTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub triggers: &'static [&'static str],
    pub horizon: RiskHorizon,
}

const fn template(
    title: &'static str,
    description: &'static str,
    triggers: &'static [&'static str],
    horizon: RiskHorizon,
) -> RiskTemplate {
    RiskTemplate {
        title,
        description,
        triggers,
        horizon,
    }
}

const FINANCIAL: &[RiskTemplate] = &[
    template(
        "Cash Flow Shortage",
        "Insufficient cash flow to meet operational and growth requirements",
        &["Revenue decline", "Payment delays", "Unexpected expenses"],
        RiskHorizon::ShortTerm,
    ),
    template(
        "Investment Risk",
        "Risk of poor return on growth investments or inability to secure funding",
        &[
            "Market downturn",
            "Investor sentiment change",
            "Performance metrics decline",
        ],
        RiskHorizon::MediumTerm,
    ),
];

const OPERATIONAL: &[RiskTemplate] = &[
    template(
        "Scalability Constraints",
        "Inability of current operations to scale with growth demands",
        &["Rapid growth", "Resource constraints", "Process inefficiencies"],
        RiskHorizon::MediumTerm,
    ),
    template(
        "Key Personnel Risk",
        "Loss of critical team members or inability to hire required talent",
        &[
            "Competitive job market",
            "Compensation gaps",
            "Workplace issues",
        ],
        RiskHorizon::ShortTerm,
    ),
];

const STRATEGIC: &[RiskTemplate] = &[
    template(
        "Market Positioning Risk",
        "Risk of losing competitive advantage or market position",
        &[
            "New competitors",
            "Technology disruption",
            "Customer preference changes",
        ],
        RiskHorizon::LongTerm,
    ),
    template(
        "Strategic Execution Risk",
        "Risk of poor execution of growth strategy or initiative failures",
        &[
            "Resource misallocation",
            "Poor project management",
            "Market changes",
        ],
        RiskHorizon::MediumTerm,
    ),
];

const TECHNOLOGY: &[RiskTemplate] = &[
    template(
        "Technology Obsolescence",
        "Risk of current technology becoming outdated or ineffective",
        &[
            "New technology emergence",
            "Industry standards change",
            "Competitor innovation",
        ],
        RiskHorizon::LongTerm,
    ),
    template(
        "Cybersecurity Risk",
        "Risk of data breaches, system compromises, or cyberattacks",
        &[
            "Security vulnerabilities",
            "Increased attack frequency",
            "Regulatory changes",
        ],
        RiskHorizon::ShortTerm,
    ),
];

const REGULATORY: &[RiskTemplate] = &[template(
    "Regulatory Compliance Risk",
    "Risk of non-compliance with existing or new regulations",
    &[
        "Regulation changes",
        "Enforcement increases",
        "Business expansion",
    ],
    RiskHorizon::MediumTerm,
)];

const MARKET: &[RiskTemplate] = &[
    template(
        "Market Demand Risk",
        "Risk of reduced market demand or customer preference changes",
        &[
            "Economic downturn",
            "Substitute products",
            "Consumer behavior shifts",
        ],
        RiskHorizon::MediumTerm,
    ),
    template(
        "Market Saturation Risk",
        "Risk of market becoming saturated limiting growth opportunities",
        &[
            "Market maturity",
            "Competitor saturation",
            "Limited customer base",
        ],
        RiskHorizon::LongTerm,
    ),
];

const COMPETITIVE: &[RiskTemplate] = &[template(
    "Competitive Pressure Risk",
    "Risk from new or existing competitors affecting market share",
    &[
        "New market entrants",
        "Competitor innovations",
        "Price wars",
    ],
    RiskHorizon::ShortTerm,
)];

const ENVIRONMENTAL: &[RiskTemplate] = &[template(
    "Supply Chain Disruption",
    "Risk of supply chain interruptions affecting operations",
    &[
        "Natural disasters",
        "Geopolitical events",
        "Supplier issues",
    ],
    RiskHorizon::ShortTerm,
)];

pub fn templates_for(category: RiskCategory) -> &'static [RiskTemplate] {
    match category {
        RiskCategory::Financial => FINANCIAL,
        RiskCategory::Operational => OPERATIONAL,
        RiskCategory::Strategic => STRATEGIC,
        RiskCategory::Technology => TECHNOLOGY,
        RiskCategory::Regulatory => REGULATORY,
        RiskCategory::Market => MARKET,
        RiskCategory::Competitive => COMPETITIVE,
        RiskCategory::Environmental => ENVIRONMENTAL,
    }
}

/// Identify, rank, and link every risk in scope.
pub fn identify_risks(request: &RiskAssessmentRequest) -> Vec<IdentifiedRisk> {
    let mut risks: Vec<IdentifiedRisk> = request
        .assessment_scope
        .risk_categories
        .iter()
        .flat_map(|&category| {
            templates_for(category)
                .iter()
                .enumerate()
                .map(move |(index, template)| template_risk(category, index, template, request))
        })
        .collect();

    risks.extend(request.growth_initiatives.iter().map(initiative_risk));

    risks.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));
    risks.truncate(MAX_IDENTIFIED_RISKS);
    link_interconnections(&mut risks);
    risks
}

fn template_risk(
    category: RiskCategory,
    index: usize,
    template: &RiskTemplate,
    request: &RiskAssessmentRequest,
) -> IdentifiedRisk {
    let probability = template_probability(template, request);
    let impact = template_impact(request.business_context.size);
    IdentifiedRisk {
        id: format!("{}_risk_{}", category.label(), index + 1),
        title: template.title.to_string(),
        category,
        description: template.description.to_string(),
        probability,
        risk_score: probability * impact.overall.risk_score(),
        impact,
        timeframe: template.horizon.label().to_string(),
        triggers: template.triggers.iter().map(|t| t.to_string()).collect(),
        indicators: indicators_for(template.title),
        interconnections: Vec::new(),
    }
}

/// Base probability blended with the realization rate of similar past risks.
fn template_probability(template: &RiskTemplate, request: &RiskAssessmentRequest) -> f64 {
    let mut probability = BASE_PROBABILITY;

    let keyword = template
        .title
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase();
    let similar: Vec<&PastRisk> = request
        .historical_data
        .past_risks
        .iter()
        .filter(|risk| risk.risk_type.to_lowercase().contains(&keyword))
        .collect();
    if !similar.is_empty() {
        let realized = similar.iter().filter(|risk| risk.realized).count();
        let realization_rate = realized as f64 / similar.len() as f64;
        probability = (probability + realization_rate) / 2.0;
    }

    if request.business_context.growth_stage == GrowthStage::Startup {
        probability += 0.1;
    }
    if template.horizon == RiskHorizon::ShortTerm {
        probability += 0.1;
    }

    clamp_unit(probability)
}

fn template_impact(size: OrganizationSize) -> RiskImpact {
    let scale = size.impact_multiplier();
    impact_vector(3.0 * scale, 3.0 * scale, 3.0 * scale, 2.0 * scale)
}

/// Cap each dimension at 10 and derive the overall tier from the average.
fn impact_vector(financial: f64, operational: f64, strategic: f64, reputational: f64) -> RiskImpact {
    let mut impact = RiskImpact {
        financial: financial.min(10.0),
        operational: operational.min(10.0),
        strategic: strategic.min(10.0),
        reputational: reputational.min(10.0),
        overall: ImpactTier::Low,
    };
    impact.overall = severity_from_score(impact.average(), &RISK_LEVELS);
    impact
}

fn indicator(name: &str, current: f64, threshold: f64, trend: IndicatorTrend) -> RiskIndicator {
    RiskIndicator {
        indicator: name.to_string(),
        current_value: current,
        threshold,
        trend,
    }
}

/// Key risk indicators for the template titles that have known metrics.
fn indicators_for(title: &str) -> Vec<RiskIndicator> {
    if title.contains("Cash Flow") {
        vec![
            indicator("Cash Flow Ratio", 1.2, 1.0, IndicatorTrend::Stable),
            indicator("Days Sales Outstanding", 45.0, 60.0, IndicatorTrend::Improving),
        ]
    } else if title.contains("Personnel") {
        vec![
            indicator("Employee Turnover Rate", 0.15, 0.20, IndicatorTrend::Stable),
            indicator("Time to Fill Positions", 30.0, 45.0, IndicatorTrend::Deteriorating),
        ]
    } else if title.contains("Market") {
        vec![
            indicator("Market Share", 0.12, 0.10, IndicatorTrend::Stable),
            indicator("Customer Acquisition Cost", 150.0, 200.0, IndicatorTrend::Improving),
        ]
    } else {
        Vec::new()
    }
}

pub fn initiative_risk(initiative: &GrowthInitiative) -> IdentifiedRisk {
    let probability = initiative_probability(initiative);
    let impact = initiative_impact(initiative);
    IdentifiedRisk {
        id: format!("initiative_{}_execution_risk", initiative.id),
        title: format!("{} Execution Risk", initiative.name),
        category: RiskCategory::Strategic,
        description: format!(
            "Risk of poor execution or failure of {} initiative",
            initiative.name
        ),
        probability,
        risk_score: probability * impact.overall.risk_score(),
        impact,
        timeframe: initiative.timeline.clone(),
        triggers: [
            "Resource constraints",
            "Timeline delays",
            "Market changes",
            "Technical challenges",
        ]
        .iter()
        .map(|t| t.to_string())
        .collect(),
        indicators: vec![
            indicator("Project Progress", 0.0, 0.8, IndicatorTrend::Stable),
            indicator("Budget Utilization", 0.0, 1.0, IndicatorTrend::Stable),
        ],
        interconnections: Vec::new(),
    }
}

fn initiative_probability(initiative: &GrowthInitiative) -> f64 {
    let mut probability = BASE_PROBABILITY;
    if initiative.investment > 100_000.0 {
        probability += 0.1;
    }
    if initiative.investment > 500_000.0 {
        probability += 0.1;
    }
    if initiative.dependencies.len() > 3 {
        probability += 0.1;
    }
    clamp_unit((probability + initiative.initiative_type.base_risk()) / 2.0)
}

fn initiative_impact(initiative: &GrowthInitiative) -> RiskImpact {
    let scale = initiative.investment / 1_000_000.0;
    impact_vector(
        3.0 + scale * 2.0,
        2.0 + scale,
        4.0 + scale,
        2.0 + scale * 0.5,
    )
}

/// Link risks that share triggers (Jaccard overlap) or, failing that, a category.
pub fn link_interconnections(risks: &mut [IdentifiedRisk]) {
    let trigger_sets: Vec<HashSet<&str>> = risks
        .iter()
        .map(|risk| risk.triggers.iter().map(String::as_str).collect())
        .collect();

    let links: Vec<Vec<Interconnection>> = (0..risks.len())
        .map(|i| {
            (0..risks.len())
                .filter(|&j| j != i)
                .filter_map(|j| {
                    let shared = trigger_sets[i].intersection(&trigger_sets[j]).count();
                    let strength = if shared > 0 {
                        let union = trigger_sets[i].union(&trigger_sets[j]).count();
                        shared as f64 / union as f64
                    } else if risks[i].category == risks[j].category {
                        SAME_CATEGORY_STRENGTH
                    } else {
                        return None;
                    };
                    Some(Interconnection {
                        related_risk_id: risks[j].id.clone(),
                        relationship: Relationship::Correlated,
                        strength,
                    })
                })
                .collect()
        })
        .collect();

    for (risk, interconnections) in risks.iter_mut().zip(links) {
        risk.interconnections = interconnections;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn request(categories: Vec<RiskCategory>) -> RiskAssessmentRequest {
        RiskAssessmentRequest {
            as_of: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            assessment_scope: AssessmentScope {
                risk_categories: categories,
                time_horizon: RiskHorizon::Comprehensive,
                impact_areas: vec![],
                risk_tolerance: RiskTolerance::Low,
            },
            business_context: OrganizationContext {
                industry: "manufacturing".into(),
                business_model: String::new(),
                growth_stage: GrowthStage::Maturity,
                size: OrganizationSize::Medium,
                geography: vec![],
                key_metrics: BTreeMap::new(),
            },
            growth_initiatives: vec![],
            historical_data: HistoricalRiskData::default(),
        }
    }

    fn initiative(investment: f64, dependencies: usize) -> GrowthInitiative {
        GrowthInitiative {
            id: "erp".into(),
            name: "ERP Rollout".into(),
            initiative_type: InitiativeType::DigitalTransformation,
            investment,
            timeline: "9 months".into(),
            expected_return: investment * 2.0,
            dependencies: (0..dependencies).map(|i| format!("dep{i}")).collect(),
            critical_success_factors: vec![],
        }
    }

    #[test]
    fn test_template_risk_for_short_term_financial() {
        let risks = identify_risks(&request(vec![RiskCategory::Financial]));
        let cash = risks.iter().find(|r| r.id == "financial_risk_1").unwrap();
        assert_eq!(cash.title, "Cash Flow Shortage");
        assert!((cash.probability - 0.4).abs() < 1e-9);
        assert_eq!(cash.impact.overall, ImpactTier::Low);
        assert!((cash.risk_score - 0.8).abs() < 1e-9);
        assert_eq!(cash.indicators.len(), 2);
    }

    #[test]
    fn test_past_realizations_shift_probability() {
        let mut req = request(vec![RiskCategory::Financial]);
        req.historical_data.past_risks = vec![
            PastRisk {
                risk_type: "Cash shortfall".into(),
                impact: 4.0,
                probability: 0.5,
                realized: true,
                mitigation: String::new(),
                lessons: String::new(),
            },
            PastRisk {
                risk_type: "cash crunch".into(),
                impact: 2.0,
                probability: 0.5,
                realized: false,
                mitigation: String::new(),
                lessons: String::new(),
            },
        ];
        let risks = identify_risks(&req);
        let cash = risks.iter().find(|r| r.id == "financial_risk_1").unwrap();
        // (0.3 + 0.5) / 2 + 0.1 short-term
        assert!((cash.probability - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_large_initiative_risk() {
        let risk = initiative_risk(&initiative(2_000_000.0, 4));
        assert_eq!(risk.id, "initiative_erp_execution_risk");
        assert_eq!(risk.title, "ERP Rollout Execution Risk");
        // (0.3 + 0.3 + 0.5) / 2
        assert!((risk.probability - 0.55).abs() < 1e-9);
        assert_eq!(risk.impact.financial, 7.0);
        assert_eq!(risk.impact.strategic, 6.0);
        // average (7 + 4 + 6 + 3) / 4 = 5.0 stays medium
        assert_eq!(risk.impact.overall, ImpactTier::Medium);
        assert_eq!(risk.timeframe, "9 months");
    }

    #[test]
    fn test_impact_dimensions_are_capped() {
        let risk = initiative_risk(&initiative(50_000_000.0, 0));
        assert_eq!(risk.impact.financial, 10.0);
        assert_eq!(risk.impact.reputational, 10.0);
        assert_eq!(risk.impact.overall, ImpactTier::Critical);
    }

    #[test]
    fn test_ranking_is_descending_and_truncated() {
        let mut req = request(RiskCategory::ALL.to_vec());
        req.growth_initiatives = (0..10)
            .map(|i| GrowthInitiative {
                id: format!("i{i}"),
                ..initiative(1_000_000.0, 0)
            })
            .collect();
        let risks = identify_risks(&req);
        assert_eq!(risks.len(), MAX_IDENTIFIED_RISKS);
        assert!(risks
            .windows(2)
            .all(|pair| pair[0].risk_score >= pair[1].risk_score));
    }

    #[test]
    fn test_interconnections_use_trigger_overlap_then_category() {
        let risks = identify_risks(&request(vec![
            RiskCategory::Operational,
            RiskCategory::Strategic,
        ]));
        let personnel = risks.iter().find(|r| r.id == "operational_risk_2").unwrap();
        let scalability = personnel
            .interconnections
            .iter()
            .find(|link| link.related_risk_id == "operational_risk_1")
            .unwrap();
        assert_eq!(scalability.strength, SAME_CATEGORY_STRENGTH);
        assert!(personnel
            .interconnections
            .iter()
            .all(|link| link.related_risk_id != personnel.id));
        assert!(!personnel
            .interconnections
            .iter()
            .any(|link| link.related_risk_id.starts_with("strategic")));
    }
}
