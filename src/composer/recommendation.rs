use crate::contract::{FieldPath, Validate, Violations};
use crate::core::ImpactTier;
use serde::{Deserialize, Serialize};

/// One actionable recommendation. Rationale and expected impact are
/// always present; the remaining detail depends on the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub recommendation: String,
    pub rationale: String,
    pub expected_impact: String,
    pub priority: ImpactTier,
    pub timeline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort: Option<ImpactTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investment: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub benefits: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub success_metrics: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub risks: Vec<String>,
}

impl Recommendation {
    pub fn new(
        recommendation: impl Into<String>,
        rationale: impl Into<String>,
        expected_impact: impl Into<String>,
    ) -> Self {
        Self {
            recommendation: recommendation.into(),
            rationale: rationale.into(),
            expected_impact: expected_impact.into(),
            priority: ImpactTier::Medium,
            timeline: String::new(),
            owner: None,
            target: None,
            effort: None,
            investment: None,
            actions: Vec::new(),
            resources: Vec::new(),
            benefits: Vec::new(),
            success_metrics: Vec::new(),
            risks: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: ImpactTier) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn with_timeline(mut self, timeline: impl Into<String>) -> Self {
        self.timeline = timeline.into();
        self
    }

    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    #[must_use]
    pub fn with_effort(mut self, effort: ImpactTier) -> Self {
        self.effort = Some(effort);
        self
    }

    #[must_use]
    pub fn with_investment(mut self, investment: f64) -> Self {
        self.investment = Some(investment);
        self
    }

    #[must_use]
    pub fn with_actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actions = actions.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_resources<I, S>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resources = resources.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_benefits<I, S>(mut self, benefits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.benefits = benefits.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_success_metrics<I, S>(mut self, metrics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.success_metrics = metrics.into_iter().map(Into::into).collect();
        self
    }

    /// Implementation risks of acting on the recommendation.
    #[must_use]
    pub fn with_risks<I, S>(mut self, risks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.risks = risks.into_iter().map(Into::into).collect();
        self
    }
}

impl Validate for Recommendation {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.non_blank(path, "recommendation", &self.recommendation);
        out.non_blank(path, "rationale", &self.rationale);
        out.non_blank(path, "expected_impact", &self.expected_impact);
        if let Some(investment) = self.investment {
            out.non_negative(path, "investment", investment);
        }
    }
}

/// Urgency tier a recommendation is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Immediate,
    ShortTerm,
    Strategic,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationPlan {
    pub immediate: Vec<Recommendation>,
    pub short_term: Vec<Recommendation>,
    pub strategic: Vec<Recommendation>,
}

impl RecommendationPlan {
    pub fn push(&mut self, urgency: Urgency, recommendation: Recommendation) {
        self.tier_mut(urgency).push(recommendation);
    }

    pub fn extend(&mut self, urgency: Urgency, items: impl IntoIterator<Item = Recommendation>) {
        self.tier_mut(urgency).extend(items);
    }

    fn tier_mut(&mut self, urgency: Urgency) -> &mut Vec<Recommendation> {
        match urgency {
            Urgency::Immediate => &mut self.immediate,
            Urgency::ShortTerm => &mut self.short_term,
            Urgency::Strategic => &mut self.strategic,
        }
    }

    pub fn len(&self) -> usize {
        self.immediate.len() + self.short_term.len() + self.strategic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Validate for RecommendationPlan {
    fn collect_violations(&self, path: &FieldPath, out: &mut Violations) {
        out.each(path, "immediate", &self.immediate);
        out.each(path, "short_term", &self.short_term);
        out.each(path, "strategic", &self.strategic);
    }
}
