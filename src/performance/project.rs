//! Project outlooks from the predictions of the members assigned to them.

use super::types::*;
use crate::core::{add_days_saturating, clamp_range, clamp_unit, ImpactTier};
use crate::metrics::{mean_by, severity_from_score, Ladder};
use chrono::NaiveDate;

const UNSTAFFED_COMPLETION: f64 = 0.1;
const UNSTAFFED_QUALITY: f64 = 0.5;
const COMPLEXITY_PIVOT: f64 = 5.0;
const RESOURCE_GAP_THRESHOLD: f64 = 0.7;
const OVERLOAD_THRESHOLD: f64 = 0.9;

/// Integer risk points: `>= 6` critical, `>= 4` high, `>= 2` medium.
const RISK_LEVELS: Ladder<ImpactTier> = Ladder::new(
    ImpactTier::Low,
    &[
        (1.0, ImpactTier::Medium),
        (3.0, ImpactTier::High),
        (5.0, ImpactTier::Critical),
    ],
);

/// The project's staff: member records paired with their predictions.
pub struct Staffing<'a> {
    pub members: Vec<&'a TeamMember>,
    pub predictions: Vec<&'a IndividualPrediction>,
}

impl<'a> Staffing<'a> {
    pub fn for_project(
        project: &Project,
        members: &'a [TeamMember],
        individuals: &'a [IndividualPrediction],
    ) -> Self {
        let assigned = |id: &str| project.assigned_members.iter().any(|a| a == id);
        Self {
            members: members.iter().filter(|m| assigned(m.id.as_str())).collect(),
            predictions: individuals.iter().filter(|p| assigned(p.member_id.as_str())).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    fn average_productivity(&self) -> f64 {
        mean_by(&self.predictions, |p| p.predictions.productivity.predicted)
    }

    fn average_quality(&self) -> f64 {
        mean_by(&self.predictions, |p| p.predictions.quality.predicted)
    }

    /// Required skills nobody on the project holds.
    pub fn skill_gaps<'p>(&self, project: &'p Project) -> Vec<&'p str> {
        project
            .required_skills
            .iter()
            .filter(|skill| !self.members.iter().any(|m| m.has_skill(skill)))
            .map(String::as_str)
            .collect()
    }

    fn skill_match(&self, project: &Project) -> f64 {
        let required = project.required_skills.len();
        if required == 0 {
            return 1.0;
        }
        let missing = self.skill_gaps(project).len();
        (required - missing) as f64 / required as f64
    }
}

pub fn completion_probability(project: &Project, staff: &Staffing<'_>) -> f64 {
    if staff.is_empty() {
        return UNSTAFFED_COMPLETION;
    }
    let base = (staff.average_productivity() + staff.average_quality() + staff.skill_match(project)) / 3.0;
    let complexity = (1.0 - (project.complexity - COMPLEXITY_PIVOT) * 0.1).max(0.1);
    clamp_range(base * complexity, UNSTAFFED_COMPLETION, 1.0)
}

/// Stretch the remaining days by `1 / completion`. Past deadlines count as zero days left,
/// and estimates beyond the calendar pin to its last day.
pub fn estimated_completion(deadline: NaiveDate, as_of: NaiveDate, completion: f64) -> NaiveDate {
    let remaining = (deadline - as_of).num_days().max(0) as f64;
    let delay = 1.0 / completion.max(0.1);
    add_days_saturating(as_of, (remaining * delay).ceil() as i64)
}

pub fn quality_score(project: &Project, staff: &Staffing<'_>) -> f64 {
    if staff.is_empty() {
        return UNSTAFFED_QUALITY;
    }
    let complexity = (1.0 - (project.complexity - COMPLEXITY_PIVOT) * 0.05).max(0.5);
    clamp_unit(staff.average_quality() * complexity)
}

pub fn risk_level(project: &Project, staff: &Staffing<'_>, completion: f64) -> ImpactTier {
    let mut points = 0u32;

    points += match completion {
        c if c < 0.3 => 3,
        c if c < 0.6 => 2,
        c if c < 0.8 => 1,
        _ => 0,
    };

    if project.complexity > 8.0 {
        points += 2;
    } else if project.complexity > 6.0 {
        points += 1;
    }

    if project.priority == ImpactTier::Critical {
        points += 1;
    }

    let at_risk = staff
        .predictions
        .iter()
        .filter(|p| p.has_high_impact_risk())
        .count();
    if at_risk * 2 > staff.predictions.len() {
        points += 2;
    }

    severity_from_score(f64::from(points), &RISK_LEVELS)
}

pub fn resource_requirements(
    project: &Project,
    staff: &Staffing<'_>,
    completion: f64,
) -> ResourceRequirements {
    let mut requirements = ResourceRequirements::default();

    if completion < RESOURCE_GAP_THRESHOLD {
        requirements.additional = staff
            .skill_gaps(project)
            .into_iter()
            .map(|skill| AdditionalResource {
                resource: format!("{skill} expertise"),
                amount: 1.0,
                urgency: ImpactTier::High,
            })
            .collect();
    }

    if staff.members.iter().any(|m| m.workload > OVERLOAD_THRESHOLD) {
        requirements.reallocation.push(Reallocation {
            from: "High workload members".to_string(),
            to: "Available team members".to_string(),
            rationale: "Balance workload distribution".to_string(),
        });
    }

    requirements
}

pub fn predict_project(
    project: &Project,
    members: &[TeamMember],
    individuals: &[IndividualPrediction],
    as_of: NaiveDate,
) -> ProjectPrediction {
    let staff = Staffing::for_project(project, members, individuals);
    let completion = completion_probability(project, &staff);

    ProjectPrediction {
        project_id: project.id.clone(),
        project_name: project.name.clone(),
        predictions: ProjectOutlook {
            completion_probability: completion,
            estimated_completion: estimated_completion(project.deadline, as_of, completion),
            quality_score: quality_score(project, &staff),
            risk_level: risk_level(project, &staff, completion),
            resource_requirements: resource_requirements(project, &staff, completion),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TrendDirection;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn metric(value: f64) -> MetricPrediction {
        MetricPrediction {
            current: value,
            predicted: value,
            trend: TrendDirection::Stable,
            confidence: 0.5,
        }
    }

    fn prediction(id: &str, value: f64, high_risk: bool) -> IndividualPrediction {
        let risk_factors = if high_risk {
            vec![MemberRiskFactor {
                factor: "High workload leading to burnout".into(),
                probability: 0.7,
                impact: ImpactTier::High,
                mitigation: "Redistribute workload or provide additional support".into(),
            }]
        } else {
            vec![]
        };
        IndividualPrediction {
            member_id: id.into(),
            member_name: id.into(),
            role: "Engineer".into(),
            predictions: MemberPredictions {
                productivity: metric(value),
                quality: metric(value),
                collaboration: metric(value),
                risk_factors,
            },
        }
    }

    fn member(id: &str, workload: f64, skills: &[&str]) -> TeamMember {
        TeamMember {
            id: id.into(),
            name: id.into(),
            role: "Engineer".into(),
            experience: 2.0,
            skills: skills
                .iter()
                .map(|s| Skill {
                    skill: s.to_string(),
                    level: 6.0,
                    verified: false,
                })
                .collect(),
            workload,
            performance: PerformanceVector {
                efficiency: 0.5,
                quality: 0.5,
                collaboration: 0.5,
                innovation: 0.5,
            },
        }
    }

    fn project(complexity: f64, priority: ImpactTier, required: &[&str], assigned: &[&str]) -> Project {
        Project {
            id: "p1".into(),
            name: "Checkout".into(),
            priority,
            complexity,
            deadline: date(3, 1),
            progress: 0.2,
            required_skills: required.iter().map(|s| s.to_string()).collect(),
            assigned_members: assigned.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_unstaffed_project_defaults() {
        let p = project(5.0, ImpactTier::Medium, &["rust"], &[]);
        let outlook = predict_project(&p, &[], &[], date(1, 1)).predictions;
        assert_eq!(outlook.completion_probability, 0.1);
        assert_eq!(outlook.quality_score, 0.5);
        // 3 points for completion below 0.3
        assert_eq!(outlook.risk_level, ImpactTier::Medium);
    }

    #[test]
    fn test_completion_blends_staff_and_skills() {
        let members = vec![member("a", 0.5, &["rust"])];
        let individuals = vec![prediction("a", 0.8, false)];
        let p = project(5.0, ImpactTier::Medium, &["rust", "sql"], &["a"]);
        let staff = Staffing::for_project(&p, &members, &individuals);
        // (0.8 + 0.8 + 0.5) / 3 at neutral complexity
        assert!((completion_probability(&p, &staff) - 0.7).abs() < 1e-12);
        assert_eq!(staff.skill_gaps(&p), vec!["sql"]);
    }

    #[test]
    fn test_high_complexity_penalizes_quality() {
        let members = vec![member("a", 0.5, &[])];
        let individuals = vec![prediction("a", 0.8, false)];
        let p = project(9.0, ImpactTier::Medium, &[], &["a"]);
        let staff = Staffing::for_project(&p, &members, &individuals);
        assert!((quality_score(&p, &staff) - 0.64).abs() < 1e-12);
    }

    #[test]
    fn test_estimated_completion_stretches_remaining_days() {
        assert_eq!(estimated_completion(date(1, 11), date(1, 1), 0.5), date(1, 21));
        assert_eq!(estimated_completion(date(1, 11), date(1, 1), 1.0), date(1, 11));
        // Overdue projects land on the reference date.
        assert_eq!(estimated_completion(date(1, 1), date(2, 1), 0.5), date(2, 1));
    }

    #[test]
    fn test_estimated_completion_pins_far_deadlines_to_calendar_end() {
        let far = NaiveDate::from_ymd_opt(200_000, 1, 1).unwrap();
        // ~72M days left, stretched tenfold at the completion floor
        assert_eq!(estimated_completion(far, date(1, 1), 0.1), NaiveDate::MAX);
        assert_eq!(estimated_completion(NaiveDate::MAX, date(1, 1), 0.05), NaiveDate::MAX);
    }

    #[test]
    fn test_risk_points_reach_critical() {
        let members = vec![member("a", 0.95, &[]), member("b", 0.95, &[])];
        let individuals = vec![prediction("a", 0.2, true), prediction("b", 0.2, true)];
        // completion < 0.3 (+3), complexity > 8 (+2), critical (+1), staff at risk (+2)
        let p = project(9.0, ImpactTier::Critical, &[], &["a", "b"]);
        let outlook = predict_project(&p, &members, &individuals, date(1, 1)).predictions;
        assert_eq!(outlook.risk_level, ImpactTier::Critical);
        assert_eq!(outlook.resource_requirements.reallocation.len(), 1);
    }

    #[test]
    fn test_missing_skills_requested_when_completion_is_low() {
        let members = vec![member("a", 0.5, &[])];
        let individuals = vec![prediction("a", 0.3, false)];
        let p = project(7.0, ImpactTier::High, &["ml"], &["a"]);
        let outlook = predict_project(&p, &members, &individuals, date(1, 1)).predictions;
        assert!(outlook.completion_probability < 0.7);
        let additional = &outlook.resource_requirements.additional;
        assert_eq!(additional.len(), 1);
        assert_eq!(additional[0].resource, "ml expertise");
        assert_eq!(additional[0].urgency, ImpactTier::High);
    }
}
