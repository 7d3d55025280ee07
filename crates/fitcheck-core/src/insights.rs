//! Narrative feedback derived from the scores.
//!
//! Strengths and improvements are threshold checks evaluated independently in
//! a fixed order; next steps are chosen wholesale by recommendation.

use serde::{Deserialize, Serialize};

use crate::classifier::Recommendation;
use crate::results::ReadinessScores;

/// Generated feedback lists, each in a fixed order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insights {
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub next_steps: Vec<String>,
}

const STRENGTH_RULES: &[(Metric, u8, &str)] = &[
    (Metric::Psychometric, 75, "Strong personality fit for security work"),
    (Metric::Technical, 75, "Solid technical foundation"),
    (Metric::Cognitive, 80, "Excellent analytical thinking abilities"),
    (Metric::Will, 80, "High motivation and commitment"),
    (Metric::Learning, 80, "Growth mindset and learning agility"),
];

const IMPROVEMENT_RULES: &[(Metric, u8, &str)] = &[
    (
        Metric::Technical,
        60,
        "Build stronger technical foundation in programming and security",
    ),
    (
        Metric::Psychometric,
        60,
        "Develop stronger interest and alignment with security work",
    ),
    (Metric::Skill, 60, "Enhance core programming and technical skills"),
    (Metric::Cognitive, 60, "Practice analytical and problem-solving skills"),
];

const STRONG_FIT_STEPS: [&str; 4] = [
    "Enroll in an application security certification program",
    "Start with OWASP Top 10 and basic web security concepts",
    "Practice on platforms like HackTheBox or TryHackMe",
    "Join security communities and attend meetups",
];

const CONDITIONAL_FIT_STEPS: [&str; 4] = [
    "Strengthen weak areas identified in the assessment",
    "Take introductory programming or security courses",
    "Retake this assessment in 3-6 months",
    "Consider related roles like QA or general IT",
];

const POOR_FIT_STEPS: [&str; 4] = [
    "Explore alternative tech roles that match your strengths",
    "Consider software development, data analysis, or IT support",
    "Focus on building foundational tech skills first",
    "Revisit security later after gaining more experience",
];

#[derive(Debug, Clone, Copy)]
enum Metric {
    Psychometric,
    Technical,
    Will,
    Skill,
    Cognitive,
    Learning,
}

struct Inputs<'a> {
    psychometric: u8,
    technical: u8,
    readiness: &'a ReadinessScores,
}

impl Inputs<'_> {
    fn get(&self, metric: Metric) -> u8 {
        match metric {
            Metric::Psychometric => self.psychometric,
            Metric::Technical => self.technical,
            Metric::Will => self.readiness.will,
            Metric::Skill => self.readiness.skill,
            Metric::Cognitive => self.readiness.cognitive,
            Metric::Learning => self.readiness.learning,
        }
    }
}

/// The four next steps for a recommendation.
pub fn next_steps(recommendation: Recommendation) -> &'static [&'static str; 4] {
    match recommendation {
        Recommendation::StrongFit => &STRONG_FIT_STEPS,
        Recommendation::ConditionalFit => &CONDITIONAL_FIT_STEPS,
        Recommendation::PoorFit => &POOR_FIT_STEPS,
    }
}

/// Generate strengths, improvements, and next steps.
pub fn generate_insights(
    psychometric: u8,
    technical: u8,
    readiness: &ReadinessScores,
    recommendation: Recommendation,
) -> Insights {
    let inputs = Inputs {
        psychometric,
        technical,
        readiness,
    };

    let strengths = STRENGTH_RULES
        .iter()
        .filter(|(metric, min, _)| inputs.get(*metric) >= *min)
        .map(|(_, _, text)| text.to_string())
        .collect();

    let improvements = IMPROVEMENT_RULES
        .iter()
        .filter(|(metric, below, _)| inputs.get(*metric) < *below)
        .map(|(_, _, text)| text.to_string())
        .collect();

    Insights {
        strengths,
        improvements,
        next_steps: next_steps(recommendation)
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(score: u8) -> ReadinessScores {
        ReadinessScores {
            will: score,
            interest: score,
            skill: score,
            cognitive: score,
            learning: score,
            alignment: score,
        }
    }

    #[test]
    fn all_strengths_no_improvements_at_top_scores() {
        let insights = generate_insights(100, 100, &uniform(100), Recommendation::StrongFit);
        assert_eq!(insights.strengths.len(), 5);
        assert_eq!(insights.strengths[0], "Strong personality fit for security work");
        assert_eq!(insights.strengths[4], "Growth mindset and learning agility");
        assert!(insights.improvements.is_empty());
        assert_eq!(insights.next_steps, STRONG_FIT_STEPS);
    }

    #[test]
    fn all_improvements_no_strengths_at_zero() {
        let insights = generate_insights(0, 0, &uniform(0), Recommendation::PoorFit);
        assert!(insights.strengths.is_empty());
        assert_eq!(
            insights.improvements,
            [
                "Build stronger technical foundation in programming and security",
                "Develop stronger interest and alignment with security work",
                "Enhance core programming and technical skills",
                "Practice analytical and problem-solving skills",
            ]
        );
        assert_eq!(insights.next_steps[0], POOR_FIT_STEPS[0]);
    }

    #[test]
    fn thresholds_are_inclusive_for_strengths_and_strict_for_improvements() {
        let readiness = ReadinessScores {
            cognitive: 80,
            skill: 60,
            will: 79,
            learning: 80,
            ..uniform(0)
        };
        let insights = generate_insights(75, 60, &readiness, Recommendation::ConditionalFit);
        assert_eq!(
            insights.strengths,
            [
                "Strong personality fit for security work",
                "Excellent analytical thinking abilities",
                "Growth mindset and learning agility",
            ]
        );
        assert!(insights.improvements.is_empty());
        assert_eq!(insights.next_steps, CONDITIONAL_FIT_STEPS);
    }

    #[test]
    fn next_steps_are_four_per_category() {
        for rec in [
            Recommendation::StrongFit,
            Recommendation::ConditionalFit,
            Recommendation::PoorFit,
        ] {
            assert_eq!(next_steps(rec).len(), 4);
        }
    }
}
