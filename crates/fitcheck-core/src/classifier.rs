//! Recommendation classifier.
//!
//! Maps the overall, psychometric, and technical scores onto one of three
//! outcome categories. Rules are evaluated in order: a profile that meets
//! the conditional rule's `OR` can still fail the strong rule's `AND`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse outcome bucket for a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recommendation {
    #[serde(alias = "pursue")]
    StrongFit,
    #[serde(alias = "maybe")]
    ConditionalFit,
    #[serde(alias = "alternative")]
    PoorFit,
}

impl Recommendation {
    pub fn headline(self) -> &'static str {
        match self {
            Recommendation::StrongFit => "Highly Recommended",
            Recommendation::ConditionalFit => "Consider With Development",
            Recommendation::PoorFit => "Explore Alternatives",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Recommendation::StrongFit => {
                "You show strong potential for a successful career in application security!"
            }
            Recommendation::ConditionalFit => {
                "You have potential but would benefit from strengthening certain areas first."
            }
            Recommendation::PoorFit => {
                "Consider alternative career paths that better align with your current profile."
            }
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::StrongFit => write!(f, "strong-fit"),
            Recommendation::ConditionalFit => write!(f, "conditional-fit"),
            Recommendation::PoorFit => write!(f, "poor-fit"),
        }
    }
}

/// Score thresholds for the classifier rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub strong_overall: u8,
    pub strong_technical: u8,
    pub strong_psychometric: u8,
    pub conditional_overall: u8,
    pub conditional_technical: u8,
    pub conditional_psychometric: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            strong_overall: 75,
            strong_technical: 60,
            strong_psychometric: 70,
            conditional_overall: 60,
            conditional_technical: 40,
            conditional_psychometric: 60,
        }
    }
}

/// Classify a run. Total: every score triple maps to exactly one category.
pub fn classify(
    overall: u8,
    psychometric: u8,
    technical: u8,
    thresholds: &Thresholds,
) -> Recommendation {
    if overall >= thresholds.strong_overall
        && technical >= thresholds.strong_technical
        && psychometric >= thresholds.strong_psychometric
    {
        return Recommendation::StrongFit;
    }

    if overall >= thresholds.conditional_overall
        && (technical >= thresholds.conditional_technical
            || psychometric >= thresholds.conditional_psychometric)
    {
        return Recommendation::ConditionalFit;
    }

    Recommendation::PoorFit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults(overall: u8, psychometric: u8, technical: u8) -> Recommendation {
        classify(overall, psychometric, technical, &Thresholds::default())
    }

    #[test]
    fn strong_fit_at_exact_thresholds() {
        assert_eq!(defaults(80, 70, 60), Recommendation::StrongFit);
        assert_eq!(defaults(75, 70, 60), Recommendation::StrongFit);
    }

    #[test]
    fn conditional_fit_via_technical_branch() {
        assert_eq!(defaults(65, 30, 50), Recommendation::ConditionalFit);
    }

    #[test]
    fn conditional_fit_via_psychometric_branch() {
        assert_eq!(defaults(62, 60, 10), Recommendation::ConditionalFit);
    }

    #[test]
    fn high_overall_but_weak_technical_is_not_strong() {
        assert_eq!(defaults(90, 95, 59), Recommendation::ConditionalFit);
    }

    #[test]
    fn low_overall_short_circuits() {
        assert_eq!(defaults(50, 90, 10), Recommendation::PoorFit);
        assert_eq!(defaults(59, 100, 100), Recommendation::PoorFit);
    }

    #[test]
    fn neither_branch_of_conditional_rule() {
        assert_eq!(defaults(70, 59, 39), Recommendation::PoorFit);
    }

    #[test]
    fn every_triple_classifies() {
        let t = Thresholds::default();
        for overall in (0..=100).step_by(5) {
            for psychometric in (0..=100).step_by(10) {
                for technical in (0..=100).step_by(10) {
                    let rec = classify(overall, psychometric, technical, &t);
                    let strong = overall >= 75 && technical >= 60 && psychometric >= 70;
                    assert_eq!(rec == Recommendation::StrongFit, strong);
                }
            }
        }
    }

    #[test]
    fn serde_uses_kebab_case_and_accepts_legacy_names() {
        let json = serde_json::to_string(&Recommendation::ConditionalFit).unwrap();
        assert_eq!(json, "\"conditional-fit\"");
        let legacy: Recommendation = serde_json::from_str("\"pursue\"").unwrap();
        assert_eq!(legacy, Recommendation::StrongFit);
        assert_eq!(Recommendation::PoorFit.to_string(), "poor-fit");
    }
}
