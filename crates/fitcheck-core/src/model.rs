//! Core data model types for fitcheck.
//!
//! These are the fundamental types the whole system uses to describe
//! questions, the answers given to them, and the readiness dimensions they
//! feed.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a question is presented and answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    /// Agreement or self-rating on a numeric scale.
    #[serde(alias = "likert")]
    ScaledRating,
    /// Pick one of a list of options.
    #[serde(alias = "multiple-choice")]
    SingleChoice,
    /// Pick one option in response to a described situation.
    #[serde(alias = "scenario")]
    ScenarioChoice,
}

impl QuestionKind {
    /// Whether answers to this kind of question are option strings.
    pub fn is_choice(self) -> bool {
        !matches!(self, QuestionKind::ScaledRating)
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::ScaledRating => write!(f, "scaled-rating"),
            QuestionKind::SingleChoice => write!(f, "single-choice"),
            QuestionKind::ScenarioChoice => write!(f, "scenario-choice"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scaled-rating" | "likert" => Ok(QuestionKind::ScaledRating),
            "single-choice" | "multiple-choice" => Ok(QuestionKind::SingleChoice),
            "scenario-choice" | "scenario" => Ok(QuestionKind::ScenarioChoice),
            other => Err(format!("unknown question kind: {other}")),
        }
    }
}

/// Top-level scoring category a question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Personality and interest items; feeds the psychometric score.
    #[serde(alias = "psychometric")]
    Trait,
    /// Knowledge items with an answer key; feeds the technical score.
    #[serde(alias = "technical")]
    Aptitude,
    /// Readiness items; each feeds one readiness dimension.
    #[serde(alias = "wiscar")]
    Readiness,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Trait, Category::Aptitude, Category::Readiness];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Trait => write!(f, "trait"),
            Category::Aptitude => write!(f, "aptitude"),
            Category::Readiness => write!(f, "readiness"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trait" | "psychometric" => Ok(Category::Trait),
            "aptitude" | "technical" => Ok(Category::Aptitude),
            "readiness" | "wiscar" => Ok(Category::Readiness),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// One of the six readiness dimensions.
///
/// The declaration order is the axis order used by every visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Will,
    Interest,
    Skill,
    Cognitive,
    Learning,
    Alignment,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::Will,
        Dimension::Interest,
        Dimension::Skill,
        Dimension::Cognitive,
        Dimension::Learning,
        Dimension::Alignment,
    ];

    /// `Interest` has no question of its own; it is derived from will and learning.
    pub fn is_derived(self) -> bool {
        matches!(self, Dimension::Interest)
    }

    /// Human-readable axis label.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Will => "Will",
            Dimension::Interest => "Interest",
            Dimension::Skill => "Skill",
            Dimension::Cognitive => "Cognitive",
            Dimension::Learning => "Learning",
            Dimension::Alignment => "Alignment",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_lowercase())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "will" => Ok(Dimension::Will),
            "interest" => Ok(Dimension::Interest),
            "skill" => Ok(Dimension::Skill),
            "cognitive" => Ok(Dimension::Cognitive),
            "learning" => Ok(Dimension::Learning),
            "alignment" => Ok(Dimension::Alignment),
            other => Err(format!("unknown readiness dimension: {other}")),
        }
    }
}

/// A numeric rating scale with one label per point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scale {
    pub min: i64,
    pub max: i64,
    #[serde(default)]
    pub labels: Vec<String>,
}

impl Scale {
    /// The five-point agreement scale used by most rating items.
    pub fn agreement() -> Self {
        Self {
            min: 1,
            max: 5,
            labels: [
                "Strongly Disagree",
                "Disagree",
                "Neutral",
                "Agree",
                "Strongly Agree",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }

    /// Widest scale a respondent can reasonably be shown point by point.
    pub const MAX_POINTS: usize = 100;

    pub fn contains(&self, rating: i64) -> bool {
        (self.min..=self.max).contains(&rating)
    }

    /// Number of points on the scale, or `None` if it is empty or does not fit in `usize`.
    pub fn points(&self) -> Option<usize> {
        if self.max < self.min {
            return None;
        }
        let span = i128::from(self.max) - i128::from(self.min) + 1;
        usize::try_from(span).ok()
    }

    /// Map a rating onto 0..=100. Not rounded; callers round at the aggregate.
    pub fn normalize(&self, rating: i64) -> f64 {
        if self.max <= self.min {
            return 0.0;
        }
        let offset = i128::from(rating) - i128::from(self.min);
        let span = i128::from(self.max) - i128::from(self.min);
        offset as f64 / span as f64 * 100.0
    }

    /// Label for a rating, if the scale defines one.
    pub fn label(&self, rating: i64) -> Option<&str> {
        if !self.contains(rating) {
            return None;
        }
        let index = usize::try_from(i128::from(rating) - i128::from(self.min)).ok()?;
        self.labels.get(index).map(String::as_str)
    }
}

/// A single survey question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier (e.g. "p1").
    pub id: String,
    pub kind: QuestionKind,
    pub category: Category,
    /// Free-form tag, e.g. "conscientiousness" or "will".
    #[serde(default)]
    pub subcategory: String,
    /// Text shown to the respondent.
    pub prompt: String,
    /// Rating scale, for scaled-rating items.
    #[serde(default)]
    pub scale: Option<Scale>,
    /// Ordered options, for choice items.
    #[serde(default)]
    pub options: Vec<String>,
    /// Option → score table for specially weighted choice items.
    #[serde(default)]
    pub option_scores: HashMap<String, u8>,
    /// The correct option, for aptitude items.
    #[serde(default)]
    pub correct: Option<String>,
    /// Explicit readiness dimension; defaults to the subcategory.
    #[serde(default)]
    pub dimension: Option<Dimension>,
}

impl Question {
    pub fn has_option(&self, answer: &str) -> bool {
        self.options.iter().any(|o| o == answer)
    }

    /// The readiness dimension this question feeds, if it is a readiness item.
    pub fn readiness_dimension(&self) -> Option<Dimension> {
        if self.category != Category::Readiness {
            return None;
        }
        self.dimension.or_else(|| self.subcategory.parse().ok())
    }
}

/// A titled group of questions presented together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub estimated_time: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// A submitted answer: a rating or one of the offered option strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Rating(i64),
    Choice(String),
}

impl Answer {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Answer::Rating(_) => "a rating",
            Answer::Choice(_) => "a choice",
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Rating(r) => write!(f, "{r}"),
            Answer::Choice(c) => write!(f, "{c:?}"),
        }
    }
}

impl From<i64> for Answer {
    fn from(value: i64) -> Self {
        Answer::Rating(value)
    }
}

impl From<i32> for Answer {
    fn from(value: i32) -> Self {
        Answer::Rating(i64::from(value))
    }
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Answer::Choice(value.to_string())
    }
}

/// One answer to one question, as captured by the collector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(alias = "questionId")]
    pub question_id: String,
    pub answer: Answer,
    pub timestamp: DateTime<Utc>,
}

impl Response {
    /// Create a response stamped with the current time.
    pub fn new(question_id: impl Into<String>, answer: impl Into<Answer>) -> Self {
        Self {
            question_id: question_id.into(),
            answer: answer.into(),
            timestamp: Utc::now(),
        }
    }
}
