//! Per-item normalization and category aggregation.
//!
//! Everything here is a pure function of its arguments. Item values are kept
//! unrounded; rounding happens once per aggregate.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AssessmentError;
use crate::model::{Answer, Category, Dimension, Question, Scale};
use crate::results::{ReadinessScores, SubScores};

/// Score given to a choice that has no entry in the question's score table.
pub const NEUTRAL_CHOICE_SCORE: f64 = 50.0;

/// What to do with answers that do not fit their question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerPolicy {
    /// Reject the run, naming the offending question.
    #[default]
    Strict,
    /// Score what can be scored: neutral 50 for unmatched choices, clamped
    /// ratings, skipped unknown questions.
    Lenient,
}

impl fmt::Display for AnswerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerPolicy::Strict => write!(f, "strict"),
            AnswerPolicy::Lenient => write!(f, "lenient"),
        }
    }
}

impl FromStr for AnswerPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(AnswerPolicy::Strict),
            "lenient" => Ok(AnswerPolicy::Lenient),
            other => Err(format!("unknown answer policy: {other}")),
        }
    }
}

/// Weights of the three components of the overall score.
///
/// Raising `technical` biases the overall score toward demonstrated
/// knowledge over self-reported traits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub psychometric: f64,
    pub technical: f64,
    pub readiness: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            psychometric: 0.3,
            technical: 0.4,
            readiness: 0.3,
        }
    }
}

impl Weights {
    /// Weights must be non-negative and sum to 1 so the overall score stays in 0..=100.
    pub fn validate(&self) -> anyhow::Result<()> {
        let parts = [self.psychometric, self.technical, self.readiness];
        anyhow::ensure!(
            parts.iter().all(|w| w.is_finite() && *w >= 0.0),
            "weights must be non-negative, got {parts:?}"
        );
        let sum: f64 = parts.iter().sum();
        anyhow::ensure!(
            (sum - 1.0).abs() < 1e-6,
            "weights must sum to 1.0, got {sum}"
        );
        Ok(())
    }
}

/// The scored value of one answered question.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemScore {
    /// Trait and readiness items: a value in 0.0..=100.0.
    Normalized(f64),
    /// Aptitude items: whether the answer matched the key.
    Correct(bool),
}

/// One answered question, ready for aggregation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredItem {
    pub category: Category,
    pub dimension: Option<Dimension>,
    pub score: ItemScore,
}

/// Score a single answer against its question.
pub fn score_item(
    question: &Question,
    answer: &Answer,
    policy: AnswerPolicy,
) -> Result<ItemScore, AssessmentError> {
    if question.category == Category::Aptitude {
        return score_keyed_item(question, answer, policy);
    }

    if question.kind.is_choice() {
        score_choice_item(question, answer, policy).map(ItemScore::Normalized)
    } else {
        score_rating_item(question, answer, policy).map(ItemScore::Normalized)
    }
}

fn score_keyed_item(
    question: &Question,
    answer: &Answer,
    policy: AnswerPolicy,
) -> Result<ItemScore, AssessmentError> {
    match answer {
        Answer::Choice(choice) if question.has_option(choice) => Ok(ItemScore::Correct(
            question.correct.as_deref() == Some(choice.as_str()),
        )),
        Answer::Choice(choice) => match policy {
            AnswerPolicy::Strict => Err(AssessmentError::UnknownOption {
                question_id: question.id.clone(),
                value: choice.clone(),
            }),
            AnswerPolicy::Lenient => {
                tracing::warn!(question = %question.id, "unmatched choice {choice:?} counted as incorrect");
                Ok(ItemScore::Correct(false))
            }
        },
        Answer::Rating(_) => {
            mismatch(question, "a choice", answer, policy)?;
            Ok(ItemScore::Correct(false))
        }
    }
}

fn score_choice_item(
    question: &Question,
    answer: &Answer,
    policy: AnswerPolicy,
) -> Result<f64, AssessmentError> {
    let Answer::Choice(choice) = answer else {
        mismatch(question, "a choice", answer, policy)?;
        return Ok(NEUTRAL_CHOICE_SCORE);
    };

    if !question.has_option(choice) {
        if policy == AnswerPolicy::Strict {
            return Err(AssessmentError::UnknownOption {
                question_id: question.id.clone(),
                value: choice.clone(),
            });
        }
        tracing::warn!(question = %question.id, "unmatched choice {choice:?}");
    }

    Ok(question
        .option_scores
        .get(choice)
        .map(|s| f64::from(*s).min(100.0))
        .unwrap_or(NEUTRAL_CHOICE_SCORE))
}

fn score_rating_item(
    question: &Question,
    answer: &Answer,
    policy: AnswerPolicy,
) -> Result<f64, AssessmentError> {
    let Answer::Rating(rating) = answer else {
        mismatch(question, "a rating", answer, policy)?;
        return Ok(NEUTRAL_CHOICE_SCORE);
    };

    // A rating question without a declared scale uses the five-point default.
    let fallback;
    let scale = match &question.scale {
        Some(scale) => scale,
        None => {
            fallback = Scale::agreement();
            &fallback
        }
    };

    if scale.contains(*rating) {
        return Ok(scale.normalize(*rating));
    }

    match policy {
        AnswerPolicy::Strict => Err(AssessmentError::RatingOutOfRange {
            question_id: question.id.clone(),
            value: *rating,
            min: scale.min,
            max: scale.max,
        }),
        AnswerPolicy::Lenient => {
            let clamped = (*rating).max(scale.min).min(scale.max);
            tracing::warn!(question = %question.id, "rating {rating} clamped to {clamped}");
            Ok(scale.normalize(clamped))
        }
    }
}

fn mismatch(
    question: &Question,
    expected: &'static str,
    answer: &Answer,
    policy: AnswerPolicy,
) -> Result<(), AssessmentError> {
    match policy {
        AnswerPolicy::Strict => Err(AssessmentError::AnswerTypeMismatch {
            question_id: question.id.clone(),
            expected,
            found: answer.to_string(),
        }),
        AnswerPolicy::Lenient => {
            tracing::warn!(
                question = %question.id,
                "expected {expected}, got {}; answer not credited",
                answer.kind_name()
            );
            Ok(())
        }
    }
}

fn round_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Mean of normalized item values, rounded. An empty category scores 0.
pub fn category_score(values: &[f64]) -> u8 {
    if values.is_empty() {
        return 0;
    }
    let total: f64 = values.iter().sum();
    round_score(total / (100.0 * values.len() as f64) * 100.0)
}

/// Percentage of correct answers, rounded. No answers scores 0.
pub fn technical_score(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    round_score(correct as f64 / total as f64 * 100.0)
}

/// The interest dimension is the rounded mean of will and learning.
pub fn derive_interest(will: u8, learning: u8) -> u8 {
    round_score((f64::from(will) + f64::from(learning)) / 2.0)
}

/// Readiness scores from `(dimension, normalized value)` pairs.
///
/// Values for the same dimension are averaged; unanswered dimensions score 0.
/// Interest is derived afterwards and never taken from a direct question.
pub fn readiness_scores(items: &[(Dimension, f64)]) -> ReadinessScores {
    let mut grouped: BTreeMap<Dimension, Vec<f64>> = BTreeMap::new();
    for (dimension, value) in items {
        if dimension.is_derived() {
            continue;
        }
        grouped.entry(*dimension).or_default().push(*value);
    }

    let mut scores = ReadinessScores::default();
    for (dimension, values) in &grouped {
        scores.set(*dimension, category_score(values));
    }
    scores.interest = derive_interest(scores.will, scores.learning);
    scores
}

/// Aggregate scored items into the category sub-scores.
pub fn compute_sub_scores(items: &[ScoredItem]) -> SubScores {
    let mut trait_values = Vec::new();
    let mut correct = 0usize;
    let mut keyed = 0usize;
    let mut readiness_values = Vec::new();

    for item in items {
        match (item.category, item.score) {
            (Category::Aptitude, ItemScore::Correct(is_correct)) => {
                keyed += 1;
                if is_correct {
                    correct += 1;
                }
            }
            (Category::Trait, ItemScore::Normalized(value)) => trait_values.push(value),
            (Category::Readiness, ItemScore::Normalized(value)) => {
                if let Some(dimension) = item.dimension {
                    readiness_values.push((dimension, value));
                }
            }
            _ => {}
        }
    }

    SubScores {
        psychometric: category_score(&trait_values),
        technical: technical_score(correct, keyed),
        readiness: readiness_scores(&readiness_values),
    }
}

/// Weighted overall score.
pub fn overall_score(sub_scores: &SubScores, weights: &Weights) -> u8 {
    round_score(
        f64::from(sub_scores.psychometric) * weights.psychometric
            + f64::from(sub_scores.technical) * weights.technical
            + sub_scores.readiness.mean() * weights.readiness,
    )
}
