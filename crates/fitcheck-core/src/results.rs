//! Result types produced by a scoring pass.

use serde::{Deserialize, Serialize};

use crate::classifier::Recommendation;
use crate::model::Dimension;

/// Scores for the six readiness dimensions, each in 0..=100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessScores {
    pub will: u8,
    pub interest: u8,
    pub skill: u8,
    pub cognitive: u8,
    pub learning: u8,
    pub alignment: u8,
}

impl ReadinessScores {
    pub fn get(&self, dimension: Dimension) -> u8 {
        match dimension {
            Dimension::Will => self.will,
            Dimension::Interest => self.interest,
            Dimension::Skill => self.skill,
            Dimension::Cognitive => self.cognitive,
            Dimension::Learning => self.learning,
            Dimension::Alignment => self.alignment,
        }
    }

    pub fn set(&mut self, dimension: Dimension, score: u8) {
        let slot = match dimension {
            Dimension::Will => &mut self.will,
            Dimension::Interest => &mut self.interest,
            Dimension::Skill => &mut self.skill,
            Dimension::Cognitive => &mut self.cognitive,
            Dimension::Learning => &mut self.learning,
            Dimension::Alignment => &mut self.alignment,
        };
        *slot = score;
    }

    /// Dimensions with their scores, in axis order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, u8)> + '_ {
        Dimension::ALL.into_iter().map(|d| (d, self.get(d)))
    }

    /// Unrounded mean over all six dimensions.
    pub fn mean(&self) -> f64 {
        self.iter().map(|(_, s)| s as f64).sum::<f64>() / Dimension::ALL.len() as f64
    }
}

/// Category sub-scores of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubScores {
    pub psychometric: u8,
    pub technical: u8,
    pub readiness: ReadinessScores,
}

/// The complete outcome of scoring one run.
///
/// Carries no ids or timestamps, so identical responses always serialize to
/// identical bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub psychometric_score: u8,
    pub technical_score: u8,
    pub readiness_scores: ReadinessScores,
    pub overall_score: u8,
    pub recommendation: Recommendation,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub next_steps: Vec<String>,
}
