//! Assessment error types.
//!
//! Every fault raised while checking or scoring a run is terminal for that
//! run. Validation variants name the offending question so callers can point
//! the user at the answer that needs fixing.

use thiserror::Error;

/// Errors that can occur while scoring an assessment run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    /// The run contains no responses at all.
    #[error("no responses to score")]
    NoResponses,

    /// A response refers to a question the catalog does not define.
    #[error("unknown question: {question_id}")]
    UnknownQuestion { question_id: String },

    /// More than one response was submitted for the same question.
    #[error("duplicate response for question {question_id}")]
    DuplicateResponse { question_id: String },

    /// A rating was given for a choice question, or vice versa.
    #[error("question {question_id} expects {expected}, got {found}")]
    AnswerTypeMismatch {
        question_id: String,
        expected: &'static str,
        found: String,
    },

    /// A rating lies outside the question's declared scale.
    #[error("question {question_id}: rating {value} outside scale {min}..={max}")]
    RatingOutOfRange {
        question_id: String,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A choice does not match any option the question offers.
    #[error("question {question_id}: {value:?} is not one of the offered options")]
    UnknownOption { question_id: String, value: String },
}

impl AssessmentError {
    /// Returns `true` for malformed-answer faults (as opposed to an empty run).
    pub fn is_validation(&self) -> bool {
        !matches!(self, AssessmentError::NoResponses)
    }

    /// The question the fault refers to, if any.
    pub fn question_id(&self) -> Option<&str> {
        match self {
            AssessmentError::NoResponses => None,
            AssessmentError::UnknownQuestion { question_id }
            | AssessmentError::DuplicateResponse { question_id }
            | AssessmentError::AnswerTypeMismatch { question_id, .. }
            | AssessmentError::RatingOutOfRange { question_id, .. }
            | AssessmentError::UnknownOption { question_id, .. } => Some(question_id),
        }
    }
}
