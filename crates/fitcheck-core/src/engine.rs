//! Central scoring engine.
//!
//! Turns the responses of one run into sub-scores, an overall score, a
//! recommendation, and insights. The engine holds only shared, read-only
//! state, so one instance can score any number of independent runs.

use std::collections::HashMap;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::classifier::{classify, Thresholds};
use crate::error::AssessmentError;
use crate::insights::generate_insights;
use crate::model::Response;
use crate::results::{AssessmentResult, SubScores};
use crate::scoring::{
    compute_sub_scores, overall_score, score_item, AnswerPolicy, ScoredItem, Weights,
};

/// Configuration for the scoring engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    /// How malformed answers are treated.
    pub policy: AnswerPolicy,
    /// Weights of the overall score.
    pub weights: Weights,
    /// Classifier thresholds.
    pub thresholds: Thresholds,
}

/// Sub-scores plus the weighted overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scorecard {
    pub sub_scores: SubScores,
    pub overall: u8,
}

/// The scoring engine.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    catalog: Arc<Catalog>,
    config: EngineConfig,
}

impl ScoringEngine {
    pub fn new(catalog: Arc<Catalog>, config: EngineConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Check every response against the catalog and score it.
    ///
    /// Items come back in catalog order whatever order the responses arrived
    /// in, so aggregation does not depend on submission order.
    pub fn check(&self, responses: &[Response]) -> Result<Vec<ScoredItem>, AssessmentError> {
        if responses.is_empty() {
            return Err(AssessmentError::NoResponses);
        }

        let policy = self.config.policy;
        let mut by_id: HashMap<&str, &Response> = HashMap::new();
        for response in responses {
            let id = response.question_id.as_str();
            if self.catalog.question(id).is_none() {
                if policy == AnswerPolicy::Strict {
                    return Err(AssessmentError::UnknownQuestion {
                        question_id: id.to_string(),
                    });
                }
                tracing::warn!(question = %id, "skipping response to unknown question");
                continue;
            }
            if by_id.insert(id, response).is_some() {
                if policy == AnswerPolicy::Strict {
                    return Err(AssessmentError::DuplicateResponse {
                        question_id: id.to_string(),
                    });
                }
                tracing::warn!(question = %id, "duplicate response, keeping the last one");
            }
        }

        if by_id.is_empty() {
            return Err(AssessmentError::NoResponses);
        }

        let mut items = Vec::with_capacity(by_id.len());
        for question in self.catalog.questions() {
            // `remove` so a duplicated catalog id is scored once.
            let Some(response) = by_id.remove(question.id.as_str()) else {
                continue;
            };
            items.push(ScoredItem {
                category: question.category,
                dimension: question.readiness_dimension(),
                score: score_item(question, &response.answer, policy)?,
            });
        }

        Ok(items)
    }

    /// Compute sub-scores and the overall score.
    pub fn score(&self, responses: &[Response]) -> Result<Scorecard, AssessmentError> {
        let items = self.check(responses)?;
        let sub_scores = compute_sub_scores(&items);
        let overall = overall_score(&sub_scores, &self.config.weights);
        Ok(Scorecard {
            sub_scores,
            overall,
        })
    }

    /// Run the full pipeline: score, classify, and generate insights.
    pub fn assess(&self, responses: &[Response]) -> Result<AssessmentResult, AssessmentError> {
        let Scorecard {
            sub_scores,
            overall,
        } = self.score(responses)?;

        let recommendation = classify(
            overall,
            sub_scores.psychometric,
            sub_scores.technical,
            &self.config.thresholds,
        );
        let insights = generate_insights(
            sub_scores.psychometric,
            sub_scores.technical,
            &sub_scores.readiness,
            recommendation,
        );

        tracing::debug!(
            catalog = %self.catalog.id,
            responses = responses.len(),
            psychometric = sub_scores.psychometric,
            technical = sub_scores.technical,
            overall,
            %recommendation,
            "scored assessment run"
        );

        Ok(AssessmentResult {
            psychometric_score: sub_scores.psychometric,
            technical_score: sub_scores.technical,
            readiness_scores: sub_scores.readiness,
            overall_score: overall,
            recommendation,
            strengths: insights.strengths,
            improvements: insights.improvements,
            next_steps: insights.next_steps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Recommendation;
    use crate::model::{Answer, Category};
    use crate::scoring::derive_interest;

    fn engine(policy: AnswerPolicy) -> ScoringEngine {
        let catalog = Arc::new(Catalog::builtin().unwrap());
        ScoringEngine::new(
            catalog,
            EngineConfig {
                policy,
                ..EngineConfig::default()
            },
        )
    }

    fn best_responses(engine: &ScoringEngine) -> Vec<Response> {
        engine
            .catalog()
            .questions()
            .map(|q| {
                let answer = match (&q.correct, q.kind.is_choice()) {
                    (Some(correct), _) => Answer::Choice(correct.clone()),
                    (None, true) => {
                        let best = q
                            .options
                            .iter()
                            .max_by_key(|o| q.option_scores.get(*o).copied().unwrap_or(50))
                            .unwrap();
                        Answer::Choice(best.clone())
                    }
                    (None, false) => Answer::Rating(q.scale.as_ref().unwrap().max),
                };
                Response::new(q.id.clone(), answer)
            })
            .collect()
    }

    #[test]
    fn perfect_run_is_strong_fit() {
        let engine = engine(AnswerPolicy::Strict);
        let result = engine.assess(&best_responses(&engine)).unwrap();

        assert_eq!(result.psychometric_score, 100);
        assert_eq!(result.technical_score, 100);
        assert_eq!(result.readiness_scores.will, 100);
        assert_eq!(result.readiness_scores.interest, 100);
        assert_eq!(result.readiness_scores.skill, 100);
        assert_eq!(result.readiness_scores.cognitive, 100);
        assert_eq!(result.readiness_scores.learning, 100);
        // Best alignment answer scores 95.
        assert_eq!(result.readiness_scores.alignment, 95);
        assert_eq!(result.overall_score, 100);
        assert_eq!(result.recommendation, Recommendation::StrongFit);
        assert_eq!(result.strengths.len(), 5);
        assert!(result.improvements.is_empty());
    }

    #[test]
    fn scaled_items_only_reach_full_marks() {
        let engine = engine(AnswerPolicy::Strict);
        let mut responses: Vec<Response> = ["p1", "p2", "p3", "p4", "p5", "w1", "w2", "w3", "w4"]
            .iter()
            .map(|id| Response::new(*id, 5))
            .collect();
        responses.extend(
            engine
                .catalog()
                .questions_in(Category::Aptitude)
                .map(|q| Response::new(q.id.clone(), q.correct.as_deref().unwrap())),
        );

        let card = engine.score(&responses).unwrap();
        assert_eq!(card.sub_scores.psychometric, 100);
        assert_eq!(card.sub_scores.technical, 100);
        assert_eq!(card.sub_scores.readiness.interest, 100);
        // Alignment unanswered.
        assert_eq!(card.sub_scores.readiness.alignment, 0);
    }

    #[test]
    fn missing_technical_section_scores_zero() {
        let engine = engine(AnswerPolicy::Strict);
        let responses = vec![Response::new("p1", 3), Response::new("w1", 4)];
        let card = engine.score(&responses).unwrap();
        assert_eq!(card.sub_scores.technical, 0);
        assert_eq!(card.sub_scores.psychometric, 50);
        assert_eq!(card.sub_scores.readiness.will, 75);
        assert_eq!(card.sub_scores.readiness.interest, 38);
    }

    #[test]
    fn empty_run_is_no_responses() {
        let engine = engine(AnswerPolicy::Strict);
        assert_eq!(engine.assess(&[]), Err(AssessmentError::NoResponses));
        let lenient = self::engine(AnswerPolicy::Lenient);
        assert_eq!(
            lenient.assess(&[Response::new("zz", 1)]),
            Err(AssessmentError::NoResponses)
        );
    }

    #[test]
    fn strict_rejects_unknown_question_and_duplicates() {
        let engine = engine(AnswerPolicy::Strict);
        let err = engine
            .score(&[Response::new("p1", 3), Response::new("q42", 3)])
            .unwrap_err();
        assert_eq!(
            err,
            AssessmentError::UnknownQuestion {
                question_id: "q42".into()
            }
        );

        let err = engine
            .score(&[Response::new("p1", 3), Response::new("p1", 4)])
            .unwrap_err();
        assert_eq!(
            err,
            AssessmentError::DuplicateResponse {
                question_id: "p1".into()
            }
        );
    }

    #[test]
    fn lenient_keeps_last_duplicate_and_skips_unknown() {
        let engine = engine(AnswerPolicy::Lenient);
        let card = engine
            .score(&[
                Response::new("p1", 1),
                Response::new("q42", 3),
                Response::new("p1", 5),
            ])
            .unwrap();
        assert_eq!(card.sub_scores.psychometric, 100);
    }

    #[test]
    fn unmatched_choice_strict_vs_lenient() {
        let responses = vec![Response::new("p1", 5), Response::new("p6", "Money")];

        let err = engine(AnswerPolicy::Strict).score(&responses).unwrap_err();
        assert_eq!(err.question_id(), Some("p6"));

        let card = engine(AnswerPolicy::Lenient).score(&responses).unwrap();
        // (100 + 50) / 2
        assert_eq!(card.sub_scores.psychometric, 75);
    }

    #[test]
    fn order_of_responses_does_not_matter() {
        let engine = engine(AnswerPolicy::Strict);
        let responses = vec![
            Response::new("p1", 2),
            Response::new("p2", 4),
            Response::new("p6", "Working with cutting-edge technology"),
            Response::new("t2", "Broken Authentication"),
            Response::new("t5", "200"),
            Response::new("w2", 3),
            Response::new("w5", "Implementing and maintaining security tools"),
        ];
        let mut reversed = responses.clone();
        reversed.reverse();

        let a = engine.assess(&responses).unwrap();
        let b = engine.assess(&reversed).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn mid_profile_matches_hand_computation() {
        let engine = engine(AnswerPolicy::Strict);
        let responses = vec![
            Response::new("p1", 4),
            Response::new("p2", 4),
            Response::new("p3", 3),
            Response::new("p4", 2),
            Response::new("p5", 5),
            Response::new("p6", "Job security and career growth opportunities"),
            Response::new("t1", "A method to inject malicious SQL code into application queries"),
            Response::new("t2", "Injection vulnerabilities"),
            Response::new("t3", "To compress web content"),
            Response::new("t4", "SQL Injection"),
            Response::new("t5", "200"),
            Response::new("w1", 4),
            Response::new("w2", 2),
            Response::new("w3", 4),
            Response::new("w4", 5),
            Response::new("w5", "Communicating security risks to business stakeholders"),
        ];

        let result = engine.assess(&responses).unwrap();
        // (75 + 75 + 50 + 25 + 100 + 60) / 6 = 64.17
        assert_eq!(result.psychometric_score, 64);
        assert_eq!(result.technical_score, 60);
        assert_eq!(result.readiness_scores.will, 75);
        assert_eq!(result.readiness_scores.skill, 25);
        assert_eq!(result.readiness_scores.cognitive, 75);
        assert_eq!(result.readiness_scores.learning, 100);
        assert_eq!(result.readiness_scores.alignment, 70);
        assert_eq!(result.readiness_scores.interest, 88);
        // 64*0.3 + 60*0.4 + (433/6)*0.3 = 19.2 + 24 + 21.65 = 64.85
        assert_eq!(result.overall_score, 65);
        assert_eq!(result.recommendation, Recommendation::ConditionalFit);
        assert_eq!(
            result.strengths,
            ["Growth mindset and learning agility"]
        );
        assert_eq!(
            result.improvements,
            ["Enhance core programming and technical skills"]
        );
    }

    #[test]
    fn repeated_assessment_is_byte_identical() {
        let engine = engine(AnswerPolicy::Strict);
        let responses = best_responses(&engine);
        let first = serde_json::to_vec(&engine.assess(&responses).unwrap()).unwrap();
        for _ in 0..5 {
            let again = serde_json::to_vec(&engine.assess(&responses).unwrap()).unwrap();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn interest_law_and_range_hold_across_ratings() {
        let engine = engine(AnswerPolicy::Strict);
        for will in 1..=5 {
            for learning in 1..=5 {
                for p in 1..=5 {
                    let responses = vec![
                        Response::new("w1", will),
                        Response::new("w4", learning),
                        Response::new("p1", p),
                        Response::new("t1", "A database backup procedure"),
                    ];
                    let r = engine.assess(&responses).unwrap();
                    let rs = r.readiness_scores;
                    assert_eq!(rs.interest, derive_interest(rs.will, rs.learning));
                    for (_, score) in rs.iter() {
                        assert!(score <= 100);
                    }
                    assert!(r.overall_score <= 100);
                    assert!(r.psychometric_score <= 100);
                }
            }
        }
    }
}
