//! End-to-end pipeline tests through the library crates.
//!
//! These tests walk a run the way the CLI does (store → score → report →
//! compare) and check the guarantees that span modules.

use std::sync::Arc;

use fitcheck_core::catalog::Catalog;
use fitcheck_core::classifier::Recommendation;
use fitcheck_core::config::parse_config;
use fitcheck_core::engine::{EngineConfig, ScoringEngine};
use fitcheck_core::error::AssessmentError;
use fitcheck_core::model::{Answer, Response};
use fitcheck_core::report::AssessmentReport;
use fitcheck_core::scoring::AnswerPolicy;
use fitcheck_core::store::ResponseStore;
use fitcheck_report::html::generate_html;

fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::builtin().unwrap())
}

/// Middling answers: neutral ratings, mixed aptitude, first choice elsewhere.
fn middling_run(catalog: &Catalog) -> Vec<Response> {
    catalog
        .questions()
        .enumerate()
        .map(|(i, q)| {
            let answer = match (&q.correct, &q.scale) {
                (Some(correct), _) if i % 2 == 0 => Answer::Choice(correct.clone()),
                (Some(_), _) => Answer::Choice(
                    q.options
                        .iter()
                        .find(|o| Some(*o) != q.correct.as_ref())
                        .unwrap()
                        .clone(),
                ),
                (None, Some(scale)) => Answer::Rating((scale.min + scale.max) / 2),
                (None, None) => Answer::Choice(q.options[0].clone()),
            };
            Response::new(q.id.clone(), answer)
        })
        .collect()
}

#[test]
fn stored_run_scores_like_direct_run() {
    let catalog = catalog();
    let responses = middling_run(&catalog);
    let dir = tempfile::tempdir().unwrap();
    let store = ResponseStore::new(dir.path());
    store.save(&responses).unwrap();

    let engine = ScoringEngine::new(catalog.clone(), EngineConfig::default());
    let direct = engine.assess(&responses).unwrap();
    let stored = engine.assess(&store.load().unwrap().unwrap()).unwrap();
    assert_eq!(direct, stored);
}

#[test]
fn repeated_runs_serialize_identically() {
    let catalog = catalog();
    let responses = middling_run(&catalog);
    let engine = ScoringEngine::new(catalog, EngineConfig::default());

    let a = serde_json::to_string(&engine.assess(&responses).unwrap()).unwrap();
    let b = serde_json::to_string(&engine.assess(&responses).unwrap()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn report_roundtrip_and_progress() {
    let catalog = catalog();
    let engine = ScoringEngine::new(catalog.clone(), EngineConfig::default());
    let dir = tempfile::tempdir().unwrap();

    let first = middling_run(&catalog);
    let baseline = AssessmentReport::new(&catalog, first.len(), engine.assess(&first).unwrap());
    let baseline_path = dir.path().join("baseline.json");
    baseline.save_json(&baseline_path).unwrap();

    // Retake with every aptitude item correct.
    let second: Vec<Response> = catalog
        .questions()
        .zip(first.iter())
        .map(|(q, r)| match &q.correct {
            Some(correct) => Response::new(q.id.clone(), correct.as_str()),
            None => r.clone(),
        })
        .collect();
    let current = AssessmentReport::new(&catalog, second.len(), engine.assess(&second).unwrap());

    let loaded = AssessmentReport::load_json(&baseline_path).unwrap();
    assert_eq!(loaded.result, baseline.result);
    assert_eq!(loaded.catalog, catalog.summary());

    let progress = current.compare(&loaded);
    assert!(progress.delta("technical").unwrap().delta > 0);
    assert_eq!(progress.delta("psychometric").unwrap().delta, 0);
    assert!(progress.regressions().next().is_none());
    assert!(!progress.catalog_changed);
}

#[test]
fn configured_thresholds_change_the_recommendation() {
    let catalog = catalog();
    let responses = middling_run(&catalog);

    let default_engine = ScoringEngine::new(catalog.clone(), EngineConfig::default());
    let default_result = default_engine.assess(&responses).unwrap();

    let config = parse_config(
        r#"
[thresholds]
strong_overall = 0
strong_technical = 0
strong_psychometric = 0
"#,
    )
    .unwrap();
    let relaxed = ScoringEngine::new(catalog, config.engine_config());
    let relaxed_result = relaxed.assess(&responses).unwrap();

    assert_eq!(relaxed_result.recommendation, Recommendation::StrongFit);
    assert_eq!(relaxed_result.overall_score, default_result.overall_score);
}

#[test]
fn policies_disagree_only_on_malformed_input() {
    let catalog = catalog();
    let mut responses = middling_run(&catalog);
    responses.push(Response::new("p6", "Free snacks"));

    let strict = ScoringEngine::new(catalog.clone(), EngineConfig::default());
    let err = strict.assess(&responses).unwrap_err();
    assert!(err.is_validation());
    assert!(matches!(err, AssessmentError::DuplicateResponse { .. }));

    let lenient = ScoringEngine::new(
        catalog,
        EngineConfig {
            policy: AnswerPolicy::Lenient,
            ..EngineConfig::default()
        },
    );
    assert!(lenient.assess(&responses).is_ok());
}

#[test]
fn scorecard_renders_for_a_real_run() {
    let catalog = catalog();
    let responses = middling_run(&catalog);
    let engine = ScoringEngine::new(catalog.clone(), EngineConfig::default());
    let report = AssessmentReport::new(&catalog, responses.len(), engine.assess(&responses).unwrap());

    let html = generate_html(&report);
    assert!(html.contains(report.result.recommendation.headline()));
    assert!(html.contains("Application Security Career Assessment"));
    for step in &report.result.next_steps {
        assert!(html.contains(step.as_str()));
    }
}
