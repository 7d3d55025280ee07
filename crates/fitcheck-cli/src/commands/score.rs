//! The `fitcheck score` command.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;

use fitcheck_core::catalog::Catalog;
use fitcheck_core::config::load_config_from;
use fitcheck_core::engine::ScoringEngine;
use fitcheck_core::error::AssessmentError;
use fitcheck_core::model::Response;
use fitcheck_core::parser;
use fitcheck_core::report::AssessmentReport;
use fitcheck_core::results::AssessmentResult;
use fitcheck_core::scoring::AnswerPolicy;
use fitcheck_core::store::ResponseStore;
use fitcheck_report::html::write_html_report;

const NO_RESULTS: &str =
    "No assessment results found. Run `fitcheck take` to complete the assessment first.";

#[allow(clippy::too_many_arguments)]
pub fn execute(
    responses_path: Option<PathBuf>,
    store_dir: Option<PathBuf>,
    catalog_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    lenient: bool,
    output: Option<PathBuf>,
    format: String,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if lenient {
        config.answer_policy = AnswerPolicy::Lenient;
    }
    let catalog = super::load_catalog(&config, catalog_path.as_deref())?;

    let responses = match responses_path {
        Some(path) => parser::load_responses(&path)?,
        None => ResponseStore::new(store_dir.unwrap_or_else(|| config.store_dir.clone()))
            .load()?
            .unwrap_or_default(),
    };
    if responses.is_empty() {
        anyhow::bail!(NO_RESULTS);
    }

    let engine = ScoringEngine::new(catalog.clone(), config.engine_config());
    let result = match engine.assess(&responses) {
        Ok(result) => result,
        Err(AssessmentError::NoResponses) => anyhow::bail!(NO_RESULTS),
        Err(e) => {
            return Err(anyhow::Error::new(e).context(format!(
                "responses could not be scored ({} policy)",
                config.answer_policy
            )))
        }
    };

    let report = AssessmentReport::new(&catalog, answered_count(&catalog, &responses), result);

    let formats: Vec<&str> = if format == "all" {
        vec!["text", "json", "html"]
    } else {
        format.split(',').map(str::trim).collect()
    };
    let output = output.unwrap_or_else(|| config.output_dir.clone());
    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");

    for fmt in &formats {
        match *fmt {
            "text" => print_result(&report.result),
            "json" => {
                let path = output.join(format!("report-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("report-{timestamp}.html"));
                write_html_report(&report, &path)?;
                eprintln!("HTML scorecard: {}", path.display());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    Ok(())
}

/// Distinct catalog questions that received a response.
fn answered_count(catalog: &Catalog, responses: &[Response]) -> usize {
    responses
        .iter()
        .filter(|r| catalog.question(&r.question_id).is_some())
        .map(|r| r.question_id.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Print a result as a terminal summary.
pub fn print_result(result: &AssessmentResult) {
    use comfy_table::{Cell, Table};

    println!("Overall Compatibility Score: {}%", result.overall_score);
    println!(
        "Recommendation: {} ({})",
        result.recommendation.headline(),
        result.recommendation
    );
    println!("  {}", result.recommendation.message());

    let mut table = Table::new();
    table.set_header(vec!["Score", "Value"]);
    table.add_row(vec![
        Cell::new("Personality & Interest"),
        Cell::new(format!("{}%", result.psychometric_score)),
    ]);
    table.add_row(vec![
        Cell::new("Technical Aptitude"),
        Cell::new(format!("{}%", result.technical_score)),
    ]);
    for (dimension, score) in result.readiness_scores.iter() {
        table.add_row(vec![
            Cell::new(dimension.label()),
            Cell::new(format!("{score}%")),
        ]);
    }
    println!("\n{table}");

    print_list("Your Strengths", &result.strengths);
    print_list("Areas to Develop", &result.improvements);
    print_list("Recommended Next Steps", &result.next_steps);
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("\n{title}:");
    for item in items {
        println!("  - {item}");
    }
}
