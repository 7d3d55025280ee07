//! The `fitcheck take` command.
//!
//! Walks the catalog section by section on the terminal, one answer per line.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use fitcheck_core::catalog::Catalog;
use fitcheck_core::config::load_config_from;
use fitcheck_core::engine::ScoringEngine;
use fitcheck_core::model::{Answer, Question, QuestionKind, Response, Scale};
use fitcheck_core::store::ResponseStore;

pub fn execute(
    catalog_path: Option<PathBuf>,
    store_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let catalog = super::load_catalog(&config, catalog_path.as_deref())?;

    let stdin = std::io::stdin();
    let responses = collect_responses(&catalog, stdin.lock(), std::io::stdout())?;

    let store = ResponseStore::new(store_dir.unwrap_or_else(|| config.store_dir.clone()));
    let path = store.save(&responses)?;
    eprintln!("\nResponses saved to: {}", path.display());

    let engine = ScoringEngine::new(catalog, config.engine_config());
    let result = engine.assess(&responses)?;
    println!();
    super::score::print_result(&result);

    Ok(())
}

/// Overall completion in percent, `question_number` counting from 1.
pub fn overall_progress(
    section_index: usize,
    question_number: usize,
    question_count: usize,
    section_count: usize,
) -> f64 {
    if question_count == 0 || section_count == 0 {
        return 0.0;
    }
    let within = question_number as f64 / question_count as f64 * 100.0;
    (section_index as f64 * 100.0 + within) / section_count as f64
}

/// The numbered choices shown for a question.
fn answer_choices(question: &Question) -> Vec<(i64, String)> {
    match question.kind {
        QuestionKind::ScaledRating => {
            let scale = question.scale.clone().unwrap_or_else(Scale::agreement);
            let labelled = |v: i64| (v, scale.label(v).unwrap_or_default().to_string());
            match scale.points() {
                Some(points) if points <= Scale::MAX_POINTS => {
                    (scale.min..=scale.max).map(labelled).collect()
                }
                // Too wide to list; show the endpoints and accept anything between.
                Some(_) => vec![labelled(scale.min), labelled(scale.max)],
                None => Vec::new(),
            }
        }
        QuestionKind::SingleChoice | QuestionKind::ScenarioChoice => question
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| (i as i64 + 1, option.clone()))
            .collect(),
    }
}

/// Interpret one input line, or `None` if it is not an acceptable answer.
///
/// Ratings are entered as the rating itself; choices as their number or
/// their exact text.
pub fn parse_answer(question: &Question, input: &str) -> Option<Answer> {
    let input = input.trim();
    match question.kind {
        QuestionKind::ScaledRating => {
            let rating: i64 = input.parse().ok()?;
            let scale = question.scale.clone().unwrap_or_else(Scale::agreement);
            scale.contains(rating).then_some(Answer::Rating(rating))
        }
        QuestionKind::SingleChoice | QuestionKind::ScenarioChoice => {
            let by_number = input
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| question.options.get(i));
            by_number
                .or_else(|| {
                    question
                        .options
                        .iter()
                        .find(|o| o.eq_ignore_ascii_case(input))
                })
                .map(|o| Answer::Choice(o.clone()))
        }
    }
}

/// Ask every question in catalog order, re-prompting until each answer is valid.
pub fn collect_responses<R: BufRead, W: Write>(
    catalog: &Catalog,
    mut input: R,
    mut out: W,
) -> Result<Vec<Response>> {
    let section_count = catalog.sections.len();
    let mut responses = Vec::with_capacity(catalog.len());

    for (section_index, section) in catalog.sections.iter().enumerate() {
        writeln!(out, "\n== {} ==", section.title)?;
        if !section.description.is_empty() {
            writeln!(out, "{}", section.description)?;
        }
        if !section.estimated_time.is_empty() {
            writeln!(out, "Estimated time: {}", section.estimated_time)?;
        }

        let count = section.questions.len();
        for (i, question) in section.questions.iter().enumerate() {
            let progress = overall_progress(section_index, i + 1, count, section_count);
            writeln!(
                out,
                "\nQuestion {} of {} | {:.0}% overall",
                i + 1,
                count,
                progress
            )?;
            writeln!(out, "{}", question.prompt)?;
            for (value, label) in answer_choices(question) {
                if label.is_empty() {
                    writeln!(out, "  {value}")?;
                } else {
                    writeln!(out, "  {value}. {label}")?;
                }
            }

            let answer = loop {
                write!(out, "> ")?;
                out.flush()?;

                let mut line = String::new();
                if input.read_line(&mut line)? == 0 {
                    anyhow::bail!(
                        "input ended before question {} was answered; nothing was saved",
                        question.id
                    );
                }
                match parse_answer(question, &line) {
                    Some(answer) => break answer,
                    None => writeln!(out, "Please enter one of the numbers shown.")?,
                }
            };
            responses.push(Response::new(question.id.clone(), answer));
        }
    }

    Ok(responses)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> Catalog {
        Catalog::builtin().unwrap()
    }

    #[test]
    fn progress_spans_sections() {
        assert!((overall_progress(0, 3, 6, 3) - 50.0 / 3.0).abs() < 1e-9);
        assert!((overall_progress(1, 5, 5, 3) - 200.0 / 3.0).abs() < 1e-9);
        assert!((overall_progress(2, 5, 5, 3) - 100.0).abs() < 1e-9);
        assert_eq!(overall_progress(0, 1, 0, 3), 0.0);
    }

    #[test]
    fn rating_input_must_be_on_the_scale() {
        let catalog = builtin();
        let q = catalog.question("p1").unwrap();
        assert_eq!(parse_answer(q, "4"), Some(Answer::Rating(4)));
        assert_eq!(parse_answer(q, " 1 \n"), Some(Answer::Rating(1)));
        assert_eq!(parse_answer(q, "6"), None);
        assert_eq!(parse_answer(q, "agree"), None);
    }

    #[test]
    fn wide_scale_lists_only_endpoints() {
        let catalog = builtin();
        let q = Question {
            scale: Some(Scale {
                min: i64::MIN,
                max: i64::MAX,
                labels: vec![],
            }),
            ..catalog.question("p1").unwrap().clone()
        };
        let choices = answer_choices(&q);
        assert_eq!(
            choices,
            vec![(i64::MIN, String::new()), (i64::MAX, String::new())]
        );
        assert_eq!(parse_answer(&q, "12345"), Some(Answer::Rating(12345)));

        let builtin_choices = answer_choices(catalog.question("p1").unwrap());
        assert_eq!(builtin_choices.len(), 5);
    }

    #[test]
    fn choice_input_by_number_or_text() {
        let catalog = builtin();
        let q = catalog.question("t5").unwrap();
        let first = Answer::Choice(q.options[0].clone());
        assert_eq!(parse_answer(q, "1"), Some(first));
        assert_eq!(parse_answer(q, "0"), None);
        assert_eq!(parse_answer(q, "99"), None);
        assert_eq!(parse_answer(q, "200"), Some(Answer::Choice("200".into())));
    }

    #[test]
    fn collects_one_response_per_question() {
        let catalog = builtin();
        let mut input = String::from("9\n");
        for _ in 0..catalog.len() {
            input.push_str("1\n");
        }
        let mut out = Vec::new();

        let responses = collect_responses(&catalog, input.as_bytes(), &mut out).unwrap();
        assert_eq!(responses.len(), catalog.len());
        let ids: Vec<_> = responses.iter().map(|r| r.question_id.as_str()).collect();
        let expected: Vec<_> = catalog.questions().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, expected);

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Question 1 of 6 | 6% overall"));
        assert!(out.contains("Question 5 of 5 | 100% overall"));
        assert_eq!(out.matches("Please enter one of the numbers shown.").count(), 1);
    }

    #[test]
    fn early_end_of_input_is_an_error() {
        let catalog = builtin();
        let err = collect_responses(&catalog, "1\n2\n".as_bytes(), Vec::<u8>::new()).unwrap_err();
        assert!(err.to_string().contains("p3"));
    }
}
