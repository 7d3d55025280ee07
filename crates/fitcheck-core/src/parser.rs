//! TOML catalog parser.
//!
//! Loads question catalogs from TOML files and directories, validates them,
//! and reads captured response lists from JSON.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::catalog::Catalog;
use crate::model::{Category, Dimension, Question, QuestionKind, Response, Scale, Section};

/// Intermediate TOML structure for parsing catalog files.
#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    catalog: TomlCatalogHeader,
    #[serde(default)]
    sections: Vec<TomlSection>,
}

#[derive(Debug, Deserialize)]
struct TomlCatalogHeader {
    id: String,
    name: String,
    #[serde(default = "default_version")]
    version: String,
    #[serde(default)]
    description: String,
}

fn default_version() -> String {
    "0.0.0".to_string()
}

#[derive(Debug, Deserialize)]
struct TomlSection {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    estimated_time: String,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    kind: String,
    category: String,
    #[serde(default)]
    subcategory: String,
    prompt: String,
    #[serde(default)]
    scale: Option<TomlScale>,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    option_scores: HashMap<String, u8>,
    #[serde(default)]
    correct: Option<String>,
    #[serde(default)]
    dimension: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlScale {
    min: i64,
    max: i64,
    #[serde(default)]
    labels: Vec<String>,
}

/// Parse a single TOML file into a `Catalog`.
pub fn parse_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a TOML string into a `Catalog` (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<Catalog> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let sections = parsed
        .sections
        .into_iter()
        .map(|s| {
            let questions = s
                .questions
                .into_iter()
                .map(convert_question)
                .collect::<Result<Vec<_>>>()?;

            Ok(Section {
                id: s.id,
                title: s.title,
                description: s.description,
                estimated_time: s.estimated_time,
                questions,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Catalog {
        id: parsed.catalog.id,
        name: parsed.catalog.name,
        version: parsed.catalog.version,
        description: parsed.catalog.description,
        sections,
    })
}

fn convert_question(q: TomlQuestion) -> Result<Question> {
    let kind: QuestionKind = q
        .kind
        .parse()
        .map_err(|e: String| anyhow::anyhow!("question {}: {}", q.id, e))?;
    let category: Category = q
        .category
        .parse()
        .map_err(|e: String| anyhow::anyhow!("question {}: {}", q.id, e))?;
    let dimension = q
        .dimension
        .map(|d| {
            d.parse::<Dimension>()
                .map_err(|e| anyhow::anyhow!("question {}: {}", q.id, e))
        })
        .transpose()?;

    Ok(Question {
        id: q.id,
        kind,
        category,
        subcategory: q.subcategory,
        prompt: q.prompt,
        scale: q.scale.map(|s| Scale {
            min: s.min,
            max: s.max,
            labels: s.labels,
        }),
        options: q.options,
        option_scores: q.option_scores,
        correct: q.correct,
        dimension,
    })
}

/// Recursively load all `.toml` catalog files from a directory.
pub fn load_catalog_directory(dir: &Path) -> Result<Vec<Catalog>> {
    let mut catalogs = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            catalogs.extend(load_catalog_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_catalog(&path) {
                Ok(catalog) => catalogs.push(catalog),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(catalogs)
}

/// Read a JSON array of responses, as written by the response store.
pub fn load_responses(path: &Path) -> Result<Vec<Response>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read responses from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse responses JSON: {}", path.display()))
}

/// A warning from catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn question(id: &str, message: impl Into<String>) -> Self {
        Self {
            question_id: Some(id.to_string()),
            message: message.into(),
        }
    }
}

/// Validate a catalog for common issues.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = HashSet::new();
    for q in catalog.questions() {
        if !seen_ids.insert(q.id.as_str()) {
            warnings.push(ValidationWarning::question(
                &q.id,
                format!("duplicate question ID: {}", q.id),
            ));
        }
    }

    for q in catalog.questions() {
        if q.prompt.trim().is_empty() {
            warnings.push(ValidationWarning::question(&q.id, "prompt is empty"));
        }
        warnings.extend(validate_answer_shape(q));
        warnings.extend(validate_scoring_metadata(q));
    }

    // Every explicit dimension needs at least one question, or it always scores 0.
    for dim in Dimension::ALL.into_iter().filter(|d| !d.is_derived()) {
        if catalog.questions_for(dim).next().is_none() {
            warnings.push(ValidationWarning {
                question_id: None,
                message: format!("no readiness question feeds the {dim} dimension"),
            });
        }
    }

    warnings
}

fn validate_answer_shape(q: &Question) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if q.kind.is_choice() {
        if q.options.is_empty() {
            warnings.push(ValidationWarning::question(
                &q.id,
                "choice question has no options",
            ));
        }
        return warnings;
    }

    match &q.scale {
        None => warnings.push(ValidationWarning::question(
            &q.id,
            "scaled-rating question has no scale",
        )),
        Some(scale) if scale.min >= scale.max => warnings.push(ValidationWarning::question(
            &q.id,
            format!("scale min {} must be below max {}", scale.min, scale.max),
        )),
        Some(scale) => match scale.points() {
            Some(points) if points <= Scale::MAX_POINTS => {
                if scale.labels.len() != points {
                    warnings.push(ValidationWarning::question(
                        &q.id,
                        format!(
                            "scale has {} points but {} labels",
                            points,
                            scale.labels.len()
                        ),
                    ));
                }
            }
            _ => warnings.push(ValidationWarning::question(
                &q.id,
                format!(
                    "scale {}..={} has more than {} points",
                    scale.min,
                    scale.max,
                    Scale::MAX_POINTS
                ),
            )),
        },
    }

    warnings
}

fn validate_scoring_metadata(q: &Question) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for (option, score) in &q.option_scores {
        if !q.has_option(option) {
            warnings.push(ValidationWarning::question(
                &q.id,
                format!("option_scores entry {option:?} is not an offered option"),
            ));
        }
        if *score > 100 {
            warnings.push(ValidationWarning::question(
                &q.id,
                format!("option_scores entry {option:?} exceeds 100"),
            ));
        }
    }

    match q.category {
        Category::Aptitude => {
            if !q.kind.is_choice() {
                warnings.push(ValidationWarning::question(
                    &q.id,
                    format!("aptitude question must be a choice question, not {}", q.kind),
                ));
            }
            match &q.correct {
                None => warnings.push(ValidationWarning::question(
                    &q.id,
                    "aptitude question has no correct answer",
                )),
                Some(correct) if !q.has_option(correct) => {
                    warnings.push(ValidationWarning::question(
                        &q.id,
                        format!("correct answer {correct:?} is not an offered option"),
                    ))
                }
                Some(_) => {}
            }
        }
        Category::Readiness => match q.readiness_dimension() {
            None => warnings.push(ValidationWarning::question(
                &q.id,
                format!(
                    "readiness question maps to no dimension (subcategory {:?})",
                    q.subcategory
                ),
            )),
            Some(dim) if dim.is_derived() => warnings.push(ValidationWarning::question(
                &q.id,
                format!("{dim} is derived from will and learning; this question is ignored"),
            )),
            Some(_) => {}
        },
        Category::Trait => {}
    }

    warnings
}
