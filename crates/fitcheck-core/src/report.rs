//! Assessment report types with JSON persistence and progress comparison.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{Catalog, CatalogSummary};
use crate::classifier::Recommendation;
use crate::results::AssessmentResult;

/// A scored run together with where and when it was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Catalog the run was scored against.
    pub catalog: CatalogSummary,
    /// Number of responses that were scored.
    pub answered: usize,
    pub result: AssessmentResult,
}

impl AssessmentReport {
    pub fn new(catalog: &Catalog, answered: usize, result: AssessmentResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            catalog: catalog.summary(),
            answered,
            result,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AssessmentReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Compare this report against an earlier one.
    pub fn compare(&self, baseline: &AssessmentReport) -> ProgressReport {
        let pairs = score_rows(&baseline.result)
            .into_iter()
            .zip(score_rows(&self.result));

        let deltas = pairs
            .map(|((name, before), (_, after))| ScoreDelta {
                name,
                baseline: before,
                current: after,
                delta: i16::from(after) - i16::from(before),
            })
            .collect();

        ProgressReport {
            baseline_id: baseline.id,
            current_id: self.id,
            catalog_changed: baseline.catalog.id != self.catalog.id
                || baseline.catalog.version != self.catalog.version,
            deltas,
            baseline_recommendation: baseline.result.recommendation,
            current_recommendation: self.result.recommendation,
        }
    }
}

/// Named scores in report order: components, dimensions, overall.
fn score_rows(result: &AssessmentResult) -> Vec<(String, u8)> {
    let mut rows = vec![
        ("psychometric".to_string(), result.psychometric_score),
        ("technical".to_string(), result.technical_score),
    ];
    rows.extend(
        result
            .readiness_scores
            .iter()
            .map(|(dim, score)| (dim.to_string(), score)),
    );
    rows.push(("overall".to_string(), result.overall_score));
    rows
}

/// Movement of every score between two runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    pub baseline_id: Uuid,
    pub current_id: Uuid,
    /// The runs were scored against different catalogs or catalog versions.
    pub catalog_changed: bool,
    pub deltas: Vec<ScoreDelta>,
    pub baseline_recommendation: Recommendation,
    pub current_recommendation: Recommendation,
}

/// One score in both runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDelta {
    pub name: String,
    pub baseline: u8,
    pub current: u8,
    pub delta: i16,
}

impl ProgressReport {
    pub fn recommendation_changed(&self) -> bool {
        self.baseline_recommendation != self.current_recommendation
    }

    pub fn improvements(&self) -> impl Iterator<Item = &ScoreDelta> {
        self.deltas.iter().filter(|d| d.delta > 0)
    }

    pub fn regressions(&self) -> impl Iterator<Item = &ScoreDelta> {
        self.deltas.iter().filter(|d| d.delta < 0)
    }

    pub fn delta(&self, name: &str) -> Option<&ScoreDelta> {
        self.deltas.iter().find(|d| d.name == name)
    }

    /// Format the progress report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} improved, {} declined, {} unchanged\n\n",
            self.improvements().count(),
            self.regressions().count(),
            self.deltas.iter().filter(|d| d.delta == 0).count()
        ));

        if self.recommendation_changed() {
            md.push_str(&format!(
                "**Recommendation:** {} → {}\n\n",
                self.baseline_recommendation.headline(),
                self.current_recommendation.headline()
            ));
        } else {
            md.push_str(&format!(
                "**Recommendation:** {} (unchanged)\n\n",
                self.current_recommendation.headline()
            ));
        }

        if self.catalog_changed {
            md.push_str("> Runs were scored against different catalog versions.\n\n");
        }

        md.push_str("| Score | Baseline | Current | Delta |\n");
        md.push_str("|-------|----------|---------|-------|\n");
        for d in &self.deltas {
            md.push_str(&format!(
                "| {} | {} | {} | {:+} |\n",
                d.name, d.baseline, d.current, d.delta
            ));
        }

        md
    }
}
