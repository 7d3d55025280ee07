//! The question catalog.
//!
//! A catalog is built once (from TOML or the embedded default) and then
//! shared read-only, typically behind an `Arc`, by everything that needs
//! question metadata.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::model::{Category, Dimension, Question, Section};

/// TOML source of the built-in application security catalog.
pub const BUILTIN_CATALOG: &str = include_str!("../../../catalogs/appsec.toml");

/// A versioned, immutable set of sections and questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// Unique identifier for this catalog.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Catalog version; bump whenever questions or scoring tables change.
    pub version: String,
    #[serde(default)]
    pub description: String,
    /// Sections in presentation order.
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// Summary of a catalog (without the question definitions).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub id: String,
    pub name: String,
    pub version: String,
    pub question_count: usize,
}

impl Catalog {
    /// Parse the embedded application security catalog.
    pub fn builtin() -> Result<Self> {
        crate::parser::parse_catalog_str(BUILTIN_CATALOG, std::path::Path::new("<builtin>"))
    }

    /// All questions in presentation order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.sections.iter().flat_map(|s| s.questions.iter())
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions().find(|q| q.id == id)
    }

    pub fn questions_in(&self, category: Category) -> impl Iterator<Item = &Question> {
        self.questions().filter(move |q| q.category == category)
    }

    /// Questions feeding a readiness dimension.
    pub fn questions_for(&self, dimension: Dimension) -> impl Iterator<Item = &Question> {
        self.questions()
            .filter(move |q| q.readiness_dimension() == Some(dimension))
    }

    pub fn len(&self) -> usize {
        self.questions().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            version: self.version.clone(),
            question_count: self.len(),
        }
    }
}
