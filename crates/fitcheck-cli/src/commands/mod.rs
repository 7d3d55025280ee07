//! Subcommand implementations.

pub mod compare;
pub mod init;
pub mod questions;
pub mod reset;
pub mod score;
pub mod take;
pub mod validate;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use fitcheck_core::catalog::Catalog;
use fitcheck_core::config::FitcheckConfig;

/// The catalog named on the command line, else the configured one.
fn load_catalog(config: &FitcheckConfig, catalog_path: Option<&Path>) -> Result<Arc<Catalog>> {
    match catalog_path {
        Some(path) => Ok(Arc::new(fitcheck_core::parser::parse_catalog(path)?)),
        None => config.load_catalog(),
    }
}
