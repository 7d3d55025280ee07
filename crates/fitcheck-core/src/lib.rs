//! fitcheck-core — question catalog, scoring engine, and recommendations.
//!
//! This crate defines the assessment data model, the scoring pipeline that
//! turns one run of responses into a recommendation, and the report types
//! the CLI and presentation layers build on.

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod insights;
pub mod model;
pub mod parser;
pub mod report;
pub mod results;
pub mod scoring;
pub mod store;
