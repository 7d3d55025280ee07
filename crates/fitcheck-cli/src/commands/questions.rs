//! The `fitcheck questions` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use fitcheck_core::config::load_config;
use fitcheck_core::model::Category;

pub fn execute(catalog_path: Option<PathBuf>, category: Option<String>) -> Result<()> {
    let config = load_config()?;
    let catalog = super::load_catalog(&config, catalog_path.as_deref())?;
    let filter = category
        .map(|c| c.parse::<Category>().map_err(anyhow::Error::msg))
        .transpose()?;

    println!(
        "Catalog: {} v{} ({} questions)",
        catalog.name,
        catalog.version,
        catalog.len()
    );

    let mut table = Table::new();
    table.set_header(vec!["ID", "Section", "Kind", "Category", "Dimension", "Prompt"]);

    let mut shown = 0;
    for section in &catalog.sections {
        for q in &section.questions {
            if filter.is_some_and(|c| q.category != c) {
                continue;
            }
            let dimension = q
                .readiness_dimension()
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string());
            table.add_row(vec![
                Cell::new(&q.id),
                Cell::new(&section.id),
                Cell::new(q.kind),
                Cell::new(q.category),
                Cell::new(dimension),
                Cell::new(&q.prompt),
            ]);
            shown += 1;
        }
    }

    if shown == 0 {
        println!("No questions match.");
        return Ok(());
    }
    println!("{table}");

    let counts: Vec<String> = Category::ALL
        .into_iter()
        .filter(|c| filter.map_or(true, |f| f == *c))
        .map(|c| format!("{} {c}", catalog.questions_in(c).count()))
        .collect();
    println!("{}", counts.join(", "));

    Ok(())
}
