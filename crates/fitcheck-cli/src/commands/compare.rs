//! The `fitcheck compare` command.

use std::path::PathBuf;

use anyhow::Result;

use fitcheck_core::report::AssessmentReport;

pub fn execute(baseline_path: PathBuf, current_path: PathBuf, format: String) -> Result<()> {
    let baseline = AssessmentReport::load_json(&baseline_path)?;
    let current = AssessmentReport::load_json(&current_path)?;

    let progress = current.compare(&baseline);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", progress.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&progress)?);
        }
        _ => {
            println!(
                "Comparison: {} improved, {} declined, {} unchanged",
                progress.improvements().count(),
                progress.regressions().count(),
                progress.deltas.iter().filter(|d| d.delta == 0).count()
            );

            if progress.recommendation_changed() {
                println!(
                    "Recommendation: {} -> {}",
                    progress.baseline_recommendation, progress.current_recommendation
                );
            } else {
                println!(
                    "Recommendation unchanged: {}",
                    progress.current_recommendation
                );
            }

            if progress.catalog_changed {
                println!("Note: the runs were scored against different catalog versions.");
            }

            let changed: Vec<_> = progress.deltas.iter().filter(|d| d.delta != 0).collect();
            if !changed.is_empty() {
                println!("\nChanges:");
                for d in changed {
                    println!(
                        "  {} {}% -> {}% ({:+})",
                        d.name, d.baseline, d.current, d.delta
                    );
                }
            }
        }
    }

    Ok(())
}
