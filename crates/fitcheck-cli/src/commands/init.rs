//! The `fitcheck init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create fitcheck.toml
    if std::path::Path::new("fitcheck.toml").exists() {
        println!("fitcheck.toml already exists, skipping.");
    } else {
        std::fs::write("fitcheck.toml", SAMPLE_CONFIG)?;
        println!("Created fitcheck.toml");
    }

    // Create example catalog
    std::fs::create_dir_all("catalogs")?;
    let example_path = std::path::Path::new("catalogs/example.toml");
    if example_path.exists() {
        println!("catalogs/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_CATALOG)?;
        println!("Created catalogs/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: fitcheck validate --catalog catalogs/example.toml");
    println!("  2. Run: fitcheck take --catalog catalogs/example.toml");
    println!("  3. Run: fitcheck score --catalog catalogs/example.toml --format all");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# fitcheck configuration

# Catalog to use instead of the built-in application security assessment.
# catalog = "catalogs/example.toml"

# "strict" rejects malformed answers; "lenient" scores them neutrally.
answer_policy = "strict"

store_dir = "./.fitcheck"
output_dir = "./fitcheck-results"

[weights]
psychometric = 0.3
technical = 0.4
readiness = 0.3

[thresholds]
strong_overall = 75
strong_technical = 60
strong_psychometric = 70
conditional_overall = 60
conditional_technical = 40
conditional_psychometric = 60
"#;

const EXAMPLE_CATALOG: &str = r#"[catalog]
id = "example"
name = "Example Assessment"
version = "0.1.0"
description = "A small catalog to get started"

[[sections]]
id = "traits"
title = "Personality & Interest"
estimated_time = "1 minute"

[[sections.questions]]
id = "p1"
kind = "scaled-rating"
category = "trait"
subcategory = "curiosity"
prompt = "I enjoy figuring out how things work."
scale = { min = 1, max = 5, labels = ["Strongly Disagree", "Disagree", "Neutral", "Agree", "Strongly Agree"] }

[[sections.questions]]
id = "p2"
kind = "single-choice"
category = "trait"
subcategory = "motivation"
prompt = "What draws you to this field most?"
options = ["Solving puzzles", "Helping people", "Salary"]
option_scores = { "Solving puzzles" = 100, "Helping people" = 90, "Salary" = 60 }

[[sections]]
id = "aptitude"
title = "Technical Aptitude"
estimated_time = "1 minute"

[[sections.questions]]
id = "t1"
kind = "single-choice"
category = "aptitude"
subcategory = "fundamentals"
prompt = "Which data structure gives O(1) average lookup by key?"
options = ["Linked list", "Hash map", "Binary heap"]
correct = "Hash map"

[[sections]]
id = "readiness"
title = "Readiness"
estimated_time = "2 minutes"

[[sections.questions]]
id = "r1"
kind = "scaled-rating"
category = "readiness"
subcategory = "will"
prompt = "I will keep going when progress is slow."
scale = { min = 1, max = 5, labels = ["Strongly Disagree", "Disagree", "Neutral", "Agree", "Strongly Agree"] }

[[sections.questions]]
id = "r2"
kind = "scaled-rating"
category = "readiness"
subcategory = "skill"
prompt = "How would you rate your current programming skill?"
scale = { min = 1, max = 5, labels = ["Beginner", "Novice", "Intermediate", "Advanced", "Expert"] }

[[sections.questions]]
id = "r3"
kind = "scaled-rating"
category = "readiness"
subcategory = "cognitive"
prompt = "I can break complex problems into smaller parts."
scale = { min = 1, max = 5, labels = ["Strongly Disagree", "Disagree", "Neutral", "Agree", "Strongly Agree"] }

[[sections.questions]]
id = "r4"
kind = "scaled-rating"
category = "readiness"
subcategory = "learning"
prompt = "I actively seek feedback to improve."
scale = { min = 1, max = 5, labels = ["Strongly Disagree", "Disagree", "Neutral", "Agree", "Strongly Agree"] }

[[sections.questions]]
id = "r5"
kind = "single-choice"
category = "readiness"
subcategory = "alignment"
prompt = "Which work style suits you best?"
options = ["Deep focus alone", "Pairing with others"]
option_scores = { "Deep focus alone" = 85, "Pairing with others" = 95 }
"#;
