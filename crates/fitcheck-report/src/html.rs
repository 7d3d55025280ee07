//! HTML scorecard generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use fitcheck_core::classifier::Recommendation;
use fitcheck_core::report::AssessmentReport;

use crate::radar::RadarChart;

/// Escape a string for safe HTML insertion.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn banner_class(recommendation: Recommendation) -> &'static str {
    match recommendation {
        Recommendation::StrongFit => "strong",
        Recommendation::ConditionalFit => "conditional",
        Recommendation::PoorFit => "poor",
    }
}

fn progress_bar(label: &str, value: u8) -> String {
    let width = value.min(100);
    format!(
        "<div class=\"bar\"><div class=\"bar-label\"><span>{}</span><span>{}%</span></div>\
         <div class=\"track\"><div class=\"fill\" style=\"width: {}%\"></div></div></div>\n",
        html_escape(label),
        value,
        width
    )
}

fn list_section(title: &str, class: &str, items: &[String]) -> String {
    let mut html = format!("<section class=\"{class}\">\n<h2>{}</h2>\n", html_escape(title));
    if items.is_empty() {
        html.push_str("<p class=\"meta\">None identified.</p>\n");
    } else {
        html.push_str("<ul>\n");
        for item in items {
            html.push_str(&format!("<li>{}</li>\n", html_escape(item)));
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</section>\n");
    html
}

/// Generate an HTML scorecard from an assessment report.
pub fn generate_html(report: &AssessmentReport) -> String {
    let result = &report.result;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>fitcheck scorecard: {}</title>\n",
        html_escape(&report.catalog.name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Your Assessment Results</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Catalog: <strong>{}</strong> v{} | {} of {} questions answered | {}</p>\n",
        html_escape(&report.catalog.name),
        html_escape(&report.catalog.version),
        report.answered,
        report.catalog.question_count,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Recommendation banner
    html.push_str(&format!(
        "<section class=\"banner {}\">\n<div class=\"overall\">{}%<span>overall</span></div>\n\
         <div><h2>{}</h2>\n<p>{}</p></div>\n</section>\n",
        banner_class(result.recommendation),
        result.overall_score,
        html_escape(result.recommendation.headline()),
        html_escape(result.recommendation.message())
    ));

    // Scores
    html.push_str("<section class=\"scores\">\n<div>\n<h2>Score Breakdown</h2>\n");
    html.push_str(&progress_bar("Personality & Interest", result.psychometric_score));
    html.push_str(&progress_bar("Technical Aptitude", result.technical_score));

    html.push_str("<table class=\"dimensions\">\n");
    html.push_str("<thead><tr><th>Dimension</th><th>Score</th></tr></thead>\n<tbody>\n");
    for (dimension, score) in result.readiness_scores.iter() {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}%</td></tr>\n",
            dimension.label(),
            score
        ));
    }
    html.push_str("</tbody></table>\n</div>\n");

    html.push_str("<div>\n<h2>Readiness Profile</h2>\n");
    html.push_str(&RadarChart::new(&result.readiness_scores).to_svg());
    html.push_str("</div>\n</section>\n");

    // Insights
    html.push_str(&list_section("Your Strengths", "strengths", &result.strengths));
    html.push_str(&list_section(
        "Areas to Develop",
        "improvements",
        &result.improvements,
    ));
    html.push_str(&list_section(
        "Recommended Next Steps",
        "next-steps",
        &result.next_steps,
    ));

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML scorecard to a file.
pub fn write_html_report(report: &AssessmentReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --strong: #dcfce7; --conditional: #fef9c3; --poor: #fde2e2; --accent: #3b82f6; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --strong: #064e3b; --conditional: #713f12; --poor: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0 auto; padding: 2rem; max-width: 960px; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.banner { display: flex; gap: 2rem; align-items: center; padding: 1.5rem 2rem; border-radius: 8px; }
.banner h2 { margin-top: 0; }
.strong { background: var(--strong); }
.conditional { background: var(--conditional); }
.poor { background: var(--poor); }
.overall { font-size: 3rem; font-weight: bold; text-align: center; }
.overall span { display: block; font-size: 0.9rem; font-weight: normal; }
.scores { display: grid; grid-template-columns: 1fr 1fr; gap: 2rem; }
.bar { margin: 1rem 0; }
.bar-label { display: flex; justify-content: space-between; margin-bottom: 0.25rem; }
.track { background: var(--border); border-radius: 9999px; height: 0.5rem; }
.fill { background: var(--accent); border-radius: 9999px; height: 0.5rem; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;
