use pincer_core::{BatchReport, ClassificationResult};
use std::collections::BTreeMap;

pub fn render_results(
    results: &[ClassificationResult],
    pretty: bool,
) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(results)
    } else {
        serde_json::to_string(results)
    }
}

pub fn category_counts(results: &[ClassificationResult]) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for result in results {
        *counts.entry(format!("{:?}", result.category)).or_default() += 1;
    }
    counts
}

pub fn print_summary(report: &BatchReport) {
    println!("\n--- classification summary ---");
    println!("accounts: {}", report.results.len());
    for (category, count) in category_counts(&report.results) {
        println!("  {}: {}", category, count);
    }
    if !report.failures.is_empty() {
        println!("failed accounts: {}", report.failures.len());
        for failure in &report.failures {
            println!("  {}: {}", failure.account_id, failure.error);
        }
    }
}

pub fn fmt_score(score: Option<f64>) -> String {
    match score {
        Some(value) => format!("{:.3}", value),
        None => "insufficient".to_string(),
    }
}
