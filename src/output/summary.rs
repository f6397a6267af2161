//! Crawl summary printing
//!
//! Renders a [`CrawlReport`] for humans once a crawl has returned.

use crate::crawler::CrawlReport;

/// Upper bound on failures listed individually
const MAX_LISTED_FAILURES: usize = 20;

/// Formats a crawl report as a multi-line summary
pub fn format_report(report: &CrawlReport) -> String {
    let mut out = String::new();

    out.push_str("=== Crawl Summary ===\n\n");
    out.push_str(&format!("Seed: {}\n", report.seed));
    out.push_str(&format!("Max depth: {}\n", report.max_depth));
    out.push_str(&format!(
        "Concurrent fetchers: {} (peak {})\n",
        report.max_concurrent_fetchers, report.peak_in_flight
    ));
    out.push_str(&format!(
        "Duration: {:.2}s\n\n",
        report.duration().num_milliseconds() as f64 / 1000.0
    ));

    out.push_str(&format!("Addresses claimed: {}\n", report.claimed()));
    out.push_str(&format!("  Succeeded: {}\n", report.succeeded()));
    out.push_str(&format!("  Failed: {}\n", report.failed()));
    if report.pending() > 0 {
        out.push_str(&format!("  Pending: {}\n", report.pending()));
    }

    if report.failed() > 0 {
        out.push_str("\nFailures:\n");
        for (address, reason) in report.failures().take(MAX_LISTED_FAILURES) {
            out.push_str(&format!("  - {}: {}\n", address, reason));
        }
        if report.failed() > MAX_LISTED_FAILURES {
            out.push_str(&format!(
                "  ... and {} more\n",
                report.failed() - MAX_LISTED_FAILURES
            ));
        }
    }

    let success_rate = if report.claimed() > 0 {
        (report.succeeded() as f64 / report.claimed() as f64) * 100.0
    } else {
        0.0
    };
    out.push_str(&format!(
        "\nSuccess Rate: {:.1}% ({} / {} addresses fetched)\n",
        success_rate,
        report.succeeded(),
        report.claimed()
    ));

    out
}

/// Prints a crawl report to stdout
pub fn print_report(report: &CrawlReport) {
    print!("{}", format_report(report));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Outcome, VisitedEntry};
    use chrono::Utc;

    fn report_with(outcomes: Vec<Outcome>) -> CrawlReport {
        let now = Utc::now();
        CrawlReport {
            seed: "https://example.com/".to_string(),
            max_depth: 2,
            entries: outcomes
                .into_iter()
                .enumerate()
                .map(|(i, outcome)| VisitedEntry {
                    address: format!("https://example.com/{:03}", i),
                    outcome,
                })
                .collect(),
            max_concurrent_fetchers: 4,
            peak_in_flight: 3,
            started_at: now,
            finished_at: now,
        }
    }

    #[test]
    fn test_format_counts() {
        let text = format_report(&report_with(vec![
            Outcome::Succeeded,
            Outcome::Succeeded,
            Outcome::Succeeded,
            Outcome::Failed("HTTP 404".to_string()),
        ]));

        assert!(text.contains("Addresses claimed: 4"));
        assert!(text.contains("Succeeded: 3"));
        assert!(text.contains("Failed: 1"));
        assert!(text.contains("https://example.com/003: HTTP 404"));
        assert!(text.contains("Success Rate: 75.0%"));
        assert!(text.contains("Concurrent fetchers: 4 (peak 3)"));
        assert!(!text.contains("Pending"));
    }

    #[test]
    fn test_failures_truncated() {
        let failures = (0..MAX_LISTED_FAILURES + 5)
            .map(|_| Outcome::Failed("boom".to_string()))
            .collect();
        let text = format_report(&report_with(failures));
        assert!(text.contains("... and 5 more"));
    }

    #[test]
    fn test_empty_report() {
        let text = format_report(&report_with(vec![]));
        assert!(text.contains("Success Rate: 0.0% (0 / 0 addresses fetched)"));
        assert!(!text.contains("Failures:"));
    }
}
