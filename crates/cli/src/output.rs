//! Output formatting for CLI

use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use cachetest_harness::compare::ReportEntry;
use cachetest_harness::{Classification, Comparison, RunSummary};

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
}

#[derive(Serialize)]
struct RunDisplay {
    total: usize,
    passed: usize,
    failed: usize,
    harness_errors: usize,
    duration_ms: u64,
}

#[derive(Serialize)]
struct EntryDisplay<'a> {
    id: &'a str,
    class: Classification,
    optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl<'a> From<&'a ReportEntry> for EntryDisplay<'a> {
    fn from(entry: &'a ReportEntry) -> Self {
        Self {
            id: &entry.id,
            class: entry.class,
            optional: entry.optional,
            detail: entry.detail.as_ref().map(|d| d.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ComparisonDisplay<'a> {
    regressions: usize,
    advisory_regressions: usize,
    counts: cachetest_harness::compare::ClassCounts,
    entries: Vec<EntryDisplay<'a>>,
}

fn table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Print the totals of a run
pub fn print_run_summary(summary: &RunSummary, format: OutputFormat) {
    let display = RunDisplay {
        total: summary.total,
        passed: summary.passed,
        failed: summary.failed,
        harness_errors: summary.harness_errors,
        duration_ms: summary.duration_ms,
    };

    match format {
        OutputFormat::Table => {
            let mut table = table();
            table.set_header(vec!["Total", "Passed", "Failed", "Harness errors", "Duration"]);
            table.add_row(vec![
                display.total.to_string(),
                display.passed.to_string(),
                display.failed.to_string(),
                display.harness_errors.to_string(),
                format!("{}ms", display.duration_ms),
            ]);
            println!("{table}");
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&display).unwrap_or_default());
        }
    }
}

/// Print a baseline comparison: its entries, then the totals per class
pub fn print_comparison(comparison: &Comparison, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            println!("\n===== RESULTS\n");
            comparison.log();
            println!("\n=====\n");

            let mut table = table();
            table.set_header(vec!["Classification", "Tests"]);
            for class in Classification::ALL {
                table.add_row(vec![
                    class.label().to_string(),
                    comparison.counts.get(class).to_string(),
                ]);
            }
            println!("{table}");

            if comparison.advisory_regressions > 0 {
                print_warning(&format!(
                    "{} optional test(s) regressed without failing the run",
                    comparison.advisory_regressions
                ));
            }
        }
        OutputFormat::Json => {
            let display = ComparisonDisplay {
                regressions: comparison.regressions,
                advisory_regressions: comparison.advisory_regressions,
                counts: comparison.counts,
                entries: comparison.entries.iter().map(EntryDisplay::from).collect(),
            };
            println!("{}", serde_json::to_string_pretty(&display).unwrap_or_default());
        }
    }
}

/// Print success message
pub fn print_success(message: &str) {
    println!("{} {}", "✅".green(), message.green());
}

/// Print error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "❌".red(), message.red().bold());
}

/// Print warning message
pub fn print_warning(message: &str) {
    println!("{}  {}", "⚠️".yellow(), message.yellow());
}
