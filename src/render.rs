//! Human-readable console output.
//!
//! Views over a [`ComparisonReport`] that implement `Display`, so callers
//! print them directly.

use std::fmt;

use colored::Colorize;
use serde_json::Value;

use crate::config::{Implementation, ImplementationSet};
use crate::diverge::DivergenceRecord;
use crate::report::{ComparisonReport, SuiteSummary};
use crate::types::{CaseInputs, Interval};

/// Formats an output or input value, showing intervals in bracket form.
pub fn display_value(value: &Value) -> String {
    Interval::from_output(value).map_or_else(|| value.to_string(), |interval| interval.to_string())
}

fn format_rate(rate: Option<f64>) -> String {
    rate.map_or_else(|| "N/A".to_string(), |r| format!("{r:.1}%"))
}

fn write_suite(f: &mut fmt::Formatter<'_>, title: &str, summary: &SuiteSummary) -> fmt::Result {
    let differences = if summary.differences == 0 {
        summary.differences.to_string().green()
    } else {
        summary.differences.to_string().red()
    };

    writeln!(f, "{}", title.bold())?;
    writeln!(f, "  Total cases: {}", summary.total_cases)?;
    writeln!(f, "  Differences: {differences}")?;
    writeln!(f, "  Success rate: {}", format_rate(summary.success_rate))
}

/// Per-suite counts and an overall verdict.
pub struct SummaryView<'a>(pub &'a ComparisonReport);

impl fmt::Display for SummaryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = &self.0.summary;
        let rule = "=".repeat(60);

        writeln!(f, "{}", "=== Comparison Results ===".bold())?;
        write_suite(f, "Binary Operations:", &summary.binary_operations)?;
        writeln!(f)?;
        write_suite(f, "At Operations:", &summary.at_operations)?;
        writeln!(f)?;

        let failed = summary.binary_operations.differences + summary.at_operations.differences;
        writeln!(f, "{rule}")?;
        if failed == 0 {
            writeln!(f, "  {} implementations agree", "PASS".green())?;
        } else {
            writeln!(
                f,
                "  {} {} divergent case(s)",
                "FAIL".red(),
                failed.to_string().red()
            )?;
        }
        writeln!(f, "{rule}")
    }
}

fn write_divergence(
    f: &mut fmt::Formatter<'_>,
    record: &DivergenceRecord,
    implementations: &ImplementationSet,
) -> fmt::Result {
    let name_a = &implementations.tag(Implementation::A).name;
    let name_b = &implementations.tag(Implementation::B).name;
    let width = name_a.len().max(name_b.len()) + 1;

    writeln!(f, "Case {}: {}", record.case_number, record.operation.bold())?;
    match &record.inputs {
        CaseInputs::Binary { input_a, input_b } => {
            writeln!(f, "  Input A: {}", display_value(input_a))?;
            writeln!(f, "  Input B: {}", display_value(input_b))?;
        }
        CaseInputs::At {
            input_interval,
            input_value,
        } => {
            writeln!(f, "  Interval: {}", display_value(input_interval))?;
            writeln!(f, "  Value: {input_value}")?;
        }
    }
    writeln!(
        f,
        "  {:<width$} {}",
        format!("{name_a}:"),
        display_value(&record.output_a).red()
    )?;
    writeln!(
        f,
        "  {:<width$} {}",
        format!("{name_b}:"),
        display_value(&record.output_b).red()
    )
}

fn write_suite_details(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    divergences: &[DivergenceRecord],
    limit: usize,
    implementations: &ImplementationSet,
) -> fmt::Result {
    if divergences.is_empty() {
        return Ok(());
    }

    writeln!(f, "{}", title.bold())?;
    for record in divergences.iter().take(limit) {
        write_divergence(f, record, implementations)?;
        writeln!(f)?;
    }
    if divergences.len() > limit {
        let more = format!("... {} more", divergences.len() - limit);
        writeln!(f, "  {}", more.dimmed())?;
    }
    Ok(())
}

/// Up to `limit` divergences per suite; empty when nothing diverged.
pub struct DetailsView<'a> {
    pub report: &'a ComparisonReport,
    pub limit: usize,
    pub implementations: &'a ImplementationSet,
}

impl DetailsView<'_> {
    pub fn is_empty(&self) -> bool {
        self.report.binary_differences.is_empty() && self.report.at_differences.is_empty()
    }
}

impl fmt::Display for DetailsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_suite_details(
            f,
            "=== Binary Operation Differences ===",
            &self.report.binary_differences,
            self.limit,
            self.implementations,
        )?;
        write_suite_details(
            f,
            "=== At Operation Differences ===",
            &self.report.at_differences,
            self.limit,
            self.implementations,
        )
    }
}
