//! Aggregation and the comparison report.
//!
//! Each suite runs split -> align -> compare on its own and hands back a
//! [`SuiteOutcome`]; the report is derived from the two outcomes.

#![allow(clippy::cast_precision_loss)]

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::align::{compare_aligned, SuiteOutcome};
use crate::config::ImplementationSet;
use crate::diverge::DivergenceRecord;
use crate::split::split_suite;
use crate::types::{CaseRecord, ResultsDocument};

/// Percentage of compared cases that agreed, or `None` if nothing was compared.
#[must_use]
pub fn success_rate(total_cases: usize, differences: usize) -> Option<f64> {
    if total_cases == 0 {
        return None;
    }
    let agreed = total_cases.saturating_sub(differences);
    Some(agreed as f64 / total_cases as f64 * 100.0)
}

/// Per-suite counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuiteSummary {
    pub total_cases: usize,
    pub differences: usize,
    /// `null` when the suite had no comparable cases.
    pub success_rate: Option<f64>,
}

impl From<&SuiteOutcome> for SuiteSummary {
    fn from(outcome: &SuiteOutcome) -> Self {
        Self {
            total_cases: outcome.total_cases,
            differences: outcome.differences(),
            success_rate: success_rate(outcome.total_cases, outcome.differences()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub binary_operations: SuiteSummary,
    pub at_operations: SuiteSummary,
}

/// The document written at the end of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub summary: Summary,
    pub binary_differences: Vec<DivergenceRecord>,
    pub at_differences: Vec<DivergenceRecord>,
}

/// Outcomes of both suites of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOutcome {
    pub binary: SuiteOutcome,
    pub at: SuiteOutcome,
}

impl RunOutcome {
    pub fn has_divergences(&self) -> bool {
        self.binary.differences() > 0 || self.at.differences() > 0
    }

    pub fn report(&self) -> ComparisonReport {
        ComparisonReport {
            summary: Summary {
                binary_operations: SuiteSummary::from(&self.binary),
                at_operations: SuiteSummary::from(&self.at),
            },
            binary_differences: self.binary.divergences.clone(),
            at_differences: self.at.divergences.clone(),
        }
    }
}

/// Runs the whole pipeline over one suite.
pub fn run_suite<R: CaseRecord>(records: &[R], implementations: &ImplementationSet) -> SuiteOutcome {
    let split = split_suite(records, implementations);
    let outcome = compare_aligned(&split.a, &split.b, implementations);

    if outcome.skipped() > 0 {
        warn!(
            suite = R::SECTION,
            mismatched = outcome.mismatched.len(),
            missing = outcome.missing.len(),
            "{} aligned case(s) skipped",
            outcome.skipped()
        );
    }
    debug!(
        suite = R::SECTION,
        records = records.len(),
        split = split.a.len(),
        compared = outcome.total_cases,
        differences = outcome.differences(),
        "suite compared"
    );
    outcome
}

/// Compares both suites of a results document.
pub fn run_comparison(document: &ResultsDocument, implementations: &ImplementationSet) -> RunOutcome {
    RunOutcome {
        binary: run_suite(&document.binary_operations, implementations),
        at: run_suite(&document.at_operations, implementations),
    }
}

/// Serializes a report as pretty JSON.
pub fn report_json(report: &ComparisonReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Writes the report so that `path` either holds the complete document or
/// is left untouched.
pub fn write_report(report: &ComparisonReport, path: &Path) -> anyhow::Result<()> {
    let json = report_json(report)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    file.persist(path)?;
    Ok(())
}
