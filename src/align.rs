//! Case alignment.
//!
//! Records are paired by position. This is only sound because both sides
//! are stable filters of the same ordered list (see [`crate::split`]); any
//! reordering of either side silently breaks the pairing, which is why each
//! pair's identity is re-checked before its outputs are compared.

use tracing::warn;

use crate::config::{Implementation, ImplementationSet};
use crate::diverge::{compare_case, Comparison, DivergenceRecord};
use crate::extract::first_output;
use crate::types::CaseRecord;

/// Accumulated comparison results for one suite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuiteOutcome {
    /// Aligned cases whose outputs were actually compared.
    pub total_cases: usize,
    pub divergences: Vec<DivergenceRecord>,
    /// Indices skipped because the two records describe different cases.
    pub mismatched: Vec<usize>,
    /// Indices skipped because an output was missing.
    pub missing: Vec<usize>,
}

impl SuiteOutcome {
    pub fn differences(&self) -> usize {
        self.divergences.len()
    }

    pub fn skipped(&self) -> usize {
        self.mismatched.len() + self.missing.len()
    }
}

/// Compares two index-aligned record collections.
pub fn compare_aligned<R: CaseRecord>(
    side_a: &[R],
    side_b: &[R],
    implementations: &ImplementationSet,
) -> SuiteOutcome {
    if side_a.len() != side_b.len() {
        warn!(
            suite = R::SECTION,
            a = side_a.len(),
            b = side_b.len(),
            "record collections differ in length; comparing common prefix only"
        );
    }

    let prefix_a = implementations.prefix(Implementation::A);
    let prefix_b = implementations.prefix(Implementation::B);
    let mut outcome = SuiteOutcome::default();

    for (index, (a, b)) in side_a.iter().zip(side_b).enumerate() {
        if !a.same_case(b) {
            warn!(suite = R::SECTION, index, "Mismatched test case at index {index}");
            outcome.mismatched.push(index);
            continue;
        }

        let output_a = first_output(a.results(), prefix_a);
        let output_b = first_output(b.results(), prefix_b);

        match compare_case(index, a, output_a, output_b, implementations) {
            Comparison::Match => outcome.total_cases += 1,
            Comparison::Diverged(record) => {
                outcome.total_cases += 1;
                outcome.divergences.push(*record);
            }
            Comparison::Missing => {
                warn!(suite = R::SECTION, index, "Missing output for case {index}");
                outcome.missing.push(index);
            }
        }
    }

    outcome
}
