//! Record splitting.
//!
//! A combined record carries results from both implementations. Splitting
//! yields one copy per implementation, each keeping only its own results.

use tracing::debug;

use crate::config::{Implementation, ImplementationSet, ImplementationTag};
use crate::types::{CaseRecord, TaggedResult};

/// Per-implementation views of one suite, index-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitSuite<R> {
    pub a: Vec<R>,
    pub b: Vec<R>,
}

fn results_for(results: &[TaggedResult], tag: &ImplementationTag) -> Vec<TaggedResult> {
    results
        .iter()
        .filter(|r| tag.claims(&r.method))
        .cloned()
        .collect()
}

/// Splits one combined record.
///
/// Returns `None` when either implementation reported nothing for the case.
pub fn split_record<R: CaseRecord>(record: &R, implementations: &ImplementationSet) -> Option<(R, R)> {
    let a = results_for(record.results(), implementations.tag(Implementation::A));
    let b = results_for(record.results(), implementations.tag(Implementation::B));

    if a.is_empty() || b.is_empty() {
        return None;
    }

    Some((record.with_results(a), record.with_results(b)))
}

/// Splits a whole suite, dropping records that cannot be compared.
///
/// Both sides are filtered from the same ordered list, so the n-th record
/// of `a` and the n-th record of `b` come from the same combined record.
pub fn split_suite<R: CaseRecord>(records: &[R], implementations: &ImplementationSet) -> SplitSuite<R> {
    let mut suite = SplitSuite {
        a: Vec::with_capacity(records.len()),
        b: Vec::with_capacity(records.len()),
    };

    for (index, record) in records.iter().enumerate() {
        if let Some((a, b)) = split_record(record, implementations) {
            suite.a.push(a);
            suite.b.push(b);
        } else {
            debug!(
                suite = R::SECTION,
                index,
                operation = record.operation(),
                "dropping record without results from both implementations"
            );
        }
    }

    suite
}
