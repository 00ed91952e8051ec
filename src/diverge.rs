//! Divergence detection.
//!
//! Outputs are compared by exact structural equality over arbitrary JSON.
//! At-operation outputs have no fixed shape, so nothing here knows about
//! interval fields.

use serde::Serialize;
use serde_json::{Number, Value};

use crate::config::{Implementation, ImplementationSet};
use crate::types::{CaseInputs, CaseRecord};

/// A case where the two implementations disagree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DivergenceRecord {
    /// Index of the case among the aligned records of its suite.
    pub case_number: usize,
    pub operation: String,
    #[serde(flatten)]
    pub inputs: CaseInputs,
    pub output_a: Value,
    pub output_b: Value,
    pub baseline_output: Value,
    /// `<subject name>_<operation>`.
    pub method: String,
}

/// Result of comparing one aligned case.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    /// Both implementations produced the same output.
    Match,
    /// Outputs differ.
    Diverged(Box<DivergenceRecord>),
    /// At least one implementation has no output to compare.
    Missing,
}

/// Recursive equality over JSON values with no tolerance.
///
/// Objects compare as key sets regardless of key order. Numbers compare by
/// value, so `8` and `8.0` are equal while `8` and `8.5` are not.
pub fn structurally_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| structurally_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| structurally_equal(x, y)))
        }
        _ => false,
    }
}

#[allow(clippy::float_cmp)]
fn numbers_equal(a: &Number, b: &Number) -> bool {
    match (integer_value(a), integer_value(b)) {
        (Some(x), Some(y)) => x == y,
        (Some(x), None) => b.as_f64().is_some_and(|y| float_is_integer(y, x)),
        (None, Some(y)) => a.as_f64().is_some_and(|x| float_is_integer(x, y)),
        (None, None) => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
    }
}

fn integer_value(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

/// Exact comparison of a float against an integer. Casting the integer to
/// `f64` would round anything above 2^53.
#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
fn float_is_integer(float: f64, integer: i128) -> bool {
    let limit = 2f64.powi(127);
    float.fract() == 0.0 && (-limit..limit).contains(&float) && float as i128 == integer
}

/// Compares the outputs the two implementations gave for one aligned case.
pub fn compare_case<R: CaseRecord>(
    case_number: usize,
    record: &R,
    output_a: Option<&Value>,
    output_b: Option<&Value>,
    implementations: &ImplementationSet,
) -> Comparison {
    let (Some(output_a), Some(output_b)) = (output_a, output_b) else {
        return Comparison::Missing;
    };

    if structurally_equal(output_a, output_b) {
        return Comparison::Match;
    }

    let baseline_output = match implementations.baseline() {
        Implementation::A => output_a,
        Implementation::B => output_b,
    };
    let subject = implementations.tag(implementations.subject());

    Comparison::Diverged(Box::new(DivergenceRecord {
        case_number,
        operation: record.operation().to_string(),
        inputs: record.inputs(),
        output_a: output_a.clone(),
        output_b: output_b.clone(),
        baseline_output: baseline_output.clone(),
        method: format!("{}_{}", subject.name, record.operation()),
    }))
}
