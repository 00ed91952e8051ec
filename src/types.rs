//! Common types for wi-crosscheck.
//!
//! Defines the combined results document and the two record shapes it holds.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{CrosscheckError, Result};

/// Top-level key of the binary-operation suite.
pub const BINARY_SECTION: &str = "binary_operations";
/// Top-level key of the at-operation suite.
pub const AT_SECTION: &str = "at_operations";

/// A wrapped interval value as recorded by the test generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: Number,
    pub end: Number,
    pub is_bottom: bool,
    /// Generator metadata such as `bitwidth`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Interval {
    /// Reads an interval back out of an output value, if it has that shape.
    pub fn from_output(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bottom {
            return write!(f, "⊥ (bottom)");
        }
        write!(f, "[{}, {}]", self.start, self.end)?;
        if let Some(bits) = self.extra.get("bitwidth") {
            write!(f, " ({bits}bit)")?;
        }
        Ok(())
    }
}

impl From<&Interval> for Value {
    fn from(interval: &Interval) -> Self {
        let mut map = Map::new();
        map.insert("start".to_string(), Self::Number(interval.start.clone()));
        map.insert("end".to_string(), Self::Number(interval.end.clone()));
        map.insert("is_bottom".to_string(), Self::Bool(interval.is_bottom));
        for (key, value) in &interval.extra {
            map.insert(key.clone(), value.clone());
        }
        Self::Object(map)
    }
}

/// One implementation's answer for a test case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedResult {
    /// Method name; its prefix identifies the implementation.
    pub method: String,
    pub output: Value,
    /// Timing and other per-result metadata.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Binary-operation test case: two intervals in, one interval out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryCase {
    pub operation: String,
    pub input_a: Interval,
    pub input_b: Interval,
    pub results: Vec<TaggedResult>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// At-operation test case: one interval and one scalar in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtCase {
    pub operation: String,
    pub input_interval: Interval,
    pub input_value: Value,
    pub results: Vec<TaggedResult>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The inputs of a case, as they appear in a divergence record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CaseInputs {
    Binary { input_a: Value, input_b: Value },
    At { input_interval: Value, input_value: Value },
}

/// Behaviour shared by the record shapes of every suite.
pub trait CaseRecord: Clone {
    /// Top-level key of the suite this record belongs to.
    const SECTION: &'static str;

    fn operation(&self) -> &str;

    fn results(&self) -> &[TaggedResult];

    /// Copy of this record carrying `results` instead of its own.
    #[must_use]
    fn with_results(&self, results: Vec<TaggedResult>) -> Self;

    /// Whether both records describe the same operation on the same inputs.
    fn same_case(&self, other: &Self) -> bool;

    fn inputs(&self) -> CaseInputs;
}

impl CaseRecord for BinaryCase {
    const SECTION: &'static str = BINARY_SECTION;

    fn operation(&self) -> &str {
        &self.operation
    }

    fn results(&self) -> &[TaggedResult] {
        &self.results
    }

    fn with_results(&self, results: Vec<TaggedResult>) -> Self {
        Self {
            operation: self.operation.clone(),
            input_a: self.input_a.clone(),
            input_b: self.input_b.clone(),
            results,
            extra: self.extra.clone(),
        }
    }

    fn same_case(&self, other: &Self) -> bool {
        self.operation == other.operation
            && self.input_a == other.input_a
            && self.input_b == other.input_b
    }

    fn inputs(&self) -> CaseInputs {
        CaseInputs::Binary {
            input_a: Value::from(&self.input_a),
            input_b: Value::from(&self.input_b),
        }
    }
}

impl CaseRecord for AtCase {
    const SECTION: &'static str = AT_SECTION;

    fn operation(&self) -> &str {
        &self.operation
    }

    fn results(&self) -> &[TaggedResult] {
        &self.results
    }

    fn with_results(&self, results: Vec<TaggedResult>) -> Self {
        Self {
            operation: self.operation.clone(),
            input_interval: self.input_interval.clone(),
            input_value: self.input_value.clone(),
            results,
            extra: self.extra.clone(),
        }
    }

    fn same_case(&self, other: &Self) -> bool {
        self.operation == other.operation
            && self.input_interval == other.input_interval
            && self.input_value == other.input_value
    }

    fn inputs(&self) -> CaseInputs {
        CaseInputs::At {
            input_interval: Value::from(&self.input_interval),
            input_value: self.input_value.clone(),
        }
    }
}

/// The combined results document produced by the test harness.
#[derive(Debug, Clone)]
pub struct ResultsDocument {
    pub binary_operations: Vec<BinaryCase>,
    pub at_operations: Vec<AtCase>,
}

/// Parses a combined results document.
///
/// Both suite sections are required; any other top-level keys are ignored.
pub fn load_results_document(content: &str) -> Result<ResultsDocument> {
    let root: Value = serde_json::from_str(content).map_err(CrosscheckError::InvalidJson)?;

    Ok(ResultsDocument {
        binary_operations: take_section(&root, BINARY_SECTION)?,
        at_operations: take_section(&root, AT_SECTION)?,
    })
}

fn take_section<T>(root: &Value, section: &'static str) -> Result<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
{
    let raw = root
        .get(section)
        .ok_or(CrosscheckError::MissingSection(section))?;

    Vec::<T>::deserialize(raw).map_err(|source| CrosscheckError::InvalidRecord { section, source })
}
