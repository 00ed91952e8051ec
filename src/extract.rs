//! Output extraction: the first result an implementation reported wins.

use serde_json::Value;

use crate::types::TaggedResult;

/// Returns the output of the first result whose method starts with `prefix`.
pub fn first_output<'a>(results: &'a [TaggedResult], prefix: &str) -> Option<&'a Value> {
    results
        .iter()
        .find(|r| r.method.starts_with(prefix))
        .map(|r| &r.output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn results() -> Vec<TaggedResult> {
        serde_json::from_value(json!([
            {"method": "CPP_at", "output": false},
            {"method": "Rust_at", "output": true},
            {"method": "Rust_at_v2", "output": false}
        ]))
        .unwrap()
    }

    #[test]
    fn first_match_wins() {
        assert_eq!(first_output(&results(), "Rust_"), Some(&json!(true)));
    }

    #[test]
    fn no_match_is_none() {
        assert_eq!(first_output(&results(), "Ocaml_"), None);
        assert_eq!(first_output(&[], "Rust_"), None);
    }
}
