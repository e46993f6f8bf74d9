use serde::Serialize;
use serde_json::Value;

/// One opaque item from the source collection
pub type Record = Value;

/// Wire body of a single webhook POST
#[derive(Debug, Serialize)]
pub struct BatchPayload<'a> {
    pub batch_number: usize,
    pub items: &'a [Record],
}

/// Outcome of a successful webhook POST
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushedBatch {
    pub batch_number: usize,
    pub item_count: usize,
    pub body_bytes: usize,
}

/// A batch as planned by the chunker, before any push
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedBatch {
    pub batch_number: usize,
    pub item_count: usize,
    pub list_bytes: usize,
}

/// Result of one relay run
#[derive(Debug, Clone, Default)]
pub struct RelaySummary {
    pub records_fetched: usize,
    pub planned: Vec<PlannedBatch>,
    pub pushed: Vec<PushedBatch>,
    pub dry_run: bool,
}

impl RelaySummary {
    pub fn items_pushed(&self) -> usize {
        self.pushed.iter().map(|b| b.item_count).sum()
    }
}

/// Human name of a JSON value's top-level type
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_batch_payload_wire_shape() {
        let items = vec![json!({"a": 1}), json!("x")];
        let payload = BatchPayload {
            batch_number: 3,
            items: &items,
        };
        let body = serde_json::to_string(&payload).unwrap();
        assert_eq!(body, r#"{"batch_number":3,"items":[{"a":1},"x"]}"#);
    }

    #[test]
    fn test_json_type_name() {
        assert_eq!(json_type_name(&json!({})), "object");
        assert_eq!(json_type_name(&json!([])), "array");
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(json_type_name(&json!(1.5)), "number");
    }

    #[test]
    fn test_items_pushed_sums_batches() {
        let summary = RelaySummary {
            pushed: vec![
                PushedBatch {
                    batch_number: 1,
                    item_count: 2,
                    body_bytes: 10,
                },
                PushedBatch {
                    batch_number: 2,
                    item_count: 5,
                    body_bytes: 20,
                },
            ],
            ..Default::default()
        };
        assert_eq!(summary.items_pushed(), 7);
    }
}
