//! JSONPath field extraction from exported objects

use crate::error::{GatherError, Result};
use serde_json::Value;
use tracing::debug;

/// All values matched by a JSONPath expression
pub fn select<'a>(value: &'a Value, path: &str) -> Result<Vec<&'a Value>> {
    jsonpath_lib::select(value, path).map_err(|e| GatherError::Query {
        query: path.to_string(),
        message: format!("{e:?}"),
    })
}

/// First scalar matched by a JSONPath expression, rendered as a string
///
/// Missing fields, `null` and non-scalar matches yield `None`.
pub fn select_str(value: &Value, path: &str) -> Option<String> {
    let matches = match select(value, path) {
        Ok(m) => m,
        Err(e) => {
            debug!("{e}");
            return None;
        }
    };

    match matches.first()? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// `metadata.name` of an object
pub fn name_of(value: &Value) -> Option<String> {
    select_str(value, "$.metadata.name")
}

/// `metadata.namespace` of an object
pub fn namespace_of(value: &Value) -> Option<String> {
    select_str(value, "$.metadata.namespace")
}

/// Value of a label, keys may contain dots and slashes
pub fn label_of(value: &Value, key: &str) -> Option<String> {
    select_str(value, &format!("$.metadata.labels['{key}']"))
}
