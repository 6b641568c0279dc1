//! Normalization of loosely-typed values (e.g. decoded YAML/JSON test
//! parameters) into lists of strings.

use serde_json::Value;

/// A value classified by shape at the point it enters the harness.
#[derive(Debug, Clone, PartialEq)]
pub enum LooseValue {
    /// No value.
    Absent,
    /// A list whose elements are all strings.
    Strings(Vec<String>),
    /// A list with at least one non-string element.
    Mixed(Vec<Value>),
    /// Any single non-list value.
    Scalar(Value),
}

impl From<Value> for LooseValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::Array(items) if items.iter().all(Value::is_string) => Self::Strings(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            Value::Array(items) => Self::Mixed(items),
            other => Self::Scalar(other),
        }
    }
}

impl From<Option<Value>> for LooseValue {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Self::Absent, Self::from)
    }
}

impl LooseValue {
    /// Stringify element-wise. `Absent` yields an empty list.
    #[must_use]
    pub fn into_strings(self) -> Vec<String> {
        match self {
            Self::Absent => Vec::new(),
            Self::Strings(items) => items,
            Self::Mixed(items) => items.iter().map(render).collect(),
            Self::Scalar(value) => vec![render(&value)],
        }
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::Null => "<nil>".to_owned(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
