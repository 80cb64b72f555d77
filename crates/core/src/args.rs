// Boundary validation for loosely typed argument mappings

use crate::domain::Domain;
use crate::error::{KbError, KbResult};
use serde_json::{Map, Value};

/// Argument mapping as it arrives from a transport.
///
/// Missing keys and JSON `null` are treated the same. Text values are trimmed
/// and an empty string counts as absent.
#[derive(Debug, Clone, Default)]
pub struct Arguments {
    values: Map<String, Value>,
}

impl Arguments {
    pub fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Accept a JSON object, or `null` for an empty mapping.
    pub fn from_value(value: &Value) -> KbResult<Self> {
        match value {
            Value::Object(map) => Ok(Self::new(map.clone())),
            Value::Null => Ok(Self::default()),
            other => Err(KbError::invalid(
                "arguments",
                other.to_string(),
                Vec::<String>::new(),
            )),
        }
    }

    /// Optional free-text argument.
    pub fn text(&self, field: &str) -> KbResult<Option<&str>> {
        match self.values.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => {
                let s = s.trim();
                Ok((!s.is_empty()).then_some(s))
            }
            Some(other) => Err(KbError::invalid(
                field,
                other.to_string(),
                Vec::<String>::new(),
            )),
        }
    }

    /// Required free-text argument.
    pub fn require_text(&self, field: &str) -> KbResult<&str> {
        self.text(field)?.ok_or_else(|| KbError::missing(field))
    }

    /// Optional enumerated argument.
    pub fn choice<T: Domain>(&self, field: &str) -> KbResult<Option<T>> {
        let Some(raw) = self.raw_choice::<T>(field)? else {
            return Ok(None);
        };

        T::parse_lenient(raw)
            .map(Some)
            .ok_or_else(|| KbError::invalid(field, raw, T::values()))
    }

    /// Required enumerated argument.
    pub fn require_choice<T: Domain>(&self, field: &str) -> KbResult<T> {
        self.choice(field)?.ok_or_else(|| KbError::missing(field))
    }

    /// Enumerated argument with a declared default.
    pub fn choice_or<T: Domain>(&self, field: &str, default: T) -> KbResult<T> {
        Ok(self.choice(field)?.unwrap_or(default))
    }

    /// Required list of strings. An empty list is accepted.
    pub fn require_list(&self, field: &str) -> KbResult<Vec<String>> {
        match self.values.get(field) {
            None | Some(Value::Null) => Err(KbError::missing(field)),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.trim().to_string()),
                    other => Err(KbError::invalid(
                        field,
                        other.to_string(),
                        Vec::<String>::new(),
                    )),
                })
                .collect(),
            Some(other) => Err(KbError::invalid(
                field,
                other.to_string(),
                Vec::<String>::new(),
            )),
        }
    }

    /// Boolean-like switch: `true/false`, `yes/no`, `on/off`, `1/0`.
    ///
    /// JSON booleans are accepted as well, since prompt arguments are
    /// usually strings but HTTP callers may send real booleans.
    pub fn flag(&self, field: &str, default: bool) -> KbResult<bool> {
        let raw = match self.values.get(field) {
            None | Some(Value::Null) => return Ok(default),
            Some(Value::Bool(b)) => return Ok(*b),
            Some(Value::String(s)) => s.trim(),
            Some(other) => return Err(KbError::invalid(field, other.to_string(), FLAG_VALUES)),
        };

        match raw.to_ascii_lowercase().as_str() {
            "" => Ok(default),
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(KbError::invalid(field, raw, FLAG_VALUES)),
        }
    }

    fn raw_choice<T: Domain>(&self, field: &str) -> KbResult<Option<&str>> {
        match self.values.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(KbError::invalid(field, other.to_string(), T::values())),
        }
    }
}

const FLAG_VALUES: [&str; 8] = ["true", "false", "yes", "no", "on", "off", "1", "0"];

#[cfg(test)]
impl Arguments {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
        )
    }
}
