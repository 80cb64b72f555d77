use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of knowledge held by a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordCategory {
    Prerequisite,
    SequenceStep,
    EnvironmentConfig,
    TroubleshootingEntry,
    ReferenceTable,
    LogPattern,
}

/// One immutable entry in the knowledge store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeRecord {
    /// Composite key, `<table>/<topic>`
    pub key: String,
    pub category: RecordCategory,
    pub payload: Value,
}

impl KnowledgeRecord {
    pub fn new(key: impl Into<String>, category: RecordCategory, payload: Value) -> Self {
        Self {
            key: key.into(),
            category,
            payload,
        }
    }
}

/// Whether a lookup found the requested record or a documented substitute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Fallback,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Exact => "exact",
            MatchKind::Fallback => "fallback",
        }
    }

    /// Exact only if both parts were exact.
    pub fn and(self, other: MatchKind) -> MatchKind {
        if self == MatchKind::Exact && other == MatchKind::Exact {
            MatchKind::Exact
        } else {
            MatchKind::Fallback
        }
    }
}

/// Result of a successful tool invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum ToolResponse {
    /// Key/value payload for configuration tools
    Structured(Value),
    /// Narrative guidance for diagnostic tools
    Text(String),
}

impl ToolResponse {
    /// Render for text-only transports. Structured payloads use two-space
    /// indented JSON.
    pub fn to_text(&self) -> String {
        match self {
            ToolResponse::Structured(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            ToolResponse::Text(text) => text.clone(),
        }
    }
}

#[cfg(test)]
impl ToolResponse {
    pub fn is_empty(&self) -> bool {
        match self {
            ToolResponse::Structured(Value::Null) => true,
            ToolResponse::Structured(Value::Object(map)) => map.is_empty(),
            ToolResponse::Structured(_) => false,
            ToolResponse::Text(text) => text.trim().is_empty(),
        }
    }

    pub fn as_structured(&self) -> Option<&Value> {
        match self {
            ToolResponse::Structured(value) => Some(value),
            ToolResponse::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ToolResponse::Text(text) => Some(text),
            ToolResponse::Structured(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_match_kind_combines() {
        assert_eq!(MatchKind::Exact.and(MatchKind::Exact), MatchKind::Exact);
        assert_eq!(MatchKind::Exact.and(MatchKind::Fallback), MatchKind::Fallback);
        assert_eq!(MatchKind::Fallback.as_str(), "fallback");
    }

    #[test]
    fn test_tool_response_serialization() {
        let response = ToolResponse::Text("check JDE.LOG".to_string());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"type": "text", "content": "check JDE.LOG"})
        );

        let structured = ToolResponse::Structured(json!({"port": 7001}));
        assert_eq!(structured.to_text(), "{\n  \"port\": 7001\n}");
        assert!(!structured.is_empty());
        assert!(ToolResponse::Structured(json!({})).is_empty());
    }

    #[test]
    fn test_record_category_names() {
        assert_eq!(
            serde_json::to_value(RecordCategory::TroubleshootingEntry).unwrap(),
            json!("troubleshooting-entry")
        );
    }
}
