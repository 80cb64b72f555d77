//! Error taxonomy for knowledge base lookups.

use serde::{Deserialize, Serialize};

/// Result type for tool, resource and prompt lookups.
pub type KbResult<T> = Result<T, KbError>;

/// Every way a lookup can be rejected.
///
/// All variants are local validation failures raised before the knowledge
/// store is consulted. None of them leave shared state behind, so callers may
/// report them and carry on serving.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KbError {
    /// The tool name is not part of the catalog.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The resource URI is not one of the published documents.
    #[error("Resource not found: {0}")]
    UnknownResource(String),

    /// The prompt name is not one of the published templates.
    #[error("Unknown prompt: {0}")]
    UnknownPrompt(String),

    /// A required argument was absent or empty.
    #[error("Missing required argument '{field}'")]
    MissingArgument { field: String },

    /// An argument value fell outside its declared domain or had the wrong type.
    #[error("Invalid value '{value}' for argument '{field}'{}", describe_allowed(.allowed))]
    InvalidArgument {
        field: String,
        value: String,
        allowed: Vec<String>,
    },
}

fn describe_allowed(allowed: &[String]) -> String {
    if allowed.is_empty() {
        String::new()
    } else {
        format!(" (expected one of: {})", allowed.join(", "))
    }
}

impl KbError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingArgument {
            field: field.into(),
        }
    }

    pub fn invalid<I, S>(field: impl Into<String>, value: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::InvalidArgument {
            field: field.into(),
            value: value.into(),
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    /// Stable machine-readable classification.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownTool(_) => "unknown_tool",
            Self::UnknownResource(_) => "unknown_resource",
            Self::UnknownPrompt(_) => "unknown_prompt",
            Self::MissingArgument { .. } => "missing_argument",
            Self::InvalidArgument { .. } => "invalid_argument",
        }
    }

    /// The offending argument, for argument errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingArgument { field } | Self::InvalidArgument { field, .. } => Some(field),
            _ => None,
        }
    }

    /// True for errors caused by the argument mapping rather than the name.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Self::MissingArgument { .. } | Self::InvalidArgument { .. }
        )
    }

    pub fn detail(&self) -> ErrorDetail {
        let (field, value, allowed) = match self {
            Self::UnknownTool(name) | Self::UnknownPrompt(name) | Self::UnknownResource(name) => {
                (None, Some(name.clone()), None)
            }
            Self::MissingArgument { field } => (Some(field.clone()), None, None),
            Self::InvalidArgument {
                field,
                value,
                allowed,
            } => (
                Some(field.clone()),
                Some(value.clone()),
                Some(allowed.clone()).filter(|a| !a.is_empty()),
            ),
        };

        ErrorDetail {
            kind: self.kind().to_string(),
            message: self.to_string(),
            field,
            value,
            allowed,
        }
    }
}

/// Serializable view of a [`KbError`], attached to protocol and HTTP errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<String>>,
}
