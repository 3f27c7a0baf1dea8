//! Values returned by a session.

use serde::Serialize;

use crate::labels::LabelEntry;

/// Description of an identified content type.
///
/// Owned entirely by the caller; holds no reference back to the session
/// that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeInfo {
    label: String,
    mime_type: String,
    group: String,
    description: String,
    extensions: Vec<String>,
    is_text: bool,
}

impl TypeInfo {
    pub(crate) fn from_entry(entry: &LabelEntry) -> Self {
        Self {
            label: entry.label.to_string(),
            mime_type: entry.mime_type.to_string(),
            group: entry.group.to_string(),
            description: entry.description.to_string(),
            extensions: entry.extensions.iter().map(|e| e.to_string()).collect(),
            is_text: entry.is_text,
        }
    }

    /// Stable identifier such as `"png"`.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Associated extensions without the dot, canonical first.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn is_text(&self) -> bool {
        self.is_text
    }
}

/// A [`TypeInfo`] together with how the classifier arrived at it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// Reported type.
    pub info: TypeInfo,
    /// Probability of the model's top label; `1.0` when the model was not consulted.
    pub score: f32,
    /// Raw model label, `None` when the model was not consulted.
    pub model_label: Option<String>,
    /// Whether the low-confidence fallback replaced the model label.
    pub overwritten: bool,
}

impl Classification {
    pub fn into_info(self) -> TypeInfo {
        self.info
    }
}
