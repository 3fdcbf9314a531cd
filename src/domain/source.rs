use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An RSS feed registration as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_fetched_at: Option<DateTime<Utc>>,
}

impl Source {
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.url
        } else {
            &self.name
        }
    }
}

/// Body for creating a source or replacing one in full.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInput {
    pub name: String,
    pub url: String,
    pub description: String,
}

impl SourceInput {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceList {
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub sources: Vec<Source>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

/// One failed entry of a batch operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    pub error_type: String,
    pub message: String,
}

impl BatchError {
    /// Position of the failed entry in a batch create request.
    ///
    /// The backend omits a zero index, so a create error without an index
    /// or a source id refers to the first entry.
    pub fn input_index(&self) -> Option<usize> {
        match (self.index, &self.source_id) {
            (Some(index), _) => Some(index),
            (None, None) => Some(0),
            (None, Some(_)) => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchCreateResult {
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub sources: Vec<Source>,
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub errors: Vec<BatchError>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchDeleteResult {
    #[serde(default)]
    pub deleted_count: usize,
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub errors: Vec<BatchError>,
}
