use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Content;

/// A scored content suggestion. Scoring happens on the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub content: Content,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommend_for: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationList {
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub count: usize,
}

/// Body for `POST /recommendations/feedback`. Ratings run from 1 to 5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackInput {
    pub content_id: String,
    pub user_id: String,
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: String,
    pub content_id: String,
    pub user_id: String,
    pub rating: u8,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackList {
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub feedback: Vec<Feedback>,
    #[serde(default)]
    pub count: usize,
}
