//! Query and body objects for the API client, with their documented defaults.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Page size used by [`list_contents_by_source`](super::ApiClient::list_contents_by_source)
/// when the caller gives none.
pub const DEFAULT_SOURCE_CONTENTS_LIMIT: u32 = 10;

/// Look-back window, in days, for ingestion requests.
pub const DEFAULT_FETCH_DAYS: u32 = 30;

/// Filter bag for `GET /contents`. Unset fields are left off the query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SourceContentsQuery {
    pub source_id: String,
    pub limit: u32,
}

/// Query for `GET /contents/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub keywords: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl SearchQuery {
    pub fn new(keywords: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            source_id: None,
            limit: None,
        }
    }
}

/// Body for `POST /contents/fetch`.
///
/// Without a source the backend ingests every registered source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    pub days: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            source_id: None,
            days: DEFAULT_FETCH_DAYS,
        }
    }
}

impl FetchOptions {
    pub fn for_source(source_id: impl Into<String>) -> Self {
        Self {
            source_id: Some(source_id.into()),
            ..Self::default()
        }
    }
}

/// Query for `GET /recommendations`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationQuery {
    pub user_id: Option<String>,
    pub source_ids: Vec<String>,
    pub limit: Option<u32>,
}

impl RecommendationQuery {
    /// `sourceIds` repeats once per id, which a struct cannot express
    /// through form encoding.
    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(user_id) = &self.user_id {
            pairs.push(("userId", user_id.clone()));
        }
        for id in &self.source_ids {
            pairs.push(("sourceIds", id.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SourcesBatch<'a, S> {
    pub sources: &'a [S],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SourceIds<'a> {
    pub source_ids: &'a [String],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContentIds<'a> {
    pub content_ids: &'a [String],
}
