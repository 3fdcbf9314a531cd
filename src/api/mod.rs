//! REST client for the riffle backend.
//!
//! Every operation issues exactly one request and hands back the raw
//! [`ApiResponse`]. Nothing is retried, paginated or cached; a non-2xx
//! status comes back as [`RiffleError::Status`] with the body intact.

pub mod params;
pub mod response;

pub use params::{
    ContentQuery, FetchOptions, RecommendationQuery, SearchQuery, DEFAULT_FETCH_DAYS,
    DEFAULT_SOURCE_CONTENTS_LIMIT,
};
pub use response::ApiResponse;

use std::fmt::Display;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use url::Url;

use crate::app::{Result, RiffleError};
use crate::config::ApiConfig;

use self::params::{ContentIds, SourceContentsQuery, SourceIds, SourcesBatch};

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(RiffleError::InvalidBaseUrl(config.base_url.clone()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        // No cookie store and no auth header: requests carry no credentials.
        let client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("riffle-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL with `segments` appended, each percent-encoded on its own.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RiffleError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%method, %url, "sending request");
        Ok(self.client.request(method, url))
    }

    async fn send(&self, request: RequestBuilder) -> Result<ApiResponse> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().clone();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        if !status.is_success() {
            tracing::warn!(%status, %url, "request rejected");
            return Err(RiffleError::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        tracing::debug!(%status, %url, bytes = body.len(), "response received");
        Ok(ApiResponse::new(status, headers, body))
    }

    // Sources

    pub async fn list_sources(&self) -> Result<ApiResponse> {
        self.send(self.request(Method::GET, &["sources"])?).await
    }

    pub async fn get_source(&self, id: impl Display) -> Result<ApiResponse> {
        let id = id.to_string();
        self.send(self.request(Method::GET, &["sources", &id])?).await
    }

    pub async fn create_source<S: Serialize + ?Sized>(&self, source: &S) -> Result<ApiResponse> {
        self.send(self.request(Method::POST, &["sources"])?.json(source))
            .await
    }

    /// `POST /sources/batch` with the body `{"sources": [...]}`.
    pub async fn batch_create_sources<S: Serialize>(&self, sources: &[S]) -> Result<ApiResponse> {
        let body = SourcesBatch { sources };
        self.send(self.request(Method::POST, &["sources", "batch"])?.json(&body))
            .await
    }

    /// Replace a source in full.
    pub async fn update_source<S: Serialize + ?Sized>(
        &self,
        id: impl Display,
        source: &S,
    ) -> Result<ApiResponse> {
        let id = id.to_string();
        self.send(self.request(Method::PUT, &["sources", &id])?.json(source))
            .await
    }

    pub async fn delete_source(&self, id: impl Display) -> Result<ApiResponse> {
        let id = id.to_string();
        self.send(self.request(Method::DELETE, &["sources", &id])?)
            .await
    }

    /// `DELETE /sources/batch` with the body `{"sourceIds": [...]}`.
    pub async fn batch_delete_sources(&self, ids: &[String]) -> Result<ApiResponse> {
        let body = SourceIds { source_ids: ids };
        self.send(self.request(Method::DELETE, &["sources", "batch"])?.json(&body))
            .await
    }

    // Contents

    /// `GET /contents` with `params` passed through as the query string.
    pub async fn list_contents<Q: Serialize + ?Sized>(&self, params: &Q) -> Result<ApiResponse> {
        self.send(self.request(Method::GET, &["contents"])?.query(params))
            .await
    }

    pub async fn get_content(&self, id: impl Display) -> Result<ApiResponse> {
        let id = id.to_string();
        self.send(self.request(Method::GET, &["contents", &id])?)
            .await
    }

    /// Contents of one source, [`DEFAULT_SOURCE_CONTENTS_LIMIT`] at a time
    /// unless `limit` says otherwise.
    pub async fn list_contents_by_source(
        &self,
        source_id: impl Display,
        limit: Option<u32>,
    ) -> Result<ApiResponse> {
        let query = SourceContentsQuery {
            source_id: source_id.to_string(),
            limit: limit.unwrap_or(DEFAULT_SOURCE_CONTENTS_LIMIT),
        };
        self.list_contents(&query).await
    }

    pub async fn update_content<S: Serialize + ?Sized>(
        &self,
        id: impl Display,
        content: &S,
    ) -> Result<ApiResponse> {
        let id = id.to_string();
        self.send(self.request(Method::PUT, &["contents", &id])?.json(content))
            .await
    }

    pub async fn delete_content(&self, id: impl Display) -> Result<ApiResponse> {
        let id = id.to_string();
        self.send(self.request(Method::DELETE, &["contents", &id])?)
            .await
    }

    /// `DELETE /contents/batch` with the body `{"contentIds": [...]}`.
    pub async fn batch_delete_contents(&self, ids: &[String]) -> Result<ApiResponse> {
        let body = ContentIds { content_ids: ids };
        self.send(self.request(Method::DELETE, &["contents", "batch"])?.json(&body))
            .await
    }

    pub async fn search_contents(&self, query: &SearchQuery) -> Result<ApiResponse> {
        self.send(self.request(Method::GET, &["contents", "search"])?.query(query))
            .await
    }

    // Ingestion

    /// Ask the backend to ingest every source over the default window.
    pub async fn fetch_contents(&self) -> Result<ApiResponse> {
        self.fetch_contents_with(&FetchOptions::default()).await
    }

    pub async fn fetch_contents_for_source(&self, source_id: impl Display) -> Result<ApiResponse> {
        self.fetch_contents_with(&FetchOptions::for_source(source_id.to_string()))
            .await
    }

    pub async fn fetch_contents_with(&self, options: &FetchOptions) -> Result<ApiResponse> {
        self.send(self.request(Method::POST, &["contents", "fetch"])?.json(options))
            .await
    }

    pub async fn fetch_status(&self, job_id: impl Display) -> Result<ApiResponse> {
        let job_id = job_id.to_string();
        self.send(self.request(Method::GET, &["contents", "fetch", &job_id])?)
            .await
    }

    // Recommendations

    pub async fn get_recommendations(&self) -> Result<ApiResponse> {
        self.send(self.request(Method::GET, &["recommendations"])?)
            .await
    }

    pub async fn get_recommendations_with(
        &self,
        query: &RecommendationQuery,
    ) -> Result<ApiResponse> {
        let pairs = query.to_pairs();
        self.send(self.request(Method::GET, &["recommendations"])?.query(&pairs))
            .await
    }

    pub async fn submit_feedback<S: Serialize + ?Sized>(&self, feedback: &S) -> Result<ApiResponse> {
        self.send(
            self.request(Method::POST, &["recommendations", "feedback"])?
                .json(feedback),
        )
        .await
    }

    pub async fn user_feedback(&self, user_id: impl Display) -> Result<ApiResponse> {
        let user_id = user_id.to_string();
        self.send(self.request(Method::GET, &["recommendations", "feedback", &user_id])?)
            .await
    }

    // System

    pub async fn health(&self) -> Result<ApiResponse> {
        self.send(self.request(Method::GET, &["health"])?).await
    }

    pub async fn system_info(&self) -> Result<ApiResponse> {
        self.send(self.request(Method::GET, &["system", "info"])?)
            .await
    }
}
