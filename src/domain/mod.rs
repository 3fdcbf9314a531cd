use serde::{Deserialize, Deserializer};

pub mod content;
pub mod recommendation;
pub mod source;
pub mod system;

pub use content::{Content, ContentList, ContentSearchResult, ContentUpdate, FetchJob};
pub use recommendation::{Feedback, FeedbackInput, FeedbackList, Recommendation, RecommendationList};
pub use source::{BatchCreateResult, BatchDeleteResult, BatchError, Source, SourceInput, SourceList};
pub use system::{Health, SystemInfo};

/// The backend encodes an empty list as `null`.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
