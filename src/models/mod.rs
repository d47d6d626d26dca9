use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

mod movie;
mod series;

pub use movie::{ContentKind, MovieFilters, MoviePage, MovieSummary, SortBy};
pub use series::{Episode, SeriesDetail};

/// Raw catalog item identifier.
///
/// History entries store identifiers untagged; a movie id and a series id of
/// the same numeric value are indistinguishable here, matching the server's
/// tracking contract.
pub type MovieId = u64;

/// Fixed `{status, data}` response envelope used by every CINEMATIQ endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub status: String,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwraps the payload, mapping a non-success status or missing data to an error
    pub fn into_data(self) -> ClientResult<T> {
        if self.status != "success" {
            return Err(ClientError::ExternalApi(
                self.message
                    .unwrap_or_else(|| format!("API returned status {:?}", self.status)),
            ));
        }
        self.data
            .ok_or_else(|| ClientError::ExternalApi("API response missing data".to_string()))
    }

    /// Unwraps the payload, treating a non-success status or missing data as empty
    pub fn into_data_or_default(self) -> T
    where
        T: Default,
    {
        if self.status != "success" {
            return T::default();
        }
        self.data.unwrap_or_default()
    }
}

/// Tracking event kind. Only views are tracked today.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    View,
}

/// One tracking notification sent to `POST /api/track`.
///
/// Transient: built per record-view call, never stored locally.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViewEvent {
    pub session_id: String,
    pub movie_id: MovieId,
    pub event: EventKind,
}

/// Request body for the recommendation endpoint
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationQuery {
    /// Watched identifiers, most recent first, used as the ranking signal
    pub watched: Vec<MovieId>,
    pub limit: u32,
    pub genre: Option<String>,
}
