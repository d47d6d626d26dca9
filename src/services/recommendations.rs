use reqwest::Client as HttpClient;

use crate::{
    error::{ClientError, ClientResult},
    models::{ApiEnvelope, MovieSummary, RecommendationQuery},
};

/// Client for the server-side recommendation endpoint.
///
/// The ranking lives entirely on the server; the client's only job is to pass
/// the watched list (most recent first) as the ranking signal, with an
/// optional genre filter.
#[derive(Clone)]
pub struct RecommendationClient {
    http_client: HttpClient,
    base_url: String,
}

impl RecommendationClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch ranked recommendations for the given watch history
    pub async fn fetch(&self, query: &RecommendationQuery) -> ClientResult<Vec<MovieSummary>> {
        let url = format!("{}/api/recommendations", self.base_url);
        let response = self.http_client.post(&url).json(query).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::ExternalApi(format!(
                "API returned status {}: {}",
                status, body
            )));
        }

        let envelope: ApiEnvelope<Vec<MovieSummary>> = response.json().await?;
        let ranked = envelope.into_data_or_default();

        tracing::info!(
            watched = query.watched.len(),
            genre = query.genre.as_deref().unwrap_or("all"),
            results = ranked.len(),
            "Recommendations fetched"
        );

        Ok(ranked)
    }
}
