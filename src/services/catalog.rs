use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    error::{ClientError, ClientResult},
    models::{ApiEnvelope, Episode, MovieFilters, MovieId, MoviePage, MovieSummary, SeriesDetail},
};

const DEFAULT_SEARCH_LIMIT: u32 = 10;

/// Typed client for the CINEMATIQ catalog read paths.
///
/// Pure consumer: listing, search, genre and detail lookups all live on the
/// server; this client only shapes requests and unwraps the `{status, data}`
/// envelope.
#[derive(Clone)]
pub struct CatalogClient {
    http_client: HttpClient,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.into(),
        }
    }

    /// Browse movies with pagination, filtering and sorting
    pub async fn list_movies(&self, filters: &MovieFilters) -> ClientResult<MoviePage> {
        let url = format!("{}/api/movies", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&filters.to_query())
            .send()
            .await?;

        let page: MoviePage = Self::decode(response).await?;

        tracing::info!(
            page = page.page,
            total = page.total,
            results = page.data.len(),
            "Movie listing fetched"
        );

        Ok(page)
    }

    /// Fetch the full genre list
    pub async fn genres(&self) -> ClientResult<Vec<String>> {
        let url = format!("{}/api/genres", self.base_url);
        let response = self.http_client.get(&url).send().await?;
        let envelope: ApiEnvelope<Vec<String>> = Self::decode(response).await?;
        Ok(envelope.into_data_or_default())
    }

    /// Title search for the autocomplete box.
    ///
    /// An empty or whitespace query returns no results without touching the
    /// network, mirroring the server's own guard.
    pub async fn search_movies(
        &self,
        query: &str,
        limit: Option<u32>,
    ) -> ClientResult<Vec<MovieSummary>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/api/search", self.base_url);
        let limit = limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
        let response = self
            .http_client
            .get(&url)
            .query(&[("q", query), ("limit", &limit.to_string())])
            .send()
            .await?;

        let envelope: ApiEnvelope<Vec<MovieSummary>> = Self::decode(response).await?;
        let results = envelope.into_data_or_default();

        tracing::info!(query = %query, results = results.len(), "Movie search completed");

        Ok(results)
    }

    /// Fetch one movie's detail record
    pub async fn movie_detail(&self, movie_id: MovieId) -> ClientResult<MovieSummary> {
        let url = format!("{}/api/movie/{}", self.base_url, movie_id);
        let response = self.http_client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(format!("Movie {}", movie_id)));
        }

        let envelope: ApiEnvelope<MovieSummary> = Self::decode(response).await?;
        envelope.into_data()
    }

    /// Fetch the trending shelf
    pub async fn trending(&self) -> ClientResult<Vec<MovieSummary>> {
        let url = format!("{}/api/trending", self.base_url);
        let response = self.http_client.get(&url).send().await?;
        let envelope: ApiEnvelope<Vec<MovieSummary>> = Self::decode(response).await?;
        Ok(envelope.into_data_or_default())
    }

    /// Browse popular series, one page at a time
    pub async fn popular_series(&self, page: u32) -> ClientResult<Vec<MovieSummary>> {
        let url = format!("{}/api/series", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("page", page.to_string())])
            .send()
            .await?;

        let envelope: ApiEnvelope<Vec<MovieSummary>> = Self::decode(response).await?;
        Ok(envelope.into_data_or_default())
    }

    /// Series title search
    pub async fn search_series(&self, query: &str) -> ClientResult<Vec<MovieSummary>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/api/series/search", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("q", query)])
            .send()
            .await?;

        let envelope: ApiEnvelope<Vec<MovieSummary>> = Self::decode(response).await?;
        Ok(envelope.into_data_or_default())
    }

    /// Fetch one series' detail record plus its related titles
    pub async fn series_detail(&self, series_id: MovieId) -> ClientResult<SeriesDetail> {
        let url = format!("{}/api/series/{}", self.base_url, series_id);
        let response = self.http_client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(format!("Series {}", series_id)));
        }

        let envelope: ApiEnvelope<SeriesDetail> = Self::decode(response).await?;
        envelope.into_data()
    }

    /// List the episodes of one season
    pub async fn season_episodes(
        &self,
        series_id: MovieId,
        season_number: u32,
    ) -> ClientResult<Vec<Episode>> {
        let url = format!(
            "{}/api/series/{}/season/{}",
            self.base_url, series_id, season_number
        );
        let response = self.http_client.get(&url).send().await?;
        let envelope: ApiEnvelope<Vec<Episode>> = Self::decode(response).await?;
        Ok(envelope.into_data_or_default())
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::ExternalApi(format!(
                "API returned status {}: {}",
                status, body
            )));
        }
        Ok(response.json().await?)
    }
}
