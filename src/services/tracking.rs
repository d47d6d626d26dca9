use reqwest::Client as HttpClient;

use crate::{
    error::{ClientError, ClientResult},
    models::ViewEvent,
    services::TrackSink,
};

/// Tracking client for the analytics endpoint.
///
/// Posts view events to `POST /api/track`. The response body is never
/// inspected; only the status code matters, and even that only for logging
/// upstream. The tracking call carries no timeout by contract.
#[derive(Clone)]
pub struct HttpTracker {
    http_client: HttpClient,
    base_url: String,
}

impl HttpTracker {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait::async_trait]
impl TrackSink for HttpTracker {
    async fn send(&self, event: ViewEvent) -> ClientResult<()> {
        let url = format!("{}/api/track", self.base_url);
        let response = self.http_client.post(&url).json(&event).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::ExternalApi(format!(
                "Tracking endpoint returned status {}",
                response.status()
            )));
        }

        tracing::debug!(
            movie_id = event.movie_id,
            session_id = %event.session_id,
            "View event delivered"
        );

        Ok(())
    }
}
