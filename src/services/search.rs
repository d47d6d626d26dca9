use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::{models::MovieSummary, services::CatalogClient};

/// Default settle time for the autocomplete box
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Debounced search-as-you-type driver.
///
/// Each keystroke replaces the pending lookup: the previous in-flight task is
/// aborted and a new one waits out the settle delay before hitting the search
/// endpoint. Results are delivered over a channel; a fetch failure is logged
/// and delivered as an empty result set so the consumer falls back to its
/// empty state.
pub struct DebouncedSearch {
    catalog: Arc<CatalogClient>,
    delay: Duration,
    results_tx: mpsc::UnboundedSender<Vec<MovieSummary>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl DebouncedSearch {
    /// Creates the driver and the receiving end of its results channel
    pub fn new(
        catalog: CatalogClient,
        delay: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<Vec<MovieSummary>>) {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        let search = Self {
            catalog: Arc::new(catalog),
            delay,
            results_tx,
            pending: Mutex::new(None),
        };
        (search, results_rx)
    }

    /// Submits the current input text, superseding any pending lookup
    pub fn query(&self, text: impl Into<String>) {
        let text = text.into();
        let catalog = Arc::clone(&self.catalog);
        let delay = self.delay;
        let results_tx = self.results_tx.clone();

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let results = match catalog.search_movies(&text, None).await {
                Ok(results) => results,
                Err(e) => {
                    tracing::error!(query = %text, error = %e, "Search failed");
                    Vec::new()
                }
            };

            // Receiver dropped means the search box is gone; nothing to do
            let _ = results_tx.send(results);
        });

        let mut pending = self.pending.lock();
        if let Some(previous) = pending.replace(task) {
            previous.abort();
        }
    }
}
