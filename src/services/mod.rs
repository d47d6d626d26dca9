/// External service clients
///
/// Each client wraps one remote concern behind a typed API: the catalog read
/// paths, the recommendation lookup, and the tracking notification. The
/// tracking sink sits behind a trait so the session layer can be tested
/// without a network.
use crate::error::ClientResult;
use crate::models::ViewEvent;

pub mod catalog;
pub mod recommendations;
pub mod search;
pub mod tracking;

pub use catalog::CatalogClient;
pub use recommendations::RecommendationClient;
pub use search::DebouncedSearch;
pub use tracking::HttpTracker;

/// Sink for view-tracking notifications.
///
/// Implementations deliver one event per call, best-effort. Callers decide
/// what to do with a failure; the session layer logs and drops it.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TrackSink: Send + Sync {
    /// Delivers a single tracking event
    async fn send(&self, event: ViewEvent) -> ClientResult<()>;
}
