use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    models::{EventKind, MovieId, ViewEvent},
    services::TrackSink,
    storage::Storage,
};

/// Storage key holding the raw session token
pub const SESSION_ID_KEY: &str = "cinematiq_session_id";
/// Storage key holding the JSON-encoded watch history
pub const WATCH_HISTORY_KEY: &str = "cinematiq_watched";
/// Watch history keeps at most this many entries
pub const HISTORY_CAP: usize = 50;

/// Per-browser session identity and watch history.
///
/// Owns the stable session token and the bounded, deduplicated,
/// most-recent-first list of viewed item ids, both persisted through the
/// injected [`Storage`] port. Constructed once at the application composition
/// root and passed by reference to whatever needs it; the store is the sole
/// writer of the persisted structure.
///
/// Storage failures never surface: the store degrades to memory-only and logs.
pub struct SessionStore {
    storage: Arc<dyn Storage>,
    tracker: Arc<dyn TrackSink>,
    session_id: String,
    history: Mutex<Vec<MovieId>>,
}

impl SessionStore {
    /// Initializes the store from persisted state.
    ///
    /// Generates and persists a fresh session token if none exists yet; a
    /// malformed or unreadable history decodes to empty.
    pub fn new(storage: Arc<dyn Storage>, tracker: Arc<dyn TrackSink>) -> Self {
        let session_id = Self::load_or_create_session_id(storage.as_ref());
        let history = Self::load_history(storage.as_ref());

        Self {
            storage,
            tracker,
            session_id,
            history: Mutex::new(history),
        }
    }

    /// Returns the process-wide session token. Always succeeds.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Returns the current watch history, most recent first, at most
    /// [`HISTORY_CAP`] entries
    pub fn watch_history(&self) -> Vec<MovieId> {
        self.history.lock().clone()
    }

    /// Records that `movie_id`'s detail page was viewed.
    ///
    /// An id already in the history leaves the list untouched (it is not moved
    /// to the front; the first-seen position is authoritative). A new id is
    /// prepended, evicting the oldest entries beyond [`HISTORY_CAP`]. The
    /// resulting list is persisted either way.
    ///
    /// A tracking event is dispatched on every call, duplicates included, as a
    /// detached task: best-effort, no retry, no timeout; failures are logged,
    /// never returned. This method never fails from the caller's perspective,
    /// though dispatching the task requires a running Tokio runtime.
    pub fn record_view(&self, movie_id: MovieId) {
        {
            let mut history = self.history.lock();
            if !history.contains(&movie_id) {
                history.insert(0, movie_id);
                history.truncate(HISTORY_CAP);
            }
            self.persist_history(&history);
        }

        let tracker = Arc::clone(&self.tracker);
        let event = ViewEvent {
            session_id: self.session_id.clone(),
            movie_id,
            event: EventKind::View,
        };
        tokio::spawn(async move {
            if let Err(e) = tracker.send(event).await {
                tracing::error!(movie_id, error = %e, "View tracking failed");
            }
        });
    }

    fn load_or_create_session_id(storage: &dyn Storage) -> String {
        match storage.get(SESSION_ID_KEY) {
            Ok(Some(stored)) => return stored,
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session id, generating a new one");
            }
        }

        let session_id = uuid::Uuid::new_v4().to_string();
        if let Err(e) = storage.set(SESSION_ID_KEY, &session_id) {
            tracing::warn!(error = %e, "Failed to persist session id, continuing in memory");
        }
        session_id
    }

    fn load_history(storage: &dyn Storage) -> Vec<MovieId> {
        let raw = match storage.get(WATCH_HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read watch history, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!(error = %e, "Malformed watch history, starting empty");
                Vec::new()
            }
        }
    }

    fn persist_history(&self, history: &[MovieId]) {
        let json = match serde_json::to_string(history) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode watch history");
                return;
            }
        };

        if let Err(e) = self.storage.set(WATCH_HISTORY_KEY, &json) {
            tracing::warn!(error = %e, "Failed to persist watch history, continuing in memory");
        }
    }
}
