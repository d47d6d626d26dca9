//! Client-side layer of the CINEMATIQ movie/TV discovery application.
//!
//! All business logic (ranking, search indexing, catalog storage, pagination)
//! lives behind the CINEMATIQ REST API; this crate provides typed clients for
//! those read paths plus the one stateful piece the client owns: the
//! [`session::SessionStore`], which tracks a per-device session token and a
//! bounded watch history and feeds both to the recommendation endpoint.

use std::path::Path;
use std::sync::Arc;

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod storage;

use config::Config;
use services::{CatalogClient, HttpTracker, RecommendationClient};
use session::SessionStore;
use storage::{FileStore, MemoryStore, Storage};

/// Application composition root.
///
/// Builds the storage port, the service clients, and the session store once;
/// consumers hold this by reference instead of reaching for ambient globals.
pub struct Cinematiq {
    pub session: Arc<SessionStore>,
    pub catalog: CatalogClient,
    pub recommendations: RecommendationClient,
}

impl Cinematiq {
    /// Wires the client against the configured API server.
    ///
    /// If the durable store cannot be opened, the session degrades to
    /// memory-only for this process and the failure is logged.
    pub fn from_config(config: &Config) -> Self {
        let storage = Self::open_storage(config);
        let tracker = Arc::new(HttpTracker::new(config.api_base_url.clone()));
        let session = Arc::new(SessionStore::new(storage, tracker));

        Self {
            session,
            catalog: CatalogClient::new(config.api_base_url.clone()),
            recommendations: RecommendationClient::new(config.api_base_url.clone()),
        }
    }

    fn open_storage(config: &Config) -> Arc<dyn Storage> {
        let opened = match &config.storage_dir {
            Some(dir) => FileStore::open_in(Path::new(dir)),
            None => FileStore::open_default(),
        };

        match opened {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::warn!(error = %e, "Durable storage unavailable, session state is memory-only");
                Arc::new(MemoryStore::new())
            }
        }
    }
}
