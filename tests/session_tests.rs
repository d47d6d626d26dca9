use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use cinematiq_client::error::{ClientError, ClientResult};
use cinematiq_client::models::ViewEvent;
use cinematiq_client::services::{HttpTracker, TrackSink};
use cinematiq_client::session::{SessionStore, HISTORY_CAP};
use cinematiq_client::storage::{FileStore, MemoryStore, Storage};

/// Records every delivered event so tests can assert on count and payloads
#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<ViewEvent>>,
    delivered: AtomicUsize,
}

#[async_trait::async_trait]
impl TrackSink for RecordingSink {
    async fn send(&self, event: ViewEvent) -> ClientResult<()> {
        self.events.lock().push(event);
        self.delivered.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Storage whose every operation fails, as when the backing location is gone
struct FailingStore;

impl Storage for FailingStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Err(ClientError::Storage(format!("cannot read {}", key)))
    }

    fn set(&self, key: &str, _value: &str) -> ClientResult<()> {
        Err(ClientError::Storage(format!("cannot write {}", key)))
    }
}

fn init_tracing() {
    // RUST_LOG=debug surfaces the store's degradation warnings when debugging
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

async fn settle() {
    // Tracking is fire-and-forget; give detached tasks time to land
    tokio::time::sleep(Duration::from_millis(100)).await;
}

#[tokio::test]
async fn test_history_is_reversed_call_order() {
    init_tracing();
    let sink = Arc::new(RecordingSink::default());
    let store = SessionStore::new(Arc::new(MemoryStore::new()), sink.clone());

    for id in [3, 1, 4, 1, 5] {
        store.record_view(id);
    }

    // Second view of 1 neither re-inserts nor reorders
    assert_eq!(store.watch_history(), vec![5, 4, 1, 3]);
    settle().await;
    assert_eq!(sink.delivered.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn test_duplicate_view_scenario_from_contract() {
    init_tracing();
    let sink = Arc::new(RecordingSink::default());
    let store = SessionStore::new(Arc::new(MemoryStore::new()), sink.clone());

    store.record_view(10);
    store.record_view(20);
    store.record_view(10);

    assert_eq!(store.watch_history(), vec![20, 10]);

    settle().await;
    let events = sink.events.lock();
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|e| e.session_id == store.session_id()));
    assert_eq!(events.iter().filter(|e| e.movie_id == 10).count(), 2);
}

#[tokio::test]
async fn test_sixty_views_keep_newest_fifty() {
    init_tracing();
    let sink = Arc::new(RecordingSink::default());
    let store = SessionStore::new(Arc::new(MemoryStore::new()), sink);

    for id in 1..=60 {
        store.record_view(id);
    }

    let history = store.watch_history();
    assert_eq!(history.len(), HISTORY_CAP);
    let expected: Vec<u64> = (11..=60).rev().collect();
    assert_eq!(history, expected);
    settle().await;
}

#[tokio::test]
async fn test_unreachable_tracking_endpoint_is_harmless() {
    init_tracing();
    // Port 9 (discard) is unroutable locally; every delivery fails
    let tracker = Arc::new(HttpTracker::new("http://127.0.0.1:9"));
    let storage = Arc::new(MemoryStore::new());
    let store = SessionStore::new(storage.clone(), tracker);

    store.record_view(42);
    store.record_view(43);

    assert_eq!(store.watch_history(), vec![43, 42]);
    settle().await;

    // History was still persisted despite the failing tracker
    let persisted = storage.get("cinematiq_watched").unwrap().unwrap();
    let decoded: Vec<u64> = serde_json::from_str(&persisted).unwrap();
    assert_eq!(decoded, vec![43, 42]);
}

#[tokio::test]
async fn test_session_and_history_survive_simulated_reload() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let sink = Arc::new(RecordingSink::default());

    let (session_id, history) = {
        let storage = Arc::new(FileStore::open_in(dir.path()).unwrap());
        let store = SessionStore::new(storage, sink.clone());
        store.record_view(101);
        store.record_view(102);
        settle().await;
        (store.session_id().to_string(), store.watch_history())
    };

    // Fresh process over the same storage directory
    let storage = Arc::new(FileStore::open_in(dir.path()).unwrap());
    let reloaded = SessionStore::new(storage, sink);

    assert_eq!(reloaded.session_id(), session_id);
    assert_eq!(reloaded.watch_history(), history);
    assert_eq!(reloaded.watch_history(), vec![102, 101]);
}

#[tokio::test]
async fn test_broken_storage_degrades_to_memory_only() {
    init_tracing();
    let sink = Arc::new(RecordingSink::default());
    let store = SessionStore::new(Arc::new(FailingStore), sink.clone());

    // A token is still minted even though it could not be persisted
    assert!(!store.session_id().is_empty());

    // Views land in memory and still dispatch tracking events
    store.record_view(42);
    store.record_view(43);
    store.record_view(42);

    assert_eq!(store.watch_history(), vec![43, 42]);
    settle().await;
    assert_eq!(sink.delivered.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_fresh_storage_generates_and_persists_token() {
    init_tracing();
    let storage = Arc::new(MemoryStore::new());
    let store = SessionStore::new(storage.clone(), Arc::new(RecordingSink::default()));

    assert!(!store.session_id().is_empty());
    assert_eq!(
        storage.get("cinematiq_session_id").unwrap().as_deref(),
        Some(store.session_id())
    );

    // Distinct storage produces a distinct token
    let other = SessionStore::new(
        Arc::new(MemoryStore::new()),
        Arc::new(RecordingSink::default()),
    );
    assert_ne!(other.session_id(), store.session_id());
}
