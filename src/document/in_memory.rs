//! InMemoryDocumentStore - HashMap-backed document store for testing and development.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde_json::Value;

use super::{DocumentStore, ErrorListener, ListenerId, RawDocument, SnapshotListener};
use crate::error::PlaceError;

type SnapshotFn = Arc<dyn Fn(Vec<RawDocument>) + Send + Sync>;
type ErrorFn = Arc<dyn Fn(PlaceError) + Send + Sync>;

struct Listener {
    collection: String,
    on_snapshot: SnapshotFn,
    on_error: ErrorFn,
}

/// In-memory document store.
///
/// Snapshots are delivered synchronously, on the calling thread, to every
/// listener of the touched collection. Clones share storage and listeners,
/// so a clone stands in for "another client" writing to the same backend.
#[derive(Clone)]
pub struct InMemoryDocumentStore {
    collections: Arc<RwLock<HashMap<String, BTreeMap<String, Value>>>>,
    listeners: Arc<RwLock<BTreeMap<ListenerId, Listener>>>,
    next_listener: Arc<AtomicU64>,
    online: Arc<AtomicBool>,
    write_calls: Arc<AtomicUsize>,
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDocumentStore {
    /// Create a new empty, online store.
    pub fn new() -> Self {
        Self {
            collections: Arc::new(RwLock::new(HashMap::new())),
            listeners: Arc::new(RwLock::new(BTreeMap::new())),
            next_listener: Arc::new(AtomicU64::new(1)),
            online: Arc::new(AtomicBool::new(true)),
            write_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Toggle backend availability. Going back online re-delivers snapshots.
    pub fn set_online(&self, online: bool) {
        let was_online = self.online.swap(online, Ordering::SeqCst);
        if online && !was_online {
            for collection in self.listened_collections() {
                self.broadcast(&collection);
            }
        }
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    /// Number of upsert/delete calls received, successful or not.
    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    /// Number of live listeners across all collections.
    pub fn listener_count(&self) -> usize {
        self.listeners.read().map(|l| l.len()).unwrap_or(0)
    }

    /// Read a single document body.
    pub fn get(&self, collection: &str, id: &str) -> Option<Value> {
        self.collections
            .read()
            .ok()?
            .get(collection)
            .and_then(|docs| docs.get(id).cloned())
    }

    /// Current contents of a collection in key order.
    pub fn snapshot(&self, collection: &str) -> Vec<RawDocument> {
        let Ok(collections) = self.collections.read() else {
            return Vec::new();
        };
        collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, data)| RawDocument::new(id.clone(), data.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Report a backend failure to every listener of a collection.
    pub fn fail_listeners(&self, collection: &str, message: &str) {
        for on_error in self.error_handlers(collection) {
            on_error(PlaceError::RemoteUnavailable(message.to_string()));
        }
    }

    fn listened_collections(&self) -> Vec<String> {
        let Ok(listeners) = self.listeners.read() else {
            return Vec::new();
        };
        let mut collections: Vec<String> =
            listeners.values().map(|l| l.collection.clone()).collect();
        collections.sort();
        collections.dedup();
        collections
    }

    fn error_handlers(&self, collection: &str) -> Vec<ErrorFn> {
        self.listeners
            .read()
            .map(|listeners| {
                listeners
                    .values()
                    .filter(|l| l.collection == collection)
                    .map(|l| l.on_error.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Deliver the current snapshot to every listener of `collection`.
    ///
    /// Handlers run with no lock held, so they may listen or unlisten.
    fn broadcast(&self, collection: &str) {
        let handlers: Vec<SnapshotFn> = match self.listeners.read() {
            Ok(listeners) => listeners
                .values()
                .filter(|l| l.collection == collection)
                .map(|l| l.on_snapshot.clone())
                .collect(),
            Err(_) => return,
        };
        if handlers.is_empty() {
            return;
        }

        let docs = self.snapshot(collection);
        tracing::trace!(
            collection,
            documents = docs.len(),
            listeners = handlers.len(),
            "broadcasting snapshot"
        );
        for on_snapshot in handlers {
            on_snapshot(docs.clone());
        }
    }

    fn check_online(&self) -> Result<(), PlaceError> {
        if self.is_online() {
            Ok(())
        } else {
            Err(PlaceError::RemoteUnavailable("store is offline".into()))
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    fn listen(
        &self,
        collection: &str,
        on_snapshot: SnapshotListener,
        on_error: ErrorListener,
    ) -> Result<ListenerId, PlaceError> {
        let id = ListenerId(self.next_listener.fetch_add(1, Ordering::SeqCst));
        let on_snapshot: SnapshotFn = Arc::from(on_snapshot);
        let on_error: ErrorFn = Arc::from(on_error);

        self.listeners
            .write()
            .map_err(|_| PlaceError::RemoteUnavailable("listener registry poisoned".into()))?
            .insert(
                id,
                Listener {
                    collection: collection.to_string(),
                    on_snapshot: on_snapshot.clone(),
                    on_error: on_error.clone(),
                },
            );

        match self.check_online() {
            Ok(()) => on_snapshot(self.snapshot(collection)),
            Err(err) => on_error(err),
        }

        Ok(id)
    }

    fn unlisten(&self, listener: ListenerId) {
        if let Ok(mut listeners) = self.listeners.write() {
            listeners.remove(&listener);
        }
    }

    async fn upsert(&self, collection: &str, id: &str, data: Value) -> Result<(), PlaceError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;

        self.collections
            .write()
            .map_err(|_| PlaceError::RemoteUnavailable("storage poisoned".into()))?
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), data);

        self.broadcast(collection);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), PlaceError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;

        let removed = self
            .collections
            .write()
            .map_err(|_| PlaceError::RemoteUnavailable("storage poisoned".into()))?
            .get_mut(collection)
            .and_then(|docs| docs.remove(id))
            .is_some();

        // Deleting a missing key succeeds without a change event.
        if removed {
            self.broadcast(collection);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    fn recorder() -> (Arc<Mutex<Vec<Vec<RawDocument>>>>, SnapshotListener) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let on_snapshot: SnapshotListener =
            Box::new(move |docs: Vec<RawDocument>| sink.lock().unwrap().push(docs));
        (seen, on_snapshot)
    }

    #[tokio::test]
    async fn upsert_and_get() {
        let store = InMemoryDocumentStore::new();
        store.upsert("c", "1", json!({ "v": 1 })).await.unwrap();
        assert_eq!(store.get("c", "1"), Some(json!({ "v": 1 })));
        assert_eq!(store.get("c", "2"), None);
        assert_eq!(store.write_calls(), 1);
    }

    #[tokio::test]
    async fn upsert_overwrites_whole_document() {
        let store = InMemoryDocumentStore::new();
        store.upsert("c", "1", json!({ "a": 1, "b": 2 })).await.unwrap();
        store.upsert("c", "1", json!({ "a": 3 })).await.unwrap();
        assert_eq!(store.get("c", "1"), Some(json!({ "a": 3 })));
    }

    #[tokio::test]
    async fn listener_gets_initial_and_change_snapshots() {
        let store = InMemoryDocumentStore::new();
        store.upsert("c", "1", json!({})).await.unwrap();

        let (seen, on_snapshot) = recorder();
        let id = store.listen("c", on_snapshot, Box::new(|_| {})).unwrap();

        store.upsert("c", "2", json!({})).await.unwrap();
        store.upsert("other", "x", json!({})).await.unwrap();
        store.delete("c", "1").await.unwrap();

        let seen = seen.lock().unwrap();
        let sizes: Vec<usize> = seen.iter().map(|s| s.len()).collect();
        assert_eq!(sizes, vec![1, 2, 1]);
        assert_eq!(seen[2][0].id, "2");
        drop(seen);

        store.unlisten(id);
        assert_eq!(store.listener_count(), 0);
    }

    #[tokio::test]
    async fn offline_rejects_writes() {
        let store = InMemoryDocumentStore::new();
        store.set_online(false);

        let err = store.upsert("c", "1", json!({})).await.unwrap_err();
        assert!(matches!(err, PlaceError::RemoteUnavailable(_)));
        let err = store.delete("c", "1").await.unwrap_err();
        assert!(matches!(err, PlaceError::RemoteUnavailable(_)));
        assert_eq!(store.write_calls(), 2);
        assert!(store.snapshot("c").is_empty());
    }

    #[test]
    fn offline_listen_reports_error_then_recovers() {
        let store = InMemoryDocumentStore::new();
        store.set_online(false);

        let errors = Arc::new(Mutex::new(0));
        let count = errors.clone();
        let (seen, on_snapshot) = recorder();
        store
            .listen(
                "c",
                on_snapshot,
                Box::new(move |_| *count.lock().unwrap() += 1),
            )
            .unwrap();

        assert_eq!(*errors.lock().unwrap(), 1);
        assert!(seen.lock().unwrap().is_empty());

        store.set_online(true);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn clone_shares_storage_and_listeners() {
        let store = InMemoryDocumentStore::new();
        let other_client = store.clone();

        let (seen, on_snapshot) = recorder();
        store.listen("c", on_snapshot, Box::new(|_| {})).unwrap();
        other_client.upsert("c", "1", json!({ "v": 42 })).await.unwrap();

        assert_eq!(store.get("c", "1"), Some(json!({ "v": 42 })));
        assert_eq!(seen.lock().unwrap().len(), 2);
    }
}
