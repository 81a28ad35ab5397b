//! Sync - keeps the local place list mirrored from the document store.
//!
//! The local collection changes only when a snapshot arrives. Writes go to
//! the store and come back through the feed; nothing is applied
//! optimistically.
//!
//! ## Example
//!
//! ```ignore
//! use placelist::{SyncAdapter, InMemoryDocumentStore, RecordingNotifier, Session};
//!
//! let adapter = SyncAdapter::new(
//!     Arc::new(InMemoryDocumentStore::new()),
//!     Arc::new(RecordingNotifier::new()),
//! );
//! let subscription = adapter.subscribe(|places| render(places), |err| log(err))?;
//! adapter.save(&session, &place).await?;
//! subscription.unsubscribe();
//! ```

mod snapshot;
mod subscription;

use std::sync::{Arc, Mutex, RwLock};

use crate::auth::Session;
use crate::document::{Document, DocumentStore, RawDocument};
use crate::error::PlaceError;
use crate::notify::{Notifier, Toast};
use crate::place::Place;

pub use snapshot::apply_snapshot;
pub use subscription::Subscription;

use subscription::ActiveSlot;

/// Remote sync adapter for the shared place collection.
///
/// Clone-friendly: clones share the local mirror and the subscription slot.
#[derive(Clone)]
pub struct SyncAdapter {
    store: Arc<dyn DocumentStore>,
    notifier: Arc<dyn Notifier>,
    collection: String,
    places: Arc<RwLock<Vec<Place>>>,
    active: ActiveSlot,
}

impl SyncAdapter {
    pub fn new<S>(store: Arc<S>, notifier: Arc<dyn Notifier>) -> Self
    where
        S: DocumentStore + 'static,
    {
        Self {
            store,
            notifier,
            collection: Place::COLLECTION.to_string(),
            places: Arc::new(RwLock::new(Vec::new())),
            active: Arc::new(Mutex::new(None)),
        }
    }

    /// Use a different remote collection.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Listen to the shared collection.
    ///
    /// Any previous subscription of this adapter is released first, so at
    /// most one listener is ever live. `on_snapshot` sees the new local
    /// mirror after each delivery; `on_error` sees feed failures after the
    /// user has been notified.
    pub fn subscribe<F, E>(&self, on_snapshot: F, on_error: E) -> Result<Subscription, PlaceError>
    where
        F: Fn(&[Place]) + Send + Sync + 'static,
        E: Fn(&PlaceError) + Send + Sync + 'static,
    {
        self.release();

        let places = self.places.clone();
        let snapshot_handler = move |docs: Vec<RawDocument>| {
            let current = match places.write() {
                Ok(mut guard) => {
                    let next = apply_snapshot(&guard, docs);
                    *guard = next;
                    guard.clone()
                }
                Err(_) => {
                    tracing::error!("local place mirror poisoned, dropping snapshot");
                    return;
                }
            };
            on_snapshot(&current);
        };

        let notifier = self.notifier.clone();
        let error_handler = move |err: PlaceError| {
            tracing::error!(error = %err, "places feed failed");
            notifier.notify(Toast::error("שגיאה בטעינת המקומות"));
            on_error(&err);
        };

        // The initial snapshot may be delivered from inside `listen`, so no
        // lock is held across it.
        let id = self.store.listen(
            &self.collection,
            Box::new(snapshot_handler),
            Box::new(error_handler),
        )?;
        match self.active.lock() {
            Ok(mut slot) => *slot = Some(id),
            Err(_) => {
                self.store.unlisten(id);
                return Err(PlaceError::RemoteUnavailable(
                    "subscription slot poisoned".into(),
                ));
            }
        }

        tracing::debug!(listener = id.0, collection = %self.collection, "subscribed to places");
        Ok(Subscription::new(id, self.store.clone(), self.active.clone()))
    }

    /// Release the live subscription, if any.
    pub fn unsubscribe(&self) {
        self.release();
    }

    pub fn is_subscribed(&self) -> bool {
        self.active.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }

    fn release(&self) {
        let previous = self.active.lock().ok().and_then(|mut slot| slot.take());
        if let Some(id) = previous {
            self.store.unlisten(id);
            tracing::debug!(listener = id.0, "released places subscription");
        }
    }

    /// Create or fully overwrite a place.
    ///
    /// Requires a signed-in session; otherwise no store call is made. On
    /// failure the user is notified and the error returned. The local
    /// mirror is untouched until the next snapshot.
    pub async fn save(&self, session: &Session, place: &Place) -> Result<(), PlaceError> {
        if session.uid().is_none() {
            self.notifier
                .notify(Toast::error("יש להתחבר כדי לשמור מקומות"));
            return Err(PlaceError::Unauthenticated);
        }

        let body = place.to_document()?;
        match self.store.upsert(&self.collection, &place.id, body).await {
            Ok(()) => {
                tracing::info!(id = %place.id, "place saved");
                Ok(())
            }
            Err(err) => {
                tracing::error!(id = %place.id, error = %err, "saving place failed");
                self.notifier.notify(Toast::error("שגיאה בשמירת המקום"));
                Err(err)
            }
        }
    }

    /// Remove a place by id. Same session rule as [`SyncAdapter::save`].
    pub async fn delete(&self, session: &Session, id: &str) -> Result<(), PlaceError> {
        if session.uid().is_none() {
            self.notifier
                .notify(Toast::error("יש להתחבר כדי למחוק מקומות"));
            return Err(PlaceError::Unauthenticated);
        }

        match self.store.delete(&self.collection, id).await {
            Ok(()) => {
                tracing::info!(id, "place deleted");
                Ok(())
            }
            Err(err) => {
                tracing::error!(id, error = %err, "deleting place failed");
                self.notifier.notify(Toast::error("שגיאה במחיקת המקום"));
                Err(err)
            }
        }
    }

    /// A copy of the local mirror, newest first.
    pub fn places(&self) -> Vec<Place> {
        self.places.read().map(|p| p.clone()).unwrap_or_default()
    }

    /// Look up a place in the local mirror.
    pub fn find(&self, id: &str) -> Option<Place> {
        self.places
            .read()
            .ok()?
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }
}
