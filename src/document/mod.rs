//! Documents - records kept in the external document store.
//!
//! The store is the sole source of truth. The core talks to it through the
//! `DocumentStore` port: live listeners that receive full snapshots, plus
//! upsert/delete by id.
//!
//! ## Example
//!
//! ```ignore
//! use placelist::{Document, DocumentStore, InMemoryDocumentStore};
//!
//! let store = InMemoryDocumentStore::new();
//! let listener = store.listen(
//!     Place::COLLECTION,
//!     Box::new(|docs| println!("{} places", docs.len())),
//!     Box::new(|err| eprintln!("{}", err)),
//! )?;
//! store.upsert(Place::COLLECTION, &place.id, place.to_document()?).await?;
//! store.unlisten(listener);
//! ```

mod in_memory;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::PlaceError;

/// Trait for types that live in a document store collection.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this document type.
    const COLLECTION: &'static str;

    /// Returns the document key.
    fn id(&self) -> &str;
}

/// One document as delivered in a snapshot: its key and raw body.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    pub id: String,
    pub data: Value,
}

impl RawDocument {
    pub fn new(id: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}

/// Identifies one live listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Receives every snapshot of a collection, in full.
pub type SnapshotListener = Box<dyn Fn(Vec<RawDocument>) + Send + Sync>;

/// Receives failures of a live listener.
pub type ErrorListener = Box<dyn Fn(PlaceError) + Send + Sync>;

/// Port to the external document store.
///
/// Implementations deliver a snapshot to a new listener as soon as it is
/// registered and again after every change to the collection, from any
/// client.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Start listening to a collection.
    fn listen(
        &self,
        collection: &str,
        on_snapshot: SnapshotListener,
        on_error: ErrorListener,
    ) -> Result<ListenerId, PlaceError>;

    /// Stop a listener. Unknown ids are ignored.
    fn unlisten(&self, listener: ListenerId);

    /// Create or fully overwrite the document with this key.
    async fn upsert(&self, collection: &str, id: &str, data: Value) -> Result<(), PlaceError>;

    /// Remove the document with this key.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), PlaceError>;
}

pub use in_memory::InMemoryDocumentStore;
