use std::sync::{Arc, Mutex};

use crate::document::{DocumentStore, ListenerId};

/// The one live listener slot shared by an adapter and its handles.
pub(crate) type ActiveSlot = Arc<Mutex<Option<ListenerId>>>;

/// Handle to a live snapshot subscription.
///
/// Dropping the handle does not cancel the subscription; call
/// [`Subscription::unsubscribe`]. A handle whose subscription was already
/// replaced by a newer `subscribe` does nothing.
pub struct Subscription {
    id: ListenerId,
    store: Arc<dyn DocumentStore>,
    active: ActiveSlot,
}

impl Subscription {
    pub(crate) fn new(id: ListenerId, store: Arc<dyn DocumentStore>, active: ActiveSlot) -> Self {
        Self { id, store, active }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Whether this handle still owns the adapter's live listener.
    pub fn is_active(&self) -> bool {
        self.active
            .lock()
            .map(|slot| *slot == Some(self.id))
            .unwrap_or(false)
    }

    pub fn unsubscribe(self) {
        let owned = match self.active.lock() {
            Ok(mut slot) if *slot == Some(self.id) => {
                *slot = None;
                true
            }
            _ => false,
        };
        if owned {
            self.store.unlisten(self.id);
            tracing::debug!(listener = self.id.0, "unsubscribed from places");
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
