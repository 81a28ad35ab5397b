// Lets `#[derive(Document)]` expand to `placelist::Document` inside this crate too.
extern crate self as placelist;

mod app;
mod auth;
mod cache;
mod clock;
mod config;
mod document;
mod error;
mod filter;
mod image;
mod notify;
mod place;
mod sync;
mod view;

pub use app::{ChangeListener, PendingDelete, PlacesApp};
pub use auth::{sign_in, AuthError, AuthState, AuthUser, IdentityProvider, Session, SignInMethod};
pub use cache::{
    CacheStorage, Fetcher, InMemoryCacheStorage, OfflineCache, Request, Response, Route,
};
pub use clock::{Clock, FixedClock, Millis, SystemClock};
pub use config::{AppConfig, CacheConfig, DEFAULT_MAX_IMAGE_BYTES};
pub use document::{
    Document, DocumentStore, ErrorListener, InMemoryDocumentStore, ListenerId, RawDocument,
    SnapshotListener,
};
pub use error::PlaceError;
pub use filter::{
    filter_places, matches, CategoryFilter, FilterState, PriorityFilter, VisitedFilter,
};
pub use image::{load_image, to_data_uri, validate_image, ImageFile};
pub use notify::{
    Notifier, RecordingNotifier, TimedNotifier, Toast, ToastKind, TracingNotifier,
    DEFAULT_TOAST_DURATION_MS,
};
pub use place::{Category, Place, PlaceDraft, Priority, RatingInput, MAX_RATING};
pub use sync::{apply_snapshot, Subscription, SyncAdapter};
pub use view::{
    category_info, escape_html, priority_info, project, render_card, render_list, render_view,
    stars, Action, Badge, CardEvent, CardImage, CategoryCounts, CategoryInfo, Editor, EditorMode,
    ListView, PlaceCard, PriorityInfo, RenderedView, Star, Stats,
};

// Re-export the derive macro for `Document`
pub use placelist_macros::Document;
