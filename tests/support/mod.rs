//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use placelist::{
    AppConfig, AuthError, AuthState, AuthUser, Category, FixedClock, IdentityProvider,
    InMemoryDocumentStore, Place, PlacesApp, Priority, RecordingNotifier,
};

pub const START: i64 = 1_700_000_000_000;

pub struct Harness {
    pub store: InMemoryDocumentStore,
    pub notifier: RecordingNotifier,
    pub clock: FixedClock,
    pub app: PlacesApp,
}

impl Harness {
    pub fn new() -> Self {
        let store = InMemoryDocumentStore::new();
        let notifier = RecordingNotifier::new();
        let clock = FixedClock::new(START);
        let app = PlacesApp::new(
            Arc::new(store.clone()),
            Arc::new(notifier.clone()),
            Arc::new(clock.clone()),
            AppConfig::default(),
        );
        Self {
            store,
            notifier,
            clock,
            app,
        }
    }

    /// A harness whose app is already signed in and subscribed.
    pub fn signed_in() -> Self {
        let mut harness = Self::new();
        harness
            .app
            .handle_auth(AuthState::SignedIn(user("user-1")))
            .unwrap();
        harness
    }

    pub fn ids(&self) -> Vec<String> {
        self.app.places().into_iter().map(|p| p.id).collect()
    }
}

pub fn user(uid: &str) -> AuthUser {
    AuthUser {
        uid: uid.to_string(),
        display_name: Some("Dana".into()),
        photo_url: None,
        email: Some("dana@example.com".into()),
    }
}

pub fn place(id: &str, category: Category, created_at: i64) -> Place {
    Place {
        id: id.to_string(),
        name: format!("Place {}", id),
        category,
        address: String::new(),
        website: String::new(),
        rating: 0,
        priority: Priority::Medium,
        notes: String::new(),
        open_saturday: false,
        online_reservation: false,
        visited: false,
        visited_date: None,
        image_url: String::new(),
        created_at,
        updated_at: created_at,
    }
}

/// Identity provider whose popup outcome is fixed up front.
pub struct FakeIdentity {
    pub popup: Result<(), AuthError>,
    pub calls: Mutex<Vec<&'static str>>,
}

impl FakeIdentity {
    pub fn new(popup: Result<(), AuthError>) -> Self {
        Self {
            popup,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn sign_in_with_popup(&self) -> Result<(), AuthError> {
        self.calls.lock().unwrap().push("popup");
        self.popup.clone()
    }

    async fn sign_in_with_redirect(&self) -> Result<(), AuthError> {
        self.calls.lock().unwrap().push("redirect");
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.calls.lock().unwrap().push("sign_out");
        Ok(())
    }
}
