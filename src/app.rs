//! PlacesApp - the application controller.
//!
//! Owns every piece of session state (identity, filters, editor, pending
//! delete) and hands it by reference to the filter engine and projector.
//! The local place list lives in the [`SyncAdapter`] and only changes when
//! a snapshot arrives.

use std::sync::Arc;

use crate::auth::{self, AuthError, AuthState, IdentityProvider, Session, SignInMethod};
use crate::clock::Clock;
use crate::config::AppConfig;
use crate::document::DocumentStore;
use crate::error::PlaceError;
use crate::filter::{CategoryFilter, FilterState, PriorityFilter, VisitedFilter};
use crate::image::ImageFile;
use crate::notify::{Notifier, TimedNotifier, Toast};
use crate::place::Place;
use crate::sync::{Subscription, SyncAdapter};
use crate::view::{render_view, Action, CardEvent, Editor, EditorMode, RenderedView};

/// Called after every snapshot with the new local list.
pub type ChangeListener = Arc<dyn Fn(&[Place]) + Send + Sync>;

/// A delete awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: String,
    pub name: String,
}

pub struct PlacesApp {
    config: AppConfig,
    sync: SyncAdapter,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    session: Session,
    filter: FilterState,
    editor: Editor,
    pending_delete: Option<PendingDelete>,
    subscription: Option<Subscription>,
    on_change: Option<ChangeListener>,
}

impl PlacesApp {
    pub fn new<S>(
        store: Arc<S>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        config: AppConfig,
    ) -> Self
    where
        S: DocumentStore + 'static,
    {
        let notifier: Arc<dyn Notifier> =
            Arc::new(TimedNotifier::new(notifier, config.toast_duration_ms));
        let sync =
            SyncAdapter::new(store, notifier.clone()).with_collection(config.collection.clone());
        Self {
            config,
            sync,
            notifier,
            clock,
            session: Session::new(),
            filter: FilterState::new(),
            editor: Editor::new(),
            pending_delete: None,
            subscription: None,
            on_change: None,
        }
    }

    /// Register the re-render hook. Takes effect on the next subscription.
    pub fn on_change<F>(&mut self, listener: F)
    where
        F: Fn(&[Place]) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(listener));
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn sync(&self) -> &SyncAdapter {
        &self.sync
    }

    pub fn places(&self) -> Vec<Place> {
        self.sync.places()
    }

    // ------------------------------------------------------------------
    // Authentication
    // ------------------------------------------------------------------

    /// React to the identity provider's user-changed notification.
    pub fn handle_auth(&mut self, state: AuthState) -> Result<(), PlaceError> {
        self.session.apply(state);

        match self.session.user() {
            Some(user) => {
                tracing::info!(uid = %user.uid, "user signed in");
                let on_change = self.on_change.clone();
                let subscription = self.sync.subscribe(
                    move |places| {
                        if let Some(listener) = &on_change {
                            listener(places);
                        }
                    },
                    |_| {},
                )?;
                self.subscription = Some(subscription);
            }
            None => {
                tracing::info!("user signed out");
                if let Some(subscription) = self.subscription.take() {
                    subscription.unsubscribe();
                }
                self.editor.close();
                self.pending_delete = None;
            }
        }
        Ok(())
    }

    /// Start sign-in, falling back to a redirect where popups fail.
    pub async fn sign_in<P>(&self, provider: &P) -> Result<SignInMethod, AuthError>
    where
        P: IdentityProvider + ?Sized,
    {
        match auth::sign_in(provider).await {
            Ok(method) => {
                if method == SignInMethod::Popup {
                    self.notifier.notify(Toast::success("התחברת בהצלחה! 🎉"));
                }
                Ok(method)
            }
            Err(err) => {
                tracing::error!(error = %err, "sign-in failed");
                self.notifier.notify(Toast::error("שגיאה בהתחברות. נסה שוב."));
                Err(err)
            }
        }
    }

    pub async fn sign_out<P>(&self, provider: &P) -> Result<(), AuthError>
    where
        P: IdentityProvider + ?Sized,
    {
        match provider.sign_out().await {
            Ok(()) => {
                self.notifier.notify(Toast::info("התנתקת בהצלחה"));
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "sign-out failed");
                self.notifier.notify(Toast::error("שגיאה בהתנתקות"));
                Err(err)
            }
        }
    }

    // ------------------------------------------------------------------
    // Filters and rendering
    // ------------------------------------------------------------------

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn select_category(&mut self, category: CategoryFilter) {
        self.filter.select_category(category);
    }

    pub fn cycle_visited(&mut self) -> VisitedFilter {
        self.filter.cycle_visited()
    }

    pub fn cycle_priority(&mut self) -> PriorityFilter {
        self.filter.cycle_priority()
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.filter.set_search(query);
    }

    /// Derive list, counts and stats from the current mirror and filters.
    pub fn render(&self) -> RenderedView {
        render_view(&self.sync.places(), &self.filter)
    }

    // ------------------------------------------------------------------
    // Card actions
    // ------------------------------------------------------------------

    /// Route a card action to its handler.
    ///
    /// Actions on places that have disappeared are dropped silently.
    pub async fn dispatch(&mut self, event: CardEvent) -> Result<(), PlaceError> {
        let result = match event.action {
            Action::ToggleVisited => self.toggle_visited(&event.place_id).await.map(|_| ()),
            Action::Edit => self.open_edit(&event.place_id),
            Action::RequestDelete => self.request_delete(&event.place_id).map(|_| ()),
        };
        match result {
            Err(PlaceError::NotFound(id)) => {
                tracing::debug!(
                    action = %event.action,
                    id = %id,
                    "ignoring action on missing place"
                );
                Ok(())
            }
            other => other,
        }
    }

    /// Flip the visited flag of a place and save it.
    pub async fn toggle_visited(&self, id: &str) -> Result<Place, PlaceError> {
        let place = self
            .sync
            .find(id)
            .ok_or_else(|| PlaceError::NotFound(id.to_string()))?;
        let updated = place.toggled_visited(self.clock.now_millis());

        self.sync.save(&self.session, &updated).await?;
        self.notifier.notify(Toast::success(if updated.visited {
            "סומן כביקור! 🎉"
        } else {
            "סימון הביקור הוסר"
        }));
        Ok(updated)
    }

    // ------------------------------------------------------------------
    // Editor
    // ------------------------------------------------------------------

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn open_add(&mut self) {
        self.editor.open_add();
    }

    pub fn open_edit(&mut self, id: &str) -> Result<(), PlaceError> {
        self.editor.open_edit(&self.sync.places(), id)
    }

    pub fn close_editor(&mut self) {
        self.editor.close();
    }

    /// Attach a picked image to the open form.
    pub fn select_image(&mut self, file: &ImageFile) -> Result<(), PlaceError> {
        self.editor
            .select_image(file, self.config.max_image_bytes)
            .inspect_err(|err| self.notifier.notify(err.toast()))
    }

    /// Save the form. The editor closes only when the save succeeds.
    pub async fn submit(&mut self) -> Result<Place, PlaceError> {
        let adding = !matches!(self.editor.mode(), EditorMode::Editing(_));
        let place = self
            .editor
            .build_place(self.clock.now_millis())
            .inspect_err(|err| self.notifier.notify(err.toast()))?;

        self.sync.save(&self.session, &place).await?;

        self.notifier.notify(Toast::success(if adding {
            "המקום נוסף בהצלחה!"
        } else {
            "המקום עודכן בהצלחה!"
        }));
        self.editor.close();
        Ok(place)
    }

    // ------------------------------------------------------------------
    // Delete confirmation
    // ------------------------------------------------------------------

    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        self.pending_delete.as_ref()
    }

    /// Ask for confirmation before deleting.
    pub fn request_delete(&mut self, id: &str) -> Result<&PendingDelete, PlaceError> {
        let place = self
            .sync
            .find(id)
            .ok_or_else(|| PlaceError::NotFound(id.to_string()))?;
        Ok(&*self.pending_delete.insert(PendingDelete {
            id: place.id,
            name: place.name,
        }))
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the place awaiting confirmation, if any.
    pub async fn confirm_delete(&mut self) -> Result<(), PlaceError> {
        let Some(pending) = self.pending_delete.take() else {
            return Ok(());
        };
        self.sync.delete(&self.session, &pending.id).await?;
        self.notifier.notify(Toast::info("המקום נמחק"));
        Ok(())
    }
}
