//! Add/edit surface state.
//!
//! `Closed -> Adding -> Closed` and `Closed -> Editing(id) -> Closed`.

use crate::clock::Millis;
use crate::error::PlaceError;
use crate::image::{load_image, ImageFile};
use crate::place::{Place, PlaceDraft, Priority, RatingInput, MAX_RATING};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Closed,
    Adding,
    Editing(String),
}

/// The add/edit form and its transient selection state.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    mode: EditorMode,
    form: PlaceDraft,
    /// The record being edited, as it was when the editor opened.
    original: Option<Place>,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode != EditorMode::Closed
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            EditorMode::Editing(_) => "עריכת מקום",
            _ => "הוספת מקום חדש",
        }
    }

    pub fn form(&self) -> &PlaceDraft {
        &self.form
    }

    /// Direct access for text inputs and checkboxes.
    pub fn form_mut(&mut self) -> &mut PlaceDraft {
        &mut self.form
    }

    /// Open an empty form: unrated, medium priority, no image.
    pub fn open_add(&mut self) {
        self.mode = EditorMode::Adding;
        self.form = PlaceDraft {
            priority: Priority::Medium.as_str().into(),
            ..PlaceDraft::default()
        };
        self.original = None;
    }

    /// Open the form pre-filled from the place with `id`.
    ///
    /// Unknown ids leave the editor untouched and return `NotFound`.
    pub fn open_edit(&mut self, places: &[Place], id: &str) -> Result<(), PlaceError> {
        let place = places
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| PlaceError::NotFound(id.to_string()))?;

        self.mode = EditorMode::Editing(place.id.clone());
        self.form = PlaceDraft::from_place(place);
        self.original = Some(place.clone());
        Ok(())
    }

    /// Close and forget all transient state.
    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn set_rating(&mut self, rating: u8) {
        self.form.rating = RatingInput::from(rating.min(MAX_RATING));
    }

    pub fn rating(&self) -> u8 {
        self.form.rating.coerce()
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.form.priority = priority.as_str().into();
    }

    /// Validate and attach an image. On error nothing changes.
    pub fn select_image(&mut self, file: &ImageFile, max_bytes: u64) -> Result<(), PlaceError> {
        let data_uri = load_image(file, max_bytes)?;
        self.form.image_url = Some(data_uri);
        Ok(())
    }

    pub fn remove_image(&mut self) {
        self.form.image_url = None;
    }

    pub fn selected_image(&self) -> Option<&str> {
        self.form.image_url.as_deref()
    }

    /// The record the form would save, stamped with `now`.
    pub fn build_place(&self, now: Millis) -> Result<Place, PlaceError> {
        let id = match &self.mode {
            EditorMode::Closed => {
                return Err(PlaceError::InvalidInput("the editor is closed".into()))
            }
            EditorMode::Adding => Place::generate_id(),
            EditorMode::Editing(id) => id.clone(),
        };
        self.form
            .clone()
            .into_place(id, self.original.as_ref(), now)
    }
}
