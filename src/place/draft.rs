//! PlaceDraft - raw, unvalidated form input.

use serde::Deserialize;

use super::{Category, Place, Priority, MAX_RATING};
use crate::clock::Millis;
use crate::error::PlaceError;

/// Rating as it arrives from a form: a number or its text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RatingInput {
    Number(f64),
    Text(String),
}

impl Default for RatingInput {
    fn default() -> Self {
        RatingInput::Number(0.0)
    }
}

impl From<&str> for RatingInput {
    fn from(text: &str) -> Self {
        RatingInput::Text(text.to_string())
    }
}

impl From<String> for RatingInput {
    fn from(text: String) -> Self {
        RatingInput::Text(text)
    }
}

impl From<u8> for RatingInput {
    fn from(value: u8) -> Self {
        RatingInput::Number(f64::from(value))
    }
}

impl RatingInput {
    /// Integer rating in `0..=MAX_RATING`. Unparseable input is unrated.
    pub fn coerce(&self) -> u8 {
        let value = match self {
            RatingInput::Number(n) => *n,
            RatingInput::Text(text) => {
                // Leading integer, like a lenient form parser.
                let trimmed = text.trim();
                let end = trimmed
                    .char_indices()
                    .find(|(i, c)| !(c.is_ascii_digit() || (*i == 0 && *c == '-')))
                    .map(|(i, _)| i)
                    .unwrap_or(trimmed.len());
                trimmed[..end].parse::<i64>().map(|n| n as f64).unwrap_or(0.0)
            }
        };
        if value.is_nan() {
            return 0;
        }
        value.trunc().clamp(0.0, f64::from(MAX_RATING)) as u8
    }
}

/// Unvalidated place fields as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaceDraft {
    pub name: String,
    pub category: String,
    pub address: String,
    pub website: String,
    pub rating: RatingInput,
    pub priority: String,
    pub notes: String,
    pub open_saturday: bool,
    pub online_reservation: bool,
    pub visited: bool,
    /// Encoded image, if one is selected.
    pub image_url: Option<String>,
}

impl PlaceDraft {
    /// Pre-fill a draft from a stored place, for editing.
    pub fn from_place(place: &Place) -> Self {
        Self {
            name: place.name.clone(),
            category: place.category.as_str().to_string(),
            address: place.address.clone(),
            website: place.website.clone(),
            rating: RatingInput::from(place.rating),
            priority: place.priority.as_str().to_string(),
            notes: place.notes.clone(),
            open_saturday: place.open_saturday,
            online_reservation: place.online_reservation,
            visited: place.visited,
            image_url: place.has_image().then(|| place.image_url.clone()),
        }
    }

    /// Normalize into a full record ready to be saved.
    ///
    /// `previous` is the stored version when editing; it supplies
    /// `created_at` and the prior visited state.
    pub fn into_place(
        self,
        id: String,
        previous: Option<&Place>,
        now: Millis,
    ) -> Result<Place, PlaceError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(PlaceError::InvalidInput("יש להזין שם למקום".into()));
        }

        let created_at = previous.map(|p| p.created_at).unwrap_or(now);
        let visited_date = match previous {
            Some(prev) if prev.visited == self.visited => prev.visited_date,
            _ => self.visited.then_some(now),
        };

        Ok(Place {
            id,
            name,
            category: Category::parse(self.category.trim()),
            address: self.address.trim().to_string(),
            website: self.website.trim().to_string(),
            rating: self.rating.coerce(),
            priority: Priority::parse(&self.priority),
            notes: self.notes.trim().to_string(),
            open_saturday: self.open_saturday,
            online_reservation: self.online_reservation,
            visited: self.visited,
            visited_date,
            image_url: self.image_url.unwrap_or_default(),
            created_at,
            updated_at: now,
        })
    }
}
