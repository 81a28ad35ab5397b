//! Place - a single saved location on the shared list.
//!
//! ## Example
//!
//! ```ignore
//! use placelist::{Place, PlaceDraft, Category};
//!
//! let draft = PlaceDraft {
//!     name: "  Cafe Xoho ".into(),
//!     category: "cafe".into(),
//!     rating: "4".into(),
//!     ..PlaceDraft::default()
//! };
//! let place = draft.into_place(Place::generate_id(), None, now)?;
//! assert_eq!(place.name, "Cafe Xoho");
//! assert_eq!(place.category, Category::Cafe);
//! ```

mod draft;
mod lenient;

use serde::{Deserialize, Serialize};

use crate::clock::Millis;

pub use draft::{PlaceDraft, RatingInput};

/// Highest star rating. Zero means unrated.
pub const MAX_RATING: u8 = 5;

/// Kind of place. Values the app does not know are kept verbatim so a
/// round-trip through the store never rewrites them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Restaurant,
    Bar,
    Cafe,
    Attraction,
    #[default]
    Other,
    Unknown(String),
}

impl Category {
    /// The five categories the UI offers, in chip order.
    pub const KNOWN: [Category; 5] = [
        Category::Restaurant,
        Category::Bar,
        Category::Cafe,
        Category::Attraction,
        Category::Other,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Category::Restaurant => "restaurant",
            Category::Bar => "bar",
            Category::Cafe => "cafe",
            Category::Attraction => "attraction",
            Category::Other => "other",
            Category::Unknown(raw) => raw,
        }
    }

    /// Parse a stored or submitted value. Blank input becomes `Other`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" | "other" => Category::Other,
            "restaurant" => Category::Restaurant,
            "bar" => Category::Bar,
            "cafe" => Category::Cafe,
            "attraction" => Category::Attraction,
            _ => Category::Unknown(raw.to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Unknown(_))
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        Category::parse(&raw)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

/// How eager we are to visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Parse a stored or submitted value; anything unrecognised is `Medium`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "high" => Priority::High,
            "low" => Priority::Low,
            _ => Priority::Medium,
        }
    }
}

impl From<String> for Priority {
    fn from(raw: String) -> Self {
        Priority::parse(&raw)
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        priority.as_str().to_string()
    }
}

/// One saved location. Field names on the wire are camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, crate::Document)]
#[document(collection = "sharedPlaces")]
#[serde(rename_all = "camelCase")]
pub struct Place {
    /// The document key. Filled from the key when the body omits it.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub category: Category,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub website: String,
    #[serde(default, deserialize_with = "lenient::rating")]
    pub rating: u8,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub priority: Priority,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub notes: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub open_saturday: bool,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub online_reservation: bool,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub visited: bool,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub visited_date: Option<Millis>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub image_url: String,
    /// Missing in legacy documents; those sort last.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub created_at: Millis,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub updated_at: Millis,
}

impl Place {
    /// A fresh, time-ordered identifier for a new place.
    pub fn generate_id() -> String {
        uuid::Uuid::now_v7().simple().to_string()
    }

    /// A copy with `visited` flipped.
    ///
    /// Turning it on stamps `visited_date`; turning it off clears it.
    pub fn toggled_visited(&self, now: Millis) -> Place {
        let visited = !self.visited;
        Place {
            visited,
            visited_date: visited.then_some(now),
            updated_at: now,
            ..self.clone()
        }
    }

    /// `name address notes`, lowercased, as matched by the search box.
    pub fn searchable_text(&self) -> String {
        format!("{} {} {}", self.name, self.address, self.notes).to_lowercase()
    }

    pub fn has_image(&self) -> bool {
        !self.image_url.is_empty()
    }

    /// Encode for the document store.
    pub fn to_document(&self) -> Result<serde_json::Value, crate::PlaceError> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Document;
    use serde_json::json;

    fn place() -> Place {
        Place {
            id: "p1".into(),
            name: "Cafe Xoho".into(),
            category: Category::Cafe,
            address: "Dizengoff 1".into(),
            website: String::new(),
            rating: 4,
            priority: Priority::High,
            notes: "Great קפה".into(),
            open_saturday: true,
            online_reservation: false,
            visited: false,
            visited_date: None,
            image_url: String::new(),
            created_at: 100,
            updated_at: 100,
        }
    }

    #[test]
    fn collection_name() {
        assert_eq!(Place::COLLECTION, "sharedPlaces");
        assert_eq!(place().id(), "p1");
    }

    #[test]
    fn unknown_category_is_preserved() {
        let doc = json!({ "name": "Spa", "category": "spa" });
        let place: Place = serde_json::from_value(doc).unwrap();
        assert_eq!(place.category, Category::Unknown("spa".into()));

        let back = place.to_document().unwrap();
        assert_eq!(back["category"], "spa");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let place: Place = serde_json::from_value(json!({ "name": "Bare" })).unwrap();
        assert_eq!(place.category, Category::Other);
        assert_eq!(place.priority, Priority::Medium);
        assert_eq!(place.rating, 0);
        assert_eq!(place.created_at, 0);
        assert!(place.visited_date.is_none());
    }

    #[test]
    fn nulls_and_out_of_range_values_decode() {
        let doc = json!({
            "name": null,
            "category": null,
            "priority": null,
            "rating": -1,
            "imageUrl": null,
            "visited": null,
            "visitedDate": null,
            "createdAt": null,
        });
        let place: Place = serde_json::from_value(doc).unwrap();
        assert_eq!(place.name, "");
        assert_eq!(place.category, Category::Other);
        assert_eq!(place.priority, Priority::Medium);
        assert_eq!(place.rating, 0);
        assert_eq!(place.image_url, "");
        assert!(!place.visited);
        assert_eq!(place.created_at, 0);

        let rated: Place = serde_json::from_value(json!({ "name": "X", "rating": "9" })).unwrap();
        assert_eq!(rated.rating, MAX_RATING);
    }

    #[test]
    fn wire_names_are_camel_case() {
        let doc = place().to_document().unwrap();
        assert_eq!(doc["openSaturday"], true);
        assert_eq!(doc["onlineReservation"], false);
        assert_eq!(doc["createdAt"], 100);
        assert!(doc.get("open_saturday").is_none());
    }

    #[test]
    fn toggling_visited_twice_restores_state() {
        let original = place();
        let on = original.toggled_visited(500);
        assert!(on.visited);
        assert_eq!(on.visited_date, Some(500));
        assert_eq!(on.updated_at, 500);

        let off = on.toggled_visited(900);
        assert!(!off.visited);
        assert_eq!(off.visited_date, None);
        assert_eq!(off.created_at, original.created_at);
    }

    #[test]
    fn searchable_text_is_lowercased() {
        assert_eq!(place().searchable_text(), "cafe xoho dizengoff 1 great קפה");
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(Place::generate_id(), Place::generate_id());
    }
}
