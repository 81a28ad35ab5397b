//! `#[derive(Document)]` expansion checks.

use placelist::Document;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, Document)]
#[document(collection = "wishlists")]
struct Wishlist {
    #[document(id)]
    slug: String,
    title: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, Document)]
struct TripNote {
    id: String,
}

#[test]
fn explicit_collection_and_id_field() {
    let list = Wishlist {
        slug: "tlv".into(),
        title: "Tel Aviv".into(),
    };
    assert_eq!(Wishlist::COLLECTION, "wishlists");
    assert_eq!(list.id(), "tlv");
    assert_eq!(list.title, "Tel Aviv");
}

#[test]
fn default_collection_and_id_field() {
    let note = TripNote { id: "n1".into() };
    assert_eq!(TripNote::COLLECTION, "tripNotes");
    assert_eq!(note.id(), "n1");
}

#[test]
fn place_uses_shared_collection() {
    assert_eq!(placelist::Place::COLLECTION, "sharedPlaces");
}
