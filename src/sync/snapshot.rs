use std::cmp::Reverse;

use crate::document::RawDocument;
use crate::place::Place;

/// Replace the local mirror with a freshly delivered snapshot.
///
/// The result holds exactly the decodable documents of `docs`, newest
/// `created_at` first; nothing from `previous` survives. Documents missing
/// `createdAt` count as 0 and sort last. Ties keep delivery order.
pub fn apply_snapshot(previous: &[Place], docs: Vec<RawDocument>) -> Vec<Place> {
    let delivered = docs.len();
    let mut places: Vec<Place> = docs
        .into_iter()
        .filter_map(|doc| match serde_json::from_value::<Place>(doc.data) {
            Ok(mut place) => {
                place.id = doc.id;
                Some(place)
            }
            Err(e) => {
                tracing::warn!(id = %doc.id, error = %e, "skipping undecodable place document");
                None
            }
        })
        .collect();

    places.sort_by_key(|place| Reverse(place.created_at));

    tracing::debug!(
        previous = previous.len(),
        delivered,
        kept = places.len(),
        "applied snapshot"
    );
    places
}
