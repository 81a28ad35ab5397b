//! Filter engine - derives the visible subset of the list.
//!
//! Pure and stateless: the same places and filter state always give the
//! same result, in the same relative order as the input.

mod state;

use crate::place::Place;

pub use state::{CategoryFilter, FilterState, PriorityFilter, VisitedFilter};

/// Whether a single place passes every active filter.
pub fn matches(place: &Place, filter: &FilterState) -> bool {
    filter.category.matches(&place.category)
        && filter.visited.matches(place.visited)
        && filter.priority.matches(place.priority)
        && matches_search(place, &filter.search_query)
}

/// Case-insensitive substring match on `name address notes`.
fn matches_search(place: &Place, query: &str) -> bool {
    query.is_empty() || place.searchable_text().contains(&query.to_lowercase())
}

/// The places passing `filter`, in their original order.
pub fn filter_places<'a>(places: &'a [Place], filter: &FilterState) -> Vec<&'a Place> {
    places.iter().filter(|place| matches(place, filter)).collect()
}
