//! View projection - turns places into display-ready cards.
//!
//! Everything here is a pure function of its inputs. User-supplied text is
//! escaped when a card is projected, so markup built from a [`PlaceCard`]
//! can embed its fields directly. The id stays raw so card events name the
//! stored record; markup escapes it where it is written.

mod action;
mod editor;
mod markup;

use url::Url;

use crate::filter::{filter_places, FilterState};
use crate::place::{Category, Place, Priority, MAX_RATING};

pub use action::{Action, CardEvent};
pub use editor::{Editor, EditorMode};
pub use markup::{escape_html, render_card, render_list};

/// Icon and label of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryInfo {
    pub icon: &'static str,
    pub label: &'static str,
}

/// Icon, label and accent color of a priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityInfo {
    pub icon: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

/// Display entry for a category. Unknown categories render as "other".
pub fn category_info(category: &Category) -> CategoryInfo {
    match category {
        Category::Restaurant => CategoryInfo { icon: "🍽️", label: "מסעדה" },
        Category::Bar => CategoryInfo { icon: "🍸", label: "בר" },
        Category::Cafe => CategoryInfo { icon: "☕", label: "בית קפה" },
        Category::Attraction => CategoryInfo { icon: "🎡", label: "אטרקציה" },
        Category::Other | Category::Unknown(_) => CategoryInfo { icon: "✨", label: "אחר" },
    }
}

pub fn priority_info(priority: Priority) -> PriorityInfo {
    match priority {
        Priority::High => PriorityInfo { icon: "🔥", label: "גבוהה", color: "#F44336" },
        Priority::Medium => PriorityInfo { icon: "⭐", label: "בינונית", color: "#FF9800" },
        Priority::Low => PriorityInfo { icon: "💫", label: "נמוכה", color: "#2196F3" },
    }
}

/// One position in the five-star strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Star {
    Filled,
    Empty,
}

/// Five stars, the first `rating` of them filled.
pub fn stars(rating: u8) -> [Star; MAX_RATING as usize] {
    std::array::from_fn(|i| if i < rating as usize { Star::Filled } else { Star::Empty })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Badge {
    Visited,
    /// Only for non-medium priorities.
    Priority(Priority, PriorityInfo),
    OpenSaturday,
    OnlineReservation,
}

impl Badge {
    pub fn text(&self) -> String {
        match self {
            Badge::Visited => "✓ ביקרנו".into(),
            Badge::Priority(_, info) => format!("{} {}", info.icon, info.label),
            Badge::OpenSaturday => "🗓️ פתוח בשבת".into(),
            Badge::OnlineReservation => "💻 הזמנה אונליין".into(),
        }
    }
}

/// Card header picture: the stored image, or the category icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardImage {
    Picture { src: String, alt: String },
    Icon(&'static str),
}

/// Display record for one place. Text fields other than `id` are already
/// HTML-escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceCard {
    pub id: String,
    pub name: String,
    pub category: CategoryInfo,
    pub priority: PriorityInfo,
    pub stars: [Star; MAX_RATING as usize],
    /// The star strip is hidden for unrated places.
    pub show_rating: bool,
    pub image: CardImage,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub website: Option<String>,
    pub visited: bool,
    /// Badges over the image (visited, priority).
    pub overlay_badges: Vec<Badge>,
    /// Info badges under the notes (Saturday, reservations).
    pub info_badges: Vec<Badge>,
}

impl PlaceCard {
    pub fn visited_button_label(&self) -> &'static str {
        if self.visited {
            "✓ ביקרנו"
        } else {
            "סמן כביקור"
        }
    }

    /// Every action the card offers, for the dispatch table.
    pub fn events(&self) -> [CardEvent; 3] {
        [
            CardEvent::new(Action::ToggleVisited, self.id.clone()),
            CardEvent::new(Action::Edit, self.id.clone()),
            CardEvent::new(Action::RequestDelete, self.id.clone()),
        ]
    }
}

fn non_empty_escaped(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| escape_html(text))
}

/// Only absolute http(s) links are rendered as anchors.
fn link_target(website: &str) -> Option<String> {
    let website = website.trim();
    let url = Url::parse(website).ok()?;
    matches!(url.scheme(), "http" | "https").then(|| escape_html(website))
}

/// Project a single place.
pub fn project(place: &Place) -> PlaceCard {
    let category = category_info(&place.category);
    let priority = priority_info(place.priority);

    let image = if place.has_image() {
        CardImage::Picture {
            src: escape_html(&place.image_url),
            alt: escape_html(&place.name),
        }
    } else {
        CardImage::Icon(category.icon)
    };

    let mut overlay_badges = Vec::new();
    if place.visited {
        overlay_badges.push(Badge::Visited);
    }
    if place.priority != Priority::Medium {
        overlay_badges.push(Badge::Priority(place.priority, priority));
    }

    let mut info_badges = Vec::new();
    if place.open_saturday {
        info_badges.push(Badge::OpenSaturday);
    }
    if place.online_reservation {
        info_badges.push(Badge::OnlineReservation);
    }

    PlaceCard {
        id: place.id.clone(),
        name: escape_html(&place.name),
        category,
        priority,
        stars: stars(place.rating),
        show_rating: place.rating > 0,
        image,
        address: non_empty_escaped(&place.address),
        notes: non_empty_escaped(&place.notes),
        website: link_target(&place.website),
        visited: place.visited,
        overlay_badges,
        info_badges,
    }
}

/// Per-category totals over the whole, unfiltered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryCounts {
    pub all: usize,
    pub restaurant: usize,
    pub bar: usize,
    pub cafe: usize,
    pub attraction: usize,
    /// Places stored as "other". Unknown categories only count toward `all`.
    pub other: usize,
}

impl CategoryCounts {
    pub fn from_places(places: &[Place]) -> Self {
        let mut counts = CategoryCounts {
            all: places.len(),
            ..Self::default()
        };
        for place in places {
            match place.category {
                Category::Restaurant => counts.restaurant += 1,
                Category::Bar => counts.bar += 1,
                Category::Cafe => counts.cafe += 1,
                Category::Attraction => counts.attraction += 1,
                Category::Other => counts.other += 1,
                Category::Unknown(_) => {}
            }
        }
        counts
    }

    pub fn get(&self, category: &Category) -> usize {
        match category {
            Category::Restaurant => self.restaurant,
            Category::Bar => self.bar,
            Category::Cafe => self.cafe,
            Category::Attraction => self.attraction,
            Category::Other => self.other,
            Category::Unknown(_) => 0,
        }
    }
}

/// Header statistics over the whole, unfiltered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub total: usize,
    pub visited: usize,
    pub remaining: usize,
}

impl Stats {
    pub fn from_places(places: &[Place]) -> Self {
        let total = places.len();
        let visited = places.iter().filter(|p| p.visited).count();
        Stats {
            total,
            visited,
            remaining: total - visited,
        }
    }
}

/// What the list area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    /// Nothing saved yet.
    Empty,
    /// Places exist but the filters hide all of them.
    NoResults,
    Cards(Vec<PlaceCard>),
}

/// Everything derived for one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    pub list: ListView,
    pub counts: CategoryCounts,
    pub stats: Stats,
}

/// Recompute the whole view from scratch.
pub fn render_view(places: &[Place], filter: &FilterState) -> RenderedView {
    let counts = CategoryCounts::from_places(places);
    let stats = Stats::from_places(places);

    let list = if places.is_empty() {
        ListView::Empty
    } else {
        let visible = filter_places(places, filter);
        if visible.is_empty() {
            ListView::NoResults
        } else {
            ListView::Cards(visible.into_iter().map(project).collect())
        }
    };

    RenderedView { list, counts, stats }
}
