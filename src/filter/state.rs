use serde::{Deserialize, Serialize};

use crate::place::{Category, Priority};

/// Category chip selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Parse a chip value; `"all"` selects everything.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "all" => CategoryFilter::All,
            other => CategoryFilter::Only(Category::parse(other)),
        }
    }

    pub fn matches(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

/// Visited toggle: `All -> Unvisited -> Visited -> All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitedFilter {
    #[default]
    All,
    Unvisited,
    Visited,
}

impl VisitedFilter {
    pub fn next(self) -> Self {
        match self {
            VisitedFilter::All => VisitedFilter::Unvisited,
            VisitedFilter::Unvisited => VisitedFilter::Visited,
            VisitedFilter::Visited => VisitedFilter::All,
        }
    }

    pub fn matches(self, visited: bool) -> bool {
        match self {
            VisitedFilter::All => true,
            VisitedFilter::Visited => visited,
            VisitedFilter::Unvisited => !visited,
        }
    }

    /// Toggle button caption.
    pub fn label(self) -> &'static str {
        match self {
            VisitedFilter::All => "הכל",
            VisitedFilter::Unvisited => "לא ביקרנו",
            VisitedFilter::Visited => "ביקרנו",
        }
    }
}

/// Priority toggle: `All -> High -> Medium -> Low -> All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityFilter {
    #[default]
    All,
    High,
    Medium,
    Low,
}

impl PriorityFilter {
    pub fn next(self) -> Self {
        match self {
            PriorityFilter::All => PriorityFilter::High,
            PriorityFilter::High => PriorityFilter::Medium,
            PriorityFilter::Medium => PriorityFilter::Low,
            PriorityFilter::Low => PriorityFilter::All,
        }
    }

    /// The single priority selected, or `None` for all.
    pub fn priority(self) -> Option<Priority> {
        match self {
            PriorityFilter::All => None,
            PriorityFilter::High => Some(Priority::High),
            PriorityFilter::Medium => Some(Priority::Medium),
            PriorityFilter::Low => Some(Priority::Low),
        }
    }

    pub fn matches(self, priority: Priority) -> bool {
        self.priority().map_or(true, |wanted| wanted == priority)
    }
}

/// The four active list filters. One per session, changed only by the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub visited: VisitedFilter,
    pub priority: PriorityFilter,
    pub search_query: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_category(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    /// Advance the visited toggle and return the new value.
    pub fn cycle_visited(&mut self) -> VisitedFilter {
        self.visited = self.visited.next();
        self.visited
    }

    /// Advance the priority toggle and return the new value.
    pub fn cycle_priority(&mut self) -> PriorityFilter {
        self.priority = self.priority.next();
        self.priority
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// True when no filter narrows the list.
    pub fn is_unfiltered(&self) -> bool {
        self.category == CategoryFilter::All
            && self.visited == VisitedFilter::All
            && self.priority == PriorityFilter::All
            && self.search_query.is_empty()
    }
}
