//! Card actions, decoupled from any UI toolkit.
//!
//! Markup carries `data-action="<name>" data-id="<place id>"`; the UI layer
//! turns a click into a [`CardEvent`] and hands it to the app dispatcher.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ToggleVisited,
    Edit,
    /// Opens the delete confirmation; nothing is removed yet.
    RequestDelete,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::ToggleVisited, Action::Edit, Action::RequestDelete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::ToggleVisited => "toggle-visited",
            Action::Edit => "edit",
            Action::RequestDelete => "delete",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.as_str() == name)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action aimed at one place.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardEvent {
    pub action: Action,
    pub place_id: String,
}

impl CardEvent {
    pub fn new(action: Action, place_id: impl Into<String>) -> Self {
        Self {
            action,
            place_id: place_id.into(),
        }
    }

    /// Build from the `data-action` / `data-id` attribute pair.
    pub fn from_attributes(action: &str, id: &str) -> Option<Self> {
        if id.is_empty() {
            return None;
        }
        Action::parse(action).map(|action| Self::new(action, id))
    }
}
