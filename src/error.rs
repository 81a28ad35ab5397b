use thiserror::Error;

use crate::notify::Toast;

/// Errors surfaced by the places core.
///
/// None of these are fatal: every variant is reported through a transient
/// notification and the UI stays interactive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceError {
    /// A write was attempted without a signed-in user.
    #[error("no signed-in user")]
    Unauthenticated,
    /// The document store or the network failed.
    #[error("remote store unavailable: {0}")]
    RemoteUnavailable(String),
    /// User input was rejected (bad image, empty name).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The referenced place is no longer in the local collection.
    #[error("place not found: {0}")]
    NotFound(String),
    /// A document could not be (de)serialized.
    #[error("document serialization error: {0}")]
    Serde(String),
}

impl From<serde_json::Error> for PlaceError {
    fn from(err: serde_json::Error) -> Self {
        PlaceError::Serde(err.to_string())
    }
}

impl PlaceError {
    /// The user-visible notification for this error.
    pub fn toast(&self) -> Toast {
        match self {
            PlaceError::Unauthenticated => Toast::error("יש להתחבר כדי לשמור מקומות"),
            PlaceError::RemoteUnavailable(_) => Toast::error("שגיאה בתקשורת עם השרת"),
            PlaceError::InvalidInput(msg) => Toast::error(msg.clone()),
            PlaceError::NotFound(_) => Toast::info("המקום כבר לא קיים"),
            PlaceError::Serde(_) => Toast::error("שגיאה בעיבוד הנתונים"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::ToastKind;

    #[test]
    fn serde_errors_convert() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(matches!(PlaceError::from(err), PlaceError::Serde(_)));
    }

    #[test]
    fn invalid_input_toasts_its_message() {
        let toast = PlaceError::InvalidInput("bad".into()).toast();
        assert_eq!(toast.message, "bad");
        assert_eq!(toast.kind, ToastKind::Error);
    }
}
