//! Session identity and the external identity provider.
//!
//! The core only cares about the signed-in user's `uid`: it is the session
//! identity that gates every write. Profile fields are carried for display.

use std::fmt;

use async_trait::async_trait;

/// Profile delivered by the identity provider on sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthUser {
    pub uid: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub email: Option<String>,
}

impl AuthUser {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            ..Self::default()
        }
    }

    /// Name shown in the header: display name, else email, else uid.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.uid)
    }
}

/// Authenticated-user-changed notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    SignedIn(AuthUser),
    SignedOut,
}

/// The current session. Empty means logged out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<AuthUser>,
}

impl Session {
    /// A logged-out session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(user: AuthUser) -> Self {
        Self { user: Some(user) }
    }

    /// The session identity, if any.
    pub fn uid(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.uid.as_str())
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Apply an auth state change.
    pub fn apply(&mut self, state: AuthState) {
        self.user = match state {
            AuthState::SignedIn(user) => Some(user),
            AuthState::SignedOut => None,
        };
    }
}

/// Failures reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The browser blocked the popup.
    PopupBlocked,
    /// Popups are not supported in this context (embedded webviews etc).
    PopupUnsupported,
    /// The user closed the popup before finishing.
    PopupClosed,
    /// Any other provider failure.
    Provider(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::PopupBlocked => write!(f, "sign-in popup was blocked"),
            AuthError::PopupUnsupported => write!(f, "sign-in popup is not supported here"),
            AuthError::PopupClosed => write!(f, "sign-in popup was closed"),
            AuthError::Provider(msg) => write!(f, "identity provider error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

/// How a successful sign-in was carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInMethod {
    Popup,
    /// The page navigates away; the result arrives later as `AuthState`.
    Redirect,
}

/// Port to the external identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in_with_popup(&self) -> Result<(), AuthError>;

    async fn sign_in_with_redirect(&self) -> Result<(), AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Sign in with a popup, falling back to a redirect where popups cannot work.
pub async fn sign_in<P>(provider: &P) -> Result<SignInMethod, AuthError>
where
    P: IdentityProvider + ?Sized,
{
    match provider.sign_in_with_popup().await {
        Ok(()) => Ok(SignInMethod::Popup),
        Err(AuthError::PopupBlocked | AuthError::PopupUnsupported) => {
            tracing::info!("popup sign-in unavailable, falling back to redirect");
            provider.sign_in_with_redirect().await?;
            Ok(SignInMethod::Redirect)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct ScriptedProvider {
        popup: Result<(), AuthError>,
        redirect: Result<(), AuthError>,
        calls: Mutex<Vec<&'static str>>,
    }

    impl ScriptedProvider {
        fn new(popup: Result<(), AuthError>, redirect: Result<(), AuthError>) -> Self {
            Self {
                popup,
                redirect,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl IdentityProvider for ScriptedProvider {
        async fn sign_in_with_popup(&self) -> Result<(), AuthError> {
            self.calls.lock().unwrap().push("popup");
            self.popup.clone()
        }

        async fn sign_in_with_redirect(&self) -> Result<(), AuthError> {
            self.calls.lock().unwrap().push("redirect");
            self.redirect.clone()
        }

        async fn sign_out(&self) -> Result<(), AuthError> {
            Ok(())
        }
    }

    #[test]
    fn session_tracks_auth_state() {
        let mut session = Session::new();
        assert_eq!(session.uid(), None);

        session.apply(AuthState::SignedIn(AuthUser::new("user-42")));
        assert_eq!(session.uid(), Some("user-42"));
        assert!(session.is_signed_in());

        session.apply(AuthState::SignedOut);
        assert!(!session.is_signed_in());
    }

    #[test]
    fn label_prefers_display_name() {
        let mut user = AuthUser::new("u1");
        assert_eq!(user.label(), "u1");
        user.email = Some("a@b.c".into());
        assert_eq!(user.label(), "a@b.c");
        user.display_name = Some("Dana".into());
        assert_eq!(user.label(), "Dana");
    }

    #[tokio::test]
    async fn popup_success_skips_redirect() {
        let provider = ScriptedProvider::new(Ok(()), Ok(()));
        assert_eq!(sign_in(&provider).await, Ok(SignInMethod::Popup));
        assert_eq!(*provider.calls.lock().unwrap(), vec!["popup"]);
    }

    #[tokio::test]
    async fn blocked_popup_falls_back_to_redirect() {
        let provider = ScriptedProvider::new(Err(AuthError::PopupBlocked), Ok(()));
        assert_eq!(sign_in(&provider).await, Ok(SignInMethod::Redirect));
        assert_eq!(*provider.calls.lock().unwrap(), vec!["popup", "redirect"]);
    }

    #[tokio::test]
    async fn closed_popup_does_not_redirect() {
        let provider = ScriptedProvider::new(Err(AuthError::PopupClosed), Ok(()));
        assert_eq!(sign_in(&provider).await, Err(AuthError::PopupClosed));
        assert_eq!(*provider.calls.lock().unwrap(), vec!["popup"]);
    }
}
