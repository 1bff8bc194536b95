use contracts::system::auth::UserInfo;
use leptos::prelude::*;

use super::storage;

/// Session of the signed-in broker
///
/// Created once by the app and handed to the API client, which reads the
/// token on every request. Login and logout are the only writers.
#[derive(Clone, Copy)]
pub struct AuthContext {
    token: RwSignal<Option<String>>,
    user: RwSignal<Option<UserInfo>>,
}

impl AuthContext {
    /// Context seeded with the token persisted by a previous session
    pub fn restore() -> Self {
        Self::with_token(storage::get_token())
    }

    pub fn with_token(token: Option<String>) -> Self {
        Self {
            token: RwSignal::new(token),
            user: RwSignal::new(None),
        }
    }

    /// Current token, read without tracking
    pub fn token(&self) -> Option<String> {
        self.token.get_untracked()
    }

    pub fn set_token(&self, token: String) {
        storage::save_token(&token);
        self.token.set(Some(token));
    }

    /// Reactive
    pub fn is_authenticated(&self) -> bool {
        self.token.with(|t| t.is_some())
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.user.get()
    }

    pub fn user_name(&self) -> String {
        self.user
            .with(|u| u.as_ref().and_then(|u| u.name.clone()))
            .unwrap_or_default()
    }

    pub fn set_user(&self, user: UserInfo) {
        self.user.set(Some(user));
    }

    pub fn logout(&self) {
        log::debug!("clearing session");
        storage::clear_token();
        self.token.set(None);
        self.user.set(None);
    }
}

/// Hook to access the auth context
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext not provided by App")
}
