use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::RequestBuilder;

use crate::{
    error::{AppError, Result},
    models::session::Session,
    state::AppState,
    storage::{LocalStorage, USER_ROLE_KEY, USER_TOKEN_KEY},
};

/// Reads the stored session, if a token is present.
///
/// # Arguments
///
/// * `storage` - The client-local storage.
///
/// # Returns
///
/// An `Option` containing the `Session` if a non-empty token is stored.
pub fn current_session(storage: &LocalStorage) -> Option<Session> {
    let token = storage
        .get_item(USER_TOKEN_KEY)
        .filter(|token| !token.is_empty())?;

    let role = storage.get_item(USER_ROLE_KEY).and_then(|raw| match raw.parse() {
        Ok(role) => Some(role),
        Err(e) => {
            tracing::warn!("⚠️ Ignoring stored role: {}", e);
            None
        }
    });

    Some(Session { token, role })
}

/// Requires a stored session before any authorized request.
///
/// # Arguments
///
/// * `state` - The application state.
///
/// # Returns
///
/// A `Result` containing the `Session`, or `AppError::Unauthenticated`.
pub fn require_session(state: &AppState) -> Result<Session> {
    tracing::debug!("🔐 Checking session...");
    current_session(&state.storage).ok_or(AppError::Unauthenticated)
}

/// Adds the bearer token and JSON content type to a request.
pub fn authorize(request: RequestBuilder, session: &Session) -> RequestBuilder {
    request
        .header(AUTHORIZATION, format!("Bearer {}", session.token))
        .header(CONTENT_TYPE, "application/json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::Role;

    #[test]
    fn empty_token_is_no_session() {
        let storage = LocalStorage::in_memory();
        storage.set_item(USER_TOKEN_KEY, "").unwrap();
        assert_eq!(current_session(&storage), None);
    }

    #[test]
    fn unknown_role_keeps_token() {
        let storage = LocalStorage::in_memory();
        storage.set_item(USER_TOKEN_KEY, "MOCK_POLICY_TOKEN").unwrap();
        storage.set_item(USER_ROLE_KEY, "superuser").unwrap();

        let session = current_session(&storage).unwrap();
        assert_eq!(session.token, "MOCK_POLICY_TOKEN");
        assert_eq!(session.role, None);
        assert!(!session.can_write());
    }

    #[test]
    fn stored_role_is_parsed() {
        let storage = LocalStorage::in_memory();
        storage.set_item(USER_TOKEN_KEY, "MOCK_ADMIN_TOKEN").unwrap();
        storage.set_item(USER_ROLE_KEY, "admin").unwrap();

        assert_eq!(current_session(&storage).unwrap().role, Some(Role::Admin));
    }
}
