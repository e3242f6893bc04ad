use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
    error::Result,
    models::session::{Role, Session},
    state::AppState,
    storage::{USER_ROLE_KEY, USER_TOKEN_KEY},
};

/// A fixed test identity and the session it is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockIdentity {
    pub email: &'static str,
    pub role: Role,
    pub token: &'static str,
}

/// The three accounts the login page recognises.
///
/// ⚠️ This is a placeholder, not authentication: passwords are never checked
/// and the tokens are constants the backend maps to fixed users.
pub const MOCK_IDENTITIES: [MockIdentity; 3] = [
    MockIdentity {
        email: "admin@test.gov",
        role: Role::Admin,
        token: "MOCK_ADMIN_TOKEN",
    },
    MockIdentity {
        email: "policy@test.gov",
        role: Role::PolicyOfficer,
        token: "MOCK_POLICY_TOKEN",
    },
    MockIdentity {
        email: "auditor@test.gov",
        role: Role::Auditor,
        token: "MOCK_AUDITOR_TOKEN",
    },
];

/// Login form input. Wiped from memory when dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Finds the mock identity registered for `email`.
pub fn resolve_identity(email: &str) -> Option<&'static MockIdentity> {
    MOCK_IDENTITIES.iter().find(|identity| identity.email == email)
}

/// Signs in with the mock identities and persists the session.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `credentials` - The submitted email and password.
///
/// # Returns
///
/// A `Result` containing the new `Session`, or `None` when the email is not a
/// known test account. Nothing is stored in that case.
pub fn sign_in(state: &AppState, credentials: &Credentials) -> Result<Option<Session>> {
    let Some(identity) = resolve_identity(&credentials.email) else {
        tracing::warn!("❌ Login rejected for unknown test account");
        return Ok(None);
    };

    state.storage.set_item(USER_TOKEN_KEY, identity.token)?;
    state.storage.set_item(USER_ROLE_KEY, identity.role.as_str())?;
    tracing::info!("✅ Signed in as {}", identity.role);

    Ok(Some(Session {
        token: identity.token.to_string(),
        role: Some(identity.role),
    }))
}

/// Removes the stored session.
pub fn sign_out(state: &AppState) -> Result<()> {
    state.storage.remove_item(USER_TOKEN_KEY)?;
    state.storage.remove_item(USER_ROLE_KEY)?;
    tracing::info!("👋 Signed out");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_identity_resolves_to_its_role() {
        let expected = [
            ("admin@test.gov", Role::Admin, "MOCK_ADMIN_TOKEN"),
            ("policy@test.gov", Role::PolicyOfficer, "MOCK_POLICY_TOKEN"),
            ("auditor@test.gov", Role::Auditor, "MOCK_AUDITOR_TOKEN"),
        ];

        for (email, role, token) in expected {
            let identity = resolve_identity(email).unwrap();
            assert_eq!(identity.role, role);
            assert_eq!(identity.token, token);
        }
    }

    #[test]
    fn lookup_is_exact() {
        assert!(resolve_identity("ADMIN@test.gov").is_none());
        assert!(resolve_identity(" admin@test.gov").is_none());
        assert!(resolve_identity("").is_none());
    }
}
