use crate::{
    error::Result,
    navigation::{Navigation, Page},
    services::auth::{self as auth_service, Credentials},
    state::AppState,
    view::dom::{Node, el},
    view::message::StatusMessage,
};

pub const INVALID_CREDENTIALS: &str = "Invalid credentials for test users.";

/// The login page.
#[derive(Debug, Default)]
pub struct LoginPage {
    pub message: Option<StatusMessage>,
    pub navigation: Option<Navigation>,
}

impl LoginPage {
    pub fn to_html(&self) -> String {
        let mut page = el("section").id("login");
        if let Some(message) = &self.message {
            page = page.child(message.to_node("message"));
        }
        Node::from(page).to_html()
    }
}

/// Handles a login submission.
///
/// Known test accounts are stored and sent to the dashboard after the
/// configured delay; anything else only shows an inline error.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `page` - The login page.
/// * `credentials` - The submitted credentials, wiped once handled.
///
/// # Returns
///
/// A `Result<()>`; only a storage failure is an error.
pub fn handle_login(state: &AppState, page: &mut LoginPage, credentials: Credentials) -> Result<()> {
    tracing::info!("🔑 Login attempt");

    match auth_service::sign_in(state, &credentials)? {
        Some(session) => {
            let role = session.role.map(|role| role.as_str()).unwrap_or_default();
            page.message = Some(StatusMessage::success(format!(
                "Login successful as {}! Redirecting...",
                role
            )));
            page.navigation = Some(Navigation::after(
                Page::Dashboard,
                state.config.login_redirect_delay,
            ));
        }
        None => {
            page.message = Some(StatusMessage::danger(INVALID_CREDENTIALS));
        }
    }

    Ok(())
}
