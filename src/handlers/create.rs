use crate::{
    error::AppError,
    middleware_layer::auth::require_session,
    navigation::{Navigation, Page},
    repositories::treaty as treaty_repo,
    services::treaties as treaty_service,
    state::AppState,
    validation::treaty::validate_create_form,
    view::dom::{Node, el},
    view::message::{StatusMessage, error_text},
    view::treaty_form::{FormLayout, TreatyForm},
};

pub const SUBMITTING: &str = "Submitting...";
pub const CREATE_FALLBACK: &str = "Creation failed. Check server logs.";
pub const CREATE_NETWORK_ERROR: &str = "Network Error: Could not connect to the API.";
pub const CREATE_FORBIDDEN: &str = "Only administrators can create treaties.";

/// The create-treaty page.
#[derive(Debug, Default)]
pub struct CreatePage {
    pub form: TreatyForm,
    pub message: Option<StatusMessage>,
    /// Field problems found before submission, one per line.
    pub validation_errors: Vec<String>,
    pub navigation: Option<Navigation>,
}

impl CreatePage {
    pub fn to_html(&self) -> String {
        let mut page = el("section")
            .id("create-treaty")
            .child(self.form.to_node(FormLayout::Create, false));

        if !self.validation_errors.is_empty() {
            page = page.child(
                el("ul")
                    .class("text-danger")
                    .children(self.validation_errors.iter().map(|problem| el("li").text(problem).into())),
            );
        }
        if let Some(message) = &self.message {
            page = page.child(message.to_node("creation-message"));
        }

        Node::from(page).to_html()
    }
}

/// Validates and submits the create form.
///
/// Invalid input is reported without a request. Only `201 Created` counts as
/// success, after which the page heads to the dashboard.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `page` - The create page.
pub async fn create_new_treaty(state: &AppState, page: &mut CreatePage) {
    page.validation_errors.clear();

    if let Err(e) = validate_create_form(&page.form) {
        e.log("create treaty");
        if let AppError::Validation(problems) = e {
            page.validation_errors = problems.lines().map(str::to_string).collect();
        }
        return;
    }

    let session = match require_session(state) {
        Ok(session) => session,
        Err(e) => {
            e.log("create treaty");
            page.navigation = Some(Navigation::now(Page::Login));
            return;
        }
    };

    if !session.can_write() {
        tracing::warn!("🔒 Create refused for non-admin session");
        page.message = Some(StatusMessage::danger(CREATE_FORBIDDEN));
        return;
    }

    let payload = treaty_service::new_treaty_from_form(&page.form);
    page.message = Some(StatusMessage::info(SUBMITTING));

    match treaty_repo::create_treaty(state, &session, &payload).await {
        Ok(created) => {
            let title = created.title.unwrap_or(payload.title);
            page.message = Some(StatusMessage::success(format!(
                "Success! Treaty \"{}\" created and logged. Redirecting...",
                title
            )));
            page.navigation = Some(Navigation::after(
                Page::Dashboard,
                state.config.create_redirect_delay,
            ));
        }
        Err(e) => {
            e.log("create treaty");
            let text = error_text(&e, "Error: ", CREATE_FALLBACK, CREATE_NETWORK_ERROR);
            page.message = Some(StatusMessage::danger(text));
        }
    }
}
