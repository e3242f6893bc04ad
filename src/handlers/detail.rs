use chrono::Local;

use crate::{
    middleware_layer::auth::require_session,
    models::session::Session,
    models::treaty::TreatyId,
    navigation::{Navigation, Page},
    repositories::{audit_log as audit_repo, report as report_repo, treaty as treaty_repo},
    services::treaties as treaty_service,
    state::{AppState, TreatyContext},
    view::audit_log,
    view::dom::{Element, Node, el},
    view::message::{StatusMessage, Tone, error_text, failure_text},
    view::reports,
    view::treaty_form::{FormLayout, TreatyForm},
};

pub const LOAD_FALLBACK: &str = "Error Loading Treaty";
pub const LOAD_NETWORK_ERROR: &str = "Network Error during detail fetch.";
pub const SAVING: &str = "Saving...";
pub const SAVE_SUCCESS: &str = "Changes saved successfully!";
pub const SAVE_FALLBACK: &str = "Failed to save.";
pub const SAVE_NETWORK_ERROR: &str = "Network error: Could not reach server.";
pub const NOTHING_LOADED: &str = "No treaty is loaded.";
pub const ARCHIVE_SUCCESS: &str = "Treaty successfully archived! Redirecting to dashboard.";
pub const ARCHIVE_FALLBACK: &str = "Failed to archive treaty.";
pub const ARCHIVE_NETWORK_ERROR: &str = "Network error: Could not connect to the server.";
pub const AUDIT_FALLBACK: &str = "Failed to retrieve audit history.";
pub const AUDIT_NETWORK_ERROR: &str = "Network Error fetching audit logs.";
pub const CHECK_FALLBACK: &str = "Failed to run notification check.";
pub const CHECK_NETWORK_ERROR: &str = "Network error: Could not run the expiry check.";
pub const CHECK_FORBIDDEN: &str = "Only administrators can trigger the expiry check.";

/// Whether the detail form is being edited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditMode {
    /// Controls disabled; only admins see the edit button.
    #[default]
    Viewing,
    /// Controls enabled; save and archive shown.
    Editing,
}

/// Which detail-page controls are enabled or visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailControls {
    pub form_disabled: bool,
    pub edit_button: bool,
    pub save_button: bool,
    pub archive_button: bool,
    pub create_new_button: bool,
    pub trigger_check_button: bool,
}

impl Default for DetailControls {
    fn default() -> Self {
        Self {
            form_disabled: true,
            edit_button: false,
            save_button: false,
            archive_button: false,
            create_new_button: false,
            trigger_check_button: false,
        }
    }
}

/// The detail page for one treaty.
#[derive(Debug, Default)]
pub struct DetailPage {
    pub context: TreatyContext,
    pub form: TreatyForm,
    pub mode: EditMode,
    pub controls: DetailControls,
    pub title_display: String,
    pub status_display: String,
    pub save_message: Option<StatusMessage>,
    pub audit_log: Vec<Node>,
    pub expiry_alerts: Vec<Node>,
    /// A blocking notice, shown once.
    pub alert: Option<String>,
    pub navigation: Option<Navigation>,
}

impl DetailPage {
    /// Moves between viewing and editing.
    ///
    /// Leaving edit mode shows the edit button again only for admins.
    /// Entering it checks nothing: the trigger is only offered to admins.
    pub fn set_edit_mode(&mut self, mode: EditMode, session: Option<&Session>) {
        self.mode = mode;
        let controls = &mut self.controls;
        match mode {
            EditMode::Editing => {
                controls.form_disabled = false;
                controls.edit_button = false;
                controls.save_button = true;
                controls.archive_button = true;
            }
            EditMode::Viewing => {
                controls.form_disabled = true;
                controls.edit_button = session.is_some_and(Session::can_write);
                controls.save_button = false;
                controls.archive_button = false;
            }
        }
    }

    /// Handles the edit button.
    pub fn enter_edit_mode(&mut self) {
        tracing::debug!("✏️ Entering edit mode");
        self.set_edit_mode(EditMode::Editing, None);
    }

    pub fn to_html(&self) -> String {
        self.to_node().to_html()
    }

    /// Renders the page as an element tree.
    pub fn to_node(&self) -> Node {
        let mut page = el("section")
            .id("treaty-detail")
            .child(el("h2").id("treaty-title-display").text(&self.title_display))
            .child(el("p").id("treaty-status-display").text(&self.status_display))
            .child(self.form.to_node(FormLayout::Detail, self.controls.form_disabled))
            .child(button("edit-button", "Edit", self.controls.edit_button))
            .child(button("save-button", "Save Changes", self.controls.save_button))
            .child(button("archive-button", "Archive", self.controls.archive_button))
            .child(button("create-new-button", "Create New", self.controls.create_new_button))
            .child(button("trigger-check-button", "Run Expiry Check", self.controls.trigger_check_button));

        if let Some(message) = &self.save_message {
            page = page.child(message.to_node("save-message"));
        }

        let page = page
            .child(el("ul").class("list-group").id("expiry-alerts").children(self.expiry_alerts.clone()))
            .child(el("ul").class("list-group").id("audit-log-list").children(self.audit_log.clone()));

        page.into()
    }
}

fn button(id: &'static str, label: &str, visible: bool) -> Element {
    let class = if visible { "btn" } else { "btn d-none" };
    el("button").id(id).class(class).attr("type", "button").text(label)
}

/// Loads a treaty into the page and gates the controls by role.
///
/// Without a stored session the page navigates to login and sends nothing.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `page` - The detail page.
/// * `id` - The treaty to show.
pub async fn fetch_treaty_details(state: &AppState, page: &mut DetailPage, id: TreatyId) {
    page.context.current_id = Some(id);

    let session = match require_session(state) {
        Ok(session) => session,
        Err(e) => {
            e.log("fetch treaty");
            page.navigation = Some(Navigation::now(Page::Login));
            return;
        }
    };

    match treaty_repo::get_treaty(state, &session, id).await {
        Ok(treaty) => {
            page.form.populate(&treaty);
            page.title_display = treaty.title.clone().unwrap_or_default();
            page.status_display = format!(
                "Status: {}",
                treaty.current_status.as_deref().unwrap_or_default()
            );
            page.context.snapshot = Some(treaty);

            if session.can_write() {
                page.controls.edit_button = true;
                page.controls.create_new_button = true;
                page.controls.trigger_check_button = true;
            } else {
                page.set_edit_mode(EditMode::Viewing, Some(&session));
            }
        }
        Err(e) => {
            e.log("fetch treaty");
            page.title_display = failure_text(&e, LOAD_FALLBACK, LOAD_NETWORK_ERROR).to_string();
        }
    }
}

/// Saves the edited form and reloads the treaty and its history.
///
/// On success the page returns to viewing with server state; on failure it
/// stays in edit mode so the edits survive.
pub async fn save_treaty_changes(state: &AppState, page: &mut DetailPage) {
    let Some(id) = page.context.snapshot_id() else {
        page.save_message = Some(StatusMessage::danger(NOTHING_LOADED));
        return;
    };

    let session = match require_session(state) {
        Ok(session) => session,
        Err(e) => {
            e.log("update treaty");
            page.navigation = Some(Navigation::now(Page::Login));
            return;
        }
    };

    let payload = treaty_service::update_from_form(&page.form);
    page.save_message = Some(StatusMessage::info(SAVING));

    match treaty_repo::update_treaty(state, &session, id, &payload).await {
        Ok(response) => {
            let text = response.message.unwrap_or_else(|| SAVE_SUCCESS.to_string());
            page.save_message = Some(StatusMessage::success(text));
            page.set_edit_mode(EditMode::Viewing, Some(&session));

            fetch_treaty_details(state, page, id).await;
            fetch_audit_logs(state, page, id).await;
        }
        Err(e) => {
            e.log("update treaty");
            page.save_message = Some(StatusMessage::danger(error_text(
                &e,
                "Error: ",
                SAVE_FALLBACK,
                SAVE_NETWORK_ERROR,
            )));
        }
    }
}

/// Archives the loaded treaty once the user confirms.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `page` - The detail page.
/// * `confirm` - Asked with the warning text; `false` cancels without a request.
pub async fn archive_treaty<F>(state: &AppState, page: &mut DetailPage, confirm: F)
where
    F: FnOnce(&str) -> bool,
{
    let Some(id) = page.context.snapshot_id() else {
        page.alert = Some(NOTHING_LOADED.to_string());
        return;
    };

    if !confirm(&archive_prompt(id)) {
        tracing::debug!("Archive of {} cancelled", id);
        return;
    }

    let session = match require_session(state) {
        Ok(session) => session,
        Err(e) => {
            e.log("archive treaty");
            page.navigation = Some(Navigation::now(Page::Login));
            return;
        }
    };

    match treaty_repo::archive_treaty(state, &session, id).await {
        Ok(_) => {
            page.alert = Some(ARCHIVE_SUCCESS.to_string());
            page.navigation = Some(Navigation::now(Page::Dashboard));
        }
        Err(e) => {
            e.log("archive treaty");
            page.alert = Some(error_text(
                &e,
                "Error archiving: ",
                ARCHIVE_FALLBACK,
                ARCHIVE_NETWORK_ERROR,
            ));
        }
    }
}

/// The confirmation shown before archiving.
pub fn archive_prompt(id: TreatyId) -> String {
    format!(
        "Are you sure you want to ARCHIVE Treaty ID {}? This action will be logged and is irreversible.",
        id
    )
}

/// Loads and renders the audit history of a treaty.
///
/// The loading placeholder replaces the list before the request is sent.
pub async fn fetch_audit_logs(state: &AppState, page: &mut DetailPage, id: TreatyId) {
    page.audit_log = vec![audit_log::loading_item()];

    let session = match require_session(state) {
        Ok(session) => session,
        Err(e) => {
            e.log("fetch audit logs");
            page.navigation = Some(Navigation::now(Page::Login));
            return;
        }
    };

    page.audit_log = match audit_repo::list_audit_logs(state, &session, id).await {
        Ok(entries) => audit_log::audit_items(&entries, &Local),
        Err(e) => {
            e.log("fetch audit logs");
            let text = error_text(&e, "Error fetching logs: ", AUDIT_FALLBACK, AUDIT_NETWORK_ERROR);
            vec![audit_log::message_item(&text, Tone::Danger)]
        }
    };
}

/// Asks the backend to run its expiry check and lists the alerts.
pub async fn trigger_expiry_check(state: &AppState, page: &mut DetailPage) {
    let session = match require_session(state) {
        Ok(session) => session,
        Err(e) => {
            e.log("expiry check");
            page.navigation = Some(Navigation::now(Page::Login));
            return;
        }
    };

    if !session.can_write() {
        page.expiry_alerts = vec![reports::item(CHECK_FORBIDDEN, Some(Tone::Danger))];
        return;
    }

    page.expiry_alerts = match report_repo::check_expiry(state, &session).await {
        Ok(check) => reports::expiry_alerts(&check),
        Err(e) => {
            e.log("expiry check");
            let text = error_text(&e, "Error: ", CHECK_FALLBACK, CHECK_NETWORK_ERROR);
            vec![reports::item(&text, Some(Tone::Danger))]
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::Role;

    fn session(role: Role) -> Session {
        Session {
            token: "t".into(),
            role: Some(role),
        }
    }

    #[test]
    fn editing_enables_form_and_shows_save_and_archive() {
        let mut page = DetailPage::default();
        page.enter_edit_mode();

        assert_eq!(page.mode, EditMode::Editing);
        assert!(!page.controls.form_disabled);
        assert!(!page.controls.edit_button);
        assert!(page.controls.save_button);
        assert!(page.controls.archive_button);
    }

    #[test]
    fn viewing_shows_edit_only_to_admins() {
        let mut page = DetailPage::default();

        page.set_edit_mode(EditMode::Viewing, Some(&session(Role::Admin)));
        assert!(page.controls.edit_button);
        assert!(page.controls.form_disabled);

        for role in [Role::PolicyOfficer, Role::Auditor] {
            page.enter_edit_mode();
            page.set_edit_mode(EditMode::Viewing, Some(&session(role)));
            assert!(!page.controls.edit_button);
            assert!(!page.controls.save_button);
            assert!(!page.controls.archive_button);
            assert!(page.controls.form_disabled);
        }
    }

    #[test]
    fn archive_prompt_names_the_treaty() {
        let prompt = archive_prompt(TreatyId(42));
        assert!(prompt.contains("Treaty ID 42"));
        assert!(prompt.contains("irreversible"));
    }

    #[test]
    fn hidden_buttons_carry_d_none() {
        let page = DetailPage::default();
        let html = page.to_html();
        assert!(html.contains(r#"<button id="edit-button" class="btn d-none""#));
    }
}
