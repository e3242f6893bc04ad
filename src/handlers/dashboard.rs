use crate::{
    error::AppError,
    middleware_layer::auth::require_session,
    models::treaty::TreatyFilters,
    navigation::{Navigation, Page},
    repositories::{report as report_repo, treaty as treaty_repo},
    state::AppState,
    view::dom::{Node, el, to_html},
    view::message::{Tone, error_text, failure_text},
    view::reports,
    view::treaty_list,
};

pub const LIST_FALLBACK: &str = "Failed to load treaties.";
pub const LIST_NETWORK_ERROR: &str = "Network error. Could not reach the treaty service.";
pub const REPORT_FALLBACK: &str = "Failed to load report.";
pub const REPORT_NETWORK_ERROR: &str = "Network error loading report.";

/// The dashboard: search filters, the treaty table and summary reports.
#[derive(Debug, Default)]
pub struct DashboardPage {
    /// The filter inputs. Inputs missing from the page are `None`.
    pub filters: TreatyFilters,
    pub treaty_list: Vec<Node>,
    pub status_report: Vec<Node>,
    pub expiring_report: Vec<Node>,
    pub navigation: Option<Navigation>,
}

impl DashboardPage {
    pub fn to_html(&self) -> String {
        let page = el("section")
            .id("dashboard")
            .child(el("table").class("table").child(el("tbody").id("treaty-list").children(self.treaty_list.clone())))
            .child(el("table").class("table").child(el("tbody").id("status-report").children(self.status_report.clone())))
            .child(el("ul").class("list-group").id("expiring-report").children(self.expiring_report.clone()));
        to_html(&[page.into()])
    }
}

/// Fetches the treaties matching the page's filters and redraws the list.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `page` - The dashboard page.
pub async fn fetch_treaties(state: &AppState, page: &mut DashboardPage) {
    let session = match require_session(state) {
        Ok(session) => session,
        Err(e) => {
            e.log("list treaties");
            page.navigation = Some(Navigation::now(Page::Login));
            return;
        }
    };

    page.treaty_list = match treaty_repo::list_treaties(state, &session, &page.filters).await {
        Ok(treaties) => {
            tracing::debug!("📋 {} treaties listed", treaties.len());
            treaty_list::treaty_rows(&treaties)
        }
        Err(e) => {
            e.log("list treaties");
            vec![list_error_row(&e)]
        }
    };
}

fn list_error_row(err: &AppError) -> Node {
    let text = error_text(err, "Error: ", LIST_FALLBACK, LIST_NETWORK_ERROR);
    treaty_list::message_row(&text, Some(Tone::Danger))
}

/// Loads the status breakdown and the expiring-soon list.
///
/// The two reports fail independently; each shows its own error.
pub async fn load_reports(state: &AppState, page: &mut DashboardPage) {
    let session = match require_session(state) {
        Ok(session) => session,
        Err(e) => {
            e.log("load reports");
            page.navigation = Some(Navigation::now(Page::Login));
            return;
        }
    };

    page.status_report = match report_repo::status_counts(state, &session).await {
        Ok(counts) => reports::status_rows(&counts),
        Err(e) => {
            e.log("status report");
            let text = failure_text(&e, REPORT_FALLBACK, REPORT_NETWORK_ERROR);
            vec![treaty_list::message_row(text, Some(Tone::Danger))]
        }
    };

    page.expiring_report = match report_repo::expiring_soon(state, &session).await {
        Ok(treaties) => reports::expiring_items(&treaties),
        Err(e) => {
            e.log("expiry report");
            let text = failure_text(&e, REPORT_FALLBACK, REPORT_NETWORK_ERROR);
            vec![reports::item(text, Some(Tone::Danger))]
        }
    };
}
