use crate::{
    api::{self, Expect},
    error::Result,
    middleware_layer::auth::authorize,
    models::audit_log::AuditLogEntry,
    models::session::Session,
    models::treaty::TreatyId,
    state::AppState,
};

/// Lists the audit history of a treaty.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `session` - The signed-in session.
/// * `id` - The treaty whose history to fetch.
///
/// # Returns
///
/// A `Result` containing the `AuditLogEntry` records, newest first, as sent.
pub async fn list_audit_logs(
    state: &AppState,
    session: &Session,
    id: TreatyId,
) -> Result<Vec<AuditLogEntry>> {
    let url = api::endpoint(state, &format!("/api/treaties/{}/audit_logs", id), &[])?;
    let request = authorize(state.http.get(url), session);
    api::fetch(request, Expect::Success, "fetch audit logs").await
}
