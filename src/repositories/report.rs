use crate::{
    api::{self, Expect},
    error::Result,
    middleware_layer::auth::authorize,
    models::report::{ExpiryCheck, StatusCount},
    models::session::Session,
    models::treaty::Treaty,
    state::AppState,
};

/// Fetches the number of active treaties per status.
pub async fn status_counts(state: &AppState, session: &Session) -> Result<Vec<StatusCount>> {
    let url = api::endpoint(state, "/api/reports/status_counts", &[])?;
    let request = authorize(state.http.get(url), session);
    api::fetch(request, Expect::Success, "status report").await
}

/// Fetches active treaties expiring within the backend's reporting window.
pub async fn expiring_soon(state: &AppState, session: &Session) -> Result<Vec<Treaty>> {
    let url = api::endpoint(state, "/api/reports/expiring_soon", &[])?;
    let request = authorize(state.http.get(url), session);
    api::fetch(request, Expect::Success, "expiry report").await
}

/// Asks the backend to run its expiry notification check.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `session` - The signed-in session.
///
/// # Returns
///
/// A `Result` containing the `ExpiryCheck` summary.
pub async fn check_expiry(state: &AppState, session: &Session) -> Result<ExpiryCheck> {
    let url = api::endpoint(state, "/api/notifications/check_expiry", &[])?;
    let request = authorize(state.http.post(url), session);
    let check: ExpiryCheck = api::fetch(request, Expect::Success, "expiry check").await?;

    tracing::info!("🔔 Expiry check raised {} notifications", check.count);
    Ok(check)
}
