use reqwest::StatusCode;

use crate::{
    api::{self, Expect},
    error::{AppError, Result},
    middleware_layer::auth::authorize,
    models::session::Session,
    models::treaty::{
        ArchiveResponse, CreatedTreaty, NewTreaty, Treaty, TreatyFilters, TreatyId, TreatyUpdate, UpdateResponse,
    },
    state::AppState,
};

/// Lists treaties matching the given filters.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `session` - The signed-in session.
/// * `filters` - The filters to encode; absent or blank ones are omitted.
///
/// # Returns
///
/// A `Result` containing the matching `Treaty` records.
pub async fn list_treaties(
    state: &AppState,
    session: &Session,
    filters: &TreatyFilters,
) -> Result<Vec<Treaty>> {
    let url = api::endpoint(state, "/api/treaties", &filters.query_pairs())?;
    tracing::debug!("🔎 Listing treaties: {}", url);

    let request = authorize(state.http.get(url), session);
    api::fetch(request, Expect::Success, "list treaties").await
}

/// Fetches a single treaty.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `session` - The signed-in session.
/// * `id` - The treaty to fetch.
///
/// # Returns
///
/// A `Result` containing the `Treaty`.
pub async fn get_treaty(state: &AppState, session: &Session, id: TreatyId) -> Result<Treaty> {
    let url = api::endpoint(state, &format!("/api/treaties/{}", id), &[])?;
    let request = authorize(state.http.get(url), session);
    api::fetch(request, Expect::Success, "fetch treaty").await
}

/// Creates a treaty. Only `201 Created` counts as success.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `session` - The signed-in session.
/// * `payload` - The new record.
///
/// # Returns
///
/// A `Result` containing the `CreatedTreaty` echoed by the backend.
pub async fn create_treaty(
    state: &AppState,
    session: &Session,
    payload: &NewTreaty,
) -> Result<CreatedTreaty> {
    let url = api::endpoint(state, "/api/treaties", &[])?;
    let body = to_json(payload)?;

    let request = authorize(state.http.post(url), session).body(body);
    let created: CreatedTreaty =
        api::fetch(request, Expect::Exactly(StatusCode::CREATED), "create treaty").await?;

    tracing::info!(
        "✅ Treaty created: {}",
        created.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string())
    );
    Ok(created)
}

/// Replaces the editable fields of a treaty.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `session` - The signed-in session.
/// * `id` - The treaty to update.
/// * `payload` - The edited fields.
///
/// # Returns
///
/// A `Result` containing the backend's `UpdateResponse`.
pub async fn update_treaty(
    state: &AppState,
    session: &Session,
    id: TreatyId,
    payload: &TreatyUpdate,
) -> Result<UpdateResponse> {
    let url = api::endpoint(state, &format!("/api/treaties/{}", id), &[])?;
    let body = to_json(payload)?;

    let request = authorize(state.http.put(url), session).body(body);
    let response = api::fetch_or_default(request, Expect::Success, "update treaty").await?;

    tracing::info!("✅ Treaty updated: {}", id);
    Ok(response)
}

/// Archives (soft-deletes) a treaty.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `session` - The signed-in session.
/// * `id` - The treaty to archive.
///
/// # Returns
///
/// A `Result` containing the backend's `ArchiveResponse`.
pub async fn archive_treaty(
    state: &AppState,
    session: &Session,
    id: TreatyId,
) -> Result<ArchiveResponse> {
    let url = api::endpoint(state, &format!("/api/treaties/{}", id), &[])?;
    let request = authorize(state.http.delete(url), session);
    let response = api::fetch_or_default(request, Expect::Success, "archive treaty").await?;

    tracing::info!("🗄️ Treaty archived: {}", id);
    Ok(response)
}

fn to_json<T: serde::Serialize>(payload: &T) -> Result<String> {
    sonic_rs::to_string(payload)
        .map_err(|e| AppError::Internal(format!("Payload serialization failed: {}", e)))
}
