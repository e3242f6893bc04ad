use serde::Deserialize;

use crate::models::treaty::TreatyId;

/// The number of active treaties in one status.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusCount {
    /// `None` for treaties stored without a status.
    #[serde(default)]
    pub status: Option<String>,
    pub count: u64,
}

/// One alert raised by the expiry check.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExpiryNotification {
    pub treaty_id: TreatyId,
    #[serde(default)]
    pub title: Option<String>,
    pub message: String,
}

/// The result of an expiry check run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExpiryCheck {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub notifications: Vec<ExpiryNotification>,
}
