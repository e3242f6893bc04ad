use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The role a signed-in user holds.
///
/// ⚠️ Roles only decide which controls the client shows. The backend must
/// enforce authorization itself; a modified client can ignore these checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    PolicyOfficer,
    Auditor,
}

impl Role {
    /// The role's stored name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::PolicyOfficer => "policy_officer",
            Role::Auditor => "auditor",
        }
    }

    /// Whether the role may see write controls.
    pub fn can_write(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "policy_officer" => Ok(Role::PolicyOfficer),
            "auditor" => Ok(Role::Auditor),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Represents a signed-in user session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The opaque bearer token sent with every request.
    pub token: String,
    /// The role used for UI gating. `None` if the stored value is unrecognised.
    pub role: Option<Role>,
}

impl Session {
    /// Whether this session may see write controls.
    pub fn can_write(&self) -> bool {
        self.role.is_some_and(|role| role.can_write())
    }
}
