use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The kind of change an audit entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    Create,
    Update,
    Archive,
}

impl AuditAction {
    /// The wire name of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "CREATE",
            AuditAction::Update => "UPDATE",
            AuditAction::Archive => "ARCHIVE",
        }
    }
}

/// A JSON scalar or list recorded in an audit diff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<FieldValue>),
    Object(IndexMap<String, FieldValue>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("null"),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Float(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            FieldValue::Object(_) => {
                let json = sonic_rs::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

/// An old/new pair for one changed field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    pub old: FieldValue,
    pub new: FieldValue,
}

/// One value under an entry's `details`.
///
/// Updates record [`FieldChange`]s; other actions may attach free-form notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuditDetail {
    Change(FieldChange),
    Note(FieldValue),
}

/// An immutable record of a create, update or archive on a treaty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub action: AuditAction,
    pub user_id: String,
    pub timestamp: String,
    #[serde(default)]
    pub details: Option<IndexMap<String, AuditDetail>>,
}

impl AuditLogEntry {
    /// The changed fields, in recorded order. Empty unless the action is an update.
    pub fn field_changes(&self) -> Vec<(&str, &FieldChange)> {
        if self.action != AuditAction::Update {
            return Vec::new();
        }

        self.details
            .iter()
            .flatten()
            .filter_map(|(field, detail)| match detail {
                AuditDetail::Change(change) => Some((field.as_str(), change)),
                AuditDetail::Note(_) => None,
            })
            .collect()
    }

    /// The first eight characters of the acting user's identifier.
    pub fn actor_prefix(&self) -> &str {
        match self.user_id.char_indices().nth(8) {
            Some((end, _)) => &self.user_id[..end],
            None => &self.user_id,
        }
    }
}
