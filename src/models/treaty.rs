use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The backend's identifier for a treaty record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreatyId(pub i64);

impl fmt::Display for TreatyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TreatyId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(TreatyId)
    }
}

/// The signatory list as the backend sends it.
///
/// Records normally carry a list, but older rows hold a single
/// comma-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Signatories {
    List(Vec<String>),
    Text(String),
}

impl Signatories {
    /// Joins the signatories with `", "`.
    pub fn joined(&self) -> String {
        match self {
            Signatories::List(countries) => countries.join(", "),
            Signatories::Text(text) => text.clone(),
        }
    }
}

/// A treaty record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Treaty {
    /// The unique identifier for the treaty.
    pub id: TreatyId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub current_status: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "type", default)]
    pub treaty_type: Option<String>,
    #[serde(default)]
    pub date_signed: Option<String>,
    #[serde(default)]
    pub effective_date: Option<String>,
    /// `None` means the treaty is perpetual.
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub signatory_countries: Option<Signatories>,
}

impl Treaty {
    /// The joined signatory list, or `None` when absent or empty.
    pub fn signatories_display(&self) -> Option<String> {
        self.signatory_countries
            .as_ref()
            .map(Signatories::joined)
            .filter(|joined| !joined.is_empty())
    }
}

/// The payload POSTed to create a treaty.
///
/// `effective_date` is only sent on create; see [`TreatyUpdate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTreaty {
    pub title: String,
    pub current_status: String,
    pub description: String,
    #[serde(rename = "type")]
    pub treaty_type: String,
    pub category: String,
    pub date_signed: String,
    pub effective_date: String,
    /// Serialized as `null` for a perpetual treaty.
    pub expiry_date: Option<String>,
    pub signatory_countries: Vec<String>,
}

/// The payload PUT to update a treaty.
///
/// Unlike [`NewTreaty`] this carries no `effective_date` and sends the expiry
/// date exactly as typed. The backend accepts both shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreatyUpdate {
    pub title: String,
    pub current_status: String,
    pub description: String,
    pub date_signed: String,
    pub expiry_date: String,
    pub category: String,
    #[serde(rename = "type")]
    pub treaty_type: String,
    pub signatory_countries: Vec<String>,
}

/// The body of a successful create: the stored record, of which only the
/// title is relied on.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatedTreaty {
    #[serde(default)]
    pub id: Option<TreatyId>,
    #[serde(default)]
    pub title: Option<String>,
}

/// The body of a successful update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// The body of a successful archive. A `204` has none.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArchiveResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Optional filters for the treaty list.
///
/// `None` means the input is not on the page; an empty string means it is
/// present but blank. Neither filters anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreatyFilters {
    pub term: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
}

impl TreatyFilters {
    /// The query parameters to send, in `term`, `status`, `category` order.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("term", self.term.as_deref()),
            ("status", self.status.as_deref()),
            ("category", self.category.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| (key, v)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn treaty_tolerates_missing_fields() {
        let treaty: Treaty = sonic_rs::from_str(r#"{"id": 7, "title": "Accord", "expiry_date": null}"#).unwrap();

        assert_eq!(treaty.id, TreatyId(7));
        assert_eq!(treaty.title.as_deref(), Some("Accord"));
        assert_eq!(treaty.expiry_date, None);
        assert_eq!(treaty.signatories_display(), None);
    }

    #[test]
    fn signatories_accept_list_or_text() {
        let listed: Treaty =
            sonic_rs::from_str(r#"{"id": 1, "signatory_countries": ["Kenya", "Ghana"]}"#).unwrap();
        let text: Treaty =
            sonic_rs::from_str(r#"{"id": 2, "signatory_countries": "Kenya, Ghana"}"#).unwrap();
        let empty: Treaty = sonic_rs::from_str(r#"{"id": 3, "signatory_countries": []}"#).unwrap();

        assert_eq!(listed.signatories_display().as_deref(), Some("Kenya, Ghana"));
        assert_eq!(text.signatories_display().as_deref(), Some("Kenya, Ghana"));
        assert_eq!(empty.signatories_display(), None);
    }

    #[test]
    fn type_field_is_renamed() {
        let treaty: Treaty = sonic_rs::from_str(r#"{"id": 1, "type": "Bilateral"}"#).unwrap();
        assert_eq!(treaty.treaty_type.as_deref(), Some("Bilateral"));
    }

    #[test]
    fn filters_keep_only_present_values() {
        let filters = TreatyFilters {
            term: Some("nile".into()),
            status: Some(String::new()),
            category: None,
        };
        assert_eq!(filters.query_pairs(), vec![("term", "nile")]);
        assert!(TreatyFilters::default().query_pairs().is_empty());
    }

    #[test]
    fn perpetual_create_payload_sends_null_expiry() {
        let payload = NewTreaty {
            title: "Accord".into(),
            current_status: "Draft".into(),
            description: String::new(),
            treaty_type: "Bilateral".into(),
            category: "Trade".into(),
            date_signed: "2024-01-02".into(),
            effective_date: String::new(),
            expiry_date: None,
            signatory_countries: vec!["Kenya".into()],
        };
        let json = sonic_rs::to_string(&payload).unwrap();

        assert!(json.contains(r#""expiry_date":null"#));
        assert!(json.contains(r#""type":"Bilateral""#));
    }
}
