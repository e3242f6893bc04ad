use std::fmt::Display;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::models::audit_log::{AuditAction, AuditLogEntry};
use crate::view::dom::{Element, Node, el};
use crate::view::message::Tone;

pub const LOADING: &str = "Fetching logs...";
pub const NO_HISTORY: &str = "No audit history found. (Created via bulk import).";
pub const CREATED_LABEL: &str = "Treaty Created.";
pub const ARCHIVED_LABEL: &str = "Treaty Archived.";
pub const UPDATED_LABEL: &str = "Fields Updated: ";

/// The placeholder shown while the history loads.
pub fn loading_item() -> Node {
    message_item(LOADING, Tone::Info)
}

/// A list item carrying a message instead of an entry.
pub fn message_item(text: &str, tone: Tone) -> Node {
    el("li")
        .class(format!("list-group-item {}", tone.text_class()))
        .text(text)
        .into()
}

/// Renders the history, or a note when there is none.
///
/// # Arguments
///
/// * `entries` - The entries as returned by the backend.
/// * `tz` - The zone timestamps are shown in.
pub fn audit_items<Tz>(entries: &[AuditLogEntry], tz: &Tz) -> Vec<Node>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if entries.is_empty() {
        return vec![message_item(NO_HISTORY, Tone::Muted)];
    }
    entries.iter().map(|entry| audit_item(entry, tz)).collect()
}

/// Renders one entry: action, actor prefix, timestamp and what changed.
pub fn audit_item<Tz>(entry: &AuditLogEntry, tz: &Tz) -> Node
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    el("li")
        .class("list-group-item")
        .child(el("strong").text(entry.action.as_str()))
        .text(format!(" by User ID: {}...", entry.actor_prefix()))
        .child(el("br"))
        .child(el("small").class("text-muted").text(format_timestamp(&entry.timestamp, tz)))
        .child(el("br"))
        .child(details(entry))
        .into()
}

fn details(entry: &AuditLogEntry) -> Element {
    let span = el("span").class("text-sm");
    match entry.action {
        AuditAction::Create => span.text(CREATED_LABEL),
        AuditAction::Archive => span.text(ARCHIVED_LABEL),
        AuditAction::Update => entry.field_changes().into_iter().fold(
            span.text(UPDATED_LABEL),
            |span, (field, change)| {
                span.child(el("br"))
                    .text(" ↳ ")
                    .child(el("strong").text(field))
                    .text(format!(": \"{}\" → \"{}\"", change.old, change.new))
            },
        ),
    }
}

/// Formats a backend timestamp as `M/D/YYYY, h:mm:ss AM` in `tz`.
///
/// Timestamps without an offset are taken as UTC. Unparseable values are
/// shown as sent.
pub fn format_timestamp<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|naive| naive.and_utc())
        });

    match parsed {
        Ok(utc) => utc
            .with_timezone(tz)
            .format("%-m/%-d/%Y, %-I:%M:%S %p")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}
