use crate::models::report::{ExpiryCheck, StatusCount};
use crate::models::treaty::Treaty;
use crate::navigation::Page;
use crate::view::dom::{Node, el};
use crate::view::message::Tone;
use crate::view::treaty_list::message_row;

/// Shown for treaties stored without a status.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// Renders one row per status with its treaty count.
pub fn status_rows(counts: &[StatusCount]) -> Vec<Node> {
    if counts.is_empty() {
        return vec![message_row("No active treaties.", None)];
    }
    counts
        .iter()
        .map(|count| {
            el("tr")
                .child(el("td").text(count.status.as_deref().unwrap_or(UNKNOWN_STATUS)))
                .child(el("td").text(count.count.to_string()))
                .into()
        })
        .collect()
}

/// Renders the treaties expiring soon, soonest first as sent.
pub fn expiring_items(treaties: &[Treaty]) -> Vec<Node> {
    if treaties.is_empty() {
        return vec![item("No treaties expire in the next six months.", Some(Tone::Muted))];
    }
    treaties
        .iter()
        .map(|treaty| {
            el("li")
                .class("list-group-item")
                .child(
                    el("a")
                        .attr("href", Page::Detail(treaty.id).href())
                        .text(treaty.title.clone().unwrap_or_default()),
                )
                .text(format!(
                    " expires {}",
                    treaty.expiry_date.as_deref().unwrap_or_default()
                ))
                .into()
        })
        .collect()
}

/// Renders the outcome of an expiry check as alert items.
pub fn expiry_alerts(check: &ExpiryCheck) -> Vec<Node> {
    let summary = format!(
        "{} ({} notifications)",
        check.message.as_deref().unwrap_or("Expiry check complete."),
        check.count
    );

    let mut items = vec![item(&summary, Some(Tone::Info))];
    items.extend(check.notifications.iter().map(|notification| {
        el("li")
            .class("list-group-item text-warning")
            .child(el("strong").text(notification.title.clone().unwrap_or_default()))
            .text(format!(": {}", notification.message))
            .into()
    }));
    items
}

/// A plain list item, optionally toned.
pub fn item(text: &str, tone: Option<Tone>) -> Node {
    let class = match tone {
        Some(tone) => format!("list-group-item {}", tone.text_class()),
        None => "list-group-item".to_string(),
    };
    el("li").class(class).text(text).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::ExpiryNotification;
    use crate::models::treaty::TreatyId;

    #[test]
    fn expiry_alerts_list_each_notification() {
        let check = ExpiryCheck {
            message: Some("Expiry check complete.".into()),
            count: 1,
            notifications: vec![ExpiryNotification {
                treaty_id: TreatyId(4),
                title: Some("Fisheries Pact".into()),
                message: "ALERT: Treaty expiring on 2025-01-01 (within 90 days).".into(),
            }],
        };

        let items = expiry_alerts(&check);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text_content(), "Expiry check complete. (1 notifications)");
        assert!(items[1].text_content().starts_with("Fisheries Pact: ALERT"));
    }

    #[test]
    fn status_rows_show_counts() {
        let rows = status_rows(&[StatusCount {
            status: Some("Active".into()),
            count: 3,
        }]);
        assert_eq!(rows[0].text_content(), "Active3");
    }

    #[test]
    fn missing_status_renders_unknown() {
        let rows = status_rows(&[
            StatusCount {
                status: None,
                count: 2,
            },
            StatusCount {
                status: Some("Draft".into()),
                count: 1,
            },
        ]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text_content(), format!("{}2", UNKNOWN_STATUS));
        assert_eq!(rows[1].text_content(), "Draft1");
    }
}
