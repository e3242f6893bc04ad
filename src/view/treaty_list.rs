use crate::models::treaty::Treaty;
use crate::navigation::Page;
use crate::view::dom::{Node, el};
use crate::view::message::Tone;

/// Shown in the signatories cell when a treaty lists none.
pub const NO_SIGNATORIES: &str = "N/A";
/// Shown in the expiry cell when a treaty never expires.
pub const PERPETUAL: &str = "Perpetual";
/// Shown when a search matches nothing.
pub const NO_MATCHES: &str = "No treaties found matching criteria.";

const COLUMNS: &str = "4";

/// Renders one table row per treaty, or a single informational row when empty.
pub fn treaty_rows(treaties: &[Treaty]) -> Vec<Node> {
    if treaties.is_empty() {
        return vec![message_row(NO_MATCHES, None)];
    }
    treaties.iter().map(treaty_row).collect()
}

/// Renders a single row for `treaty`.
pub fn treaty_row(treaty: &Treaty) -> Node {
    let title = treaty.title.clone().unwrap_or_default();
    let status = treaty.current_status.clone().unwrap_or_default();
    let signatories = treaty
        .signatories_display()
        .unwrap_or_else(|| NO_SIGNATORIES.to_string());
    let expiry = treaty
        .expiry_date
        .clone()
        .filter(|date| !date.is_empty())
        .unwrap_or_else(|| PERPETUAL.to_string());

    el("tr")
        .child(el("td").child(el("a").attr("href", Page::Detail(treaty.id).href()).text(title)))
        .child(el("td").text(status))
        .child(el("td").text(signatories))
        .child(el("td").text(expiry))
        .into()
}

/// Renders a full-width row holding a message instead of data.
pub fn message_row(text: &str, tone: Option<Tone>) -> Node {
    let cell = el("td").attr("colspan", COLUMNS);
    let cell = match tone {
        Some(tone) => cell.class(tone.text_class()),
        None => cell,
    };
    el("tr").child(cell.text(text)).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::treaty::{Signatories, TreatyId};
    use pretty_assertions::assert_eq;

    fn treaty(expiry: Option<&str>, countries: Option<Signatories>) -> Treaty {
        Treaty {
            id: TreatyId(12),
            title: Some("Nile Basin Accord".into()),
            current_status: Some("Active".into()),
            description: None,
            category: None,
            treaty_type: None,
            date_signed: None,
            effective_date: None,
            expiry_date: expiry.map(str::to_string),
            signatory_countries: countries,
        }
    }

    fn cells(row: &Node) -> Vec<String> {
        let Node::Element(tr) = row else { panic!("row is not an element") };
        tr.children.iter().map(Node::text_content).collect()
    }

    #[test]
    fn null_expiry_renders_perpetual() {
        let row = treaty_row(&treaty(None, None));
        assert_eq!(cells(&row)[3], PERPETUAL);
    }

    #[test]
    fn dated_expiry_renders_the_date() {
        let row = treaty_row(&treaty(Some("2031-01-01"), None));
        assert_eq!(cells(&row)[3], "2031-01-01");
    }

    #[test]
    fn missing_or_empty_signatories_render_fallback() {
        let absent = treaty_row(&treaty(None, None));
        let empty = treaty_row(&treaty(None, Some(Signatories::List(vec![]))));
        let listed = treaty_row(&treaty(
            None,
            Some(Signatories::List(vec!["Egypt".into(), "Sudan".into()])),
        ));

        assert_eq!(cells(&absent)[2], NO_SIGNATORIES);
        assert_eq!(cells(&empty)[2], NO_SIGNATORIES);
        assert_eq!(cells(&listed)[2], "Egypt, Sudan");
    }

    #[test]
    fn title_links_to_detail_page() {
        let row = treaty_row(&treaty(None, None));
        assert!(row.to_html().contains(r#"<a href="detail.html?id=12">Nile Basin Accord</a>"#));
    }

    #[test]
    fn empty_result_renders_one_info_row() {
        let rows = treaty_rows(&[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text_content(), NO_MATCHES);
    }

    #[test]
    fn markup_in_titles_stays_text() {
        let mut hostile = treaty(None, None);
        hostile.title = Some("<img src=x onerror=alert(1)>".into());
        let html = treaty_row(&hostile).to_html();
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
    }
}
