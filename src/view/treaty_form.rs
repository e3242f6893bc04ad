use garde::Validate;

use crate::models::treaty::Treaty;
use crate::services::treaties::normalize_date;
use crate::validation::treaty::{optional_date, required, required_date};
use crate::view::dom::{Element, Node, el};

/// The status a form shows when the record has none.
pub const DEFAULT_STATUS: &str = "Draft";

/// Which page a treaty form sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormLayout {
    /// The detail page form (`treaty-form`), without an effective date.
    Detail,
    /// The create page form (`create-treaty-form`).
    Create,
}

impl FormLayout {
    pub fn form_id(&self) -> &'static str {
        match self {
            FormLayout::Detail => "treaty-form",
            FormLayout::Create => "create-treaty-form",
        }
    }
}

/// The values of the treaty form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct TreatyForm {
    #[garde(custom(required))]
    pub title: String,
    #[garde(custom(required))]
    pub current_status: String,
    #[garde(skip)]
    pub description: String,
    #[garde(custom(required))]
    pub treaty_type: String,
    #[garde(custom(required))]
    pub category: String,
    #[garde(custom(required_date))]
    pub date_signed: String,
    #[garde(custom(optional_date))]
    pub effective_date: String,
    #[garde(custom(optional_date))]
    pub expiry_date: String,
    /// Comma-separated, as typed.
    #[garde(skip)]
    pub signatory_countries: String,
}

impl TreatyForm {
    /// Fills every detail field from `treaty`.
    ///
    /// Missing strings become empty, a missing status becomes
    /// [`DEFAULT_STATUS`], and both dates drop any time component.
    pub fn populate(&mut self, treaty: &Treaty) {
        self.title = treaty.title.clone().unwrap_or_default();
        self.current_status = treaty
            .current_status
            .clone()
            .filter(|status| !status.is_empty())
            .unwrap_or_else(|| DEFAULT_STATUS.to_string());
        self.description = treaty.description.clone().unwrap_or_default();
        self.signatory_countries = treaty
            .signatory_countries
            .as_ref()
            .map(|countries| countries.joined())
            .unwrap_or_default();
        self.date_signed = date_input_value(treaty.date_signed.as_deref());
        self.expiry_date = date_input_value(treaty.expiry_date.as_deref());
        self.category = treaty.category.clone().unwrap_or_default();
        self.treaty_type = treaty.treaty_type.clone().unwrap_or_default();
    }

    /// Renders the form with every control enabled or disabled together.
    pub fn to_node(&self, layout: FormLayout, disabled: bool) -> Node {
        let mut fields = vec![
            input("title", "Title", "text", &self.title, disabled),
            input("current_status", "Status", "text", &self.current_status, disabled),
            textarea("description", "Description", &self.description, disabled),
            input("type", "Type", "text", &self.treaty_type, disabled),
            input("category", "Category", "text", &self.category, disabled),
            input("date_signed", "Date Signed", "date", &self.date_signed, disabled),
        ];
        if layout == FormLayout::Create {
            fields.push(input("effective_date", "Effective Date", "date", &self.effective_date, disabled));
        }
        fields.push(input("expiry_date", "Expiry Date", "date", &self.expiry_date, disabled));
        fields.push(input(
            "signatory_countries",
            "Signatory Countries",
            "text",
            &self.signatory_countries,
            disabled,
        ));

        el("form").id(layout.form_id()).children(fields).into()
    }
}

fn date_input_value(raw: Option<&str>) -> String {
    raw.and_then(normalize_date)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn labelled(id: &'static str, label: &str, control: Element) -> Node {
    el("div")
        .class("mb-3")
        .child(el("label").attr("for", id).class("form-label").text(label))
        .child(control)
        .into()
}

fn input(id: &'static str, label: &str, kind: &'static str, value: &str, disabled: bool) -> Node {
    let control = el("input")
        .id(id)
        .class("form-control")
        .attr("type", kind)
        .attr("value", value)
        .flag("disabled", disabled);
    labelled(id, label, control)
}

fn textarea(id: &'static str, label: &str, value: &str, disabled: bool) -> Node {
    let control = el("textarea")
        .id(id)
        .class("form-control")
        .flag("disabled", disabled)
        .text(value);
    labelled(id, label, control)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::treaty::{Signatories, TreatyId};
    use pretty_assertions::assert_eq;

    #[test]
    fn populate_defaults_and_normalizes() {
        let treaty = Treaty {
            id: TreatyId(3),
            title: Some("Accord".into()),
            current_status: None,
            description: None,
            category: Some("Trade".into()),
            treaty_type: None,
            date_signed: Some("2019-11-04T15:30:00Z".into()),
            effective_date: Some("2020-01-01".into()),
            expiry_date: None,
            signatory_countries: Some(Signatories::List(vec!["Chile".into(), "Peru".into()])),
        };

        let mut form = TreatyForm::default();
        form.populate(&treaty);

        assert_eq!(form.title, "Accord");
        assert_eq!(form.current_status, DEFAULT_STATUS);
        assert_eq!(form.description, "");
        assert_eq!(form.date_signed, "2019-11-04");
        assert_eq!(form.expiry_date, "");
        assert_eq!(form.signatory_countries, "Chile, Peru");
        assert_eq!(form.treaty_type, "");
    }

    #[test]
    fn disabled_form_disables_every_control() {
        let form = TreatyForm::default();
        let html = form.to_node(FormLayout::Detail, true).to_html();

        assert_eq!(html.matches("<input").count(), 7);
        assert_eq!(html.matches(" disabled").count(), 8);
        assert!(!html.contains("effective_date"));
    }

    #[test]
    fn create_layout_has_effective_date() {
        let html = TreatyForm::default().to_node(FormLayout::Create, false).to_html();
        assert!(html.contains("id=\"effective_date\""));
        assert!(!html.contains(" disabled"));
    }
}
