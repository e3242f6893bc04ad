use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::{
    models::treaty::{NewTreaty, TreatyUpdate},
    view::treaty_form::TreatyForm,
};

/// Splits a comma-separated country list, trimming entries and dropping blanks.
pub fn split_countries(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|country| !country.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reduces a backend date or timestamp to its `YYYY-MM-DD` calendar date in UTC.
///
/// Accepts plain dates, RFC 3339 timestamps, naive ISO date-times and
/// RFC 2822 strings. Returns `None` for anything else.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.with_timezone(&Utc).date_naive());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(datetime.date());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(datetime.date());
    }
    if let Ok(datetime) = DateTime::parse_from_rfc2822(raw) {
        return Some(datetime.with_timezone(&Utc).date_naive());
    }

    tracing::warn!("⚠️ Unrecognised date value: {}", raw);
    None
}

/// Assembles the create payload from the form.
pub fn new_treaty_from_form(form: &TreatyForm) -> NewTreaty {
    NewTreaty {
        title: form.title.clone(),
        current_status: form.current_status.clone(),
        description: form.description.clone(),
        treaty_type: form.treaty_type.clone(),
        category: form.category.clone(),
        date_signed: form.date_signed.clone(),
        effective_date: form.effective_date.clone(),
        expiry_date: Some(form.expiry_date.clone()).filter(|date| !date.is_empty()),
        signatory_countries: split_countries(&form.signatory_countries),
    }
}

/// Assembles the update payload from the form.
pub fn update_from_form(form: &TreatyForm) -> TreatyUpdate {
    TreatyUpdate {
        title: form.title.clone(),
        current_status: form.current_status.clone(),
        description: form.description.clone(),
        date_signed: form.date_signed.clone(),
        expiry_date: form.expiry_date.clone(),
        category: form.category.clone(),
        treaty_type: form.treaty_type.clone(),
        signatory_countries: split_countries(&form.signatory_countries),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn countries_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            split_countries(" Kenya, ,Ghana ,, Peru"),
            vec!["Kenya".to_string(), "Ghana".to_string(), "Peru".to_string()]
        );
        assert!(split_countries("").is_empty());
        assert!(split_countries(" , ").is_empty());
    }

    #[test]
    fn dates_lose_their_time_component() {
        let expected = NaiveDate::from_ymd_opt(2021, 6, 30);

        assert_eq!(normalize_date("2021-06-30"), expected);
        assert_eq!(normalize_date("2021-06-30T18:45:00Z"), expected);
        assert_eq!(normalize_date("2021-06-30T23:30:00-02:00").map(|d| d.to_string()), Some("2021-07-01".to_string()));
        assert_eq!(normalize_date("2021-06-30T08:00:00.123"), expected);
        assert_eq!(normalize_date("Wed, 30 Jun 2021 00:00:00 GMT"), expected);
    }

    #[test]
    fn unparseable_dates_are_none() {
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("next tuesday"), None);
    }

    #[test]
    fn empty_expiry_becomes_perpetual_on_create_only() {
        let form = TreatyForm {
            title: "Accord".into(),
            signatory_countries: "Kenya, Ghana".into(),
            ..TreatyForm::default()
        };

        let created = new_treaty_from_form(&form);
        let updated = update_from_form(&form);

        assert_eq!(created.expiry_date, None);
        assert_eq!(updated.expiry_date, "");
        assert_eq!(created.signatory_countries, updated.signatory_countries);
    }
}
