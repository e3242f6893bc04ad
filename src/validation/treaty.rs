use chrono::NaiveDate;
use garde::Validate;

use crate::{
    error::{AppError, Result},
    view::treaty_form::TreatyForm,
};

/// The message shown for a blank required field.
pub const REQUIRED_MESSAGE: &str = "Please fill out this field.";

/// Rejects blank values.
pub fn required(value: &str, _ctx: &()) -> garde::Result {
    if value.is_empty() {
        return Err(garde::Error::new(REQUIRED_MESSAGE));
    }
    Ok(())
}

/// Requires a `YYYY-MM-DD` calendar date.
pub fn required_date(value: &str, ctx: &()) -> garde::Result {
    required(value, ctx)?;
    optional_date(value, ctx)
}

/// Accepts a blank value or a `YYYY-MM-DD` calendar date.
pub fn optional_date(value: &str, _ctx: &()) -> garde::Result {
    if value.is_empty() || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok() {
        return Ok(());
    }
    Err(garde::Error::new("Please enter a valid date (YYYY-MM-DD)."))
}

/// Validates the create form before anything is sent.
///
/// # Arguments
///
/// * `form` - The create form.
///
/// # Returns
///
/// A `Result<()>`; on failure, `AppError::Validation` lists one problem per line.
pub fn validate_create_form(form: &TreatyForm) -> Result<()> {
    form.validate().map_err(|report| {
        let problems: Vec<String> = report
            .iter()
            .map(|(path, error)| format!("{}: {}", path, error))
            .collect();
        AppError::Validation(problems.join("\n"))
    })
}
