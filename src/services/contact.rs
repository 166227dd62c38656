use serde::Deserialize;
use tracing::info;

use super::auth::is_valid_email;
use crate::error::AppError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

fn bounded(value: &str, field: &str, max: usize) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(value.to_string())
}

pub fn validate(form: &ContactForm) -> Result<ContactMessage, AppError> {
    let name = bounded(&form.name, "Name", 100)?;
    let email = bounded(&form.email, "Email", 255)?;
    if !is_valid_email(&email) {
        return Err(AppError::Validation("Invalid email address".to_string()));
    }
    let message = bounded(&form.message, "Message", 1000)?;

    Ok(ContactMessage { name, email, message })
}

/// Messages are only validated and logged; there is no mail relay.
pub fn submit(form: &ContactForm) -> Result<ContactMessage, AppError> {
    let message = validate(form)?;
    info!(
        name = %message.name,
        email = %message.email,
        length = message.message.len(),
        "contact message received"
    );
    Ok(message)
}
