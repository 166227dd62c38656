use serde::Deserialize;
use tracing::{info, warn};

use crate::backend::Backend;
use crate::error::AppError;
use crate::models::{Profile, Role, Session, SignUpOutcome, SignUpRequest};

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_NAME_LEN: usize = 2;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignInForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignUpForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub role: String,
}

pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
}

pub fn validate_email(email: &str) -> Result<String, AppError> {
    let email = email.trim();
    if is_valid_email(email) {
        Ok(email.to_string())
    } else {
        Err(AppError::Validation("Invalid email address".to_string()))
    }
}

fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

pub fn validate_sign_up(form: &SignUpForm) -> Result<SignUpRequest, AppError> {
    let email = validate_email(&form.email)?;
    validate_password(&form.password)?;

    let full_name = form.full_name.trim();
    if full_name.chars().count() < MIN_NAME_LEN {
        return Err(AppError::Validation(format!(
            "Name must be at least {} characters",
            MIN_NAME_LEN
        )));
    }

    let role: Role = form.role.parse().map_err(AppError::Validation)?;

    Ok(SignUpRequest {
        email,
        password: form.password.clone(),
        full_name: full_name.to_string(),
        role,
    })
}

pub async fn sign_up(backend: &dyn Backend, form: &SignUpForm) -> Result<(SignUpOutcome, Role), AppError> {
    let req = validate_sign_up(form)?;
    let outcome = backend.sign_up(&req).await?;
    if outcome.user.is_none() {
        return Err(AppError::Rejected("Sign up did not return a user".to_string()));
    }
    info!("sign up for {} as {}", req.email, req.role);
    Ok((outcome, req.role))
}

/// Signs in and looks up the profile so the caller can pick a dashboard.
pub async fn sign_in(
    backend: &dyn Backend,
    form: &SignInForm,
) -> Result<(Session, Option<Profile>), AppError> {
    let email = validate_email(&form.email)?;
    validate_password(&form.password)?;

    let session = backend.sign_in(&email, &form.password).await?;
    let profile = match backend.fetch_profile(&session, session.user.id).await {
        Ok(profile) => profile,
        Err(e) => {
            warn!("profile fetch after sign in failed: {}", e);
            None
        }
    };
    Ok((session, profile))
}

/// Where to send someone right after signing in.
pub fn landing_path(profile: Option<&Profile>) -> &'static str {
    match profile.map(|p| p.role) {
        Some(role) => role.dashboard_path(),
        None => "/courses",
    }
}
