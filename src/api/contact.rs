use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;

use super::current_viewer;
use crate::services::contact::{self as contact_service, ContactForm};
use crate::services::Viewer;
use crate::state::AppState;
use crate::views::pages::contact_page;
use crate::views::Notice;

/// Name from the profile, email from the session.
fn prefilled(viewer: &Viewer) -> ContactForm {
    ContactForm {
        name: viewer
            .profile
            .as_ref()
            .and_then(|p| p.full_name.clone())
            .unwrap_or_default(),
        email: viewer
            .session
            .as_ref()
            .and_then(|s| s.user.email.clone())
            .unwrap_or_default(),
        message: String::new(),
    }
}

pub(super) async fn show(State(state): State<AppState>, jar: CookieJar) -> Html<String> {
    let viewer = current_viewer(&state, &jar).await;
    Html(contact_page(&viewer, &prefilled(&viewer), None))
}

pub(super) async fn submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ContactForm>,
) -> Response {
    let viewer = current_viewer(&state, &jar).await;
    match contact_service::submit(&form) {
        Ok(_) => {
            let notice = Notice::success(
                "Message sent successfully!",
                "We'll get back to you as soon as possible.",
            );
            let form = ContactForm {
                message: String::new(),
                ..form
            };
            Html(contact_page(&viewer, &form, Some(&notice))).into_response()
        }
        Err(e) => {
            let notice = Notice::error("Validation error", e.user_message());
            (e.status(), Html(contact_page(&viewer, &form, Some(&notice)))).into_response()
        }
    }
}
