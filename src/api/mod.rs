mod auth;
mod contact;
mod courses;
mod dashboard;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::Router;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::services::{Viewer, resolve_viewer};
use crate::state::AppState;
use crate::views;

pub const SESSION_COOKIE: &str = "twinlearn_session";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", get(landing))
        .route("/about", get(about))
        .route("/contact", get(contact::show).post(contact::submit))
        .route("/auth", get(auth::show))
        .route("/auth/sign-in", post(auth::sign_in))
        .route("/auth/sign-up", post(auth::sign_up))
        .route("/auth/sign-out", post(auth::sign_out))
        .route("/courses", get(courses::catalog))
        .route("/courses/{id}/enroll", post(courses::enroll))
        .route("/student-dashboard", get(dashboard::student))
        .route("/staff-dashboard", get(dashboard::staff))
        .route("/staff-dashboard/courses", post(dashboard::create_course))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.backend.ping().await?;
    Ok(StatusCode::OK)
}

async fn not_found() -> AppError {
    AppError::NotFound
}

async fn landing(State(state): State<AppState>, jar: CookieJar) -> Html<String> {
    let viewer = current_viewer(&state, &jar).await;
    Html(views::pages::landing_page(&viewer))
}

async fn about(State(state): State<AppState>, jar: CookieJar) -> Html<String> {
    let viewer = current_viewer(&state, &jar).await;
    Html(views::pages::about_page(&viewer))
}

pub(crate) async fn current_viewer(state: &AppState, jar: &CookieJar) -> Viewer {
    let token = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
    resolve_viewer(state.backend.as_ref(), token.as_deref()).await
}

pub(crate) fn session_cookie(access_token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, access_token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

pub(crate) fn clear_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}
