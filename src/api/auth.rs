use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;

use super::{clear_session, current_viewer, session_cookie};
use crate::services::auth::{self as auth_service, SignInForm, SignUpForm};
use crate::state::AppState;
use crate::views::auth::{AuthFormValues, AuthTab, auth_page};
use crate::views::Notice;

pub(super) async fn show(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let viewer = current_viewer(&state, &jar).await;
    if let Some(path) = viewer.dashboard_path() {
        return Redirect::to(path).into_response();
    }

    let tab = AuthTab::from_param(params.get("tab").map(String::as_str));
    Html(auth_page(&viewer, tab, &AuthFormValues::default(), None)).into_response()
}

pub(super) async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SignInForm>,
) -> Response {
    match auth_service::sign_in(state.backend.as_ref(), &form).await {
        Ok((session, profile)) => {
            let jar = jar.add(session_cookie(session.access_token, state.cookie_secure));
            let target = auth_service::landing_path(profile.as_ref());
            (jar, Redirect::to(target)).into_response()
        }
        Err(e) => {
            let values = AuthFormValues {
                email: form.email,
                ..AuthFormValues::default()
            };
            let notice = Notice::error("Sign in failed", e.user_message());
            let viewer = current_viewer(&state, &jar).await;
            let page = auth_page(&viewer, AuthTab::SignIn, &values, Some(&notice));
            (e.status(), Html(page)).into_response()
        }
    }
}

pub(super) async fn sign_up(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SignUpForm>,
) -> Response {
    match auth_service::sign_up(state.backend.as_ref(), &form).await {
        Ok((outcome, role)) => match outcome.session {
            Some(session) => {
                let jar = jar.add(session_cookie(session.access_token, state.cookie_secure));
                (jar, Redirect::to(role.dashboard_path())).into_response()
            }
            None => {
                let notice = Notice::success(
                    "Account created successfully!",
                    "Confirm your email address, then sign in.",
                );
                let viewer = current_viewer(&state, &jar).await;
                let values = AuthFormValues {
                    email: form.email,
                    ..AuthFormValues::default()
                };
                Html(auth_page(&viewer, AuthTab::SignIn, &values, Some(&notice))).into_response()
            }
        },
        Err(e) => {
            let values = AuthFormValues {
                email: form.email,
                full_name: form.full_name,
                role: form.role,
            };
            let notice = Notice::error("Sign up failed", e.user_message());
            let viewer = current_viewer(&state, &jar).await;
            let page = auth_page(&viewer, AuthTab::SignUp, &values, Some(&notice));
            (e.status(), Html(page)).into_response()
        }
    }
}

pub(super) async fn sign_out(State(state): State<AppState>, jar: CookieJar) -> Response {
    let viewer = current_viewer(&state, &jar).await;
    if let Some(session) = viewer.session.as_ref() {
        if let Err(e) = state.backend.sign_out(session).await {
            warn!("sign out for {} failed: {}", session.user.id, e);
        }
    }

    (clear_session(jar), Redirect::to("/")).into_response()
}
