use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use super::current_viewer;
use crate::error::AppError;
use crate::models::Course;
use crate::services::{EnrollOutcome, EnrolledSet, Viewer, enroll as enroll_service, filter_courses};
use crate::state::AppState;
use crate::views::courses::{CatalogView, catalog_page};
use crate::views::Notice;

#[derive(Debug, Default, Deserialize)]
pub(super) struct CatalogParams {
    #[serde(default)]
    q: String,
}

pub(super) async fn catalog(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CatalogParams>,
) -> Html<String> {
    let viewer = current_viewer(&state, &jar).await;
    Html(render_catalog(&state, &viewer, &params.q, None).await)
}

pub(super) async fn enroll(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(course_id): Path<String>,
    Form(params): Form<CatalogParams>,
) -> Response {
    let Ok(course_id) = Uuid::parse_str(&course_id) else {
        return AppError::Validation("Invalid course id".to_string()).into_response();
    };
    let viewer = current_viewer(&state, &jar).await;

    let (status, notice) = match enroll_service(state.backend.as_ref(), &viewer, course_id).await {
        Ok(EnrollOutcome::SignInRequired) => return Redirect::to("/auth").into_response(),
        Ok(EnrollOutcome::Enrolled(_)) => (
            StatusCode::OK,
            Notice::success("Successfully enrolled!", "Check your dashboard to start learning"),
        ),
        Err(e @ AppError::Validation(_)) => {
            (e.status(), Notice::error("Only students can enroll", e.user_message()))
        }
        Err(e) => (e.status(), Notice::error("Enrollment failed", e.user_message())),
    };

    // Always re-read from the backend instead of patching what we had.
    let page = render_catalog(&state, &viewer, &params.q, Some(notice)).await;
    (status, Html(page)).into_response()
}

struct CatalogData {
    courses: Vec<Course>,
    enrolled: EnrolledSet,
    /// Read failures, each shown as its own notice.
    errors: Vec<Notice>,
}

async fn load_catalog(state: &AppState, viewer: &Viewer) -> CatalogData {
    let mut errors = Vec::new();

    let mut enrolled = EnrolledSet::default();
    if let (Some(session), Some(true)) = (viewer.session.as_ref(), viewer.role().map(|r| r.can_enroll())) {
        match state.backend.list_enrollments(session, session.user.id).await {
            Ok(enrollments) => enrolled = EnrolledSet::from_enrollments(&enrollments),
            Err(e) => {
                warn!("failed to load enrollments for {}: {}", session.user.id, e);
                errors.push(Notice::error("Error loading enrollments", e.user_message()));
            }
        }
    }

    let courses = match state.backend.list_courses(viewer.session.as_ref()).await {
        Ok(courses) => courses,
        Err(e) => {
            warn!("failed to load courses: {}", e);
            errors.push(Notice::error("Error loading courses", e.user_message()));
            Vec::new()
        }
    };

    CatalogData { courses, enrolled, errors }
}

async fn render_catalog(state: &AppState, viewer: &Viewer, query: &str, notice: Option<Notice>) -> String {
    let data = load_catalog(state, viewer).await;
    let notices = notice.into_iter().chain(data.errors).collect();

    let view = CatalogView {
        viewer,
        query,
        courses: filter_courses(&data.courses, query),
        enrolled: &data.enrolled,
        notices,
    };
    catalog_page(&view)
}
