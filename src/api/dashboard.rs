use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;

use super::current_viewer;
use crate::models::Role;
use crate::services::courses::{CourseForm, create_course as create_course_service};
use crate::services::{Gate, Member, StaffStats, StudentStats, Viewer, require_role};
use crate::state::AppState;
use crate::views::dashboard::{StaffDashboardView, StudentDashboardView, staff_page, student_page};
use crate::views::Notice;

pub(super) async fn student(State(state): State<AppState>, jar: CookieJar) -> Response {
    let viewer = current_viewer(&state, &jar).await;
    let member = match require_role(viewer.clone(), Role::Student) {
        Gate::Allowed(member) => member,
        Gate::Redirect(path) => return Redirect::to(path).into_response(),
    };

    let (enrollments, notices) = match state
        .backend
        .list_enrollments(&member.session, member.session.user.id)
        .await
    {
        Ok(enrollments) => (enrollments, Vec::new()),
        Err(e) => {
            warn!("failed to load enrollments for {}: {}", member.session.user.id, e);
            (Vec::new(), vec![Notice::error("Error fetching enrollments", e.user_message())])
        }
    };

    let view = StudentDashboardView {
        viewer: &viewer,
        enrollments: &enrollments,
        stats: StudentStats::from_enrollments(&enrollments),
        notices,
    };
    Html(student_page(&view)).into_response()
}

pub(super) async fn staff(State(state): State<AppState>, jar: CookieJar) -> Response {
    let viewer = current_viewer(&state, &jar).await;
    match require_role(viewer.clone(), Role::Staff) {
        Gate::Allowed(member) => {
            let page = render_staff(&state, &viewer, &member, &CourseForm::default(), None).await;
            Html(page).into_response()
        }
        Gate::Redirect(path) => Redirect::to(path).into_response(),
    }
}

pub(super) async fn create_course(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CourseForm>,
) -> Response {
    let viewer = current_viewer(&state, &jar).await;
    let member = match require_role(viewer.clone(), Role::Staff) {
        Gate::Allowed(member) => member,
        Gate::Redirect(path) => return Redirect::to(path).into_response(),
    };

    let (status, form, notice) =
        match create_course_service(state.backend.as_ref(), &member, &form).await {
            Ok(course) => (
                StatusCode::OK,
                CourseForm::default(),
                Notice::success("Course created successfully!", course.title),
            ),
            Err(e) => (e.status(), form, Notice::error("Error creating course", e.user_message())),
        };

    let page = render_staff(&state, &viewer, &member, &form, Some(notice)).await;
    (status, Html(page)).into_response()
}

async fn render_staff(
    state: &AppState,
    viewer: &Viewer,
    member: &Member,
    form: &CourseForm,
    notice: Option<Notice>,
) -> String {
    let mut notices: Vec<Notice> = notice.into_iter().collect();
    let courses = match state
        .backend
        .list_owned_courses(&member.session, member.session.user.id)
        .await
    {
        Ok(courses) => courses,
        Err(e) => {
            warn!("failed to load courses for {}: {}", member.session.user.id, e);
            notices.push(Notice::error("Error fetching courses", e.user_message()));
            Vec::new()
        }
    };

    let view = StaffDashboardView {
        viewer,
        courses: &courses,
        stats: StaffStats::from_courses(&courses),
        form,
        notices,
    };
    staff_page(&view)
}
