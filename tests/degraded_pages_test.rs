mod common;

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use common::http::{course_ids, get, post, send, sign_up};
use common::{FlakyBackend, fail};
use twinlearn::api::router;
use twinlearn::state::AppState;

async fn flaky_app() -> (Arc<FlakyBackend>, Router) {
    let backend = Arc::new(FlakyBackend::new().await);
    let app = router(AppState::new(backend.clone()));
    (backend, app)
}

/// Staff account with one course, plus a student enrolled in it.
async fn seeded(app: &Router) -> (String, String, String) {
    let staff = sign_up(app, "teach@example.com", "Tess", "staff").await;
    let created = send(app, post("/staff-dashboard/courses", Some(&staff), "title=Rust+Basics")).await;
    assert_eq!(created.status, StatusCode::OK);
    let course_id = course_ids(&created.body).pop().expect("course should be listed");

    let student = sign_up(app, "learn@example.com", "Lee", "student").await;
    let enrolled = send(app, post(&format!("/courses/{}/enroll", course_id), Some(&student), "q=")).await;
    assert_eq!(enrolled.status, StatusCode::OK);

    (staff, student, course_id)
}

#[tokio::test]
async fn test_catalog_reports_failed_enrollment_lookup() {
    let (backend, app) = flaky_app().await;
    let (_, student, course_id) = seeded(&app).await;

    fail(&backend.fail_enrollments);
    let page = send(&app, get("/courses", Some(&student))).await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Error loading enrollments"));
    assert!(page.body.contains("The service is unreachable"));
    assert_eq!(course_ids(&page.body), vec![course_id]);
}

#[tokio::test]
async fn test_catalog_keeps_enroll_notice_and_load_error() {
    let (backend, app) = flaky_app().await;
    let staff = sign_up(&app, "teach@example.com", "Tess", "staff").await;
    let created = send(&app, post("/staff-dashboard/courses", Some(&staff), "title=Rust+Basics")).await;
    let course_id = course_ids(&created.body).pop().expect("course should be listed");
    let student = sign_up(&app, "learn@example.com", "Lee", "student").await;

    fail(&backend.fail_courses);
    let page = send(&app, post(&format!("/courses/{}/enroll", course_id), Some(&student), "q=")).await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Successfully enrolled!"));
    assert!(page.body.contains("Error loading courses"));
    assert!(page.body.contains("No courses available yet"));
}

#[tokio::test]
async fn test_student_dashboard_reports_failed_enrollment_fetch() {
    let (backend, app) = flaky_app().await;
    let (_, student, _) = seeded(&app).await;

    fail(&backend.fail_enrollments);
    let page = send(&app, get("/student-dashboard", Some(&student))).await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Error fetching enrollments"));
    assert!(page.body.contains("No courses yet"));
    assert!(page.body.contains(r#"<p>Enrolled Courses</p><p class="value">0</p>"#));
}

#[tokio::test]
async fn test_staff_dashboard_reports_failed_course_fetch() {
    let (backend, app) = flaky_app().await;
    let (staff, _, _) = seeded(&app).await;

    fail(&backend.fail_owned_courses);
    let page = send(&app, get("/staff-dashboard", Some(&staff))).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Error fetching courses"));
    assert!(course_ids(&page.body).is_empty());

    // The write still goes through and both outcomes are shown.
    let created = send(&app, post("/staff-dashboard/courses", Some(&staff), "title=Second")).await;
    assert_eq!(created.status, StatusCode::OK);
    assert!(created.body.contains("Course created successfully!"));
    assert!(created.body.contains("Error fetching courses"));
}

#[tokio::test]
async fn test_failed_profile_fetch_degrades_pages() {
    let (backend, app) = flaky_app().await;
    let (_, student, _) = seeded(&app).await;

    fail(&backend.fail_profile);

    let catalog = send(&app, get("/courses", Some(&student))).await;
    assert_eq!(catalog.status, StatusCode::OK);
    assert!(catalog.body.contains("Sign In"));
    assert!(!catalog.body.contains("Enroll Now"));

    let dashboard = send(&app, get("/student-dashboard", Some(&student))).await;
    assert_eq!(dashboard.status, StatusCode::SEE_OTHER);
    assert_eq!(dashboard.location(), Some("/auth"));
}
