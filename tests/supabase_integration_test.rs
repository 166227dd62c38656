use std::env;

use twinlearn::backend::{Backend, SupabaseBackend, SupabaseConfig};
use twinlearn::models::{NewEnrollmentRequest, Role};

fn live_backend() -> SupabaseBackend {
    dotenvy::dotenv().ok();
    let config = SupabaseConfig::from_env()
        .expect("Invalid Supabase config")
        .expect("SUPABASE_URL and SUPABASE_ANON_KEY must be set");
    SupabaseBackend::new(config).expect("Failed to create Supabase backend")
}

fn credentials(prefix: &str) -> (String, String) {
    let email = env::var(format!("{}_EMAIL", prefix)).expect("test email must be set");
    let password = env::var(format!("{}_PASSWORD", prefix)).expect("test password must be set");
    (email, password)
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored --test-threads=1
async fn test_public_catalog_is_readable() {
    let backend = live_backend();

    backend.ping().await.expect("Supabase should be reachable");
    let courses = backend.list_courses(None).await.expect("Failed to list courses");
    for pair in courses.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at, "courses should be newest first");
    }
}

#[tokio::test]
#[ignore]
async fn test_student_session_round_trip() {
    let backend = live_backend();
    let (email, password) = credentials("TWINLEARN_TEST_STUDENT");

    let session = backend.sign_in(&email, &password).await.expect("Failed to sign in");
    let resolved = backend
        .get_session(&session.access_token)
        .await
        .expect("Failed to read session")
        .expect("Fresh token should resolve");
    assert_eq!(resolved.user.id, session.user.id);

    let profile = backend
        .fetch_profile(&session, session.user.id)
        .await
        .expect("Failed to fetch profile")
        .expect("Test student should have a profile");
    assert_eq!(profile.role, Role::Student);

    let enrollments = backend
        .list_enrollments(&session, session.user.id)
        .await
        .expect("Failed to list enrollments");
    assert!(enrollments.iter().all(|e| e.student_id == session.user.id));

    backend.sign_out(&session).await.expect("Failed to sign out");
}

#[tokio::test]
#[ignore]
async fn test_duplicate_enrollment_is_rejected() {
    let backend = live_backend();
    let (email, password) = credentials("TWINLEARN_TEST_STUDENT");
    let session = backend.sign_in(&email, &password).await.expect("Failed to sign in");

    let enrolled = backend
        .list_enrollments(&session, session.user.id)
        .await
        .expect("Failed to list enrollments");
    let Some(existing) = enrolled.first() else {
        eprintln!("test student has no enrollments; nothing to duplicate");
        return;
    };

    let req = NewEnrollmentRequest {
        student_id: session.user.id,
        course_id: existing.course_id,
    };
    let result = backend.insert_enrollment(&session, &req).await;
    assert!(result.is_err(), "second enrollment in the same course should fail");
}
