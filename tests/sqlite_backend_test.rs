mod common;

use common::{backend, register};
use twinlearn::backend::Backend;
use twinlearn::error::AppError;
use twinlearn::models::{NewCourseRequest, NewEnrollmentRequest, Role, SignUpRequest};

fn new_course(title: &str, instructor_id: uuid::Uuid) -> NewCourseRequest {
    NewCourseRequest {
        title: title.to_string(),
        description: None,
        subject: None,
        level: None,
        video_url: None,
        thumbnail_url: None,
        instructor_id,
    }
}

#[tokio::test]
async fn test_sign_up_creates_profile_and_session() {
    let backend = backend().await;
    let session = register(&backend, "Ada@Example.com", Role::Staff).await;

    assert_eq!(session.user.email.as_deref(), Some("ada@example.com"));

    let resolved = backend
        .get_session(&session.access_token)
        .await
        .expect("Failed to look up session")
        .expect("Session should exist");
    assert_eq!(resolved.user.id, session.user.id);

    let profile = backend
        .fetch_profile(&session, session.user.id)
        .await
        .expect("Failed to fetch profile")
        .expect("Profile should exist");
    assert_eq!(profile.role, Role::Staff);
    assert_eq!(profile.full_name.as_deref(), Some("staff user"));
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let backend = backend().await;
    register(&backend, "dup@example.com", Role::Student).await;

    let result = backend
        .sign_up(&SignUpRequest {
            email: "DUP@example.com".to_string(),
            password: "another1".to_string(),
            full_name: "Someone".to_string(),
            role: Role::Student,
        })
        .await;
    assert!(matches!(result, Err(AppError::Rejected(msg)) if msg == "User already registered"));
}

#[tokio::test]
async fn test_sign_in_and_sign_out() {
    let backend = backend().await;
    register(&backend, "sam@example.com", Role::Student).await;

    let wrong = backend.sign_in("sam@example.com", "wrong-password").await;
    assert!(matches!(wrong, Err(AppError::Rejected(_))));

    let session = backend
        .sign_in("sam@example.com", "secret123")
        .await
        .expect("Sign in should succeed");

    backend.sign_out(&session).await.expect("Sign out should succeed");
    let gone = backend
        .get_session(&session.access_token)
        .await
        .expect("Lookup should not fail");
    assert!(gone.is_none());
}

#[tokio::test]
async fn test_courses_are_listed_newest_first_with_counts() {
    let backend = backend().await;
    let staff = register(&backend, "teach@example.com", Role::Staff).await;
    let student = register(&backend, "learn@example.com", Role::Student).await;

    let first = backend
        .insert_course(&staff, &new_course("First", staff.user.id))
        .await
        .expect("Failed to insert course");
    let second = backend
        .insert_course(&staff, &new_course("Second", staff.user.id))
        .await
        .expect("Failed to insert course");

    let all = backend.list_courses(None).await.expect("Failed to list courses");
    let titles: Vec<&str> = all.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Second", "First"]);

    backend
        .insert_enrollment(
            &student,
            &NewEnrollmentRequest { student_id: student.user.id, course_id: first.id },
        )
        .await
        .expect("Failed to enroll");

    let owned = backend
        .list_owned_courses(&staff, staff.user.id)
        .await
        .expect("Failed to list owned courses");
    assert_eq!(owned.len(), 2);
    let count_of = |id| owned.iter().find(|o| o.course.id == id).map(|o| o.enrollment_count);
    assert_eq!(count_of(first.id), Some(1));
    assert_eq!(count_of(second.id), Some(0));

    let enrollments = backend
        .list_enrollments(&student, student.user.id)
        .await
        .expect("Failed to list enrollments");
    assert_eq!(enrollments.len(), 1);
    assert_eq!(enrollments[0].progress, 0);
    assert_eq!(enrollments[0].course.as_ref().map(|c| c.title.as_str()), Some("First"));
}

#[tokio::test]
async fn test_duplicate_enrollment_is_rejected_by_constraint() {
    let backend = backend().await;
    let staff = register(&backend, "teach@example.com", Role::Staff).await;
    let student = register(&backend, "learn@example.com", Role::Student).await;
    let course = backend
        .insert_course(&staff, &new_course("Only once", staff.user.id))
        .await
        .expect("Failed to insert course");

    let req = NewEnrollmentRequest { student_id: student.user.id, course_id: course.id };
    backend.insert_enrollment(&student, &req).await.expect("First enrollment should succeed");

    let second = backend.insert_enrollment(&student, &req).await;
    match second {
        Err(AppError::Rejected(msg)) => assert!(msg.contains("UNIQUE"), "unexpected message: {}", msg),
        other => panic!("expected a constraint rejection, got {:?}", other),
    }

    let enrollments = backend
        .list_enrollments(&student, student.user.id)
        .await
        .expect("Failed to list enrollments");
    assert_eq!(enrollments.len(), 1);
}

#[tokio::test]
async fn test_row_policies() {
    let backend = backend().await;
    let staff = register(&backend, "teach@example.com", Role::Staff).await;
    let student = register(&backend, "learn@example.com", Role::Student).await;
    let other = register(&backend, "other@example.com", Role::Student).await;

    // Students cannot create courses, staff cannot create them for someone else.
    let by_student = backend.insert_course(&student, &new_course("Nope", student.user.id)).await;
    assert!(matches!(by_student, Err(AppError::Rejected(_))));
    let as_other = backend.insert_course(&staff, &new_course("Nope", student.user.id)).await;
    assert!(matches!(as_other, Err(AppError::Rejected(_))));

    let course = backend
        .insert_course(&staff, &new_course("Open", staff.user.id))
        .await
        .expect("Failed to insert course");

    // Nobody enrolls on behalf of another student, and staff cannot enroll at all.
    let for_other = backend
        .insert_enrollment(&student, &NewEnrollmentRequest { student_id: other.user.id, course_id: course.id })
        .await;
    assert!(matches!(for_other, Err(AppError::Rejected(_))));
    let staff_enroll = backend
        .insert_enrollment(&staff, &NewEnrollmentRequest { student_id: staff.user.id, course_id: course.id })
        .await;
    assert!(matches!(staff_enroll, Err(AppError::Rejected(_))));

    // Reading someone else's enrollments yields nothing.
    let peeked = backend
        .list_enrollments(&student, other.user.id)
        .await
        .expect("Listing should not fail");
    assert!(peeked.is_empty());
}

#[tokio::test]
async fn test_expired_sessions_stop_resolving_and_are_pruned() {
    let backend = backend().await;
    let stale = register(&backend, "stale@example.com", Role::Student).await;

    sqlx::query("UPDATE sessions SET expires_at = ?1 WHERE access_token = ?2")
        .bind(chrono::Utc::now().timestamp() - 1)
        .bind(&stale.access_token)
        .execute(backend.pool())
        .await
        .expect("Failed to age session");

    let resolved = backend
        .get_session(&stale.access_token)
        .await
        .expect("Lookup should not fail");
    assert!(resolved.is_none());

    // Opening any new session clears the expired row.
    let fresh = register(&backend, "fresh@example.com", Role::Student).await;
    let remaining: Vec<String> = sqlx::query_scalar("SELECT access_token FROM sessions")
        .fetch_all(backend.pool())
        .await
        .expect("Failed to list sessions");
    assert_eq!(remaining, vec![fresh.access_token]);
}
