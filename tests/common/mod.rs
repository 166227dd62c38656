#![allow(dead_code)]

pub mod http;

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use twinlearn::backend::{Backend, SqliteBackend};
use twinlearn::error::AppError;
use twinlearn::models::{
    Course, EnrolledCourse, Enrollment, NewCourseRequest, NewEnrollmentRequest, OwnedCourse,
    Profile, Role, Session, SignUpOutcome, SignUpRequest,
};
use uuid::Uuid;

pub fn course(title: &str, subject: Option<&str>, level: Option<&str>) -> Course {
    Course {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: None,
        subject: subject.map(str::to_string),
        level: level.map(str::to_string),
        video_url: None,
        thumbnail_url: None,
        instructor_id: Uuid::nil(),
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn enrollment(progress: i32) -> EnrolledCourse {
    EnrolledCourse {
        id: Uuid::new_v4(),
        student_id: Uuid::nil(),
        course_id: Uuid::new_v4(),
        progress,
        course: None,
    }
}

pub async fn backend() -> SqliteBackend {
    SqliteBackend::in_memory()
        .await
        .expect("Failed to create in-memory backend")
}

pub async fn register(backend: &SqliteBackend, email: &str, role: Role) -> Session {
    let outcome = backend
        .sign_up(&SignUpRequest {
            email: email.to_string(),
            password: "secret123".to_string(),
            full_name: format!("{} user", role),
            role,
        })
        .await
        .expect("Failed to sign up");
    outcome.session.expect("Local sign up should open a session")
}

/// Local backend whose read calls can be switched to fail with a transport error.
pub struct FlakyBackend {
    pub inner: SqliteBackend,
    pub fail_profile: AtomicBool,
    pub fail_courses: AtomicBool,
    pub fail_enrollments: AtomicBool,
    pub fail_owned_courses: AtomicBool,
}

impl FlakyBackend {
    pub async fn new() -> Self {
        Self {
            inner: backend().await,
            fail_profile: AtomicBool::new(false),
            fail_courses: AtomicBool::new(false),
            fail_enrollments: AtomicBool::new(false),
            fail_owned_courses: AtomicBool::new(false),
        }
    }

    fn check(flag: &AtomicBool) -> Result<(), AppError> {
        if flag.load(Ordering::SeqCst) {
            Err(AppError::Transport("connection reset".to_string()))
        } else {
            Ok(())
        }
    }
}

pub fn fail(flag: &AtomicBool) {
    flag.store(true, Ordering::SeqCst);
}

#[async_trait]
impl Backend for FlakyBackend {
    async fn ping(&self) -> Result<(), AppError> {
        self.inner.ping().await
    }

    async fn get_session(&self, access_token: &str) -> Result<Option<Session>, AppError> {
        self.inner.get_session(access_token).await
    }

    async fn sign_up(&self, req: &SignUpRequest) -> Result<SignUpOutcome, AppError> {
        self.inner.sign_up(req).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError> {
        self.inner.sign_in(email, password).await
    }

    async fn sign_out(&self, session: &Session) -> Result<(), AppError> {
        self.inner.sign_out(session).await
    }

    async fn fetch_profile(&self, session: &Session, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        Self::check(&self.fail_profile)?;
        self.inner.fetch_profile(session, user_id).await
    }

    async fn list_courses(&self, session: Option<&Session>) -> Result<Vec<Course>, AppError> {
        Self::check(&self.fail_courses)?;
        self.inner.list_courses(session).await
    }

    async fn list_enrollments(
        &self,
        session: &Session,
        student_id: Uuid,
    ) -> Result<Vec<EnrolledCourse>, AppError> {
        Self::check(&self.fail_enrollments)?;
        self.inner.list_enrollments(session, student_id).await
    }

    async fn list_owned_courses(
        &self,
        session: &Session,
        instructor_id: Uuid,
    ) -> Result<Vec<OwnedCourse>, AppError> {
        Self::check(&self.fail_owned_courses)?;
        self.inner.list_owned_courses(session, instructor_id).await
    }

    async fn insert_enrollment(
        &self,
        session: &Session,
        req: &NewEnrollmentRequest,
    ) -> Result<Enrollment, AppError> {
        self.inner.insert_enrollment(session, req).await
    }

    async fn insert_course(&self, session: &Session, req: &NewCourseRequest) -> Result<Course, AppError> {
        self.inner.insert_course(session, req).await
    }
}
