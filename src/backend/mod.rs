pub mod dto;
pub mod sqlite;
pub mod supabase;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{
    Course, EnrolledCourse, Enrollment, NewCourseRequest, NewEnrollmentRequest, OwnedCourse,
    Profile, Session, SignUpOutcome, SignUpRequest,
};

pub use sqlite::SqliteBackend;
pub use supabase::{SupabaseBackend, SupabaseConfig};

/// Auth, storage and access control live behind this trait.
///
/// Implementations are the final authority on constraints: duplicate
/// enrollments and writes on behalf of another user are rejected here with
/// [`AppError::Rejected`], never silently accepted.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Cheap round trip used by `/health`.
    async fn ping(&self) -> Result<(), AppError>;

    /// Exchanges an access token for the session it belongs to.
    /// Unknown or expired tokens yield `Ok(None)`.
    async fn get_session(&self, access_token: &str) -> Result<Option<Session>, AppError>;

    async fn sign_up(&self, req: &SignUpRequest) -> Result<SignUpOutcome, AppError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError>;

    async fn sign_out(&self, session: &Session) -> Result<(), AppError>;

    async fn fetch_profile(&self, session: &Session, user_id: Uuid) -> Result<Option<Profile>, AppError>;

    /// All courses, newest first.
    async fn list_courses(&self, session: Option<&Session>) -> Result<Vec<Course>, AppError>;

    async fn list_enrollments(
        &self,
        session: &Session,
        student_id: Uuid,
    ) -> Result<Vec<EnrolledCourse>, AppError>;

    async fn list_owned_courses(
        &self,
        session: &Session,
        instructor_id: Uuid,
    ) -> Result<Vec<OwnedCourse>, AppError>;

    async fn insert_enrollment(
        &self,
        session: &Session,
        req: &NewEnrollmentRequest,
    ) -> Result<Enrollment, AppError>;

    async fn insert_course(&self, session: &Session, req: &NewCourseRequest) -> Result<Course, AppError>;
}
