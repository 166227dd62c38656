use tracing::info;
use uuid::Uuid;

use super::session::Viewer;
use crate::backend::Backend;
use crate::error::AppError;
use crate::models::{Enrollment, NewEnrollmentRequest};

pub const ONLY_STUDENTS: &str = "Staff members cannot enroll in courses";

#[derive(Debug)]
pub enum EnrollOutcome {
    /// Nobody is signed in; nothing was written.
    SignInRequired,
    Enrolled(Enrollment),
}

/// Writes one enrollment for the signed-in student. Duplicates are left for
/// the backend to reject.
pub async fn enroll(
    backend: &dyn Backend,
    viewer: &Viewer,
    course_id: Uuid,
) -> Result<EnrollOutcome, AppError> {
    let Some(session) = viewer.session.as_ref() else {
        return Ok(EnrollOutcome::SignInRequired);
    };

    if !viewer.role().is_some_and(|role| role.can_enroll()) {
        return Err(AppError::Validation(ONLY_STUDENTS.to_string()));
    }

    let req = NewEnrollmentRequest {
        student_id: session.user.id,
        course_id,
    };
    let enrollment = backend.insert_enrollment(session, &req).await?;
    info!("student {} enrolled in {}", req.student_id, course_id);

    Ok(EnrollOutcome::Enrolled(enrollment))
}
