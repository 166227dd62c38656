use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::Course;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Enrollment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub progress: i32,
}

/// An enrollment joined with its course. The course is missing when the backend hides it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrolledCourse {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub progress: i32,
    #[serde(rename = "courses", default)]
    pub course: Option<Course>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEnrollmentRequest {
    pub student_id: Uuid,
    pub course_id: Uuid,
}
