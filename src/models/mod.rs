pub mod auth;
pub mod course;
pub mod enrollment;
pub mod profile;

pub use auth::{AuthUser, Session, SignUpOutcome, SignUpRequest};
pub use course::{Course, NewCourseRequest, OwnedCourse};
pub use enrollment::{EnrolledCourse, Enrollment, NewEnrollmentRequest};
pub use profile::{Profile, Role};
