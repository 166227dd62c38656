pub mod auth;
pub mod catalog;
pub mod contact;
pub mod courses;
pub mod dashboard;
pub mod enrollment;
pub mod session;

pub use catalog::{EnrolledSet, filter_courses};
pub use dashboard::{StaffStats, StudentStats};
pub use enrollment::{EnrollOutcome, enroll};
pub use session::{Gate, Member, Viewer, require_role, resolve_viewer};
