use crate::models::{EnrolledCourse, OwnedCourse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudentStats {
    pub enrolled: usize,
    /// Rounded to the nearest integer; 0 when there are no enrollments.
    pub average_progress: i64,
    /// Enrollments at exactly 100.
    pub completed: usize,
}

impl StudentStats {
    pub fn from_enrollments(enrollments: &[EnrolledCourse]) -> Self {
        let total: i64 = enrollments.iter().map(|e| i64::from(e.progress)).sum();
        let divisor = enrollments.len().max(1) as f64;

        Self {
            enrolled: enrollments.len(),
            average_progress: (total as f64 / divisor).round() as i64,
            completed: enrollments.iter().filter(|e| e.progress == 100).count(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaffStats {
    pub total_courses: usize,
    pub total_students: i64,
    pub videos_uploaded: usize,
}

impl StaffStats {
    pub fn from_courses(courses: &[OwnedCourse]) -> Self {
        Self {
            total_courses: courses.len(),
            total_students: courses.iter().map(|c| c.enrollment_count).sum(),
            videos_uploaded: courses.iter().filter(|c| c.course.has_video()).count(),
        }
    }
}
