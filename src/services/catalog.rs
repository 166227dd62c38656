use std::collections::HashSet;

use uuid::Uuid;

use crate::models::{Course, EnrolledCourse};

/// Courses whose title, description, subject or level contains `query`,
/// ignoring case. Source order is kept; a blank query keeps everything.
pub fn filter_courses<'a>(courses: &'a [Course], query: &str) -> Vec<&'a Course> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return courses.iter().collect();
    }

    courses
        .iter()
        .filter(|course| course_matches(course, &needle))
        .collect()
}

/// `needle` must already be lowercased.
pub fn course_matches(course: &Course, needle: &str) -> bool {
    let contains = |field: Option<&str>| {
        field.is_some_and(|value| value.to_lowercase().contains(needle))
    };

    contains(Some(&course.title))
        || contains(course.description.as_deref())
        || contains(course.subject.as_deref())
        || contains(course.level.as_deref())
}

/// Courses the current student is enrolled in.
#[derive(Debug, Clone, Default)]
pub struct EnrolledSet(HashSet<Uuid>);

impl EnrolledSet {
    pub fn from_enrollments(enrollments: &[EnrolledCourse]) -> Self {
        Self(enrollments.iter().map(|e| e.course_id).collect())
    }

    pub fn contains(&self, course_id: Uuid) -> bool {
        self.0.contains(&course_id)
    }
}
