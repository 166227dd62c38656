use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use super::session::Member;
use crate::backend::Backend;
use crate::error::AppError;
use crate::models::{Course, NewCourseRequest};

/// Values of the "Create Course" form, kept as typed so a failed submit can re-show them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub video_url: String,
    #[serde(default)]
    pub thumbnail_url: String,
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl CourseForm {
    /// Only the title is checked; URLs go through as typed.
    pub fn to_request(&self, instructor_id: Uuid) -> Result<NewCourseRequest, AppError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("Course title is required".to_string()));
        }

        Ok(NewCourseRequest {
            title: title.to_string(),
            description: optional(&self.description),
            subject: optional(&self.subject),
            level: optional(&self.level),
            video_url: optional(&self.video_url),
            thumbnail_url: optional(&self.thumbnail_url),
            instructor_id,
        })
    }
}

pub async fn create_course(
    backend: &dyn Backend,
    member: &Member,
    form: &CourseForm,
) -> Result<Course, AppError> {
    if !member.profile.role.can_create_courses() {
        return Err(AppError::Validation("Only staff members can create courses".to_string()));
    }

    let req = form.to_request(member.session.user.id)?;
    let course = backend.insert_course(&member.session, &req).await?;
    info!("course {} created by {}", course.id, course.instructor_id);
    Ok(course)
}
