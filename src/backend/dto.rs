use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{AuthUser, Course, OwnedCourse, Role};

#[derive(Debug, Serialize)]
pub struct PasswordGrantRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SignUpRequestBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub data: UserMetadata<'a>,
}

/// Stored on the auth user; the backend copies it into the `profiles` row.
#[derive(Debug, Serialize)]
pub struct UserMetadata<'a> {
    pub full_name: &'a str,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub user: AuthUser,
}

/// With auto-confirm the signup endpoint answers with a token response,
/// otherwise with the bare user object.
#[derive(Debug, Deserialize)]
pub struct SignUpResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<AuthUser>,
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub email: Option<String>,
}

impl SignUpResponse {
    pub fn into_user(self) -> (Option<String>, Option<AuthUser>) {
        let user = match (self.user, self.id) {
            (Some(user), _) => Some(user),
            (None, Some(id)) => Some(AuthUser { id, email: self.email }),
            (None, None) => None,
        };
        (self.access_token, user)
    }
}

/// Error shapes used by the auth and REST endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message
            .or(self.msg)
            .or(self.error_description)
            .or(self.error)
    }
}

#[derive(Debug, Deserialize)]
pub struct CountRow {
    pub count: i64,
}

/// `courses?select=*,enrollments(count)` row.
#[derive(Debug, Deserialize)]
pub struct OwnedCourseRow {
    #[serde(flatten)]
    pub course: Course,
    #[serde(default)]
    pub enrollments: Vec<CountRow>,
}

impl From<OwnedCourseRow> for OwnedCourse {
    fn from(row: OwnedCourseRow) -> Self {
        let enrollment_count = row.enrollments.first().map(|c| c.count).unwrap_or(0);
        OwnedCourse {
            course: row.course,
            enrollment_count,
        }
    }
}
