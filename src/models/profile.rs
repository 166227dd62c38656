use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Student,
    Staff,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Staff => "staff",
        }
    }

    pub fn dashboard_path(self) -> &'static str {
        match self {
            Role::Student => "/student-dashboard",
            Role::Staff => "/staff-dashboard",
        }
    }

    /// The other role; used when a dashboard is opened by the wrong role.
    pub fn counterpart(self) -> Role {
        match self {
            Role::Student => Role::Staff,
            Role::Staff => Role::Student,
        }
    }

    pub fn can_enroll(self) -> bool {
        match self {
            Role::Student => true,
            Role::Staff => false,
        }
    }

    pub fn can_create_courses(self) -> bool {
        match self {
            Role::Student => false,
            Role::Staff => true,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "staff" => Ok(Role::Staff),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    #[serde(default)]
    pub full_name: Option<String>,
    pub role: Role,
}

impl Profile {
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => fallback,
        }
    }
}
