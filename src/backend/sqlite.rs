use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, error, info};
use uuid::Uuid;

use super::Backend;
use crate::error::AppError;
use crate::models::{
    AuthUser, Course, EnrolledCourse, Enrollment, NewCourseRequest, NewEnrollmentRequest,
    OwnedCourse, Profile, Role, Session, SignUpOutcome, SignUpRequest,
};

const INVALID_CREDENTIALS: &str = "Invalid login credentials";
const ALREADY_REGISTERED: &str = "User already registered";

/// Lifetime of a local session token.
pub const SESSION_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Self-contained backend on SQLite: users, sessions and the three tables,
/// with the row policies of the hosted service applied in code.
#[derive(Clone)]
pub struct SqliteBackend {
    db: SqlitePool,
}

impl SqliteBackend {
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Self::from_pool(pool).await
    }

    /// Single-connection in-memory database; every call to this gets a fresh store.
    pub async fn in_memory() -> Result<Self, AppError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Self::from_pool(pool).await
    }

    pub async fn from_pool(db: SqlitePool) -> Result<Self, AppError> {
        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .map_err(|e| AppError::Database(e.into()))?;
        info!("local backend ready");
        Ok(Self { db })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db
    }

    async fn open_session(&self, user: AuthUser) -> Result<Session, AppError> {
        let now = Utc::now();

        let pruned = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?1")
            .bind(now.timestamp())
            .execute(&self.db)
            .await?
            .rows_affected();
        if pruned > 0 {
            debug!("pruned {} expired sessions", pruned);
        }

        let access_token = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        sqlx::query(
            "INSERT INTO sessions (access_token, user_id, created_at, expires_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&access_token)
        .bind(user.id)
        .bind(now)
        .bind(now.timestamp() + SESSION_TTL_SECS)
        .execute(&self.db)
        .await?;
        Ok(Session { access_token, user })
    }

    async fn role_of(&self, user_id: Uuid) -> Result<Option<Role>, AppError> {
        let role = sqlx::query_scalar::<_, Role>("SELECT role FROM profiles WHERE id = ?1")
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?;
        Ok(role)
    }
}

fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes()).map_err(|e| {
        error!("failed to build salt: {}", e);
        AppError::InternalServerError
    })?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!("failed to hash password: {}", e);
            AppError::InternalServerError
        })
}

fn verify_password(password: &str, stored: &str) -> bool {
    PasswordHash::new(stored)
        .map(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
        .unwrap_or(false)
}

fn row_policy_violation(table: &str) -> AppError {
    AppError::Rejected(format!("new row violates row-level security policy for table \"{}\"", table))
}

/// Constraint failures are the store speaking; pass their message through.
fn constraint_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db)
            if db.is_unique_violation() || db.is_foreign_key_violation() || db.is_check_violation() =>
        {
            AppError::Rejected(db.message().to_string())
        }
        _ => AppError::Database(err),
    }
}

#[derive(FromRow)]
struct EnrolledCourseRow {
    id: Uuid,
    student_id: Uuid,
    course_id: Uuid,
    progress: i32,
    title: Option<String>,
    description: Option<String>,
    subject: Option<String>,
    level: Option<String>,
    video_url: Option<String>,
    thumbnail_url: Option<String>,
    instructor_id: Option<Uuid>,
    created_at: Option<DateTime<Utc>>,
}

impl From<EnrolledCourseRow> for EnrolledCourse {
    fn from(row: EnrolledCourseRow) -> Self {
        let course = match (row.title, row.instructor_id, row.created_at) {
            (Some(title), Some(instructor_id), Some(created_at)) => Some(Course {
                id: row.course_id,
                title,
                description: row.description,
                subject: row.subject,
                level: row.level,
                video_url: row.video_url,
                thumbnail_url: row.thumbnail_url,
                instructor_id,
                created_at,
            }),
            _ => None,
        };

        EnrolledCourse {
            id: row.id,
            student_id: row.student_id,
            course_id: row.course_id,
            progress: row.progress,
            course,
        }
    }
}

#[derive(FromRow)]
struct OwnedCourseRow {
    #[sqlx(flatten)]
    course: Course,
    enrollment_count: i64,
}

#[async_trait]
impl Backend for SqliteBackend {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("select 1").execute(&self.db).await?;
        Ok(())
    }

    async fn get_session(&self, access_token: &str) -> Result<Option<Session>, AppError> {
        let user = sqlx::query_as::<_, (Uuid, String)>(
            r#"
            SELECT u.id, u.email
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.access_token = ?1 AND s.expires_at > ?2
            "#,
        )
        .bind(access_token)
        .bind(Utc::now().timestamp())
        .fetch_optional(&self.db)
        .await?;

        Ok(user.map(|(id, email)| Session {
            access_token: access_token.to_string(),
            user: AuthUser { id, email: Some(email) },
        }))
    }

    async fn sign_up(&self, req: &SignUpRequest) -> Result<SignUpOutcome, AppError> {
        let email = req.email.trim().to_lowercase();

        let taken = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = ?1")
            .bind(&email)
            .fetch_one(&self.db)
            .await?;
        if taken > 0 {
            return Err(AppError::Rejected(ALREADY_REGISTERED.to_string()));
        }

        let id = Uuid::new_v4();
        let password_hash = hash_password(&req.password)?;
        let now = Utc::now();

        let mut tx = self.db.begin().await?;
        sqlx::query("INSERT INTO users (id, email, password_hash, created_at) VALUES (?1, ?2, ?3, ?4)")
            .bind(id)
            .bind(&email)
            .bind(&password_hash)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(constraint_error)?;
        sqlx::query("INSERT INTO profiles (id, full_name, role) VALUES (?1, ?2, ?3)")
            .bind(id)
            .bind(&req.full_name)
            .bind(req.role)
            .execute(&mut *tx)
            .await
            .map_err(constraint_error)?;
        tx.commit().await?;

        let user = AuthUser { id, email: Some(email) };
        let session = self.open_session(user.clone()).await?;
        info!("registered {} as {}", user.id, req.role);

        Ok(SignUpOutcome {
            user: Some(user),
            session: Some(session),
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let email = email.trim().to_lowercase();
        let row = sqlx::query_as::<_, (Uuid, String, String)>(
            "SELECT id, email, password_hash FROM users WHERE email = ?1",
        )
        .bind(&email)
        .fetch_optional(&self.db)
        .await?;

        match row {
            Some((id, email, password_hash)) if verify_password(password, &password_hash) => {
                self.open_session(AuthUser { id, email: Some(email) }).await
            }
            _ => Err(AppError::Rejected(INVALID_CREDENTIALS.to_string())),
        }
    }

    async fn sign_out(&self, session: &Session) -> Result<(), AppError> {
        sqlx::query("DELETE FROM sessions WHERE access_token = ?1")
            .bind(&session.access_token)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    async fn fetch_profile(&self, _session: &Session, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>("SELECT id, full_name, role FROM profiles WHERE id = ?1")
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?;
        Ok(profile)
    }

    async fn list_courses(&self, _session: Option<&Session>) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, title, description, subject, level, video_url, thumbnail_url,
                   instructor_id, created_at
            FROM courses
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(courses)
    }

    async fn list_enrollments(
        &self,
        session: &Session,
        student_id: Uuid,
    ) -> Result<Vec<EnrolledCourse>, AppError> {
        // Students only ever see their own rows.
        if session.user.id != student_id {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, EnrolledCourseRow>(
            r#"
            SELECT
                e.id AS id,
                e.student_id AS student_id,
                e.course_id AS course_id,
                e.progress AS progress,
                c.title AS title,
                c.description AS description,
                c.subject AS subject,
                c.level AS level,
                c.video_url AS video_url,
                c.thumbnail_url AS thumbnail_url,
                c.instructor_id AS instructor_id,
                c.created_at AS created_at
            FROM enrollments e
            LEFT JOIN courses c ON c.id = e.course_id
            WHERE e.student_id = ?1
            ORDER BY e.enrolled_at DESC, e.rowid DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(EnrolledCourse::from).collect())
    }

    async fn list_owned_courses(
        &self,
        _session: &Session,
        instructor_id: Uuid,
    ) -> Result<Vec<OwnedCourse>, AppError> {
        let rows = sqlx::query_as::<_, OwnedCourseRow>(
            r#"
            SELECT
                c.id AS id,
                c.title AS title,
                c.description AS description,
                c.subject AS subject,
                c.level AS level,
                c.video_url AS video_url,
                c.thumbnail_url AS thumbnail_url,
                c.instructor_id AS instructor_id,
                c.created_at AS created_at,
                COUNT(e.id) AS enrollment_count
            FROM courses c
            LEFT JOIN enrollments e ON e.course_id = c.id
            WHERE c.instructor_id = ?1
            GROUP BY c.id
            ORDER BY c.created_at DESC, c.rowid DESC
            "#,
        )
        .bind(instructor_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| OwnedCourse {
                course: row.course,
                enrollment_count: row.enrollment_count,
            })
            .collect())
    }

    async fn insert_enrollment(
        &self,
        session: &Session,
        req: &NewEnrollmentRequest,
    ) -> Result<Enrollment, AppError> {
        if session.user.id != req.student_id
            || self.role_of(req.student_id).await? != Some(Role::Student)
        {
            return Err(row_policy_violation("enrollments"));
        }

        let enrollment = Enrollment {
            id: Uuid::new_v4(),
            student_id: req.student_id,
            course_id: req.course_id,
            progress: 0,
        };

        sqlx::query(
            r#"
            INSERT INTO enrollments (id, student_id, course_id, progress, enrolled_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(enrollment.id)
        .bind(enrollment.student_id)
        .bind(enrollment.course_id)
        .bind(enrollment.progress)
        .bind(Utc::now())
        .execute(&self.db)
        .await
        .map_err(constraint_error)?;

        Ok(enrollment)
    }

    async fn insert_course(&self, session: &Session, req: &NewCourseRequest) -> Result<Course, AppError> {
        if session.user.id != req.instructor_id
            || self.role_of(req.instructor_id).await? != Some(Role::Staff)
        {
            return Err(row_policy_violation("courses"));
        }

        let course = Course {
            id: Uuid::new_v4(),
            title: req.title.clone(),
            description: req.description.clone(),
            subject: req.subject.clone(),
            level: req.level.clone(),
            video_url: req.video_url.clone(),
            thumbnail_url: req.thumbnail_url.clone(),
            instructor_id: req.instructor_id,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO courses
                (id, title, description, subject, level, video_url, thumbnail_url,
                 instructor_id, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(course.id)
        .bind(&course.title)
        .bind(&course.description)
        .bind(&course.subject)
        .bind(&course.level)
        .bind(&course.video_url)
        .bind(&course.thumbnail_url)
        .bind(course.instructor_id)
        .bind(course.created_at)
        .execute(&self.db)
        .await
        .map_err(constraint_error)?;

        Ok(course)
    }
}
