use std::env;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};
use uuid::Uuid;

use super::{Backend, dto};
use crate::error::AppError;
use crate::models::{
    Course, EnrolledCourse, Enrollment, NewCourseRequest, NewEnrollmentRequest, OwnedCourse,
    Profile, Session, SignUpOutcome, SignUpRequest,
};

#[derive(Clone, Debug)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

impl SupabaseConfig {
    /// `Ok(None)` when neither variable is set, so the caller can fall back to the local backend.
    pub fn from_env() -> Result<Option<Self>, AppError> {
        let url = env::var("SUPABASE_URL").ok().filter(|v| !v.trim().is_empty());
        let anon_key = env::var("SUPABASE_ANON_KEY").ok().filter(|v| !v.trim().is_empty());

        match (url, anon_key) {
            (Some(url), Some(anon_key)) => Ok(Some(Self {
                url: url.trim_end_matches('/').to_string(),
                anon_key,
            })),
            (None, None) => Ok(None),
            (Some(_), None) => Err(AppError::Config("SUPABASE_ANON_KEY is not set".to_string())),
            (None, Some(_)) => Err(AppError::Config("SUPABASE_URL is not set".to_string())),
        }
    }
}

pub struct SupabaseBackend {
    client: Client,
    config: SupabaseConfig,
}

impl SupabaseBackend {
    pub fn new(config: SupabaseConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, AppError> {
        let base = format!("{}{}", self.config.url, path);
        Url::parse_with_params(&base, params)
            .map_err(|e| AppError::Config(format!("Invalid Supabase URL {}: {}", base, e)))
    }

    /// Anonymous calls authenticate with the anon key, user calls with the user's token
    /// so that row-level policies see the right identity.
    fn authorize(&self, builder: RequestBuilder, session: Option<&Session>) -> RequestBuilder {
        let token = session
            .map(|s| s.access_token.as_str())
            .unwrap_or(self.config.anon_key.as_str());
        builder
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, &str)],
        session: Option<&Session>,
    ) -> Result<Vec<T>, AppError> {
        let url = self.endpoint(&format!("/rest/v1/{}", table), params)?;
        debug!("GET {}", url);
        let response = self.authorize(self.client.get(url), session).send().await?;
        read_json(response).await
    }

    async fn insert<B, T>(&self, table: &str, body: &B, session: &Session) -> Result<T, AppError>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(&format!("/rest/v1/{}", table), &[("select", "*")])?;
        let response = self
            .authorize(self.client.post(url), Some(session))
            .header("Prefer", "return=representation")
            .json(&[body])
            .send()
            .await?;

        let mut rows: Vec<T> = read_json(response).await?;
        if rows.is_empty() {
            // Row policies can let the insert through but hide the returned row.
            return Err(AppError::Rejected(format!("Insert into {} returned no row", table)));
        }
        Ok(rows.remove(0))
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(AppError::Rejected(error_message(status, &body)));
    }

    serde_json::from_str::<T>(&body).map_err(|e| {
        error!("Failed to parse Supabase response: {}", e);
        AppError::InternalServerError
    })
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<dto::ErrorBody>(body)
        .ok()
        .and_then(dto::ErrorBody::into_message)
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("Request failed with status {}", status)
            } else {
                body.trim().to_string()
            }
        })
}

#[async_trait]
impl Backend for SupabaseBackend {
    async fn ping(&self) -> Result<(), AppError> {
        let url = self.endpoint("/auth/v1/health", &[])?;
        let response = self.client.get(url).header("apikey", &self.config.anon_key).send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(AppError::Transport(format!("health check returned {}", response.status())))
        }
    }

    async fn get_session(&self, access_token: &str) -> Result<Option<Session>, AppError> {
        let url = self.endpoint("/auth/v1/user", &[])?;
        let response = self
            .client
            .get(url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if matches!(response.status(), StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Ok(None);
        }

        let user = read_json(response).await?;
        Ok(Some(Session {
            access_token: access_token.to_string(),
            user,
        }))
    }

    async fn sign_up(&self, req: &SignUpRequest) -> Result<SignUpOutcome, AppError> {
        let url = self.endpoint("/auth/v1/signup", &[])?;
        let body = dto::SignUpRequestBody {
            email: &req.email,
            password: &req.password,
            data: dto::UserMetadata {
                full_name: &req.full_name,
                role: req.role,
            },
        };

        let response = self
            .client
            .post(url)
            .header("apikey", &self.config.anon_key)
            .json(&body)
            .send()
            .await?;

        let parsed: dto::SignUpResponse = read_json(response).await?;
        let (access_token, user) = parsed.into_user();
        let session = match (access_token, user.clone()) {
            (Some(access_token), Some(user)) => Some(Session { access_token, user }),
            _ => None,
        };

        Ok(SignUpOutcome { user, session })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let url = self.endpoint("/auth/v1/token", &[("grant_type", "password")])?;
        let response = self
            .client
            .post(url)
            .header("apikey", &self.config.anon_key)
            .json(&dto::PasswordGrantRequest { email, password })
            .send()
            .await?;

        let token: dto::TokenResponse = read_json(response).await?;
        Ok(Session {
            access_token: token.access_token,
            user: token.user,
        })
    }

    async fn sign_out(&self, session: &Session) -> Result<(), AppError> {
        let url = self.endpoint("/auth/v1/logout", &[])?;
        let response = self
            .authorize(self.client.post(url), Some(session))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Supabase logout returned {}: {}", status, body);
            return Err(AppError::Rejected(error_message(status, &body)));
        }
        Ok(())
    }

    async fn fetch_profile(&self, session: &Session, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        let id_filter = format!("eq.{}", user_id);
        let mut rows: Vec<Profile> = self
            .select("profiles", &[("select", "*"), ("id", &id_filter)], Some(session))
            .await?;
        Ok(if rows.is_empty() { None } else { Some(rows.remove(0)) })
    }

    async fn list_courses(&self, session: Option<&Session>) -> Result<Vec<Course>, AppError> {
        self.select("courses", &[("select", "*"), ("order", "created_at.desc")], session)
            .await
    }

    async fn list_enrollments(
        &self,
        session: &Session,
        student_id: Uuid,
    ) -> Result<Vec<EnrolledCourse>, AppError> {
        let student_filter = format!("eq.{}", student_id);
        self.select(
            "enrollments",
            &[("select", "*,courses(*)"), ("student_id", &student_filter)],
            Some(session),
        )
        .await
    }

    async fn list_owned_courses(
        &self,
        session: &Session,
        instructor_id: Uuid,
    ) -> Result<Vec<OwnedCourse>, AppError> {
        let instructor_filter = format!("eq.{}", instructor_id);
        let rows: Vec<dto::OwnedCourseRow> = self
            .select(
                "courses",
                &[
                    ("select", "*,enrollments(count)"),
                    ("instructor_id", &instructor_filter),
                    ("order", "created_at.desc"),
                ],
                Some(session),
            )
            .await?;
        Ok(rows.into_iter().map(OwnedCourse::from).collect())
    }

    async fn insert_enrollment(
        &self,
        session: &Session,
        req: &NewEnrollmentRequest,
    ) -> Result<Enrollment, AppError> {
        self.insert("enrollments", req, session).await
    }

    async fn insert_course(&self, session: &Session, req: &NewCourseRequest) -> Result<Course, AppError> {
        self.insert("courses", req, session).await
    }
}
