use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use tower::ServiceExt;
use twinlearn::api::SESSION_COOKIE;

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl Reply {
    pub fn location(&self) -> Option<&str> {
        self.headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
    }

    /// `name=value` of the session cookie set by this response.
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&format!("{}=", SESSION_COOKIE)))
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> Reply {
    let response = app.clone().oneshot(request).await.expect("Request failed");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    Reply {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8"),
    }
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("Failed to build request")
}

pub fn post(uri: &str, cookie: Option<&str>, form: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(form.to_string())).expect("Failed to build request")
}

pub async fn sign_up(app: &Router, email: &str, name: &str, role: &str) -> String {
    let form = format!(
        "email={}&password=secret123&full_name={}&role={}",
        email.replace('@', "%40"),
        name,
        role
    );
    let reply = send(app, post("/auth/sign-up", None, &form)).await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER, "sign up failed: {}", reply.body);
    assert_eq!(reply.location(), Some(format!("/{}-dashboard", role).as_str()));
    reply.session_cookie().expect("Sign up should set the session cookie")
}

/// Ids of the rendered course cards, in page order.
pub fn course_ids(html: &str) -> Vec<String> {
    html.split("data-course-id=\"")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .map(str::to_string)
        .collect()
}
