//! Server-rendered pages. Every function takes the view state it needs and
//! returns a complete HTML document; nothing here talks to the backend.

pub mod auth;
pub mod courses;
pub mod dashboard;
pub mod pages;

use axum::http::StatusCode;

use crate::services::Viewer;

pub const BRAND: &str = "TwinLearn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A dismissible message at the top of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: Option<String>,
}

impl Notice {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            description: Some(description.into()),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            description: Some(description.into()),
        }
    }

    fn render(&self) -> String {
        let class = match self.kind {
            NoticeKind::Success => "notice notice-success",
            NoticeKind::Error => "notice notice-error",
        };
        let description = self
            .description
            .as_deref()
            .map(|d| format!("<p>{}</p>", escape(d)))
            .unwrap_or_default();

        format!(
            r#"<div class="{class}" role="alert"><strong>{title}</strong>{description}<button type="button" class="notice-close" onclick="this.parentElement.remove()" aria-label="Dismiss">&times;</button></div>"#,
            class = class,
            title = escape(&self.title),
            description = description,
        )
    }
}

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn navbar(viewer: &Viewer) -> String {
    let account = match viewer.dashboard_path() {
        Some(path) => format!(
            r#"<a href="{path}">Dashboard</a>
      <form method="post" action="/auth/sign-out" class="inline"><button type="submit" class="btn btn-outline">Logout</button></form>"#,
            path = path
        ),
        None => r#"<a href="/auth" class="btn">Sign In</a>"#.to_string(),
    };

    format!(
        r#"<nav class="navbar">
    <a href="/" class="brand">{brand}</a>
    <div class="links">
      <a href="/courses">Courses</a>
      <a href="/about">About</a>
      <a href="/contact">Contact</a>
      {account}
    </div>
  </nav>"#,
        brand = BRAND,
        account = account
    )
}

const STYLE: &str = r#"
    body{font-family:system-ui,sans-serif;margin:0;background:#f8fafc;color:#0f172a}
    .navbar{display:flex;justify-content:space-between;align-items:center;padding:12px 24px;background:#fff;border-bottom:1px solid #e2e8f0}
    .navbar .links{display:flex;gap:16px;align-items:center}
    .brand{font-weight:700;font-size:1.25rem;text-decoration:none;color:#4f46e5}
    main{max-width:1100px;margin:0 auto;padding:32px 16px}
    .grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(280px,1fr));gap:24px}
    .card{background:#fff;border:1px solid #e2e8f0;border-radius:12px;overflow:hidden}
    .card .body{padding:16px}
    .thumb{aspect-ratio:16/9;background:linear-gradient(135deg,#6366f1,#a855f7);display:block;width:100%;object-fit:cover}
    .badge{display:inline-block;padding:2px 8px;border-radius:999px;background:#dcfce7;color:#166534;font-size:.75rem}
    .meta{color:#64748b;font-size:.875rem;display:flex;gap:12px}
    .stats{display:grid;grid-template-columns:repeat(3,1fr);gap:24px;margin-bottom:32px}
    .stat{background:#fff;border:1px solid #e2e8f0;border-radius:12px;padding:16px}
    .stat .value{font-size:1.5rem;font-weight:700}
    .progress{height:8px;background:#e2e8f0;border-radius:4px;overflow:hidden}
    .progress span{display:block;height:100%;background:#4f46e5}
    .btn{display:inline-block;padding:8px 16px;border-radius:8px;border:0;background:#4f46e5;color:#fff;text-decoration:none;cursor:pointer}
    .btn-outline{background:#fff;color:#0f172a;border:1px solid #cbd5e1}
    form.inline{display:inline}
    form.stack{display:flex;flex-direction:column;gap:12px;max-width:480px}
    input,textarea,select{padding:8px;border:1px solid #cbd5e1;border-radius:8px;font:inherit}
    .notice{position:relative;margin:16px auto;max-width:1100px;padding:12px 40px 12px 16px;border-radius:8px}
    .notice p{margin:4px 0 0}
    .notice-success{background:#dcfce7;color:#166534}
    .notice-error{background:#fee2e2;color:#991b1b}
    .notice-close{position:absolute;top:8px;right:8px;border:0;background:none;font-size:1.25rem;cursor:pointer;color:inherit}
    .empty{text-align:center;color:#64748b;padding:48px 0}
"#;

/// Wraps page content with the document head, navbar and notices.
pub fn layout(title: &str, viewer: &Viewer, notices: &[Notice], content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta name="viewport" content="width=device-width, initial-scale=1"/>
  <title>{title} | {brand}</title>
  <style>{style}</style>
</head>
<body>
  {navbar}
  {notices}
  <main>
{content}
  </main>
</body>
</html>"#,
        title = escape(title),
        brand = BRAND,
        style = STYLE,
        navbar = navbar(viewer),
        notices = notices.iter().map(Notice::render).collect::<Vec<_>>().join("\n  "),
        content = content,
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let content = format!(
        r#"<div class="empty">
  <h1>{code}</h1>
  <p>{message}</p>
  <a href="/" class="btn">Back to home</a>
</div>"#,
        code = status.as_u16(),
        message = escape(message),
    );
    layout(
        status.canonical_reason().unwrap_or("Error"),
        &Viewer::anonymous(),
        &[],
        &content,
    )
}
