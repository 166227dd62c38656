use super::{Notice, escape, layout};
use crate::models::Course;
use crate::services::{EnrolledSet, Viewer};

/// What a card offers below the course details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction<'a> {
    None,
    Enrolled,
    /// Enroll button; carries the current search so the page comes back filtered.
    Enroll { query: &'a str },
}

pub fn course_card(course: &Course, action: CardAction<'_>, extra: &str) -> String {
    let thumbnail = match course.thumbnail_url.as_deref().filter(|u| !u.trim().is_empty()) {
        Some(url) => format!(
            r#"<img class="thumb" src="{}" alt="{}"/>"#,
            escape(url),
            escape(&course.title)
        ),
        None => r#"<div class="thumb"></div>"#.to_string(),
    };

    let badge = match action {
        CardAction::Enrolled => r#" <span class="badge">Enrolled</span>"#,
        CardAction::None | CardAction::Enroll { .. } => "",
    };

    let mut meta = String::new();
    if let Some(subject) = course.subject.as_deref().filter(|s| !s.is_empty()) {
        meta.push_str(&format!(r#"<span class="subject">{}</span>"#, escape(subject)));
    }
    if let Some(level) = course.level.as_deref().filter(|s| !s.is_empty()) {
        meta.push_str(&format!(r#"<span class="level">{}</span>"#, escape(level)));
    }

    let footer = match action {
        CardAction::Enroll { query } => format!(
            r#"<form method="post" action="/courses/{id}/enroll">
        <input type="hidden" name="q" value="{query}"/>
        <button type="submit" class="btn">Enroll Now</button>
      </form>"#,
            id = course.id,
            query = escape(query),
        ),
        CardAction::None | CardAction::Enrolled => String::new(),
    };

    format!(
        r#"<article class="card course" data-course-id="{id}">
    {thumbnail}
    <div class="body">
      <h3>{title}{badge}</h3>
      <p>{description}</p>
      <div class="meta">{meta}</div>
      {extra}
      {footer}
    </div>
  </article>"#,
        id = course.id,
        thumbnail = thumbnail,
        title = escape(&course.title),
        badge = badge,
        description = escape(course.description.as_deref().unwrap_or("")),
        meta = meta,
        extra = extra,
        footer = footer,
    )
}

/// State of one `/courses` render.
pub struct CatalogView<'a> {
    pub viewer: &'a Viewer,
    pub query: &'a str,
    pub courses: Vec<&'a Course>,
    pub enrolled: &'a EnrolledSet,
    pub notices: Vec<Notice>,
}

pub fn catalog_page(view: &CatalogView<'_>) -> String {
    let can_enroll = view.viewer.role().is_some_and(|role| role.can_enroll());

    let grid = if view.courses.is_empty() {
        let message = if view.query.trim().is_empty() {
            "No courses available yet"
        } else {
            "No courses found matching your search"
        };
        format!(r#"<p class="empty">{}</p>"#, message)
    } else {
        let cards: Vec<String> = view
            .courses
            .iter()
            .map(|course| {
                let action = if !can_enroll {
                    CardAction::None
                } else if view.enrolled.contains(course.id) {
                    CardAction::Enrolled
                } else {
                    CardAction::Enroll { query: view.query }
                };
                course_card(course, action, "")
            })
            .collect();
        format!(r#"<div class="grid">{}</div>"#, cards.join("\n"))
    };

    let content = format!(
        r#"<h1>Explore Courses</h1>
<p>Explore, Learn, and Grow with TwinLearn.</p>
<form method="get" action="/courses" class="search">
  <input type="search" name="q" value="{query}" placeholder="Search courses by title, subject, or level..."/>
  <button type="submit" class="btn">Search</button>
</form>
{grid}"#,
        query = escape(view.query),
        grid = grid,
    );

    layout("Courses", view.viewer, &view.notices, &content)
}
