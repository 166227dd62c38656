use super::courses::{CardAction, course_card};
use super::{Notice, escape, layout};
use crate::models::{EnrolledCourse, OwnedCourse};
use crate::services::courses::CourseForm;
use crate::services::{StaffStats, StudentStats, Viewer};

fn stat(title: &str, value: &str) -> String {
    format!(
        r#"<div class="stat"><p>{}</p><p class="value">{}</p></div>"#,
        escape(title),
        escape(value)
    )
}

pub struct StudentDashboardView<'a> {
    pub viewer: &'a Viewer,
    pub enrollments: &'a [EnrolledCourse],
    pub stats: StudentStats,
    pub notices: Vec<Notice>,
}

pub fn student_page(view: &StudentDashboardView<'_>) -> String {
    let name = view
        .viewer
        .profile
        .as_ref()
        .map(|p| p.display_name("Student"))
        .unwrap_or("Student");

    let stats = [
        stat("Enrolled Courses", &view.stats.enrolled.to_string()),
        stat("Average Progress", &format!("{}%", view.stats.average_progress)),
        stat("Completed", &view.stats.completed.to_string()),
    ]
    .join("\n");

    let listing = if view.enrollments.is_empty() {
        r#"<div class="card empty">
  <h3>No courses yet</h3>
  <p>Start your learning journey by enrolling in a course</p>
  <a href="/courses" class="btn">Explore Courses</a>
</div>"#
            .to_string()
    } else {
        view.enrollments
            .iter()
            .filter_map(|enrollment| {
                let course = enrollment.course.as_ref()?;
                let progress = format!(
                    r#"<div class="progress-row"><span>Progress</span> <strong>{p}%</strong></div>
      <div class="progress"><span style="width:{p}%"></span></div>"#,
                    p = enrollment.progress.clamp(0, 100)
                );
                Some(course_card(course, CardAction::None, &progress))
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let content = format!(
        r#"<h1>Welcome back, {name}!</h1>
<p>Your Learning Journey Begins Here</p>
<section class="stats">{stats}</section>
<section>
  <h2>My Courses</h2>
  <a href="/courses">Browse all courses &rarr;</a>
  <div class="enrollments">{listing}</div>
</section>"#,
        name = escape(name),
        stats = stats,
        listing = listing,
    );

    layout("Student Dashboard", view.viewer, &view.notices, &content)
}

pub struct StaffDashboardView<'a> {
    pub viewer: &'a Viewer,
    pub courses: &'a [OwnedCourse],
    pub stats: StaffStats,
    pub form: &'a CourseForm,
    pub notices: Vec<Notice>,
}

fn course_form(form: &CourseForm) -> String {
    format!(
        r#"<details class="card create-course"{open}>
  <summary class="btn">Create Course</summary>
  <form method="post" action="/staff-dashboard/courses" class="stack body">
    <p>Add a new course to your teaching portfolio</p>
    <label for="title">Course Title *</label>
    <input id="title" name="title" value="{title}" required/>
    <label for="description">Description</label>
    <textarea id="description" name="description" rows="3">{description}</textarea>
    <label for="subject">Subject</label>
    <input id="subject" name="subject" value="{subject}" placeholder="e.g., Mathematics"/>
    <label for="level">Level</label>
    <input id="level" name="level" value="{level}" placeholder="e.g., Beginner"/>
    <label for="video_url">Video URL</label>
    <input id="video_url" name="video_url" type="url" value="{video_url}" placeholder="https://..."/>
    <label for="thumbnail_url">Thumbnail URL</label>
    <input id="thumbnail_url" name="thumbnail_url" type="url" value="{thumbnail_url}" placeholder="https://..."/>
    <button type="submit" class="btn">Create Course</button>
  </form>
</details>"#,
        open = if form.title.is_empty() { "" } else { " open" },
        title = escape(&form.title),
        description = escape(&form.description),
        subject = escape(&form.subject),
        level = escape(&form.level),
        video_url = escape(&form.video_url),
        thumbnail_url = escape(&form.thumbnail_url),
    )
}

pub fn staff_page(view: &StaffDashboardView<'_>) -> String {
    let name = view
        .viewer
        .profile
        .as_ref()
        .map(|p| p.display_name("Instructor"))
        .unwrap_or("Instructor");

    let stats = [
        stat("Total Courses", &view.stats.total_courses.to_string()),
        stat("Total Students", &view.stats.total_students.to_string()),
        stat("Videos Uploaded", &view.stats.videos_uploaded.to_string()),
    ]
    .join("\n");

    let listing = if view.courses.is_empty() {
        r#"<div class="card empty">
  <h3>No courses yet</h3>
  <p>Create your first course to start teaching</p>
</div>"#
            .to_string()
    } else {
        let cards: Vec<String> = view
            .courses
            .iter()
            .map(|owned| {
                let students = format!(
                    r#"<p class="students">{} enrolled</p>"#,
                    owned.enrollment_count
                );
                course_card(&owned.course, CardAction::None, &students)
            })
            .collect();
        format!(r#"<div class="grid">{}</div>"#, cards.join("\n"))
    };

    let content = format!(
        r#"<h1>Welcome, {name}!</h1>
<p>Empower Students. Share Knowledge.</p>
{form}
<section class="stats">{stats}</section>
<section>
  <h2>My Courses</h2>
  {listing}
</section>"#,
        name = escape(name),
        form = course_form(view.form),
        stats = stats,
        listing = listing,
    );

    layout("Staff Dashboard", view.viewer, &view.notices, &content)
}
