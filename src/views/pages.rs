use super::{BRAND, Notice, escape, layout};
use crate::services::Viewer;
use crate::services::contact::ContactForm;

const FEATURES: [(&str, &str); 4] = [
    ("Interactive Learning", "Engage with video lectures, quizzes, and hands-on activities"),
    ("Expert Instructors", "Learn from passionate educators dedicated to your success"),
    ("Track Progress", "Monitor your learning journey with detailed analytics"),
    ("Earn Certificates", "Showcase your achievements with recognized credentials"),
];

const VALUES: [(&str, &str); 3] = [
    ("Mission-Driven", "We're committed to making quality education accessible to everyone, everywhere."),
    ("Student-Centered", "Every feature we build is designed with student success in mind."),
    ("Community First", "We believe in the power of collaborative learning and peer support."),
];

fn tiles(items: &[(&str, &str)]) -> String {
    items
        .iter()
        .map(|(title, description)| {
            format!(
                r#"<div class="card"><div class="body"><h3>{}</h3><p>{}</p></div></div>"#,
                escape(title),
                escape(description)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn landing_page(viewer: &Viewer) -> String {
    let cta = match viewer.dashboard_path() {
        Some(path) => format!(r#"<a href="{}" class="btn">Go to Dashboard</a>"#, path),
        None => r#"<a href="/auth?tab=signup" class="btn">Get Started</a>"#.to_string(),
    };

    let content = format!(
        r#"<section class="hero">
  <h1>Learn Without Limits with {brand}</h1>
  <p>Courses from passionate instructors, progress you can see.</p>
  {cta}
  <a href="/courses" class="btn btn-outline">Browse Courses</a>
</section>
<section class="grid">{features}</section>"#,
        brand = BRAND,
        cta = cta,
        features = tiles(&FEATURES),
    );

    layout("Home", viewer, &[], &content)
}

pub fn about_page(viewer: &Viewer) -> String {
    let content = format!(
        r#"<h1>About {brand}</h1>
<p>{brand} connects students with instructors who love to teach.</p>
<section class="grid">{values}</section>"#,
        brand = BRAND,
        values = tiles(&VALUES),
    );

    layout("About", viewer, &[], &content)
}

pub fn contact_page(viewer: &Viewer, form: &ContactForm, notice: Option<&Notice>) -> String {
    let content = format!(
        r#"<h1>Get in Touch</h1>
<p>Have a question? We'd love to hear from you.</p>
<form method="post" action="/contact" class="stack card body">
  <label for="name">Name</label>
  <input id="name" name="name" value="{name}" maxlength="100" required/>
  <label for="email">Email</label>
  <input id="email" name="email" type="email" value="{email}" maxlength="255" required/>
  <label for="message">Message</label>
  <textarea id="message" name="message" rows="6" maxlength="1000" required>{message}</textarea>
  <button type="submit" class="btn">Send Message</button>
</form>"#,
        name = escape(&form.name),
        email = escape(&form.email),
        message = escape(&form.message),
    );

    layout("Contact", viewer, notice.map(std::slice::from_ref).unwrap_or(&[]), &content)
}
