use super::{BRAND, Notice, escape, layout};
use crate::services::Viewer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthTab {
    SignIn,
    SignUp,
}

impl AuthTab {
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("signup") => AuthTab::SignUp,
            _ => AuthTab::SignIn,
        }
    }
}

/// Values echoed back into the forms after a failed submit. Passwords never are.
#[derive(Debug, Clone, Default)]
pub struct AuthFormValues {
    pub email: String,
    pub full_name: String,
    pub role: String,
}

pub fn auth_page(
    viewer: &Viewer,
    tab: AuthTab,
    values: &AuthFormValues,
    notice: Option<&Notice>,
) -> String {
    let staff_checked = values.role.eq_ignore_ascii_case("staff");
    let (sign_in_open, sign_up_open) = match tab {
        AuthTab::SignIn => (" open", ""),
        AuthTab::SignUp => ("", " open"),
    };

    let content = format!(
        r#"<h1>Join {brand}</h1>
<p>Sign up or sign in as a Student or Staff Member</p>
<details class="card"{sign_in_open}>
  <summary>Sign In</summary>
  <form method="post" action="/auth/sign-in" class="stack body">
    <label for="signin-email">Email</label>
    <input id="signin-email" name="email" type="email" value="{email}" placeholder="your@email.com" required/>
    <label for="signin-password">Password</label>
    <input id="signin-password" name="password" type="password" required/>
    <button type="submit" class="btn">Sign In</button>
  </form>
</details>
<details class="card"{sign_up_open}>
  <summary>Sign Up</summary>
  <form method="post" action="/auth/sign-up" class="stack body">
    <label for="signup-name">Full Name</label>
    <input id="signup-name" name="full_name" value="{full_name}" required/>
    <label for="signup-email">Email</label>
    <input id="signup-email" name="email" type="email" value="{email}" placeholder="your@email.com" required/>
    <label for="signup-password">Password</label>
    <input id="signup-password" name="password" type="password" minlength="6" required/>
    <fieldset>
      <legend>I am a</legend>
      <label><input type="radio" name="role" value="student"{student_checked}/> Student</label>
      <label><input type="radio" name="role" value="staff"{staff_checked}/> Staff Member</label>
    </fieldset>
    <button type="submit" class="btn">Create Account</button>
  </form>
</details>"#,
        brand = BRAND,
        sign_in_open = sign_in_open,
        sign_up_open = sign_up_open,
        email = escape(&values.email),
        full_name = escape(&values.full_name),
        student_checked = if staff_checked { "" } else { " checked" },
        staff_checked = if staff_checked { " checked" } else { "" },
    );

    layout("Sign In", viewer, notice.map(std::slice::from_ref).unwrap_or(&[]), &content)
}
