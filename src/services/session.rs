use tracing::warn;

use crate::backend::Backend;
use crate::models::{Profile, Role, Session};

/// Who is looking at a page. Built per request and thrown away with it.
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    pub session: Option<Session>,
    pub profile: Option<Profile>,
}

impl Viewer {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn role(&self) -> Option<Role> {
        self.profile.as_ref().map(|p| p.role)
    }

    /// Where the "Dashboard" link points, if the viewer has one.
    pub fn dashboard_path(&self) -> Option<&'static str> {
        match (&self.session, self.role()) {
            (Some(_), Some(role)) => Some(role.dashboard_path()),
            _ => None,
        }
    }
}

/// A viewer that passed a role gate.
#[derive(Debug, Clone)]
pub struct Member {
    pub session: Session,
    pub profile: Profile,
}

#[derive(Debug)]
pub enum Gate {
    Allowed(Member),
    Redirect(&'static str),
}

/// Session first, then the profile row. Failures degrade to a guest-like
/// viewer instead of failing the page.
pub async fn resolve_viewer(backend: &dyn Backend, access_token: Option<&str>) -> Viewer {
    let Some(token) = access_token else {
        return Viewer::anonymous();
    };

    let session = match backend.get_session(token).await {
        Ok(Some(session)) => session,
        Ok(None) => return Viewer::anonymous(),
        Err(e) => {
            warn!("session lookup failed: {}", e);
            return Viewer::anonymous();
        }
    };

    let profile = match backend.fetch_profile(&session, session.user.id).await {
        Ok(profile) => profile,
        Err(e) => {
            warn!("profile fetch failed for {}: {}", session.user.id, e);
            None
        }
    };

    Viewer {
        session: Some(session),
        profile,
    }
}

/// Gate for role-only pages: no session or no profile goes to `/auth`,
/// the other role goes to its own dashboard.
pub fn require_role(viewer: Viewer, required: Role) -> Gate {
    let (Some(session), Some(profile)) = (viewer.session, viewer.profile) else {
        return Gate::Redirect("/auth");
    };

    match (profile.role, required) {
        (Role::Student, Role::Student) | (Role::Staff, Role::Staff) => {
            Gate::Allowed(Member { session, profile })
        }
        (Role::Student, Role::Staff) | (Role::Staff, Role::Student) => {
            Gate::Redirect(required.counterpart().dashboard_path())
        }
    }
}
