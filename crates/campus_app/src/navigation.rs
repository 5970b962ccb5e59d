use campus_domain::{Error, Role, Route, Session};
use tracing::debug;

pub const LEAVE_PROMPT: &str = "The conversation will be lost. Leave anyway?";

/// Port for the blocking yes/no dialog shown to the user.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    Stay,
}

/// Protects an in-progress conversation from being discarded silently.
/// Nothing is saved; the guard only asks.
#[derive(Debug, Default, Clone, Copy)]
pub struct NavigationGuard;

impl NavigationGuard {
    pub fn new() -> Self {
        Self
    }

    /// In-app route change.
    pub fn allow_navigation(
        &self,
        from: Route,
        to: Route,
        transcript_len: usize,
        confirm: &dyn Confirm,
    ) -> Navigation {
        if from == to {
            return Navigation::Proceed;
        }
        debug!(%from, %to, transcript_len, "Navigation requested");
        self.ask(transcript_len, confirm)
    }

    /// Closing or reloading the client.
    pub fn allow_exit(&self, transcript_len: usize, confirm: &dyn Confirm) -> Navigation {
        self.ask(transcript_len, confirm)
    }

    fn ask(&self, transcript_len: usize, confirm: &dyn Confirm) -> Navigation {
        if transcript_len == 0 || confirm.confirm(LEAVE_PROMPT) {
            Navigation::Proceed
        } else {
            Navigation::Stay
        }
    }
}

/// Checks that `session` may open `route`. A session without a role is
/// treated as a student.
pub fn authorize(route: Route, session: Option<&Session>) -> campus_domain::Result<()> {
    if !route.requires_auth() {
        return Ok(());
    }

    let session = session
        .filter(|session| !session.token.is_blank())
        .ok_or(Error::NotAuthenticated)?;

    if let Some(required) = route.required_role() {
        let role = session.role.unwrap_or(Role::Student);
        if role != required {
            return Err(Error::Forbidden { route, required });
        }
    }

    Ok(())
}
