use std::sync::Arc;

use campus_domain::{AuthToken, Error, Role, Session, SessionRepository, UserProfile};
use tracing::{debug, warn};

/// Current login as seen by every command. Only login and logout write it.
pub struct SessionStore<R> {
    repository: Arc<R>,
}

impl<R> Clone for SessionStore<R> {
    fn clone(&self) -> Self {
        Self { repository: self.repository.clone() }
    }
}

impl<R: SessionRepository> SessionStore<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// The stored session, if it carries a token. Unreadable storage counts
    /// as logged out.
    pub async fn session(&self) -> Option<Session> {
        match self.repository.get_session().await {
            Ok(session) => session.filter(|session| !session.token.is_blank()),
            Err(error) => {
                warn!(?error, "Failed to read stored session; treating as logged out");
                None
            }
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session().await.is_some()
    }

    /// Replaces whatever session was stored before.
    pub async fn set_session(&self, token: AuthToken, role: Option<Role>) -> anyhow::Result<()> {
        debug!(?role, "Storing session");
        self.repository
            .store_session(&Session::new(token, role))
            .await
    }

    pub async fn clear_session(&self) -> anyhow::Result<()> {
        debug!("Clearing session");
        self.repository.clear_session().await
    }

    pub async fn token(&self) -> Option<AuthToken> {
        self.session().await.map(|session| session.token)
    }

    pub async fn role(&self) -> Option<Role> {
        self.session().await.and_then(|session| session.role)
    }

    pub async fn require_token(&self) -> campus_domain::Result<AuthToken> {
        self.token().await.ok_or(Error::NotAuthenticated)
    }

    /// Remembers the latest profile next to the session. Adopts the profile's
    /// role when the session has none. Does nothing when logged out.
    pub async fn cache_profile(&self, profile: UserProfile) -> anyhow::Result<()> {
        let Some(mut session) = self.session().await else {
            return Ok(());
        };
        if session.role.is_none() {
            session.role = profile.role;
        }
        session.profile = Some(profile);
        self.repository.store_session(&session).await
    }

    pub async fn cached_profile(&self) -> Option<UserProfile> {
        self.session().await.and_then(|session| session.profile)
    }
}
