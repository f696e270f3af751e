//! Session lifecycle controller and route guarding

use chrono::{DateTime, Utc};
use common::error::{HeError, HeResult};
use log::warn;

use crate::{
    data::{role::Role, session::Session, user::User},
    service::credentials::{CredentialService, Credentials},
    storage::SessionStore,
};

/// Storage key recording whether a session was established, holding `"true"` when authenticated
pub const AUTH_STATE_KEY: &str = "isAuthenticated";
/// Storage key holding the session role under its wire name
pub const USER_ROLE_KEY: &str = "userRole";
/// Storage key holding the serialized session user
pub const USER_KEY: &str = "user";
/// Storage key holding the RFC3339 instant the stored session expires
pub const EXPIRES_AT_KEY: &str = "expiresAt";

/// Navigation targets of the platform UI
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Route {
    Landing,
    LenderDashboard,
    ApplicantDashboard,
}

impl Route {
    /// Path of the route within the web application
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::LenderDashboard => "/lender-dashboard",
            Self::ApplicantDashboard => "/applicant-dashboard",
        }
    }

    /// Landing dashboard of a `role` after login
    pub const fn dashboard(role: Role) -> Self {
        match role {
            Role::Lender => Self::LenderDashboard,
            Role::Applicant => Self::ApplicantDashboard,
        }
    }
}

/// Outcome of guarding a protected view
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Guard {
    /// Render the protected view
    Allow,
    /// Navigate to the contained route instead of rendering
    Redirect(Route),
}

/// Current authentication state of the process. A failed login keeps the state at
/// [SessionState::Anonymous] with the error surfaced so the credential form can be retried.
#[derive(Debug)]
enum SessionState {
    Anonymous,
    Authenticated(Session),
}

/// Single owner of the process session state. Created once at application start, mutated only
/// through [login][SessionManager::login] and [logout][SessionManager::logout], and handed to
/// views by reference for [guard][SessionManager::guard] checks.
pub struct SessionManager<C, S>
where
    C: CredentialService,
    S: SessionStore,
{
    /// Service used to verify submitted credentials
    credentials: C,
    /// Durable storage the session is mirrored into so it survives process restarts
    store: S,
    /// Current authentication state
    state: SessionState,
}

impl<C, S> SessionManager<C, S>
where
    C: CredentialService,
    S: SessionStore,
{
    /// Create a manager in the anonymous state. Call
    /// [restore_session][Self::restore_session] once afterwards to pick up a stored session.
    pub const fn new(credentials: C, store: S) -> Self {
        Self {
            credentials,
            store,
            state: SessionState::Anonymous,
        }
    }

    /// Validate the `email` and `password` and establish a session on success. The session is
    /// mirrored into durable storage; a storage failure is logged and swallowed since the
    /// in-memory session alone is enough to proceed. Callers navigate to
    /// [Session::role] -> [Route::dashboard] after a successful login.
    /// # Errors
    /// This function will return [HeError::InvalidCredentials] if the credentials are rejected,
    /// or another error if the credential service cannot be reached. The state remains
    /// anonymous in both cases.
    pub async fn login(&mut self, email: &str, password: &str) -> HeResult<Session> {
        let credentials = Credentials::new(email, password);
        let user = self.credentials.validate_user(&credentials).await?;
        let session = Session::new(user);
        if let Err(error) = self.persist(&session) {
            warn!("Could not mirror session into durable storage. {error}");
        }
        self.state = SessionState::Authenticated(session.clone());
        Ok(session)
    }

    /// Close the current session. The remote notification is best-effort; local state and
    /// durable storage are cleared unconditionally even when it fails, so the client never
    /// remains in an authenticated-looking state. Returns the route to navigate to.
    pub async fn logout(&mut self) -> Route {
        if let Err(error) = self.credentials.logout().await {
            warn!("Logout notification failed, clearing local session regardless. {error}");
        }
        self.state = SessionState::Anonymous;
        if let Err(error) = self.store.clear() {
            warn!("Could not clear durable session storage. {error}");
        }
        Route::Landing
    }

    /// Reconstruct the session from durable storage. Invoked once at process start. A missing,
    /// malformed or expired record yields [None] and an anonymous state; this never fails.
    pub fn restore_session(&mut self) -> Option<Session> {
        let session = match self.read_stored() {
            Ok(session) => session,
            Err(error) => {
                warn!("Ignoring unreadable stored session. {error}");
                None
            }
        }?;
        if session.is_expired() {
            return None;
        }
        self.state = SessionState::Authenticated(session.clone());
        Some(session)
    }

    /// Check whether a protected view may render. Without a session the caller is sent to the
    /// landing page. A role mismatch is corrected silently by redirecting to the session's own
    /// dashboard rather than rejecting the request.
    pub fn guard(&self, required_role: Option<Role>) -> Guard {
        let SessionState::Authenticated(session) = &self.state else {
            return Guard::Redirect(Route::Landing);
        };
        match required_role {
            Some(role) if role != session.role() => {
                Guard::Redirect(Route::dashboard(session.role()))
            }
            _ => Guard::Allow,
        }
    }

    /// Returns a reference to the current session, if authenticated
    pub const fn session(&self) -> Option<&Session> {
        match &self.state {
            SessionState::Authenticated(session) => Some(session),
            SessionState::Anonymous => None,
        }
    }

    /// Checks if the manager currently holds an authenticated session
    pub const fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    /// Mirror the `session` into durable storage under the fixed storage keys
    fn persist(&self, session: &Session) -> HeResult<()> {
        let role: &'static str = session.role().into();
        self.store.set(AUTH_STATE_KEY, "true")?;
        self.store.set(USER_ROLE_KEY, role)?;
        self.store
            .set(USER_KEY, &serde_json::to_string(session.user())?)?;
        self.store
            .set(EXPIRES_AT_KEY, &session.expires_at().to_rfc3339())?;
        Ok(())
    }

    /// Read a stored session back, returning [None] when no complete record exists and an error
    /// when a record exists but cannot be parsed or is internally inconsistent
    fn read_stored(&self) -> HeResult<Option<Session>> {
        let Some(auth_state) = self.store.get(AUTH_STATE_KEY)? else {
            return Ok(None);
        };
        if auth_state != "true" {
            return Ok(None);
        }
        let Some(user) = self.store.get(USER_KEY)? else {
            return Ok(None);
        };
        let user: User = serde_json::from_str(&user)?;
        let Some(role) = self.store.get(USER_ROLE_KEY)? else {
            return Ok(None);
        };
        if role.parse::<Role>().ok() != Some(user.role()) {
            return Err(HeError::Storage(format!(
                "stored role `{role}` does not match the stored user"
            )));
        }
        let Some(expires_at) = self.store.get(EXPIRES_AT_KEY)? else {
            return Ok(None);
        };
        let expires_at = DateTime::parse_from_rfc3339(&expires_at)
            .map_err(|error| HeError::Storage(format!("invalid expiresAt entry. {error}")))?
            .with_timezone(&Utc);
        Ok(Some(Session::restored(user, expires_at)))
    }
}
