use chrono::{DateTime, Duration, Utc};

use crate::data::{role::Role, user::User};

/// Number of hours a session remains restorable from durable storage, matching the max age of
/// the auth cookies set by the login endpoint
const SESSION_TTL_HOURS: i64 = 24;

/// Authenticated identity and role held for the current user interaction. A [Session] only
/// exists for an authenticated user so holding one implies the role and identity are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// User the session was established for
    user: User,
    /// Instant after which the session can no longer be restored from durable storage
    expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session for the `user`, expiring [SESSION_TTL_HOURS] hours from now
    pub fn new(user: User) -> Self {
        Self {
            user,
            expires_at: Utc::now() + Duration::hours(SESSION_TTL_HOURS),
        }
    }

    /// Reconstruct a session read back from durable storage with its original expiry
    pub const fn restored(user: User, expires_at: DateTime<Utc>) -> Self {
        Self { user, expires_at }
    }

    /// Returns a reference to the user the session was established for
    pub const fn user(&self) -> &User {
        &self.user
    }

    /// Returns the role of the session's user
    pub const fn role(&self) -> Role {
        self.user.role
    }

    /// Returns the instant the session stops being restorable
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Checks whether the session has outlived its storage lifetime
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}
