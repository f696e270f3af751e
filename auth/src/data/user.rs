use serde::{Deserialize, Serialize};

use crate::data::role::Role;

/// User entity as the id of the user, their normalized email and the role they possess. The
/// role travels as `type` on the wire and in durable storage.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique identifier of the user
    pub(crate) id: String,
    /// Email of the user, lowercased with surrounding whitespace removed
    pub(crate) email: String,
    /// Role the user possesses
    #[serde(rename = "type")]
    pub(crate) role: Role,
}

impl User {
    /// Create a new [User]. The `email` is expected to already be normalized by the credential
    /// service that resolved it.
    pub fn new(id: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            role,
        }
    }

    /// Returns a string slice of the user's unique identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns a string slice of the user's normalized email
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the role the user possesses
    pub const fn role(&self) -> Role {
        self.role
    }
}
