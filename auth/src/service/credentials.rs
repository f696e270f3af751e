use std::sync::Arc;

use common::error::{HeError, HeResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::data::{role::Role, user::User};

/// Raw login form contents submitted to [CredentialService::validate_user]
#[derive(Serialize, Deserialize, Debug)]
pub struct Credentials {
    /// Email as entered by the user, normalized before lookup
    pub(crate) email: String,
    /// Password as entered by the user
    pub(crate) password: String,
}

impl Credentials {
    /// Create new credentials from raw form input
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Email with surrounding whitespace removed and lowercased. This is the lookup key for
    /// credential records so login is case-insensitive on email.
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

/// Credential record backing a demo login. These records are fixed configuration rather than a
/// managed entity; there is no creation or update lifecycle.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    /// Lookup email, compared case-insensitively and unique within a record set
    pub email: String,
    /// Password the submitted value must match exactly
    pub password: String,
    /// Role granted on a successful login
    pub role: Role,
    /// Identifier of the user the record resolves to
    pub id: String,
}

/// The two fixed platform test accounts
static DEMO_CREDENTIALS: Lazy<Vec<CredentialRecord>> = Lazy::new(|| {
    vec![
        CredentialRecord {
            email: "lender@healthera.ai".to_owned(),
            password: "lender0101".to_owned(),
            role: Role::Lender,
            id: "1".to_owned(),
        },
        CredentialRecord {
            email: "applicant@healthera.ai".to_owned(),
            password: "applicant0101".to_owned(),
            role: Role::Applicant,
            id: "2".to_owned(),
        },
    ]
});

/// Capability to verify submitted credentials against a backing source of user records. The
/// session manager and the auth API are written against this trait so a real backend can be
/// substituted without touching either.
#[allow(async_fn_in_trait)]
pub trait CredentialService: Clone + Send + Sync {
    /// Validate the `credentials`, returning the [User] they resolve to
    /// # Errors
    /// This function will return [HeError::InvalidCredentials] if the email is unknown or the
    /// password does not match, or another error if the backing source cannot be reached
    async fn validate_user(&self, credentials: &Credentials) -> HeResult<User>;

    /// Notify the backing source that the current user logged out. Best-effort only; callers
    /// must proceed with local cleanup regardless of the outcome.
    /// # Errors
    /// This function will return an error if the backing source cannot be reached
    async fn logout(&self) -> HeResult<()>;
}

/// [CredentialService] backed by a fixed in-process record set
#[derive(Clone)]
pub struct DemoCredentialService {
    /// Record set logins are validated against
    records: Arc<Vec<CredentialRecord>>,
}

impl DemoCredentialService {
    /// Service over the two fixed platform test accounts
    pub fn demo() -> Self {
        Self::with_records(DEMO_CREDENTIALS.clone())
    }

    /// Service over a caller supplied record set
    pub fn with_records(records: Vec<CredentialRecord>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }
}

impl CredentialService for DemoCredentialService {
    async fn validate_user(&self, credentials: &Credentials) -> HeResult<User> {
        let email = credentials.normalized_email();
        let record = self
            .records
            .iter()
            .find(|record| record.email.eq_ignore_ascii_case(&email))
            .filter(|record| record.password == credentials.password)
            .ok_or(HeError::InvalidCredentials)?;
        Ok(User::new(record.id.clone(), email, record.role))
    }

    async fn logout(&self) -> HeResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use common::error::HeError;
    use rstest::rstest;

    use super::{CredentialService, Credentials, DemoCredentialService};
    use crate::data::role::Role;

    #[rstest]
    #[case::plain("lender@healthera.ai", "lender@healthera.ai")]
    #[case::upper_case("LENDER@HEALTHERA.AI", "lender@healthera.ai")]
    #[case::padded("  lender@healthera.ai \n", "lender@healthera.ai")]
    fn normalized_email_should_trim_and_lowercase(#[case] email: &str, #[case] expected: &str) {
        let credentials = Credentials::new(email, "lender0101");

        assert_eq!(credentials.normalized_email(), expected);
    }

    #[rstest]
    #[case::lender("lender@healthera.ai", "lender0101", Role::Lender, "1")]
    #[case::applicant("applicant@healthera.ai", "applicant0101", Role::Applicant, "2")]
    #[case::mixed_case_email("LENDER@healthera.ai", "lender0101", Role::Lender, "1")]
    #[tokio::test]
    async fn validate_user_should_succeed_when_known_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] role: Role,
        #[case] id: &str,
    ) {
        let service = DemoCredentialService::demo();

        let user = service
            .validate_user(&Credentials::new(email, password))
            .await
            .unwrap();

        assert_eq!(user.role(), role);
        assert_eq!(user.id(), id);
        assert_eq!(user.email(), email.trim().to_lowercase());
    }

    #[rstest]
    #[case::wrong_password("lender@healthera.ai", "lender0102")]
    #[case::unknown_email("nobody@healthera.ai", "lender0101")]
    #[case::case_sensitive_password("lender@healthera.ai", "LENDER0101")]
    #[tokio::test]
    async fn validate_user_should_fail_when_unknown_credentials(
        #[case] email: &str,
        #[case] password: &str,
    ) {
        let service = DemoCredentialService::demo();

        let result = service
            .validate_user(&Credentials::new(email, password))
            .await;

        assert!(matches!(result, Err(HeError::InvalidCredentials)));
    }
}
