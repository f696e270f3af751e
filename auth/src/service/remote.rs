use std::time::Duration;

use common::error::{HeError, HeResult};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    data::user::User,
    service::credentials::{CredentialService, Credentials},
};

/// Bound on how long a single credential round trip may block the caller. There is no retry; a
/// slow backend surfaces as a single failed login the user can resubmit.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Body of a successful login response from the platform auth API
#[derive(Deserialize)]
struct LoginBody {
    /// User the submitted credentials resolved to
    user: User,
}

/// [CredentialService] backed by the platform auth API over HTTP
#[derive(Clone)]
pub struct RemoteCredentialService {
    /// HTTP client shared by all requests of this service
    client: Client,
    /// Base url of the auth API, e.g. `http://127.0.0.1:8080`
    base_url: String,
}

impl RemoteCredentialService {
    /// Create a service targeting the auth API at `base_url`
    /// # Errors
    /// This function will return an error if the HTTP client cannot be constructed
    pub fn new(base_url: impl Into<String>) -> HeResult<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

impl CredentialService for RemoteCredentialService {
    async fn validate_user(&self, credentials: &Credentials) -> HeResult<User> {
        let response = self
            .client
            .post(format!("{}/auth/login", self.base_url))
            .json(credentials)
            .send()
            .await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(HeError::InvalidCredentials);
        }
        if !response.status().is_success() {
            return Err(HeError::Generic(format!(
                "Login request returned a {} response",
                response.status()
            )));
        }
        let body: LoginBody = response.json().await?;
        Ok(body.user)
    }

    async fn logout(&self) -> HeResult<()> {
        self.client
            .post(format!("{}/auth/logout", self.base_url))
            .send()
            .await?;
        Ok(())
    }
}
