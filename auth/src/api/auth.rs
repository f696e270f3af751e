use actix_web::{
    cookie::{time::Duration, Cookie, SameSite},
    http::StatusCode,
    web,
};
use common::{api::ApiResponse, error::HeError};
use serde::{Deserialize, Serialize};

use crate::{
    data::user::User,
    service::credentials::{CredentialService, Credentials},
};

/// Name of the cookie marking an authenticated browser session
const AUTH_COOKIE: &str = "auth";
/// Name of the cookie carrying the authenticated role
const USER_ROLE_COOKIE: &str = "userRole";
/// Auth cookie lifetime, after which the browser drops the session
const COOKIE_MAX_AGE: Duration = Duration::hours(24);

/// Response body of a successful login
#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    /// User the submitted credentials resolved to
    pub user: User,
}

/// Response body of a logout request. Always reports success so the client proceeds with its
/// local cleanup regardless of server state.
#[derive(Serialize, Deserialize, Debug)]
pub struct LogoutResponse {
    /// Whether the logout completed; always true on the wire
    pub success: bool,
}

/// Session cookie with the hardening attributes shared by all auth cookies
fn session_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build(name, value)
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(COOKIE_MAX_AGE)
        .path("/")
        .finish()
}

/// Expired cookie instructing the browser to drop the cookie named `name`
fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, "");
    cookie.make_removal();
    cookie
}

/// API endpoint to validate user credentials and open an authenticated session
pub async fn login<C>(
    credentials: web::Json<Credentials>,
    service: web::Data<C>,
) -> ApiResponse<LoginResponse>
where
    C: CredentialService,
{
    let credentials = credentials.into_inner();
    match service.validate_user(&credentials).await {
        Ok(user) => {
            let role_cookie = session_cookie(USER_ROLE_COOKIE, user.role().as_ref().to_owned());
            ApiResponse::success(LoginResponse { user })
                .with_cookie(session_cookie(AUTH_COOKIE, "true".to_owned()))
                .with_cookie(role_cookie)
        }
        Err(error) if matches!(error, HeError::InvalidCredentials) => {
            ApiResponse::failure("Invalid credentials", StatusCode::UNAUTHORIZED)
        }
        Err(error) => ApiResponse::error(error),
    }
}

/// API endpoint to close the current session. Always succeeds from the caller's perspective and
/// clears the auth cookies.
pub async fn logout() -> ApiResponse<LogoutResponse> {
    ApiResponse::success(LogoutResponse { success: true })
        .with_cookie(removal_cookie(AUTH_COOKIE))
        .with_cookie(removal_cookie(USER_ROLE_COOKIE))
}
