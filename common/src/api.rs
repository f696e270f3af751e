use actix_web::{
    cookie::Cookie,
    http::{header::ContentType, StatusCode},
    HttpRequest, HttpResponse, Responder,
};
use log::{error, warn};
use serde::Serialize;

use crate::error::HeError;

/// Generic response body for an [ApiResponse]. A response is either a success containing data or
/// a failure/error message surfaced to the caller as an `{"error": message}` object.
pub enum ApiResponseBody<T: Serialize> {
    Success(T),
    Failure(String),
    Error(String),
}

/// Wire shape of [ApiResponseBody::Failure] and [ApiResponseBody::Error] bodies
#[derive(Serialize)]
struct ErrorBody<'m> {
    /// Message describing why the request was not fulfilled
    error: &'m str,
}

/// API response object serializing a `body` as JSON with the HTTP status code the `body` was
/// built with. This type can be used as a [Responder] for HTTP route handlers. Cookies attached
/// through [with_cookie][ApiResponse::with_cookie] are added to the final response.
pub struct ApiResponse<T: Serialize> {
    /// Status code of the generated HTTP response
    status: StatusCode,
    /// Cookies to attach to the generated HTTP response
    cookies: Vec<Cookie<'static>>,
    /// Payload or message serialized into the response body
    body: ApiResponseBody<T>,
}

impl<T> Responder for ApiResponse<T>
where
    T: Serialize + 'static,
{
    type Body = actix_web::body::BoxBody;

    fn respond_to(self, req: &HttpRequest) -> HttpResponse<Self::Body> {
        let bytes_result = match &self.body {
            ApiResponseBody::Success(data) => serde_json::to_vec(data),
            ApiResponseBody::Failure(message) | ApiResponseBody::Error(message) => {
                serde_json::to_vec(&ErrorBody { error: message })
            }
        };
        let bytes = match bytes_result {
            Ok(inner) => inner,
            Err(error) => {
                let message = format!(
                    "Could not serialize response for {}. Error: {}",
                    req.path(),
                    error
                );
                error!("{}", message);
                return HttpResponse::InternalServerError()
                    .content_type(ContentType::plaintext())
                    .body(message.into_bytes());
            }
        };
        let mut builder = HttpResponse::build(self.status);
        builder.content_type(ContentType::json());
        for cookie in self.cookies {
            builder.cookie(cookie);
        }
        builder.body(bytes)
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// Generate an [ApiResponse] wrapping a [ApiResponseBody::Success] with a 200 status
    pub const fn success(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            cookies: Vec::new(),
            body: ApiResponseBody::Success(data),
        }
    }

    /// Generate an [ApiResponse] wrapping a [ApiResponseBody::Failure]. This is intended for
    /// errors that are not runtime errors but rather bad user provided data, so the `status`
    /// should be in the 4xx range.
    pub fn failure<S: Into<String>>(message: S, status: StatusCode) -> Self {
        let failure_message = message.into();
        warn!("{}", failure_message);
        Self {
            status,
            cookies: Vec::new(),
            body: ApiResponseBody::Failure(failure_message),
        }
    }

    /// Generate an [ApiResponse] for operations that return an [HeError]. Variants that indicate
    /// bad user provided data are downgraded to a [Failure][ApiResponseBody::Failure] with the
    /// matching 4xx status. Everything else is reported as an internal error without leaking the
    /// underlying message.
    pub fn error(error: HeError) -> Self {
        error!("{}", error);
        match error {
            HeError::InvalidCredentials => {
                Self::failure(format!("{error}"), StatusCode::UNAUTHORIZED)
            }
            HeError::InvalidLoanInput { .. } | HeError::Generic(_) => {
                Self::failure(format!("{error}"), StatusCode::BAD_REQUEST)
            }
            _ => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                cookies: Vec::new(),
                body: ApiResponseBody::Error(
                    "Could not perform the required action due to an internal error".to_owned(),
                ),
            },
        }
    }

    /// Attach a `cookie` to the response generated from this [ApiResponse]
    #[must_use]
    pub fn with_cookie(mut self, cookie: Cookie<'static>) -> Self {
        self.cookies.push(cookie);
        self
    }

    /// Status code of the HTTP response this [ApiResponse] generates
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}
