use thiserror::Error;

/// All possible error types that may occur during lending platform operations
#[derive(Error, Debug)]
pub enum HeError {
    #[error("Invalid user credentials")]
    InvalidCredentials,
    #[error("Invalid loan input for `{field}`. Value {reason}")]
    InvalidLoanInput {
        field: &'static str,
        reason: &'static str,
    },
    #[error("Session storage error\n{0}")]
    Storage(String),
    #[error("Json serialization/deserialization error\n{0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error\n{0}")]
    Io(#[from] std::io::Error),
    #[error("Reqwest Error\n{0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("{0}")]
    ParseInt(#[from] std::num::ParseIntError),
    #[error("Environment Variable error\n{0}")]
    EnvVar(#[from] std::env::VarError),
    #[error("Generic error\n{0}")]
    Generic(String),
}

impl From<&str> for HeError {
    fn from(value: &str) -> Self {
        Self::Generic(value.to_owned())
    }
}

impl From<String> for HeError {
    fn from(value: String) -> Self {
        Self::Generic(value)
    }
}

/// Generic [Result][std::result::Result] type where the error is always [HeError]
pub type HeResult<T> = std::result::Result<T, HeError>;
