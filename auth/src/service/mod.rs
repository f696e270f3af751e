//! Credential verification services backing the login flow

pub mod credentials;
pub mod remote;
