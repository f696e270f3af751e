//! Data types describing users, roles and sessions

pub mod role;
pub mod session;
pub mod user;
