#![warn(clippy::missing_docs_in_private_items)]
#![warn(clippy::missing_const_for_fn)]

//! Session and authentication management for the Healthera lending platform

pub mod api;
pub mod data;
pub mod service;
pub mod session;
pub mod storage;
