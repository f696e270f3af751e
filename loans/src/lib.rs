#![warn(clippy::missing_docs_in_private_items)]
#![warn(clippy::missing_const_for_fn)]

//! Loan term calculation for the Healthera lending platform

pub mod amortization;
pub mod terms;
