//! Domain rules for session tracking.
//!
//! Pure logic only: no database or HTTP dependencies. The persistence and
//! transport crates build on the conventions defined here.

pub mod action;
pub mod client;
pub mod error;
pub mod filter;
pub mod links;
pub mod session;
pub mod session_date;
pub mod types;
pub mod validation;
