pub mod catalog;
pub mod client;
pub mod session;
pub mod session_date;
pub mod session_deliverable;
pub mod session_funding;
