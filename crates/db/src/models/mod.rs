//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the read procedure's rowset
//! - A `Deserialize` + `Validate` create DTO
//! - An update DTO where the entity supports in-place edits
//! - A flat, all-optional field record for the tag-compat manage entry point

pub mod catalog;
pub mod client;
pub mod session;
pub mod session_date;
pub mod session_deliverable;
pub mod session_funding;

/// Serde default for `activo` flags.
pub(crate) fn default_true() -> bool {
    true
}
