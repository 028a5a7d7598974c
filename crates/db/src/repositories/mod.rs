//! Repository modules, one per entity manager plus the read-only catalogs.
//!
//! Mutations go through the entity's manage stored function via
//! [`crate::dispatch`]; reads call the entity's read function with every
//! absent filter resolved to the "match all" literal.

pub mod catalog_repo;
pub mod client_repo;
pub mod session_date_repo;
pub mod session_deliverable_repo;
pub mod session_funding_repo;
pub mod session_repo;

pub use catalog_repo::CatalogRepo;
pub use client_repo::{ClientProcedure, ClientRepo};
pub use session_date_repo::{SessionDateProcedure, SessionDateRepo};
pub use session_deliverable_repo::{SessionDeliverableProcedure, SessionDeliverableRepo};
pub use session_funding_repo::{SessionFundingProcedure, SessionFundingRepo};
pub use session_repo::{SessionProcedure, SessionRepo};
