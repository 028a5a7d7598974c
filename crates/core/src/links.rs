//! Join rows linking a session to catalog items.
//!
//! Links are identified by their `(session, item)` pair and are create/delete
//! only; there is no in-place edit.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;
use crate::validation::validate_reference;

pub const FUNDING_ENTITY: &str = "SessionFundingSource";
pub const DELIVERABLE_ENTITY: &str = "SessionDeliverable";

/// Composite key of a join row: the owning session and the linked item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkKey {
    pub session_id: DbId,
    pub item_id: DbId,
}

impl LinkKey {
    pub fn new(session_id: DbId, item_id: DbId) -> Self {
        Self {
            session_id,
            item_id,
        }
    }

    /// Both halves must be real identifiers.
    pub fn validate(&self, session_field: &str, item_field: &str) -> Result<(), CoreError> {
        validate_reference(session_field, self.session_id)?;
        validate_reference(item_field, self.item_id)
    }
}

impl fmt::Display for LinkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.session_id, self.item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_both_ids() {
        assert_eq!(LinkKey::new(5, 3).to_string(), "5/3");
    }

    #[test]
    fn non_positive_item_rejected_by_name() {
        let err = LinkKey::new(5, 0)
            .validate("id_calendario_sesiones", "id_fuente_financiamiento")
            .unwrap_err();
        assert!(err.to_string().contains("id_fuente_financiamiento"));
    }

    #[test]
    fn positive_pair_passes() {
        assert!(LinkKey::new(1, 1).validate("a", "b").is_ok());
    }
}
