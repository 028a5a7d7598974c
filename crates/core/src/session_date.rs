//! Session date rules.
//!
//! Dates are soft-deleted: `ELIMINAR` clears `activo` and the row stays.

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::filter;
use crate::validation::validate_reference;

/// Entity label used in errors and logs.
pub const ENTITY: &str = "SessionDate";

/// Checks shared by Create (with a session reference) and Update (without).
pub fn validate_session_date(
    id_calendario_sesiones: Option<i64>,
    fecha: NaiveDate,
) -> Result<(), CoreError> {
    if let Some(id) = id_calendario_sesiones {
        validate_reference("id_calendario_sesiones", id)?;
    }
    filter::validate_in_window("fecha", fecha)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn may_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn valid_create_passes() {
        assert!(validate_session_date(Some(1), may_first()).is_ok());
    }

    #[test]
    fn update_without_session_reference_passes() {
        assert!(validate_session_date(None, may_first()).is_ok());
    }

    #[test]
    fn sentinel_session_reference_rejected() {
        assert!(validate_session_date(Some(-99), may_first()).is_err());
    }
}
