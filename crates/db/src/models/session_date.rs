//! Session date model and DTOs.
//!
//! A session date belongs to exactly one session for its whole life; edits
//! change `fecha` / `hora` only and deletes clear `activo`.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sesiones_core::action::{required, ManageFields};
use sesiones_core::error::CoreError;
use sesiones_core::types::DbId;
use sqlx::FromRow;

use super::default_true;

/// A row from `procesos.sp_calendario_sesiones_fechas`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct SessionDate {
    pub id: DbId,
    pub id_calendario_sesiones: DbId,
    pub fecha: NaiveDate,
    /// Wall-clock time without zone.
    pub hora: NaiveTime,
    pub activo: bool,
}

/// DTO for scheduling a new date under a session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionDate {
    pub id_calendario_sesiones: DbId,
    pub fecha: NaiveDate,
    pub hora: NaiveTime,
    #[serde(default = "default_true")]
    pub activo: bool,
}

/// DTO for rescheduling. The session reference is immutable.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSessionDate {
    pub fecha: NaiveDate,
    pub hora: NaiveTime,
}

/// Filters for the date list; `None` matches everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionDateFilter {
    pub id: Option<DbId>,
    pub id_calendario_sesiones: Option<DbId>,
}

/// Flat field record for `POST /sesiones-fechas/gestionar`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionDateFields {
    pub id_calendario_sesiones: Option<DbId>,
    pub fecha: Option<NaiveDate>,
    pub hora: Option<NaiveTime>,
    pub activo: Option<bool>,
}

impl ManageFields for SessionDateFields {
    type New = CreateSessionDate;
    type Edit = UpdateSessionDate;

    fn into_new(self) -> Result<CreateSessionDate, CoreError> {
        Ok(CreateSessionDate {
            id_calendario_sesiones: required("id_calendario_sesiones", self.id_calendario_sesiones)?,
            fecha: required("fecha", self.fecha)?,
            hora: required("hora", self.hora)?,
            activo: self.activo.unwrap_or(true),
        })
    }

    /// `id_calendario_sesiones` and `activo` are ignored on edit.
    fn into_edit(self) -> Result<UpdateSessionDate, CoreError> {
        Ok(UpdateSessionDate {
            fecha: required("fecha", self.fecha)?,
            hora: required("hora", self.hora)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hora_parses_without_zone() {
        let input: UpdateSessionDate =
            serde_json::from_value(serde_json::json!({"fecha": "2024-05-01", "hora": "10:30:00"}))
                .unwrap();
        assert_eq!(input.hora, NaiveTime::from_hms_opt(10, 30, 0).unwrap());
    }

    #[test]
    fn edit_fields_ignore_session_reference() {
        let fields = SessionDateFields {
            id_calendario_sesiones: Some(99),
            fecha: NaiveDate::from_ymd_opt(2024, 5, 2),
            hora: NaiveTime::from_hms_opt(9, 0, 0),
            activo: Some(false),
        };
        let edit = fields.into_edit().unwrap();
        assert_eq!(edit.fecha, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
    }

    #[test]
    fn new_fields_require_hora() {
        let fields = SessionDateFields {
            id_calendario_sesiones: Some(1),
            fecha: NaiveDate::from_ymd_opt(2024, 5, 2),
            ..SessionDateFields::default()
        };
        assert!(fields.into_new().unwrap_err().to_string().contains("hora"));
    }
}
