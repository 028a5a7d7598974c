//! Session ↔ funding source links.

use serde::{Deserialize, Serialize};
use sesiones_core::links::LinkKey;
use sesiones_core::types::DbId;
use sqlx::FromRow;

/// A linked funding source, with its catalog description denormalized.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct SessionFundingSource {
    pub id_calendario_sesiones: DbId,
    pub id_fuente_financiamiento: DbId,
    pub fuente_descripcion: String,
}

/// DTO for linking a funding source to a session.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CreateSessionFundingSource {
    pub id_calendario_sesiones: DbId,
    pub id_fuente_financiamiento: DbId,
}

impl CreateSessionFundingSource {
    pub fn key(&self) -> LinkKey {
        LinkKey::new(self.id_calendario_sesiones, self.id_fuente_financiamiento)
    }
}
