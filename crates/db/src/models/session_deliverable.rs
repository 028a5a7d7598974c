//! Session ↔ deliverable checklist links.

use serde::{Deserialize, Serialize};
use sesiones_core::links::LinkKey;
use sesiones_core::types::DbId;
use sqlx::FromRow;

/// A linked deliverable, with its catalog description denormalized.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct SessionDeliverable {
    pub id_calendario_sesiones: DbId,
    pub id_listado_entregables: DbId,
    pub descripcion: String,
}

/// DTO for linking a deliverable to a session.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CreateSessionDeliverable {
    pub id_calendario_sesiones: DbId,
    pub id_listado_entregables: DbId,
}

impl CreateSessionDeliverable {
    pub fn key(&self) -> LinkKey {
        LinkKey::new(self.id_calendario_sesiones, self.id_listado_entregables)
    }
}

/// One row of a session's deliverables checklist: every catalog item, with
/// `estatus` set when the session links it.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct DeliverableChecklistItem {
    pub id: DbId,
    pub descripcion: String,
    /// The session the checklist was built for; absent when unfiltered.
    pub id_calendario_sesiones: Option<DbId>,
    pub estatus: bool,
}
