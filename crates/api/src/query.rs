//! Query parameter types for list endpoints.
//!
//! Every filter is optional. Existing callers may still send the legacy
//! "match all" literal (`-99` / `"-99"`); [`filter::from_wire`] turns it into
//! "no filter" here, so nothing past the handlers sees it.

use chrono::NaiveDate;
use serde::Deserialize;
use sesiones_core::filter::{self, DateRange};
use sesiones_core::types::DbId;
use sesiones_db::models::session::SessionFilter;
use sesiones_db::models::session_date::SessionDateFilter;

/// `GET /clientes?search=&id=`.
#[derive(Debug, Default, Deserialize)]
pub struct ClientListParams {
    pub search: Option<String>,
    pub id: Option<DbId>,
}

/// `GET /sesiones?...`.
#[derive(Debug, Default, Deserialize)]
pub struct SessionListParams {
    pub id: Option<DbId>,
    pub id_ente: Option<String>,
    pub id_servidor_publico: Option<DbId>,
    pub id_clasificacion_licitacion: Option<DbId>,
    pub fecha_desde: Option<NaiveDate>,
    pub fecha_hasta: Option<NaiveDate>,
}

impl SessionListParams {
    pub fn into_filter(self) -> SessionFilter {
        SessionFilter {
            id: filter::from_wire(self.id),
            id_ente: filter::from_wire(self.id_ente),
            id_servidor_publico: filter::from_wire(self.id_servidor_publico),
            id_clasificacion_licitacion: filter::from_wire(self.id_clasificacion_licitacion),
            fechas: DateRange {
                from: self.fecha_desde,
                to: self.fecha_hasta,
            },
        }
    }
}

/// `GET /sesiones-fechas?id=&id_calendario_sesiones=`.
#[derive(Debug, Default, Deserialize)]
pub struct SessionDateListParams {
    pub id: Option<DbId>,
    pub id_calendario_sesiones: Option<DbId>,
}

impl SessionDateListParams {
    pub fn into_filter(self) -> SessionDateFilter {
        SessionDateFilter {
            id: filter::from_wire(self.id),
            id_calendario_sesiones: filter::from_wire(self.id_calendario_sesiones),
        }
    }
}

/// `GET /sesiones/entregables-popular?id=&id_calendario_sesiones=`.
#[derive(Debug, Default, Deserialize)]
pub struct ChecklistParams {
    pub id: Option<DbId>,
    pub id_calendario_sesiones: Option<DbId>,
}

/// `GET /sesiones-entregables?id_calendario_sesiones=`.
#[derive(Debug, Deserialize)]
pub struct SessionLinkParams {
    pub id_calendario_sesiones: DbId,
}

/// Catalogs filtered by a numeric id (`?p_id=`).
#[derive(Debug, Default, Deserialize)]
pub struct CatalogIdParams {
    pub p_id: Option<DbId>,
}

/// `GET /catalogos/entes?p_id=&p_descripcion=`.
#[derive(Debug, Default, Deserialize)]
pub struct PublicEntityParams {
    pub p_id: Option<String>,
    pub p_descripcion: Option<String>,
}

/// `GET /catalogos/servidores-publicos-ente?p_id=&p_id_ente=`.
#[derive(Debug, Default, Deserialize)]
pub struct ServantAssignmentParams {
    pub p_id: Option<DbId>,
    pub p_id_ente: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_sentinels_become_absent_filters() {
        let params = SessionListParams {
            id: Some(-99),
            id_ente: Some("-99".into()),
            id_servidor_publico: Some(-99),
            id_clasificacion_licitacion: Some(4),
            ..SessionListParams::default()
        };
        let filter = params.into_filter();
        assert_eq!(filter.id, None);
        assert_eq!(filter.id_ente, None);
        assert_eq!(filter.id_servidor_publico, None);
        assert_eq!(filter.id_clasificacion_licitacion, Some(4));
    }

    #[test]
    fn real_values_pass_through() {
        let params = SessionDateListParams {
            id: None,
            id_calendario_sesiones: Some(12),
        };
        let filter = params.into_filter();
        assert_eq!(filter.id, None);
        assert_eq!(filter.id_calendario_sesiones, Some(12));
    }

    #[test]
    fn date_bounds_map_onto_range() {
        let params = SessionListParams {
            fecha_desde: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..SessionListParams::default()
        };
        let filter = params.into_filter();
        assert_eq!(filter.fechas.from, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(filter.fechas.to, None);
    }
}
