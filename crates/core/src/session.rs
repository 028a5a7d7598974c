//! Session (committee meeting / licitación process) rules.

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::filter;
use crate::validation::{validate_one_of, validate_reference};

/// Entity label used in errors and logs.
pub const ENTITY: &str = "Session";

pub const MAX_ENTE_ID_LENGTH: u64 = 20;
pub const MAX_OFICIO_LENGTH: u64 = 100;
pub const MAX_ASUNTO_LENGTH: u64 = 500;

// ---------------------------------------------------------------------------
// Session mode
// ---------------------------------------------------------------------------

pub const MODO_PRESENCIAL: &str = "PRESENCIAL";
pub const MODO_VIRTUAL: &str = "VIRTUAL";
pub const MODO_MIXTA: &str = "MIXTA";

/// Values of the `procesos.modo_sesion` enum.
pub const VALID_MODOS_SESION: &[&str] = &[MODO_PRESENCIAL, MODO_VIRTUAL, MODO_MIXTA];

// ---------------------------------------------------------------------------
// Committee session kind
// ---------------------------------------------------------------------------

pub const COMITE_ORDINARIA: &str = "ORDINARIA";
pub const COMITE_EXTRAORDINARIA: &str = "EXTRAORDINARIA";

/// Values of the `procesos.comite_sesion` enum.
pub const VALID_COMITES: &[&str] = &[COMITE_ORDINARIA, COMITE_EXTRAORDINARIA];

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// The session fields whose rules go beyond length/range checks.
#[derive(Debug, Clone, Copy)]
pub struct SessionRules<'a> {
    pub id_ente: &'a str,
    pub id_usuario: i64,
    pub fecha: NaiveDate,
    pub id_servidor_publico: Option<i64>,
    pub modo_sesion: Option<&'a str>,
    pub comite: Option<&'a str>,
    pub id_clasificacion_licitacion: Option<i64>,
}

/// Cross-field and closed-set checks shared by Create and Update.
pub fn validate_session(rules: &SessionRules<'_>) -> Result<(), CoreError> {
    filter::ensure_not_sentinel("id_ente", &rules.id_ente.to_string())?;
    validate_reference("id_usuario", rules.id_usuario)?;
    filter::validate_in_window("fecha", rules.fecha)?;
    if let Some(id) = rules.id_servidor_publico {
        validate_reference("id_servidor_publico", id)?;
    }
    if let Some(modo) = rules.modo_sesion {
        validate_one_of("modo_sesion", modo, VALID_MODOS_SESION)?;
    }
    if let Some(comite) = rules.comite {
        validate_one_of("comite", comite, VALID_COMITES)?;
    }
    if let Some(id) = rules.id_clasificacion_licitacion {
        validate_reference("id_clasificacion_licitacion", id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn base() -> SessionRules<'static> {
        SessionRules {
            id_ente: "E1",
            id_usuario: 7,
            fecha: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            id_servidor_publico: None,
            modo_sesion: None,
            comite: None,
            id_clasificacion_licitacion: None,
        }
    }

    fn failing_field(rules: SessionRules<'_>) -> String {
        match validate_session(&rules) {
            Err(CoreError::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn minimal_session_is_valid() {
        assert!(validate_session(&base()).is_ok());
    }

    #[test]
    fn all_optionals_set_is_valid() {
        let rules = SessionRules {
            id_servidor_publico: Some(3),
            modo_sesion: Some(MODO_VIRTUAL),
            comite: Some(COMITE_EXTRAORDINARIA),
            id_clasificacion_licitacion: Some(1),
            ..base()
        };
        assert!(validate_session(&rules).is_ok());
    }

    #[test]
    fn sentinel_ente_rejected() {
        let rules = SessionRules {
            id_ente: "-99",
            ..base()
        };
        assert_eq!(failing_field(rules), "id_ente");
    }

    #[test]
    fn unknown_modo_rejected() {
        let rules = SessionRules {
            modo_sesion: Some("presencial"),
            ..base()
        };
        assert_eq!(failing_field(rules), "modo_sesion");
    }

    #[test]
    fn unknown_comite_rejected() {
        let rules = SessionRules {
            comite: Some("ESPECIAL"),
            ..base()
        };
        assert_eq!(failing_field(rules), "comite");
    }

    #[test]
    fn non_positive_user_rejected() {
        let rules = SessionRules {
            id_usuario: 0,
            ..base()
        };
        assert_eq!(failing_field(rules), "id_usuario");
    }

    #[test]
    fn date_outside_read_window_rejected() {
        let rules = SessionRules {
            fecha: NaiveDate::from_ymd_opt(2200, 1, 1).unwrap(),
            ..base()
        };
        assert_eq!(failing_field(rules), "fecha");
    }

    #[test]
    fn sentinel_classification_rejected() {
        let rules = SessionRules {
            id_clasificacion_licitacion: Some(-99),
            ..base()
        };
        assert_matches!(
            validate_session(&rules),
            Err(CoreError::Validation { ref field, .. }) if field == "id_clasificacion_licitacion"
        );
    }
}
