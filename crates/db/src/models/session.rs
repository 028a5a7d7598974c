//! Session model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sesiones_core::action::{required, ManageFields};
use sesiones_core::error::CoreError;
use sesiones_core::filter::DateRange;
use sesiones_core::session::{validate_session, SessionRules};
use sesiones_core::types::{DbId, Timestamp};
use sesiones_core::validation::check;
use sqlx::FromRow;
use validator::Validate;

use super::default_true;

/// A row from `procesos.sp_calendario_sesiones`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Session {
    pub id: DbId,
    pub id_ente: String,
    pub id_usuario: DbId,
    pub oficio_o_acta_numero: String,
    pub asunto: String,
    pub fecha: NaiveDate,
    pub id_servidor_publico: Option<DbId>,
    pub modo_sesion: Option<String>,
    pub comite: Option<String>,
    pub id_clasificacion_licitacion: Option<DbId>,
    pub activo: bool,
    pub creado_en: Option<Timestamp>,
}

/// DTO for creating a session. Edits take the same shape and replace every
/// mutable field.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSession {
    #[validate(length(min = 1, max = 20))]
    pub id_ente: String,
    pub id_usuario: DbId,
    #[validate(length(min = 1, max = 100))]
    pub oficio_o_acta_numero: String,
    #[validate(length(min = 1, max = 500))]
    pub asunto: String,
    pub fecha: NaiveDate,
    #[serde(default)]
    pub id_servidor_publico: Option<DbId>,
    #[serde(default)]
    pub modo_sesion: Option<String>,
    #[serde(default)]
    pub comite: Option<String>,
    #[serde(default)]
    pub id_clasificacion_licitacion: Option<DbId>,
    #[serde(default = "default_true")]
    pub activo: bool,
}

pub type UpdateSession = CreateSession;

impl CreateSession {
    /// Field shapes first, then references and closed sets.
    pub fn validate_all(&self) -> Result<(), CoreError> {
        check(self)?;
        validate_session(&SessionRules {
            id_ente: &self.id_ente,
            id_usuario: self.id_usuario,
            fecha: self.fecha,
            id_servidor_publico: self.id_servidor_publico,
            modo_sesion: self.modo_sesion.as_deref(),
            comite: self.comite.as_deref(),
            id_clasificacion_licitacion: self.id_clasificacion_licitacion,
        })
    }
}

/// Independent filters for the session list; `None` matches everything.
#[derive(Debug, Clone, Default)]
pub struct SessionFilter {
    pub id: Option<DbId>,
    pub id_ente: Option<String>,
    pub id_servidor_publico: Option<DbId>,
    pub id_clasificacion_licitacion: Option<DbId>,
    pub fechas: DateRange,
}

/// Flat field record for `POST /sesiones/gestionar`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionFields {
    pub id_ente: Option<String>,
    pub id_usuario: Option<DbId>,
    pub oficio_o_acta_numero: Option<String>,
    pub asunto: Option<String>,
    pub fecha: Option<NaiveDate>,
    pub id_servidor_publico: Option<DbId>,
    pub modo_sesion: Option<String>,
    pub comite: Option<String>,
    pub id_clasificacion_licitacion: Option<DbId>,
    pub activo: Option<bool>,
}

impl ManageFields for SessionFields {
    type New = CreateSession;
    type Edit = UpdateSession;

    fn into_new(self) -> Result<CreateSession, CoreError> {
        Ok(CreateSession {
            id_ente: required("id_ente", self.id_ente)?,
            id_usuario: required("id_usuario", self.id_usuario)?,
            oficio_o_acta_numero: required("oficio_o_acta_numero", self.oficio_o_acta_numero)?,
            asunto: required("asunto", self.asunto)?,
            fecha: required("fecha", self.fecha)?,
            id_servidor_publico: self.id_servidor_publico,
            modo_sesion: self.modo_sesion,
            comite: self.comite,
            id_clasificacion_licitacion: self.id_clasificacion_licitacion,
            activo: self.activo.unwrap_or(true),
        })
    }

    fn into_edit(self) -> Result<UpdateSession, CoreError> {
        self.into_new()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn session() -> CreateSession {
        CreateSession {
            id_ente: "E1".into(),
            id_usuario: 7,
            oficio_o_acta_numero: "OF-1".into(),
            asunto: "Revisión".into(),
            fecha: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            id_servidor_publico: None,
            modo_sesion: None,
            comite: None,
            id_clasificacion_licitacion: None,
            activo: true,
        }
    }

    #[test]
    fn valid_session_passes() {
        assert!(session().validate_all().is_ok());
    }

    #[test]
    fn blank_asunto_rejected_before_rules() {
        let input = CreateSession {
            asunto: String::new(),
            modo_sesion: Some("bogus".into()),
            ..session()
        };
        assert_matches!(
            input.validate_all(),
            Err(CoreError::Validation { ref field, .. }) if field == "asunto"
        );
    }

    #[test]
    fn unknown_modo_rejected() {
        let input = CreateSession {
            modo_sesion: Some("REMOTA".into()),
            ..session()
        };
        assert_matches!(
            input.validate_all(),
            Err(CoreError::Validation { ref field, .. }) if field == "modo_sesion"
        );
    }

    #[test]
    fn activo_defaults_to_true_when_omitted() {
        let input: CreateSession = serde_json::from_value(serde_json::json!({
            "id_ente": "E1",
            "id_usuario": 7,
            "oficio_o_acta_numero": "OF-1",
            "asunto": "Revisión",
            "fecha": "2024-05-01"
        }))
        .unwrap();
        assert!(input.activo);
        assert_eq!(input.modo_sesion, None);
    }

    #[test]
    fn fields_missing_fecha_named() {
        let fields = SessionFields {
            id_ente: Some("E1".into()),
            id_usuario: Some(7),
            oficio_o_acta_numero: Some("OF-1".into()),
            asunto: Some("x".into()),
            ..SessionFields::default()
        };
        assert_matches!(
            fields.into_new(),
            Err(CoreError::Validation { ref field, .. }) if field == "fecha"
        );
    }
}
