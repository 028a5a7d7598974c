//! Client model and DTOs.

use serde::{Deserialize, Serialize};
use sesiones_core::action::{required, ManageFields};
use sesiones_core::error::CoreError;
use sesiones_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

/// A row from `sp_clientes_consultar`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Client {
    pub id: DbId,
    pub nombre: String,
    pub edad: i32,
    /// Set once on creation; never changed by edits.
    pub fecha_creacion: Option<Timestamp>,
}

/// DTO for creating a client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateClient {
    #[validate(length(min = 1, max = 200))]
    pub nombre: String,
    #[validate(range(min = 0, max = 150))]
    pub edad: i32,
}

/// Edits replace both mutable fields.
pub type UpdateClient = CreateClient;

/// Flat field record for `POST /clientes/gestionar`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientFields {
    pub nombre: Option<String>,
    pub edad: Option<i32>,
}

impl ManageFields for ClientFields {
    type New = CreateClient;
    type Edit = UpdateClient;

    fn into_new(self) -> Result<CreateClient, CoreError> {
        Ok(CreateClient {
            nombre: required("nombre", self.nombre)?,
            edad: required("edad", self.edad)?,
        })
    }

    fn into_edit(self) -> Result<UpdateClient, CoreError> {
        self.into_new()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use sesiones_core::client::MAX_NAME_LENGTH;
    use sesiones_core::validation::check;

    use super::*;

    fn client(nombre: &str, edad: i32) -> CreateClient {
        CreateClient {
            nombre: nombre.to_string(),
            edad,
        }
    }

    #[test]
    fn valid_client_passes() {
        assert!(check(&client("Ana", 30)).is_ok());
    }

    #[test]
    fn empty_name_rejected() {
        assert_matches!(
            check(&client("", 30)),
            Err(CoreError::Validation { ref field, .. }) if field == "nombre"
        );
    }

    #[test]
    fn overlong_name_rejected() {
        let name = "a".repeat(MAX_NAME_LENGTH as usize + 1);
        assert!(check(&client(&name, 30)).is_err());
    }

    #[test]
    fn negative_age_rejected() {
        assert_matches!(
            check(&client("Ana", -1)),
            Err(CoreError::Validation { ref field, .. }) if field == "edad"
        );
    }

    #[test]
    fn missing_age_in_fields_named() {
        let fields = ClientFields {
            nombre: Some("Ana".into()),
            edad: None,
        };
        assert_matches!(
            fields.into_new(),
            Err(CoreError::Validation { ref field, .. }) if field == "edad"
        );
    }
}
