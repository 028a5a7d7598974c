//! Action dispatch for the multiplexed "manage" procedures.
//!
//! Each entity is mutated through a single stored function taking an action
//! tag (`NUEVO` / `EDITAR` / `ELIMINAR`) followed by the full parameter tuple.
//! Internally the tag is replaced by [`ManageCommand`], a sum type whose
//! variants carry only the fields that action needs, so "which fields matter
//! for this tag" is settled at compile time. The string tag survives only for
//! binding and for the tag-compat entry point ([`ManageRequest`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

pub const TAG_NEW: &str = "NUEVO";
pub const TAG_EDIT: &str = "EDITAR";
pub const TAG_DELETE: &str = "ELIMINAR";

/// All accepted action tags.
pub const VALID_TAGS: &[&str] = &[TAG_NEW, TAG_EDIT, TAG_DELETE];

/// The closed set of manage actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "NUEVO")]
    New,
    #[serde(rename = "EDITAR")]
    Edit,
    #[serde(rename = "ELIMINAR")]
    Delete,
}

impl Action {
    /// The tag bound as the first argument of a manage procedure.
    pub fn as_tag(self) -> &'static str {
        match self {
            Action::New => TAG_NEW,
            Action::Edit => TAG_EDIT,
            Action::Delete => TAG_DELETE,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for Action {
    type Err = CoreError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            TAG_NEW => Ok(Action::New),
            TAG_EDIT => Ok(Action::Edit),
            TAG_DELETE => Ok(Action::Delete),
            other => Err(CoreError::InvalidArgument(format!(
                "Unknown action tag '{other}'. Must be one of: {}",
                VALID_TAGS.join(", ")
            ))),
        }
    }
}

/// One manage request, carrying exactly what its action needs.
///
/// `K` is the entity key: a plain id for most entities, a composite pair for
/// join rows. Entities that cannot be edited in place set `E` to
/// [`std::convert::Infallible`], making `Edit` unconstructible.
#[derive(Debug, Clone, PartialEq)]
pub enum ManageCommand<N, E, K = DbId> {
    New(N),
    Edit { key: K, changes: E },
    Delete { key: K },
}

impl<N, E, K> ManageCommand<N, E, K> {
    pub fn action(&self) -> Action {
        match self {
            ManageCommand::New(_) => Action::New,
            ManageCommand::Edit { .. } => Action::Edit,
            ManageCommand::Delete { .. } => Action::Delete,
        }
    }

    /// The targeted key; `None` for `New`, whose key is assigned downstream.
    pub fn key(&self) -> Option<&K> {
        match self {
            ManageCommand::New(_) => None,
            ManageCommand::Edit { key, .. } | ManageCommand::Delete { key } => Some(key),
        }
    }

    /// Borrow the payloads, copying the key.
    pub fn as_ref(&self) -> ManageCommand<&N, &E, K>
    where
        K: Copy,
    {
        match self {
            ManageCommand::New(input) => ManageCommand::New(input),
            ManageCommand::Edit { key, changes } => ManageCommand::Edit {
                key: *key,
                changes,
            },
            ManageCommand::Delete { key } => ManageCommand::Delete { key: *key },
        }
    }
}

/// What a manage procedure reported back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ManageOutcome {
    /// `New` assigned this identifier.
    Created(DbId),
    /// `Edit` / `Delete` touched this many rows (0 or 1).
    Affected(u64),
}

/// Interpret the scalar a manage procedure returned for `action`.
///
/// `New` must yield a positive identifier; anything else means the procedure
/// broke its contract. `Edit` / `Delete` yield a row count where `NULL` is
/// read as zero.
pub fn interpret(action: Action, raw: Option<i64>) -> Result<ManageOutcome, CoreError> {
    match action {
        Action::New => match raw {
            Some(id) if id > 0 => Ok(ManageOutcome::Created(id)),
            other => Err(CoreError::Internal(format!(
                "manage procedure returned {other:?} for {action}; expected a positive identifier"
            ))),
        },
        Action::Edit | Action::Delete => match raw.unwrap_or(0) {
            n if n >= 0 => Ok(ManageOutcome::Affected(n as u64)),
            n => Err(CoreError::Internal(format!(
                "manage procedure returned negative row count {n} for {action}"
            ))),
        },
    }
}

impl ManageOutcome {
    /// The identifier assigned by `New`.
    pub fn created_id(self) -> Result<DbId, CoreError> {
        match self {
            ManageOutcome::Created(id) => Ok(id),
            ManageOutcome::Affected(n) => Err(CoreError::Internal(format!(
                "expected a created identifier, got an affected count of {n}"
            ))),
        }
    }

    /// Rows touched by the call; a creation counts as one.
    pub fn affected(self) -> u64 {
        match self {
            ManageOutcome::Created(_) => 1,
            ManageOutcome::Affected(n) => n,
        }
    }

    /// The affected count of `Edit` / `Delete`; zero means the target is gone.
    pub fn require_affected(
        self,
        entity: &'static str,
        key: impl fmt::Display,
    ) -> Result<u64, CoreError> {
        match self {
            ManageOutcome::Affected(0) => Err(CoreError::not_found(entity, key)),
            ManageOutcome::Affected(n) => Ok(n),
            ManageOutcome::Created(id) => Err(CoreError::Internal(format!(
                "expected an affected count, got created identifier {id}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Tag-compat entry point
// ---------------------------------------------------------------------------

/// Converts a flat, all-optional field record into the per-action inputs.
///
/// Implemented next to each entity's DTOs. `into_new` and `into_edit` report
/// the first missing required field as a validation failure.
pub trait ManageFields {
    type New;
    type Edit;

    fn into_new(self) -> Result<Self::New, CoreError>;
    fn into_edit(self) -> Result<Self::Edit, CoreError>;
}

/// A legacy-shaped manage request: `{ "accion": ..., "id": ..., ...fields }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ManageRequest<F> {
    pub accion: String,
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(flatten)]
    pub fields: F,
}

impl<F: ManageFields> ManageRequest<F> {
    /// Resolve the tag and check the per-action field subset.
    ///
    /// - `NUEVO`: `id` must be absent, every required field present.
    /// - `EDITAR`: `id` plus the mutable field set.
    /// - `ELIMINAR`: only `id`; other fields are ignored.
    pub fn into_command(self) -> Result<ManageCommand<F::New, F::Edit>, CoreError> {
        let action: Action = self.accion.parse()?;
        match action {
            Action::New => {
                if self.id.is_some() {
                    return Err(CoreError::validation(
                        "id",
                        "'id' must be omitted for NUEVO; it is assigned on creation",
                    ));
                }
                Ok(ManageCommand::New(self.fields.into_new()?))
            }
            Action::Edit => {
                let key = required("id", self.id)?;
                Ok(ManageCommand::Edit {
                    key,
                    changes: self.fields.into_edit()?,
                })
            }
            Action::Delete => Ok(ManageCommand::Delete {
                key: required("id", self.id)?,
            }),
        }
    }
}

/// Unwrap a field that the current action requires.
pub fn required<T>(field: &str, value: Option<T>) -> Result<T, CoreError> {
    value.ok_or_else(|| CoreError::validation(field, format!("'{field}' is required")))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[derive(Debug, Default, Deserialize)]
    struct NameFields {
        nombre: Option<String>,
    }

    impl ManageFields for NameFields {
        type New = String;
        type Edit = String;

        fn into_new(self) -> Result<String, CoreError> {
            required("nombre", self.nombre)
        }

        fn into_edit(self) -> Result<String, CoreError> {
            required("nombre", self.nombre)
        }
    }

    fn request(accion: &str, id: Option<DbId>, nombre: Option<&str>) -> ManageRequest<NameFields> {
        ManageRequest {
            accion: accion.to_string(),
            id,
            fields: NameFields {
                nombre: nombre.map(str::to_string),
            },
        }
    }

    // -- Action tags ---------------------------------------------------------

    #[test]
    fn known_tags_parse() {
        assert_eq!("NUEVO".parse::<Action>().unwrap(), Action::New);
        assert_eq!("EDITAR".parse::<Action>().unwrap(), Action::Edit);
        assert_eq!("ELIMINAR".parse::<Action>().unwrap(), Action::Delete);
    }

    #[test]
    fn unknown_tag_is_invalid_argument() {
        assert_matches!("BORRAR".parse::<Action>(), Err(CoreError::InvalidArgument(_)));
    }

    #[test]
    fn tags_are_case_sensitive() {
        assert!("nuevo".parse::<Action>().is_err());
        assert!("".parse::<Action>().is_err());
    }

    #[test]
    fn tag_round_trips_through_display() {
        for action in [Action::New, Action::Edit, Action::Delete] {
            assert_eq!(action.to_string().parse::<Action>().unwrap(), action);
        }
    }

    // -- Outcome interpretation ---------------------------------------------

    #[test]
    fn new_with_positive_id_is_created() {
        assert_eq!(interpret(Action::New, Some(12)).unwrap(), ManageOutcome::Created(12));
    }

    #[test]
    fn new_without_id_is_internal() {
        assert_matches!(interpret(Action::New, None), Err(CoreError::Internal(_)));
        assert_matches!(interpret(Action::New, Some(0)), Err(CoreError::Internal(_)));
    }

    #[test]
    fn null_count_reads_as_zero() {
        assert_eq!(interpret(Action::Delete, None).unwrap(), ManageOutcome::Affected(0));
    }

    #[test]
    fn negative_count_is_internal() {
        assert_matches!(interpret(Action::Edit, Some(-1)), Err(CoreError::Internal(_)));
    }

    #[test]
    fn zero_affected_is_not_found() {
        let err = ManageOutcome::Affected(0)
            .require_affected("Session", 999_999)
            .unwrap_err();
        assert_matches!(err, CoreError::NotFound { entity: "Session", ref id } if id == "999999");
    }

    #[test]
    fn one_affected_passes() {
        assert_eq!(ManageOutcome::Affected(1).require_affected("Client", 1).unwrap(), 1);
    }

    // -- Tag-compat requests -------------------------------------------------

    #[test]
    fn new_request_builds_new_command() {
        let cmd = request("NUEVO", None, Some("Ana")).into_command().unwrap();
        assert_eq!(cmd, ManageCommand::New("Ana".to_string()));
        assert_eq!(cmd.key(), None);
    }

    #[test]
    fn new_request_with_id_rejected() {
        let err = request("NUEVO", Some(4), Some("Ana")).into_command().unwrap_err();
        assert_matches!(err, CoreError::Validation { ref field, .. } if field == "id");
    }

    #[test]
    fn new_request_missing_field_names_it() {
        let err = request("NUEVO", None, None).into_command().unwrap_err();
        assert_matches!(err, CoreError::Validation { ref field, .. } if field == "nombre");
    }

    #[test]
    fn edit_request_requires_id() {
        let err = request("EDITAR", None, Some("Ana")).into_command().unwrap_err();
        assert_matches!(err, CoreError::Validation { ref field, .. } if field == "id");
    }

    #[test]
    fn edit_request_carries_key_and_changes() {
        let cmd = request("EDITAR", Some(3), Some("Eva")).into_command().unwrap();
        assert_eq!(cmd.action(), Action::Edit);
        assert_eq!(cmd.key(), Some(&3));
    }

    #[test]
    fn as_ref_borrows_payload_and_copies_key() {
        let cmd: ManageCommand<String, String> = ManageCommand::Edit {
            key: 3,
            changes: "Eva".to_string(),
        };
        let borrowed = cmd.as_ref();
        assert_eq!(borrowed.key(), Some(&3));
        assert_matches!(borrowed, ManageCommand::Edit { changes, .. } if changes == "Eva");
    }

    #[test]
    fn delete_request_ignores_other_fields() {
        let cmd = request("ELIMINAR", Some(9), None).into_command().unwrap();
        assert_eq!(cmd, ManageCommand::Delete { key: 9 });
    }

    #[test]
    fn unknown_tag_fails_before_field_checks() {
        let err = request("ARCHIVAR", None, None).into_command().unwrap_err();
        assert_matches!(err, CoreError::InvalidArgument(_));
    }

    #[test]
    fn request_deserializes_flattened_fields() {
        let req: ManageRequest<NameFields> =
            serde_json::from_value(serde_json::json!({"accion": "NUEVO", "nombre": "Ana"}))
                .unwrap();
        assert_eq!(req.id, None);
        assert_eq!(req.fields.nombre.as_deref(), Some("Ana"));
    }
}
