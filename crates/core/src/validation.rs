//! Shared validation helpers.
//!
//! Field-shape checks (lengths, ranges) are declared with `validator` derives
//! on the input DTOs; [`check`] runs them and reports the first failing field
//! as a [`CoreError::Validation`]. Closed-set membership is checked with
//! [`validate_one_of`].

use validator::{Validate, ValidationErrors};

use crate::error::CoreError;

/// Run the derived rules on `input`, mapping the first failure to a
/// field-named [`CoreError::Validation`].
///
/// Fields are visited in name order so the reported field is stable.
pub fn check<T: Validate>(input: &T) -> Result<(), CoreError> {
    input.validate().map_err(|errors| first_field_error(&errors))
}

fn first_field_error(errors: &ValidationErrors) -> CoreError {
    let mut fields: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|err| {
                let field = field.to_string();
                let message = match &err.message {
                    Some(msg) => msg.to_string(),
                    None => describe(&field, &err.code, &err.params),
                };
                (field, message)
            })
        })
        .collect();
    fields.sort();

    match fields.into_iter().next() {
        Some((field, message)) => CoreError::Validation { field, message },
        None => CoreError::validation("body", "Input failed validation"),
    }
}

fn describe(
    field: &str,
    code: &str,
    params: &std::collections::HashMap<std::borrow::Cow<'static, str>, serde_json::Value>,
) -> String {
    let bound = |name: &str| params.get(name).map(|v| v.to_string());
    match (code, bound("min"), bound("max")) {
        ("length", Some(min), Some(max)) => {
            format!("'{field}' must be between {min} and {max} characters")
        }
        ("range", Some(min), Some(max)) => format!("'{field}' must be between {min} and {max}"),
        ("range", Some(min), None) => format!("'{field}' must be at least {min}"),
        _ => format!("'{field}' is invalid ({code})"),
    }
}

/// Validate that `value` is one of `allowed`.
pub fn validate_one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), CoreError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::validation(
            field,
            format!(
                "Invalid {field} '{value}'. Must be one of: {}",
                allowed.join(", ")
            ),
        ))
    }
}

/// Validate that a referenced identifier is a real key (strictly positive).
pub fn validate_reference(field: &str, id: i64) -> Result<(), CoreError> {
    if id > 0 {
        Ok(())
    } else {
        Err(CoreError::validation(
            field,
            format!("'{field}' must be a positive identifier"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use validator::Validate;

    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, max = 5))]
        alpha: String,
        #[validate(range(min = 0, max = 10))]
        beta: i32,
    }

    #[test]
    fn valid_input_passes() {
        let s = Sample {
            alpha: "abc".into(),
            beta: 3,
        };
        assert!(check(&s).is_ok());
    }

    #[test]
    fn failing_field_is_named() {
        let s = Sample {
            alpha: "abc".into(),
            beta: 11,
        };
        let err = check(&s).unwrap_err();
        assert_matches!(err, CoreError::Validation { ref field, .. } if field == "beta");
    }

    #[test]
    fn first_field_in_name_order_reported() {
        let s = Sample {
            alpha: String::new(),
            beta: -1,
        };
        let err = check(&s).unwrap_err();
        assert_matches!(err, CoreError::Validation { ref field, ref message }
            if field == "alpha" && message.contains("between"));
    }

    #[test]
    fn one_of_accepts_member() {
        assert!(validate_one_of("comite", "ORDINARIA", &["ORDINARIA"]).is_ok());
    }

    #[test]
    fn one_of_rejects_non_member() {
        let err = validate_one_of("comite", "OTRA", &["ORDINARIA"]).unwrap_err();
        assert!(err.to_string().contains("Must be one of"));
    }

    #[test]
    fn reference_must_be_positive() {
        assert!(validate_reference("id_usuario", 1).is_ok());
        assert!(validate_reference("id_usuario", 0).is_err());
        assert!(validate_reference("id_usuario", -99).is_err());
    }
}
