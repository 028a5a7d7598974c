//! "Match all" filter resolution for read procedures.
//!
//! Every read procedure takes one parameter per filterable column and treats
//! a reserved out-of-domain literal as "no constraint on this column". Inside
//! the application a filter is a plain `Option<T>`; the literal only exists at
//! the two edges:
//!
//! - [`from_wire`] drops a legacy sentinel supplied by an existing caller.
//! - [`resolve`] turns `None` back into the sentinel right before binding.

use chrono::NaiveDate;

use crate::error::CoreError;

/// Reserved "match all" literal for integer identifier columns.
pub const MATCH_ALL_ID: i64 = -99;

/// Reserved "match all" literal for text identifier columns.
pub const MATCH_ALL_TEXT: &str = "-99";

/// Lower bound bound to date-range procedures when no start date is given.
pub const DATE_WINDOW_START: (i32, u32, u32) = (1900, 1, 1);

/// Upper bound bound to date-range procedures when no end date is given.
pub const DATE_WINDOW_END: (i32, u32, u32) = (2100, 12, 31);

/// A column type with a reserved value meaning "match all".
///
/// The value must be disjoint from every legitimate key; identifiers are
/// assigned by BIGSERIAL sequences (always positive) and entity codes are
/// validated against the text sentinel on write.
pub trait Sentinel: Sized + PartialEq {
    fn match_all() -> Self;

    fn is_match_all(&self) -> bool {
        *self == Self::match_all()
    }
}

impl Sentinel for i64 {
    fn match_all() -> Self {
        MATCH_ALL_ID
    }
}

impl Sentinel for String {
    fn match_all() -> Self {
        MATCH_ALL_TEXT.to_string()
    }
}

/// Resolve an optional filter into the value bound to the read procedure.
pub fn resolve<T: Sentinel>(filter: Option<T>) -> T {
    filter.unwrap_or_else(T::match_all)
}

/// Interpret a filter received from a legacy caller.
///
/// An explicit sentinel is the same as omitting the parameter.
pub fn from_wire<T: Sentinel>(raw: Option<T>) -> Option<T> {
    raw.filter(|value| !value.is_match_all())
}

/// Reject a real value that collides with the "match all" literal.
pub fn ensure_not_sentinel<T: Sentinel>(field: &str, value: &T) -> Result<(), CoreError> {
    if value.is_match_all() {
        return Err(CoreError::validation(
            field,
            format!("'{field}' uses a reserved filter value"),
        ));
    }
    Ok(())
}

/// The widest date window accepted by the read procedures.
pub fn date_window() -> (NaiveDate, NaiveDate) {
    let (y1, m1, d1) = DATE_WINDOW_START;
    let (y2, m2, d2) = DATE_WINDOW_END;
    (
        NaiveDate::from_ymd_opt(y1, m1, d1).unwrap_or(NaiveDate::MIN),
        NaiveDate::from_ymd_opt(y2, m2, d2).unwrap_or(NaiveDate::MAX),
    )
}

/// An inclusive date range where either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Resolve open ends to the window bounds.
    ///
    /// Fails with [`CoreError::InvalidArgument`] when the range is inverted,
    /// since no sentinel can express an empty window.
    pub fn resolve(&self) -> Result<(NaiveDate, NaiveDate), CoreError> {
        let (start, end) = date_window();
        let from = self.from.unwrap_or(start);
        let to = self.to.unwrap_or(end);
        if from > to {
            return Err(CoreError::InvalidArgument(format!(
                "date range start {from} is after end {to}"
            )));
        }
        Ok((from, to))
    }
}

/// Check that a stored date falls inside the window the read procedures use.
///
/// A date outside it could be written but never read back.
pub fn validate_in_window(field: &str, date: NaiveDate) -> Result<(), CoreError> {
    let (start, end) = date_window();
    if date < start || date > end {
        return Err(CoreError::validation(
            field,
            format!("'{field}' must be between {start} and {end}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn absent_numeric_filter_resolves_to_sentinel() {
        assert_eq!(resolve::<i64>(None), -99);
    }

    #[test]
    fn present_numeric_filter_passes_through() {
        assert_eq!(resolve(Some(7_i64)), 7);
    }

    #[test]
    fn absent_text_filter_resolves_to_sentinel() {
        assert_eq!(resolve::<String>(None), "-99");
    }

    #[test]
    fn present_text_filter_passes_through() {
        assert_eq!(resolve(Some("E1".to_string())), "E1");
    }

    #[test]
    fn wire_sentinel_becomes_no_filter() {
        assert_eq!(from_wire(Some(-99_i64)), None);
        assert_eq!(from_wire(Some("-99".to_string())), None);
    }

    #[test]
    fn wire_real_value_is_kept() {
        assert_eq!(from_wire(Some(3_i64)), Some(3));
        assert_eq!(from_wire(Some("E1".to_string())), Some("E1".to_string()));
        assert_eq!(from_wire::<i64>(None), None);
    }

    #[test]
    fn sentinel_round_trip_through_both_edges() {
        let legacy = Some(-99_i64);
        assert_eq!(resolve(from_wire(legacy)), MATCH_ALL_ID);
    }

    #[test]
    fn real_value_colliding_with_sentinel_rejected() {
        let err = ensure_not_sentinel("id_ente", &"-99".to_string()).unwrap_err();
        assert_matches!(err, CoreError::Validation { ref field, .. } if field == "id_ente");
        assert!(ensure_not_sentinel("id_ente", &"E1".to_string()).is_ok());
    }

    #[test]
    fn open_range_resolves_to_window() {
        let (from, to) = DateRange::default().resolve().unwrap();
        assert_eq!(from, ymd(1900, 1, 1));
        assert_eq!(to, ymd(2100, 12, 31));
    }

    #[test]
    fn half_open_range_keeps_given_end() {
        let range = DateRange {
            from: Some(ymd(2024, 5, 1)),
            to: None,
        };
        assert_eq!(range.resolve().unwrap(), (ymd(2024, 5, 1), ymd(2100, 12, 31)));
    }

    #[test]
    fn inverted_range_is_invalid_argument() {
        let range = DateRange {
            from: Some(ymd(2024, 6, 1)),
            to: Some(ymd(2024, 5, 1)),
        };
        assert_matches!(range.resolve(), Err(CoreError::InvalidArgument(_)));
    }

    #[test]
    fn dates_outside_window_rejected() {
        assert!(validate_in_window("fecha", ymd(1899, 12, 31)).is_err());
        assert!(validate_in_window("fecha", ymd(2101, 1, 1)).is_err());
        assert!(validate_in_window("fecha", ymd(2024, 5, 1)).is_ok());
    }
}
