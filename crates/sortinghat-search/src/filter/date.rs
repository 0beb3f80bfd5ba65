//! Partial date normalization and compiled date expressions.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};

use super::error::{FieldError, FieldResult};
use super::token::Comparison;

/// Separator between the two bounds of a range value.
pub const RANGE_SEPARATOR: &str = "..";

/// Digit widths of the year, month and day groups.
const GROUP_WIDTHS: [usize; 3] = [4, 2, 2];

/// Normalizes `YYYY`, `YYYY-MM` or `YYYY-MM-DD` to midnight UTC.
///
/// Missing month and day default to `01`. Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns `FieldError::InvalidDate` carrying the raw input when the value is
/// not lexically a partial date or does not name a real calendar day.
///
/// # Example
///
/// ```
/// use sortinghat_search_rs::filter::{format_instant, normalize_date};
///
/// let instant = normalize_date("2000").unwrap();
/// assert_eq!(format_instant(&instant), "2000-01-01T00:00:00.000Z");
///
/// assert!(normalize_date("2000-02-30").is_err());
/// ```
pub fn normalize_date(raw: &str) -> FieldResult<DateTime<Utc>> {
    let value = raw.trim();
    let groups: Vec<&str> = value.split('-').collect();

    if groups.len() > GROUP_WIDTHS.len() {
        return Err(FieldError::invalid_date(raw));
    }

    let mut parts = [1u32; 3];
    for (i, group) in groups.iter().enumerate() {
        if group.len() != GROUP_WIDTHS[i] || !group.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FieldError::invalid_date(raw));
        }
        parts[i] = group.parse().map_err(|_| FieldError::invalid_date(raw))?;
    }

    let [year, month, day] = parts;
    let date = NaiveDate::from_ymd_opt(year as i32, month, day).ok_or_else(|| FieldError::invalid_date(raw))?;

    Ok(date.and_time(NaiveTime::MIN).and_utc())
}

/// Formats an instant as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A validated `lastUpdated` expression.
///
/// `Display` renders the form the service expects: `<op><instant>` or
/// `<start>..<end>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateExpression {
    Compare {
        operator: Comparison,
        instant: DateTime<Utc>,
    },
    /// Inclusive range; `start <= end` always holds.
    Range {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl DateExpression {
    /// Builds a single-bound expression from a raw partial date.
    pub fn compare(operator: Comparison, raw: &str) -> FieldResult<Self> {
        Ok(DateExpression::Compare {
            operator,
            instant: normalize_date(raw)?,
        })
    }

    /// Parses `<date>..<date>`.
    ///
    /// # Errors
    ///
    /// - `InvalidRange` when the separator is missing, repeated, or a side is empty
    /// - `InvalidDate` when either side is not a valid partial date
    /// - `InvalidRangeOrder` when the start is after the end
    pub fn range(raw: &str) -> FieldResult<Self> {
        if raw.matches(RANGE_SEPARATOR).count() != 1 {
            return Err(FieldError::invalid_range(raw));
        }

        let (start_raw, end_raw) = raw
            .split_once(RANGE_SEPARATOR)
            .ok_or_else(|| FieldError::invalid_range(raw))?;
        if start_raw.trim().is_empty() || end_raw.trim().is_empty() {
            return Err(FieldError::invalid_range(raw));
        }

        let start = normalize_date(start_raw)?;
        let end = normalize_date(end_raw)?;
        if start > end {
            return Err(FieldError::InvalidRangeOrder {
                start: format_instant(&start),
                end: format_instant(&end),
            });
        }

        Ok(DateExpression::Range { start, end })
    }
}

impl fmt::Display for DateExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateExpression::Compare { operator, instant } => {
                write!(f, "{}{}", operator, format_instant(instant))
            }
            DateExpression::Range { start, end } => write!(
                f,
                "{}{}{}",
                format_instant(start),
                RANGE_SEPARATOR,
                format_instant(end)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(raw: &str) -> String {
        format_instant(&normalize_date(raw).unwrap())
    }

    #[test]
    fn test_normalize_year() {
        assert_eq!(normalized("2000"), "2000-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_normalize_year_month() {
        assert_eq!(normalized("2000-10"), "2000-10-01T00:00:00.000Z");
    }

    #[test]
    fn test_normalize_full_date() {
        assert_eq!(normalized("2000-10-01"), "2000-10-01T00:00:00.000Z");
        assert_eq!(normalized("2000-08-10"), "2000-08-10T00:00:00.000Z");
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(normalized(" 2001 "), "2001-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_normalize_leap_day() {
        assert_eq!(normalized("2000-02-29"), "2000-02-29T00:00:00.000Z");
        assert!(normalize_date("1900-02-29").is_err());
        assert!(normalize_date("2001-02-29").is_err());
    }

    #[test]
    fn test_normalize_rejects_bad_shapes() {
        for raw in ["", "abc", "@", "20", "20000", "2000-1", "2000-01-1", "2000-01-01-01", "2000/01/01", "+200"] {
            assert_eq!(
                normalize_date(raw),
                Err(FieldError::invalid_date(raw)),
                "expected {:?} to be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_normalize_rejects_bad_calendar_values() {
        assert!(normalize_date("2000-23-01").is_err());
        assert!(normalize_date("2000-00").is_err());
        assert!(normalize_date("2000-01-49").is_err());
        assert!(normalize_date("2000-04-31").is_err());
        assert!(normalize_date("2000-01-00").is_err());
    }

    #[test]
    fn test_compare_display() {
        let expr = DateExpression::compare(Comparison::LessOrEqual, "2000-08-10").unwrap();
        assert_eq!(expr.to_string(), "<=2000-08-10T00:00:00.000Z");
    }

    #[test]
    fn test_range_display() {
        let expr = DateExpression::range("2000..2001").unwrap();
        assert_eq!(
            expr.to_string(),
            "2000-01-01T00:00:00.000Z..2001-01-01T00:00:00.000Z"
        );
    }

    #[test]
    fn test_range_same_day_is_valid() {
        assert!(DateExpression::range("2000-05..2000-05-01").is_ok());
    }

    #[test]
    fn test_range_separator_errors() {
        for raw in ["2000", "2000-2001", "2001-2000", "..2001", "2000..", "2000..2001..2002"] {
            assert_eq!(
                DateExpression::range(raw),
                Err(FieldError::invalid_range(raw)),
                "expected {:?} to be an invalid range",
                raw
            );
        }
    }

    #[test]
    fn test_range_invalid_bound() {
        assert_eq!(
            DateExpression::range("2000..2001-13"),
            Err(FieldError::invalid_date("2001-13"))
        );
    }

    #[test]
    fn test_range_order() {
        assert_eq!(
            DateExpression::range("2001..2000"),
            Err(FieldError::InvalidRangeOrder {
                start: "2001-01-01T00:00:00.000Z".to_string(),
                end: "2000-01-01T00:00:00.000Z".to_string(),
            })
        );
    }
}
