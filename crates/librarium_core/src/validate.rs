//! Argument validation rules shared by every service.
//!
//! # Responsibility
//! - Provide pure precondition checks with stable, descriptive errors.
//! - Normalize period queries to concrete date bounds.
//!
//! # Invariants
//! - No function here touches the store or holds state.
//! - A failed check always names the offending field or value; services and
//!   tests match on the variant, not on message text.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Minimum representable date, used as the sentinel lower bound for period
/// queries and as the default author birth date.
pub static MIN_DATE: Lazy<NaiveDate> =
    Lazy::new(|| NaiveDate::from_ymd_opt(0, 1, 1).expect("valid sentinel date"));

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Precondition violation reported before any store interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required value is absent.
    MissingField { field: &'static str },
    /// A required string is empty or whitespace-only.
    EmptyField { field: &'static str },
    /// An id was supplied on an insert path where the store assigns it.
    PreassignedId { field: &'static str },
    /// An id is outside the range the operation accepts.
    IdNotInAcceptableRange { id: i64 },
    /// A period query starts today or later.
    PeriodStartNotBeforeToday { from: NaiveDate },
    /// A period query does not strictly ascend from start to end.
    PeriodNotAscending { from: NaiveDate, to: NaiveDate },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "missing required field `{field}`"),
            Self::EmptyField { field } => write!(f, "field `{field}` must not be empty"),
            Self::PreassignedId { field } => {
                write!(f, "field `{field}` must not be set before insert")
            }
            Self::IdNotInAcceptableRange { id } => {
                write!(f, "id is not in acceptable range: {id}")
            }
            Self::PeriodStartNotBeforeToday { from } => {
                write!(f, "period start `{from}` must be before today")
            }
            Self::PeriodNotAscending { from, to } => {
                write!(f, "period start `{from}` must be before period end `{to}`")
            }
        }
    }
}

impl Error for ValidationError {}

/// Requires a non-empty, non-whitespace string value.
pub fn require_text(value: &str, field: &'static str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(())
}

/// Requires an optional value to be present and returns a reference to it.
pub fn require_present<'a, T>(value: &'a Option<T>, field: &'static str) -> ValidationResult<&'a T> {
    value.as_ref().ok_or(ValidationError::MissingField { field })
}

/// Requires an id field to be unset, for insert paths where the store
/// assigns the id.
pub fn require_absent_id(id: &Option<i64>, field: &'static str) -> ValidationResult<()> {
    if id.is_some() {
        return Err(ValidationError::PreassignedId { field });
    }
    Ok(())
}

/// Requires a strictly positive id.
///
/// The error is deliberately distinct from [`ValidationError::MissingField`]
/// so callers can tell "no id" from "bad id".
pub fn require_positive_id(id: i64) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::IdNotInAcceptableRange { id });
    }
    Ok(())
}

/// Requires a non-negative id. Book deletion keeps this looser bound.
pub fn require_non_negative_id(id: i64) -> ValidationResult<()> {
    if id < 0 {
        return Err(ValidationError::IdNotInAcceptableRange { id });
    }
    Ok(())
}

/// Requires `id` to not exceed the current total row count.
///
/// A proxy for existence, not an authoritative check; callers still inspect
/// the fetch result for ids that fall inside the range.
pub fn require_id_within_count(id: i64, count: i64) -> ValidationResult<()> {
    if id > count {
        return Err(ValidationError::IdNotInAcceptableRange { id });
    }
    Ok(())
}

/// Normalizes an optional period to concrete bounds.
///
/// `from` defaults to [`MIN_DATE`], `to` defaults to `today`. The normalized
/// period must start before today and strictly ascend.
pub fn normalize_period(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    today: NaiveDate,
) -> ValidationResult<(NaiveDate, NaiveDate)> {
    let from = from.unwrap_or(*MIN_DATE);
    let to = to.unwrap_or(today);

    if from >= today {
        return Err(ValidationError::PeriodStartNotBeforeToday { from });
    }
    if from >= to {
        return Err(ValidationError::PeriodNotAscending { from, to });
    }

    Ok((from, to))
}
