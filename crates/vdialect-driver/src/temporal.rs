//! Temporal expression compiler for Vertica
//!
//! Turns a portable "truncate/extract at granularity G" request into native
//! SQL. Vertica has no week truncation aligned to Sunday-start weeks and a
//! zero-based day-of-week, so both are synthesized from primitives it does
//! have.

use vdialect_core::{ConfigurationError, Expr, Granularity, IntervalUnit};

/// Wrap stringified temporal literals in `CAST(... AS TIMESTAMP)`
///
/// Vertica does not coerce strings inside `DATE_TRUNC`/`EXTRACT`. Anything
/// else passes through unchanged.
pub fn cast_timestamp(expr: Expr) -> Expr {
    if expr.is_temporal_literal() {
        expr.cast("TIMESTAMP")
    } else {
        expr
    }
}

fn date_trunc(unit: &str, expr: Expr) -> Expr {
    Expr::function("DATE_TRUNC", vec![Expr::string(unit), cast_timestamp(expr)])
}

// EXTRACT yields NUMERIC on Vertica
fn extract_integer(field: &str, expr: Expr) -> Expr {
    Expr::extract(field, cast_timestamp(expr)).cast("INTEGER")
}

fn one_day() -> Expr {
    Expr::interval(1, "day")
}

/// Compile `expr` at the requested granularity
pub fn truncate(granularity: Granularity, expr: Expr) -> Expr {
    match granularity {
        Granularity::Default => expr,
        Granularity::Minute => date_trunc("minute", expr),
        Granularity::MinuteOfHour => extract_integer("MINUTE", expr),
        Granularity::Hour => date_trunc("hour", expr),
        Granularity::HourOfDay => extract_integer("HOUR", expr),
        Granularity::Day => expr.cast("DATE"),
        // native DOW is Sunday = 0
        Granularity::DayOfWeek => extract_integer("DOW", expr).plus(Expr::integer(1)),
        Granularity::DayOfMonth => extract_integer("DAY", expr),
        Granularity::DayOfYear => extract_integer("DOY", expr),
        Granularity::Week => week(expr),
        Granularity::WeekOfYear => Expr::function("WEEK", vec![cast_timestamp(expr)]),
        Granularity::Month => date_trunc("month", expr),
        Granularity::MonthOfYear => extract_integer("MONTH", expr),
        Granularity::Quarter => date_trunc("quarter", expr),
        Granularity::QuarterOfYear => extract_integer("QUARTER", expr),
        Granularity::Year => extract_integer("YEAR", expr),
    }
}

/// Sunday-start week
///
/// `DATE_TRUNC('week', ...)` is Monday-aligned: shift forward a day,
/// truncate, shift back. The guard wraps the raw input before the shift.
fn week(expr: Expr) -> Expr {
    let shifted = cast_timestamp(expr).plus(one_day());
    Expr::function("DATE_TRUNC", vec![Expr::string("week"), shifted]).minus(one_day())
}

/// `CURRENT_TIMESTAMP` offset by a whole number of units
///
/// Interval literals take an integer count; fractional, non-finite and
/// out-of-range amounts are rejected before anything is built.
pub fn date_offset(unit: IntervalUnit, amount: f64) -> Result<Expr, ConfigurationError> {
    if !amount.is_finite() || amount.fract() != 0.0 {
        return Err(ConfigurationError::InvalidOffsetAmount(amount.to_string()));
    }
    if amount < i64::MIN as f64 || amount >= i64::MAX as f64 {
        return Err(ConfigurationError::InvalidOffsetAmount(amount.to_string()));
    }

    Ok(Expr::CurrentTimestamp.plus(Expr::interval(amount as i64, unit.as_str())))
}

/// Character count, cast to CHAR first so binary and long values count
/// characters
pub fn string_length(expr: Expr) -> Expr {
    Expr::function("CHAR_LENGTH", vec![expr.cast("CHAR")])
}
