//! Test fixtures for the Vertica driver
//!
//! Includes a tiny evaluator for the expression subset the temporal compiler
//! emits, following Vertica's documented semantics: Monday-aligned
//! `DATE_TRUNC('week')`, Sunday = 0 for `EXTRACT(DOW)`, and `WEEK()` counting
//! Sunday-start weeks with January 1 in week 1. Strings are not coerced
//! inside temporal functions, same as the engine.

#![allow(dead_code)]

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, Timelike};
use serde_json::{json, Map, Value as Json};
use std::collections::HashMap;
use vdialect_core::{BinaryOperator, Expr, Literal};

/// Evaluated value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Timestamp(NaiveDateTime),
    Date(NaiveDate),
    Integer(i64),
    Text(String),
    Interval { months: u32, duration: Duration, negative: bool },
}

/// Evaluates compiled expressions against bound column values
pub struct Evaluator {
    columns: HashMap<String, Value>,
    now: NaiveDateTime,
}

impl Evaluator {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            columns: HashMap::new(),
            now,
        }
    }

    /// Bind a (possibly dotted) column name
    pub fn bind(mut self, column: &str, value: Value) -> Self {
        self.columns.insert(column.to_string(), value);
        self
    }

    pub fn eval(&self, expr: &Expr) -> Result<Value, String> {
        match expr {
            Expr::Identifier(parts) => {
                let key = parts.join(".");
                self.columns
                    .get(&key)
                    .cloned()
                    .ok_or_else(|| format!("unbound column {}", key))
            }
            Expr::Literal(Literal::String(s)) => Ok(Value::Text(s.clone())),
            Expr::Literal(Literal::Integer(i)) => Ok(Value::Integer(*i)),
            Expr::Literal(other) => Err(format!("unsupported literal {:?}", other)),
            Expr::Cast { expr, data_type } => cast(self.eval(expr)?, data_type),
            Expr::BinaryOp { left, op, right } => {
                arithmetic(self.eval(left)?, *op, self.eval(right)?)
            }
            Expr::Function { name, args } => {
                let args = args
                    .iter()
                    .map(|arg| self.eval(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                call(name, args)
            }
            Expr::Extract { field, expr } => extract(field, self.eval(expr)?),
            Expr::Interval { amount, unit } => interval(*amount, unit),
            Expr::CurrentTimestamp => Ok(Value::Timestamp(self.now)),
            Expr::Raw(sql) => Err(format!("cannot evaluate raw SQL {}", sql)),
        }
    }
}

fn timestamp(value: Value) -> Result<NaiveDateTime, String> {
    match value {
        Value::Timestamp(ts) => Ok(ts),
        other => Err(format!("expected TIMESTAMP, got {:?}", other)),
    }
}

fn cast(value: Value, data_type: &str) -> Result<Value, String> {
    match (data_type, value) {
        ("TIMESTAMP", Value::Timestamp(ts)) => Ok(Value::Timestamp(ts)),
        ("TIMESTAMP", Value::Date(d)) => Ok(Value::Timestamp(d.and_hms_opt(0, 0, 0).ok_or("midnight")?)),
        ("TIMESTAMP", Value::Text(s)) => parse_timestamp(&s).map(Value::Timestamp),
        ("DATE", Value::Timestamp(ts)) => Ok(Value::Date(ts.date())),
        ("DATE", Value::Date(d)) => Ok(Value::Date(d)),
        ("DATE", Value::Text(s)) => parse_timestamp(&s).map(|ts| Value::Date(ts.date())),
        ("INTEGER", Value::Integer(i)) => Ok(Value::Integer(i)),
        ("CHAR", Value::Text(s)) => Ok(Value::Text(s)),
        ("CHAR", Value::Integer(i)) => Ok(Value::Text(i.to_string())),
        (ty, other) => Err(format!("cannot cast {:?} to {}", other, ty)),
    }
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime, String> {
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| format!("unparseable timestamp {}", s))
}

fn interval(amount: i64, unit: &str) -> Result<Value, String> {
    let negative = amount < 0;
    let n = amount.unsigned_abs();
    let (months, duration) = match unit {
        "second" => (0, Duration::seconds(n as i64)),
        "minute" => (0, Duration::minutes(n as i64)),
        "hour" => (0, Duration::hours(n as i64)),
        "day" => (0, Duration::days(n as i64)),
        "week" => (0, Duration::weeks(n as i64)),
        "month" => (n as u32, Duration::zero()),
        "quarter" => (n as u32 * 3, Duration::zero()),
        "year" => (n as u32 * 12, Duration::zero()),
        other => return Err(format!("unsupported interval unit {}", other)),
    };
    Ok(Value::Interval {
        months,
        duration,
        negative,
    })
}

fn shift(ts: NaiveDateTime, months: u32, duration: Duration, backwards: bool) -> Result<NaiveDateTime, String> {
    let shifted = if backwards {
        ts.checked_sub_months(Months::new(months))
            .and_then(|t| t.checked_sub_signed(duration))
    } else {
        ts.checked_add_months(Months::new(months))
            .and_then(|t| t.checked_add_signed(duration))
    };
    shifted.ok_or_else(|| "timestamp out of range".to_string())
}

fn arithmetic(left: Value, op: BinaryOperator, right: Value) -> Result<Value, String> {
    match (left, op, right) {
        (Value::Integer(a), BinaryOperator::Plus, Value::Integer(b)) => Ok(Value::Integer(a + b)),
        (Value::Integer(a), BinaryOperator::Minus, Value::Integer(b)) => Ok(Value::Integer(a - b)),
        (
            Value::Timestamp(ts),
            op @ (BinaryOperator::Plus | BinaryOperator::Minus),
            Value::Interval {
                months,
                duration,
                negative,
            },
        ) => {
            let backwards = negative ^ (op == BinaryOperator::Minus);
            shift(ts, months, duration, backwards).map(Value::Timestamp)
        }
        (l, op, r) => Err(format!("unsupported {:?} {} {:?}", l, op.as_str(), r)),
    }
}

fn call(name: &str, mut args: Vec<Value>) -> Result<Value, String> {
    match (name, args.len()) {
        ("DATE_TRUNC", 2) => {
            let source = timestamp(args.remove(1))?;
            match args.remove(0) {
                Value::Text(unit) => date_trunc(&unit, source).map(Value::Timestamp),
                other => Err(format!("DATE_TRUNC unit must be text, got {:?}", other)),
            }
        }
        ("WEEK", 1) => {
            let date = match args.remove(0) {
                Value::Timestamp(ts) => ts.date(),
                Value::Date(d) => d,
                other => return Err(format!("WEEK expects a date, got {:?}", other)),
            };
            Ok(Value::Integer(week_of_year(date)))
        }
        ("CHAR_LENGTH", 1) => match args.remove(0) {
            Value::Text(s) => Ok(Value::Integer(s.chars().count() as i64)),
            other => Err(format!("CHAR_LENGTH expects text, got {:?}", other)),
        },
        (name, arity) => Err(format!("unsupported function {}/{}", name, arity)),
    }
}

fn date_trunc(unit: &str, ts: NaiveDateTime) -> Result<NaiveDateTime, String> {
    let date = ts.date();
    let truncated = match unit {
        "minute" => date.and_hms_opt(ts.hour(), ts.minute(), 0),
        "hour" => date.and_hms_opt(ts.hour(), 0, 0),
        "day" => date.and_hms_opt(0, 0, 0),
        "week" => {
            let monday = date - Duration::days(date.weekday().num_days_from_monday() as i64);
            monday.and_hms_opt(0, 0, 0)
        }
        "month" => NaiveDate::from_ymd_opt(date.year(), date.month(), 1).and_then(|d| d.and_hms_opt(0, 0, 0)),
        "quarter" => {
            let month = (date.month() - 1) / 3 * 3 + 1;
            NaiveDate::from_ymd_opt(date.year(), month, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
        }
        "year" => NaiveDate::from_ymd_opt(date.year(), 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0)),
        other => return Err(format!("unsupported date_trunc unit {}", other)),
    };
    truncated.ok_or_else(|| format!("invalid truncation of {}", ts))
}

fn week_of_year(date: NaiveDate) -> i64 {
    let jan1 = NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date);
    let offset = jan1.weekday().num_days_from_sunday() as i64;
    (date.ordinal0() as i64 + offset) / 7 + 1
}

fn extract(field: &str, value: Value) -> Result<Value, String> {
    let ts = timestamp(value)?;
    let n = match field {
        "MINUTE" => ts.minute() as i64,
        "HOUR" => ts.hour() as i64,
        "DOW" => ts.weekday().num_days_from_sunday() as i64,
        "DAY" => ts.day() as i64,
        "DOY" => ts.ordinal() as i64,
        "MONTH" => ts.month() as i64,
        "QUARTER" => ((ts.month() - 1) / 3 + 1) as i64,
        "YEAR" => ts.year() as i64,
        other => return Err(format!("unsupported EXTRACT field {}", other)),
    };
    Ok(Value::Integer(n))
}

pub fn at(date: &str, time: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|e| panic!("bad fixture timestamp {} {}: {}", date, time, e))
}

/// Sunday 2024-03-10 through Saturday 2024-03-16, at mid-afternoon
pub fn calendar_week() -> Vec<NaiveDateTime> {
    (10..=16)
        .map(|day| at(&format!("2024-03-{:02}", day), "15:45:30"))
        .collect()
}

/// Connection details for a typical production cluster
pub fn cluster_details() -> Map<String, Json> {
    match json!({
        "host": "vertica.internal",
        "port": 5433,
        "dbname": "analytics",
        "user": "bi_reader",
        "password": "hunter2",
        "additional-options": "ConnectionLoadBalance=1",
        "tunnel-enabled": false
    }) {
        Json::Object(map) => map,
        other => panic!("Expected object, got {}", other),
    }
}
