//! Expression toolkit shared by the query compiler and dialect adapters
//!
//! `Expr` is an immutable SQL expression tree. Dialects build native
//! expressions by wrapping the nodes they are handed in new nodes; they never
//! rewrite an input in place. `Display` renders the tree as SQL text.
//!
//! ## Example
//!
//! ```rust
//! use vdialect_core::Expr;
//!
//! let expr = Expr::function("DATE_TRUNC", vec![
//!     Expr::string("month"),
//!     Expr::qualified(["orders", "created_at"]),
//! ]);
//! assert_eq!(expr.to_string(), r#"DATE_TRUNC('month', "orders"."created_at")"#);
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

/// Literal value
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

/// Arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
}

impl BinaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }
}

/// SQL expression node
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Possibly qualified identifier, e.g. `["orders", "created_at"]`
    Identifier(Vec<String>),

    Literal(Literal),

    /// `CAST(expr AS data_type)`
    Cast {
        expr: Box<Expr>,
        data_type: String,
    },

    BinaryOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },

    /// `name(args, ...)`
    Function {
        name: String,
        args: Vec<Expr>,
    },

    /// `EXTRACT(field FROM expr)`
    Extract {
        field: String,
        expr: Box<Expr>,
    },

    /// `INTERVAL '<amount> <unit>'`
    Interval {
        amount: i64,
        unit: String,
    },

    CurrentTimestamp,

    /// Pre-rendered SQL, emitted verbatim
    Raw(String),
}

impl Expr {
    /// Unqualified column reference
    pub fn column(name: impl Into<String>) -> Self {
        Self::Identifier(vec![name.into()])
    }

    /// Qualified identifier from its parts
    pub fn qualified<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Identifier(parts.into_iter().map(Into::into).collect())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::String(value.into()))
    }

    pub fn integer(value: i64) -> Self {
        Self::Literal(Literal::Integer(value))
    }

    pub fn function(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Function {
            name: name.into(),
            args,
        }
    }

    pub fn extract(field: impl Into<String>, expr: Expr) -> Self {
        Self::Extract {
            field: field.into(),
            expr: Box::new(expr),
        }
    }

    pub fn interval(amount: i64, unit: impl Into<String>) -> Self {
        Self::Interval {
            amount,
            unit: unit.into(),
        }
    }

    pub fn raw(sql: impl Into<String>) -> Self {
        Self::Raw(sql.into())
    }

    /// Wrap this expression in `CAST(... AS data_type)`
    pub fn cast(self, data_type: impl Into<String>) -> Self {
        Self::Cast {
            expr: Box::new(self),
            data_type: data_type.into(),
        }
    }

    pub fn plus(self, rhs: Expr) -> Self {
        self.binary(BinaryOperator::Plus, rhs)
    }

    pub fn minus(self, rhs: Expr) -> Self {
        self.binary(BinaryOperator::Minus, rhs)
    }

    fn binary(self, op: BinaryOperator, rhs: Expr) -> Self {
        Self::BinaryOp {
            left: Box::new(self),
            op,
            right: Box::new(rhs),
        }
    }

    /// Whether this is a string literal holding a date, time or timestamp
    ///
    /// The query layer hands some temporal values over as strings. Engines
    /// that do not coerce strings inside temporal functions need these cast
    /// explicitly.
    pub fn is_temporal_literal(&self) -> bool {
        match self {
            Self::Literal(Literal::String(s)) => looks_temporal(s),
            _ => false,
        }
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

fn looks_temporal(s: &str) -> bool {
    let s = s.trim();
    if s.is_empty() {
        return false;
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
        || DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(s, fmt).is_ok())
        || DateTime::parse_from_rfc3339(s).is_ok()
        || NaiveTime::parse_from_str(s, "%H:%M:%S%.f").is_ok()
}

fn write_quoted(f: &mut fmt::Formatter<'_>, quote: char, value: &str) -> fmt::Result {
    write!(f, "{}", quote)?;
    for c in value.chars() {
        if c == quote {
            write!(f, "{}{}", quote, quote)?;
        } else {
            write!(f, "{}", c)?;
        }
    }
    write!(f, "{}", quote)
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write_quoted(f, '\'', s),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Boolean(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
            Self::Null => f.write_str("NULL"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    write_quoted(f, '"', part)?;
                }
                Ok(())
            }
            Self::Literal(literal) => write!(f, "{}", literal),
            Self::Cast { expr, data_type } => write!(f, "CAST({} AS {})", expr, data_type),
            Self::BinaryOp { left, op, right } => {
                write_operand(f, left)?;
                write!(f, " {} ", op.as_str())?;
                write_operand(f, right)
            }
            Self::Function { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
            Self::Extract { field, expr } => write!(f, "EXTRACT({} FROM {})", field, expr),
            Self::Interval { amount, unit } => write!(f, "INTERVAL '{} {}'", amount, unit),
            Self::CurrentTimestamp => f.write_str("CURRENT_TIMESTAMP"),
            Self::Raw(sql) => f.write_str(sql),
        }
    }
}

// nested arithmetic is always parenthesized
fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
    match expr {
        Expr::BinaryOp { .. } | Expr::Raw(_) => write!(f, "({})", expr),
        _ => write!(f, "{}", expr),
    }
}
