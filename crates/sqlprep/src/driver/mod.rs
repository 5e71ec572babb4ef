//! Driver capabilities the preprocessor delegates to.
//!
//! The preprocessor never decides how identifiers or literals are quoted, or
//! how temporal values look in SQL: a [`Driver`] does. Three reference drivers
//! are provided; they only format text and never talk to a server.

use crate::error::PrepResult;
use chrono::{NaiveDateTime, TimeDelta};
use std::fmt::{self, Write};

mod mysql;
mod postgres;
mod sqlite;

pub use mysql::MySqlDriver;
pub use postgres::PostgresDriver;
pub use sqlite::SqliteDriver;

/// SQL dialect formatting capabilities.
///
/// Implementations must be side-effect free; they are called synchronously
/// from inside `Preprocessor::process`.
pub trait Driver: fmt::Debug + Send + Sync {
    /// Delimit a single identifier segment (no dots).
    fn delimit(&self, name: &str) -> String;

    /// Quote a string literal.
    fn quote(&self, value: &str) -> String;

    /// Quote binary data as a literal.
    fn quote_binary(&self, value: &[u8]) -> String;

    /// Render a date/time value.
    fn format_datetime(&self, value: &NaiveDateTime) -> PrepResult<String>;

    /// Render an interval value.
    fn format_interval(&self, value: &TimeDelta) -> PrepResult<String>;

    /// Whether multi-row inserts must be written as `SELECT ... UNION ALL SELECT ...`.
    fn supports_multi_insert_as_select(&self) -> bool {
        false
    }
}

/// Wrap `name` in `open`/`close`, doubling every `close` inside it.
pub(crate) fn delimit_doubling(name: &str, open: char, close: char) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push(open);
    for ch in name.chars() {
        if ch == close {
            out.push(close);
        }
        out.push(ch);
    }
    out.push(close);
    out
}

/// Single-quoted literal with `'` doubled.
pub(crate) fn quote_doubling(value: &str) -> String {
    delimit_doubling(value, '\'', '\'')
}

/// Upper-case hex digits of `data`.
pub(crate) fn hex(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 2);
    for byte in data {
        let _ = write!(out, "{byte:02X}");
    }
    out
}

/// `'YYYY-MM-DD HH:MM:SS.ffffff'`
pub(crate) fn quoted_timestamp(value: &NaiveDateTime) -> String {
    format!("'{}'", value.format("%Y-%m-%d %H:%M:%S%.6f"))
}

/// Sign, whole seconds and microseconds of an interval.
pub(crate) fn split_interval(value: &TimeDelta) -> (bool, i64, u32) {
    let negative = *value < TimeDelta::zero();
    let abs = value.abs();
    (negative, abs.num_seconds(), abs.subsec_nanos().unsigned_abs() / 1_000)
}
