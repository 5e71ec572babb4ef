use super::{Driver, delimit_doubling, quote_doubling, quoted_timestamp, split_interval};
use crate::error::PrepResult;
use chrono::{NaiveDateTime, TimeDelta};
use std::fmt::Write;

/// PostgreSQL formatting rules.
///
/// Identifiers are double-quoted with `"` doubled (as in [`crate::ident`]).
/// Strings containing a backslash are written as `E'...'` escape strings so
/// the result does not depend on `standard_conforming_strings`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDriver;

impl PostgresDriver {
    pub fn new() -> Self {
        Self
    }
}

impl Driver for PostgresDriver {
    fn delimit(&self, name: &str) -> String {
        delimit_doubling(name, '"', '"')
    }

    fn quote(&self, value: &str) -> String {
        if !value.contains('\\') {
            return quote_doubling(value);
        }
        let mut out = String::with_capacity(value.len() + 4);
        out.push_str("E'");
        for ch in value.chars() {
            match ch {
                '\\' => out.push_str("\\\\"),
                '\'' => out.push_str("''"),
                _ => out.push(ch),
            }
        }
        out.push('\'');
        out
    }

    fn quote_binary(&self, value: &[u8]) -> String {
        let mut out = String::with_capacity(value.len() * 2 + 12);
        out.push_str("'\\x");
        for byte in value {
            let _ = write!(out, "{byte:02x}");
        }
        out.push_str("'::bytea");
        out
    }

    fn format_datetime(&self, value: &NaiveDateTime) -> PrepResult<String> {
        Ok(quoted_timestamp(value))
    }

    fn format_interval(&self, value: &TimeDelta) -> PrepResult<String> {
        let (negative, secs, micros) = split_interval(value);
        let sign = if negative { "-" } else { "" };
        let mut seconds = format!("{sign}{secs}");
        if micros > 0 {
            let frac = format!("{micros:06}");
            seconds.push('.');
            seconds.push_str(frac.trim_end_matches('0'));
        }
        Ok(format!("INTERVAL '{seconds} seconds'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_strings_double_quotes() {
        assert_eq!(PostgresDriver.quote("it's"), "'it''s'");
    }

    #[test]
    fn backslashes_switch_to_escape_strings() {
        assert_eq!(PostgresDriver.quote(r"a\b'c"), r"E'a\\b''c'");
    }

    #[test]
    fn binary_uses_bytea_hex() {
        assert_eq!(PostgresDriver.quote_binary(&[0xde, 0xad]), r"'\xdead'::bytea");
    }

    #[test]
    fn intervals_are_in_seconds() {
        let d = TimeDelta::seconds(90) + TimeDelta::milliseconds(500);
        assert_eq!(
            PostgresDriver.format_interval(&d).unwrap(),
            "INTERVAL '90.5 seconds'"
        );
        assert_eq!(
            PostgresDriver.format_interval(&TimeDelta::seconds(-3)).unwrap(),
            "INTERVAL '-3 seconds'"
        );
    }

    #[test]
    fn delimits_with_double_quotes() {
        assert_eq!(PostgresDriver.delimit(r#"has"quote"#), r#""has""quote""#);
    }
}
