use super::{Driver, delimit_doubling, hex, quote_doubling};
use crate::error::{PrepError, PrepResult};
use chrono::{NaiveDateTime, TimeDelta};
use std::fmt::Write;

/// SQLite formatting rules.
///
/// Date/time values are stored as unix timestamps unless a `strftime`-style
/// format is configured. SQLite has no interval type.
#[derive(Debug, Clone, Default)]
pub struct SqliteDriver {
    /// `chrono` format for date/time values; `None` writes the unix timestamp.
    pub datetime_format: Option<String>,
    /// Write multi-row inserts as `SELECT ... UNION ALL SELECT ...` (SQLite < 3.7.11).
    pub legacy_multi_insert: bool,
}

impl SqliteDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Format date/time values with a `chrono` format string (quoted as a string literal).
    pub fn datetime_format(mut self, format: impl Into<String>) -> Self {
        self.datetime_format = Some(format.into());
        self
    }

    /// Enable `UNION ALL SELECT` multi-row inserts.
    pub fn legacy_multi_insert(mut self) -> Self {
        self.legacy_multi_insert = true;
        self
    }
}

impl Driver for SqliteDriver {
    fn delimit(&self, name: &str) -> String {
        delimit_doubling(name, '[', ']')
    }

    fn quote(&self, value: &str) -> String {
        quote_doubling(value)
    }

    fn quote_binary(&self, value: &[u8]) -> String {
        format!("X'{}'", hex(value))
    }

    fn format_datetime(&self, value: &NaiveDateTime) -> PrepResult<String> {
        match &self.datetime_format {
            Some(format) => {
                let mut out = String::new();
                write!(out, "{}", value.format(format)).map_err(|_| {
                    PrepError::invalid(format!("invalid datetime format {format:?}"))
                })?;
                Ok(self.quote(&out))
            }
            None => Ok(value.and_utc().timestamp().to_string()),
        }
    }

    fn format_interval(&self, _value: &TimeDelta) -> PrepResult<String> {
        Err(PrepError::unsupported("SQLite has no interval literal"))
    }

    fn supports_multi_insert_as_select(&self) -> bool {
        self.legacy_multi_insert
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn datetime_defaults_to_unix_timestamp() {
        assert_eq!(SqliteDriver::new().format_datetime(&noon()).unwrap(), "1577880000");
    }

    #[test]
    fn datetime_with_custom_format_is_quoted() {
        let d = SqliteDriver::new().datetime_format("%Y-%m-%d");
        assert_eq!(d.format_datetime(&noon()).unwrap(), "'2020-01-01'");
    }

    #[test]
    fn invalid_custom_format_is_an_error() {
        let d = SqliteDriver::new().datetime_format("%Q");
        assert!(matches!(d.format_datetime(&noon()), Err(PrepError::InvalidValue(_))));
    }

    #[test]
    fn intervals_are_unsupported() {
        let err = SqliteDriver::new()
            .format_interval(&TimeDelta::seconds(1))
            .unwrap_err();
        assert!(matches!(err, PrepError::Unsupported(_)));
    }

    #[test]
    fn legacy_flag_selects_union_syntax() {
        assert!(!SqliteDriver::new().supports_multi_insert_as_select());
        assert!(SqliteDriver::new().legacy_multi_insert().supports_multi_insert_as_select());
    }
}
