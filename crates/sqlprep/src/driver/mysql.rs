use super::{Driver, delimit_doubling, hex, quoted_timestamp, split_interval};
use crate::error::PrepResult;
use chrono::{NaiveDateTime, TimeDelta};

/// MySQL / MariaDB formatting rules.
///
/// - identifiers: `` `name` `` with backticks doubled
/// - strings: backslash escapes (`\\`, `\'`, `\"`, `\0`, `\n`, `\r`, `\Z`)
/// - binary: `X'..'`
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDriver;

impl MySqlDriver {
    pub fn new() -> Self {
        Self
    }
}

impl Driver for MySqlDriver {
    fn delimit(&self, name: &str) -> String {
        delimit_doubling(name, '`', '`')
    }

    fn quote(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('\'');
        for ch in value.chars() {
            match ch {
                '\\' => out.push_str("\\\\"),
                '\'' => out.push_str("\\'"),
                '"' => out.push_str("\\\""),
                '\0' => out.push_str("\\0"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\x1a' => out.push_str("\\Z"),
                _ => out.push(ch),
            }
        }
        out.push('\'');
        out
    }

    fn quote_binary(&self, value: &[u8]) -> String {
        format!("X'{}'", hex(value))
    }

    fn format_datetime(&self, value: &NaiveDateTime) -> PrepResult<String> {
        Ok(quoted_timestamp(value))
    }

    fn format_interval(&self, value: &TimeDelta) -> PrepResult<String> {
        let (negative, secs, micros) = split_interval(value);
        let sign = if negative { "-" } else { "" };
        let (h, m, s) = (secs / 3600, secs % 3600 / 60, secs % 60);
        if micros == 0 {
            Ok(format!("'{sign}{h}:{m:02}:{s:02}'"))
        } else {
            Ok(format!("'{sign}{h}:{m:02}:{s:02}.{micros:06}'"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn quotes_with_backslash_escapes() {
        let d = MySqlDriver;
        assert_eq!(d.quote(r"f\o'o"), r"'f\\o\'o'");
        assert_eq!(d.quote("a\nb\0"), r"'a\nb\0'");
    }

    #[test]
    fn delimits_with_backticks() {
        assert_eq!(MySqlDriver.delimit("we`ird"), "`we``ird`");
    }

    #[test]
    fn formats_temporal_values() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(10, 5, 0)
            .unwrap();
        assert_eq!(
            MySqlDriver.format_datetime(&dt).unwrap(),
            "'2024-03-01 10:05:00.000000'"
        );
        assert_eq!(
            MySqlDriver
                .format_interval(&TimeDelta::seconds(-(26 * 3600 + 61)))
                .unwrap(),
            "'-26:01:01'"
        );
    }
}
