use super::{Mode, Scan};
use crate::error::{PrepError, PrepResult};
use crate::value::{SqlLiteral, Value};

impl Scan<'_> {
    /// Format a parameter for a plain `?` or a bare value in the parameter list.
    ///
    /// Arrays fall back to the current mode, or `SET` formatting without one.
    pub(super) fn format_parameter(&mut self, value: &Value) -> PrepResult<String> {
        match value {
            Value::Array(array) => {
                let mode = self.mode.unwrap_or(Mode::Set);
                self.format_array(array, mode)
            }
            _ => self.format_value(value),
        }
    }

    /// Format a single value. Arrays are rejected here; callers route them to
    /// the array formatter.
    pub(super) fn format_value(&mut self, value: &Value) -> PrepResult<String> {
        if self.use_params && value.is_bindable() {
            self.remaining.push(value.clone());
            return Ok("?".to_string());
        }

        match value {
            Value::Literal(literal) => self.expand_literal(literal),
            Value::Int(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(if *b { "1" } else { "0" }.to_string()),
            Value::Float(f) => format_float(*f),
            Value::Stream(bytes) => Ok(self.driver().quote_binary(bytes)),
            Value::Text(s) => Ok(self.driver().quote(s)),
            Value::Null => Ok("NULL".to_string()),
            Value::Row(row) => self.format_value(&row.primary()),
            Value::DateTime(dt) => self.driver().format_datetime(dt),
            Value::Interval(interval) => self.driver().format_interval(interval),
            Value::Enum(e) => match e.backing() {
                Some(backing) => self.format_value(backing),
                None => Err(PrepError::unexpected(format!("enum case {}", e.case()))),
            },
            Value::Stringable(s) => self.format_value(&Value::Text(s.to_string())),
            Value::Array(_) => Err(PrepError::unexpected("array")),
        }
    }

    /// Expand a literal with a fresh scan that inherits the parameter mode.
    fn expand_literal(&mut self, literal: &SqlLiteral) -> PrepResult<String> {
        let mut params = Vec::with_capacity(literal.params().len() + 1);
        params.push(Value::Text(literal.sql().to_string()));
        params.extend(literal.params().iter().cloned());

        let (sql, remaining) = self.pre.expand(&params, self.use_params, self.depth + 1)?;
        #[cfg(feature = "tracing")]
        if self.pre.config.logging_enabled {
            tracing::trace!(
                target: "sqlprep.sql",
                depth = self.depth + 1,
                deferred = remaining.len(),
                "literal expanded"
            );
        }
        self.remaining.extend(remaining);
        Ok(sql)
    }
}

/// Fixed-point with ten decimals, trailing zeros and dot removed.
pub(crate) fn format_float(value: f64) -> PrepResult<String> {
    if !value.is_finite() {
        return Err(PrepError::invalid(format!("float {value} has no SQL literal")));
    }
    let fixed = format!("{value:.10}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    Ok(if trimmed == "-0" { "0" } else { trimmed }.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_drop_trailing_zeros() {
        assert_eq!(format_float(1.5).unwrap(), "1.5");
        assert_eq!(format_float(100.0).unwrap(), "100");
        assert_eq!(format_float(-0.25).unwrap(), "-0.25");
        assert_eq!(format_float(0.0).unwrap(), "0");
    }

    #[test]
    fn floats_round_to_ten_decimals() {
        assert_eq!(format_float(1.0 / 3.0).unwrap(), "0.3333333333");
        assert_eq!(format_float(1e-12).unwrap(), "0");
        assert_eq!(format_float(-1e-12).unwrap(), "0");
    }

    #[test]
    fn non_finite_floats_are_rejected() {
        assert!(matches!(format_float(f64::NAN), Err(PrepError::InvalidValue(_))));
        assert!(matches!(format_float(f64::INFINITY), Err(PrepError::InvalidValue(_))));
    }
}
