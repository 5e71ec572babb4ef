use super::{Mode, Scan};
use crate::error::{PrepError, PrepResult};
use crate::ident;
use crate::value::{Array, Key, Value};
use std::borrow::Cow;

impl Scan<'_> {
    /// Format the parameter of a `?mode` placeholder; it must be an array.
    pub(super) fn format_array_parameter(&mut self, value: &Value, mode: Mode) -> PrepResult<String> {
        match value {
            Value::Array(array) => self.format_array(array, mode),
            other => Err(PrepError::ExpectedArray {
                mode: mode.as_str(),
                found: other.type_name(),
            }),
        }
    }

    pub(super) fn format_array(&mut self, array: &Array, mode: Mode) -> PrepResult<String> {
        match mode {
            Mode::Values if !array.is_empty() && array.is_list() => self.format_multi_insert(array),
            Mode::Values => self.format_insert(array),
            Mode::Set => self.format_assignments(array),
            Mode::List => self.format_list(array),
            Mode::And | Mode::Or => self.format_predicates(array, mode),
            Mode::Order => Ok(self.format_order(array)),
        }
    }

    /// `(a, b) VALUES (1, 2)`
    fn format_insert(&mut self, row: &Array) -> PrepResult<String> {
        let mut columns = Vec::with_capacity(row.len());
        let mut values = Vec::with_capacity(row.len());
        for (key, value) in row {
            columns.push(self.delimit(&key.to_string()));
            values.push(self.format_value(value)?);
        }
        Ok(format!("({}) VALUES ({})", columns.join(", "), values.join(", ")))
    }

    /// Rows take their columns from the first row; every row must have them all.
    fn format_multi_insert(&mut self, rows: &Array) -> PrepResult<String> {
        let rows = rows
            .values()
            .enumerate()
            .map(|(index, row)| row_columns(row, index))
            .collect::<PrepResult<Vec<_>>>()?;
        let Some(first) = rows.first() else {
            return Ok("() VALUES ()".to_string());
        };
        let columns: Vec<&Key> = first.keys().collect();
        let as_select = self.pre.multi_insert_as_select();

        let mut out = String::from("(");
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            ident::write_delimited(self.driver(), &column.to_string(), &mut out);
        }
        out.push_str(if as_select { ") SELECT " } else { ") VALUES (" });

        for (index, row) in rows.iter().enumerate() {
            if index > 0 {
                out.push_str(if as_select { " UNION ALL SELECT " } else { "), (" });
            }
            for (i, column) in columns.iter().enumerate() {
                let value = row.get(column).ok_or_else(|| PrepError::MissingColumn {
                    row: index,
                    column: column.to_string(),
                })?;
                if i > 0 {
                    out.push_str(", ");
                }
                let sql = self.format_value(value)?;
                out.push_str(&sql);
            }
        }
        if !as_select {
            out.push(')');
        }
        Ok(out)
    }

    /// `a = 1, b = b + 2`; positional entries are emitted as bare values.
    fn format_assignments(&mut self, array: &Array) -> PrepResult<String> {
        let mut items = Vec::with_capacity(array.len());
        for (key, value) in array {
            let Key::Name(name) = key else {
                items.push(self.format_value(value)?);
                continue;
            };
            let sql = self.format_value(value)?;
            match compound_assignment(name) {
                Some((column, op)) => {
                    let column = self.delimit(column);
                    items.push(format!("{column} = {column} {op} {sql}"));
                }
                None => items.push(format!("{} = {sql}", self.delimit(name))),
            }
        }
        Ok(items.join(", "))
    }

    /// Comma-separated values, keys ignored; nested arrays become parenthesized tuples.
    pub(super) fn format_list(&mut self, array: &Array) -> PrepResult<String> {
        let mut items = Vec::with_capacity(array.len());
        for value in array.values() {
            let sql = match value {
                Value::Array(inner) => format!("({})", self.format_list(inner)?),
                other => self.format_value(other)?,
            };
            items.push(sql);
        }
        Ok(items.join(", "))
    }

    /// Parenthesized clauses joined by `AND`/`OR`.
    ///
    /// A key is a column optionally followed by an operator (`"age >"`,
    /// `"id NOT"`). Positional entries are emitted as bare values. An empty
    /// clause list yields `1=1`.
    fn format_predicates(&mut self, array: &Array, mode: Mode) -> PrepResult<String> {
        let mut clauses = Vec::with_capacity(array.len());
        for (key, value) in array {
            let Key::Name(name) = key else {
                clauses.push(self.format_value(value)?);
                continue;
            };
            let (column, operator) = match name.split_once(' ') {
                Some((column, operator)) => (column, operator.trim()),
                None => (name.as_str(), ""),
            };
            let negated = operator.eq_ignore_ascii_case("NOT");
            let column = self.delimit(column);

            match value {
                Value::Array(items) if items.is_empty() => {
                    // `col NOT IN ()` is always true.
                    if !negated {
                        clauses.push("1=0".to_string());
                    }
                }
                Value::Array(items) => {
                    let list = self.format_list(items)?;
                    clauses.push(if operator.is_empty() {
                        format!("{column} IN ({list})")
                    } else {
                        format!("{column} {operator} IN ({list})")
                    });
                }
                _ => {
                    let sql = self.format_value(value)?;
                    let operator = match (sql.as_str(), operator) {
                        ("NULL", "") => "IS",
                        ("NULL", _) if negated => "IS NOT",
                        (_, "") => "=",
                        (_, op) => op,
                    };
                    clauses.push(format!("{column} {operator} {sql}"));
                }
            }
        }

        if clauses.is_empty() {
            return Ok("1=1".to_string());
        }
        let glue = format!(") {} (", mode.connective());
        Ok(format!("({})", clauses.join(&glue)))
    }

    /// `a, b DESC`; a value that is not positive sorts descending.
    fn format_order(&self, array: &Array) -> String {
        array
            .iter()
            .map(|(key, value)| {
                let column = self.delimit(&key.to_string());
                if is_descending(value) {
                    format!("{column} DESC")
                } else {
                    column
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn is_descending(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Int(n) => *n <= 0,
        Value::Float(f) => *f <= 0.0,
        Value::Text(s) => s.trim().parse::<f64>().is_ok_and(|n| n <= 0.0),
        _ => false,
    }
}

fn row_columns(value: &Value, index: usize) -> PrepResult<Cow<'_, Array>> {
    match value {
        Value::Array(row) => Ok(Cow::Borrowed(row)),
        Value::Row(row) => Ok(Cow::Owned(row.to_array())),
        other => Err(PrepError::MultiInsertShape(format!(
            "row {index} is {}, use an explicit ?mode placeholder or a SqlLiteral",
            other.type_name()
        ))),
    }
}

/// Split `"col+="` / `"col-="` into the column and its operator.
fn compound_assignment(name: &str) -> Option<(&str, char)> {
    if let Some(column) = name.strip_suffix("+=") {
        return Some((column.trim_end(), '+'));
    }
    name.strip_suffix("-=").map(|column| (column.trim_end(), '-'))
}
