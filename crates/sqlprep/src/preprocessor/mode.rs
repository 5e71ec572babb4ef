use std::fmt;

/// Array formatting mode, chosen by a `?mode` suffix or by the last command keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// `(a = 1) AND (b IS NULL)`
    And,
    /// `(a = 1) OR (b IS NULL)`
    Or,
    /// `a = 1, b = b + 2`
    Set,
    /// `(a, b) VALUES (1, 2)`
    Values,
    /// `a, b DESC`
    Order,
    /// `1, 2, (3, 4)`
    List,
}

impl Mode {
    /// Placeholder suffix for this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::And => "and",
            Mode::Or => "or",
            Mode::Set => "set",
            Mode::Values => "values",
            Mode::Order => "order",
            Mode::List => "list",
        }
    }

    /// Parse a placeholder suffix (`"and"` for `?and`).
    pub fn from_suffix(suffix: &str) -> Option<Mode> {
        match suffix {
            "and" => Some(Mode::And),
            "or" => Some(Mode::Or),
            "set" => Some(Mode::Set),
            "values" => Some(Mode::Values),
            "order" => Some(Mode::Order),
            "list" => Some(Mode::List),
            _ => None,
        }
    }

    /// Mode implied by a normalized command keyword. `None` clears the mode.
    pub(crate) fn for_command(keyword: &str) -> Option<Mode> {
        match keyword {
            "INSERT" | "REPLACE" => Some(Mode::Values),
            "SET" | "KEY UPDATE" => Some(Mode::Set),
            "WHERE" | "HAVING" => Some(Mode::And),
            "ORDER BY" | "GROUP BY" => Some(Mode::Order),
            _ => None,
        }
    }

    /// Glue keyword between predicate clauses.
    pub(crate) fn connective(self) -> &'static str {
        match self {
            Mode::Or => "OR",
            _ => "AND",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Commands after which scalar values are deferred to driver binding.
pub(crate) fn is_parametric(keyword: &str) -> bool {
    matches!(
        keyword,
        "SELECT" | "INSERT" | "UPDATE" | "DELETE" | "REPLACE" | "EXPLAIN"
    )
}
