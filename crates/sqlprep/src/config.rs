/// How multi-row inserts (`?values` with a list of rows) are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MultiInsertSyntax {
    /// Ask the driver ([`crate::Driver::supports_multi_insert_as_select`]).
    #[default]
    Auto,
    /// `(a, b) VALUES (1, 2), (3, 4)`
    Values,
    /// `(a, b) SELECT 1, 2 UNION ALL SELECT 3, 4`
    UnionSelect,
}

/// Configuration for [`crate::Preprocessor`].
#[derive(Debug, Clone)]
pub struct PreprocessorConfig {
    /// Initial `use_params` flag for [`crate::Preprocessor::process_default`].
    pub use_params: bool,
    /// Multi-row insert syntax.
    pub multi_insert: MultiInsertSyntax,
    /// Whether to emit `tracing` events under the `sqlprep.sql` target.
    pub logging_enabled: bool,
    /// Truncate logged SQL (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self {
            use_params: false,
            multi_insert: MultiInsertSyntax::Auto,
            logging_enabled: true,
            max_sql_length: Some(200),
        }
    }
}

impl PreprocessorConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defer scalar values to driver binding from the start of every statement.
    pub fn use_params(mut self) -> Self {
        self.use_params = true;
        self
    }

    /// Inline scalar values until a parametric command is seen (default).
    pub fn inline_values(mut self) -> Self {
        self.use_params = false;
        self
    }

    /// Override the multi-row insert syntax.
    pub fn multi_insert(mut self, syntax: MultiInsertSyntax) -> Self {
        self.multi_insert = syntax;
        self
    }

    /// Enable SQL logging.
    pub fn with_logging(mut self) -> Self {
        self.logging_enabled = true;
        self
    }

    /// Disable SQL logging.
    pub fn no_logging(mut self) -> Self {
        self.logging_enabled = false;
        self
    }

    /// Set maximum logged SQL length.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation in logs.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PreprocessorConfig::new();
        assert!(!config.use_params);
        assert_eq!(config.multi_insert, MultiInsertSyntax::Auto);
        assert!(config.logging_enabled);
        assert_eq!(config.max_sql_length, Some(200));
    }

    #[test]
    fn builder_chain() {
        let config = PreprocessorConfig::new()
            .use_params()
            .multi_insert(MultiInsertSyntax::UnionSelect)
            .no_logging()
            .no_truncate();
        assert!(config.use_params);
        assert_eq!(config.multi_insert, MultiInsertSyntax::UnionSelect);
        assert!(!config.logging_enabled);
        assert_eq!(config.max_sql_length, None);
    }
}
