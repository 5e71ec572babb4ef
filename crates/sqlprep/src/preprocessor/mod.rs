//! Template expansion.
//!
//! [`Preprocessor::process`] walks a parameter list made of SQL template
//! fragments and values. Each fragment is tokenized; every placeholder in it
//! consumes the next parameter and is replaced by its SQL rendering. Scalars
//! are either inlined as literals or, once parameter mode is on, replaced by
//! `?` and returned for driver binding.
//!
//! # Example
//!
//! ```ignore
//! use sqlprep::{MySqlDriver, Preprocessor, array, params};
//!
//! let pre = Preprocessor::new(MySqlDriver);
//! let (sql, bound) = pre.process(
//!     &params!["SELECT * FROM users WHERE", array! { "id" => 1, "name" => "x" }],
//!     false,
//! )?;
//! assert_eq!(sql, "SELECT * FROM users WHERE (`id` = ?) AND (`name` = ?)");
//! assert_eq!(bound.len(), 2);
//! ```

mod array;
mod format;
mod mode;


pub use mode::Mode;

use crate::config::{MultiInsertSyntax, PreprocessorConfig};
use crate::driver::Driver;
use crate::error::{PrepError, PrepResult};
use crate::ident;
use crate::lexer::{Lexer, Token, normalize_command};
use crate::value::Value;
use std::sync::Arc;

/// SQL template preprocessor bound to one [`Driver`].
///
/// Cheap to clone; holds no per-statement state.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    driver: Arc<dyn Driver>,
    config: PreprocessorConfig,
}

impl Preprocessor {
    /// Create a preprocessor with the default configuration.
    pub fn new(driver: impl Driver + 'static) -> Self {
        Self::with_driver(Arc::new(driver))
    }

    /// Create a preprocessor from a shared driver.
    pub fn with_driver(driver: Arc<dyn Driver>) -> Self {
        Self {
            driver,
            config: PreprocessorConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: PreprocessorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PreprocessorConfig {
        &self.config
    }

    pub fn driver(&self) -> &dyn Driver {
        self.driver.as_ref()
    }

    /// Expand `params` into SQL plus the values left for driver binding.
    ///
    /// `use_params` is the initial parameter mode; a leading
    /// `SELECT`/`INSERT`/`UPDATE`/`DELETE`/`REPLACE`/`EXPLAIN` turns it on.
    pub fn process(&self, params: &[Value], use_params: bool) -> PrepResult<(String, Vec<Value>)> {
        let (sql, remaining) = self.expand(params, use_params, 0)?;
        #[cfg(feature = "tracing")]
        if self.config.logging_enabled {
            tracing::debug!(
                target: "sqlprep.sql",
                sql = %self.truncate_sql(&sql),
                param_count = remaining.len(),
                use_params,
                "preprocessed"
            );
        }
        Ok((sql, remaining))
    }

    /// [`Preprocessor::process`] with the configured initial parameter mode.
    pub fn process_default(&self, params: &[Value]) -> PrepResult<(String, Vec<Value>)> {
        self.process(params, self.config.use_params)
    }

    fn expand(
        &self,
        params: &[Value],
        use_params: bool,
        depth: usize,
    ) -> PrepResult<(String, Vec<Value>)> {
        if params.is_empty() {
            return Err(PrepError::EmptyParams);
        }

        let mut scan = Scan::new(self, params, use_params, depth);
        let mut fragments = Vec::new();
        // Cursor right after the last template; a new one may not follow a leftover value.
        let mut last_template: Option<usize> = None;

        while let Some(param) = params.get(scan.cursor) {
            scan.cursor += 1;
            let shortcut = scan.cursor == 2 && params.len() == 2;
            if shortcut || !param.is_scalar() {
                fragments.push(scan.format_parameter(param)?);
                continue;
            }

            let fresh = last_template.is_none_or(|prev| scan.cursor > prev + 1);
            match param {
                Value::Text(template) if fresh => {
                    last_template = Some(scan.cursor);
                    fragments.push(scan.expand_template(template)?);
                }
                _ => return Err(PrepError::ExcessParams),
            }
        }

        Ok((fragments.join(" "), scan.remaining))
    }

    fn multi_insert_as_select(&self) -> bool {
        match self.config.multi_insert {
            MultiInsertSyntax::Auto => self.driver.supports_multi_insert_as_select(),
            MultiInsertSyntax::Values => false,
            MultiInsertSyntax::UnionSelect => true,
        }
    }

    #[cfg(feature = "tracing")]
    fn truncate_sql(&self, sql: &str) -> String {
        match self.config.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }
}

#[cfg(feature = "tracing")]
pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

/// State of one expansion: the parameter cursor, the current array mode and
/// the values deferred for binding.
pub(crate) struct Scan<'p> {
    pre: &'p Preprocessor,
    params: &'p [Value],
    cursor: usize,
    mode: Option<Mode>,
    use_params: bool,
    remaining: Vec<Value>,
    depth: usize,
}

impl<'p> Scan<'p> {
    fn new(pre: &'p Preprocessor, params: &'p [Value], use_params: bool, depth: usize) -> Self {
        Self {
            pre,
            params,
            cursor: 0,
            mode: None,
            use_params,
            remaining: Vec::new(),
            depth,
        }
    }

    fn driver(&self) -> &'p dyn Driver {
        self.pre.driver.as_ref()
    }

    fn delimit(&self, name: &str) -> String {
        ident::delimit(self.driver(), name)
    }

    fn next_param(&mut self) -> PrepResult<&'p Value> {
        let params: &'p [Value] = self.params;
        let param = params.get(self.cursor).ok_or(PrepError::MissingParams)?;
        self.cursor += 1;
        Ok(param)
    }

    fn expand_template(&mut self, template: &str) -> PrepResult<String> {
        self.mode = None;
        let mut out = String::with_capacity(template.len());
        for token in Lexer::new(template) {
            match token {
                Token::Placeholder(suffix) => {
                    let sql = self.expand_placeholder(suffix)?;
                    out.push_str(&sql);
                }
                Token::In(keyword) => {
                    let sql = self.expand_in()?;
                    out.push_str(keyword);
                    out.push_str(" (");
                    out.push_str(&sql);
                    out.push(')');
                }
                Token::Command(raw) => {
                    self.enter_command(raw);
                    out.push_str(raw);
                }
                other => out.push_str(other.as_str()),
            }
        }
        Ok(out)
    }

    fn enter_command(&mut self, raw: &str) {
        let keyword = normalize_command(raw);
        self.mode = Mode::for_command(&keyword);
        if mode::is_parametric(&keyword) {
            self.use_params = true;
        }
        #[cfg(feature = "tracing")]
        if self.pre.config.logging_enabled {
            tracing::trace!(
                target: "sqlprep.sql",
                keyword = %keyword,
                mode = ?self.mode,
                use_params = self.use_params,
                depth = self.depth,
                "command"
            );
        }
    }

    fn expand_placeholder(&mut self, suffix: &str) -> PrepResult<String> {
        let param = self.next_param()?;
        match suffix {
            "" => self.format_parameter(param),
            "name" => match param {
                Value::Text(name) => Ok(self.delimit(name)),
                other => Err(PrepError::ExpectedString {
                    placeholder: "name",
                    found: other.type_name(),
                }),
            },
            _ => match Mode::from_suffix(suffix) {
                Some(mode) => self.format_array_parameter(param, mode),
                None => Err(PrepError::UnknownPlaceholder(suffix.to_string())),
            },
        }
    }

    /// Contents of the parentheses after `IN`.
    fn expand_in(&mut self) -> PrepResult<String> {
        match self.next_param()? {
            Value::Array(items) if items.is_empty() => Ok("NULL".to_string()),
            Value::Array(items) => self.format_list(items),
            other => self.format_value(other),
        }
    }
}
