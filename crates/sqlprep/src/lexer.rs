//! Template tokenizer.
//!
//! Splits a SQL template into the pieces the preprocessor cares about. Quoted
//! strings and comments are recognized first so that a `?` inside them is
//! never taken for a placeholder; everything that is not recognized comes out
//! as [`Token::Text`].

use std::sync::OnceLock;

/// Commands recognized at the very start of a template.
const LEADING_COMMANDS: &[&str] = &["SELECT", "INSERT", "UPDATE", "DELETE", "REPLACE", "EXPLAIN"];

const TEMPLATE_PATTERN: &str = concat!(
    r#"(?s)'[^']*'|"[^"]*""#,
    r"|\?[a-z]*",
    r"|(?i:^\s*\(?\s*(?:SELECT|INSERT|UPDATE|DELETE|REPLACE|EXPLAIN)\b)",
    r"|(?i:\b(?:SET|WHERE|HAVING|ORDER\s+BY|GROUP\s+BY|KEY\s+UPDATE)\b)",
    r"|(?i:\bIN\s+(?:\?|\(\?\)))",
    r"|/\*.*?\*/",
    r"|--[^\n]*",
);

fn template_regex() -> &'static regex::Regex {
    static TEMPLATE_RE: OnceLock<regex::Regex> = OnceLock::new();
    TEMPLATE_RE.get_or_init(|| {
        regex::Regex::new(TEMPLATE_PATTERN).expect("invalid built-in template regex")
    })
}

/// A piece of a SQL template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Unrecognized SQL, copied as is.
    Text(&'a str),
    /// `'...'` or `"..."`.
    Quoted(&'a str),
    /// `/* ... */` or `-- ...`.
    Comment(&'a str),
    /// A command keyword as written, possibly with leading whitespace or `(`.
    Command(&'a str),
    /// `?` followed by its (possibly empty) lowercase suffix.
    Placeholder(&'a str),
    /// `IN ?` / `IN (?)`; carries the `IN` keyword as written.
    In(&'a str),
}

impl Token<'_> {
    /// The source text of the token.
    pub(crate) fn as_str(&self) -> &str {
        match self {
            Token::Text(s)
            | Token::Quoted(s)
            | Token::Comment(s)
            | Token::Command(s)
            | Token::In(s) => s,
            Token::Placeholder(_) => "?",
        }
    }
}

/// Iterator over the tokens of one template.
pub(crate) struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    pending: Option<Token<'a>>,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            pending: None,
        }
    }

    /// Classify the match at `start..end` and move the cursor past what was consumed.
    fn classify(&mut self, start: usize, end: usize) -> Token<'a> {
        let src = self.src;
        let text = &src[start..end];
        self.pos = end;

        if text.starts_with('\'') || text.starts_with('"') {
            return Token::Quoted(text);
        }
        if text.starts_with("/*") || text.starts_with("--") {
            return Token::Comment(text);
        }
        if let Some(suffix) = text.strip_prefix('?') {
            return Token::Placeholder(suffix);
        }
        if text.ends_with('?') || text.ends_with(')') {
            // `IN ?name` is a regular placeholder after a plain `IN`.
            if text.ends_with('?')
                && src[end..].starts_with(|c: char| c.is_ascii_lowercase())
            {
                self.pos = end - 1;
                return Token::Text(&src[start..end - 1]);
            }
            return Token::In(&text[..2]);
        }

        let keyword = normalize_command(text);
        if !LEADING_COMMANDS.contains(&keyword.as_str()) {
            // Clause keywords only count right before a placeholder or at the end.
            let rest = src[end..].trim_start();
            if !(rest.is_empty() || rest.starts_with('?')) {
                return Token::Text(text);
            }
        }
        Token::Command(text)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if let Some(token) = self.pending.take() {
            return Some(token);
        }
        if self.pos >= self.src.len() {
            return None;
        }

        let start = self.pos;
        match template_regex().find_at(self.src, start) {
            None => {
                self.pos = self.src.len();
                Some(Token::Text(&self.src[start..]))
            }
            Some(m) if m.start() > start => {
                self.pending = Some(self.classify(m.start(), m.end()));
                Some(Token::Text(&self.src[start..m.start()]))
            }
            Some(m) => Some(self.classify(m.start(), m.end())),
        }
    }
}

/// Upper-case a command keyword and collapse its whitespace: `" (select"` → `"SELECT"`,
/// `"order\n by"` → `"ORDER BY"`.
pub(crate) fn normalize_command(raw: &str) -> String {
    raw.trim_start_matches(|c: char| c.is_whitespace() || c == '(')
        .split_whitespace()
        .map(str::to_ascii_uppercase)
        .collect::<Vec<_>>()
        .join(" ")
}
