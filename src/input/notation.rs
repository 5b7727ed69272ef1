//! Lenient Object Notation
//!
//! Turns relaxed object-literal text into a generic tree (`serde_json::Value`).
//!
//! ## Accepted Relaxations
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  // line comments, /* block comments */   → removed         │
//! │  123n  (big-integer suffix)               → 123             │
//! │  undefined                                → null            │
//! │  { fee: 1 }  (unquoted key)               → { "fee": 1 }    │
//! │  'text'  (single quotes)                  → "text"          │
//! │  [1, 2,]  (trailing comma)                → [1, 2]          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The normaliser walks the text character by character and never rewrites
//! anything inside a string literal. Newlines inside comments are kept so
//! that line numbers in parse errors still point at the source text.
//!
//! Numbers are parsed with `arbitrary_precision`, so integer literals of any
//! size keep their exact digits in the resulting tree.

use serde_json::Value;

/// Malformed input notation.
#[derive(Debug, thiserror::Error)]
pub enum NotationError {
    /// A string literal was never closed.
    #[error("unterminated string starting at line {line}, column {column}")]
    UnterminatedString {
        /// 1-based line.
        line: usize,
        /// 1-based column.
        column: usize,
    },

    /// A block comment was never closed.
    #[error("unterminated block comment starting at line {line}, column {column}")]
    UnterminatedComment {
        /// 1-based line.
        line: usize,
        /// 1-based column.
        column: usize,
    },

    /// The normalised text is not valid JSON.
    #[error("malformed input notation: {message}")]
    Syntax {
        /// 1-based line.
        line: usize,
        /// 1-based column (of the normalised text).
        column: usize,
        /// Parser message.
        message: String,
    },
}

/// Parse relaxed object-literal text into a generic tree.
pub fn parse_lenient(text: &str) -> Result<Value, NotationError> {
    let normalised = normalise(text)?;
    serde_json::from_str(&normalised).map_err(|e| NotationError::Syntax {
        line: e.line(),
        column: e.column(),
        message: e.to_string(),
    })
}

/// Rewrite relaxed notation into strict JSON text.
pub fn normalise(text: &str) -> Result<String, NotationError> {
    Normaliser::new(text).run()
}

struct Normaliser {
    chars: Vec<char>,
    pos: usize,
    out: String,
}

impl Normaliser {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            out: String::with_capacity(text.len()),
        }
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn location(&self, index: usize) -> (usize, usize) {
        let mut line = 1;
        let mut column = 1;
        for c in &self.chars[..index.min(self.chars.len())] {
            if *c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        (line, column)
    }

    fn run(mut self) -> Result<String, NotationError> {
        while let Some(c) = self.peek(0) {
            match c {
                '"' | '\'' => self.string(c)?,
                '/' if self.peek(1) == Some('/') => self.line_comment(),
                '/' if self.peek(1) == Some('*') => self.block_comment()?,
                ',' => {
                    self.pos += 1;
                    if !matches!(self.next_significant(self.pos), Some('}') | Some(']')) {
                        self.out.push(',');
                    }
                }
                '-' if self.peek(1).is_some_and(|d| d.is_ascii_digit()) => self.number(),
                c if c.is_ascii_digit() => self.number(),
                c if is_ident_start(c) => self.identifier(),
                c => {
                    self.out.push(c);
                    self.pos += 1;
                }
            }
        }
        Ok(self.out)
    }

    fn string(&mut self, quote: char) -> Result<(), NotationError> {
        let start = self.pos;
        self.pos += 1;
        self.out.push('"');
        loop {
            let Some(c) = self.peek(0) else {
                let (line, column) = self.location(start);
                return Err(NotationError::UnterminatedString { line, column });
            };
            self.pos += 1;
            match c {
                '\\' => {
                    let Some(escaped) = self.peek(0) else { continue };
                    self.pos += 1;
                    // `\'` is valid in either quote kind; JSON has no such escape
                    if escaped == '\'' {
                        self.out.push('\'');
                    } else {
                        self.out.push('\\');
                        self.out.push(escaped);
                    }
                }
                c if c == quote => break,
                '"' => self.out.push_str("\\\""),
                c => self.out.push(c),
            }
        }
        self.out.push('"');
        Ok(())
    }

    fn line_comment(&mut self) {
        while let Some(c) = self.peek(0) {
            if c == '\n' {
                break;
            }
            self.pos += 1;
        }
    }

    fn block_comment(&mut self) -> Result<(), NotationError> {
        let start = self.pos;
        self.pos += 2;
        loop {
            match self.peek(0) {
                None => {
                    let (line, column) = self.location(start);
                    return Err(NotationError::UnterminatedComment { line, column });
                }
                Some('*') if self.peek(1) == Some('/') => {
                    self.pos += 2;
                    return Ok(());
                }
                Some(c) => {
                    if c == '\n' {
                        self.out.push('\n');
                    }
                    self.pos += 1;
                }
            }
        }
    }

    fn number(&mut self) {
        let start = self.pos;
        if self.peek(0) == Some('-') {
            self.pos += 1;
        }
        while let Some(c) = self.peek(0) {
            let exponent_sign = (c == '+' || c == '-')
                && matches!(self.chars.get(self.pos.wrapping_sub(1)), Some('e') | Some('E'));
            if c.is_ascii_digit() || c == '.' || c == 'e' || c == 'E' || exponent_sign {
                self.pos += 1;
            } else {
                break;
            }
        }
        let literal: String = self.chars[start..self.pos].iter().collect();
        self.out.push_str(&literal);

        // big-integer suffix: only after a plain integer, never inside an identifier
        let integer = literal.trim_start_matches('-').bytes().all(|b| b.is_ascii_digit());
        if integer
            && self.peek(0) == Some('n')
            && !self.peek(1).is_some_and(is_ident_continue)
        {
            self.pos += 1;
        }
    }

    fn identifier(&mut self) {
        let start = self.pos;
        while self.peek(0).is_some_and(is_ident_continue) {
            self.pos += 1;
        }
        let ident: String = self.chars[start..self.pos].iter().collect();

        if self.next_significant(self.pos) == Some(':') {
            self.out.push('"');
            self.out.push_str(&ident);
            self.out.push('"');
        } else if ident == "undefined" {
            self.out.push_str("null");
        } else {
            self.out.push_str(&ident);
        }
    }

    /// First character at or after `from` that is not whitespace or a comment.
    fn next_significant(&self, from: usize) -> Option<char> {
        let mut i = from;
        while let Some(&c) = self.chars.get(i) {
            if c.is_whitespace() {
                i += 1;
            } else if c == '/' && self.chars.get(i + 1) == Some(&'/') {
                while self.chars.get(i).is_some_and(|c| *c != '\n') {
                    i += 1;
                }
            } else if c == '/' && self.chars.get(i + 1) == Some(&'*') {
                i += 2;
                while i < self.chars.len()
                    && !(self.chars[i] == '*' && self.chars.get(i + 1) == Some(&'/'))
                {
                    i += 1;
                }
                i += 2;
            } else {
                return Some(c);
            }
        }
        None
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unquoted_keys_and_trailing_commas() {
        let value = parse_lenient("{ fee: 1, nonce: 2, list: [1, 2,], }").unwrap();
        assert_eq!(value, json!({ "fee": 1, "nonce": 2, "list": [1, 2] }));
    }

    #[test]
    fn test_comments_removed() {
        let text = "{\n  // the fee\n  fee: 1, /* inline */ nonce: 2\n}";
        assert_eq!(parse_lenient(text).unwrap(), json!({ "fee": 1, "nonce": 2 }));
    }

    #[test]
    fn test_bigint_suffix_stripped_exactly() {
        let value = parse_lenient("{ magnitude: 18446744073709551615n }").unwrap();
        assert_eq!(value["magnitude"].to_string(), "18446744073709551615");

        let big = "28948022309329048855892746252171976963363056481941560715954676764349967630336";
        let value = parse_lenient(&format!("[{big}n]")).unwrap();
        assert_eq!(value[0].to_string(), big);
    }

    #[test]
    fn test_undefined_becomes_null() {
        let value = parse_lenient("{ validUntil: undefined }").unwrap();
        assert_eq!(value, json!({ "validUntil": null }));
    }

    #[test]
    fn test_strings_untouched() {
        let text = r#"{ uri: "https://example.com/a,]", note: 'it\'s', memo: "12n" }"#;
        let value = parse_lenient(text).unwrap();
        assert_eq!(value["uri"], "https://example.com/a,]");
        assert_eq!(value["note"], "it's");
        assert_eq!(value["memo"], "12n");
    }

    #[test]
    fn test_escaped_apostrophe_in_double_quotes() {
        let value = parse_lenient(r#"{ a: "it\'s", b: 'it\'s' }"#).unwrap();
        assert_eq!(value["a"], "it's");
        assert_eq!(value["b"], "it's");
    }

    #[test]
    fn test_single_quoted_with_double_quote_inside() {
        let value = parse_lenient(r#"{ s: 'say "hi"' }"#).unwrap();
        assert_eq!(value["s"], "say \"hi\"");
    }

    #[test]
    fn test_identifier_with_digits_keeps_n() {
        // `n` after digits inside an identifier is part of the name
        let value = parse_lenient("{ key1n: 1 }").unwrap();
        assert_eq!(value, json!({ "key1n": 1 }));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let value = parse_lenient("{ z: 1, a: 2, m: 3 }").unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn test_syntax_error_has_location() {
        let err = parse_lenient("{\n  fee: 1\n  nonce: 2\n}").unwrap_err();
        match err {
            NotationError::Syntax { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_unterminated_string() {
        let err = parse_lenient("{ memo: \"abc }").unwrap_err();
        assert!(matches!(err, NotationError::UnterminatedString { line: 1, column: 9 }));
    }

    #[test]
    fn test_unterminated_comment() {
        let err = parse_lenient("{ /* never closed").unwrap_err();
        assert!(matches!(err, NotationError::UnterminatedComment { .. }));
    }
}
