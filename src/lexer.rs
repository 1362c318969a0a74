//! Tokenizer for Ziggy text.
//!
//! [`Lexer`] walks a borrowed `&str` and yields [`Token`]s lazily through its
//! [`Iterator`] implementation. Whitespace and `//` comments are skipped, and
//! every token records the 1-based [`Position`] of its first character so the
//! parser can point at it in diagnostics.
//!
//! ## Literal forms
//!
//! - quoted bytes: `"caf\u{e9} \x00"`
//! - multiline bytes: each line starts with `\\`, lines are joined with `\n`
//! - integers (`-42`, `1_000_000`) of arbitrary precision and floats (`3.25`)
//! - identifiers and the keywords `true`, `false` and `null`
//!
//! ```rust
//! use serde_ziggy::lexer::{Lexer, TokenKind};
//!
//! let kinds: Vec<_> = Lexer::new("Point {x = 1}")
//!     .map(|token| token.unwrap().kind)
//!     .collect();
//! assert_eq!(kinds[0], TokenKind::Ident("Point"));
//! assert_eq!(kinds[1], TokenKind::LBrace);
//! assert_eq!(kinds.len(), 6);
//! ```

use crate::error::Position;
use crate::{Error, Result};
use num_bigint::BigInt;
use std::fmt;

/// The kind of a token, with its decoded payload for literals.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind<'a> {
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Colon,
    Comma,
    Equals,
    Dot,
    At,
    Ident(&'a str),
    Int(BigInt),
    Float(f64),
    Bytes(Vec<u8>),
    MultilineBytes(Vec<u8>),
    True,
    False,
    Null,
}

impl fmt::Display for TokenKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::LBrace => f.write_str("`{`"),
            TokenKind::RBrace => f.write_str("`}`"),
            TokenKind::LBracket => f.write_str("`[`"),
            TokenKind::RBracket => f.write_str("`]`"),
            TokenKind::LParen => f.write_str("`(`"),
            TokenKind::RParen => f.write_str("`)`"),
            TokenKind::Colon => f.write_str("`:`"),
            TokenKind::Comma => f.write_str("`,`"),
            TokenKind::Equals => f.write_str("`=`"),
            TokenKind::Dot => f.write_str("`.`"),
            TokenKind::At => f.write_str("`@`"),
            TokenKind::Ident(name) => write!(f, "identifier `{}`", name),
            TokenKind::Int(i) => write!(f, "integer `{}`", i),
            TokenKind::Float(x) => write!(f, "float `{}`", x),
            TokenKind::Bytes(_) => f.write_str("byte string"),
            TokenKind::MultilineBytes(_) => f.write_str("multiline byte string"),
            TokenKind::True => f.write_str("`true`"),
            TokenKind::False => f.write_str("`false`"),
            TokenKind::Null => f.write_str("`null`"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub position: Position,
}

/// Returns true for names that can be written bare as a tag, struct name or field.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        && !matches!(name, "true" | "false" | "null")
}

/// A lazy tokenizer over borrowed input.
///
/// After the first error the iterator is fused and yields `None`.
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            position: 0,
            line: 1,
            column: 1,
            done: false,
        }
    }

    /// Position of the next unread character.
    #[must_use]
    pub fn current_position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.input[self.position..].chars();
        chars.next();
        chars.next()
    }

    fn next_char(&mut self) -> Option<char> {
        if let Some(ch) = self.input[self.position..].chars().next() {
            self.position += ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            Some(ch)
        } else {
            None
        }
    }

    fn peek_is_digit(&self) -> bool {
        self.peek_char().map_or(false, |ch| ch.is_ascii_digit())
    }

    /// Skips whitespace (including newlines) and `//` comments
    fn skip_trivia(&mut self) {
        loop {
            match self.peek_char() {
                Some(ch) if ch.is_whitespace() => {
                    self.next_char();
                }
                Some('/') if self.peek_second() == Some('/') => {
                    while let Some(ch) = self.peek_char() {
                        if ch == '\n' {
                            break;
                        }
                        self.next_char();
                    }
                }
                _ => break,
            }
        }
    }

    fn lex_token(&mut self) -> Result<Option<Token<'a>>> {
        self.skip_trivia();
        let position = self.current_position();
        let ch = match self.peek_char() {
            Some(ch) => ch,
            None => return Ok(None),
        };

        let punct = match ch {
            '{' => Some(TokenKind::LBrace),
            '}' => Some(TokenKind::RBrace),
            '[' => Some(TokenKind::LBracket),
            ']' => Some(TokenKind::RBracket),
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            ':' => Some(TokenKind::Colon),
            ',' => Some(TokenKind::Comma),
            '=' => Some(TokenKind::Equals),
            '.' => Some(TokenKind::Dot),
            '@' => Some(TokenKind::At),
            _ => None,
        };

        let kind = if let Some(kind) = punct {
            self.next_char();
            kind
        } else {
            match ch {
                '"' => self.lex_quoted(position)?,
                '\\' if self.peek_second() == Some('\\') => self.lex_multiline(),
                '-' | '0'..='9' => self.lex_number(position)?,
                c if c.is_ascii_alphabetic() || c == '_' => self.lex_ident(),
                other => {
                    return Err(Error::lex(
                        position,
                        format!("unexpected character `{}`", other.escape_debug()),
                    ))
                }
            }
        };

        Ok(Some(Token { kind, position }))
    }

    fn lex_ident(&mut self) -> TokenKind<'a> {
        let begin = self.position;
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                self.next_char();
            } else {
                break;
            }
        }
        match &self.input[begin..self.position] {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            name => TokenKind::Ident(name),
        }
    }

    fn lex_number(&mut self, start: Position) -> Result<TokenKind<'a>> {
        let begin = self.position;
        let mut text = String::new();

        if self.peek_char() == Some('-') {
            self.next_char();
            text.push('-');
        }
        if !self.peek_is_digit() {
            return Err(Error::lex(start, "expected digit after `-`"));
        }
        self.lex_digits(&mut text, start)?;

        let mut is_float = false;
        if self.peek_char() == Some('.') {
            self.next_char();
            if !self.peek_is_digit() {
                return Err(Error::lex(start, "expected digit after `.`"));
            }
            text.push('.');
            self.lex_digits(&mut text, start)?;
            is_float = true;
        }

        // Numbers must end at a delimiter: `12ab`, `1.5.2` and `0x10` are rejected
        if let Some(ch) = self.peek_char() {
            if ch.is_alphanumeric() || ch == '_' || ch == '.' {
                let end = self.position + ch.len_utf8();
                return Err(Error::lex(
                    start,
                    format!("invalid numeral `{}`", &self.input[begin..end]),
                ));
            }
        }

        if is_float {
            text.parse::<f64>()
                .map(TokenKind::Float)
                .map_err(|e| Error::lex(start, format!("invalid float `{}`: {}", text, e)))
        } else {
            text.parse::<BigInt>()
                .map(TokenKind::Int)
                .map_err(|e| Error::lex(start, format!("invalid integer `{}`: {}", text, e)))
        }
    }

    /// Reads a run of digits; `_` is accepted only between two digits.
    fn lex_digits(&mut self, out: &mut String, start: Position) -> Result<()> {
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_digit() {
                out.push(ch);
                self.next_char();
            } else if ch == '_' {
                self.next_char();
                if !self.peek_is_digit() {
                    return Err(Error::lex(start, "`_` must be between two digits"));
                }
            } else {
                break;
            }
        }
        Ok(())
    }

    fn lex_quoted(&mut self, start: Position) -> Result<TokenKind<'a>> {
        self.next_char();
        let mut bytes = Vec::new();

        loop {
            let escape_position = self.current_position();
            match self.next_char() {
                None => return Err(Error::lex(start, "unterminated byte string")),
                Some('\n') => {
                    return Err(Error::lex(start, "unterminated byte string (newline before closing quote)"))
                }
                Some('"') => break,
                Some('\\') => self.lex_escape(escape_position, &mut bytes)?,
                Some(ch) => {
                    let mut buf = [0u8; 4];
                    bytes.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                }
            }
        }

        Ok(TokenKind::Bytes(bytes))
    }

    fn lex_escape(&mut self, position: Position, bytes: &mut Vec<u8>) -> Result<()> {
        match self.next_char() {
            Some('"') => bytes.push(b'"'),
            Some('\'') => bytes.push(b'\''),
            Some('\\') => bytes.push(b'\\'),
            Some('n') => bytes.push(b'\n'),
            Some('r') => bytes.push(b'\r'),
            Some('t') => bytes.push(b'\t'),
            Some('0') => bytes.push(0),
            Some('x') => {
                let high = self.hex_digit(position)?;
                let low = self.hex_digit(position)?;
                bytes.push((high * 16 + low) as u8);
            }
            Some('u') => {
                if self.next_char() != Some('{') {
                    return Err(Error::lex(position, "expected `{` after `\\u`"));
                }
                let mut code = 0u32;
                let mut count = 0;
                while self.peek_char() != Some('}') {
                    if count == 6 {
                        return Err(Error::lex(position, "too many digits in unicode escape"));
                    }
                    code = code * 16 + self.hex_digit(position)?;
                    count += 1;
                }
                self.next_char();
                if count == 0 {
                    return Err(Error::lex(position, "empty unicode escape"));
                }
                let ch = char::from_u32(code).ok_or_else(|| {
                    Error::lex(position, format!("invalid unicode code point {:#x}", code))
                })?;
                let mut buf = [0u8; 4];
                bytes.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            }
            Some(other) => {
                return Err(Error::lex(
                    position,
                    format!("invalid escape `\\{}`", other.escape_debug()),
                ))
            }
            None => return Err(Error::lex(position, "unterminated byte string")),
        }
        Ok(())
    }

    fn hex_digit(&mut self, position: Position) -> Result<u32> {
        self.next_char()
            .and_then(|ch| ch.to_digit(16))
            .ok_or_else(|| Error::lex(position, "invalid hex digit in escape"))
    }

    fn lex_multiline(&mut self) -> TokenKind<'a> {
        let mut lines: Vec<&'a str> = Vec::new();

        loop {
            // Consume `\\` and one optional space
            self.next_char();
            self.next_char();
            if self.peek_char() == Some(' ') {
                self.next_char();
            }

            let begin = self.position;
            while let Some(ch) = self.peek_char() {
                if ch == '\n' {
                    break;
                }
                self.next_char();
            }
            let line = &self.input[begin..self.position];
            lines.push(line.strip_suffix('\r').unwrap_or(line));

            let continues = self.input[self.position..]
                .strip_prefix('\n')
                .map_or(false, |rest| {
                    rest.trim_start_matches([' ', '\t']).starts_with("\\\\")
                });
            if !continues {
                break;
            }
            self.next_char();
            while matches!(self.peek_char(), Some(' ' | '\t')) {
                self.next_char();
            }
        }

        TokenKind::MultilineBytes(lines.join("\n").into_bytes())
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.lex_token() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
