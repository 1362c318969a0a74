//! Recursive-descent parser producing a [`Value`] tree.
//!
//! The parser pulls tokens from a [`Lexer`] on demand and keeps a small
//! lookahead buffer; two tokens of lookahead are enough to tell a struct
//! (`{a = 1}`) from a map (`{"a": 1}`) and a struct name (`Point {`) from a
//! plain tag (`uuid "..."`).
//!
//! Grammar:
//!
//! ```text
//! document := value EOF
//! value    := null | bool | int | float | bytes | tagged | array | map | struct
//! tagged   := IDENT value | IDENT '(' value ')' | '@' IDENT '(' value ')'
//! array    := '[' (value (',' value)*)? ','? ']'
//! map      := '{' (value ':' value (',' value ':' value)*)? ','? '}'
//! struct   := IDENT? '{' (field (',' field)*)? ','? '}'
//! field    := '.'? IDENT '=' value
//! ```
//!
//! Bare `{}` is an empty map; `Name {}` is an empty struct named `Name`.
//!
//! ```rust
//! use serde_ziggy::parser::Parser;
//! use serde_ziggy::{Value, ZiggyOptions};
//!
//! let value = Parser::new("[1, 2,]", &ZiggyOptions::default()).parse().unwrap();
//! assert_eq!(value, Value::Array(vec![Value::from(1), Value::from(2)]));
//! ```

use crate::error::Position;
use crate::lexer::{Lexer, Token, TokenKind};
use crate::{Error, Fields, Result, Struct, Value, ZiggyOptions};
use std::collections::VecDeque;

type KindCheck = fn(&TokenKind<'_>) -> bool;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    lookahead: VecDeque<Token<'a>>,
    depth: usize,
    recursion_limit: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, options: &ZiggyOptions) -> Self {
        Parser {
            lexer: Lexer::new(input),
            lookahead: VecDeque::with_capacity(2),
            depth: 0,
            recursion_limit: options.recursion_limit,
        }
    }

    /// Parses exactly one value; anything after it is a syntax error.
    pub fn parse(mut self) -> Result<Value> {
        let value = self.parse_value()?;
        match self.next_token()? {
            None => Ok(value),
            Some(token) => Err(Error::syntax(
                token.position,
                "end of input",
                token.kind.to_string(),
            )),
        }
    }

    fn fill(&mut self, count: usize) -> Result<()> {
        while self.lookahead.len() < count {
            match self.lexer.next() {
                Some(token) => self.lookahead.push_back(token?),
                None => break,
            }
        }
        Ok(())
    }

    fn next_token(&mut self) -> Result<Option<Token<'a>>> {
        self.fill(1)?;
        Ok(self.lookahead.pop_front())
    }

    /// Tests the token `n` places ahead without consuming anything.
    fn check(&mut self, n: usize, pred: KindCheck) -> Result<bool> {
        self.fill(n + 1)?;
        Ok(self.lookahead.get(n).map_or(false, |token| pred(&token.kind)))
    }

    fn eat(&mut self, pred: KindCheck) -> Result<bool> {
        if self.check(0, pred)? {
            self.lookahead.pop_front();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect_token(&mut self, expected: &str) -> Result<Token<'a>> {
        match self.next_token()? {
            Some(token) => Ok(token),
            None => Err(Error::syntax(
                self.lexer.current_position(),
                expected,
                "end of input",
            )),
        }
    }

    fn expect(&mut self, pred: KindCheck, expected: &str) -> Result<Token<'a>> {
        let token = self.expect_token(expected)?;
        if pred(&token.kind) {
            Ok(token)
        } else {
            Err(Error::syntax(token.position, expected, token.kind.to_string()))
        }
    }

    /// Consumes the separator after a list item; returns true at the closing token.
    fn end_of_item(&mut self, close: KindCheck, expected: &str) -> Result<bool> {
        let token = self.expect_token(expected)?;
        if matches!(token.kind, TokenKind::Comma) {
            Ok(false)
        } else if close(&token.kind) {
            Ok(true)
        } else {
            Err(Error::syntax(token.position, expected, token.kind.to_string()))
        }
    }

    fn nested<T>(&mut self, position: Position, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.recursion_limit {
            return Err(Error::recursion_limit(position, self.recursion_limit));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn parse_value(&mut self) -> Result<Value> {
        let token = self.expect_token("a value")?;
        let position = token.position;
        match token.kind {
            TokenKind::Null => Ok(Value::Null),
            TokenKind::True => Ok(Value::Bool(true)),
            TokenKind::False => Ok(Value::Bool(false)),
            TokenKind::Int(i) => Ok(Value::Int(i)),
            TokenKind::Float(f) => Ok(Value::Float(f)),
            TokenKind::Bytes(b) | TokenKind::MultilineBytes(b) => Ok(Value::Bytes(b)),
            TokenKind::LBracket => self.nested(position, |p| p.parse_array()),
            TokenKind::LBrace => self.nested(position, |p| p.parse_braced(None)),
            TokenKind::Ident(name) => self.nested(position, |p| p.parse_tagged(name)),
            TokenKind::At => self.nested(position, |p| p.parse_at_tag()),
            other => Err(Error::syntax(position, "a value", other.to_string())),
        }
    }

    fn parse_array(&mut self) -> Result<Value> {
        trace!("array");
        let mut items = Vec::new();
        loop {
            if self.eat(|k| matches!(k, TokenKind::RBracket))? {
                break;
            }
            items.push(self.parse_value()?);
            if self.end_of_item(|k| matches!(k, TokenKind::RBracket), "`,` or `]`")? {
                break;
            }
        }
        Ok(Value::Array(items))
    }

    /// Parses what follows an identifier: a struct name, or a tag around one value.
    fn parse_tagged(&mut self, name: &'a str) -> Result<Value> {
        if self.eat(|k| matches!(k, TokenKind::LBrace))? {
            return self.parse_braced(Some(name));
        }
        let inner = if self.eat(|k| matches!(k, TokenKind::LParen))? {
            let inner = self.parse_value()?;
            self.expect(|k| matches!(k, TokenKind::RParen), "`)`")?;
            inner
        } else {
            self.parse_value()?
        };
        trace!("tag `{}`", name);
        Ok(Value::Tag(name.to_string(), Box::new(inner)))
    }

    fn parse_at_tag(&mut self) -> Result<Value> {
        let token = self.expect_token("a tag name")?;
        let name = match token.kind {
            TokenKind::Ident(name) => name,
            other => return Err(Error::syntax(token.position, "a tag name", other.to_string())),
        };
        self.expect(|k| matches!(k, TokenKind::LParen), "`(`")?;
        let inner = self.parse_value()?;
        self.expect(|k| matches!(k, TokenKind::RParen), "`)`")?;
        Ok(Value::Tag(name.to_string(), Box::new(inner)))
    }

    /// Parses the body of `{ ... }` once the opening brace is consumed.
    fn parse_braced(&mut self, name: Option<&'a str>) -> Result<Value> {
        let starts_struct = self.check(0, |k| matches!(k, TokenKind::Dot))?
            || (self.check(0, |k| matches!(k, TokenKind::Ident(_)))?
                && self.check(1, |k| matches!(k, TokenKind::Equals))?);
        let is_empty = self.check(0, |k| matches!(k, TokenKind::RBrace))?;

        if starts_struct || (is_empty && name.is_some()) {
            return self.parse_struct(name);
        }

        let map = self.parse_map()?;
        Ok(match name {
            Some(name) => Value::Tag(name.to_string(), Box::new(map)),
            None => map,
        })
    }

    fn parse_map(&mut self) -> Result<Value> {
        trace!("map");
        let mut entries = Vec::new();
        loop {
            if self.eat(|k| matches!(k, TokenKind::RBrace))? {
                break;
            }
            let key = self.parse_value()?;
            self.expect(|k| matches!(k, TokenKind::Colon), "`:`")?;
            let value = self.parse_value()?;
            entries.push((key, value));
            if self.end_of_item(|k| matches!(k, TokenKind::RBrace), "`,` or `}`")? {
                break;
            }
        }
        Ok(Value::Map(entries))
    }

    fn parse_struct(&mut self, name: Option<&'a str>) -> Result<Value> {
        trace!("struct {:?}", name);
        let mut fields = Fields::new();
        loop {
            if self.eat(|k| matches!(k, TokenKind::RBrace))? {
                break;
            }
            self.eat(|k| matches!(k, TokenKind::Dot))?;

            let token = self.expect_token("a field name")?;
            let field = match token.kind {
                TokenKind::Ident(field) => field,
                other => {
                    return Err(Error::syntax(token.position, "a field name", other.to_string()))
                }
            };
            if fields.contains_key(field) {
                return Err(Error::duplicate_field(token.position, field));
            }

            self.expect(|k| matches!(k, TokenKind::Equals), "`=`")?;
            let value = self.parse_value()?;
            fields.insert(field.to_string(), value);

            if self.end_of_item(|k| matches!(k, TokenKind::RBrace), "`,` or `}`")? {
                break;
            }
        }
        Ok(Value::Struct(Struct {
            name: name.map(str::to_string),
            fields,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn parse(input: &str) -> Result<Value> {
        Parser::new(input, &ZiggyOptions::default()).parse()
    }

    fn bytes(s: &str) -> Value {
        Value::Bytes(s.as_bytes().to_vec())
    }

    #[test]
    fn test_scalars() {
        assert_eq!(parse("null").unwrap(), Value::Null);
        assert_eq!(parse("true").unwrap(), Value::Bool(true));
        assert_eq!(parse(" false ").unwrap(), Value::Bool(false));
        assert_eq!(parse("-12").unwrap(), Value::from(-12));
        assert_eq!(parse("2.5").unwrap(), Value::Float(2.5));
        assert_eq!(parse("\"hi\"").unwrap(), bytes("hi"));
        assert_eq!(parse("\\\\ hi\n\\\\ there").unwrap(), bytes("hi\nthere"));
    }

    #[test]
    fn test_arrays() {
        assert_eq!(parse("[]").unwrap(), Value::Array(vec![]));
        assert_eq!(
            parse("[1, [2], \"x\",]").unwrap(),
            Value::Array(vec![
                Value::from(1),
                Value::Array(vec![Value::from(2)]),
                bytes("x"),
            ])
        );
    }

    #[test]
    fn test_maps_keep_order_and_duplicates() {
        let value = parse("{\"b\": 1, 2: true, \"b\": 3}").unwrap();
        assert_eq!(
            value,
            Value::Map(vec![
                (bytes("b"), Value::from(1)),
                (Value::from(2), Value::Bool(true)),
                (bytes("b"), Value::from(3)),
            ])
        );
    }

    #[test]
    fn test_empty_braces_is_map() {
        assert_eq!(parse("{}").unwrap(), Value::Map(vec![]));
        assert_eq!(parse("{ , }").unwrap_err().kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_structs() {
        let value = parse("{.title = \"Ruy Blas\", year = 1838,}").unwrap();
        let s = value.as_struct().unwrap();
        assert_eq!(s.name, None);
        let names: Vec<_> = s.fields.keys().cloned().collect();
        assert_eq!(names, vec!["title", "year"]);

        let value = parse("Point {x = 1, y = 2}").unwrap();
        let s = value.as_struct().unwrap();
        assert_eq!(s.name.as_deref(), Some("Point"));
        assert_eq!(s.get("y"), Some(&Value::from(2)));

        let empty = parse("Unit {}").unwrap();
        assert_eq!(empty, Value::Struct(Struct::named("Unit")));
    }

    #[test]
    fn test_named_map_is_tag() {
        assert_eq!(
            parse("Env {\"HOME\": \"/root\"}").unwrap(),
            Value::tag("Env", Value::Map(vec![(bytes("HOME"), bytes("/root"))]))
        );
    }

    #[test]
    fn test_tag_forms() {
        assert_eq!(parse("Green 5").unwrap(), Value::tag("Green", 5));
        assert_eq!(parse("Green(5)").unwrap(), Value::tag("Green", 5));
        assert_eq!(
            parse("@date(\"2024-01-01\")").unwrap(),
            Value::tag("date", "2024-01-01")
        );
        assert_eq!(parse("a b null").unwrap(), Value::tag("a", Value::tag("b", Value::Null)));
        assert_eq!(
            parse("wrap({x = 1})").unwrap(),
            Value::tag("wrap", Struct::new().with_field("x", 1))
        );
    }

    #[test]
    fn test_tag_needs_value() {
        let err = parse("[Red, Green 5]").unwrap_err();
        assert_eq!(
            err,
            Error::syntax(Position::new(1, 5), "a value", "`,`")
        );
        assert!(parse("@date").is_err());
        assert!(parse("@1(2)").is_err());
    }

    #[test]
    fn test_nested_structs_in_array() {
        let value = parse("[{a=1}, {a=2}]").unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], Value::Struct(Struct::new().with_field("a", 1)));
        assert_eq!(items[1], Value::Struct(Struct::new().with_field("a", 2)));
    }

    #[test]
    fn test_duplicate_field() {
        let err = parse("{a=1, a=2}").unwrap_err();
        assert_eq!(err, Error::duplicate_field(Position::new(1, 7), "a"));
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_trailing_input() {
        let err = parse("1 2").unwrap_err();
        assert_eq!(err, Error::syntax(Position::new(1, 3), "end of input", "integer `2`"));
    }

    #[test]
    fn test_unexpected_end() {
        let err = parse("[1, 2").unwrap_err();
        assert_eq!(err, Error::syntax(Position::new(1, 6), "`,` or `]`", "end of input"));
        assert!(parse("").is_err());
        assert!(parse("// only a comment").is_err());
    }

    #[test]
    fn test_mismatched_closer() {
        let err = parse("{\"a\": 1]").unwrap_err();
        assert!(err.to_string().contains("expected `,` or `}`, found `]`"));
        assert!(parse("{x = 1, \"y\": 2}").is_err());
        assert!(parse("{x: 1}").is_err());
    }

    #[test]
    fn test_lex_errors_propagate() {
        assert_eq!(parse("[1, \"open").unwrap_err().kind(), ErrorKind::Lex);
    }

    #[test]
    fn test_recursion_limit() {
        let options = ZiggyOptions::default().with_recursion_limit(3);
        assert!(Parser::new("[[[1]]]", &options).parse().is_ok());
        let err = Parser::new("[[[[1]]]]", &options).parse().unwrap_err();
        assert_eq!(err, Error::recursion_limit(Position::new(1, 4), 3));

        let deep = "[".repeat(1000);
        assert!(matches!(
            parse(&deep).unwrap_err(),
            Error::RecursionLimit { limit: 128, .. }
        ));
    }
}
