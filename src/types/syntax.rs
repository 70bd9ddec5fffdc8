//! Type expression syntax — text → [`TypeDescriptor`].
//!
//! ```text
//! type := "Option" "<" type ">"
//!       | "Vec" "<" type ">"
//!       | "HashMap" "<" type "," type ">"
//!       | "Receiver" "<" type ">"
//!       | "Box" "<" "dyn" IDENT ">" | "dyn" IDENT
//!       | "fn" "(" [type ("," type)*] ")" ["->" type]
//!       | primitive | IDENT
//! ```
//!
//! Identifiers that are not primitives or keywords go through a
//! [`NameResolver`].

use thiserror::Error;

use crate::types::{Primitive, TypeDescriptor};

/// Deepest nesting accepted in one type expression.
pub const MAX_DEPTH: usize = 64;

/// Identifiers with a fixed meaning in type expressions.
pub const KEYWORDS: [&str; 7] = ["Option", "Vec", "HashMap", "Receiver", "Box", "dyn", "fn"];

/// Errors produced while parsing a type expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("unexpected '{found}' at offset {offset}, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
        offset: usize,
    },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("invalid character '{ch}' at offset {offset}")]
    InvalidCharacter { ch: char, offset: usize },

    #[error("unknown type '{name}' at offset {offset}")]
    UnknownType { name: String, offset: usize },

    #[error("type '{name}' refers to itself")]
    RecursiveType { name: String },

    #[error("type nests deeper than {limit} levels")]
    TooDeep { limit: usize },
}

/// Lookup of user-defined type names.
pub trait NameResolver {
    /// Descriptor for `name`, or `None` if the name is not defined.
    fn resolve(&mut self, name: &str) -> Result<Option<TypeDescriptor>, SyntaxError>;
}

/// Parse a complete type expression.
pub fn parse(input: &str, resolver: &mut impl NameResolver) -> Result<TypeDescriptor, SyntaxError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
        resolver,
    };
    let ty = parser.parse_type()?;
    match parser.peek() {
        None => Ok(ty),
        Some(token) => Err(SyntaxError::UnexpectedToken {
            found: token.text.clone(),
            expected: "end of input",
            offset: token.offset,
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    text: String,
    offset: usize,
}

fn tokenize(input: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(offset, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
        } else if ch.is_alphabetic() || ch == '_' {
            let mut text = String::new();
            while let Some(&(_, c)) = chars.peek() {
                if c.is_alphanumeric() || c == '_' {
                    text.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token { text, offset });
        } else if ch == '-' {
            chars.next();
            match chars.next() {
                Some((_, '>')) => tokens.push(Token {
                    text: "->".into(),
                    offset,
                }),
                _ => return Err(SyntaxError::InvalidCharacter { ch, offset }),
            }
        } else if matches!(ch, '<' | '>' | ',' | '(' | ')') {
            chars.next();
            tokens.push(Token {
                text: ch.to_string(),
                offset,
            });
        } else {
            return Err(SyntaxError::InvalidCharacter { ch, offset });
        }
    }

    Ok(tokens)
}

struct Parser<'r, R> {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    resolver: &'r mut R,
}

impl<R: NameResolver> Parser<'_, R> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self, expected: &'static str) -> Result<Token, SyntaxError> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or(SyntaxError::UnexpectedEnd { expected })?;
        self.pos += 1;
        Ok(token)
    }

    fn expect(&mut self, text: &'static str) -> Result<(), SyntaxError> {
        let token = self.next(text)?;
        if token.text == text {
            Ok(())
        } else {
            Err(SyntaxError::UnexpectedToken {
                found: token.text,
                expected: text,
                offset: token.offset,
            })
        }
    }

    fn eat(&mut self, text: &str) -> bool {
        if self.peek().is_some_and(|t| t.text == text) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn ident(&mut self) -> Result<Token, SyntaxError> {
        let token = self.next("a type name")?;
        if token.text.starts_with(|c: char| c.is_alphabetic() || c == '_') {
            Ok(token)
        } else {
            Err(SyntaxError::UnexpectedToken {
                found: token.text,
                expected: "a type name",
                offset: token.offset,
            })
        }
    }

    /// `"<" type ">"`
    fn generic_arg(&mut self) -> Result<TypeDescriptor, SyntaxError> {
        self.expect("<")?;
        let arg = self.parse_type()?;
        self.expect(">")?;
        Ok(arg)
    }

    fn parse_type(&mut self) -> Result<TypeDescriptor, SyntaxError> {
        if self.depth >= MAX_DEPTH {
            return Err(SyntaxError::TooDeep { limit: MAX_DEPTH });
        }
        self.depth += 1;
        let ty = self.parse_type_inner();
        self.depth -= 1;
        ty
    }

    fn parse_type_inner(&mut self) -> Result<TypeDescriptor, SyntaxError> {
        let head = self.ident()?;
        match head.text.as_str() {
            "Option" => Ok(TypeDescriptor::pointer(self.generic_arg()?)),
            "Vec" => Ok(TypeDescriptor::sequence(self.generic_arg()?)),
            "Receiver" => Ok(TypeDescriptor::channel(self.generic_arg()?)),
            "HashMap" => {
                self.expect("<")?;
                let key = self.parse_type()?;
                self.expect(",")?;
                let value = self.parse_type()?;
                self.expect(">")?;
                Ok(TypeDescriptor::map(key, value))
            }
            "Box" => {
                self.expect("<")?;
                self.expect("dyn")?;
                let name = self.ident()?;
                self.expect(">")?;
                Ok(TypeDescriptor::interface(name.text))
            }
            "dyn" => Ok(TypeDescriptor::interface(self.ident()?.text)),
            "fn" => self.function(),
            name => {
                if let Some(p) = Primitive::from_name(name) {
                    return Ok(TypeDescriptor::primitive(p));
                }
                self.resolver
                    .resolve(name)?
                    .ok_or_else(|| SyntaxError::UnknownType {
                        name: head.text.clone(),
                        offset: head.offset,
                    })
            }
        }
    }

    /// Parses the rest of `fn(...) -> ...` after the `fn` keyword.
    fn function(&mut self) -> Result<TypeDescriptor, SyntaxError> {
        self.expect("(")?;
        let mut params = Vec::new();
        if !self.eat(")") {
            loop {
                params.push(self.parse_type()?.to_string());
                if self.eat(")") {
                    break;
                }
                self.expect(",")?;
            }
        }
        let mut signature = format!("fn({})", params.join(", "));
        if self.eat("->") {
            signature.push_str(" -> ");
            signature.push_str(&self.parse_type()?.to_string());
        }
        Ok(TypeDescriptor::function(signature))
    }
}
