//! Type spelling parser.
//!
//! Turns the spelling produced by [`TypeShape`]'s `Display` impl back into
//! a shape, so module descriptions can write `"map[string][]*io.Reader"`
//! instead of nested objects.
//!
//! Supports:
//! - Basic and universe types: `int`, `string`, `error`, `any`
//! - Qualified named types: `io.Reader`, `example.com/store.Item`
//! - Composites: `*T`, `[]T`, `[4]T`, `map[K]V`, `chan T`, `<-chan T`, `chan<- T`
//! - Signatures: `func(string, ...int) (int, error)`
//! - Interface literals: `interface{}`, `interface{Close() error}`

use crate::shape::{ChanDir, MethodDecl, ModuleRef, Signature, TypeShape};
use std::fmt;

/// Deepest nesting of composite types accepted.
pub const MAX_TYPE_DEPTH: usize = 128;

const BASIC_TYPES: &[&str] = &[
    "bool",
    "string",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
    "byte",
    "rune",
    "float32",
    "float64",
    "complex64",
    "complex128",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParseError {
    pub input: String,
    pub offset: usize,
    pub message: String,
}

impl fmt::Display for TypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot parse type `{}` at offset {}: {}",
            self.input, self.offset, self.message
        )
    }
}

impl std::error::Error for TypeParseError {}

/// Parse a full type spelling. Trailing input is an error.
pub fn parse_type_shape(text: &str) -> Result<TypeShape, TypeParseError> {
    let mut parser = Parser::new(text);
    let shape = parser.parse_type()?;
    parser.expect_end()?;
    Ok(shape)
}

/// Parse a signature spelling, with or without the leading `func`.
pub fn parse_signature(text: &str) -> Result<Signature, TypeParseError> {
    let mut parser = Parser::new(text);
    parser.skip_ws();
    parser.eat("func");
    let sig = parser.parse_signature()?;
    parser.expect_end()?;
    Ok(sig)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            depth: 0,
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn error(&self, message: impl Into<String>) -> TypeParseError {
        TypeParseError {
            input: self.src.to_string(),
            offset: self.pos,
            message: message.into(),
        }
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.src.len() - trimmed.len();
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> Result<(), TypeParseError> {
        self.skip_ws();
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(format!("expected `{}`", token)))
        }
    }

    fn expect_end(&mut self) -> Result<(), TypeParseError> {
        self.skip_ws();
        if self.rest().is_empty() {
            Ok(())
        } else {
            Err(self.error("unexpected trailing input"))
        }
    }

    /// Keyword match that does not swallow a longer identifier (`chanx`).
    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let rest = self.rest();
        if !rest.starts_with(keyword) {
            return false;
        }
        let next = rest[keyword.len()..].chars().next();
        if next.is_some_and(is_path_char) {
            return false;
        }
        self.pos += keyword.len();
        true
    }

    fn parse_type(&mut self) -> Result<TypeShape, TypeParseError> {
        if self.depth >= MAX_TYPE_DEPTH {
            return Err(self.error(format!("type nested deeper than {}", MAX_TYPE_DEPTH)));
        }
        self.depth += 1;
        let shape = self.parse_type_inner();
        self.depth -= 1;
        shape
    }

    fn parse_type_inner(&mut self) -> Result<TypeShape, TypeParseError> {
        self.skip_ws();
        if self.eat("*") {
            return Ok(TypeShape::pointer(self.parse_type()?));
        }
        if self.eat("<-") {
            self.skip_ws();
            if !self.eat_keyword("chan") {
                return Err(self.error("expected `chan` after `<-`"));
            }
            return Ok(TypeShape::chan(ChanDir::Recv, self.parse_type()?));
        }
        if self.eat("[") {
            self.skip_ws();
            if self.eat("]") {
                return Ok(TypeShape::slice(self.parse_type()?));
            }
            let digits: String = self.rest().chars().take_while(char::is_ascii_digit).collect();
            if digits.is_empty() {
                return Err(self.error("expected array length"));
            }
            self.pos += digits.len();
            let len = digits
                .parse::<u64>()
                .map_err(|e| self.error(format!("bad array length: {}", e)))?;
            self.expect("]")?;
            return Ok(TypeShape::Array {
                len,
                elem: Box::new(self.parse_type()?),
            });
        }
        if self.eat_keyword("map") {
            self.expect("[")?;
            let key = self.parse_type()?;
            self.expect("]")?;
            return Ok(TypeShape::map(key, self.parse_type()?));
        }
        if self.eat_keyword("chan") {
            if self.eat("<-") {
                return Ok(TypeShape::chan(ChanDir::Send, self.parse_type()?));
            }
            return Ok(TypeShape::chan(ChanDir::Both, self.parse_type()?));
        }
        if self.eat_keyword("func") {
            return Ok(TypeShape::Signature(self.parse_signature()?));
        }
        if self.eat_keyword("interface") {
            return self.parse_interface();
        }
        self.parse_named()
    }

    fn parse_named(&mut self) -> Result<TypeShape, TypeParseError> {
        let word: String = self.rest().chars().take_while(|c| is_path_char(*c)).collect();
        if word.is_empty() {
            return Err(self.error("expected a type"));
        }
        self.pos += word.len();

        let after_slash = word.rfind('/').map(|i| i + 1).unwrap_or(0);
        match word[after_slash..].rfind('.') {
            Some(dot) => {
                let split = after_slash + dot;
                let (path, name) = (&word[..split], &word[split + 1..]);
                if path.is_empty() || name.is_empty() {
                    return Err(self.error(format!("malformed qualified name `{}`", word)));
                }
                Ok(TypeShape::named(ModuleRef::new(path), name))
            }
            None if word.contains('/') => {
                Err(self.error(format!("module path `{}` has no type name", word)))
            }
            None if BASIC_TYPES.contains(&word.as_str()) => Ok(TypeShape::basic(word)),
            None => Ok(TypeShape::universe(word)),
        }
    }

    fn parse_signature(&mut self) -> Result<Signature, TypeParseError> {
        self.expect("(")?;
        let mut sig = Signature::default();
        self.skip_ws();
        if !self.eat(")") {
            loop {
                self.skip_ws();
                if sig.variadic {
                    return Err(self.error("variadic parameter must be last"));
                }
                if self.eat("...") {
                    sig.variadic = true;
                    sig.params.push(TypeShape::slice(self.parse_type()?));
                } else {
                    sig.params.push(self.parse_type()?);
                }
                self.skip_ws();
                if self.eat(")") {
                    break;
                }
                self.expect(",")?;
            }
        }

        let before = self.pos;
        self.skip_ws();
        match self.peek() {
            None | Some(',') | Some(')') | Some(']') | Some(';') | Some('}') => {
                self.pos = before;
            }
            Some('(') => {
                self.eat("(");
                loop {
                    sig.results.push(self.parse_type()?);
                    self.skip_ws();
                    if self.eat(")") {
                        break;
                    }
                    self.expect(",")?;
                }
            }
            Some(_) => sig.results.push(self.parse_type()?),
        }
        Ok(sig)
    }

    fn parse_interface(&mut self) -> Result<TypeShape, TypeParseError> {
        self.expect("{")?;
        let mut methods = Vec::new();
        loop {
            self.skip_ws();
            if self.eat("}") {
                break;
            }
            let name: String = self
                .rest()
                .chars()
                .take_while(|c| c.is_alphanumeric() || *c == '_')
                .collect();
            if name.is_empty() {
                return Err(self.error("expected method name"));
            }
            self.pos += name.len();
            let signature = self.parse_signature()?;
            methods.push(MethodDecl { name, signature });
            self.skip_ws();
            self.eat(";");
        }
        Ok(TypeShape::Interface { methods })
    }
}

fn is_path_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '/' | '-' | '~')
}
