//! JSON parser.
//!
//! Recursive descent over the token stream, building [`JsonValue`] trees
//! directly. Duplicate object keys resolve last-write-wins with the first
//! occurrence keeping its position. An optional reviver transform is
//! applied bottom-up after the tree is built, with the root revived last
//! under the synthetic key `""`.

use crate::error::{BoxError, Error, Result};
use crate::lexer::{Lexer, Token};
use crate::limits::Limits;
use crate::value::{JsonMap, JsonValue};

/// JSON parser over a token stream.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    limits: Limits,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given input.
    pub fn new(text: &'a str, limits: Limits) -> Result<Self> {
        let mut lexer = Lexer::new(text);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            limits,
            depth: 0,
        })
    }

    /// Parse the input and return a JsonValue.
    pub fn parse(&mut self) -> Result<JsonValue> {
        let value = self.parse_value()?;

        // Ensure no trailing content
        if self.current != Token::Eof {
            return Err(Error::syntax(
                self.lexer.position(),
                "trailing content after document",
            ));
        }

        Ok(value)
    }

    /// Advance to the next token.
    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn fail(&self, message: &str) -> Error {
        Error::syntax(self.lexer.position(), message)
    }

    /// Parse a single JSON value.
    fn parse_value(&mut self) -> Result<JsonValue> {
        match &self.current {
            Token::Null => {
                self.advance()?;
                Ok(JsonValue::Null)
            }
            Token::True => {
                self.advance()?;
                Ok(JsonValue::Bool(true))
            }
            Token::False => {
                self.advance()?;
                Ok(JsonValue::Bool(false))
            }
            Token::String(s) => {
                let value = JsonValue::String(s.clone());
                self.advance()?;
                Ok(value)
            }
            Token::Number(n) => {
                let value = JsonValue::Number(*n);
                self.advance()?;
                Ok(value)
            }
            Token::LeftBrace => self.parse_object(),
            Token::LeftBracket => self.parse_array(),
            _ => Err(self.fail("expected value")),
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.limits.max_depth {
            return Err(Error::DepthExceeded {
                depth: self.depth,
                limit: self.limits.max_depth,
            });
        }
        Ok(())
    }

    /// Parse a JSON object.
    fn parse_object(&mut self) -> Result<JsonValue> {
        self.enter()?;

        // Consume opening brace
        self.advance()?;

        let mut map = JsonMap::new();

        // Empty object
        if self.current == Token::RightBrace {
            self.advance()?;
            self.depth -= 1;
            return Ok(JsonValue::Object(map));
        }

        loop {
            // Expect string key
            let key = match &self.current {
                Token::String(s) => s.clone(),
                _ => return Err(self.fail("expected string key")),
            };
            self.advance()?;

            // Expect colon
            if self.current != Token::Colon {
                return Err(self.fail("expected ':'"));
            }
            self.advance()?;

            // Parse value; a repeated key replaces the earlier value while
            // keeping its original position.
            let value = self.parse_value()?;
            map.insert(key, value);

            // Expect comma or closing brace
            match &self.current {
                Token::Comma => {
                    self.advance()?;
                    // Trailing comma is not allowed in JSON
                    if self.current == Token::RightBrace {
                        return Err(self.fail("trailing comma in object"));
                    }
                }
                Token::RightBrace => {
                    self.advance()?;
                    break;
                }
                _ => return Err(self.fail("expected ',' or '}'")),
            }
        }

        self.depth -= 1;
        Ok(JsonValue::Object(map))
    }

    /// Parse a JSON array.
    fn parse_array(&mut self) -> Result<JsonValue> {
        self.enter()?;

        // Consume opening bracket
        self.advance()?;

        let mut arr = Vec::new();

        // Empty array
        if self.current == Token::RightBracket {
            self.advance()?;
            self.depth -= 1;
            return Ok(JsonValue::Array(arr));
        }

        loop {
            let value = self.parse_value()?;
            arr.push(value);

            // Expect comma or closing bracket
            match &self.current {
                Token::Comma => {
                    self.advance()?;
                    // Trailing comma is not allowed in JSON
                    if self.current == Token::RightBracket {
                        return Err(self.fail("trailing comma in array"));
                    }
                }
                Token::RightBracket => {
                    self.advance()?;
                    break;
                }
                _ => return Err(self.fail("expected ',' or ']'")),
            }
        }

        self.depth -= 1;
        Ok(JsonValue::Array(arr))
    }
}

/// Parse a JSON document with standard limits.
pub fn parse(text: &str) -> Result<JsonValue> {
    parse_with_limits(text, Limits::standard())
}

/// Parse a JSON document with a custom depth limit.
pub fn parse_with_limits(text: &str, limits: Limits) -> Result<JsonValue> {
    let mut parser = Parser::new(text, limits)?;
    parser.parse()
}

/// Parse a JSON document, then apply `reviver` bottom-up.
///
/// The reviver sees every `(key, value)` pair, children before parents,
/// and finally the root under the key `""`. Returning `Ok(None)` deletes
/// the entry from its parent object, turns the array slot into `null`, or
/// omits the document entirely at the root, which is why the return type
/// carries an `Option`. A reviver error aborts the parse and is propagated as
/// `Error::Reviver`.
pub fn parse_with_reviver<F>(text: &str, limits: Limits, mut reviver: F) -> Result<Option<JsonValue>>
where
    F: FnMut(&str, JsonValue) -> std::result::Result<Option<JsonValue>, BoxError>,
{
    let value = parse_with_limits(text, limits)?;
    revive("", value, &mut reviver)
}

/// Bottom-up reviver walk.
fn revive<F>(key: &str, value: JsonValue, reviver: &mut F) -> Result<Option<JsonValue>>
where
    F: FnMut(&str, JsonValue) -> std::result::Result<Option<JsonValue>, BoxError>,
{
    let value = match value {
        JsonValue::Array(arr) => {
            let mut out = Vec::with_capacity(arr.len());
            for (index, child) in arr.into_iter().enumerate() {
                let slot = revive(&index.to_string(), child, reviver)?;
                // A deleted array slot is a hole, which serializes as null.
                out.push(slot.unwrap_or(JsonValue::Null));
            }
            JsonValue::Array(out)
        }
        JsonValue::Object(map) => {
            let mut out = JsonMap::with_capacity(map.len());
            for (k, child) in map {
                if let Some(v) = revive(&k, child, reviver)? {
                    out.insert(k, v);
                }
            }
            JsonValue::Object(out)
        }
        scalar => scalar,
    };

    reviver(key, value).map_err(|source| Error::Reviver {
        key: key.to_string(),
        source,
    })
}
