//! Syntactic validation.
//!
//! `validate` answers whether a candidate text is well-formed JSON before
//! any structural interpretation occurs. It drives the same tokenizer as
//! the parser through a structure check that builds nothing, so validation
//! and parsing can never disagree about the grammar. Accepted documents
//! are an object, an array, or a single primitive value, with nothing but
//! whitespace around them.

use crate::error::{Error, Result};
use crate::lexer::{Lexer, Token};
use crate::limits::Limits;

/// Returns true iff `text` is a syntactically well-formed JSON document.
pub fn validate(text: &str) -> bool {
    validate_with_limits(text, Limits::standard())
}

/// Validation with a custom depth limit.
pub fn validate_with_limits(text: &str, limits: Limits) -> bool {
    let mut checker = match Checker::new(text, limits) {
        Ok(c) => c,
        Err(_) => return false,
    };
    checker.check_document().is_ok()
}

/// Structure checker over the token stream.
struct Checker<'a> {
    lexer: Lexer<'a>,
    current: Token,
    limits: Limits,
    depth: usize,
}

impl<'a> Checker<'a> {
    fn new(text: &'a str, limits: Limits) -> Result<Self> {
        let mut lexer = Lexer::new(text);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            limits,
            depth: 0,
        })
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn fail(&self, message: &str) -> Error {
        Error::syntax(self.lexer.position(), message)
    }

    /// Check a complete document: one value, then end of input.
    fn check_document(&mut self) -> Result<()> {
        self.check_value()?;
        if self.current != Token::Eof {
            return Err(self.fail("trailing content after document"));
        }
        Ok(())
    }

    fn check_value(&mut self) -> Result<()> {
        match &self.current {
            Token::Null
            | Token::True
            | Token::False
            | Token::String(_)
            | Token::Number(_) => self.advance(),
            Token::LeftBrace => self.check_object(),
            Token::LeftBracket => self.check_array(),
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

    fn check_object(&mut self) -> Result<()> {
        self.enter()?;
        self.advance()?;

        if self.current == Token::RightBrace {
            self.advance()?;
            self.depth -= 1;
            return Ok(());
        }

        loop {
            if !matches!(self.current, Token::String(_)) {
                return Err(self.fail("expected string key"));
            }
            self.advance()?;

            if self.current != Token::Colon {
                return Err(self.fail("expected ':'"));
            }
            self.advance()?;

            self.check_value()?;

            match self.current {
                Token::Comma => {
                    self.advance()?;
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
        Ok(())
    }

    fn check_array(&mut self) -> Result<()> {
        self.enter()?;
        self.advance()?;

        if self.current == Token::RightBracket {
            self.advance()?;
            self.depth -= 1;
            return Ok(());
        }

        loop {
            self.check_value()?;

            match self.current {
                Token::Comma => {
                    self.advance()?;
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
        Ok(())
    }
}
