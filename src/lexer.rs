//! JSON lexer/tokenizer.
//!
//! Converts input text into a stream of tokens for the validator and the
//! parser. Owns escape sequence resolution, surrogate pair combination,
//! and the strict RFC 8259 number grammar. The input is interpreted as
//! data only; nothing here or downstream evaluates text.

use crate::error::{Error, Result};

/// Token types produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Left brace `{`
    LeftBrace,
    /// Right brace `}`
    RightBrace,
    /// Left bracket `[`
    LeftBracket,
    /// Right bracket `]`
    RightBracket,
    /// Colon `:`
    Colon,
    /// Comma `,`
    Comma,
    /// Null literal
    Null,
    /// True literal
    True,
    /// False literal
    False,
    /// String value with all escapes resolved
    String(String),
    /// Number value
    Number(f64),
    /// End of input
    Eof,
}

/// JSON lexer that tokenizes input text.
pub struct Lexer<'a> {
    text: &'a str,
    input: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            input: text.as_bytes(),
            pos: 0,
        }
    }

    /// Get the current byte position in the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Peek at the current byte without consuming it.
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Consume and return the current byte.
    fn advance(&mut self) -> Option<u8> {
        let b = self.input.get(self.pos).copied();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    /// Skip whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.advance();
        }
    }

    /// Read the next token from the input.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();

        match self.peek() {
            None => Ok(Token::Eof),
            Some(b'{') => {
                self.advance();
                Ok(Token::LeftBrace)
            }
            Some(b'}') => {
                self.advance();
                Ok(Token::RightBrace)
            }
            Some(b'[') => {
                self.advance();
                Ok(Token::LeftBracket)
            }
            Some(b']') => {
                self.advance();
                Ok(Token::RightBracket)
            }
            Some(b':') => {
                self.advance();
                Ok(Token::Colon)
            }
            Some(b',') => {
                self.advance();
                Ok(Token::Comma)
            }
            Some(b'"') => self.read_string(),
            Some(b'-') | Some(b'0'..=b'9') => self.read_number(),
            Some(b't') => self.read_literal(b"true", Token::True),
            Some(b'f') => self.read_literal(b"false", Token::False),
            Some(b'n') => self.read_literal(b"null", Token::Null),
            Some(b) => Err(Error::syntax(
                self.pos,
                format!("unexpected character 0x{b:02x}"),
            )),
        }
    }

    /// Read a string token, resolving escape sequences.
    fn read_string(&mut self) -> Result<Token> {
        // Consume opening quote
        self.advance();

        let mut result = String::new();

        loop {
            match self.advance() {
                None => return Err(Error::syntax(self.pos, "unterminated string")),
                Some(b'"') => break,
                Some(b'\\') => {
                    let escaped = self.read_escape_sequence()?;
                    result.push(escaped);
                }
                Some(b) if b < 0x20 => {
                    return Err(Error::syntax(
                        self.pos - 1,
                        format!("raw control character 0x{b:02x} in string"),
                    ));
                }
                Some(b) if b < 0x80 => {
                    result.push(b as char);
                }
                Some(_) => {
                    // Start of a multi-byte UTF-8 sequence; the input is a
                    // str so the sequence is known valid. Re-decode from the
                    // character boundary.
                    self.pos -= 1;
                    match self.text[self.pos..].chars().next() {
                        Some(c) => {
                            result.push(c);
                            self.pos += c.len_utf8();
                        }
                        None => return Err(Error::syntax(self.pos, "unterminated string")),
                    }
                }
            }
        }

        Ok(Token::String(result))
    }

    /// Read an escape sequence after a backslash.
    fn read_escape_sequence(&mut self) -> Result<char> {
        match self.advance() {
            None => Err(Error::syntax(self.pos, "unterminated escape sequence")),
            Some(b'"') => Ok('"'),
            Some(b'\\') => Ok('\\'),
            Some(b'/') => Ok('/'),
            Some(b'b') => Ok('\x08'),
            Some(b'f') => Ok('\x0C'),
            Some(b'n') => Ok('\n'),
            Some(b'r') => Ok('\r'),
            Some(b't') => Ok('\t'),
            Some(b'u') => self.read_unicode_escape(),
            Some(b) => Err(Error::syntax(
                self.pos - 1,
                format!("invalid escape character 0x{b:02x}"),
            )),
        }
    }

    /// Read a `\uXXXX` unicode escape, combining surrogate pairs.
    fn read_unicode_escape(&mut self) -> Result<char> {
        let start = self.pos;
        let codepoint = self.read_hex4()?;

        // High surrogate: must be followed by an escaped low surrogate.
        if (0xD800..=0xDBFF).contains(&codepoint) {
            if self.advance() != Some(b'\\') || self.advance() != Some(b'u') {
                return Err(Error::syntax(start, "unpaired high surrogate"));
            }
            let low = self.read_hex4()?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(Error::syntax(start, "unpaired high surrogate"));
            }
            let combined = 0x10000 + ((codepoint as u32 - 0xD800) << 10) + (low as u32 - 0xDC00);
            return char::from_u32(combined)
                .ok_or_else(|| Error::syntax(start, "invalid surrogate pair"));
        }

        // Low surrogate without a preceding high surrogate.
        if (0xDC00..=0xDFFF).contains(&codepoint) {
            return Err(Error::syntax(start, "unpaired low surrogate"));
        }

        char::from_u32(codepoint as u32)
            .ok_or_else(|| Error::syntax(start, "invalid unicode escape"))
    }

    /// Read 4 hex digits and return the value.
    fn read_hex4(&mut self) -> Result<u16> {
        let mut value: u16 = 0;
        for _ in 0..4 {
            let b = self
                .advance()
                .ok_or_else(|| Error::syntax(self.pos, "truncated unicode escape"))?;
            let digit = match b {
                b'0'..=b'9' => b - b'0',
                b'a'..=b'f' => b - b'a' + 10,
                b'A'..=b'F' => b - b'A' + 10,
                _ => {
                    return Err(Error::syntax(
                        self.pos - 1,
                        "invalid hex digit in unicode escape",
                    ))
                }
            };
            value = (value << 4) | (digit as u16);
        }
        Ok(value)
    }

    /// Read a number token using the strict RFC 8259 grammar: optional
    /// minus, integer part without leading zeros, optional fraction with at
    /// least one digit, optional exponent with at least one digit.
    fn read_number(&mut self) -> Result<Token> {
        let start = self.pos;

        if self.peek() == Some(b'-') {
            self.advance();
        }

        // Integer part
        match self.peek() {
            Some(b'0') => {
                self.advance();
                if let Some(b'0'..=b'9') = self.peek() {
                    return Err(Error::syntax(self.pos, "leading zero in number"));
                }
            }
            Some(b'1'..=b'9') => {
                self.advance();
                while let Some(b'0'..=b'9') = self.peek() {
                    self.advance();
                }
            }
            _ => return Err(Error::syntax(self.pos, "expected digit in number")),
        }

        // Fractional part
        if self.peek() == Some(b'.') {
            self.advance();
            match self.peek() {
                Some(b'0'..=b'9') => {
                    while let Some(b'0'..=b'9') = self.peek() {
                        self.advance();
                    }
                }
                _ => return Err(Error::syntax(self.pos, "expected digit after decimal point")),
            }
        }

        // Exponent
        if let Some(b'e' | b'E') = self.peek() {
            self.advance();
            if let Some(b'+' | b'-') = self.peek() {
                self.advance();
            }
            match self.peek() {
                Some(b'0'..=b'9') => {
                    while let Some(b'0'..=b'9') = self.peek() {
                        self.advance();
                    }
                }
                _ => return Err(Error::syntax(self.pos, "expected digit in exponent")),
            }
        }

        let num_str = &self.text[start..self.pos];
        let value: f64 = num_str
            .parse()
            .map_err(|_| Error::syntax(start, format!("invalid number {num_str:?}")))?;

        Ok(Token::Number(value))
    }

    /// Expect a literal keyword at the current position.
    fn read_literal(&mut self, expected: &[u8], token: Token) -> Result<Token> {
        let start = self.pos;
        for &b in expected {
            if self.advance() != Some(b) {
                return Err(Error::syntax(start, "invalid literal"));
            }
        }
        Ok(token)
    }
}
