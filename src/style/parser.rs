//! Recursive descent style sheet parser.
//!
//! Parses sheet text into a list of [`StyleRule`]s:
//!
//! ```text
//! /* comment */
//! paragraph { font-size: 15; font-family: source; color: #000000; }
//! code { font-family: "source mono"; background-color: #ccffee }
//! ```
//!
//! A value runs until the next `;` or `}`. A lone number becomes
//! [`RawValue::Number`]; anything else is joined with single spaces into
//! [`RawValue::Text`] (quotes removed).

use crate::style::properties::RawValue;
use crate::style::tokenizer::{tokenize, Lexeme, Token};

/// Errors from style sheet parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("unrecognized input at byte {offset}: {text:?}")]
    InvalidInput { offset: usize, text: String },
    #[error("unexpected token at byte {offset}: {message}")]
    UnexpectedToken { offset: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
}

/// One `property: value` pair inside a rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub property: String,
    pub value: RawValue,
}

/// A named style and its declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    pub name: String,
    pub declarations: Vec<Declaration>,
}

/// Blank out block comments (`/* ... */`) with one space per byte, so byte
/// offsets in the result match the input. An unterminated comment swallows
/// the rest of the input.
fn strip_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("/*") {
        result.push_str(&rest[..start]);
        let comment_len = match rest[start + 2..].find("*/") {
            Some(end) => end + 4,
            None => rest.len() - start,
        };
        result.push_str(&" ".repeat(comment_len));
        rest = &rest[start + comment_len..];
    }
    result.push_str(rest);
    result
}

/// Parse sheet text into rules, in source order. Error offsets are byte
/// offsets into `input`.
pub fn parse_sheet(input: &str) -> Result<Vec<StyleRule>, ParseError> {
    let cleaned = strip_comments(input);
    let tokens = tokenize(&cleaned)?;
    let mut parser = Parser { tokens, cursor: 0 };

    let mut rules = Vec::new();
    while !parser.is_eof() {
        rules.push(parser.parse_rule()?);
    }
    Ok(rules)
}

struct Parser<'a> {
    tokens: Vec<Lexeme<'a>>,
    cursor: usize,
}

impl<'a> Parser<'a> {
    fn is_eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    fn peek(&self) -> Option<Lexeme<'a>> {
        self.tokens.get(self.cursor).copied()
    }

    fn advance(&mut self) -> Option<Lexeme<'a>> {
        let lexeme = self.peek();
        if lexeme.is_some() {
            self.cursor += 1;
        }
        lexeme
    }

    fn expect(&mut self, token: Token, context: &str) -> Result<Lexeme<'a>, ParseError> {
        match self.advance() {
            Some(lexeme) if lexeme.token == token => Ok(lexeme),
            Some(lexeme) => Err(ParseError::UnexpectedToken {
                offset: lexeme.offset,
                message: format!("expected {context}, found {:?}", lexeme.text),
            }),
            None => Err(ParseError::UnexpectedEof(format!("expected {context}"))),
        }
    }

    /// `name { declaration* }`
    fn parse_rule(&mut self) -> Result<StyleRule, ParseError> {
        let name = self.expect(Token::Ident, "style name")?.text.to_owned();
        self.expect(Token::BraceOpen, "`{`")?;

        let mut declarations = Vec::new();
        loop {
            match self.peek() {
                Some(l) if l.token == Token::BraceClose => {
                    self.cursor += 1;
                    break;
                }
                Some(l) if l.token == Token::Semicolon => {
                    self.cursor += 1;
                }
                Some(_) => declarations.push(self.parse_declaration()?),
                None => return Err(ParseError::UnexpectedEof(format!("unclosed style `{name}`"))),
            }
        }

        Ok(StyleRule { name, declarations })
    }

    /// `property : value-token+`
    fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        let property = self.expect(Token::Ident, "property name")?.text.to_owned();
        self.expect(Token::Colon, "`:`")?;

        let mut parts: Vec<Lexeme<'a>> = Vec::new();
        while let Some(l) = self.peek() {
            match l.token {
                Token::Semicolon | Token::BraceClose => break,
                Token::BraceOpen | Token::Colon => {
                    return Err(ParseError::UnexpectedToken {
                        offset: l.offset,
                        message: format!("unexpected {:?} in value of `{property}`", l.text),
                    });
                }
                _ => {
                    parts.push(l);
                    self.cursor += 1;
                }
            }
        }

        let value = match parts.as_slice() {
            [] => {
                let offset = self.peek().map_or(0, |l| l.offset);
                return Err(ParseError::UnexpectedToken {
                    offset,
                    message: format!("missing value for `{property}`"),
                });
            }
            [single] if single.token == Token::Number => match single.text.parse::<f32>() {
                Ok(n) => RawValue::Number(n),
                Err(_) => RawValue::Text(single.text.to_owned()),
            },
            parts => {
                let mut text = String::new();
                for part in parts {
                    if part.token == Token::Comma {
                        text.push(',');
                        continue;
                    }
                    if !text.is_empty() && !text.ends_with(',') {
                        text.push(' ');
                    }
                    text.push_str(unquote(part));
                }
                RawValue::Text(text)
            }
        };

        Ok(Declaration { property, value })
    }
}

fn unquote<'a>(lexeme: &Lexeme<'a>) -> &'a str {
    match lexeme.token {
        Token::StringLiteral | Token::StringLiteralSingle => {
            &lexeme.text[1..lexeme.text.len() - 1]
        }
        _ => lexeme.text,
    }
}
