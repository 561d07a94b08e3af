//! logos-based style sheet tokenizer.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `#fff` as HexColor, `15px` as Dimension)
//! 2. For equal length matches, earlier-defined variants win

use logos::Logos;

use crate::style::parser::ParseError;

/// Style sheet token produced by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// Hex color: `#fff`, `#ccffee`, `#ff00aa80` (3-8 hex digits).
    #[regex(r"#[0-9a-fA-F]{3,8}")]
    HexColor,

    /// Length with a `px` suffix: `15px`, `2.5px`.
    #[regex(r"-?[0-9]+(\.[0-9]+)?px")]
    Dimension,

    /// Double-quoted string literal.
    #[regex(r#""[^"]*""#)]
    StringLiteral,

    /// Single-quoted string literal.
    #[regex(r"'[^']*'")]
    StringLiteralSingle,

    /// Number: integer or float, possibly negative.
    #[regex(r"-?[0-9]+(\.[0-9]+)?")]
    Number,

    /// Identifier: style names, property names, keyword values.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token(":")]
    Colon,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,
}

/// A token with its source text and byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme<'a> {
    pub token: Token,
    pub text: &'a str,
    pub offset: usize,
}

/// Tokenize a style sheet. Input that matches no token is an error.
pub fn tokenize(input: &str) -> Result<Vec<Lexeme<'_>>, ParseError> {
    Token::lexer(input)
        .spanned()
        .map(|(result, span)| match result {
            Ok(token) => Ok(Lexeme {
                token,
                text: &input[span.clone()],
                offset: span.start,
            }),
            Err(()) => Err(ParseError::InvalidInput {
                offset: span.start,
                text: input[span].to_string(),
            }),
        })
        .collect()
}
