use crate::{lexer::prelude::Token, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    ExpectedIdent,
    UnexpectedToken {
        token: Token,
        expected: Vec<String>,
    },
    /// No rule can start an expression with this token.
    NoPrefixFunction { token: Token },
    /// A digit run the lexer accepted but `i64` cannot hold.
    InvalidIntegerLiteral { literal: String },
    /// The lexer already rejected this lexeme; reported here so lexical
    /// damage shows up in the same diagnostic list as syntax errors.
    IllegalToken { literal: String },
    UnexpectedEof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan
}

impl ParseError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            ParseErrorType::ExpectedIdent => ("Expected identifier", vec![]),
            ParseErrorType::UnexpectedToken { token, expected } => {
                let found = match token {
                    Token::Int(_) => "an Int".to_string(),
                    Token::Str(_) => "a String".to_string(),
                    Token::Ident(_) => "an Identifier".to_string(),
                    _ if token.is_reserved_word() => format!("the keyword `{}`", token.as_literal()),
                    _ => format!("`{}`", token.as_literal())
                };

                let messages = std::iter::once(format!("Found {found}, expected one of: "))
                    .chain(expected.iter().map(|s| format!("- {s}")))
                    .collect();

                ("Not expected this", messages)
            },
            ParseErrorType::NoPrefixFunction { token } => {
                let found = if token.is_reserved_word() {
                    format!("The keyword `{}` cannot start an expression", token.as_literal())
                } else {
                    format!("`{}` cannot start an expression", token.as_literal())
                };

                ("Expected an expression", vec![found])
            },
            ParseErrorType::InvalidIntegerLiteral { literal } => (
                "Invalid integer literal",
                vec![format!("Could not parse `{literal}` as integer")]
            ),
            ParseErrorType::IllegalToken { literal } => (
                "Unrecognized token",
                vec![format!("`{literal}` is not valid syntax")]
            ),
            ParseErrorType::UnexpectedEof => ("Unexpected end of file", vec![]),
        }
    }
}
