use crate::{lexer::prelude::{Lexer, Spanned, Token}, utils::prelude::SrcSpan};
use super::error::{ParseError, ParseErrorType};
use super::ast::{Expression, Program, Statement};

pub trait Parse<T: Iterator<Item = Spanned>>
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError>;
}

pub trait InfixParse<T: Iterator<Item = Spanned>>
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError>;
}

/// Recursive-descent parser with precedence climbing for expressions.
///
/// Failed statements are recorded in `errors` and never abort the parse:
/// after each failure the cursor is resynchronized past the next statement
/// boundary, so a full (possibly partial) [`Program`] plus the complete
/// diagnostic list always comes back.
pub struct Parser<T: Iterator<Item = Spanned>> {
    pub current_token: Option<Spanned>,
    pub next_token: Option<Spanned>,
    pub errors: Vec<ParseError>,

    tokens: T,
}

impl<T: Iterator<Item = Spanned>> Parser<T> {
    pub fn new(input: T) -> Self {
        let mut parser = Self {
            current_token: None,
            next_token: None,
            errors: vec![],

            tokens: input,
        };

        parser.step();
        parser.step();

        parser
    }

    pub fn step(&mut self) {
        let _ = self.next_token();
    }

    pub fn next_token(&mut self) -> Option<Spanned> {
        let t = self.current_token.take();

        self.current_token = self.next_token.take();
        self.next_token = self.tokens.next();

        t
    }

    pub fn current_precedence(&self) -> Precedence {
        match &self.current_token {
            Some((_, token, _)) => Precedence::from(token),
            None => Precedence::Lowest
        }
    }

    pub fn parse_program(&mut self) -> (Program, Vec<ParseError>) {
        let start = match &self.current_token {
            Some((start, _, _)) => *start,
            None => 0
        };

        let mut statements: Vec<Statement> = vec![];

        loop {
            match &self.current_token {
                None | Some((_, Token::Eof, _)) => break,
                // stray terminator between statements
                Some((_, Token::Semicolon, _)) => {
                    self.step();
                    continue;
                },
                Some(_) => {}
            }

            match Statement::parse(self, None) {
                Ok(statement) => statements.push(statement),
                Err(error) => {
                    self.errors.push(error);
                    self.recover();
                }
            }
        }

        let end = statements.last()
            .map(|statement| statement.location().end)
            .unwrap_or(start);

        let program = Program {
            statements,
            location: SrcSpan { start, end }
        };

        (program, std::mem::take(&mut self.errors))
    }

    /// Resynchronizes after a failed statement. Unconditionally consumes at
    /// least one token, then skips to just past the next `;`, so every parse
    /// attempt makes forward progress no matter where the failure happened.
    fn recover(&mut self) {
        self.step();

        loop {
            match &self.current_token {
                None
                | Some((_, Token::Eof, _)) => break,
                Some((_, Token::Semicolon, _)) => {
                    self.step();
                    break;
                },
                Some(_) => self.step()
            }
        }
    }

    pub fn expect_one(&mut self, token: Token) -> Result<(u32, u32), ParseError> {
        match self.current_token.take() {
            Some((start, tok, end)) if tok == token => {
                self.step();
                Ok((start, end))
            },
            Some(t) => {
                let (start, tok, end) = t.clone();
                self.current_token = Some(t);

                parse_error(
                    ParseErrorType::UnexpectedToken {
                        token: tok,
                        expected: vec![format!("`{}`", token.as_literal())],
                    },
                    SrcSpan { start, end }
                )
            },
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        }
    }

    pub fn expect_ident(&mut self) -> Result<(u32, String, u32), ParseError> {
        match self.current_token.take() {
            Some((start, Token::Ident(value), end)) => {
                self.step();
                Ok((start, value, end))
            },
            Some(t) => {
                let (start, _, end) = t.clone();
                self.current_token = Some(t);

                parse_error(
                    ParseErrorType::ExpectedIdent,
                    SrcSpan { start, end }
                )
            },
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        }
    }

    /// Comma-separated series closed by `end`. Parameter lists and
    /// call-argument lists both go through here.
    pub fn parse_series<A>(
        &mut self,
        parse_item: impl Fn(&mut Self) -> Result<A, ParseError>,
        end: Token,
    ) -> Result<(Vec<A>, u32), ParseError> {
        let mut items = vec![];

        if let Ok((_, close)) = self.expect_one(end.clone()) {
            return Ok((items, close));
        }

        items.push(parse_item(self)?);

        while self.expect_one(Token::Comma).is_ok() {
            items.push(parse_item(self)?);
        }

        let (_, close) = self.expect_one(end)?;

        Ok((items, close))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call
}

impl From<&Token> for Precedence {
    fn from(value: &Token) -> Self {
        match value {
            Token::Equal | Token::NotEqual => Self::Equals,
            Token::LessThan | Token::GreaterThan |
            Token::LessThanOrEqual | Token::GreaterThanOrEqual => Self::LessGreater,
            Token::Plus | Token::Minus => Self::Sum,
            Token::Slash | Token::Asterisk => Self::Product,
            Token::LParen => Self::Call,
            _ => Self::Lowest,
        }
    }
}

pub fn parse_module(src: &str) -> Result<Program, Vec<ParseError>> {
    let lexer = Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)));
    let mut parser = Parser::new(lexer);

    let (program, errors) = parser.parse_program();

    if errors.is_empty() {
        Ok(program)
    } else {
        Err(errors)
    }
}

pub fn parse_module_from_stream(stream: impl Iterator<Item = char>) -> Result<Program, Vec<ParseError>> {
    let lexer = Lexer::new(stream
        .scan(0, |pos, c| {
            *pos += c.len_utf8() as u32;
            Some((*pos - c.len_utf8() as u32, c))
        })
    );
    let mut parser = Parser::new(lexer);

    let (program, errors) = parser.parse_program();

    if errors.is_empty() {
        Ok(program)
    } else {
        Err(errors)
    }
}

pub fn parse_error<T>(error: ParseErrorType, span: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, span })
}
