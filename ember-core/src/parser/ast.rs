use std::fmt::Display;

use crate::{
    lexer::prelude::{Spanned, Token},
    parser::prelude::{parse_error, InfixParse, Parse, ParseErrorType, Parser, Precedence},
    utils::prelude::SrcSpan
};

// program -> { <statement> }
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let statements = self.statements.iter()
            .map(|statement| statement.to_string())
            .collect::<Vec<String>>();

        write!(f, "{}", statements.join(" "))
    }
}

// statement -> <let> | <return> | <expression-statement>
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let(Let),
    Return(Return),
    Expression(ExpressionStatement),
}

impl<T: Iterator<Item = Spanned>> Parse<T> for Statement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let res = match &parser.current_token {
            Some((_, Token::Let, _)) => Self::Let(Let::parse(parser, None)?),
            Some((_, Token::Return, _)) => Self::Return(Return::parse(parser, None)?),
            Some(_) => Self::Expression(ExpressionStatement::parse(parser, None)?),
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        };

        Ok(res)
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Let(let_) => write!(f, "{let_}"),
            Self::Return(return_) => write!(f, "{return_}"),
            Self::Expression(statement) => write!(f, "{statement}")
        }
    }
}

impl Statement {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Let(let_) => let_.location,
            Self::Return(return_) => return_.location,
            Self::Expression(statement) => statement.location
        }
    }
}

// let -> let <identifier> = <expression> [;]
#[derive(Debug, Clone, PartialEq)]
pub struct Let {
    pub name: Identifier,
    pub value: Expression,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for Let {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let (start, _) = parser.expect_one(Token::Let)?;

        let name = Identifier::from(parser.expect_ident()?);

        parser.expect_one(Token::Assign)?;

        let value = Expression::parse(parser, None)?;
        let end = value.location().end;

        let _ = parser.expect_one(Token::Semicolon);

        Ok(Self {
            name,
            value,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Let {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "let {} = {};", self.name, self.value)
    }
}

// return -> return <expression> [;]
#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    pub value: Expression,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for Return {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let (start, _) = parser.expect_one(Token::Return)?;

        let value = Expression::parse(parser, None)?;
        let end = value.location().end;

        let _ = parser.expect_one(Token::Semicolon);

        Ok(Self {
            value,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Return {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "return {};", self.value)
    }
}

// expression-statement -> <expression> [;]
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for ExpressionStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let expression = Expression::parse(parser, None)?;
        let location = expression.location();

        let _ = parser.expect_one(Token::Semicolon);

        Ok(Self {
            expression,
            location
        })
    }
}

impl Display for ExpressionStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.expression)
    }
}

// block -> { { <statement> } }
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for Block {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let (start, _) = parser.expect_one(Token::LBrace)?;

        let mut statements = vec![];

        loop {
            match &parser.current_token {
                None
                | Some((_, Token::RBrace, _))
                | Some((_, Token::Eof, _)) => break,
                Some((_, Token::Semicolon, _)) => parser.step(),
                Some(_) => statements.push(Statement::parse(parser, None)?)
            }
        }

        let (_, end) = parser.expect_one(Token::RBrace)?;

        Ok(Self {
            statements,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.statements.is_empty() {
            return write!(f, "{{}}");
        }

        let statements = self.statements.iter()
            .map(|statement| statement.to_string())
            .collect::<Vec<String>>();

        write!(f, "{{ {} }}", statements.join(" "))
    }
}

// expression -> <identifier> | <literal> | <prefix> | <infix> | <if>
//             | <function> | <call> | "(" <expression> ")"
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    Str(StringLiteral),
    Boolean(BooleanLiteral),
    Prefix(Prefix),
    Infix(Infix),
    If(If),
    Function(FunctionLiteral),
    Call(Call),
}

impl<T: Iterator<Item = Spanned>> Parse<T> for Expression {
    fn parse(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let mut expression = match &parser.current_token {
            Some((start, token, end)) => match token {
                Token::Ident(_) => Self::Identifier(Identifier::from(parser.expect_ident()?)),
                Token::Int(_) => Self::Integer(IntegerLiteral::parse(parser, None)?),
                Token::Str(_) => Self::Str(StringLiteral::parse(parser, None)?),
                Token::True
                | Token::False => Self::Boolean(BooleanLiteral::parse(parser, None)?),
                Token::Bang
                | Token::Minus => Self::Prefix(Prefix::parse(parser, None)?),
                Token::If => Self::If(If::parse(parser, None)?),
                Token::Function => Self::Function(FunctionLiteral::parse(parser, None)?),
                Token::LParen => {
                    parser.expect_one(Token::LParen)?;

                    let expression = Expression::parse(parser, None)?;

                    parser.expect_one(Token::RParen)?;

                    expression
                },
                Token::Illegal(literal) => return parse_error(
                    ParseErrorType::IllegalToken {
                        literal: literal.clone()
                    },
                    SrcSpan { start: *start, end: *end }
                ),
                _ => return parse_error(
                    ParseErrorType::NoPrefixFunction {
                        token: token.clone()
                    },
                    SrcSpan { start: *start, end: *end }
                )
            },
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        };

        while parser.current_token.as_ref()
            .is_some_and(|token| token.1 != Token::Semicolon) &&
            precedence.unwrap_or(Precedence::Lowest) < parser.current_precedence()
        {
            expression = match &parser.current_token {
                Some((_, next_token, _)) => match next_token {
                    Token::Plus | Token::Minus | Token::Slash |
                    Token::Asterisk | Token::Equal | Token::NotEqual |
                    Token::LessThan | Token::GreaterThan |
                    Token::LessThanOrEqual | Token::GreaterThanOrEqual => {
                        Self::Infix(Infix::parse(parser, expression, precedence)?)
                    },
                    Token::LParen => Self::Call(Call::parse(parser, expression, precedence)?),
                    _ => break
                },
                None => break
            }
        }

        Ok(expression)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier(ident) => write!(f, "{ident}"),
            Self::Integer(literal) => write!(f, "{literal}"),
            Self::Str(literal) => write!(f, "{literal}"),
            Self::Boolean(literal) => write!(f, "{literal}"),
            Self::Prefix(prefix) => write!(f, "{prefix}"),
            Self::Infix(infix) => write!(f, "{infix}"),
            Self::If(if_) => write!(f, "{if_}"),
            Self::Function(function) => write!(f, "{function}"),
            Self::Call(call) => write!(f, "{call}")
        }
    }
}

impl Expression {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Identifier(ident) => ident.location,
            Self::Integer(literal) => literal.location,
            Self::Str(literal) => literal.location,
            Self::Boolean(literal) => literal.location,
            Self::Prefix(prefix) => prefix.location,
            Self::Infix(infix) => infix.location,
            Self::If(if_) => if_.location,
            Self::Function(function) => function.location,
            Self::Call(call) => call.location
        }
    }
}

// identifier -> <letter | _> { <letter> | <digit> | _ }
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub value: String,
    pub location: SrcSpan
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<(u32, String, u32)> for Identifier {
    fn from(value: (u32, String, u32)) -> Self {
        Identifier {
            value: value.1,
            location: SrcSpan { start: value.0, end: value.2 }
        }
    }
}

// integer -> <digit> { <digit> }
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerLiteral {
    pub value: i64,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for IntegerLiteral {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        match parser.next_token() {
            Some((start, Token::Int(literal), end)) => match literal.parse::<i64>() {
                Ok(value) => Ok(Self {
                    value,
                    location: SrcSpan { start, end }
                }),
                Err(_) => parse_error(
                    ParseErrorType::InvalidIntegerLiteral { literal },
                    SrcSpan { start, end }
                )
            },
            Some((start, token, end)) => parse_error(
                ParseErrorType::UnexpectedToken {
                    token,
                    expected: vec!["an integer literal".to_string()]
                },
                SrcSpan { start, end }
            ),
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        }
    }
}

impl Display for IntegerLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

// string -> (' | ") { <character> } (' | ")
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub value: String,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for StringLiteral {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        match parser.next_token() {
            Some((start, Token::Str(value), end)) => Ok(Self {
                value,
                location: SrcSpan { start, end }
            }),
            Some((start, token, end)) => parse_error(
                ParseErrorType::UnexpectedToken {
                    token,
                    expected: vec!["a string literal".to_string()]
                },
                SrcSpan { start, end }
            ),
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        }
    }
}

impl Display for StringLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\"", self.value)
    }
}

// boolean -> true | false
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLiteral {
    pub value: bool,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for BooleanLiteral {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        match parser.next_token() {
            Some((start, Token::True, end)) => Ok(Self {
                value: true,
                location: SrcSpan { start, end }
            }),
            Some((start, Token::False, end)) => Ok(Self {
                value: false,
                location: SrcSpan { start, end }
            }),
            Some((start, token, end)) => parse_error(
                ParseErrorType::UnexpectedToken {
                    token,
                    expected: vec!["`true` or `false`".to_string()]
                },
                SrcSpan { start, end }
            ),
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        }
    }
}

impl Display for BooleanLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

// prefix -> (! | -) <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Prefix {
    pub operator: Token,
    pub right: Box<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for Prefix {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let (start, operator, _) = match parser.next_token() {
            Some(spanned) => spanned,
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        };

        let right = Expression::parse(parser, Some(Precedence::Prefix))?;
        let end = right.location().end;

        Ok(Self {
            operator,
            right: Box::new(right),
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}{})", self.operator.as_literal(), self.right)
    }
}

// infix -> <expression> <operator> <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Infix {
    pub left: Box<Expression>,
    pub operator: Token,
    pub right: Box<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> InfixParse<T> for Infix {
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let precedence = parser.current_precedence();

        let SrcSpan { start, .. } = left.location();

        let operator = match parser.next_token() {
            Some((_, token, _)) if token.is_operator() => token,
            Some((start, token, end)) => return parse_error(
                ParseErrorType::UnexpectedToken {
                    token,
                    expected: vec!["an operator".to_string()]
                },
                SrcSpan { start, end }
            ),
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        };

        let right = Expression::parse(parser, Some(precedence))?;

        let SrcSpan { end, .. } = right.location();

        Ok(Self {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Infix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator.as_literal(), self.right)
    }
}

// if -> if ( <expression> ) <block> [else <block>]
#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub condition: Box<Expression>,
    pub consequence: Block,
    pub alternative: Option<Block>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for If {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let (start, _) = parser.expect_one(Token::If)?;

        parser.expect_one(Token::LParen)?;

        let condition = Expression::parse(parser, None)?;

        parser.expect_one(Token::RParen)?;

        let consequence = Block::parse(parser, None)?;
        let mut end = consequence.location.end;

        let alternative = match parser.expect_one(Token::Else) {
            Ok(_) => {
                let alternative = Block::parse(parser, None)?;

                end = alternative.location.end;

                Some(alternative)
            },
            Err(_) => None
        };

        Ok(Self {
            condition: Box::new(condition),
            consequence,
            alternative,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for If {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "if ({}) {}", self.condition, self.consequence)?;

        if let Some(alternative) = &self.alternative {
            write!(f, " else {alternative}")?;
        }

        Ok(())
    }
}

// function -> function ( [<identifier> {, <identifier>}] ) <block>
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteral {
    pub parameters: Vec<Identifier>,
    pub body: Block,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for FunctionLiteral {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let (start, _) = parser.expect_one(Token::Function)?;

        parser.expect_one(Token::LParen)?;

        let (parameters, _) = parser.parse_series(
            |parser| parser.expect_ident().map(Identifier::from),
            Token::RParen
        )?;

        let body = Block::parse(parser, None)?;
        let end = body.location.end;

        Ok(Self {
            parameters,
            body,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for FunctionLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parameters = self.parameters.iter()
            .map(|parameter| parameter.to_string())
            .collect::<Vec<String>>();

        write!(f, "function({}) {}", parameters.join(", "), self.body)
    }
}

// call -> <expression> ( [<expression> {, <expression>}] )
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> InfixParse<T> for Call {
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        _precedence: Option<Precedence>
    ) -> Result<Self, crate::parser::prelude::ParseError> {
        let SrcSpan { start, .. } = left.location();

        parser.expect_one(Token::LParen)?;

        let (arguments, end) = parser.parse_series(
            |parser| Expression::parse(parser, None),
            Token::RParen
        )?;

        Ok(Self {
            function: Box::new(left),
            arguments,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Call {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arguments = self.arguments.iter()
            .map(|argument| argument.to_string())
            .collect::<Vec<String>>();

        write!(f, "{}({})", self.function, arguments.join(", "))
    }
}
