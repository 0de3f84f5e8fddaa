use super::scanner::Scanner;
use super::token::Token;

pub type Spanned = (u32, Token, u32);

pub fn str_to_keyword(word: &str) -> Option<Token> {
    Some(match word {
        "let" => Token::Let,
        "function" => Token::Function,
        "return" => Token::Return,
        "if" => Token::If,
        "else" => Token::Else,
        "true" => Token::True,
        "false" => Token::False,

        "while" | "for" => Token::Loop,
        "class" => Token::Class,
        "public" => Token::Public,
        "protected" => Token::Protected,
        "private" => Token::Private,
        "static" => Token::Static,
        "abstract" => Token::Abstract,
        "extends" => Token::Extends,
        "in" => Token::In,
        "const" => Token::Const,
        "self" => Token::SelfKw,
        "super" => Token::Super,
        "and" => Token::And,
        "or" => Token::Or,

        _ => return None
    })
}

/// Streaming tokenizer. Character reads are delegated to [`Scanner`]; this
/// layer only decides token kinds: keyword lookup, one- versus two-character
/// operator disambiguation and the EOF sentinel.
///
/// Malformed input never aborts the lexer; it comes out as [`Token::Illegal`]
/// and is reported by the parser.
#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
    scanner: Scanner<T>,
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
    pub fn new(input: T) -> Self {
        Self {
            scanner: Scanner::new(input)
        }
    }

    pub fn next_token(&mut self) -> Spanned {
        self.scanner.skip_trivia();

        match self.scanner.ch() {
            // zero-width span at the end of input, repeatable indefinitely
            None => {
                let position = self.scanner.position();

                (position, Token::Eof, position)
            },
            Some(ch) => match ch {
                '+' => self.eat_one_char(Token::Plus),
                '-' => self.eat_one_char(Token::Minus),
                '*' => self.eat_one_char(Token::Asterisk),
                '/' => self.eat_one_char(Token::Slash),
                '(' => self.eat_one_char(Token::LParen),
                ')' => self.eat_one_char(Token::RParen),
                '{' => self.eat_one_char(Token::LBrace),
                '}' => self.eat_one_char(Token::RBrace),
                ',' => self.eat_one_char(Token::Comma),
                ';' => self.eat_one_char(Token::Semicolon),

                '=' => self.eat_two_char_if('=', Token::Equal, Token::Assign),
                '!' => self.eat_two_char_if('=', Token::NotEqual, Token::Bang),
                '<' => self.eat_two_char_if('=', Token::LessThanOrEqual, Token::LessThan),
                '>' => self.eat_two_char_if('=', Token::GreaterThanOrEqual, Token::GreaterThan),

                '"' | '\'' => self.lex_string(),
                'a'..='z' | 'A'..='Z' | '_' => self.lex_ident(),
                '0'..='9' => self.lex_number(),

                ch => self.eat_one_char(Token::Illegal(ch.to_string()))
            }
        }
    }

    fn eat_one_char(&mut self, token: Token) -> Spanned {
        let start = self.scanner.position();
        self.scanner.next_char();
        let end = self.scanner.position();

        (start, token, end)
    }

    fn eat_two_char_if(&mut self, expected: char, two: Token, one: Token) -> Spanned {
        let start = self.scanner.position();
        self.scanner.next_char();

        let token = if self.scanner.ch() == Some(expected) {
            self.scanner.next_char();
            two
        } else {
            one
        };

        let end = self.scanner.position();

        (start, token, end)
    }

    fn lex_ident(&mut self) -> Spanned {
        let start = self.scanner.position();
        let ident = self.scanner.read_identifier();
        let end = self.scanner.position();

        let token = match str_to_keyword(&ident) {
            Some(token) => token,
            None => Token::Ident(ident)
        };

        (start, token, end)
    }

    fn lex_number(&mut self) -> Spanned {
        let start = self.scanner.position();
        let number = self.scanner.read_number();
        let end = self.scanner.position();

        // the literal domain is integers only; a scanned-through decimal
        // point surfaces as a single bad token instead of two valid ones
        let token = if number.contains('.') {
            Token::Illegal(number)
        } else {
            Token::Int(number)
        };

        (start, token, end)
    }

    fn lex_string(&mut self) -> Spanned {
        let start = self.scanner.position();
        let (text, closed) = self.scanner.read_string();
        let end = self.scanner.position();

        let token = if closed {
            Token::Str(text)
        } else {
            Token::Illegal(text)
        };

        (start, token, end)
    }
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
    type Item = Spanned;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_token())
    }
}
