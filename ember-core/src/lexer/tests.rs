use super::prelude::{Lexer, Token};

fn assert_tokens(input: &str, tokens: Vec<Token>) {
    let mut lexer = Lexer::new(input.char_indices().map(|(i, c)| (i as u32, c)));

    for (idx, token) in tokens.iter().enumerate() {
        let (_, next_token, _) = lexer.next_token();

        assert_eq!(
            *token, next_token,
            "Next token does not match expected token ({:?}, {:?}) at {}",
            next_token, token, idx
        );
    }
}

#[test]
fn test_operators_and_delimiters() {
    let input = "= + - * / ! == != < <= > >= , ; ( ) { }";

    assert_tokens(input, vec![
        Token::Assign,
        Token::Plus,
        Token::Minus,
        Token::Asterisk,
        Token::Slash,
        Token::Bang,
        Token::Equal,
        Token::NotEqual,
        Token::LessThan,
        Token::LessThanOrEqual,
        Token::GreaterThan,
        Token::GreaterThanOrEqual,
        Token::Comma,
        Token::Semicolon,
        Token::LParen,
        Token::RParen,
        Token::LBrace,
        Token::RBrace,
        Token::Eof,
    ]);
}

#[test]
fn test_two_char_operators_unspaced() {
    assert_tokens("a<=b>=c==d!=e=f", vec![
        Token::Ident(String::from("a")),
        Token::LessThanOrEqual,
        Token::Ident(String::from("b")),
        Token::GreaterThanOrEqual,
        Token::Ident(String::from("c")),
        Token::Equal,
        Token::Ident(String::from("d")),
        Token::NotEqual,
        Token::Ident(String::from("e")),
        Token::Assign,
        Token::Ident(String::from("f")),
        Token::Eof,
    ]);
}

#[test]
fn test_keywords() {
    let input = "let function return if else while for class public \
        protected private static abstract extends in const true false \
        self super and or letter";

    assert_tokens(input, vec![
        Token::Let,
        Token::Function,
        Token::Return,
        Token::If,
        Token::Else,
        Token::Loop,
        Token::Loop,
        Token::Class,
        Token::Public,
        Token::Protected,
        Token::Private,
        Token::Static,
        Token::Abstract,
        Token::Extends,
        Token::In,
        Token::Const,
        Token::True,
        Token::False,
        Token::SelfKw,
        Token::Super,
        Token::And,
        Token::Or,
        // prefix of a keyword is still an identifier
        Token::Ident(String::from("letter")),
        Token::Eof,
    ]);
}

#[test]
fn test_identifiers_and_numbers() {
    assert_tokens("foo _bar baz9 x 10 007", vec![
        Token::Ident(String::from("foo")),
        Token::Ident(String::from("_bar")),
        Token::Ident(String::from("baz9")),
        Token::Ident(String::from("x")),
        Token::Int(String::from("10")),
        Token::Int(String::from("007")),
        Token::Eof,
    ]);
}

#[test]
fn test_decimal_literal_is_illegal() {
    assert_tokens("1.5 + 2", vec![
        Token::Illegal(String::from("1.5")),
        Token::Plus,
        Token::Int(String::from("2")),
        Token::Eof,
    ]);
}

#[test]
fn test_strings() {
    let input = r#"'hello' "world" 'it\'s' "a\tb\nc" '\\'"#;

    assert_tokens(input, vec![
        Token::Str(String::from("hello")),
        Token::Str(String::from("world")),
        Token::Str(String::from("it's")),
        Token::Str(String::from("a\tb\nc")),
        Token::Str(String::from("\\")),
        Token::Eof,
    ]);
}

#[test]
fn test_quotes_do_not_match_each_other() {
    assert_tokens(r#"'a" b'"#, vec![
        Token::Str(String::from("a\" b")),
        Token::Eof,
    ]);
}

#[test]
fn test_unterminated_string_is_illegal() {
    assert_tokens("'never closed", vec![
        Token::Illegal(String::from("never closed")),
        Token::Eof,
    ]);
}

#[test]
fn test_comments_are_skipped() {
    let input = r#"
        1 // rest of the line
        /* block
           spanning lines */ 2
        3 /* unterminated
    "#;

    assert_tokens(input, vec![
        Token::Int(String::from("1")),
        Token::Int(String::from("2")),
        Token::Int(String::from("3")),
        Token::Eof,
    ]);
}

#[test]
fn test_unknown_character_is_illegal() {
    assert_tokens("1 @ 2", vec![
        Token::Int(String::from("1")),
        Token::Illegal(String::from("@")),
        Token::Int(String::from("2")),
        Token::Eof,
    ]);
}

#[test]
fn test_eof_is_idempotent() {
    let mut lexer = Lexer::new("x".char_indices().map(|(i, c)| (i as u32, c)));

    let (_, token, _) = lexer.next_token();
    assert_eq!(token, Token::Ident(String::from("x")));

    for _ in 0..3 {
        let (_, token, _) = lexer.next_token();
        assert_eq!(token, Token::Eof);
    }
}

#[test]
fn test_spans() {
    let mut lexer = Lexer::new("let x = 5;".char_indices().map(|(i, c)| (i as u32, c)));

    let expected = vec![
        (0, Token::Let, 3),
        (4, Token::Ident(String::from("x")), 5),
        (6, Token::Assign, 7),
        (8, Token::Int(String::from("5")), 9),
        (9, Token::Semicolon, 10),
    ];

    for spanned in expected {
        assert_eq!(spanned, lexer.next_token());
    }
}

#[test]
fn test_program_snippet() {
    let input = r#"
        let add = function(a, b) {
            return a + b;
        };

        if (add(1, 2) >= 3) { 'yes' } else { 'no' }
    "#;

    assert_tokens(input, vec![
        Token::Let,
        Token::Ident(String::from("add")),
        Token::Assign,
        Token::Function,
        Token::LParen,
        Token::Ident(String::from("a")),
        Token::Comma,
        Token::Ident(String::from("b")),
        Token::RParen,
        Token::LBrace,
        Token::Return,
        Token::Ident(String::from("a")),
        Token::Plus,
        Token::Ident(String::from("b")),
        Token::Semicolon,
        Token::RBrace,
        Token::Semicolon,
        Token::If,
        Token::LParen,
        Token::Ident(String::from("add")),
        Token::LParen,
        Token::Int(String::from("1")),
        Token::Comma,
        Token::Int(String::from("2")),
        Token::RParen,
        Token::GreaterThanOrEqual,
        Token::Int(String::from("3")),
        Token::RParen,
        Token::LBrace,
        Token::Str(String::from("yes")),
        Token::RBrace,
        Token::Else,
        Token::LBrace,
        Token::Str(String::from("no")),
        Token::RBrace,
        Token::Eof,
    ]);
}
