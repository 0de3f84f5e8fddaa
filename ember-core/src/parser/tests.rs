use pretty_assertions::assert_eq;

use crate::lexer::prelude::{Lexer, Token};
use super::prelude::{parse_module, Expression, ParseErrorType, Parser, Statement};

fn new_parser(input: &str) -> Parser<Lexer<impl Iterator<Item = (u32, char)> + '_>> {
    Parser::new(Lexer::new(input.char_indices().map(|(i, c)| (i as u32, c))))
}

#[test]
fn test_let_statements() {
    let program = parse_module("let x = 5; let y = x + 1;").expect("should parse");

    assert_eq!(program.statements.len(), 2);

    let names = program.statements.iter()
        .map(|statement| match statement {
            Statement::Let(let_) => let_.name.value.clone(),
            other => panic!("expected let statement, got {other:?}")
        })
        .collect::<Vec<String>>();

    assert_eq!(names, vec!["x".to_string(), "y".to_string()]);
    assert_eq!(program.to_string(), "let x = 5; let y = (x + 1);");
}

#[test]
fn test_return_statements() {
    let program = parse_module("return 5; return a + b;").expect("should parse");

    assert_eq!(program.statements.len(), 2);
    assert!(program.statements.iter().all(|statement| matches!(statement, Statement::Return(_))));
    assert_eq!(program.to_string(), "return 5; return (a + b);");
}

#[test]
fn test_operator_precedence() {
    let cases = vec![
        ("5 + 5 * 2;", "(5 + (5 * 2))"),
        ("(5 + 5) * 2;", "((5 + 5) * 2)"),
        ("a + b - c;", "((a + b) - c)"),
        ("a * b / c;", "((a * b) / c)"),
        ("-a * b;", "((-a) * b)"),
        ("!true;", "(!true)"),
        ("!!false;", "(!(!false))"),
        ("a + b * c + d / e - f;", "(((a + (b * c)) + (d / e)) - f)"),
        ("5 > 4 == 3 < 4;", "((5 > 4) == (3 < 4))"),
        ("5 <= 4 != 3 >= 4;", "((5 <= 4) != (3 >= 4))"),
        ("1 + 2 == 3;", "((1 + 2) == 3)"),
        ("-(5 + 5);", "(-(5 + 5))"),
        ("a + add(b * c) + d;", "((a + add((b * c))) + d)"),
        ("f(x)(y);", "f(x)(y)"),
        ("add(a, b, 1, 2 * 3);", "add(a, b, 1, (2 * 3))"),
    ];

    for (input, expected) in cases {
        let program = parse_module(input)
            .unwrap_or_else(|errors| panic!("{input} should parse, got {errors:?}"));

        assert_eq!(program.to_string(), expected, "on input {input}");
    }
}

#[test]
fn test_integer_and_string_literals() {
    let program = parse_module("42; 'hello';").expect("should parse");

    match &program.statements[0] {
        Statement::Expression(statement) => match &statement.expression {
            Expression::Integer(literal) => assert_eq!(literal.value, 42),
            other => panic!("expected integer literal, got {other:?}")
        },
        other => panic!("expected expression statement, got {other:?}")
    }

    match &program.statements[1] {
        Statement::Expression(statement) => match &statement.expression {
            Expression::Str(literal) => assert_eq!(literal.value, "hello"),
            other => panic!("expected string literal, got {other:?}")
        },
        other => panic!("expected expression statement, got {other:?}")
    }
}

#[test]
fn test_if_expression() {
    let program = parse_module("if (x < y) { x } else { y }").expect("should parse");

    assert_eq!(program.to_string(), "if ((x < y)) { x } else { y }");

    let program = parse_module("if (x) { 1 }").expect("should parse");

    match &program.statements[0] {
        Statement::Expression(statement) => match &statement.expression {
            Expression::If(if_) => assert!(if_.alternative.is_none()),
            other => panic!("expected if expression, got {other:?}")
        },
        other => panic!("expected expression statement, got {other:?}")
    }
}

#[test]
fn test_function_literal() {
    let program = parse_module("function(a, b) { return a + b; };").expect("should parse");

    match &program.statements[0] {
        Statement::Expression(statement) => match &statement.expression {
            Expression::Function(function) => {
                let parameters = function.parameters.iter()
                    .map(|parameter| parameter.value.clone())
                    .collect::<Vec<String>>();

                assert_eq!(parameters, vec!["a".to_string(), "b".to_string()]);
                assert_eq!(function.body.statements.len(), 1);
            },
            other => panic!("expected function literal, got {other:?}")
        },
        other => panic!("expected expression statement, got {other:?}")
    }

    assert_eq!(program.to_string(), "function(a, b) { return (a + b); }");

    let program = parse_module("function() {};").expect("should parse");

    assert_eq!(program.to_string(), "function() {}");
}

#[test]
fn test_call_expression() {
    let program = parse_module("add(1, 2 * 3, other(4));").expect("should parse");

    match &program.statements[0] {
        Statement::Expression(statement) => match &statement.expression {
            Expression::Call(call) => {
                assert_eq!(call.arguments.len(), 3);
                assert!(matches!(*call.function, Expression::Identifier(_)));
            },
            other => panic!("expected call expression, got {other:?}")
        },
        other => panic!("expected expression statement, got {other:?}")
    }
}

#[test]
fn test_missing_assign_yields_one_diagnostic() {
    let mut parser = new_parser("let x 5;");

    let (program, errors) = parser.parse_program();

    // the parser must make forward progress and stop: exactly one
    // diagnostic, no statements, no hang
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].error, ParseErrorType::UnexpectedToken { .. }));
    assert_eq!(program.statements.len(), 0);
}

#[test]
fn test_parsing_continues_past_failures() {
    let mut parser = new_parser("let x 5; let y = 2; let z ==;");

    let (program, errors) = parser.parse_program();

    assert_eq!(errors.len(), 2);
    assert_eq!(program.statements.len(), 1);
    assert_eq!(program.to_string(), "let y = 2;");
}

#[test]
fn test_stray_semicolons_are_skipped() {
    let mut parser = new_parser(";; 5; ;; 6;");

    let (program, errors) = parser.parse_program();

    assert_eq!(errors.len(), 0);
    assert_eq!(program.statements.len(), 2);
}

#[test]
fn test_illegal_token_is_reported() {
    let errors = parse_module("let x = 1.5;").expect_err("should not parse");

    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].error,
        ParseErrorType::IllegalToken { literal: "1.5".to_string() }
    );
}

#[test]
fn test_integer_literal_out_of_range() {
    let errors = parse_module("92233720368547758080;").expect_err("should not parse");

    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].error, ParseErrorType::InvalidIntegerLiteral { .. }));
}

#[test]
fn test_reserved_words_have_no_expression_rules() {
    let errors = parse_module("class;").expect_err("should not parse");

    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].error,
        ParseErrorType::NoPrefixFunction { token: Token::Class }
    );
}

#[test]
fn test_unterminated_block_is_reported() {
    let errors = parse_module("if (x) { 1").expect_err("should not parse");

    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].error, ParseErrorType::UnexpectedToken { .. }));
}

#[test]
fn test_pretty_print_round_trip() {
    let inputs = vec![
        "let answer = 6 * 7;",
        "let greet = function(name) { return 'hello ' + name; };",
        "if (a <= b) { a } else { b }",
        "add(1, 2)(3);",
    ];

    for input in inputs {
        let program = parse_module(input).expect("original should parse");
        let printed = program.to_string();

        let reparsed = parse_module(&printed)
            .unwrap_or_else(|errors| panic!("printed form `{printed}` should reparse, got {errors:?}"));

        // the printed form is normalized, so spans differ; the reprinted
        // text has to be a fixed point
        assert_eq!(printed, reparsed.to_string(), "on input {input}");
    }
}
