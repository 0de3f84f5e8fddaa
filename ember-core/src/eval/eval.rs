use std::{cell::RefCell, rc::Rc};

use crate::{
    environment::prelude::{Environment, Function, Value, ValueType, FALSE, NULL, TRUE},
    lexer::prelude::Token,
    parser::prelude::{
        Block, Call, Expression, Identifier, If, Infix, Prefix, Program, Statement
    },
};

use super::builtins;

/// Evaluates a parsed program against the given root environment and returns
/// the value of its last statement.
///
/// Evaluation is plain recursion over the tree. Deeply nested expressions or
/// unbounded recursive calls exhaust the host call stack; that is the one
/// abnormal failure mode. Every expected failure — bad operands, unknown
/// identifiers, division by zero, arity mismatches — comes back as a
/// [`Value::Error`] flowing through the same path as ordinary results.
pub fn eval(program: &Program, env: Rc<RefCell<Environment>>) -> Value {
    let mut result = NULL;

    for statement in &program.statements {
        match eval_statement(statement, env.clone()) {
            // a program-level return ends the evaluation, unwrapped
            Value::Return { value } => return *value,
            error @ Value::Error { .. } => return error,
            value => result = value
        }
    }

    result
}

fn eval_statement(statement: &Statement, env: Rc<RefCell<Environment>>) -> Value {
    match statement {
        Statement::Let(let_) => {
            let value = eval_expression(&let_.value, env.clone());

            if value.is_error() {
                return value;
            }

            env.borrow_mut().set(let_.name.value.clone(), value.clone());

            value
        },
        Statement::Return(return_) => {
            let value = eval_expression(&return_.value, env);

            if value.is_error() {
                return value;
            }

            Value::Return { value: Box::new(value) }
        },
        Statement::Expression(statement) => eval_expression(&statement.expression, env)
    }
}

// A block result stays wrapped: `Return` and `Error` keep propagating up
// through nested blocks until a call boundary (or the program) unwraps them.
fn eval_block(block: &Block, env: Rc<RefCell<Environment>>) -> Value {
    let mut result = NULL;

    for statement in &block.statements {
        result = eval_statement(statement, env.clone());

        if matches!(result, Value::Return { .. } | Value::Error { .. }) {
            return result;
        }
    }

    result
}

fn eval_expression(expression: &Expression, env: Rc<RefCell<Environment>>) -> Value {
    match expression {
        Expression::Integer(literal) => Value::Integer { value: literal.value },
        Expression::Str(literal) => Value::String { value: literal.value.clone() },
        Expression::Boolean(literal) => bool_value(literal.value),
        Expression::Identifier(ident) => eval_identifier(ident, env),
        Expression::Prefix(prefix) => eval_prefix(prefix, env),
        Expression::Infix(infix) => eval_infix(infix, env),
        Expression::If(if_) => eval_conditional(if_, env),
        Expression::Function(literal) => Value::Function(Rc::new(Function {
            parameters: literal.parameters.clone(),
            body: literal.body.clone(),
            env
        })),
        Expression::Call(call) => eval_call(call, env)
    }
}

fn eval_identifier(ident: &Identifier, env: Rc<RefCell<Environment>>) -> Value {
    match env.borrow().get(&ident.value) {
        Some(value) => value,
        None => match builtins::lookup(&ident.value) {
            Some(builtin) => builtin,
            None => new_error(format!("identifier not found: {}", ident.value))
        }
    }
}

fn eval_prefix(prefix: &Prefix, env: Rc<RefCell<Environment>>) -> Value {
    let right = eval_expression(&prefix.right, env);

    if right.is_error() {
        return right;
    }

    match &prefix.operator {
        Token::Bang => eval_bang(right),
        Token::Minus => match right {
            Value::Integer { value } => Value::Integer { value: -value },
            other => new_error(format!("unknown operator: -{}", other.value_type()))
        },
        operator => new_error(format!(
            "unknown operator: {}{}",
            operator.as_literal(),
            right.value_type()
        ))
    }
}

// The falsy set is exactly {null, false}; everything else negates to false,
// whatever its type.
fn eval_bang(value: Value) -> Value {
    match value {
        Value::Boolean { value: false } | Value::Null => TRUE,
        _ => FALSE
    }
}

fn eval_infix(infix: &Infix, env: Rc<RefCell<Environment>>) -> Value {
    let left = eval_expression(&infix.left, env.clone());

    if left.is_error() {
        return left;
    }

    let right = eval_expression(&infix.right, env);

    if right.is_error() {
        return right;
    }

    let operator = &infix.operator;

    match (&left, &right) {
        (
            Value::Integer { value: left },
            Value::Integer { value: right }
        ) => eval_integer_infix(operator, *left, *right),
        (
            Value::String { value: left },
            Value::String { value: right }
        ) => eval_string_infix(operator, left, right),
        _ => match operator {
            // identity comparison: meaningful for the interned boolean/null
            // singletons, always unequal across distinct heap values
            Token::Equal => bool_value(values_identical(&left, &right)),
            Token::NotEqual => bool_value(!values_identical(&left, &right)),
            _ if left.value_type() != right.value_type() => new_error(format!(
                "type mismatch: {} {} {}",
                left.value_type(),
                operator.as_literal(),
                right.value_type()
            )),
            _ => new_error(format!(
                "unknown operator: {} {} {}",
                left.value_type(),
                operator.as_literal(),
                right.value_type()
            ))
        }
    }
}

fn eval_integer_infix(operator: &Token, left: i64, right: i64) -> Value {
    match operator {
        Token::Plus => Value::Integer { value: left + right },
        Token::Minus => Value::Integer { value: left - right },
        Token::Asterisk => Value::Integer { value: left * right },
        Token::Slash => {
            if right == 0 {
                return new_error("division by zero".to_string());
            }

            // truncating division
            Value::Integer { value: left / right }
        },
        Token::LessThan => bool_value(left < right),
        Token::LessThanOrEqual => bool_value(left <= right),
        Token::GreaterThan => bool_value(left > right),
        Token::GreaterThanOrEqual => bool_value(left >= right),
        Token::Equal => bool_value(left == right),
        Token::NotEqual => bool_value(left != right),
        _ => new_error(format!(
            "unknown operator: {} {} {}",
            ValueType::Integer,
            operator.as_literal(),
            ValueType::Integer
        ))
    }
}

fn eval_string_infix(operator: &Token, left: &str, right: &str) -> Value {
    match operator {
        Token::Plus => Value::String { value: format!("{left}{right}") },
        Token::Equal => bool_value(left == right),
        Token::NotEqual => bool_value(left != right),
        _ => new_error(format!(
            "unknown operator: {} {} {}",
            ValueType::String,
            operator.as_literal(),
            ValueType::String
        ))
    }
}

fn values_identical(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Boolean { value: left }, Value::Boolean { value: right }) => left == right,
        (Value::Null, Value::Null) => true,
        (Value::Function(left), Value::Function(right)) => Rc::ptr_eq(left, right),
        (Value::Builtin(left), Value::Builtin(right)) => left.name == right.name,
        _ => false
    }
}

fn eval_conditional(conditional: &If, env: Rc<RefCell<Environment>>) -> Value {
    let condition = eval_expression(&conditional.condition, env.clone());

    if condition.is_error() {
        return condition;
    }

    if is_truthy(&condition) {
        eval_block(&conditional.consequence, env)
    } else {
        match &conditional.alternative {
            Some(alternative) => eval_block(alternative, env),
            None => NULL
        }
    }
}

fn eval_call(call: &Call, env: Rc<RefCell<Environment>>) -> Value {
    let callee = eval_expression(&call.function, env.clone());

    if callee.is_error() {
        return callee;
    }

    let mut arguments = Vec::with_capacity(call.arguments.len());

    for argument in &call.arguments {
        let value = eval_expression(argument, env.clone());

        if value.is_error() {
            return value;
        }

        arguments.push(value);
    }

    apply_function(callee, arguments)
}

fn apply_function(callee: Value, arguments: Vec<Value>) -> Value {
    match callee {
        Value::Function(function) => {
            if function.parameters.len() != arguments.len() {
                return new_error(format!(
                    "wrong number of arguments: expected {}, got {}",
                    function.parameters.len(),
                    arguments.len()
                ));
            }

            // fresh frame enclosing the captured environment, parameters
            // bound positionally
            let mut scope = Environment::new_enclosed(function.env.clone());

            for (parameter, argument) in function.parameters.iter().zip(arguments) {
                scope.set(parameter.value.clone(), argument);
            }

            let result = eval_block(&function.body, Rc::new(RefCell::new(scope)));

            unwrap_return(result)
        },
        Value::Builtin(builtin) => (builtin.func)(arguments),
        other => new_error(format!("not a function: {}", other.value_type()))
    }
}

fn unwrap_return(value: Value) -> Value {
    match value {
        Value::Return { value } => *value,
        value => value
    }
}

fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Boolean { value: false })
}

fn bool_value(value: bool) -> Value {
    if value {
        TRUE
    } else {
        FALSE
    }
}

fn new_error(message: String) -> Value {
    Value::Error { message }
}
