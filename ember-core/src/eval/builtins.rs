use crate::environment::prelude::{Builtin, Value, NULL};

/// Fixed table of native functions, consulted after an environment miss.
pub fn lookup(name: &str) -> Option<Value> {
    let builtin = match name {
        "len" => Builtin { name: "len", func: len },
        "puts" => Builtin { name: "puts", func: puts },
        "type" => Builtin { name: "type", func: type_of },
        _ => return None
    };

    Some(Value::Builtin(builtin))
}

fn len(arguments: Vec<Value>) -> Value {
    if arguments.len() != 1 {
        return Value::Error {
            message: format!("wrong number of arguments. got={}, want=1", arguments.len())
        };
    }

    match &arguments[0] {
        Value::String { value } => Value::Integer {
            value: value.chars().count() as i64
        },
        other => Value::Error {
            message: format!("argument to `len` not supported, got {}", other.value_type())
        }
    }
}

fn puts(arguments: Vec<Value>) -> Value {
    for argument in &arguments {
        println!("{argument}");
    }

    NULL
}

fn type_of(arguments: Vec<Value>) -> Value {
    if arguments.len() != 1 {
        return Value::Error {
            message: format!("wrong number of arguments. got={}, want=1", arguments.len())
        };
    }

    Value::String {
        value: arguments[0].value_type().to_string()
    }
}
