pub mod builtins;
pub mod eval;

pub mod prelude {
    pub use super::{
        eval::*
    };
}


use std::{cell::RefCell, path::PathBuf, rc::Rc};

use utf8_chars::BufReadCharsExt;

use crate::{
    environment::prelude::{Environment, Value},
    parser::prelude::{parse_module, parse_module_from_stream},
    utils::prelude::Error
};

/// Interprets a source string. A non-empty diagnostic list suppresses
/// evaluation; a clean parse is evaluated against a fresh root environment.
pub fn interpret(src: &str) -> Result<Value, Error> {
    let program = match parse_module(src) {
        Ok(program) => program,
        Err(errors) => {
            return Err(Error::Parse {
                path: PathBuf::new(),
                src: src.to_string(),
                errors
            })
        }
    };

    let env = Rc::new(RefCell::new(Environment::new()));

    Ok(eval::eval(&program, env))
}

/// Interprets a source file without loading it into memory first; the lexer
/// consumes the file as a character stream.
pub fn run_from_stream(path: PathBuf, print_ast: bool) -> Result<Value, Error> {
    let file = match std::fs::File::open(path.clone()) {
        Ok(file) => file,
        Err(err) => {
            return Err(Error::StdIo { err: err.kind() })
        }
    };

    let file_size = file.metadata()
        .map_err(|err| Error::StdIo { err: err.kind() })?.len() as usize;

    let mut src = String::with_capacity(file_size);
    let mut reader = std::io::BufReader::new(file);
    let stream = reader.chars()
        .map(|c| {
            let c = c.expect("source file is not valid utf-8");
            src.push(c);
            c
        });

    let program = match parse_module_from_stream(stream) {
        Ok(program) => program,
        Err(errors) => {
            return Err(Error::Parse { path, src, errors })
        }
    };

    if print_ast {
        println!("{program:#?}");
    }

    let env = Rc::new(RefCell::new(Environment::new()));

    Ok(eval::eval(&program, env))
}
