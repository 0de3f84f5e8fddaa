use std::{cell::RefCell, io::Write, rc::Rc};

use ember_core::{
    environment::prelude::{Environment, Value},
    eval::prelude::eval,
    parser::prelude::parse_module
};

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
    let stdin = std::io::stdin();
    let env = Rc::new(RefCell::new(Environment::new()));

    loop {
        let mut input = String::from("");

        print!("{}", PROMPT);
        std::io::stdout().flush()?;

        if stdin.read_line(&mut input)? == 0 {
            return Ok(());
        }

        if let Some('\n') = input.chars().next_back() {
            input.pop();
        }
        if let Some('\r') = input.chars().next_back() {
            input.pop();
        }

        match input.as_str() {
            "" => {},
            ".exit" => return Ok(()),
            _ => match parse_module(&input) {
                Ok(program) => match eval(&program, env.clone()) {
                    Value::Null => {},
                    value => println!("{value}")
                },
                Err(errors) => {
                    for error in errors {
                        let (message, extra) = error.details();

                        println!("Parse error: {message}");
                        if !extra.is_empty() {
                            println!("\t{}", extra.join("\n\t"));
                        }
                    }
                }
            }
        }
    }
}
