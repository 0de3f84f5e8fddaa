mod cli;
mod repl;
mod rlpl;
mod rppl;

use std::path::PathBuf;

use clap::Parser;
use ember_core::{
    environment::prelude::Value,
    eval::run_from_stream
};

#[derive(Parser)]
enum Command {
    /// Parses and evaluates a source file
    Run {
        /// Path of source file
        path: PathBuf,
        /// Do not print the resulting value
        #[arg(short, long, default_value_t = false)]
        no_output: bool,
        /// Print the parsed program before evaluating
        #[arg(long, default_value_t = false)]
        print_ast: bool,
    },
    /// Runs Read Eval Print Loop
    Repl,
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Parse Print Loop
    Rppl
}

fn main() {
    ctrlc::set_handler(|| std::process::exit(0))
        .expect("Setting Ctrl-C handler");

    match Command::parse() {
        Command::Run { path, no_output, print_ast } => {
            let buf_writer = cli::stderr_buffer_writer();
            let mut buf = buf_writer.buffer();

            cli::print_running(path.to_str().unwrap_or_default());
            let start = std::time::Instant::now();

            match run_from_stream(path, print_ast) {
                Ok(value) => {
                    if !no_output && value != Value::Null {
                        println!("{value}");
                    }
                },
                Err(err) => {
                    err.pretty(&mut buf);
                    buf_writer
                        .print(&buf)
                        .expect("Writing error to stderr");
                }
            }

            cli::print_evaluated(std::time::Instant::now() - start);
        },
        Command::Repl => {
            let _ = repl::start();
        },
        Command::Rlpl => {
            let _ = rlpl::start();
        },
        Command::Rppl => {
            let _ = rppl::start();
        }
    }
}
