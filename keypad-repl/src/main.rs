mod cli;
mod error;
mod keys;
mod logging;

use clap::Parser;
use cli::Args;
use error::Error;
use keypad_engine::{CalculatorState, Engine, EngineOptionsBuilder, Input};
use keys::{parse_line, Command};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs::File, io::{self, BufReader, IsTerminal, Read}, path::PathBuf};
use tracing::debug;

/// Prints the expression and its preview, the result, or the error message.
fn print_state(engine: &mut Engine) {
    let memory = if engine.state().memory().is_some() { "M " } else { "" };
    match engine.state() {
        CalculatorState::Result { expression, result, .. } => {
            println!("{}{} = {}", memory, expression, result);
            return;
        },
        state @ CalculatorState::Error { .. } => {
            println!("{}{}", memory, state.display_text());
            return;
        },
        _ => {},
    }

    let preview = engine.preview();
    match (&preview.symbolic, &preview.decimal) {
        (Some(symbolic), Some(decimal)) if symbolic != decimal => {
            println!("{}{}  = {} ≈ {}", memory, preview.expression, symbolic, decimal)
        },
        (_, Some(decimal)) => println!("{}{}  ≈ {}", memory, preview.expression, decimal),
        _ => println!("{}{}", memory, preview.expression),
    }
}

/// Feeds one line of keys to the engine. An empty line is the return key.
fn run_line(line: &str, engine: &mut Engine) -> Result<(), Error> {
    let commands = if line.trim().is_empty() {
        vec![Command::Key(Input::Return)]
    } else {
        parse_line(line)?
    };

    for command in commands {
        match command {
            Command::Key(input) => {
                if !engine.press(input) {
                    debug!(%input, "key had no effect");
                }
            },
            Command::Why => match engine.explain() {
                Some((normalized, err)) => err.report_to_stderr("input", &normalized),
                None => println!("nothing to explain"),
            },
        }
    }

    Ok(())
}

/// Runs every line of a script, printing the state after each one.
fn run_script(input: &str, engine: &mut Engine) {
    for line in input.lines() {
        match run_line(line, engine) {
            Ok(()) => print_state(engine),
            Err(err) => err.report_to_stderr(line),
        }
    }
}

fn process_line(rl: &mut DefaultEditor, engine: &mut Engine) -> Result<(), Error> {
    let input = rl.readline("> ")?;
    if !input.trim().is_empty() {
        rl.add_history_entry(&input)?;
    }

    if let Err(err) = run_line(&input, engine) {
        err.report_to_stderr(&input);
    }
    print_state(engine);
    Ok(())
}

fn read_script(filename: Option<PathBuf>) -> Result<String, Error> {
    let mut input = String::new();
    match filename {
        Some(filename) => {
            BufReader::new(File::open(filename)?).read_to_string(&mut input)?;
        },
        None => {
            io::stdin().read_to_string(&mut input)?;
        },
    }
    Ok(input)
}

fn run() -> Result<(), Error> {
    let args = Args::parse();
    logging::init_logging(args.log.as_deref().unwrap_or(logging::DEFAULT_LEVEL));

    let mut builder = EngineOptionsBuilder::new();
    if let Some(digits) = args.digits {
        builder = builder.decimal_digits(digits.into());
    }
    let options = builder.build();
    debug!(?options, "engine configured");
    let mut engine = Engine::new(options);

    if args.script.is_some() || !io::stdin().is_terminal() {
        // run a script from a file or stdin
        let input = read_script(args.script)?;
        run_script(&input, &mut engine);
        return Ok(());
    }

    // run the repl / interactive mode
    let mut rl = DefaultEditor::new()?;
    loop {
        if let Err(err) = process_line(&mut rl, &mut engine) {
            match err {
                Error::Readline(ReadlineError::Eof | ReadlineError::Interrupted) => (),
                err => eprintln!("{}", err),
            }
            break;
        }
    }
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn lines_drive_engine() {
        let mut engine = Engine::default();
        run_line("2 + 3", &mut engine).unwrap();
        assert_eq!(engine.state().expression_text(), "2+3");

        run_line("", &mut engine).unwrap();
        assert_eq!(engine.state().display_text(), "5");

        assert!(run_line("2 $", &mut engine).is_err());
    }
}
