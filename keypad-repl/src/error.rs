use keypad_error::Error as KeyError;
use rustyline::error::ReadlineError;
use std::{fmt, io};

/// Utility enum to package errors that can occur while reading and interpreting keys.
#[derive(Debug)]
pub enum Error {
    /// A line contained something that is not a key.
    Key(KeyError),

    /// The line editor failed.
    Readline(ReadlineError),

    /// A script could not be read.
    Io(io::Error),
}

impl Error {
    /// Report this [`Error`] to stderr. Key errors are rendered as a report pointing into the
    /// given input line.
    pub fn report_to_stderr(&self, input: &str) {
        match self {
            Self::Key(err) => err.report_to_stderr("input", input),
            other => eprintln!("{}", other),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(err) => write!(f, "invalid key: {:?}", err.kind),
            Self::Readline(err) => write!(f, "{}", err),
            Self::Io(err) => write!(f, "could not read script: {}", err),
        }
    }
}

impl From<KeyError> for Error {
    fn from(err: KeyError) -> Self {
        Self::Key(err)
    }
}

impl From<ReadlineError> for Error {
    fn from(err: ReadlineError) -> Self {
        Self::Readline(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
