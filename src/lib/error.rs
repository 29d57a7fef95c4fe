//! Everything that can go wrong between the sales files and the reports
//!
//! Analyses never catch their own failures: each variant travels up to the
//! report or the shell, which decides whether to show it, skip it or abort.

use std::fmt;

use crate::lib::date::FormatError;

#[derive(Debug)]
pub enum Error {
    /// a date string matches none of the accepted layouts
    Format(FormatError),
    /// summary statistics requested over zero records
    EmptyInput,
    /// a sale references a branch that was never registered
    UnknownKey(String),
    /// a sum of amounts does not fit in 64 bits
    Overflow,
    /// username/password pair not found
    BadCredentials,
    /// user input that cannot be coerced to the expected type
    InvalidInput(String),
    /// malformed or unreadable table
    Csv(csv::Error),
    /// filesystem failure outside of the csv layer (charts, directories)
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Error::*;
        match self {
            Format(e) => write!(f, "{}", e),
            EmptyInput => write!(f, "no records to summarize"),
            UnknownKey(k) => write!(f, "sale references unknown branch '{}'", k),
            Overflow => write!(f, "sum of sale amounts is too large"),
            BadCredentials => write!(f, "invalid username or password"),
            InvalidInput(s) => write!(f, "invalid input: {}", s),
            Csv(e) => write!(f, "{}", e),
            Io(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Format(e) => Some(e),
            Error::Csv(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl Error {
    /// What message to show to help fix the error
    pub fn fix_hint(&self) -> Option<String> {
        use Error::*;
        match self {
            Format(e) => Some(e.fix_hint()),
            EmptyInput => Some("check the identifier, nothing was recorded for it".to_string()),
            UnknownKey(k) => Some(format!("register branch '{}' or remove its sales", k)),
            Overflow => Some("look for a mistyped amount in sales.csv".to_string()),
            BadCredentials => Some("accounts are listed in users.csv".to_string()),
            InvalidInput(_) | Csv(_) | Io(_) => None,
        }
    }
}

impl From<FormatError> for Error {
    fn from(e: FormatError) -> Self {
        Error::Format(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Csv(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
