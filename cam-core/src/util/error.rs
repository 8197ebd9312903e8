use std::fmt::{Display, Formatter};

use crate::term::Term;

#[derive(Debug)]
pub struct Error(Repr);

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    // the register did not have the shape an opcode required
    InvalidTerm,
    // the save-stack was empty
    InvalidStack,
    // malformed program text or instruction node
    InvalidCode,
}

impl Error {
    pub fn invalid_term(term: &Term, expected: &'static str) -> Self {
        Error(Repr::Term { actual: term.to_string(), expected })
    }

    pub fn invalid_stack(reason: &'static str) -> Self {
        Error(Repr::Stack(reason))
    }

    pub fn invalid_code<S: Into<String>>(fragment: S) -> Self {
        Error(Repr::Code(fragment.into()))
    }

    pub fn kind(&self) -> ErrorKind {
        match &self.0 {
            Repr::Term { .. } => ErrorKind::InvalidTerm,
            Repr::Stack(_) => ErrorKind::InvalidStack,
            Repr::Code(_) => ErrorKind::InvalidCode,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match &self.0 {
            Repr::Term { actual, expected } =>
                write!(f, "Invalid term: {actual} (expected: {expected})"),
            Repr::Stack(reason) => write!(f, "Invalid stack: {reason}"),
            Repr::Code(fragment) => write!(f, "Invalid code: {fragment}"),
        }
    }
}

impl std::error::Error for Error {}

#[derive(Debug)]
enum Repr {
    Term { actual: String, expected: &'static str },
    Stack(&'static str),
    Code(String),
}
