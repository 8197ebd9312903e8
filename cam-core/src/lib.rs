//! A Categorical Abstract Machine.
//!
//! Programs are strings of single-character combinators which are parsed
//! into a [`code::CodeSeq`] tree and executed by a [`vm::Machine`] against
//! a register, a save-stack and the list of pending instructions.

pub mod util;
pub mod term;
pub mod code;
pub mod parse;
pub mod vm;

pub use util::error::{Error, ErrorKind, Result};
pub use term::{Term, TermRef};
pub use code::{Code, CodeSeq, Opcode};
pub use parse::parse;
pub use vm::{execute, Machine, Run};
