pub mod slicer;

#[cfg(test)]
mod test;

use crate::code::{Arity, Code, CodeSeq, Opcode};
use crate::{Error, Result};

use slicer::StringSlicer;

/// Parses program text into a sequence of instructions.
///
/// Fails with `InvalidCode` on any character that is not an opcode and on
/// bracketed arguments that are missing or never closed. The error carries
/// the text from the offending instruction to the end of its sequence.
pub fn parse(text: &str) -> Result<CodeSeq> {
    let code = parse_seq(text)?;
    log::debug!(target: "cam", "parsed {} top-level instructions", code.len());
    Ok(code)
}

fn parse_seq(text: &str) -> Result<CodeSeq> {
    let mut s = StringSlicer::new(text);
    let mut code = Vec::new();
    while !s.hit_end() {
        code.push(parse_instr(&mut s)?);
    }
    Ok(CodeSeq::new(code))
}

fn parse_instr(s: &mut StringSlicer) -> Result<Code> {
    let start = s.pos();
    let invalid = |s: &StringSlicer| Error::invalid_code(s.from(start));

    let op = match s.next().and_then(Opcode::from_symbol) {
        Some(op) => op,
        None => return Err(invalid(s)),
    };
    let code = match op.arity() {
        Arity::Simple => Code::Op(op),
        Arity::Unary => {
            let body = s.group().ok_or_else(|| invalid(s))?;
            Code::OpWithArgs(op, vec![parse_seq(body)?])
        },
        Arity::Binary => {
            let then = s.group().ok_or_else(|| invalid(s))?;
            let otherwise = s.group().ok_or_else(|| invalid(s))?;
            Code::OpWithArgs(op, vec![parse_seq(then)?, parse_seq(otherwise)?])
        },
        Arity::Literal => {
            let text = s.group().ok_or_else(|| invalid(s))?;
            Code::QuoteLiteral(text.to_owned())
        },
    };
    Ok(code)
}
