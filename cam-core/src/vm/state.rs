use std::collections::VecDeque;
use std::fmt::{Display, Formatter};

use crate::code::{Code, CodeSeq};
use crate::term::{Term, TermRef};

pub type Stack = VecDeque<TermRef>;

/// The mutable machine state, owned by a single `Machine`.
#[derive(Debug)]
pub struct State {
    pub register: TermRef,
    // pushed and popped at the front
    pub stack: Stack,
    pub pending: Pending,
}

impl State {
    pub fn new(program: CodeSeq) -> Self {
        let mut pending = Pending::new();
        pending.splice(program);
        State {
            register: Term::unit(),
            stack: Stack::new(),
            pending,
        }
    }
}

pub struct StackDisplay<'a>(pub &'a Stack);

impl<'a> Display for StackDisplay<'a> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "[")?;
        let mut first = true;
        for term in self.0 {
            if first { write!(f, "{}", term)?; }
            else { write!(f, ", {}", term)?; }
            first = false;
        }
        write!(f, "]")
    }
}

#[derive(Debug)]
struct Frame {
    code: CodeSeq,
    pc: usize,
}

/// The instructions still to be executed.
///
/// Logically a single sequence consumed from the front. Splicing a
/// closure body or a branch arm pushes a frame referring to the shared
/// sequence instead of copying it. Exhausted frames are dropped eagerly,
/// so a splice from the last instruction of a frame does not grow
/// the frame list.
#[derive(Debug, Default)]
pub struct Pending {
    // innermost frame last
    frames: Vec<Frame>,
}

impl Pending {
    pub fn new() -> Self {
        Pending { frames: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn head(&self) -> Option<&Code> {
        self.frames.last().map(|f| &f.code[f.pc])
    }

    /// Drops the head instruction.
    pub fn advance(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            frame.pc += 1;
            if frame.pc >= frame.code.len() {
                self.frames.pop();
            }
        }
    }

    /// Places `code` in front of the remaining instructions.
    pub fn splice(&mut self, code: CodeSeq) {
        if !code.is_empty() {
            self.frames.push(Frame { code, pc: 0 });
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Code> {
        self.frames.iter().rev().flat_map(|f| f.code[f.pc..].iter())
    }

    pub fn len(&self) -> usize {
        self.frames.iter().map(|f| f.code.len() - f.pc).sum()
    }
}

impl Display for Pending {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        for code in self.iter() {
            write!(f, "{code}")?;
        }
        Ok(())
    }
}
