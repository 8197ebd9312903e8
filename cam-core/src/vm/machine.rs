use std::time::{Duration, Instant};

use crate::code::CodeSeq;
use crate::term::{Term, TermRef};
use crate::{Error, Result};

use super::state::{Pending, Stack, State};
use super::tracer::{Silent, Tracer};
use super::transition::transition;

pub struct Machine<T: Tracer = Silent> {
    state: State,
    tracer: T,
    steps: u64,
}

impl Machine<Silent> {
    pub fn new(program: CodeSeq) -> Self {
        Machine::with_tracer(program, Silent)
    }
}

impl<T: Tracer> Machine<T> {
    /// Builds a fresh machine: register `()`, empty stack and the whole
    /// program pending. The tracer sees this initial state right away.
    pub fn with_tracer(program: CodeSeq, mut tracer: T) -> Self {
        let state = State::new(program);
        tracer.record(&state);
        Machine { state, tracer, steps: 0 }
    }

    pub fn register(&self) -> &TermRef {
        &self.state.register
    }

    pub fn stack(&self) -> &Stack {
        &self.state.stack
    }

    pub fn pending(&self) -> &Pending {
        &self.state.pending
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn tracer(&self) -> &T {
        &self.tracer
    }

    pub fn into_tracer(self) -> T {
        self.tracer
    }

    /// Executes the head instruction. Returns `false` once nothing is
    /// pending. A failing instruction leaves the machine untouched.
    pub fn step(&mut self) -> Result<bool> {
        let op = match self.state.pending.head() {
            Some(code) => code.opcode(),
            None => return Ok(false),
        };
        log::trace!(target: "cam", "#{} {} on {}", self.steps, op, self.state.register);
        transition(op)(&mut self.state)?;
        self.steps += 1;
        self.tracer.record(&self.state);
        Ok(true)
    }

    /// Runs until nothing is pending, stopping at the first error.
    pub fn run(&mut self) -> Result<()> {
        while self.step()? {}
        Ok(())
    }
}

/// The outcome of a complete run.
#[derive(Debug)]
pub struct Run {
    // the register when the run stopped, successfully or not
    pub result: TermRef,
    pub error: Option<Error>,
    pub steps: u64,
    pub elapsed: Duration,
}

impl Run {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Parses and runs a program.
///
/// This is where machine errors stop: the error is logged and reported in
/// the returned `Run` next to the register value it left behind. A program
/// which fails to parse never starts and reports `()`.
pub fn execute<T: Tracer>(text: &str, tracer: T) -> Run {
    let begin = Instant::now();
    let program = match crate::parse(text) {
        Ok(program) => program,
        Err(e) => {
            log::debug!(target: "cam", "not running: {}", e);
            return Run { result: Term::unit(), error: Some(e), steps: 0, elapsed: begin.elapsed() };
        },
    };
    let mut machine = Machine::with_tracer(program, tracer);
    let error = machine.run().err();
    match &error {
        Some(e) => log::debug!(target: "cam", "aborted after {} steps: {}", machine.steps(), e),
        None => log::debug!(target: "cam", "finished after {} steps", machine.steps()),
    }
    Run {
        result: machine.register().clone(),
        error,
        steps: machine.steps(),
        elapsed: begin.elapsed(),
    }
}
