use std::fmt::{Display, Formatter};

use super::state::{StackDisplay, State};

/// Observes the machine, once on start and once after every completed
/// transition. Tracers never feed back into execution.
pub trait Tracer {
    fn record(&mut self, state: &State);
}

impl<T: Tracer + ?Sized> Tracer for &mut T {
    fn record(&mut self, state: &State) {
        (**self).record(state)
    }
}

// Used when nobody is watching
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Tracer for Silent {
    fn record(&mut self, _state: &State) {}
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Snapshot {
    pub term: String,
    pub code: String,
    pub stack: String,
}

impl Snapshot {
    pub fn of(state: &State) -> Self {
        Snapshot {
            term: state.register.to_string(),
            code: state.pending.to_string(),
            stack: StackDisplay(&state.stack).to_string(),
        }
    }
}

const HEADER: [&str; 4] = ["#", "Term", "Code", "Stack"];

/// Records every state the machine passes through, and renders them
/// as a table.
#[derive(Debug, Default)]
pub struct History {
    rows: Vec<Snapshot>,
}

impl History {
    pub fn new() -> Self {
        History { rows: Vec::new() }
    }

    pub fn rows(&self) -> &[Snapshot] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    // [idx, term, code, stack]
    fn widths(&self) -> [usize; 4] {
        let mut w = HEADER.map(|h| h.chars().count());
        let idx_w = self.rows.len().saturating_sub(1).to_string().len();
        w[0] = w[0].max(idx_w);
        for row in &self.rows {
            w[1] = w[1].max(row.term.chars().count());
            w[2] = w[2].max(row.code.chars().count());
            w[3] = w[3].max(row.stack.chars().count());
        }
        w
    }
}

impl Tracer for History {
    fn record(&mut self, state: &State) {
        self.rows.push(Snapshot::of(state));
    }
}

fn rule(f: &mut Formatter, w: &[usize; 4]) -> std::fmt::Result {
    // "| " + cell + " " per column, then the closing "|"
    let width: usize = w.iter().map(|c| c + 3).sum::<usize>() + 1;
    writeln!(f, "+{}+", "-".repeat(width - 2))
}

fn row(f: &mut Formatter, w: &[usize; 4], cells: [&str; 4]) -> std::fmt::Result {
    for (cell, width) in cells.iter().zip(w.iter().copied()) {
        write!(f, "| {cell:<width$} ")?;
    }
    writeln!(f, "|")
}

impl Display for History {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.rows.is_empty() {
            return Ok(());
        }
        let w = self.widths();
        rule(f, &w)?;
        row(f, &w, HEADER)?;
        rule(f, &w)?;
        for (i, snap) in self.rows.iter().enumerate() {
            let idx = i.to_string();
            row(f, &w, [&idx, &snap.term, &snap.code, &snap.stack])?;
            rule(f, &w)?;
        }
        Ok(())
    }
}
