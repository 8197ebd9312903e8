use std::fmt::{Display, Formatter};
use std::rc::Rc;

use num_bigint::BigInt;

use crate::code::CodeSeq;

// Terms are immutable once built, so sub-terms are shared
// rather than copied whenever they land in the register or the stack.
pub type TermRef = Rc<Term>;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Term {
    Unit,
    Pair(TermRef, TermRef),
    Quote(BigInt),
    // a closure: body and captured value
    App(CodeSeq, TermRef),
    // a recursive closure, its environment is (captured, itself)
    Rec(CodeSeq, TermRef),
}

impl Term {
    pub fn unit() -> TermRef {
        Rc::new(Term::Unit)
    }

    pub fn pair(first: TermRef, second: TermRef) -> TermRef {
        Rc::new(Term::Pair(first, second))
    }

    pub fn quote<N: Into<BigInt>>(value: N) -> TermRef {
        Rc::new(Term::Quote(value.into()))
    }

    pub fn app(body: CodeSeq, captured: TermRef) -> TermRef {
        Rc::new(Term::App(body, captured))
    }

    pub fn rec(body: CodeSeq, captured: TermRef) -> TermRef {
        Rc::new(Term::Rec(body, captured))
    }

    pub fn as_quote(&self) -> Option<&BigInt> {
        match self {
            Term::Quote(n) => Some(n),
            _ => None,
        }
    }

    /// Opens a closure, returning its body and the value the body
    /// starts from.
    ///
    /// For `App` that is the captured value. For `Rec` a fresh
    /// `(captured, this)` pair is built on every call, where `this`
    /// is a handle to the very same `Rec`, so recursion can be unfolded
    /// any number of times without a cycle ever being stored.
    /// Any other term is not a closure and yields `None`.
    pub fn enter(this: &TermRef) -> Option<(CodeSeq, TermRef)> {
        match &**this {
            Term::App(body, captured) => Some((body.clone(), captured.clone())),
            Term::Rec(body, captured) =>
                Some((body.clone(), Term::pair(captured.clone(), this.clone()))),
            _ => None,
        }
    }
}

impl Term {
    // Moves the uniquely owned nested children out, leaving `()` behind
    fn detach_children(&mut self, queue: &mut Vec<TermRef>) {
        match self {
            Term::Pair(first, second) => {
                detach(first, queue);
                detach(second, queue);
            },
            Term::App(_, captured) | Term::Rec(_, captured) => detach(captured, queue),
            Term::Unit | Term::Quote(_) => {},
        }
    }
}

fn detach(slot: &mut TermRef, queue: &mut Vec<TermRef>) {
    let nested = matches!(**slot, Term::Pair(..) | Term::App(..) | Term::Rec(..));
    if nested && Rc::strong_count(slot) == 1 {
        queue.push(std::mem::replace(slot, Term::unit()));
    }
}

// Dropping a long chain of pairs recursively would overflow the stack,
// so uniquely owned children are released from a worklist instead.
impl Drop for Term {
    fn drop(&mut self) {
        let mut queue = Vec::new();
        self.detach_children(&mut queue);
        while let Some(child) = queue.pop() {
            if let Ok(mut term) = Rc::try_unwrap(child) {
                term.detach_children(&mut queue);
            }
        }
    }
}

enum Piece<'a> {
    Term(&'a Term),
    Text(&'static str),
}

impl Display for Term {
    // Walks an explicit stack, terms can nest far deeper than the call stack
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let mut todo = vec![Piece::Term(self)];
        while let Some(piece) = todo.pop() {
            let term = match piece {
                Piece::Text(text) => {
                    f.write_str(text)?;
                    continue;
                },
                Piece::Term(term) => term,
            };
            match term {
                Term::Unit => f.write_str("()")?,
                Term::Quote(n) => write!(f, "{n}")?,
                Term::Pair(first, second) => {
                    f.write_str("(")?;
                    todo.push(Piece::Text(")"));
                    todo.push(Piece::Term(&**second));
                    todo.push(Piece::Text(", "));
                    todo.push(Piece::Term(&**first));
                },
                Term::App(body, captured) => {
                    write!(f, "{body}: ")?;
                    todo.push(Piece::Term(&**captured));
                },
                Term::Rec(body, captured) => {
                    write!(f, "{body}: (")?;
                    todo.push(Piece::Text(", rec)"));
                    todo.push(Piece::Term(&**captured));
                },
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Code, Opcode};

    #[test]
    fn render() {
        let body = CodeSeq::new(vec![Code::Op(Opcode::Fst)]);
        let t = Term::pair(Term::unit(), Term::quote(3));
        assert_eq!(t.to_string(), "((), 3)");
        assert_eq!(Term::app(body.clone(), t.clone()).to_string(), "F: ((), 3)");
        assert_eq!(Term::rec(body, Term::unit()).to_string(), "F: ((), rec)");
    }

    #[test]
    fn enter_rec_refers_to_itself() {
        let body = CodeSeq::new(vec![Code::Op(Opcode::Snd)]);
        let rec = Term::rec(body.clone(), Term::quote(7));
        for _ in 0..3 {
            let (b, env) = Term::enter(&rec).unwrap();
            assert_eq!(b, body);
            match &*env {
                Term::Pair(captured, this) => {
                    assert_eq!(**captured, Term::Quote(7.into()));
                    assert!(Rc::ptr_eq(this, &rec));
                },
                other => panic!("expected a pair, got {other}"),
            }
        }
        assert!(Term::enter(&Term::quote(1)).is_none());
    }

    #[test]
    fn deep_pairs_render_and_drop() {
        let mut left = Term::quote(0);
        let mut right = Term::unit();
        for _ in 0..100_000 {
            left = Term::pair(left, Term::quote(1));
            right = Term::pair(Term::quote(1), right);
        }
        let text = left.to_string();
        assert_eq!(text.len(), 500_001);
        assert!(text.starts_with("(((") && text.ends_with(", 1), 1)"));
        assert!(right.to_string().ends_with("(1, ()))"));

        // a shared tail outlives the chain that pointed to it
        let shared = match &*right {
            Term::Pair(_, rest) => rest.clone(),
            _ => unreachable!(),
        };
        drop(right);
        drop(left);
        assert!(shared.to_string().starts_with("(1, (1, "));
    }
}
