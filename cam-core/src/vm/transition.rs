use num_bigint::BigInt;
use num_traits::Zero;

use crate::code::{Code, CodeSeq, Opcode};
use crate::term::Term;
use crate::{Error, Result};

use super::state::State;

/// Applies one instruction to the state.
///
/// The instruction is always the head of `state.pending`. On success it has
/// been consumed; on failure the state is left exactly as it was.
pub type Transition = fn(&mut State) -> Result<()>;

const EMPTY_STACK: &str = "Empty stack";

pub fn transition(op: Opcode) -> Transition {
    use Opcode::*;
    match op {
        Fst => fst,
        Snd => snd,
        Push => push,
        Swap => swap,
        Cons => cons,
        Eval => eval,
        Cur => cur,
        Quote => quote,
        Rec => rec,
        Branch => branch,
        Add => add,
        Sub => sub,
        Mul => mul,
        Eq => eq,
    }
}

fn fst(state: &mut State) -> Result<()> {
    let first = match &*state.register {
        Term::Pair(first, _) => first.clone(),
        _ => return Err(Error::invalid_term(&state.register, "(s, t)")),
    };
    state.register = first;
    state.pending.advance();
    Ok(())
}

fn snd(state: &mut State) -> Result<()> {
    let second = match &*state.register {
        Term::Pair(_, second) => second.clone(),
        _ => return Err(Error::invalid_term(&state.register, "(s, t)")),
    };
    state.register = second;
    state.pending.advance();
    Ok(())
}

fn push(state: &mut State) -> Result<()> {
    state.stack.push_front(state.register.clone());
    state.pending.advance();
    Ok(())
}

fn swap(state: &mut State) -> Result<()> {
    let top = state.stack.pop_front().ok_or_else(|| Error::invalid_stack(EMPTY_STACK))?;
    let old = std::mem::replace(&mut state.register, top);
    state.stack.push_front(old);
    state.pending.advance();
    Ok(())
}

fn cons(state: &mut State) -> Result<()> {
    let top = state.stack.pop_front().ok_or_else(|| Error::invalid_stack(EMPTY_STACK))?;
    state.register = Term::pair(top, state.register.clone());
    state.pending.advance();
    Ok(())
}

fn eval(state: &mut State) -> Result<()> {
    let (body, env) = match &*state.register {
        Term::Pair(closure, arg) => match Term::enter(closure) {
            Some((body, captured)) => (body, Term::pair(captured, arg.clone())),
            None => return Err(Error::invalid_term(&state.register, "(C: s, t)")),
        },
        _ => return Err(Error::invalid_term(&state.register, "(C: s, t)")),
    };
    state.register = env;
    state.pending.advance();
    state.pending.splice(body);
    Ok(())
}

// The single body of a closure-building instruction
fn closure_body(head: Option<&Code>) -> Result<CodeSeq> {
    match head {
        Some(Code::OpWithArgs(_, args)) if args.len() == 1 => Ok(args[0].clone()),
        Some(code) => Err(Error::invalid_code(code.to_string())),
        None => Err(Error::invalid_code("")),
    }
}

fn cur(state: &mut State) -> Result<()> {
    let body = closure_body(state.pending.head())?;
    state.register = Term::app(body, state.register.clone());
    state.pending.advance();
    Ok(())
}

fn rec(state: &mut State) -> Result<()> {
    let body = closure_body(state.pending.head())?;
    state.register = Term::rec(body, state.register.clone());
    state.pending.advance();
    Ok(())
}

// An optional '-' followed by ASCII digits, nothing else
fn literal(text: &str) -> Option<BigInt> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigInt::parse_bytes(text.as_bytes(), 10)
}

fn quote(state: &mut State) -> Result<()> {
    let head = state.pending.head();
    let value = match head {
        Some(Code::QuoteLiteral(text)) => literal(text),
        _ => None,
    };
    let value = value.ok_or_else(||
        Error::invalid_code(head.map(Code::to_string).unwrap_or_default()))?;
    state.register = Term::quote(value);
    state.pending.advance();
    Ok(())
}

fn branch(state: &mut State) -> Result<()> {
    let taken = match state.register.as_quote() {
        Some(n) => !n.is_zero(),
        None => return Err(Error::invalid_term(&state.register, "numeric constant")),
    };
    let arm = match state.pending.head() {
        Some(Code::OpWithArgs(_, args)) if args.len() == 2 =>
            if taken { args[0].clone() } else { args[1].clone() },
        Some(code) => return Err(Error::invalid_code(code.to_string())),
        None => return Err(Error::invalid_code("")),
    };
    state.register = state.stack.pop_front().ok_or_else(|| Error::invalid_stack(EMPTY_STACK))?;
    state.pending.advance();
    state.pending.splice(arm);
    Ok(())
}

fn arith(state: &mut State, op: fn(&BigInt, &BigInt) -> BigInt) -> Result<()> {
    let value = match &*state.register {
        Term::Pair(a, b) => match (&**a, &**b) {
            (Term::Quote(a), Term::Quote(b)) => op(a, b),
            _ => return Err(Error::invalid_term(&state.register,
                    "(s, t) where s and t are numeric constants")),
        },
        _ => return Err(Error::invalid_term(&state.register, "(s, t)")),
    };
    state.register = Term::quote(value);
    state.pending.advance();
    Ok(())
}

fn add(state: &mut State) -> Result<()> {
    arith(state, |a, b| a + b)
}

fn sub(state: &mut State) -> Result<()> {
    arith(state, |a, b| a - b)
}

fn mul(state: &mut State) -> Result<()> {
    arith(state, |a, b| a * b)
}

// 1 if equal, 0 otherwise
fn eq(state: &mut State) -> Result<()> {
    arith(state, |a, b| BigInt::from((a == b) as u8))
}
