use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::rc::Rc;

// One character per opcode, see `Opcode::symbol`
#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug)]
pub enum Opcode {
    Fst,
    Snd,
    Push,
    Swap,
    Cons,
    Eval,
    Add,
    Sub,
    Mul,
    Eq,
    // make-closure
    Cur,
    // quote-literal
    Quote,
    // make-rec-closure
    Rec,
    Branch,
}

/// How an opcode consumes its arguments from the program text.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Arity {
    /// A bare character.
    Simple,
    /// `op(CODE)`
    Unary,
    /// `op(CODE)(CODE)`
    Binary,
    /// `op(TEXT)`, the text is kept verbatim.
    Literal,
}

impl Opcode {
    pub fn from_symbol(c: char) -> Option<Opcode> {
        use Opcode::*;
        let op = match c {
            'F' => Fst,
            'S' => Snd,
            '<' => Push,
            ',' => Swap,
            '>' => Cons,
            'e' => Eval,
            '+' => Add,
            '-' => Sub,
            '*' => Mul,
            '=' => Eq,
            '\\' => Cur,
            '\'' => Quote,
            'Y' => Rec,
            'b' => Branch,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(&self) -> char {
        use Opcode::*;
        match self {
            Fst => 'F',
            Snd => 'S',
            Push => '<',
            Swap => ',',
            Cons => '>',
            Eval => 'e',
            Add => '+',
            Sub => '-',
            Mul => '*',
            Eq => '=',
            Cur => '\\',
            Quote => '\'',
            Rec => 'Y',
            Branch => 'b',
        }
    }

    pub fn arity(&self) -> Arity {
        use Opcode::*;
        match self {
            Fst | Snd | Push | Swap | Cons | Eval | Add | Sub | Mul | Eq => Arity::Simple,
            Cur | Rec => Arity::Unary,
            Branch => Arity::Binary,
            Quote => Arity::Literal,
        }
    }
}

impl Display for Opcode {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single parsed instruction.
#[derive(Clone, Hash, PartialEq, Eq, Debug)]
pub enum Code {
    Op(Opcode),
    // closures carry their body, branches carry (then, else)
    OpWithArgs(Opcode, Vec<CodeSeq>),
    QuoteLiteral(String),
}

impl Code {
    pub fn opcode(&self) -> Opcode {
        match self {
            Code::Op(op) => *op,
            Code::OpWithArgs(op, _) => *op,
            Code::QuoteLiteral(_) => Opcode::Quote,
        }
    }

    /// The nested sequences of an `OpWithArgs` node, or none.
    pub fn args(&self) -> &[CodeSeq] {
        match self {
            Code::OpWithArgs(_, args) => args,
            _ => &[],
        }
    }
}

// Renders in source syntax (`b(X)(Y)`, `'(n)`) so the output parses back.
impl Display for Code {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Code::Op(op) => write!(f, "{op}"),
            Code::OpWithArgs(op, args) => {
                write!(f, "{op}")?;
                for arg in args {
                    write!(f, "({arg})")?;
                }
                Ok(())
            },
            Code::QuoteLiteral(text) => write!(f, "{}({text})", Opcode::Quote),
        }
    }
}

/// An immutable, cheaply cloned sequence of instructions.
///
/// Closure bodies and branch arms are shared between the parsed
/// program, the terms that capture them and the pending queue.
#[derive(Clone, Hash, PartialEq, Eq, Debug)]
pub struct CodeSeq(Rc<[Code]>);

impl CodeSeq {
    pub fn new(code: Vec<Code>) -> Self {
        CodeSeq(code.into())
    }

    pub fn empty() -> Self {
        CodeSeq::new(Vec::new())
    }
}

impl Deref for CodeSeq {
    type Target = [Code];

    fn deref(&self) -> &[Code] {
        &self.0
    }
}

impl FromIterator<Code> for CodeSeq {
    fn from_iter<I: IntoIterator<Item = Code>>(iter: I) -> Self {
        CodeSeq(iter.into_iter().collect())
    }
}

impl Display for CodeSeq {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        for code in self.iter() {
            write!(f, "{code}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_bijective() {
        for c in "FS<,>e+-*=\\'Yb".chars() {
            let op = Opcode::from_symbol(c).unwrap();
            assert_eq!(op.symbol(), c);
        }
        assert_eq!(Opcode::from_symbol('Z'), None);
        assert_eq!(Opcode::from_symbol('('), None);
    }

    #[test]
    fn render_nested() {
        let body = CodeSeq::new(vec![Code::Op(Opcode::Snd)]);
        let code = CodeSeq::new(vec![
            Code::OpWithArgs(Opcode::Branch, vec![body.clone(), CodeSeq::empty()]),
            Code::OpWithArgs(Opcode::Cur, vec![body]),
            Code::QuoteLiteral("12".to_string()),
        ]);
        assert_eq!(code.to_string(), "b(S)()\\(S)'(12)");
    }
}
