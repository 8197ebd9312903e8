use super::parse;
use crate::code::{Code, CodeSeq, Opcode};
use crate::ErrorKind;

use proptest::prelude::*;
use test_log::test;

fn seq(code: Vec<Code>) -> CodeSeq {
    CodeSeq::new(code)
}

#[test]
fn test_parse_simple() {
    let code = parse("FS<,>e+-*=").unwrap();
    let ops: Vec<Opcode> = code.iter().map(Code::opcode).collect();
    use Opcode::*;
    assert_eq!(ops, vec![Fst, Snd, Push, Swap, Cons, Eval, Add, Sub, Mul, Eq]);
    assert!(code.iter().all(|c| matches!(c, Code::Op(_))));
}

#[test]
fn test_parse_empty() {
    assert!(parse("").unwrap().is_empty());
}

#[test]
fn test_parse_quote_is_verbatim() {
    let code = parse("'(123)'(x(y))").unwrap();
    assert_eq!(&*code, &[
        Code::QuoteLiteral("123".to_string()),
        Code::QuoteLiteral("x(y)".to_string()),
    ]);
}

#[test]
fn test_parse_closures() {
    let code = parse("\\(F)Y(<S>)").unwrap();
    assert_eq!(&*code, &[
        Code::OpWithArgs(Opcode::Cur, vec![seq(vec![Code::Op(Opcode::Fst)])]),
        Code::OpWithArgs(Opcode::Rec, vec![seq(vec![
            Code::Op(Opcode::Push), Code::Op(Opcode::Snd), Code::Op(Opcode::Cons),
        ])]),
    ]);
}

#[test]
fn test_parse_branch() {
    let code = parse("b('(1))(F)").unwrap();
    assert_eq!(&*code, &[
        Code::OpWithArgs(Opcode::Branch, vec![
            seq(vec![Code::QuoteLiteral("1".to_string())]),
            seq(vec![Code::Op(Opcode::Fst)]),
        ]),
    ]);
}

#[test]
fn test_parse_deep_nesting() {
    let text = "\\(Y(b(\\(F'(1))e)(S))e)<'(2)>";
    let code = parse(text).unwrap();
    assert_eq!(code.len(), 4);
    let cur = &code[0];
    let rec = &cur.args()[0][0];
    let branch = &rec.args()[0][0];
    assert_eq!(branch.opcode(), Opcode::Branch);
    assert_eq!(branch.args()[0].to_string(), "\\(F'(1))e");
    assert_eq!(code.to_string(), text);
}

#[test]
fn test_parse_unknown_opcode() {
    let err = parse("FZS").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidCode);
    assert_eq!(err.to_string(), "Invalid code: ZS");
    assert_eq!(parse("F S").unwrap_err().kind(), ErrorKind::InvalidCode);
    assert_eq!(parse(")").unwrap_err().kind(), ErrorKind::InvalidCode);
}

#[test]
fn test_parse_unknown_opcode_nested() {
    let err = parse("\\(FZ)").unwrap_err();
    assert_eq!(err.to_string(), "Invalid code: Z");
}

#[test]
fn test_parse_unbalanced() {
    for text in ["\\(F", "\\", "Y", "'", "'(", "'(12", "b(F)", "b(F)S", "b(F", "\\F)", "\\((F)"] {
        let err = parse(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCode, "{text}");
    }
    assert_eq!(parse("<\\(F").unwrap_err().to_string(), "Invalid code: \\(F");
}

#[test]
fn test_parse_non_ascii() {
    assert_eq!(parse("Fé").unwrap_err().to_string(), "Invalid code: é");
    assert_eq!(parse("'(é)").unwrap().to_string(), "'(é)");
}

fn program() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        prop::sample::select(vec!["F", "S", "<", ",", ">", "e", "+", "-", "*", "="])
            .prop_map(String::from),
        any::<u64>().prop_map(|n| format!("'({n})")),
    ];
    let instr = leaf.prop_recursive(4, 64, 4, |inner| {
        let body = prop::collection::vec(inner, 0..4).prop_map(|v| v.concat());
        prop_oneof![
            body.clone().prop_map(|b| format!("\\({b})")),
            body.clone().prop_map(|b| format!("Y({b})")),
            (body.clone(), body).prop_map(|(t, e)| format!("b({t})({e})")),
        ]
    });
    prop::collection::vec(instr, 0..8).prop_map(|v| v.concat())
}

proptest! {
    #[test]
    fn parse_render_roundtrip(text in program()) {
        let code = parse(&text).unwrap();
        prop_assert_eq!(code.to_string(), text);
    }

    #[test]
    fn truncated_never_panics(text in program(), cut in any::<prop::sample::Index>()) {
        if !text.is_empty() {
            let prefix = &text[..cut.index(text.len())];
            // either a valid program or an InvalidCode error
            if let Err(e) = parse(prefix) {
                prop_assert_eq!(e.kind(), ErrorKind::InvalidCode);
            }
        }
    }
}
