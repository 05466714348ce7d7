//! Prenex Normal Form.
//!
//! Pulls quantifiers to the root of a first-order formula, so that the
//! result is a linear quantifier prefix over a quantifier-free matrix. One
//! [`prenex`] pass hoists each quantifier at most one operator upward;
//! [`pnf`] iterates the pass to a fixed point.
//!
//! Hoisting a binder past a subformula in which its variable occurs free
//! would capture that occurrence, so the binder is renamed to a fresh name
//! first.

use crate::ast::{Expr, Var};

/// A prefix quantifier kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quant {
    Exists,
    Forall,
}

impl Quant {
    fn dual(self) -> Self {
        match self {
            Quant::Exists => Quant::Forall,
            Quant::Forall => Quant::Exists,
        }
    }
}

/// Convert a formula into Prenex Normal Form.
pub fn pnf(e: Expr) -> Expr {
    let mut prev = e;
    loop {
        let next = prenex(prev.clone());
        if next == prev {
            return next;
        }
        prev = next;
    }
}

/// One bottom-up hoisting pass.
pub fn prenex(e: Expr) -> Expr {
    match e {
        Expr::Not(inner) => match prenex(*inner) {
            Expr::Exists(v, b) => Expr::forall(v, Expr::fnot(*b)),
            Expr::Forall(v, b) => Expr::exists(v, Expr::fnot(*b)),
            other => Expr::fnot(other),
        },
        Expr::And(l, r) => hoist(Expr::and, prenex(*l), prenex(*r)),
        Expr::Or(l, r) => hoist(Expr::or, prenex(*l), prenex(*r)),
        Expr::Implies(l, r) => hoist_implies(prenex(*l), prenex(*r)),
        Expr::Exists(v, b) => Expr::exists(v, prenex(*b)),
        Expr::Forall(v, b) => Expr::forall(v, prenex(*b)),
        leaf => leaf,
    }
}

/// Hoist quantifiers out of `op(l, r)` for a commutative-style junction
/// (`∧`/`∨`). When both operands are quantified, the right-hand binder ends
/// up outermost.
fn hoist(op: fn(Expr, Expr) -> Expr, l: Expr, r: Expr) -> Expr {
    match (take_quant(l), take_quant(r)) {
        ((Some((ql, vl)), bl), (Some((qr, vr)), br)) => {
            let (vl, bl) = avoid_capture(vl, bl, &br);
            let (vr, br) = avoid_capture(vr, br, &bl);
            requant(qr, vr, requant(ql, vl, op(bl, br)))
        }
        ((Some((ql, vl)), bl), (None, r)) => {
            let (vl, bl) = avoid_capture(vl, bl, &r);
            requant(ql, vl, op(bl, r))
        }
        ((None, l), (Some((qr, vr)), br)) => {
            let (vr, br) = avoid_capture(vr, br, &l);
            requant(qr, vr, op(l, br))
        }
        ((None, l), (None, r)) => op(l, r),
    }
}

/// Hoist quantifiers out of an implication. A quantified antecedent hoists
/// as its dual; a quantified consequent hoists unchanged, on the next pass
/// if the antecedent went first.
fn hoist_implies(l: Expr, r: Expr) -> Expr {
    match take_quant(l) {
        (Some((ql, vl)), bl) => {
            let (vl, bl) = avoid_capture(vl, bl, &r);
            requant(ql.dual(), vl, Expr::implies(bl, r))
        }
        (None, l) => match take_quant(r) {
            (Some((qr, vr)), br) => {
                let (vr, br) = avoid_capture(vr, br, &l);
                requant(qr, vr, Expr::implies(l, br))
            }
            (None, r) => Expr::implies(l, r),
        },
    }
}

fn take_quant(e: Expr) -> (Option<(Quant, Var)>, Expr) {
    match e {
        Expr::Exists(v, b) => (Some((Quant::Exists, v)), *b),
        Expr::Forall(v, b) => (Some((Quant::Forall, v)), *b),
        other => (None, other),
    }
}

fn requant(q: Quant, v: Var, body: Expr) -> Expr {
    match q {
        Quant::Exists => Expr::exists(v, body),
        Quant::Forall => Expr::forall(v, body),
    }
}

/// Rename the binder if hoisting it over `other` would capture a free
/// occurrence of its variable.
fn avoid_capture(v: Var, body: Expr, other: &Expr) -> (Var, Expr) {
    if !other.mentions_var(&v) {
        return (v, body);
    }
    let mut i = 1u32;
    let fresh = loop {
        let cand = Var(format!("{}{}", v.0, i));
        if !body.mentions_var(&cand) && !other.mentions_var(&cand) {
            break cand;
        }
        i += 1;
    };
    let body = body.rename_var(&v, &fresh);
    (fresh, body)
}

/// The quantifier prefix of a PNF formula, outermost first.
pub fn prefix(e: &Expr) -> Vec<(Quant, Var)> {
    let mut out = Vec::new();
    let mut cur = e;
    loop {
        match cur {
            Expr::Exists(v, b) => {
                out.push((Quant::Exists, v.clone()));
                cur = b;
            }
            Expr::Forall(v, b) => {
                out.push((Quant::Forall, v.clone()));
                cur = b;
            }
            _ => return out,
        }
    }
}

/// The quantifier-free matrix of a PNF formula.
pub fn matrix(e: &Expr) -> &Expr {
    let mut cur = e;
    while let Expr::Exists(_, b) | Expr::Forall(_, b) = cur {
        cur = b;
    }
    cur
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ast_strategy::arb_formula;
    use crate::parser::parse;
    use proptest::prelude::*;

    fn pnf_rpn(s: &str) -> String {
        pnf(parse(s).unwrap()).to_rpn()
    }

    #[test]
    fn negated_quantifiers() {
        assert_eq!(pnf_rpn("x p(x) q(x) & /E -"), "x p(x) q(x) & - /F");
        assert_eq!(pnf_rpn("x p(x) /F -"), "x p(x) - /E");
        assert_eq!(pnf_rpn("x p(x) /F - -"), "x p(x) - - /F");
        assert_eq!(pnf_rpn("x p(x) /F - - -"), "x p(x) - - - /E");
        assert_eq!(pnf_rpn("x p(x) /F - - - -"), "x p(x) - - - - /F");
    }

    #[test]
    fn conjunction() {
        assert_eq!(pnf_rpn("x s(x) r(x) & /E p &"), "x s(x) r(x) & p & /E");
        assert_eq!(pnf_rpn("p x s(x) r(x) & /F &"), "x p s(x) r(x) & & /F");
    }

    #[test]
    fn disjunction() {
        assert_eq!(pnf_rpn("p x s(x) r(x) & /E |"), "x p s(x) r(x) & | /E");
        assert_eq!(pnf_rpn("x s(x) r(x) & /F p |"), "x s(x) r(x) & p | /F");
    }

    #[test]
    fn quantified_consequent() {
        assert_eq!(pnf_rpn("p x q(x) /E >"), "x p q(x) > /E");
        assert_eq!(pnf_rpn("p x q(x) r(x) | /F >"), "x p q(x) r(x) | > /F");
    }

    #[test]
    fn quantified_antecedent_dualizes() {
        assert_eq!(pnf_rpn("x p(x) /E q >"), "x p(x) q > /F");
        assert_eq!(pnf_rpn("x q(x) r(x) & /F p >"), "x q(x) r(x) & p > /E");
    }

    #[test]
    fn mixed() {
        assert_eq!(pnf_rpn("p x p(x) /E & q |"), "x p p(x) & q | /E");
        assert_eq!(pnf_rpn("p x q(x) /E > z p(z) /F &"), "z x p q(x) > p(z) & /E /F");
        assert_eq!(pnf_rpn("/f x p(x) /E q & r | >"), "x /f p(x) q & r | > /E");
    }

    #[test]
    fn nested() {
        assert_eq!(pnf_rpn("p x y q(x) /E /F >"), "x y p q(x) > /E /F");
        assert_eq!(pnf_rpn("z w p x y q(x) /E /F > /E /E"), "z w x y p q(x) > /E /F /E /E");
    }

    #[test]
    fn capture_forces_a_rename() {
        // hoisting ∃x past q(x) must not capture the free x
        assert_eq!(pnf_rpn("x p(x) /E q(x) &"), "x1 p(x1) q(x) & /E");
    }

    #[test]
    fn prefix_and_matrix() {
        let e = pnf(parse("z w p x y q(x) /E /F > /E /E").unwrap());
        assert_eq!(
            prefix(&e),
            vec![
                (Quant::Exists, Var::new("z")),
                (Quant::Exists, Var::new("w")),
                (Quant::Forall, Var::new("x")),
                (Quant::Exists, Var::new("y")),
            ]
        );
        assert_eq!(matrix(&e), &parse("p q(x) >").unwrap());
    }

    proptest! {
        #[test]
        fn matrix_after_pnf_is_quantifier_free(e in arb_formula(4, 10)) {
            prop_assert!(!matrix(&pnf(e)).has_quantifier());
        }
    }
}
