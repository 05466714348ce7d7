//! Negation Normal Form for HT formulas.
//!
//! HT negation is weaker than classical negation, and three rewrites differ
//! from the classical textbook ones:
//!
//! * `¬¬x` over an atom is a distinct semantic form and survives unchanged;
//! * only triple negation collapses, `¬¬¬x` to `¬x`;
//! * a negated implication becomes `¬¬a ∧ ¬b`, not `a ∧ ¬b`.
//!
//! Implications are kept in place (the rule-splitting phase consumes them
//! directly); everything else is pushed down until every negation wraps a
//! literal or a single further negation of one.

use crate::ast::Expr;
use crate::error::FormulaError;

/// Convert an expression to NNF.
///
/// Traversal is top-down and the result is a fixed point: `nnf(nnf(e))`
/// equals `nnf(e)` structurally.
pub fn nnf(e: Expr) -> Expr {
    match e {
        Expr::Not(inner) => nnf_not(*inner),
        Expr::And(l, r) => Expr::and(nnf(*l), nnf(*r)),
        Expr::Or(l, r) => Expr::or(nnf(*l), nnf(*r)),
        Expr::Implies(l, r) => Expr::implies(nnf(*l), nnf(*r)),
        Expr::Exists(v, b) => Expr::exists(v, nnf(*b)),
        Expr::Forall(v, b) => Expr::forall(v, nnf(*b)),
        leaf => leaf,
    }
}

/// NNF of `¬e`.
fn nnf_not(e: Expr) -> Expr {
    match e {
        Expr::True => Expr::False,
        Expr::False => Expr::True,
        a @ Expr::Atom(_) => Expr::fnot(a),
        Expr::Not(inner) => match *inner {
            // ¬¬¬x collapses to ¬x
            Expr::Not(x) => nnf_not(*x),
            // ¬¬ over an atom survives
            a @ Expr::Atom(_) => Expr::fnot(Expr::fnot(a)),
            Expr::True => Expr::True,
            Expr::False => Expr::False,
            // ¬¬ over a compound: push the inner negation through, then
            // negate the normalized result (¬¬(a ∧ b) becomes ¬¬a ∧ ¬¬b)
            compound => nnf_not(nnf_not(compound)),
        },
        Expr::And(l, r) => Expr::or(nnf_not(*l), nnf_not(*r)),
        Expr::Or(l, r) => Expr::and(nnf_not(*l), nnf_not(*r)),
        // HT: ¬(a → b) ≡ ¬¬a ∧ ¬b
        Expr::Implies(l, r) => Expr::and(nnf_not(Expr::fnot(*l)), nnf_not(*r)),
        Expr::Exists(v, b) => Expr::forall(v, nnf_not(*b)),
        Expr::Forall(v, b) => Expr::exists(v, nnf_not(*b)),
    }
}

/// Validate the NNF shape: every negation wraps a literal or a single
/// further negation of a literal. The normalizer debug-asserts this on its
/// input.
pub fn check(e: &Expr) -> Result<(), FormulaError> {
    match e {
        Expr::Not(x) => match &**x {
            lit if lit.is_literal() => Ok(()),
            Expr::Not(y) if y.is_literal() => Ok(()),
            other => Err(FormulaError::NotInNnf(format!("negation over `{}`", other))),
        },
        Expr::And(l, r) | Expr::Or(l, r) | Expr::Implies(l, r) => {
            check(l)?;
            check(r)
        }
        Expr::Exists(_, b) | Expr::Forall(_, b) => check(b),
        _ => Ok(()),
    }
}
