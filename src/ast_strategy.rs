//! Property-based testing strategies for [`crate::ast::Expr`].

use crate::ast::{Expr, Var};
use proptest::prelude::*;

pub fn arb_var() -> impl Strategy<Value = Var> {
    "[x-z]".prop_map(|s| Var(s)).boxed()
}

pub fn arb_atom() -> impl Strategy<Value = Expr> {
    // plain propositions plus unary predicates over x..z
    "[a-s]{1,3}(\\([x-z]\\))?".prop_map(|s| Expr::atom(&s)).boxed()
}

/// Propositional formulas, the normalizer's input space.
pub fn arb_prop(max_depth: u32, max_size: u32) -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![arb_atom(), Just(Expr::True), Just(Expr::False)];
    leaf.prop_recursive(max_depth, max_size, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Expr::fnot),
            (inner.clone(), inner.clone()).prop_map(|(p, q)| Expr::and(p, q)),
            (inner.clone(), inner.clone()).prop_map(|(p, q)| Expr::or(p, q)),
            (inner.clone(), inner.clone()).prop_map(|(p, q)| Expr::implies(p, q)),
        ]
    })
}

/// First-order formulas, for the PNF properties.
pub fn arb_formula(max_depth: u32, max_size: u32) -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![arb_atom(), Just(Expr::True), Just(Expr::False)];
    leaf.prop_recursive(max_depth, max_size, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Expr::fnot),
            (inner.clone(), inner.clone()).prop_map(|(p, q)| Expr::and(p, q)),
            (inner.clone(), inner.clone()).prop_map(|(p, q)| Expr::or(p, q)),
            (inner.clone(), inner.clone()).prop_map(|(p, q)| Expr::implies(p, q)),
            (arb_var(), inner.clone()).prop_map(|(v, p)| Expr::exists(v, p)),
            (arb_var(), inner).prop_map(|(v, p)| Expr::forall(v, p)),
        ]
    })
}
