//! Property-based invariants of the pipeline over random formulas.

use proptest::prelude::*;
use regex::Regex;

use htnorm::ast::{Expr, Var};
use htnorm::filter;
use htnorm::nnf;
use htnorm::norm;
use htnorm::pnf;

pub fn arb_var() -> impl Strategy<Value = Var> {
    "[x-z]".prop_map(|s| Var(s)).boxed()
}

pub fn arb_atom() -> impl Strategy<Value = Expr> {
    "[a-s]{1,3}(\\([x-z]\\))?".prop_map(|s| Expr::atom(&s)).boxed()
}

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

/// One rule string: `-` literals in the body, up to `--` in the head,
/// exactly one turnstile.
fn rule_string_pattern() -> Regex {
    let lit = r"(/t|/f|[A-Za-z][A-Za-z0-9_]*(\([A-Za-z0-9_,]*\))?)";
    let body_lit = format!("-?{}", lit);
    let head_lit = format!("(--|-)?{}", lit);
    let pattern = format!(
        "^({bl}( & {bl})*)? > ({hl}( \\| {hl})*)?$",
        bl = body_lit,
        hl = head_lit
    );
    Regex::new(&pattern).unwrap()
}

proptest! {
    #[test]
    fn nnf_is_idempotent(e in arb_prop(4, 12)) {
        let once = nnf::nnf(e);
        prop_assert_eq!(nnf::nnf(once.clone()), once);
    }

    #[test]
    fn nnf_has_nnf_shape(e in arb_prop(4, 12)) {
        prop_assert!(nnf::check(&nnf::nnf(e)).is_ok());
    }

    #[test]
    fn rule_strings_are_well_shaped(e in arb_prop(3, 8)) {
        let re = rule_string_pattern();
        for s in norm::normalization(&nnf::nnf(e)) {
            prop_assert_eq!(s.matches(" > ").count(), 1, "rule: {}", s);
            prop_assert!(re.is_match(&s), "rule: {}", s);
        }
    }

    #[test]
    fn rules_hold_only_extended_literals(e in arb_prop(3, 8)) {
        for rule in norm::normalize(&nnf::nnf(e)) {
            prop_assert!(rule.body.iter().all(|x| x.is_ext_literal()));
            prop_assert!(rule
                .head
                .iter()
                .all(|x| x.is_ext_literal() || x.is_double_negation()));
        }
    }

    #[test]
    fn filter_only_removes_rules(e in arb_prop(3, 8)) {
        let rules = norm::normalize(&nnf::nnf(e));
        let kept = filter::minimize(&rules);
        prop_assert!(kept.len() <= rules.len());
        prop_assert!(kept.iter().all(|r| rules.contains(r)));
        // and it is a fixed point
        prop_assert_eq!(filter::minimize(&kept), kept);
    }

    #[test]
    fn normalization_is_deterministic(e in arb_prop(3, 8)) {
        let a = norm::normalization(&nnf::nnf(e.clone()));
        let b = norm::normalization(&nnf::nnf(e));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn pnf_matrix_is_quantifier_free(e in arb_formula(4, 10)) {
        let p = pnf::pnf(e);
        prop_assert!(!pnf::matrix(&p).has_quantifier());
    }
}
