//! Rule post-filtering: tautology elimination and subsumption.
//!
//! Both checks treat the body and head of a rule as sets of extended
//! literals; insertion order is irrelevant.

use crate::ast::Expr;
use crate::norm::Rule;

/// A rule whose body and head share a literal holds trivially.
pub fn is_tautology(r: &Rule) -> bool {
    r.body.iter().any(|b| r.head.contains(b))
}

/// `g` subsumes `f` when every body literal of `g` appears in `f`'s body
/// and every head literal of `g` in `f`'s head: the weaker rule `g` already
/// implies `f`.
pub fn subsumes(g: &Rule, f: &Rule) -> bool {
    subset(&g.body, &f.body) && subset(&g.head, &f.head)
}

fn subset(xs: &[Expr], ys: &[Expr]) -> bool {
    xs.iter().all(|x| ys.contains(x))
}

/// Drop tautologies, then every rule subsumed by another remaining rule.
///
/// Subsumption is judged against the whole tautology-free set at once, not
/// incrementally, so the result does not depend on rule order. A rule never
/// subsumes itself, and of two rules that subsume each other (equal as
/// sets) only the first is kept.
pub fn minimize(rules: &[Rule]) -> Vec<Rule> {
    let candidates: Vec<&Rule> = rules.iter().filter(|r| !is_tautology(r)).collect();
    let mut kept = Vec::new();
    for i in 0..candidates.len() {
        let f = candidates[i];
        let dropped = (0..candidates.len()).any(|j| {
            let g = candidates[j];
            j != i && subsumes(g, f) && (!subsumes(f, g) || j < i)
        });
        if !dropped {
            kept.push(f.clone());
        }
    }
    kept
}
