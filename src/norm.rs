//! Rule-splitting normalization.
//!
//! Turns an NNF formula into a set of program rules
//! `b1 & … & bk > h1 | … | hm` whose conjunction is HT-equivalent to the
//! input. A worklist of partial rules is rewritten step by step; each step
//! finishes a rule, refines one, or splits one into alternatives. The
//! worklist is explicit, so deeply nested disjunction/implication chains
//! cannot exhaust the call stack.
//!
//! The two moves that are specific to HT: a double negation crosses the
//! turnstile with one negation stripped (`¬¬x` in the body becomes `¬x` in
//! the head, and dually), and an implication in the head splits into its
//! curried form plus its HT contrapositive.

use std::collections::BTreeSet;
use std::fmt;

use crate::ast::Expr;
use crate::nnf;

/// A finished rule: conjunctive body, disjunctive head. Either side may be
/// empty. Literal order follows insertion order during normalization.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rule {
    pub body: Vec<Expr>,
    pub head: Vec<Expr>,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let body: Vec<String> = self.body.iter().map(|e| e.to_string()).collect();
        let head: Vec<String> = self.head.iter().map(|e| e.to_string()).collect();
        write!(f, "{} > {}", body.join(" & "), head.join(" | "))
    }
}

/// A rule under construction: finished extended literals on either side of
/// the turnstile, plus the subformulas still waiting to be decomposed.
#[derive(Clone, Debug, PartialEq, Eq)]
struct PartialRule {
    body: Vec<Expr>,
    body_todo: Vec<Expr>,
    head: Vec<Expr>,
    head_todo: Vec<Expr>,
}

/// Set-flavored push: slots are deduplicated by structural equality and
/// keep insertion order.
fn insert(slot: &mut Vec<Expr>, e: Expr) {
    if !slot.contains(&e) {
        slot.push(e);
    }
}

impl PartialRule {
    fn seed(e: &Expr) -> Self {
        let (body_todo, head_todo) = match e {
            // a top-level implication seeds both sides of the turnstile
            Expr::Implies(a, b) => (vec![(**a).clone()], vec![(**b).clone()]),
            other => (Vec::new(), vec![other.clone()]),
        };
        PartialRule {
            body: Vec::new(),
            body_todo,
            head: Vec::new(),
            head_todo,
        }
    }

    fn finish(self) -> Rule {
        Rule {
            body: self.body,
            head: self.head,
        }
    }

    /// Try the consequent rules R1..R7 in order. `None` means nothing in
    /// `head_todo` matched; an empty replacement list discards the rule.
    fn step_right(&self) -> Option<Vec<PartialRule>> {
        // R1: ⊤ in the head, the rule holds trivially
        if self.head_todo.contains(&Expr::True) {
            return Some(vec![]);
        }
        // R2: ⊥ disappears from a disjunction
        if let Some(i) = self.head_todo.iter().position(|e| *e == Expr::False) {
            let mut g = self.clone();
            g.head_todo.remove(i);
            return Some(vec![g]);
        }
        // R3: extended literals are finished
        if let Some(i) = self.head_todo.iter().position(|e| e.is_ext_literal()) {
            let mut g = self.clone();
            let lit = g.head_todo.remove(i);
            insert(&mut g.head, lit);
            return Some(vec![g]);
        }
        // R4: A > C | ¬¬x becomes A & ¬x > C
        if let Some((i, neg)) = find_double_negation(&self.head_todo) {
            let mut g = self.clone();
            g.head_todo.remove(i);
            insert(&mut g.body_todo, neg);
            return Some(vec![g]);
        }
        // R5: a disjunction flattens in place
        if let Some((i, l, r)) = find_binary(&self.head_todo, BinKind::Or) {
            let mut g = self.clone();
            g.head_todo.remove(i);
            insert(&mut g.head_todo, l);
            insert(&mut g.head_todo, r);
            return Some(vec![g]);
        }
        // R6: a conjunction splits the rule
        if let Some((i, l, r)) = find_binary(&self.head_todo, BinKind::And) {
            let mut g = self.clone();
            g.head_todo.remove(i);
            let mut h = g.clone();
            insert(&mut g.head_todo, l);
            insert(&mut h.head_todo, r);
            return Some(vec![g, h]);
        }
        // R7: A > C | (a > b) splits into the curried form and the HT
        // contrapositive
        if let Some((i, a, b)) = find_binary(&self.head_todo, BinKind::Implies) {
            let mut g = self.clone();
            g.head_todo.remove(i);
            let mut h = g.clone();
            insert(&mut g.body_todo, a.clone());
            insert(&mut g.head_todo, b.clone());
            insert(&mut h.body_todo, nnf::nnf(Expr::fnot(b)));
            insert(&mut h.head_todo, nnf::nnf(Expr::fnot(a)));
            return Some(vec![g, h]);
        }
        None
    }

    /// Try the antecedent rules L1..L7 in order; see [`PartialRule::step_right`].
    fn step_left(&self) -> Option<Vec<PartialRule>> {
        // L1: ⊥ in the body, the rule is vacuous
        if self.body_todo.contains(&Expr::False) {
            return Some(vec![]);
        }
        // L2: ⊤ disappears from a conjunction
        if let Some(i) = self.body_todo.iter().position(|e| *e == Expr::True) {
            let mut g = self.clone();
            g.body_todo.remove(i);
            return Some(vec![g]);
        }
        // L3: extended literals are finished
        if let Some(i) = self.body_todo.iter().position(|e| e.is_ext_literal()) {
            let mut g = self.clone();
            let lit = g.body_todo.remove(i);
            insert(&mut g.body, lit);
            return Some(vec![g]);
        }
        // L4: A & ¬¬x > C becomes A > C | ¬x
        if let Some((i, neg)) = find_double_negation(&self.body_todo) {
            let mut g = self.clone();
            g.body_todo.remove(i);
            insert(&mut g.head_todo, neg);
            return Some(vec![g]);
        }
        // L5: a conjunction flattens in place
        if let Some((i, l, r)) = find_binary(&self.body_todo, BinKind::And) {
            let mut g = self.clone();
            g.body_todo.remove(i);
            insert(&mut g.body_todo, l);
            insert(&mut g.body_todo, r);
            return Some(vec![g]);
        }
        // L6: a disjunction splits the rule
        if let Some((i, l, r)) = find_binary(&self.body_todo, BinKind::Or) {
            let mut g = self.clone();
            g.body_todo.remove(i);
            let mut h = g.clone();
            insert(&mut g.body_todo, l);
            insert(&mut h.body_todo, r);
            return Some(vec![g, h]);
        }
        // L7: (a > b) & A > C splits three ways: ¬a holds, or b holds, or
        // the implication fails outright on the other side
        if let Some((i, a, b)) = find_binary(&self.body_todo, BinKind::Implies) {
            let mut g = self.clone();
            g.body_todo.remove(i);
            let mut h = g.clone();
            let mut j = g.clone();
            insert(&mut g.body_todo, nnf::nnf(Expr::fnot(a.clone())));
            insert(&mut h.body_todo, b.clone());
            insert(&mut j.head_todo, a);
            insert(&mut j.head_todo, nnf::nnf(Expr::fnot(b)));
            return Some(vec![g, h, j]);
        }
        None
    }
}

enum BinKind {
    And,
    Or,
    Implies,
}

/// First pending subformula of the given binary kind, with its operands.
fn find_binary(slot: &[Expr], kind: BinKind) -> Option<(usize, Expr, Expr)> {
    slot.iter().enumerate().find_map(|(i, e)| match (e, &kind) {
        (Expr::And(l, r), BinKind::And)
        | (Expr::Or(l, r), BinKind::Or)
        | (Expr::Implies(l, r), BinKind::Implies) => Some((i, (**l).clone(), (**r).clone())),
        _ => None,
    })
}

/// First pending `¬¬φ`, returning the inner `¬φ` (one negation stripped).
fn find_double_negation(slot: &[Expr]) -> Option<(usize, Expr)> {
    slot.iter().enumerate().find_map(|(i, e)| match e {
        Expr::Not(x) if matches!(&**x, Expr::Not(_)) => Some((i, (**x).clone())),
        _ => None,
    })
}

/// Normalize an NNF expression into a deduplicated list of finished rules.
///
/// A top-level implication seeds the initial partial rule on both sides of
/// the turnstile; any other formula starts as a bare head. The worklist is
/// drained by trying head rules first, then body rules; the first
/// applicable rule wins. A partial rule nothing applies to is finished (on
/// NNF input this only happens when both todo slots are empty).
pub fn normalize(e: &Expr) -> Vec<Rule> {
    debug_assert!(
        nnf::check(e).is_ok(),
        "normalize expects an NNF input: {}",
        e
    );

    let mut done: Vec<Rule> = Vec::new();
    let mut work = vec![PartialRule::seed(e)];
    while let Some(f) = work.pop() {
        let replacements = if !f.head_todo.is_empty() {
            f.step_right()
        } else if !f.body_todo.is_empty() {
            f.step_left()
        } else {
            None
        };
        match replacements {
            Some(rules) => work.extend(rules),
            None => {
                let rule = f.finish();
                if !done.contains(&rule) {
                    done.push(rule);
                }
            }
        }
    }
    done
}

/// Render the normalization of an NNF expression as the set of rule strings
/// `"b1 & … > h1 | …"`; an empty side renders as empty.
pub fn normalization(e: &Expr) -> BTreeSet<String> {
    normalize(e).iter().map(|r| r.to_string()).collect()
}
