//! htnorm — a normalizer for Here-and-There (HT) logic formulas.
//!
//! Takes a propositional or first-order formula over {¬, ∧, ∨, →}, ⊤/⊥ and
//! ∃/∀, and produces an equivalent logic program: rules of the form
//! `p1 & … & pN > q1 | … | qM` over extended literals. The transformation
//! is sound under HT semantics, the basis of Answer Set Programming; in
//! particular `¬¬x → x` is *not* a tautology here and double negations are
//! first-class.
//!
//! The pipeline is parse ([parser]) → prenex for first-order inputs ([pnf])
//! → negation normal form ([nnf]) → rule splitting ([norm]) → tautology and
//! subsumption filtering ([filter]) → ASP emission ([asp]).

#[macro_use]
extern crate lalrpop_util;

lalrpop_mod!(
    #[allow(clippy::all)]
    pub grammar
); // generated parser

pub mod asp;
pub mod ast;
pub mod error;
pub mod filter;
pub mod nnf;
pub mod norm;
pub mod parser;
pub mod pnf;

#[cfg(test)]
mod ast_strategy;
