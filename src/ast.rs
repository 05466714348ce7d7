//! AST module
//!
//! This module defines the expression tree for propositional and first-order
//! formulas of Here-and-There (HT) logic, over the connectives {¬, ∧, ∨, →},
//! the truth constants ⊤/⊥, and the quantifiers ∃/∀.
//!
//! For example (RPN concrete syntax in parentheses):
//!
//! 1) q ∨ p                 (`q p |`)
//! 2) (⊤ ∧ ¬¬q) → p         (`/t q - - & p >`)
//! 3) ∃x. (p ∨ (s(x) ∧ r(x)))   (`p x s(x) r(x) & /E |`, after PNF)
//!
//! The tree is produced by the parser defined in `grammar.lalrpop`.
//!
//! Expressions are immutable values: every rewrite builds fresh nodes and
//! shared subtrees are never mutated. Equality, ordering into sets, and
//! hashing are all structural, so the derived impls are the right ones.

use std::fmt;

use crate::error::FormulaError;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expr {
    /// Atomic proposition; the payload is a single input token, e.g. `p` or
    /// `q(x)`
    Atom(String),
    /// ⊤, concrete syntax `/t`
    True,
    /// ⊥, concrete syntax `/f`
    False,
    /// Negation
    Not(Box<Expr>),
    /// AND
    And(Box<Expr>, Box<Expr>),
    /// Inclusive OR
    Or(Box<Expr>, Box<Expr>),
    /// Implication; the left child is the antecedent
    Implies(Box<Expr>, Box<Expr>),
    /// exists x. p(x)
    Exists(Var, Box<Expr>),
    /// forall x. p(x)
    Forall(Var, Box<Expr>),
}

/// Implement smart constructors
impl Expr {
    pub fn atom(name: &str) -> Self {
        Expr::Atom(name.to_string())
    }

    /// Formula not
    pub fn fnot(p: Self) -> Self {
        Expr::Not(Box::new(p))
    }

    pub fn and(p: Self, q: Self) -> Self {
        Expr::And(Box::new(p), Box::new(q))
    }

    pub fn or(p: Self, q: Self) -> Self {
        Expr::Or(Box::new(p), Box::new(q))
    }

    pub fn implies(p: Self, q: Self) -> Self {
        Expr::Implies(Box::new(p), Box::new(q))
    }

    pub fn exists(v: Var, p: Self) -> Self {
        Expr::Exists(v, Box::new(p))
    }

    pub fn forall(v: Var, p: Self) -> Self {
        Expr::Forall(v, Box::new(p))
    }

    /// Build an existential quantifier from parser operands. The variable
    /// slot must be a literal; its token becomes the bound-variable name.
    pub fn exists_over(var: Expr, body: Expr) -> Result<Expr, FormulaError> {
        Ok(Expr::Exists(Self::bound_var(var)?, Box::new(body)))
    }

    /// Build a universal quantifier from parser operands; see [`Expr::exists_over`].
    pub fn forall_over(var: Expr, body: Expr) -> Result<Expr, FormulaError> {
        Ok(Expr::Forall(Self::bound_var(var)?, Box::new(body)))
    }

    fn bound_var(var: Expr) -> Result<Var, FormulaError> {
        match var {
            Expr::Atom(name) => Ok(Var(name)),
            Expr::True => Ok(Var("/t".to_string())),
            Expr::False => Ok(Var("/f".to_string())),
            other => Err(FormulaError::MalformedFormula(format!(
                "quantifier variable must be a literal, got `{}`",
                other
            ))),
        }
    }
}

/// Implement structural predicates
impl Expr {
    /// An atom or a truth constant.
    pub fn is_literal(&self) -> bool {
        matches!(self, Expr::Atom(_) | Expr::True | Expr::False)
    }

    /// A literal or a negated literal. Under HT semantics `¬¬x` is *not* an
    /// extended literal: double negation is a distinct form.
    pub fn is_ext_literal(&self) -> bool {
        match self {
            Expr::Not(x) => x.is_literal(),
            e => e.is_literal(),
        }
    }

    /// A doubly-negated subformula, `¬¬φ`.
    pub fn is_double_negation(&self) -> bool {
        match self {
            Expr::Not(x) => matches!(&**x, Expr::Not(_)),
            _ => false,
        }
    }

    pub fn is_quantifier(&self) -> bool {
        matches!(self, Expr::Exists(_, _) | Expr::Forall(_, _))
    }

    /// True if any quantifier occurs anywhere in the tree.
    pub fn has_quantifier(&self) -> bool {
        match self {
            Expr::Atom(_) | Expr::True | Expr::False => false,
            Expr::Not(e) => e.has_quantifier(),
            Expr::And(l, r) | Expr::Or(l, r) | Expr::Implies(l, r) => {
                l.has_quantifier() || r.has_quantifier()
            }
            Expr::Exists(_, _) | Expr::Forall(_, _) => true,
        }
    }
}

/// Implement variable handling. Variables occur *inside* atom tokens
/// (`q(x,y)` mentions `x` and `y`), so occurrence checks and renames work on
/// the identifiers embedded in atom names.
impl Expr {
    /// True if `var` occurs free in `self`, i.e. as a whole identifier
    /// inside some atom token outside the scope of a quantifier rebinding it.
    pub fn mentions_var(&self, var: &Var) -> bool {
        match self {
            Expr::Atom(name) => idents(name).any(|id| id == var.0),
            Expr::True | Expr::False => false,
            Expr::Not(e) => e.mentions_var(var),
            Expr::And(l, r) | Expr::Or(l, r) | Expr::Implies(l, r) => {
                l.mentions_var(var) || r.mentions_var(var)
            }
            Expr::Exists(v, b) | Expr::Forall(v, b) => v != var && b.mentions_var(var),
        }
    }

    /// Rename free occurrences of `var` to `to`, leaving subtrees that
    /// rebind `var` untouched.
    pub fn rename_var(&self, var: &Var, to: &Var) -> Expr {
        match self {
            Expr::Atom(name) => Expr::Atom(rename_idents(name, &var.0, &to.0)),
            Expr::True | Expr::False => self.clone(),
            Expr::Not(e) => Expr::fnot(e.rename_var(var, to)),
            Expr::And(l, r) => Expr::and(l.rename_var(var, to), r.rename_var(var, to)),
            Expr::Or(l, r) => Expr::or(l.rename_var(var, to), r.rename_var(var, to)),
            Expr::Implies(l, r) => Expr::implies(l.rename_var(var, to), r.rename_var(var, to)),
            Expr::Exists(v, _) | Expr::Forall(v, _) if v == var => self.clone(),
            Expr::Exists(v, b) => Expr::exists(v.clone(), b.rename_var(var, to)),
            Expr::Forall(v, b) => Expr::forall(v.clone(), b.rename_var(var, to)),
        }
    }

    /// Serialize back to the RPN concrete syntax accepted by the parser.
    pub fn to_rpn(&self) -> String {
        fn go(e: &Expr, out: &mut String) {
            match e {
                Expr::Atom(s) => out.push_str(s),
                Expr::True => out.push_str("/t"),
                Expr::False => out.push_str("/f"),
                Expr::Not(x) => {
                    go(x, out);
                    out.push_str(" -");
                }
                Expr::And(l, r) => bin(l, r, "&", out),
                Expr::Or(l, r) => bin(l, r, "|", out),
                Expr::Implies(l, r) => bin(l, r, ">", out),
                Expr::Exists(v, b) => quant(v, b, "/E", out),
                Expr::Forall(v, b) => quant(v, b, "/F", out),
            }
        }
        fn bin(l: &Expr, r: &Expr, op: &str, out: &mut String) {
            go(l, out);
            out.push(' ');
            go(r, out);
            out.push(' ');
            out.push_str(op);
        }
        fn quant(v: &Var, b: &Expr, op: &str, out: &mut String) {
            out.push_str(&v.0);
            out.push(' ');
            go(b, out);
            out.push(' ');
            out.push_str(op);
        }
        let mut out = String::new();
        go(self, &mut out);
        out
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Atom(s) => write!(f, "{}", s),
            Expr::True => write!(f, "/t"),
            Expr::False => write!(f, "/f"),
            Expr::Not(x) => write!(f, "-{}", x),
            Expr::And(l, r) => write!(f, "({} & {})", l, r),
            Expr::Or(l, r) => write!(f, "({} | {})", l, r),
            Expr::Implies(l, r) => write!(f, "({} > {})", l, r),
            Expr::Exists(v, b) => write!(f, "(∃{}. {})", v, b),
            Expr::Forall(v, b) => write!(f, "(∀{}. {})", v, b),
        }
    }
}

/// `Var` represents a bound-variable name, a newtype over String
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Var(pub String);

/// Implement smart constructor
impl Var {
    pub fn new(name: &str) -> Self {
        Var(name.to_string())
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Split an atom token into the identifiers it contains: `q(x,y1)` yields
/// `q`, `x`, `y1`.
fn idents(name: &str) -> impl Iterator<Item = &str> {
    name.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|s| !s.is_empty())
}

/// Rewrite `name` with every whole-identifier occurrence of `from` replaced
/// by `to`; delimiters are preserved.
fn rename_idents(name: &str, from: &str, to: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut run = String::new();
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            run.push(c);
        } else {
            flush_ident(&mut out, &mut run, from, to);
            out.push(c);
        }
    }
    flush_ident(&mut out, &mut run, from, to);
    out
}

fn flush_ident(out: &mut String, run: &mut String, from: &str, to: &str) {
    if run == from {
        out.push_str(to);
    } else {
        out.push_str(run);
    }
    run.clear();
}
