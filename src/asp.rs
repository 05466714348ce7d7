//! ASP concrete syntax for normalized rules.
//!
//! Works on the structured [`Rule`], so atom names containing `-` or the
//! constant tokens are never mangled by textual replacement.

use crate::ast::Expr;
use crate::norm::Rule;

/// Render one extended literal: `not` for each negation, `#true`/`#false`
/// for the constants.
fn literal(e: &Expr, out: &mut String) {
    match e {
        Expr::Not(x) => {
            out.push_str("not ");
            literal(x, out);
        }
        Expr::True => out.push_str("#true"),
        Expr::False => out.push_str("#false"),
        other => out.push_str(&other.to_string()),
    }
}

fn join(side: &[Expr]) -> String {
    let mut out = String::new();
    for (i, e) in side.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        literal(e, &mut out);
    }
    out
}

/// Render a finished rule as an ASP rule, fact, or constraint.
pub fn to_asp(r: &Rule) -> String {
    let head = join(&r.head);
    let body = join(&r.body);
    if head.is_empty() && body.is_empty() {
        "#false.".to_string()
    } else if body.is_empty() {
        format!("{}.", head)
    } else if head.is_empty() {
        format!(":- {}.", body)
    } else {
        format!("{} :- {}.", head, body)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::parse;

    fn rule(body: &[&str], head: &[&str]) -> Rule {
        Rule {
            body: body.iter().map(|s| parse(s).unwrap()).collect(),
            head: head.iter().map(|s| parse(s).unwrap()).collect(),
        }
    }

    #[test]
    fn plain_rule() {
        assert_eq!(to_asp(&rule(&["r", "q"], &["p"])), "p :- r, q.");
    }

    #[test]
    fn disjunctive_fact() {
        assert_eq!(to_asp(&rule(&[], &["p", "q -"])), "p, not q.");
    }

    #[test]
    fn constraint() {
        assert_eq!(to_asp(&rule(&["p -", "q"], &[])), ":- not p, q.");
    }

    #[test]
    fn double_negation_and_constants() {
        assert_eq!(to_asp(&rule(&["/t"], &["q - -"])), "not not q :- #true.");
        assert_eq!(to_asp(&rule(&[], &["/f"])), "#false.");
        assert_eq!(to_asp(&rule(&[], &[])), "#false.");
    }

    #[test]
    fn atom_arguments_survive() {
        assert_eq!(to_asp(&rule(&["p(x,y)"], &["q(x) -"])), "not q(x) :- p(x,y).");
    }
}
