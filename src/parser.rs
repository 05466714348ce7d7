//! Thin wrapper around the generated RPN parser.

use lalrpop_util::ParseError;

use crate::ast::Expr;
use crate::error::FormulaError;
use crate::grammar;

/// Parse a whitespace-separated RPN token string into an expression tree.
///
/// Every lexical or structural problem (unknown token, leftover operands,
/// missing operands, bad quantifier variable) comes back as
/// [`FormulaError::MalformedFormula`].
pub fn parse(input: &str) -> Result<Expr, FormulaError> {
    grammar::FormulaParser::new().parse(input).map_err(|e| match e {
        ParseError::User { error } => error,
        other => FormulaError::MalformedFormula(other.to_string()),
    })
}
