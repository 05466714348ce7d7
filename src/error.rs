//! Error kinds surfaced by the formula pipeline.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormulaError {
    /// Parser boundary error: unbalanced RPN stack, unknown operator, or a
    /// quantifier whose variable slot is not an atom.
    #[error("malformed formula: {0}")]
    MalformedFormula(String),

    /// An expression reached the normalizer without being in negation
    /// normal form. Internal: well-formed inputs never produce this.
    #[error("not in negation normal form: {0}")]
    NotInNnf(String),
}
