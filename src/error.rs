//! Error types for the parser collaborator. The solver core itself never
//! returns an error: `Sat`/`Unsat` are its only outcomes, and anything else
//! going wrong inside the core is a `debug_assert!`-checked invariant
//! violation, not a recoverable condition.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DimacsError {
    #[error("missing 'p cnf <vars> <clauses>' header")]
    MissingHeader,

    #[error("malformed header line: {0:?}")]
    MalformedHeader(String),

    #[error("clause is missing its terminating 0")]
    UnterminatedClause,

    #[error("expected an integer literal, found {0:?}")]
    InvalidToken(String),
}
