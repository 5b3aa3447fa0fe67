use thiserror::Error;

use crate::ast::Position;

/// Lexing errors.
///
/// Raised by the tokenizer for malformed tokens: unterminated strings,
/// characters that start no token, and integer literals that overflow.
pub mod lex_error;
/// Parsing errors.
///
/// Defines every structural violation the parser reports: missing
/// `metadata`/`variations` blocks, unbalanced delimiters, malformed `foreach`
/// headers, unexpected tokens and excessive nesting.
pub mod parse_error;
/// Evaluation errors.
///
/// Contains all error types that can be raised while expanding a template:
/// unbound identifiers, unknown functions, non-iterable loop sources, type
/// mismatches and nesting limits.
pub mod eval_error;

pub use eval_error::EvalError;
pub use lex_error::LexError;
pub use parse_error::ParseError;

/// Any failure of a full compile, tagged by the stage that produced it.
///
/// Each stage fails fast, so a compile reports exactly one error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The source could not be tokenized.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The token stream is not a well-formed template.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The template failed while being expanded.
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl CompileError {
    /// Returns the source position the error refers to, if it has one.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        match self {
            Self::Lex(e) => Some(e.position()),
            Self::Parse(e) => e.position(),
            Self::Eval(e) => Some(e.position()),
        }
    }
}
