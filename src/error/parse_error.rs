use thiserror::Error;

use crate::ast::Position;

/// Represents all errors that can occur while parsing a token stream into a
/// [`Program`](crate::ast::Program).
///
/// Errors raised at the end of input carry no position; every other variant
/// points at the token that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The source does not open with a `metadata` block.
    #[error("Error on {position}: Expected 'metadata' block, found {found}.")]
    MissingMetadata {
        /// Description of the token found instead.
        found:    String,
        /// Where it was found.
        position: Position,
    },
    /// The metadata block is not followed by a `variations` block.
    #[error("Error on {position}: Expected 'variations' block, found {found}.")]
    MissingVariations {
        /// Description of the token found instead.
        found:    String,
        /// Where it was found.
        position: Position,
    },
    /// A statement starts with a token that begins no statement form.
    #[error("Error on {position}: Expected a statement, found {found}.")]
    ExpectedStatement {
        /// Description of the token found instead.
        found:    String,
        /// Where it was found.
        position: Position,
    },
    /// A `{`, `(` or `[` was opened and never closed.
    #[error("Error on {position}: Unclosed delimiter '{delimiter}'.")]
    UnclosedDelimiter {
        /// The opening delimiter.
        delimiter: char,
        /// Where the delimiter was opened.
        position:  Position,
    },
    /// A `foreach` header has no `in` clause.
    #[error("Error on {position}: Expected 'in' in foreach header, found {found}.")]
    MissingIn {
        /// Description of the token found instead.
        found:    String,
        /// Where it was found.
        position: Position,
    },
    /// Found an unexpected token while parsing.
    #[error("Error on {position}: Expected {expected}, found {found}.")]
    UnexpectedToken {
        /// What the parser was looking for.
        expected: String,
        /// Description of the token found instead.
        found:    String,
        /// Where it was found.
        position: Position,
    },
    /// Reached the end of input unexpectedly.
    #[error("Error at end of input: Expected {expected}.")]
    UnexpectedEndOfInput {
        /// What the parser was looking for.
        expected: String,
    },
    /// Found extra tokens after the variations block.
    #[error("Error on {position}: Unexpected {found} after the variations block.")]
    UnexpectedTrailingTokens {
        /// Description of the extra token.
        found:    String,
        /// Where it was found.
        position: Position,
    },
    /// Blocks or expressions are nested deeper than the configured limit.
    #[error("Error on {position}: Nesting exceeds the maximum depth of {limit}.")]
    NestingTooDeep {
        /// The configured limit.
        limit:    usize,
        /// Where the limit was crossed.
        position: Position,
    },
}

impl ParseError {
    /// Returns the position the error was reported at, or `None` for errors
    /// raised at the end of input.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        match self {
            Self::MissingMetadata { position, .. }
            | Self::MissingVariations { position, .. }
            | Self::ExpectedStatement { position, .. }
            | Self::UnclosedDelimiter { position, .. }
            | Self::MissingIn { position, .. }
            | Self::UnexpectedToken { position, .. }
            | Self::UnexpectedTrailingTokens { position, .. }
            | Self::NestingTooDeep { position, .. } => Some(*position),
            Self::UnexpectedEndOfInput { .. } => None,
        }
    }
}
