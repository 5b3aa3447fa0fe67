use thiserror::Error;

use crate::ast::Position;

/// Represents all errors that can occur while tokenizing template source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A quoted string or tile literal was opened but never closed.
    #[error("Error on {position}: Unterminated string literal.")]
    UnterminatedString {
        /// Where the opening quote is.
        position: Position,
    },
    /// A character that cannot start any token.
    #[error("Error on {position}: Illegal character '{character}'.")]
    IllegalCharacter {
        /// The offending character.
        character: char,
        /// Where the character is.
        position:  Position,
    },
    /// An integer literal does not fit in 64 bits.
    #[error("Error on {position}: Integer literal '{literal}' is too large.")]
    LiteralTooLarge {
        /// The literal as written.
        literal:  String,
        /// Where the literal starts.
        position: Position,
    },
}

impl LexError {
    /// Returns the position the error was reported at.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::UnterminatedString { position }
            | Self::IllegalCharacter { position, .. }
            | Self::LiteralTooLarge { position, .. } => *position,
        }
    }
}
