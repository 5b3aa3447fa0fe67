use thiserror::Error;

use crate::ast::Position;

/// Represents all errors that can occur while expanding a template.
///
/// Evaluation stops at the first error; no partial variation list is
/// returned alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Tried to read a name that is bound in no enclosing scope.
    #[error("Error on {position}: Unknown variable '{name}'.")]
    UnboundIdentifier {
        /// The name of the variable.
        name:     String,
        /// Where the reference is.
        position: Position,
    },
    /// Called a name that is not bound to a builtin.
    #[error("Error on {position}: Unknown function '{name}'.")]
    UnknownFunction {
        /// The name of the function.
        name:     String,
        /// Where the call is.
        position: Position,
    },
    /// A `foreach` source evaluated to something that cannot be iterated.
    #[error("Error on {position}: Cannot iterate over {node} ({found}).")]
    NotIterable {
        /// Description of the source expression.
        node:     String,
        /// The type the source evaluated to.
        found:    &'static str,
        /// Where the source expression is.
        position: Position,
    },
    /// Loops or calls are nested deeper than the configured limit.
    #[error("Error on {position}: Nesting exceeds the maximum depth of {limit}.")]
    NestingTooDeep {
        /// The configured limit.
        limit:    usize,
        /// Where the limit was crossed.
        position: Position,
    },
    /// A builtin was called with an unsupported number of arguments.
    #[error("Error on {position}: '{name}' expects {expected} argument(s), found {found}.")]
    ArgumentCountMismatch {
        /// The builtin's name.
        name:     String,
        /// The accepted argument counts.
        expected: String,
        /// The number of arguments supplied.
        found:    usize,
        /// Where the call is.
        position: Position,
    },
    /// A value had an unexpected or incompatible type.
    #[error("Error on {position}: Type error: {details}.")]
    TypeError {
        /// Details about the type mismatch.
        details:  String,
        /// Where the offending expression is.
        position: Position,
    },
    /// A tuple binding received a value of a different shape.
    #[error("Error on {position}: Cannot bind {found} to {expected} name(s).")]
    DestructureMismatch {
        /// Number of names in the binding.
        expected: usize,
        /// Description of the value received.
        found:    String,
        /// Where the binding is.
        position: Position,
    },
    /// Tried to index past the end of a list.
    #[error("Error on {position}: Index {found} out of bounds for a list of length {len}.")]
    IndexOutOfBounds {
        /// The length of the list.
        len:      usize,
        /// The requested index.
        found:    i64,
        /// Where the index expression is.
        position: Position,
    },
    /// Integer arithmetic left the 64-bit range.
    #[error("Error on {position}: Integer overflow.")]
    Overflow {
        /// Where the arithmetic is.
        position: Position,
    },
    /// A range, sequence, list or the variation output grew past
    /// [`EngineConfig::max_items`](crate::config::EngineConfig::max_items).
    #[error("Error on {position}: {what} would hold {found} items, more than the limit of {limit}.")]
    TooManyItems {
        /// What was being built, such as "range" or "permutations".
        what:     &'static str,
        /// The number of items requested, saturated at `u128::MAX`.
        found:    u128,
        /// The configured limit.
        limit:    usize,
        /// Where the construct is.
        position: Position,
    },
}

impl EvalError {
    /// Returns the position the error was reported at.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::UnboundIdentifier { position, .. }
            | Self::UnknownFunction { position, .. }
            | Self::NotIterable { position, .. }
            | Self::NestingTooDeep { position, .. }
            | Self::ArgumentCountMismatch { position, .. }
            | Self::TypeError { position, .. }
            | Self::DestructureMismatch { position, .. }
            | Self::IndexOutOfBounds { position, .. }
            | Self::TooManyItems { position, .. }
            | Self::Overflow { position } => *position,
        }
    }
}
