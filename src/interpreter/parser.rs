/// Entry points and the shared parser state.
///
/// Contains the program-level grammar (`metadata` block, then `variations`
/// block), the result alias, and the nesting guard threaded through the
/// recursive descent.
pub mod core;

/// Metadata block parsing.
///
/// Reads the flat key/value record that opens every template.
pub mod metadata;

/// Statement parsing.
///
/// Dispatches on the leading token to assignments, `foreach` loops and
/// tile-group calls.
pub mod statement;

/// Block parsing.
///
/// Handles both body forms: `{ ... }` and `: ... End`.
pub mod block;

/// Binary operator parsing.
///
/// Implements `+` and `*` with the usual precedence.
pub mod binary;

/// Primary expression parsing.
///
/// Literals, identifiers, calls, tuples, grouping and indexing.
pub mod primary;

/// Utility functions for the parser.
///
/// Provides token expectations, separator skipping and comma-separated list
/// parsing shared by the other parser modules.
pub mod utils;

pub use core::{ParseResult, parse, parse_with_limit};
