/// The evaluator module expands a parsed template into variations.
///
/// The evaluator walks the AST with a chained scope, expands `foreach` loops
/// into the Cartesian product of their sources, invokes builtins and
/// accumulates tile codes into variations.
///
/// # Responsibilities
/// - Resolves variables through the scope stack.
/// - Dispatches builtin calls and checks their arity.
/// - Decides variation boundaries and emits variations in order.
/// - Reports evaluation errors with source positions.
pub mod evaluator;
/// The lexer module tokenizes template source for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// paired with its line and column: keywords, identifiers, numbers, ranges,
/// quoted strings and punctuation. Comments are discarded.
///
/// # Responsibilities
/// - Converts the input character stream into positioned tokens.
/// - Matches keywords case-insensitively and resolves string escapes.
/// - Reports lexical errors for unterminated strings and stray characters.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and
/// constructs a [`Program`](crate::ast::Program): the metadata record and
/// the statements of the variations block, in source order.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes.
/// - Accepts both the brace and the colon block syntax.
/// - Validates structure and reports errors with source positions.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// # Responsibilities
/// - Defines the `Value` enum and its conversions.
/// - Defines tile groups and the variation output types.
pub mod value;
