//! # mtl
//!
//! mtl compiles Mahjong hand templates into concrete tile combinations.
//! A template describes a parameterized family of winning hands with loops,
//! tuple and range iteration, variable binding and combinatorial builtins;
//! compiling it lists every hand the family contains.
//!
//! ```
//! let source = r#"
//! metadata {
//!     name = "Like Kong Kong Pair"
//! }
//! variations {
//!     suits = (b, c, d)
//!     foreach (s1 in suits) {
//!         (s2, s3) = complement(s1, suits)
//!         foreach (n in 1..9) {
//!             kong(n, s2)
//!             kong(n, s3)
//!             pair(n, s1)
//!         }
//!     }
//! }
//! "#;
//!
//! let template = mtl::compile(source).unwrap();
//! assert_eq!(template.variations.len(), 27);
//! assert_eq!(template.variations[0].tiles[..4], ["1c", "1c", "1c", "1c"]);
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use tracing::debug;

use crate::{
    config::EngineConfig,
    error::{CompileError, EvalError},
    interpreter::{evaluator::core::Interpreter, parser::parse_with_limit},
};
pub use crate::{
    ast::Program,
    interpreter::{lexer::tokenize, parser::parse, value::variation::{CompiledTemplate, Variation}},
};

/// Defines the structure of parsed templates.
///
/// This module declares the `Program`, `Statement` and `Expr` types that
/// represent the syntactic structure of a template as a tree, along with the
/// metadata record and source positions. The AST is built by the parser and
/// traversed by the evaluator; it is immutable once built.
pub mod ast;
/// Engine configuration.
///
/// Nesting limits and identifier resolution policy, loadable from JSON.
pub mod config;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// Every error carries the source position it refers to and a readable
/// message. `CompileError` wraps the three stages for callers that run the
/// whole pipeline.
pub mod error;
/// Orchestrates the stages of compilation.
///
/// This module ties together lexing, parsing, evaluation and the value
/// representations.
pub mod interpreter;
/// General utilities for safe numeric conversion.
pub mod util;

/// Evaluates a parsed program with the default configuration.
///
/// # Errors
/// Returns the first [`EvalError`] raised while expanding the program.
pub fn evaluate(program: &Program) -> Result<Vec<Variation>, EvalError> {
    evaluate_with(program, &EngineConfig::default())
}

/// Evaluates a parsed program with the given configuration.
///
/// # Errors
/// Returns the first [`EvalError`] raised while expanding the program.
pub fn evaluate_with(program: &Program, config: &EngineConfig) -> Result<Vec<Variation>, EvalError> {
    Interpreter::new(*config).evaluate(program)
}

/// Compiles template source with the default configuration.
///
/// # Errors
/// Returns a [`CompileError`] from whichever stage failed first.
///
/// # Examples
/// ```
/// use mtl::{compile, error::CompileError};
///
/// let template = compile("metadata { }\nvariations { pair(1, b); pung(RD) }").unwrap();
/// assert_eq!(template.variations[0].tiles, ["1b", "1b", "RD", "RD", "RD"]);
///
/// // Missing variations block.
/// assert!(matches!(compile("metadata { }"), Err(CompileError::Parse(_))));
/// ```
pub fn compile(source: &str) -> Result<CompiledTemplate, CompileError> {
    compile_with(source, &EngineConfig::default())
}

/// Compiles template source: tokenize, parse, then evaluate.
///
/// Each stage fails fast; a lex error prevents parsing and a parse error
/// prevents evaluation.
///
/// # Errors
/// Returns a [`CompileError`] from whichever stage failed first.
pub fn compile_with(source: &str, config: &EngineConfig) -> Result<CompiledTemplate, CompileError> {
    let tokens = tokenize(source)?;
    debug!(tokens = tokens.len(), "tokenized template");

    let program = parse_with_limit(&tokens, config.max_depth)?;
    debug!(metadata = program.metadata.len(),
           statements = program.body.len(),
           "parsed template");

    let variations = evaluate_with(&program, config)?;

    Ok(CompiledTemplate { metadata: program.metadata,
                          variations })
}
