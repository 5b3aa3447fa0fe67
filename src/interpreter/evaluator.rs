/// Core evaluation logic and interpreter state.
///
/// Contains the `Interpreter`, block execution with variation emission, and
/// expression dispatch.
pub mod core;

/// Evaluation of `foreach` loops.
///
/// Iterates a source value, binding each element in a fresh scope and
/// executing the loop body.
pub mod for_loop;

/// Binary operator and indexing evaluation.
pub mod binary;

/// Utility functions for evaluation.
///
/// Scope management, bindings, the nesting guard and argument checks.
pub mod utils;

/// Function evaluation.
///
/// Builtin dispatch and the implementations of every builtin.
pub mod function;
