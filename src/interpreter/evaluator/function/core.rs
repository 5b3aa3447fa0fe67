use std::fmt;

use crate::{
    ast::{Expr, Position},
    config::EngineConfig,
    error::EvalError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter, Resolve},
            function::{complement, permutations, range, tile_group},
        },
        value::{core::Value, tile_group::GroupKind},
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives a slice of evaluated argument values, the engine limits
/// and the position of the call. It returns the resulting value wrapped in
/// `EvalResult`.
type BuiltinFn = fn(&[Value], &EngineConfig, Position) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `OneOf(slice)` means the builtin accepts any arity listed in `slice`.
#[derive(Clone, Copy)]
enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - how unbound identifiers among its arguments resolve,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                args: $resolve:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:    &'static str,
            arity:   Arity,
            resolve: Resolve,
            func:    BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, resolve: $resolve, func: $func },
            )*
        ];
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "single"       => { arity: Arity::OneOf(&[1, 2]), args: Resolve::Atom,   func: |args, _, pos| tile_group::repeated(GroupKind::Single, args, pos) },
    "pair"         => { arity: Arity::OneOf(&[1, 2]), args: Resolve::Atom,   func: |args, _, pos| tile_group::repeated(GroupKind::Pair, args, pos) },
    "pung"         => { arity: Arity::OneOf(&[1, 2]), args: Resolve::Atom,   func: |args, _, pos| tile_group::repeated(GroupKind::Pung, args, pos) },
    "kong"         => { arity: Arity::OneOf(&[1, 2]), args: Resolve::Atom,   func: |args, _, pos| tile_group::repeated(GroupKind::Kong, args, pos) },
    "quint"        => { arity: Arity::OneOf(&[1, 2]), args: Resolve::Atom,   func: |args, _, pos| tile_group::repeated(GroupKind::Quint, args, pos) },
    "sequence"     => { arity: Arity::Exact(3),       args: Resolve::Atom,   func: tile_group::sequence },
    "complement"   => { arity: Arity::Exact(2),       args: Resolve::Atom,   func: |args, _, pos| complement::complement(args, pos) },
    "permutations" => { arity: Arity::Exact(1),       args: Resolve::Strict, func: permutations::permutations },
    "range"        => { arity: Arity::Exact(2),       args: Resolve::Strict, func: range::range },
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    fn check(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::OneOf(arr) => arr.contains(&n),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::OneOf(counts) => {
                let counts = counts.iter().map(ToString::to_string).collect::<Vec<_>>();
                f.write_str(&counts.join(" or "))
            },
        }
    }
}

impl Interpreter {
    /// Evaluates a call to a builtin.
    ///
    /// The name is looked up in the scope stack and must be bound to a
    /// builtin. Arguments are evaluated left to right; for tile-group
    /// builtins and `complement`, unbound identifiers among them are tile
    /// atoms. The argument count is then checked and the handler runs.
    ///
    /// # Parameters
    /// - `name`: Function name.
    /// - `arguments`: Argument expressions.
    /// - `position`: Position of the call for error reporting.
    ///
    /// # Errors
    /// - `UnknownFunction` if `name` is not bound to a builtin.
    /// - `ArgumentCountMismatch` if the arity does not match.
    /// - `NestingTooDeep` if the call exceeds the depth limit.
    /// - Any error from the arguments or the handler.
    pub fn eval_call(&mut self,
                     name: &str,
                     arguments: &[Expr],
                     position: Position)
                     -> EvalResult<Value> {
        let builtin = match self.get_variable(name) {
            Some(Value::Builtin(bound)) => BUILTIN_TABLE.iter().find(|b| b.name == *bound),
            _ => None,
        }.ok_or_else(|| EvalError::UnknownFunction { name: name.to_string(),
                                                     position })?;

        self.descend(position, |this| {
                let args = arguments.iter()
                                    .map(|arg| this.eval_expr(arg, builtin.resolve))
                                    .collect::<EvalResult<Vec<_>>>()?;

                if !builtin.arity.check(args.len()) {
                    return Err(EvalError::ArgumentCountMismatch { name: name.to_string(),
                                                                  expected: builtin.arity.to_string(),
                                                                  found: args.len(),
                                                                  position });
                }

                (builtin.func)(&args, &this.config, position)
            })
    }
}
