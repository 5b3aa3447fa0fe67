use crate::{
    ast::Position,
    config::EngineConfig,
    error::EvalError,
    interpreter::{
        evaluator::{
            core::EvalResult,
            utils::{ensure_items, expect_args},
        },
        value::{
            core::Value,
            tile_group::{GroupKind, TileGroup},
        },
    },
    util::num::i64_to_usize_checked,
};

/// Builds a repeated tile group: `single`, `pair`, `pung`, `kong` or
/// `quint`.
///
/// With two arguments the tile code is `value` followed by `suit`
/// (`pair(3, b)` → `3b 3b`); with one argument the argument is the whole
/// code (`pair(F)` → `F F`).
///
/// # Errors
/// Returns `TypeError` if an argument cannot be part of a tile code.
pub fn repeated(kind: GroupKind, args: &[Value], position: Position) -> EvalResult<Value> {
    let code = args.iter()
                   .map(|arg| arg.tile_fragment(position))
                   .collect::<EvalResult<String>>()?;

    Ok(Value::Group(TileGroup::repeated(kind, &code)))
}

/// `sequence(start, suit, length)`: `length` consecutive tiles starting at
/// `start`, all in `suit`.
///
/// A length of zero gives an empty group, which adds nothing to the
/// variation.
///
/// # Errors
/// - `TypeError` if `start` or `length` is not an integer or `suit` cannot
///   be part of a tile code.
/// - `TypeError` if `length` is negative.
/// - `TooManyItems` if `length` is above
///   [`EngineConfig::max_items`](crate::config::EngineConfig::max_items).
/// - `Overflow` if a tile value leaves the `i64` range.
pub fn sequence(args: &[Value], config: &EngineConfig, position: Position) -> EvalResult<Value> {
    let [start, suit, length] = expect_args::<3>("sequence", args, position)?;

    let start = start.as_integer(position)?;
    let suit = suit.tile_fragment(position)?;
    let count = length.as_integer(position)?;
    let length = i64_to_usize_checked(count,
                                      EvalError::TypeError { details: format!("sequence length must not be negative, found {count}"),
                                                             position })?;
    ensure_items("sequence", u128::from(count.unsigned_abs()), config, position)?;

    TileGroup::sequence(start, &suit, length).map(Value::Group)
                                             .ok_or(EvalError::Overflow { position })
}
