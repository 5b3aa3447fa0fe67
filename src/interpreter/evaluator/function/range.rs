use std::ops::RangeInclusive;

use crate::{
    ast::Position,
    config::EngineConfig,
    interpreter::{
        evaluator::{
            core::EvalResult,
            utils::{ensure_items, expect_args},
        },
        value::core::Value,
    },
};

/// Number of integers in `start..=end`; zero when the bounds are inverted.
#[must_use]
pub fn range_len(start: i64, end: i64) -> u128 {
    if start > end {
        return 0;
    }
    i128::from(end).abs_diff(i128::from(start)) + 1
}

/// The integers `start..=end`, checked against
/// [`EngineConfig::max_items`] but not materialized.
///
/// `foreach` iterates this directly, so a range literal never needs a list.
///
/// # Errors
/// Returns `TooManyItems` if the range is longer than the limit.
pub fn checked_range(start: i64,
                     end: i64,
                     config: &EngineConfig,
                     position: Position)
                     -> EvalResult<RangeInclusive<i64>> {
    ensure_items("range", range_len(start, end), config, position)?;
    Ok(start..=end)
}

/// The integers `start..=end` in ascending order, as a list.
///
/// Inverted bounds give an empty list rather than a descending one.
///
/// # Example
/// ```
/// use mtl::{
///     ast::Position,
///     config::EngineConfig,
///     interpreter::{evaluator::function::range::inclusive_range, value::core::Value},
/// };
///
/// let config = EngineConfig::default();
/// let at = Position::new(1, 1);
///
/// assert_eq!(inclusive_range(1, 3, &config, at).unwrap(),
///            Value::from(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]));
/// assert_eq!(inclusive_range(5, 1, &config, at).unwrap(), Value::from(Vec::<Value>::new()));
/// assert!(inclusive_range(0, i64::MAX, &config, at).is_err());
/// ```
///
/// # Errors
/// Returns `TooManyItems` if the range is longer than the limit.
pub fn inclusive_range(start: i64,
                       end: i64,
                       config: &EngineConfig,
                       position: Position)
                       -> EvalResult<Value> {
    Ok(checked_range(start, end, config, position)?.map(Value::Integer)
                                                   .collect::<Vec<_>>()
                                                   .into())
}

/// `range(a, b)`: the integers from `a` to `b` inclusive.
///
/// # Errors
/// Returns `TypeError` if either bound is not an integer, and `TooManyItems`
/// if the range is longer than the limit.
pub fn range(args: &[Value], config: &EngineConfig, position: Position) -> EvalResult<Value> {
    let [start, end] = expect_args::<2>("range", args, position)?;
    inclusive_range(start.as_integer(position)?,
                    end.as_integer(position)?,
                    config,
                    position)
}
