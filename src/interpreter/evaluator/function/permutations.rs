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

/// `permutations(list)`: every ordering of `list`, as a list of lists.
///
/// Orderings are generated by fixing each element as the head, in index
/// order, and permuting the remainder recursively. The output order follows
/// the input positions, not the element values, and equal elements are not
/// merged.
///
/// # Example
/// ```
/// use mtl::{
///     ast::Position,
///     config::EngineConfig,
///     interpreter::{evaluator::function::permutations::permutations, value::core::Value},
/// };
///
/// let list = Value::from(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]);
/// let all = permutations(&[list], &EngineConfig::default(), Position::new(1, 1)).unwrap();
/// let all = all.as_list(Position::new(1, 1)).unwrap();
///
/// assert_eq!(all.len(), 6);
/// assert_eq!(all[1].to_string(), "(1, 3, 2)");
/// ```
///
/// # Errors
/// - `TypeError` if the argument is not a list.
/// - `TooManyItems` if the number of orderings is above
///   [`EngineConfig::max_items`](crate::config::EngineConfig::max_items).
pub fn permutations(args: &[Value], config: &EngineConfig, position: Position) -> EvalResult<Value> {
    let [list] = expect_args::<1>("permutations", args, position)?;
    let items = list.as_list(position)?;
    ensure_items("permutations", orderings(items.len()), config, position)?;

    Ok(permute(items).into_iter()
                     .map(Value::from)
                     .collect::<Vec<_>>()
                     .into())
}

/// `len!`, saturating at `u128::MAX`.
fn orderings(len: usize) -> u128 {
    (2..=len).try_fold(1u128, |acc, n| u128::try_from(n).ok().and_then(|n| acc.checked_mul(n)))
             .unwrap_or(u128::MAX)
}

fn permute(items: &[Value]) -> Vec<Vec<Value>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }

    let mut out = Vec::new();
    for (i, head) in items.iter().enumerate() {
        let mut rest = items.to_vec();
        rest.remove(i);
        for tail in permute(&rest) {
            let mut ordering = Vec::with_capacity(items.len());
            ordering.push(head.clone());
            ordering.extend(tail);
            out.push(ordering);
        }
    }
    out
}
