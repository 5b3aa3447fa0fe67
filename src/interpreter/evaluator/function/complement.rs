use crate::{
    ast::Position,
    interpreter::{
        evaluator::{core::EvalResult, utils::expect_args},
        value::core::Value,
    },
};

/// `complement(x, list)`: `list` without the first occurrence of `x`.
///
/// If `x` is itself a list, the first occurrence of each of its elements is
/// removed in turn. Elements that do not occur are ignored, so the result is
/// `list` unchanged when nothing matches. The remaining elements keep their
/// order.
///
/// # Example
/// ```
/// use mtl::{
///     ast::Position,
///     interpreter::{evaluator::function::complement::complement, value::core::Value},
/// };
///
/// let sym = |s: &str| Value::Symbol(s.into());
/// let suits = Value::from(vec![sym("b"), sym("c"), sym("d")]);
///
/// let rest = complement(&[sym("c"), suits], Position::new(1, 1)).unwrap();
/// assert_eq!(rest, Value::from(vec![sym("b"), sym("d")]));
/// ```
///
/// # Errors
/// Returns `TypeError` if the second argument is not a list.
pub fn complement(args: &[Value], position: Position) -> EvalResult<Value> {
    let [target, list] = expect_args::<2>("complement", args, position)?;

    let mut remaining = list.as_list(position)?.to_vec();
    let targets = match target {
        Value::List(items) => items.to_vec(),
        other => vec![other.clone()],
    };

    for target in &targets {
        if let Some(i) = remaining.iter().position(|item| same_element(item, target)) {
            remaining.remove(i);
        }
    }

    Ok(Value::from(remaining))
}

/// Element equality for `complement`: text and symbols compare by their
/// characters, so a metadata string matches a bare atom of the same name.
fn same_element(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Text(x) | Value::Symbol(x), Value::Text(y) | Value::Symbol(y)) => x == y,
        _ => a == b,
    }
}
