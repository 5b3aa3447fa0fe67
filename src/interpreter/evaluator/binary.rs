use std::rc::Rc;

use crate::{
    ast::{BinaryOperator, Expr, Position},
    error::EvalError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter, Resolve},
            utils::ensure_items,
        },
        value::core::Value,
    },
    util::num::i64_to_usize_checked,
};

impl Interpreter {
    /// Evaluates a binary operation.
    ///
    /// - `+` adds integers or concatenates two lists.
    /// - `*` multiplies integers.
    ///
    /// Both operands are evaluated left to right with unbound identifiers
    /// rejected.
    ///
    /// # Errors
    /// Returns `Overflow` if integer arithmetic leaves the `i64` range,
    /// `TooManyItems` if a concatenation is longer than
    /// [`EngineConfig::max_items`](crate::config::EngineConfig::max_items) and
    /// `TypeError` for any other operand types.
    pub fn eval_binary_op(&mut self,
                          left: &Expr,
                          op: BinaryOperator,
                          right: &Expr,
                          position: Position)
                          -> EvalResult<Value> {
        self.descend(position, |this| {
                let lhs = this.eval_expr(left, Resolve::Strict)?;
                let rhs = this.eval_expr(right, Resolve::Strict)?;

                match (op, &lhs, &rhs) {
                    (BinaryOperator::Add, Value::Integer(a), Value::Integer(b)) => {
                        a.checked_add(*b)
                         .map(Value::Integer)
                         .ok_or(EvalError::Overflow { position })
                    },
                    (BinaryOperator::Mul, Value::Integer(a), Value::Integer(b)) => {
                        a.checked_mul(*b)
                         .map(Value::Integer)
                         .ok_or(EvalError::Overflow { position })
                    },
                    (BinaryOperator::Add, Value::List(a), Value::List(b)) => {
                        let len = u128::try_from(a.len() + b.len()).unwrap_or(u128::MAX);
                        ensure_items("list", len, &this.config, position)?;
                        let mut joined = Vec::with_capacity(a.len() + b.len());
                        joined.extend(a.iter().cloned());
                        joined.extend(b.iter().cloned());
                        Ok(Value::List(Rc::new(joined)))
                    },
                    _ => Err(EvalError::TypeError { details: format!("cannot apply '{op}' to {} and {}",
                                                                     lhs.type_name(),
                                                                     rhs.type_name()),
                                                    position }),
                }
            })
    }

    /// Evaluates `target[index]` with a zero-based integer index.
    ///
    /// # Errors
    /// Returns `TypeError` if the target is not a list or the index is not an
    /// integer, and `IndexOutOfBounds` if the index is negative or past the
    /// end.
    pub fn eval_index(&mut self,
                      target: &Expr,
                      index: &Expr,
                      position: Position)
                      -> EvalResult<Value> {
        self.descend(position, |this| {
                let list = this.eval_expr(target, Resolve::Strict)?;
                let index = this.eval_expr(index, Resolve::Strict)?
                                .as_integer(position)?;
                let items = list.as_list(position)?;

                let out_of_bounds = || EvalError::IndexOutOfBounds { len: items.len(),
                                                                     found: index,
                                                                     position };
                let i = i64_to_usize_checked(index, out_of_bounds())?;
                items.get(i).cloned().ok_or_else(out_of_bounds)
            })
    }
}
